use crate::cli::commands::open_session;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::session::EventSession;
use crate::errors::AppResult;
use crate::ui::messages::{header, info, warning};
use crate::utils::colors::{color_for_capacity, color_for_status, color_for_sync, progress_bar};
use crate::utils::table::Table;
use crate::utils::time::{format_elapsed, now};
use chrono::NaiveDateTime;

/// Handle `list` and `status`.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let (_pool, state) = open_session(cfg)?;
    let session = state.active()?;

    match cmd {
        Commands::List => print_guests(session),
        Commands::Status => print_status(session, cfg, now()),
        _ => {}
    }
    Ok(())
}

pub(crate) fn print_guests(session: &EventSession) {
    header(&session.event_name);

    if session.ledger.is_empty() {
        info("No guests registered yet.");
        return;
    }

    let mut table = Table::new(["", "Id", "Time", "Name", "Category", "Age", "Status"]);
    for g in session.ledger.guests() {
        table.add_row(vec![
            color_for_sync(g.sync_state).paint(g.sync_state.marker()).to_string(),
            g.id.clone(),
            g.time_str(),
            g.name.clone(),
            g.category.label().to_string(),
            g.age_display.clone(),
            color_for_status(g.status).paint(g.status.label()).to_string(),
        ]);
    }
    print!("{}", table.render());
}

pub(crate) fn print_status(session: &EventSession, cfg: &Config, at: NaiveDateTime) {
    let s = session.summary();
    let cap = session.capacity_status();

    header(&session.event_name);
    println!("Total     : {}", s.total);
    println!("Paying    : {}", s.paying);
    println!("Exempt    : {}", s.exempt);
    println!("Courtesy  : {}", s.courtesy);

    let color = color_for_capacity(cap.ratio, cap.reached);
    println!(
        "Capacity  : {} {}/{}",
        color.paint(progress_bar(cap.ratio, 20)),
        cap.total,
        cap.capacity
    );
    if cap.reached {
        warning("Capacity reached. Guests are still accepted.");
    }

    match session.ledger.last_added_at() {
        Some(last) if session.ledger.undo_available(at, cfg.undo_window()) => {
            let left = cfg.undo_window() - (at - last);
            let head = session.ledger.head().map(|g| g.name.as_str()).unwrap_or("-");
            println!("Undo      : {} ({} left)", head, format_elapsed(left));
        }
        _ => println!("Undo      : not available"),
    }
}
