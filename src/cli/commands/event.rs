use crate::cli::commands::open_session;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::desk::CheckInDesk;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{confirm, header, info, success, warning};
use crate::utils::time::now;

/// Handle `start`, `join`, `events` and `end`.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    match cmd {
        Commands::Start { event, capacity } => {
            let (pool, mut state) = open_session(cfg)?;
            let mut desk = CheckInDesk::new(&pool, cfg);

            let announced = desk.start_event(&mut state, event, *capacity, now())?;
            let session = state.active()?;
            success(format!(
                "Event '{}' started, capacity {}",
                session.event_name, session.capacity
            ));
            if announced {
                info("Announced on the sheet, other desks can join it.");
            } else if desk.adapter().is_online() {
                warning("Event not announced on the sheet; other desks cannot join it yet.");
            } else {
                info("Offline mode: guests are kept on this desk only.");
            }
        }

        Commands::Join { event } => {
            let (pool, mut state) = open_session(cfg)?;
            let mut desk = CheckInDesk::new(&pool, cfg);

            let loaded = desk.join_event(&mut state, event, now())?;
            let session = state.active()?;
            success(format!(
                "Joined '{}': {} guests loaded, capacity {}",
                session.event_name, loaded, session.capacity
            ));
        }

        Commands::Events => {
            let pool = DbPool::new(&cfg.database)?;
            let desk = CheckInDesk::new(&pool, cfg);

            let events = desk.active_events(now());
            if events.is_empty() {
                info("No events on the sheet today.");
            } else {
                header("Events today");
                for e in events {
                    println!("  • {}", e);
                }
            }
        }

        Commands::End { yes } => {
            let (pool, mut state) = open_session(cfg)?;
            let name = state.active()?.event_name.clone();
            if !*yes && !confirm(format!("End event '{}' on this desk?", name))? {
                info("Event kept open.");
                return Ok(());
            }

            let mut desk = CheckInDesk::new(&pool, cfg);
            let ended = desk.end_event(&mut state)?;
            let s = ended.summary();
            success(format!(
                "Event '{}' ended: {} guests, {} paying.",
                ended.event_name, s.total, s.paying
            ));
        }

        _ => {}
    }
    Ok(())
}
