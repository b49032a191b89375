use crate::cli::commands::open_session;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::admin::check_password;
use crate::core::report::arrivals_by_hour;
use crate::errors::AppResult;
use crate::ui::messages::{header, info};
use ansi_term::Colour;

/// Handle `stats`: arrivals per hour, behind the admin password.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Stats { password } = cmd {
        check_password(cfg, password)?;

        let (_pool, state) = open_session(cfg)?;
        let session = state.active()?;
        let hours = arrivals_by_hour(session.ledger.guests());

        header(format!("Arrivals per hour: {}", session.event_name));
        if hours.is_empty() {
            info("No arrivals yet.");
            return Ok(());
        }

        let peak = hours.values().copied().max().unwrap_or(1).max(1);
        for (hour, count) in &hours {
            let bar = "█".repeat((count * 30).div_ceil(peak));
            println!("{}:00  {:>4}  {}", hour, count, Colour::Cyan.paint(bar));
        }
    }
    Ok(())
}
