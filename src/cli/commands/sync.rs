use crate::cli::commands::open_session;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::desk::CheckInDesk;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};
use crate::utils::time::now;

/// Handle `sync`: blocking reload of the guest list from the sheet.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Sync = cmd {
        let (pool, mut state) = open_session(cfg)?;
        let mut desk = CheckInDesk::new(&pool, cfg);

        if !desk.adapter().is_online() {
            info("Offline mode: nothing to sync.");
            return Ok(());
        }

        match desk.sync_now(&mut state, now())? {
            Some(total) => success(format!("Guest list reloaded: {} guests.", total)),
            None => warning("Sheet not reachable, local list kept."),
        }
    }
    Ok(())
}
