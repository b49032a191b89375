use crate::cli::commands::open_session;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::admin::check_password;
use crate::core::desk::CheckInDesk;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};

/// Handle `del`: remove one guest by id, behind the admin password.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del { id, password } = cmd {
        check_password(cfg, password)?;

        let (pool, mut state) = open_session(cfg)?;
        let mut desk = CheckInDesk::new(&pool, cfg);

        match desk.remove(&mut state, id.trim()) {
            Ok(removed) => success(format!("Deleted {}", removed.picker_label())),
            Err(AppError::GuestNotFound(id)) => {
                info("Registered guests:");
                for g in state.active()?.ledger.guests() {
                    println!("  {}  {}", g.id, g.picker_label());
                }
                return Err(AppError::GuestNotFound(id));
            }
            Err(e) => return Err(e),
        }
    }
    Ok(())
}
