use crate::config::Config;
use crate::errors::{AppError, AppResult};

/// Plain comparison against the shared desk password. It only keeps the
/// delete and stats commands away from casual use; it is not access control.
pub fn check_password(cfg: &Config, given: &str) -> AppResult<()> {
    if given == cfg.admin_password {
        Ok(())
    } else {
        Err(AppError::AdminDenied)
    }
}
