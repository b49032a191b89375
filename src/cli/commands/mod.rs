pub mod add;
pub mod config;
pub mod del;
pub mod desk;
pub mod event;
pub mod export;
pub mod init;
pub mod list;
pub mod log;
pub mod stats;
pub mod sync;

use crate::config::Config;
use crate::core::session::SessionState;
use crate::db::pool::DbPool;
use crate::errors::AppResult;

/// Open the local DB and restore the session saved in it.
pub(crate) fn open_session(cfg: &Config) -> AppResult<(DbPool, SessionState)> {
    let pool = DbPool::new(&cfg.database)?;
    let state = SessionState::load(&pool.conn)?;
    Ok((pool, state))
}
