use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::log::ttlog_soft;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::store::StoreTarget;
use crate::ui::messages::{info, success};

/// Handle the `init` command
///
/// Creates the config directory and file, the local session database
/// with all migrations applied, and reports where the shared sheet lives.
pub fn handle(cli: &Cli) -> AppResult<()> {
    let cfg = Config::init_all(cli.db.clone(), cli.test)?;

    println!("⚙️  Initializing rGuestDesk…");
    println!("📄 Config file : {}", Config::config_file().display());
    println!("🗄️  Database   : {}", &cfg.database);

    let pool = DbPool::new(&cfg.database)?;
    success(format!("Database initialized at {}", &cfg.database));

    info(format!("Sheet: {}", StoreTarget::from_config(&cfg).describe()));

    ttlog_soft(
        &pool.conn,
        "init",
        "Database initialized",
        &format!("Database initialized at {}", &cfg.database),
    );

    println!("🎉 rGuestDesk initialization completed!");
    Ok(())
}
