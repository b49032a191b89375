use crate::cli::commands::open_session;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::share::{share_link, share_message};
use crate::errors::AppResult;
use crate::export::ExportLogic;
use crate::utils::time::now;

/// Handle `report`, `export` and `share`.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let (_pool, state) = open_session(cfg)?;
    let session = state.active()?;

    match cmd {
        Commands::Report { file, force } => ExportLogic::report(session, file, *force, now())?,
        Commands::Export {
            format,
            file,
            force,
        } => ExportLogic::export(session, *format, file, *force)?,
        Commands::Share => {
            let s = session.summary();
            println!("{}", share_message(&session.event_name, &s, session.capacity));
            println!("{}", share_link(&session.event_name, &s, session.capacity));
        }
        _ => {}
    }
    Ok(())
}
