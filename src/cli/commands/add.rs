use crate::cli::commands::open_session;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::desk::CheckInDesk;
use crate::core::ledger::AddOutcome;
use crate::core::parser::parse_quick_entry;
use crate::core::session::SessionState;
use crate::errors::{AppError, AppResult};
use crate::models::guest::{GuestEntry, GuestRecord};
use crate::ui::messages::{success, warning};
use crate::utils::colors::{color_for_status, color_for_sync};
use crate::utils::time::now;
use chrono::NaiveDateTime;

/// Handle `add` and `undo`.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    match cmd {
        Commands::Add {
            name,
            child,
            courtesy,
            quick,
        } => {
            let entry = match quick {
                Some(text) => parse_quick_entry(text, &cfg.courtesy_keywords)?,
                None => entry_from_flags(name.as_deref().unwrap_or_default(), *child, *courtesy),
            };

            let (pool, mut state) = open_session(cfg)?;
            let mut desk = CheckInDesk::new(&pool, cfg);
            register(&mut desk, &mut state, &entry, now())?;
            desk.settle(&mut state, true)?;
        }

        Commands::Undo => {
            let (pool, mut state) = open_session(cfg)?;
            let mut desk = CheckInDesk::new(&pool, cfg);
            undo(&mut desk, &mut state, cfg, now())?;
        }

        _ => {}
    }
    Ok(())
}

fn entry_from_flags(name: &str, child: Option<u32>, courtesy: bool) -> GuestEntry {
    match (child, courtesy) {
        (Some(age), _) => GuestEntry::child(name, age),
        (None, true) => GuestEntry::courtesy(name),
        (None, false) => GuestEntry::adult(name),
    }
}

pub(crate) fn describe(g: &GuestRecord) -> String {
    format!(
        "{} {} · {} · {}",
        color_for_sync(g.sync_state).paint(g.sync_state.marker()),
        g.name,
        g.category.label(),
        color_for_status(g.status).paint(g.status.label())
    )
}

/// Register one entry and print what happened.
pub(crate) fn register(
    desk: &mut CheckInDesk<'_>,
    state: &mut SessionState,
    entry: &GuestEntry,
    at: NaiveDateTime,
) -> AppResult<()> {
    match desk.register(state, entry, at)? {
        AddOutcome::Added(g) => {
            success(format!("Registered {}", describe(&g)));
            let cap = state.active()?.capacity_status();
            if cap.reached {
                warning(format!("Capacity reached: {}/{}", cap.total, cap.capacity));
            }
        }
        AddOutcome::Duplicate(name) => {
            warning(format!("'{}' was just registered, entry ignored.", name));
        }
    }
    Ok(())
}

/// Undo the last registration if it is still inside the undo window.
pub(crate) fn undo(
    desk: &mut CheckInDesk<'_>,
    state: &mut SessionState,
    cfg: &Config,
    at: NaiveDateTime,
) -> AppResult<()> {
    let session = state.active()?;
    if session.ledger.last_added_at().is_none() || session.ledger.is_empty() {
        return Err(AppError::NothingToUndo);
    }
    if !session.ledger.undo_available(at, cfg.undo_window()) {
        return Err(AppError::UndoExpired(cfg.undo_window_secs));
    }

    let removed = desk.undo(state)?;
    success(format!("Removed {} ({})", removed.name, removed.time_str()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::category::Category;

    #[test]
    fn flags_pick_the_category() {
        assert_eq!(entry_from_flags("Ana", None, false).category, Category::Adult);
        assert_eq!(entry_from_flags("Leo", Some(5), false).age, Some(5));
        assert_eq!(entry_from_flags("Bia", None, true).category, Category::Courtesy);
    }
}
