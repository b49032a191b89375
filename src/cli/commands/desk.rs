use crate::cli::commands::add::{register, undo};
use crate::cli::commands::list::{print_guests, print_status};
use crate::cli::commands::open_session;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::desk::CheckInDesk;
use crate::core::parser::parse_quick_entry;
use crate::core::session::SessionState;
use crate::errors::AppResult;
use crate::ui::messages::{error, header, info};
use crate::utils::time::now;
use std::io::{self, BufRead, Write};

const HELP: &str = "Type a guest (\"Ana\", \"Leo 5\", \"Staff Bruno\") or :undo :status :list :help :quit";

#[derive(Debug, PartialEq, Eq)]
enum DeskInput<'a> {
    Guest(&'a str),
    Undo,
    Status,
    List,
    Help,
    Quit,
    Unknown(&'a str),
    Empty,
}

fn parse_line(line: &str) -> DeskInput<'_> {
    let line = line.trim();
    match line {
        "" => DeskInput::Empty,
        ":undo" | ":u" => DeskInput::Undo,
        ":status" | ":s" => DeskInput::Status,
        ":list" | ":l" => DeskInput::List,
        ":help" | ":h" | "?" => DeskInput::Help,
        ":quit" | ":q" | ":exit" => DeskInput::Quit,
        cmd if cmd.starts_with(':') => DeskInput::Unknown(cmd),
        guest => DeskInput::Guest(guest),
    }
}

/// Handle `desk`: one quick entry per line until `:quit` or end of input.
/// Errors on a single line are printed and the loop goes on.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if !matches!(cmd, Commands::Desk) {
        return Ok(());
    }

    let (pool, mut state) = open_session(cfg)?;
    let event = state.active()?.event_name.clone();
    let mut desk = CheckInDesk::new(&pool, cfg);

    header(format!("Check-in desk: {}", event));
    info(HELP);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush().ok();

        let Some(line) = lines.next() else { break };
        let line = line?;

        if let Err(e) = step(&mut desk, &mut state, cfg, parse_line(&line)) {
            error(e);
        }
        if matches!(parse_line(&line), DeskInput::Quit) {
            break;
        }
        desk.settle(&mut state, false)?;
    }

    desk.settle(&mut state, true)?;
    println!();
    Ok(())
}

fn step(
    desk: &mut CheckInDesk<'_>,
    state: &mut SessionState,
    cfg: &Config,
    input: DeskInput<'_>,
) -> AppResult<()> {
    match input {
        DeskInput::Guest(text) => {
            let entry = parse_quick_entry(text, &cfg.courtesy_keywords)?;
            register(desk, state, &entry, now())?;
        }
        DeskInput::Undo => undo(desk, state, cfg, now())?,
        DeskInput::Status => print_status(state.active()?, cfg, now()),
        DeskInput::List => print_guests(state.active()?),
        DeskInput::Help => info(HELP),
        DeskInput::Unknown(cmd) => info(format!("Unknown command '{}'. {}", cmd, HELP)),
        DeskInput::Quit | DeskInput::Empty => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_map_to_inputs() {
        assert_eq!(parse_line("  Leo 5 "), DeskInput::Guest("Leo 5"));
        assert_eq!(parse_line(":undo"), DeskInput::Undo);
        assert_eq!(parse_line(":q"), DeskInput::Quit);
        assert_eq!(parse_line(":nope"), DeskInput::Unknown(":nope"));
        assert_eq!(parse_line("   "), DeskInput::Empty);
    }
}
