use crate::db::log::{LogEntry, load_log};
use crate::errors::AppResult;
use ansi_term::Colour;
use rusqlite::Connection;

const MAX_OP_WIDTH: usize = 48;

fn color_for_operation(op: &str) -> Colour {
    match op {
        "add" => Colour::Green,
        "del" | "undo" => Colour::Red,
        "start" | "join" => Colour::Cyan,
        "end" => Colour::Blue,
        "sync" => Colour::Yellow,
        "sync_failed" => Colour::RGB(255, 153, 51),
        "migration_applied" | "config_migrated" => Colour::Purple,
        "init" => Colour::Fixed(250),
        _ => Colour::White,
    }
}

/// "operation (target)", cut to `MAX_OP_WIDTH` visible characters.
fn op_target(entry: &LogEntry) -> String {
    let raw = if entry.target.is_empty() {
        entry.operation.clone()
    } else {
        format!("{} ({})", entry.operation, entry.target)
    };
    if raw.chars().count() > MAX_OP_WIDTH {
        let mut s: String = raw.chars().take(MAX_OP_WIDTH - 3).collect();
        s.push_str("...");
        s
    } else {
        raw
    }
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(conn: &Connection) -> AppResult<()> {
        let entries = load_log(conn)?;
        if entries.is_empty() {
            println!("📜 Internal log is empty.");
            return Ok(());
        }

        let labels: Vec<String> = entries.iter().map(op_target).collect();
        let op_w = labels.iter().map(|l| l.chars().count()).max().unwrap_or(10);
        let id_w = entries
            .iter()
            .map(|e| e.id.to_string().len())
            .max()
            .unwrap_or(1);
        let date_w = entries.iter().map(|e| e.date.len()).max().unwrap_or(10);

        println!("📜 Internal log:\n");

        for (e, label) in entries.iter().zip(labels) {
            let color = color_for_operation(&e.operation);
            let padding = " ".repeat(op_w.saturating_sub(label.chars().count()));

            // only the operation word is coloured
            let shown = match label.split_once(' ') {
                Some((op, rest)) => format!("{} {}", color.paint(op), rest),
                None => color.paint(label.as_str()).to_string(),
            };

            println!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                e.id,
                e.date,
                shown,
                padding,
                e.message,
                id_w = id_w,
                date_w = date_w
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(op: &str, target: &str) -> LogEntry {
        LogEntry {
            id: 1,
            date: "2025-09-20T18:00:00+02:00".into(),
            operation: op.into(),
            target: target.into(),
            message: String::new(),
        }
    }

    #[test]
    fn long_targets_are_cut() {
        assert_eq!(op_target(&entry("add", "")), "add");
        assert_eq!(op_target(&entry("add", "x")), "add (x)");
        let long = op_target(&entry("sync_failed", &"y".repeat(80)));
        assert_eq!(long.chars().count(), MAX_OP_WIDTH);
        assert!(long.ends_with("..."));
    }
}
