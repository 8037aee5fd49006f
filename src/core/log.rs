use crate::db::log::LogRow;
use crate::errors::AppResult;
use crate::store::RecordStore;
use crate::ui::messages::info;
use ansi_term::Colour;

const OP_TARGET_MAX: usize = 60;

/// Colour of an operation name in the printed log.
fn color_for_operation(op: &str) -> Colour {
    match op {
        "add" => Colour::Green,
        "import" => Colour::Cyan,
        "init" => Colour::RGB(255, 153, 51),
        "migration_applied" => Colour::Purple,
        _ => Colour::White,
    }
}

/// `operation (target)`, shortened to the column limit. Works on chars so
/// accented targets are never split.
fn op_target(row: &LogRow) -> String {
    let full = if row.target.is_empty() {
        row.operation.clone()
    } else {
        format!("{} ({})", row.operation, row.target)
    };

    if full.chars().count() > OP_TARGET_MAX {
        let mut s: String = full.chars().take(OP_TARGET_MAX - 3).collect();
        s.push_str("...");
        s
    } else {
        full
    }
}

/// One line per entry, aligned. Only the operation word is coloured.
pub fn format_entries(entries: &[LogRow]) -> Vec<String> {
    let id_w = entries.iter().map(|e| e.id.to_string().len()).max().unwrap_or(1);
    let date_w = entries.iter().map(|e| e.date.len()).max().unwrap_or(0);
    let op_w = entries
        .iter()
        .map(|e| op_target(e).chars().count())
        .max()
        .unwrap_or(0);

    entries
        .iter()
        .map(|e| {
            let visible = op_target(e);
            let padding = " ".repeat(op_w.saturating_sub(visible.chars().count()));
            let color = color_for_operation(&e.operation);

            let painted = match visible.split_once(' ') {
                Some((op, rest)) => format!("{} {}", color.paint(op), rest),
                None => color.paint(visible.as_str()).to_string(),
            };

            format!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                e.id, e.date, painted, padding, e.message
            )
        })
        .collect()
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(store: &dyn RecordStore) -> AppResult<()> {
        let Some(entries) = store.audit_log()? else {
            info("This ledger backend keeps no internal log.");
            return Ok(());
        };

        if entries.is_empty() {
            info("Internal log is empty.");
            return Ok(());
        }

        println!("📜 Internal log:\n");
        for line in format_entries(&entries) {
            println!("{line}");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: i64, op: &str, target: &str) -> LogRow {
        LogRow {
            id,
            date: "2025-10-01T09:00:00+00:00".into(),
            operation: op.into(),
            target: target.into(),
            message: "ok".into(),
        }
    }

    #[test]
    fn long_targets_are_shortened() {
        let long = "x".repeat(100);
        let s = op_target(&row(1, "import", &long));
        assert_eq!(s.chars().count(), OP_TARGET_MAX);
        assert!(s.ends_with("..."));
    }

    #[test]
    fn lines_keep_message_and_id() {
        let lines = format_entries(&[row(1, "init", ""), row(12, "add", "2025-10-01")]);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with(" 1: "));
        assert!(lines[1].contains("(2025-10-01)"));
        assert!(lines[1].ends_with("=> ok"));
    }
}
