// src/export/fs_utils.rs

use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, warning};
use std::io::{self, BufRead, Write};
use std::path::Path;

/// Make sure `path` may be written.
///
/// A missing file, or `force`, lets the export proceed. Otherwise the user
/// is asked on the terminal and anything but `y`/`yes` cancels.
pub fn ensure_writable(path: &Path, force: bool) -> AppResult<()> {
    if !path.exists() || force {
        return Ok(());
    }

    warning(format!("The file '{}' already exists.", path.display()));
    print!("Overwrite? [y/N]: ");
    io::stdout().flush().ok();

    if confirm_overwrite(io::stdin().lock())? {
        info("Existing file will be overwritten.");
        Ok(())
    } else {
        Err(AppError::from(io::Error::other(
            "export cancelled: existing file not overwritten",
        )))
    }
}

fn confirm_overwrite<R: BufRead>(mut input: R) -> AppResult<bool> {
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_explicit_yes_confirms() {
        assert!(confirm_overwrite("y\n".as_bytes()).unwrap());
        assert!(confirm_overwrite("YES\n".as_bytes()).unwrap());
        assert!(!confirm_overwrite("\n".as_bytes()).unwrap());
        assert!(!confirm_overwrite("nope\n".as_bytes()).unwrap());
    }

    #[test]
    fn missing_or_forced_target_needs_no_prompt() {
        let dir = tempfile::TempDir::new().unwrap();
        let target = dir.path().join("out.json");
        assert!(ensure_writable(&target, false).is_ok());

        std::fs::write(&target, "[]").unwrap();
        assert!(ensure_writable(&target, true).is_ok());
    }
}
