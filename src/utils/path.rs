//! Path utilities: expand ~ in user-supplied locations.

use std::path::PathBuf;

pub fn expand_tilde(path: &str) -> PathBuf {
    if path.starts_with("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(path.trim_start_matches("~/"));
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_paths_are_untouched() {
        assert_eq!(expand_tilde("/tmp/a.csv"), PathBuf::from("/tmp/a.csv"));
        assert_eq!(expand_tilde("rel/a.csv"), PathBuf::from("rel/a.csv"));
    }
}
