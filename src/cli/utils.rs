use std::path::{Path, PathBuf};

use crate::config::split_csv;

/// Flatten repeatable, comma-separated flag values.
pub(crate) fn expand_csv(values: &[String]) -> Vec<String> {
    values.iter().flat_map(|v| split_csv(v)).collect()
}

/// Best-effort absolute form of a path that may not exist yet.
pub(crate) fn comparable_path(path: &Path) -> PathBuf {
    if let Ok(resolved) = path.canonicalize() {
        return resolved;
    }
    let (Some(parent), Some(name)) = (path.parent(), path.file_name()) else {
        return path.to_path_buf();
    };
    let parent = if parent.as_os_str().is_empty() { Path::new(".") } else { parent };
    parent.canonicalize().map(|p| p.join(name)).unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::{comparable_path, expand_csv};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn expand_csv_flattens_repeats_and_commas() {
        let values = vec!["test_, _spec".to_string(), "fixture".to_string(), ",".to_string()];
        assert_eq!(expand_csv(&values), vec!["test_", "_spec", "fixture"]);
    }

    #[test]
    fn comparable_path_resolves_missing_files_through_parent() {
        let dir = TempDir::new().expect("tempdir");
        let canonical = dir.path().canonicalize().expect("canonical");
        assert_eq!(comparable_path(&dir.path().join("bundle.html")), canonical.join("bundle.html"));

        fs::write(dir.path().join("x.rs"), "").expect("write");
        assert_eq!(comparable_path(&dir.path().join("x.rs")), canonical.join("x.rs"));
    }
}
