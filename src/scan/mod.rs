//! Source resolution, file discovery and loading.

pub mod discovery;
pub mod policy;

pub use discovery::{discover, Discovery};
pub use policy::{EntryKind, ExclusionPolicy};

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::domain::{FileRecord, SkippedFile, SourceFile};
use crate::utils::read_file_safe;

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("'{}' not found", .0.display())]
    NotFound(PathBuf),

    #[error("No source files found in '{}'", .0.display())]
    Empty(PathBuf),

    #[error("Failed to resolve '{}': {source}", .path.display())]
    Resolve {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// What the user pointed the tool at
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceInput {
    File(PathBuf),
    Directory(PathBuf),
}

impl SourceInput {
    pub fn path(&self) -> &Path {
        match self {
            Self::File(path) | Self::Directory(path) => path,
        }
    }
}

/// Check that `path` exists and resolve it to an absolute file or directory.
pub fn resolve_source(path: &Path) -> Result<SourceInput, DiscoveryError> {
    if !path.exists() {
        return Err(DiscoveryError::NotFound(path.to_path_buf()));
    }
    let resolved = path
        .canonicalize()
        .map_err(|source| DiscoveryError::Resolve { path: path.to_path_buf(), source })?;
    if resolved.is_dir() {
        Ok(SourceInput::Directory(resolved))
    } else {
        Ok(SourceInput::File(resolved))
    }
}

/// Record for a file given directly on the command line.
///
/// Single files bypass the exclusion policy; the extension is only a
/// highlighting hint.
pub fn single_file_record(path: &Path, policy: &ExclusionPolicy) -> FileRecord {
    let file_name = path.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_default();
    FileRecord {
        path: path.to_path_buf(),
        extension: policy.resolve_extension(&file_name).unwrap_or_default(),
        relative_path: file_name,
    }
}

/// Read every record in order.
///
/// Unreadable and binary files are never rendered as empty sections: they are
/// returned separately so the caller can report them.
pub fn load_sources(records: &[FileRecord]) -> (Vec<SourceFile>, Vec<SkippedFile>) {
    let mut loaded = Vec::with_capacity(records.len());
    let mut skipped = Vec::new();

    for record in records {
        match read_file_safe(&record.path) {
            Ok((content, encoding)) => {
                if encoding != "UTF-8" {
                    tracing::debug!("Decoded {} as {}", record.relative_path, encoding);
                }
                loaded.push(SourceFile { record: record.clone(), content });
            }
            Err(err) => {
                tracing::warn!("Skipping {}: {}", record.relative_path, err);
                skipped.push(SkippedFile {
                    relative_path: record.relative_path.clone(),
                    reason: err.to_string(),
                });
            }
        }
    }

    (loaded, skipped)
}

#[cfg(test)]
mod tests {
    use super::{load_sources, resolve_source, single_file_record, DiscoveryError, SourceInput};
    use crate::domain::FileRecord;
    use crate::scan::ExclusionPolicy;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn resolve_source_distinguishes_files_and_directories() {
        let dir = TempDir::new().expect("tempdir");
        let file = dir.path().join("main.go");
        fs::write(&file, "package main\n").expect("write");

        assert!(matches!(resolve_source(dir.path()), Ok(SourceInput::Directory(_))));
        assert!(matches!(resolve_source(&file), Ok(SourceInput::File(_))));
        assert!(matches!(
            resolve_source(&dir.path().join("missing.go")),
            Err(DiscoveryError::NotFound(_))
        ));
    }

    #[test]
    fn single_file_record_bypasses_policy() {
        let dir = TempDir::new().expect("tempdir");
        let record = single_file_record(&dir.path().join(".hidden.go"), &ExclusionPolicy::new());
        assert_eq!(record.relative_path, ".hidden.go");
        assert_eq!(record.extension, "go");
    }

    #[test]
    fn load_sources_skips_unreadable_files_in_order() {
        let dir = TempDir::new().expect("tempdir");
        fs::write(dir.path().join("a.rs"), "fn a() {}\n").expect("write");
        fs::write(dir.path().join("c.rs"), "fn c() {}\n").expect("write");
        let records: Vec<FileRecord> = ["a.rs", "b.rs", "c.rs"]
            .iter()
            .map(|name| FileRecord {
                path: dir.path().join(name),
                relative_path: name.to_string(),
                extension: "rs".to_string(),
            })
            .collect();

        let (loaded, skipped) = load_sources(&records);
        let names: Vec<&str> = loaded.iter().map(|f| f.record.relative_path.as_str()).collect();
        assert_eq!(names, vec!["a.rs", "c.rs"]);
        assert_eq!(skipped.len(), 1);
        assert_eq!(skipped[0].relative_path, "b.rs");
    }
}
