//! Deterministic recursive file discovery.

use std::path::{Component, Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use super::policy::{EntryKind, ExclusionPolicy};
use super::DiscoveryError;
use crate::domain::{DiscoveryStats, FileRecord, Rejection};

/// Result of a discovery walk
#[derive(Debug, Clone)]
pub struct Discovery {
    pub root: PathBuf,
    pub records: Vec<FileRecord>,
    pub stats: DiscoveryStats,
}

impl Discovery {
    /// Drop records whose absolute path is in `paths`, keeping the order.
    ///
    /// Returns how many were removed. An empty result is reported the same
    /// way as an empty walk.
    pub fn exclude_paths(&mut self, paths: &[PathBuf]) -> Result<usize, DiscoveryError> {
        let before = self.records.len();
        self.records.retain(|r| !paths.contains(&r.path));
        self.stats.files_included = self.records.len();

        if self.records.is_empty() {
            return Err(DiscoveryError::Empty(self.root.clone()));
        }
        Ok(before - self.records.len())
    }
}

/// Walk `root` and collect every eligible file, ordered by case-insensitive
/// relative path.
///
/// Siblings are visited in file-name order and directory symlinks are never
/// followed, so two walks over an unchanged tree produce the same list.
pub fn discover(root: &Path, policy: &ExclusionPolicy) -> Result<Discovery, DiscoveryError> {
    if !root.exists() {
        return Err(DiscoveryError::NotFound(root.to_path_buf()));
    }

    let mut stats = DiscoveryStats::default();
    let mut records = Vec::new();

    let mut walker =
        WalkDir::new(root).min_depth(1).follow_links(false).sort_by_file_name().into_iter();

    while let Some(next) = walker.next() {
        let entry = match next {
            Ok(entry) => entry,
            Err(err) => {
                tracing::warn!("Error walking directory: {}", err);
                stats.walk_errors += 1;
                continue;
            }
        };
        stats.entries_visited += 1;

        if entry.file_type().is_dir() {
            let name = entry.file_name().to_string_lossy();
            if !policy.admits_directory(&name) {
                let rejection =
                    if name.starts_with('.') { Rejection::Hidden } else { Rejection::IgnoredDirectory };
                tracing::trace!("Pruning {} ({})", entry.path().display(), rejection.as_str());
                stats.record_skip(rejection);
                walker.skip_current_dir();
            }
            continue;
        }

        let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
        match policy.evaluate(relative, entry_kind(&entry)) {
            Ok(extension) => records.push(FileRecord {
                path: entry.path().to_path_buf(),
                relative_path: relative_path_string(relative),
                extension,
            }),
            Err(rejection) => {
                tracing::trace!("Skipping {} ({})", relative.display(), rejection.as_str());
                stats.record_skip(rejection);
            }
        }
    }

    // Stable sort: case-folded ties keep traversal order.
    records.sort_by_cached_key(|r| r.relative_path.to_lowercase());
    stats.files_included = records.len();

    tracing::debug!(
        "Discovered {} files under {} ({} skipped)",
        records.len(),
        root.display(),
        stats.total_skipped()
    );

    if records.is_empty() {
        return Err(DiscoveryError::Empty(root.to_path_buf()));
    }

    Ok(Discovery { root: root.to_path_buf(), records, stats })
}

/// Classify an entry without following directory symlinks.
///
/// A symlink that resolves to a regular file is treated as that file.
fn entry_kind(entry: &DirEntry) -> EntryKind {
    let file_type = entry.file_type();
    if file_type.is_file() {
        return EntryKind::File;
    }
    if file_type.is_symlink() {
        return match std::fs::metadata(entry.path()) {
            Ok(meta) if meta.is_file() => EntryKind::File,
            Ok(meta) if meta.is_dir() => EntryKind::Directory,
            _ => EntryKind::Other,
        };
    }
    if file_type.is_dir() {
        EntryKind::Directory
    } else {
        EntryKind::Other
    }
}

fn relative_path_string(relative: &Path) -> String {
    relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
