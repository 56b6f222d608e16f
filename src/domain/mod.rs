//! Core domain types and models
//!
//! Defines the discovered file records, the assembled bundle document and the
//! built-in sets that make up the default exclusion policy.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

/// Anchor prefix used for the lone section of a single-file document.
pub const SINGLE_FILE_ANCHOR_PREFIX: &str = "line";

/// Default output file name for directory mode.
pub const BUNDLE_FILE_NAME: &str = "bundle.html";

/// A file that survived the exclusion policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// Absolute path to the file
    pub path: PathBuf,

    /// Path relative to the discovery root, `/`-separated
    pub relative_path: String,

    /// Lowercase extension without the leading dot (real or synthetic)
    pub extension: String,
}

impl FileRecord {
    /// Bare file name, used as the highlighting hint.
    pub fn file_name(&self) -> &str {
        self.relative_path.rsplit('/').next().unwrap_or(&self.relative_path)
    }
}

/// A record whose content has been read and decoded.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub record: FileRecord,
    pub content: String,
}

/// A record dropped between discovery and assembly.
#[derive(Debug, Clone)]
pub struct SkippedFile {
    pub relative_path: String,
    pub reason: String,
}

/// Whether the document bundles a single file or a directory tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BundleMode {
    Single,
    Directory,
}

/// One entry in the table of contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocEntry {
    pub index: usize,
    pub display_name: String,
    pub anchor_id: String,
}

/// One rendered file inside the bundle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSection {
    /// Position in the discovered list (0-based)
    pub index: usize,

    /// Relative path in directory mode, bare file name in single-file mode
    pub display_name: String,

    /// Prefix for per-line anchors, `<prefix>-<line>`
    pub anchor_prefix: String,

    /// Highlighted (or escaped fallback) HTML fragment
    pub markup: String,
}

impl FileSection {
    /// Fragment id of the section wrapper, the target of TOC links.
    pub fn section_id(&self) -> String {
        section_id(self.index)
    }
}

/// The assembled document, ready to serialize
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleDocument {
    pub title: String,
    pub mode: BundleMode,
    pub toc: Vec<TocEntry>,
    pub sections: Vec<FileSection>,
}

pub fn section_id(index: usize) -> String {
    format!("file-{index}")
}

pub fn anchor_prefix(index: usize) -> String {
    format!("file{index}-line")
}

/// Which policy rule rejected a path
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rejection {
    NotAFile,
    Hidden,
    IgnoredDirectory,
    NoExtension,
    UnknownExtension,
    ExcludedExtension,
    DeniedName,
}

impl Rejection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotAFile => "not_a_file",
            Self::Hidden => "hidden",
            Self::IgnoredDirectory => "ignored_directory",
            Self::NoExtension => "no_extension",
            Self::UnknownExtension => "unknown_extension",
            Self::ExcludedExtension => "excluded_extension",
            Self::DeniedName => "denied_name",
        }
    }
}

/// Statistics from a discovery walk
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoveryStats {
    /// Filesystem entries visited below the root
    pub entries_visited: usize,

    /// Files that passed the policy
    pub files_included: usize,

    /// Rejections by rule
    pub skipped: BTreeMap<Rejection, usize>,

    /// Walk errors that were logged and skipped
    pub walk_errors: usize,
}

impl DiscoveryStats {
    pub fn record_skip(&mut self, rejection: Rejection) {
        *self.skipped.entry(rejection).or_insert(0) += 1;
    }

    pub fn total_skipped(&self) -> usize {
        self.skipped.values().sum()
    }
}

pub fn default_ignored_dir_names() -> BTreeSet<String> {
    [
        // Virtual environments
        "venv",
        ".venv",
        "env",
        ".env",
        // Dependencies
        "node_modules",
        "vendor",
        // Caches
        "__pycache__",
        ".pytest_cache",
        ".mypy_cache",
        // Version control
        ".git",
        ".svn",
        ".hg",
        // Build outputs
        "dist",
        "build",
        ".build",
        "target",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

pub fn default_allowed_extensions() -> BTreeSet<String> {
    [
        // Python, JavaScript/TypeScript
        "py", "js", "ts", "jsx", "tsx",
        // C family
        "c", "cc", "cpp", "h", "hpp",
        // JVM, Go, Rust and friends
        "java", "go", "rs", "rb", "php", "swift", "kt", "scala",
        // Shell
        "sh", "bash", "zsh", "fish", "ps1",
        // Web
        "html", "css", "scss", "sass", "less",
        // Data and config
        "json", "yaml", "yml", "toml", "xml",
        // Docs
        "sql", "md", "rst", "txt",
        // Misc
        "lua", "r", "pl", "pm", "hs", "ml", "ex", "exs",
        "vue", "svelte", "astro",
        // Synthetic
        "dockerfile", "makefile", "cmake",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Bare file names (lowercase) that carry no extension but are still source.
pub fn default_extensionless_names() -> BTreeMap<String, String> {
    [("makefile", "makefile"), ("dockerfile", "dockerfile"), ("rakefile", "rb"), ("gemfile", "rb")]
        .iter()
        .map(|(name, ext)| (name.to_string(), ext.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extensionless_names_resolve_to_allowed_extensions() {
        let allowed = default_allowed_extensions();
        for ext in default_extensionless_names().values() {
            assert!(allowed.contains(ext), "synthetic extension {ext} is not allowed");
        }
    }

    #[test]
    fn file_name_is_last_relative_segment() {
        let record = FileRecord {
            path: PathBuf::from("/repo/src/lib/util.rs"),
            relative_path: "src/lib/util.rs".to_string(),
            extension: "rs".to_string(),
        };
        assert_eq!(record.file_name(), "util.rs");
    }

    #[test]
    fn anchors_derive_from_index() {
        assert_eq!(anchor_prefix(3), "file3-line");
        assert_eq!(section_id(3), "file-3");
    }
}
