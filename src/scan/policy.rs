//! Exclusion policy: the rules that decide whether a path enters the bundle.

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Component, Path};

use crate::domain::{
    default_allowed_extensions, default_extensionless_names, default_ignored_dir_names, Rejection,
};

/// Kind of filesystem entry, as seen without following directory symlinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    Other,
}

/// Immutable set of eligibility rules, built once per run.
#[derive(Debug, Clone)]
pub struct ExclusionPolicy {
    ignored_dir_names: BTreeSet<String>,
    allowed_extensions: BTreeSet<String>,
    exclude_extensions: BTreeSet<String>,
    deny_name_substrings: Vec<String>,
    extensionless_names: BTreeMap<String, String>,
}

impl Default for ExclusionPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl ExclusionPolicy {
    /// Policy with the built-in sets and empty caller deny lists.
    pub fn new() -> Self {
        Self {
            ignored_dir_names: default_ignored_dir_names(),
            allowed_extensions: default_allowed_extensions(),
            exclude_extensions: BTreeSet::new(),
            deny_name_substrings: Vec::new(),
            extensionless_names: default_extensionless_names(),
        }
    }

    /// Extensions to drop even when they are otherwise allowed.
    ///
    /// Leading dots, surrounding whitespace and case are ignored.
    pub fn exclude_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.exclude_extensions = extensions
            .into_iter()
            .map(|ext| normalize_extension(ext.as_ref()))
            .filter(|ext| !ext.is_empty())
            .collect();
        self
    }

    /// Plain substrings; a file whose name contains any of them is dropped.
    pub fn deny_name_substrings<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.deny_name_substrings = patterns
            .into_iter()
            .map(|p| p.as_ref().to_string())
            .filter(|p| !p.is_empty())
            .collect();
        self
    }

    pub fn excluded_extensions(&self) -> &BTreeSet<String> {
        &self.exclude_extensions
    }

    pub fn denied_name_substrings(&self) -> &[String] {
        &self.deny_name_substrings
    }

    /// Whether a directory may contain eligible files at all.
    ///
    /// Used to prune the walk; every file below a rejected directory would fail
    /// the hidden or ignored-name rule anyway.
    pub fn admits_directory(&self, name: &str) -> bool {
        !name.starts_with('.') && !self.ignored_dir_names.contains(name)
    }

    /// Resolve the real or synthetic extension for a bare file name.
    pub fn resolve_extension(&self, file_name: &str) -> Option<String> {
        match Path::new(file_name).extension().and_then(|e| e.to_str()) {
            Some(ext) if !ext.is_empty() => Some(ext.to_lowercase()),
            _ => self.extensionless_names.get(&file_name.to_lowercase()).cloned(),
        }
    }

    /// Evaluate the rules in precedence order.
    ///
    /// `relative` is the path below the discovery root. On success the resolved
    /// extension is returned, otherwise the first rule that failed.
    pub fn evaluate(&self, relative: &Path, kind: EntryKind) -> Result<String, Rejection> {
        if kind != EntryKind::File {
            return Err(Rejection::NotAFile);
        }

        // Lossy so a non-UTF-8 segment is still checked rather than skipped.
        let segments: Vec<Cow<'_, str>> = relative
            .components()
            .filter_map(|c| match c {
                Component::Normal(s) => Some(s.to_string_lossy()),
                _ => None,
            })
            .collect();

        if segments.iter().any(|s| s.starts_with('.')) {
            return Err(Rejection::Hidden);
        }
        if segments.iter().any(|s| self.ignored_dir_names.contains(s.as_ref())) {
            return Err(Rejection::IgnoredDirectory);
        }

        let file_name =
            relative.file_name().map(|n| n.to_string_lossy()).ok_or(Rejection::NotAFile)?;
        let extension = self.resolve_extension(&file_name).ok_or(Rejection::NoExtension)?;

        if !self.allowed_extensions.contains(&extension) {
            return Err(Rejection::UnknownExtension);
        }
        if self.exclude_extensions.contains(&extension) {
            return Err(Rejection::ExcludedExtension);
        }
        if self.deny_name_substrings.iter().any(|p| file_name.contains(p.as_str())) {
            return Err(Rejection::DeniedName);
        }

        Ok(extension)
    }

    pub fn is_eligible(&self, relative: &Path, kind: EntryKind) -> bool {
        self.evaluate(relative, kind).is_ok()
    }
}

fn normalize_extension(ext: &str) -> String {
    ext.trim().trim_start_matches('.').to_lowercase()
}
