//! Bundle assembly and output.
//!
//! [`assemble`] turns loaded files into a [`BundleDocument`];
//! [`html::render_document`] serializes it and [`writer`] puts it on disk.

pub mod html;
pub mod writer;

pub use html::render_document;
pub use writer::{default_output_path, open_in_viewer, write_document};

use rayon::prelude::*;

use crate::domain::{
    anchor_prefix, section_id, BundleDocument, BundleMode, FileSection, SourceFile, TocEntry,
    SINGLE_FILE_ANCHOR_PREFIX,
};
use crate::highlight::{highlight_or_fallback, Highlighter};

/// Assemble the document from files already in discovery order.
///
/// Order is never changed here. Highlighting runs on the rayon pool, but
/// results are collected by position so section `i` is always input `i`.
pub fn assemble(
    files: &[SourceFile],
    title: &str,
    mode: BundleMode,
    highlighter: &dyn Highlighter,
) -> BundleDocument {
    let sections: Vec<FileSection> = files
        .par_iter()
        .enumerate()
        .map(|(index, file)| {
            let (display_name, prefix) = match mode {
                BundleMode::Single => {
                    (file.record.file_name().to_string(), SINGLE_FILE_ANCHOR_PREFIX.to_string())
                }
                BundleMode::Directory => (file.record.relative_path.clone(), anchor_prefix(index)),
            };
            let markup =
                highlight_or_fallback(highlighter, &file.content, file.record.file_name(), &prefix);
            FileSection { index, display_name, anchor_prefix: prefix, markup }
        })
        .collect();

    let toc = match mode {
        BundleMode::Single => Vec::new(),
        BundleMode::Directory => sections
            .iter()
            .map(|s| TocEntry {
                index: s.index,
                display_name: s.display_name.clone(),
                anchor_id: section_id(s.index),
            })
            .collect(),
    };

    BundleDocument { title: title.to_string(), mode, toc, sections }
}

/// Title used when none is configured.
pub fn default_title(mode: BundleMode, source_name: &str) -> String {
    match mode {
        BundleMode::Single => source_name.to_string(),
        BundleMode::Directory => format!("{source_name} - Source Code"),
    }
}

#[cfg(test)]
mod tests {
    use super::{assemble, default_title};
    use crate::domain::{BundleMode, FileRecord, SourceFile};
    use crate::highlight::PlainHighlighter;
    use std::collections::HashSet;
    use std::path::PathBuf;

    fn source(rel: &str, content: &str) -> SourceFile {
        SourceFile {
            record: FileRecord {
                path: PathBuf::from("/repo").join(rel),
                relative_path: rel.to_string(),
                extension: rel.rsplit('.').next().unwrap_or_default().to_string(),
            },
            content: content.to_string(),
        }
    }

    #[test]
    fn directory_bundle_indexes_sections_and_toc_in_order() {
        let files: Vec<SourceFile> = (0..25)
            .map(|i| source(&format!("pkg/mod_{i:02}.py"), &format!("x = {i}\n")))
            .collect();
        let doc = assemble(&files, "repo - Source Code", BundleMode::Directory, &PlainHighlighter);

        assert_eq!(doc.sections.len(), 25);
        assert_eq!(doc.toc.len(), 25);
        for (i, (section, entry)) in doc.sections.iter().zip(&doc.toc).enumerate() {
            assert_eq!(section.index, i);
            assert_eq!(entry.index, i);
            assert_eq!(section.display_name, files[i].record.relative_path);
            assert_eq!(entry.display_name, section.display_name);
            assert_eq!(entry.anchor_id, section.section_id());
            assert_eq!(section.anchor_prefix, format!("file{i}-line"));
            assert!(section.markup.contains(&format!("id=\"file{i}-line-1\"")));
        }
        let prefixes: HashSet<&str> = doc.sections.iter().map(|s| s.anchor_prefix.as_str()).collect();
        assert_eq!(prefixes.len(), 25);
    }

    #[test]
    fn single_file_bundle_has_no_toc_and_line_anchors() {
        let files = vec![source("cmd/main.go", "package main\nfunc main() {}\n")];
        let doc = assemble(&files, "main.go", BundleMode::Single, &PlainHighlighter);
        assert!(doc.toc.is_empty());
        assert_eq!(doc.sections.len(), 1);
        assert_eq!(doc.sections[0].display_name, "main.go");
        assert!(doc.sections[0].markup.contains("<a id=\"line-1\"></a>"));
        assert!(doc.sections[0].markup.contains("<a id=\"line-2\"></a>"));
    }

    #[test]
    fn assembly_is_idempotent() {
        let files = vec![source("a.rs", "fn a() {}\n"), source("b/c.md", "# <title>\n")];
        let first = assemble(&files, "t", BundleMode::Directory, &PlainHighlighter);
        let second = assemble(&files, "t", BundleMode::Directory, &PlainHighlighter);
        assert_eq!(first, second);
    }

    #[test]
    fn default_titles() {
        assert_eq!(default_title(BundleMode::Single, "main.go"), "main.go");
        assert_eq!(default_title(BundleMode::Directory, "proj"), "proj - Source Code");
    }
}
