//! Writing the bundle and handing it to a viewer.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::domain::BUNDLE_FILE_NAME;
use crate::scan::SourceInput;

/// Where output goes when `--output` is not given.
///
/// A single file gets an `.html` sibling (`main.go` → `main.html`); a source
/// that is already `.html` gets the suffix appended so it is never
/// overwritten. A directory gets `bundle.html` inside it.
pub fn default_output_path(source: &SourceInput) -> PathBuf {
    match source {
        SourceInput::Directory(dir) => dir.join(BUNDLE_FILE_NAME),
        SourceInput::File(file) => {
            // Case-folded so `index.HTML` is not overwritten on case-insensitive filesystems.
            let is_html = file
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("html"));
            if is_html {
                let mut name = file.as_os_str().to_os_string();
                name.push(".html");
                PathBuf::from(name)
            } else {
                file.with_extension("html")
            }
        }
    }
}

/// Write `html` to `path`, creating missing parent directories.
pub fn write_document(path: &Path, html: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    fs::write(path, html).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::debug!("Wrote {} bytes to {}", html.len(), path.display());
    Ok(())
}

/// Launch the platform's default viewer on `path` without waiting for it.
pub fn open_in_viewer(path: &Path) -> Result<()> {
    let target = path
        .canonicalize()
        .with_context(|| format!("Failed to resolve {}", path.display()))?;
    let mut command = viewer_command(&target);
    command.stdin(Stdio::null()).stdout(Stdio::null()).stderr(Stdio::null());
    command
        .spawn()
        .with_context(|| format!("Failed to launch a viewer for {}", target.display()))?;
    Ok(())
}

#[cfg(target_os = "macos")]
fn viewer_command(target: &Path) -> Command {
    let mut command = Command::new("open");
    command.arg(target);
    command
}

#[cfg(target_os = "windows")]
fn viewer_command(target: &Path) -> Command {
    let mut command = Command::new("cmd");
    command.args(["/C", "start", ""]).arg(target);
    command
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn viewer_command(target: &Path) -> Command {
    let mut command = Command::new("xdg-open");
    command.arg(target);
    command
}
