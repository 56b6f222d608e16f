//! The conversion command: source in, one HTML document out.

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use std::path::{Path, PathBuf};

use super::utils::{comparable_path, expand_csv};
use crate::config::{
    load_config, locate_config_file, merge_cli_with_config, CliOverrides, Config,
};
use crate::domain::{BundleDocument, BundleMode, SourceFile};
use crate::highlight::{select_highlighter, Highlighter};
use crate::render::{
    assemble, default_output_path, default_title, open_in_viewer, render_document, write_document,
};
use crate::scan::{
    discover, load_sources, resolve_source, single_file_record, DiscoveryError, ExclusionPolicy,
    SourceInput,
};
use crate::utils::{plural, read_file_safe};

#[derive(Args)]
pub struct ConvertArgs {
    /// Source file or directory to convert
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Output HTML file (default: <source>.html, or bundle.html inside a directory)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Open the result in the default browser
    #[arg(long)]
    pub open: bool,

    /// Exclude files whose name contains this text (repeatable, comma-separated)
    #[arg(long = "not-match-f", value_name = "PATTERN")]
    pub not_match_f: Vec<String>,

    /// Exclude files with this extension (repeatable, comma-separated)
    #[arg(long = "exclude-ext", value_name = "EXT")]
    pub exclude_ext: Vec<String>,

    /// Document title (default: the file name, or '<dir> - Source Code')
    #[arg(long, value_name = "TEXT")]
    pub title: Option<String>,

    /// Skip syntax coloring and emit escaped plain text
    #[arg(long)]
    pub plain: bool,

    /// Path to config file (src2html.toml or src2html.yaml)
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

pub fn run(args: ConvertArgs) -> Result<()> {
    let source = resolve_source(&args.source)?;
    tracing::debug!("Resolved source to {}", source.path().display());

    let config_anchor = match &source {
        SourceInput::Directory(dir) => dir.clone(),
        SourceInput::File(_) => std::env::current_dir()?,
    };
    let config_file = locate_config_file(&config_anchor, args.config.as_deref())?;
    let file_config = load_config(&config_anchor, args.config.as_deref())?;

    let not_match_f = expand_csv(&args.not_match_f);
    let exclude_ext = expand_csv(&args.exclude_ext);
    let cli_overrides = CliOverrides {
        not_match_f: if not_match_f.is_empty() { None } else { Some(not_match_f) },
        exclude_ext: if exclude_ext.is_empty() { None } else { Some(exclude_ext) },
        title: args.title.clone(),
        plain: if args.plain { Some(true) } else { None },
        open: if args.open { Some(true) } else { None },
    };
    let merged = merge_cli_with_config(file_config, cli_overrides);

    let policy = merged.exclusion_policy();
    let highlighter = select_highlighter(merged.plain);
    tracing::debug!("Using the {} highlighter", highlighter.name());

    let output_path = args.output.clone().unwrap_or_else(|| default_output_path(&source));

    let document = match &source {
        SourceInput::File(path) => build_single(path, &policy, &merged, highlighter.as_ref())?,
        SourceInput::Directory(root) => {
            // Our own artifacts are never bundled.
            let own_files: Vec<PathBuf> = std::iter::once(output_path.as_path())
                .chain(config_file.as_deref())
                .map(comparable_path)
                .collect();
            build_directory(root, &policy, &merged, highlighter.as_ref(), &own_files)?
        }
    };

    let html = render_document(&document);
    write_document(&output_path, &html)?;
    println!("{} Generated: {}", style("✓").green(), output_path.display());

    if merged.open {
        open_in_viewer(&output_path)?;
        println!("{} Opened in browser", style("✓").green());
    }

    Ok(())
}

fn build_single(
    path: &Path,
    policy: &ExclusionPolicy,
    config: &Config,
    highlighter: &dyn Highlighter,
) -> Result<BundleDocument> {
    let record = single_file_record(path, policy);
    let (content, _encoding) =
        read_file_safe(path).with_context(|| format!("Cannot convert {}", path.display()))?;
    let title =
        config.title.clone().unwrap_or_else(|| default_title(BundleMode::Single, record.file_name()));

    let files = [SourceFile { record, content }];
    Ok(assemble(&files, &title, BundleMode::Single, highlighter))
}

fn build_directory(
    root: &Path,
    policy: &ExclusionPolicy,
    config: &Config,
    highlighter: &dyn Highlighter,
    own_files: &[PathBuf],
) -> Result<BundleDocument> {
    let mut discovery = discover(root, policy)?;
    let removed = discovery.exclude_paths(own_files)?;
    if removed > 0 {
        tracing::debug!("Left out {} produced or read by this tool", plural(removed, "file"));
    }

    for (rejection, count) in &discovery.stats.skipped {
        tracing::debug!("Skipped {} ({})", plural(*count, "entry"), rejection.as_str());
    }

    println!("Found {}:", plural(discovery.records.len(), "file"));
    for record in &discovery.records {
        println!("  - {}", record.relative_path);
    }

    let (loaded, skipped) = load_sources(&discovery.records);
    if !skipped.is_empty() {
        println!("Skipped {} that could not be read:", plural(skipped.len(), "file"));
        for file in &skipped {
            println!("  - {} ({})", file.relative_path, file.reason);
        }
    }
    if loaded.is_empty() {
        return Err(DiscoveryError::Empty(root.to_path_buf()).into());
    }

    let root_name = root.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_default();
    let title =
        config.title.clone().unwrap_or_else(|| default_title(BundleMode::Directory, &root_name));

    Ok(assemble(&loaded, &title, BundleMode::Directory, highlighter))
}
