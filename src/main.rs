//! src2html: convert source code to syntax-highlighted HTML
//!
//! Renders a single file, or every eligible file under a directory, into one
//! browsable and printable HTML document.

use anyhow::Result;

fn main() -> Result<()> {
    src2html::cli::run()
}
