//! src2html: turn a source file or a whole source tree into one HTML document
//!
//! The library discovers eligible files in a deterministic order, highlights
//! each one with per-line anchors and assembles a single self-contained page
//! with a table of contents.

pub mod cli;
pub mod config;
pub mod domain;
pub mod highlight;
pub mod render;
pub mod scan;
pub mod utils;
