//! Command-line arguments for the `codesense` binary.

use std::path::PathBuf;

use clap::Parser;

/// Interactive terminal view of a CodeSense review result.
///
/// By default the result is read from the handoff database the analysis step
/// writes to. `--result` reads it from a JSON file instead.
#[derive(Debug, Parser)]
#[command(name = "codesense", version, about)]
pub struct Cli {
    /// Read the review result from this JSON file instead of the handoff database.
    #[arg(long, value_name = "FILE")]
    pub result: Option<PathBuf>,

    /// Original source file shown in the "Original" tab (used with --result).
    #[arg(long, value_name = "FILE", requires = "result")]
    pub original: Option<PathBuf>,

    /// Handoff database path.
    #[arg(long, value_name = "PATH", env = "CODESENSE_HANDOFF_DB")]
    pub db: Option<PathBuf>,

    /// Color theme: "dark" or "catppuccin-mocha".
    #[arg(long)]
    pub theme: Option<String>,

    /// File extension used to pick syntax highlighting, e.g. "py" or "rs".
    #[arg(long, value_name = "EXT")]
    pub syntax: Option<String>,
}
