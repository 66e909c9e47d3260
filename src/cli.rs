//! CLI argument parsing via `clap`.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "pystyle",
    version,
    about = "Line-oriented style checker for Python sources",
    long_about = "Pystyle — a tiny, fast CLI that scans Python files line by line and reports style issues S001–S012.\n\nConfiguration precedence: CLI > pystyle.toml > defaults.",
    after_help = "Examples:\n  pystyle check src/\n  pystyle check app.py --max-line-length 99\n  pystyle check . --output json",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
/// Supported subcommands.
pub enum Commands {
    /// Show version
    #[command(
        about = "Show version",
        long_about = "Print the current pystyle version."
    )]
    Version,
    /// Scan files for style issues
    #[command(
        about = "Run style checks",
        long_about = "Scan a file, or a directory expanded through the configured glob patterns, and report one line per issue. Any reported issue makes the process exit non-zero.",
        after_help = "Examples:\n  pystyle check src/\n  pystyle check app.py --output json"
    )]
    Check {
        #[arg(help = "File or directory to scan (default: current dir)")]
        path: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
        #[arg(long, help = "Maximum allowed line length (default: 79)")]
        max_line_length: Option<usize>,
        #[arg(long, help = "Repository root for config discovery (default: current dir)")]
        repo_root: Option<String>,
    },
}
