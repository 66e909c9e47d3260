//! Pystyle CLI binary entry point.
//! Delegates to modules for scanning and prints results.

mod checks;
mod cli;
mod config;
mod lint;
mod models;
mod output;
mod snippet;
mod utils;

use clap::Parser;
use cli::{Cli, Commands};
use std::path::PathBuf;

fn main() {
    let cli = Cli::parse();
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Check {
            path,
            output,
            max_line_length,
            repo_root,
        } => {
            let eff = config::resolve_effective(
                repo_root.as_deref(),
                output.as_deref(),
                max_line_length,
            );
            // Friendly note if no pystyle config was found
            if config::load_config(&eff.repo_root).is_none() {
                eprintln!(
                    "{} {}",
                    utils::note_prefix(),
                    "No pystyle.toml found; using defaults."
                );
            }
            let target = PathBuf::from(path.unwrap_or_else(|| ".".to_string()));
            if !target.exists() {
                eprintln!(
                    "{} {}",
                    utils::error_prefix(),
                    format!("Scan path not found: {}", target.to_string_lossy())
                );
                std::process::exit(2);
            }
            // Emit single top info with the active patterns for directory scans
            if target.is_dir() && eff.output != "json" {
                eprintln!(
                    "{} {}",
                    utils::info_prefix(),
                    format!("Using patterns: [{}]", eff.patterns.join(", "))
                );
            }
            let checker = lint::Checker::new(eff.max_line_length);
            let (result, errors) = lint::run_scan(&target, &eff.patterns, &checker);
            output::print_scan(&result, &eff.output, &errors);
            if result.summary.issues > 0 {
                std::process::exit(1);
            }
        }
    }
}
