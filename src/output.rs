//! Output rendering for the check command.
//!
//! Supports `human` (default) and `json` outputs. Human mode prints one
//! line per issue, `<file>: Line <line>: <code> <name>`, in scan order,
//! followed by a summary. The JSON form includes the issue list, the
//! summary, and any per-file read errors.

use crate::models::ScanResult;
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;

fn use_colors(output: &str) -> bool {
    output != "json" && std::env::var_os("NO_COLOR").is_none()
}

/// Print scan results in the requested format.
pub fn print_scan(res: &ScanResult, output: &str, errors: &[String]) {
    match output {
        "json" => println!(
            "{}",
            serde_json::to_string_pretty(&compose_scan_json(res, errors)).unwrap()
        ),
        _ => {
            for err in errors {
                eprintln!("{} {}", crate::utils::error_prefix(), err);
            }
            let color = use_colors(output);
            for is in &res.issues {
                if color {
                    println!(
                        "{}: Line {}: {} {}",
                        is.file.bold(),
                        is.line,
                        is.code.red().bold(),
                        is.name
                    );
                } else {
                    println!("{}", is);
                }
            }
            let summary = format!(
                "— Summary — issues={} files={}",
                res.summary.issues, res.summary.files
            );
            if color {
                println!("{}", summary.bold());
            } else {
                println!("{}", summary);
            }
        }
    }
}

/// Compose the scan JSON object (pure) for testing/snapshot purposes.
pub fn compose_scan_json(res: &ScanResult, errors: &[String]) -> JsonVal {
    json!({
        "issues": serde_json::to_value(&res.issues).unwrap(),
        "summary": serde_json::to_value(&res.summary).unwrap(),
        "errors": errors,
    })
}
