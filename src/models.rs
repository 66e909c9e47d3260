//! Shared data models for scan output.
//!
//! An `Issue` is one recorded violation; `ScanResult` bundles the ordered
//! issue list with an aggregate summary for the printers.

use serde::Serialize;
use std::fmt;

/// Fixed catalog mapping rule codes to their human-readable names.
pub const ISSUE_NAMES: [(&str, &str); 12] = [
    ("S001", "Too long"),
    ("S002", "Indentation is not a multiple of four"),
    ("S003", "Unnecessary semicolon after a statement"),
    ("S004", "Less than two spaces before inline comments"),
    ("S005", "TO_DO found"),
    ("S006", "More than two blank lines preceding a code line"),
    ("S007", "Too many spaces after construction_name (def or class)"),
    ("S008", "Class name class_name should be written in CamelCase"),
    ("S009", "Function name function_name should be written in snake_case"),
    ("S010", "Argument name arg_name should be written in snake_case"),
    ("S011", "Variable var_name should be written in snake_case"),
    ("S012", "The default argument value is mutable"),
];

/// Look up the catalog name for a rule code.
pub fn issue_name(code: &str) -> &'static str {
    ISSUE_NAMES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, n)| *n)
        .unwrap_or("unknown issue")
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
/// A single style violation: file, 1-based line, rule code and name.
pub struct Issue {
    pub file: String,
    pub line: usize,
    pub code: String,
    pub name: String,
}

impl Issue {
    /// Build an issue for `code`, resolving the name from the catalog.
    pub fn new(line: usize, code: &str, file: &str) -> Self {
        Issue {
            file: file.to_string(),
            line,
            code: code.to_string(),
            name: issue_name(code).to_string(),
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: Line {}: {} {}",
            self.file, self.line, self.code, self.name
        )
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
/// Aggregated scan summary used by printers.
pub struct Summary {
    pub issues: usize,
    pub files: usize,
}

#[derive(Serialize, Debug, Clone)]
/// Scan results container: ordered issues plus summary.
pub struct ScanResult {
    pub issues: Vec<Issue>,
    pub summary: Summary,
}
