//! Scan runner: the ordered rule registry and per-file evaluation.
//!
//! Produces a `ScanResult` with issues and a summary. Twelve rules
//! (S001–S012) run against every line of every target file, in
//! registration order, so issues come out sorted by line and then by
//! code without any explicit sort.

use crate::checks::{self, BlankRun};
use crate::models::{Issue, ScanResult, Summary};
use glob::glob;
use rayon::prelude::*;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

/// One registry entry: a stable code paired with its predicate.
pub struct Rule {
    pub code: &'static str,
    check: CheckFn,
}

/// All predicates share one shape. Most ignore the checker context and
/// the per-file state; S001 reads the configured limit, S007 the
/// compiled spacing patterns, and S006 the blank-run counter.
type CheckFn = fn(&Checker, &mut FileState, &str) -> bool;

/// Mutable state scoped to a single file scan. A fresh value is created
/// per file so nothing leaks between files in one run.
#[derive(Default)]
pub struct FileState {
    blank_run: BlankRun,
}

/// The rule engine: ordered registry plus the pieces of configuration
/// the predicates need. Built once, immutable afterwards, and shared
/// freely across threads.
pub struct Checker {
    rules: Vec<Rule>,
    limit: usize,
    def_gap: Regex,
    class_gap: Regex,
}

impl Checker {
    pub fn new(limit: usize) -> Self {
        Checker {
            rules: registry(),
            limit,
            def_gap: Regex::new(r"^def {2,}").expect("spacing pattern"),
            class_gap: Regex::new(r"^class {2,}").expect("spacing pattern"),
        }
    }

    /// Rule codes in registration order.
    pub fn codes(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.code).collect()
    }

    /// Evaluate every rule against every line of `text`, in order.
    ///
    /// Lines are 1-indexed. For each line all twelve rules run in
    /// registration order, which yields the final issue order directly:
    /// ascending line, then ascending code within a line.
    pub fn check_file(&self, file: &str, text: &str) -> Vec<Issue> {
        let mut state = FileState::default();
        let mut issues = Vec::new();
        for (idx, line) in text.lines().enumerate() {
            for rule in &self.rules {
                if (rule.check)(self, &mut state, line) {
                    issues.push(Issue::new(idx + 1, rule.code, file));
                }
            }
        }
        issues
    }
}

/// The fixed rule registry. Order is part of the output contract.
fn registry() -> Vec<Rule> {
    vec![
        Rule { code: "S001", check: |c, _, line| checks::long_line(line, c.limit) },
        Rule { code: "S002", check: |_, _, line| checks::bad_indentation(line) },
        Rule { code: "S003", check: |_, _, line| checks::trailing_semicolon(line) },
        Rule { code: "S004", check: |_, _, line| checks::cramped_inline_comment(line) },
        Rule { code: "S005", check: |_, _, line| checks::todo_comment(line) },
        Rule { code: "S006", check: |_, s, line| s.blank_run.observe(line) },
        Rule {
            code: "S007",
            check: |c, _, line| checks::overspaced_construct(line, &c.def_gap, &c.class_gap),
        },
        Rule { code: "S008", check: |_, _, line| checks::bad_class_name(line) },
        Rule { code: "S009", check: |_, _, line| checks::bad_function_name(line) },
        Rule { code: "S010", check: |_, _, line| checks::bad_argument_name(line) },
        Rule { code: "S011", check: |_, _, line| checks::bad_variable_name(line) },
        Rule { code: "S012", check: |_, _, line| checks::mutable_default(line) },
    ]
}

/// Expand a scan target into concrete files.
///
/// A file is returned as-is; a directory is expanded through the
/// configured glob patterns, sorted lexicographically by full path and
/// deduplicated so runs are reproducible.
pub fn collect_targets(path: &Path, patterns: &[String]) -> Vec<PathBuf> {
    if path.is_file() {
        return vec![path.to_path_buf()];
    }
    let mut targets: Vec<PathBuf> = Vec::new();
    for pat in patterns {
        let abs_glob = path.join(pat);
        let pattern = abs_glob.to_string_lossy().to_string();
        for entry in glob(&pattern).expect("bad glob pattern").flatten() {
            if entry.is_file() {
                targets.push(entry);
            }
        }
    }
    targets.sort();
    targets.dedup();
    targets
}

/// Scan `path` (file or directory) and collect issues in target order.
///
/// Files are processed in parallel; each gets its own `FileState`, and
/// per-file results are concatenated in target order, so the output is
/// identical to a sequential scan. Unreadable files are reported in the
/// returned error list and skipped.
pub fn run_scan(path: &Path, patterns: &[String], checker: &Checker) -> (ScanResult, Vec<String>) {
    let targets = collect_targets(path, patterns);
    let per_file: Vec<Result<Vec<Issue>, String>> = targets
        .par_iter()
        .map(|target| {
            let label = target.to_string_lossy();
            match fs::read_to_string(target) {
                Ok(text) => Ok(checker.check_file(&label, &text)),
                Err(err) => Err(format!("cannot read {}: {}", label, err)),
            }
        })
        .collect();

    let mut issues: Vec<Issue> = Vec::new();
    let mut errors: Vec<String> = Vec::new();
    let mut files = 0usize;
    for outcome in per_file {
        match outcome {
            Ok(mut found) => {
                files += 1;
                issues.append(&mut found);
            }
            Err(err) => errors.push(err),
        }
    }
    let summary = Summary { issues: issues.len(), files };
    (ScanResult { issues, summary }, errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    fn codes_for(text: &str) -> Vec<(usize, String)> {
        let checker = Checker::new(79);
        checker
            .check_file("test.py", text)
            .into_iter()
            .map(|is| (is.line, is.code))
            .collect()
    }

    #[test]
    fn test_registry_order_is_fixed() {
        let checker = Checker::new(79);
        let expected: Vec<String> = (1..=12).map(|n| format!("S{:03}", n)).collect();
        assert_eq!(checker.codes(), expected);
    }

    #[test]
    fn test_bad_class_name_flags_once_on_line_one() {
        let issues = codes_for("class bad_name:\n    pass\n");
        assert_eq!(issues, vec![(1, "S008".to_string())]);
    }

    #[test]
    fn test_same_line_issues_follow_registry_order() {
        let issues = codes_for("def F(X):\n    pass\n");
        assert_eq!(
            issues,
            vec![(1, "S009".to_string()), (1, "S010".to_string())]
        );
    }

    #[test]
    fn test_blank_run_flags_the_code_line() {
        let issues = codes_for("x = 1\n\n\n\ny = 2\n");
        assert_eq!(issues, vec![(5, "S006".to_string())]);
        // Two blanks stay quiet.
        assert!(codes_for("x = 1\n\n\ny = 2\n").is_empty());
    }

    #[test]
    fn test_blank_state_does_not_leak_between_files() {
        let checker = Checker::new(79);
        // A file ending in a long blank run...
        let first = checker.check_file("a.py", "x = 1\n\n\n\n");
        assert!(first.is_empty());
        // ...must not prime the next file's counter.
        let second = checker.check_file("b.py", "y = 2\n");
        assert!(second.is_empty());
    }

    #[test]
    fn test_mutable_default_and_semicolon_combination() {
        let issues = codes_for("def f(x, y=[]):\n    return x;\n");
        assert_eq!(
            issues,
            vec![(1, "S012".to_string()), (2, "S003".to_string())]
        );
    }

    #[test]
    fn test_issue_lines_are_one_indexed_and_ordered() {
        let text = "X = 1\nx = 2;\n";
        let issues = codes_for(text);
        assert_eq!(
            issues,
            vec![(1, "S011".to_string()), (2, "S003".to_string())]
        );
    }

    #[test]
    fn test_run_scan_orders_files_lexicographically() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let mut b = fs::File::create(root.join("b.py")).unwrap();
        writeln!(b, "X = 1").unwrap();
        let mut a = fs::File::create(root.join("a.py")).unwrap();
        writeln!(a, "Y = 2").unwrap();

        let checker = Checker::new(79);
        let (result, errors) = run_scan(root, &["**/*.py".to_string()], &checker);
        assert!(errors.is_empty());
        assert_eq!(result.summary.files, 2);
        assert_eq!(result.summary.issues, 2);
        assert!(result.issues[0].file.ends_with("a.py"));
        assert!(result.issues[1].file.ends_with("b.py"));
    }

    #[test]
    fn test_run_scan_accepts_a_single_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("single.py");
        fs::write(&file, "def  f():\n    pass\n").unwrap();

        let checker = Checker::new(79);
        let (result, errors) = run_scan(&file, &["**/*.py".to_string()], &checker);
        assert!(errors.is_empty());
        assert_eq!(result.summary.files, 1);
        assert_eq!(result.issues.len(), 1);
        assert_eq!(result.issues[0].code, "S007");
    }

    #[test]
    fn test_non_python_files_are_ignored() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("notes.txt"), "X = 1\n").unwrap();
        fs::write(root.join("app.py"), "x = 1\n").unwrap();

        let checker = Checker::new(79);
        let (result, errors) = run_scan(root, &["**/*.py".to_string()], &checker);
        assert!(errors.is_empty());
        assert_eq!(result.summary.files, 1);
        assert!(result.issues.is_empty());
    }
}
