//! The style-rule predicates.
//!
//! Each check takes one raw source line (trailing newline already
//! stripped) and answers whether the rule fires on it. All checks are
//! pure except the blank-run counter, whose state lives in a `BlankRun`
//! value owned by the caller and scoped to a single file.
//!
//! Comment handling is deliberately line-local: the splitter only shields
//! a `#` that stands alone inside quotes (`'#'` or `"#"`). A `#` embedded
//! anywhere else in a string literal still reads as a comment start, so
//! `x = "a#b"` is split after `"a`. Downstream checks inherit that
//! behavior on purpose.

use crate::snippet::{self, Expr, Stmt, Target};
use regex::Regex;

const TAB_STOP: usize = 4;

/// Expand tabs to the next 4-column stop, the way editors render them.
pub fn expand_tabs(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut col = 0usize;
    for c in line.chars() {
        match c {
            '\t' => {
                let pad = TAB_STOP - col % TAB_STOP;
                out.extend(std::iter::repeat(' ').take(pad));
                col += pad;
            }
            '\n' | '\r' => {
                out.push(c);
                col = 0;
            }
            _ => {
                out.push(c);
                col += 1;
            }
        }
    }
    out
}

/// Split a line into (code prefix, comment text) around the first `#`,
/// shielding the quoted literals `'#'` and `"#"` first. Both halves are
/// empty-string when absent.
fn split_comment(line: &str) -> (String, String) {
    let sanitized = line.replace("'#'", "'_'").replace("\"#\"", "\"_\"");
    match sanitized.split_once('#') {
        Some((prefix, comment)) => (prefix.to_string(), comment.to_string()),
        None => (sanitized, String::new()),
    }
}

/// S001: the line has more characters than the configured limit.
pub fn long_line(line: &str, limit: usize) -> bool {
    line.chars().count() > limit
}

/// S002: leading whitespace is not a multiple of four columns.
pub fn bad_indentation(line: &str) -> bool {
    let spaces = expand_tabs(line).chars().take_while(|c| *c == ' ').count();
    spaces % 4 != 0
}

/// S003: the code part of the line ends with a semicolon.
pub fn trailing_semicolon(line: &str) -> bool {
    let (prefix, _) = split_comment(line);
    prefix.trim().ends_with(';')
}

/// S004: an inline comment sits less than two spaces after the code.
pub fn cramped_inline_comment(line: &str) -> bool {
    let (prefix, comment) = split_comment(line);
    !prefix.is_empty() && !comment.is_empty() && !prefix.ends_with("  ")
}

/// S005: the comment text mentions "todo", case-insensitively. Code is
/// never searched, only the comment part.
pub fn todo_comment(line: &str) -> bool {
    let (_, comment) = split_comment(line);
    comment.to_lowercase().contains("todo")
}

/// Per-file counter behind S006. Feed every line in order; the check
/// fires on the first code line after a run of more than two blanks.
#[derive(Debug, Default)]
pub struct BlankRun {
    run: usize,
}

impl BlankRun {
    pub fn observe(&mut self, line: &str) -> bool {
        if line.trim().is_empty() {
            self.run += 1;
            return false;
        }
        let over = self.run > 2;
        self.run = 0;
        over
    }
}

/// S007: two or more spaces between `def`/`class` and the name.
pub fn overspaced_construct(line: &str, def_gap: &Regex, class_gap: &Regex) -> bool {
    let expanded = expand_tabs(line);
    let trimmed = expanded.trim();
    if trimmed.starts_with("def ") {
        return def_gap.is_match(trimmed);
    }
    if trimmed.starts_with("class ") {
        return class_gap.is_match(trimmed);
    }
    false
}

/// First character uppercase, rest ASCII letters and digits only.
pub fn is_camel_case(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_ascii_uppercase())
        && name.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Lowercase ASCII letters, digits, and underscores only.
pub fn is_snake_case(name: &str) -> bool {
    name.chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

/// S008: a class header whose name is not CamelCase.
pub fn bad_class_name(line: &str) -> bool {
    let trimmed = line.trim();
    if !trimmed.starts_with("class") {
        return false;
    }
    match snippet::parse_definition(trimmed) {
        Some(Stmt::ClassDef(class)) => !is_camel_case(&class.name),
        _ => false,
    }
}

/// S009: a function header whose name is not snake_case.
pub fn bad_function_name(line: &str) -> bool {
    let trimmed = line.trim();
    if !trimmed.starts_with("def ") {
        return false;
    }
    match snippet::parse_definition(trimmed) {
        Some(Stmt::FunctionDef(def)) => !is_snake_case(&def.name),
        _ => false,
    }
}

/// S010: any parameter name that is not snake_case.
pub fn bad_argument_name(line: &str) -> bool {
    let trimmed = line.trim();
    if !trimmed.starts_with("def ") {
        return false;
    }
    match snippet::parse_definition(trimmed) {
        Some(Stmt::FunctionDef(def)) => def.param_names().iter().any(|n| !is_snake_case(n)),
        _ => false,
    }
}

/// S011: a simple assignment binding a name that is not snake_case.
/// Anything that is not a plain assignment, or whose target is not a
/// bare name, does not apply.
pub fn bad_variable_name(line: &str) -> bool {
    match snippet::parse_statement(line) {
        Some(Stmt::Assign(assign)) => {
            for target in &assign.targets {
                match target {
                    Target::Name(name) => {
                        if !is_snake_case(name) {
                            return true;
                        }
                    }
                    Target::Other => return false,
                }
            }
            false
        }
        _ => false,
    }
}

/// S012: a positional default that is a list or dict display. Other
/// mutable-looking defaults (set displays, constructor calls) are left
/// alone.
pub fn mutable_default(line: &str) -> bool {
    let trimmed = line.trim();
    if !trimmed.starts_with("def ") {
        return false;
    }
    match snippet::parse_definition(trimmed) {
        Some(Stmt::FunctionDef(def)) => def
            .defaults
            .iter()
            .any(|d| matches!(d, Expr::List | Expr::Dict)),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gap_regexes() -> (Regex, Regex) {
        (
            Regex::new(r"^def {2,}").unwrap(),
            Regex::new(r"^class {2,}").unwrap(),
        )
    }

    #[test]
    fn test_long_line_boundary() {
        let at_limit = "a".repeat(79);
        let over_limit = "a".repeat(80);
        assert!(!long_line(&at_limit, 79));
        assert!(long_line(&over_limit, 79));
        assert!(long_line(&at_limit, 60));
    }

    #[test]
    fn test_indentation_multiple_of_four() {
        assert!(!bad_indentation("x = 1"));
        assert!(!bad_indentation("    x = 1"));
        assert!(bad_indentation("   x = 1"));
        assert!(bad_indentation("  print('ok')"));
        // One tab expands to a full 4-column stop.
        assert!(!bad_indentation("\tx = 1"));
        assert!(bad_indentation("\t x = 1"));
    }

    #[test]
    fn test_trailing_semicolon() {
        assert!(trailing_semicolon("x = 1;"));
        assert!(trailing_semicolon("x = 1;  # note"));
        assert!(!trailing_semicolon("x = 1  # note;"));
        assert!(!trailing_semicolon("x = 1"));
    }

    #[test]
    fn test_comment_spacing() {
        assert!(cramped_inline_comment("x = 1 # tight"));
        assert!(!cramped_inline_comment("x = 1  # ok"));
        assert!(!cramped_inline_comment("# leading comment"));
        assert!(!cramped_inline_comment("x = 1"));
    }

    #[test]
    fn test_quoted_hash_is_shielded() {
        // The '#' literal is not a comment start, so these lines have no
        // comment at all.
        assert!(!cramped_inline_comment("x = '#'"));
        assert!(!todo_comment("x = '#'"));
        assert!(!cramped_inline_comment("x = 1  # '#'"));
        // A real semicolon after the shielded literal still counts.
        assert!(trailing_semicolon("x = '#';"));
    }

    #[test]
    fn test_embedded_hash_still_splits() {
        // A '#' inside a longer string is misread as a comment start;
        // that asymmetry is part of the rule's contract.
        assert!(cramped_inline_comment("x = \"a#b\""));
    }

    #[test]
    fn test_todo_in_comments_only() {
        assert!(todo_comment("x = 1  # TODO: fix"));
        assert!(todo_comment("# ToDo"));
        assert!(!todo_comment("todo = 1"));
        assert!(!todo_comment("x = 1  # done"));
    }

    #[test]
    fn test_blank_run_fires_once_after_three_blanks() {
        let mut state = BlankRun::default();
        assert!(!state.observe(""));
        assert!(!state.observe("   "));
        assert!(!state.observe(""));
        assert!(state.observe("x = 1"));
        // Counter reset: the next code line is clean.
        assert!(!state.observe("y = 2"));
    }

    #[test]
    fn test_blank_run_tolerates_two_blanks() {
        let mut state = BlankRun::default();
        assert!(!state.observe(""));
        assert!(!state.observe(""));
        assert!(!state.observe("x = 1"));
    }

    #[test]
    fn test_construct_spacing() {
        let (def_gap, class_gap) = gap_regexes();
        assert!(overspaced_construct("def  f():", &def_gap, &class_gap));
        assert!(!overspaced_construct("def f():", &def_gap, &class_gap));
        assert!(overspaced_construct("class  C:", &def_gap, &class_gap));
        assert!(!overspaced_construct("class C:", &def_gap, &class_gap));
        assert!(overspaced_construct("\tdef  f():", &def_gap, &class_gap));
        assert!(!overspaced_construct("result = 5", &def_gap, &class_gap));
    }

    #[test]
    fn test_name_classifiers() {
        assert!(is_camel_case("MyClass"));
        assert!(!is_camel_case("my_class"));
        assert!(!is_camel_case("My_Class"));
        assert!(is_snake_case("my_func_1"));
        assert!(!is_snake_case("MyFunc"));
    }

    #[test]
    fn test_class_naming() {
        assert!(bad_class_name("class bad_name:"));
        assert!(!bad_class_name("class GoodName:"));
        assert!(!bad_class_name("class GoodName(Base):"));
        // Not a class header at all.
        assert!(!bad_class_name("classes = []"));
        assert!(!bad_class_name("x = 1"));
    }

    #[test]
    fn test_function_and_argument_naming() {
        assert!(bad_function_name("def BadName():"));
        assert!(!bad_function_name("def good_name():"));
        assert!(bad_argument_name("def f(BadArg):"));
        assert!(!bad_argument_name("def f(good_arg):"));
        // Keyword-only parameters are outside the checked set.
        assert!(!bad_argument_name("def f(x, *, BadArg=1):"));
    }

    #[test]
    fn test_variable_naming() {
        assert!(bad_variable_name("X = 1"));
        assert!(bad_variable_name("    Value = compute()"));
        assert!(!bad_variable_name("x = 1"));
        assert!(!bad_variable_name("obj.Attr = 1"));
        assert!(!bad_variable_name("x += 1"));
        assert!(!bad_variable_name("if x:"));
    }

    #[test]
    fn test_mutable_default() {
        assert!(mutable_default("def f(x, y=[]):"));
        assert!(mutable_default("def f(x, y={}):"));
        assert!(!mutable_default("def f(x, y=set()):"));
        assert!(!mutable_default("def f(x, y={1, 2}):"));
        assert!(!mutable_default("def f(x, y=None):"));
        assert!(!mutable_default("def f(x, y=()):"));
    }
}
