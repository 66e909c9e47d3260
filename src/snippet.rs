//! Single-line snippet parsing for the structural naming rules.
//!
//! A definition header such as `def f(x, y=0):` is not a complete
//! statement on its own, so `parse_definition` appends a `pass` no-op
//! before parsing and extracts only the fields the rules need: the
//! definition name, parameter names, and the shape of default values.
//! `parse_statement` parses a trimmed line as-is and is used to detect
//! simple assignments.
//!
//! Both entry points return `None` for anything that does not parse as a
//! single logical line. A malformed snippet is an expected outcome here,
//! never an error: the calling rule treats it as "does not apply".
//!
//! The parser covers one logical line of Python, which keeps the grammar
//! small: simple statements separated by `;`, `def`/`class` headers with
//! an inline body, and enough of the expression grammar (displays, calls,
//! subscripts, lambdas, conditional expressions, comprehensions) to accept
//! the lines real code puts on a definition header. A `#` ends the token
//! stream, so a header followed by an inline comment loses its appended
//! no-op body and does not parse.

use std::collections::HashSet;

/// One parsed statement from a snippet.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    ClassDef(ClassDef),
    FunctionDef(FunctionDef),
    Assign(Assign),
    Pass,
    Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassDef {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    pub name: String,
    /// Positional parameters (declared after any `/` marker).
    pub args: Vec<String>,
    /// Positional-only parameters (declared before a `/` marker).
    pub posonly_args: Vec<String>,
    /// Name bound by `*args`, if present.
    pub vararg: Option<String>,
    /// Name bound by `**kwargs`, if present.
    pub kwarg: Option<String>,
    /// Default-value shapes for the trailing positional parameters that
    /// declare one, in declaration order. Keyword-only defaults are not
    /// collected.
    pub defaults: Vec<Expr>,
}

impl FunctionDef {
    /// Parameter names in checking order: positional, positional-only,
    /// then the `**kwargs` name, then the `*args` name.
    pub fn param_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.args.iter().map(String::as_str).collect();
        names.extend(self.posonly_args.iter().map(String::as_str));
        if let Some(k) = &self.kwarg {
            names.push(k);
        }
        if let Some(v) = &self.vararg {
            names.push(v);
        }
        names
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Assign {
    /// Assignment targets in source order, one per `=` before the value.
    pub targets: Vec<Target>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Target {
    Name(String),
    Other,
}

/// The shape of an expression, as far as the rules care.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expr {
    List,
    Dict,
    Set,
    Tuple,
    Name,
    Number,
    Str,
    Call,
    Lambda,
    Other,
}

/// Parse a definition header by appending a no-op body.
///
/// Returns the parsed statement, or `None` when the augmented line is not
/// a single valid logical line (including headers that already carry a
/// body or an inline comment).
pub fn parse_definition(line: &str) -> Option<Stmt> {
    let augmented = format!("{} pass", line.trim());
    parse_line(&augmented).map(|mut stmts| stmts.remove(0))
}

/// Parse a line as-is and return its first statement.
pub fn parse_statement(line: &str) -> Option<Stmt> {
    parse_line(line.trim()).map(|mut stmts| stmts.remove(0))
}

fn parse_line(text: &str) -> Option<Vec<Stmt>> {
    let toks = tokenize(text)?;
    let mut p = Parser { toks, pos: 0 };
    if p.at_end() {
        return None;
    }
    let mut stmts = vec![p.parse_stmt()?];
    while p.eat_punct(";") {
        if p.at_end() {
            break;
        }
        stmts.push(p.parse_stmt()?);
    }
    if !p.at_end() {
        return None;
    }
    Some(stmts)
}

// ---------------------------------------------------------------------------
// Tokens

#[derive(Debug, Clone, PartialEq)]
enum Tok {
    Name(String),
    Number,
    Str,
    Punct(&'static str),
}

/// Multi-character operators, longest first so prefixes never shadow them.
const MULTI_OPS: [&str; 22] = [
    "**=", "//=", "<<=", ">>=", "...", "->", "**", "//", "<<", ">>", "<=", ">=", "==", "!=",
    ":=", "+=", "-=", "*=", "/=", "%=", "&=", "|=",
];

const SINGLE_OPS: &str = "()[]{},:;.=+-*/%@&|^~<>";

const KEYWORDS: [&str; 30] = [
    "and", "or", "not", "if", "elif", "else", "for", "while", "in", "is", "def", "class",
    "return", "import", "from", "pass", "break", "continue", "lambda", "global", "nonlocal",
    "del", "yield", "raise", "try", "except", "finally", "with", "as", "assert",
];

fn is_keyword(name: &str) -> bool {
    KEYWORDS.contains(&name)
}

fn tokenize(text: &str) -> Option<Vec<Tok>> {
    let chars: Vec<char> = text.chars().collect();
    let mut toks = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c.is_whitespace() {
            i += 1;
            continue;
        }
        if c == '#' {
            break;
        }
        if c == '\'' || c == '"' {
            i = lex_string(&chars, i)?;
            toks.push(Tok::Str);
            continue;
        }
        if c.is_alphabetic() || c == '_' {
            let start = i;
            while i < chars.len() && (chars[i].is_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            // String prefixes: r"..", b'..', rb"..", f"..", etc.
            let is_prefix = word.len() <= 2 && word.chars().all(|p| "rRbBuUfF".contains(p));
            if is_prefix && i < chars.len() && (chars[i] == '\'' || chars[i] == '"') {
                i = lex_string(&chars, i)?;
                toks.push(Tok::Str);
            } else {
                toks.push(Tok::Name(word));
            }
            continue;
        }
        if c.is_ascii_digit() || (c == '.' && chars.get(i + 1).is_some_and(|d| d.is_ascii_digit()))
        {
            i += 1;
            while i < chars.len()
                && (chars[i].is_ascii_alphanumeric() || chars[i] == '_' || chars[i] == '.')
            {
                i += 1;
            }
            toks.push(Tok::Number);
            continue;
        }
        if let Some(op) = MULTI_OPS
            .iter()
            .copied()
            .find(|op| chars[i..].starts_with(&op.chars().collect::<Vec<_>>()[..]))
        {
            toks.push(Tok::Punct(op));
            i += op.len();
            continue;
        }
        if let Some(pos) = SINGLE_OPS.find(c) {
            toks.push(Tok::Punct(&SINGLE_OPS[pos..pos + c.len_utf8()]));
            i += 1;
            continue;
        }
        return None;
    }
    Some(toks)
}

/// Lex a string literal starting at the opening quote; returns the index
/// past the closing quote, or `None` when unterminated.
fn lex_string(chars: &[char], start: usize) -> Option<usize> {
    let quote = chars[start];
    let triple = chars.get(start + 1) == Some(&quote) && chars.get(start + 2) == Some(&quote);
    let mut i = if triple { start + 3 } else { start + 1 };
    while i < chars.len() {
        let c = chars[i];
        if c == '\\' {
            i += 2;
            continue;
        }
        if c == quote {
            if !triple {
                return Some(i + 1);
            }
            if chars.get(i + 1) == Some(&quote) && chars.get(i + 2) == Some(&quote) {
                return Some(i + 3);
            }
        }
        i += 1;
    }
    None
}

// ---------------------------------------------------------------------------
// Parser

/// Expression result carrying the shape plus, for a bare identifier, its
/// text (assignment targets need the name, nothing else does).
#[derive(Debug, Clone)]
struct ParsedExpr {
    kind: Expr,
    name: Option<String>,
}

impl ParsedExpr {
    fn of(kind: Expr) -> Self {
        ParsedExpr { kind, name: None }
    }
}

struct Parser {
    toks: Vec<Tok>,
    pos: usize,
}

impl Parser {
    fn at_end(&self) -> bool {
        self.pos >= self.toks.len()
    }

    fn peek(&self) -> Option<&Tok> {
        self.toks.get(self.pos)
    }

    fn bump(&mut self) -> Option<&Tok> {
        let t = self.toks.get(self.pos);
        self.pos += 1;
        t
    }

    fn check_punct(&self, p: &str) -> bool {
        matches!(self.peek(), Some(Tok::Punct(q)) if *q == p)
    }

    fn eat_punct(&mut self, p: &str) -> bool {
        if self.check_punct(p) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect_punct(&mut self, p: &str) -> Option<()> {
        if self.eat_punct(p) {
            Some(())
        } else {
            None
        }
    }

    fn check_name(&self, kw: &str) -> bool {
        matches!(self.peek(), Some(Tok::Name(n)) if n == kw)
    }

    fn check_name_at(&self, offset: usize, kw: &str) -> bool {
        matches!(self.toks.get(self.pos + offset), Some(Tok::Name(n)) if n == kw)
    }

    fn eat_name(&mut self, kw: &str) -> bool {
        if self.check_name(kw) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consume an identifier that is not a reserved word.
    fn expect_ident(&mut self) -> Option<String> {
        match self.peek() {
            Some(Tok::Name(n)) if !is_keyword(n) && !matches!(n.as_str(), "True" | "False" | "None") => {
                let name = n.clone();
                self.pos += 1;
                Some(name)
            }
            _ => None,
        }
    }

    // -- statements --

    fn parse_stmt(&mut self) -> Option<Stmt> {
        if self.check_name("def") {
            return self.parse_def();
        }
        if self.check_name("class") {
            return self.parse_class();
        }
        self.parse_simple_stmt()
    }

    fn parse_simple_stmt(&mut self) -> Option<Stmt> {
        if self.eat_name("pass") {
            return Some(Stmt::Pass);
        }
        let first = self.parse_testlist()?;
        // Annotated binding (`x: int = 5`) is not a plain assignment.
        if self.eat_punct(":") {
            self.parse_expr()?;
            if self.eat_punct("=") {
                self.parse_testlist()?;
            }
            return Some(Stmt::Expr);
        }
        if self.peek_aug_assign() {
            // Augmented assignment rebinds rather than binds.
            self.pos += 1;
            self.parse_testlist()?;
            return Some(Stmt::Expr);
        }
        if !self.check_punct("=") {
            return Some(Stmt::Expr);
        }
        let mut items = vec![first];
        while self.eat_punct("=") {
            items.push(self.parse_testlist()?);
        }
        items.pop()?; // last item is the assigned value
        let targets = items
            .into_iter()
            .map(|t| match t.name {
                Some(n) => Target::Name(n),
                None => Target::Other,
            })
            .collect();
        Some(Stmt::Assign(Assign { targets }))
    }

    fn parse_def(&mut self) -> Option<Stmt> {
        self.bump();
        let name = self.expect_ident()?;
        self.expect_punct("(")?;
        let mut def = self.parse_params()?;
        if self.eat_punct("->") {
            self.parse_expr()?;
        }
        self.expect_punct(":")?;
        self.parse_simple_stmt()?;
        def.name = name;
        Some(Stmt::FunctionDef(def))
    }

    fn parse_class(&mut self) -> Option<Stmt> {
        self.bump();
        let name = self.expect_ident()?;
        if self.eat_punct("(") {
            self.parse_call_args()?;
        }
        self.expect_punct(":")?;
        self.parse_simple_stmt()?;
        Some(Stmt::ClassDef(ClassDef { name }))
    }

    /// Parse a parenthesized parameter list, consuming the closing `)`.
    fn parse_params(&mut self) -> Option<FunctionDef> {
        let mut def = FunctionDef {
            name: String::new(),
            args: Vec::new(),
            posonly_args: Vec::new(),
            vararg: None,
            kwarg: None,
            defaults: Vec::new(),
        };
        let mut seen: HashSet<String> = HashSet::new();
        let mut kwonly = false;
        let mut bare_star = false;
        let mut kwonly_count = 0usize;
        let mut seen_default = false;
        loop {
            if self.eat_punct(")") {
                break;
            }
            if def.kwarg.is_some() {
                // Nothing may follow **kwargs but a trailing comma.
                return None;
            }
            if self.eat_punct("/") {
                if def.args.is_empty() || !def.posonly_args.is_empty() || kwonly {
                    return None;
                }
                def.posonly_args = std::mem::take(&mut def.args);
            } else if self.eat_punct("**") {
                let name = self.param_name(&mut seen)?;
                if self.eat_punct(":") {
                    self.parse_expr()?;
                }
                def.kwarg = Some(name);
            } else if self.eat_punct("*") {
                if kwonly {
                    return None;
                }
                kwonly = true;
                if self.check_punct(",") || self.check_punct(")") {
                    bare_star = true;
                } else {
                    let name = self.param_name(&mut seen)?;
                    if self.eat_punct(":") {
                        self.parse_expr()?;
                    }
                    def.vararg = Some(name);
                }
            } else {
                let name = self.param_name(&mut seen)?;
                if self.eat_punct(":") {
                    self.parse_expr()?;
                }
                let default = if self.eat_punct("=") {
                    Some(self.parse_expr()?.kind)
                } else {
                    None
                };
                if kwonly {
                    kwonly_count += 1;
                } else {
                    match default {
                        Some(kind) => {
                            def.defaults.push(kind);
                            seen_default = true;
                        }
                        None if seen_default => return None,
                        None => {}
                    }
                    def.args.push(name);
                }
            }
            if self.eat_punct(",") {
                continue;
            }
            self.expect_punct(")")?;
            break;
        }
        if bare_star && kwonly_count == 0 {
            return None;
        }
        Some(def)
    }

    fn param_name(&mut self, seen: &mut HashSet<String>) -> Option<String> {
        let name = self.expect_ident()?;
        if !seen.insert(name.clone()) {
            return None;
        }
        Some(name)
    }

    // -- expressions --

    /// True when the next token is an augmented-assignment operator.
    fn peek_aug_assign(&self) -> bool {
        match self.peek() {
            Some(Tok::Punct(op)) => {
                op.len() >= 2
                    && op.ends_with('=')
                    && !matches!(*op, "==" | "!=" | "<=" | ">=" | ":=")
            }
            _ => false,
        }
    }

    /// Comma-separated expression list; a lone expression keeps its shape,
    /// anything with a comma is a tuple.
    fn parse_testlist(&mut self) -> Option<ParsedExpr> {
        let first = self.parse_expr()?;
        if !self.check_punct(",") {
            return Some(first);
        }
        while self.eat_punct(",") {
            if self.at_end()
                || self.check_punct("=")
                || self.check_punct(";")
                || self.check_punct(":")
                || self.peek_aug_assign()
            {
                break;
            }
            self.parse_expr()?;
        }
        Some(ParsedExpr::of(Expr::Tuple))
    }

    fn parse_expr(&mut self) -> Option<ParsedExpr> {
        if self.check_name("lambda") {
            return self.parse_lambda();
        }
        let left = self.parse_operand_chain()?;
        if self.eat_name("if") {
            self.parse_operand_chain()?;
            if !self.eat_name("else") {
                return None;
            }
            self.parse_expr()?;
            return Some(ParsedExpr::of(Expr::Other));
        }
        Some(left)
    }

    /// Flat binary-operator chain; shape collapses to `Other` as soon as
    /// an operator participates.
    fn parse_operand_chain(&mut self) -> Option<ParsedExpr> {
        let mut left = self.parse_unary()?;
        let mut chained = false;
        while self.eat_binop() {
            self.parse_unary()?;
            chained = true;
        }
        if chained {
            left = ParsedExpr::of(Expr::Other);
        }
        Some(left)
    }

    fn eat_binop(&mut self) -> bool {
        match self.peek() {
            Some(Tok::Punct(op))
                if matches!(
                    *op,
                    "+" | "-" | "*" | "/" | "%" | "@" | "//" | "**" | "<<" | ">>" | "&" | "|"
                        | "^" | "<" | ">" | "<=" | ">=" | "==" | "!=" | ":="
                ) =>
            {
                self.pos += 1;
                true
            }
            Some(Tok::Name(n)) if n == "and" || n == "or" || n == "in" => {
                self.pos += 1;
                true
            }
            Some(Tok::Name(n)) if n == "is" => {
                self.pos += 1;
                self.eat_name("not");
                true
            }
            Some(Tok::Name(n)) if n == "not" && self.check_name_at(1, "in") => {
                self.pos += 2;
                true
            }
            _ => false,
        }
    }

    fn parse_unary(&mut self) -> Option<ParsedExpr> {
        if self.eat_name("not") {
            self.parse_unary()?;
            return Some(ParsedExpr::of(Expr::Other));
        }
        if self.check_punct("-") || self.check_punct("+") || self.check_punct("~") {
            self.pos += 1;
            self.parse_unary()?;
            return Some(ParsedExpr::of(Expr::Other));
        }
        // Iterable/mapping unpacking inside displays and calls.
        if self.check_punct("*") || self.check_punct("**") {
            self.pos += 1;
            self.parse_unary()?;
            return Some(ParsedExpr::of(Expr::Other));
        }
        self.parse_postfix()
    }

    fn parse_postfix(&mut self) -> Option<ParsedExpr> {
        let mut expr = self.parse_atom()?;
        loop {
            if self.eat_punct("(") {
                self.parse_call_args()?;
                expr = ParsedExpr::of(Expr::Call);
            } else if self.eat_punct("[") {
                self.parse_subscript()?;
                expr = ParsedExpr::of(Expr::Other);
            } else if self.eat_punct(".") {
                self.expect_ident()?;
                expr = ParsedExpr::of(Expr::Other);
            } else {
                break;
            }
        }
        Some(expr)
    }

    fn parse_atom(&mut self) -> Option<ParsedExpr> {
        match self.peek()? {
            Tok::Number => {
                self.pos += 1;
                Some(ParsedExpr::of(Expr::Number))
            }
            Tok::Str => {
                self.pos += 1;
                // Adjacent literals concatenate.
                while matches!(self.peek(), Some(Tok::Str)) {
                    self.pos += 1;
                }
                Some(ParsedExpr::of(Expr::Str))
            }
            Tok::Punct("...") => {
                self.pos += 1;
                Some(ParsedExpr::of(Expr::Other))
            }
            Tok::Punct("(") => {
                self.pos += 1;
                self.parse_paren()
            }
            Tok::Punct("[") => {
                self.pos += 1;
                self.parse_list()
            }
            Tok::Punct("{") => {
                self.pos += 1;
                self.parse_braces()
            }
            Tok::Name(n) => {
                if matches!(n.as_str(), "True" | "False" | "None") {
                    self.pos += 1;
                    return Some(ParsedExpr::of(Expr::Other));
                }
                if is_keyword(n) {
                    return None;
                }
                let name = n.clone();
                self.pos += 1;
                Some(ParsedExpr {
                    kind: Expr::Name,
                    name: Some(name),
                })
            }
            _ => None,
        }
    }

    fn parse_paren(&mut self) -> Option<ParsedExpr> {
        if self.eat_punct(")") {
            return Some(ParsedExpr::of(Expr::Tuple));
        }
        let first = self.parse_expr()?;
        if self.check_name("for") {
            self.skip_comprehension(")")?;
            return Some(ParsedExpr::of(Expr::Other));
        }
        if !self.check_punct(",") {
            self.expect_punct(")")?;
            // Parentheses are transparent around a single expression.
            return Some(first);
        }
        while self.eat_punct(",") {
            if self.check_punct(")") {
                break;
            }
            self.parse_expr()?;
        }
        self.expect_punct(")")?;
        Some(ParsedExpr::of(Expr::Tuple))
    }

    fn parse_list(&mut self) -> Option<ParsedExpr> {
        if self.eat_punct("]") {
            return Some(ParsedExpr::of(Expr::List));
        }
        self.parse_expr()?;
        if self.check_name("for") {
            self.skip_comprehension("]")?;
            return Some(ParsedExpr::of(Expr::Other));
        }
        while self.eat_punct(",") {
            if self.check_punct("]") {
                break;
            }
            self.parse_expr()?;
        }
        self.expect_punct("]")?;
        Some(ParsedExpr::of(Expr::List))
    }

    fn parse_braces(&mut self) -> Option<ParsedExpr> {
        if self.eat_punct("}") {
            return Some(ParsedExpr::of(Expr::Dict));
        }
        if self.check_punct("**") {
            // Mapping unpacking only occurs in dict displays.
            return self.parse_dict_tail(true);
        }
        self.parse_expr()?;
        if self.eat_punct(":") {
            self.parse_expr()?;
            if self.check_name("for") {
                self.skip_comprehension("}")?;
                return Some(ParsedExpr::of(Expr::Other));
            }
            return self.parse_dict_tail(false);
        }
        if self.check_name("for") {
            self.skip_comprehension("}")?;
            return Some(ParsedExpr::of(Expr::Other));
        }
        while self.eat_punct(",") {
            if self.check_punct("}") {
                break;
            }
            self.parse_expr()?;
        }
        self.expect_punct("}")?;
        Some(ParsedExpr::of(Expr::Set))
    }

    /// Remaining `key: value` / `**mapping` entries of a dict display.
    /// When `leading` is set the first entry has not been consumed yet.
    fn parse_dict_tail(&mut self, leading: bool) -> Option<ParsedExpr> {
        if leading {
            self.expect_punct("**")?;
            self.parse_unary()?;
        }
        while self.eat_punct(",") {
            if self.check_punct("}") {
                break;
            }
            if self.eat_punct("**") {
                self.parse_unary()?;
            } else {
                self.parse_expr()?;
                self.expect_punct(":")?;
                self.parse_expr()?;
            }
        }
        self.expect_punct("}")?;
        Some(ParsedExpr::of(Expr::Dict))
    }

    fn parse_lambda(&mut self) -> Option<ParsedExpr> {
        self.bump();
        if !self.eat_punct(":") {
            loop {
                if self.eat_punct("**") {
                    self.expect_ident()?;
                } else if self.eat_punct("*") {
                    if !self.check_punct(",") && !self.check_punct(":") {
                        self.expect_ident()?;
                    }
                } else if !self.eat_punct("/") {
                    self.expect_ident()?;
                    if self.eat_punct("=") {
                        self.parse_expr()?;
                    }
                }
                if self.eat_punct(",") {
                    continue;
                }
                self.expect_punct(":")?;
                break;
            }
        }
        self.parse_expr()?;
        Some(ParsedExpr::of(Expr::Lambda))
    }

    /// Arguments of a call or class-header base list, consuming `)`.
    fn parse_call_args(&mut self) -> Option<()> {
        loop {
            if self.eat_punct(")") {
                return Some(());
            }
            if self.eat_punct("*") || self.eat_punct("**") {
                self.parse_expr()?;
            } else {
                let arg = self.parse_expr()?;
                if self.check_name("for") {
                    self.skip_comprehension(")")?;
                    return Some(());
                }
                if arg.name.is_some() && self.eat_punct("=") {
                    self.parse_expr()?;
                }
            }
            if self.eat_punct(",") {
                continue;
            }
            return self.expect_punct(")");
        }
    }

    /// Subscript contents, consuming `]`. Slices make colon and comma
    /// structural here, so both pass freely between expressions.
    fn parse_subscript(&mut self) -> Option<()> {
        let mut saw_item = false;
        loop {
            if self.check_punct("]") {
                if !saw_item {
                    return None;
                }
                self.pos += 1;
                return Some(());
            }
            if self.eat_punct(":") || self.eat_punct(",") {
                saw_item = true;
                continue;
            }
            self.parse_expr()?;
            saw_item = true;
        }
    }

    /// Consume a `for ... in ...` comprehension tail up to and including
    /// the closing bracket, tracking nested bracket depth.
    fn skip_comprehension(&mut self, close: &str) -> Option<()> {
        let mut depth = 0usize;
        while let Some(tok) = self.bump() {
            if let Tok::Punct(p) = tok {
                match *p {
                    "(" | "[" | "{" => depth += 1,
                    ")" | "]" | "}" => {
                        if depth == 0 {
                            return if *p == close { Some(()) } else { None };
                        }
                        depth -= 1;
                    }
                    _ => {}
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_def(line: &str) -> FunctionDef {
        match parse_definition(line) {
            Some(Stmt::FunctionDef(def)) => def,
            other => panic!("expected function def, got {:?}", other),
        }
    }

    #[test]
    fn test_class_header_parses_with_appended_noop() {
        let stmt = parse_definition("class bad_name:").unwrap();
        assert_eq!(stmt, Stmt::ClassDef(ClassDef { name: "bad_name".into() }));
        let stmt = parse_definition("class Queue(Base, metaclass=Meta):").unwrap();
        assert!(matches!(stmt, Stmt::ClassDef(ref c) if c.name == "Queue"));
    }

    #[test]
    fn test_def_header_collects_params_and_defaults() {
        let def = parse_def("def f(x, y=[]):");
        assert_eq!(def.args, vec!["x", "y"]);
        assert_eq!(def.defaults, vec![Expr::List]);

        let def = parse_def("def f(x, y=set(), z={}):");
        assert_eq!(def.defaults, vec![Expr::Call, Expr::Dict]);
    }

    #[test]
    fn test_param_order_positional_posonly_kwarg_vararg() {
        let def = parse_def("def f(a, b, /, c, *args, **kw):");
        assert_eq!(def.param_names(), vec!["c", "a", "b", "kw", "args"]);
    }

    #[test]
    fn test_keyword_only_section_is_not_collected() {
        let def = parse_def("def f(x, *, y=[], z={}):");
        assert_eq!(def.args, vec!["x"]);
        assert!(def.defaults.is_empty());
        assert_eq!(def.param_names(), vec!["x"]);
    }

    #[test]
    fn test_set_display_is_not_a_dict() {
        let def = parse_def("def f(x={1, 2}):");
        assert_eq!(def.defaults, vec![Expr::Set]);
        let def = parse_def("def f(x={1: 2}):");
        assert_eq!(def.defaults, vec![Expr::Dict]);
        let def = parse_def("def f(x={}):");
        assert_eq!(def.defaults, vec![Expr::Dict]);
    }

    #[test]
    fn test_comprehension_default_is_not_a_list() {
        let def = parse_def("def f(x=[i for i in y]):");
        assert_eq!(def.defaults, vec![Expr::Other]);
    }

    #[test]
    fn test_parenthesized_default_keeps_inner_shape() {
        let def = parse_def("def f(x=([])):");
        assert_eq!(def.defaults, vec![Expr::List]);
    }

    #[test]
    fn test_annotations_and_return_type_are_accepted() {
        let def = parse_def("def fetch(url: str, retries: int = 3) -> bytes:");
        assert_eq!(def.args, vec!["url", "retries"]);
        assert_eq!(def.defaults, vec![Expr::Number]);
    }

    #[test]
    fn test_header_with_inline_body_does_not_parse() {
        assert_eq!(parse_definition("def f(): pass"), None);
        assert_eq!(parse_definition("def f(): return 1"), None);
    }

    #[test]
    fn test_header_with_trailing_comment_does_not_parse() {
        // The comment swallows the appended no-op, leaving no body.
        assert_eq!(parse_definition("def f(x):  # setup"), None);
    }

    #[test]
    fn test_malformed_headers_do_not_parse() {
        assert_eq!(parse_definition("class Foo"), None);
        assert_eq!(parse_definition("def f(x"), None);
        assert_eq!(parse_definition("def f(x, x):"), None);
        assert_eq!(parse_definition("def f(x=1, y):"), None);
        assert_eq!(parse_definition("def f(*):"), None);
    }

    #[test]
    fn test_lambda_default_parses() {
        let def = parse_def("def f(key=lambda item: item[0]):");
        assert_eq!(def.defaults, vec![Expr::Lambda]);
    }

    #[test]
    fn test_simple_assignment_targets() {
        let stmt = parse_statement("X = 1").unwrap();
        assert_eq!(
            stmt,
            Stmt::Assign(Assign { targets: vec![Target::Name("X".into())] })
        );

        let stmt = parse_statement("a = b = []").unwrap();
        assert_eq!(
            stmt,
            Stmt::Assign(Assign {
                targets: vec![Target::Name("a".into()), Target::Name("b".into())],
            })
        );
    }

    #[test]
    fn test_non_name_targets_are_opaque() {
        let stmt = parse_statement("obj.attr = 1").unwrap();
        assert_eq!(stmt, Stmt::Assign(Assign { targets: vec![Target::Other] }));
        let stmt = parse_statement("a, b = 1, 2").unwrap();
        assert_eq!(stmt, Stmt::Assign(Assign { targets: vec![Target::Other] }));
        let stmt = parse_statement("items[0] = 1").unwrap();
        assert_eq!(stmt, Stmt::Assign(Assign { targets: vec![Target::Other] }));
    }

    #[test]
    fn test_rebindings_are_not_plain_assignments() {
        assert_eq!(parse_statement("x += 1"), Some(Stmt::Expr));
        assert_eq!(parse_statement("x: int = 5"), Some(Stmt::Expr));
    }

    #[test]
    fn test_quoted_hash_stays_inside_the_string() {
        let stmt = parse_statement("x = \"a#b\"").unwrap();
        assert_eq!(
            stmt,
            Stmt::Assign(Assign { targets: vec![Target::Name("x".into())] })
        );
    }

    #[test]
    fn test_unparseable_lines_return_none() {
        assert_eq!(parse_statement(""), None);
        assert_eq!(parse_statement("# only a comment"), None);
        assert_eq!(parse_statement("x ="), None);
        assert_eq!(parse_statement("return 1"), None);
        assert_eq!(parse_statement("x = 'unterminated"), None);
    }

    #[test]
    fn test_semicolon_separated_statements() {
        let stmt = parse_statement("X = 1; y = 2").unwrap();
        assert_eq!(
            stmt,
            Stmt::Assign(Assign { targets: vec![Target::Name("X".into())] })
        );
        assert_eq!(parse_statement("x = 1; )"), None);
    }

    #[test]
    fn test_string_prefixes_lex_as_strings() {
        let def = parse_def("def f(pattern=r\"\\d+\", payload=b'x'):");
        assert_eq!(def.defaults, vec![Expr::Str, Expr::Str]);
    }
}
