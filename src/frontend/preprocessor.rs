// Mon Aug 24 2026 - Alex

use crate::frontend::error::ParseError;
use crate::frontend::lexer::{tokenize_line, Token, TokenKind};
use indexmap::IndexMap;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

const MAX_INCLUDE_DEPTH: usize = 32;

#[derive(Debug, Clone)]
pub struct MacroDef {
    params: Option<Vec<String>>,
    body: Vec<Token>,
}

impl MacroDef {
    fn object_like(body: Vec<Token>) -> Self {
        Self { params: None, body }
    }

    pub fn is_function_like(&self) -> bool {
        self.params.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CondFrame {
    parent_active: bool,
    active: bool,
    branch_taken: bool,
    seen_else: bool,
}

/// Line-oriented C preprocessor. Object-like macros are substituted into
/// the output token stream; function-like macro invocations are dropped
/// with a diagnostic, which is the right call for the attribute macros
/// (`__rte_cache_aligned` and friends) that show up in the headers this
/// tool is pointed at. Only quoted includes are resolved.
pub struct Preprocessor {
    macros: IndexMap<String, MacroDef>,
    include_dirs: Vec<PathBuf>,
    include_stack: Vec<PathBuf>,
}

impl Preprocessor {
    pub fn new() -> Self {
        Self {
            macros: IndexMap::new(),
            include_dirs: Vec::new(),
            include_stack: Vec::new(),
        }
    }

    pub fn with_include_dirs(mut self, dirs: Vec<PathBuf>) -> Self {
        self.include_dirs = dirs;
        self
    }

    /// Registers a caller-supplied definition before any source text is
    /// seen, matching the compiler's -D semantics: a bare key defines it
    /// to 1, KEY=VALUE defines it to the lexed value.
    pub fn define(&mut self, key: &str, value: Option<&str>) {
        let body_text = value.unwrap_or("1");
        let body = tokenize_line(body_text, 0).unwrap_or_default();
        self.macros.insert(key.to_string(), MacroDef::object_like(body));
    }

    pub fn is_defined(&self, name: &str) -> bool {
        self.macros.contains_key(name)
    }

    pub fn preprocess_file(&mut self, path: &Path) -> Result<Vec<Token>, ParseError> {
        let canonical = path.to_path_buf();
        if self.include_stack.contains(&canonical) {
            return Err(ParseError::IncludeCycle {
                path: canonical.display().to_string(),
            });
        }
        if self.include_stack.len() >= MAX_INCLUDE_DEPTH {
            return Err(ParseError::IncludeCycle {
                path: format!("include depth over {}", MAX_INCLUDE_DEPTH),
            });
        }

        let text = std::fs::read_to_string(path).map_err(|source| ParseError::Io {
            path: path.display().to_string(),
            source,
        })?;

        self.include_stack.push(canonical);
        let result = self.preprocess_text(&text);
        self.include_stack.pop();
        result
    }

    pub fn preprocess_text(&mut self, text: &str) -> Result<Vec<Token>, ParseError> {
        let stripped = strip_comments(text)?;
        let lines = splice_lines(&stripped);

        let mut output = Vec::new();
        let mut cond_stack: Vec<CondFrame> = Vec::new();

        for (line_no, line) in lines {
            let trimmed = line.trim_start();
            if let Some(directive) = trimmed.strip_prefix('#') {
                self.handle_directive(directive.trim_start(), line_no, &mut cond_stack, &mut output)?;
            } else if active(&cond_stack) && !trimmed.is_empty() {
                let tokens = tokenize_line(&line, line_no)?;
                self.expand_into(tokens, &mut output);
            }
        }

        if !cond_stack.is_empty() {
            return Err(ParseError::UnbalancedConditional {
                line: 0,
                directive: "missing #endif".to_string(),
            });
        }

        Ok(output)
    }

    fn handle_directive(
        &mut self,
        directive: &str,
        line_no: u32,
        cond_stack: &mut Vec<CondFrame>,
        output: &mut Vec<Token>,
    ) -> Result<(), ParseError> {
        let (name, rest) = split_directive(directive);
        match name {
            "ifdef" | "ifndef" => {
                let ident = rest.trim();
                if ident.is_empty() {
                    return Err(ParseError::MalformedDirective {
                        line: line_no,
                        message: format!("#{} requires a macro name", name),
                    });
                }
                let defined = self.is_defined(ident);
                let cond = if name == "ifdef" { defined } else { !defined };
                self.push_frame(cond_stack, cond);
            }
            "if" => {
                // Conditions inside skipped regions are not evaluated, so
                // junk in a dead branch cannot fail the whole parse.
                let value = if active(cond_stack) {
                    self.eval_condition(rest, line_no)?
                } else {
                    0
                };
                self.push_frame(cond_stack, value != 0);
            }
            "elif" => {
                let frame = cond_stack.last_mut().ok_or(ParseError::UnbalancedConditional {
                    line: line_no,
                    directive: "#elif".to_string(),
                })?;
                if frame.seen_else {
                    return Err(ParseError::UnbalancedConditional {
                        line: line_no,
                        directive: "#elif after #else".to_string(),
                    });
                }
                if frame.branch_taken || !frame.parent_active {
                    frame.active = false;
                } else {
                    let value = self.eval_condition(rest, line_no)?;
                    frame.active = value != 0;
                    frame.branch_taken = frame.active;
                }
            }
            "else" => {
                let frame = cond_stack.last_mut().ok_or(ParseError::UnbalancedConditional {
                    line: line_no,
                    directive: "#else".to_string(),
                })?;
                if frame.seen_else {
                    return Err(ParseError::UnbalancedConditional {
                        line: line_no,
                        directive: "duplicate #else".to_string(),
                    });
                }
                frame.seen_else = true;
                frame.active = frame.parent_active && !frame.branch_taken;
                frame.branch_taken |= frame.active;
            }
            "endif" => {
                if cond_stack.pop().is_none() {
                    return Err(ParseError::UnbalancedConditional {
                        line: line_no,
                        directive: "#endif".to_string(),
                    });
                }
            }
            "define" if active(cond_stack) => self.handle_define(rest, line_no)?,
            "undef" if active(cond_stack) => {
                self.macros.shift_remove(rest.trim());
            }
            "include" if active(cond_stack) => {
                self.handle_include(rest.trim(), line_no, output)?;
            }
            "pragma" | "line" => {}
            "error" if active(cond_stack) => {
                return Err(ParseError::MalformedDirective {
                    line: line_no,
                    message: format!("#error: {}", rest.trim()),
                });
            }
            "warning" if active(cond_stack) => {
                log::warn!("line {}: #warning: {}", line_no, rest.trim());
            }
            _ => {}
        }
        Ok(())
    }

    fn push_frame(&self, cond_stack: &mut Vec<CondFrame>, cond: bool) {
        let parent_active = active(cond_stack);
        cond_stack.push(CondFrame {
            parent_active,
            active: parent_active && cond,
            branch_taken: parent_active && cond,
            seen_else: false,
        });
    }

    fn handle_define(&mut self, rest: &str, line_no: u32) -> Result<(), ParseError> {
        let rest = rest.trim_start();
        let mut chars = rest.char_indices();
        let mut name_end = rest.len();
        for (i, c) in chars.by_ref() {
            if !(c.is_alphanumeric() || c == '_') {
                name_end = i;
                break;
            }
        }
        let name = &rest[..name_end];
        if name.is_empty() {
            return Err(ParseError::MalformedDirective {
                line: line_no,
                message: "#define requires a macro name".to_string(),
            });
        }

        let after = &rest[name_end..];
        if let Some(param_rest) = after.strip_prefix('(') {
            // Function-like; parameters are recorded but the macro is
            // never expanded, only recognized so its invocations can be
            // dropped from the token stream.
            let close = param_rest.find(')').ok_or(ParseError::MalformedDirective {
                line: line_no,
                message: format!("unclosed parameter list in #define {}", name),
            })?;
            let params: Vec<String> = param_rest[..close]
                .split(',')
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty())
                .collect();
            let body = tokenize_line(param_rest[close + 1..].trim(), line_no)?;
            self.macros.insert(
                name.to_string(),
                MacroDef {
                    params: Some(params),
                    body,
                },
            );
        } else {
            let body = tokenize_line(after.trim(), line_no)?;
            self.macros.insert(name.to_string(), MacroDef::object_like(body));
        }
        Ok(())
    }

    fn handle_include(
        &mut self,
        rest: &str,
        line_no: u32,
        output: &mut Vec<Token>,
    ) -> Result<(), ParseError> {
        if rest.starts_with('<') {
            log::debug!("line {}: skipping system include {}", line_no, rest);
            return Ok(());
        }
        let name = rest.trim_start_matches('"').trim_end_matches('"');
        if name.is_empty() {
            return Err(ParseError::MalformedDirective {
                line: line_no,
                message: "#include requires a file name".to_string(),
            });
        }

        match self.resolve_include(name) {
            Some(path) => {
                let mut tokens = self.preprocess_file(&path)?;
                output.append(&mut tokens);
            }
            None => {
                log::warn!("line {}: could not resolve include \"{}\"", line_no, name);
            }
        }
        Ok(())
    }

    fn resolve_include(&self, name: &str) -> Option<PathBuf> {
        if let Some(current) = self.include_stack.last() {
            if let Some(dir) = current.parent() {
                let candidate = dir.join(name);
                if candidate.is_file() {
                    return Some(candidate);
                }
            }
        }
        for dir in &self.include_dirs {
            let candidate = dir.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }
        }
        None
    }

    fn expand_into(&self, tokens: Vec<Token>, output: &mut Vec<Token>) {
        let mut in_progress = HashSet::new();
        self.expand_tokens(tokens, output, &mut in_progress);
    }

    fn expand_tokens(
        &self,
        tokens: Vec<Token>,
        output: &mut Vec<Token>,
        in_progress: &mut HashSet<String>,
    ) {
        let mut iter = tokens.into_iter().peekable();
        while let Some(token) = iter.next() {
            if token.kind != TokenKind::Ident {
                output.push(token);
                continue;
            }
            match self.macros.get(&token.text) {
                Some(def) if def.is_function_like() => {
                    if iter.peek().map(|t| t.is_punct("(")).unwrap_or(false) {
                        log::debug!(
                            "line {}: dropping unexpanded function-like macro {}",
                            token.location.line,
                            token.text
                        );
                        skip_parenthesized(&mut iter);
                    } else {
                        output.push(token);
                    }
                }
                Some(def) if !in_progress.contains(&token.text) => {
                    in_progress.insert(token.text.clone());
                    let relocated: Vec<Token> = def
                        .body
                        .iter()
                        .cloned()
                        .map(|mut t| {
                            t.location = token.location;
                            t
                        })
                        .collect();
                    self.expand_tokens(relocated, output, in_progress);
                    in_progress.remove(&token.text);
                }
                _ => output.push(token),
            }
        }
    }

    /// Evaluates a #if/#elif condition. `defined` tests are resolved
    /// before macro expansion, then remaining identifiers collapse to 0
    /// as the standard requires.
    fn eval_condition(&self, text: &str, line_no: u32) -> Result<u64, ParseError> {
        let raw = tokenize_line(text, line_no)?;
        let mut resolved = Vec::new();
        let mut iter = raw.into_iter().peekable();
        while let Some(token) = iter.next() {
            if token.is_ident("defined") {
                let name = match iter.peek() {
                    Some(t) if t.is_punct("(") => {
                        iter.next();
                        let name_token = iter.next().ok_or(ParseError::MalformedDirective {
                            line: line_no,
                            message: "defined( without macro name".to_string(),
                        })?;
                        match iter.next() {
                            Some(t) if t.is_punct(")") => {}
                            _ => {
                                return Err(ParseError::MalformedDirective {
                                    line: line_no,
                                    message: "defined( without closing paren".to_string(),
                                })
                            }
                        }
                        name_token.text
                    }
                    Some(t) if t.kind == TokenKind::Ident => match iter.next() {
                        Some(name_token) => name_token.text,
                        None => String::new(),
                    },
                    _ => {
                        return Err(ParseError::MalformedDirective {
                            line: line_no,
                            message: "defined without macro name".to_string(),
                        })
                    }
                };
                let value = if self.is_defined(&name) { "1" } else { "0" };
                resolved.push(Token {
                    kind: TokenKind::Number,
                    text: value.to_string(),
                    location: token.location,
                });
            } else {
                resolved.push(token);
            }
        }

        let mut expanded = Vec::new();
        self.expand_into(resolved, &mut expanded);

        let mut eval = CondEval {
            tokens: expanded,
            pos: 0,
            line: line_no,
        };
        let value = eval.expr()?;
        Ok(value)
    }
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self::new()
    }
}

fn active(cond_stack: &[CondFrame]) -> bool {
    cond_stack.iter().all(|f| f.active)
}

fn split_directive(directive: &str) -> (&str, &str) {
    match directive.find(|c: char| c.is_whitespace()) {
        Some(pos) => (&directive[..pos], &directive[pos + 1..]),
        None => (directive, ""),
    }
}

fn skip_parenthesized(iter: &mut std::iter::Peekable<std::vec::IntoIter<Token>>) {
    let mut depth = 0usize;
    for token in iter.by_ref() {
        if token.is_punct("(") {
            depth += 1;
        } else if token.is_punct(")") {
            depth -= 1;
            if depth == 0 {
                break;
            }
        }
    }
}

/// Replaces comments with spaces while leaving newlines in place, so
/// every surviving character keeps its original line number.
fn strip_comments(text: &str) -> Result<String, ParseError> {
    #[derive(PartialEq)]
    enum State {
        Normal,
        InString,
        InChar,
        LineComment,
        BlockComment { start_line: u32 },
    }

    let mut out = String::with_capacity(text.len());
    let mut state = State::Normal;
    let mut line: u32 = 1;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\n' {
            line += 1;
        }
        match state {
            State::Normal => match c {
                '/' if chars.peek() == Some(&'/') => {
                    chars.next();
                    state = State::LineComment;
                }
                '/' if chars.peek() == Some(&'*') => {
                    chars.next();
                    out.push(' ');
                    state = State::BlockComment { start_line: line };
                }
                '"' => {
                    state = State::InString;
                    out.push(c);
                }
                '\'' => {
                    state = State::InChar;
                    out.push(c);
                }
                _ => out.push(c),
            },
            State::InString => {
                out.push(c);
                if c == '\\' {
                    if let Some(next) = chars.next() {
                        out.push(next);
                        if next == '\n' {
                            line += 1;
                        }
                    }
                } else if c == '"' {
                    state = State::Normal;
                }
            }
            State::InChar => {
                out.push(c);
                if c == '\\' {
                    if let Some(next) = chars.next() {
                        out.push(next);
                    }
                } else if c == '\'' {
                    state = State::Normal;
                }
            }
            State::LineComment => {
                if c == '\n' {
                    out.push('\n');
                    state = State::Normal;
                }
            }
            State::BlockComment { .. } => {
                if c == '\n' {
                    out.push('\n');
                } else if c == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    state = State::Normal;
                }
            }
        }
    }

    if let State::BlockComment { start_line } = state {
        return Err(ParseError::UnterminatedComment { line: start_line });
    }
    Ok(out)
}

/// Joins backslash-continued lines; each logical line keeps the number of
/// its first physical line.
fn splice_lines(text: &str) -> Vec<(u32, String)> {
    let mut result = Vec::new();
    let mut pending: Option<(u32, String)> = None;

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx as u32 + 1;
        let continued = raw.ends_with('\\');
        let content = if continued {
            &raw[..raw.len() - 1]
        } else {
            raw
        };

        match pending.take() {
            Some((start, mut acc)) => {
                acc.push_str(content);
                if continued {
                    pending = Some((start, acc));
                } else {
                    result.push((start, acc));
                }
            }
            None => {
                if continued {
                    pending = Some((line_no, content.to_string()));
                } else {
                    result.push((line_no, raw.to_string()));
                }
            }
        }
    }

    if let Some(last) = pending {
        result.push(last);
    }
    result
}

struct CondEval {
    tokens: Vec<Token>,
    pos: usize,
    line: u32,
}

impl CondEval {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn bump(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn eat_punct(&mut self, text: &str) -> bool {
        if self.peek().map(|t| t.is_punct(text)).unwrap_or(false) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expr(&mut self) -> Result<u64, ParseError> {
        self.or_expr()
    }

    fn or_expr(&mut self) -> Result<u64, ParseError> {
        let mut value = self.and_expr()?;
        while self.eat_punct("||") {
            let rhs = self.and_expr()?;
            value = (value != 0 || rhs != 0) as u64;
        }
        Ok(value)
    }

    fn and_expr(&mut self) -> Result<u64, ParseError> {
        let mut value = self.cmp_expr()?;
        while self.eat_punct("&&") {
            let rhs = self.cmp_expr()?;
            value = (value != 0 && rhs != 0) as u64;
        }
        Ok(value)
    }

    fn cmp_expr(&mut self) -> Result<u64, ParseError> {
        let value = self.unary()?;
        let op = match self.peek() {
            Some(t) if t.kind == TokenKind::Punct => t.text.clone(),
            _ => return Ok(value),
        };
        match op.as_str() {
            "==" | "!=" | "<" | "<=" | ">" | ">=" => {
                self.pos += 1;
                let rhs = self.unary()?;
                let result = match op.as_str() {
                    "==" => value == rhs,
                    "!=" => value != rhs,
                    "<" => value < rhs,
                    "<=" => value <= rhs,
                    ">" => value > rhs,
                    _ => value >= rhs,
                };
                Ok(result as u64)
            }
            _ => Ok(value),
        }
    }

    fn unary(&mut self) -> Result<u64, ParseError> {
        if self.eat_punct("!") {
            let value = self.unary()?;
            return Ok((value == 0) as u64);
        }
        if self.eat_punct("(") {
            let value = self.expr()?;
            if !self.eat_punct(")") {
                return Err(ParseError::MalformedDirective {
                    line: self.line,
                    message: "unbalanced parentheses in condition".to_string(),
                });
            }
            return Ok(value);
        }
        match self.bump() {
            Some(token) if token.kind == TokenKind::Number => {
                Ok(token.int_value().unwrap_or(0))
            }
            // Surviving identifiers are undefined macros: value 0.
            Some(token) if token.kind == TokenKind::Ident => Ok(0),
            Some(token) => Err(ParseError::MalformedDirective {
                line: self.line,
                message: format!("unexpected '{}' in condition", token.text),
            }),
            None => Ok(0),
        }
    }
}
