//! Line-oriented Swift declaration scanner.
//!
//! Not a parser: it tracks brace depth, recognizes type declarations and the
//! stored properties sitting directly in their bodies, and feeds them to a
//! [`ForestBuilder`]. Anything it does not recognize is skipped.
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, ForestError, Result};
use crate::forest::{Forest, ForestBuilder, NodeId};

static DECL: Lazy<Option<Regex>> = Lazy::new(|| {
    compile(r"^\s*(?:@\w+(?:\([^)]*\))?\s+)*(?:(?:public|private|fileprivate|internal|package|open|final|indirect)\s+)*(struct|class|enum|actor|extension)\s+([A-Za-z_][\w.]*)")
});

static PROPERTY: Lazy<Option<Regex>> = Lazy::new(|| {
    compile(r"^\s*(?:@\w+(?:\([^)]*\))?\s+)*(?:(?:public|private|fileprivate|internal|package|open|final|weak|unowned|lazy|nonisolated|dynamic|override|required)(?:\(set\))?\s+)*(let|var)\s+(\w+)\s*:(.*)$")
});

// `class func`, `class var` and friends look like declarations to DECL.
const MEMBER_KEYWORDS: &[&str] = &["func", "var", "let", "subscript", "init", "deinit"];

fn compile(source: &str) -> Option<Regex> {
    Regex::new(source)
        .map_err(|error| tracing::warn!(%source, %error, "scanner pattern failed to compile"))
        .ok()
}

// ------------------------------- Scanner ---------------------------------- //

#[derive(Debug, Clone)]
enum Scope {
    Decl(NodeId),
    /// Extensions hold no stored properties; types nested in them become
    /// roots qualified with the extended name.
    Extension(String),
}

#[derive(Debug)]
struct Frame {
    scope: Scope,
    body_depth: usize,
}

#[derive(Debug)]
struct Pending {
    kind: String,
    name: String,
}

/// Lexical state that outlives a single line.
#[derive(Debug, Default)]
struct Carry {
    block_comment: bool,
    multiline_string: bool,
}

pub struct Scanner {
    builder: ForestBuilder<'static>,
    frames: Vec<Frame>,
    depth: usize,
    carry: Carry,
    pending: Option<Pending>,
}

impl Scanner {
    pub fn new() -> Self {
        Self {
            builder: ForestBuilder::new(),
            frames: Vec::new(),
            depth: 0,
            carry: Carry::default(),
            pending: None,
        }
    }

    /// Feed one source line. Statements end at `;`, at either brace, and at
    /// the end of the line, so one-line bodies are scanned like multi-line ones.
    pub fn feed_line(&mut self, line: &str) -> std::result::Result<(), ForestError> {
        let code = strip_line(line, &mut self.carry);
        let mut start = 0;
        for (i, ch) in code.char_indices() {
            if !matches!(ch, '{' | '}' | ';') {
                continue;
            }
            // an opening brace stays in the statement so computed properties are told apart
            let end = if ch == '{' { i + 1 } else { i };
            self.statement(&code[start..end])?;
            start = i + 1;
            match ch {
                '{' => {
                    self.depth += 1;
                    if let Some(p) = self.pending.take() {
                        self.open(p)?;
                    }
                }
                '}' => {
                    if self.frames.last().is_some_and(|f| f.body_depth == self.depth) {
                        self.close()?;
                    }
                    self.depth = self.depth.saturating_sub(1);
                }
                _ => {}
            }
        }
        self.statement(&code[start..])
    }

    pub fn finish(self) -> Forest {
        self.builder.finish()
    }

    fn statement(&mut self, code: &str) -> std::result::Result<(), ForestError> {
        let at_body_level = self
            .frames
            .last()
            .map_or(self.depth == 0, |f| f.body_depth == self.depth);
        if !at_body_level || code.trim().is_empty() {
            return Ok(());
        }
        if let Some(Frame {
            scope: Scope::Decl(id),
            ..
        }) = self.frames.last()
        {
            let id = *id;
            if let Some((name, raw_type)) = parse_property(code) {
                self.builder.push_field(id, name, raw_type)?;
            }
        }
        if let Some(caps) = DECL.as_ref().and_then(|rx| rx.captures(code)) {
            let name = &caps[2];
            if !MEMBER_KEYWORDS.contains(&name) {
                self.pending = Some(Pending {
                    kind: caps[1].to_string(),
                    name: name.to_string(),
                });
            }
        }
        Ok(())
    }

    fn open(&mut self, p: Pending) -> std::result::Result<(), ForestError> {
        let scope = if p.kind == "extension" {
            Scope::Extension(p.name)
        } else {
            let id = match self.frames.last().map(|f| &f.scope) {
                Some(Scope::Decl(parent)) => self.builder.create_node(p.name, Some(*parent))?,
                Some(Scope::Extension(ext)) => {
                    self.builder.create_node(format!("{ext}.{}", p.name), None)?
                }
                None => self.builder.create_node(p.name, None)?,
            };
            Scope::Decl(id)
        };
        tracing::debug!(?scope, depth = self.depth, "open declaration");
        self.frames.push(Frame {
            scope,
            body_depth: self.depth,
        });
        Ok(())
    }

    fn close(&mut self) -> std::result::Result<(), ForestError> {
        if let Some(frame) = self.frames.pop() {
            tracing::debug!(scope = ?frame.scope, "close declaration");
            if let Scope::Decl(id) = frame.scope {
                self.builder.seal(id)?;
            }
        }
        Ok(())
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new()
    }
}

/// Scan a whole source file.
pub fn scan_str(src: &str, path: &Path) -> Result<Forest> {
    let mut scanner = Scanner::new();
    for (i, line) in src.lines().enumerate() {
        scanner.feed_line(line).map_err(|source| Error::Scan {
            path: path.to_path_buf(),
            line: i + 1,
            source,
        })?;
    }
    Ok(scanner.finish())
}

// ------------------------------- Helpers ---------------------------------- //

/// Drop comments and string-literal contents so braces inside them don't count.
/// A literal keeps one `"` per delimiter; `"""` bodies and block comments
/// continue across lines through `carry`.
fn strip_line(line: &str, carry: &mut Carry) -> String {
    let chars: Vec<char> = line.chars().collect();
    let triple_quote = |i: usize| chars.get(i..i + 3) == Some(&['"', '"', '"'][..]);
    let mut out = String::with_capacity(line.len());
    let mut in_string = false;
    let mut i = 0;
    while let Some(&c) = chars.get(i) {
        let next = chars.get(i + 1).copied();
        if carry.block_comment {
            if c == '*' && next == Some('/') {
                carry.block_comment = false;
                i += 1;
            }
        } else if carry.multiline_string {
            if c == '\\' {
                i += 1;
            } else if triple_quote(i) {
                carry.multiline_string = false;
                out.push('"');
                i += 2;
            }
        } else if in_string {
            match c {
                '\\' => i += 1,
                '"' => {
                    in_string = false;
                    out.push('"');
                }
                _ => {}
            }
        } else {
            match c {
                '"' if triple_quote(i) => {
                    carry.multiline_string = true;
                    out.push('"');
                    i += 2;
                }
                '"' => {
                    in_string = true;
                    out.push('"');
                }
                '/' if next == Some('/') => break,
                '/' if next == Some('*') => {
                    carry.block_comment = true;
                    i += 1;
                }
                _ => out.push(c),
            }
        }
        i += 1;
    }
    out
}

/// `(name, type)` of a stored property the memberwise initializer takes.
/// `None` for computed properties and for `let` constants with an initial
/// value, which Swift leaves out of that initializer.
fn parse_property(code: &str) -> Option<(String, String)> {
    let caps = PROPERTY.as_ref()?.captures(code)?;
    let constant = &caps[1] == "let";
    let name = caps[2].to_string();
    let rest = caps.get(3)?.as_str();

    let mut nesting = 0i32;
    let mut prev = ' ';
    let mut end = rest.len();
    let mut initialized = false;
    for (i, c) in rest.char_indices() {
        match c {
            '(' | '[' | '<' => nesting += 1,
            '>' if prev == '-' => {}
            ')' | ']' | '>' => nesting -= 1,
            '=' if nesting == 0 => {
                end = i;
                initialized = true;
                break;
            }
            ';' if nesting == 0 => {
                end = i;
                break;
            }
            '{' if nesting == 0 => return None,
            _ => {}
        }
        prev = c;
    }
    if constant && initialized {
        return None;
    }
    let raw_type = rest[..end].trim();
    if raw_type.is_empty() {
        return None;
    }
    Some((name, raw_type.to_string()))
}

// ------------------------------- Tests ------------------------------------ //
