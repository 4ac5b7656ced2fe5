//! Field tokenizer for event dump lines.
//!
//! A dump line is a tab-separated list of fields. [`Fields`] walks them in
//! order and converts each one, reporting the 1-based line number and the
//! field name on failure.

use std::str::{FromStr, Split};

use crate::error::ParseError;

/// Field value that stands for a missing Unicode mapping.
pub const MISSING_TEXT: &str = "\\N";

/// Cursor over the tab-separated fields of one line.
#[derive(Debug, Clone)]
pub struct Fields<'a> {
    line: usize,
    parts: Split<'a, char>,
}

impl<'a> Fields<'a> {
    /// Split `text` (without its line terminator) into fields.
    pub fn new(line: usize, text: &'a str) -> Self {
        Self {
            line,
            parts: text.split('\t'),
        }
    }

    /// 1-based line number, for error reporting.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Next raw field.
    pub fn next_str(&mut self, name: &str) -> Result<&'a str, ParseError> {
        self.parts
            .next()
            .ok_or_else(|| ParseError::syntax(self.line, format!("missing field `{name}`")))
    }

    /// Next field parsed as a number.
    pub fn next_num<T: FromStr>(&mut self, name: &str) -> Result<T, ParseError> {
        let raw = self.next_str(name)?;
        raw.trim().parse().map_err(|_| {
            ParseError::syntax(self.line, format!("field `{name}`: invalid number {raw:?}"))
        })
    }

    /// Next field if present and non-empty, parsed as a number.
    pub fn next_opt_num<T: FromStr>(&mut self, name: &str) -> Result<Option<T>, ParseError> {
        match self.parts.next() {
            None => Ok(None),
            Some(raw) if raw.trim().is_empty() => Ok(None),
            Some(raw) => raw.trim().parse().map(Some).map_err(|_| {
                ParseError::syntax(self.line, format!("field `{name}`: invalid number {raw:?}"))
            }),
        }
    }

    /// `N` consecutive `f32` fields.
    pub fn next_f32s<const N: usize>(&mut self, name: &str) -> Result<[f32; N], ParseError> {
        let mut out = [0.0; N];
        for value in &mut out {
            *value = self.next_num(name)?;
        }
        Ok(out)
    }

    /// Next field as escaped text; `\N` yields `None`.
    pub fn next_text(&mut self, name: &str) -> Result<Option<String>, ParseError> {
        let raw = self.next_str(name)?;
        unescape(raw).map_err(|message| ParseError::syntax(self.line, message))
    }

    /// Fail if any field is left over.
    pub fn finish(mut self) -> Result<(), ParseError> {
        match self.parts.next() {
            None => Ok(()),
            Some(extra) => Err(ParseError::syntax(
                self.line,
                format!("unexpected trailing field {extra:?}"),
            )),
        }
    }
}

/// Decode a text field.
///
/// Recognized escapes are `\t`, `\n` and `\\`. The field `\N` on its own is
/// a missing mapping.
pub fn unescape(raw: &str) -> Result<Option<String>, String> {
    if raw == MISSING_TEXT {
        return Ok(None);
    }
    if !raw.contains('\\') {
        return Ok(Some(raw.to_string()));
    }

    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('\\') => out.push('\\'),
            Some(other) => return Err(format!("unknown escape `\\{other}`")),
            None => return Err("dangling backslash".to_string()),
        }
    }
    Ok(Some(out))
}
