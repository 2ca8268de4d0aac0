// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Line lexer for spec and run-result documents.
//!
//! Classifies each raw line into a typed [`Line`] so the parsers fold over
//! tokens instead of re-matching patterns ad hoc. One classification pass,
//! shared by the current spec parser, the legacy parser, and the run-result
//! parser.

#[cfg(test)]
#[path = "lexer_tests.rs"]
mod tests;

/// One classified line of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line<'a> {
    /// Empty or whitespace-only line.
    Blank,
    /// Front-matter fence (`---`).
    Fence,
    /// Markdown heading with its level and trimmed text.
    Heading { level: u8, text: &'a str },
    /// Bullet item (`-` or `*`), marker stripped.
    Bullet(&'a str),
    /// Pipe-delimited table row, cells trimmed. Outer pipes optional.
    TableRow(Vec<&'a str>),
    /// `key: value` metadata line.
    KeyValue { key: &'a str, value: &'a str },
    /// `**Key:** value` bold-key line (legacy metadata, `Expected:` lines).
    BoldKeyValue { key: &'a str, value: &'a str },
    /// Anything else.
    Text(&'a str),
}

/// Classify a single line.
pub fn lex(raw: &str) -> Line<'_> {
    let line = raw.trim_end();
    let trimmed = line.trim_start();

    if trimmed.is_empty() {
        return Line::Blank;
    }
    if trimmed == "---" {
        return Line::Fence;
    }
    if let Some(h) = lex_heading(trimmed) {
        return h;
    }
    if let Some(rest) = bullet_text(trimmed) {
        return Line::Bullet(rest.trim());
    }
    if trimmed.starts_with('|') || trimmed.contains(" | ") {
        if let Some(cells) = lex_table_row(trimmed) {
            return Line::TableRow(cells);
        }
    }
    if let Some(kv) = lex_bold_key(trimmed) {
        return kv;
    }
    if let Some(kv) = lex_key_value(trimmed) {
        return kv;
    }
    Line::Text(trimmed)
}

/// Classify every line of a document, preserving order.
pub fn lex_lines(content: &str) -> Vec<Line<'_>> {
    content.lines().map(lex).collect()
}

fn lex_heading(line: &str) -> Option<Line<'_>> {
    let hashes = line.bytes().take_while(|&b| b == b'#').count();
    if hashes == 0 || hashes > 6 {
        return None;
    }
    let rest = &line[hashes..];
    if !rest.starts_with(' ') {
        return None;
    }
    Some(Line::Heading {
        level: hashes as u8,
        text: rest.trim(),
    })
}

fn bullet_text(line: &str) -> Option<&str> {
    line.strip_prefix("- ").or_else(|| line.strip_prefix("* "))
}

fn lex_table_row(line: &str) -> Option<Vec<&str>> {
    let inner = line.strip_prefix('|').unwrap_or(line);
    let inner = inner.strip_suffix('|').unwrap_or(inner);
    let cells: Vec<&str> = inner.split('|').map(str::trim).collect();
    if cells.len() < 2 {
        return None;
    }
    Some(cells)
}

/// `**Key:** value` or `**Key**: value`.
fn lex_bold_key(line: &str) -> Option<Line<'_>> {
    let rest = line.strip_prefix("**")?;
    let close = rest.find("**")?;
    let inside = &rest[..close];
    let after = rest[close + 2..].trim_start();
    let (key, value) = if let Some(k) = inside.strip_suffix(':') {
        (k.trim(), after)
    } else {
        (inside.trim(), after.strip_prefix(':')?.trim_start())
    };
    if key.is_empty() {
        return None;
    }
    Some(Line::BoldKeyValue { key, value })
}

fn lex_key_value(line: &str) -> Option<Line<'_>> {
    let idx = line.find(':')?;
    let key = line[..idx].trim();
    // Keys are short identifiers; a colon deep into prose is not metadata.
    if key.is_empty() || key.len() > 24 || key.contains(char::is_whitespace) {
        return None;
    }
    Some(Line::KeyValue {
        key,
        value: line[idx + 1..].trim(),
    })
}
