// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Legacy spec format: bold-key metadata under the H1, no front matter.
//!
//! ```text
//! # CHK-01: Checkout happy path
//! **Area:** checkout
//! **Priority:** P1
//! ```
//!
//! The body sections are identical to the current format, so everything
//! after the header block is delegated to the shared body fold. Retained
//! until the legacy corpus is migrated; do not extend.

#[cfg(test)]
#[path = "legacy_tests.rs"]
mod tests;

use super::lexer::Line;
use super::{RawSpec, parser};

/// Fold a legacy-format document into a [`RawSpec`].
pub(super) fn parse(lines: &[Line]) -> RawSpec {
    let mut raw = RawSpec::default();
    let mut body_start = lines.len();

    for (i, line) in lines.iter().enumerate() {
        match line {
            Line::Heading { level: 1, text } if raw.id.is_none() => {
                // `# ID: Title` — the title half is narrative only.
                let id = text.split_once(':').map_or(*text, |(id, _)| id).trim();
                if !id.is_empty() {
                    raw.id = Some(id.to_string());
                }
            }
            Line::BoldKeyValue { key, value } => set_meta(&mut raw, key, value),
            Line::Heading { level: 2.., .. } => {
                body_start = i;
                break;
            }
            _ => {}
        }
    }

    parser::parse_body(&lines[body_start..], &mut raw);
    raw
}

fn set_meta(raw: &mut RawSpec, key: &str, value: &str) {
    let value = value.trim();
    if value.is_empty() {
        return;
    }
    match key.to_ascii_lowercase().as_str() {
        "area" => raw.area = Some(value.to_string()),
        "priority" => raw.priority = Some(value.to_string()),
        "persona" => raw.persona = Some(value.to_string()),
        "tags" => raw.tags = Some(value.to_string()),
        "seed" => raw.seed = Some(value.to_string()),
        _ => {}
    }
}
