// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Current spec format: front-matter metadata plus named body sections.
//!
//! The fold is a small state machine keyed on the current section. Only
//! Scenarios content feeds the data model; Overview, Preconditions, Test
//! Data, and Notes are narrative and skipped here.

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;

use super::lexer::Line;
use super::{RawScenario, RawSpec};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Preamble,
    Overview,
    Preconditions,
    Scenarios,
    TestData,
    Notes,
    Other,
}

impl Section {
    fn from_heading(text: &str) -> Self {
        match text.trim().to_ascii_lowercase().as_str() {
            "overview" => Self::Overview,
            "preconditions" => Self::Preconditions,
            "scenarios" => Self::Scenarios,
            "test data" => Self::TestData,
            "notes" => Self::Notes,
            _ => Self::Other,
        }
    }
}

/// Fold classified lines into a [`RawSpec`].
pub(super) fn parse(lines: &[Line]) -> RawSpec {
    let mut raw = RawSpec::default();
    let rest = parse_front_matter(lines, &mut raw);
    parse_body(rest, &mut raw);
    raw
}

/// Consume the `---` fenced metadata block, returning the remaining lines.
fn parse_front_matter<'a, 'b>(lines: &'a [Line<'b>], raw: &mut RawSpec) -> &'a [Line<'b>] {
    let mut iter = lines.iter().enumerate();
    // Skip leading blanks to the opening fence.
    let open = loop {
        match iter.next() {
            Some((_, Line::Blank)) => continue,
            Some((i, Line::Fence)) => break i,
            _ => return lines,
        }
    };
    for (i, line) in iter {
        match line {
            Line::Fence => return &lines[i + 1..],
            Line::KeyValue { key, value } => set_meta(raw, key, value),
            // Anything else inside the fence is tolerated and ignored.
            _ => {}
        }
    }
    // Unclosed fence: treat everything after it as body.
    &lines[open + 1..]
}

fn set_meta(raw: &mut RawSpec, key: &str, value: &str) {
    let value = value.trim();
    if value.is_empty() {
        return;
    }
    match key.to_ascii_lowercase().as_str() {
        "id" => raw.id = Some(value.to_string()),
        "area" => raw.area = Some(value.to_string()),
        "priority" => raw.priority = Some(value.to_string()),
        "persona" => raw.persona = Some(value.to_string()),
        "tags" => raw.tags = Some(value.to_string()),
        "seed" => raw.seed = Some(value.to_string()),
        _ => {}
    }
}

/// Fold body lines: H2 headings switch sections, H3+ headings inside
/// Scenarios open a new scenario, bullets and `Expected:` lines attach to
/// the open scenario.
pub(super) fn parse_body(lines: &[Line], raw: &mut RawSpec) {
    let mut section = Section::Preamble;
    let mut open: Option<RawScenario> = None;

    for line in lines {
        match line {
            Line::Heading { level: 1 | 2, text } => {
                flush(&mut open, raw);
                section = Section::from_heading(text);
            }
            Line::Heading { level: _, text } if section == Section::Scenarios => {
                flush(&mut open, raw);
                open = Some(scenario_heading(text));
            }
            Line::Bullet(step) => {
                if let Some(s) = open.as_mut() {
                    s.steps.push(step.to_string());
                }
            }
            Line::BoldKeyValue { key, value } if key.eq_ignore_ascii_case("expected") => {
                if let Some(s) = open.as_mut() {
                    s.expected = Some(value.to_string());
                }
            }
            _ => {}
        }
    }
    flush(&mut open, raw);
}

fn flush(open: &mut Option<RawScenario>, raw: &mut RawSpec) {
    if let Some(s) = open.take() {
        raw.scenarios.push(s);
    }
}

/// Split a `N. Title` sub-heading into number and title.
fn scenario_heading(text: &str) -> RawScenario {
    let text = text.trim();
    if let Some((num, title)) = text.split_once('.') {
        if let Ok(n) = num.trim().parse::<u32>() {
            return RawScenario {
                number: Some(n),
                title: title.trim().to_string(),
                ..RawScenario::default()
            };
        }
    }
    RawScenario {
        number: None,
        title: text.to_string(),
        ..RawScenario::default()
    }
}
