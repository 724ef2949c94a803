//! Include guard and `#pragma once` handling for header bodies.
//!
//! Headers are inlined into one translation unit, so the scaffolding that
//! prevents double inclusion is removed; duplicate suppression is done by
//! [`HeaderRegistry`](super::merge::HeaderRegistry) instead.

use std::sync::LazyLock;

use regex::Regex;

/// `#ifndef NAME` followed (across blank space) by `#define OTHER`.
/// The regex crate has no backreferences, so `NAME == OTHER` is checked by the caller.
static GUARD_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"#ifndef[ \t]+(\w+)\s*\n\s*#define[ \t]+(\w+)").unwrap()
});

/// Leading preprocessor directive of a line: `#  name  argument`.
static DIRECTIVE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*#\s*(\w+)(?:\s+(\w+))?").unwrap());

const PRAGMA_ONCE: &str = "#pragma once";

/// Double-inclusion markers found in a header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuardInfo {
    /// Macro of the first `#ifndef X` / `#define X` pair.
    pub name: Option<String>,
    pub pragma_once: bool,
}

impl GuardInfo {
    /// Annotation written at the top of a merged header block.
    pub fn annotation(&self) -> Option<String> {
        match (&self.name, self.pragma_once) {
            (Some(name), _) => Some(format!("// Original include guard: {}", name)),
            (None, true) => Some(format!("// Original pragma: {}", PRAGMA_ONCE)),
            (None, false) => None,
        }
    }
}

pub fn detect_guard(content: &str) -> GuardInfo {
    let name = GUARD_REGEX
        .captures_iter(content)
        .find(|caps| caps[1] == caps[2])
        .map(|caps| caps[1].to_string());

    GuardInfo {
        name,
        pragma_once: content.contains(PRAGMA_ONCE),
    }
}

/// Removes the guard (or every `#pragma once` line) from a header body.
///
/// The guard name wins when both markers are present. Returned text is the
/// remaining lines joined with `\n`, without a trailing newline.
pub fn strip_guard(content: &str, guard: &GuardInfo) -> String {
    if let Some(name) = &guard.name {
        strip_include_guard(content, name)
    } else if guard.pragma_once {
        content
            .lines()
            .filter(|line| !line.contains(PRAGMA_ONCE))
            .collect::<Vec<_>>()
            .join("\n")
    } else {
        content.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GuardState {
    /// Before the guard's `#define`.
    Opening,
    /// Inside the guarded region, at the given conditional nesting depth.
    Inside(usize),
    /// After the closing `#endif`.
    Closed,
}

fn strip_include_guard(content: &str, name: &str) -> String {
    let mut kept = Vec::new();
    let mut state = GuardState::Opening;

    for line in content.lines() {
        let (next, keep) = match (state, parse_directive(line)) {
            (GuardState::Opening, Some(("ifndef", Some(arg)))) if arg == name => {
                (GuardState::Opening, false)
            }
            (GuardState::Opening, Some(("define", Some(arg)))) if arg == name => {
                (GuardState::Inside(0), false)
            }
            (GuardState::Inside(depth), Some((kind, _))) if opens_conditional(kind) => {
                (GuardState::Inside(depth + 1), true)
            }
            (GuardState::Inside(0), Some(("endif", _))) => (GuardState::Closed, false),
            (GuardState::Inside(depth), Some(("endif", _))) => (GuardState::Inside(depth - 1), true),
            (state, _) => (state, true),
        };

        state = next;
        if keep {
            kept.push(line);
        }
    }

    kept.join("\n")
}

fn parse_directive(line: &str) -> Option<(&str, Option<&str>)> {
    let caps = DIRECTIVE_REGEX.captures(line)?;
    let kind = caps.get(1)?.as_str();
    Some((kind, caps.get(2).map(|m| m.as_str())))
}

fn opens_conditional(kind: &str) -> bool {
    matches!(kind, "if" | "ifdef" | "ifndef")
}
