// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Graphviz rendering of reported chains.

use super::{ChainReport, LearningHeader};
use std::fmt::Write;

/// The conjunction of literals selecting `letter`, over `v0..v{bits-1}`.
///
/// Propositions beyond the width of `usize` are always false.
fn minterm(letter: usize, bits: u32) -> String {
    (0..bits)
        .map(|i| {
            if letter.checked_shr(i).unwrap_or(0) & 1 == 1 {
                format!("v{}", i)
            } else {
                format!("!v{}", i)
            }
        })
        .collect::<Vec<_>>()
        .join(" & ")
}

/// Edge label for a segment, or `None` when no letter is enabled.
fn label(flags: &[bool], bits: u32) -> Option<String> {
    if flags.iter().all(|&enabled| enabled) {
        return Some("true".to_string());
    }
    let terms: Vec<String> = flags
        .iter()
        .enumerate()
        .filter(|&(_, &enabled)| enabled)
        .map(|(letter, _)| minterm(letter, bits))
        .collect();
    match terms.len() {
        0 => None,
        1 => terms.into_iter().next(),
        _ if bits == 1 => Some(terms.join(" | ")),
        _ => Some(
            terms
                .iter()
                .map(|term| format!("({})", term))
                .collect::<Vec<_>>()
                .join(" | "),
        ),
    }
}

/// Render `reports` as one digraph with a cluster per chain.
///
/// The terminal state of each chain is drawn as a double circle. Edges with
/// no enabled letter are left out.
pub fn render_dot(header: &LearningHeader, reports: &[ChainReport]) -> String {
    let bits = header.bits_per_letter;
    let mut dot = String::new();
    // Writing to a String cannot fail.
    let _ = writeln!(dot, "digraph uvw {{");
    let _ = writeln!(dot, "  rankdir=LR;");
    for (i, report) in reports.iter().enumerate() {
        let terminal = report.states() - 1;
        let _ = writeln!(dot, "  subgraph cluster_{} {{", i);
        let _ = writeln!(dot, "    label=\"chain {}\";", i);
        for state in 0..report.states() {
            let shape = if state == terminal {
                "doublecircle"
            } else {
                "circle"
            };
            let _ = writeln!(
                dot,
                "    c{}_s{} [label=\"{}\", shape={}];",
                i, state, state, shape
            );
        }
        for (segment, flags) in report.segments().iter().enumerate() {
            let Some(text) = label(flags, bits) else {
                continue;
            };
            let from = segment / 2;
            let to = from + segment % 2;
            let _ = writeln!(
                dot,
                "    c{}_s{} -> c{}_s{} [label=\"{}\"];",
                i, from, i, to, text
            );
        }
        let _ = writeln!(dot, "  }}");
    }
    let _ = writeln!(dot, "}}");
    dot
}
