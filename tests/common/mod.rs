// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use std::path::PathBuf;
use uvw_learner::{
    CandidateChain, ChainLength, LassoExample, Learner, LearnerConfig, LearningProblem,
    ProblemOptions, SafetyMode,
};

/// Problem text with the two header lines and the given example lines.
pub fn problem_text(bits_per_letter: u32, nof_letters: usize, examples: &[&str]) -> String {
    let mut text = format!(
        "Learning problem with character width: {}\nNof characters: {}\n",
        bits_per_letter, nof_letters
    );
    for line in examples {
        text.push_str(line);
        text.push('\n');
    }
    text
}

pub fn parse_problem(
    bits_per_letter: u32,
    nof_letters: usize,
    examples: &[&str],
) -> LearningProblem {
    LearningProblem::parse(
        &problem_text(bits_per_letter, nof_letters, examples),
        ProblemOptions::default(),
    )
    .expect("test problem parses")
}

pub fn lasso(prefix: &[usize], cycle: &[usize]) -> LassoExample {
    LassoExample::new(prefix.to_vec(), cycle.to_vec())
}

pub fn length(states: u32) -> ChainLength {
    ChainLength::new(states).expect("valid chain length")
}

/// Decode a raw-bit string as printed by `CandidateChain`'s `Display`
/// (`1` = disabled, segments separated by `|`).
pub fn chain_from_bits(bits: &str) -> CandidateChain {
    let segments: Vec<&str> = bits.split('|').collect();
    let nof_letters = segments[0].len();
    let values: Vec<u32> = segments
        .iter()
        .flat_map(|segment| segment.chars().map(|c| u32::from(c == '1')))
        .collect();
    CandidateChain::from_assignment(
        length(segments.len().div_ceil(2) as u32),
        nof_letters,
        &values,
    )
}

/// Run the learner and return its transcript.
pub fn learn_transcript(
    problem: &LearningProblem,
    max_chain_length: u32,
    safety_mode: SafetyMode,
) -> String {
    let config = LearnerConfig {
        max_chain_length,
        safety_mode,
    };
    let mut out = Vec::new();
    Learner::new(problem, config)
        .run(&mut out)
        .expect("learning succeeds");
    String::from_utf8(out).expect("transcript is UTF-8")
}

/// Write `contents` to a file named `name` inside `dir`.
pub fn write_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).expect("write test input");
    path
}
