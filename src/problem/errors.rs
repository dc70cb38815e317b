// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Error types for loading learning problems.

use std::path::PathBuf;
use thiserror::Error;

/// Malformed or unreadable learning-problem input.
///
/// All of these are fatal: learning never starts on a partially read problem.
#[derive(Debug, Error)]
pub enum ProblemError {
    #[error("error opening input file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("error reading line {line} of the input: {source}")]
    Read {
        line: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("input ends before header line {line}")]
    MissingHeader { line: usize },

    #[error("line {line} does not have a learning problem signature (expected \"{expected}\")")]
    BadSignature { line: usize, expected: &'static str },

    #[error("cannot read a number from line {line}: {value:?}")]
    InvalidNumber { line: usize, value: String },

    #[error("character width must be at least 1")]
    ZeroWidth,

    #[error("more letters declared ({letters}) than can be formed with {width} bits")]
    WidthTooSmall { width: u32, letters: usize },

    #[error("the alphabet must contain at least one letter")]
    NoLetters,

    #[error("cannot find space in positive example in line {line}")]
    MissingSeparator { line: usize },

    #[error("space found at a non-multiple of the number of bits in line {line}")]
    MisalignedPrefix { line: usize },

    #[error("cycle length is a non-multiple of the number of bits in line {line}")]
    MisalignedCycle { line: usize },

    #[error("non-binary literal in line {line}, character {column}")]
    NonBinary { line: usize, column: usize },

    #[error("letter {letter} in line {line} is outside the alphabet of {letters} letters")]
    LetterOutOfRange {
        line: usize,
        letter: usize,
        letters: usize,
    },
}
