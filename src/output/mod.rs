// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! The learning transcript.
//!
//! ```text
//! LEARNING <bits-per-letter> <nof-letters>
//! CHAIN <segment> <segment> ... <segment>
//! END
//! ```
//!
//! A chain of length `L` has `2L-1` segments in layout order (loop 0, forward
//! 0->1, loop 1, ..., terminal loop). Each segment has one character per
//! letter, `1` when the transition is present. That is the inverse of the
//! internal bit polarity.

mod dot;

pub use dot::render_dot;

use crate::chain::{CandidateChain, ChainLength};
use crate::errors::LearnError;
use crate::problem::LearningProblem;
use std::fmt;
use std::io::{self, BufRead, Write};
use std::str::FromStr;
use thiserror::Error;

const HEADER_KEYWORD: &str = "LEARNING";
const CHAIN_KEYWORD: &str = "CHAIN";
const END_KEYWORD: &str = "END";

/// Malformed transcript text.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("expected \"{expected}\" at the start of {text:?}")]
    MissingKeyword { expected: &'static str, text: String },

    #[error("malformed LEARNING line {text:?}")]
    BadHeader { text: String },

    #[error("a chain has an odd number of segments, found {count}")]
    EvenSegmentCount { count: usize },

    #[error("segment {segment} has {found} characters, expected {expected}")]
    Ragged {
        segment: usize,
        expected: usize,
        found: usize,
    },

    #[error("segment {segment} contains {character:?}, expected '0' or '1'")]
    NonBinary { segment: usize, character: char },

    #[error("transcript line {line} is not a CHAIN or END line: {text:?}")]
    UnexpectedLine { line: usize, text: String },

    #[error("transcript ends without END")]
    MissingEnd,

    #[error("transcript is empty")]
    Empty,

    #[error("failed to read transcript: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Chain(#[from] LearnError),
}

/// The `LEARNING` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LearningHeader {
    pub bits_per_letter: u32,
    pub nof_letters: usize,
}

impl From<&LearningProblem> for LearningHeader {
    fn from(problem: &LearningProblem) -> Self {
        Self {
            bits_per_letter: problem.bits_per_letter(),
            nof_letters: problem.nof_letters(),
        }
    }
}

impl fmt::Display for LearningHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            HEADER_KEYWORD, self.bits_per_letter, self.nof_letters
        )
    }
}

impl FromStr for LearningHeader {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut fields = s.split_whitespace();
        if fields.next() != Some(HEADER_KEYWORD) {
            return Err(ReportError::MissingKeyword {
                expected: HEADER_KEYWORD,
                text: s.to_string(),
            });
        }
        let bad = || ReportError::BadHeader {
            text: s.to_string(),
        };
        let bits_per_letter = fields.next().and_then(|f| f.parse().ok()).ok_or_else(bad)?;
        let nof_letters = fields.next().and_then(|f| f.parse().ok()).ok_or_else(bad)?;
        if fields.next().is_some() {
            return Err(bad());
        }
        Ok(Self {
            bits_per_letter,
            nof_letters,
        })
    }
}

/// One `CHAIN` line: the enabled flags of each segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainReport {
    segments: Vec<Vec<bool>>,
}

impl ChainReport {
    pub fn segments(&self) -> &[Vec<bool>] {
        &self.segments
    }

    /// Number of states, `(segments + 1) / 2`.
    pub fn states(&self) -> usize {
        self.segments.len().div_ceil(2)
    }

    pub fn nof_letters(&self) -> usize {
        self.segments.first().map_or(0, Vec::len)
    }

    /// Rebuild the chain this report describes.
    pub fn to_chain(&self) -> Result<CandidateChain, ReportError> {
        let length = ChainLength::new(self.states() as u32)?;
        let mut chain = CandidateChain::all_disabled(length, self.nof_letters());
        for (segment, flags) in self.segments.iter().enumerate() {
            let state = segment / 2;
            for (letter, &enabled) in flags.iter().enumerate() {
                if segment % 2 == 0 {
                    chain.set_self_loop(state, letter, enabled);
                } else {
                    chain.set_forward(state, letter, enabled);
                }
            }
        }
        Ok(chain)
    }
}

impl From<&CandidateChain> for ChainReport {
    fn from(chain: &CandidateChain) -> Self {
        Self {
            segments: (0..chain.length().segments())
                .map(|segment| chain.segment_enabled(segment).collect())
                .collect(),
        }
    }
}

impl fmt::Display for ChainReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", CHAIN_KEYWORD)?;
        for segment in &self.segments {
            write!(f, " ")?;
            for &enabled in segment {
                write!(f, "{}", if enabled { '1' } else { '0' })?;
            }
        }
        Ok(())
    }
}

impl FromStr for ChainReport {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut fields = s.split_whitespace();
        if fields.next() != Some(CHAIN_KEYWORD) {
            return Err(ReportError::MissingKeyword {
                expected: CHAIN_KEYWORD,
                text: s.to_string(),
            });
        }

        let mut segments: Vec<Vec<bool>> = Vec::new();
        for (segment, field) in fields.enumerate() {
            let flags = field
                .chars()
                .map(|character| match character {
                    '0' => Ok(false),
                    '1' => Ok(true),
                    _ => Err(ReportError::NonBinary { segment, character }),
                })
                .collect::<Result<Vec<bool>, _>>()?;
            if let Some(first) = segments.first() {
                if first.len() != flags.len() {
                    return Err(ReportError::Ragged {
                        segment,
                        expected: first.len(),
                        found: flags.len(),
                    });
                }
            }
            segments.push(flags);
        }

        if segments.len() % 2 == 0 {
            return Err(ReportError::EvenSegmentCount {
                count: segments.len(),
            });
        }
        Ok(Self { segments })
    }
}

pub fn write_header<W: Write + ?Sized>(out: &mut W, header: &LearningHeader) -> io::Result<()> {
    writeln!(out, "{}", header)
}

pub fn write_chain<W: Write + ?Sized>(out: &mut W, report: &ChainReport) -> io::Result<()> {
    writeln!(out, "{}", report)
}

pub fn write_end<W: Write + ?Sized>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", END_KEYWORD)
}

/// Parse a complete transcript.
///
/// Blank lines are ignored. Anything after `END` is ignored too.
pub fn read_transcript<R: BufRead>(
    reader: R,
) -> Result<(LearningHeader, Vec<ChainReport>), ReportError> {
    let mut lines = reader
        .lines()
        .enumerate()
        .map(|(i, line)| line.map(|text| (i + 1, text)))
        .filter(|line| !matches!(line, Ok((_, text)) if text.trim().is_empty()));

    let header: LearningHeader = match lines.next() {
        Some(line) => line?.1.parse()?,
        None => return Err(ReportError::Empty),
    };

    let mut reports = Vec::new();
    for line in lines {
        let (number, text) = line?;
        let trimmed = text.trim();
        if trimmed == END_KEYWORD {
            return Ok((header, reports));
        }
        if !trimmed.starts_with(CHAIN_KEYWORD) {
            return Err(ReportError::UnexpectedLine {
                line: number,
                text,
            });
        }
        reports.push(trimmed.parse()?);
    }
    Err(ReportError::MissingEnd)
}
