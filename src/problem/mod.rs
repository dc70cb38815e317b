// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Learning problems: an alphabet and a list of positive lasso examples.
//!
//! # File format
//!
//! ```text
//! Learning problem with character width: 2
//! Nof characters: 3
//! 0010 01
//! ```
//!
//! Each example line is `<prefix-bits> <cycle-bits>`. Bits are grouped by the
//! character width; within a group, bit `i` contributes `1 << i`, so `01`
//! above is letter 2. A line starting with the space has an empty prefix.

pub mod errors;

pub use errors::ProblemError;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// A letter index in `0..nof_letters`.
pub type Letter = usize;

const WIDTH_SIGNATURE: &str = "Learning problem with character width: ";
const LETTERS_SIGNATURE: &str = "Nof characters: ";

/// The omega-word `prefix · cycle · cycle · …`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LassoExample {
    prefix: Vec<Letter>,
    cycle: Vec<Letter>,
}

impl LassoExample {
    /// # Panics
    ///
    /// Panics if `cycle` is empty.
    pub fn new(prefix: Vec<Letter>, cycle: Vec<Letter>) -> Self {
        assert!(!cycle.is_empty(), "Lasso cycle must not be empty");
        Self { prefix, cycle }
    }

    pub fn prefix(&self) -> &[Letter] {
        &self.prefix
    }

    pub fn cycle(&self) -> &[Letter] {
        &self.cycle
    }
}

/// Loading options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProblemOptions {
    /// Stop after this many physical lines, counting the two header lines.
    pub max_lines: Option<usize>,
}

/// A parsed learning problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LearningProblem {
    bits_per_letter: u32,
    nof_letters: usize,
    examples: Vec<LassoExample>,
}

impl LearningProblem {
    /// Build a problem directly, checking the same constraints as the parser.
    pub fn new(
        bits_per_letter: u32,
        nof_letters: usize,
        examples: Vec<LassoExample>,
    ) -> Result<Self, ProblemError> {
        check_alphabet(bits_per_letter, nof_letters)?;
        for (i, example) in examples.iter().enumerate() {
            let line = i + 3;
            if let Some(&letter) = example
                .prefix()
                .iter()
                .chain(example.cycle())
                .find(|&&letter| letter >= nof_letters)
            {
                return Err(ProblemError::LetterOutOfRange {
                    line,
                    letter,
                    letters: nof_letters,
                });
            }
        }
        Ok(Self {
            bits_per_letter,
            nof_letters,
            examples,
        })
    }

    /// Load a problem file.
    pub fn from_file(
        path: impl AsRef<Path>,
        options: ProblemOptions,
    ) -> Result<Self, ProblemError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ProblemError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(BufReader::new(file), options)
    }

    /// Parse a problem held in memory.
    pub fn parse(text: &str, options: ProblemOptions) -> Result<Self, ProblemError> {
        Self::from_reader(text.as_bytes(), options)
    }

    /// Parse a problem from any line source.
    pub fn from_reader<R: BufRead>(
        reader: R,
        options: ProblemOptions,
    ) -> Result<Self, ProblemError> {
        let mut lines = reader.lines();
        let mut next_header = |line: usize| -> Result<String, ProblemError> {
            match lines.next() {
                Some(Ok(text)) => Ok(text),
                Some(Err(source)) => Err(ProblemError::Read { line, source }),
                None => Err(ProblemError::MissingHeader { line }),
            }
        };

        let bits_per_letter: u32 = parse_header(&next_header(1)?, 1, WIDTH_SIGNATURE)?;
        let nof_letters: usize = parse_header(&next_header(2)?, 2, LETTERS_SIGNATURE)?;
        check_alphabet(bits_per_letter, nof_letters)?;

        let mut examples = Vec::new();
        for (i, text) in lines.enumerate() {
            let line = i + 3;
            if options.max_lines.is_some_and(|max| line > max) {
                break;
            }
            let text = text.map_err(|source| ProblemError::Read { line, source })?;
            let text = text.trim_end();
            if text.is_empty() {
                continue;
            }
            examples.push(parse_example(text, line, bits_per_letter, nof_letters)?);
        }

        tracing::debug!(
            bits_per_letter,
            nof_letters,
            examples = examples.len(),
            "loaded learning problem"
        );

        Ok(Self {
            bits_per_letter,
            nof_letters,
            examples,
        })
    }

    pub fn bits_per_letter(&self) -> u32 {
        self.bits_per_letter
    }

    pub fn nof_letters(&self) -> usize {
        self.nof_letters
    }

    /// The distinguished end-of-word letter, `nof_letters - 1`.
    pub fn end_of_word_letter(&self) -> Letter {
        self.nof_letters - 1
    }

    pub fn examples(&self) -> &[LassoExample] {
        &self.examples
    }
}

fn check_alphabet(bits_per_letter: u32, nof_letters: usize) -> Result<(), ProblemError> {
    if bits_per_letter == 0 {
        return Err(ProblemError::ZeroWidth);
    }
    if nof_letters == 0 {
        return Err(ProblemError::NoLetters);
    }
    // A shift past the word size means the width can represent any count.
    let too_small = 1usize
        .checked_shl(bits_per_letter)
        .is_some_and(|capacity| capacity < nof_letters);
    if too_small {
        return Err(ProblemError::WidthTooSmall {
            width: bits_per_letter,
            letters: nof_letters,
        });
    }
    Ok(())
}

fn parse_header<T: std::str::FromStr>(
    text: &str,
    line: usize,
    signature: &'static str,
) -> Result<T, ProblemError> {
    let value = text
        .strip_prefix(signature)
        .ok_or(ProblemError::BadSignature {
            line,
            expected: signature.trim_end(),
        })?
        .trim();
    value.parse().map_err(|_| ProblemError::InvalidNumber {
        line,
        value: value.to_string(),
    })
}

fn parse_example(
    text: &str,
    line: usize,
    bits_per_letter: u32,
    nof_letters: usize,
) -> Result<LassoExample, ProblemError> {
    let width = bits_per_letter as usize;
    let space = text
        .find(' ')
        .ok_or(ProblemError::MissingSeparator { line })?;
    let (prefix_bits, cycle_bits) = (&text[..space], &text[space + 1..]);

    if prefix_bits.len() % width != 0 {
        return Err(ProblemError::MisalignedPrefix { line });
    }
    if cycle_bits.len() % width != 0 {
        return Err(ProblemError::MisalignedCycle { line });
    }
    // Trailing whitespace is trimmed before this point, so the cycle is never empty.
    debug_assert!(!cycle_bits.is_empty());

    let prefix = parse_letters(prefix_bits, 1, line, width, nof_letters)?;
    let cycle = parse_letters(cycle_bits, space + 2, line, width, nof_letters)?;
    Ok(LassoExample::new(prefix, cycle))
}

/// Decode groups of `width` binary characters, least significant bit first.
///
/// `first_column` is the 1-based column of `bits[0]` in the source line.
fn parse_letters(
    bits: &str,
    first_column: usize,
    line: usize,
    width: usize,
    nof_letters: usize,
) -> Result<Vec<Letter>, ProblemError> {
    let mut letters = Vec::with_capacity(bits.len() / width);
    let mut letter: usize = 0;
    for (i, byte) in bits.bytes().enumerate() {
        let bit = i % width;
        match byte {
            b'0' => {}
            // Bits beyond the word size cannot name a letter below nof_letters.
            b'1' => letter |= 1usize.checked_shl(bit as u32).unwrap_or(usize::MAX),
            _ => {
                return Err(ProblemError::NonBinary {
                    line,
                    column: first_column + i,
                })
            }
        }
        if bit == width - 1 {
            if letter >= nof_letters {
                return Err(ProblemError::LetterOutOfRange {
                    line,
                    letter,
                    letters: nof_letters,
                });
            }
            letters.push(letter);
            letter = 0;
        }
    }
    Ok(letters)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<LearningProblem, ProblemError> {
        LearningProblem::parse(text, ProblemOptions::default())
    }

    const HEADER: &str = "Learning problem with character width: 2\nNof characters: 3\n";

    #[test]
    fn test_parse_letters_lsb_first() {
        let problem = parse(&format!("{HEADER}0001 01\n")).unwrap();
        assert_eq!(problem.bits_per_letter(), 2);
        assert_eq!(problem.nof_letters(), 3);
        assert_eq!(problem.end_of_word_letter(), 2);
        assert_eq!(
            problem.examples(),
            &[LassoExample::new(vec![0, 2], vec![2])]
        );
    }

    #[test]
    fn test_blank_lines_and_trailing_space_are_ignored() {
        let problem = parse(&format!("{HEADER}\n10 00  \n\n")).unwrap();
        assert_eq!(problem.examples(), &[LassoExample::new(vec![1], vec![0])]);
    }

    #[test]
    fn test_leading_space_gives_empty_prefix() {
        let problem = parse(&format!("{HEADER} 1000\n")).unwrap();
        assert_eq!(problem.examples(), &[LassoExample::new(vec![], vec![1, 0])]);
    }

    #[test]
    fn test_max_lines_counts_header() {
        let text = format!("{HEADER}00 00\n10 10\n01 01\n");
        let options = ProblemOptions { max_lines: Some(4) };
        let problem = LearningProblem::parse(&text, options).unwrap();
        assert_eq!(problem.examples().len(), 2);

        let options = ProblemOptions { max_lines: Some(2) };
        let problem = LearningProblem::parse(&text, options).unwrap();
        assert!(problem.examples().is_empty());
    }

    #[test]
    fn test_max_lines_stops_before_bad_line() {
        let text = format!("{HEADER}00 00\nnot an example\n");
        let options = ProblemOptions { max_lines: Some(3) };
        assert!(LearningProblem::parse(&text, options).is_ok());
        assert!(matches!(
            parse(&text),
            Err(ProblemError::MisalignedPrefix { line: 4 })
        ));
    }

    #[test]
    fn test_header_errors() {
        assert!(matches!(
            parse(""),
            Err(ProblemError::MissingHeader { line: 1 })
        ));
        assert!(matches!(
            parse("Learning problem with width: 2\n"),
            Err(ProblemError::BadSignature { line: 1, .. })
        ));
        assert!(matches!(
            parse("Learning problem with character width: two\nNof characters: 3\n"),
            Err(ProblemError::InvalidNumber { line: 1, .. })
        ));
        assert!(matches!(
            parse("Learning problem with character width: 2\n"),
            Err(ProblemError::MissingHeader { line: 2 })
        ));
        assert!(matches!(
            parse("Learning problem with character width: 2\nNof letters: 3\n"),
            Err(ProblemError::BadSignature { line: 2, .. })
        ));
    }

    #[test]
    fn test_alphabet_errors() {
        assert!(matches!(
            parse("Learning problem with character width: 1\nNof characters: 3\n"),
            Err(ProblemError::WidthTooSmall {
                width: 1,
                letters: 3
            })
        ));
        assert!(matches!(
            parse("Learning problem with character width: 0\nNof characters: 1\n"),
            Err(ProblemError::ZeroWidth)
        ));
        assert!(matches!(
            parse("Learning problem with character width: 1\nNof characters: 0\n"),
            Err(ProblemError::NoLetters)
        ));
        // Widths past the word size are accepted.
        assert!(parse("Learning problem with character width: 70\nNof characters: 5\n").is_ok());
    }

    #[test]
    fn test_example_errors() {
        let cases: [(&str, fn(&ProblemError) -> bool); 6] = [
            ("0010", |e| matches!(e, ProblemError::MissingSeparator { line: 3 })),
            ("001 01", |e| matches!(e, ProblemError::MisalignedPrefix { line: 3 })),
            ("00 011", |e| matches!(e, ProblemError::MisalignedCycle { line: 3 })),
            ("00 ", |e| {
                matches!(
                    e,
                    ProblemError::MisalignedCycle { .. } | ProblemError::MissingSeparator { .. }
                )
            }),
            ("00 0x", |e| matches!(e, ProblemError::NonBinary { line: 3, column: 5 })),
            ("11 00", |e| {
                matches!(
                    e,
                    ProblemError::LetterOutOfRange { line: 3, letter: 3, letters: 3 }
                )
            }),
        ];
        for (example, check) in cases {
            let err = parse(&format!("{HEADER}{example}\n")).unwrap_err();
            assert!(check(&err), "{example:?} gave {err:?}");
        }
    }

    #[test]
    fn test_second_space_is_not_a_separator() {
        let err = parse(&format!("{HEADER}00  x\n")).unwrap_err();
        assert!(matches!(err, ProblemError::NonBinary { line: 3, column: 4 }));
    }

    #[test]
    fn test_new_checks_letters() {
        let err = LearningProblem::new(1, 2, vec![LassoExample::new(vec![], vec![2])]).unwrap_err();
        assert!(matches!(err, ProblemError::LetterOutOfRange { letter: 2, .. }));
        assert!(LearningProblem::new(1, 2, vec![LassoExample::new(vec![1], vec![0])]).is_ok());
    }

    #[test]
    fn test_from_file_missing() {
        let err = LearningProblem::from_file("/nonexistent/problem.txt", ProblemOptions::default())
            .unwrap_err();
        assert!(matches!(err, ProblemError::Open { .. }));
        assert!(err.to_string().contains("error opening input file"));
    }
}
