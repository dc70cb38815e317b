// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

use clap::{ArgAction, Parser, ValueEnum};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use uvw_learner::output::{render_dot, ChainReport, LearningHeader};
use uvw_learner::{LearnError, Learner, LearnerConfig, LearningProblem, ProblemOptions, SafetyMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// The LEARNING/CHAIN/END transcript
    Text,
    /// A Graphviz digraph of the reported chains
    Dot,
}

#[derive(Parser, Debug)]
#[command(name = "uvwlearn", version)]
#[command(about = "Learn minimal UVW chains consistent with positive lasso examples")]
#[command(long_about = None)]
struct Cli {
    /// Learning problem file
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Longest chain to learn
    #[arg(short = 'c', value_name = "LENGTH", default_value_t = 2)]
    max_chain_length: u32,

    /// Read at most this many input lines, headers included (-1: no limit)
    #[arg(
        short = 'l',
        value_name = "LINES",
        default_value_t = -1,
        allow_negative_numbers = true,
        value_parser = clap::value_parser!(i64).range(-1..)
    )]
    max_lines: i64,

    /// Learn safety properties (last letter marks end of word)
    #[arg(short = 's', conflicts_with = "finite_words")]
    safety: bool,

    /// Learn properties over finite words (last letter marks end of word)
    #[arg(short = 'f')]
    finite_words: bool,

    /// Increase log detail on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

impl Cli {
    fn safety_mode(&self) -> SafetyMode {
        if self.safety {
            SafetyMode::Safety
        } else if self.finite_words {
            SafetyMode::FiniteWords
        } else {
            SafetyMode::Liveness
        }
    }

    fn problem_options(&self) -> ProblemOptions {
        ProblemOptions {
            max_lines: usize::try_from(self.max_lines).ok(),
        }
    }

    fn learner_config(&self) -> LearnerConfig {
        LearnerConfig {
            max_chain_length: self.max_chain_length,
            safety_mode: self.safety_mode(),
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<(), LearnError> {
    let problem = LearningProblem::from_file(&cli.input, cli.problem_options())?;
    let mut learner = Learner::new(&problem, cli.learner_config());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.format {
        OutputFormat::Text => learner.run(&mut out),
        OutputFormat::Dot => {
            learner.run(&mut io::sink())?;
            let reports: Vec<ChainReport> = learner.reported().map(ChainReport::from).collect();
            out.write_all(render_dot(&LearningHeader::from(&problem), &reports).as_bytes())?;
            out.flush()?;
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("uvwlearn: {}", err);
            ExitCode::FAILURE
        }
    }
}
