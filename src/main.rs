#![warn(clippy::pedantic)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::branches_sharing_code,
    clippy::collection_is_never_read,
    clippy::equatable_if_let,
    clippy::needless_collect,
    clippy::needless_pass_by_ref_mut,
    clippy::option_if_let_else,
    clippy::set_contains_or_insert,
    clippy::suboptimal_flops,
    clippy::suspicious_operation_groupings,
    clippy::trait_duplication_in_bounds,
    clippy::type_repetition_in_bounds,
    clippy::use_self,
    clippy::useless_let_if_seq
)]
#![deny(clippy::unwrap_used)]

use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Error, Result};
use aoc_framework::PartKind;
use aoc_framework::runner::OutputHandler;
use clap::{ArgAction, Parser, ValueEnum};

mod grid;
mod numeric;
mod solutions;

/// Advent of Code 2023 puzzle solver.
#[derive(Parser, Debug)]
struct Cli {
    /// The day's solution to run (e.g. 1, 2, etc).
    day: u8,

    /// The part of the puzzle to solve.
    part: PartArg,

    /// The input file to solve, defaulting to `inputs/dayNN.txt`.
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Measure and print the durations of parsing and solving to standard error.
    #[arg(short, long, action = ArgAction::SetTrue)]
    timed: bool,

    /// Minimum duration (in milliseconds) required to print timing.
    /// 0 = always print.
    #[arg(long, value_name = "NUMBER", default_value_t)]
    min_timing_ms: u64,
}

/// A part selector as given on the command line.
#[derive(ValueEnum, Debug, Clone, Copy)]
enum PartArg {
    #[value(name = "1")]
    One,
    #[value(name = "2")]
    Two,
}

impl From<PartArg> for PartKind {
    fn from(value: PartArg) -> Self {
        match value {
            PartArg::One => Self::One,
            PartArg::Two => Self::Two,
        }
    }
}

/// Read the default input file for a day to a string.
fn get_default_input(day: u8) -> Result<String> {
    let filename = format!("day{day:02}.txt");
    let path = PathBuf::from("inputs").join(filename);

    fs::read_to_string(&path).with_context(|| {
        format!(
            "default input file missing: {}\n\n\
            please create the file or provide the input file argument",
            path.display()
        )
    })
}

/// Read the given input file to a string.
fn get_input(input_file: &Path) -> Result<String> {
    fs::read_to_string(input_file)
        .with_context(|| format!("could not read input file at: {}", input_file.display()))
}

/// Prints the answer alone on standard output; progress goes to the log and timings to standard
/// error.
struct CliOutputHandler {
    /// A minimum duration to filter any outputs of duration by.
    min_duration: Duration,
}

impl CliOutputHandler {
    fn new(min_duration: Duration) -> Self {
        Self { min_duration }
    }

    fn format_duration(duration: Duration) -> String {
        const ONE_SECOND: Duration = Duration::from_secs(1);
        const ONE_MILLISECOND: Duration = Duration::from_millis(1);
        const ONE_MICROSECOND: Duration = Duration::from_micros(1);
        const DECIMAL_PLACES: usize = 3;

        if duration >= ONE_SECOND {
            format!("{:.*} seconds", DECIMAL_PLACES, duration.as_secs_f32())
        } else {
            let nanos = duration.subsec_nanos();
            if duration >= ONE_MILLISECOND {
                format!("{:.*} milliseconds", DECIMAL_PLACES, f64::from(nanos) / 1e6)
            } else if duration >= ONE_MICROSECOND {
                format!("{:.*} microseconds", DECIMAL_PLACES, f64::from(nanos) / 1e3)
            } else {
                format!("{nanos} nanoseconds")
            }
        }
    }

    /// Convert an optional duration into a formatted duration, filtering out if the duration is
    /// shorter than the minimum duration.
    fn format_optional_duration_above_min(&self, duration: Option<Duration>) -> Option<String> {
        duration
            .filter(|d| *d >= self.min_duration)
            .map(Self::format_duration)
    }
}

impl OutputHandler for CliOutputHandler {
    fn solution_name(&mut self, name: &str) {
        log::info!("= {name} =");
    }

    fn parse_start(&mut self) {
        log::debug!("parsing input");
    }

    fn parse_end(&mut self, duration_opt: Option<Duration>) {
        if let Some(formatted_duration) = self.format_optional_duration_above_min(duration_opt) {
            eprintln!("Input parsed in {formatted_duration}");
        }
    }

    fn part_start(&mut self, part: PartKind) {
        log::info!("-- {part} --");
    }

    fn part_output(&mut self, part: PartKind, output: &dyn Display, duration_opt: Option<Duration>) {
        println!("{output}");
        if let Some(formatted_duration) = self.format_optional_duration_above_min(duration_opt) {
            eprintln!("{part} solved in {formatted_duration}");
        }
    }
}

fn run(args: Cli) -> Result<()> {
    let input_str = args.input.as_deref().map_or_else(
        || get_default_input(args.day),
        get_input,
    )?;
    let mut handler = CliOutputHandler::new(Duration::from_millis(args.min_timing_ms));
    solutions::run_day(
        args.day,
        &input_str,
        args.part.into(),
        &mut handler,
        args.timed,
    )
    .map_err(|dyn_error| {
        let anyhow_error = Error::from_boxed(dyn_error);
        anyhow_error.context("failed to run solution")
    })
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // usage errors exit with status 1 rather than clap's default of 2
    let args = match Cli::try_parse() {
        Ok(args) => args,
        Err(error) if error.use_stderr() => {
            let _ = error.print();
            return ExitCode::FAILURE;
        }
        Err(error) => error.exit(),
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("Error: {error:?}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_day_part_and_input() {
        let cli = Cli::try_parse_from(["aoc2023", "16", "2", "lava.txt", "--timed"])
            .expect("arguments are valid");
        assert_eq!(cli.day, 16);
        assert_eq!(PartKind::from(cli.part), PartKind::Two);
        assert_eq!(cli.input, Some(PathBuf::from("lava.txt")));
        assert!(cli.timed);
    }

    #[test]
    fn rejects_unknown_part() {
        let error = Cli::try_parse_from(["aoc2023", "1", "3", "input.txt"])
            .expect_err("part 3 does not exist");
        assert!(error.use_stderr());
    }

    #[test]
    fn rejects_missing_part() {
        assert!(Cli::try_parse_from(["aoc2023", "1"]).is_err());
    }

    #[test]
    fn formats_durations_by_magnitude() {
        assert_eq!(
            CliOutputHandler::format_duration(Duration::from_millis(1500)),
            "1.500 seconds"
        );
        assert_eq!(
            CliOutputHandler::format_duration(Duration::from_micros(2500)),
            "2.500 milliseconds"
        );
        assert_eq!(
            CliOutputHandler::format_duration(Duration::from_nanos(42)),
            "42 nanoseconds"
        );
    }

    #[test]
    fn filters_durations_below_minimum() {
        let handler = CliOutputHandler::new(Duration::from_millis(10));
        assert_eq!(
            handler.format_optional_duration_above_min(Some(Duration::from_millis(1))),
            None
        );
        assert!(
            handler
                .format_optional_duration_above_min(Some(Duration::from_millis(20)))
                .is_some()
        );
        assert_eq!(handler.format_optional_duration_above_min(None), None);
    }
}
