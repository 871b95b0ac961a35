//! Functions and traits for running one part of a solution.
//!
//! # Quick Start
//!
//! A structure or impl-block can be annotated with the [`#[solution_runner]`][solution_runner]
//! attribute macro with appropriate properties:
//!
//! ```
//! # use aoc_framework::runner::{solution_runner};
//! # use aoc_framework::{DynamicResult, PartOne, PartTwo, Solution};
//! #
//! struct Day01;
//!
//! impl Solution<PartOne> for Day01 {
//!     type Input = str;
//!     /* ... */
//! #    type Output = usize;
//! #    fn solve(_input: &Self::Input) -> DynamicResult<usize> {
//! #        Ok(0)
//! #    }
//! }
//! # impl Solution<PartTwo> for Day01 {
//! #    type Input = str;
//! #    type Output = usize;
//! #    fn solve(_input: &Self::Input) -> DynamicResult<usize> {
//! #        Ok(0)
//! #    }
//! # }
//!
//! #[solution_runner(name = "Day 1", part_one = Day01, part_two = Day01)]
//! struct Day01Runner;
//!
//! // or
//!
//! #[solution_runner(name = "Day 1", part_one = Day01, part_two = Day01)]
//! impl Day01 {}
//! ```

use std::fmt::Display;
use std::time::Duration;

use crate::{DynamicResult, ParseData, Part, PartKind, PartOne, PartTwo, Solution};

// re-export procedural macro
pub use aoc_framework_macros::solution_runner;

/// A trait for an output events handler.
///
/// When a solution runs, the steps of running the solution lead to events to output through a
/// handler as feedback.
pub trait OutputHandler {
    /// Called to output the name of the solution, at the start of running the solution.
    fn solution_name(&mut self, name: &str);

    /// Called when the solution starts parsing input.
    fn parse_start(&mut self);

    /// Called when parsing input is finished.
    ///
    /// The duration taken to parse is optionally passed.
    fn parse_end(&mut self, duration_opt: Option<Duration>);

    /// Called when the selected part starts, with a [`PartKind`] to identify the part.
    fn part_start(&mut self, part: PartKind);

    /// Called when the part finishes to output the result, with a [`PartKind`] to identify the
    /// part.
    ///
    /// The duration taken to run the part is optionally passed.
    fn part_output(&mut self, part: PartKind, output: &dyn Display, duration_opt: Option<Duration>);
}

/// Evaluate an expression, measuring its duration only when `$timed` is true.
///
/// # Returns
///
/// A tuple of the expression's result and an optional [`Duration`][std::time::Duration], which is
/// `None` when `$timed` is false.
macro_rules! measure_with_optional_duration {
    ($expr:expr, $timed:expr) => {{
        if $timed {
            let start = ::std::time::Instant::now();
            let result = $expr;
            (result, Some(start.elapsed()))
        } else {
            ($expr, None)
        }
    }};
}

/// Run a solution part, outputting events through the handler.
///
/// # Errors
///
/// Any dynamically dispatched error from the solution is propagated.
fn run_part<S, P>(
    input: &S::Input,
    handler: &mut dyn OutputHandler,
    timed: bool,
) -> DynamicResult<()>
where
    P: Part,
    S: Solution<P>,
{
    let part = P::kind();
    log::debug!("solving {part}");
    handler.part_start(part);
    let (result, duration_opt) = measure_with_optional_duration!(S::solve(input), timed);
    let output = result?;
    handler.part_output(part, &output, duration_opt);
    Ok(())
}

/// Run a solution's parse step, outputting events through the handler.
///
/// # Errors
///
/// Any dynamically dispatched error from parsing is propagated.
fn run_parse<D: ParseData>(
    input: &str,
    handler: &mut dyn OutputHandler,
    timed: bool,
) -> DynamicResult<D> {
    handler.parse_start();
    let (result, duration_opt) = measure_with_optional_duration!(D::parse(input), timed);
    let parsed = result?;
    handler.parse_end(duration_opt);
    Ok(parsed)
}

/// Run the selected part of a solution that accepts string input.
///
/// # Arguments
///
/// - `name` - The solution's name to output.
/// - `input` - The input string to solve.
/// - `part` - Which part to run.
/// - `handler` - The output handler to output events to.
/// - `timed` - A flag to measure the time to solve then output the elapsed time to the handler.
///
/// # Errors
///
/// Any dynamically dispatched error from the solution part is propagated.
pub fn solve_solution<S1, S2>(
    name: &str,
    input: &str,
    part: PartKind,
    handler: &mut dyn OutputHandler,
    timed: bool,
) -> DynamicResult<()>
where
    S1: Solution<PartOne, Input = str>,
    S2: Solution<PartTwo, Input = str>,
{
    handler.solution_name(name);
    match part {
        PartKind::One => run_part::<S1, PartOne>(input, handler, timed),
        PartKind::Two => run_part::<S2, PartTwo>(input, handler, timed),
    }
}

/// Run the selected part of a solution that has a parse data step for input.
///
/// The input is parsed once with `D` before the selected part runs.
///
/// # Errors
///
/// Any dynamically dispatched error from parsing or the solution part is propagated.
pub fn solve_parsed_solution<D, S1, S2>(
    name: &str,
    input: &str,
    part: PartKind,
    handler: &mut dyn OutputHandler,
    timed: bool,
) -> DynamicResult<()>
where
    D: ParseData,
    S1: Solution<PartOne, Input = D>,
    S2: Solution<PartTwo, Input = D>,
{
    handler.solution_name(name);
    let parsed = run_parse::<D>(input, handler, timed)?;
    match part {
        PartKind::One => run_part::<S1, PartOne>(&parsed, handler, timed),
        PartKind::Two => run_part::<S2, PartTwo>(&parsed, handler, timed),
    }
}

/// A trait for solutions that can be run.
///
/// The trait can be implemented with the [`solution_runner`] attribute macro.
pub trait SolutionRunner {
    /// Run one part of the solution.
    ///
    /// # Arguments
    ///
    /// - `input` - The input string to solve.
    /// - `part` - Which part to run.
    /// - `handler` - The output handler to output events to.
    /// - `timed` - A flag to measure the time to process steps then output the elapsed times to the
    ///   handler.
    ///
    /// # Errors
    ///
    /// Any dynamically dispatched error from running the solution is propagated.
    fn run(
        input: &str,
        part: PartKind,
        handler: &mut dyn OutputHandler,
        timed: bool,
    ) -> DynamicResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records events as strings, in order.
    #[derive(Default)]
    struct RecordingHandler(Vec<String>);

    impl OutputHandler for RecordingHandler {
        fn solution_name(&mut self, name: &str) {
            self.0.push(format!("name {name}"));
        }

        fn parse_start(&mut self) {
            self.0.push("parse start".to_owned());
        }

        fn parse_end(&mut self, duration_opt: Option<Duration>) {
            self.0
                .push(format!("parse end timed={}", duration_opt.is_some()));
        }

        fn part_start(&mut self, part: PartKind) {
            self.0.push(format!("start {part}"));
        }

        fn part_output(
            &mut self,
            part: PartKind,
            output: &dyn Display,
            duration_opt: Option<Duration>,
        ) {
            self.0
                .push(format!("{part} = {output} timed={}", duration_opt.is_some()));
        }
    }

    struct Words(Vec<String>);

    impl ParseData for Words {
        fn parse(input: &str) -> DynamicResult<Self> {
            if input.is_empty() {
                return Err("no words".into());
            }
            Ok(Self(input.split_whitespace().map(String::from).collect()))
        }
    }

    struct CountWords;

    impl Solution<PartOne> for CountWords {
        type Input = Words;
        type Output = usize;

        fn solve(input: &Words) -> DynamicResult<usize> {
            Ok(input.0.len())
        }
    }

    impl Solution<PartTwo> for CountWords {
        type Input = Words;
        type Output = usize;

        fn solve(input: &Words) -> DynamicResult<usize> {
            Ok(input.0.iter().map(String::len).sum())
        }
    }

    struct CountBytes;

    impl Solution<PartOne> for CountBytes {
        type Input = str;
        type Output = usize;

        fn solve(input: &str) -> DynamicResult<usize> {
            Ok(input.len())
        }
    }

    impl Solution<PartTwo> for CountBytes {
        type Input = str;
        type Output = String;

        fn solve(_input: &str) -> DynamicResult<String> {
            Err("part two has no answer".into())
        }
    }

    #[test]
    fn parsed_solution_runs_only_selected_part() -> DynamicResult<()> {
        let mut handler = RecordingHandler::default();
        solve_parsed_solution::<Words, CountWords, CountWords>(
            "Words",
            "ab cde",
            PartKind::Two,
            &mut handler,
            true,
        )?;
        assert_eq!(
            handler.0,
            [
                "name Words",
                "parse start",
                "parse end timed=true",
                "start Part 2",
                "Part 2 = 5 timed=true",
            ]
        );
        Ok(())
    }

    #[test]
    fn string_solution_skips_parse_events() -> DynamicResult<()> {
        let mut handler = RecordingHandler::default();
        solve_solution::<CountBytes, CountBytes>(
            "Bytes",
            "abc",
            PartKind::One,
            &mut handler,
            false,
        )?;
        assert_eq!(
            handler.0,
            ["name Bytes", "start Part 1", "Part 1 = 3 timed=false"]
        );
        Ok(())
    }

    #[test]
    fn errors_stop_before_output() {
        let mut handler = RecordingHandler::default();
        let result = solve_solution::<CountBytes, CountBytes>(
            "Bytes",
            "abc",
            PartKind::Two,
            &mut handler,
            false,
        );
        assert!(result.is_err());
        assert_eq!(handler.0, ["name Bytes", "start Part 2"]);

        let mut handler = RecordingHandler::default();
        let result = solve_parsed_solution::<Words, CountWords, CountWords>(
            "Words",
            "",
            PartKind::One,
            &mut handler,
            false,
        );
        assert!(result.is_err());
        assert_eq!(handler.0, ["name Words", "parse start"]);
    }
}
