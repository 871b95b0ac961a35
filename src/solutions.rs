//! Solutions implemented for Advent of Code 2023.
//!
//! This module provides [`run_day`] to dynamically run one part of a solution by its day.
//!
//! Steps to make a solution available to run:
//! 1. Make a submodule to hold the solution implementation.
//! 2. Have the submodule implement [`AdventOfCode2023<DAY>`] for its day as a [`SolutionRunner`].
//! 3. Import the submodule below `IMPORT SUBMODULES HERE`
//! 4. Add a match case to run [`AdventOfCode2023<DAY>`] for a day, below `MATCH SOLUTIONS HERE`:
//!
//! ```ignore
//! // matching for day 1
//! 1 => AdventOfCode2023::<1>::run(input, part, handler, timed),
//! ```

#![warn(clippy::dbg_macro, clippy::print_stderr, clippy::print_stdout)]

use aoc_framework::runner::{OutputHandler, SolutionRunner};
use aoc_framework::{DynamicResult, PartKind};
use thiserror::Error;

// --- IMPORT SUBMODULES HERE ---
mod day01;
mod day02;
mod day03;
mod day04;
mod day05;
mod day06;
mod day07;
mod day08;
mod day09;
mod day10;
mod day11;
mod day12;
mod day13;
mod day14;
mod day15;
mod day16;
mod day17;
mod day18;
mod day19;
mod day20;
mod day22;

/// A structure collecting solutions by day.
///
/// In a submodule, implement this as a [`SolutionRunner`] for the day.
///
/// Use [`#[solution_runner]`][aoc_framework::runner::solution_runner] for convenience:
///
/// ```ignore
/// // in a submodule "day01.rs"
/// use aoc_framework::runner::solution_runner;
/// use aoc_framework::{PartOne, PartTwo, Solution};
///
/// struct Day01;
/// impl Solution<PartOne> for Day01 {
///     /* ... */
/// }
/// impl Solution<PartTwo> for Day01 {
///     /* ... */
/// }
///
/// #[solution_runner(name = "Day 1", part_one = Day01, part_two = Day01)]
/// impl super::AdventOfCode2023<1> {}
/// ```
struct AdventOfCode2023<const DAY: u8>;

/// A solution for a day is not available.
#[derive(Error, Debug)]
#[error("no solution available for day {0}")]
pub struct DayNotAvailable(u8);

/// Run one part of a solution based on the day.
///
/// # Errors
///
/// If the solution for the given day is not available, a [`DayNotAvailable`] error is returned.
///
/// Any dynamically dispatched error from running the solution is propagated.
pub fn run_day(
    day: u8,
    input: &str,
    part: PartKind,
    handler: &mut dyn OutputHandler,
    timed: bool,
) -> DynamicResult<()> {
    match day {
        // --- MATCH SOLUTIONS HERE ---
        1 => AdventOfCode2023::<1>::run(input, part, handler, timed),
        2 => AdventOfCode2023::<2>::run(input, part, handler, timed),
        3 => AdventOfCode2023::<3>::run(input, part, handler, timed),
        4 => AdventOfCode2023::<4>::run(input, part, handler, timed),
        5 => AdventOfCode2023::<5>::run(input, part, handler, timed),
        6 => AdventOfCode2023::<6>::run(input, part, handler, timed),
        7 => AdventOfCode2023::<7>::run(input, part, handler, timed),
        8 => AdventOfCode2023::<8>::run(input, part, handler, timed),
        9 => AdventOfCode2023::<9>::run(input, part, handler, timed),
        10 => AdventOfCode2023::<10>::run(input, part, handler, timed),
        11 => AdventOfCode2023::<11>::run(input, part, handler, timed),
        12 => AdventOfCode2023::<12>::run(input, part, handler, timed),
        13 => AdventOfCode2023::<13>::run(input, part, handler, timed),
        14 => AdventOfCode2023::<14>::run(input, part, handler, timed),
        15 => AdventOfCode2023::<15>::run(input, part, handler, timed),
        16 => AdventOfCode2023::<16>::run(input, part, handler, timed),
        17 => AdventOfCode2023::<17>::run(input, part, handler, timed),
        18 => AdventOfCode2023::<18>::run(input, part, handler, timed),
        19 => AdventOfCode2023::<19>::run(input, part, handler, timed),
        20 => AdventOfCode2023::<20>::run(input, part, handler, timed),
        22 => AdventOfCode2023::<22>::run(input, part, handler, timed),
        _ => Err(DayNotAvailable(day).into()),
    }
}

#[cfg(test)]
mod tests {
    use std::fmt::Display;
    use std::time::Duration;

    use super::*;

    /// Keeps only the answer.
    #[derive(Default)]
    struct AnswerHandler(Option<String>);

    impl OutputHandler for AnswerHandler {
        fn solution_name(&mut self, _name: &str) {}

        fn parse_start(&mut self) {}

        fn parse_end(&mut self, _duration_opt: Option<Duration>) {}

        fn part_start(&mut self, _part: PartKind) {}

        fn part_output(
            &mut self,
            _part: PartKind,
            output: &dyn Display,
            _duration_opt: Option<Duration>,
        ) {
            self.0 = Some(output.to_string());
        }
    }

    #[test]
    fn runs_selected_part_of_day() -> DynamicResult<()> {
        let mut handler = AnswerHandler::default();
        run_day(15, "HASH\n", PartKind::One, &mut handler, false)?;
        assert_eq!(handler.0.as_deref(), Some("52"));

        let mut handler = AnswerHandler::default();
        run_day(9, "10 13 16 21 30 45\n", PartKind::Two, &mut handler, false)?;
        assert_eq!(handler.0.as_deref(), Some("5"));
        Ok(())
    }

    #[test]
    fn unknown_day_is_not_available() {
        let mut handler = AnswerHandler::default();
        let error = run_day(21, "", PartKind::One, &mut handler, false)
            .expect_err("day 21 has no solution");
        assert_eq!(error.to_string(), "no solution available for day 21");
        assert!(handler.0.is_none());
    }
}
