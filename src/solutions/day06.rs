use aoc_framework::parsing::{InputScanner, parse_with_context};
use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};

use crate::numeric::CheckedProduct;

#[solution_runner(name = "Day 6: Wait For It", parsed = RaceSheet, part_one = Day06, part_two = Day06)]
impl super::AdventOfCode2023<6> {}

/*
Input is a sheet of toy boat races. The first line lists race times in milliseconds after `Time:`,
the second lists record distances in millimeters after `Distance:`. Times and distances pair up by
position.

A boat is charged by holding its button for some whole milliseconds at the start of the race. Each
millisecond held adds one millimeter per millisecond of speed, and the boat only moves once
released.
*/

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Race {
    time: u64,
    record: u64,
}

impl Race {
    fn beats_record(self, hold: u64) -> bool {
        u128::from(hold) * u128::from(self.time - hold) > u128::from(self.record)
    }

    /// Count the whole hold times that beat the record.
    ///
    /// Distance is `hold * (time - hold)`, so winning holds lie strictly between the roots of
    /// `hold^2 - time * hold + record`. An integer square root estimates the lower root, then
    /// stepping corrects it to the exact first winning hold.
    fn winning_holds(self) -> u64 {
        let time = u128::from(self.time);
        let Some(discriminant) = (time * time).checked_sub(4 * u128::from(self.record)) else {
            return 0;
        };

        let root = discriminant.isqrt();
        // (time - root) / 2 <= time / 2, which fits in u64
        let mut first = u64::try_from((time - root.min(time)) / 2).unwrap_or(self.time);
        let midpoint = self.time / 2;

        while first > 0 && self.beats_record(first - 1) {
            first -= 1;
        }
        while first <= midpoint && !self.beats_record(first) {
            first += 1;
        }
        if first > midpoint {
            return 0;
        }

        // winning holds are symmetric around time / 2
        self.time + 1 - 2 * first
    }
}

#[derive(Debug)]
struct RaceSheet {
    races: Vec<Race>,
    /// The digits of each line joined into one race, ignoring the spaces.
    joined: Race,
}

#[derive(thiserror::Error, Debug)]
enum ParseRaceSheetError {
    #[error("expected a line starting with {0:?}")]
    MissingLine(&'static str),

    #[error("expected {times} times to pair with as many distances, found {distances}")]
    MismatchedCounts { times: usize, distances: usize },
}

fn parse_labeled_line(
    scanner: &mut InputScanner<'_>,
    label: &'static str,
) -> DynamicResult<(Vec<u64>, u64)> {
    scanner
        .next_item(|_, line| -> DynamicResult<_> {
            let values = line
                .strip_prefix(label)
                .ok_or(ParseRaceSheetError::MissingLine(label))?;
            let separate: Vec<u64> = values
                .split_whitespace()
                .map(parse_with_context::<u64>)
                .collect::<Result<_, _>>()?;
            let joined: String = values.split_whitespace().collect();
            Ok((separate, parse_with_context::<u64>(&joined)?))
        })?
        .ok_or_else(|| ParseRaceSheetError::MissingLine(label).into())
}

impl ParseData for RaceSheet {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let mut scanner = InputScanner::new(input);
        let (times, joined_time) = parse_labeled_line(&mut scanner, "Time:")?;
        let (records, joined_record) = parse_labeled_line(&mut scanner, "Distance:")?;

        if times.len() != records.len() {
            return Err(ParseRaceSheetError::MismatchedCounts {
                times: times.len(),
                distances: records.len(),
            }
            .into());
        }

        let races = times
            .into_iter()
            .zip(records)
            .map(|(time, record)| Race { time, record })
            .collect();

        Ok(Self {
            races,
            joined: Race {
                time: joined_time,
                record: joined_record,
            },
        })
    }
}

#[derive(thiserror::Error, Debug)]
enum Day06Error {
    #[error("product of winning hold counts overflowed")]
    ProductOverflow,
}

/*
For part 1, count the hold times that beat each race's record, and multiply the counts.
*/

struct Day06;

impl Solution<PartOne> for Day06 {
    type Input = RaceSheet;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(input
            .races
            .iter()
            .map(|race| race.winning_holds())
            .checked_product()
            .ok_or(Day06Error::ProductOverflow)?)
    }
}

/*
For part 2, the spaces on each line were bad kerning. The sheet holds one long race whose time and
record are the digits of each line read together.
*/

impl Solution<PartTwo> for Day06 {
    type Input = RaceSheet;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(input.joined.winning_holds())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT: &str = r"Time:      7  15   30
Distance:  9  40  200
";

    #[test]
    fn part_one_solves_example() -> DynamicResult<()> {
        let parsed = RaceSheet::parse(EXAMPLE_INPUT)?;
        let result = <Day06 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 288);
        Ok(())
    }

    #[test]
    fn part_two_solves_example() -> DynamicResult<()> {
        let parsed = RaceSheet::parse(EXAMPLE_INPUT)?;
        assert_eq!(
            parsed.joined,
            Race {
                time: 71530,
                record: 940_200
            }
        );
        let result = <Day06 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 71503);
        Ok(())
    }

    #[test]
    fn winning_holds_handles_exact_roots() {
        // holding 10 or 20 ties the record exactly, which doesn't beat it
        assert_eq!(Race { time: 30, record: 200 }.winning_holds(), 9);
        assert_eq!(Race { time: 4, record: 4 }.winning_holds(), 0);
        assert_eq!(Race { time: 3, record: 100 }.winning_holds(), 0);
        assert_eq!(Race { time: 2, record: 0 }.winning_holds(), 1);
    }
}
