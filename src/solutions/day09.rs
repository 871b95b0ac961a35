use aoc_framework::parsing::{parse_input_lines, parse_with_context};
use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use checked_sum::CheckedSum;

#[solution_runner(
    name = "Day 9: Mirage Maintenance",
    parsed = Report,
    part_one = Day09,
    part_two = Day09
)]
impl super::AdventOfCode2023<9> {}

/*
Input is an oasis report. Each line is the history of one value, as space-separated integers
observed over time.

A history is extrapolated by taking differences between neighboring values, then differences of
those differences, until every difference is zero. Extending the zero row and adding back up each
row predicts the next value.
*/

#[derive(Debug)]
struct Report(Vec<Vec<i64>>);

impl ParseData for Report {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let histories = parse_input_lines(input, |_, line| {
            line.split_whitespace()
                .map(parse_with_context::<i64>)
                .collect::<Result<Vec<_>, _>>()
        })
        .collect::<Result<_, _>>()?;
        Ok(Self(histories))
    }
}

#[derive(thiserror::Error, Debug)]
enum Day09Error {
    #[error("cannot extrapolate from an empty history")]
    EmptyHistory,

    #[error("extrapolation overflowed")]
    Overflow,
}

/// Predict the value following `history`.
///
/// The prediction is the sum of the last value of every difference row.
fn extrapolate_next(history: &[i64]) -> Result<i64, Day09Error> {
    if history.is_empty() {
        return Err(Day09Error::EmptyHistory);
    }

    let mut row = history.to_vec();
    let mut prediction: i64 = 0;
    while row.iter().any(|&value| value != 0) {
        let last = *row.last().ok_or(Day09Error::EmptyHistory)?;
        prediction = prediction.checked_add(last).ok_or(Day09Error::Overflow)?;

        row = row
            .windows(2)
            .map(|pair| pair[1].checked_sub(pair[0]))
            .collect::<Option<_>>()
            .ok_or(Day09Error::Overflow)?;
    }
    Ok(prediction)
}

fn sum_predictions<I>(histories: I) -> DynamicResult<i64>
where
    I: Iterator<Item = Result<i64, Day09Error>>,
{
    let predictions = histories.collect::<Result<Vec<_>, _>>()?;
    Ok(predictions
        .into_iter()
        .checked_sum()
        .ok_or(Day09Error::Overflow)?)
}

/*
For part 1, extrapolate the next value of each history and sum them.
*/

struct Day09;

impl Solution<PartOne> for Day09 {
    type Input = Report;
    type Output = i64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        sum_predictions(input.0.iter().map(|history| extrapolate_next(history)))
    }
}

/*
For part 2, extrapolate backwards in time instead, predicting the value before each history and
summing them. Predicting backwards is predicting forwards over the reversed history.
*/

impl Solution<PartTwo> for Day09 {
    type Input = Report;
    type Output = i64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        sum_predictions(input.0.iter().map(|history| {
            let reversed: Vec<i64> = history.iter().rev().copied().collect();
            extrapolate_next(&reversed)
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT: &str = r"0 3 6 9 12 15
1 3 6 10 15 21
10 13 16 21 30 45
";

    #[test]
    fn part_one_solves_example() -> DynamicResult<()> {
        let parsed = Report::parse(EXAMPLE_INPUT)?;
        let result = <Day09 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 114);
        Ok(())
    }

    #[test]
    fn part_two_solves_example() -> DynamicResult<()> {
        let parsed = Report::parse(EXAMPLE_INPUT)?;
        let result = <Day09 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 2);
        Ok(())
    }

    #[test]
    fn extrapolates_negative_and_constant_histories() -> Result<(), Day09Error> {
        assert_eq!(extrapolate_next(&[-4, -8, -12])?, -16);
        assert_eq!(extrapolate_next(&[7])?, 7);
        assert_eq!(extrapolate_next(&[0, 0])?, 0);
        assert!(extrapolate_next(&[]).is_err());
        Ok(())
    }
}
