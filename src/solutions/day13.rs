use aoc_framework::parsing::InputScanner;
use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use checked_sum::CheckedSum;
use nalgebra::DMatrix;

use crate::grid::grid_from_rows;

#[solution_runner(
    name = "Day 13: Point of Incidence",
    parsed = Patterns,
    part_one = Day13,
    part_two = Day13
)]
impl super::AdventOfCode2023<13> {}

/*
Input is a series of patterns separated by blank lines. Each pattern is a grid of `.` ash and `#`
rocks.

Each pattern has a line of reflection, either vertical between two columns or horizontal between
two rows. Rows or columns beyond an edge of the pattern don't need to be reflected.

Summarize a pattern by the count of columns left of a vertical line, or 100 times the count of
rows above a horizontal line.
*/

/// Rocks of a pattern are `true`.
#[derive(Debug)]
struct Patterns(Vec<DMatrix<bool>>);

#[derive(thiserror::Error, Debug)]
enum ParsePatternsError {
    #[error("unknown pattern cell {0:?}")]
    UnknownCell(char),
}

impl ParseData for Patterns {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let mut scanner = InputScanner::new(input);
        let mut patterns = Vec::new();
        while !scanner.is_exhausted() {
            let rows = scanner.collect_sequence(|_, line| {
                line.chars()
                    .map(|cell| match cell {
                        '#' => Ok(true),
                        '.' => Ok(false),
                        _ => Err(ParsePatternsError::UnknownCell(cell)),
                    })
                    .collect::<Result<Vec<_>, _>>()
            })?;
            patterns.push(grid_from_rows(rows)?);
        }
        Ok(Self(patterns))
    }
}

/// Find a reflection between lines (rows or columns) with exactly `smudges` cells left
/// mismatched.
///
/// # Arguments
/// - `len` - The count of lines.
/// - `smudges` - The count of mismatched cell pairs the reflection must have.
/// - `mismatches` - A closure counting the cells that differ between two lines.
///
/// # Returns
///
/// The count of lines before the reflection, or `None` if no reflection fits.
fn find_reflection<F>(len: usize, smudges: usize, mismatches: F) -> Option<usize>
where
    F: Fn(usize, usize) -> usize,
{
    (1..len).find(|&axis| {
        let mut found = 0;
        for offset in 0..axis.min(len - axis) {
            found += mismatches(axis - 1 - offset, axis + offset);
            if found > smudges {
                return false;
            }
        }
        found == smudges
    })
}

#[derive(thiserror::Error, Debug)]
enum Day13Error {
    #[error("pattern {0} has no line of reflection")]
    NoReflection(usize),

    #[error("summary overflowed")]
    Overflow,
}

fn summarize(pattern: &DMatrix<bool>, smudges: usize) -> Option<usize> {
    let vertical = find_reflection(pattern.ncols(), smudges, |left, right| {
        pattern
            .column(left)
            .iter()
            .zip(pattern.column(right).iter())
            .filter(|(a, b)| a != b)
            .count()
    });
    if let Some(columns) = vertical {
        return Some(columns);
    }

    find_reflection(pattern.nrows(), smudges, |above, below| {
        pattern
            .row(above)
            .iter()
            .zip(pattern.row(below).iter())
            .filter(|(a, b)| a != b)
            .count()
    })
    .map(|rows| rows * 100)
}

fn sum_summaries(patterns: &Patterns, smudges: usize) -> Result<usize, Day13Error> {
    let summaries = patterns
        .0
        .iter()
        .enumerate()
        .map(|(index, pattern)| {
            summarize(pattern, smudges).ok_or(Day13Error::NoReflection(index + 1))
        })
        .collect::<Result<Vec<_>, _>>()?;
    summaries
        .into_iter()
        .checked_sum()
        .ok_or(Day13Error::Overflow)
}

/*
For part 1, find each pattern's line of perfect reflection and sum the summaries.
*/

struct Day13;

impl Solution<PartOne> for Day13 {
    type Input = Patterns;
    type Output = usize;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(sum_summaries(input, 0)?)
    }
}

/*
For part 2, every pattern has exactly one smudge: one cell that is the opposite of what it should
be. Fixing it makes a different line of reflection valid, which is one with exactly one mismatched
pair of cells. Sum the summaries of those lines.
*/

impl Solution<PartTwo> for Day13 {
    type Input = Patterns;
    type Output = usize;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(sum_summaries(input, 1)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT: &str = r"#.##..##.
..#.##.#.
##......#
##......#
..#.##.#.
..##..##.
#.#.##.#.

#...##..#
#....#..#
..##..###
#####.##.
#####.##.
..##..###
#....#..#
";

    #[test]
    fn part_one_solves_example() -> DynamicResult<()> {
        let parsed = Patterns::parse(EXAMPLE_INPUT)?;
        let result = <Day13 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 405);
        Ok(())
    }

    #[test]
    fn part_two_solves_example() -> DynamicResult<()> {
        let parsed = Patterns::parse(EXAMPLE_INPUT)?;
        let result = <Day13 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 400);
        Ok(())
    }

    #[test]
    fn pattern_without_reflection_is_an_error() -> DynamicResult<()> {
        let parsed = Patterns::parse("#.\n..\n")?;
        assert!(<Day13 as Solution<PartOne>>::solve(&parsed).is_err());
        Ok(())
    }
}
