use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use nalgebra::DMatrix;

use crate::grid::parse_grid;

#[solution_runner(
    name = "Day 11: Cosmic Expansion",
    parsed = Image,
    part_one = Day11,
    part_two = Day11
)]
impl super::AdventOfCode2023<11> {}

/*
Input is an image of the sky: a grid of `.` empty space and `#` galaxies.

Light from the galaxies took so long to arrive that the universe expanded meanwhile. Every row and
every column holding no galaxy is actually wider than it appears.

Distances step between cells without diagonals, so the distance between galaxies is the sum of
their row and column differences.
*/

#[derive(Debug)]
struct Image(DMatrix<bool>);

#[derive(thiserror::Error, Debug)]
enum ParseImageError {
    #[error("unknown image pixel {0:?}")]
    UnknownPixel(char),
}

impl ParseData for Image {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let pixels = parse_grid(input, |pixel| match pixel {
            '#' => Ok(true),
            '.' => Ok(false),
            _ => Err(ParseImageError::UnknownPixel(pixel)),
        })?;
        Ok(Self(pixels))
    }
}

#[derive(thiserror::Error, Debug)]
enum Day11Error {
    #[error("distances overflowed")]
    Overflow,
}

/// Map each line (row or column) index to its coordinate after expansion.
///
/// Lines without a galaxy grow to `factor` lines.
fn expanded_coordinates<I>(has_galaxy: I, factor: u64) -> Option<Vec<u64>>
where
    I: Iterator<Item = bool>,
{
    let mut coordinate: u64 = 0;
    has_galaxy
        .map(|occupied| {
            let current = coordinate;
            coordinate = coordinate.checked_add(if occupied { 1 } else { factor })?;
            Some(current)
        })
        .collect()
}

/// Sum the differences between every pair of values.
///
/// Over sorted values, each value is larger than every value before it, so it contributes its
/// value times its index, minus the sum of the values before it.
fn sum_of_pairwise_differences(mut values: Vec<u64>) -> Option<u64> {
    values.sort_unstable();
    let mut total: u64 = 0;
    let mut preceding: u64 = 0;
    for (index, value) in (0u64..).zip(values) {
        let contribution = value.checked_mul(index)?.checked_sub(preceding)?;
        total = total.checked_add(contribution)?;
        preceding = preceding.checked_add(value)?;
    }
    Some(total)
}

impl Image {
    /// Sum the distances between every pair of galaxies, with each empty line grown to `factor`
    /// lines.
    fn sum_of_distances(&self, factor: u64) -> Result<u64, Day11Error> {
        let pixels = &self.0;
        let row_coordinates = expanded_coordinates(
            pixels.row_iter().map(|row| row.iter().any(|&pixel| pixel)),
            factor,
        )
        .ok_or(Day11Error::Overflow)?;
        let col_coordinates = expanded_coordinates(
            pixels.column_iter().map(|col| col.iter().any(|&pixel| pixel)),
            factor,
        )
        .ok_or(Day11Error::Overflow)?;

        let (mut rows, mut cols) = (Vec::new(), Vec::new());
        for row in 0..pixels.nrows() {
            for col in 0..pixels.ncols() {
                if pixels[(row, col)] {
                    rows.push(row_coordinates[row]);
                    cols.push(col_coordinates[col]);
                }
            }
        }
        log::debug!("found {} galaxies", rows.len());

        sum_of_pairwise_differences(rows)
            .zip(sum_of_pairwise_differences(cols))
            .and_then(|(rows, cols)| rows.checked_add(cols))
            .ok_or(Day11Error::Overflow)
    }
}

/*
For part 1, each empty row and column is twice as big. Sum the distances between every pair of
galaxies.
*/

struct Day11;

impl Solution<PartOne> for Day11 {
    type Input = Image;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(input.sum_of_distances(2)?)
    }
}

/*
For part 2, each empty row and column is instead a million times bigger.
*/

impl Solution<PartTwo> for Day11 {
    type Input = Image;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(input.sum_of_distances(1_000_000)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT: &str = r"...#......
.......#..
#.........
..........
......#...
.#........
.........#
..........
.......#..
#...#.....
";

    #[test]
    fn part_one_solves_example() -> DynamicResult<()> {
        let parsed = Image::parse(EXAMPLE_INPUT)?;
        let result = <Day11 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 374);
        Ok(())
    }

    #[test]
    fn larger_expansions_solve_example() -> DynamicResult<()> {
        let parsed = Image::parse(EXAMPLE_INPUT)?;
        assert_eq!(parsed.sum_of_distances(10)?, 1030);
        assert_eq!(parsed.sum_of_distances(100)?, 8410);
        Ok(())
    }

    #[test]
    fn pairwise_differences() {
        assert_eq!(sum_of_pairwise_differences(vec![5, 1, 3]), Some(8));
        assert_eq!(sum_of_pairwise_differences(Vec::new()), Some(0));
    }
}
