use std::collections::HashMap;

use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use checked_sum::CheckedSum;
use nalgebra::DMatrix;

use crate::grid::{Direction, Position, parse_grid};

#[solution_runner(
    name = "Day 14: Parabolic Reflector Dish",
    parsed = Platform,
    part_one = Day14,
    part_two = Day14
)]
impl super::AdventOfCode2023<14> {}

/*
Input is a platform of rocks. `O` is a round rock, `#` a cube-shaped rock, and `.` empty space.

Tilting the platform rolls every round rock as far as it can go in that direction, until it stops
against the edge, a cube rock, or another round rock. Cube rocks never move.

Each round rock puts load on the north support beams equal to its row's distance from the south
edge, counting the southmost row as 1.
*/

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Rock {
    Round,
    Cube,
    Empty,
}

#[derive(Debug, Clone)]
struct Platform(DMatrix<Rock>);

#[derive(thiserror::Error, Debug)]
enum ParsePlatformError {
    #[error("unknown platform cell {0:?}")]
    UnknownCell(char),
}

impl ParseData for Platform {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let rocks = parse_grid(input, |cell| match cell {
            'O' => Ok(Rock::Round),
            '#' => Ok(Rock::Cube),
            '.' => Ok(Rock::Empty),
            _ => Err(ParsePlatformError::UnknownCell(cell)),
        })?;
        Ok(Self(rocks))
    }
}

#[derive(thiserror::Error, Debug)]
enum Day14Error {
    #[error("load overflowed")]
    Overflow,
}

impl Platform {
    /// The position of the `index`th cell along `lane`, counting from the edge rocks roll toward.
    fn lane_position(&self, direction: Direction, lane: usize, index: usize) -> Position {
        let (rows, cols) = self.0.shape();
        match direction {
            Direction::North => (index, lane),
            Direction::South => (rows - 1 - index, lane),
            Direction::West => (lane, index),
            Direction::East => (lane, cols - 1 - index),
        }
    }

    fn tilt(&mut self, direction: Direction) {
        let (rows, cols) = self.0.shape();
        let (lanes, len) = match direction {
            Direction::North | Direction::South => (cols, rows),
            Direction::East | Direction::West => (rows, cols),
        };

        for lane in 0..lanes {
            // the nearest cell a rolling rock would stop in
            let mut free = 0;
            for index in 0..len {
                let position = self.lane_position(direction, lane, index);
                match self.0[position] {
                    Rock::Cube => free = index + 1,
                    Rock::Round => {
                        self.0[position] = Rock::Empty;
                        let stop = self.lane_position(direction, lane, free);
                        self.0[stop] = Rock::Round;
                        free += 1;
                    }
                    Rock::Empty => {}
                }
            }
        }
    }

    fn spin_cycle(&mut self) {
        for direction in [
            Direction::North,
            Direction::West,
            Direction::South,
            Direction::East,
        ] {
            self.tilt(direction);
        }
    }

    fn north_load(&self) -> Option<usize> {
        let rows = self.0.nrows();
        self.0
            .row_iter()
            .enumerate()
            .map(|(row, cells)| {
                let round = cells.iter().filter(|&&rock| rock == Rock::Round).count();
                round.checked_mul(rows - row)
            })
            .collect::<Option<Vec<_>>>()?
            .into_iter()
            .checked_sum()
    }
}

/*
For part 1, tilt the platform north and find the total load on the north support beams.
*/

struct Day14;

impl Solution<PartOne> for Day14 {
    type Input = Platform;
    type Output = usize;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let mut platform = input.clone();
        platform.tilt(Direction::North);
        Ok(platform.north_load().ok_or(Day14Error::Overflow)?)
    }
}

/*
For part 2, a spin cycle tilts the platform north, then west, then south, then east. Find the total
load on the north support beams after 1,000,000,000 cycles.

Rocks settle into a repeating arrangement after some cycles. Once an arrangement repeats, the
arrangement after any later count of cycles follows from the period.
*/

const SPIN_CYCLES: usize = 1_000_000_000;

fn load_after_cycles(platform: &Platform, cycles: usize) -> Option<usize> {
    let mut platform = platform.clone();
    let mut seen: HashMap<Vec<Rock>, usize> = HashMap::new();
    let mut loads = Vec::new();

    for cycle in 0..cycles {
        if let Some(&first) = seen.get(platform.0.as_slice()) {
            let period = cycle - first;
            log::debug!("arrangement after {cycle} cycles repeats cycle {first}");
            return loads.get(first + (cycles - first) % period).copied();
        }
        seen.insert(platform.0.as_slice().to_vec(), cycle);
        loads.push(platform.north_load()?);
        platform.spin_cycle();
    }
    platform.north_load()
}

impl Solution<PartTwo> for Day14 {
    type Input = Platform;
    type Output = usize;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(load_after_cycles(input, SPIN_CYCLES).ok_or(Day14Error::Overflow)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT: &str = r"O....#....
O.OO#....#
.....##...
OO.#O....O
.O.....O#.
O.#..O.#.#
..O..#O..O
.......O..
#....###..
#OO..#....
";

    #[test]
    fn part_one_solves_example() -> DynamicResult<()> {
        let parsed = Platform::parse(EXAMPLE_INPUT)?;
        let result = <Day14 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 136);
        Ok(())
    }

    #[test]
    fn part_two_solves_example() -> DynamicResult<()> {
        let parsed = Platform::parse(EXAMPLE_INPUT)?;
        let result = <Day14 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 64);
        Ok(())
    }

    #[test]
    fn spin_cycle_matches_example() -> DynamicResult<()> {
        let mut platform = Platform::parse(EXAMPLE_INPUT)?;
        platform.spin_cycle();
        let expected = Platform::parse(
            r".....#....
....#...O#
...OO##...
.OO#......
.....OOO#.
.O#...O#.#
....O#....
......OOOO
#...O###..
#..OO#....
",
        )?;
        assert_eq!(platform.0, expected.0);
        Ok(())
    }

    #[test]
    fn few_cycles_skip_period_detection() -> DynamicResult<()> {
        let parsed = Platform::parse(EXAMPLE_INPUT)?;
        let mut platform = parsed.clone();
        platform.spin_cycle();
        platform.spin_cycle();
        assert_eq!(load_after_cycles(&parsed, 2), platform.north_load());
        Ok(())
    }
}
