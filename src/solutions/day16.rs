use std::collections::VecDeque;

use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use nalgebra::DMatrix;

use crate::grid::{Direction, Position, parse_grid};

#[solution_runner(
    name = "Day 16: The Floor Will Be Lava",
    parsed = Contraption,
    part_one = Day16,
    part_two = Day16
)]
impl super::AdventOfCode2023<16> {}

/*
Input is a contraption of mirrors and splitters in a grid: `.` empty space, `/` and `\` mirrors,
and `|` and `-` splitters.

A beam of light travels in straight lines through empty space. Mirrors reflect it by 90 degrees.
A splitter entered on its pointy end lets the beam pass as if empty; entered on its flat side, it
splits the beam into two beams going each way the splitter points.

A tile is energized when at least one beam passes through it.
*/

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tile {
    Empty,
    /// A `/` mirror.
    MirrorForward,
    /// A `\` mirror.
    MirrorBackward,
    /// A `|` splitter.
    SplitterVertical,
    /// A `-` splitter.
    SplitterHorizontal,
}

impl Tile {
    /// The directions a beam leaves this tile in when moving in `heading`.
    fn outgoing(self, heading: Direction) -> (Direction, Option<Direction>) {
        use Direction::{East, North, South, West};
        match (self, heading) {
            (Self::MirrorForward, East) => (North, None),
            (Self::MirrorForward, North) => (East, None),
            (Self::MirrorForward, West) => (South, None),
            (Self::MirrorForward, South) => (West, None),
            (Self::MirrorBackward, East) => (South, None),
            (Self::MirrorBackward, South) => (East, None),
            (Self::MirrorBackward, West) => (North, None),
            (Self::MirrorBackward, North) => (West, None),
            (Self::SplitterVertical, East | West) => (North, Some(South)),
            (Self::SplitterHorizontal, North | South) => (East, Some(West)),
            _ => (heading, None),
        }
    }
}

#[derive(Debug)]
struct Contraption(DMatrix<Tile>);

#[derive(thiserror::Error, Debug)]
enum ParseContraptionError {
    #[error("unknown contraption tile {0:?}")]
    UnknownTile(char),
}

impl ParseData for Contraption {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let tiles = parse_grid(input, |tile| match tile {
            '.' => Ok(Tile::Empty),
            '/' => Ok(Tile::MirrorForward),
            '\\' => Ok(Tile::MirrorBackward),
            '|' => Ok(Tile::SplitterVertical),
            '-' => Ok(Tile::SplitterHorizontal),
            _ => Err(ParseContraptionError::UnknownTile(tile)),
        })?;
        Ok(Self(tiles))
    }
}

fn direction_bit(direction: Direction) -> u8 {
    match direction {
        Direction::North => 1,
        Direction::East => 2,
        Direction::South => 4,
        Direction::West => 8,
    }
}

impl Contraption {
    /// Count energized tiles for a beam entering `start` moving in `heading`.
    ///
    /// Beams that revisit a tile in a direction seen before would only repeat known paths, so
    /// visited headings per tile bound the search.
    fn energized(&self, start: Position, heading: Direction) -> usize {
        let shape = self.0.shape();
        let mut seen = DMatrix::<u8>::zeros(shape.0, shape.1);
        let mut beams = VecDeque::from([(start, heading)]);

        while let Some((position, heading)) = beams.pop_front() {
            let bit = direction_bit(heading);
            if seen[position] & bit != 0 {
                continue;
            }
            seen[position] |= bit;

            let (first, second) = self.0[position].outgoing(heading);
            for outgoing in std::iter::once(first).chain(second) {
                if let Some(next) = outgoing.step(position, shape) {
                    beams.push_back((next, outgoing));
                }
            }
        }

        seen.iter().filter(|&&headings| headings != 0).count()
    }
}

/*
For part 1, the beam enters the top-left tile heading east. Count the energized tiles.
*/

struct Day16;

impl Solution<PartOne> for Day16 {
    type Input = Contraption;
    type Output = usize;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(input.energized((0, 0), Direction::East))
    }
}

/*
For part 2, the beam may enter from any edge tile, heading away from that edge. Corner tiles can be
entered from either of their edges. Find the largest count of energized tiles.
*/

impl Solution<PartTwo> for Day16 {
    type Input = Contraption;
    type Output = usize;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let (rows, cols) = input.0.shape();
        let from_sides = (0..rows).flat_map(|row| {
            [
                ((row, 0), Direction::East),
                ((row, cols - 1), Direction::West),
            ]
        });
        let from_ends = (0..cols).flat_map(|col| {
            [
                ((0, col), Direction::South),
                ((rows - 1, col), Direction::North),
            ]
        });

        let best = from_sides
            .chain(from_ends)
            .map(|(start, heading)| input.energized(start, heading))
            .max()
            .unwrap_or(0);
        Ok(best)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT: &str = r".|...\....
|.-.\.....
.....|-...
........|.
..........
.........\
..../.\\..
.-.-/..|..
.|....-|.\
..//.|....
";

    #[test]
    fn part_one_solves_example() -> DynamicResult<()> {
        let parsed = Contraption::parse(EXAMPLE_INPUT)?;
        let result = <Day16 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 46);
        Ok(())
    }

    #[test]
    fn part_two_solves_example() -> DynamicResult<()> {
        let parsed = Contraption::parse(EXAMPLE_INPUT)?;
        let result = <Day16 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 51);
        Ok(())
    }

    #[test]
    fn start_tile_deflects_first() -> DynamicResult<()> {
        let parsed = Contraption::parse("\\..\n...\n")?;
        // the mirror at the start turns the beam south immediately
        assert_eq!(parsed.energized((0, 0), Direction::East), 2);
        Ok(())
    }
}
