use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use nalgebra::DMatrix;

use crate::grid::{Direction, Position, parse_grid};

#[solution_runner(
    name = "Day 10: Pipe Maze",
    parsed = PipeMaze,
    part_one = Day10,
    part_two = Day10
)]
impl super::AdventOfCode2023<10> {}

/*
Input is a sketch of a field of pipes. Tiles are:

- `|` and `-`, straight pipes running north-south and east-west.
- `L`, `J`, `7` and `F`, bends connecting north-east, north-west, south-west and south-east.
- `.`, ground with no pipe.
- `S`, the animal's start, sitting on a pipe of unknown shape.

The start's pipe is part of one continuous loop. Its shape follows from the two neighbors that
connect back to it.
*/

const PIPES: [char; 6] = ['|', '-', 'L', 'J', '7', 'F'];

fn connections(tile: char) -> Option<[Direction; 2]> {
    use Direction::{East, North, South, West};
    match tile {
        '|' => Some([North, South]),
        '-' => Some([East, West]),
        'L' => Some([North, East]),
        'J' => Some([North, West]),
        '7' => Some([South, West]),
        'F' => Some([South, East]),
        _ => None,
    }
}

fn connects(tile: char, direction: Direction) -> bool {
    connections(tile).is_some_and(|pair| pair.contains(&direction))
}

#[derive(Debug)]
struct PipeMaze {
    /// Tiles with the start replaced by its inferred pipe.
    tiles: DMatrix<char>,
    start: Position,
}

#[derive(thiserror::Error, Debug)]
enum ParsePipeMazeError {
    #[error("unknown tile {0:?}")]
    UnknownTile(char),

    #[error("sketch has no start")]
    MissingStart,

    #[error("sketch has more than one start")]
    MultipleStarts,

    #[error("expected exactly two pipes to connect to the start, found {0}")]
    AmbiguousStart(usize),
}

impl ParseData for PipeMaze {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let mut tiles = parse_grid(input, |tile| match tile {
            '.' | 'S' => Ok(tile),
            _ if PIPES.contains(&tile) => Ok(tile),
            _ => Err(ParsePipeMazeError::UnknownTile(tile)),
        })?;

        let mut starts = (0..tiles.nrows())
            .flat_map(|row| (0..tiles.ncols()).map(move |col| (row, col)))
            .filter(|&position| tiles[position] == 'S');
        let start = starts.next().ok_or(ParsePipeMazeError::MissingStart)?;
        if starts.next().is_some() {
            return Err(ParsePipeMazeError::MultipleStarts.into());
        }

        let shape = tiles.shape();
        let linked: Vec<Direction> = Direction::ALL
            .into_iter()
            .filter(|direction| {
                direction
                    .step(start, shape)
                    .is_some_and(|neighbor| connects(tiles[neighbor], direction.opposite()))
            })
            .collect();
        let start_pipe = PIPES
            .into_iter()
            .find(|&pipe| linked.len() == 2 && linked.iter().all(|&link| connects(pipe, link)))
            .ok_or(ParsePipeMazeError::AmbiguousStart(linked.len()))?;
        log::debug!("start at {start:?} is a {start_pipe:?} pipe");

        tiles[start] = start_pipe;
        Ok(Self { tiles, start })
    }
}

#[derive(thiserror::Error, Debug)]
enum Day10Error {
    #[error("loop breaks off at {0:?}")]
    BrokenLoop(Position),
}

impl PipeMaze {
    /// Follow the loop from the start until returning to it.
    ///
    /// # Returns
    ///
    /// Every tile of the loop, in order, beginning at the start.
    fn trace_loop(&self) -> Result<Vec<Position>, Day10Error> {
        let shape = self.tiles.shape();
        let [mut heading, _] =
            connections(self.tiles[self.start]).ok_or(Day10Error::BrokenLoop(self.start))?;

        let mut path = Vec::new();
        let mut position = self.start;
        loop {
            path.push(position);
            if path.len() > self.tiles.len() {
                return Err(Day10Error::BrokenLoop(position));
            }

            position = heading
                .step(position, shape)
                .ok_or(Day10Error::BrokenLoop(position))?;
            if position == self.start {
                return Ok(path);
            }

            let [first, second] =
                connections(self.tiles[position]).ok_or(Day10Error::BrokenLoop(position))?;
            let arrived_from = heading.opposite();
            heading = match (first == arrived_from, second == arrived_from) {
                (true, _) => second,
                (_, true) => first,
                _ => return Err(Day10Error::BrokenLoop(position)),
            };
        }
    }
}

/*
For part 1, find the loop tile farthest from the start along the loop, and count the steps to it.
That is half the length of the loop.
*/

struct Day10;

impl Solution<PartOne> for Day10 {
    type Input = PipeMaze;
    type Output = usize;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(input.trace_loop()?.len() / 2)
    }
}

/*
For part 2, count tiles enclosed by the loop. Tiles that aren't part of the loop count even if
they hold pipes. Squeezing between touching pipes is allowed, so a tile is only enclosed if the
loop actually surrounds it.

Scanning a row from the west, each crossing of the loop flips between outside and inside. A
crossing happens on loop tiles with a northward connection (`|`, `L` and `J`): bends like `L--7`
cross once, while `L--J` touches without crossing.
*/

impl Solution<PartTwo> for Day10 {
    type Input = PipeMaze;
    type Output = usize;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let mut on_loop = DMatrix::from_element(input.tiles.nrows(), input.tiles.ncols(), false);
        for position in input.trace_loop()? {
            on_loop[position] = true;
        }

        let mut enclosed = 0;
        for row in 0..input.tiles.nrows() {
            let mut inside = false;
            for col in 0..input.tiles.ncols() {
                if on_loop[(row, col)] {
                    if connects(input.tiles[(row, col)], Direction::North) {
                        inside = !inside;
                    }
                } else if inside {
                    enclosed += 1;
                }
            }
        }
        Ok(enclosed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT_ONE: &str = r"-L|F7
7S-7|
L|7||
-L-J|
L|-JF
";

    const EXAMPLE_INPUT_TWO: &str = r"7-F7-
.FJ|7
SJLL7
|F--J
LJ.LJ
";

    const EXAMPLE_INPUT_THREE: &str = r"...........
.S-------7.
.|F-----7|.
.||.....||.
.||.....||.
.|L-7.F-J|.
.|..|.|..|.
.L--J.L--J.
...........
";

    const EXAMPLE_INPUT_FOUR: &str = r".F----7F7F7F7F-7....
.|F--7||||||||FJ....
.||.FJ||||||||L7....
FJL7L7LJLJ||LJ.L-7..
L--J.L7...LJS7F-7L7.
....F-J..F7FJ|L7L7L7
....L7.F7||L7|.L7L7|
.....|FJLJ|FJ|F7|.LJ
....FJL-7.||.||||...
....L---J.LJ.LJLJ...
";

    const EXAMPLE_INPUT_FIVE: &str = r"FF7FSF7F7F7F7F7F---7
L|LJ||||||||||||F--J
FL-7LJLJ||||||LJL-77
F--JF--7||LJLJ7F7FJ-
L---JF-JLJ.||-FJLJJ7
|F|F-JF---7F7-L7L|7|
|FFJF7L7F-JF7|JL---7
7-L-JL7||F7|L7F-7F7|
L.L7LFJ|||||FJL7||LJ
L7JLJL-JLJLJL--JLJ.L
";

    #[test]
    fn part_one_solves_examples() -> DynamicResult<()> {
        for (input, expected) in [(EXAMPLE_INPUT_ONE, 4), (EXAMPLE_INPUT_TWO, 8)] {
            let parsed = PipeMaze::parse(input)?;
            let result = <Day10 as Solution<PartOne>>::solve(&parsed)?;
            assert_eq!(result, expected);
        }
        Ok(())
    }

    #[test]
    fn part_two_solves_examples() -> DynamicResult<()> {
        for (input, expected) in [
            (EXAMPLE_INPUT_THREE, 4),
            (EXAMPLE_INPUT_FOUR, 8),
            (EXAMPLE_INPUT_FIVE, 10),
        ] {
            let parsed = PipeMaze::parse(input)?;
            let result = <Day10 as Solution<PartTwo>>::solve(&parsed)?;
            assert_eq!(result, expected);
        }
        Ok(())
    }

    #[test]
    fn start_pipe_is_inferred() -> DynamicResult<()> {
        let parsed = PipeMaze::parse(EXAMPLE_INPUT_ONE)?;
        assert_eq!(parsed.start, (1, 1));
        assert_eq!(parsed.tiles[(1, 1)], 'F');
        Ok(())
    }

    #[test]
    fn parse_rejects_missing_start() {
        assert!(PipeMaze::parse("F7\nLJ\n").is_err());
    }
}
