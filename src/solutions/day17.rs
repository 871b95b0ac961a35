use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use nalgebra::DMatrix;

use crate::grid::{Direction, Position, parse_grid};

#[solution_runner(
    name = "Day 17: Clumsy Crucible",
    parsed = City,
    part_one = Day17,
    part_two = Day17
)]
impl super::AdventOfCode2023<17> {}

/*
Input is a map of city blocks, each a digit giving the heat lost when a crucible moves into it.

A crucible starts at the top-left block and must reach the bottom-right block. It moves one block
at a time, may turn left or right, but cannot reverse. The heat loss of the start block isn't
incurred since the crucible starts there.
*/

#[derive(Debug)]
struct City(DMatrix<u8>);

#[derive(thiserror::Error, Debug)]
enum ParseCityError {
    #[error("expected a heat loss digit, found {0:?}")]
    InvalidDigit(char),
}

impl ParseData for City {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let blocks = parse_grid(input, |block| {
            block
                .to_digit(10)
                .and_then(|digit| u8::try_from(digit).ok())
                .ok_or(ParseCityError::InvalidDigit(block))
        })?;
        Ok(Self(blocks))
    }
}

/// Limits on blocks moved in a straight line.
#[derive(Debug, Clone, Copy)]
struct Crucible {
    /// Blocks to move in a line before turning or stopping.
    min_run: usize,
    /// Blocks that can be moved in a line before a turn is forced.
    max_run: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct State {
    position: Position,
    heading: Direction,
    /// Blocks moved in a line so far, including the move into `position`.
    run: usize,
}

#[derive(thiserror::Error, Debug)]
enum Day17Error {
    #[error("no path to the bottom-right block satisfies the crucible's limits")]
    NoPath,
}

impl City {
    /// Find the least heat loss of a path from the top-left to the bottom-right block.
    ///
    /// Runs Dijkstra's algorithm over states of position, heading and run length, since those
    /// decide which moves remain possible.
    fn least_heat_loss(&self, crucible: Crucible) -> Result<u32, Day17Error> {
        fn push(
            best: &mut HashMap<State, u32>,
            frontier: &mut BinaryHeap<Reverse<(u32, State)>>,
            state: State,
            loss: u32,
        ) {
            if best.get(&state).is_none_or(|&known| loss < known) {
                best.insert(state, loss);
                frontier.push(Reverse((loss, state)));
            }
        }

        let shape = self.0.shape();
        let target = (shape.0 - 1, shape.1 - 1);
        if target == (0, 0) {
            return Ok(0);
        }

        let mut best = HashMap::new();
        let mut frontier = BinaryHeap::new();

        // the start may be left in any direction
        for heading in Direction::ALL {
            if let Some(position) = heading.step((0, 0), shape) {
                let state = State {
                    position,
                    heading,
                    run: 1,
                };
                push(&mut best, &mut frontier, state, u32::from(self.0[position]));
            }
        }

        let mut expanded = 0usize;
        while let Some(Reverse((loss, state))) = frontier.pop() {
            if best.get(&state).is_some_and(|&known| loss > known) {
                continue;
            }
            if state.position == target && state.run >= crucible.min_run {
                log::debug!("expanded {expanded} states");
                return Ok(loss);
            }
            expanded += 1;

            let mut headings = Vec::with_capacity(3);
            if state.run < crucible.max_run {
                headings.push((state.heading, state.run + 1));
            }
            if state.run >= crucible.min_run {
                headings.push((state.heading.to_left(), 1));
                headings.push((state.heading.to_right(), 1));
            }

            for (heading, run) in headings {
                if let Some(position) = heading.step(state.position, shape) {
                    let next = State {
                        position,
                        heading,
                        run,
                    };
                    push(&mut best, &mut frontier, next, loss + u32::from(self.0[position]));
                }
            }
        }
        Err(Day17Error::NoPath)
    }
}

/*
For part 1, a crucible can move at most three blocks in a line. Find the least heat loss possible.
*/

struct Day17;

impl Solution<PartOne> for Day17 {
    type Input = City;
    type Output = u32;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(input.least_heat_loss(Crucible {
            min_run: 1,
            max_run: 3,
        })?)
    }
}

/*
For part 2, ultra crucibles must move at least four blocks in a line before turning, and before
stopping at the end. They can move at most ten blocks in a line.
*/

impl Solution<PartTwo> for Day17 {
    type Input = City;
    type Output = u32;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(input.least_heat_loss(Crucible {
            min_run: 4,
            max_run: 10,
        })?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT_ONE: &str = r"2413432311323
3215453535623
3255245654254
3446585845452
4546657867536
1438598798454
4457876987766
3637877979653
4654967986887
4564679986453
1224686865563
2546548887735
4322674655533
";

    const EXAMPLE_INPUT_TWO: &str = r"111111111111
999999999991
999999999991
999999999991
999999999991
";

    #[test]
    fn part_one_solves_example() -> DynamicResult<()> {
        let parsed = City::parse(EXAMPLE_INPUT_ONE)?;
        let result = <Day17 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 102);
        Ok(())
    }

    #[test]
    fn part_two_solves_examples() -> DynamicResult<()> {
        for (input, expected) in [(EXAMPLE_INPUT_ONE, 94), (EXAMPLE_INPUT_TWO, 71)] {
            let parsed = City::parse(input)?;
            let result = <Day17 as Solution<PartTwo>>::solve(&parsed)?;
            assert_eq!(result, expected);
        }
        Ok(())
    }

    #[test]
    fn single_block_city_loses_no_heat() -> DynamicResult<()> {
        let parsed = City::parse("7\n")?;
        assert_eq!(<Day17 as Solution<PartOne>>::solve(&parsed)?, 0);
        assert_eq!(<Day17 as Solution<PartTwo>>::solve(&parsed)?, 0);
        Ok(())
    }

    #[test]
    fn blank_city_is_rejected() {
        assert!(City::parse("\n").is_err());
    }

    #[test]
    fn start_can_head_south_first() -> DynamicResult<()> {
        let parsed = City::parse("19999\n19999\n19999\n19999\n11111\n")?;
        let result = <Day17 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 8);
        Ok(())
    }
}
