use std::collections::HashMap;
use std::sync::LazyLock;

use aoc_framework::parsing::InputScanner;
use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use regex::Regex;

use crate::numeric::checked_lcm;

#[solution_runner(
    name = "Day 8: Haunted Wasteland",
    parsed = Network,
    part_one = Day08,
    part_two = Day08
)]
impl super::AdventOfCode2023<8> {}

/*
Input is a map of a desert network. The first line is a sequence of left/right instructions, like
`LLR`. After a blank line, each line names a node and the nodes reached by going left and right
from it: `AAA = (BBB, CCC)`.

Instructions repeat from the start once exhausted.
*/

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Turn {
    Left,
    Right,
}

#[derive(Debug)]
struct Node {
    name: String,
    left: usize,
    right: usize,
}

#[derive(Debug)]
struct Network {
    instructions: Vec<Turn>,
    nodes: Vec<Node>,
    indices: HashMap<String, usize>,
}

#[derive(thiserror::Error, Debug)]
enum ParseNetworkError {
    #[error("expected a line of instructions")]
    MissingInstructions,

    #[error("unknown instruction {0:?}, expected 'L' or 'R'")]
    UnknownInstruction(char),

    #[error("expected a node line formatted as \"AAA = (BBB, CCC)\"")]
    MalformedNode,

    #[error("node {0:?} is defined more than once")]
    DuplicateNode(String),

    #[error("node {from:?} leads to undefined node {to:?}")]
    UndefinedNode { from: String, to: String },
}

static NODE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\w+)\s*=\s*\((\w+),\s*(\w+)\)$").expect("pattern should be valid")
});

impl ParseData for Network {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let mut scanner = InputScanner::new(input);
        let instructions = scanner
            .next_item(|_, line| {
                line.trim()
                    .chars()
                    .map(|instruction| match instruction {
                        'L' => Ok(Turn::Left),
                        'R' => Ok(Turn::Right),
                        _ => Err(ParseNetworkError::UnknownInstruction(instruction)),
                    })
                    .collect::<Result<Vec<_>, _>>()
            })?
            .ok_or(ParseNetworkError::MissingInstructions)?;

        scanner.skip_empty();
        let links = scanner.collect_sequence(|_, line| {
            let captures = NODE_PATTERN
                .captures(line.trim())
                .ok_or(ParseNetworkError::MalformedNode)?;
            Ok::<_, ParseNetworkError>((
                captures[1].to_owned(),
                captures[2].to_owned(),
                captures[3].to_owned(),
            ))
        })?;

        let mut indices = HashMap::with_capacity(links.len());
        for (index, (name, _, _)) in links.iter().enumerate() {
            if indices.insert(name.clone(), index).is_some() {
                return Err(ParseNetworkError::DuplicateNode(name.clone()).into());
            }
        }

        let resolve = |from: &str, to: &str| {
            indices
                .get(to)
                .copied()
                .ok_or_else(|| ParseNetworkError::UndefinedNode {
                    from: from.to_owned(),
                    to: to.to_owned(),
                })
        };
        let nodes = links
            .iter()
            .map(|(name, left, right)| -> Result<_, ParseNetworkError> {
                Ok(Node {
                    name: name.clone(),
                    left: resolve(name, left)?,
                    right: resolve(name, right)?,
                })
            })
            .collect::<Result<_, _>>()?;

        Ok(Self {
            instructions,
            nodes,
            indices,
        })
    }
}

#[derive(thiserror::Error, Debug)]
enum Day08Error {
    #[error("network has no node named {0:?}")]
    MissingNode(&'static str),

    #[error("network has no instructions to follow")]
    NoInstructions,

    #[error("walking from {0:?} never reaches an end node")]
    NeverEnds(String),

    #[error("no start nodes ending in 'A'")]
    NoStarts,

    #[error("least common multiple of step counts overflowed")]
    Overflow,
}

impl Network {
    /// Follow instructions from `start`, beginning at instruction `offset`, until a node matching
    /// `is_end` is reached after at least one step.
    ///
    /// A walk that revisits a (node, instruction) state has entered a loop without ends, so walks
    /// are bounded by the count of such states.
    fn steps_until<F>(
        &self,
        start: usize,
        offset: usize,
        is_end: F,
    ) -> Result<(usize, u64), Day08Error>
    where
        F: Fn(usize) -> bool,
    {
        if self.instructions.is_empty() {
            return Err(Day08Error::NoInstructions);
        }
        let bound = self.instructions.len() * self.nodes.len();
        let turns = self
            .instructions
            .iter()
            .cycle()
            .skip(offset % self.instructions.len())
            .take(bound);

        let mut current = start;
        for (steps, turn) in (1u64..).zip(turns) {
            let node = &self.nodes[current];
            current = match turn {
                Turn::Left => node.left,
                Turn::Right => node.right,
            };
            if is_end(current) {
                return Ok((current, steps));
            }
        }
        Err(Day08Error::NeverEnds(self.nodes[start].name.clone()))
    }

    fn index_of(&self, name: &'static str) -> Result<usize, Day08Error> {
        self.indices
            .get(name)
            .copied()
            .ok_or(Day08Error::MissingNode(name))
    }
}

/*
For part 1, count the steps needed to get from node `AAA` to node `ZZZ`.
*/

struct Day08;

impl Solution<PartOne> for Day08 {
    type Input = Network;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let start = input.index_of("AAA")?;
        let end = input.index_of("ZZZ")?;
        let (_, steps) = input.steps_until(start, 0, |index| index == end)?;
        Ok(steps)
    }
}

/*
For part 2, start at every node whose name ends in `A` at once, and step all of them together.
Count the steps until every current node ends in `Z`.

Each start reaches its first end after some count of steps, and keeps returning to it with that
same period. All walks line up at the least common multiple of those counts.
*/

impl Solution<PartTwo> for Day08 {
    type Input = Network;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let is_end = |index: usize| input.nodes[index].name.ends_with('Z');

        let mut counts = Vec::new();
        for (start, node) in input.nodes.iter().enumerate() {
            if !node.name.ends_with('A') {
                continue;
            }
            let (end, steps) = input.steps_until(start, 0, is_end)?;
            let offset = usize::try_from(steps).map_or(0, |steps| steps % input.instructions.len());
            let (next_end, cycle) = input.steps_until(end, offset, is_end)?;
            log::debug!(
                "{} reaches {} in {steps} steps, then {} after {cycle} more",
                node.name,
                input.nodes[end].name,
                input.nodes[next_end].name
            );
            counts.push(steps);
        }

        if counts.is_empty() {
            return Err(Day08Error::NoStarts.into());
        }
        Ok(checked_lcm(counts).ok_or(Day08Error::Overflow)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT_ONE: &str = r"RL

AAA = (BBB, CCC)
BBB = (DDD, EEE)
CCC = (ZZZ, GGG)
DDD = (DDD, DDD)
EEE = (EEE, EEE)
GGG = (GGG, GGG)
ZZZ = (ZZZ, ZZZ)
";

    const EXAMPLE_INPUT_TWO: &str = r"LLR

AAA = (BBB, BBB)
BBB = (AAA, ZZZ)
ZZZ = (ZZZ, ZZZ)
";

    const EXAMPLE_INPUT_THREE: &str = r"LR

11A = (11B, XXX)
11B = (XXX, 11Z)
11Z = (11B, XXX)
22A = (22B, XXX)
22B = (22C, 22C)
22C = (22Z, 22Z)
22Z = (22B, 22B)
XXX = (XXX, XXX)
";

    #[test]
    fn part_one_solves_examples() -> DynamicResult<()> {
        for (input, expected) in [(EXAMPLE_INPUT_ONE, 2), (EXAMPLE_INPUT_TWO, 6)] {
            let parsed = Network::parse(input)?;
            let result = <Day08 as Solution<PartOne>>::solve(&parsed)?;
            assert_eq!(result, expected);
        }
        Ok(())
    }

    #[test]
    fn part_two_solves_example() -> DynamicResult<()> {
        let parsed = Network::parse(EXAMPLE_INPUT_THREE)?;
        let result = <Day08 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 6);
        Ok(())
    }

    #[test]
    fn unreachable_end_is_an_error() -> DynamicResult<()> {
        let parsed = Network::parse("L\n\nAAA = (AAA, ZZZ)\nZZZ = (ZZZ, ZZZ)\n")?;
        assert!(<Day08 as Solution<PartOne>>::solve(&parsed).is_err());
        Ok(())
    }

    #[test]
    fn parse_rejects_undefined_node() {
        assert!(Network::parse("L\n\nAAA = (BBB, ZZZ)\nZZZ = (ZZZ, ZZZ)\n").is_err());
    }
}
