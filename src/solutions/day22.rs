use std::collections::BTreeSet;

use aoc_framework::parsing::{ParseContextError, parse_input_lines, parse_with_context};
use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use checked_sum::CheckedSum;
use nalgebra::{DMatrix, Point3};
use petgraph::Direction::{Incoming, Outgoing};
use petgraph::graph::{DiGraph, NodeIndex};

#[solution_runner(
    name = "Day 22: Sand Slabs",
    parsed = Snapshot,
    part_one = Day22,
    part_two = Day22
)]
impl super::AdventOfCode2023<22> {}

/*
Input is a snapshot of falling bricks. Each line gives the two end cubes of a brick as `x,y,z`
coordinates separated by `~`, inclusive of both ends: `1,0,1~1,2,1`.

The ground is at z=0, so the lowest a brick can be is z=1. Bricks fall straight down without
rotating until they rest on the ground or on another brick.
*/

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Brick {
    min: Point3<usize>,
    max: Point3<usize>,
}

impl Brick {
    fn height(&self) -> usize {
        self.max.z - self.min.z
    }

    /// The `(x, y)` cells under the brick.
    fn footprint(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (self.min.x..=self.max.x).flat_map(|x| (self.min.y..=self.max.y).map(move |y| (x, y)))
    }
}

#[derive(Debug)]
struct Snapshot(Vec<Brick>);

#[derive(thiserror::Error, Debug)]
enum ParseSnapshotError {
    #[error("expected brick ends separated by '~'")]
    MissingTilde,

    #[error("expected a coordinate of three comma separated components")]
    MalformedCoordinate,

    #[error("brick is below the lowest position z=1")]
    BelowGround,
}

fn parse_coordinate(coordinate: &str) -> DynamicResult<Point3<usize>> {
    let components: Vec<&str> = coordinate.split(',').collect();
    let &[x, y, z] = components.as_slice() else {
        return Err(
            ParseContextError::new(ParseSnapshotError::MalformedCoordinate, coordinate).into(),
        );
    };
    Ok(Point3::new(
        parse_with_context(x.trim())?,
        parse_with_context(y.trim())?,
        parse_with_context(z.trim())?,
    ))
}

impl ParseData for Snapshot {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let bricks = parse_input_lines(input, |_, line| -> DynamicResult<_> {
            let (start, end) = line
                .split_once('~')
                .ok_or(ParseSnapshotError::MissingTilde)?;
            let start = parse_coordinate(start)?;
            let end = parse_coordinate(end)?;

            let brick = Brick {
                min: Point3::new(start.x.min(end.x), start.y.min(end.y), start.z.min(end.z)),
                max: Point3::new(start.x.max(end.x), start.y.max(end.y), start.z.max(end.z)),
            };
            if brick.min.z == 0 {
                return Err(ParseSnapshotError::BelowGround.into());
            }
            Ok(brick)
        })
        .collect::<Result<_, _>>()?;
        Ok(Self(bricks))
    }
}

/// Settled bricks, with an edge from each brick to every brick resting directly on it.
///
/// Node indices follow settling order, so a brick's supporters always have lower indices.
struct SupportGraph(DiGraph<Brick, ()>);

impl Snapshot {
    fn settle(&self) -> SupportGraph {
        let mut falling = self.0.clone();
        falling.sort_by_key(|brick| brick.min.z);

        let (width, depth) = falling.iter().fold((0, 0), |(width, depth), brick| {
            (width.max(brick.max.x + 1), depth.max(brick.max.y + 1))
        });
        // top z of the highest settled brick over each cell, and that brick
        let mut tops: DMatrix<Option<(usize, NodeIndex)>> =
            DMatrix::from_element(width, depth, None);
        let mut graph = DiGraph::with_capacity(falling.len(), falling.len());

        for brick in falling {
            let rest = brick
                .footprint()
                .filter_map(|cell| tops[cell].map(|(top, _)| top))
                .max()
                .unwrap_or(0);
            let mut supporters: Vec<NodeIndex> = brick
                .footprint()
                .filter_map(|cell| tops[cell].filter(|&(top, _)| top == rest))
                .map(|(_, node)| node)
                .collect();
            supporters.sort_unstable();
            supporters.dedup();

            let bottom = rest + 1;
            let settled = Brick {
                min: Point3::new(brick.min.x, brick.min.y, bottom),
                max: Point3::new(brick.max.x, brick.max.y, bottom + brick.height()),
            };
            let node = graph.add_node(settled);
            for supporter in supporters {
                graph.add_edge(supporter, node, ());
            }
            for cell in settled.footprint() {
                tops[cell] = Some((settled.max.z, node));
            }
        }

        log::debug!(
            "settled {} bricks resting on each other {} times",
            graph.node_count(),
            graph.edge_count()
        );
        SupportGraph(graph)
    }
}

impl SupportGraph {
    /// Check if removing `node` leaves every brick it supports resting on another brick.
    fn is_removable(&self, node: NodeIndex) -> bool {
        self.0
            .neighbors_directed(node, Outgoing)
            .all(|above| self.0.neighbors_directed(above, Incoming).count() >= 2)
    }

    /// Count the other bricks that fall once `node` is removed.
    fn chain_reaction(&self, node: NodeIndex) -> usize {
        let mut fallen = vec![false; self.0.node_count()];
        fallen[node.index()] = true;
        let mut pending: BTreeSet<NodeIndex> = self.0.neighbors_directed(node, Outgoing).collect();
        let mut count = 0;

        // lowest first, so every supporter is decided before the bricks it holds up
        while let Some(candidate) = pending.pop_first() {
            if self
                .0
                .neighbors_directed(candidate, Incoming)
                .all(|supporter| fallen[supporter.index()])
            {
                fallen[candidate.index()] = true;
                count += 1;
                pending.extend(self.0.neighbors_directed(candidate, Outgoing));
            }
        }
        count
    }
}

/*
For part 1, find how many bricks could be safely disintegrated on their own, without any other
brick falling.
*/

struct Day22;

impl Solution<PartOne> for Day22 {
    type Input = Snapshot;
    type Output = usize;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let graph = input.settle();
        Ok(graph
            .0
            .node_indices()
            .filter(|&node| graph.is_removable(node))
            .count())
    }
}

/*
For part 2, disintegrating a brick makes every brick resting only on fallen bricks fall too. For
each brick, count the other bricks that would fall, and sum the counts.
*/

#[derive(thiserror::Error, Debug)]
enum Day22Error {
    #[error("sum of fallen bricks overflowed")]
    Overflow,
}

impl Solution<PartTwo> for Day22 {
    type Input = Snapshot;
    type Output = usize;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let graph = input.settle();
        let total = graph
            .0
            .node_indices()
            .map(|node| graph.chain_reaction(node))
            .checked_sum()
            .ok_or(Day22Error::Overflow)?;
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT: &str = r"1,0,1~1,2,1
0,0,2~2,0,2
0,2,3~2,2,3
0,0,4~0,2,4
2,0,5~2,2,5
0,1,6~2,1,6
1,1,8~1,1,9
";

    #[test]
    fn part_one_solves_example() -> DynamicResult<()> {
        let parsed = Snapshot::parse(EXAMPLE_INPUT)?;
        let result = <Day22 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 5);
        Ok(())
    }

    #[test]
    fn part_two_solves_example() -> DynamicResult<()> {
        let parsed = Snapshot::parse(EXAMPLE_INPUT)?;
        let result = <Day22 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 7);
        Ok(())
    }

    #[test]
    fn bricks_settle_onto_tallest_support() -> DynamicResult<()> {
        let parsed = Snapshot::parse("0,0,1~0,0,3\n1,0,1~1,0,1\n0,0,9~1,0,9\n")?;
        let graph = parsed.settle();
        let top = graph.0[NodeIndex::new(2)];
        assert_eq!((top.min.z, top.max.z), (4, 4));
        // only the vertical brick reaches the top brick
        assert_eq!(graph.0.neighbors_directed(NodeIndex::new(2), Incoming).count(), 1);
        Ok(())
    }

    #[test]
    fn ground_level_bricks_are_rejected() {
        assert!(Snapshot::parse("0,0,0~0,0,1\n").is_err());
    }
}
