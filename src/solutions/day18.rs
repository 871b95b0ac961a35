use aoc_framework::parsing::{parse_input_lines, parse_with_context};
use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use nalgebra::{Point2, Vector2};

use crate::grid::Direction;

#[solution_runner(
    name = "Day 18: Lavaduct Lagoon",
    parsed = DigPlan,
    part_one = Day18,
    part_two = Day18
)]
impl super::AdventOfCode2023<18> {}

/*
Input is a dig plan. Each line has a direction (`U`, `D`, `L` or `R`), a count of meters to dig
in that direction, and a color code in parentheses: `R 6 (#70c710)`.

Digging follows the plan from a starting cube, leaving a trench one meter wide that loops back to
the start. The interior of the loop is then dug out too.
*/

#[derive(Debug, Clone, Copy)]
struct Instruction {
    direction: Direction,
    meters: u64,
}

#[derive(Debug)]
struct PlanLine {
    instruction: Instruction,
    /// The instruction hidden in the color code.
    decoded: Instruction,
}

#[derive(Debug)]
struct DigPlan(Vec<PlanLine>);

#[derive(thiserror::Error, Debug)]
enum ParseDigPlanError {
    #[error("expected a line formatted as \"<direction> <meters> (#<hex code>)\"")]
    MalformedLine,

    #[error("unknown direction {0:?}")]
    UnknownDirection(String),

    #[error("expected a color code of six hex digits, found {0:?}")]
    MalformedColor(String),

    #[error("unknown direction digit {0:?} in color code")]
    UnknownDirectionDigit(char),
}

/// Decode a `#rrggbb` code: five hex digits of meters, then a digit for the direction.
fn decode_color(code: &str) -> Result<Instruction, ParseDigPlanError> {
    let malformed = || ParseDigPlanError::MalformedColor(code.to_owned());
    let hex = code.strip_prefix('#').ok_or_else(malformed)?;
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(malformed());
    }

    let (meters_hex, direction_hex) = hex.split_at(5);
    let meters = u64::from_str_radix(meters_hex, 16).map_err(|_| malformed())?;
    let direction = match direction_hex {
        "0" => Direction::East,
        "1" => Direction::South,
        "2" => Direction::West,
        "3" => Direction::North,
        _ => {
            let digit = direction_hex.chars().next().unwrap_or_default();
            return Err(ParseDigPlanError::UnknownDirectionDigit(digit));
        }
    };
    Ok(Instruction { direction, meters })
}

impl ParseData for DigPlan {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let lines = parse_input_lines(input, |_, line| -> DynamicResult<_> {
            let mut parts = line.split_whitespace();
            let (Some(direction_str), Some(meters_str), Some(color), None) =
                (parts.next(), parts.next(), parts.next(), parts.next())
            else {
                return Err(ParseDigPlanError::MalformedLine.into());
            };

            let direction = match direction_str {
                "U" => Direction::North,
                "D" => Direction::South,
                "L" => Direction::West,
                "R" => Direction::East,
                _ => {
                    return Err(
                        ParseDigPlanError::UnknownDirection(direction_str.to_owned()).into(),
                    );
                }
            };
            let code = color
                .strip_prefix('(')
                .and_then(|code| code.strip_suffix(')'))
                .ok_or(ParseDigPlanError::MalformedLine)?;

            Ok(PlanLine {
                instruction: Instruction {
                    direction,
                    meters: parse_with_context(meters_str)?,
                },
                decoded: decode_color(code)?,
            })
        })
        .collect::<Result<_, _>>()?;
        Ok(Self(lines))
    }
}

#[derive(thiserror::Error, Debug)]
enum Day18Error {
    #[error("lagoon volume overflowed")]
    Overflow,

    #[error("dig plan doesn't return to its start")]
    OpenTrench,
}

fn unit_vector(direction: Direction) -> Vector2<i128> {
    match direction {
        Direction::North => Vector2::new(0, -1),
        Direction::East => Vector2::new(1, 0),
        Direction::South => Vector2::new(0, 1),
        Direction::West => Vector2::new(-1, 0),
    }
}

/// Count the cubes dug out by following `instructions`, trench included.
///
/// The shoelace formula gives the area enclosed by the trench's center line. Pick's theorem turns
/// that into the count of interior cubes, and the trench cubes are added back on top.
fn lagoon_volume<I>(instructions: I) -> Result<u64, Day18Error>
where
    I: Iterator<Item = Instruction>,
{
    let mut corner = Point2::origin();
    let mut twice_area: i128 = 0;
    let mut perimeter: i128 = 0;

    for Instruction { direction, meters } in instructions {
        let meters = i128::from(meters);
        let next = corner + unit_vector(direction) * meters;
        twice_area += corner.x * next.y - next.x * corner.y;
        perimeter += meters;
        corner = next;
    }
    if corner != Point2::origin() {
        return Err(Day18Error::OpenTrench);
    }

    let interior = (twice_area.abs() - perimeter) / 2 + 1;
    u64::try_from(interior + perimeter).map_err(|_| Day18Error::Overflow)
}

/*
For part 1, follow the directions and meters of the plan. Find how many cubic meters of lava the
lagoon can hold.
*/

struct Day18;

impl Solution<PartOne> for Day18 {
    type Input = DigPlan;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(lagoon_volume(input.0.iter().map(|line| line.instruction))?)
    }
}

/*
For part 2, the color codes were the real instructions. The first five hex digits give the meters
and the last digit gives the direction: `0` right, `1` down, `2` left, `3` up.
*/

impl Solution<PartTwo> for Day18 {
    type Input = DigPlan;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(lagoon_volume(input.0.iter().map(|line| line.decoded))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT: &str = r"R 6 (#70c710)
D 5 (#0dc571)
L 2 (#5713f0)
D 2 (#d2c081)
R 2 (#59c680)
D 2 (#411b91)
L 5 (#8ceee2)
U 2 (#caa173)
L 1 (#1b58a2)
U 2 (#caa171)
R 2 (#7807d2)
U 3 (#a77fa3)
L 2 (#015232)
U 2 (#7a21e3)
";

    #[test]
    fn part_one_solves_example() -> DynamicResult<()> {
        let parsed = DigPlan::parse(EXAMPLE_INPUT)?;
        let result = <Day18 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 62);
        Ok(())
    }

    #[test]
    fn part_two_solves_example() -> DynamicResult<()> {
        let parsed = DigPlan::parse(EXAMPLE_INPUT)?;
        let result = <Day18 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 952_408_144_115);
        Ok(())
    }

    #[test]
    fn color_codes_decode() -> Result<(), ParseDigPlanError> {
        let decoded = decode_color("#70c710")?;
        assert_eq!(decoded.direction, Direction::East);
        assert_eq!(decoded.meters, 461_937);
        assert!(decode_color("#70c714").is_err());
        Ok(())
    }

    #[test]
    fn open_trench_is_an_error() -> DynamicResult<()> {
        let parsed = DigPlan::parse("R 2 (#000020)\nD 2 (#000021)\n")?;
        assert!(<Day18 as Solution<PartOne>>::solve(&parsed).is_err());
        Ok(())
    }
}
