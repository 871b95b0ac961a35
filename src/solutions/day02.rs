use std::sync::LazyLock;

use aoc_framework::parsing::{parse_input_lines, parse_with_context};
use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use checked_sum::CheckedSum;
use regex::Regex;

use crate::numeric::CheckedProduct;

#[solution_runner(
    name = "Day 2: Cube Conundrum",
    parsed = Games,
    part_one = Day02,
    part_two = Day02
)]
impl super::AdventOfCode2023<2> {}

/*
Input is a record of games. Each line holds a game id and the handfuls of cubes drawn from a bag in
that game, separated by `;`. A handful lists counts of colored cubes separated by `,`, for example
`Game 3: 8 green, 6 blue, 20 red; 5 blue, 4 red, 13 green`.
*/

/// Counts of cubes by color.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct CubeSet {
    red: u32,
    green: u32,
    blue: u32,
}

impl CubeSet {
    /// Check if every color count fits within the `bag`.
    fn fits_within(self, bag: Self) -> bool {
        self.red <= bag.red && self.green <= bag.green && self.blue <= bag.blue
    }

    /// The per-color maximum of two sets.
    fn max(self, other: Self) -> Self {
        Self {
            red: self.red.max(other.red),
            green: self.green.max(other.green),
            blue: self.blue.max(other.blue),
        }
    }

    fn power(self) -> Option<u32> {
        [self.red, self.green, self.blue]
            .into_iter()
            .checked_product()
    }
}

#[derive(Debug)]
struct Game {
    id: u32,
    handfuls: Vec<CubeSet>,
}

#[derive(Debug)]
struct Games(Vec<Game>);

#[derive(thiserror::Error, Debug)]
enum ParseGamesError {
    #[error("expected a line formatted as \"Game <id>: <handfuls>\"")]
    MalformedGame,
    #[error("expected a count and color separated by a space, found: {0:?}")]
    MalformedCubeCount(String),
    #[error("unknown cube color: {0:?}")]
    UnknownColor(String),
}

static GAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Game (\d+):\s*(.*)$").expect("pattern should be valid"));

fn parse_handful(handful: &str) -> DynamicResult<CubeSet> {
    let mut cubes = CubeSet::default();
    for cube_count in handful.split(',').map(str::trim) {
        let (count_str, color) = cube_count
            .split_once(' ')
            .ok_or_else(|| ParseGamesError::MalformedCubeCount(cube_count.to_owned()))?;
        let count: u32 = parse_with_context(count_str)?;
        match color {
            "red" => cubes.red += count,
            "green" => cubes.green += count,
            "blue" => cubes.blue += count,
            _ => return Err(ParseGamesError::UnknownColor(color.to_owned()).into()),
        }
    }
    Ok(cubes)
}

impl ParseData for Games {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let games = parse_input_lines(input, |_, line| -> DynamicResult<_> {
            let captures = GAME_PATTERN
                .captures(line.trim_end())
                .ok_or(ParseGamesError::MalformedGame)?;
            let id = parse_with_context(&captures[1])?;
            let handfuls = captures[2]
                .split(';')
                .map(parse_handful)
                .collect::<Result<_, _>>()?;
            Ok(Game { id, handfuls })
        })
        .collect::<Result<_, _>>()?;
        Ok(Self(games))
    }
}

/*
For part 1, the bag held 12 red, 13 green and 14 blue cubes. A game is possible if none of its
handfuls shows more cubes of a color than that. Sum the ids of possible games.
*/

const BAG: CubeSet = CubeSet {
    red: 12,
    green: 13,
    blue: 14,
};

#[derive(thiserror::Error, Debug)]
enum Day02Error {
    #[error("answer overflowed")]
    Overflow,
}

struct Day02;

impl Solution<PartOne> for Day02 {
    type Input = Games;
    type Output = u32;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let sum = input
            .0
            .iter()
            .filter(|game| game.handfuls.iter().all(|handful| handful.fits_within(BAG)))
            .map(|game| game.id)
            .checked_sum()
            .ok_or(Day02Error::Overflow)?;
        Ok(sum)
    }
}

/*
For part 2, find the fewest cubes of each color that make a game possible, which is the largest
count seen per color. The power of that set is the product of its counts; sum powers over games.
*/

impl Solution<PartTwo> for Day02 {
    type Input = Games;
    type Output = u32;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let powers = input
            .0
            .iter()
            .map(|game| {
                game.handfuls
                    .iter()
                    .fold(CubeSet::default(), |minimum, &handful| minimum.max(handful))
                    .power()
            })
            .collect::<Option<Vec<_>>>()
            .ok_or(Day02Error::Overflow)?;
        let sum = powers
            .into_iter()
            .checked_sum()
            .ok_or(Day02Error::Overflow)?;
        Ok(sum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT: &str = r"Game 1: 3 blue, 4 red; 1 red, 2 green, 6 blue; 2 green
Game 2: 1 blue, 2 green; 3 green, 4 blue, 1 red; 1 green, 1 blue
Game 3: 8 green, 6 blue, 20 red; 5 blue, 4 red, 13 green; 5 green, 1 red
Game 4: 1 green, 3 red, 6 blue; 3 green, 6 red; 3 green, 15 blue, 14 red
Game 5: 6 red, 1 blue, 3 green; 2 blue, 1 red, 2 green
";

    #[test]
    fn part_one_solves_example() -> DynamicResult<()> {
        let parsed = Games::parse(EXAMPLE_INPUT)?;
        let result = <Day02 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 8);
        Ok(())
    }

    #[test]
    fn part_two_solves_example() -> DynamicResult<()> {
        let parsed = Games::parse(EXAMPLE_INPUT)?;
        let result = <Day02 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 2286);
        Ok(())
    }

    #[test]
    fn parse_rejects_unknown_color() {
        assert!(Games::parse("Game 1: 3 purple\n").is_err());
    }
}
