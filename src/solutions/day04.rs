use std::collections::HashSet;

use aoc_framework::parsing::{parse_input_lines, parse_with_context};
use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use checked_sum::CheckedSum;

#[solution_runner(
    name = "Day 4: Scratchcards",
    parsed = Scratchcards,
    part_one = Day04,
    part_two = Day04
)]
impl super::AdventOfCode2023<4> {}

/*
Input is a pile of scratchcards, one per line: `Card 1: 41 48 83 86 17 | 83 86  6 31 17  9 48 53`.
Numbers left of the bar are winning numbers; numbers right of it are the numbers you have.
*/

#[derive(Debug)]
struct Scratchcard {
    winning: HashSet<u32>,
    have: Vec<u32>,
}

impl Scratchcard {
    /// How many numbers you have are winning numbers.
    fn matches(&self) -> usize {
        self.have
            .iter()
            .filter(|&&number| self.winning.contains(&number))
            .count()
    }
}

/// Cards in input order.
#[derive(Debug)]
struct Scratchcards(Vec<Scratchcard>);

#[derive(thiserror::Error, Debug)]
enum ParseScratchcardsError {
    #[error("expected a colon (':') after the card label")]
    MissingColon,
    #[error("expected a bar ('|') between winning numbers and numbers you have")]
    MissingBar,
}

impl ParseData for Scratchcards {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let cards = parse_input_lines(input, |_, line| -> DynamicResult<_> {
            let (_, numbers) = line
                .split_once(':')
                .ok_or(ParseScratchcardsError::MissingColon)?;
            let (winning_str, have_str) = numbers
                .split_once('|')
                .ok_or(ParseScratchcardsError::MissingBar)?;

            let winning = winning_str
                .split_whitespace()
                .map(parse_with_context)
                .collect::<Result<_, _>>()?;
            let have = have_str
                .split_whitespace()
                .map(parse_with_context)
                .collect::<Result<_, _>>()?;

            Ok(Scratchcard { winning, have })
        })
        .collect::<Result<_, _>>()?;
        Ok(Self(cards))
    }
}

#[derive(thiserror::Error, Debug)]
enum Day04Error {
    #[error("answer overflowed")]
    Overflow,
}

/*
For part 1, a card with at least one match is worth one point, doubled for every match after the
first. Sum the points of all cards.
*/

struct Day04;

impl Solution<PartOne> for Day04 {
    type Input = Scratchcards;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let points = input
            .0
            .iter()
            .map(|card| match card.matches() {
                0 => Some(0),
                matches => u32::try_from(matches - 1)
                    .ok()
                    .and_then(|exponent| 1u64.checked_shl(exponent)),
            })
            .collect::<Option<Vec<_>>>()
            .ok_or(Day04Error::Overflow)?;
        Ok(points
            .into_iter()
            .checked_sum()
            .ok_or(Day04Error::Overflow)?)
    }
}

/*
For part 2, there are no points. Instead a card with `n` matches wins one copy of each of the `n`
cards following it, and copies win copies the same way. Winnings never run past the last card.

Count every card held once all winnings are processed, originals included.
*/

impl Solution<PartTwo> for Day04 {
    type Input = Scratchcards;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let card_count = input.0.len();
        let mut copies = vec![1u64; card_count];

        for (index, card) in input.0.iter().enumerate() {
            let won_end = (index + 1 + card.matches()).min(card_count);
            let held = copies[index];
            for won in &mut copies[index + 1..won_end] {
                *won = won.checked_add(held).ok_or(Day04Error::Overflow)?;
            }
        }

        Ok(copies
            .into_iter()
            .checked_sum()
            .ok_or(Day04Error::Overflow)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT: &str = r"Card 1: 41 48 83 86 17 | 83 86  6 31 17  9 48 53
Card 2: 13 32 20 16 61 | 61 30 68 82 17 32 24 19
Card 3:  1 21 53 59 44 | 69 82 63 72 16 21 14  1
Card 4: 41 92 73 84 69 | 59 84 76 51 58  5 54 83
Card 5: 87 83 26 28 32 | 88 30 70 12 93 22 82 36
Card 6: 31 18 13 56 72 | 74 77 10 23 35 67 36 11
";

    #[test]
    fn part_one_solves_example() -> DynamicResult<()> {
        let parsed = Scratchcards::parse(EXAMPLE_INPUT)?;
        let result = <Day04 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 13);
        Ok(())
    }

    #[test]
    fn part_two_solves_example() -> DynamicResult<()> {
        let parsed = Scratchcards::parse(EXAMPLE_INPUT)?;
        let result = <Day04 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 30);
        Ok(())
    }

    #[test]
    fn winnings_stop_at_last_card() -> DynamicResult<()> {
        let parsed = Scratchcards::parse("Card 1: 1 2 3 | 1 2 3\nCard 2: 4 | 5\n")?;
        let result = <Day04 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 3);
        Ok(())
    }
}
