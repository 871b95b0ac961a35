use aoc_framework::parsing::{parse_input_lines, parse_with_context};
use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use checked_sum::CheckedSum;

#[solution_runner(
    name = "Day 7: Camel Cards",
    parsed = Hands,
    part_one = Day07,
    part_two = Day07
)]
impl super::AdventOfCode2023<7> {}

/*
Input lists hands of Camel Cards, one per line, each followed by a space and the hand's bid:
`32T3K 765`. A hand holds five cards labeled `A`, `K`, `Q`, `J`, `T` or `9` through `2`.

Hands rank first by type, then card by card in the order dealt. Each hand wins its bid multiplied
by its rank, with the weakest hand at rank 1.
*/

const HAND_SIZE: usize = 5;

/// Labels from weakest to strongest.
const CARD_ORDER: &str = "23456789TJQKA";
/// Labels from weakest to strongest when `J` is a joker.
const JOKER_CARD_ORDER: &str = "J23456789TQKA";

const JOKER: u8 = b'J';

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum HandType {
    HighCard,
    OnePair,
    TwoPair,
    ThreeOfAKind,
    FullHouse,
    FourOfAKind,
    FiveOfAKind,
}

#[derive(Debug)]
struct Hand {
    /// Card labels in the order dealt.
    cards: [u8; HAND_SIZE],
    bid: u64,
}

impl Hand {
    fn hand_type(&self, jokers: bool) -> HandType {
        let mut counts: Vec<(u8, usize)> = Vec::with_capacity(HAND_SIZE);
        for &card in &self.cards {
            match counts.iter_mut().find(|(label, _)| *label == card) {
                Some((_, count)) => *count += 1,
                None => counts.push((card, 1)),
            }
        }

        let mut joker_count = 0;
        if jokers && let Some(index) = counts.iter().position(|&(label, _)| label == JOKER) {
            joker_count = counts.swap_remove(index).1;
        }

        let mut sizes: Vec<usize> = counts.into_iter().map(|(_, count)| count).collect();
        sizes.sort_unstable_by(|a, b| b.cmp(a));
        // jokers join the largest group; a hand of only jokers has no group to join
        match sizes.first_mut() {
            Some(largest) => *largest += joker_count,
            None => sizes.push(joker_count),
        }

        match (sizes[0], sizes.get(1).copied().unwrap_or(0)) {
            (5, _) => HandType::FiveOfAKind,
            (4, _) => HandType::FourOfAKind,
            (3, 2) => HandType::FullHouse,
            (3, _) => HandType::ThreeOfAKind,
            (2, 2) => HandType::TwoPair,
            (2, _) => HandType::OnePair,
            _ => HandType::HighCard,
        }
    }

    /// Key that orders hands from weakest to strongest.
    fn strength(&self, jokers: bool) -> (HandType, [usize; HAND_SIZE]) {
        let order = if jokers { JOKER_CARD_ORDER } else { CARD_ORDER };
        let cards = self.cards.map(|card| {
            order
                .bytes()
                .position(|label| label == card)
                .expect("card labels are validated when parsed")
        });
        (self.hand_type(jokers), cards)
    }
}

#[derive(Debug)]
struct Hands(Vec<Hand>);

#[derive(thiserror::Error, Debug)]
enum ParseHandsError {
    #[error("expected a hand and bid separated by a space")]
    MissingBid,

    #[error("expected a hand of five cards, found {0:?}")]
    WrongHandSize(String),

    #[error("unknown card label: {0:?}")]
    UnknownCard(char),
}

impl ParseData for Hands {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let hands = parse_input_lines(input, |_, line| -> DynamicResult<_> {
            let (cards_str, bid_str) = line
                .split_once(' ')
                .ok_or(ParseHandsError::MissingBid)?;

            if let Some(unknown) = cards_str.chars().find(|&card| !CARD_ORDER.contains(card)) {
                return Err(ParseHandsError::UnknownCard(unknown).into());
            }
            let cards: [u8; HAND_SIZE] = cards_str
                .as_bytes()
                .try_into()
                .map_err(|_| ParseHandsError::WrongHandSize(cards_str.to_owned()))?;

            Ok(Hand {
                cards,
                bid: parse_with_context(bid_str.trim())?,
            })
        })
        .collect::<Result<_, _>>()?;
        Ok(Self(hands))
    }
}

#[derive(thiserror::Error, Debug)]
enum Day07Error {
    #[error("total winnings overflowed")]
    Overflow,
}

fn total_winnings(hands: &Hands, jokers: bool) -> Result<u64, Day07Error> {
    let mut ranked: Vec<&Hand> = hands.0.iter().collect();
    ranked.sort_by_cached_key(|hand| hand.strength(jokers));

    ranked
        .into_iter()
        .zip(1u64..)
        .map(|(hand, rank)| hand.bid.checked_mul(rank))
        .collect::<Option<Vec<_>>>()
        .and_then(|winnings| winnings.into_iter().checked_sum())
        .ok_or(Day07Error::Overflow)
}

/*
For part 1, find the total winnings of all hands.
*/

struct Day07;

impl Solution<PartOne> for Day07 {
    type Input = Hands;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(total_winnings(input, false)?)
    }
}

/*
For part 2, `J` cards are jokers. A joker acts as whatever card makes the strongest hand type, but
is the weakest card when comparing hands of the same type card by card.
*/

impl Solution<PartTwo> for Day07 {
    type Input = Hands;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(total_winnings(input, true)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT: &str = r"32T3K 765
T55J5 684
KK677 28
KTJJT 220
QQQJA 483
";

    fn hand(cards: &str) -> Hand {
        Hand {
            cards: cards.as_bytes().try_into().expect("test hands have five cards"),
            bid: 0,
        }
    }

    #[test]
    fn part_one_solves_example() -> DynamicResult<()> {
        let parsed = Hands::parse(EXAMPLE_INPUT)?;
        let result = <Day07 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 6440);
        Ok(())
    }

    #[test]
    fn part_two_solves_example() -> DynamicResult<()> {
        let parsed = Hands::parse(EXAMPLE_INPUT)?;
        let result = <Day07 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 5905);
        Ok(())
    }

    #[test]
    fn hand_types() {
        assert_eq!(hand("AAAAA").hand_type(false), HandType::FiveOfAKind);
        assert_eq!(hand("23332").hand_type(false), HandType::FullHouse);
        assert_eq!(hand("23432").hand_type(false), HandType::TwoPair);
        assert_eq!(hand("23456").hand_type(false), HandType::HighCard);
        assert_eq!(hand("KTJJT").hand_type(false), HandType::TwoPair);
        assert_eq!(hand("KTJJT").hand_type(true), HandType::FourOfAKind);
        assert_eq!(hand("JJJJJ").hand_type(true), HandType::FiveOfAKind);
        assert_eq!(hand("2345J").hand_type(true), HandType::OnePair);
    }

    #[test]
    fn jokers_are_weakest_in_ties() {
        assert!(hand("JKKK2").strength(true) < hand("QQQQ2").strength(true));
        assert!(hand("JKKK2").strength(false) < hand("QQQQ2").strength(false));
        assert!(hand("J2222").strength(true) < hand("22222").strength(true));
    }

    #[test]
    fn parse_rejects_unknown_card() {
        assert!(Hands::parse("32X3K 765\n").is_err());
        assert!(Hands::parse("32T3 765\n").is_err());
    }
}
