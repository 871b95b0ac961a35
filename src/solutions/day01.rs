use aoc_framework::parsing::parse_input_lines;
use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, PartOne, PartTwo, Solution};
use checked_sum::CheckedSum;
use thiserror::Error;

#[solution_runner(name = "Day 1: Trebuchet?!", part_one = Day01, part_two = Day01)]
impl super::AdventOfCode2023<1> {}

#[derive(Error, Debug)]
enum Day01Error {
    #[error("no digit found in line")]
    NoDigit,
    #[error("no digit or spelled out digit found in line")]
    NoDigitOrWord,
    #[error("calibration values sum overflowed")]
    SumOverflow,
}

/*
Each line of the calibration document hides one value: the first digit and the last digit of the
line, read as a two-digit number. A single digit serves as both.

Part 1 only looks at digit characters. The answer is the sum over all lines.
*/

/// Spelled out digits, indexed by their value.
const DIGIT_WORDS: [&str; 10] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
];

/// Read a digit starting at the beginning of `text`, optionally accepting spelled out digits.
fn digit_at_start(text: &str, allow_words: bool) -> Option<u32> {
    let first = text.chars().next()?;
    if let Some(digit) = first.to_digit(10) {
        return Some(digit);
    }
    if !allow_words {
        return None;
    }
    DIGIT_WORDS
        .iter()
        .zip(0..)
        .find_map(|(word, value)| text.starts_with(word).then_some(value))
}

/// Find the calibration value of a line.
///
/// Searching from each end separately handles overlapping words like `"eightwo"`.
fn calibration_value(line: &str, allow_words: bool) -> Option<u32> {
    let starts = line.char_indices().map(|(index, _)| index);
    let first = starts
        .clone()
        .find_map(|index| digit_at_start(&line[index..], allow_words))?;
    let last = starts
        .rev()
        .find_map(|index| digit_at_start(&line[index..], allow_words))?;
    Some(first * 10 + last)
}

fn sum_calibration_values(input: &str, allow_words: bool) -> DynamicResult<u32> {
    let values: Vec<u32> = parse_input_lines(input, |_, line| {
        calibration_value(line, allow_words).ok_or(if allow_words {
            Day01Error::NoDigitOrWord
        } else {
            Day01Error::NoDigit
        })
    })
    .collect::<Result<_, _>>()?;

    Ok(values
        .into_iter()
        .checked_sum()
        .ok_or(Day01Error::SumOverflow)?)
}

struct Day01;

impl Solution<PartOne> for Day01 {
    type Input = str;
    type Output = u32;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        sum_calibration_values(input, false)
    }
}

/*
Part 2 also accepts digits spelled out in English ("one" through "nine"). Spellings may share
letters, so "twone" starts with 2 and ends with 1.
*/

impl Solution<PartTwo> for Day01 {
    type Input = str;
    type Output = u32;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        sum_calibration_values(input, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT_ONE: &str = r"1abc2
pqr3stu8vwx
a1b2c3d4e5f
treb7uchet
";

    const EXAMPLE_INPUT_TWO: &str = r"two1nine
eightwothree
abcone2threexyz
xtwone3four
4nineeightseven2
zoneight234
7pqrstsixteen
";

    #[test]
    fn part_one_solves_example() -> DynamicResult<()> {
        let result = <Day01 as Solution<PartOne>>::solve(EXAMPLE_INPUT_ONE)?;
        assert_eq!(result, 142);
        Ok(())
    }

    #[test]
    fn part_two_solves_example() -> DynamicResult<()> {
        let result = <Day01 as Solution<PartTwo>>::solve(EXAMPLE_INPUT_TWO)?;
        assert_eq!(result, 281);
        Ok(())
    }

    #[test]
    fn overlapping_words_count_from_both_ends() {
        assert_eq!(calibration_value("eightwo", true), Some(82));
        assert_eq!(calibration_value("treb7uchet", false), Some(77));
        assert_eq!(calibration_value("eightwo", false), None);
    }

    #[test]
    fn line_without_digit_is_an_error() {
        assert!(<Day01 as Solution<PartOne>>::solve("12\nabc\n").is_err());
    }
}
