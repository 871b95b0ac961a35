use aoc_framework::parsing::{parse_input_lines, parse_with_context};
use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use checked_sum::CheckedSum;

#[solution_runner(
    name = "Day 3: Gear Ratios",
    parsed = Schematic,
    part_one = Day03,
    part_two = Day03
)]
impl super::AdventOfCode2023<3> {}

/*
Input is an engine schematic: a character grid of numbers, symbols, and `.` for empty space.
Numbers run horizontally through consecutive digits. Any other character is a symbol.
*/

/// A number in the schematic, spanning a range of columns on one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SchematicNumber {
    value: u32,
    row: usize,
    /// The column of the first digit.
    start_col: usize,
    /// The column after the last digit.
    end_col: usize,
}

#[derive(Debug, Clone, Copy)]
struct Symbol {
    character: char,
    row: usize,
    col: usize,
}

impl SchematicNumber {
    /// Check if the symbol touches any digit of this number, diagonals included.
    fn is_adjacent_to(&self, symbol: &Symbol) -> bool {
        symbol.row + 1 >= self.row
            && symbol.row <= self.row + 1
            && symbol.col + 1 >= self.start_col
            && symbol.col <= self.end_col
    }
}

#[derive(Debug)]
struct Schematic {
    numbers: Vec<SchematicNumber>,
    symbols: Vec<Symbol>,
}

impl ParseData for Schematic {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let mut numbers = Vec::new();
        let mut symbols = Vec::new();

        parse_input_lines(input, |row, line| -> DynamicResult<_> {
            let mut digits_start: Option<usize> = None;

            // a trailing '.' flushes a number ending the line
            for (col, character) in line.char_indices().chain([(line.len(), '.')]) {
                if character.is_ascii_digit() {
                    digits_start.get_or_insert(col);
                    continue;
                }

                if let Some(start_col) = digits_start.take() {
                    numbers.push(SchematicNumber {
                        value: parse_with_context(&line[start_col..col])?,
                        row,
                        start_col,
                        end_col: col,
                    });
                }
                if character != '.' {
                    symbols.push(Symbol {
                        character,
                        row,
                        col,
                    });
                }
            }
            Ok(())
        })
        .collect::<Result<(), _>>()?;

        Ok(Self { numbers, symbols })
    }
}

#[derive(thiserror::Error, Debug)]
enum Day03Error {
    #[error("answer overflowed")]
    Overflow,
}

/*
For part 1, a part number is any number adjacent to a symbol, diagonals included. Sum the part
numbers.
*/

struct Day03;

impl Solution<PartOne> for Day03 {
    type Input = Schematic;
    type Output = u32;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let sum = input
            .numbers
            .iter()
            .filter(|number| {
                input
                    .symbols
                    .iter()
                    .any(|symbol| number.is_adjacent_to(symbol))
            })
            .map(|number| number.value)
            .checked_sum()
            .ok_or(Day03Error::Overflow)?;
        Ok(sum)
    }
}

/*
For part 2, a gear is a `*` symbol adjacent to exactly two numbers. Its gear ratio is the product
of those numbers. Sum all gear ratios.
*/

impl Schematic {
    fn gear_ratios(&self) -> impl Iterator<Item = u64> + '_ {
        self.symbols
            .iter()
            .filter(|symbol| symbol.character == '*')
            .filter_map(|symbol| {
                let mut adjacent = self
                    .numbers
                    .iter()
                    .filter(|number| number.is_adjacent_to(symbol));
                match (adjacent.next(), adjacent.next(), adjacent.next()) {
                    (Some(first), Some(second), None) => {
                        Some(u64::from(first.value) * u64::from(second.value))
                    }
                    _ => None,
                }
            })
    }
}

impl Solution<PartTwo> for Day03 {
    type Input = Schematic;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let sum = input
            .gear_ratios()
            .checked_sum()
            .ok_or(Day03Error::Overflow)?;
        Ok(sum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT: &str = r"467..114..
...*......
..35..633.
......#...
617*......
.....+.58.
..592.....
......755.
...$.*....
.664.598..
";

    #[test]
    fn part_one_solves_example() -> DynamicResult<()> {
        let parsed = Schematic::parse(EXAMPLE_INPUT)?;
        let result = <Day03 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 4361);
        Ok(())
    }

    #[test]
    fn part_two_solves_example() -> DynamicResult<()> {
        let parsed = Schematic::parse(EXAMPLE_INPUT)?;
        let result = <Day03 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 467_835);
        Ok(())
    }

    #[test]
    fn numbers_at_line_end_are_parsed() -> DynamicResult<()> {
        let parsed = Schematic::parse("..12\n.#.7\n")?;
        let values: Vec<_> = parsed.numbers.iter().map(|number| number.value).collect();
        assert_eq!(values, [12, 7]);
        let result = <Day03 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 12);
        Ok(())
    }
}
