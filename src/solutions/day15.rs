use aoc_framework::parsing::parse_with_context;
use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use checked_sum::CheckedSum;

#[solution_runner(
    name = "Day 15: Lens Library",
    parsed = InitializationSequence,
    part_one = Day15,
    part_two = Day15
)]
impl super::AdventOfCode2023<15> {}

/*
Input is an initialization sequence: steps separated by commas. Newlines are ignored.

The HASH algorithm turns a string into a number from 0 to 255. Starting from 0, for each byte, add
the byte's ASCII code, multiply by 17, and keep the remainder of dividing by 256.
*/

#[derive(Debug)]
struct InitializationSequence(Vec<String>);

impl ParseData for InitializationSequence {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let joined: String = input.lines().collect();
        let steps = joined
            .split(',')
            .filter(|step| !step.is_empty())
            .map(str::to_owned)
            .collect();
        Ok(Self(steps))
    }
}

fn hash(string: &str) -> u8 {
    string
        .bytes()
        .fold(0u8, |value, byte| value.wrapping_add(byte).wrapping_mul(17))
}

#[derive(thiserror::Error, Debug)]
enum Day15Error {
    #[error("expected a step ending in '-' or holding '=', found {0:?}")]
    MalformedStep(String),

    #[error("answer overflowed")]
    Overflow,
}

/*
For part 1, sum the HASH of every step.
*/

struct Day15;

impl Solution<PartOne> for Day15 {
    type Input = InitializationSequence;
    type Output = u32;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(input
            .0
            .iter()
            .map(|step| u32::from(hash(step)))
            .checked_sum()
            .ok_or(Day15Error::Overflow)?)
    }
}

/*
For part 2, steps arrange lenses into 256 boxes. A step starts with the label of a lens, and the
HASH of the label picks the box.

- `label-` removes the lens with that label from its box, if present. Lenses behind it move forward.
- `label=N` puts a lens with focal length `N` in its box. A lens with the same label already in the
  box is replaced in place, otherwise the lens goes behind every lens in the box.

The focusing power of a lens is one plus its box number, times one plus its slot in the box, times
its focal length. Sum the focusing power of every lens after all steps.
*/

#[derive(Debug)]
enum Operation<'a> {
    Remove(&'a str),
    Insert(&'a str, u32),
}

impl<'a> Operation<'a> {
    fn parse(step: &'a str) -> DynamicResult<Self> {
        if let Some(label) = step.strip_suffix('-') {
            return Ok(Self::Remove(label));
        }
        let (label, focal_length) = step
            .split_once('=')
            .ok_or_else(|| Day15Error::MalformedStep(step.to_owned()))?;
        Ok(Self::Insert(label, parse_with_context(focal_length)?))
    }
}

/// Boxes of `(label, focal_length)` lenses, front first.
struct Boxes<'a>(Vec<Vec<(&'a str, u32)>>);

impl<'a> Boxes<'a> {
    fn new() -> Self {
        Self(vec![Vec::new(); 256])
    }

    fn apply(&mut self, operation: Operation<'a>) {
        match operation {
            Operation::Remove(label) => {
                self.0[usize::from(hash(label))].retain(|&(held, _)| held != label);
            }
            Operation::Insert(label, focal_length) => {
                let lenses = &mut self.0[usize::from(hash(label))];
                match lenses.iter_mut().find(|(held, _)| *held == label) {
                    Some(lens) => lens.1 = focal_length,
                    None => lenses.push((label, focal_length)),
                }
            }
        }
    }

    fn focusing_power(&self) -> Option<u32> {
        let mut total: u32 = 0;
        for (box_number, lenses) in (1u32..).zip(&self.0) {
            for (slot, &(_, focal_length)) in (1u32..).zip(lenses) {
                let power = box_number.checked_mul(slot)?.checked_mul(focal_length)?;
                total = total.checked_add(power)?;
            }
        }
        Some(total)
    }
}

impl Solution<PartTwo> for Day15 {
    type Input = InitializationSequence;
    type Output = u32;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let mut boxes = Boxes::new();
        for step in &input.0 {
            boxes.apply(Operation::parse(step)?);
        }
        Ok(boxes.focusing_power().ok_or(Day15Error::Overflow)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT: &str = r"rn=1,cm-,qp=3,cm=2,qp-,pc=4,ot=9,ab=5,pc-,pc=6,ot=7
";

    #[test]
    fn hash_of_example_word() {
        assert_eq!(hash("HASH"), 52);
        assert_eq!(hash("rn"), 0);
        assert_eq!(hash("qp"), 1);
    }

    #[test]
    fn part_one_solves_example() -> DynamicResult<()> {
        let parsed = InitializationSequence::parse(EXAMPLE_INPUT)?;
        let result = <Day15 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 1320);
        Ok(())
    }

    #[test]
    fn part_two_solves_example() -> DynamicResult<()> {
        let parsed = InitializationSequence::parse(EXAMPLE_INPUT)?;
        let result = <Day15 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 145);
        Ok(())
    }

    #[test]
    fn newlines_are_ignored() -> DynamicResult<()> {
        let parsed = InitializationSequence::parse("rn=1,c\nm-\n")?;
        assert_eq!(parsed.0, ["rn=1", "cm-"]);
        Ok(())
    }
}
