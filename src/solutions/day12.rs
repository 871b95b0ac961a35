use std::collections::HashMap;

use aoc_framework::parsing::{parse_input_lines, parse_with_context};
use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use checked_sum::CheckedSum;

#[solution_runner(
    name = "Day 12: Hot Springs",
    parsed = ConditionRecords,
    part_one = Day12,
    part_two = Day12
)]
impl super::AdventOfCode2023<12> {}

/*
Input is a damaged record of spring conditions. Each line holds a row of springs and, after a
space, the sizes of each contiguous group of damaged springs in order: `???.### 1,1,3`.

A spring is `.` operational, `#` damaged, or `?` unknown.
*/

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Spring {
    Operational,
    Damaged,
    Unknown,
}

#[derive(Debug, Clone)]
struct ConditionRecord {
    springs: Vec<Spring>,
    groups: Vec<usize>,
}

#[derive(Debug)]
struct ConditionRecords(Vec<ConditionRecord>);

#[derive(thiserror::Error, Debug)]
enum ParseConditionRecordsError {
    #[error("expected springs and group sizes separated by a space")]
    MissingGroups,

    #[error("unknown spring condition {0:?}")]
    UnknownCondition(char),
}

impl ParseData for ConditionRecords {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let records = parse_input_lines(input, |_, line| -> DynamicResult<_> {
            let (springs_str, groups_str) = line
                .split_once(' ')
                .ok_or(ParseConditionRecordsError::MissingGroups)?;
            let springs = springs_str
                .chars()
                .map(|condition| match condition {
                    '.' => Ok(Spring::Operational),
                    '#' => Ok(Spring::Damaged),
                    '?' => Ok(Spring::Unknown),
                    _ => Err(ParseConditionRecordsError::UnknownCondition(condition)),
                })
                .collect::<Result<_, _>>()?;
            let groups = groups_str
                .trim()
                .split(',')
                .map(parse_with_context::<usize>)
                .collect::<Result<_, _>>()?;
            Ok(ConditionRecord { springs, groups })
        })
        .collect::<Result<_, _>>()?;
        Ok(Self(records))
    }
}

/// Counts arrangements of one record, memoized by scan state.
struct ArrangementCounter<'a> {
    record: &'a ConditionRecord,
    /// Counts keyed by spring position, group index, and length of the damaged run in progress.
    memo: HashMap<(usize, usize, usize), u64>,
}

impl<'a> ArrangementCounter<'a> {
    fn new(record: &'a ConditionRecord) -> Self {
        Self {
            record,
            memo: HashMap::new(),
        }
    }

    /// Count arrangements of the springs from `position` on, given `group` groups are complete
    /// and the current damaged run has length `run`.
    ///
    /// # Returns
    ///
    /// `None` if the count overflows.
    fn count(&mut self, position: usize, group: usize, run: usize) -> Option<u64> {
        let record = self.record;
        let groups = &record.groups;
        let Some(&spring) = record.springs.get(position) else {
            let complete = if run == 0 {
                group == groups.len()
            } else {
                group + 1 == groups.len() && groups[group] == run
            };
            return Some(u64::from(complete));
        };

        if let Some(&known) = self.memo.get(&(position, group, run)) {
            return Some(known);
        }

        let mut total: u64 = 0;
        if spring != Spring::Operational && groups.get(group).is_some_and(|&size| run < size) {
            total = self.count(position + 1, group, run + 1)?;
        }
        if spring != Spring::Damaged {
            let ways = if run == 0 {
                self.count(position + 1, group, 0)?
            } else if groups.get(group) == Some(&run) {
                self.count(position + 1, group + 1, 0)?
            } else {
                0
            };
            total = total.checked_add(ways)?;
        }

        self.memo.insert((position, group, run), total);
        Some(total)
    }
}

impl ConditionRecord {
    fn arrangements(&self) -> Option<u64> {
        ArrangementCounter::new(self).count(0, 0, 0)
    }

    /// Repeat the springs five times joined by unknown springs, and the groups five times.
    fn unfold(&self) -> Self {
        let mut springs = Vec::with_capacity(self.springs.len() * 5 + 4);
        for copy in 0..5 {
            if copy > 0 {
                springs.push(Spring::Unknown);
            }
            springs.extend_from_slice(&self.springs);
        }
        Self {
            springs,
            groups: self.groups.repeat(5),
        }
    }
}

#[derive(thiserror::Error, Debug)]
enum Day12Error {
    #[error("arrangement count overflowed")]
    Overflow,
}

fn sum_arrangements<I>(records: I) -> Result<u64, Day12Error>
where
    I: Iterator<Item = Option<u64>>,
{
    records
        .collect::<Option<Vec<_>>>()
        .and_then(|counts| counts.into_iter().checked_sum())
        .ok_or(Day12Error::Overflow)
}

/*
For part 1, count the ways unknown springs could be operational or damaged so that each record
matches its group sizes, and sum the counts.
*/

struct Day12;

impl Solution<PartOne> for Day12 {
    type Input = ConditionRecords;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(sum_arrangements(
            input.0.iter().map(ConditionRecord::arrangements),
        )?)
    }
}

/*
For part 2, each record is folded. Unfold it by repeating the springs five times, separated by
unknown springs, and the group sizes five times. Sum arrangement counts of the unfolded records.
*/

impl Solution<PartTwo> for Day12 {
    type Input = ConditionRecords;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(sum_arrangements(
            input.0.iter().map(|record| record.unfold().arrangements()),
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT: &str = r"???.### 1,1,3
.??..??...?##. 1,1,3
?#?#?#?#?#?#?#? 1,3,1,6
????.#...#... 4,1,1
????.######..#####. 1,6,5
?###???????? 3,2,1
";

    #[test]
    fn part_one_solves_example() -> DynamicResult<()> {
        let parsed = ConditionRecords::parse(EXAMPLE_INPUT)?;
        let result = <Day12 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 21);
        Ok(())
    }

    #[test]
    fn part_two_solves_example() -> DynamicResult<()> {
        let parsed = ConditionRecords::parse(EXAMPLE_INPUT)?;
        let result = <Day12 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 525_152);
        Ok(())
    }

    #[test]
    fn counts_per_record() -> DynamicResult<()> {
        let parsed = ConditionRecords::parse(EXAMPLE_INPUT)?;
        let counts: Vec<_> = parsed.0.iter().map(ConditionRecord::arrangements).collect();
        assert_eq!(
            counts,
            [Some(1), Some(4), Some(1), Some(1), Some(4), Some(10)]
        );

        let unfolded: Vec<_> = parsed
            .0
            .iter()
            .map(|record| record.unfold().arrangements())
            .collect();
        assert_eq!(unfolded[1], Some(16384));
        assert_eq!(unfolded[5], Some(506_250));
        Ok(())
    }
}
