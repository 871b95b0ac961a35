use std::collections::HashMap;
use std::sync::LazyLock;

use aoc_framework::parsing::{InputScanner, parse_with_context};
use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use checked_sum::CheckedSum;
use regex::Regex;

use crate::numeric::CheckedProduct;

#[solution_runner(
    name = "Day 19: Aplenty",
    parsed = System,
    part_one = Day19,
    part_two = Day19
)]
impl super::AdventOfCode2023<19> {}

/*
Input is a list of workflows, a blank line, then a list of machine parts.

A part has four ratings: `x`, `m`, `a` and `s`, written like `{x=787,m=2655,a=1222,s=2876}`.

A workflow is named and holds rules, like `px{a<2006:qkq,m>2090:A,rfg}`. Each rule but the last
checks one rating against a number and names where matching parts go. The last rule names where
every other part goes. A destination is another workflow, `A` to accept the part, or `R` to reject
it. Every part starts at the workflow named `in`.
*/

const CATEGORIES: usize = 4;
const START: &str = "in";

fn category_index(category: &str) -> Option<usize> {
    ["x", "m", "a", "s"]
        .iter()
        .position(|&name| name == category)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Destination {
    Accept,
    Reject,
    Workflow(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Comparison {
    Less,
    Greater,
}

#[derive(Debug)]
struct Rule {
    category: usize,
    comparison: Comparison,
    value: u64,
    destination: Destination,
}

impl Rule {
    fn matches(&self, part: &[u64; CATEGORIES]) -> bool {
        let rating = part[self.category];
        match self.comparison {
            Comparison::Less => rating < self.value,
            Comparison::Greater => rating > self.value,
        }
    }

    /// Split an inclusive rating range into the ranges that match this rule and that don't.
    fn split(&self, (low, high): (u64, u64)) -> (Option<(u64, u64)>, Option<(u64, u64)>) {
        let non_empty = |(low, high): (u64, u64)| (low <= high).then_some((low, high));
        match self.comparison {
            Comparison::Less => (
                non_empty((low, high.min(self.value.saturating_sub(1)))),
                non_empty((low.max(self.value), high)),
            ),
            Comparison::Greater => (
                non_empty((low.max(self.value.saturating_add(1)), high)),
                non_empty((low, high.min(self.value))),
            ),
        }
    }
}

#[derive(Debug)]
struct Workflow {
    name: String,
    rules: Vec<Rule>,
    fallback: Destination,
}

impl Workflow {
    fn route(&self, part: &[u64; CATEGORIES]) -> Destination {
        self.rules
            .iter()
            .find(|rule| rule.matches(part))
            .map_or(self.fallback, |rule| rule.destination)
    }
}

#[derive(Debug)]
struct System {
    workflows: Vec<Workflow>,
    start: usize,
    parts: Vec<[u64; CATEGORIES]>,
}

#[derive(thiserror::Error, Debug)]
enum ParseSystemError {
    #[error("expected a workflow formatted as \"name{{rules}}\"")]
    MalformedWorkflow,

    #[error("expected a rule formatted as \"<category><'<' or '>'><number>:<destination>\", found {0:?}")]
    MalformedRule(String),

    #[error("workflow has no rules")]
    EmptyWorkflow,

    #[error("workflow {0:?} is defined more than once")]
    DuplicateWorkflow(String),

    #[error("workflow {from:?} sends parts to undefined workflow {to:?}")]
    UndefinedWorkflow { from: String, to: String },

    #[error("no workflow named \"in\" to start from")]
    MissingStart,

    #[error("expected a part formatted as \"{{x=..,m=..,a=..,s=..}}\"")]
    MalformedPart,
}

static WORKFLOW_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\w+)\{(.*)\}$").expect("pattern should be valid"));

static RULE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([xmas])([<>])(\d+):(\w+)$").expect("pattern should be valid")
});

static PART_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\{x=(\d+),m=(\d+),a=(\d+),s=(\d+)\}$").expect("pattern should be valid")
});

/// A rule before its destination is resolved to a workflow index.
struct RawRule {
    category: usize,
    comparison: Comparison,
    value: u64,
    destination: String,
}

fn parse_raw_rule(rule: &str) -> DynamicResult<RawRule> {
    let captures = RULE_PATTERN
        .captures(rule)
        .ok_or_else(|| ParseSystemError::MalformedRule(rule.to_owned()))?;
    let (_, [category, comparison, value, destination]) = captures.extract();
    Ok(RawRule {
        category: category_index(category)
            .ok_or_else(|| ParseSystemError::MalformedRule(rule.to_owned()))?,
        comparison: if comparison == "<" {
            Comparison::Less
        } else {
            Comparison::Greater
        },
        value: parse_with_context(value)?,
        destination: destination.to_owned(),
    })
}

impl ParseData for System {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let mut scanner = InputScanner::new(input);
        scanner.skip_empty();

        let raw_workflows = scanner.collect_sequence(|_, line| -> DynamicResult<_> {
            let captures = WORKFLOW_PATTERN
                .captures(line.trim())
                .ok_or(ParseSystemError::MalformedWorkflow)?;
            let (_, [name, rules_str]) = captures.extract();

            let mut rules: Vec<&str> = rules_str.split(',').collect();
            let fallback = rules.pop().ok_or(ParseSystemError::EmptyWorkflow)?;
            let rules = rules
                .into_iter()
                .map(parse_raw_rule)
                .collect::<Result<Vec<_>, _>>()?;
            Ok((name.to_owned(), rules, fallback.to_owned()))
        })?;

        let mut indices: HashMap<&str, usize> = HashMap::with_capacity(raw_workflows.len());
        for (index, (name, _, _)) in raw_workflows.iter().enumerate() {
            if indices.insert(name.as_str(), index).is_some() {
                return Err(ParseSystemError::DuplicateWorkflow(name.clone()).into());
            }
        }

        let resolve = |from: &str, to: &str| match to {
            "A" => Ok(Destination::Accept),
            "R" => Ok(Destination::Reject),
            _ => indices
                .get(to)
                .map(|&index| Destination::Workflow(index))
                .ok_or_else(|| ParseSystemError::UndefinedWorkflow {
                    from: from.to_owned(),
                    to: to.to_owned(),
                }),
        };
        let workflows = raw_workflows
            .iter()
            .map(|(name, raw_rules, fallback)| -> Result<_, ParseSystemError> {
                let rules = raw_rules
                    .iter()
                    .map(|raw| -> Result<_, ParseSystemError> {
                        Ok(Rule {
                            category: raw.category,
                            comparison: raw.comparison,
                            value: raw.value,
                            destination: resolve(name, &raw.destination)?,
                        })
                    })
                    .collect::<Result<_, _>>()?;
                Ok(Workflow {
                    name: name.clone(),
                    rules,
                    fallback: resolve(name, fallback)?,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let start = *indices.get(START).ok_or(ParseSystemError::MissingStart)?;

        scanner.skip_empty();
        let parts = scanner.collect_sequence(|_, line| -> DynamicResult<_> {
            let captures = PART_PATTERN
                .captures(line.trim())
                .ok_or(ParseSystemError::MalformedPart)?;
            let (_, ratings) = captures.extract::<CATEGORIES>();
            let mut part = [0u64; CATEGORIES];
            for (rating, text) in part.iter_mut().zip(ratings) {
                *rating = parse_with_context(text)?;
            }
            Ok(part)
        })?;

        Ok(Self {
            workflows,
            start,
            parts,
        })
    }
}

#[derive(thiserror::Error, Debug)]
enum Day19Error {
    #[error("workflows send parts around in a loop through {0:?}")]
    RoutingLoop(String),

    #[error("answer overflowed")]
    Overflow,
}

impl System {
    fn accepts(&self, part: &[u64; CATEGORIES]) -> Result<bool, Day19Error> {
        let mut current = self.start;
        // a route visiting more workflows than exist must repeat one
        for _ in 0..=self.workflows.len() {
            match self.workflows[current].route(part) {
                Destination::Accept => return Ok(true),
                Destination::Reject => return Ok(false),
                Destination::Workflow(next) => current = next,
            }
        }
        Err(Day19Error::RoutingLoop(self.workflows[current].name.clone()))
    }
}

/*
For part 1, sort every part through the workflows. Sum all ratings of the accepted parts.
*/

struct Day19;

impl Solution<PartOne> for Day19 {
    type Input = System;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let mut total: u64 = 0;
        for part in &input.parts {
            if input.accepts(part)? {
                let ratings = part.iter().copied().checked_sum();
                total = ratings
                    .and_then(|ratings| total.checked_add(ratings))
                    .ok_or(Day19Error::Overflow)?;
            }
        }
        Ok(total)
    }
}

/*
For part 2, ignore the listed parts. Each rating may be any whole number from 1 to 4000. Count the
distinct combinations of ratings the workflows accept.

Rather than try every combination, send ranges of ratings through the workflows. A rule splits a
range into the part that matches and moves on, and the part that continues to the next rule.
*/

const RATING_RANGE: (u64, u64) = (1, 4000);

type RatingRanges = [(u64, u64); CATEGORIES];

fn combinations(ranges: &RatingRanges) -> Option<u64> {
    ranges
        .iter()
        .map(|&(low, high)| high - low + 1)
        .checked_product()
}

impl Solution<PartTwo> for Day19 {
    type Input = System;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let mut accepted: u64 = 0;
        let mut pending = vec![(input.start, [RATING_RANGE; CATEGORIES], 0usize)];

        while let Some((index, mut ranges, depth)) = pending.pop() {
            let workflow = &input.workflows[index];
            if depth > input.workflows.len() {
                return Err(Day19Error::RoutingLoop(workflow.name.clone()).into());
            }

            let mut send = |destination: Destination,
                            ranges: RatingRanges|
             -> Result<(), Day19Error> {
                match destination {
                    Destination::Accept => {
                        accepted = combinations(&ranges)
                            .and_then(|count| accepted.checked_add(count))
                            .ok_or(Day19Error::Overflow)?;
                    }
                    Destination::Reject => {}
                    Destination::Workflow(next) => pending.push((next, ranges, depth + 1)),
                }
                Ok(())
            };

            let mut remaining = true;
            for rule in &workflow.rules {
                let (matching, rest) = rule.split(ranges[rule.category]);
                if let Some(matching) = matching {
                    let mut matched = ranges;
                    matched[rule.category] = matching;
                    send(rule.destination, matched)?;
                }
                match rest {
                    Some(rest) => ranges[rule.category] = rest,
                    None => {
                        remaining = false;
                        break;
                    }
                }
            }
            if remaining {
                send(workflow.fallback, ranges)?;
            }
        }
        Ok(accepted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT: &str = r"px{a<2006:qkq,m>2090:A,rfg}
pv{a>1716:R,A}
lnx{m>1548:A,A}
rfg{s<537:gd,x>2440:R,A}
qs{s>3448:A,lnx}
qkq{x<1416:A,crn}
crn{x>2662:A,R}
in{s<1351:px,qqz}
qqz{s>2770:qs,m<1801:hdj,R}
gd{a>3333:R,R}
hdj{m>838:A,pv}

{x=787,m=2655,a=1222,s=2876}
{x=1679,m=44,a=2067,s=496}
{x=2036,m=264,a=79,s=2244}
{x=2461,m=1339,a=466,s=291}
{x=2127,m=1623,a=2188,s=1013}
";

    #[test]
    fn part_one_solves_example() -> DynamicResult<()> {
        let parsed = System::parse(EXAMPLE_INPUT)?;
        let result = <Day19 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 19114);
        Ok(())
    }

    #[test]
    fn part_two_solves_example() -> DynamicResult<()> {
        let parsed = System::parse(EXAMPLE_INPUT)?;
        let result = <Day19 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 167_409_079_868_000);
        Ok(())
    }

    #[test]
    fn rules_split_ranges() {
        let rule = Rule {
            category: 0,
            comparison: Comparison::Less,
            value: 10,
            destination: Destination::Accept,
        };
        assert_eq!(rule.split((1, 20)), (Some((1, 9)), Some((10, 20))));
        assert_eq!(rule.split((10, 20)), (None, Some((10, 20))));

        let rule = Rule {
            comparison: Comparison::Greater,
            ..rule
        };
        assert_eq!(rule.split((1, 20)), (Some((11, 20)), Some((1, 10))));
        assert_eq!(rule.split((1, 10)), (None, Some((1, 10))));
    }

    #[test]
    fn parse_rejects_undefined_workflow() {
        assert!(System::parse("in{x<5:nowhere,A}\n\n{x=1,m=1,a=1,s=1}\n").is_err());
    }
}
