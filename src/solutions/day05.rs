use aoc_framework::parsing::{InputScanner, parse_with_context};
use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};

#[solution_runner(
    name = "Day 5: If You Give A Seed A Fertilizer",
    parsed = Almanac,
    part_one = Day05,
    part_two = Day05
)]
impl super::AdventOfCode2023<5> {}

/*
Input is an almanac. The first line lists seed numbers after `seeds: `. Then blocks follow, each
headed like `seed-to-soil map:` and listing ranges as `destination_start source_start length`.

The maps chain from seeds to soil, fertilizer, water, light, temperature, humidity and finally
location. A value inside a range's source maps by the same offset into its destination. A value
outside every range maps to itself.
*/

type AlmanacNumber = u64;

#[derive(Debug, Clone, Copy)]
struct MapRange {
    destination_start: AlmanacNumber,
    source_start: AlmanacNumber,
    len: AlmanacNumber,
}

impl MapRange {
    /// The first source value past the range.
    fn source_end(&self) -> AlmanacNumber {
        self.source_start.saturating_add(self.len)
    }
}

/// One stage of the almanac, with ranges sorted by source start.
#[derive(Debug)]
struct AlmanacMap {
    source: String,
    destination: String,
    ranges: Vec<MapRange>,
}

impl AlmanacMap {
    fn new(
        source: String,
        destination: String,
        mut ranges: Vec<MapRange>,
    ) -> Result<Self, ParseAlmanacError> {
        ranges.sort_by_key(|range| range.source_start);
        if let Some(pair) = ranges
            .windows(2)
            .find(|pair| pair[0].source_end() > pair[1].source_start)
        {
            return Err(ParseAlmanacError::OverlappingRanges {
                map: format!("{source}-to-{destination}"),
                start: pair[1].source_start,
            });
        }
        Ok(Self {
            source,
            destination,
            ranges,
        })
    }

    /// Map a value through this stage.
    ///
    /// # Returns
    ///
    /// The mapped value and its slack: the count of consecutive values, starting from `value`,
    /// that map by the same offset. Slack is at least 1.
    fn map_with_slack(&self, value: AlmanacNumber) -> (AlmanacNumber, AlmanacNumber) {
        let following = self
            .ranges
            .partition_point(|range| range.source_start <= value);

        if let Some(range) = following
            .checked_sub(1)
            .map(|index| &self.ranges[index])
            .filter(|range| value < range.source_end())
        {
            let mapped = range.destination_start + (value - range.source_start);
            return (mapped, range.source_end() - value);
        }

        // unmapped values keep their identity until the next range starts
        let slack = self
            .ranges
            .get(following)
            .map_or(AlmanacNumber::MAX, |next| next.source_start - value);
        (value, slack)
    }
}

#[derive(Debug)]
struct Almanac {
    seeds: Vec<AlmanacNumber>,
    /// Maps in chain order, from seed to location.
    maps: Vec<AlmanacMap>,
}

#[derive(thiserror::Error, Debug)]
enum ParseAlmanacError {
    #[error("expected first line to list seeds after \"seeds: \"")]
    MissingSeeds,

    #[error("expected a map header like \"seed-to-soil map:\", found: {0:?}")]
    ExpectedMapHeader(String),

    #[error("expected three space-separated numbers as a map range, found: {0:?}")]
    ExpectedRangeFormat(String),

    #[error("expected map from {expected:?} to follow the previous map, found map from {found:?}")]
    BrokenChain { expected: String, found: String },

    #[error("expected the last map to reach \"location\", but it reaches {0:?}")]
    DoesNotReachLocation(String),

    #[error("ranges overlap in map {map} at source {start}")]
    OverlappingRanges { map: String, start: AlmanacNumber },
}

impl ParseData for Almanac {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let mut scanner = InputScanner::new(input);

        let seeds = scanner
            .next_item(|_, line| -> DynamicResult<_> {
                let seeds_list = line
                    .strip_prefix("seeds:")
                    .ok_or(ParseAlmanacError::MissingSeeds)?;
                Ok(seeds_list
                    .split_whitespace()
                    .map(parse_with_context::<AlmanacNumber>)
                    .collect::<Result<Vec<_>, _>>()?)
            })?
            .ok_or(ParseAlmanacError::MissingSeeds)?;

        let mut maps: Vec<AlmanacMap> = Vec::new();
        while !scanner.is_exhausted() {
            let (source, destination) = scanner
                .next_item(|_, line| {
                    line.strip_suffix(" map:")
                        .and_then(|name| name.split_once("-to-"))
                        .map(|(source, destination)| (source.to_owned(), destination.to_owned()))
                        .ok_or_else(|| ParseAlmanacError::ExpectedMapHeader(line.to_owned()))
                })?
                .ok_or_else(|| ParseAlmanacError::ExpectedMapHeader(String::new()))?;

            let expected_source = maps.last().map_or("seed", |map| map.destination.as_str());
            if source != expected_source {
                return Err(ParseAlmanacError::BrokenChain {
                    expected: expected_source.to_owned(),
                    found: source,
                }
                .into());
            }

            let ranges = scanner.collect_sequence(|_, line| -> DynamicResult<_> {
                let values: Vec<&str> = line.split_whitespace().collect();
                let [destination_start, source_start, len] = values[..] else {
                    return Err(ParseAlmanacError::ExpectedRangeFormat(line.to_owned()).into());
                };
                Ok(MapRange {
                    destination_start: parse_with_context(destination_start)?,
                    source_start: parse_with_context(source_start)?,
                    len: parse_with_context(len)?,
                })
            })?;

            maps.push(AlmanacMap::new(source, destination, ranges)?);
        }

        let reached = maps.last().map_or("seed", |map| map.destination.as_str());
        if reached != "location" {
            return Err(ParseAlmanacError::DoesNotReachLocation(reached.to_owned()).into());
        }

        Ok(Self { seeds, maps })
    }
}

impl Almanac {
    /// Map a seed through every stage to its location, with the smallest slack of all stages.
    fn location_with_slack(&self, seed: AlmanacNumber) -> (AlmanacNumber, AlmanacNumber) {
        self.maps
            .iter()
            .fold((seed, AlmanacNumber::MAX), |(value, slack), map| {
                let (mapped, map_slack) = map.map_with_slack(value);
                (mapped, slack.min(map_slack))
            })
    }
}

#[derive(thiserror::Error, Debug)]
enum Day05Error {
    #[error("no seeds to find a location for")]
    NoSeeds,

    #[error("expected seed ranges as pairs of numbers, found an odd count of {0}")]
    UnpairedSeedRange(usize),
}

/*
For part 1, find the lowest location of any listed seed.
*/

struct Day05;

impl Solution<PartOne> for Day05 {
    type Input = Almanac;
    type Output = AlmanacNumber;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let lowest = input
            .seeds
            .iter()
            .map(|&seed| input.location_with_slack(seed).0)
            .min()
            .ok_or(Day05Error::NoSeeds)?;
        Ok(lowest)
    }
}

/*
For part 2, the seeds line lists pairs of range start and length instead. The ranges hold far too
many seeds to map one by one.

Within a run of seeds that takes the same range in every stage, locations only increase, so the
first seed of the run has the lowest location. Mapping a seed also reports the run's remaining
length, which lets the search jump straight to the next run.
*/

impl Solution<PartTwo> for Day05 {
    type Input = Almanac;
    type Output = AlmanacNumber;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        if input.seeds.len() % 2 != 0 {
            return Err(Day05Error::UnpairedSeedRange(input.seeds.len()).into());
        }

        let mut lowest: Option<AlmanacNumber> = None;
        let mut evaluated = 0usize;
        for pair in input.seeds.chunks_exact(2) {
            let (start, len) = (pair[0], pair[1]);
            let end = start.saturating_add(len);

            let mut seed = start;
            while seed < end {
                let (location, slack) = input.location_with_slack(seed);
                lowest = Some(lowest.map_or(location, |low| low.min(location)));
                evaluated += 1;
                seed = seed.saturating_add(slack);
            }
        }
        log::debug!("evaluated {evaluated} seeds across all ranges");

        Ok(lowest.ok_or(Day05Error::NoSeeds)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT: &str = r"seeds: 79 14 55 13

seed-to-soil map:
50 98 2
52 50 48

soil-to-fertilizer map:
0 15 37
37 52 2
39 0 15

fertilizer-to-water map:
49 53 8
0 11 42
42 0 7
57 7 4

water-to-light map:
88 18 7
18 25 70

light-to-temperature map:
45 77 23
81 45 19
68 64 13

temperature-to-humidity map:
0 69 1
1 0 69

humidity-to-location map:
60 56 37
56 93 4
";

    #[test]
    fn part_one_solves_example() -> DynamicResult<()> {
        let parsed = Almanac::parse(EXAMPLE_INPUT)?;
        let result = <Day05 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 35);
        Ok(())
    }

    #[test]
    fn part_two_solves_example() -> DynamicResult<()> {
        let parsed = Almanac::parse(EXAMPLE_INPUT)?;
        let result = <Day05 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 46);
        Ok(())
    }

    #[test]
    fn slack_reaches_range_edges() -> DynamicResult<()> {
        let map = AlmanacMap::new(
            "seed".to_owned(),
            "soil".to_owned(),
            vec![
                MapRange {
                    destination_start: 52,
                    source_start: 50,
                    len: 48,
                },
                MapRange {
                    destination_start: 50,
                    source_start: 98,
                    len: 2,
                },
            ],
        )?;
        // before any range, identity until the first range starts
        assert_eq!(map.map_with_slack(10), (10, 40));
        assert_eq!(map.map_with_slack(79), (81, 19));
        assert_eq!(map.map_with_slack(99), (51, 1));
        assert_eq!(map.map_with_slack(100), (100, AlmanacNumber::MAX));
        Ok(())
    }

    #[test]
    fn parse_rejects_out_of_order_maps() {
        let input = "seeds: 1\n\nsoil-to-water map:\n1 2 3\n";
        assert!(Almanac::parse(input).is_err());
    }
}
