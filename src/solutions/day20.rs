use std::collections::{HashMap, VecDeque};

use aoc_framework::parsing::parse_input_lines;
use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};

use crate::numeric::checked_lcm;

#[solution_runner(
    name = "Day 20: Pulse Propagation",
    parsed = Configuration,
    part_one = Day20,
    part_two = Day20
)]
impl super::AdventOfCode2023<20> {}

/*
Input is a configuration of communication modules. Each line names a module and the modules it
sends pulses to: `%a -> inv, con`. A `%` prefix marks a flip-flop, `&` a conjunction, and the
module named `broadcaster` has no prefix. Destinations without a line of their own do nothing
with the pulses they receive.

Pulses are either high or low, and are processed in the order they are sent:

- The broadcaster repeats each pulse to all of its destinations.
- A flip-flop starts off. It ignores high pulses. A low pulse flips it, and it then sends high if
  it turned on or low if it turned off.
- A conjunction remembers the last pulse from each of its inputs, starting from low. After
  updating that memory it sends low if every remembered pulse is high, otherwise high.

Pushing the button sends one low pulse to the broadcaster.
*/

const BROADCASTER: &str = "broadcaster";
const FINAL_MACHINE: &str = "rx";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ModuleKind {
    Broadcaster,
    FlipFlop,
    Conjunction,
    /// A destination with no configuration line.
    Sink,
}

#[derive(Debug)]
struct Module {
    name: String,
    kind: ModuleKind,
    destinations: Vec<usize>,
    /// Modules sending pulses to this one.
    inputs: Vec<usize>,
}

#[derive(Debug)]
struct Configuration {
    modules: Vec<Module>,
    broadcaster: usize,
}

#[derive(thiserror::Error, Debug)]
enum ParseConfigurationError {
    #[error("expected a module line formatted as \"<module> -> <destinations>\"")]
    MalformedLine,

    #[error("module {0:?} is configured more than once")]
    DuplicateModule(String),

    #[error("configuration has no broadcaster")]
    MissingBroadcaster,
}

impl ParseData for Configuration {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let lines = parse_input_lines(input, |_, line| {
            let (module, destinations) = line
                .split_once("->")
                .ok_or(ParseConfigurationError::MalformedLine)?;
            let module = module.trim();
            let (kind, name) = if let Some(name) = module.strip_prefix('%') {
                (ModuleKind::FlipFlop, name)
            } else if let Some(name) = module.strip_prefix('&') {
                (ModuleKind::Conjunction, name)
            } else if module == BROADCASTER {
                (ModuleKind::Broadcaster, module)
            } else {
                return Err(ParseConfigurationError::MalformedLine);
            };
            let destinations: Vec<String> = destinations
                .split(',')
                .map(|destination| destination.trim().to_owned())
                .filter(|destination| !destination.is_empty())
                .collect();
            Ok((name.to_owned(), kind, destinations))
        })
        .collect::<Result<Vec<_>, _>>()?;

        let mut indices: HashMap<String, usize> = HashMap::new();
        let mut modules: Vec<Module> = Vec::new();
        for (name, kind, _) in &lines {
            if indices.contains_key(name) {
                return Err(ParseConfigurationError::DuplicateModule(name.clone()).into());
            }
            indices.insert(name.clone(), modules.len());
            modules.push(Module {
                name: name.clone(),
                kind: *kind,
                destinations: Vec::new(),
                inputs: Vec::new(),
            });
        }

        for (index, (_, _, destinations)) in lines.into_iter().enumerate() {
            for destination in destinations {
                let target = *indices.entry(destination.clone()).or_insert_with(|| {
                    modules.push(Module {
                        name: destination,
                        kind: ModuleKind::Sink,
                        destinations: Vec::new(),
                        inputs: Vec::new(),
                    });
                    modules.len() - 1
                });
                modules[index].destinations.push(target);
                modules[target].inputs.push(index);
            }
        }

        let broadcaster = *indices
            .get(BROADCASTER)
            .ok_or(ParseConfigurationError::MissingBroadcaster)?;
        Ok(Self {
            modules,
            broadcaster,
        })
    }
}

#[derive(Debug, Clone, Copy)]
struct Pulse {
    from: usize,
    to: usize,
    high: bool,
}

/// The memory of every module, and the pulses sent so far.
struct Machine<'a> {
    configuration: &'a Configuration,
    flip_flops_on: Vec<bool>,
    /// Last pulse remembered by each conjunction, aligned with the module's inputs.
    memories: Vec<Vec<bool>>,
    low_pulses: u64,
    high_pulses: u64,
}

impl<'a> Machine<'a> {
    fn new(configuration: &'a Configuration) -> Self {
        let modules = &configuration.modules;
        Self {
            configuration,
            flip_flops_on: vec![false; modules.len()],
            memories: modules
                .iter()
                .map(|module| vec![false; module.inputs.len()])
                .collect(),
            low_pulses: 0,
            high_pulses: 0,
        }
    }

    /// Push the button and process pulses until none remain, calling `observe` for every pulse.
    fn push_button<F>(&mut self, mut observe: F)
    where
        F: FnMut(Pulse),
    {
        let configuration = self.configuration;
        let modules = &configuration.modules;
        let mut queue = VecDeque::from([Pulse {
            from: configuration.broadcaster,
            to: configuration.broadcaster,
            high: false,
        }]);

        while let Some(pulse) = queue.pop_front() {
            observe(pulse);
            if pulse.high {
                self.high_pulses += 1;
            } else {
                self.low_pulses += 1;
            }

            let module = &modules[pulse.to];
            let sent = match module.kind {
                ModuleKind::Broadcaster => Some(pulse.high),
                ModuleKind::FlipFlop if !pulse.high => {
                    let on = &mut self.flip_flops_on[pulse.to];
                    *on = !*on;
                    Some(*on)
                }
                ModuleKind::FlipFlop | ModuleKind::Sink => None,
                ModuleKind::Conjunction => {
                    let memory = &mut self.memories[pulse.to];
                    if let Some(slot) = module.inputs.iter().position(|&input| input == pulse.from)
                    {
                        memory[slot] = pulse.high;
                    }
                    Some(!memory.iter().all(|&high| high))
                }
            };

            if let Some(high) = sent {
                queue.extend(module.destinations.iter().map(|&to| Pulse {
                    from: pulse.to,
                    to,
                    high,
                }));
            }
        }
    }
}

#[derive(thiserror::Error, Debug)]
enum Day20Error {
    #[error("pulse count product overflowed")]
    Overflow,

    #[error("configuration has no module named \"rx\"")]
    MissingFinalMachine,

    #[error("expected \"rx\" to be fed by exactly one conjunction")]
    UnusualFeeder,

    #[error("input {0:?} of the module feeding \"rx\" doesn't send high pulses periodically")]
    NonConstantPeriod(String),

    #[error("no low pulse reached \"rx\" within {0} button pushes")]
    PushLimit(u64),
}

/*
For part 1, push the button 1000 times. Multiply the total count of low pulses sent by the total
count of high pulses sent, button pulses included.
*/

const PART_ONE_PUSHES: usize = 1000;

struct Day20;

impl Solution<PartOne> for Day20 {
    type Input = Configuration;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let mut machine = Machine::new(input);
        for _ in 0..PART_ONE_PUSHES {
            machine.push_button(|_| {});
        }
        log::debug!(
            "sent {} low and {} high pulses",
            machine.low_pulses,
            machine.high_pulses
        );
        Ok(machine
            .low_pulses
            .checked_mul(machine.high_pulses)
            .ok_or(Day20Error::Overflow)?)
    }
}

/*
For part 2, find the fewest button pushes needed to deliver a single low pulse to the module named
`rx`.

Far too many pushes are needed to simulate. `rx` is fed by a single conjunction, which only sends
low once all of its inputs last sent it high. Each of those inputs sends high periodically, so
sample the pushes on which each input sends high, check the period is constant, and line the
periods up with their least common multiple.
*/

/// Pushes on which each feeder input must send high before its period is trusted.
const PERIOD_SAMPLES: usize = 4;
const PUSH_LIMIT: u64 = 1_000_000;

fn constant_period(samples: &[u64]) -> Option<u64> {
    let period = *samples.first()?;
    let mut expected = period;
    for &sample in samples {
        if sample != expected {
            return None;
        }
        expected = expected.checked_add(period)?;
    }
    Some(period)
}

impl Solution<PartTwo> for Day20 {
    type Input = Configuration;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let modules = &input.modules;
        let final_machine = modules
            .iter()
            .position(|module| module.name == FINAL_MACHINE)
            .ok_or(Day20Error::MissingFinalMachine)?;
        let &[feeder] = modules[final_machine].inputs.as_slice() else {
            return Err(Day20Error::UnusualFeeder.into());
        };
        let feeder_inputs = &modules[feeder].inputs;
        if modules[feeder].kind != ModuleKind::Conjunction || feeder_inputs.is_empty() {
            return Err(Day20Error::UnusualFeeder.into());
        }

        let mut samples: Vec<Vec<u64>> = vec![Vec::new(); feeder_inputs.len()];
        let mut machine = Machine::new(input);

        for push in 1..=PUSH_LIMIT {
            let mut reached = false;
            machine.push_button(|pulse| {
                if pulse.to == final_machine && !pulse.high {
                    reached = true;
                }
                if pulse.to == feeder
                    && pulse.high
                    && let Some(slot) = feeder_inputs.iter().position(|&input| input == pulse.from)
                    && samples[slot].last() != Some(&push)
                {
                    samples[slot].push(push);
                }
            });
            if reached {
                return Ok(push);
            }
            if samples.iter().all(|pushes| pushes.len() >= PERIOD_SAMPLES) {
                break;
            }
        }

        let mut periods = Vec::with_capacity(samples.len());
        for (slot, pushes) in samples.iter().enumerate() {
            let name = &modules[feeder_inputs[slot]].name;
            if pushes.len() < PERIOD_SAMPLES {
                return Err(Day20Error::PushLimit(PUSH_LIMIT).into());
            }
            let period =
                constant_period(pushes).ok_or_else(|| Day20Error::NonConstantPeriod(name.clone()))?;
            log::debug!("{name} sends high every {period} pushes");
            periods.push(period);
        }

        Ok(checked_lcm(periods).ok_or(Day20Error::Overflow)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT_ONE: &str = r"broadcaster -> a, b, c
%a -> b
%b -> c
%c -> inv
&inv -> a
";

    const EXAMPLE_INPUT_TWO: &str = r"broadcaster -> a
%a -> inv, con
&inv -> b
%b -> con
&con -> output
";

    /// Inverters of a two-bit counter feed the conjunction in front of `rx`.
    const COUNTER_INPUT: &str = r"broadcaster -> a
%a -> inva, b
%b -> invb
&inva -> con
&invb -> con
&con -> rx
";

    #[test]
    fn part_one_solves_examples() -> DynamicResult<()> {
        for (input, expected) in [(EXAMPLE_INPUT_ONE, 32_000_000), (EXAMPLE_INPUT_TWO, 11_687_500)]
        {
            let parsed = Configuration::parse(input)?;
            let result = <Day20 as Solution<PartOne>>::solve(&parsed)?;
            assert_eq!(result, expected);
        }
        Ok(())
    }

    #[test]
    fn part_two_finds_first_low_pulse_to_rx() -> DynamicResult<()> {
        let parsed = Configuration::parse(COUNTER_INPUT)?;
        let result = <Day20 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 4);
        Ok(())
    }

    /// Counters resetting at 5 and 7 pushes, each pulsing high then low through an inverter.
    const RESETTING_COUNTERS_INPUT: &str = r"broadcaster -> a0, b0
%a0 -> a1, ka
%a1 -> a2
%a2 -> ka
&ka -> a0, a1, ia
&ia -> con
%b0 -> b1, kb
%b1 -> b2, kb
%b2 -> kb
&kb -> b0, ib
&ib -> con
&con -> rx
";

    #[test]
    fn part_two_combines_feeder_periods() -> DynamicResult<()> {
        let parsed = Configuration::parse(RESETTING_COUNTERS_INPUT)?;
        let result = <Day20 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 35);
        Ok(())
    }

    #[test]
    fn part_two_requires_rx() -> DynamicResult<()> {
        let parsed = Configuration::parse(EXAMPLE_INPUT_TWO)?;
        assert!(<Day20 as Solution<PartTwo>>::solve(&parsed).is_err());
        Ok(())
    }

    #[test]
    fn periods_must_be_constant() {
        assert_eq!(constant_period(&[3, 6, 9, 12]), Some(3));
        assert_eq!(constant_period(&[3, 6, 10]), None);
        assert_eq!(constant_period(&[1, 3, 5]), None);
    }

    #[test]
    fn undefined_destinations_become_sinks() -> DynamicResult<()> {
        let parsed = Configuration::parse(EXAMPLE_INPUT_TWO)?;
        let output = parsed
            .modules
            .iter()
            .find(|module| module.name == "output")
            .map(|module| module.kind);
        assert_eq!(output, Some(ModuleKind::Sink));
        Ok(())
    }
}
