//! Framework of traits and utilities for Advent of Code solutions.
//!
//! A day's solution is split into an optional parse step ([`ParseData`]) and one [`Solution`]
//! implementation per part. The [`runner`] module drives a single selected part of a solution and
//! reports what happens through an [`OutputHandler`][runner::OutputHandler].
//!
//! # Quick Start
//!
//! Parse the input once into a structure:
//!
//! ```
//! # use aoc_framework::{DynamicResult, ParseData};
//! #
//! struct Depths(Vec<u32>);
//!
//! impl ParseData for Depths {
//!     fn parse(input: &str) -> DynamicResult<Self> {
//!         let depths = input
//!             .lines()
//!             .map(str::parse)
//!             .collect::<Result<_, _>>()?;
//!         Ok(Self(depths))
//!     }
//! }
//! ```
//!
//! Then solve each part from a reference to it:
//!
//! ```
//! # use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
//! #
//! # struct Depths(Vec<u32>);
//! # impl ParseData for Depths {
//! #     fn parse(input: &str) -> DynamicResult<Self> {
//! #         Ok(Self(input.lines().map(str::parse).collect::<Result<_, _>>()?))
//! #     }
//! # }
//! #
//! struct Sonar;
//!
//! impl Solution<PartOne> for Sonar {
//!     type Input = Depths;
//!     type Output = usize;
//!
//!     fn solve(input: &Depths) -> DynamicResult<usize> {
//!         Ok(input.0.windows(2).filter(|w| w[1] > w[0]).count())
//!     }
//! }
//!
//! impl Solution<PartTwo> for Sonar {
//!     type Input = Depths;
//!     type Output = usize;
//!
//!     fn solve(input: &Depths) -> DynamicResult<usize> {
//!         Ok(input.0.windows(4).filter(|w| w[3] > w[0]).count())
//!     }
//! }
//!
//! let depths = Depths::parse("199\n200\n208\n210\n200\n207\n240\n269\n260\n263\n").unwrap();
//! assert_eq!(<Sonar as Solution<PartOne>>::solve(&depths).unwrap(), 7);
//! assert_eq!(<Sonar as Solution<PartTwo>>::solve(&depths).unwrap(), 5);
//! ```
//!
//! A solution reading the raw input sets `Input = str` and skips the parse step.

#![warn(clippy::pedantic)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::branches_sharing_code,
    clippy::collection_is_never_read,
    clippy::equatable_if_let,
    clippy::needless_collect,
    clippy::needless_pass_by_ref_mut,
    clippy::option_if_let_else,
    clippy::set_contains_or_insert,
    clippy::suboptimal_flops,
    clippy::suspicious_operation_groupings,
    clippy::trait_duplication_in_bounds,
    clippy::type_repetition_in_bounds,
    clippy::use_self,
    clippy::useless_let_if_seq
)]
#![deny(
    clippy::expect_used,
    clippy::print_stderr,
    clippy::print_stdout,
    clippy::unwrap_used
)]

use std::error::Error;
use std::fmt::Display;
use std::str::FromStr;

use thiserror::Error;

pub mod parsing;
pub mod runner;

mod private {
    /// Seals [`Part`][super::Part] so only the markers in this crate implement it.
    pub trait Sealed {}
}

/// A dynamically dispatched error, wrapped in a [`Box`].
pub type DynamicError = Box<dyn Error + Send + Sync + 'static>;
/// A result that can return a [`DynamicError`] as an error.
pub type DynamicResult<T> = Result<T, DynamicError>;

/// An enum to identify a solution part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartKind {
    One,
    Two,
}

impl Display for PartKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::One => write!(f, "Part 1"),
            Self::Two => write!(f, "Part 2"),
        }
    }
}

/// A string did not name a part.
#[derive(Error, Debug, PartialEq, Eq)]
#[error("unknown part: {0:?} (expected \"1\" or \"2\")")]
pub struct UnknownPart(String);

impl FromStr for PartKind {
    type Err = UnknownPart;

    /// Parse a part selector, `"1"` or `"2"`.
    ///
    /// ```
    /// # use aoc_framework::PartKind;
    /// assert_eq!("2".parse(), Ok(PartKind::Two));
    /// assert!("3".parse::<PartKind>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(Self::One),
            "2" => Ok(Self::Two),
            other => Err(UnknownPart(other.to_owned())),
        }
    }
}

/// A marker trait used to identify a part for a solution.
///
/// Types implementing this trait are used as generic parameters to [`Solution<P>`] to indicate
/// which part the solution implements.
pub trait Part: private::Sealed {
    /// Get the related [`PartKind`] for this part.
    fn kind() -> PartKind;
}

/// Indicates a [`Solution`] implements part one.
pub struct PartOne;
impl private::Sealed for PartOne {}
impl Part for PartOne {
    fn kind() -> PartKind {
        PartKind::One
    }
}

/// Indicates a [`Solution`] implements part two.
pub struct PartTwo;
impl private::Sealed for PartTwo {}
impl Part for PartTwo {
    fn kind() -> PartKind {
        PartKind::Two
    }
}

/// A solution for one [`Part`] of a puzzle.
///
/// A single type commonly implements both `Solution<PartOne>` and `Solution<PartTwo>`.
pub trait Solution<P: Part> {
    /// The input data type passed to the solution.
    ///
    /// For direct string input, set to `str`.
    type Input: ?Sized;

    /// The output data type returned from the solution.
    type Output: Display;

    /// Solve with the given input.
    ///
    /// # Errors
    ///
    /// A solution can encounter varying errors while solving, like invalid input or a puzzle
    /// without an answer. It is returned as a dynamically dispatched error.
    fn solve(input: &Self::Input) -> DynamicResult<Self::Output>;
}

/// A trait for data structures that are created by parsing string input.
///
/// Solutions can be passed parsed data constructed through this trait by setting
/// [`Solution::Input`] to the implementing struct.
pub trait ParseData {
    /// Parse an input string into an instance of self.
    ///
    /// # Errors
    ///
    /// If parsing fails, the resulting error is returned as a dynamically dispatched error.
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn part_kind_parses_selectors() {
        assert_eq!("1".parse(), Ok(PartKind::One));
        assert_eq!(" 2\n".parse(), Ok(PartKind::Two));
        assert_eq!(
            "one".parse::<PartKind>(),
            Err(UnknownPart("one".to_owned()))
        );
    }

    #[test]
    fn part_markers_report_kind() {
        assert_eq!(PartOne::kind(), PartKind::One);
        assert_eq!(PartTwo::kind(), PartKind::Two);
        assert_eq!(PartKind::Two.to_string(), "Part 2");
    }
}
