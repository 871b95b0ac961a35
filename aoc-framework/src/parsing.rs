//! Utility functions and errors for parsing input.

use std::iter::{Enumerate, Peekable};
use std::str::{FromStr, Lines};

use thiserror::Error;

use crate::DynamicError;

/// A string parsing error with context of the string that was being parsed.
#[derive(Error, Debug)]
#[error("failed to parse string: {string:?}")]
pub struct ParseContextError<E>
where
    E: std::error::Error,
{
    /// The string that was being parsed.
    string: String,
    source: E,
}

impl<E> ParseContextError<E>
where
    E: std::error::Error,
{
    /// Wrap `source` with the string that failed to parse.
    pub fn new(source: E, string: &str) -> Self {
        Self {
            string: string.to_owned(),
            source,
        }
    }
}

/// Parse a string slice into another type.
///
/// This wraps [`str::parse`] and maps errors to [`ParseContextError`].
///
/// # Errors
///
/// Will return a [`ParseContextError`] with the given string as context and
/// [`F::Err`][FromStr::Err] as the source if it's not possible to parse the string into the desired
/// type.
pub fn parse_with_context<F>(string: &str) -> Result<F, ParseContextError<F::Err>>
where
    F: FromStr,
    F::Err: std::error::Error,
{
    string
        .parse::<F>()
        .map_err(|source| ParseContextError::new(source, string))
}

/// A line in an input string caused a parsing error.
#[derive(Error, Debug)]
#[error("failure parsing line {}", .line_index.saturating_add(1))]
pub struct InvalidLine {
    /// The line index, zero based.
    /// This will be formatted to a one-based number for display.
    line_index: usize,
    source: DynamicError,
}

impl InvalidLine {
    fn new(line_index: usize, source: impl Into<DynamicError>) -> Self {
        Self {
            line_index,
            source: source.into(),
        }
    }

    /// The one-based number of the line that failed to parse.
    #[must_use]
    pub fn line_number(&self) -> usize {
        self.line_index.saturating_add(1)
    }
}

/// Parse lines with a closure, mapping any line's error into an [`InvalidLine`].
///
/// # Arguments
/// - `input` - The input string to parse.
/// - `offset` - An offset to add to the line index passed to `parser` and reported in
///   [`InvalidLine`] errors. Useful when parsing a later slice of a larger input. Set to `0` if no
///   offset is needed.
/// - `parser` - A closure that takes a line index and line string and returns a result.
///
/// # Returns
///
/// An iterator of parsing results for each line.
pub fn parse_lines_with_offset<T, E, F>(
    input: &str,
    offset: usize,
    mut parser: F,
) -> impl Iterator<Item = Result<T, InvalidLine>>
where
    E: Into<DynamicError>,
    F: FnMut(usize, &str) -> Result<T, E>,
{
    input.lines().enumerate().map(move |(index, line)| {
        let line_index = index.saturating_add(offset);
        parser(line_index, line).map_err(|source| InvalidLine::new(line_index, source))
    })
}

/// Parse every line of the input with a closure receiving the zero-based line index.
///
/// ```
/// # use aoc_framework::parsing::parse_input_lines;
/// let widths: Vec<usize> = parse_input_lines("ab\ncde\n", |_, line| {
///     Ok::<_, std::convert::Infallible>(line.len())
/// })
/// .collect::<Result<_, _>>()
/// .unwrap();
/// assert_eq!(widths, [2, 3]);
/// ```
pub fn parse_input_lines<T, E, F>(
    input: &str,
    parser: F,
) -> impl Iterator<Item = Result<T, InvalidLine>>
where
    E: Into<DynamicError>,
    F: FnMut(usize, &str) -> Result<T, E>,
{
    parse_lines_with_offset(input, 0, parser)
}

/// A line is blank when it holds nothing but whitespace.
fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// A cursor over input lines, for inputs made of blank-line separated blocks.
///
/// ```
/// # use aoc_framework::parsing::InputScanner;
/// # use aoc_framework::DynamicResult;
/// # fn main() -> DynamicResult<()> {
/// let mut scanner = InputScanner::new("seeds: 1 2\n\na\nb\n\nc\n");
/// let header = scanner.next_item(|_, line| Ok::<_, std::convert::Infallible>(line.len()))?;
/// assert_eq!(header, Some(10));
///
/// scanner.skip_empty();
/// let block = scanner.collect_sequence(|_, line| Ok::<_, std::convert::Infallible>(line.to_owned()))?;
/// assert_eq!(block, ["a", "b"]);
///
/// assert_eq!(scanner.skip_empty(), Some(5));
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct InputScanner<'a> {
    lines: Peekable<Enumerate<Lines<'a>>>,
}

impl<'a> InputScanner<'a> {
    /// Start scanning at the first line of the input.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self {
            lines: input.lines().enumerate().peekable(),
        }
    }

    /// Advance past blank lines.
    ///
    /// # Returns
    ///
    /// The zero-based index of the next non-blank line, or `None` if the input is exhausted.
    pub fn skip_empty(&mut self) -> Option<usize> {
        while let Some(&(index, line)) = self.lines.peek() {
            if !is_blank(line) {
                return Some(index);
            }
            self.lines.next();
        }
        None
    }

    /// Check if no non-blank line remains.
    pub fn is_exhausted(&mut self) -> bool {
        self.skip_empty().is_none()
    }

    /// Skip blank lines, then parse the next line.
    ///
    /// # Errors
    ///
    /// An [`InvalidLine`] error is returned if the parser fails on the line.
    ///
    /// # Returns
    ///
    /// The parsed line, or `None` if the input is exhausted.
    pub fn next_item<T, E, F>(&mut self, parser: F) -> Result<Option<T>, InvalidLine>
    where
        E: Into<DynamicError>,
        F: FnOnce(usize, &str) -> Result<T, E>,
    {
        self.skip_empty();
        self.next_in_sequence(parser)
    }

    /// Parse the next line only if it continues the current block (it is not blank).
    ///
    /// A blank line ending the block is left in place.
    ///
    /// # Errors
    ///
    /// An [`InvalidLine`] error is returned if the parser fails on the line.
    ///
    /// # Returns
    ///
    /// The parsed line, or `None` if the next line is blank or the input is exhausted.
    pub fn next_in_sequence<T, E, F>(&mut self, parser: F) -> Result<Option<T>, InvalidLine>
    where
        E: Into<DynamicError>,
        F: FnOnce(usize, &str) -> Result<T, E>,
    {
        match self.lines.next_if(|&(_, line)| !is_blank(line)) {
            Some((index, line)) => parser(index, line)
                .map(Some)
                .map_err(|source| InvalidLine::new(index, source)),
            None => Ok(None),
        }
    }

    /// Parse consecutive non-blank lines until a blank line or the end of input.
    ///
    /// # Errors
    ///
    /// An [`InvalidLine`] error is returned for the first line the parser fails on.
    pub fn collect_sequence<T, E, F>(&mut self, mut parser: F) -> Result<Vec<T>, InvalidLine>
    where
        E: Into<DynamicError>,
        F: FnMut(usize, &str) -> Result<T, E>,
    {
        let mut items = Vec::new();
        while let Some(item) = self.next_in_sequence(&mut parser)? {
            items.push(item);
        }
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use std::num::ParseIntError;

    use super::*;

    const BLOCKS: &str = "header\n\n1\n2\n3\n\n\n4\nx\n";

    #[test]
    fn parse_input_lines_reports_one_based_line() {
        let result: Result<Vec<u8>, _> =
            parse_input_lines("1\n2\nthree\n", |_, line| line.parse::<u8>()).collect();
        let error = result.expect_err("third line is not a number");
        assert_eq!(error.line_number(), 3);
        assert_eq!(error.to_string(), "failure parsing line 3");
    }

    #[test]
    fn context_error_keeps_failed_string() {
        let error = parse_with_context::<u8>("300").expect_err("300 does not fit u8");
        assert_eq!(error.to_string(), "failed to parse string: \"300\"");

        let built = ParseContextError::new(error.source, "other");
        assert_eq!(built.to_string(), "failed to parse string: \"other\"");
    }

    #[test]
    fn parse_lines_with_offset_shifts_indices() {
        let indices: Vec<usize> =
            parse_lines_with_offset("a\nb\n", 10, |index, _| Ok::<_, ParseIntError>(index))
                .collect::<Result<_, _>>()
                .expect("parser never fails");
        assert_eq!(indices, [10, 11]);
    }

    #[test]
    fn scanner_walks_blocks() -> Result<(), InvalidLine> {
        let mut scanner = InputScanner::new(BLOCKS);

        let header = scanner.next_item(|_, line| Ok::<_, ParseIntError>(line.to_owned()))?;
        assert_eq!(header.as_deref(), Some("header"));

        // the blank line after the header ends that block
        assert!(
            scanner
                .next_in_sequence(|_, line| line.parse::<u8>())?
                .is_none()
        );

        let first = {
            scanner.skip_empty();
            scanner.collect_sequence(|_, line| line.parse::<u8>())?
        };
        assert_eq!(first, [1, 2, 3]);

        assert_eq!(scanner.skip_empty(), Some(7));
        assert_eq!(scanner.next_in_sequence(|_, line| line.parse::<u8>())?, Some(4));
        assert!(!scanner.is_exhausted());
        Ok(())
    }

    #[test]
    fn scanner_reports_failing_line() {
        let mut scanner = InputScanner::new(BLOCKS);
        scanner.next_item(|_, _| Ok::<_, ParseIntError>(())).ok();
        scanner.skip_empty();
        scanner
            .collect_sequence(|_, line| line.parse::<u8>())
            .expect("first block is numeric");
        let error = scanner
            .next_item(|_, line| line.parse::<u8>())
            .and_then(|_| scanner.next_item(|_, line| line.parse::<u8>()))
            .expect_err("line 9 is not numeric");
        assert_eq!(error.line_number(), 9);
    }

    #[test]
    fn scanner_exhausts_on_trailing_blanks() {
        let mut scanner = InputScanner::new("only\n\n\n");
        scanner
            .next_item(|_, _| Ok::<_, ParseIntError>(()))
            .expect("line parses");
        assert!(scanner.is_exhausted());
        assert_eq!(
            scanner
                .next_item(|_, _| Ok::<_, ParseIntError>(()))
                .expect("no line to fail on"),
            None
        );
    }
}
