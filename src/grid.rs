//! Character grids as matrices, and movement between their cells.

use aoc_framework::{DynamicError, DynamicResult};
use aoc_framework::parsing::parse_input_lines;
use nalgebra::DMatrix;
use thiserror::Error;

/// A cell position as `(row, col)`, the index order of [`DMatrix`].
pub type Position = (usize, usize);

#[derive(Error, Debug)]
pub enum ParseGridError {
    #[error("grid has no cells")]
    Empty,
    #[error("expected grid rows to be {expected} wide, found {found}")]
    UnequalWidth { expected: usize, found: usize },
}

/// Build a grid from rows of cells.
///
/// # Errors
///
/// Errors if there are no rows or the rows are empty, or if rows differ in width.
pub fn grid_from_rows<T>(rows: Vec<Vec<T>>) -> Result<DMatrix<T>, ParseGridError>
where
    T: nalgebra::Scalar,
{
    let cols = rows.first().ok_or(ParseGridError::Empty)?.len();
    if cols == 0 {
        return Err(ParseGridError::Empty);
    }
    if let Some(row) = rows.iter().find(|row| row.len() != cols) {
        return Err(ParseGridError::UnequalWidth {
            expected: cols,
            found: row.len(),
        });
    }
    Ok(DMatrix::from_row_iterator(
        rows.len(),
        cols,
        rows.into_iter().flatten(),
    ))
}

/// Parse each line of the input as a grid row, mapping characters to cells.
///
/// # Errors
///
/// Errors if `cell` fails on any character, if the input has no rows, or if rows differ in width.
pub fn parse_grid<T, E, F>(input: &str, mut cell: F) -> DynamicResult<DMatrix<T>>
where
    T: nalgebra::Scalar,
    E: Into<DynamicError>,
    F: FnMut(char) -> Result<T, E>,
{
    let rows = parse_input_lines(input, |_, line| {
        line.chars().map(&mut cell).collect::<Result<Vec<_>, _>>()
    })
    .collect::<Result<Vec<_>, _>>()?;
    Ok(grid_from_rows(rows)?)
}

/// A cardinal direction on a grid, with north toward row 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub const ALL: [Self; 4] = [Self::North, Self::East, Self::South, Self::West];

    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
        }
    }

    #[must_use]
    pub fn to_left(self) -> Self {
        match self {
            Self::North => Self::West,
            Self::East => Self::North,
            Self::South => Self::East,
            Self::West => Self::South,
        }
    }

    #[must_use]
    pub fn to_right(self) -> Self {
        self.to_left().opposite()
    }

    /// Move one cell from `position`, staying within a grid of `shape` `(rows, cols)`.
    ///
    /// # Returns
    ///
    /// `None` if the move leaves the grid.
    #[must_use]
    pub fn step(self, (row, col): Position, (rows, cols): (usize, usize)) -> Option<Position> {
        let next = match self {
            Self::North => (row.checked_sub(1)?, col),
            Self::East => (row, col + 1),
            Self::South => (row + 1, col),
            Self::West => (row, col.checked_sub(1)?),
        };
        (next.0 < rows && next.1 < cols).then_some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_grid_builds_rows() -> DynamicResult<()> {
        let grid = parse_grid("ab\ncd\nef\n", |ch| Ok::<_, ParseGridError>(ch))?;
        assert_eq!(grid.shape(), (3, 2));
        assert_eq!(grid[(2, 0)], 'e');
        assert_eq!(grid[(0, 1)], 'b');
        Ok(())
    }

    #[test]
    fn parse_grid_rejects_ragged_rows() {
        assert!(parse_grid("ab\nc\n", |ch| Ok::<_, ParseGridError>(ch)).is_err());
        assert!(parse_grid("", |ch| Ok::<_, ParseGridError>(ch)).is_err());
    }

    #[test]
    fn parse_grid_rejects_blank_rows() {
        let result = parse_grid("\n", |ch| Ok::<_, ParseGridError>(ch));
        assert!(result.is_err());
        assert!(matches!(
            grid_from_rows(vec![Vec::<char>::new(), Vec::new()]),
            Err(ParseGridError::Empty)
        ));
    }

    #[test]
    fn step_stays_in_bounds() {
        assert_eq!(Direction::North.step((0, 0), (2, 2)), None);
        assert_eq!(Direction::East.step((0, 1), (2, 2)), None);
        assert_eq!(Direction::South.step((0, 1), (2, 2)), Some((1, 1)));
        assert_eq!(Direction::West.step((1, 1), (2, 2)), Some((1, 0)));
    }

    #[test]
    fn turns_compose() {
        for direction in Direction::ALL {
            assert_eq!(direction.to_left().to_right(), direction);
            assert_eq!(direction.to_right().to_right(), direction.opposite());
        }
    }
}
