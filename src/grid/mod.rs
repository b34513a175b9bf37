//! Row-major tile matrix with value-style updates
//!
//! Every "mutation" returns a new [`Matrix`]; the receiver is never touched,
//! so a grid held by the app is only ever replaced as a whole.

pub mod template;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Position of a cell inside a [`Matrix`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Location {
    pub row: usize,
    pub col: usize,
}

impl Location {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.row, self.col)
    }
}

/// Parses `row,col` (whitespace around either number is ignored)
impl FromStr for Location {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (row, col) = s
            .split_once(',')
            .ok_or_else(|| format!("expected `row,col`, got `{}`", s))?;
        let row = row
            .trim()
            .parse::<usize>()
            .map_err(|e| format!("invalid row `{}`: {}", row.trim(), e))?;
        let col = col
            .trim()
            .parse::<usize>()
            .map_err(|e| format!("invalid column `{}`: {}", col.trim(), e))?;
        Ok(Self { row, col })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatrixError {
    #[error("location {location} is outside the grid ({rows} rows)")]
    OutOfBounds { location: Location, rows: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Matrix<T> {
    rows: Vec<Vec<T>>,
}

impl<T> Default for Matrix<T> {
    fn default() -> Self {
        Self { rows: Vec::new() }
    }
}

impl<T> Matrix<T> {
    /// Build a matrix from a whitespace separated character template.
    ///
    /// The whole template and each line are trimmed, so indented multi-line
    /// literals work. Every token is handed to `cell` whole, so a malformed
    /// multi-character token is the mapper's to reject.
    /// Rows are taken as-is; nothing checks that they have equal length.
    pub fn from_template(template: &str, mut cell: impl FnMut(&str) -> T) -> Self {
        let rows = template
            .trim()
            .lines()
            .map(|line| line.split_whitespace().map(&mut cell).collect())
            .collect();
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<T>] {
        &self.rows
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Length of the longest row
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(Vec::is_empty)
    }

    pub fn get(&self, location: Location) -> Result<&T, MatrixError> {
        self.rows
            .get(location.row)
            .and_then(|row| row.get(location.col))
            .ok_or(MatrixError::OutOfBounds {
                location,
                rows: self.rows.len(),
            })
    }

    /// Return a copy of this matrix with the cell at `location` replaced
    pub fn update(&self, location: Location, value: T) -> Result<Self, MatrixError>
    where
        T: Clone,
    {
        self.get(location)?;
        let mut rows = self.rows.clone();
        rows[location.row][location.col] = value;
        Ok(Self { rows })
    }

    /// Produce one value per cell, keeping the shape
    pub fn map<'a, U>(&'a self, mut f: impl FnMut(&'a T, Location) -> U) -> Matrix<U> {
        let rows = self
            .rows
            .iter()
            .enumerate()
            .map(|(row, cells)| {
                cells
                    .iter()
                    .enumerate()
                    .map(|(col, cell)| f(cell, Location { row, col }))
                    .collect()
            })
            .collect();
        Matrix { rows }
    }

    /// Row-major walk over every cell
    pub fn iter(&self) -> impl Iterator<Item = (Location, &T)> + '_ {
        self.rows.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .map(move |(col, cell)| (Location { row, col }, cell))
        })
    }

    pub fn into_cells(self) -> impl Iterator<Item = T> {
        self.rows.into_iter().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(template: &str) -> Matrix<u32> {
        Matrix::from_template(template, |token| token.parse::<u32>().unwrap_or(0))
    }

    #[test]
    fn test_from_template_trims_and_splits() {
        let matrix = numbered(
            "
            1 2 3
            4 5 6
        ",
        );
        assert_eq!(matrix.rows(), &[vec![1, 2, 3], vec![4, 5, 6]]);
        assert_eq!(matrix.height(), 2);
        assert_eq!(matrix.width(), 3);
    }

    #[test]
    fn test_tokens_reach_the_mapper_whole() {
        let matrix = numbered("12 3\n4 56");
        assert_eq!(matrix.rows(), &[vec![12, 3], vec![4, 56]]);
    }

    #[test]
    fn test_uneven_rows_are_kept() {
        let matrix = numbered("1 2 3\n4");
        assert_eq!(matrix.rows()[1], vec![4]);
        assert_eq!(matrix.width(), 3);
        assert!(matrix.get(Location::new(1, 1)).is_err());
    }

    #[test]
    fn test_get_out_of_bounds() {
        let matrix = numbered("1 2\n3 4");
        assert_eq!(*matrix.get(Location::new(1, 0)).unwrap(), 3);
        assert_eq!(
            matrix.get(Location::new(2, 0)),
            Err(MatrixError::OutOfBounds {
                location: Location::new(2, 0),
                rows: 2
            })
        );
    }

    #[test]
    fn test_update_leaves_original_untouched() {
        let matrix = numbered("1 2\n3 4");
        let updated = matrix.update(Location::new(0, 1), 9).unwrap();
        assert_eq!(updated.rows(), &[vec![1, 9], vec![3, 4]]);
        assert_eq!(matrix.rows(), &[vec![1, 2], vec![3, 4]]);
        assert!(matrix.update(Location::new(0, 2), 9).is_err());
    }

    #[test]
    fn test_map_passes_locations() {
        let matrix = numbered("1 2\n3 4");
        let mapped = matrix.map(|value, location| format!("{}@{}", value, location));
        assert_eq!(
            mapped.into_cells().collect::<Vec<_>>(),
            vec!["1@0.0", "2@0.1", "3@1.0", "4@1.1"]
        );
    }

    #[test]
    fn test_iter_is_row_major() {
        let matrix = numbered("1 2\n3");
        let locations: Vec<_> = matrix.iter().map(|(location, _)| location).collect();
        assert_eq!(
            locations,
            vec![Location::new(0, 0), Location::new(0, 1), Location::new(1, 0)]
        );
    }

    #[test]
    fn test_location_parsing() {
        assert_eq!("3,4".parse::<Location>(), Ok(Location::new(3, 4)));
        assert_eq!(" 0 , 9 ".parse::<Location>(), Ok(Location::new(0, 9)));
        assert!("3".parse::<Location>().is_err());
        assert!("a,1".parse::<Location>().is_err());
    }

    #[test]
    fn test_empty_template() {
        let matrix = numbered("   \n ");
        assert!(matrix.is_empty());
        assert_eq!(matrix.width(), 0);
    }
}
