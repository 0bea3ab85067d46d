//! Plate well positions.
//!
//! A 96-well plate is addressed by row letter (A-H) and column number
//! (1-12). Positions are stored as separate row/column values and
//! rendered either plain (`B1`) or with a leading zero (`B01`) for
//! instrument sample sheets.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Valid row letters on a 96-well plate.
pub const ROWS: [char; 8] = ['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H'];

/// Number of columns on a 96-well plate.
pub const COLUMNS: u8 = 12;

/// A validated well position on a 96-well plate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WellPosition {
    row: char,
    column: u8,
}

impl WellPosition {
    /// Build a position from a row letter and a 1-based column number.
    pub fn new(row: char, column: u8) -> Result<Self, WellPositionError> {
        let row = row.to_ascii_uppercase();
        if !ROWS.contains(&row) {
            return Err(WellPositionError::Row(row));
        }
        if column == 0 || column > COLUMNS {
            return Err(WellPositionError::Column(column));
        }
        Ok(Self { row, column })
    }

    /// Parse a position string such as `"B1"`.
    ///
    /// Leading zeros in the column are accepted (`"A01"` parses as `A1`).
    pub fn parse(value: &str) -> Result<Self, WellPositionError> {
        let value = value.trim();
        let mut chars = value.chars();
        let row = chars
            .next()
            .ok_or_else(|| WellPositionError::Format(value.to_string()))?;
        let column: u8 = chars
            .as_str()
            .parse()
            .map_err(|_| WellPositionError::Format(value.to_string()))?;
        Self::new(row, column)
    }

    pub fn row(&self) -> char {
        self.row
    }

    pub fn column(&self) -> u8 {
        self.column
    }

    /// The position with the column padded to two digits, e.g. `"A01"`.
    ///
    /// This is the `Sample Well` format PacBio instruments expect.
    pub fn with_leading_zero(&self) -> String {
        format!("{}{:02}", self.row, self.column)
    }
}

impl fmt::Display for WellPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.row, self.column)
    }
}

impl TryFrom<String> for WellPosition {
    type Error = WellPositionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<WellPosition> for String {
    fn from(position: WellPosition) -> Self {
        position.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WellPositionError {
    #[error("row must be A-H, got '{0}'")]
    Row(char),

    #[error("column must be 1-12, got {0}")]
    Column(u8),

    #[error("'{0}' is not a well position")]
    Format(String),
}
