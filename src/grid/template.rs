//! Tile map templates
//!
//! A template is a block of text with one line per row and one character per
//! cell, cells separated by spaces: `.` is an empty tile and `x` a gray "X"
//! tile. Any other character falls back to an empty tile.

use serde::{Deserialize, Serialize};

use super::Matrix;

/// Layout loaded when no template file is configured
pub const DEFAULT_TEMPLATE: &str = "
    . . . . . . . . . .
    . . . . . . . . . .
    . . . . . . . . . .
    . . . . . . . . . .
    . . . . . x . . . .
    . . . . . . . . . .
    . . . . . . . . . .
    . . . . . . . . . .
    . . . . . . . . . .
    . . . . . . . . . .
";

/// Visual payload of one grid position
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bg_color: Option<String>,
}

impl Cell {
    /// The gray "X" tile
    pub fn marked() -> Self {
        Self {
            icon: Some("X".to_string()),
            bg_color: Some("gray".to_string()),
        }
    }

    /// Map one template token; anything but a lone `.` or `x` is empty
    pub fn from_token(token: &str) -> Self {
        match token {
            "." => Cell::default(),
            "x" => Cell::marked(),
            _ => Cell::default(),
        }
    }
}

pub fn parse_map_template(template: &str) -> Matrix<Cell> {
    Matrix::from_template(template, Cell::from_token)
}
