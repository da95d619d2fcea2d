//! Level definitions as authored
//!
//! Plain serde data: authored once at design time, read-only at runtime.
//! The JSON format uses per-field defaults so hand-written level files can
//! stay minimal.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{DEFAULT_GRID_COLS, DEFAULT_GRID_ROWS};

/// Box/cube colors available to level authors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorKind {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
    Orange,
    Cyan,
    Pink,
}

/// Level difficulty tag, ordered Normal < Medium < Hard
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    #[default]
    Normal,
    Medium,
    Hard,
}

/// Integer grid coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridPos {
    pub col: i32,
    pub row: i32,
}

impl GridPos {
    pub fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }
}

/// One conveyor row of boxes, in conveyor order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoxRow {
    pub boxes: Vec<ColorKind>,
}

impl BoxRow {
    pub fn new(boxes: Vec<ColorKind>) -> Self {
        Self { boxes }
    }
}

/// A colored cell pinned to a grid position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellSpawn {
    pub pos: GridPos,
    pub color: ColorKind,
}

/// Colors fed to one cannon, in firing order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CannonColumn {
    pub colors: Vec<ColorKind>,
}

/// Validation failures for authored level data
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LevelDataError {
    #[error("level '{0}' has a zero-sized grid")]
    EmptyGrid(String),
    #[error("level '{0}' has no boxes to clear")]
    NoBoxes(String),
    #[error("level '{name}': point ({col}, {row}) is outside the {cols}x{rows} grid")]
    OutOfGrid {
        name: String,
        col: i32,
        row: i32,
        cols: usize,
        rows: usize,
    },
}

/// One playable level, immutable after authoring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelDefinition {
    pub name: String,
    /// Played once in the initial pass, then excluded from loop replay
    #[serde(default)]
    pub skip_in_loop: bool,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default = "default_grid_rows")]
    pub grid_rows: usize,
    #[serde(default = "default_grid_cols")]
    pub grid_cols: usize,
    /// Conveyor rows of boxes to clear
    #[serde(default)]
    pub rows: Vec<BoxRow>,
    /// Conveyor spline control points on the grid
    #[serde(default)]
    pub conveyor_points: Vec<GridPos>,
    /// Pre-colored grid cells
    #[serde(default)]
    pub cells: Vec<CellSpawn>,
    /// Vertical arrangement of the cannon columns
    #[serde(default = "default_cannon_grid_rows")]
    pub cannon_grid_rows: usize,
    #[serde(default)]
    pub cannon_columns: Vec<CannonColumn>,
}

fn default_grid_rows() -> usize {
    DEFAULT_GRID_ROWS
}

fn default_grid_cols() -> usize {
    DEFAULT_GRID_COLS
}

fn default_cannon_grid_rows() -> usize {
    1
}

impl LevelDefinition {
    /// Minimal level with default grid and no content (tests, demos)
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            skip_in_loop: false,
            difficulty: Difficulty::Normal,
            grid_rows: DEFAULT_GRID_ROWS,
            grid_cols: DEFAULT_GRID_COLS,
            rows: Vec::new(),
            conveyor_points: Vec::new(),
            cells: Vec::new(),
            cannon_grid_rows: 1,
            cannon_columns: Vec::new(),
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn boxes_in_row(&self, row: usize) -> usize {
        self.rows.get(row).map(|r| r.boxes.len()).unwrap_or(0)
    }

    /// Total number of boxes the player must clear
    pub fn total_boxes(&self) -> usize {
        self.rows.iter().map(|r| r.boxes.len()).sum()
    }

    /// How many boxes of `color` the conveyor will deliver
    pub fn box_demand(&self, color: ColorKind) -> usize {
        self.rows
            .iter()
            .flat_map(|r| r.boxes.iter())
            .filter(|&&c| c == color)
            .count()
    }

    /// How many cubes of `color` the cannons can fire
    pub fn cannon_supply(&self, color: ColorKind) -> usize {
        self.cannon_columns
            .iter()
            .flat_map(|c| c.colors.iter())
            .filter(|&&c| c == color)
            .count()
    }

    pub fn in_grid(&self, pos: GridPos) -> bool {
        pos.col >= 0
            && pos.row >= 0
            && (pos.col as usize) < self.grid_cols
            && (pos.row as usize) < self.grid_rows
    }

    /// Authoring-time sanity checks, run when a catalog is loaded
    pub fn validate(&self) -> Result<(), LevelDataError> {
        if self.grid_rows == 0 || self.grid_cols == 0 {
            return Err(LevelDataError::EmptyGrid(self.name.clone()));
        }
        if self.total_boxes() == 0 {
            return Err(LevelDataError::NoBoxes(self.name.clone()));
        }
        for pos in self
            .conveyor_points
            .iter()
            .chain(self.cells.iter().map(|c| &c.pos))
        {
            if !self.in_grid(*pos) {
                return Err(LevelDataError::OutOfGrid {
                    name: self.name.clone(),
                    col: pos.col,
                    row: pos.row,
                    cols: self.grid_cols,
                    rows: self.grid_rows,
                });
            }
        }
        Ok(())
    }
}
