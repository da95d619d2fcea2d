//! Level data and deterministic sequencing
//!
//! All level-selection logic lives here. This module must stay pure:
//! - No I/O beyond the explicit catalog loader
//! - Catalog order is derived once at construction and read-only after
//! - `resolve` is a pure function of (cursor, catalog)

pub mod catalog;
pub mod data;
pub mod sequencer;

pub use catalog::{CatalogError, CatalogSource, LevelCatalog, validate_order};
pub use data::{
    BoxRow, CannonColumn, CellSpawn, ColorKind, Difficulty, GridPos, LevelDataError,
    LevelDefinition,
};
pub use sequencer::{NoLevelsAvailable, resolve, resolve_position};
