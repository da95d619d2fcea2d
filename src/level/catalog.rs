//! The ordered level catalog
//!
//! Insertion order is the default play order. A validated reorder list
//! (remote config) may replace it; validation is all-or-nothing with
//! fallback to raw order. The derived order is computed once here and the
//! catalog is read-only afterwards.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::data::{LevelDataError, LevelDefinition};
use crate::consts::DEFAULT_LOOP_START;
use crate::remote::RemoteOverrides;

/// Catalog loading failures
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid level data: {0}")]
    Level(#[from] LevelDataError),
}

/// Check a candidate reorder list against the catalog bounds.
///
/// All-or-nothing: any element outside `[0, catalog_size)` rejects the
/// whole candidate. Callers fall back to raw authored order on `None`.
pub fn validate_order(candidate: &[i64], catalog_size: usize) -> Option<Vec<usize>> {
    let mut order = Vec::with_capacity(candidate.len());
    for &value in candidate {
        if value < 0 || value as usize >= catalog_size {
            log::warn!("level order entry {value} out of range for {catalog_size} levels");
            return None;
        }
        order.push(value as usize);
    }
    Some(order)
}

/// On-disk shape of an authored catalog file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSource {
    #[serde(default = "default_loop_start")]
    pub loop_start_level: usize,
    pub levels: Vec<LevelDefinition>,
}

fn default_loop_start() -> usize {
    DEFAULT_LOOP_START
}

impl CatalogSource {
    /// Derive the runtime catalog, applying remote overrides when present.
    pub fn into_catalog(self, overrides: Option<&RemoteOverrides>) -> LevelCatalog {
        let loop_start = overrides
            .and_then(|o| o.loop_start_level)
            .unwrap_or(self.loop_start_level);
        let reorder = overrides.and_then(|o| o.reorder_candidate());
        LevelCatalog::with_order(self.levels, loop_start, reorder.as_deref())
    }
}

/// Ordered collection of level definitions plus loop configuration
#[derive(Debug, Clone)]
pub struct LevelCatalog {
    levels: Vec<LevelDefinition>,
    loop_start: usize,
    /// Indices into `levels` in actual play order
    effective_order: Vec<usize>,
}

impl LevelCatalog {
    /// Catalog in raw authored order with the default loop start
    pub fn new(levels: Vec<LevelDefinition>) -> Self {
        Self::with_order(levels, DEFAULT_LOOP_START, None)
    }

    /// Catalog with an explicit loop start and an optional reorder candidate.
    ///
    /// A candidate that fails validation is dropped (raw order is kept); a
    /// loop start outside `[1, len)` resets to 1. Both recoveries log a
    /// warning and never fail the construction.
    pub fn with_order(
        levels: Vec<LevelDefinition>,
        loop_start: usize,
        reorder: Option<&[i64]>,
    ) -> Self {
        let effective_order = match reorder.and_then(|c| validate_order(c, levels.len())) {
            Some(order) => order,
            None => {
                if reorder.is_some() {
                    log::warn!("invalid level order, falling back to authored order");
                }
                (0..levels.len()).collect()
            }
        };

        let loop_start = if effective_order.len() < 2 {
            DEFAULT_LOOP_START
        } else if loop_start < 1 || loop_start >= effective_order.len() {
            log::warn!(
                "loop start {loop_start} out of range for {} levels, resetting to {DEFAULT_LOOP_START}",
                effective_order.len()
            );
            DEFAULT_LOOP_START
        } else {
            loop_start
        };

        Self {
            levels,
            loop_start,
            effective_order,
        }
    }

    /// Parse an authored catalog from JSON, validating every level.
    pub fn from_json(
        json: &str,
        overrides: Option<&RemoteOverrides>,
    ) -> Result<Self, CatalogError> {
        let source: CatalogSource = serde_json::from_str(json)?;
        for level in &source.levels {
            level.validate()?;
        }
        Ok(source.into_catalog(overrides))
    }

    /// Load an authored catalog file from disk.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(
        path: &std::path::Path,
        overrides: Option<&RemoteOverrides>,
    ) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&json, overrides)?;
        log::info!("loaded {} levels from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// Number of playable slots (length of the effective order)
    pub fn len(&self) -> usize {
        self.effective_order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effective_order.is_empty()
    }

    pub fn loop_start(&self) -> usize {
        self.loop_start
    }

    pub fn effective_order(&self) -> &[usize] {
        &self.effective_order
    }

    /// Level at a position in the effective order.
    ///
    /// Positions come from the sequencer and are always in range; the
    /// effective order only holds validated indices.
    pub fn level_at(&self, position: usize) -> &LevelDefinition {
        &self.levels[self.effective_order[position]]
    }

    /// Authored levels in raw order
    pub fn levels(&self) -> &[LevelDefinition] {
        &self.levels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::data::BoxRow;
    use crate::level::data::ColorKind;

    fn levels(n: usize) -> Vec<LevelDefinition> {
        (0..n)
            .map(|i| LevelDefinition::named(format!("Level-{}", i + 1)))
            .collect()
    }

    #[test]
    fn test_raw_order_by_default() {
        let catalog = LevelCatalog::new(levels(4));
        assert_eq!(catalog.effective_order(), &[0, 1, 2, 3]);
        assert_eq!(catalog.loop_start(), 1);
        assert_eq!(catalog.len(), 4);
    }

    #[test]
    fn test_validate_order_all_or_nothing() {
        assert_eq!(validate_order(&[0, 2, 1], 3), Some(vec![0, 2, 1]));
        assert_eq!(validate_order(&[0, 1, 5], 3), None);
        assert_eq!(validate_order(&[0, -1], 3), None);
        assert_eq!(validate_order(&[], 3), Some(vec![]));
    }

    #[test]
    fn test_reorder_applied() {
        let catalog = LevelCatalog::with_order(levels(3), 1, Some(&[2, 0, 1]));
        assert_eq!(catalog.effective_order(), &[2, 0, 1]);
        assert_eq!(catalog.level_at(0).name, "Level-3");
    }

    #[test]
    fn test_invalid_reorder_falls_back_to_raw() {
        let catalog = LevelCatalog::with_order(levels(3), 1, Some(&[0, 1, 5]));
        assert_eq!(catalog.effective_order(), &[0, 1, 2]);
    }

    #[test]
    fn test_reorder_may_shrink_the_rotation() {
        // A valid list shorter than the catalog is a deliberate cut, not an error.
        let catalog = LevelCatalog::with_order(levels(5), 1, Some(&[4, 0]));
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.level_at(0).name, "Level-5");
    }

    #[test]
    fn test_out_of_range_reorder_string_falls_back() {
        let ovr = RemoteOverrides {
            loop_start_level: None,
            reorder_enabled: true,
            level_order: Some("0,1,5".into()),
        };
        let source = CatalogSource {
            loop_start_level: 1,
            levels: levels(3),
        };
        let catalog = source.into_catalog(Some(&ovr));
        assert_eq!(catalog.effective_order(), &[0, 1, 2]);
    }

    #[test]
    fn test_loop_start_clamped() {
        let catalog = LevelCatalog::with_order(levels(3), 7, None);
        assert_eq!(catalog.loop_start(), 1);
        let catalog = LevelCatalog::with_order(levels(3), 0, None);
        assert_eq!(catalog.loop_start(), 1);
        let catalog = LevelCatalog::with_order(levels(3), 2, None);
        assert_eq!(catalog.loop_start(), 2);
    }

    #[test]
    fn test_overrides_drive_loop_start_and_order() {
        let ovr = RemoteOverrides {
            loop_start_level: Some(2),
            reorder_enabled: true,
            level_order: Some("2,1,0".into()),
        };
        let source = CatalogSource {
            loop_start_level: 1,
            levels: levels(3),
        };
        let catalog = source.into_catalog(Some(&ovr));
        assert_eq!(catalog.effective_order(), &[2, 1, 0]);
        assert_eq!(catalog.loop_start(), 2);
    }

    #[test]
    fn test_from_json_validates_levels() {
        let json = r#"{
            "loop_start_level": 1,
            "levels": [
                {"name": "L1", "rows": [{"boxes": ["red", "blue"]}]},
                {"name": "L2"}
            ]
        }"#;
        match LevelCatalog::from_json(json, None) {
            Err(CatalogError::Level(LevelDataError::NoBoxes(name))) => assert_eq!(name, "L2"),
            other => panic!("expected NoBoxes for L2, got {other:?}"),
        }
    }

    #[test]
    fn test_from_json_round_trip() {
        let mut level = LevelDefinition::named("L1");
        level.rows.push(BoxRow::new(vec![ColorKind::Red]));
        let source = CatalogSource {
            loop_start_level: 1,
            levels: vec![level],
        };
        let json = serde_json::to_string(&source).unwrap();
        let catalog = LevelCatalog::from_json(&json, None).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.level_at(0).name, "L1");
    }
}
