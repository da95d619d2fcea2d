//! Cursor-to-level resolution
//!
//! Maps a persisted progress cursor to a level deterministically, with
//! loop-after-N and skip-in-loop semantics once the cursor passes the end
//! of the catalog. Pure functions of (cursor, catalog); safe to call from
//! any thread as long as the catalog is not mutated underneath.

use thiserror::Error;

use super::catalog::LevelCatalog;
use super::data::LevelDefinition;

/// The catalog has no levels. Fatal for the resolve call: the caller must
/// not proceed to build a level, and must never substitute a default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no levels available in the catalog")]
pub struct NoLevelsAvailable;

/// Position in the catalog's effective order for a given cursor.
pub fn resolve_position(
    cursor: usize,
    catalog: &LevelCatalog,
) -> Result<usize, NoLevelsAvailable> {
    let len = catalog.len();
    if len == 0 {
        return Err(NoLevelsAvailable);
    }

    if cursor < len {
        // In range by construction; the modulo keeps the lookup total.
        return Ok(cursor % len);
    }

    // Looping phase: replay the slots from loop_start on, minus the
    // skip-flagged ones. Skip-in-loop levels already played once during
    // the initial pass above.
    let loop_start = catalog.loop_start();
    let loop_pool: Vec<usize> = (loop_start..len)
        .filter(|&i| !catalog.level_at(i).skip_in_loop)
        .collect();

    if loop_pool.is_empty() {
        // Every remaining slot is skip-flagged; fall back to the first level.
        return Ok(0);
    }

    let loop_index = (cursor - loop_start) % loop_pool.len();
    Ok(loop_pool[loop_index])
}

/// The level to play for a given cursor. See [`resolve_position`].
pub fn resolve(
    cursor: usize,
    catalog: &LevelCatalog,
) -> Result<&LevelDefinition, NoLevelsAvailable> {
    resolve_position(cursor, catalog).map(|position| catalog.level_at(position))
}
