//! Remote configuration overrides
//!
//! The parsed shape of the payload a remote-config service may supply.
//! Fetching and caching belong to the embedding shell; an absent payload
//! (or a disabled flag) means the catalog keeps its authored order.

use serde::{Deserialize, Serialize};

/// Designer-controlled overrides delivered at startup
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RemoteOverrides {
    /// Replaces the authored loop start when present
    #[serde(default)]
    pub loop_start_level: Option<usize>,
    /// Feature flag gating the reorder list
    #[serde(default)]
    pub reorder_enabled: bool,
    /// Comma-separated catalog indices, e.g. "2,0,1"
    #[serde(default)]
    pub level_order: Option<String>,
}

impl RemoteOverrides {
    /// Parse the comma-separated order into a candidate index list.
    ///
    /// All-or-nothing: any token that is not an integer rejects the whole
    /// string. Range checking against the catalog happens later, in
    /// [`crate::level::validate_order`].
    pub fn reorder_candidate(&self) -> Option<Vec<i64>> {
        if !self.reorder_enabled {
            return None;
        }
        let raw = self.level_order.as_deref()?;
        let mut indices = Vec::new();
        for token in raw.split(',') {
            match token.trim().parse::<i64>() {
                Ok(value) => indices.push(value),
                Err(_) => {
                    log::warn!("invalid level order entry {token:?} in {raw:?}");
                    return None;
                }
            }
        }
        Some(indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overrides(order: &str) -> RemoteOverrides {
        RemoteOverrides {
            loop_start_level: None,
            reorder_enabled: true,
            level_order: Some(order.to_string()),
        }
    }

    #[test]
    fn test_parse_order() {
        assert_eq!(overrides("2,0,1").reorder_candidate(), Some(vec![2, 0, 1]));
        assert_eq!(
            overrides(" 3 , 1 ").reorder_candidate(),
            Some(vec![3, 1]),
            "whitespace around tokens is tolerated"
        );
    }

    #[test]
    fn test_negative_indices_survive_parsing() {
        // Range rejection is validate_order's job; the parse itself accepts them.
        assert_eq!(overrides("0,-1").reorder_candidate(), Some(vec![0, -1]));
    }

    #[test]
    fn test_bad_token_rejects_whole_string() {
        assert_eq!(overrides("0,1,x").reorder_candidate(), None);
        assert_eq!(overrides("").reorder_candidate(), None);
        assert_eq!(overrides("1,,2").reorder_candidate(), None);
    }

    #[test]
    fn test_disabled_flag_suppresses_order() {
        let mut ovr = overrides("0,1");
        ovr.reorder_enabled = false;
        assert_eq!(ovr.reorder_candidate(), None);
    }

    #[test]
    fn test_missing_payload_fields_deserialize() {
        let ovr: RemoteOverrides = serde_json::from_str("{}").unwrap();
        assert_eq!(ovr, RemoteOverrides::default());
        assert_eq!(ovr.reorder_candidate(), None);
    }
}
