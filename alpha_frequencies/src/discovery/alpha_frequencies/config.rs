use serde::{Deserialize, Serialize};

use super::error::ConfigError;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
/// Decides whether a merged set of companion activities may form a grouping
pub enum MergeGuard {
    /// Never suppress a merge
    ///
    /// Companion sets are compared against concurrent relations as a whole grouping,
    /// which a flat set of activities never equals.
    #[default]
    Permissive,
    /// Suppress a merge if the companion set equals the activity set of a concurrent pair
    ///
    /// E.g., with `b || c`, the causal pairs `(a,b)` and `(a,c)` are not merged into `({a},{b,c})`.
    ConcurrentPair,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
/// Which groupings become places of the discovered net
pub enum PlaceSelection {
    /// Every grouping (causal pairs and merged groupings) yields one place
    #[default]
    AllGroupings,
    /// Only groupings which are not subsumed by another grouping yield a place
    Maximal,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
/// Algorithm parameters for frequency-based Alpha discovery
pub struct AlphaFrequenciesConfig {
    /// Minimal absolute frequency of an accepted directly-follows pair
    pub absolute_threshold: u64,
    /// Minimal relative frequency (wrt. all successors of the source) of an accepted directly-follows pair
    pub relative_threshold: f64,
    /// Guard for merging causal pairs into groupings
    pub merge_guard: MergeGuard,
    /// Selection of groupings used as places
    pub place_selection: PlaceSelection,
}

impl Default for AlphaFrequenciesConfig {
    fn default() -> Self {
        Self {
            absolute_threshold: 1,
            relative_threshold: 0.0,
            merge_guard: MergeGuard::default(),
            place_selection: PlaceSelection::default(),
        }
    }
}

impl AlphaFrequenciesConfig {
    /// Config with the given thresholds (and default options otherwise)
    pub fn with_thresholds(absolute_threshold: u64, relative_threshold: f64) -> Self {
        Self {
            absolute_threshold,
            relative_threshold,
            ..Self::default()
        }
    }

    /// Check that all parameters are in range
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.relative_threshold) {
            return Err(ConfigError::RelativeThresholdOutOfRange(
                self.relative_threshold,
            ));
        }
        Ok(())
    }

    /// Serialize parameters to JSON string
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserialize (and validate) parameters from JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}
