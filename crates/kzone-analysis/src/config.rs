//! Model build configuration
//!
//! All tunables of a build pass live in [`BuildConfig`]. A configuration can
//! be deserialized from a partial JSON document; omitted fields keep their
//! defaults.
//!
//! ```
//! use kzone_analysis::config::BuildConfig;
//!
//! let config: BuildConfig = serde_json::from_str(r#"{ "sequence_window": 3 }"#).unwrap();
//! assert_eq!(config.sequence_window, 3);
//! assert_eq!(config.frequency_floor, 0.01);
//! assert!(config.validate().is_ok());
//! ```

use kzone_core::{InvalidStrikeZoneError, StrikeZone};
use serde::{Deserialize, Serialize};

/// Number of preceding pitch types kept in a full context key
pub const DEFAULT_SEQUENCE_WINDOW: usize = 2;
/// Lower bound applied to a pitch type's global frequency before dividing by it
pub const DEFAULT_FREQUENCY_FLOOR: f64 = 0.01;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Strike rectangle used by the zone classifier
    pub strike_zone: StrikeZone,
    /// How many preceding pitch types the full context key keeps
    pub sequence_window: usize,
    /// Floor for the effectiveness score denominator
    pub frequency_floor: f64,
    /// Discard at-bats whose last pitch is not a strikeout
    pub strikeouts_only: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            strike_zone: StrikeZone::default(),
            sequence_window: DEFAULT_SEQUENCE_WINDOW,
            frequency_floor: DEFAULT_FREQUENCY_FLOOR,
            strikeouts_only: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("invalid strike zone: {_0}")]
    StrikeZone(InvalidStrikeZoneError),
    #[display("sequence window must be at least 1")]
    ZeroSequenceWindow,
    #[display("frequency floor must be a positive finite number, got {value}")]
    FrequencyFloor { value: f64 },
}

impl BuildConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.strike_zone.validate().map_err(ConfigError::StrikeZone)?;
        if self.sequence_window == 0 {
            return Err(ConfigError::ZeroSequenceWindow);
        }
        if !(self.frequency_floor.is_finite() && self.frequency_floor > 0.0) {
            return Err(ConfigError::FrequencyFloor {
                value: self.frequency_floor,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BuildConfig::default();
        assert_eq!(config.strike_zone, StrikeZone::DEFAULT);
        assert_eq!(config.sequence_window, 2);
        assert!((config.frequency_floor - 0.01).abs() < f64::EPSILON);
        assert!(!config.strikeouts_only);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_strike_zone() {
        let config: BuildConfig =
            serde_json::from_str(r#"{ "strike_zone": { "top": 3.6 } }"#).unwrap();
        assert!((config.strike_zone.top - 3.6).abs() < f64::EPSILON);
        assert!((config.strike_zone.bottom - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(serde_json::from_str::<BuildConfig>(r#"{ "window": 3 }"#).is_err());
    }

    #[test]
    fn test_invalid_values() {
        let config = BuildConfig {
            sequence_window: 0,
            ..BuildConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroSequenceWindow));

        let config = BuildConfig {
            frequency_floor: 0.0,
            ..BuildConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::FrequencyFloor { .. })
        ));

        let mut config = BuildConfig::default();
        config.strike_zone.bottom = 4.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::StrikeZone(_))
        ));
    }
}
