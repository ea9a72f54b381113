//! Plate-location zones
//!
//! The plane in front of the plate is split into 25 zones. A configurable
//! rectangle (the rulebook strike zone) holds a 3×3 grid numbered 1–9, and
//! the area around it holds 16 ball zones numbered 10–25:
//!
//! ```text
//!  10 | 11  12  13 | 14     (above)
//! ----+------------+----
//!  15 |  1   2   3 | 16
//!  17 |  4   5   6 | 18
//!  19 |  7   8   9 | 20
//! ----+------------+----
//!  21 | 22  23  24 | 25     (below)
//! ```
//!
//! The bands above and below the rectangle take precedence over the lateral
//! bands, so a pitch high and outside lands in zone 10 or 14, never in 15/16.
//!
//! # Examples
//!
//! ```
//! use kzone_core::zone::StrikeZone;
//!
//! let strike_zone = StrikeZone::default();
//! let zone = strike_zone.classify(Some(0.0), Some(2.5)).unwrap();
//! assert_eq!(zone.get(), 5);
//! assert!(zone.is_strike());
//!
//! assert_eq!(strike_zone.classify(None, Some(2.5)), None);
//! ```

use serde::{Deserialize, Serialize};

/// One of the 25 discrete plate-location zones.
///
/// Always within `1..=25`; serialized as a bare integer.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    derive_more::Display,
    Serialize,
    Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct Zone(u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("zone {value} is outside 1..=25")]
pub struct ZoneOutOfRangeError {
    pub value: u8,
}

impl Zone {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 25;
    /// Highest zone number inside the strike rectangle
    pub const MAX_STRIKE: u8 = 9;

    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        if value >= Self::MIN && value <= Self::MAX {
            Some(Self(value))
        } else {
            None
        }
    }

    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Returns `true` for zones 1–9.
    #[must_use]
    pub const fn is_strike(self) -> bool {
        self.0 <= Self::MAX_STRIKE
    }
}

impl TryFrom<u8> for Zone {
    type Error = ZoneOutOfRangeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(ZoneOutOfRangeError { value })
    }
}

impl From<Zone> for u8 {
    fn from(zone: Zone) -> Self {
        zone.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, derive_more::Display, derive_more::Error)]
pub enum InvalidStrikeZoneError {
    #[display("strike zone edges must be finite")]
    NonFinite,
    #[display("left edge {left} must be less than right edge {right}")]
    Horizontal { left: f64, right: f64 },
    #[display("bottom edge {bottom} must be less than top edge {top}")]
    Vertical { bottom: f64, top: f64 },
}

/// The strike rectangle used to classify plate coordinates.
///
/// Coordinates are in feet: `x` is horizontal distance from the center of the
/// plate (catcher's view), `z` is height above the ground. Edges are
/// inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrikeZone {
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub top: f64,
}

impl Default for StrikeZone {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl StrikeZone {
    pub const DEFAULT: Self = Self {
        left: -0.83,
        right: 0.83,
        bottom: 1.5,
        top: 3.5,
    };

    pub fn new(left: f64, right: f64, bottom: f64, top: f64) -> Result<Self, InvalidStrikeZoneError> {
        let strike_zone = Self {
            left,
            right,
            bottom,
            top,
        };
        strike_zone.validate()?;
        Ok(strike_zone)
    }

    pub fn validate(&self) -> Result<(), InvalidStrikeZoneError> {
        let Self {
            left,
            right,
            bottom,
            top,
        } = *self;
        if ![left, right, bottom, top].iter().all(|v| v.is_finite()) {
            return Err(InvalidStrikeZoneError::NonFinite);
        }
        if left >= right {
            return Err(InvalidStrikeZoneError::Horizontal { left, right });
        }
        if bottom >= top {
            return Err(InvalidStrikeZoneError::Vertical { bottom, top });
        }
        Ok(())
    }

    #[must_use]
    pub fn contains(&self, x: f64, z: f64) -> bool {
        (self.left..=self.right).contains(&x) && (self.bottom..=self.top).contains(&z)
    }

    /// Classifies a plate location into a [`Zone`].
    ///
    /// Returns `None` when either coordinate is missing or NaN.
    #[must_use]
    pub fn classify(&self, x: Option<f64>, z: Option<f64>) -> Option<Zone> {
        let x = x.filter(|v| !v.is_nan())?;
        let z = z.filter(|v| !v.is_nan())?;
        let zone = if self.contains(x, z) {
            self.row(z) * 3 + self.column(x) + 1
        } else if z > self.top {
            10 + self.band_column(x)
        } else if z < self.bottom {
            21 + self.band_column(x)
        } else if x < self.left {
            15 + 2 * self.row(z)
        } else {
            16 + 2 * self.row(z)
        };
        Some(Zone(zone))
    }

    fn width_third(&self) -> f64 {
        (self.right - self.left) / 3.0
    }

    fn height_third(&self) -> f64 {
        (self.top - self.bottom) / 3.0
    }

    // 0 = left, 2 = right
    fn column(&self, x: f64) -> u8 {
        let third = self.width_third();
        if x < self.left + third {
            0
        } else if x < self.left + 2.0 * third {
            1
        } else {
            2
        }
    }

    // 0 = top, 2 = bottom
    fn row(&self, z: f64) -> u8 {
        let third = self.height_third();
        if z > self.bottom + 2.0 * third {
            0
        } else if z > self.bottom + third {
            1
        } else {
            2
        }
    }

    /// Five slots across the bands above and below the rectangle: the two
    /// corners plus the three columns of the grid.
    fn band_column(&self, x: f64) -> u8 {
        let third = self.width_third();
        if x < self.left {
            0
        } else if x < self.left + third {
            1
        } else if x < self.left + 2.0 * third {
            2
        } else if x < self.right {
            3
        } else {
            4
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(x: f64, z: f64) -> u8 {
        StrikeZone::default()
            .classify(Some(x), Some(z))
            .unwrap()
            .get()
    }

    #[test]
    fn test_grid_zones() {
        assert_eq!(classify(-0.7, 3.3), 1);
        assert_eq!(classify(0.0, 3.3), 2);
        assert_eq!(classify(0.7, 3.3), 3);
        assert_eq!(classify(-0.7, 2.5), 4);
        assert_eq!(classify(0.0, 2.5), 5);
        assert_eq!(classify(0.7, 2.5), 6);
        assert_eq!(classify(-0.7, 1.7), 7);
        assert_eq!(classify(0.0, 1.7), 8);
        assert_eq!(classify(0.7, 1.7), 9);
    }

    #[test]
    fn test_ball_zones() {
        assert_eq!(classify(-1.0, 4.0), 10);
        assert_eq!(classify(-0.7, 4.0), 11);
        assert_eq!(classify(0.0, 4.0), 12);
        assert_eq!(classify(0.7, 4.0), 13);
        assert_eq!(classify(1.0, 4.0), 14);
        assert_eq!(classify(-1.0, 3.3), 15);
        assert_eq!(classify(1.0, 3.3), 16);
        assert_eq!(classify(-1.0, 2.5), 17);
        assert_eq!(classify(1.0, 2.5), 18);
        assert_eq!(classify(-1.0, 1.7), 19);
        assert_eq!(classify(1.0, 1.7), 20);
        assert_eq!(classify(-1.0, 1.0), 21);
        assert_eq!(classify(-0.7, 1.0), 22);
        assert_eq!(classify(0.0, 1.0), 23);
        assert_eq!(classify(0.7, 1.0), 24);
        assert_eq!(classify(1.0, 1.0), 25);
    }

    #[test]
    fn test_edges_are_inclusive() {
        // corners of the rectangle
        assert_eq!(classify(-0.83, 3.5), 1);
        assert_eq!(classify(0.83, 3.5), 3);
        assert_eq!(classify(-0.83, 1.5), 7);
        assert_eq!(classify(0.83, 1.5), 9);

        // one step outside each edge
        assert_eq!(classify(-0.84, 2.5), 17);
        assert_eq!(classify(0.84, 2.5), 18);
        assert_eq!(classify(0.0, 3.51), 12);
        assert_eq!(classify(0.0, 1.49), 23);
    }

    #[test]
    fn test_vertical_bands_win_over_lateral_bands() {
        assert_eq!(classify(-2.0, 5.0), 10);
        assert_eq!(classify(2.0, 5.0), 14);
        assert_eq!(classify(-2.0, 0.0), 21);
        assert_eq!(classify(2.0, 0.0), 25);
    }

    #[test]
    fn test_missing_coordinates() {
        let strike_zone = StrikeZone::default();
        assert_eq!(strike_zone.classify(None, Some(2.5)), None);
        assert_eq!(strike_zone.classify(Some(0.0), None), None);
        assert_eq!(strike_zone.classify(None, None), None);
        assert_eq!(strike_zone.classify(Some(f64::NAN), Some(2.5)), None);
    }

    #[test]
    fn test_inside_and_outside_ranges() {
        let strike_zone = StrikeZone::default();
        for i in -40..=40 {
            for j in 0..=60 {
                let x = f64::from(i) * 0.05;
                let z = f64::from(j) * 0.1;
                let zone = strike_zone.classify(Some(x), Some(z)).unwrap();
                assert_eq!(
                    zone.is_strike(),
                    strike_zone.contains(x, z),
                    "({x}, {z}) classified as {zone}"
                );
                assert_eq!(strike_zone.classify(Some(x), Some(z)), Some(zone));
            }
        }
    }

    #[test]
    fn test_custom_strike_zone() {
        let strike_zone = StrikeZone::new(-1.0, 1.0, 2.0, 5.0).unwrap();
        assert_eq!(strike_zone.classify(Some(0.9), Some(4.9)).unwrap().get(), 3);
        assert_eq!(strike_zone.classify(Some(0.0), Some(1.9)).unwrap().get(), 23);
        assert!(StrikeZone::new(1.0, -1.0, 1.5, 3.5).is_err());
        assert!(StrikeZone::new(-1.0, 1.0, 3.5, 1.5).is_err());
        assert!(StrikeZone::new(f64::NAN, 1.0, 1.5, 3.5).is_err());
    }

    #[test]
    fn test_zone_serde() {
        let zone = Zone::new(17).unwrap();
        assert_eq!(serde_json::to_string(&zone).unwrap(), "17");
        assert_eq!(serde_json::from_str::<Zone>("17").unwrap(), zone);
        assert!(serde_json::from_str::<Zone>("0").is_err());
        assert!(serde_json::from_str::<Zone>("26").is_err());
    }
}
