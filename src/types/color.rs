// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Color types for light control.
//!
//! Hue lights expose three color models: hue/saturation, CIE xy
//! coordinates, and white color temperature in mired. Each type here checks
//! its range on construction and never clamps silently.

use std::fmt;

use crate::error::ValueError;

/// Color hue (0-65535).
///
/// Both 0 and 65535 are red, 25500 is green and 46920 is blue.
///
/// # Examples
///
/// ```
/// use huesync::types::Hue;
///
/// assert_eq!(Hue::new(46920).unwrap().value(), 46920);
/// assert!(Hue::new(65536).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Hue(u16);

impl Hue {
    /// Highest hue value.
    pub const MAX: u16 = u16::MAX;

    /// Creates a new hue value.
    ///
    /// Takes a `u32` so that callers computing hues arithmetically get a
    /// range error instead of a silent wrap.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if value exceeds 65535.
    pub fn new(value: u32) -> Result<Self, ValueError> {
        u16::try_from(value)
            .map(Self)
            .map_err(|_| ValueError::out_of_range("hue", 0, Self::MAX, value))
    }

    /// Returns the hue value.
    #[must_use]
    pub const fn value(&self) -> u16 {
        self.0
    }
}

impl From<u16> for Hue {
    fn from(value: u16) -> Self {
        Self(value)
    }
}

impl fmt::Display for Hue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Color saturation (0-254).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Saturation(u8);

impl Saturation {
    /// Highest saturation value.
    pub const MAX: u8 = 254;

    /// Creates a new saturation value.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if value exceeds 254.
    pub fn new(value: u8) -> Result<Self, ValueError> {
        if value > Self::MAX {
            return Err(ValueError::out_of_range("sat", 0, Self::MAX, value));
        }
        Ok(Self(value))
    }

    /// Returns the saturation value.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for Saturation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Color temperature in mired (153-500).
///
/// Lower values are cooler (bluer), higher values warmer.
///
/// - 153 (~6500K) - Cool daylight
/// - 366 (~2700K) - Warm white
/// - 500 (2000K) - Candlelight
///
/// # Examples
///
/// ```
/// use huesync::types::ColorTemperature;
///
/// let ct = ColorTemperature::new(366).unwrap();
/// assert_eq!(ct.to_kelvin(), 2732);
///
/// assert!(ColorTemperature::new(152).is_err());
/// assert!(ColorTemperature::new(500).is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ColorTemperature(u16);

impl ColorTemperature {
    /// Minimum color temperature (coolest).
    pub const MIN: u16 = 153;

    /// Maximum color temperature (warmest).
    pub const MAX: u16 = 500;

    /// Cool daylight.
    pub const COOL: Self = Self(153);

    /// Warm white.
    pub const WARM: Self = Self(366);

    /// Candlelight.
    pub const CANDLE: Self = Self(500);

    /// Creates a new color temperature value.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if value is outside [153, 500].
    pub fn new(value: u16) -> Result<Self, ValueError> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(ValueError::out_of_range("ct", Self::MIN, Self::MAX, value));
        }
        Ok(Self(value))
    }

    /// Returns the color temperature in mired.
    #[must_use]
    pub const fn value(&self) -> u16 {
        self.0
    }

    /// Returns the color temperature in Kelvin, rounded to the nearest unit.
    #[must_use]
    pub fn to_kelvin(&self) -> u32 {
        mired_kelvin(u32::from(self.0))
    }

    /// Creates a color temperature from a Kelvin value.
    ///
    /// # Errors
    ///
    /// Returns error if the resulting mired value is outside the valid range.
    pub fn from_kelvin(kelvin: u32) -> Result<Self, ValueError> {
        if kelvin == 0 {
            return Err(ValueError::out_of_range("ct", Self::MIN, Self::MAX, 0));
        }
        let mired = mired_kelvin(kelvin);
        let mired = u16::try_from(mired)
            .map_err(|_| ValueError::out_of_range("ct", Self::MIN, Self::MAX, mired))?;
        Self::new(mired)
    }
}

// Mired and Kelvin are reciprocal, so one conversion serves both ways.
fn mired_kelvin(value: u32) -> u32 {
    (1_000_000 + value / 2) / value
}

impl fmt::Display for ColorTemperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} mired", self.0)
    }
}

/// A color in CIE xy coordinates.
///
/// Each coordinate must lie in [0.0, 1.0]. The bridge works with four
/// decimals, so values are rounded to that precision on the wire and when
/// compared against a known state.
///
/// # Examples
///
/// ```
/// use huesync::types::XyColor;
///
/// let red = XyColor::new(0.675, 0.322).unwrap();
/// assert_eq!(red.to_wire(), [0.675, 0.322]);
///
/// assert!(XyColor::new(1.2, 0.3).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct XyColor {
    x: f32,
    y: f32,
}

impl XyColor {
    /// Lowest allowed coordinate.
    pub const MIN: f32 = 0.0;

    /// Highest allowed coordinate.
    pub const MAX: f32 = 1.0;

    /// Creates a new xy color.
    ///
    /// # Errors
    ///
    /// Returns error if either coordinate is NaN or outside [0.0, 1.0].
    pub fn new(x: f32, y: f32) -> Result<Self, ValueError> {
        check_coordinate("xy", x, Self::MIN, Self::MAX)?;
        check_coordinate("xy", y, Self::MIN, Self::MAX)?;
        Ok(Self { x, y })
    }

    /// Returns the x coordinate.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Returns the y coordinate.
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.y
    }

    /// Returns the coordinates as sent to the bridge.
    #[must_use]
    pub fn to_wire(&self) -> [f64; 2] {
        [round_wire(self.x), round_wire(self.y)]
    }

    /// Returns true when `other` denotes the same color at bridge precision.
    #[must_use]
    pub fn matches(&self, other: [f64; 2]) -> bool {
        let [x, y] = self.to_wire();
        (x - other[0]).abs() < XY_TOLERANCE && (y - other[1]).abs() < XY_TOLERANCE
    }
}

impl fmt::Display for XyColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.x, self.y)
    }
}

const XY_TOLERANCE: f64 = 0.000_05;

pub(crate) fn round_wire(value: f32) -> f64 {
    (f64::from(value) * 10_000.0).round() / 10_000.0
}

pub(crate) fn check_coordinate(
    field: &'static str,
    value: f32,
    min: f32,
    max: f32,
) -> Result<(), ValueError> {
    if value.is_nan() {
        return Err(ValueError::NotANumber { field });
    }
    if !(min..=max).contains(&value) {
        return Err(ValueError::CoordinateOutOfRange {
            field,
            min,
            max,
            actual: value,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hue_bounds() {
        assert_eq!(Hue::new(0).unwrap().value(), 0);
        assert_eq!(Hue::new(65535).unwrap().value(), 65535);
        assert_eq!(
            Hue::new(65536),
            Err(ValueError::out_of_range("hue", 0, 65535, 65536))
        );
    }

    #[test]
    fn saturation_bounds() {
        assert!(Saturation::new(254).is_ok());
        assert!(Saturation::new(255).is_err());
    }

    #[test]
    fn color_temperature_bounds() {
        assert!(ColorTemperature::new(152).is_err());
        assert!(ColorTemperature::new(153).is_ok());
        assert!(ColorTemperature::new(500).is_ok());
        assert!(ColorTemperature::new(501).is_err());
    }

    #[test]
    fn color_temperature_kelvin_conversion() {
        assert_eq!(ColorTemperature::COOL.to_kelvin(), 6536);
        assert_eq!(ColorTemperature::CANDLE.to_kelvin(), 2000);
        assert_eq!(ColorTemperature::from_kelvin(2000).unwrap().value(), 500);
        assert_eq!(ColorTemperature::from_kelvin(6500).unwrap().value(), 154);
    }

    #[test]
    fn color_temperature_from_kelvin_out_of_range() {
        assert!(ColorTemperature::from_kelvin(0).is_err());
        assert!(ColorTemperature::from_kelvin(1000).is_err());
        assert!(ColorTemperature::from_kelvin(10_000).is_err());
    }

    #[test]
    fn xy_rejects_out_of_gamut() {
        assert!(XyColor::new(-0.1, 0.3).is_err());
        assert!(XyColor::new(0.3, 1.01).is_err());
        assert_eq!(
            XyColor::new(f32::NAN, 0.3),
            Err(ValueError::NotANumber { field: "xy" })
        );
    }

    #[test]
    fn xy_wire_rounding() {
        let xy = XyColor::new(0.3, 0.7).unwrap();
        assert_eq!(xy.to_wire(), [0.3, 0.7]);
    }

    #[test]
    fn xy_matches_at_bridge_precision() {
        let xy = XyColor::new(0.4573, 0.41).unwrap();
        assert!(xy.matches([0.4573, 0.41]));
        assert!(!xy.matches([0.4574, 0.41]));
    }
}
