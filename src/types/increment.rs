// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Relative adjustments.
//!
//! Increments are applied by the bridge on top of whatever the light
//! currently shows, and the bridge clamps the result itself. A zero
//! increment is still a valid request.

use std::fmt;

use crate::error::ValueError;
use crate::types::color::{check_coordinate, round_wire};

macro_rules! integer_increment {
    ($(#[$meta:meta])* $name:ident, $field:literal, $limit:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(i32);

        impl $name {
            /// Largest magnitude accepted in either direction.
            pub const LIMIT: i32 = $limit;

            /// Creates a new increment.
            ///
            /// # Errors
            ///
            /// Returns `ValueError::OutOfRange` if the magnitude exceeds
            #[doc = concat!("[`", stringify!($name), "::LIMIT`].")]
            pub fn new(value: i32) -> Result<Self, ValueError> {
                if !(-Self::LIMIT..=Self::LIMIT).contains(&value) {
                    return Err(ValueError::out_of_range(
                        $field,
                        -Self::LIMIT,
                        Self::LIMIT,
                        value,
                    ));
                }
                Ok(Self(value))
            }

            /// Returns the signed delta.
            #[must_use]
            pub const fn value(&self) -> i32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{:+}", self.0)
            }
        }
    };
}

integer_increment!(
    /// Brightness delta (-254 to 254).
    BrightnessIncrement,
    "bri_inc",
    254
);

integer_increment!(
    /// Saturation delta (-254 to 254).
    SaturationIncrement,
    "sat_inc",
    254
);

integer_increment!(
    /// Hue delta (-65535 to 65535).
    HueIncrement,
    "hue_inc",
    65535
);

integer_increment!(
    /// Color temperature delta in mired (-65535 to 65535).
    ColorTemperatureIncrement,
    "ct_inc",
    65535
);

/// Delta on both CIE xy coordinates (-0.5 to 0.5 each).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct XyIncrement {
    x: f32,
    y: f32,
}

impl XyIncrement {
    /// Largest magnitude accepted per coordinate.
    pub const LIMIT: f32 = 0.5;

    /// Creates a new xy increment.
    ///
    /// # Errors
    ///
    /// Returns error if either delta is NaN or its magnitude exceeds 0.5.
    pub fn new(x: f32, y: f32) -> Result<Self, ValueError> {
        check_coordinate("xy_inc", x, -Self::LIMIT, Self::LIMIT)?;
        check_coordinate("xy_inc", y, -Self::LIMIT, Self::LIMIT)?;
        Ok(Self { x, y })
    }

    /// Returns the x delta.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Returns the y delta.
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.y
    }

    /// Returns the deltas as sent to the bridge.
    #[must_use]
    pub fn to_wire(&self) -> [f64; 2] {
        [round_wire(self.x), round_wire(self.y)]
    }
}
