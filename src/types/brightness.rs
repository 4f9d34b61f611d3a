// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Brightness type.
//!
//! The bridge accepts brightness values from 0 to 254. Whether 0 turns the
//! light off is decided by the light firmware, not by this crate.

use std::fmt;

use crate::error::ValueError;

/// Light brightness (0-254).
///
/// # Examples
///
/// ```
/// use huesync::types::Brightness;
///
/// let bri = Brightness::new(150).unwrap();
/// assert_eq!(bri.value(), 150);
///
/// assert_eq!(Brightness::MAX.value(), 254);
/// assert!(Brightness::new(255).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Brightness(u8);

impl Brightness {
    /// Lowest brightness.
    pub const MIN: Self = Self(0);

    /// Fully lit.
    pub const MAX: Self = Self(254);

    /// Creates a new brightness value.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if value exceeds 254.
    pub fn new(value: u8) -> Result<Self, ValueError> {
        if value > Self::MAX.0 {
            return Err(ValueError::out_of_range("bri", 0, Self::MAX.0, value));
        }
        Ok(Self(value))
    }

    /// Returns the raw brightness.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for Brightness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for Brightness {
    type Error = ValueError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
