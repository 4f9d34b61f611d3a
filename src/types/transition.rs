// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Transition time for state changes.

use std::fmt;
use std::time::Duration;

/// Transition time in multiples of 100 ms.
///
/// The bridge applies 400 ms ([`TransitionTime::DEFAULT`]) when a request
/// carries no transition.
///
/// # Examples
///
/// ```
/// use huesync::types::TransitionTime;
/// use std::time::Duration;
///
/// let t = TransitionTime::from_duration(Duration::from_secs(2));
/// assert_eq!(t.value(), 20);
/// assert_eq!(t.as_duration(), Duration::from_secs(2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TransitionTime(u16);

impl TransitionTime {
    /// Immediate change.
    pub const INSTANT: Self = Self(0);

    /// The bridge default (400 ms).
    pub const DEFAULT: Self = Self(4);

    /// Creates a transition time from 100 ms steps.
    #[must_use]
    pub const fn new(steps: u16) -> Self {
        Self(steps)
    }

    /// Creates a transition time from a duration, rounded to the nearest
    /// 100 ms and saturating at the longest representable transition.
    #[must_use]
    pub fn from_duration(duration: Duration) -> Self {
        let steps = (duration.as_millis() + 50) / 100;
        Self(u16::try_from(steps).unwrap_or(u16::MAX))
    }

    /// Returns the number of 100 ms steps.
    #[must_use]
    pub const fn value(&self) -> u16 {
        self.0
    }

    /// Returns the transition as a duration.
    #[must_use]
    pub fn as_duration(&self) -> Duration {
        Duration::from_millis(u64::from(self.0) * 100)
    }
}

impl Default for TransitionTime {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<u16> for TransitionTime {
    fn from(steps: u16) -> Self {
        Self(steps)
    }
}

impl fmt::Display for TransitionTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", u64::from(self.0) * 100)
    }
}
