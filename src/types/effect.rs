// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Alert and effect modes.

use std::fmt;
use std::str::FromStr;

/// Temporary alert effect.
///
/// Alerts are one-shot actions, so a transaction always sends them even if
/// the last known state reports the same mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Alert {
    /// One breathe cycle.
    Select,
    /// Breathe cycles for 15 seconds.
    LongSelect,
    /// Stop an ongoing alert.
    None,
}

impl Alert {
    /// Returns the value understood by the bridge.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Select => "select",
            Self::LongSelect => "lselect",
            Self::None => "none",
        }
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Alert {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "select" => Ok(Self::Select),
            "lselect" => Ok(Self::LongSelect),
            "none" => Ok(Self::None),
            other => Err(format!("unknown alert: {other}")),
        }
    }
}

/// Dynamic light effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Effect {
    /// Cycle through all hues at the current brightness and saturation.
    ColorLoop,
    /// No effect.
    None,
}

impl Effect {
    /// Returns the value understood by the bridge.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ColorLoop => "colorloop",
            Self::None => "none",
        }
    }
}

impl From<bool> for Effect {
    fn from(color_loop: bool) -> Self {
        if color_loop { Self::ColorLoop } else { Self::None }
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Effect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "colorloop" => Ok(Self::ColorLoop),
            "none" => Ok(Self::None),
            other => Err(format!("unknown effect: {other}")),
        }
    }
}
