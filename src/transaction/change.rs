// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Pending changes held by a transaction.

use serde_json::Value;

use crate::state::Snapshot;
use crate::types::{
    Alert, Brightness, BrightnessIncrement, ColorTemperature, ColorTemperatureIncrement, Effect,
    Hue, HueIncrement, Saturation, SaturationIncrement, XyColor, XyIncrement,
};

/// The light attribute a change writes to.
///
/// A transaction holds at most one change per attribute. Absolute and
/// relative forms of the same attribute share a slot, so whichever was
/// recorded last is the one sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Attribute {
    /// On/off state.
    On,
    /// Brightness.
    Brightness,
    /// Color hue.
    Hue,
    /// Color saturation.
    Saturation,
    /// CIE xy color.
    Xy,
    /// White color temperature.
    ColorTemperature,
    /// Dynamic effect (color loop).
    Effect,
    /// Alert.
    Alert,
}

/// One requested change to a light or group state.
///
/// # Examples
///
/// ```
/// use huesync::transaction::{Attribute, PendingChange};
/// use huesync::types::Brightness;
///
/// let change = PendingChange::SetBrightness(Brightness::new(150).unwrap());
/// assert_eq!(change.attribute(), Attribute::Brightness);
/// assert_eq!(change.field(), "bri");
/// assert_eq!(change.wire_value(), serde_json::json!(150));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PendingChange {
    /// Turn the light on or off.
    SetOn(bool),
    /// Set the brightness.
    SetBrightness(Brightness),
    /// Set the color hue.
    SetHue(Hue),
    /// Set the color saturation.
    SetSaturation(Saturation),
    /// Set the CIE xy color.
    SetXy(XyColor),
    /// Set the white color temperature.
    SetColorTemperature(ColorTemperature),
    /// Enable or disable the color loop effect.
    SetColorLoop(bool),
    /// Adjust the brightness.
    IncrementBrightness(BrightnessIncrement),
    /// Adjust the saturation.
    IncrementSaturation(SaturationIncrement),
    /// Adjust the hue.
    IncrementHue(HueIncrement),
    /// Adjust the color temperature.
    IncrementColorTemperature(ColorTemperatureIncrement),
    /// Adjust the xy color.
    IncrementXy(XyIncrement),
    /// Trigger or stop an alert.
    Alert(Alert),
}

impl PendingChange {
    /// Returns the attribute slot this change occupies.
    #[must_use]
    pub const fn attribute(&self) -> Attribute {
        match self {
            Self::SetOn(_) => Attribute::On,
            Self::SetBrightness(_) | Self::IncrementBrightness(_) => Attribute::Brightness,
            Self::SetHue(_) | Self::IncrementHue(_) => Attribute::Hue,
            Self::SetSaturation(_) | Self::IncrementSaturation(_) => Attribute::Saturation,
            Self::SetXy(_) | Self::IncrementXy(_) => Attribute::Xy,
            Self::SetColorTemperature(_) | Self::IncrementColorTemperature(_) => {
                Attribute::ColorTemperature
            }
            Self::SetColorLoop(_) => Attribute::Effect,
            Self::Alert(_) => Attribute::Alert,
        }
    }

    /// Returns the field name used on the wire.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::SetOn(_) => "on",
            Self::SetBrightness(_) => "bri",
            Self::SetHue(_) => "hue",
            Self::SetSaturation(_) => "sat",
            Self::SetXy(_) => "xy",
            Self::SetColorTemperature(_) => "ct",
            Self::SetColorLoop(_) => "effect",
            Self::IncrementBrightness(_) => "bri_inc",
            Self::IncrementSaturation(_) => "sat_inc",
            Self::IncrementHue(_) => "hue_inc",
            Self::IncrementColorTemperature(_) => "ct_inc",
            Self::IncrementXy(_) => "xy_inc",
            Self::Alert(_) => "alert",
        }
    }

    /// Returns the value sent for [`field`](Self::field).
    #[must_use]
    pub fn wire_value(&self) -> Value {
        match self {
            Self::SetOn(on) => Value::from(*on),
            Self::SetBrightness(bri) => Value::from(bri.value()),
            Self::SetHue(hue) => Value::from(hue.value()),
            Self::SetSaturation(sat) => Value::from(sat.value()),
            Self::SetXy(xy) => Value::from(xy.to_wire().to_vec()),
            Self::SetColorTemperature(ct) => Value::from(ct.value()),
            Self::SetColorLoop(on) => Value::from(Effect::from(*on).as_str()),
            Self::IncrementBrightness(inc) => Value::from(inc.value()),
            Self::IncrementSaturation(inc) => Value::from(inc.value()),
            Self::IncrementHue(inc) => Value::from(inc.value()),
            Self::IncrementColorTemperature(inc) => Value::from(inc.value()),
            Self::IncrementXy(inc) => Value::from(inc.to_wire().to_vec()),
            Self::Alert(alert) => Value::from(alert.as_str()),
        }
    }

    /// Returns true for relative changes.
    #[must_use]
    pub const fn is_increment(&self) -> bool {
        matches!(
            self,
            Self::IncrementBrightness(_)
                | Self::IncrementSaturation(_)
                | Self::IncrementHue(_)
                | Self::IncrementColorTemperature(_)
                | Self::IncrementXy(_)
        )
    }

    /// Returns true if the snapshot already shows the requested value, so
    /// sending the change would not alter anything.
    ///
    /// Increments and alerts are never satisfied: the bridge applies them
    /// regardless of the current state.
    #[must_use]
    pub fn is_satisfied_by(&self, snapshot: &Snapshot<'_>) -> bool {
        match self {
            Self::SetOn(on) => snapshot.on() == Some(*on),
            Self::SetBrightness(bri) => snapshot.brightness() == Some(u64::from(bri.value())),
            Self::SetHue(hue) => snapshot.hue() == Some(u64::from(hue.value())),
            Self::SetSaturation(sat) => snapshot.saturation() == Some(u64::from(sat.value())),
            Self::SetXy(xy) => snapshot.xy().is_some_and(|known| xy.matches(known)),
            Self::SetColorTemperature(ct) => {
                snapshot.color_temperature() == Some(u64::from(ct.value()))
            }
            Self::SetColorLoop(on) => snapshot.effect() == Some(Effect::from(*on)),
            Self::IncrementBrightness(_)
            | Self::IncrementSaturation(_)
            | Self::IncrementHue(_)
            | Self::IncrementColorTemperature(_)
            | Self::IncrementXy(_)
            | Self::Alert(_) => false,
        }
    }
}
