// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Borrowed view of a last-known light state.

use serde_json::Value;

use crate::types::{Alert, Effect};

/// Read-only view of the state object the bridge last reported.
///
/// A snapshot borrows the JSON it reads from and never modifies it. An empty
/// snapshot knows nothing, so every comparison against it reports a
/// difference; this is what groups use, since their member lights may
/// disagree with each other.
///
/// # Examples
///
/// ```
/// use huesync::state::Snapshot;
/// use serde_json::json;
///
/// let state = json!({"on": true, "bri": 100});
/// let snapshot = Snapshot::new(&state);
/// assert_eq!(snapshot.on(), Some(true));
/// assert_eq!(snapshot.brightness(), Some(100));
/// assert_eq!(snapshot.hue(), None);
///
/// assert!(Snapshot::empty().is_empty());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Snapshot<'a> {
    state: Option<&'a Value>,
}

impl<'a> Snapshot<'a> {
    /// Creates a snapshot over a state object.
    #[must_use]
    pub fn new(state: &'a Value) -> Self {
        Self { state: Some(state) }
    }

    /// Creates a snapshot that knows nothing.
    #[must_use]
    pub const fn empty() -> Self {
        Self { state: None }
    }

    /// Returns true if no field is known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state
            .and_then(Value::as_object)
            .is_none_or(serde_json::Map::is_empty)
    }

    /// Returns a raw field.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&'a Value> {
        self.state?.get(field)
    }

    /// Returns whether the light is on.
    #[must_use]
    pub fn on(&self) -> Option<bool> {
        self.get("on")?.as_bool()
    }

    /// Returns the brightness (`bri`).
    #[must_use]
    pub fn brightness(&self) -> Option<u64> {
        self.get("bri")?.as_u64()
    }

    /// Returns the hue.
    #[must_use]
    pub fn hue(&self) -> Option<u64> {
        self.get("hue")?.as_u64()
    }

    /// Returns the saturation (`sat`).
    #[must_use]
    pub fn saturation(&self) -> Option<u64> {
        self.get("sat")?.as_u64()
    }

    /// Returns the CIE xy coordinates.
    #[must_use]
    pub fn xy(&self) -> Option<[f64; 2]> {
        match self.get("xy")?.as_array()?.as_slice() {
            [x, y] => Some([x.as_f64()?, y.as_f64()?]),
            _ => None,
        }
    }

    /// Returns the color temperature in mired (`ct`).
    #[must_use]
    pub fn color_temperature(&self) -> Option<u64> {
        self.get("ct")?.as_u64()
    }

    /// Returns the active effect.
    #[must_use]
    pub fn effect(&self) -> Option<Effect> {
        self.get("effect")?.as_str()?.parse().ok()
    }

    /// Returns the active alert mode.
    #[must_use]
    pub fn alert(&self) -> Option<Alert> {
        self.get("alert")?.as_str()?.parse().ok()
    }

    /// Returns the color model currently in use (`hs`, `xy` or `ct`).
    #[must_use]
    pub fn color_mode(&self) -> Option<&'a str> {
        self.get("colormode")?.as_str()
    }

    /// Returns whether the bridge can currently reach the light.
    #[must_use]
    pub fn reachable(&self) -> Option<bool> {
        self.get("reachable")?.as_bool()
    }
}

impl<'a> From<&'a Value> for Snapshot<'a> {
    fn from(state: &'a Value) -> Self {
        Self::new(state)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn reads_typed_fields() {
        let state = json!({
            "on": false,
            "bri": 254,
            "hue": 46920,
            "sat": 200,
            "xy": [0.3227, 0.329],
            "ct": 366,
            "effect": "colorloop",
            "alert": "none",
            "colormode": "xy",
            "reachable": true
        });
        let snapshot = Snapshot::new(&state);

        assert_eq!(snapshot.on(), Some(false));
        assert_eq!(snapshot.brightness(), Some(254));
        assert_eq!(snapshot.hue(), Some(46920));
        assert_eq!(snapshot.saturation(), Some(200));
        assert_eq!(snapshot.xy(), Some([0.3227, 0.329]));
        assert_eq!(snapshot.color_temperature(), Some(366));
        assert_eq!(snapshot.effect(), Some(Effect::ColorLoop));
        assert_eq!(snapshot.alert(), Some(Alert::None));
        assert_eq!(snapshot.color_mode(), Some("xy"));
        assert_eq!(snapshot.reachable(), Some(true));
        assert!(!snapshot.is_empty());
    }

    #[test]
    fn wrong_types_read_as_unknown() {
        let state = json!({"on": "yes", "bri": -3, "xy": [0.1]});
        let snapshot = Snapshot::new(&state);
        assert_eq!(snapshot.on(), None);
        assert_eq!(snapshot.brightness(), None);
        assert_eq!(snapshot.xy(), None);
    }

    #[test]
    fn empty_object_is_empty() {
        let state = json!({});
        assert!(Snapshot::new(&state).is_empty());
        assert!(Snapshot::empty().is_empty());
        assert_eq!(Snapshot::empty().on(), None);
    }
}
