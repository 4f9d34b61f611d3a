// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The chainable state transaction.

use std::collections::BTreeMap;

use crate::error::{Error, ValueError};
use crate::protocol::Transport;
use crate::state::Snapshot;
use crate::transaction::{encode, Attribute, Committer, PendingChange, RequestDocument};
use crate::types::{
    Alert, Brightness, BrightnessIncrement, ColorTemperature, ColorTemperatureIncrement, Hue,
    HueIncrement, Saturation, SaturationIncrement, TransitionTime, XyColor, XyIncrement,
};

/// A batch of state changes for one light or group, sent as one request.
///
/// Every setter consumes the transaction and hands it back, so a chain ends
/// either in [`commit`](Self::commit) or in the transaction being dropped.
/// Setters with a numeric range return `Result` and reject bad input before
/// recording anything.
///
/// Only changes the snapshot does not already show are sent. Recording a
/// second change for the same attribute replaces the first, and this includes
/// mixing an absolute setter with its increment: `set_brightness(100)` then
/// `increment_brightness(10)` sends only `bri_inc`.
///
/// Each color field is compared on its own, without looking at the
/// snapshot's `colormode`. A light in `ct` mode that still reports the
/// requested `hue` will not receive that hue and stays in `ct` mode. Use
/// [`Snapshot::empty`] when a color mode switch must be forced.
///
/// The transaction never adds `"on": true` by itself. Lights turn on when
/// they receive a brightness or color change.
///
/// # Examples
///
/// ```no_run
/// use huesync::protocol::HttpConfig;
/// use huesync::state::Snapshot;
/// use huesync::transaction::StateTransaction;
/// use serde_json::json;
///
/// # async fn example() -> huesync::Result<()> {
/// let client = HttpConfig::new("192.168.1.2", "my-app-user").into_client()?;
/// let state = json!({"on": true, "bri": 100});
///
/// StateTransaction::new(&client, "/lights/1/state", Snapshot::new(&state))
///     .set_on(true)
///     .set_brightness(150)?
///     .set_transition(10u16)
///     .commit()
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
#[must_use = "a transaction does nothing until committed"]
pub struct StateTransaction<'a, T: Transport> {
    transport: &'a T,
    path: String,
    snapshot: Snapshot<'a>,
    changes: BTreeMap<Attribute, PendingChange>,
    transition: Option<TransitionTime>,
}

impl<'a, T: Transport> StateTransaction<'a, T> {
    /// Creates a transaction for a state path, diffed against `snapshot`.
    ///
    /// Pass [`Snapshot::empty`] to send every requested field regardless of
    /// the current state.
    pub fn new(transport: &'a T, path: impl Into<String>, snapshot: Snapshot<'a>) -> Self {
        Self {
            transport,
            path: path.into(),
            snapshot,
            changes: BTreeMap::new(),
            transition: None,
        }
    }

    /// Returns the path the request is sent to.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Iterates over the recorded changes in attribute order.
    pub fn pending(&self) -> impl Iterator<Item = &PendingChange> {
        self.changes.values()
    }

    /// Returns the recorded transition time.
    #[must_use]
    pub fn transition(&self) -> Option<TransitionTime> {
        self.transition
    }

    /// Returns the document a commit would send right now.
    #[must_use]
    pub fn request(&self) -> RequestDocument {
        encode(self.changes.values(), self.transition, &self.snapshot)
    }

    /// Records an already validated change.
    pub fn with_change(mut self, change: PendingChange) -> Self {
        if let Some(previous) = self.changes.insert(change.attribute(), change)
            && previous.field() != change.field()
        {
            tracing::trace!(
                replaced = previous.field(),
                by = change.field(),
                "Later change replaces earlier one"
            );
        }
        self
    }

    /// Turns the light on or off.
    pub fn set_on(self, on: bool) -> Self {
        self.with_change(PendingChange::SetOn(on))
    }

    /// Sets the brightness, from 0 to 254.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if `brightness` exceeds 254.
    pub fn set_brightness(self, brightness: u8) -> Result<Self, ValueError> {
        let brightness = Brightness::new(brightness)?;
        Ok(self.with_change(PendingChange::SetBrightness(brightness)))
    }

    /// Sets the color hue, from 0 to 65535.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if `hue` exceeds 65535.
    pub fn set_color_hue(self, hue: u32) -> Result<Self, ValueError> {
        let hue = Hue::new(hue)?;
        Ok(self.with_change(PendingChange::SetHue(hue)))
    }

    /// Sets the color saturation, from 0 to 254.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if `saturation` exceeds 254.
    pub fn set_color_saturation(self, saturation: u8) -> Result<Self, ValueError> {
        let saturation = Saturation::new(saturation)?;
        Ok(self.with_change(PendingChange::SetSaturation(saturation)))
    }

    /// Sets the color in CIE xy coordinates.
    ///
    /// # Errors
    ///
    /// Returns error if either coordinate is NaN or outside [0.0, 1.0].
    pub fn set_color_xy(self, x: f32, y: f32) -> Result<Self, ValueError> {
        let xy = XyColor::new(x, y)?;
        Ok(self.with_change(PendingChange::SetXy(xy)))
    }

    /// Sets the color temperature in mired, from 153 to 500.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if `mired` is outside [153, 500].
    pub fn set_color_temperature(self, mired: u16) -> Result<Self, ValueError> {
        let ct = ColorTemperature::new(mired)?;
        Ok(self.with_change(PendingChange::SetColorTemperature(ct)))
    }

    /// Enables or disables the color loop effect.
    pub fn set_color_loop(self, on: bool) -> Self {
        self.with_change(PendingChange::SetColorLoop(on))
    }

    /// Adjusts the brightness by -254 to 254.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if the magnitude exceeds 254.
    pub fn increment_brightness(self, increment: i32) -> Result<Self, ValueError> {
        let inc = BrightnessIncrement::new(increment)?;
        Ok(self.with_change(PendingChange::IncrementBrightness(inc)))
    }

    /// Adjusts the saturation by -254 to 254.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if the magnitude exceeds 254.
    pub fn increment_saturation(self, increment: i32) -> Result<Self, ValueError> {
        let inc = SaturationIncrement::new(increment)?;
        Ok(self.with_change(PendingChange::IncrementSaturation(inc)))
    }

    /// Adjusts the hue by -65535 to 65535.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if the magnitude exceeds 65535.
    pub fn increment_hue(self, increment: i32) -> Result<Self, ValueError> {
        let inc = HueIncrement::new(increment)?;
        Ok(self.with_change(PendingChange::IncrementHue(inc)))
    }

    /// Adjusts the color temperature by -65535 to 65535 mired.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if the magnitude exceeds 65535.
    pub fn increment_color_temperature(self, increment: i32) -> Result<Self, ValueError> {
        let inc = ColorTemperatureIncrement::new(increment)?;
        Ok(self.with_change(PendingChange::IncrementColorTemperature(inc)))
    }

    /// Adjusts the xy color by -0.5 to 0.5 on each coordinate.
    ///
    /// # Errors
    ///
    /// Returns error if either delta is NaN or its magnitude exceeds 0.5.
    pub fn increment_color_xy(self, x: f32, y: f32) -> Result<Self, ValueError> {
        let inc = XyIncrement::new(x, y)?;
        Ok(self.with_change(PendingChange::IncrementXy(inc)))
    }

    /// Sets the transition time for this request.
    ///
    /// A transition is only sent alongside an actual change.
    pub fn set_transition(mut self, transition: impl Into<TransitionTime>) -> Self {
        self.transition = Some(transition.into());
        self
    }

    /// Makes the light perform one breathe cycle.
    pub fn alert(self) -> Self {
        self.with_change(PendingChange::Alert(Alert::Select))
    }

    /// Makes the light breathe for 15 seconds.
    pub fn long_alert(self) -> Self {
        self.with_change(PendingChange::Alert(Alert::LongSelect))
    }

    /// Stops an ongoing long alert.
    pub fn stop_alert(self) -> Self {
        self.with_change(PendingChange::Alert(Alert::None))
    }

    /// Sends the changes in one request.
    ///
    /// Succeeds without any request when nothing differs from the snapshot,
    /// including a transaction that only sets a transition.
    ///
    /// # Errors
    ///
    /// - `Error::Transport` if the request could not be delivered
    /// - `Error::Protocol` if the reply has no body, is not JSON, or is
    ///   neither an array nor an object
    /// - `Error::Api` if the bridge rejected any field
    pub async fn commit(self) -> Result<(), Error> {
        let document = self.request();
        Committer::new(self.transport, &self.path)
            .commit(document)
            .await
    }
}
