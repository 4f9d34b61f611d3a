// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Handles for individual lights and light groups.
//!
//! A [`Light`] keeps a cached copy of `/lights/<id>` and starts transactions
//! diffed against it. A [`Group`] has no usable common state, so its
//! transactions send every requested field.

use serde_json::{json, Value};

use crate::error::Error;
use crate::protocol::Transport;
use crate::state::{CachedState, Snapshot};
use crate::transaction::{first_error, StateTransaction};
use crate::types::TransitionTime;

/// A single light on the bridge.
///
/// # Examples
///
/// ```no_run
/// use huesync::Light;
/// use huesync::protocol::HttpConfig;
/// use huesync::types::TransitionTime;
///
/// # async fn example() -> huesync::Result<()> {
/// let client = HttpConfig::new("192.168.1.2", "my-app-user").into_client()?;
/// let mut light = Light::fetch(1, client).await?;
///
/// light
///     .transaction()
///     .set_brightness(200)?
///     .set_color_temperature(366)?
///     .commit()
///     .await?;
///
/// light.refresh().await?;
/// light.turn_off(TransitionTime::DEFAULT).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Light<T: Transport> {
    id: u32,
    transport: T,
    state: CachedState,
}

impl<T: Transport> Light<T> {
    /// Creates a handle without fetching the light's state.
    ///
    /// Until [`refresh`](Self::refresh) succeeds, transactions treat every
    /// field as unknown and send everything requested.
    pub fn new(id: u32, transport: T) -> Self {
        Self {
            id,
            transport,
            state: CachedState::new(format!("/lights/{id}")),
        }
    }

    /// Creates a handle and fetches the light's current state.
    ///
    /// # Errors
    ///
    /// Returns error if the state cannot be fetched.
    pub async fn fetch(id: u32, transport: T) -> Result<Self, Error> {
        let mut light = Self::new(id, transport);
        light.refresh().await?;
        Ok(light)
    }

    /// Replaces the cached state, e.g. with the light's entry from a full
    /// `/lights` listing.
    #[must_use]
    pub fn with_state(mut self, value: Value) -> Self {
        self.state = CachedState::with_value(self.state.path().to_string(), value)
            .with_refresh_interval(self.state.refresh_interval());
        self
    }

    /// Returns the light id.
    #[must_use]
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Returns the cached resource.
    #[must_use]
    pub fn cached(&self) -> &CachedState {
        &self.state
    }

    /// Returns a view over the cached `state` object.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot::new(&self.state.value()["state"])
    }

    /// Starts a transaction against `/lights/<id>/state`.
    pub fn transaction(&self) -> StateTransaction<'_, T> {
        StateTransaction::new(
            &self.transport,
            format!("/lights/{}/state", self.id),
            self.snapshot(),
        )
    }

    /// Fetches the light's current state.
    ///
    /// # Errors
    ///
    /// Returns error if the state cannot be fetched.
    pub async fn refresh(&mut self) -> Result<(), Error> {
        self.state.refresh(&self.transport).await
    }

    /// Refreshes the cached state if it is older than the refresh interval.
    ///
    /// # Errors
    ///
    /// Returns error if a refresh was needed and failed.
    pub async fn refresh_if_stale(&mut self) -> Result<(), Error> {
        self.state.refresh_if_stale(&self.transport).await
    }

    /// Turns the light on.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or is rejected.
    pub async fn turn_on(&self, transition: TransitionTime) -> Result<(), Error> {
        self.transaction()
            .set_on(true)
            .set_transition(transition)
            .commit()
            .await
    }

    /// Turns the light off.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or is rejected.
    pub async fn turn_off(&self, transition: TransitionTime) -> Result<(), Error> {
        self.transaction()
            .set_on(false)
            .set_transition(transition)
            .commit()
            .await
    }

    /// Makes the light perform one breathe cycle.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or is rejected.
    pub async fn alert(&self) -> Result<(), Error> {
        self.transaction().alert().commit().await
    }

    /// Renames the light.
    ///
    /// Returns `false` if the bridge accepted the request without confirming
    /// the name. The cached state is marked stale either way.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or is rejected.
    pub async fn set_name(&mut self, name: &str) -> Result<bool, Error> {
        let path = format!("/lights/{}", self.id);
        let reply = self
            .transport
            .put(&path, &json!({ "name": name }))
            .await?
            .json()?;
        self.state.invalidate();

        if let Some(err) = first_error(&reply) {
            return Err(err.into());
        }

        // The bridge may report a different name (deduplicated or
        // "Updated"), so only the presence of a string is checked.
        let address = format!("{path}/name");
        let confirmed = reply.as_array().is_some_and(|entries| {
            entries.iter().any(|entry| {
                entry
                    .get("success")
                    .and_then(|success| success.get(&address))
                    .is_some_and(Value::is_string)
            })
        });
        Ok(confirmed)
    }

    /// Returns whether the light is on according to the cached state.
    #[must_use]
    pub fn is_on(&self) -> bool {
        self.snapshot().on().unwrap_or(false)
    }

    /// Returns whether the bridge can reach the light.
    #[must_use]
    pub fn is_reachable(&self) -> bool {
        self.snapshot().reachable().unwrap_or(false)
    }

    /// Returns the light's name.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.text("name")
    }

    /// Returns the light type, e.g. `Extended color light`.
    #[must_use]
    pub fn light_type(&self) -> Option<&str> {
        self.text("type")
    }

    /// Returns the model id.
    #[must_use]
    pub fn model_id(&self) -> Option<&str> {
        self.text("modelid")
    }

    /// Returns the unique id.
    #[must_use]
    pub fn unique_id(&self) -> Option<&str> {
        self.text("uniqueid")
    }

    /// Returns the unique id of the luminaire the light belongs to.
    ///
    /// Only lights that are part of a multi-source luminaire report one.
    #[must_use]
    pub fn luminaire_unique_id(&self) -> Option<&str> {
        self.text("luminaireuniqueid")
    }

    /// Returns the manufacturer name.
    #[must_use]
    pub fn manufacturer_name(&self) -> Option<&str> {
        self.text("manufacturername")
    }

    /// Returns the product name.
    #[must_use]
    pub fn product_name(&self) -> Option<&str> {
        self.text("productname")
    }

    /// Returns the firmware version.
    #[must_use]
    pub fn software_version(&self) -> Option<&str> {
        self.text("swversion")
    }

    fn text(&self, field: &str) -> Option<&str> {
        self.state.value().get(field)?.as_str()
    }
}

/// A group of lights on the bridge.
///
/// Group 0 always contains every light.
#[derive(Debug)]
pub struct Group<T: Transport> {
    id: u32,
    transport: T,
}

impl<T: Transport> Group<T> {
    /// Creates a handle for a group.
    pub fn new(id: u32, transport: T) -> Self {
        Self { id, transport }
    }

    /// Creates a handle for the group of all lights.
    pub fn all(transport: T) -> Self {
        Self::new(0, transport)
    }

    /// Returns the group id.
    #[must_use]
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Starts a transaction against `/groups/<id>/action`.
    ///
    /// Members may be in different states, so nothing is elided.
    pub fn transaction(&self) -> StateTransaction<'_, T> {
        StateTransaction::new(
            &self.transport,
            format!("/groups/{}/action", self.id),
            Snapshot::empty(),
        )
    }

    /// Turns every light in the group on.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or is rejected.
    pub async fn turn_on(&self, transition: TransitionTime) -> Result<(), Error> {
        self.transaction()
            .set_on(true)
            .set_transition(transition)
            .commit()
            .await
    }

    /// Turns every light in the group off.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or is rejected.
    pub async fn turn_off(&self, transition: TransitionTime) -> Result<(), Error> {
        self.transaction()
            .set_on(false)
            .set_transition(transition)
            .commit()
            .await
    }

    /// Makes every light in the group perform one breathe cycle.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or is rejected.
    pub async fn alert(&self) -> Result<(), Error> {
        self.transaction().alert().commit().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::testing::RecordingTransport;

    fn light_json() -> Value {
        json!({
            "name": "Desk",
            "type": "Extended color light",
            "modelid": "LCT015",
            "uniqueid": "00:17:88:01:02:03:04:05-0b",
            "manufacturername": "Signify Netherlands B.V.",
            "productname": "Hue color lamp",
            "swversion": "1.50.2_r30933",
            "state": {"on": true, "bri": 100, "ct": 366, "reachable": true}
        })
    }

    #[test]
    fn readers_use_cached_state() {
        let light = Light::new(1, RecordingTransport::new()).with_state(light_json());

        assert_eq!(light.id(), 1);
        assert!(light.is_on());
        assert!(light.is_reachable());
        assert_eq!(light.name(), Some("Desk"));
        assert_eq!(light.light_type(), Some("Extended color light"));
        assert_eq!(light.model_id(), Some("LCT015"));
        assert_eq!(light.unique_id(), Some("00:17:88:01:02:03:04:05-0b"));
        assert_eq!(light.manufacturer_name(), Some("Signify Netherlands B.V."));
        assert_eq!(light.product_name(), Some("Hue color lamp"));
        assert_eq!(light.software_version(), Some("1.50.2_r30933"));
        assert_eq!(light.luminaire_unique_id(), None);
    }

    #[test]
    fn luminaire_unique_id_when_reported() {
        let mut value = light_json();
        value["luminaireuniqueid"] = json!("00:17:88:01:00:bd:c7:b9-0b");
        let light = Light::new(1, RecordingTransport::new()).with_state(value);

        assert_eq!(
            light.luminaire_unique_id(),
            Some("00:17:88:01:00:bd:c7:b9-0b")
        );
    }

    #[test]
    fn unfetched_light_knows_nothing() {
        let light = Light::new(2, RecordingTransport::new());
        assert!(!light.is_on());
        assert_eq!(light.name(), None);
        assert!(light.cached().is_stale());
    }

    #[tokio::test]
    async fn fetch_reads_light_resource() {
        let transport = RecordingTransport::new().reply_json(&light_json());
        let light = Light::fetch(7, transport).await.unwrap();

        assert_eq!(light.name(), Some("Desk"));
        assert_eq!(light.cached().path(), "/lights/7");
    }

    #[tokio::test]
    async fn transaction_diffs_against_state_object() {
        let transport = RecordingTransport::new()
            .reply_json(&json!([{"success": {"/lights/1/state/bri": 150}}]));
        let light = Light::new(1, &transport).with_state(light_json());

        light
            .transaction()
            .set_on(true)
            .set_brightness(150)
            .unwrap()
            .commit()
            .await
            .unwrap();

        let requests = transport.requests.borrow();
        assert_eq!(requests[0].1, "/lights/1/state");
        assert_eq!(requests[0].2, json!({"bri": 150}));
    }

    #[tokio::test]
    async fn turn_on_when_already_on_sends_nothing() {
        let transport = RecordingTransport::new();
        let light = Light::new(1, &transport).with_state(light_json());

        light.turn_on(TransitionTime::DEFAULT).await.unwrap();

        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn turn_off_sends_transition() {
        let transport = RecordingTransport::new();
        let light = Light::new(1, &transport).with_state(light_json());

        light.turn_off(TransitionTime::new(10)).await.unwrap();

        assert_eq!(
            transport.last_body(),
            Some(json!({"on": false, "transitiontime": 10}))
        );
    }

    #[tokio::test]
    async fn alert_is_always_sent() {
        let transport = RecordingTransport::new();
        let light = Light::new(1, &transport).with_state(light_json());

        light.alert().await.unwrap();

        assert_eq!(transport.last_body(), Some(json!({"alert": "select"})));
    }

    #[tokio::test]
    async fn set_name_confirms_name_entry() {
        let transport = RecordingTransport::new()
            .reply_json(&json!([{"success": {"/lights/1/name": "Desk 2"}}]))
            .reply_json(&json!([{"success": {"/lights/1/other": "x"}}]));
        let mut light = Light::new(1, &transport).with_state(light_json());

        assert!(light.set_name("Desk 2").await.unwrap());
        assert!(light.cached().is_stale());
        assert_eq!(transport.last_body(), Some(json!({"name": "Desk 2"})));

        assert!(!light.set_name("Desk 3").await.unwrap());
    }

    #[tokio::test]
    async fn set_name_surfaces_bridge_error() {
        let transport = RecordingTransport::new().reply_json(&json!([{
            "error": {"type": 7, "address": "/lights/1/name", "description": "invalid value"}
        }]));
        let mut light = Light::new(1, transport);

        let err = light.set_name("").await.unwrap_err();
        assert!(matches!(err, Error::Api(ref api) if api.kind == Some(7)));
    }

    #[tokio::test]
    async fn group_sends_everything() {
        let transport = RecordingTransport::new();
        let group = Group::all(&transport);

        group
            .transaction()
            .set_on(true)
            .set_color_temperature(366)
            .unwrap()
            .commit()
            .await
            .unwrap();

        let requests = transport.requests.borrow();
        assert_eq!(group.id(), 0);
        assert_eq!(requests[0].1, "/groups/0/action");
        assert_eq!(requests[0].2, json!({"on": true, "ct": 366}));
    }

    #[tokio::test]
    async fn group_transition_only_sends_nothing() {
        let transport = RecordingTransport::new();
        let group = Group::new(3, &transport);

        group
            .transaction()
            .set_transition(TransitionTime::new(5))
            .commit()
            .await
            .unwrap();

        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn group_turn_off_and_alert() {
        let transport = RecordingTransport::new();
        let group = Group::new(3, &transport);

        group.turn_off(TransitionTime::INSTANT).await.unwrap();
        group.alert().await.unwrap();
        group.turn_on(TransitionTime::DEFAULT).await.unwrap();

        let requests = transport.requests.borrow();
        assert_eq!(requests[0].2, json!({"on": false, "transitiontime": 0}));
        assert_eq!(requests[1].2, json!({"alert": "select"}));
        assert_eq!(requests[2].2, json!({"on": true, "transitiontime": 4}));
    }
}
