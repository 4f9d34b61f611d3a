// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Turns pending changes into the partial-update body sent to the bridge.

use serde_json::{Map, Value};

use crate::state::Snapshot;
use crate::transaction::PendingChange;
use crate::types::TransitionTime;

/// Wire field carrying the transition time.
pub const TRANSITION_FIELD: &str = "transitiontime";

/// The body of a state update, holding only fields that need sending.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestDocument {
    fields: Map<String, Value>,
}

impl RequestDocument {
    /// Returns true if nothing needs to be sent.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the number of fields, including the transition time.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns the value of a wire field.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns true if the wire field will be sent.
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Iterates over the wire field names.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Returns the document as a JSON object.
    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }
}

/// Builds the request body for a set of pending changes.
///
/// Absolute changes the snapshot already satisfies are dropped. The
/// transition time is only attached when at least one change survives, so a
/// transition on its own encodes to an empty document.
///
/// # Examples
///
/// ```
/// use huesync::state::Snapshot;
/// use huesync::transaction::{encode, PendingChange};
/// use huesync::types::{Brightness, TransitionTime};
/// use serde_json::json;
///
/// let state = json!({"on": true, "bri": 100});
/// let changes = [
///     PendingChange::SetOn(true),
///     PendingChange::SetBrightness(Brightness::new(150).unwrap()),
/// ];
///
/// let doc = encode(&changes, Some(TransitionTime::new(10)), &Snapshot::new(&state));
/// assert_eq!(doc.into_value(), json!({"bri": 150, "transitiontime": 10}));
/// ```
pub fn encode<'c>(
    changes: impl IntoIterator<Item = &'c PendingChange>,
    transition: Option<TransitionTime>,
    snapshot: &Snapshot<'_>,
) -> RequestDocument {
    let mut fields = Map::new();

    for change in changes {
        if change.is_satisfied_by(snapshot) {
            tracing::trace!(field = change.field(), "Skipping unchanged field");
            continue;
        }
        fields.insert(change.field().to_string(), change.wire_value());
    }

    if !fields.is_empty()
        && let Some(transition) = transition
    {
        fields.insert(TRANSITION_FIELD.to_string(), Value::from(transition.value()));
    }

    RequestDocument { fields }
}
