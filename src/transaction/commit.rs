// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sending a request document and reading the bridge's verdict.

use serde_json::Value;

use crate::error::{ApiError, Error, ProtocolError};
use crate::protocol::Transport;
use crate::transaction::encoder::{RequestDocument, TRANSITION_FIELD};

/// Sends one request document to one resource path.
///
/// A commit is a single PUT. Transport failures, unreadable replies and
/// bridge errors are all returned to the caller; nothing is retried.
#[derive(Debug)]
pub struct Committer<'a, T: Transport> {
    transport: &'a T,
    path: &'a str,
}

impl<'a, T: Transport> Committer<'a, T> {
    /// Creates a committer for a state path such as `/lights/1/state`.
    #[must_use]
    pub fn new(transport: &'a T, path: &'a str) -> Self {
        Self { transport, path }
    }

    /// Sends the document and classifies the reply.
    ///
    /// An empty document succeeds without touching the transport.
    ///
    /// # Errors
    ///
    /// - `Error::Transport` if the request could not be delivered
    /// - `Error::Protocol` if the reply has no body, is not JSON, or is
    ///   neither an array nor an object
    /// - `Error::Api` with the first error entry if the bridge rejected
    ///   anything
    pub async fn commit(&self, document: RequestDocument) -> Result<(), Error> {
        if document.is_empty() {
            tracing::debug!(path = %self.path, "No change requested, skipping request");
            return Ok(());
        }

        let body = document.into_value();
        let reply = self.transport.put(self.path, &body).await?.json()?;

        if !reply.is_array() && !reply.is_object() {
            return Err(ProtocolError::UnexpectedFormat(format!(
                "expected an array or object in reply for {}",
                self.path
            ))
            .into());
        }

        if let Some(err) = first_error(&reply) {
            tracing::debug!(path = %self.path, error = %err, "Bridge rejected state change");
            return Err(err.into());
        }

        self.warn_unacknowledged(&body, &reply);
        Ok(())
    }

    fn warn_unacknowledged(&self, body: &Value, reply: &Value) {
        let (Some(sent), Some(entries)) = (body.as_object(), reply.as_array()) else {
            return;
        };

        for field in sent.keys().filter(|field| *field != TRANSITION_FIELD) {
            let address = format!("{}/{field}", self.path);
            let acknowledged = entries.iter().any(|entry| {
                entry
                    .get("success")
                    .and_then(Value::as_object)
                    .is_some_and(|success| success.contains_key(&address))
            });
            if !acknowledged {
                tracing::warn!(address = %address, "Bridge did not acknowledge field");
            }
        }
    }
}

/// Returns the first error entry of a bridge reply, if any.
///
/// Bridge replies are usually an array of `{"success": ..}` and
/// `{"error": ..}` entries, but a bare object carrying an `error` key is
/// accepted too.
pub(crate) fn first_error(reply: &Value) -> Option<ApiError> {
    let entries = match reply {
        Value::Array(entries) => entries.as_slice(),
        Value::Object(_) => std::slice::from_ref(reply),
        _ => return None,
    };

    entries
        .iter()
        .filter_map(|entry| entry.get("error"))
        .map(|error| match error {
            Value::String(description) => ApiError {
                kind: None,
                address: String::new(),
                description: description.clone(),
            },
            other => serde_json::from_value(other.clone()).unwrap_or_else(|_| ApiError {
                kind: None,
                address: String::new(),
                description: other.to_string(),
            }),
        })
        .next()
}
