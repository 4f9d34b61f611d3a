// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Transport used to reach the bridge.
//!
//! The transaction core never opens a connection itself. It talks to the
//! bridge through the [`Transport`] trait, which maps a resource path such as
//! `/lights/1/state` to one request and hands back the raw reply.
//!
//! # Implementations
//!
//! - [`HttpClient`]: the bridge REST API over HTTP(S) (feature `http`)
//!
//! Anything else, for instance a recording fake in tests, only has to
//! implement [`Transport`].

#[cfg(feature = "http")]
mod http;

#[cfg(feature = "http")]
pub use http::{HttpClient, HttpConfig};

use std::sync::Arc;

use serde_json::Value;

use crate::error::{ProtocolError, TransportError};

/// Raw reply from the bridge.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    body: String,
}

impl ApiResponse {
    /// Creates a new reply with the given body.
    #[must_use]
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }

    /// Returns the raw reply body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Parses the reply body as JSON.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::MissingBody` if the body is empty and
    /// `ProtocolError::Json` if it is not valid JSON.
    pub fn json(&self) -> Result<Value, ProtocolError> {
        self.parse()
    }

    /// Parses the reply as a specific type.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::MissingBody` if the body is empty and
    /// `ProtocolError::Json` if it cannot be parsed into the target type.
    pub fn parse<T: serde::de::DeserializeOwned>(&self) -> Result<T, ProtocolError> {
        if self.body.trim().is_empty() {
            return Err(ProtocolError::MissingBody);
        }
        serde_json::from_str(&self.body).map_err(Into::into)
    }
}

/// A way of sending requests to the bridge.
///
/// Paths are relative to the authenticated API root, e.g. `/lights/3/state`.
/// Implementations make exactly one attempt per call.
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// Sends a partial update to a resource.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` if the request cannot be delivered.
    async fn put(&self, path: &str, body: &Value) -> Result<ApiResponse, TransportError>;

    /// Reads a resource.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` if the request cannot be delivered.
    async fn get(&self, path: &str) -> Result<ApiResponse, TransportError>;
}

impl<T: Transport> Transport for &T {
    async fn put(&self, path: &str, body: &Value) -> Result<ApiResponse, TransportError> {
        (**self).put(path, body).await
    }

    async fn get(&self, path: &str) -> Result<ApiResponse, TransportError> {
        (**self).get(path).await
    }
}

impl<T: Transport> Transport for Arc<T> {
    async fn put(&self, path: &str, body: &Value) -> Result<ApiResponse, TransportError> {
        (**self).put(path, body).await
    }

    async fn get(&self, path: &str) -> Result<ApiResponse, TransportError> {
        (**self).get(path).await
    }
}
