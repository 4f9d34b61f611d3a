// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Cached copy of a bridge resource.

use std::time::Duration;

use serde_json::Value;
use tokio::time::Instant;

use crate::error::{Error, ProtocolError};
use crate::protocol::Transport;
use crate::transaction::first_error;

/// Last known JSON of one bridge resource, such as `/lights/3`.
///
/// The cache is only refreshed when asked to. [`value`](Self::value) always
/// answers from memory, so it may be stale; use
/// [`refresh_if_stale`](Self::refresh_if_stale) before reading if freshness
/// matters.
#[derive(Debug, Clone)]
pub struct CachedState {
    path: String,
    value: Value,
    refresh_interval: Duration,
    last_refresh: Option<Instant>,
}

impl CachedState {
    /// Default time after which the cached value counts as stale.
    pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(10);

    /// Creates an empty cache for a resource path.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            value: Value::Object(serde_json::Map::new()),
            refresh_interval: Self::DEFAULT_REFRESH_INTERVAL,
            last_refresh: None,
        }
    }

    /// Creates a cache seeded with a known value, counted as fresh.
    #[must_use]
    pub fn with_value(path: impl Into<String>, value: Value) -> Self {
        Self {
            value,
            last_refresh: Some(Instant::now()),
            ..Self::new(path)
        }
    }

    /// Sets the refresh interval.
    #[must_use]
    pub fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = interval;
        self
    }

    /// Returns the resource path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the refresh interval.
    #[must_use]
    pub fn refresh_interval(&self) -> Duration {
        self.refresh_interval
    }

    /// Returns the cached value, which may be stale.
    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Returns true if the value was never fetched or is older than the
    /// refresh interval.
    #[must_use]
    pub fn is_stale(&self) -> bool {
        self.last_refresh
            .is_none_or(|at| at.elapsed() >= self.refresh_interval)
    }

    /// Fetches the resource from the bridge and replaces the cached value.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails, the reply cannot be parsed, or the
    /// bridge reports an error for the resource. The cached value is kept
    /// on failure.
    pub async fn refresh<T: Transport>(&mut self, transport: &T) -> Result<(), Error> {
        let reply = transport.get(&self.path).await?.json()?;

        if let Some(err) = first_error(&reply) {
            return Err(err.into());
        }
        if !reply.is_object() {
            return Err(ProtocolError::UnexpectedFormat(format!(
                "expected an object for {}",
                self.path
            ))
            .into());
        }

        tracing::debug!(path = %self.path, "Refreshed cached state");

        self.value = reply;
        self.last_refresh = Some(Instant::now());
        Ok(())
    }

    /// Refreshes the value only if it is stale.
    ///
    /// # Errors
    ///
    /// Returns error if a refresh was needed and failed.
    pub async fn refresh_if_stale<T: Transport>(&mut self, transport: &T) -> Result<(), Error> {
        if self.is_stale() {
            self.refresh(transport).await?;
        }
        Ok(())
    }

    /// Marks the value as stale so the next
    /// [`refresh_if_stale`](Self::refresh_if_stale) fetches it.
    pub fn invalidate(&mut self) {
        self.last_refresh = None;
    }
}
