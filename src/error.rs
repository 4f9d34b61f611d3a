// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `huesync` library.
//!
//! Failures fall into four families: a caller passed a bad value
//! ([`ValueError`]), the request never made it to the bridge
//! ([`TransportError`]), the bridge answered with something unreadable
//! ([`ProtocolError`]), or the bridge read the request and refused part of it
//! ([`ApiError`]).

use serde::Deserialize;
use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// A setter was given an out-of-range value.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// The request could not be delivered.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The reply could not be read.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// The bridge rejected the request.
    #[error("bridge error: {0}")]
    Api(#[from] ApiError),
}

/// Errors raised while validating setter arguments.
///
/// These are always raised before anything is recorded in a transaction.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValueError {
    /// An integer value is outside the allowed range.
    #[error("{field} value {actual} is out of range [{min}, {max}]")]
    OutOfRange {
        /// The attribute being validated.
        field: &'static str,
        /// Minimum allowed value.
        min: i64,
        /// Maximum allowed value.
        max: i64,
        /// The value that was provided.
        actual: i64,
    },

    /// A floating point value is outside the allowed range.
    #[error("{field} value {actual} is out of range [{min}, {max}]")]
    CoordinateOutOfRange {
        /// The attribute being validated.
        field: &'static str,
        /// Minimum allowed value.
        min: f32,
        /// Maximum allowed value.
        max: f32,
        /// The value that was provided.
        actual: f32,
    },

    /// A floating point value was NaN.
    #[error("{field} value is not a number")]
    NotANumber {
        /// The attribute being validated.
        field: &'static str,
    },
}

impl ValueError {
    pub(crate) fn out_of_range(
        field: &'static str,
        min: impl Into<i64>,
        max: impl Into<i64>,
        actual: impl Into<i64>,
    ) -> Self {
        Self::OutOfRange {
            field,
            min: min.into(),
            max: max.into(),
            actual: actual.into(),
        }
    }
}

/// Errors raised while delivering a request to the bridge.
#[derive(Debug, Error)]
pub enum TransportError {
    /// HTTP request failed.
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Connection to the bridge failed.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Request timed out.
    #[error("request timed out after {0} ms")]
    Timeout(u64),

    /// Invalid URL or address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// The bridge did not accept the configured username.
    #[error("unauthorized")]
    Unauthorized,
}

/// Errors raised while reading a bridge reply.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The reply carried no body.
    #[error("reply has no body")]
    MissingBody,

    /// The reply body is not valid JSON.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The reply is valid JSON but not shaped like a bridge reply.
    #[error("unexpected reply format: {0}")]
    UnexpectedFormat(String),
}

/// An error entry returned by the bridge.
///
/// The bridge reports rejected fields as
/// `{"error": {"type": 7, "address": "/lights/1/state/bri", "description": "..."}}`.
#[derive(Debug, Error, Clone, PartialEq, Eq, Deserialize)]
#[error("{description} (address: {address})")]
pub struct ApiError {
    /// Numeric error type as defined by the bridge, if present.
    #[serde(rename = "type", default)]
    pub kind: Option<u16>,
    /// The resource or field the error refers to.
    #[serde(default)]
    pub address: String,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
