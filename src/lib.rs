// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `huesync` - differential state transactions for Hue lights.
//!
//! This library drives lights and groups behind a Hue bridge by batching
//! state changes into a single partial update. Changes the last known state
//! already shows are left out, so committing a transaction that changes
//! nothing makes no request at all.
//!
//! # Supported Features
//!
//! - **Transactions**: on/off, brightness, hue, saturation, xy, color
//!   temperature, color loop, increments, alerts and transition time
//! - **No-op elision**: absolute writes matching the cached state are dropped
//! - **Light handles**: cached light state with refresh, rename and
//!   convenience on/off/alert
//! - **Group handles**: transactions against a group action
//!
//! # Quick Start
//!
//! ```no_run
//! use huesync::Light;
//! use huesync::protocol::HttpConfig;
//!
//! #[tokio::main]
//! async fn main() -> huesync::Result<()> {
//!     let client = HttpConfig::new("192.168.1.2", "my-app-user").into_client()?;
//!     let light = Light::fetch(1, client).await?;
//!
//!     // Only the fields that differ from the cached state are sent
//!     light
//!         .transaction()
//!         .set_on(true)
//!         .set_brightness(150)?
//!         .set_transition(10u16)
//!         .commit()
//!         .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Custom transports
//!
//! Transactions reach the bridge through the [`Transport`] trait, so the
//! core works without the default `http` feature:
//!
//! ```
//! use huesync::protocol::{ApiResponse, Transport};
//! use huesync::error::TransportError;
//! use serde_json::Value;
//!
//! struct Offline;
//!
//! impl Transport for Offline {
//!     async fn put(&self, _path: &str, _body: &Value) -> Result<ApiResponse, TransportError> {
//!         Ok(ApiResponse::new("[]"))
//!     }
//!
//!     async fn get(&self, _path: &str) -> Result<ApiResponse, TransportError> {
//!         Ok(ApiResponse::new("{}"))
//!     }
//! }
//! ```

pub mod error;
mod light;
pub mod protocol;
pub mod state;
pub mod transaction;
pub mod types;

pub use error::{ApiError, Error, ProtocolError, Result, TransportError, ValueError};
pub use light::{Group, Light};
#[cfg(feature = "http")]
pub use protocol::{HttpClient, HttpConfig};
pub use protocol::{ApiResponse, Transport};
pub use state::{CachedState, Snapshot};
pub use transaction::{PendingChange, StateTransaction};
pub use types::{
    Alert, Brightness, ColorTemperature, Effect, Hue, Saturation, TransitionTime, XyColor,
};
