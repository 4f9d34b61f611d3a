// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Known light state.
//!
//! [`CachedState`] holds the last JSON the bridge returned for a resource.
//! [`Snapshot`] is a borrowed, read-only view over such JSON that a
//! transaction diffs its changes against.
//!
//! # Examples
//!
//! ```
//! use huesync::state::{CachedState, Snapshot};
//! use serde_json::json;
//!
//! let cache = CachedState::with_value("/lights/1", json!({"state": {"on": true}}));
//! let snapshot = Snapshot::new(&cache.value()["state"]);
//! assert_eq!(snapshot.on(), Some(true));
//! ```

mod cache;
mod snapshot;

pub use cache::CachedState;
pub use snapshot::Snapshot;
