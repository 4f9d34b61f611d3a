// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Differential state transactions.
//!
//! A [`StateTransaction`] collects changes for one light or group, drops the
//! ones the last known state already shows, and sends the rest as a single
//! partial update.
//!
//! | Setter | Wire field | Range |
//! |--------|-----------|-------|
//! | `set_on` | `on` | bool |
//! | `set_brightness` | `bri` | 0-254 |
//! | `set_color_hue` | `hue` | 0-65535 |
//! | `set_color_saturation` | `sat` | 0-254 |
//! | `set_color_xy` | `xy` | 0.0-1.0 each |
//! | `set_color_temperature` | `ct` | 153-500 |
//! | `set_color_loop` | `effect` | `colorloop` / `none` |
//! | `increment_brightness` | `bri_inc` | -254-254 |
//! | `increment_saturation` | `sat_inc` | -254-254 |
//! | `increment_hue` | `hue_inc` | -65535-65535 |
//! | `increment_color_temperature` | `ct_inc` | -65535-65535 |
//! | `increment_color_xy` | `xy_inc` | -0.5-0.5 each |
//! | `alert` / `long_alert` / `stop_alert` | `alert` | `select` / `lselect` / `none` |
//! | `set_transition` | `transitiontime` | 100 ms steps |
//!
//! # Examples
//!
//! ```no_run
//! use huesync::protocol::HttpConfig;
//! use huesync::state::Snapshot;
//! use huesync::transaction::StateTransaction;
//! use serde_json::json;
//!
//! # async fn example() -> huesync::Result<()> {
//! let client = HttpConfig::new("192.168.1.2", "my-app-user").into_client()?;
//! let state = json!({"on": false, "bri": 20});
//!
//! // Sends {"on": true, "hue": 46920, "sat": 254}
//! StateTransaction::new(&client, "/lights/3/state", Snapshot::new(&state))
//!     .set_on(true)
//!     .set_brightness(20)?
//!     .set_color_hue(46920)?
//!     .set_color_saturation(254)?
//!     .commit()
//!     .await?;
//! # Ok(())
//! # }
//! ```

mod builder;
mod change;
mod commit;
mod encoder;

pub use builder::StateTransaction;
pub use change::{Attribute, PendingChange};
pub use commit::Committer;
pub use encoder::{encode, RequestDocument, TRANSITION_FIELD};

pub(crate) use commit::first_error;
