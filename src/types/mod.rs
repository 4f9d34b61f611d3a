// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for light state changes.
//!
//! Each type checks its range at construction time, so a value that reaches
//! a transaction is always one the bridge documents as valid.
//!
//! # Types
//!
//! - [`Brightness`] - Brightness level (0-254)
//! - [`Hue`] - Color hue (0-65535)
//! - [`Saturation`] - Color saturation (0-254)
//! - [`XyColor`] - CIE xy color coordinates (0.0-1.0 each)
//! - [`ColorTemperature`] - White color temperature in mired (153-500)
//! - [`TransitionTime`] - Transition duration in 100 ms steps
//! - [`Alert`] / [`Effect`] - Alert and effect modes
//! - Increment types for relative adjustments

mod brightness;
mod color;
mod effect;
mod increment;
mod transition;

pub use brightness::Brightness;
pub use color::{ColorTemperature, Hue, Saturation, XyColor};
pub use effect::{Alert, Effect};
pub use increment::{
    BrightnessIncrement, ColorTemperatureIncrement, HueIncrement, SaturationIncrement,
    XyIncrement,
};
pub use transition::TransitionTime;
