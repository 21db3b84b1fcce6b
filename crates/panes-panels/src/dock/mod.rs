// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Docking
//!
//! A [`DockPanel`] arranges the five wells of a [`DockWellModel`]: left,
//! right, top, bottom and main. Each well holds a list of elements, of which
//! only the selected one is shown.
//!
//! Undocking moves an element out of the model into a [`Floating`] handle;
//! the element's child travels with it. The host shows the child in a window
//! of its own and, when that window closes, hands the handle back to
//! [`DockPanel::redock`].

mod panel;
mod well;

pub use panel::{DockMsg, DockPanel};
pub use well::{DockError, DockWell, DockWellModel, DockedElement, Floating, Redocked, Well};
