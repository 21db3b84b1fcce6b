// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Panes prelude
//!
//! This module allows convenient importation of common unambiguous items:
//! ```
//! use panes::prelude::*;
//! ```

#[doc(no_inline)]
pub use panes_core::{Action, Invalidation};
#[doc(no_inline)]
pub use panes_core::cast::traits::*;
#[doc(no_inline)]
pub use panes_core::config::{LayoutConfig, SqueezePolicy};
#[doc(no_inline)]
pub use panes_core::dir::{Direction, Directional};
#[doc(no_inline)]
pub use panes_core::draw::{Canvas, HeaderRenderer};
#[doc(no_inline)]
pub use panes_core::event::PointerEvent;
#[doc(no_inline)]
pub use panes_core::geom::{AvailableSize, Coord, Offset, Rect, Size};
#[doc(no_inline)]
pub use panes_core::node::{Attached, FixedNode, Flags, LayoutBox, Node, Placement, Role};
#[doc(no_inline)]
pub use panes_panels::dock::{DockPanel, Well};
#[doc(no_inline)]
pub use panes_panels::{
    BladePanel, EditForm, FlowPanel, FormMsg, MetroPanel, Panel, PropertySheet, Response,
    layout, layout_with,
};
