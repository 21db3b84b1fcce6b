// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Panes panel library
//!
//! ## Panels over host-owned children
//!
//! These implement [`Panel`]: the host passes its children as a slice on each
//! pass.
//!
//! -   [`EditForm`]: multi-column label/edit form with groups, elastic
//!     squeeze (spacing, scale, reflow) and scrolling
//! -   [`PropertySheet`]: label/value grid with collapsible groups and a
//!     draggable label/value splitter
//! -   [`FlowPanel`]: label-led rows of controls which wrap
//! -   [`MetroPanel`]: groups of tiles
//! -   [`BladePanel`]: blades laid out left to right, scrolling or stacking
//!
//! ## Docking
//!
//! The [`dock`] module provides [`DockPanel`], which owns its children: they
//! move between wells and floating windows.

mod blade;
pub mod dock;
mod flow;
mod form;
mod metro;
mod sheet;

pub use blade::{BladeMsg, BladePanel};
#[doc(no_inline)]
pub use dock::DockPanel;
pub use flow::FlowPanel;
pub use form::{EditForm, FormMsg};
pub use metro::MetroPanel;
pub use sheet::{PropertySheet, SheetMsg};

use panes_core::{Action, Invalidation};
use panes_core::draw::{Canvas, DecorationStyle, HeaderRenderer, render_regions};
use panes_core::event::PointerEvent;
use panes_core::geom::{AvailableSize, Rect, Size};
use panes_core::node::Node;
use panes_core::region::RegionRegistry;

/// Result of handling an event
///
/// `output` carries anything the host must act on, for example a blade to
/// close or a floating window to create.
#[must_use]
#[derive(Debug)]
pub struct Response<T> {
    pub action: Action,
    pub output: Option<T>,
}

impl<T> Response<T> {
    /// A response without output
    #[inline]
    pub fn action(action: Action) -> Self {
        Response {
            action,
            output: None,
        }
    }
}

impl<T> Default for Response<T> {
    fn default() -> Self {
        Response::action(Action::empty())
    }
}

/// A two-pass layout panel over host-owned children
pub trait Panel {
    /// Message type of the panel's hot areas
    type Msg: Clone;

    /// Measure pass: compute the required size within `available`
    fn measure<N: Node>(&mut self, children: &mut [N], available: AvailableSize) -> Size;

    /// Arrange pass: place children within `rect`
    ///
    /// Uses the plan of the last [`Panel::measure`]. Returns
    /// [`Action::RESIZE`] if the arrangement changed an input of the measure
    /// pass (for example scroll bar visibility).
    fn arrange<N: Node>(&mut self, children: &mut [N], rect: Rect) -> Action;

    /// Regions of the last arrange pass
    fn regions(&self) -> &RegionRegistry<Self::Msg>;

    /// Draw the panel's own decorations
    fn render(&self, canvas: &mut dyn Canvas, renderer: Option<&dyn HeaderRenderer>) {
        render_regions(self.regions(), canvas, &DecorationStyle::default(), renderer);
    }

    /// Handle a pointer event
    ///
    /// Messages the panel does not consume itself are returned as output.
    /// Events over header bands are also passed through to `renderer`, if
    /// any. The default implementation ignores the event.
    fn handle_pointer<N: Node>(
        &mut self,
        _children: &mut [N],
        _event: PointerEvent,
        _renderer: Option<&mut dyn HeaderRenderer>,
    ) -> Response<Self::Msg> {
        Response::default()
    }
}

/// Measure and arrange `panel` within `rect`
///
/// Repeats both passes while arrangement requests a resize, at most three
/// times. Returns the last required size. Any action still outstanding is
/// discarded; see [`layout_with`].
pub fn layout<N: Node, P: Panel>(panel: &mut P, children: &mut [N], rect: Rect) -> Size {
    layout_with(panel, children, rect, &mut Invalidation::default())
}

/// Measure and arrange `panel` within `rect`, recording leftover work
///
/// Like [`layout`], but a resize still requested after the last pass is not
/// run: it is placed in the deferred slot of `invalidation` for the host to
/// drain once the current pass has completed. A trailing redraw is merged
/// into the pending set.
pub fn layout_with<N: Node, P: Panel>(
    panel: &mut P,
    children: &mut [N],
    rect: Rect,
    invalidation: &mut Invalidation,
) -> Size {
    let mut required = Size::ZERO;
    let mut action = Action::empty();
    for _ in 0..3 {
        required = panel.measure(children, AvailableSize::bounded(rect.size));
        action = panel.arrange(children, rect);
        if !action.needs_measure() {
            break;
        }
    }
    if action.needs_measure() {
        log::debug!("layout_with: deferring {action:?} after three passes");
        invalidation.defer(action);
    } else {
        invalidation.request(action);
    }
    required
}

#[cfg(test)]
mod test {
    use super::*;
    use panes_core::geom::{Coord, Size};
    use panes_core::node::FixedNode;

    #[test]
    fn settled_layout_defers_nothing() {
        let mut form = EditForm::default();
        let mut children = vec![FixedNode::label(40, 20), FixedNode::new(80, 20)];
        let mut inv = Invalidation::default();
        let rect = Rect::new(Coord::ZERO, Size(300, 200));
        let required = layout_with(&mut form, &mut children, rect, &mut inv);
        assert_eq!(required, Size(125, 20));
        assert!(!inv.has_deferred());
        assert!(!inv.drain_deferred().needs_measure());
    }

    /// A panel whose arrangement never settles
    #[derive(Default)]
    struct Restless {
        measured: usize,
        regions: RegionRegistry<()>,
    }

    impl Panel for Restless {
        type Msg = ();

        fn measure<N: Node>(&mut self, _: &mut [N], _: AvailableSize) -> Size {
            self.measured += 1;
            Size(10, 10)
        }

        fn arrange<N: Node>(&mut self, _: &mut [N], _: Rect) -> Action {
            Action::RESIZE
        }

        fn regions(&self) -> &RegionRegistry<()> {
            &self.regions
        }
    }

    #[test]
    fn unsettled_layout_is_deferred() {
        let mut panel = Restless::default();
        let mut children: Vec<FixedNode> = vec![];
        let mut inv = Invalidation::default();
        let rect = Rect::new(Coord::ZERO, Size(100, 100));
        let required = layout_with(&mut panel, &mut children, rect, &mut inv);
        assert_eq!(required, Size(10, 10));
        assert_eq!(panel.measured, 3);
        assert!(inv.has_deferred());
        assert_eq!(inv.drain_deferred(), Action::RESIZE);
        assert!(!inv.has_deferred());
    }
}
