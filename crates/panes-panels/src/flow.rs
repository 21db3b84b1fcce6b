// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Flow panel

use crate::Panel;
use panes_core::Action;
use panes_core::config::LayoutConfig;
use panes_core::geom::{AvailableSize, Offset, Rect, Size};
use panes_core::layout::{FlowPlan, FlowSolver};
use panes_core::node::{LayoutBox, Node, Placement, hide_invisible};
use panes_core::region::RegionRegistry;
use panes_core::scroll::ScrollCoordinator;

/// Rows of controls led by labels
///
/// Each [`Role::Label`] child starts a row; the labels of all rows share one
/// column. Rows wrap to the available width; runs of check-box or radio
/// button like children are kept on one line where possible.
///
/// The panel scrolls vertically.
///
/// [`Role::Label`]: panes_core::node::Role::Label
#[derive(Clone, Debug)]
pub struct FlowPanel {
    config: LayoutConfig,
    plan: Option<FlowPlan>,
    scroll: ScrollCoordinator,
    regions: RegionRegistry<()>,
}

impl Default for FlowPanel {
    fn default() -> Self {
        FlowPanel::new(LayoutConfig::default())
    }
}

impl FlowPanel {
    /// Construct
    pub fn new(config: LayoutConfig) -> Self {
        FlowPanel {
            config: config.validate(),
            plan: None,
            scroll: ScrollCoordinator::vertical(),
            regions: RegionRegistry::default(),
        }
    }

    /// The plan in effect
    #[inline]
    pub fn plan(&self) -> Option<&FlowPlan> {
        self.plan.as_ref()
    }

    /// Scroll state
    #[inline]
    pub fn scroll(&self) -> &ScrollCoordinator {
        &self.scroll
    }

    /// Set the scroll offset
    #[inline]
    pub fn set_scroll_offset(&mut self, offset: Offset) -> Action {
        self.scroll.set_offset(offset)
    }
}

impl Panel for FlowPanel {
    type Msg = ();

    fn measure<N: Node>(&mut self, children: &mut [N], available: AvailableSize) -> Size {
        let avail = self.scroll.content_available(available, &self.config.scroll);
        let boxes = LayoutBox::collect(children);
        let plan = FlowSolver::new(&self.config.flow).solve(boxes, avail.0);
        let size = plan.size;
        self.plan = Some(plan);
        size
    }

    fn arrange<N: Node>(&mut self, children: &mut [N], rect: Rect) -> Action {
        self.regions.clear();
        hide_invisible(children);
        let Some(plan) = self.plan.as_mut() else {
            log::debug!("FlowPanel::arrange: not measured");
            return Action::RESIZE;
        };

        let mut action = self.scroll.update(
            plan.size,
            AvailableSize::bounded(rect.size),
            &self.config.scroll,
        );
        let width = self
            .scroll
            .content_available(AvailableSize::bounded(rect.size), &self.config.scroll)
            .0;
        if plan.wrap_width != width {
            let size = plan.size;
            let boxes = std::mem::take(&mut plan.boxes);
            *plan = FlowSolver::new(&self.config.flow).solve(boxes, width);
            if plan.size != size {
                action |= Action::RESIZE;
            }
        }

        let offset = Offset(rect.pos.0, rect.pos.1) - self.scroll.offset();
        for (b, r) in &plan.items {
            let index = plan.boxes[*b].index;
            children[index].set_rect(Placement::new(*r + offset));
        }

        self.scroll
            .push_tracks(&mut self.regions, rect, &self.config.scroll);
        action
    }

    fn regions(&self) -> &RegionRegistry<()> {
        &self.regions
    }
}
