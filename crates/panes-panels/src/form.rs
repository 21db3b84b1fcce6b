// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Edit form

use crate::{Panel, Response};
use panes_core::Action;
use panes_core::config::LayoutConfig;
use panes_core::draw::HeaderRenderer;
use panes_core::event::{Dispatch, HeaderHover, PointerEvent, PressTracker};
use panes_core::geom::{AvailableSize, Offset, Rect, Size};
use panes_core::layout::{FormPlan, FormSetter, FormSolver};
use panes_core::node::{LayoutBox, Node, hide_invisible};
use panes_core::region::{CursorIcon, HotArea, RegionRegistry};
use panes_core::scroll::ScrollCoordinator;

/// Messages of [`EditForm`] hot areas
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormMsg {
    /// The header band of the group with this number was clicked
    Header(usize),
}

/// A multi-column label/edit form
///
/// Children are laid out in columns of rows. A [`Role::Label`] child pairs
/// with the following child; [`Flags::COLUMN_BREAK`] starts a new column and
/// [`Flags::GROUP_BREAK`] a new group (titled groups get a header band).
///
/// When the content does not fit, spacing is reduced toward the configured
/// minimums, then the configured [`SqueezePolicy`] is applied. Whatever still
/// does not fit is scrolled.
///
/// Clicking a group header band yields [`FormMsg::Header`].
///
/// [`Role::Label`]: panes_core::node::Role::Label
/// [`Flags::COLUMN_BREAK`]: panes_core::node::Flags::COLUMN_BREAK
/// [`Flags::GROUP_BREAK`]: panes_core::node::Flags::GROUP_BREAK
/// [`SqueezePolicy`]: panes_core::config::SqueezePolicy
#[derive(Clone, Debug)]
pub struct EditForm {
    config: LayoutConfig,
    plan: Option<FormPlan>,
    scale: f32,
    scroll: ScrollCoordinator,
    regions: RegionRegistry<FormMsg>,
    tracker: PressTracker<FormMsg>,
    hover: HeaderHover,
    rect: Rect,
}

impl Default for EditForm {
    fn default() -> Self {
        EditForm::new(LayoutConfig::default())
    }
}

impl EditForm {
    /// Construct
    ///
    /// The configuration is validated.
    pub fn new(config: LayoutConfig) -> Self {
        EditForm {
            config: config.validate(),
            plan: None,
            scale: 1.0,
            scroll: ScrollCoordinator::new(true, true),
            regions: RegionRegistry::default(),
            tracker: PressTracker::default(),
            hover: HeaderHover::default(),
            rect: Rect::ZERO,
        }
    }

    /// Access the configuration
    #[inline]
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Replace the configuration
    pub fn set_config(&mut self, config: LayoutConfig) -> Action {
        self.config = config.validate();
        self.scale = 1.0;
        self.tracker.cancel();
        Action::RESIZE
    }

    /// The plan solved by the last measure pass
    #[inline]
    pub fn plan(&self) -> Option<&FormPlan> {
        self.plan.as_ref()
    }

    /// The render scale in effect
    #[inline]
    pub fn scale(&self) -> f32 {
        self.scale
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

    /// Scroll by a delta
    #[inline]
    pub fn scroll_by(&mut self, delta: Offset) -> Action {
        self.scroll.scroll_by(delta)
    }
}

impl Panel for EditForm {
    type Msg = FormMsg;

    fn measure<N: Node>(&mut self, children: &mut [N], available: AvailableSize) -> Size {
        let avail = self.scroll.content_available(available, &self.config.scroll);
        let boxes = LayoutBox::collect(children);
        let plan = FormSolver::new(&self.config).solve(boxes, avail, self.scale);
        self.scale = plan.scale;
        let required = plan.required;
        self.plan = Some(plan);
        required
    }

    fn arrange<N: Node>(&mut self, children: &mut [N], rect: Rect) -> Action {
        self.rect = rect;
        self.regions.clear();
        hide_invisible(children);
        let Some(plan) = self.plan.as_ref() else {
            log::debug!("EditForm::arrange: not measured");
            return Action::RESIZE;
        };

        let action = self.scroll.update(
            plan.required,
            AvailableSize::bounded(rect.size),
            &self.config.scroll,
        );
        FormSetter::new(plan, &self.config, rect, self.scroll.offset())
            .apply(children, &mut self.regions);
        let areas: Vec<_> = self
            .regions
            .headers()
            .iter()
            .map(|header| {
                HotArea::new(header.rect)
                    .with_cursor(CursorIcon::Pointer)
                    .on_click(FormMsg::Header(header.index))
            })
            .collect();
        for area in areas {
            self.regions.push_hot_area(area);
        }
        self.scroll.push_tracks(&mut self.regions, rect, &self.config.scroll);
        action
    }

    fn regions(&self) -> &RegionRegistry<FormMsg> {
        &self.regions
    }

    fn handle_pointer<N: Node>(
        &mut self,
        _: &mut [N],
        event: PointerEvent,
        renderer: Option<&mut dyn HeaderRenderer>,
    ) -> Response<FormMsg> {
        let mut response = Response::default();
        if let Some(renderer) = renderer {
            response.action |= self.hover.forward(&self.regions, renderer, event);
        }
        for dispatch in self.tracker.dispatch(&self.regions, event) {
            if let Dispatch::Click(msg) = dispatch {
                response.output = Some(msg);
            }
        }
        response
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::layout;
    use panes_core::config::SqueezePolicy;
    use panes_core::dir::{Down, Right};
    use panes_core::draw::Canvas;
    use panes_core::event::HeaderEvent;
    use panes_core::geom::{Coord, Margins};
    use panes_core::node::FixedNode;
    use panes_core::region::HeaderRenderInfo;

    #[derive(Default)]
    struct Hovered(Vec<HeaderEvent>);

    impl HeaderRenderer for Hovered {
        fn client_area_margins(&self) -> Margins {
            Margins::ZERO
        }
        fn render(&self, _: &mut dyn Canvas, _: &HeaderRenderInfo) {}
        fn on_pointer(&mut self, _: &HeaderRenderInfo, event: HeaderEvent) -> Action {
            self.0.push(event);
            Action::REDRAW
        }
    }

    fn rows(n: usize) -> Vec<FixedNode> {
        (0..n)
            .flat_map(|_| [FixedNode::label(40, 20), FixedNode::new(60, 20)])
            .collect()
    }

    #[test]
    fn overflow_scrolls() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut form = EditForm::default();
        let mut children = rows(10);
        let rect = Rect::new(Coord::ZERO, Size(300, 100));
        let required = layout(&mut form, &mut children, rect);
        // spacing squeezed to the minimum: 10 * 20 + 9 * 1
        assert_eq!(required.1, 209);
        assert!(form.scroll().state(Down).visible);
        assert_eq!(form.scroll().state(Down).max, 109);

        let _ = form.set_scroll_offset(Offset(0, 50));
        let _ = form.arrange(&mut children, rect);
        assert_eq!(children[2].rect().pos, Coord(0, 21 - 50));
        assert_eq!(form.regions().tracks().len(), 1);
    }

    #[test]
    fn hidden_children_are_skipped() {
        let mut form = EditForm::default();
        let mut children = rows(2);
        children[2].visible = false;
        children[3].visible = false;
        let rect = Rect::new(Coord::ZERO, Size(300, 300));
        let required = layout(&mut form, &mut children, rect);
        assert_eq!(required, Size(40 + 5 + 60, 20));
        assert!(children[2].placement.unwrap().is_hidden());
    }

    #[test]
    fn scale_is_stable_across_passes() {
        let mut config = LayoutConfig::default();
        config.squeeze.policy = SqueezePolicy::Scale;
        let mut form = EditForm::new(config);
        let mut children = rows(2);
        let rect = Rect::new(Coord::ZERO, Size(80, 300));
        layout(&mut form, &mut children, rect);
        let first: Vec<_> = children.iter().map(|c| c.rect()).collect();
        layout(&mut form, &mut children, rect);
        let second: Vec<_> = children.iter().map(|c| c.rect()).collect();
        assert_eq!(first, second);
        assert!(form.scale() < 1.0);
    }

    #[test]
    fn content_beside_vertical_bar_scrolls_horizontally() {
        let mut form = EditForm::default();
        let mut children: Vec<_> = (0..10)
            .flat_map(|_| [FixedNode::label(40, 20), FixedNode::new(250, 20)])
            .collect();
        let rect = Rect::new(Coord::ZERO, Size(300, 100));
        let required = layout(&mut form, &mut children, rect);
        assert!(required.0 > 284);

        let (h, v) = (form.scroll().state(Right), form.scroll().state(Down));
        assert!(h.visible && v.visible);
        assert_eq!((h.viewport, v.viewport), (284, 84));
        assert_eq!(h.viewport + h.max, required.0);
        assert_eq!(form.regions().tracks().len(), 2);

        let _ = form.set_scroll_offset(form.scroll().max_offset());
        let _ = form.arrange(&mut children, rect);
        let edit = children[1].rect();
        assert!(edit.pos.0 + edit.size.0 <= 284);
    }

    #[test]
    fn header_click_names_group() {
        let mut form = EditForm::default();
        let mut children = vec![
            FixedNode::label(40, 20).with_group("General"),
            FixedNode::new(60, 20),
            FixedNode::label(40, 20).with_group("Advanced"),
            FixedNode::new(60, 20),
        ];
        let rect = Rect::new(Coord::ZERO, Size(300, 300));
        layout(&mut form, &mut children, rect);
        assert_eq!(form.regions().headers().len(), 2);
        assert_eq!(form.regions().hot_areas().len(), 2);
        let at = form.regions().headers()[1].rect.pos + Offset(3, 3);

        let mut renderer = Hovered::default();
        let r = form.handle_pointer(
            &mut children,
            PointerEvent::Move(at),
            Some(&mut renderer as &mut dyn HeaderRenderer),
        );
        assert_eq!(r.action, Action::REDRAW);
        assert_eq!(renderer.0, vec![HeaderEvent::Enter, HeaderEvent::Move(at)]);

        let _ = form.handle_pointer(&mut children, PointerEvent::Press(at), None);
        let r = form.handle_pointer(&mut children, PointerEvent::Release(at), None);
        assert_eq!(r.output, Some(FormMsg::Header(1)));
    }
}
