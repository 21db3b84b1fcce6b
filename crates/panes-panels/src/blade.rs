// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Blade panel

use crate::{Panel, Response};
use panes_core::Action;
use panes_core::config::{BladeOverflow, LayoutConfig};
use panes_core::draw::HeaderRenderer;
use panes_core::event::{Dispatch, HeaderHover, PointerEvent, PressTracker};
use panes_core::geom::{AvailableSize, Coord, Offset, Rect, Size};
use panes_core::node::{LayoutBox, Node, Placement, hide_invisible};
use panes_core::region::{CursorIcon, HeaderKind, HeaderRenderInfo, HotArea, RegionRegistry};
use panes_core::scroll::ScrollCoordinator;

/// Messages of [`BladePanel`] hot areas
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BladeMsg {
    /// The close button of the child with this index was clicked
    Close(usize),
}

#[derive(Clone, Copy, Debug)]
struct Blade {
    index: usize,
    width: i32,
}

/// Blades laid out left to right
///
/// Each visible child is a blade: as wide as it desires, as tall as the
/// panel, below a title band. Closable children get a close button in the
/// band; clicking it yields [`BladeMsg::Close`] for the host to act on.
///
/// When the blades are wider than the panel, [`BladeOverflow::Scroll`]
/// scrolls horizontally while [`BladeOverflow::Stack`] keeps the last blade
/// fully visible against the right edge. Blades it covers keep their desired
/// rect but are clipped to the part left of the last blade.
#[derive(Clone, Debug)]
pub struct BladePanel {
    config: LayoutConfig,
    blades: Vec<Blade>,
    required: Size,
    scroll: ScrollCoordinator,
    regions: RegionRegistry<BladeMsg>,
    tracker: PressTracker<BladeMsg>,
    hover: HeaderHover,
}

impl Default for BladePanel {
    fn default() -> Self {
        BladePanel::new(LayoutConfig::default())
    }
}

impl BladePanel {
    /// Construct
    pub fn new(config: LayoutConfig) -> Self {
        BladePanel {
            config: config.validate(),
            blades: vec![],
            required: Size::ZERO,
            scroll: ScrollCoordinator::horizontal(),
            regions: RegionRegistry::default(),
            tracker: PressTracker::default(),
            hover: HeaderHover::default(),
        }
    }

    /// Set the overflow policy
    pub fn set_overflow(&mut self, overflow: BladeOverflow) -> Action {
        if self.config.blades.overflow == overflow {
            return Action::empty();
        }
        self.config.blades.overflow = overflow;
        Action::RESIZE
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

    fn gap(&self) -> i32 {
        match self.config.blades.overflow {
            BladeOverflow::Scroll => self.config.blades.spacing.max(0),
            BladeOverflow::Stack => 0,
        }
    }

    fn total_width(&self) -> i32 {
        let n = i32::try_from(self.blades.len()).unwrap_or(0);
        self.blades.iter().map(|b| b.width).sum::<i32>() + (n - 1).max(0) * self.gap()
    }
}

impl Panel for BladePanel {
    type Msg = BladeMsg;

    fn measure<N: Node>(&mut self, children: &mut [N], available: AvailableSize) -> Size {
        let boxes = LayoutBox::collect(children);
        self.blades = boxes
            .iter()
            .map(|b| Blade {
                index: b.index,
                width: b.preferred.0,
            })
            .collect();
        let height = boxes.iter().map(|b| b.preferred.1).max().unwrap_or(0);

        let total = self.total_width();
        let width = match (self.config.blades.overflow, available.0) {
            (BladeOverflow::Stack, Some(avail)) => {
                let last = self.blades.last().map(|b| b.width).unwrap_or(0);
                last.max(total.min(avail))
            }
            _ => total,
        };
        self.required = Size::clamped(width, height + self.config.blades.header_height);
        self.required
    }

    fn arrange<N: Node>(&mut self, children: &mut [N], rect: Rect) -> Action {
        self.regions.clear();
        hide_invisible(children);
        let action = self.scroll.update(
            self.required,
            AvailableSize::bounded(rect.size),
            &self.config.scroll,
        );
        let size = self
            .scroll
            .content_available(AvailableSize::bounded(rect.size), &self.config.scroll)
            .or(rect.size);

        let c = &self.config.blades;
        let header_h = c.header_height.max(0).min(size.1);
        let body_h = size.1 - header_h;
        let offset = self.scroll.offset().0;
        let gap = self.gap();

        let stack = c.overflow == BladeOverflow::Stack && self.total_width() > size.0;
        let last = self.blades.len().saturating_sub(1);
        let last_x = match self.blades.last() {
            Some(b) if stack => rect.pos.0 + (size.0 - b.width).max(0) - offset,
            _ => i32::MAX,
        };

        let y = rect.pos.1;
        let mut x = rect.pos.0 - offset;
        for (k, blade) in self.blades.iter().enumerate() {
            let bx = if stack && k == last { last_x } else { x };
            x += blade.width + gap;
            let visible_w = match k < last {
                true => blade.width.min(last_x.saturating_sub(bx)).max(0),
                false => blade.width,
            };
            let clipped = visible_w < blade.width;

            let child = &mut children[blade.index];
            self.regions.push_header(HeaderRenderInfo {
                kind: HeaderKind::Blade,
                rect: Rect::clamped(bx, y, visible_w, header_h),
                title: child.title().map(str::to_string),
                index: blade.index,
            });

            let close = c.close_size.max(0).min(header_h);
            let margin = (header_h - close) / 2;
            let button = Rect::clamped(bx + blade.width - margin - close, y + margin, close, close);
            if child.closable() && button.pos.0 + close <= bx + visible_w {
                self.regions.push_hot_area(
                    HotArea::new(button)
                        .with_cursor(CursorIcon::Pointer)
                        .on_click(BladeMsg::Close(blade.index)),
                );
            }

            let body = Rect::new(Coord(bx, y + header_h), Size::clamped(blade.width, body_h));
            child.set_rect(Placement {
                rect: body,
                layout_size: body.size,
                clip: clipped.then(|| Rect::new(body.pos, Size::clamped(visible_w, body_h))),
                scale: 1.0,
            });
        }

        self.scroll
            .push_tracks(&mut self.regions, rect, &self.config.scroll);
        action
    }

    fn regions(&self) -> &RegionRegistry<BladeMsg> {
        &self.regions
    }

    fn handle_pointer<N: Node>(
        &mut self,
        _: &mut [N],
        event: PointerEvent,
        renderer: Option<&mut dyn HeaderRenderer>,
    ) -> Response<BladeMsg> {
        let mut response = Response::default();
        if let Some(renderer) = renderer {
            response.action |= self.hover.forward(&self.regions, renderer, event);
        }
        for dispatch in self.tracker.dispatch(&self.regions, event) {
            if let Dispatch::Click(msg) = dispatch {
                log::debug!("BladePanel::handle_pointer: {msg:?}");
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
    use panes_core::node::FixedNode;

    fn blades() -> Vec<FixedNode> {
        let mut second = FixedNode::new(300, 100).with_title("Details");
        second.closable = true;
        vec![
            FixedNode::new(200, 100).with_title("List"),
            second,
            FixedNode::new(250, 120).with_title("Editor"),
        ]
    }

    #[test]
    fn scroll_overflow() {
        let mut panel = BladePanel::default();
        let mut children = blades();
        let rect = Rect::new(Coord::ZERO, Size(600, 400));
        let required = layout(&mut panel, &mut children, rect);
        assert_eq!(required, Size(750, 148));
        assert!(panel.scroll().any_visible());
        assert_eq!(panel.scroll().max_offset(), Offset(150, 0));

        // the horizontal bar takes 16 from the height
        assert_eq!(children[1].rect(), Rect::clamped(200, 28, 300, 356));
        assert!(children[1].placement.unwrap().clip.is_none());
        let headers = panel.regions().headers();
        assert_eq!(headers.len(), 3);
        assert_eq!(headers[2].title.as_deref(), Some("Editor"));

        let _ = panel.handle_pointer(&mut children, PointerEvent::Press(Coord(485, 10)), None);
        let r = panel.handle_pointer(&mut children, PointerEvent::Release(Coord(485, 10)), None);
        assert_eq!(r.output, Some(BladeMsg::Close(1)));
    }

    #[test]
    fn stack_overflow_clips() {
        let mut config = LayoutConfig::default();
        config.blades.overflow = BladeOverflow::Stack;
        let mut panel = BladePanel::new(config);
        let mut children = blades();
        let rect = Rect::new(Coord::ZERO, Size(600, 400));
        let required = layout(&mut panel, &mut children, rect);
        assert_eq!(required.0, 600);
        assert!(!panel.scroll().any_visible());

        assert_eq!(children[2].rect(), Rect::clamped(350, 28, 250, 372));
        assert!(children[0].placement.unwrap().clip.is_none());
        let p = children[1].placement.unwrap();
        assert_eq!(p.rect, Rect::clamped(200, 28, 300, 372));
        assert_eq!(p.clip, Some(Rect::clamped(200, 28, 150, 372)));
        assert_eq!(panel.regions().headers()[1].rect.size, Size(150, 28));
        // the close button is covered by the last blade
        assert!(panel.regions().hot_areas().is_empty());
    }

    #[test]
    fn stack_without_overflow_is_sequential() {
        let mut config = LayoutConfig::default();
        config.blades.overflow = BladeOverflow::Stack;
        let mut panel = BladePanel::new(config);
        let mut children = blades();
        let rect = Rect::new(Coord::ZERO, Size(800, 400));
        layout(&mut panel, &mut children, rect);
        assert_eq!(children[2].rect().pos, Coord(500, 28));
        assert_eq!(panel.regions().hot_areas().len(), 1);
    }
}
