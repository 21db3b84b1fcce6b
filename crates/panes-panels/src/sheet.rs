// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Property sheet

use crate::{Panel, Response};
use panes_core::Action;
use panes_core::cast::{CastFloat, Conv};
use panes_core::config::LayoutConfig;
use panes_core::dir::Direction;
use panes_core::draw::HeaderRenderer;
use panes_core::event::{Dispatch, HeaderHover, PointerEvent, PressTracker};
use panes_core::geom::{AvailableSize, Offset, Rect, Size};
use panes_core::node::{Flags, LayoutBox, Node, Placement, Role, hide_invisible};
use panes_core::region::{
    CursorIcon, GroupBackgroundRenderInfo, HeaderKind, HeaderRenderInfo, HotArea, RegionRegistry,
    TrackInfo,
};
use panes_core::scroll::ScrollCoordinator;

/// Messages of [`PropertySheet`] hot areas
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SheetMsg {
    /// Expand or collapse the group with this number
    ToggleGroup(usize),
    /// The label/value splitter
    Splitter,
}

#[derive(Clone, Debug)]
struct SheetRow {
    label: Option<usize>,
    value: Option<usize>,
    height: i32,
}

#[derive(Clone, Debug, Default)]
struct SheetGroup {
    title: Option<String>,
    rows: Vec<SheetRow>,
}

fn pairs_with_label(next: &LayoutBox) -> bool {
    !matches!(next.role, Role::Label | Role::Span)
        && !next.has(Flags::GROUP_BREAK | Flags::STANDALONE_EDIT | Flags::SPAN_FULL_WIDTH)
}

fn partition(boxes: &[LayoutBox], row_height: i32) -> Vec<SheetGroup> {
    let mut groups = vec![SheetGroup::default()];
    let mut i = 0;
    while i < boxes.len() {
        let b = &boxes[i];
        if b.has(Flags::GROUP_BREAK) {
            let group = SheetGroup {
                title: b.group_title.clone(),
                rows: vec![],
            };
            match groups.last_mut() {
                Some(last) if last.rows.is_empty() && last.title.is_none() => *last = group,
                _ => groups.push(group),
            }
        }

        let is_label = b.role == Role::Label && !b.has(Flags::STANDALONE_LABEL);
        let value = boxes
            .get(i + 1)
            .filter(|next| is_label && pairs_with_label(next));
        let row = match value {
            Some(v) => {
                let height = row_height.max(b.preferred.1).max(v.preferred.1);
                i += 2;
                SheetRow {
                    label: Some(i - 2),
                    value: Some(i - 1),
                    height,
                }
            }
            None => {
                i += 1;
                SheetRow {
                    label: None,
                    value: Some(i - 1),
                    height: row_height.max(b.preferred.1),
                }
            }
        };
        if let Some(group) = groups.last_mut() {
            group.rows.push(row);
        }
    }
    groups
}

/// A label/value grid
///
/// A [`Role::Label`] child pairs with the following child to form a row;
/// any other child occupies a full-width row. [`Flags::GROUP_BREAK`] starts a
/// group; titled groups get a header band which expands or collapses the
/// group when clicked. The boundary between the label and the value column
/// is a splitter which may be dragged.
///
/// The sheet scrolls vertically.
#[derive(Clone, Debug)]
pub struct PropertySheet {
    config: LayoutConfig,
    boxes: Vec<LayoutBox>,
    groups: Vec<SheetGroup>,
    collapsed: Vec<bool>,
    label_width: Option<i32>,
    required: Size,
    scroll: ScrollCoordinator,
    regions: RegionRegistry<SheetMsg>,
    tracker: PressTracker<SheetMsg>,
    hover: HeaderHover,
    rect: Rect,
}

impl Default for PropertySheet {
    fn default() -> Self {
        PropertySheet::new(LayoutConfig::default())
    }
}

impl PropertySheet {
    /// Construct
    pub fn new(config: LayoutConfig) -> Self {
        PropertySheet {
            config: config.validate(),
            boxes: vec![],
            groups: vec![],
            collapsed: vec![],
            label_width: None,
            required: Size::ZERO,
            scroll: ScrollCoordinator::vertical(),
            regions: RegionRegistry::default(),
            tracker: PressTracker::default(),
            hover: HeaderHover::default(),
            rect: Rect::ZERO,
        }
    }

    /// Number of groups found by the last measure pass
    #[inline]
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Whether group `group` is collapsed
    #[inline]
    pub fn is_collapsed(&self, group: usize) -> bool {
        self.collapsed.get(group).copied().unwrap_or(false)
    }

    /// Expand or collapse a group
    pub fn set_collapsed(&mut self, group: usize, collapsed: bool) -> Action {
        if self.collapsed.len() <= group {
            self.collapsed.resize(group + 1, false);
        }
        if self.collapsed[group] == collapsed {
            return Action::empty();
        }
        log::debug!("PropertySheet::set_collapsed: group {group} -> {collapsed}");
        self.collapsed[group] = collapsed;
        Action::RESIZE
    }

    /// Width of the label column within a viewport of width `width`
    pub fn label_width(&self, width: i32) -> i32 {
        let c = &self.config.sheet;
        let w = match self.label_width {
            Some(w) => w,
            None => (f32::conv(width) * c.label_fraction).cast_nearest(),
        };
        let hi = width - c.min_column - c.splitter_thickness;
        w.min(hi).max(c.min_column).max(0)
    }

    /// Set the label column width, as the splitter does
    pub fn set_label_width(&mut self, width: i32) -> Action {
        let viewport = self.viewport().size.0;
        let old = self.label_width(viewport);
        self.label_width = Some(width);
        match self.label_width(viewport) == old {
            true => Action::empty(),
            false => Action::SET_RECT,
        }
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

    fn viewport(&self) -> Rect {
        let avail = AvailableSize::bounded(self.rect.size);
        let size = self
            .scroll
            .content_available(avail, &self.config.scroll)
            .or(self.rect.size);
        Rect::new(self.rect.pos, size)
    }

    fn place_row<N: Node>(&self, children: &mut [N], row: &SheetRow, y: i32, label_w: i32) {
        let viewport = self.viewport();
        let x = viewport.pos.0;
        let split = self.config.sheet.splitter_thickness;
        let mut place = |b: usize, rect: Rect| {
            children[self.boxes[b].index].set_rect(Placement::new(rect));
        };
        match (row.label, row.value) {
            (Some(label), Some(value)) => {
                place(label, Rect::clamped(x, y, label_w, row.height));
                let vx = x + label_w + split;
                place(
                    value,
                    Rect::clamped(vx, y, viewport.size.0 - label_w - split, row.height),
                );
            }
            (None, Some(value)) => place(value, Rect::clamped(x, y, viewport.size.0, row.height)),
            (Some(b), None) => place(b, Rect::clamped(x, y, viewport.size.0, row.height)),
            (None, None) => (),
        }
    }

    fn hide_group<N: Node>(&self, children: &mut [N], group: &SheetGroup) {
        for row in &group.rows {
            for b in row.label.iter().chain(row.value.iter()) {
                children[self.boxes[*b].index].set_rect(Placement::HIDDEN);
            }
        }
    }
}

impl Panel for PropertySheet {
    type Msg = SheetMsg;

    fn measure<N: Node>(&mut self, children: &mut [N], _: AvailableSize) -> Size {
        let c = &self.config.sheet;
        self.boxes = LayoutBox::collect(children);
        self.groups = partition(&self.boxes, c.row_height.max(0));
        if self.collapsed.len() < self.groups.len() {
            self.collapsed.resize(self.groups.len(), false);
        }

        let (mut label_w, mut value_w, mut full_w) = (0, 0, 0);
        let mut height = 0;
        for (g, group) in self.groups.iter().enumerate() {
            if group.title.is_some() {
                height += c.header_height.max(0);
            }
            for row in &group.rows {
                let width = |b: Option<usize>| b.map(|b| self.boxes[b].preferred.0).unwrap_or(0);
                match row.label {
                    Some(_) => {
                        label_w = label_w.max(width(row.label));
                        value_w = value_w.max(width(row.value));
                    }
                    None => full_w = full_w.max(width(row.value)),
                }
                if !self.is_collapsed(g) {
                    height += row.height;
                }
            }
        }

        let pair_w = match label_w + value_w {
            0 => 0,
            _ => label_w.max(c.min_column) + c.splitter_thickness + value_w,
        };
        self.required = Size::clamped(pair_w.max(full_w), height);
        self.required
    }

    fn arrange<N: Node>(&mut self, children: &mut [N], rect: Rect) -> Action {
        self.rect = rect;
        self.regions.clear();
        hide_invisible(children);

        let action = self.scroll.update(
            self.required,
            AvailableSize::bounded(rect.size),
            &self.config.scroll,
        );
        let viewport = self.viewport();
        let label_w = self.label_width(viewport.size.0);
        let c = &self.config.sheet;
        let offset = self.scroll.offset();

        let split_x = viewport.pos.0 + label_w;
        let split_h = (self.required.1 - offset.1).min(viewport.size.1);
        let splitter = Rect::clamped(split_x, viewport.pos.1, c.splitter_thickness, split_h);
        self.regions.push_track(TrackInfo {
            rect: splitter,
            direction: Direction::Down,
            scroll_bar: false,
        });
        self.regions.push_hot_area(
            HotArea::new(splitter)
                .with_cursor(CursorIcon::ResizeEw)
                .on_enter_drag(SheetMsg::Splitter, 0),
        );

        let mut y = viewport.pos.1 - offset.1;
        for (g, group) in self.groups.iter().enumerate() {
            let collapsed = self.is_collapsed(g);
            if let Some(title) = group.title.as_ref() {
                let band = Rect::clamped(viewport.pos.0, y, viewport.size.0, c.header_height);
                self.regions.push_header(HeaderRenderInfo {
                    kind: HeaderKind::Group {
                        expanded: Some(!collapsed),
                    },
                    rect: band,
                    title: Some(title.clone()),
                    index: g,
                });
                self.regions.push_hot_area(
                    HotArea::new(band)
                        .with_cursor(CursorIcon::Pointer)
                        .on_click(SheetMsg::ToggleGroup(g)),
                );
                y += band.size.1;
            }

            if collapsed {
                self.hide_group(children, group);
                continue;
            }
            let top = y;
            for row in &group.rows {
                self.place_row(children, row, y, label_w);
                y += row.height;
            }
            self.regions.push_group(GroupBackgroundRenderInfo {
                rect: Rect::clamped(viewport.pos.0, top, viewport.size.0, y - top),
                column: 0,
                group: g,
            });
        }

        self.scroll
            .push_tracks(&mut self.regions, rect, &self.config.scroll);
        action
    }

    fn regions(&self) -> &RegionRegistry<SheetMsg> {
        &self.regions
    }

    fn handle_pointer<N: Node>(
        &mut self,
        _: &mut [N],
        event: PointerEvent,
        renderer: Option<&mut dyn HeaderRenderer>,
    ) -> Response<SheetMsg> {
        let mut action = Action::empty();
        if let Some(renderer) = renderer {
            action |= self.hover.forward(&self.regions, renderer, event);
        }
        for dispatch in self.tracker.dispatch(&self.regions, event) {
            match dispatch {
                Dispatch::Click(SheetMsg::ToggleGroup(g)) => {
                    let collapsed = !self.is_collapsed(g);
                    action |= self.set_collapsed(g, collapsed);
                }
                Dispatch::DragStart {
                    msg: SheetMsg::Splitter,
                    coord,
                    ..
                }
                | Dispatch::DragMove {
                    msg: SheetMsg::Splitter,
                    coord,
                    ..
                } => {
                    action |= self.set_label_width(coord.0 - self.rect.pos.0);
                }
                _ => (),
            }
        }
        Response::action(action)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::layout;
    use panes_core::geom::Coord;
    use panes_core::node::FixedNode;

    fn sheet_children() -> Vec<FixedNode> {
        vec![
            FixedNode::label(50, 16).with_group("General"),
            FixedNode::new(80, 16),
            FixedNode::label(50, 16),
            FixedNode::new(80, 30),
            FixedNode::label(50, 16).with_group("Advanced"),
            FixedNode::new(80, 16),
        ]
    }

    #[test]
    fn rows_and_headers() {
        let mut sheet = PropertySheet::default();
        let mut children = sheet_children();
        let rect = Rect::new(Coord::ZERO, Size(300, 400));
        let required = layout(&mut sheet, &mut children, rect);
        // headers 22 + 22, rows 22 + 30 + 22
        assert_eq!(required, Size(50 + 5 + 80, 118));
        assert_eq!(sheet.group_count(), 2);
        assert_eq!(children[0].rect(), Rect::clamped(0, 22, 120, 22));
        assert_eq!(children[1].rect(), Rect::clamped(125, 22, 175, 22));
        assert_eq!(children[3].rect(), Rect::clamped(125, 44, 175, 30));
        assert_eq!(children[5].rect().pos, Coord(125, 74 + 22));
        assert_eq!(sheet.regions().headers().len(), 2);
        assert_eq!(sheet.regions().groups().len(), 2);
    }

    #[test]
    fn header_click_collapses() {
        let mut sheet = PropertySheet::default();
        let mut children = sheet_children();
        let rect = Rect::new(Coord::ZERO, Size(300, 400));
        layout(&mut sheet, &mut children, rect);

        let _ = sheet.handle_pointer(&mut children, PointerEvent::Press(Coord(200, 80)), None);
        let r = sheet.handle_pointer(&mut children, PointerEvent::Release(Coord(201, 80)), None);
        assert_eq!(r.action, Action::RESIZE);
        assert!(sheet.is_collapsed(1));

        let required = layout(&mut sheet, &mut children, rect);
        assert_eq!(required.1, 96);
        assert!(children[5].placement.unwrap().is_hidden());
        assert_eq!(
            sheet.regions().headers()[1].kind,
            HeaderKind::Group {
                expanded: Some(false)
            }
        );
    }

    #[test]
    fn splitter_drag_is_clamped() {
        let mut sheet = PropertySheet::default();
        let mut children = sheet_children();
        let rect = Rect::new(Coord::ZERO, Size(300, 400));
        layout(&mut sheet, &mut children, rect);

        let _ = sheet.handle_pointer(&mut children, PointerEvent::Press(Coord(122, 50)), None);
        let r = sheet.handle_pointer(&mut children, PointerEvent::Move(Coord(200, 50)), None);
        assert_eq!(r.action, Action::SET_RECT);
        let _ = sheet.arrange(&mut children, rect);
        assert_eq!(children[1].rect().pos.0, 205);

        let _ = sheet.handle_pointer(&mut children, PointerEvent::Move(Coord(290, 50)), None);
        let _ = sheet.handle_pointer(&mut children, PointerEvent::Release(Coord(290, 50)), None);
        // 300 - 40 - 5
        assert_eq!(sheet.label_width(300), 255);
    }

    #[test]
    fn standalone_rows_span_the_width() {
        let mut sheet = PropertySheet::default();
        let mut children = vec![
            FixedNode::new(100, 10),
            FixedNode::label(40, 10).with_flags(Flags::STANDALONE_LABEL),
            FixedNode::new(60, 10),
        ];
        let rect = Rect::new(Coord::ZERO, Size(200, 100));
        let required = layout(&mut sheet, &mut children, rect);
        assert_eq!(required, Size(100, 66));
        assert_eq!(children[2].rect(), Rect::clamped(0, 44, 200, 22));
        assert!(sheet.regions().headers().is_empty());
    }
}
