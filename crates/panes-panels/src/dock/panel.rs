// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Dock panel

use linear_map::LinearMap;
use smallvec::SmallVec;

use super::{DockError, DockWellModel, Floating, Redocked, Well};
use crate::Response;
use panes_core::Action;
use panes_core::config::{DockConfig, LayoutConfig};
use panes_core::dir::Direction;
use panes_core::draw::{Canvas, DecorationStyle, HeaderRenderer, render_regions};
use panes_core::event::{Dispatch, HeaderHover, PointerEvent, PressTracker};
use panes_core::geom::{AvailableSize, Coord, Rect, Size};
use panes_core::node::{Node, Placement};
use panes_core::region::{
    CursorIcon, HeaderKind, HeaderRenderInfo, HotArea, RegionRegistry, TrackInfo,
};

/// Messages of [`DockPanel`] hot areas
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DockMsg {
    /// Show element `index` of `well`
    Select { well: Well, index: usize },
    /// Undock element `index` of `well` into a floating window
    Undock { well: Well, index: usize },
    /// The splitter of a side well
    Splitter(Well),
}

/// Take a side well's strip off `area`, returning the well and splitter rects
fn cut(area: &mut Rect, well: Well, extent: i32, t: i32) -> (Rect, Rect) {
    let (pos, size) = (area.pos, area.size);
    let along = match well.is_vertical_strip() {
        true => size.0,
        false => size.1,
    };
    let e = extent.min(along).max(0);
    let used = (e + t).min(along);
    match well {
        Well::Left => {
            area.pos.0 += used;
            area.size.0 -= used;
            (
                Rect::clamped(pos.0, pos.1, e, size.1),
                Rect::clamped(pos.0 + e, pos.1, t, size.1),
            )
        }
        Well::Right => {
            area.size.0 -= used;
            let x = pos.0 + size.0 - e;
            (
                Rect::clamped(x, pos.1, e, size.1),
                Rect::clamped(x - t, pos.1, t, size.1),
            )
        }
        Well::Top => {
            area.pos.1 += used;
            area.size.1 -= used;
            (
                Rect::clamped(pos.0, pos.1, size.0, e),
                Rect::clamped(pos.0, pos.1 + e, size.0, t),
            )
        }
        Well::Bottom => {
            area.size.1 -= used;
            let y = pos.1 + size.1 - e;
            (
                Rect::clamped(pos.0, y, size.0, e),
                Rect::clamped(pos.0, y - t, size.0, t),
            )
        }
        Well::Main => (*area, Rect::ZERO),
    }
}

/// A docking container of five wells
///
/// The left and right wells take the full height of the panel, the top and
/// bottom wells the width between them and the main well the remainder.
/// Empty wells take no space. Each side well is separated from the centre by
/// a splitter which may be dragged to change its extent.
///
/// A well with more than one element shows a tab strip. Clicking a tab shows
/// its element; dragging a tab beyond
/// [`DockConfig::tab_drag_threshold`] undocks the element into a
/// [`Floating`] handle, which the host shows in a window of its own and
/// returns through [`DockPanel::redock`] when that window closes. With
/// [headers shown](Self::set_show_headers), dragging a well's title band
/// undocks its shown element, including the only element of a well.
///
/// Unlike the other panels, the dock panel owns its children.
#[derive(Clone, Debug)]
pub struct DockPanel<C> {
    model: DockWellModel<C>,
    show_headers: bool,
    items_host: bool,
    well_rects: LinearMap<Well, Rect>,
    regions: RegionRegistry<DockMsg>,
    tracker: PressTracker<DockMsg>,
    hover: HeaderHover,
    rect: Rect,
}

impl<C: Node> Default for DockPanel<C> {
    fn default() -> Self {
        DockPanel::new(LayoutConfig::default())
    }
}

impl<C: Node> DockPanel<C> {
    /// Construct with all wells empty
    pub fn new(config: LayoutConfig) -> Self {
        DockPanel {
            model: DockWellModel::new(config.validate().dock),
            show_headers: false,
            items_host: false,
            well_rects: LinearMap::new(),
            regions: RegionRegistry::default(),
            tracker: PressTracker::default(),
            hover: HeaderHover::default(),
            rect: Rect::ZERO,
        }
    }

    #[inline]
    pub fn model(&self) -> &DockWellModel<C> {
        &self.model
    }

    /// Access the model
    ///
    /// Changes made through this require a new layout pass.
    #[inline]
    pub fn model_mut(&mut self) -> &mut DockWellModel<C> {
        &mut self.model
    }

    /// Reserve a title band at the top of each well
    ///
    /// Enable this when rendering with a [`HeaderRenderer`].
    pub fn set_show_headers(&mut self, show: bool) -> Action {
        if self.show_headers == show {
            return Action::empty();
        }
        self.show_headers = show;
        Action::RESIZE
    }

    /// Return redocked children to the host's item collection
    #[inline]
    pub fn set_items_host(&mut self, items_host: bool) {
        self.items_host = items_host;
    }

    /// Add a child to a well, titled by its [`title`](panes_core::node::Attached::title)
    pub fn add(&mut self, well: Well, child: C) -> Result<usize, DockError> {
        let title = child.title().map(str::to_string);
        self.model.add(well, child, title)
    }

    /// Rect of an occupied well in the last arrange pass
    pub fn well_rect(&self, well: Well) -> Option<Rect> {
        self.well_rects.get(&well).copied()
    }

    /// Regions of the last arrange pass
    #[inline]
    pub fn regions(&self) -> &RegionRegistry<DockMsg> {
        &self.regions
    }

    /// Draw splitters and (with a renderer) well and tab headers
    pub fn render(&self, canvas: &mut dyn Canvas, renderer: Option<&dyn HeaderRenderer>) {
        render_regions(&self.regions, canvas, &DecorationStyle::default(), renderer);
    }

    fn config(&self) -> &DockConfig {
        self.model.config()
    }

    fn chrome(&self, well: Well) -> i32 {
        let n = self.model.well(well).map(|w| w.len()).unwrap_or(0);
        let mut h = 0;
        if self.show_headers && n > 0 {
            h += self.config().header_height.max(0);
        }
        if n > 1 {
            h += self.config().tab_height.max(0);
        }
        h
    }

    fn measure_selected(&mut self, well: Well) -> Option<Size> {
        let w = self.model.well_mut(well)?;
        let index = w.selected()?;
        let element = w.elements_mut().get_mut(index)?;
        let size = element.child.measure(AvailableSize::UNBOUNDED);
        Some(Size::clamped(size.0, size.1))
    }

    /// Measure pass
    ///
    /// Side wells contribute their configured extent across the splitter and
    /// the desired size of their shown element along it.
    pub fn measure(&mut self, _: AvailableSize) -> Size {
        let t = self.config().splitter_thickness.max(0);
        let mut side = Size::ZERO;
        let mut strips_h = 0;
        let mut center = Size::ZERO;
        for well in Well::ALL {
            let Some(desired) = self.measure_selected(well) else {
                continue;
            };
            let chrome = self.chrome(well);
            let extent = self.model.well(well).map(|w| w.extent()).unwrap_or(0);
            match well {
                Well::Left | Well::Right => {
                    side.0 += extent + t;
                    strips_h = strips_h.max(desired.1 + chrome);
                }
                Well::Top | Well::Bottom => {
                    side.1 += extent + t;
                    center.0 = center.0.max(desired.0);
                }
                Well::Main => {
                    center.0 = center.0.max(desired.0);
                    center.1 = desired.1 + chrome;
                }
            }
        }
        Size::clamped(side.0 + center.0, strips_h.max(side.1 + center.1))
    }

    /// Arrange pass
    pub fn arrange(&mut self, rect: Rect) -> Action {
        self.rect = rect;
        self.regions.clear();
        let t = self.config().splitter_thickness.max(0);

        let mut placed: SmallVec<[(Well, Rect); 5]> = SmallVec::new();
        let mut area = rect;
        for well in [Well::Left, Well::Right, Well::Top, Well::Bottom] {
            if !self.model.is_occupied(well) {
                continue;
            }
            let extent = self.model.well(well).map(|w| w.extent()).unwrap_or(0);
            let (well_rect, splitter) = cut(&mut area, well, extent, t);
            let (direction, cursor) = match well.is_vertical_strip() {
                true => (Direction::Down, CursorIcon::ResizeEw),
                false => (Direction::Right, CursorIcon::ResizeNs),
            };
            self.regions.push_track(TrackInfo {
                rect: splitter,
                direction,
                scroll_bar: false,
            });
            self.regions.push_hot_area(
                HotArea::new(splitter)
                    .with_cursor(cursor)
                    .on_enter_drag(DockMsg::Splitter(well), 0),
            );
            placed.push((well, well_rect));
        }
        if self.model.is_occupied(Well::Main) {
            placed.push((Well::Main, area));
        }

        self.well_rects.clear();
        for (well, well_rect) in placed {
            self.place_well(well, well_rect);
            self.well_rects.insert(well, well_rect);
        }
        Action::empty()
    }

    fn place_well(&mut self, well: Well, rect: Rect) {
        let c = self.model.config().clone();
        let Some(w) = self.model.well(well) else {
            return;
        };
        let selected = w.selected();
        let bottom = rect.pos.1 + rect.size.1;
        let mut y = rect.pos.1;

        if self.show_headers {
            let band = Rect::clamped(rect.pos.0, y, rect.size.0, c.header_height.min(bottom - y));
            self.regions.push_header(HeaderRenderInfo {
                kind: HeaderKind::Well,
                rect: band,
                title: w.selected_element().and_then(|e| e.title.clone()),
                index: selected.unwrap_or(0),
            });
            let dockable = w.selected_element().is_some_and(|e| e.child.dockable());
            if let (Some(index), true) = (selected, dockable) {
                let msg = DockMsg::Undock { well, index };
                self.regions.push_hot_area(
                    HotArea::new(band)
                        .with_cursor(CursorIcon::Move)
                        .on_enter_drag(msg, c.tab_drag_threshold),
                );
            }
            y += band.size.1;
        }

        let n = w.len();
        if n > 1 {
            let tab_h = c.tab_height.min(bottom - y).max(0);
            let tab_w = rect.size.0 / i32::try_from(n).unwrap_or(1);
            let mut x = rect.pos.0;
            for (index, element) in w.elements().iter().enumerate() {
                let width = match index + 1 == n {
                    true => rect.pos.0 + rect.size.0 - x,
                    false => tab_w,
                };
                let tab = Rect::clamped(x, y, width, tab_h);
                x += width;
                self.regions.push_header(HeaderRenderInfo {
                    kind: HeaderKind::Tab {
                        selected: selected == Some(index),
                    },
                    rect: tab,
                    title: element.title.clone(),
                    index,
                });
                let mut area = HotArea::new(tab)
                    .with_cursor(CursorIcon::Pointer)
                    .on_click(DockMsg::Select { well, index });
                if element.child.dockable() {
                    let msg = DockMsg::Undock { well, index };
                    area = area.on_enter_drag(msg, c.tab_drag_threshold);
                }
                self.regions.push_hot_area(area);
            }
            y += tab_h;
        }

        let client = Rect::new(Coord(rect.pos.0, y), Size::clamped(rect.size.0, bottom - y));
        if let Some(w) = self.model.well_mut(well) {
            for (index, element) in w.elements_mut().iter_mut().enumerate() {
                match selected == Some(index) {
                    true => element.child.set_rect(Placement::new(client)),
                    false => element.child.set_rect(Placement::HIDDEN),
                }
            }
        }
    }

    fn drag_splitter(&mut self, well: Well, coord: Coord) -> Action {
        let r = self.rect;
        let extent = match well {
            Well::Left => coord.0 - r.pos.0,
            Well::Right => r.pos.0 + r.size.0 - coord.0,
            Well::Top => coord.1 - r.pos.1,
            Well::Bottom => r.pos.1 + r.size.1 - coord.1,
            Well::Main => return Action::empty(),
        };
        self.model.set_extent(well, extent, r.size)
    }

    /// Handle a pointer event
    ///
    /// Tab clicks select, splitter drags resize and tab or title band drags
    /// undock. An undocked element is returned as output. Events over well
    /// and tab headers are passed through to `renderer`.
    pub fn handle_pointer(
        &mut self,
        event: PointerEvent,
        renderer: Option<&mut dyn HeaderRenderer>,
    ) -> Response<Floating<C>> {
        let mut response = Response::default();
        if let Some(renderer) = renderer {
            response.action |= self.hover.forward(&self.regions, renderer, event);
        }
        for dispatch in self.tracker.dispatch(&self.regions, event) {
            match dispatch {
                Dispatch::Click(DockMsg::Select { well, index }) => {
                    match self.model.select(well, index) {
                        Ok(action) => response.action |= action,
                        Err(err) => log::warn!("DockPanel::handle_pointer: {err}"),
                    }
                }
                Dispatch::DragStart {
                    msg: DockMsg::Undock { well, index },
                    ..
                } => {
                    let rect = self.well_rect(well).unwrap_or(Rect::ZERO);
                    match self.model.undock(well, index, rect) {
                        Ok(floating) => {
                            // the dragged area is gone
                            self.tracker.cancel();
                            response.output = Some(floating);
                            response.action |= Action::RESIZE;
                        }
                        Err(err) => log::warn!("DockPanel::handle_pointer: {err}"),
                    }
                }
                Dispatch::DragStart {
                    msg: DockMsg::Splitter(well),
                    coord,
                    ..
                }
                | Dispatch::DragMove {
                    msg: DockMsg::Splitter(well),
                    coord,
                    ..
                } => response.action |= self.drag_splitter(well, coord),
                _ => (),
            }
        }
        response
    }

    /// Return a floating child
    ///
    /// The caller should run a new layout pass.
    pub fn redock(&mut self, floating: Floating<C>) -> Result<Redocked<C>, DockError> {
        self.model.redock(floating, self.items_host)
    }
}
