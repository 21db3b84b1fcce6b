// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Auxiliary regions produced by arrangement
//!
//! Besides child placements, an arrange pass yields decoration regions
//! (header bands, group backgrounds, splitter and scroll bar tracks) consumed
//! by the render pass, and [`HotArea`]s consulted by pointer handling. The
//! whole [`RegionRegistry`] is cleared and rebuilt on every arrange pass.

use crate::dir::Direction;
use crate::geom::{Coord, Rect};

/// Mouse cursor hint for a hot area
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CursorIcon {
    #[default]
    Default,
    /// A clickable element
    Pointer,
    /// Horizontal resize (a vertical splitter)
    ResizeEw,
    /// Vertical resize (a horizontal splitter)
    ResizeNs,
    /// A movable element
    Move,
}

/// An interactive rectangle
///
/// A hot area carries up to three messages, emitted by
/// [`PressTracker`](crate::event::PressTracker) when the pointer is pressed
/// on the area, when it is released without having dragged, and when a drag
/// starts (pointer movement beyond `drag_threshold` while pressed).
#[derive(Clone, Debug, PartialEq)]
pub struct HotArea<M> {
    pub rect: Rect,
    pub cursor: Option<CursorIcon>,
    pub on_press: Option<M>,
    pub on_click: Option<M>,
    pub on_enter_drag: Option<M>,
    /// Movement (L-inf distance) which must be exceeded to start a drag
    pub drag_threshold: i32,
}

impl<M> HotArea<M> {
    /// Construct an inert area
    pub fn new(rect: Rect) -> Self {
        HotArea {
            rect,
            cursor: None,
            on_press: None,
            on_click: None,
            on_enter_drag: None,
            drag_threshold: 0,
        }
    }

    /// Set the cursor hint
    #[must_use]
    pub fn with_cursor(mut self, cursor: CursorIcon) -> Self {
        self.cursor = Some(cursor);
        self
    }

    /// Set the message emitted on press
    #[must_use]
    pub fn on_press(mut self, msg: M) -> Self {
        self.on_press = Some(msg);
        self
    }

    /// Set the message emitted on click
    #[must_use]
    pub fn on_click(mut self, msg: M) -> Self {
        self.on_click = Some(msg);
        self
    }

    /// Set the message emitted when a drag starts
    #[must_use]
    pub fn on_enter_drag(mut self, msg: M, threshold: i32) -> Self {
        self.on_enter_drag = Some(msg);
        self.drag_threshold = threshold.max(0);
        self
    }
}

/// What a header band belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeaderKind {
    /// A group of rows; `expanded` is `None` if the group cannot collapse
    Group { expanded: Option<bool> },
    /// The title band of a blade
    Blade,
    /// The title band of a dock well
    Well,
    /// One tab of a tab strip
    Tab { selected: bool },
}

/// A header band to be drawn by a header renderer
#[derive(Clone, Debug, PartialEq)]
pub struct HeaderRenderInfo {
    pub kind: HeaderKind,
    /// The full band
    pub rect: Rect,
    /// Title text, if any
    pub title: Option<String>,
    /// Index of the child (or group) the band belongs to
    pub index: usize,
}

/// The background of one run of rows between group breaks
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupBackgroundRenderInfo {
    pub rect: Rect,
    /// Column holding the group
    pub column: usize,
    /// Sequential group number within the panel
    pub group: usize,
}

/// A track: the draggable line of a splitter or the gutter of a scroll bar
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrackInfo {
    pub rect: Rect,
    /// `Right` for horizontal tracks, `Down` for vertical tracks
    pub direction: Direction,
    /// True for scroll bar gutters, false for splitters
    pub scroll_bar: bool,
}

/// Regions produced by one arrange pass
#[derive(Clone, Debug)]
pub struct RegionRegistry<M> {
    hot_areas: Vec<HotArea<M>>,
    headers: Vec<HeaderRenderInfo>,
    groups: Vec<GroupBackgroundRenderInfo>,
    tracks: Vec<TrackInfo>,
}

impl<M> Default for RegionRegistry<M> {
    fn default() -> Self {
        RegionRegistry {
            hot_areas: vec![],
            headers: vec![],
            groups: vec![],
            tracks: vec![],
        }
    }
}

impl<M> RegionRegistry<M> {
    /// Drop all regions; called at the start of each arrange pass
    pub fn clear(&mut self) {
        self.hot_areas.clear();
        self.headers.clear();
        self.groups.clear();
        self.tracks.clear();
    }

    /// Register a hot area
    ///
    /// Areas registered later take precedence where areas overlap.
    pub fn push_hot_area(&mut self, area: HotArea<M>) {
        if !area.rect.size.is_empty() {
            self.hot_areas.push(area);
        }
    }

    pub fn push_header(&mut self, header: HeaderRenderInfo) {
        self.headers.push(header);
    }

    pub fn push_group(&mut self, group: GroupBackgroundRenderInfo) {
        self.groups.push(group);
    }

    pub fn push_track(&mut self, track: TrackInfo) {
        self.tracks.push(track);
    }

    /// Find the topmost hot area containing `coord`
    pub fn hot_area_at(&self, coord: Coord) -> Option<(usize, &HotArea<M>)> {
        self.hot_areas
            .iter()
            .enumerate()
            .rev()
            .find(|(_, area)| area.rect.contains(coord))
    }

    /// Find the topmost header band containing `coord`
    pub fn header_at(&self, coord: Coord) -> Option<&HeaderRenderInfo> {
        self.headers.iter().rev().find(|h| h.rect.contains(coord))
    }

    /// Cursor hint at `coord`
    pub fn cursor_at(&self, coord: Coord) -> Option<CursorIcon> {
        self.hot_area_at(coord).and_then(|(_, area)| area.cursor)
    }

    /// Access a hot area by index
    #[inline]
    pub fn hot_area(&self, index: usize) -> Option<&HotArea<M>> {
        self.hot_areas.get(index)
    }

    #[inline]
    pub fn hot_areas(&self) -> &[HotArea<M>] {
        &self.hot_areas
    }

    #[inline]
    pub fn headers(&self) -> &[HeaderRenderInfo] {
        &self.headers
    }

    #[inline]
    pub fn groups(&self) -> &[GroupBackgroundRenderInfo] {
        &self.groups
    }

    #[inline]
    pub fn tracks(&self) -> &[TrackInfo] {
        &self.tracks
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::geom::Size;

    #[test]
    fn later_areas_win() {
        let mut reg = RegionRegistry::<u8>::default();
        reg.push_hot_area(HotArea::new(Rect::new(Coord(0, 0), Size(10, 10))).on_click(1));
        reg.push_hot_area(
            HotArea::new(Rect::new(Coord(5, 5), Size(10, 10)))
                .on_click(2)
                .with_cursor(CursorIcon::ResizeEw),
        );
        reg.push_hot_area(HotArea::new(Rect::new(Coord(0, 0), Size(0, 10))).on_click(3));
        assert_eq!(reg.hot_areas().len(), 2);
        assert_eq!(reg.hot_area_at(Coord(6, 6)).unwrap().1.on_click, Some(2));
        assert_eq!(reg.hot_area_at(Coord(1, 1)).unwrap().1.on_click, Some(1));
        assert_eq!(reg.cursor_at(Coord(12, 12)), Some(CursorIcon::ResizeEw));
        assert!(reg.hot_area_at(Coord(30, 0)).is_none());
    }
}
