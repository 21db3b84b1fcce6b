// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Pointer dispatch over hot areas
//!
//! The host routes pointer events to a panel; the panel feeds them through a
//! [`PressTracker`] which consults the panel's [`RegionRegistry`] and turns
//! raw events into [`Dispatch`] values carrying the hot area's messages.
//!
//! Capture is exclusive: between press and release only the captured hot area
//! receives events. Capture is always released on pointer-up, and a new press
//! supersedes an existing capture. There are no timers: a press which is
//! released before crossing the drag threshold is a click.
//!
//! Independently of capture, [`HeaderHover`] passes events over header bands
//! through to a [`HeaderRenderer`].

use smallvec::SmallVec;

use crate::Action;
use crate::draw::HeaderRenderer;
use crate::geom::{Coord, Rect};
use crate::region::{CursorIcon, HeaderRenderInfo, RegionRegistry};

/// A pointer event in panel coordinates
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEvent {
    Press(Coord),
    Move(Coord),
    Release(Coord),
    /// The pointer left the panel
    Leave,
}

/// Result of dispatching a pointer event
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Dispatch<M> {
    /// Nothing to do
    None,
    /// The pointer was pressed on an area with an `on_press` message
    Press(M),
    /// The pointer was released without dragging
    Click(M),
    /// Movement crossed the drag threshold
    DragStart { msg: M, start: Coord, coord: Coord },
    /// Further movement while dragging
    DragMove { msg: M, start: Coord, coord: Coord },
    /// Release after dragging
    DragEnd { msg: M, coord: Coord },
}

impl<M> Dispatch<M> {
    /// True unless [`Dispatch::None`]
    #[inline]
    pub fn is_some(&self) -> bool {
        !matches!(self, Dispatch::None)
    }
}

/// A pointer event delivered to a [`HeaderRenderer`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeaderEvent {
    /// The pointer entered the band
    Enter,
    /// The pointer left the band
    Leave,
    Down(Coord),
    Up(Coord),
    Move(Coord),
}

#[derive(Clone, Debug)]
struct Capture<M> {
    start: Coord,
    dragging: bool,
    on_click: Option<M>,
    on_enter_drag: Option<M>,
    threshold: i32,
    cursor: Option<CursorIcon>,
    rect: Rect,
}

/// Press / click / drag state machine
///
/// Messages are copied out of the hot area on press, since a live drag (for
/// example of a splitter) rebuilds the region registry on every move.
#[derive(Clone, Debug)]
pub struct PressTracker<M> {
    capture: Option<Capture<M>>,
}

impl<M> Default for PressTracker<M> {
    fn default() -> Self {
        PressTracker { capture: None }
    }
}

impl<M: Clone> PressTracker<M> {
    /// True while a hot area holds the pointer capture
    #[inline]
    pub fn is_captured(&self) -> bool {
        self.capture.is_some()
    }

    /// True while dragging
    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.capture.as_ref().map(|c| c.dragging).unwrap_or(false)
    }

    /// Cursor hint: the captured area's while captured, else from the registry
    pub fn cursor(&self, regions: &RegionRegistry<M>, coord: Coord) -> Option<CursorIcon> {
        match &self.capture {
            Some(capture) => capture.cursor,
            None => regions.cursor_at(coord),
        }
    }

    /// Drop any capture without emitting messages
    pub fn cancel(&mut self) {
        if self.capture.take().is_some() {
            log::trace!("PressTracker::cancel");
        }
    }

    /// Handle one pointer event
    pub fn handle(&mut self, regions: &RegionRegistry<M>, event: PointerEvent) -> Dispatch<M> {
        match event {
            PointerEvent::Press(coord) => {
                if self.capture.take().is_some() {
                    log::debug!("PressTracker::handle: press supersedes existing capture");
                }
                let Some((_, area)) = regions.hot_area_at(coord) else {
                    return Dispatch::None;
                };
                self.capture = Some(Capture {
                    start: coord,
                    dragging: false,
                    on_click: area.on_click.clone(),
                    on_enter_drag: area.on_enter_drag.clone(),
                    threshold: area.drag_threshold,
                    cursor: area.cursor,
                    rect: area.rect,
                });
                match &area.on_press {
                    Some(msg) => Dispatch::Press(msg.clone()),
                    None => Dispatch::None,
                }
            }
            PointerEvent::Move(coord) => {
                let Some(capture) = self.capture.as_mut() else {
                    return Dispatch::None;
                };
                let Some(msg) = capture.on_enter_drag.clone() else {
                    return Dispatch::None;
                };
                let start = capture.start;
                if capture.dragging {
                    Dispatch::DragMove { msg, start, coord }
                } else if (coord - start).distance_l_inf() > capture.threshold {
                    capture.dragging = true;
                    Dispatch::DragStart { msg, start, coord }
                } else {
                    Dispatch::None
                }
            }
            PointerEvent::Release(coord) => {
                let Some(capture) = self.capture.take() else {
                    return Dispatch::None;
                };
                if capture.dragging {
                    if let Some(msg) = capture.on_enter_drag {
                        return Dispatch::DragEnd { msg, coord };
                    }
                }
                let moved = (coord - capture.start).distance_l_inf();
                let is_click = capture.rect.contains(coord)
                    || (capture.on_enter_drag.is_some() && moved <= capture.threshold);
                match capture.on_click {
                    Some(msg) if is_click => Dispatch::Click(msg),
                    _ => Dispatch::None,
                }
            }
            PointerEvent::Leave => Dispatch::None,
        }
    }

    /// Handle one pointer event, treating a release as motion to its position
    ///
    /// Hosts may report a release without any preceding move event. This
    /// first dispatches the implied move, so a release beyond the drag
    /// threshold yields `DragStart` followed by `DragEnd`. Results which are
    /// [`Dispatch::None`] are omitted.
    pub fn dispatch(
        &mut self,
        regions: &RegionRegistry<M>,
        event: PointerEvent,
    ) -> SmallVec<[Dispatch<M>; 2]> {
        let mut out = SmallVec::new();
        if let PointerEvent::Release(coord) = event {
            if self.is_captured() && !self.is_dragging() {
                let d = self.handle(regions, PointerEvent::Move(coord));
                if d.is_some() {
                    out.push(d);
                }
            }
        }
        let d = self.handle(regions, event);
        if d.is_some() {
            out.push(d);
        }
        out
    }
}

/// Tracks the header band under the pointer
///
/// Forwards pointer events over header bands to a [`HeaderRenderer`],
/// bracketed by [`HeaderEvent::Enter`] and [`HeaderEvent::Leave`]. The band
/// is remembered by value since the registry is rebuilt on each arrange pass.
#[derive(Clone, Debug, Default)]
pub struct HeaderHover {
    hovered: Option<HeaderRenderInfo>,
}

impl HeaderHover {
    /// The band under the pointer, as of the last forwarded event
    #[inline]
    pub fn hovered(&self) -> Option<&HeaderRenderInfo> {
        self.hovered.as_ref()
    }

    /// Forward `event` to `renderer`
    pub fn forward<M>(
        &mut self,
        regions: &RegionRegistry<M>,
        renderer: &mut dyn HeaderRenderer,
        event: PointerEvent,
    ) -> Action {
        let (target, pass) = match event {
            PointerEvent::Press(coord) => (regions.header_at(coord), HeaderEvent::Down(coord)),
            PointerEvent::Move(coord) => (regions.header_at(coord), HeaderEvent::Move(coord)),
            PointerEvent::Release(coord) => (regions.header_at(coord), HeaderEvent::Up(coord)),
            PointerEvent::Leave => (None, HeaderEvent::Leave),
        };

        let mut action = Action::empty();
        if target != self.hovered.as_ref() {
            if let Some(old) = self.hovered.take() {
                action |= renderer.on_pointer(&old, HeaderEvent::Leave);
            }
            if let Some(header) = target {
                action |= renderer.on_pointer(header, HeaderEvent::Enter);
                self.hovered = Some(header.clone());
            }
        }
        if let Some(header) = target {
            action |= renderer.on_pointer(header, pass);
        }
        action
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::draw::Canvas;
    use crate::geom::{Margins, Rect, Size};
    use crate::region::{HeaderKind, HotArea};

    #[derive(Clone, Debug, PartialEq, Eq)]
    enum Msg {
        Select,
        Undock,
        Press,
    }

    fn tab_registry() -> RegionRegistry<Msg> {
        let mut reg = RegionRegistry::default();
        reg.push_hot_area(
            HotArea::new(Rect::new(Coord(0, 0), Size(60, 24)))
                .on_click(Msg::Select)
                .on_enter_drag(Msg::Undock, 20),
        );
        reg
    }

    #[test]
    fn small_movement_is_a_click() {
        let reg = tab_registry();
        let mut tracker = PressTracker::default();
        assert_eq!(tracker.handle(&reg, PointerEvent::Press(Coord(10, 10))), Dispatch::None);
        assert!(tracker.is_captured());
        assert_eq!(tracker.handle(&reg, PointerEvent::Move(Coord(12, 11))), Dispatch::None);
        assert_eq!(
            tracker.handle(&reg, PointerEvent::Release(Coord(12, 11))),
            Dispatch::Click(Msg::Select)
        );
        assert!(!tracker.is_captured());
    }

    #[test]
    fn crossing_threshold_starts_drag() {
        let reg = tab_registry();
        let mut tracker = PressTracker::default();
        tracker.handle(&reg, PointerEvent::Press(Coord(10, 10)));
        let d = tracker.handle(&reg, PointerEvent::Move(Coord(40, 40)));
        assert_eq!(d, Dispatch::DragStart {
            msg: Msg::Undock,
            start: Coord(10, 10),
            coord: Coord(40, 40)
        });
        assert!(tracker.is_dragging());
        let d = tracker.handle(&reg, PointerEvent::Move(Coord(41, 40)));
        assert!(matches!(d, Dispatch::DragMove { .. }));
        let d = tracker.handle(&reg, PointerEvent::Release(Coord(41, 40)));
        assert_eq!(d, Dispatch::DragEnd {
            msg: Msg::Undock,
            coord: Coord(41, 40)
        });
        assert!(!tracker.is_captured());
    }

    #[test]
    fn press_message_and_supersede() {
        let mut reg = RegionRegistry::default();
        reg.push_hot_area(HotArea::new(Rect::new(Coord(0, 0), Size(5, 5))).on_press(Msg::Press));
        let mut tracker = PressTracker::default();
        assert_eq!(
            tracker.handle(&reg, PointerEvent::Press(Coord(1, 1))),
            Dispatch::Press(Msg::Press)
        );
        // a press outside any area drops the old capture
        assert_eq!(tracker.handle(&reg, PointerEvent::Press(Coord(50, 50))), Dispatch::None);
        assert!(!tracker.is_captured());
        assert_eq!(tracker.handle(&reg, PointerEvent::Release(Coord(1, 1))), Dispatch::None);
    }

    #[test]
    fn release_implies_motion() {
        let reg = tab_registry();
        let mut tracker = PressTracker::default();
        tracker.dispatch(&reg, PointerEvent::Press(Coord(10, 10)));
        let out = tracker.dispatch(&reg, PointerEvent::Release(Coord(40, 40)));
        assert_eq!(out.len(), 2);
        assert!(matches!(out[0], Dispatch::DragStart { .. }));
        assert!(matches!(out[1], Dispatch::DragEnd { .. }));

        tracker.dispatch(&reg, PointerEvent::Press(Coord(10, 10)));
        let out = tracker.dispatch(&reg, PointerEvent::Release(Coord(12, 11)));
        assert_eq!(out.as_slice(), &[Dispatch::Click(Msg::Select)]);
    }

    #[test]
    fn release_outside_without_drag_slot_is_not_a_click() {
        let mut reg = RegionRegistry::default();
        reg.push_hot_area(HotArea::new(Rect::new(Coord(0, 0), Size(5, 5))).on_click(Msg::Select));
        let mut tracker = PressTracker::default();
        tracker.handle(&reg, PointerEvent::Press(Coord(1, 1)));
        assert_eq!(tracker.handle(&reg, PointerEvent::Release(Coord(30, 1))), Dispatch::None);
    }

    #[derive(Default)]
    struct EventLog(Vec<(usize, HeaderEvent)>);

    impl HeaderRenderer for EventLog {
        fn client_area_margins(&self) -> Margins {
            Margins::ZERO
        }
        fn render(&self, _: &mut dyn Canvas, _: &HeaderRenderInfo) {}
        fn on_pointer(&mut self, header: &HeaderRenderInfo, event: HeaderEvent) -> Action {
            self.0.push((header.index, event));
            Action::REDRAW
        }
    }

    #[test]
    fn header_events_are_bracketed() {
        let mut reg = RegionRegistry::<Msg>::default();
        for (index, y) in [(0, 0), (1, 20)] {
            reg.push_header(HeaderRenderInfo {
                kind: HeaderKind::Blade,
                rect: Rect::new(Coord(0, y), Size(50, 20)),
                title: None,
                index,
            });
        }
        let mut hover = HeaderHover::default();
        let mut log = EventLog::default();
        let action = hover.forward(&reg, &mut log, PointerEvent::Move(Coord(5, 5)));
        assert_eq!(action, Action::REDRAW);
        let _ = hover.forward(&reg, &mut log, PointerEvent::Press(Coord(6, 25)));
        assert_eq!(hover.hovered().map(|h| h.index), Some(1));
        let _ = hover.forward(&reg, &mut log, PointerEvent::Release(Coord(60, 25)));
        assert!(hover.hovered().is_none());
        assert_eq!(log.0, vec![
            (0, HeaderEvent::Enter),
            (0, HeaderEvent::Move(Coord(5, 5))),
            (0, HeaderEvent::Leave),
            (1, HeaderEvent::Enter),
            (1, HeaderEvent::Down(Coord(6, 25))),
            (1, HeaderEvent::Leave),
        ]);
        let action = hover.forward(&reg, &mut log, PointerEvent::Leave);
        assert_eq!(action, Action::empty());
    }
}
