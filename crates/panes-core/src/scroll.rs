// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Scroll coordination
//!
//! A scrolling panel compares the size its content requires against the size
//! available to it, per axis. A scroll bar is shown on an axis if and only if
//! the axis is bounded and the requirement exceeds the bound.
//!
//! Showing a bar takes space from the viewport, which feeds back into the next
//! measure pass and may change the requirement again. [`ScrollCoordinator`]
//! bounds this fixed-point iteration: after
//! [`ScrollConfig::max_toggles`] consecutive visibility changes, further
//! changes are suppressed until a pass completes without a toggle.

use crate::Action;
use crate::config::ScrollConfig;
use crate::dir::{Direction, Directional};
use crate::geom::{AvailableSize, Offset, Rect, Size};
use crate::region::{RegionRegistry, TrackInfo};

/// Scroll state of one axis
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScrollState {
    /// Whether the scroll bar is shown
    pub visible: bool,
    /// Maximum scroll offset (zero when hidden)
    pub max: i32,
    /// Length of the visible part of the content
    pub viewport: i32,
    /// Offset change of a single scroll step
    pub small_step: i32,
    /// Current offset, within `0..=max`
    pub offset: i32,
}

impl ScrollState {
    /// Recompute from the required and available length
    ///
    /// Returns the new visibility; the caller decides whether to adopt it.
    fn solve(&self, required: i32, available: Option<i32>, config: &ScrollConfig) -> ScrollState {
        let visible = matches!(available, Some(avail) if required > avail);
        let viewport = available.unwrap_or(required).max(0);
        let max = match visible {
            true => (required - viewport + config.platform_correction).max(0),
            false => 0,
        };
        ScrollState {
            visible,
            max,
            viewport,
            small_step: config.small_step.max(1),
            offset: self.offset.clamp(0, max),
        }
    }
}

/// Decides scroll bar visibility and range for a panel
#[derive(Clone, Debug, Default)]
pub struct ScrollCoordinator {
    enabled: (bool, bool),
    horiz: ScrollState,
    vert: ScrollState,
    toggles: u32,
}

impl ScrollCoordinator {
    /// Construct, enabling scrolling on the given axes
    pub fn new(horiz: bool, vert: bool) -> Self {
        ScrollCoordinator {
            enabled: (horiz, vert),
            ..Default::default()
        }
    }

    /// Construct with vertical scrolling only
    #[inline]
    pub fn vertical() -> Self {
        Self::new(false, true)
    }

    /// Construct with horizontal scrolling only
    #[inline]
    pub fn horizontal() -> Self {
        Self::new(true, false)
    }

    /// State of one axis
    #[inline]
    pub fn state<D: Directional>(&self, dir: D) -> &ScrollState {
        dir.pick((&self.horiz, &self.vert))
    }

    /// True if either bar is shown
    #[inline]
    pub fn any_visible(&self) -> bool {
        self.horiz.visible || self.vert.visible
    }

    /// The current scroll offset
    #[inline]
    pub fn offset(&self) -> Offset {
        Offset(self.horiz.offset, self.vert.offset)
    }

    /// The maximum scroll offset
    #[inline]
    pub fn max_offset(&self) -> Offset {
        Offset(self.horiz.max, self.vert.max)
    }

    /// Forget the toggle count
    ///
    /// The count is also reset by any update which does not change visibility.
    #[inline]
    pub fn reset_toggles(&mut self) {
        self.toggles = 0;
    }

    /// Space left for content once visible bars are subtracted
    ///
    /// A visible vertical bar takes width; a visible horizontal bar takes
    /// height. Unbounded axes are unchanged.
    pub fn content_available(
        &self,
        available: AvailableSize,
        config: &ScrollConfig,
    ) -> AvailableSize {
        let t = config.bar_thickness.max(0);
        let w = if self.vert.visible { t } else { 0 };
        let h = if self.horiz.visible { t } else { 0 };
        available.shrink(Size(w, h))
    }

    /// Update from the required and available size
    ///
    /// `available` is the panel's full size. A visible bar on one axis
    /// reduces the viewport of the other, which may make that axis scroll too.
    ///
    /// Returns [`Action::RESIZE`] when bar visibility changed (the available
    /// space of the next pass depends on it), [`Action::SET_RECT`] when only
    /// the range or offset changed, and nothing otherwise.
    pub fn update(
        &mut self,
        required: Size,
        available: AvailableSize,
        config: &ScrollConfig,
    ) -> Action {
        let disabled = ScrollState {
            small_step: config.small_step.max(1),
            ..ScrollState::default()
        };
        let t = config.bar_thickness.max(0);
        let mut bars = (false, false);
        let (mut horiz, mut vert) = (disabled, disabled);
        // A bar takes space from the other axis, which may then need a bar
        // too. Bars are only ever added, so three rounds reach the fixed point.
        for _ in 0..3 {
            let w = available.0.map(|w| (w - if bars.1 { t } else { 0 }).max(0));
            let h = available.1.map(|h| (h - if bars.0 { t } else { 0 }).max(0));
            if self.enabled.0 {
                horiz = self.horiz.solve(required.0, w, config);
            }
            if self.enabled.1 {
                vert = self.vert.solve(required.1, h, config);
            }
            if (horiz.visible, vert.visible) == bars {
                break;
            }
            bars = (horiz.visible, vert.visible);
        }

        let toggled = horiz.visible != self.horiz.visible || vert.visible != self.vert.visible;
        let mut action = Action::empty();
        if toggled {
            if self.toggles >= config.max_toggles {
                log::debug!(
                    "ScrollCoordinator::update: suppressing visibility toggle after {} toggles",
                    self.toggles
                );
                horiz = keep_visibility(self.horiz, horiz, required.0, config);
                vert = keep_visibility(self.vert, vert, required.1, config);
                self.toggles = 0;
            } else {
                self.toggles += 1;
                log::debug!(
                    "ScrollCoordinator::update: visible=({}, {}) -> ({}, {})",
                    self.horiz.visible,
                    self.vert.visible,
                    horiz.visible,
                    vert.visible
                );
                action |= Action::RESIZE;
            }
        } else {
            self.toggles = 0;
        }

        if horiz != self.horiz || vert != self.vert {
            action |= Action::SET_RECT;
        }
        self.horiz = horiz;
        self.vert = vert;
        action
    }

    /// Set the scroll offset, clamped to the valid range
    pub fn set_offset(&mut self, offset: Offset) -> Action {
        let offset = offset.clamp_to(self.max_offset());
        if offset == self.offset() {
            return Action::empty();
        }
        self.horiz.offset = offset.0;
        self.vert.offset = offset.1;
        Action::SET_RECT
    }

    /// Scroll by a delta
    #[inline]
    pub fn scroll_by(&mut self, delta: Offset) -> Action {
        self.set_offset(self.offset() + delta)
    }

    /// Scroll by a number of small steps on each axis
    pub fn scroll_steps(&mut self, steps_x: i32, steps_y: i32) -> Action {
        let delta = Offset(
            steps_x.saturating_mul(self.horiz.small_step),
            steps_y.saturating_mul(self.vert.small_step),
        );
        self.scroll_by(delta)
    }

    /// Register scroll bar gutters of the visible bars
    ///
    /// `rect` is the panel's full rect; the gutters run along its right and
    /// bottom edges.
    pub fn push_tracks<M>(
        &self,
        regions: &mut RegionRegistry<M>,
        rect: Rect,
        config: &ScrollConfig,
    ) {
        let t = config.bar_thickness.max(0);
        let corner = |visible: bool| if visible { t } else { 0 };
        if self.vert.visible {
            let h = rect.size.1 - corner(self.horiz.visible);
            regions.push_track(TrackInfo {
                rect: Rect::clamped(rect.pos.0 + rect.size.0 - t, rect.pos.1, t, h),
                direction: Direction::Down,
                scroll_bar: true,
            });
        }
        if self.horiz.visible {
            let w = rect.size.0 - corner(self.vert.visible);
            regions.push_track(TrackInfo {
                rect: Rect::clamped(rect.pos.0, rect.pos.1 + rect.size.1 - t, w, t),
                direction: Direction::Right,
                scroll_bar: true,
            });
        }
    }
}

fn keep_visibility(
    old: ScrollState,
    new: ScrollState,
    required: i32,
    config: &ScrollConfig,
) -> ScrollState {
    let max = match old.visible {
        true => (required - new.viewport + config.platform_correction).max(0),
        false => 0,
    };
    ScrollState {
        visible: old.visible,
        max,
        offset: new.offset.clamp(0, max),
        ..new
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::dir::{Down, Right};

    #[test]
    fn visibility_from_required_height() {
        let config = ScrollConfig::default();
        let mut scroll = ScrollCoordinator::vertical();
        let action = scroll.update(Size(100, 300), AvailableSize(Some(100), Some(250)), &config);
        assert!(action.needs_measure());
        let v = scroll.state(Down);
        assert!(v.visible);
        assert_eq!(v.max, 50);
        assert_eq!(v.viewport, 250);

        let action = scroll.update(Size(100, 200), AvailableSize(Some(100), Some(250)), &config);
        assert!(action.needs_measure());
        assert!(!scroll.state(Down).visible);
        assert_eq!(scroll.state(Down).max, 0);
        assert!(!scroll.state(Right).visible);
    }

    #[test]
    fn platform_correction_extends_range() {
        let config = ScrollConfig {
            platform_correction: 2,
            ..Default::default()
        };
        let mut scroll = ScrollCoordinator::vertical();
        let _ = scroll.update(Size(0, 300), AvailableSize(None, Some(250)), &config);
        assert_eq!(scroll.max_offset(), Offset(0, 52));
    }

    #[test]
    fn unbounded_axis_never_scrolls() {
        let config = ScrollConfig::default();
        let mut scroll = ScrollCoordinator::new(true, true);
        let action = scroll.update(Size(5000, 5000), AvailableSize::UNBOUNDED, &config);
        assert!(!action.needs_measure());
        assert!(!scroll.any_visible());
    }

    #[test]
    fn third_toggle_is_suppressed() {
        let config = ScrollConfig::default();
        let mut scroll = ScrollCoordinator::vertical();
        let avail = AvailableSize(Some(100), Some(250));
        assert!(scroll.update(Size(0, 300), avail, &config).needs_measure());
        assert!(scroll.update(Size(0, 200), avail, &config).needs_measure());
        let action = scroll.update(Size(0, 300), avail, &config);
        assert!(!action.needs_measure());
        assert!(!scroll.state(Down).visible);
        // the suppression ends the cycle
        assert!(scroll.update(Size(0, 300), avail, &config).needs_measure());
    }

    #[test]
    fn vertical_bar_narrows_horizontal_viewport() {
        let config = ScrollConfig::default();
        let mut scroll = ScrollCoordinator::new(true, true);
        let avail = AvailableSize(Some(300), Some(100));
        let action = scroll.update(Size(292, 209), avail, &config);
        assert!(action.needs_measure());
        let h = scroll.state(Right);
        assert!(h.visible);
        assert_eq!((h.viewport, h.max), (284, 8));
        let v = scroll.state(Down);
        assert_eq!((v.viewport, v.max), (84, 125));

        // fits beside the vertical bar: no horizontal bar
        let _ = scroll.update(Size(280, 209), avail, &config);
        assert!(!scroll.state(Right).visible);
        assert_eq!(scroll.state(Right).viewport, 284);
        assert_eq!(scroll.state(Down).viewport, 100);
    }

    #[test]
    fn offset_is_clamped() {
        let config = ScrollConfig::default();
        let mut scroll = ScrollCoordinator::vertical();
        let _ = scroll.update(Size(0, 300), AvailableSize(None, Some(250)), &config);
        assert_eq!(scroll.set_offset(Offset(10, 80)), Action::SET_RECT);
        assert_eq!(scroll.offset(), Offset(0, 50));
        assert_eq!(scroll.scroll_steps(0, -1), Action::SET_RECT);
        assert_eq!(scroll.offset(), Offset(0, 34));
        let _ = scroll.update(Size(0, 260), AvailableSize(None, Some(250)), &config);
        assert_eq!(scroll.offset(), Offset(0, 10));
    }

    #[test]
    fn content_available_subtracts_bars() {
        let config = ScrollConfig::default();
        let mut scroll = ScrollCoordinator::vertical();
        let avail = AvailableSize(Some(100), Some(250));
        let _ = scroll.update(Size(0, 300), avail, &config);
        assert_eq!(scroll.content_available(avail, &config), AvailableSize(Some(84), Some(250)));

        let mut regions = RegionRegistry::<()>::default();
        scroll.push_tracks(&mut regions, Rect::clamped(0, 0, 100, 250), &config);
        assert_eq!(regions.tracks()[0].rect, Rect::clamped(84, 0, 16, 250));
    }
}
