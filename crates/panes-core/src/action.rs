// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Action enum

bitflags! {
    /// Action required after processing
    ///
    /// This type is returned by panel methods which modify panel state. The
    /// host merges it into its own invalidation state to decide which passes
    /// must run again.
    ///
    /// Two `Action` values may be combined via bit-or (`a | b`).
    #[must_use]
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
    pub struct Action: u32 {
        /// The panel requires redrawing
        const REDRAW = 1 << 0;
        /// Children must be re-arranged without re-measuring
        ///
        /// Implies redraw.
        const SET_RECT = 1 << 8;
        /// Children must be measured and arranged again
        ///
        /// Implies set-rect and redraw.
        const RESIZE = 1 << 9;
    }
}

impl Action {
    /// True if a measure pass is required
    #[inline]
    pub fn needs_measure(self) -> bool {
        self.contains(Action::RESIZE)
    }

    /// True if an arrange pass is required
    #[inline]
    pub fn needs_arrange(self) -> bool {
        self.intersects(Action::RESIZE | Action::SET_RECT)
    }

    /// True if anything must be redrawn
    #[inline]
    pub fn needs_redraw(self) -> bool {
        !self.is_empty()
    }
}

/// Pending invalidation of a panel
///
/// Layout is single-threaded: a new pass never pre-empts one in progress.
/// Work requested while a pass runs is merged into `pending`. Work which must
/// wait until the current pass has completed (for example while the user
/// drags a scroll bar) goes into the single deferred slot, which the host
/// drains from its own event loop once the pass is finished.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Invalidation {
    pending: Action,
    deferred: Action,
}

impl Invalidation {
    /// Merge an action into the pending set
    #[inline]
    pub fn request(&mut self, action: Action) {
        self.pending |= action;
    }

    /// Defer an action until after the current pass
    ///
    /// There is a single slot: deferring twice before draining merges both
    /// requests into one re-layout.
    #[inline]
    pub fn defer(&mut self, action: Action) {
        self.deferred |= action;
    }

    /// True if a deferred re-layout is waiting
    #[inline]
    pub fn has_deferred(&self) -> bool {
        !self.deferred.is_empty()
    }

    /// Take the pending action, leaving it empty
    #[inline]
    pub fn take(&mut self) -> Action {
        std::mem::take(&mut self.pending)
    }

    /// Move the deferred action into the pending set and return the result
    ///
    /// Called by the host after a pass completes.
    pub fn drain_deferred(&mut self) -> Action {
        let deferred = std::mem::take(&mut self.deferred);
        if !deferred.is_empty() {
            log::trace!("Invalidation::drain_deferred: {deferred:?}");
        }
        self.pending |= deferred;
        self.take()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn deferred_slot_merges() {
        let mut inv = Invalidation::default();
        inv.defer(Action::SET_RECT);
        inv.defer(Action::SET_RECT);
        inv.request(Action::REDRAW);
        assert!(inv.has_deferred());
        assert_eq!(inv.take(), Action::REDRAW);
        assert_eq!(inv.drain_deferred(), Action::SET_RECT);
        assert!(!inv.has_deferred());
        assert_eq!(inv.drain_deferred(), Action::empty());
    }

    #[test]
    fn implied_passes() {
        assert!(Action::RESIZE.needs_arrange());
        assert!(!Action::SET_RECT.needs_measure());
        assert!(!Action::empty().needs_redraw());
    }
}
