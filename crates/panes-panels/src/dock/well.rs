// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Dock well model

use std::fmt;

use linear_map::LinearMap;
use thiserror::Error;

use panes_core::Action;
use panes_core::config::DockConfig;
use panes_core::geom::{Rect, Size};
use panes_core::node::Attached;

/// One of the five regions of a dock panel
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Well {
    Main,
    Left,
    Top,
    Right,
    Bottom,
}

impl Well {
    /// All wells, in arrangement order of the side wells
    pub const ALL: [Well; 5] = [Well::Left, Well::Right, Well::Top, Well::Bottom, Well::Main];

    /// True for the left and right wells, whose extent is a width
    #[inline]
    pub fn is_vertical_strip(self) -> bool {
        matches!(self, Well::Left | Well::Right)
    }

    /// The well on the opposite side, if any
    pub fn opposite(self) -> Option<Well> {
        match self {
            Well::Main => None,
            Well::Left => Some(Well::Right),
            Well::Right => Some(Well::Left),
            Well::Top => Some(Well::Bottom),
            Well::Bottom => Some(Well::Top),
        }
    }
}

impl fmt::Display for Well {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Well::Main => "main",
            Well::Left => "left",
            Well::Top => "top",
            Well::Right => "right",
            Well::Bottom => "bottom",
        };
        f.write_str(name)
    }
}

/// Dock model error
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DockError {
    #[error("no element {index} in the {well} well")]
    NoSuchElement { well: Well, index: usize },
    #[error("element does not support undocking")]
    NotDockable,
    #[error("the {0} well is empty")]
    EmptyWell(Well),
}

/// An element hosted by a well
#[derive(Clone, Debug)]
pub struct DockedElement<C> {
    pub child: C,
    pub title: Option<String>,
    /// False while hosted by a floating window
    pub docked: bool,
}

/// The elements of one well
///
/// At most one element, the selected one, is shown at a time.
#[derive(Clone, Debug)]
pub struct DockWell<C> {
    elements: Vec<DockedElement<C>>,
    selected: Option<usize>,
    extent: i32,
}

impl<C> DockWell<C> {
    fn new(extent: i32) -> Self {
        DockWell {
            elements: vec![],
            selected: None,
            extent,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Index of the shown element
    ///
    /// This is `Some` whenever the well is not empty.
    #[inline]
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Configured width (left, right) or height (top, bottom)
    #[inline]
    pub fn extent(&self) -> i32 {
        self.extent
    }

    #[inline]
    pub fn elements(&self) -> &[DockedElement<C>] {
        &self.elements
    }

    #[inline]
    pub fn elements_mut(&mut self) -> &mut [DockedElement<C>] {
        &mut self.elements
    }

    /// The shown element
    pub fn selected_element(&self) -> Option<&DockedElement<C>> {
        self.selected.and_then(|i| self.elements.get(i))
    }

    fn push(&mut self, element: DockedElement<C>) -> usize {
        self.elements.push(element);
        let index = self.elements.len() - 1;
        if self.selected.is_none() {
            self.selected = Some(index);
        }
        index
    }

    fn remove(&mut self, well: Well, index: usize) -> Result<DockedElement<C>, DockError> {
        if index >= self.elements.len() {
            return Err(DockError::NoSuchElement { well, index });
        }
        let element = self.elements.remove(index);
        self.selected = match (self.selected, self.elements.len()) {
            (_, 0) | (None, _) => None,
            (Some(sel), len) if index <= sel => Some(sel.saturating_sub(1).min(len - 1)),
            (Some(sel), len) => Some(sel.min(len - 1)),
        };
        Ok(element)
    }
}

/// A child hosted by a floating window
///
/// Returned by [`DockWellModel::undock`]; hand it back to
/// [`DockWellModel::redock`] when the window closes.
#[derive(Debug)]
pub struct Floating<C> {
    element: DockedElement<C>,
    origin: Well,
    rect: Rect,
}

impl<C> Floating<C> {
    /// The well the element was undocked from
    #[inline]
    pub fn origin(&self) -> Well {
        self.origin
    }

    /// Rect of the well at the time of undocking, in panel coordinates
    ///
    /// A host sizes the floating window to this.
    #[inline]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    #[inline]
    pub fn title(&self) -> Option<&str> {
        self.element.title.as_deref()
    }

    #[inline]
    pub fn child(&self) -> &C {
        &self.element.child
    }

    #[inline]
    pub fn child_mut(&mut self) -> &mut C {
        &mut self.element.child
    }
}

/// Where a redocked child went
#[derive(Debug)]
pub enum Redocked<C> {
    /// Appended to a well
    Well { well: Well, index: usize },
    /// Returned to the host's own item collection
    ToItems(C),
}

fn initial_extent(config: &DockConfig, well: Well) -> i32 {
    let extent = match well {
        Well::Main => 0,
        Well::Left | Well::Right => config.side_width,
        Well::Top | Well::Bottom => config.side_height,
    };
    extent.max(0)
}

/// State of the five wells of a dock panel
#[derive(Clone, Debug)]
pub struct DockWellModel<C> {
    config: DockConfig,
    wells: LinearMap<Well, DockWell<C>>,
}

impl<C> DockWellModel<C> {
    /// Construct with all wells empty
    pub fn new(config: DockConfig) -> Self {
        let mut wells = LinearMap::with_capacity(Well::ALL.len());
        for well in Well::ALL {
            wells.insert(well, DockWell::new(initial_extent(&config, well)));
        }
        DockWellModel { config, wells }
    }

    #[inline]
    pub fn config(&self) -> &DockConfig {
        &self.config
    }

    /// Access a well
    #[inline]
    pub fn well(&self, well: Well) -> Option<&DockWell<C>> {
        self.wells.get(&well)
    }

    /// Access a well mutably
    #[inline]
    pub fn well_mut(&mut self, well: Well) -> Option<&mut DockWell<C>> {
        self.wells.get_mut(&well)
    }

    fn get_mut(&mut self, well: Well) -> &mut DockWell<C> {
        let config = &self.config;
        self.wells
            .entry(well)
            .or_insert_with(|| DockWell::new(initial_extent(config, well)))
    }

    fn occupied_mut(&mut self, well: Well) -> Result<&mut DockWell<C>, DockError> {
        let w = self.get_mut(well);
        match w.is_empty() {
            true => Err(DockError::EmptyWell(well)),
            false => Ok(w),
        }
    }

    /// True if `well` holds at least one element
    pub fn is_occupied(&self, well: Well) -> bool {
        self.well(well).is_some_and(|w| !w.is_empty())
    }

    /// Append a child to a well, returning its index
    ///
    /// The child is selected if the well was empty.
    pub fn add(
        &mut self,
        well: Well,
        child: C,
        title: Option<String>,
    ) -> Result<usize, DockError> {
        let index = self.get_mut(well).push(DockedElement {
            child,
            title,
            docked: true,
        });
        log::debug!("DockWellModel::add: {well} well, index {index}");
        Ok(index)
    }

    /// Remove an element from a well
    ///
    /// If `index` is at or before the selection, the selection moves to the
    /// previous element; it always stays in range.
    pub fn remove(&mut self, well: Well, index: usize) -> Result<C, DockError> {
        self.occupied_mut(well)?
            .remove(well, index)
            .map(|element| element.child)
    }

    /// Select the shown element of a well
    pub fn select(&mut self, well: Well, index: usize) -> Result<Action, DockError> {
        let w = self.occupied_mut(well)?;
        if index >= w.len() {
            return Err(DockError::NoSuchElement { well, index });
        }
        if w.selected == Some(index) {
            return Ok(Action::empty());
        }
        w.selected = Some(index);
        Ok(Action::RESIZE)
    }

    /// Set the extent of a side well as a splitter drag does
    ///
    /// The extent is clamped so that the opposite well (if occupied) plus the
    /// configured minimum gap still fit in `panel`. Returns
    /// [`Action::SET_RECT`] if the extent changed.
    pub fn set_extent(&mut self, well: Well, extent: i32, panel: Size) -> Action {
        let Some(opposite) = well.opposite() else {
            return Action::empty();
        };
        let (total, gap) = match well.is_vertical_strip() {
            true => (panel.0, self.config.min_width_gap),
            false => (panel.1, self.config.min_height_gap),
        };
        let other = match self.well(opposite) {
            Some(w) if !w.is_empty() => w.extent,
            _ => 0,
        };
        let max = (total - other - gap.max(0)).max(0);
        let extent = extent.clamp(0, max);

        let w = self.get_mut(well);
        if w.extent == extent {
            return Action::empty();
        }
        w.extent = extent;
        Action::SET_RECT
    }

    /// Return a floating child to the model
    ///
    /// With `items_host`, the child is handed back for the host to return to
    /// its own item collection. Otherwise it is appended to the well it came
    /// from.
    pub fn redock(
        &mut self,
        floating: Floating<C>,
        items_host: bool,
    ) -> Result<Redocked<C>, DockError> {
        let Floating {
            mut element,
            origin,
            ..
        } = floating;
        if items_host {
            log::debug!("DockWellModel::redock: returning element to items host");
            return Ok(Redocked::ToItems(element.child));
        }
        element.docked = true;
        let index = self.get_mut(origin).push(element);
        log::debug!("DockWellModel::redock: {origin} well, index {index}");
        Ok(Redocked::Well {
            well: origin,
            index,
        })
    }
}

impl<C: Attached> DockWellModel<C> {
    /// Undock an element into a floating window sized to `rect`
    ///
    /// The element leaves its well; the selection of the well is kept in
    /// range.
    pub fn undock(
        &mut self,
        well: Well,
        index: usize,
        rect: Rect,
    ) -> Result<Floating<C>, DockError> {
        let w = self.occupied_mut(well)?;
        match w.elements.get(index) {
            None => return Err(DockError::NoSuchElement { well, index }),
            Some(e) if !e.child.dockable() => return Err(DockError::NotDockable),
            Some(_) => (),
        }
        let mut element = w.remove(well, index)?;
        element.docked = false;
        log::debug!("DockWellModel::undock: {well} well, index {index}");
        Ok(Floating {
            element,
            origin: well,
            rect,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use panes_core::node::FixedNode;

    fn model() -> DockWellModel<FixedNode> {
        let mut model = DockWellModel::new(DockConfig::default());
        for i in 0..3 {
            model
                .add(Well::Left, FixedNode::new(10, 10), Some(format!("tool {i}")))
                .unwrap();
        }
        model
    }

    #[test]
    fn first_added_is_selected() {
        let model = model();
        let left = model.well(Well::Left).unwrap();
        assert_eq!(left.len(), 3);
        assert_eq!(left.selected(), Some(0));
        assert_eq!(left.extent(), 175);
        assert!(!model.is_occupied(Well::Right));
    }

    #[test]
    fn remove_moves_selection() {
        let mut model = model();
        assert_eq!(model.select(Well::Left, 2), Ok(Action::RESIZE));
        assert_eq!(model.select(Well::Left, 2), Ok(Action::empty()));
        model.remove(Well::Left, 0).unwrap();
        assert_eq!(model.well(Well::Left).unwrap().selected(), Some(1));
        model.remove(Well::Left, 1).unwrap();
        assert_eq!(model.well(Well::Left).unwrap().selected(), Some(0));
        model.remove(Well::Left, 0).unwrap();
        assert_eq!(model.well(Well::Left).unwrap().selected(), None);
        assert_eq!(
            model.remove(Well::Left, 0).unwrap_err(),
            DockError::EmptyWell(Well::Left)
        );
    }

    #[test]
    fn empty_well_is_distinct_from_bad_index() {
        let mut model = model();
        assert_eq!(model.select(Well::Right, 0), Err(DockError::EmptyWell(Well::Right)));
        let err = model.undock(Well::Main, 0, Rect::ZERO).unwrap_err();
        assert_eq!(err.to_string(), "the main well is empty");
        assert_eq!(
            model.select(Well::Left, 3),
            Err(DockError::NoSuchElement {
                well: Well::Left,
                index: 3
            })
        );
    }

    #[test]
    fn remove_after_selection_keeps_it() {
        let mut model = model();
        model.select(Well::Left, 1).unwrap();
        model.remove(Well::Left, 2).unwrap();
        assert_eq!(model.well(Well::Left).unwrap().selected(), Some(1));
    }

    #[test]
    fn undock_and_redock() {
        let mut model = model();
        model.select(Well::Left, 2).unwrap();
        let rect = Rect::clamped(0, 0, 175, 300);
        let floating = model.undock(Well::Left, 2, rect).unwrap();
        assert_eq!(floating.title(), Some("tool 2"));
        assert_eq!(floating.origin(), Well::Left);
        assert_eq!(floating.rect(), rect);
        assert!(!floating.element.docked);
        let left = model.well(Well::Left).unwrap();
        assert_eq!((left.len(), left.selected()), (2, Some(1)));

        match model.redock(floating, false).unwrap() {
            Redocked::Well { well, index } => assert_eq!((well, index), (Well::Left, 2)),
            Redocked::ToItems(_) => panic!("expected a well"),
        }
        assert!(model.well(Well::Left).unwrap().elements()[2].docked);

        let floating = model.undock(Well::Left, 0, rect).unwrap();
        assert!(matches!(model.redock(floating, true), Ok(Redocked::ToItems(_))));
        assert_eq!(model.well(Well::Left).unwrap().len(), 2);
    }

    #[test]
    fn undock_requires_dockable() {
        let mut model = model();
        let mut fixed = FixedNode::new(5, 5);
        fixed.dockable = false;
        let index = model.add(Well::Main, fixed, None).unwrap();
        let err = model.undock(Well::Main, index, Rect::ZERO).unwrap_err();
        assert_eq!(err, DockError::NotDockable);
        assert_eq!(err.to_string(), "element does not support undocking");
        assert!(model.is_occupied(Well::Main));
    }

    #[test]
    fn splitter_clamps_to_opposite_well() {
        let mut model = model();
        let panel = Size(600, 400);
        // right well empty: only the gap is kept
        assert_eq!(model.set_extent(Well::Left, 590, panel), Action::SET_RECT);
        assert_eq!(model.well(Well::Left).unwrap().extent(), 575);

        model.add(Well::Right, FixedNode::new(5, 5), None).unwrap();
        model.set_extent(Well::Left, 550, panel);
        assert_eq!(model.well(Well::Left).unwrap().extent(), 600 - 175 - 25);
        assert_eq!(model.set_extent(Well::Left, 400, panel), Action::empty());
        model.set_extent(Well::Top, 1000, panel);
        assert_eq!(model.well(Well::Top).unwrap().extent(), 400 - 40);
        assert_eq!(model.set_extent(Well::Main, 10, panel), Action::empty());
    }
}
