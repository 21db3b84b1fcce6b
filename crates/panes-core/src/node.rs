// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Hosted children
//!
//! Panels never own the children they lay out (the dock panel is the
//! exception: undocking transfers ownership explicitly). A host passes its
//! children as a slice of some `N: Node`; the panel reads per-child metadata
//! through [`Attached`], asks for a desired size through [`Node::measure`] and
//! assigns a final [`Placement`] through [`Node::set_rect`].
//!
//! Once per measure pass each visible child is summarised as a [`LayoutBox`].
//! Layout decisions are made on the box's explicit [`Role`], never by
//! inspecting the concrete child type.

use crate::geom::{AvailableSize, Rect, Size};

/// Layout role of a child
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Role {
    /// A caption; pairs with the following child
    Label,
    /// An ordinary control
    #[default]
    Edit,
    /// A control occupying both the label and the edit area
    Span,
    /// A control trailing the previous edit control on the same row
    Secondary,
    /// A check-box-like control (grouped with its neighbours in flow rows)
    CheckLike,
    /// A radio-button-like control (grouped with its neighbours in flow rows)
    RadioLike,
}

impl Role {
    /// True for check-box and radio-button like roles
    #[inline]
    pub fn is_option(self) -> bool {
        matches!(self, Role::CheckLike | Role::RadioLike)
    }
}

bitflags! {
    /// Per-child layout hints
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Flags: u16 {
        /// Start a new column with this child
        const COLUMN_BREAK = 1 << 0;
        /// Start a new row (flow panel) with this child
        const LINE_BREAK = 1 << 1;
        /// Start a new group with this child
        const GROUP_BREAK = 1 << 2;
        /// Attach to the right of the previous control
        const FLOW_WITH_PREVIOUS = 1 << 3;
        /// Occupy an isolated full-width row
        const SPAN_FULL_WIDTH = 1 << 4;
        /// A label which never pairs with the following child
        const STANDALONE_LABEL = 1 << 5;
        /// A control which never pairs with a preceding label
        const STANDALONE_EDIT = 1 << 6;
    }
}

/// Footprint of a tile in a tile grid
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TileMode {
    /// One cell
    #[default]
    Normal,
    /// Two cells wide, one high
    Double,
    /// Two cells wide, two high
    DoubleSquare,
    /// A quarter cell; four share one normal cell
    Tiny,
}

impl TileMode {
    /// Footprint in normal cells (columns, rows); `Tiny` reports one cell
    #[inline]
    pub fn cells(self) -> (u32, u32) {
        match self {
            TileMode::Normal | TileMode::Tiny => (1, 1),
            TileMode::Double => (2, 1),
            TileMode::DoubleSquare => (2, 2),
        }
    }
}

/// Read-only metadata attached to a child
///
/// All methods have defaults, so a host implements only what it uses.
pub trait Attached {
    /// Layout role
    fn role(&self) -> Role {
        Role::Edit
    }

    /// Layout hints
    fn flags(&self) -> Flags {
        Flags::empty()
    }

    /// Title (blades, dock wells)
    fn title(&self) -> Option<&str> {
        None
    }

    /// Title of the group this child starts (with [`Flags::GROUP_BREAK`])
    fn group_title(&self) -> Option<&str> {
        None
    }

    /// Whether the host offers a close button for this child
    fn closable(&self) -> bool {
        false
    }

    /// Whether this child may be undocked into a floating window
    fn dockable(&self) -> bool {
        true
    }

    /// Tile footprint (tile grids)
    fn tile_mode(&self) -> TileMode {
        TileMode::Normal
    }
}

/// Final placement of a child
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    /// Position and size in panel coordinates (after scale and scroll)
    pub rect: Rect,
    /// Size the child should lay out its own content in (before scale)
    pub layout_size: Size,
    /// If set, the child must not draw outside this rect
    pub clip: Option<Rect>,
    /// Render scale factor applied to the child
    pub scale: f32,
}

impl Placement {
    /// Placement of a hidden child
    pub const HIDDEN: Placement = Placement {
        rect: Rect::ZERO,
        layout_size: Size::ZERO,
        clip: Some(Rect::ZERO),
        scale: 1.0,
    };

    /// An unscaled, unclipped placement
    #[inline]
    pub fn new(rect: Rect) -> Self {
        Placement {
            rect,
            layout_size: rect.size,
            clip: None,
            scale: 1.0,
        }
    }

    /// True if this is [`Placement::HIDDEN`]
    #[inline]
    pub fn is_hidden(&self) -> bool {
        self.clip == Some(Rect::ZERO) && self.rect == Rect::ZERO
    }
}

/// A child hosted by a panel
///
/// Panics raised by [`Node::measure`] or [`Node::set_rect`] are not caught:
/// they propagate to the host's own error boundary.
pub trait Node: Attached {
    /// Whether the child takes part in layout
    fn is_visible(&self) -> bool {
        true
    }

    /// Measure the child, returning its desired size
    ///
    /// Unbounded axes of `available` must be answered with the child's natural
    /// size on that axis.
    fn measure(&mut self, available: AvailableSize) -> Size;

    /// Assign the final placement
    fn set_rect(&mut self, placement: Placement);
}

impl<T: Attached + ?Sized> Attached for Box<T> {
    fn role(&self) -> Role {
        (**self).role()
    }
    fn flags(&self) -> Flags {
        (**self).flags()
    }
    fn title(&self) -> Option<&str> {
        (**self).title()
    }
    fn group_title(&self) -> Option<&str> {
        (**self).group_title()
    }
    fn closable(&self) -> bool {
        (**self).closable()
    }
    fn dockable(&self) -> bool {
        (**self).dockable()
    }
    fn tile_mode(&self) -> TileMode {
        (**self).tile_mode()
    }
}

impl<T: Node + ?Sized> Node for Box<T> {
    fn is_visible(&self) -> bool {
        (**self).is_visible()
    }
    fn measure(&mut self, available: AvailableSize) -> Size {
        (**self).measure(available)
    }
    fn set_rect(&mut self, placement: Placement) {
        (**self).set_rect(placement)
    }
}

/// The per-pass summary of one visible child
///
/// Rebuilt from the live children on every measure pass; never persisted.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutBox {
    /// Index of the child in the host's slice
    pub index: usize,
    /// Desired size from the unconstrained measure
    pub preferred: Size,
    pub role: Role,
    pub flags: Flags,
    pub group_title: Option<String>,
    pub tile_mode: TileMode,
}

impl LayoutBox {
    /// Measure `child` against an unbounded box and summarise it
    pub fn measure<N: Node + ?Sized>(index: usize, child: &mut N) -> Self {
        let preferred = child.measure(AvailableSize::UNBOUNDED);
        let preferred = Size::clamped(preferred.0, preferred.1);
        LayoutBox {
            index,
            preferred,
            role: child.role(),
            flags: child.flags(),
            group_title: child.group_title().map(str::to_string),
            tile_mode: child.tile_mode(),
        }
    }

    /// Collect boxes for all visible children, in order
    pub fn collect<N: Node>(children: &mut [N]) -> Vec<LayoutBox> {
        children
            .iter_mut()
            .enumerate()
            .filter(|(_, child)| child.is_visible())
            .map(|(index, child)| LayoutBox::measure(index, child))
            .collect()
    }

    /// Test a flag
    #[inline]
    pub fn has(&self, flag: Flags) -> bool {
        self.flags.contains(flag)
    }
}

/// Hide every child which is not visible
///
/// Panels call this during arrange so that invisible children never keep a
/// stale placement.
pub fn hide_invisible<N: Node>(children: &mut [N]) {
    for child in children.iter_mut().filter(|c| !c.is_visible()) {
        child.set_rect(Placement::HIDDEN);
    }
}

/// A child of fixed desired size
///
/// Useful for spacers and as a stand-in child in tests. The last placement is
/// recorded.
#[derive(Clone, Debug, Default)]
pub struct FixedNode {
    pub size: Size,
    pub role: Role,
    pub flags: Flags,
    pub title: Option<String>,
    pub group_title: Option<String>,
    pub closable: bool,
    pub dockable: bool,
    pub tile_mode: TileMode,
    pub visible: bool,
    /// Number of calls to [`Node::measure`]
    pub measured: u32,
    /// Last placement assigned
    pub placement: Option<Placement>,
}

impl FixedNode {
    /// Construct a visible edit-role child of the given size
    pub fn new(w: i32, h: i32) -> Self {
        FixedNode {
            size: Size::clamped(w, h),
            dockable: true,
            visible: true,
            ..Default::default()
        }
    }

    /// Construct a label-role child of the given size
    pub fn label(w: i32, h: i32) -> Self {
        FixedNode::new(w, h).with_role(Role::Label)
    }

    /// Set the role
    #[must_use]
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    /// Add layout hints
    #[must_use]
    pub fn with_flags(mut self, flags: Flags) -> Self {
        self.flags |= flags;
        self
    }

    /// Set the title
    #[must_use]
    pub fn with_title(mut self, title: impl ToString) -> Self {
        self.title = Some(title.to_string());
        self
    }

    /// Start a titled group
    #[must_use]
    pub fn with_group(mut self, title: impl ToString) -> Self {
        self.flags |= Flags::GROUP_BREAK;
        self.group_title = Some(title.to_string());
        self
    }

    /// Set the tile footprint
    #[must_use]
    pub fn with_tile_mode(mut self, mode: TileMode) -> Self {
        self.tile_mode = mode;
        self
    }

    /// Last assigned rect (zero if never placed)
    pub fn rect(&self) -> Rect {
        self.placement.map(|p| p.rect).unwrap_or(Rect::ZERO)
    }
}

impl Attached for FixedNode {
    fn role(&self) -> Role {
        self.role
    }
    fn flags(&self) -> Flags {
        self.flags
    }
    fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }
    fn group_title(&self) -> Option<&str> {
        self.group_title.as_deref()
    }
    fn closable(&self) -> bool {
        self.closable
    }
    fn dockable(&self) -> bool {
        self.dockable
    }
    fn tile_mode(&self) -> TileMode {
        self.tile_mode
    }
}

impl Node for FixedNode {
    fn is_visible(&self) -> bool {
        self.visible
    }

    fn measure(&mut self, _available: AvailableSize) -> Size {
        self.measured += 1;
        self.size
    }

    fn set_rect(&mut self, placement: Placement) {
        self.placement = Some(placement);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn collect_skips_invisible() {
        let mut hidden = FixedNode::new(5, 5);
        hidden.visible = false;
        let mut children = vec![FixedNode::label(10, 4), hidden, FixedNode::new(-3, 7)];
        let boxes = LayoutBox::collect(&mut children);
        assert_eq!(boxes.len(), 2);
        assert_eq!(boxes[0].role, Role::Label);
        assert_eq!(boxes[1].index, 2);
        assert_eq!(boxes[1].preferred, Size(0, 7));
        assert_eq!(children[1].measured, 0);
    }

    #[test]
    fn boxed_children_forward() {
        let mut children: Vec<Box<dyn Node>> =
            vec![Box::new(FixedNode::new(3, 3).with_group("General"))];
        let boxes = LayoutBox::collect(&mut children);
        assert!(boxes[0].has(Flags::GROUP_BREAK));
        assert_eq!(boxes[0].group_title.as_deref(), Some("General"));
    }
}
