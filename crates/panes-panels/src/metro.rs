// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Tile grid panel

use std::time::Instant;

use crate::{Panel, Response};
use panes_core::Action;
use panes_core::config::LayoutConfig;
use panes_core::draw::HeaderRenderer;
use panes_core::event::{HeaderHover, PointerEvent};
use panes_core::geom::{AvailableSize, Offset, Rect, Size};
use panes_core::layout::{TilePacker, TileSlot};
use panes_core::node::{Flags, LayoutBox, Node, Placement, hide_invisible};
use panes_core::region::{HeaderKind, HeaderRenderInfo, RegionRegistry};
use panes_core::scroll::ScrollCoordinator;

#[derive(Clone, Debug, Default)]
struct TileGroup {
    title: Option<String>,
    tiles: Vec<(usize, TileSlot)>,
    extent: Size,
}

/// Groups of tiles laid out left to right
///
/// Each child is a tile whose footprint is given by its
/// [`TileMode`](panes_core::node::TileMode); the child's own desired size is
/// not used. [`Flags::GROUP_BREAK`] starts a new group. Each group is a grid
/// of [`TileConfig::group_columns`] cells filled first-fit, row by row.
///
/// The panel scrolls horizontally.
///
/// [`TileConfig::group_columns`]: panes_core::config::TileConfig::group_columns
#[derive(Clone, Debug)]
pub struct MetroPanel {
    config: LayoutConfig,
    groups: Vec<TileGroup>,
    required: Size,
    scroll: ScrollCoordinator,
    regions: RegionRegistry<()>,
    hover: HeaderHover,
}

impl Default for MetroPanel {
    fn default() -> Self {
        MetroPanel::new(LayoutConfig::default())
    }
}

impl MetroPanel {
    /// Construct
    pub fn new(config: LayoutConfig) -> Self {
        MetroPanel {
            config: config.validate(),
            groups: vec![],
            required: Size::ZERO,
            scroll: ScrollCoordinator::horizontal(),
            regions: RegionRegistry::default(),
            hover: HeaderHover::default(),
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

    fn header_height(&self) -> i32 {
        match self.groups.iter().any(|g| g.title.is_some()) {
            true => self.config.tiles.header_height.max(0),
            false => 0,
        }
    }
}

impl Panel for MetroPanel {
    type Msg = ();

    fn measure<N: Node>(&mut self, children: &mut [N], _: AvailableSize) -> Size {
        let start = Instant::now();
        let c = &self.config.tiles;
        let mut groups: Vec<TileGroup> = vec![];
        let mut packer = TilePacker::new(c.group_columns);
        for b in LayoutBox::collect(children) {
            if b.has(Flags::GROUP_BREAK) || groups.is_empty() {
                if let Some(last) = groups.last_mut() {
                    last.extent = packer.extent(c);
                }
                packer = TilePacker::new(c.group_columns);
                groups.push(TileGroup {
                    title: b.group_title.clone(),
                    ..Default::default()
                });
            }
            let slot = packer.place(b.tile_mode);
            if let Some(group) = groups.last_mut() {
                group.tiles.push((b.index, slot));
            }
        }
        if let Some(last) = groups.last_mut() {
            last.extent = packer.extent(c);
        }
        self.groups = groups;

        let n = i32::try_from(self.groups.len()).unwrap_or(0);
        let width = self.groups.iter().map(|g| g.extent.0).sum::<i32>()
            + (n - 1).max(0) * self.config.tiles.group_spacing.max(0);
        let height = self.groups.iter().map(|g| g.extent.1).max().unwrap_or(0);
        self.required = Size::clamped(width, height + self.header_height());

        log::trace!(
            target: "panes_perf::metro",
            "measure: {} groups in {}µs",
            self.groups.len(),
            start.elapsed().as_micros()
        );
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

        let c = &self.config.tiles;
        let header_h = self.header_height();
        let mut x = rect.pos.0 - self.scroll.offset().0;
        let top = rect.pos.1 + header_h;
        for (g, group) in self.groups.iter().enumerate() {
            if let Some(title) = group.title.as_ref() {
                self.regions.push_header(HeaderRenderInfo {
                    kind: HeaderKind::Group { expanded: None },
                    rect: Rect::clamped(x, rect.pos.1, group.extent.0, header_h),
                    title: Some(title.clone()),
                    index: g,
                });
            }
            for (index, slot) in &group.tiles {
                let tile = slot.rect(c) + Offset(x, top);
                children[*index].set_rect(Placement::new(tile));
            }
            x += group.extent.0 + c.group_spacing.max(0);
        }

        self.scroll
            .push_tracks(&mut self.regions, rect, &self.config.scroll);
        action
    }

    fn regions(&self) -> &RegionRegistry<()> {
        &self.regions
    }

    /// Passes events over group titles through to `renderer`
    fn handle_pointer<N: Node>(
        &mut self,
        _: &mut [N],
        event: PointerEvent,
        renderer: Option<&mut dyn HeaderRenderer>,
    ) -> Response<()> {
        match renderer {
            Some(renderer) => Response::action(self.hover.forward(&self.regions, renderer, event)),
            None => Response::default(),
        }
    }
}
