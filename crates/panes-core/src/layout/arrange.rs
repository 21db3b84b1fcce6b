// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Form setter (arrange pass)

use std::time::Instant;

use super::plan::{FormColumn, FormPlan, FormRow};
use crate::config::{LabelPosition, LayoutConfig};
use crate::geom::{Coord, Offset, Rect, Size};
use crate::node::{Node, Placement};
use crate::region::{GroupBackgroundRenderInfo, HeaderKind, HeaderRenderInfo, RegionRegistry};

/// An open run of rows between group breaks
struct GroupRun {
    top: i32,
    bottom: i32,
    group: usize,
}

/// Arrange-pass setter for label/edit forms
///
/// Walks a solved [`FormPlan`] using the plan's effective spacing. Rects are
/// computed in content space, then scaled about the panel origin and finally
/// translated by the scroll offset.
pub struct FormSetter<'a> {
    plan: &'a FormPlan,
    config: &'a LayoutConfig,
    origin: Coord,
    offset: Offset,
}

impl<'a> FormSetter<'a> {
    /// Construct
    ///
    /// -   `rect`: the panel's rect; content is placed from its origin
    /// -   `offset`: the scroll offset
    pub fn new(plan: &'a FormPlan, config: &'a LayoutConfig, rect: Rect, offset: Offset) -> Self {
        FormSetter {
            plan,
            config,
            origin: rect.pos,
            offset,
        }
    }

    /// Map a content-space rect to panel space: scale, then translate
    #[inline]
    pub fn finish(&self, rect: Rect) -> Rect {
        rect.scaled_about(self.origin, self.plan.scale) - self.offset
    }

    fn place<N: Node>(&self, children: &mut [N], b: usize, rect: Rect) {
        let index = self.plan.boxes[b].index;
        if let Some(child) = children.get_mut(index) {
            child.set_rect(Placement {
                rect: self.finish(rect),
                layout_size: rect.size,
                clip: None,
                scale: self.plan.scale,
            });
        }
    }

    /// Assign child placements and rebuild `regions`' decorations
    ///
    /// Header bands and group backgrounds are pushed; hot areas are left to
    /// the caller.
    pub fn apply<N: Node, M>(&self, children: &mut [N], regions: &mut RegionRegistry<M>) {
        let time = Instant::now();
        let plan = self.plan;
        let mut x = self.origin.0;
        let mut group = 0;

        for (c, column) in plan.columns.iter().enumerate() {
            let width = column.width(plan.position, plan.label_spacing);
            let info = column.info;
            let mut y = self.origin.1;
            let mut run: Option<GroupRun> = None;

            for (n, row) in column.rows.iter().enumerate() {
                if n > 0 {
                    y += match row.group_start {
                        true => info.group,
                        false => info.vertical,
                    };
                }
                if row.group_start {
                    if let Some(run) = run.take() {
                        self.push_group(regions, run, x, width, c);
                    }
                    let top = y;
                    if row.has_header() {
                        y += info.header_top;
                        let band = Rect::clamped(x, y, width, self.config.spacing.header_height);
                        regions.push_header(HeaderRenderInfo {
                            kind: HeaderKind::Group { expanded: None },
                            rect: self.finish(band),
                            title: row.group_title.clone(),
                            index: group,
                        });
                        y += band.size.1 + info.header_bottom;
                    }
                    run = Some(GroupRun {
                        top,
                        bottom: y,
                        group,
                    });
                    group += 1;
                }

                self.place_row(children, column, row, Coord(x, y), width);
                y += row.height;
                if let Some(run) = run.as_mut() {
                    run.bottom = y;
                }
            }
            if let Some(run) = run.take() {
                self.push_group(regions, run, x, width, c);
            }
            x += width + plan.column_spacing;
        }

        log::trace!(
            target: "panes_perf::layout::form",
            "apply: {}µs ({} columns)",
            time.elapsed().as_micros(),
            plan.columns.len()
        );
    }

    fn push_group<M>(
        &self,
        regions: &mut RegionRegistry<M>,
        run: GroupRun,
        x: i32,
        width: i32,
        column: usize,
    ) {
        let s = &self.config.spacing;
        let top = (run.top - s.group_margin_top.max(0)).max(self.origin.1);
        let bottom = run.bottom + s.group_margin_bottom.max(0);
        regions.push_group(GroupBackgroundRenderInfo {
            rect: self.finish(Rect::clamped(x, top, width, bottom - top)),
            column,
            group: run.group,
        });
    }

    fn place_row<N: Node>(
        &self,
        children: &mut [N],
        column: &FormColumn,
        row: &FormRow,
        pos: Coord,
        width: i32,
    ) {
        let plan = self.plan;
        let stretch = self.config.stretch_edits;
        let s = &self.config.spacing;

        let (edit_pos, area) = if row.span {
            (pos, width)
        } else {
            let top = plan.position == LabelPosition::Top;
            let edit_h = row.edit_size.1.max(row.chain_height);
            let mut edit_y = pos.1;
            if let Some(label) = row.label {
                let size = row.label_size;
                let dy = match top {
                    false if row.edit.is_some() && edit_h > size.1 => {
                        s.label_offset.max(0).min(edit_h - size.1)
                    }
                    _ => 0,
                };
                self.place(children, label, Rect::new(Coord(pos.0, pos.1 + dy), size));
                if top {
                    edit_y += size.1 + s.label_vertical.max(0);
                }
            }
            let dx = match top {
                false => column.edit_offset(plan.position, plan.label_spacing),
                true => 0,
            };
            (Coord(pos.0 + dx, edit_y), width - dx)
        };

        let Some(edit) = row.edit else {
            return;
        };
        let w = match stretch {
            true => (area - row.chain_width).max(row.edit_size.0),
            false => row.edit_size.0,
        };
        self.place(children, edit, Rect::new(edit_pos, Size(w, row.edit_size.1)));

        let mut x = edit_pos.0 + w;
        for &b in &row.secondaries {
            let size = plan.boxes[b].preferred;
            x += s.secondary.max(0);
            self.place(children, b, Rect::new(Coord(x, edit_pos.1), size));
            x += size.0;
        }
    }
}
