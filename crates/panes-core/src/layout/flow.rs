// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Flow solver
//!
//! Lays out label-led rows of controls which wrap to further lines when the
//! width is bounded.

use smallvec::SmallVec;

use crate::config::FlowConfig;
use crate::geom::{Coord, Rect, Size};
use crate::node::{Flags, LayoutBox, Role};

/// A run of boxes which wraps as one
///
/// Consecutive check-box-like (or radio-button-like) boxes form one unit.
#[derive(Clone, Debug, Default)]
struct Unit {
    boxes: SmallVec<[usize; 4]>,
    option: bool,
}

#[derive(Clone, Debug, Default)]
struct FlowRow {
    label: Option<usize>,
    units: Vec<Unit>,
}

struct LineBuf {
    top: i32,
    x: i32,
    label: Option<usize>,
    items: SmallVec<[(usize, i32); 8]>,
    continuation: bool,
}

impl LineBuf {
    fn new(top: i32, indent: i32, label: Option<usize>, continuation: bool) -> Self {
        LineBuf {
            top,
            x: indent,
            label,
            items: SmallVec::new(),
            continuation,
        }
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn push(&mut self, b: usize, gap: i32, width: i32) {
        let gap = if self.is_empty() { 0 } else { gap };
        self.x += gap;
        self.items.push((b, self.x));
        self.x += width;
    }
}

/// Output of [`FlowSolver::solve`]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FlowPlan {
    /// Visible children, in order
    pub boxes: Vec<LayoutBox>,
    /// Content-space rect of each placed box: `(box index, rect)`
    pub items: Vec<(usize, Rect)>,
    /// Blank label-column spacers of continuation lines
    pub spacers: Vec<Rect>,
    /// Width of the label column
    pub label_width: i32,
    /// Number of lines
    pub lines: usize,
    /// Width the rows were wrapped to (`None` if unbounded)
    pub wrap_width: Option<i32>,
    /// Content size
    pub size: Size,
}

/// Row solver for flow panels
///
/// Every [`Role::Label`] box (and every box with [`Flags::LINE_BREAK`] or
/// [`Flags::COLUMN_BREAK`]) starts a row. Labels form an aligned column;
/// controls follow with [`FlowConfig::item_spacing`], while neighbouring
/// options of one group use [`FlowConfig::option_spacing`]. A row wraps
/// between units; an option group is only split when it cannot fit on a line
/// of its own. Continuation lines begin with a blank spacer the width of the
/// label column.
pub struct FlowSolver<'a> {
    config: &'a FlowConfig,
}

impl<'a> FlowSolver<'a> {
    /// Construct
    #[inline]
    pub fn new(config: &'a FlowConfig) -> Self {
        FlowSolver { config }
    }

    fn partition(boxes: &[LayoutBox]) -> Vec<FlowRow> {
        let mut rows: Vec<FlowRow> = vec![];
        for (i, b) in boxes.iter().enumerate() {
            let breaks = b.role == Role::Label
                || b.has(Flags::LINE_BREAK)
                || b.has(Flags::COLUMN_BREAK)
                || rows.is_empty();
            if breaks {
                rows.push(FlowRow::default());
            }
            let Some(row) = rows.last_mut() else {
                continue;
            };
            if b.role == Role::Label && row.label.is_none() && row.units.is_empty() {
                row.label = Some(i);
                continue;
            }

            let option = b.role.is_option();
            let joins = row.units.last().is_some_and(|u| {
                option && u.option && u.boxes.last().map(|&j| boxes[j].role) == Some(b.role)
            });
            match row.units.last_mut() {
                Some(unit) if joins => unit.boxes.push(i),
                _ => {
                    let mut unit = Unit {
                        option,
                        ..Default::default()
                    };
                    unit.boxes.push(i);
                    row.units.push(unit);
                }
            }
        }
        rows
    }

    /// Solve for `boxes`, wrapping to `width` if bounded
    pub fn solve(&self, boxes: Vec<LayoutBox>, width: Option<i32>) -> FlowPlan {
        let c = self.config;
        let rows = Self::partition(&boxes);
        let label_width = rows
            .iter()
            .filter_map(|r| r.label.map(|l| boxes[l].preferred.0))
            .max()
            .unwrap_or(0);
        let indent = match label_width {
            0 => 0,
            w => w + c.label_spacing.max(0),
        };

        let mut plan = FlowPlan {
            label_width,
            wrap_width: width,
            ..Default::default()
        };
        let mut y = 0;
        let mut max_x = label_width;
        let mut flush = |line: LineBuf, plan: &mut FlowPlan| -> i32 {
            let mut height = 0;
            if let Some(l) = line.label {
                let size = boxes[l].preferred;
                height = size.1;
                plan.items.push((l, Rect::new(Coord(0, line.top), size)));
            }
            for &(b, x) in &line.items {
                let size = boxes[b].preferred;
                height = height.max(size.1);
                plan.items.push((b, Rect::new(Coord(x, line.top), size)));
            }
            if line.continuation && label_width > 0 {
                plan.spacers.push(Rect::clamped(0, line.top, label_width, height));
            }
            max_x = max_x.max(line.x);
            plan.lines += 1;
            line.top + height
        };

        let spacing = c.line_spacing.max(0);
        for (r, row) in rows.iter().enumerate() {
            if r > 0 {
                y += spacing;
            }
            let mut line = LineBuf::new(y, indent, row.label, false);
            for unit in &row.units {
                let inner = match unit.option {
                    true => c.option_spacing.max(0),
                    false => c.item_spacing.max(0),
                };
                let widths: SmallVec<[i32; 4]> =
                    unit.boxes.iter().map(|&b| boxes[b].preferred.0).collect();
                let unit_w: i32 = widths.iter().sum::<i32>()
                    + inner * (i32::try_from(widths.len()).unwrap_or(1) - 1);
                let gap = c.item_spacing.max(0);

                let overflows = |line: &LineBuf, w: i32| match width {
                    Some(avail) => !line.is_empty() && line.x + gap + w > avail,
                    None => false,
                };
                if overflows(&line, unit_w) {
                    y = flush(line, &mut plan) + spacing;
                    line = LineBuf::new(y, indent, None, true);
                }

                let split = matches!(width, Some(avail) if unit_w > avail - indent);
                for (k, (&b, &w)) in unit.boxes.iter().zip(widths.iter()).enumerate() {
                    let item_gap = if k == 0 { gap } else { inner };
                    if split && !line.is_empty() {
                        if let Some(avail) = width {
                            if line.x + item_gap + w > avail {
                                y = flush(line, &mut plan) + spacing;
                                line = LineBuf::new(y, indent, None, true);
                            }
                        }
                    }
                    line.push(b, item_gap, w);
                }
            }
            y = flush(line, &mut plan);
        }

        plan.size = Size(max_x, y);
        plan.boxes = boxes;
        plan
    }
}
