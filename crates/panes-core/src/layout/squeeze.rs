// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Elastic squeeze steps
//!
//! Each step is monotonic: it never increases the size on its axis.

use super::plan::{ColumnRenderInfo, FormColumn, FormPlan};
use crate::cast::Conv;
use crate::config::{SpacingConfig, SqueezeConfig};
use crate::geom::{AvailableSize, Size};

/// Ceiling division of positive `excess` over `n > 0` gaps
#[inline]
fn per_gap(excess: i32, n: i32) -> i32 {
    debug_assert!(excess > 0 && n > 0);
    (excess + n - 1) / n
}

#[inline]
fn reduce(value: i32, by: i32, floor: i32) -> i32 {
    (value - by).max(floor).min(value)
}

/// Reduce the vertical spacing of a column until it fits `avail`
///
/// The excess is distributed evenly over the squeezable gaps present in the
/// column; each spacing is clamped to its configured minimum. A column
/// without squeezable gaps is left unchanged. Returns true if any spacing was
/// reduced.
pub fn squeeze_vertical(column: &mut FormColumn, avail: i32, s: &SpacingConfig) -> bool {
    let start = column.info;
    loop {
        let excess = column.height() - avail;
        let n = column.gaps.total();
        if excess <= 0 || n == 0 {
            break;
        }
        let by = per_gap(excess, n);
        let i = column.info;
        let g = column.gaps;
        let next = ColumnRenderInfo {
            vertical: match g.vertical > 0 {
                true => reduce(i.vertical, by, s.vertical.floor()),
                false => i.vertical,
            },
            group: match g.group > 0 {
                true => reduce(i.group, by, s.group.floor()),
                false => i.group,
            },
            header_top: match g.headers > 0 {
                true => reduce(i.header_top, by, s.header_top.floor()),
                false => i.header_top,
            },
            header_bottom: match g.headers > 0 {
                true => reduce(i.header_bottom, by, s.header_bottom.floor()),
                false => i.header_bottom,
            },
        };
        if next == i {
            break;
        }
        column.info = next;
    }
    column.info != start
}

/// Reduce column and label spacing until the plan fits `avail`
///
/// Returns true if any spacing was reduced.
pub fn squeeze_horizontal(plan: &mut FormPlan, avail: i32, s: &SpacingConfig) -> bool {
    let start = (plan.column_spacing, plan.label_spacing);
    let column_gaps = i32::try_from(plan.columns.len()).unwrap_or(i32::MAX) - 1;
    loop {
        let excess = plan.width() - avail;
        let label_gaps = plan.label_gaps();
        let n = column_gaps.max(0) + label_gaps;
        if excess <= 0 || n == 0 {
            break;
        }
        let by = per_gap(excess, n);
        let column = match column_gaps > 0 {
            true => reduce(plan.column_spacing, by, s.column.floor()),
            false => plan.column_spacing,
        };
        let label = match label_gaps > 0 {
            true => reduce(plan.label_spacing, by, s.label.floor()),
            false => plan.label_spacing,
        };
        if (column, label) == (plan.column_spacing, plan.label_spacing) {
            break;
        }
        plan.column_spacing = column;
        plan.label_spacing = label;
    }
    (plan.column_spacing, plan.label_spacing) != start
}

/// Compute the render scale for `content` within `available`
///
/// The target is `max(min(aw / rw, ah / rh), min_scale_factor)`, never above
/// 1. Unbounded or empty axes do not constrain the factor. The target is
/// adopted only if it differs from `previous` by more than the configured
/// hysteresis; otherwise `previous` is kept.
pub fn scale_factor(
    content: Size,
    available: AvailableSize,
    config: &SqueezeConfig,
    previous: f32,
) -> f32 {
    let ratio = |required: i32, avail: Option<i32>| match avail {
        Some(avail) if required > 0 => f32::conv(avail.max(0)) / f32::conv(required),
        _ => 1.0,
    };
    let fit = ratio(content.0, available.0).min(ratio(content.1, available.1));
    let target = fit.max(config.min_scale_factor).min(1.0);
    if (target - previous).abs() > config.scale_hysteresis {
        target
    } else {
        previous
    }
}
