// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Form solver (measure pass)

use std::time::Instant;

use super::plan::FormPlan;
use super::squeeze::{scale_factor, squeeze_horizontal, squeeze_vertical};
use crate::config::{LayoutConfig, SqueezePolicy};
use crate::geom::AvailableSize;
use crate::node::LayoutBox;

/// Measure-pass solver for label/edit forms
///
/// The solver runs the elastic squeeze ladder over a freshly partitioned
/// [`FormPlan`]:
///
/// 1.  reduce vertical spacing per column toward the minimums
/// 2.  reduce column and label spacing toward the minimums
/// 3.  with [`SqueezePolicy::Reflow`], merge the rightmost column into its
///     neighbour while the width still overflows, repeating steps 1 and 2
/// 4.  with [`SqueezePolicy::Scale`], compute a render scale
///
/// Content which still does not fit is accepted: the plan reports its
/// oversized requirement and scrolling compensates.
pub struct FormSolver<'a> {
    config: &'a LayoutConfig,
}

impl<'a> FormSolver<'a> {
    /// Construct
    #[inline]
    pub fn new(config: &'a LayoutConfig) -> Self {
        FormSolver { config }
    }

    /// Solve for `boxes` within `available`
    ///
    /// `previous_scale` is the factor of the last solved plan (1.0 if none);
    /// it is kept unless the new factor differs by more than the hysteresis.
    pub fn solve(
        &self,
        boxes: Vec<LayoutBox>,
        available: AvailableSize,
        previous_scale: f32,
    ) -> FormPlan {
        let time = Instant::now();
        let config = self.config;
        let mut plan = FormPlan::partition(boxes, config);
        self.fit(&mut plan, available);

        let reflow_width = match config.squeeze.policy {
            SqueezePolicy::Reflow => available.0,
            _ => None,
        };
        if let Some(avail) = reflow_width {
            while plan.content.0 > avail && plan.merge_last_column() {
                plan.reset_spacing(&config.spacing);
                plan.measure(&config.spacing);
                self.fit(&mut plan, available);
                log::debug!(
                    "FormSolver::solve: reflow to {} columns, content={:?}",
                    plan.columns.len(),
                    plan.content
                );
            }
        }

        plan.scale = match config.squeeze.policy {
            SqueezePolicy::Scale => {
                scale_factor(plan.content, available, &config.squeeze, previous_scale)
            }
            _ => 1.0,
        };
        if plan.scale != previous_scale {
            log::debug!(
                "FormSolver::solve: scale {previous_scale} -> {}",
                plan.scale
            );
        }
        plan.required = plan.content.scale_ceil(plan.scale);

        log::trace!(
            target: "panes_perf::layout::form",
            "solve: {}µs ({} boxes)",
            time.elapsed().as_micros(),
            plan.boxes.len()
        );
        plan
    }

    /// Apply the spacing steps of the ladder
    fn fit(&self, plan: &mut FormPlan, available: AvailableSize) {
        let s = &self.config.spacing;
        if let Some(avail) = available.1 {
            for (n, column) in plan.columns.iter_mut().enumerate() {
                if squeeze_vertical(column, avail, s) {
                    log::debug!(
                        "FormSolver::fit: column {n} vertical spacing -> {:?}",
                        column.info
                    );
                }
            }
        }
        if let Some(avail) = available.0 {
            if squeeze_horizontal(plan, avail, s) {
                log::debug!(
                    "FormSolver::fit: column spacing -> {}, label spacing -> {}",
                    plan.column_spacing,
                    plan.label_spacing
                );
            }
        }
        plan.update_content();
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::{LabelPosition, Spacing};
    use crate::geom::Size;
    use crate::node::{FixedNode, Flags};

    fn two_columns() -> Vec<FixedNode> {
        vec![
            FixedNode::label(20, 20),
            FixedNode::new(20, 20),
            FixedNode::label(20, 20),
            FixedNode::new(20, 20),
            FixedNode::label(20, 20).with_flags(Flags::COLUMN_BREAK),
            FixedNode::new(20, 20),
            FixedNode::label(20, 20),
            FixedNode::new(20, 20),
        ]
    }

    fn solve(config: &LayoutConfig, children: &mut [FixedNode], avail: AvailableSize) -> FormPlan {
        FormSolver::new(config).solve(LayoutBox::collect(children), avail, 1.0)
    }

    #[test]
    fn unconstrained() {
        let config = LayoutConfig::default();
        let plan = solve(&config, &mut two_columns(), AvailableSize::UNBOUNDED);
        assert_eq!(plan.required, Size(45 + 5 + 45, 45));
        assert_eq!(plan.scale, 1.0);
    }

    #[test]
    fn reflow_merges_columns() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut config = LayoutConfig::default();
        config.squeeze.policy = SqueezePolicy::Reflow;
        let plan = solve(&config, &mut two_columns(), AvailableSize(Some(60), None));
        assert_eq!(plan.columns.len(), 1);
        assert_eq!(plan.columns[0].rows.len(), 4);
        assert!(plan.columns[0].rows[2].group_start);
        // 4 rows, 2 vertical gaps, 1 group gap
        assert_eq!(plan.required, Size(45, 80 + 10 + 15));
    }

    #[test]
    fn reflow_stops_at_one_column() {
        let mut config = LayoutConfig::default();
        config.squeeze.policy = SqueezePolicy::Reflow;
        let plan = solve(&config, &mut two_columns(), AvailableSize(Some(10), None));
        assert_eq!(plan.columns.len(), 1);
        assert!(plan.required.0 > 10);
        assert_eq!(plan.label_spacing, config.spacing.label.min);
    }

    #[test]
    fn scale_applies_after_spacing() {
        let mut config = LayoutConfig::default();
        config.squeeze.policy = SqueezePolicy::Scale;
        config.spacing.column = Spacing::fixed(5);
        config.spacing.label = Spacing::fixed(5);
        let plan = solve(&config, &mut two_columns(), AvailableSize(Some(50), None));
        assert_eq!(plan.scale, 0.75);
        assert_eq!(plan.content, Size(95, 45));
        assert_eq!(plan.required, Size(72, 34));
    }

    #[test]
    fn label_top() {
        let mut config = LayoutConfig::default();
        config.label_position = LabelPosition::Top;
        let plan = solve(&config, &mut two_columns(), AvailableSize::UNBOUNDED);
        // each row: 20 + 2 + 20
        assert_eq!(plan.required, Size(20 + 5 + 20, 42 * 2 + 5));
    }

    #[test]
    fn resolve_is_idempotent() {
        let mut config = LayoutConfig::default();
        config.squeeze.policy = SqueezePolicy::Scale;
        let avail = AvailableSize(Some(80), Some(40));
        let mut children = two_columns();
        let a = solve(&config, &mut children, avail);
        let b = FormSolver::new(&config).solve(LayoutBox::collect(&mut children), avail, a.scale);
        assert_eq!(a, b);
    }
}
