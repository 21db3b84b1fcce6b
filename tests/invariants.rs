// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Properties which must hold for any input

use panes::config::{BladeOverflow, Spacing};
use panes::layout::{FormPlan, FormSolver};
use panes::node::TileMode;
use panes::prelude::*;

const SIZES: [(i32, i32); 7] = [
    (800, 600),
    (300, 200),
    (160, 120),
    (100, 60),
    (40, 30),
    (1, 1),
    (0, 0),
];

fn form_children() -> Vec<FixedNode> {
    vec![
        FixedNode::label(60, 18).with_group("General"),
        FixedNode::new(120, 22),
        FixedNode::label(40, 18),
        FixedNode::new(80, 18),
        FixedNode::new(20, 18).with_role(Role::Secondary),
        FixedNode::new(200, 24).with_role(Role::Span),
        FixedNode::label(50, 18)
            .with_flags(Flags::COLUMN_BREAK)
            .with_group("Layout"),
        FixedNode::new(100, 30),
        FixedNode::label(30, 18),
        FixedNode::new(60, 18),
        FixedNode::label(30, 18).with_group("Other"),
        FixedNode::new(60, 18),
    ]
}

fn solve(config: &LayoutConfig, avail: AvailableSize) -> FormPlan {
    let mut children = form_children();
    FormSolver::new(config).solve(LayoutBox::collect(&mut children), avail, 1.0)
}

fn config(policy: SqueezePolicy) -> LayoutConfig {
    let mut config = LayoutConfig::default();
    config.squeeze.policy = policy;
    config
}

const POLICIES: [SqueezePolicy; 3] = [
    SqueezePolicy::None,
    SqueezePolicy::Scale,
    SqueezePolicy::Reflow,
];

#[test]
fn spacing_never_below_minimum() {
    for policy in POLICIES {
        let config = config(policy);
        let s = &config.spacing;
        for (w, h) in SIZES {
            let plan = solve(&config, AvailableSize(Some(w), Some(h)));
            assert!(plan.column_spacing >= s.column.min, "{policy:?} at {w}x{h}");
            assert!(plan.label_spacing >= s.label.min, "{policy:?} at {w}x{h}");
            for column in &plan.columns {
                assert!(column.info.respects(s), "{policy:?} at {w}x{h}");
            }
        }
    }
}

#[test]
fn malformed_spacing_is_repaired() {
    let mut config = LayoutConfig::default();
    config.spacing.vertical = Spacing::new(1, 6);
    let mut form = EditForm::new(config);
    let mut children = vec![FixedNode::new(10, 10), FixedNode::new(10, 10)];
    let rect = Rect::new(Coord::ZERO, Size(100, 100));
    let required = layout(&mut form, &mut children, rect);
    assert_eq!(required.1, 10 + 6 + 10);
}

#[test]
fn form_rects_are_non_negative() {
    for policy in POLICIES {
        for (w, h) in SIZES {
            let mut form = EditForm::new(config(policy));
            let mut children = form_children();
            let rect = Rect::new(Coord::ZERO, Size(w, h));
            layout(&mut form, &mut children, rect);
            for child in &children {
                let size = child.rect().size;
                assert!(size.0 >= 0 && size.1 >= 0, "{policy:?} at {w}x{h}");
            }
            for group in form.regions().groups() {
                assert!(group.rect.size.0 >= 0 && group.rect.size.1 >= 0);
            }
        }
    }
}

#[test]
fn layout_is_idempotent() {
    for (w, h) in SIZES {
        let mut form = EditForm::default();
        let mut children = form_children();
        let rect = Rect::new(Coord(10, 20), Size(w, h));
        let first_size = layout(&mut form, &mut children, rect);
        let first: Vec<_> = children.iter().map(|c| c.placement).collect();
        let second_size = layout(&mut form, &mut children, rect);
        let second: Vec<_> = children.iter().map(|c| c.placement).collect();
        assert_eq!(first_size, second_size, "at {w}x{h}");
        assert_eq!(first, second, "at {w}x{h}");
    }
}

#[test]
fn shrinking_never_grows_the_requirement() {
    for policy in [SqueezePolicy::None, SqueezePolicy::Scale] {
        let config = config(policy);
        let unbounded = solve(&config, AvailableSize::UNBOUNDED).required;

        let mut last = unbounded.0;
        for w in (0..=unbounded.0 + 20).rev().step_by(7) {
            let required = solve(&config, AvailableSize(Some(w), None)).required;
            assert!(required.0 <= last, "{policy:?}: width {w}");
            last = required.0;
        }

        let mut last = unbounded.1;
        for h in (0..=unbounded.1 + 20).rev().step_by(5) {
            let required = solve(&config, AvailableSize(None, Some(h))).required;
            assert!(required.1 <= last, "{policy:?}: height {h}");
            last = required.1;
        }
    }
}

#[test]
fn other_panels_never_place_negative_rects() {
    for (w, h) in SIZES {
        let rect = Rect::new(Coord::ZERO, Size(w, h));
        let check = |children: &[FixedNode]| {
            for child in children {
                let size = child.rect().size;
                assert!(size.0 >= 0 && size.1 >= 0, "at {w}x{h}");
            }
        };

        let mut children = form_children();
        layout(&mut PropertySheet::default(), &mut children, rect);
        check(&children);

        let mut children = form_children();
        layout(&mut FlowPanel::default(), &mut children, rect);
        check(&children);

        let mut children = vec![
            FixedNode::new(1, 1).with_tile_mode(TileMode::Double),
            FixedNode::new(1, 1).with_tile_mode(TileMode::Tiny),
        ];
        layout(&mut MetroPanel::default(), &mut children, rect);
        check(&children);

        for overflow in [BladeOverflow::Scroll, BladeOverflow::Stack] {
            let mut panel = BladePanel::default();
            let _ = panel.set_overflow(overflow);
            let mut children = vec![FixedNode::new(120, 80), FixedNode::new(90, 60)];
            layout(&mut panel, &mut children, rect);
            check(&children);
            for header in panel.regions().headers() {
                assert!(header.rect.size.0 >= 0 && header.rect.size.1 >= 0);
            }
        }

        let mut dock = DockPanel::default();
        for well in [Well::Left, Well::Right, Well::Top, Well::Main] {
            dock.add(well, FixedNode::new(50, 50)).unwrap();
        }
        let _ = dock.measure(AvailableSize::bounded(rect.size));
        let _ = dock.arrange(rect);
        for well in [Well::Left, Well::Right, Well::Top, Well::Main] {
            let r = dock.well_rect(well).unwrap_or(Rect::ZERO);
            assert!(r.size.0 >= 0 && r.size.1 >= 0, "{well} at {w}x{h}");
        }
    }
}
