// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Column plan of a label/edit form

use smallvec::SmallVec;

use crate::config::{LabelPosition, LayoutConfig, SpacingConfig};
use crate::geom::Size;
use crate::node::{Flags, LayoutBox, Role};

/// Spacing currently in effect for one column
///
/// Starts at the configured defaults on every measure pass and may be reduced
/// by the vertical squeeze, never below the configured minimums.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColumnRenderInfo {
    pub vertical: i32,
    pub group: i32,
    pub header_top: i32,
    pub header_bottom: i32,
}

impl ColumnRenderInfo {
    /// Spacing before any squeeze
    pub fn initial(s: &SpacingConfig) -> Self {
        ColumnRenderInfo {
            vertical: s.vertical.initial(),
            group: s.group.initial(),
            header_top: s.header_top.initial(),
            header_bottom: s.header_bottom.initial(),
        }
    }

    /// True if no value is below its configured minimum
    pub fn respects(&self, s: &SpacingConfig) -> bool {
        self.vertical >= s.vertical.floor()
            && self.group >= s.group.floor()
            && self.header_top >= s.header_top.floor()
            && self.header_bottom >= s.header_bottom.floor()
    }
}

/// Number of squeezable vertical gaps of each kind in a column
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GapCount {
    pub vertical: i32,
    pub group: i32,
    /// Header bands; each has a gap above and below
    pub headers: i32,
}

impl GapCount {
    /// Total number of squeezable gaps
    #[inline]
    pub fn total(&self) -> i32 {
        self.vertical + self.group + 2 * self.headers
    }
}

/// One row of a column: a label/edit pair, a lone label or control, or a span
///
/// Indices refer to [`FormPlan::boxes`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormRow {
    pub label: Option<usize>,
    pub edit: Option<usize>,
    /// The edit control occupies the label and edit areas
    pub span: bool,
    /// Controls trailing the edit control
    pub secondaries: SmallVec<[usize; 2]>,
    /// This row starts a group
    pub group_start: bool,
    pub group_title: Option<String>,

    pub label_size: Size,
    pub edit_size: Size,
    /// Width of the secondary chain, including spacing
    pub chain_width: i32,
    pub chain_height: i32,
    pub height: i32,
}

impl FormRow {
    /// True if the row shows a header band
    #[inline]
    pub fn has_header(&self) -> bool {
        self.group_start && self.group_title.is_some()
    }

    /// Width of the edit control plus its secondary chain
    #[inline]
    pub fn edit_extent(&self) -> i32 {
        self.edit_size.0 + self.chain_width
    }

    fn measure(&mut self, boxes: &[LayoutBox], position: LabelPosition, s: &SpacingConfig) {
        let size_of = |i: Option<usize>| i.map(|i| boxes[i].preferred).unwrap_or(Size::ZERO);
        self.label_size = size_of(self.label);
        self.edit_size = size_of(self.edit);
        self.chain_width = 0;
        self.chain_height = 0;
        for &i in &self.secondaries {
            let size = boxes[i].preferred;
            self.chain_width += s.secondary.max(0) + size.0;
            self.chain_height = self.chain_height.max(size.1);
        }

        let edit_h = self.edit_size.1.max(self.chain_height);
        self.height = match position {
            LabelPosition::Top if self.label.is_some() && self.edit.is_some() => {
                self.label_size.1 + s.label_vertical.max(0) + edit_h
            }
            _ => self.label_size.1.max(edit_h),
        };
    }
}

/// One column of a form
#[derive(Clone, Debug, PartialEq)]
pub struct FormColumn {
    pub rows: Vec<FormRow>,
    pub info: ColumnRenderInfo,
    pub gaps: GapCount,
    /// Widest label (label position `Left` only)
    pub label_width: i32,
    /// Widest edit control plus secondary chain
    pub edit_width: i32,
    /// Widest span row
    pub span_width: i32,
    /// Height of rows and header bands, excluding spacing
    pub content_height: i32,
}

impl FormColumn {
    fn new(s: &SpacingConfig) -> Self {
        FormColumn {
            rows: vec![],
            info: ColumnRenderInfo::initial(s),
            gaps: GapCount::default(),
            label_width: 0,
            edit_width: 0,
            span_width: 0,
            content_height: 0,
        }
    }

    /// True if labels form their own column and need label spacing
    #[inline]
    pub fn has_label_gap(&self, position: LabelPosition) -> bool {
        position == LabelPosition::Left && self.label_width > 0 && self.edit_width > 0
    }

    /// Offset of the edit area from the column's left edge
    pub fn edit_offset(&self, position: LabelPosition, label_spacing: i32) -> i32 {
        match self.has_label_gap(position) {
            true => self.label_width + label_spacing,
            false if position == LabelPosition::Left => self.label_width,
            false => 0,
        }
    }

    /// Width of the column
    pub fn width(&self, position: LabelPosition, label_spacing: i32) -> i32 {
        let pairs = match position {
            LabelPosition::Left => self.edit_offset(position, label_spacing) + self.edit_width,
            LabelPosition::Top => self.label_width.max(self.edit_width),
        };
        pairs.max(self.span_width)
    }

    /// Height of the column using the spacing in effect
    pub fn height(&self) -> i32 {
        let i = &self.info;
        self.content_height
            + self.gaps.vertical * i.vertical
            + self.gaps.group * i.group
            + self.gaps.headers * (i.header_top + i.header_bottom)
    }

    fn measure(
        &mut self,
        boxes: &[LayoutBox],
        position: LabelPosition,
        s: &SpacingConfig,
    ) {
        self.gaps = GapCount::default();
        self.label_width = 0;
        self.edit_width = 0;
        self.span_width = 0;
        self.content_height = 0;

        for (n, row) in self.rows.iter_mut().enumerate() {
            row.measure(boxes, position, s);
            if n > 0 {
                match row.group_start {
                    true => self.gaps.group += 1,
                    false => self.gaps.vertical += 1,
                }
            }
            if row.has_header() {
                self.gaps.headers += 1;
                self.content_height += s.header_height.max(0);
            }
            self.content_height += row.height;

            if row.span {
                self.span_width = self.span_width.max(row.edit_extent());
            } else {
                self.label_width = self.label_width.max(row.label_size.0);
                self.edit_width = self.edit_width.max(row.edit_extent());
            }
        }
    }
}

/// The solved layout of a form
///
/// Produced by [`FormSolver`](super::FormSolver) during measure and consumed
/// unchanged by [`FormSetter`](super::FormSetter) during arrange, so both
/// passes use the same effective spacing.
#[derive(Clone, Debug, PartialEq)]
pub struct FormPlan {
    /// Visible children, in order
    pub boxes: Vec<LayoutBox>,
    pub columns: Vec<FormColumn>,
    pub position: LabelPosition,
    /// Effective spacing between columns
    pub column_spacing: i32,
    /// Effective spacing between a label and its edit control
    pub label_spacing: i32,
    /// Render scale applied to all children
    pub scale: f32,
    /// Size before scaling
    pub content: Size,
    /// Size reported to the host (content after scaling)
    pub required: Size,
}

impl FormPlan {
    /// Partition boxes into columns and rows
    ///
    /// A label pairs with the following box unless either side is standalone
    /// or the follower is a label, a span or starts a new column. Secondary
    /// and flow-with-previous boxes trail the previous row's control.
    pub fn partition(boxes: Vec<LayoutBox>, config: &LayoutConfig) -> Self {
        let s = &config.spacing;
        let mut columns = vec![];
        let mut column = FormColumn::new(s);

        let mut i = 0;
        while i < boxes.len() {
            let b = &boxes[i];
            if b.has(Flags::COLUMN_BREAK) && !column.rows.is_empty() {
                columns.push(std::mem::replace(&mut column, FormColumn::new(s)));
            }

            let trails = b.role == Role::Secondary || b.has(Flags::FLOW_WITH_PREVIOUS);
            if trails && !b.has(Flags::COLUMN_BREAK) {
                if let Some(row) = column.rows.last_mut().filter(|r| r.edit.is_some()) {
                    row.secondaries.push(i);
                    i += 1;
                    continue;
                }
            }

            let mut row = FormRow {
                group_start: b.has(Flags::GROUP_BREAK),
                group_title: b.group_title.clone(),
                ..Default::default()
            };
            if b.role == Role::Span || b.has(Flags::SPAN_FULL_WIDTH) {
                row.edit = Some(i);
                row.span = true;
            } else if b.role == Role::Label {
                row.label = Some(i);
                let next = boxes.get(i + 1).filter(|next| pairs_with_label(next));
                if let Some(next) = next.filter(|_| !b.has(Flags::STANDALONE_LABEL)) {
                    i += 1;
                    row.edit = Some(i);
                    if next.has(Flags::GROUP_BREAK) && !row.group_start {
                        row.group_start = true;
                        row.group_title = next.group_title.clone();
                    }
                }
            } else {
                row.edit = Some(i);
            }
            column.rows.push(row);
            i += 1;
        }
        if !column.rows.is_empty() {
            columns.push(column);
        }

        let mut plan = FormPlan {
            boxes,
            columns,
            position: config.label_position,
            column_spacing: s.column.initial(),
            label_spacing: s.label.initial(),
            scale: 1.0,
            content: Size::ZERO,
            required: Size::ZERO,
        };
        plan.measure(s);
        plan
    }

    /// Reset effective spacing to the configured defaults
    pub fn reset_spacing(&mut self, s: &SpacingConfig) {
        self.column_spacing = s.column.initial();
        self.label_spacing = s.label.initial();
        for column in &mut self.columns {
            column.info = ColumnRenderInfo::initial(s);
        }
    }

    /// Recompute row and column metrics, then the content size
    pub fn measure(&mut self, s: &SpacingConfig) {
        for column in &mut self.columns {
            column.measure(&self.boxes, self.position, s);
        }
        self.update_content();
    }

    /// Recompute the content size from column metrics and effective spacing
    pub fn update_content(&mut self) {
        self.content = Size(self.width(), self.height());
    }

    /// Total width using the spacing in effect
    pub fn width(&self) -> i32 {
        let n = i32::try_from(self.columns.len()).unwrap_or(i32::MAX);
        let cols: i32 = self
            .columns
            .iter()
            .map(|c| c.width(self.position, self.label_spacing))
            .sum();
        cols + (n - 1).max(0) * self.column_spacing
    }

    /// Height of the tallest column
    pub fn height(&self) -> i32 {
        self.columns.iter().map(|c| c.height()).max().unwrap_or(0)
    }

    /// Number of columns with a label gap
    pub fn label_gaps(&self) -> i32 {
        let n = self
            .columns
            .iter()
            .filter(|c| c.has_label_gap(self.position))
            .count();
        i32::try_from(n).unwrap_or(i32::MAX)
    }

    /// Merge the rightmost column into its left neighbour
    ///
    /// The first moved row starts a group. Metrics are stale afterwards; call
    /// [`Self::reset_spacing`] and [`Self::measure`]. Returns false if there
    /// is only one column.
    pub fn merge_last_column(&mut self) -> bool {
        if self.columns.len() < 2 {
            return false;
        }
        let Some(mut last) = self.columns.pop() else {
            return false;
        };
        if let Some(first) = last.rows.first_mut() {
            first.group_start = true;
        }
        if let Some(target) = self.columns.last_mut() {
            target.rows.append(&mut last.rows);
        }
        true
    }

    /// Iterate over the child index of every box in the plan
    pub fn child_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.boxes.iter().map(|b| b.index)
    }
}

fn pairs_with_label(next: &LayoutBox) -> bool {
    !(next.role == Role::Label
        || next.role == Role::Span
        || next.has(Flags::STANDALONE_EDIT)
        || next.has(Flags::SPAN_FULL_WIDTH)
        || next.has(Flags::COLUMN_BREAK))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::node::FixedNode;

    fn plan(children: &mut [FixedNode]) -> FormPlan {
        FormPlan::partition(LayoutBox::collect(children), &LayoutConfig::default())
    }

    #[test]
    fn pairs_and_columns() {
        let mut children = vec![
            FixedNode::label(20, 20),
            FixedNode::new(20, 20),
            FixedNode::label(30, 20).with_flags(Flags::COLUMN_BREAK),
            FixedNode::new(20, 25),
        ];
        let plan = plan(&mut children);
        assert_eq!(plan.columns.len(), 2);
        let row = &plan.columns[1].rows[0];
        assert_eq!((row.label, row.edit), (Some(2), Some(3)));
        assert_eq!(row.height, 25);
        assert_eq!(plan.columns[0].width(plan.position, 5), 45);
        assert_eq!(plan.content, Size(45 + 5 + 55, 25));
    }

    #[test]
    fn standalone_and_secondary() {
        let mut children = vec![
            FixedNode::label(20, 10).with_flags(Flags::STANDALONE_LABEL),
            FixedNode::new(20, 10),
            FixedNode::new(8, 12).with_role(Role::Secondary),
            FixedNode::new(8, 10).with_flags(Flags::FLOW_WITH_PREVIOUS),
            FixedNode::new(50, 10).with_role(Role::Span),
        ];
        let plan = plan(&mut children);
        let rows = &plan.columns[0].rows;
        assert_eq!(rows.len(), 3);
        assert_eq!((rows[0].label, rows[0].edit), (Some(0), None));
        assert_eq!(rows[1].secondaries.as_slice(), &[2, 3]);
        assert_eq!(rows[1].chain_width, 4 + 8 + 4 + 8);
        assert_eq!(rows[1].height, 12);
        assert!(rows[2].span);
    }

    #[test]
    fn label_never_pairs_with_standalone_edit() {
        let mut children = vec![
            FixedNode::label(20, 10),
            FixedNode::new(20, 10).with_flags(Flags::STANDALONE_EDIT),
        ];
        let plan = plan(&mut children);
        assert_eq!(plan.columns[0].rows.len(), 2);
    }

    #[test]
    fn groups_and_headers_count_gaps() {
        let mut children = vec![
            FixedNode::label(20, 10).with_group("General"),
            FixedNode::new(20, 10),
            FixedNode::label(20, 10),
            FixedNode::new(20, 10),
            FixedNode::label(20, 10).with_flags(Flags::GROUP_BREAK),
            FixedNode::new(20, 10),
        ];
        let plan = plan(&mut children);
        let column = &plan.columns[0];
        assert_eq!(column.gaps, GapCount {
            vertical: 1,
            group: 1,
            headers: 1
        });
        // rows 30, header band 20, spacing 5 + 15 + 8 + 4
        assert_eq!(column.height(), 30 + 20 + 5 + 15 + 8 + 4);
    }

    #[test]
    fn merge_forces_group_break() {
        let mut children = vec![
            FixedNode::new(20, 10),
            FixedNode::new(20, 10).with_flags(Flags::COLUMN_BREAK),
        ];
        let mut plan = plan(&mut children);
        assert!(plan.merge_last_column());
        assert!(!plan.merge_last_column());
        assert!(plan.columns[0].rows[1].group_start);
    }

    #[test]
    fn empty_plan_is_zero() {
        let plan = plan(&mut []);
        assert!(plan.columns.is_empty());
        assert_eq!(plan.content, Size::ZERO);
    }
}
