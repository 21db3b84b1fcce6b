// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Layout configuration
//!
//! All values are in physical pixels unless noted otherwise. Every squeezable
//! spacing is a [`Spacing`]: a configured default plus the minimum the elastic
//! squeeze may reduce it to.
//!
//! Configuration is serialisable with `feature = "serde"` and may be read from
//! or written to a file using [`Format`] (requires the feature of the chosen
//! format).

mod format;

pub use format::{Error, Format};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A squeezable spacing: default value and lower bound
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Spacing {
    pub default: i32,
    pub min: i32,
}

impl Spacing {
    /// Construct
    #[inline]
    pub const fn new(default: i32, min: i32) -> Self {
        Spacing { default, min }
    }

    /// A fixed spacing (not squeezable)
    #[inline]
    pub const fn fixed(value: i32) -> Self {
        Spacing::new(value, value)
    }

    /// The value used before any squeeze
    ///
    /// This is never less than [`Self::min`] nor less than zero.
    #[inline]
    pub fn initial(self) -> i32 {
        self.default.max(self.min).max(0)
    }

    /// The lower bound, never negative
    #[inline]
    pub fn floor(self) -> i32 {
        self.min.max(0)
    }

    fn repair(&mut self, name: &str) {
        if self.min < 0 {
            log::warn!("Spacing::repair: {name}.min = {} is negative; using 0", self.min);
            self.min = 0;
        }
        if self.default < self.min {
            log::warn!(
                "Spacing::repair: {name}.default = {} < min = {}; raising default",
                self.default,
                self.min
            );
            self.default = self.min;
        }
    }
}

/// Position of a label relative to its edit control
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LabelPosition {
    /// Label and edit share one row; labels form their own column
    #[default]
    Left,
    /// Label is stacked above the edit control
    Top,
}

/// Strategy applied when spacing reduction alone cannot fit the content
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SqueezePolicy {
    /// Accept overflow (scrolling compensates)
    #[default]
    None,
    /// Apply a uniform render scale, clamped to a minimum factor
    Scale,
    /// Merge columns right-to-left until the content fits
    Reflow,
}

/// Behaviour of a blade panel whose blades exceed the available width
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BladeOverflow {
    /// Lay out blades side by side and scroll horizontally
    #[default]
    Scroll,
    /// Keep the last blade fully visible, overlapping (and clipping) earlier blades
    Stack,
}

/// Spacing configuration shared by the column-based panels
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct SpacingConfig {
    /// Between consecutive rows of a column
    pub vertical: Spacing,
    /// Before a group which follows another group in the same column
    pub group: Spacing,
    /// Above a group header band
    pub header_top: Spacing,
    /// Below a group header band
    pub header_bottom: Spacing,
    /// Between columns
    pub column: Spacing,
    /// Between a label and its edit control (label position `Left`)
    pub label: Spacing,
    /// Between a label and its edit control (label position `Top`)
    pub label_vertical: i32,
    /// Between an edit control and each following secondary control
    pub secondary: i32,
    /// Height of a group header band
    pub header_height: i32,
    /// Maximum downwards shift of a label beside a taller edit control
    pub label_offset: i32,
    /// Margin of a group background above its first row
    pub group_margin_top: i32,
    /// Margin of a group background below its last row
    pub group_margin_bottom: i32,
}

impl Default for SpacingConfig {
    fn default() -> Self {
        SpacingConfig {
            vertical: Spacing::new(5, 1),
            group: Spacing::new(15, 4),
            header_top: Spacing::new(8, 2),
            header_bottom: Spacing::new(4, 1),
            column: Spacing::new(5, 2),
            label: Spacing::new(5, 2),
            label_vertical: 2,
            secondary: 4,
            header_height: 20,
            label_offset: 3,
            group_margin_top: 4,
            group_margin_bottom: 4,
        }
    }
}

/// Elastic squeeze configuration
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct SqueezeConfig {
    pub policy: SqueezePolicy,
    /// Lower bound on the render scale (policy `Scale`)
    pub min_scale_factor: f32,
    /// A new scale factor is adopted only if it differs by more than this
    pub scale_hysteresis: f32,
}

impl Default for SqueezeConfig {
    fn default() -> Self {
        SqueezeConfig {
            policy: SqueezePolicy::None,
            min_scale_factor: 0.75,
            scale_hysteresis: 0.01,
        }
    }
}

/// Scroll bar configuration
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct ScrollConfig {
    /// Space taken from the viewport by a visible bar
    pub bar_thickness: i32,
    /// Added to the maximum offset of a visible bar
    pub platform_correction: i32,
    /// Offset change of a single scroll step
    pub small_step: i32,
    /// Visibility toggles allowed per layout cycle before further toggles are suppressed
    pub max_toggles: u32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        ScrollConfig {
            bar_thickness: 16,
            platform_correction: 0,
            small_step: 16,
            max_toggles: 2,
        }
    }
}

/// Dock panel configuration
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct DockConfig {
    /// Pointer movement on a tab beyond which a drag undocks the element
    pub tab_drag_threshold: i32,
    /// Width (or height) of a splitter hot area
    pub splitter_thickness: i32,
    /// Height of the tab strip of a well with more than one element
    pub tab_height: i32,
    /// Height of a well's title band (only with a header renderer)
    pub header_height: i32,
    /// Space a width splitter must leave for the opposite well
    pub min_width_gap: i32,
    /// Space a height splitter must leave for the opposite well
    pub min_height_gap: i32,
    /// Initial width of the left and right wells
    pub side_width: i32,
    /// Initial height of the top and bottom wells
    pub side_height: i32,
}

impl Default for DockConfig {
    fn default() -> Self {
        DockConfig {
            tab_drag_threshold: 20,
            splitter_thickness: 6,
            tab_height: 24,
            header_height: 22,
            min_width_gap: 25,
            min_height_gap: 40,
            side_width: 175,
            side_height: 150,
        }
    }
}

/// Tile grid configuration
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct TileConfig {
    /// Edge length of a normal (square) tile
    pub cell: i32,
    /// Gap between tiles
    pub spacing: i32,
    /// Width of a group, in normal cells
    pub group_columns: u32,
    /// Gap between groups
    pub group_spacing: i32,
    /// Height of the group title band
    pub header_height: i32,
}

impl Default for TileConfig {
    fn default() -> Self {
        TileConfig {
            cell: 120,
            spacing: 8,
            group_columns: 4,
            group_spacing: 40,
            header_height: 30,
        }
    }
}

/// Flow row configuration
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct FlowConfig {
    /// Between ordinary controls of a row
    pub item_spacing: i32,
    /// Between check-box or radio-button controls of an option group
    pub option_spacing: i32,
    /// Between the label column and the first control
    pub label_spacing: i32,
    /// Between lines
    pub line_spacing: i32,
}

impl Default for FlowConfig {
    fn default() -> Self {
        FlowConfig {
            item_spacing: 8,
            option_spacing: 12,
            label_spacing: 5,
            line_spacing: 4,
        }
    }
}

/// Property sheet configuration
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct SheetConfig {
    /// Minimum row height
    pub row_height: i32,
    /// Initial share of the width given to the label column
    pub label_fraction: f32,
    /// Minimum width of either column when dragging the splitter
    pub min_column: i32,
    /// Height of a group header band
    pub header_height: i32,
    /// Width of the label/value splitter hot area
    pub splitter_thickness: i32,
}

impl Default for SheetConfig {
    fn default() -> Self {
        SheetConfig {
            row_height: 22,
            label_fraction: 0.4,
            min_column: 40,
            header_height: 22,
            splitter_thickness: 5,
        }
    }
}

/// Blade panel configuration
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct BladeConfig {
    pub overflow: BladeOverflow,
    /// Height of the title band of each blade
    pub header_height: i32,
    /// Edge length of the close button hot area
    pub close_size: i32,
    /// Gap between blades (policy `Scroll` only)
    pub spacing: i32,
}

impl Default for BladeConfig {
    fn default() -> Self {
        BladeConfig {
            overflow: BladeOverflow::Scroll,
            header_height: 28,
            close_size: 16,
            spacing: 0,
        }
    }
}

/// Layout configuration
///
/// This is serializable (using `feature = "serde"`) with the following fields:
///
/// > `label_position`: [`LabelPosition`] \
/// > `stretch_edits`: `bool` \
/// > `spacing`: [`SpacingConfig`] \
/// > `squeeze`: [`SqueezeConfig`] \
/// > `scroll`: [`ScrollConfig`] \
/// > `dock`: [`DockConfig`] \
/// > `tiles`: [`TileConfig`] \
/// > `flow`: [`FlowConfig`] \
/// > `sheet`: [`SheetConfig`] \
/// > `blades`: [`BladeConfig`]
///
/// Missing fields take their default values.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LayoutConfig {
    #[cfg_attr(feature = "serde", serde(default))]
    pub label_position: LabelPosition,

    #[cfg_attr(feature = "serde", serde(default = "defaults::stretch_edits"))]
    pub stretch_edits: bool,

    #[cfg_attr(feature = "serde", serde(default))]
    pub spacing: SpacingConfig,
    #[cfg_attr(feature = "serde", serde(default))]
    pub squeeze: SqueezeConfig,
    #[cfg_attr(feature = "serde", serde(default))]
    pub scroll: ScrollConfig,
    #[cfg_attr(feature = "serde", serde(default))]
    pub dock: DockConfig,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tiles: TileConfig,
    #[cfg_attr(feature = "serde", serde(default))]
    pub flow: FlowConfig,
    #[cfg_attr(feature = "serde", serde(default))]
    pub sheet: SheetConfig,
    #[cfg_attr(feature = "serde", serde(default))]
    pub blades: BladeConfig,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            label_position: LabelPosition::default(),
            stretch_edits: defaults::stretch_edits(),
            spacing: SpacingConfig::default(),
            squeeze: SqueezeConfig::default(),
            scroll: ScrollConfig::default(),
            dock: DockConfig::default(),
            tiles: TileConfig::default(),
            flow: FlowConfig::default(),
            sheet: SheetConfig::default(),
            blades: BladeConfig::default(),
        }
    }
}

impl LayoutConfig {
    /// Repair inconsistent values
    ///
    /// Each spacing default below its minimum is raised to that minimum;
    /// factors are clamped into their meaningful range. Repairs are logged at
    /// `warn` level. Returns `self` for chaining.
    pub fn validate(mut self) -> Self {
        let s = &mut self.spacing;
        s.vertical.repair("vertical");
        s.group.repair("group");
        s.header_top.repair("header_top");
        s.header_bottom.repair("header_bottom");
        s.column.repair("column");
        s.label.repair("label");

        let q = &mut self.squeeze;
        if !(q.min_scale_factor > 0.0 && q.min_scale_factor <= 1.0) {
            log::warn!(
                "LayoutConfig::validate: min_scale_factor = {} out of range; using 1.0",
                q.min_scale_factor
            );
            q.min_scale_factor = 1.0;
        }
        q.scale_hysteresis = q.scale_hysteresis.max(0.0);

        let f = &mut self.sheet.label_fraction;
        if !(*f > 0.0 && *f < 1.0) {
            log::warn!("LayoutConfig::validate: label_fraction = {f} out of range; using 0.4");
            *f = 0.4;
        }
        if self.tiles.group_columns == 0 {
            log::warn!("LayoutConfig::validate: group_columns = 0; using 1");
            self.tiles.group_columns = 1;
        }
        self
    }

    /// Load from a file, guessing the format from the extension
    #[cfg(feature = "serde")]
    pub fn load(path: &std::path::Path) -> Result<Self, Error> {
        let config: LayoutConfig = Format::guess_and_read_path(path)?;
        Ok(config.validate())
    }

    /// Save to a file, choosing the format from the extension
    #[cfg(feature = "serde")]
    pub fn save(&self, path: &std::path::Path) -> Result<(), Error> {
        Format::guess_from_path(path).write_path(path, self)
    }
}

mod defaults {
    pub fn stretch_edits() -> bool {
        true
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn validate_lifts_defaults() {
        let mut config = LayoutConfig::default();
        config.spacing.vertical = Spacing::new(1, 4);
        config.spacing.column = Spacing::new(6, -3);
        config.squeeze.min_scale_factor = 0.0;
        let config = config.validate();
        assert_eq!(config.spacing.vertical, Spacing::new(4, 4));
        assert_eq!(config.spacing.column, Spacing::new(6, 0));
        assert_eq!(config.squeeze.min_scale_factor, 1.0);
    }

    #[test]
    fn validate_keeps_single_tile_column() {
        let mut config = LayoutConfig::default();
        config.tiles.group_columns = 1;
        assert_eq!(config.clone().validate().tiles.group_columns, 1);
        config.tiles.group_columns = 0;
        assert_eq!(config.validate().tiles.group_columns, 1);
    }

    #[test]
    fn initial_respects_min() {
        assert_eq!(Spacing::new(2, 5).initial(), 5);
        assert_eq!(Spacing::fixed(3).floor(), 3);
    }
}
