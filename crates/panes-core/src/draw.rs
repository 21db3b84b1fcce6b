// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Drawing capabilities required from the host
//!
//! Panels do not render children; they only draw their own decorations
//! (group backgrounds, header bands, splitter and scroll bar tracks) through
//! the host's [`Canvas`]. Header bands are delegated to an optional
//! [`HeaderRenderer`] plug-in; without one, headers are simply not drawn.

use crate::Action;
use crate::event::HeaderEvent;
use crate::geom::{Coord, Margins, Offset, Rect};
use crate::region::{HeaderRenderInfo, RegionRegistry};

/// 4-part colour data, linear, sRGB colour space
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    /// Transparent black
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);
    /// Opaque white
    pub const WHITE: Self = Self::grey(1.0);
    /// Opaque black
    pub const BLACK: Self = Self::grey(0.0);

    /// Construct from R-G-B-A components
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Construct from grey-scale
    pub const fn grey(s: f32) -> Self {
        Self::rgba(s, s, s, 1.0)
    }
}

/// Fill style
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Brush(pub Rgba);

/// Stroke style
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pen {
    pub color: Rgba,
    pub width: f32,
}

/// A scale-then-translate transform
///
/// Points are mapped as `p * scale + offset`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub scale: f32,
    pub offset: Offset,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        scale: 1.0,
        offset: Offset::ZERO,
    };
}

/// The drawing sink provided by the host
pub trait Canvas {
    /// Draw a rectangle, optionally filled and/or stroked
    fn draw_rect(&mut self, rect: Rect, fill: Option<Brush>, stroke: Option<Pen>);

    /// Draw a line
    fn draw_line(&mut self, p1: Coord, p2: Coord, pen: Pen);

    /// Draw (already formatted) text with its top-left corner at `origin`
    fn draw_text(&mut self, text: &str, origin: Coord);

    /// Restrict drawing to `rect` until the matching [`Canvas::pop`]
    fn push_clip(&mut self, rect: Rect);

    /// Apply `transform` until the matching [`Canvas::pop`]
    fn push_transform(&mut self, transform: Transform);

    /// Undo the last push
    fn pop(&mut self);
}

/// Decoration renderer plug-in
///
/// A header renderer draws header bands and reserves part of a band-owning
/// area for its own chrome: panels ask [`HeaderRenderer::client_area`] which
/// part of an area remains for the child.
pub trait HeaderRenderer {
    /// Space reserved around the client area
    fn client_area_margins(&self) -> Margins;

    /// The client part of `total`
    fn client_area(&self, total: Rect) -> Rect {
        total.shrink_by(self.client_area_margins())
    }

    /// Draw one header band
    fn render(&self, canvas: &mut dyn Canvas, header: &HeaderRenderInfo);

    /// Pointer event over a header band
    ///
    /// Delivered by [`HeaderHover`](crate::event::HeaderHover). The default
    /// implementation ignores the event.
    fn on_pointer(&mut self, _header: &HeaderRenderInfo, _event: HeaderEvent) -> Action {
        Action::empty()
    }
}

/// Colours used for panel-owned decorations
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DecorationStyle {
    pub group_fill: Option<Brush>,
    pub group_border: Option<Pen>,
    pub splitter: Option<Brush>,
    pub scroll_track: Option<Brush>,
}

impl Default for DecorationStyle {
    fn default() -> Self {
        DecorationStyle {
            group_fill: Some(Brush(Rgba::rgba(0.0, 0.0, 0.0, 0.04))),
            group_border: Some(Pen {
                color: Rgba::grey(0.8),
                width: 1.0,
            }),
            splitter: Some(Brush(Rgba::grey(0.85))),
            scroll_track: Some(Brush(Rgba::grey(0.93))),
        }
    }
}

/// Draw the decorations of a region registry
///
/// Group backgrounds first, then tracks, then header bands (only with a
/// renderer). Rects with an empty size are skipped.
pub fn render_regions<M>(
    regions: &RegionRegistry<M>,
    canvas: &mut dyn Canvas,
    style: &DecorationStyle,
    renderer: Option<&dyn HeaderRenderer>,
) {
    if style.group_fill.is_some() || style.group_border.is_some() {
        for group in regions.groups() {
            if !group.rect.size.is_empty() {
                canvas.draw_rect(group.rect, style.group_fill, style.group_border);
            }
        }
    }

    for track in regions.tracks() {
        let fill = match track.scroll_bar {
            true => style.scroll_track,
            false => style.splitter,
        };
        if fill.is_some() && !track.rect.size.is_empty() {
            canvas.draw_rect(track.rect, fill, None);
        }
    }

    if let Some(renderer) = renderer {
        for header in regions.headers() {
            if !header.rect.size.is_empty() {
                canvas.push_clip(header.rect);
                renderer.render(canvas, header);
                canvas.pop();
            }
        }
    }
}

/// One recorded canvas command
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Rect(Rect, Option<Brush>, Option<Pen>),
    Line(Coord, Coord, Pen),
    Text(String, Coord),
    PushClip(Rect),
    PushTransform(Transform),
    Pop,
}

/// A [`Canvas`] which records commands
///
/// Intended for tests and for hosts which replay drawing later.
#[derive(Clone, Debug, Default)]
pub struct Recorder {
    pub commands: Vec<Command>,
    depth: usize,
}

impl Recorder {
    /// Current push depth (zero when every push was popped)
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Number of filled or stroked rects recorded
    pub fn rect_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, Command::Rect(..)))
            .count()
    }
}

impl Canvas for Recorder {
    fn draw_rect(&mut self, rect: Rect, fill: Option<Brush>, stroke: Option<Pen>) {
        self.commands.push(Command::Rect(rect, fill, stroke));
    }

    fn draw_line(&mut self, p1: Coord, p2: Coord, pen: Pen) {
        self.commands.push(Command::Line(p1, p2, pen));
    }

    fn draw_text(&mut self, text: &str, origin: Coord) {
        self.commands.push(Command::Text(text.to_string(), origin));
    }

    fn push_clip(&mut self, rect: Rect) {
        self.depth += 1;
        self.commands.push(Command::PushClip(rect));
    }

    fn push_transform(&mut self, transform: Transform) {
        self.depth += 1;
        self.commands.push(Command::PushTransform(transform));
    }

    fn pop(&mut self) {
        debug_assert!(self.depth > 0, "Recorder::pop: unbalanced pop");
        self.depth = self.depth.saturating_sub(1);
        self.commands.push(Command::Pop);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::geom::Size;
    use crate::region::{GroupBackgroundRenderInfo, HeaderKind};

    struct Titles;
    impl HeaderRenderer for Titles {
        fn client_area_margins(&self) -> Margins {
            Margins::hv((2, 2), (20, 0))
        }
        fn render(&self, canvas: &mut dyn Canvas, header: &HeaderRenderInfo) {
            if let Some(title) = &header.title {
                canvas.draw_text(title, header.rect.pos);
            }
        }
    }

    fn registry() -> RegionRegistry<()> {
        let mut reg = RegionRegistry::default();
        let rect = Rect::new(Coord(0, 0), Size(50, 20));
        reg.push_group(GroupBackgroundRenderInfo {
            rect,
            column: 0,
            group: 0,
        });
        reg.push_header(HeaderRenderInfo {
            kind: HeaderKind::Group { expanded: None },
            rect,
            title: Some("General".into()),
            index: 0,
        });
        reg
    }

    #[test]
    fn headers_need_a_renderer() {
        let reg = registry();
        let mut canvas = Recorder::default();
        render_regions(&reg, &mut canvas, &DecorationStyle::default(), None);
        assert_eq!(canvas.commands.len(), 1);

        let mut canvas = Recorder::default();
        render_regions(&reg, &mut canvas, &DecorationStyle::default(), Some(&Titles));
        assert!(canvas
            .commands
            .contains(&Command::Text("General".into(), Coord(0, 0))));
        assert_eq!(canvas.depth(), 0);
    }

    #[test]
    fn client_area_default() {
        let total = Rect::new(Coord(10, 10), Size(100, 60));
        let client = Titles.client_area(total);
        assert_eq!(client, Rect::new(Coord(12, 30), Size(96, 40)));
    }
}
