// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Geometry data types
//!
//! [`Coord`], [`Size`] and [`Offset`] are 2D integer (`i32`) types: absolute
//! positions, extents and relative displacements (including scroll offsets)
//! respectively. Units are physical pixels.
//!
//! Layout arithmetic may produce negative extents; these are clamped to zero
//! when a [`Size`] is built with [`Size::clamped`] or a [`Rect`] with
//! [`Rect::clamped`]. [`AvailableSize`] is the constraint given to a measure
//! pass.
//!
//! Floating-point conversions use [`CastFloat`] to make rounding explicit.

use crate::cast::{CastFloat, Conv};
use std::ops::{Add, Sub, SubAssign};

macro_rules! componentwise {
    ($($T:ident),*) => {
        $(
            impl $T {
                /// The constant `(0, 0)`
                pub const ZERO: Self = $T(0, 0);

                /// Componentwise minimum
                #[inline]
                #[must_use = "method does not modify self but returns a new value"]
                pub fn min(self, other: Self) -> Self {
                    $T(self.0.min(other.0), self.1.min(other.1))
                }

                /// Componentwise maximum
                #[inline]
                #[must_use = "method does not modify self but returns a new value"]
                pub fn max(self, other: Self) -> Self {
                    $T(self.0.max(other.0), self.1.max(other.1))
                }
            }

            impl From<(i32, i32)> for $T {
                #[inline]
                fn from((x, y): (i32, i32)) -> Self {
                    $T(x, y)
                }
            }
        )*
    };
}

/// A position
///
/// The difference of two coordinates is an [`Offset`].
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord(pub i32, pub i32);

/// An extent
///
/// Layout code keeps sizes non-negative: construct computed values with
/// [`Size::clamped`]. Subtraction saturates at zero.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size(pub i32, pub i32);

/// A relative displacement, which may be negative
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Offset(pub i32, pub i32);

componentwise!(Coord, Size, Offset);

impl Sub for Coord {
    type Output = Offset;

    #[inline]
    fn sub(self, rhs: Coord) -> Offset {
        Offset(self.0 - rhs.0, self.1 - rhs.1)
    }
}

impl Add<Offset> for Coord {
    type Output = Coord;

    #[inline]
    fn add(self, rhs: Offset) -> Coord {
        Coord(self.0 + rhs.0, self.1 + rhs.1)
    }
}

impl Sub<Offset> for Coord {
    type Output = Coord;

    #[inline]
    fn sub(self, rhs: Offset) -> Coord {
        Coord(self.0 - rhs.0, self.1 - rhs.1)
    }
}

impl Size {
    /// Construct, clamping negative components to zero
    #[inline]
    pub fn clamped(w: i32, h: i32) -> Self {
        Size(w.max(0), h.max(0))
    }

    /// True if either component is zero (or negative)
    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 <= 0 || self.1 <= 0
    }

    /// Scale by `factor`, rounding up
    ///
    /// A scaled layout never reports less than the content it holds.
    pub fn scale_ceil(self, factor: f32) -> Size {
        if factor == 1.0 {
            return self;
        }
        let scale = |v: i32| -> i32 { (f32::conv(v) * factor).cast_ceil() };
        Size::clamped(scale(self.0), scale(self.1))
    }
}

impl Add for Size {
    type Output = Size;

    #[inline]
    fn add(self, rhs: Size) -> Size {
        Size(self.0 + rhs.0, self.1 + rhs.1)
    }
}

/// Saturating: `Size(3, 8) - Size(5, 2) == Size(0, 6)`
impl Sub for Size {
    type Output = Size;

    #[inline]
    fn sub(self, rhs: Size) -> Size {
        Size::clamped(self.0 - rhs.0, self.1 - rhs.1)
    }
}

impl Offset {
    /// Clamp each component to `0..=max`
    #[inline]
    #[must_use = "method does not modify self but returns a new value"]
    pub fn clamp_to(self, max: Offset) -> Offset {
        self.min(max).max(Offset::ZERO)
    }

    /// The larger of the absolute components
    ///
    /// Drag thresholds are measured with this distance.
    #[inline]
    pub fn distance_l_inf(self) -> i32 {
        self.0.abs().max(self.1.abs())
    }
}

impl Add for Offset {
    type Output = Offset;

    #[inline]
    fn add(self, rhs: Offset) -> Offset {
        Offset(self.0 + rhs.0, self.1 + rhs.1)
    }
}

impl Sub for Offset {
    type Output = Offset;

    #[inline]
    fn sub(self, rhs: Offset) -> Offset {
        Offset(self.0 - rhs.0, self.1 - rhs.1)
    }
}

/// Space available to a measure pass
///
/// `None` on an axis means the axis is unconstrained.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct AvailableSize(pub Option<i32>, pub Option<i32>);

impl AvailableSize {
    /// Both axes unconstrained
    pub const UNBOUNDED: Self = AvailableSize(None, None);

    /// Both axes bounded by `size`
    #[inline]
    pub fn bounded(size: Size) -> Self {
        AvailableSize(Some(size.0), Some(size.1))
    }

    /// Take `size` off each bounded axis, saturating at zero
    #[must_use = "method does not modify self but returns a new value"]
    pub fn shrink(self, size: Size) -> Self {
        AvailableSize(
            self.0.map(|w| (w - size.0).max(0)),
            self.1.map(|h| (h - size.1).max(0)),
        )
    }

    /// Resolve to a size, using `fallback` on unbounded axes
    #[inline]
    pub fn or(self, fallback: Size) -> Size {
        Size(self.0.unwrap_or(fallback.0), self.1.unwrap_or(fallback.1))
    }
}

impl From<Size> for AvailableSize {
    #[inline]
    fn from(size: Size) -> Self {
        AvailableSize::bounded(size)
    }
}

/// An axis-aligned rectangle: position and size
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub pos: Coord,
    pub size: Size,
}

impl Rect {
    /// The empty rect at the origin
    pub const ZERO: Self = Rect::new(Coord::ZERO, Size::ZERO);

    /// Construct
    #[inline]
    pub const fn new(pos: Coord, size: Size) -> Self {
        Rect { pos, size }
    }

    /// Construct from components, clamping a negative size to zero
    #[inline]
    pub fn clamped(x: i32, y: i32, w: i32, h: i32) -> Self {
        Rect::new(Coord(x, y), Size::clamped(w, h))
    }

    /// True if `c` lies within the rect (right and bottom edges excluded)
    #[inline]
    pub fn contains(&self, c: Coord) -> bool {
        let rel = c - self.pos;
        (0..self.size.0).contains(&rel.0) && (0..self.size.1).contains(&rel.1)
    }

    /// Inset by `m`; the result never has negative size
    #[must_use = "method does not modify self but returns a new value"]
    pub fn shrink_by(&self, m: Margins) -> Rect {
        let pos = self.pos + Offset(i32::from(m.horiz.0), i32::from(m.vert.0));
        Rect::new(pos, self.size - m.sum())
    }

    /// Apply a render scale about `origin`
    ///
    /// The offset from `origin` is scaled and rounded down; the size is
    /// scaled with [`Size::scale_ceil`].
    #[must_use = "method does not modify self but returns a new value"]
    pub fn scaled_about(&self, origin: Coord, factor: f32) -> Rect {
        if factor == 1.0 {
            return *self;
        }
        let rel = self.pos - origin;
        let scale = |v: i32| -> i32 { (f32::conv(v) * factor).cast_floor() };
        Rect::new(origin + Offset(scale(rel.0), scale(rel.1)), self.size.scale_ceil(factor))
    }
}

impl Add<Offset> for Rect {
    type Output = Rect;

    #[inline]
    fn add(self, offset: Offset) -> Rect {
        Rect::new(self.pos + offset, self.size)
    }
}

impl Sub<Offset> for Rect {
    type Output = Rect;

    #[inline]
    fn sub(self, offset: Offset) -> Rect {
        Rect::new(self.pos - offset, self.size)
    }
}

impl SubAssign<Offset> for Rect {
    #[inline]
    fn sub_assign(&mut self, offset: Offset) {
        self.pos = self.pos - offset;
    }
}

/// Insets of a decoration, for example the client area of a header band
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Margins {
    /// Left, right
    pub horiz: (u16, u16),
    /// Top, bottom
    pub vert: (u16, u16),
}

impl Margins {
    /// No insets
    pub const ZERO: Margins = Margins::hv((0, 0), (0, 0));

    /// Construct from horizontal and vertical pairs
    #[inline]
    pub const fn hv(horiz: (u16, u16), vert: (u16, u16)) -> Self {
        Margins { horiz, vert }
    }

    /// Total horizontal and vertical inset
    #[inline]
    pub fn sum(&self) -> Size {
        Size(
            i32::from(self.horiz.0) + i32::from(self.horiz.1),
            i32::from(self.vert.0) + i32::from(self.vert.1),
        )
    }
}
