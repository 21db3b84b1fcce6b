// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Direction types
//!
//! Panels mostly care about the axis of a direction: a scroll bar, a splitter
//! track or a tile strip runs either horizontally or vertically. Per-axis
//! helpers take a `<D: Directional>` so callers may pass either the
//! [`Direction`] enum or one of the zero-sized markers [`Right`], [`Down`],
//! [`Left`] and [`Up`].

use std::fmt;

/// Trait over directional types
pub trait Directional: Copy + Sized + fmt::Debug + 'static {
    /// Convert to the [`Direction`] enum
    #[must_use = "method does not modify self but returns a new value"]
    fn as_direction(self) -> Direction;

    /// Up or Down
    #[inline]
    fn is_vertical(self) -> bool {
        matches!(self.as_direction(), Direction::Down | Direction::Up)
    }

    /// Left or Right
    #[inline]
    fn is_horizontal(self) -> bool {
        !self.is_vertical()
    }

    /// Select the component of `(x, y)` along this direction's axis
    #[inline]
    fn pick<T>(self, xy: (T, T)) -> T {
        match self.is_vertical() {
            false => xy.0,
            true => xy.1,
        }
    }
}

macro_rules! marker {
    ($($d:ident),*) => {
        $(
            /// Zero-sized instantiation of [`Directional`]
            #[derive(Copy, Clone, Default, Debug)]
            pub struct $d;

            impl Directional for $d {
                #[inline]
                fn as_direction(self) -> Direction {
                    Direction::$d
                }
            }
        )*
    };
}
marker!(Right, Down, Left, Up);

/// Axis-aligned directions
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    #[default]
    Right,
    Down,
    Left,
    Up,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl Directional for Direction {
    #[inline]
    fn as_direction(self) -> Direction {
        self
    }
}
