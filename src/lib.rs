// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Panes layout panels
//!
//! This, the main panes crate, is merely a wrapper over other crates:
//!
//! -   [`panes_core`] is the layout engine: geometry, configuration, the
//!     child contract, the constraint solver and arrangement, hot areas,
//!     pointer dispatch and scrolling
//! -   [`panes_panels`] provides the panels: edit forms, property sheets,
//!     flow rows, tiles, blades and docking wells
//!
//! All items from [`panes_core`] are directly re-exported from this crate
//! (e.g. [`panes::geom::Size`](crate::geom::Size)); the panels are
//! re-exported as a sub-module (e.g. [`panes::panels::EditForm`](crate::panels::EditForm)).
//!
//! The [easy-cast](https://docs.rs/easy-cast/0.5/easy_cast) library is re-exported as
//! `panes::cast`.
//!
//! ## Usage
//!
//! The host owns its children and implements [`node::Node`] for them. A
//! layout cycle measures, then arranges, repeating while the returned
//! [`Action`] asks for a new measure:
//!
//! ```
//! use panes::prelude::*;
//!
//! let mut form = EditForm::default();
//! let mut children = vec![FixedNode::label(40, 20), FixedNode::new(80, 20)];
//! let rect = Rect::new(Coord::ZERO, Size(300, 200));
//! let required = layout(&mut form, &mut children, rect);
//! assert_eq!(required, Size(40 + 5 + 80, 20));
//! assert_eq!(children[1].rect().pos, Coord(45, 0));
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod prelude;

pub use panes_core::*;

pub extern crate panes_panels as panels;
