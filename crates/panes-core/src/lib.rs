// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Panes core
//!
//! This crate holds the toolkit-independent half of the panes layout panels:
//!
//! -   [`geom`] and [`dir`]: integer pixel geometry
//! -   [`node`]: the contract a hosted child fulfils ([`node::Node`]) and the
//!     per-pass [`node::LayoutBox`] record built from it
//! -   [`layout`]: the two-pass engine (constraint solver + arrangement)
//! -   [`region`], [`event`]: hot areas and pointer dispatch over them
//! -   [`scroll`]: scroll bar state derived from required vs available size
//! -   [`draw`]: the canvas and header renderer capabilities of the host
//! -   [`config`]: spacing, squeeze and panel configuration
//!
//! The [easy-cast](https://docs.rs/easy-cast/0.5/easy_cast) library is
//! re-exported as `cast`.

#![allow(clippy::identity_op)]

#[macro_use]
extern crate bitflags;

pub extern crate easy_cast as cast;

mod action;

pub mod config;
pub mod dir;
pub mod draw;
pub mod event;
pub mod geom;
pub mod layout;
pub mod node;
pub mod region;
pub mod scroll;

pub use action::{Action, Invalidation};
