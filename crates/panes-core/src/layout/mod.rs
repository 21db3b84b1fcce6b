// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Layout engine
//!
//! Size units are physical pixels.
//!
//! Every panel runs two passes. The measure pass summarises the visible
//! children as [`LayoutBox`](crate::node::LayoutBox)es, solves a plan and
//! reports the required size. The arrange pass walks that same plan to assign
//! each child its final [`Placement`](crate::node::Placement) and to rebuild
//! the panel's [`RegionRegistry`](crate::region::RegionRegistry).
//!
//! ## Forms
//!
//! [`FormSolver`] partitions boxes into columns of label/edit rows
//! ([`FormPlan`]) and runs the elastic squeeze ladder; [`FormSetter`] turns the
//! plan into rects. Spacing decided by the solver is stored in the plan (see
//! [`ColumnRenderInfo`]) so that both passes agree.
//!
//! ## Other engines
//!
//! -   [`FlowSolver`] wraps label-led rows of controls
//! -   [`TilePacker`] packs tiles of a tile grid
//!
//! The individual squeeze steps are available in [`squeeze`].

mod arrange;
mod flow;
mod plan;
mod solver;
pub mod squeeze;
mod tiles;

pub use arrange::FormSetter;
pub use flow::{FlowPlan, FlowSolver};
pub use plan::{ColumnRenderInfo, FormColumn, FormPlan, FormRow, GapCount};
pub use solver::FormSolver;
pub use tiles::{TilePacker, TileSlot};
