//! Pyramid geometry and level selection.
//!
//! A pyramidal image exposes a fixed set of resolution levels. Level 0 is the
//! full-resolution image; each higher level is downsampled by a factor relative
//! to level 0:
//!
//! ```text
//! level 0   ┌────────────────────────┐  downsample 1.0
//!           │                        │
//!           │                        │
//!           └────────────────────────┘
//! level 1   ┌──────┐                    downsample 4.0
//!           └──────┘
//! level 2   ┌┐                          downsample 16.0
//!           └┘
//! ```
//!
//! [`PyramidDescriptor`] holds this geometry; [`select_level`] picks the level
//! that a request at a given scaling should be sourced from.

mod descriptor;
mod select;

pub use descriptor::{PyramidDescriptor, PyramidLevel};
pub use select::select_level;
