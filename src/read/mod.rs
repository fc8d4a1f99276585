//! Reading scaled regions through external collaborators.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │              RegionReader               │
//! │  ┌───────────────┐                      │
//! │  │ RegionPlanner │  (pure geometry)     │
//! │  └───────────────┘                      │
//! └──────────┬─────────────────┬────────────┘
//!            │                 │
//!            ▼                 ▼
//! ┌────────────────────┐ ┌────────────────────┐
//! │  TileStore trait   │ │  Resampler trait   │
//! │ (native pixels)    │ │ (crop + resize)    │
//! └────────────────────┘ └────────────────────┘
//! ```

mod collaborators;
mod reader;

pub use collaborators::{Resampler, TileStore};
pub use reader::{RegionReader, RegionResponse};
