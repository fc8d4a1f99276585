//! # WSI Region
//!
//! Region planning for pyramidal Whole Slide Images (WSI).
//!
//! A pyramidal image only exposes a fixed set of resolution levels. This crate
//! computes how to serve a region at any continuous scaling from those levels:
//! which level to read, which padded native region to fetch so that the
//! resampling kernel has its full support, and the fractional crop box that
//! maps the fetched pixels back onto exactly the requested region.
//!
//! ## Features
//!
//! - **Pure planning**: all geometry is deterministic arithmetic over an
//!   immutable [`PyramidDescriptor`]; safe to share between threads
//! - **Kernel-aware padding**: fetch borders follow the resampling kernel's support
//! - **Level 0 addressing**: fetch origins are snapped to integer level 0 pixels,
//!   the way slide readers address regions, and the crop box absorbs the offset
//! - **Collaborator seams**: pixels come from a [`TileStore`] and are resized
//!   by a [`Resampler`], both supplied by the caller
//!
//! ## Architecture
//!
//! - [`geometry`] - `glam` vectors, clipping helpers and crop boxes
//! - [`pyramid`] - Pyramid descriptor and level selection
//! - [`region`] - Request validation and native region planning
//! - [`kernel`] - Resampling kernels and their support radii
//! - [`read`] - Tile store / resampler traits and the region reader
//! - [`config`] - Planner configuration
//!
//! ## Example
//!
//! ```rust
//! use wsi_region::{PyramidDescriptor, PyramidLevel, RegionPlanner, RegionRequest};
//!
//! let descriptor = PyramidDescriptor::new(vec![
//!     PyramidLevel::new(10000, 8000, 1.0),
//!     PyramidLevel::new(2500, 2000, 4.0),
//! ])
//! .unwrap();
//!
//! // A 50x50 region at 1/5 of full resolution
//! let request = RegionRequest::new((100.0, 100.0), 0.2, (50.0, 50.0));
//! let plan = RegionPlanner::default().plan_request(&request, &descriptor).unwrap();
//!
//! // Read 71x71 native pixels of level 1 at level 0 offset (484, 484),
//! // then resize the box (4, 4)..(66.5, 66.5) to 50x50.
//! assert_eq!(plan.level, 1);
//! assert_eq!((plan.level_zero_location.x, plan.level_zero_location.y), (484, 484));
//! assert_eq!(plan.fetch_dimensions(), (71, 71));
//! ```

pub mod config;
pub mod error;
pub mod geometry;
pub mod kernel;
pub mod pyramid;
pub mod read;
pub mod region;

// Re-export commonly used types
pub use config::{PlannerConfig, KERNEL_ENV_VAR};
pub use error::{
    ConfigError, FetchError, InvalidRegion, PlanningError, PyramidError, ReadRegionError,
    RegionError, ResampleError,
};
pub use geometry::{CropBox, DVec2, I64Vec2};
pub use glam;
pub use kernel::ResampleKernel;
pub use pyramid::{select_level, PyramidDescriptor, PyramidLevel};
pub use read::{RegionReader, RegionResponse, Resampler, TileStore};
pub use region::{scaled_size, validate_region, NativeRegionPlan, RegionPlanner, RegionRequest};
