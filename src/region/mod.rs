//! Region requests and native region planning.
//!
//! # Pipeline
//!
//! ```text
//! ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐
//! │ validate_region │──▶│  select_level   │──▶│  RegionPlanner  │──▶ NativeRegionPlan
//! │ (scaled bounds) │   │ (pyramid level) │   │ (fetch + crop)  │
//! └─────────────────┘   └─────────────────┘   └─────────────────┘
//! ```
//!
//! Everything here is pure arithmetic over the immutable
//! [`crate::pyramid::PyramidDescriptor`]. Nothing performs I/O or keeps
//! state between calls.
//!
//! # Example
//!
//! ```
//! use wsi_region::{PyramidDescriptor, PyramidLevel, RegionPlanner, RegionRequest};
//!
//! let descriptor = PyramidDescriptor::new(vec![
//!     PyramidLevel::new(10000, 8000, 1.0),
//!     PyramidLevel::new(2500, 2000, 4.0),
//! ])
//! .unwrap();
//!
//! let request = RegionRequest::new((100.0, 100.0), 0.2, (50.0, 50.0));
//! let plan = RegionPlanner::default().plan_request(&request, &descriptor).unwrap();
//!
//! assert_eq!(plan.level, 1);
//! assert_eq!(plan.fetch_dimensions(), (71, 71));
//! assert_eq!(plan.crop_box.as_tuple(), (4.0, 4.0, 66.5, 66.5));
//! ```

mod planner;
mod request;

pub use planner::{NativeRegionPlan, RegionPlanner};
pub use request::{scaled_size, validate_region, RegionRequest};
