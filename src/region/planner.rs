//! Native region planning.
//!
//! Maps a region request at an arbitrary scaling onto a padded region of one
//! native pyramid level, plus the fractional crop box that turns the fetched
//! pixels back into exactly the requested region after resampling.
//!
//! # Steps
//!
//! ```text
//!  scaled space                 native level                fetched buffer
//! ┌──────────────┐   / ns    ┌───────────────────┐  crop  ┌───────────────┐
//! │ location     │ ───────▶  │  ┌─────────────┐  │ ─────▶ │   ┌───────┐   │
//! │  + size      │           │  │ +extra pad  │  │        │   │ crop  │   │
//! └──────────────┘           │  └─────────────┘  │        │   └───────┘   │
//!                            └───────────────────┘        └───────────────┘
//! ```
//!
//! 1. Divide location and size by the native scaling (`scaling * downsample`).
//! 2. Pad by the kernel support radius on both sides, in native pixels.
//! 3. Floor the padded origin, convert it to integer level 0 coordinates (what
//!    tile stores address regions by) and map that back to the native level.
//! 4. Ceil the padded far corner, clip it to the level and round the fetch size
//!    outward.
//! 5. Express the requested region relative to the fetched origin.
//!
//! Far edges are only ever rounded outward. A fetch that is a pixel too large
//! costs a few bytes; one that is too small truncates the kernel support and
//! shows up as a border artifact.
//!
//! At the level boundary the padding is clipped away on that side and the
//! resampler has no samples beyond the edge. No extrapolation is attempted.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::PlannerConfig;
use crate::error::{PlanningError, RegionError};
use crate::geometry::{clip_to, to_dimensions, CropBox, DVec2, I64Vec2};
use crate::pyramid::{select_level, PyramidDescriptor};

use super::request::RegionRequest;

// =============================================================================
// Native Region Plan
// =============================================================================

/// How to serve a region request from a single pyramid level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NativeRegionPlan {
    /// Pyramid level to fetch from
    pub level: usize,

    /// Fetch origin in level 0 pixel coordinates
    pub level_zero_location: I64Vec2,

    /// Fetch size in native pixels of `level`
    pub fetch_size: I64Vec2,

    /// Requested region inside the fetch, clipped to `fetch_size`
    pub crop_box: CropBox,

    /// Requested region inside the fetch before any clipping
    pub unclipped_crop_box: CropBox,

    /// Fetch origin in native pixels, as implied by `level_zero_location`
    pub native_origin: DVec2,

    /// Padding added on each side, in native pixels
    pub support_pixels: DVec2,

    /// Size of the region handed back to the caller
    pub output_size: DVec2,
}

impl NativeRegionPlan {
    /// Crop box for a buffer the tile store actually returned.
    ///
    /// Some stores return fewer pixels than asked for near the image edge; the
    /// box is clipped to whatever `extent` the buffer really has.
    pub fn crop_box_for_extent(&self, extent: I64Vec2) -> CropBox {
        self.unclipped_crop_box.clip_to(extent)
    }

    /// Fetch size as unsigned `(width, height)`.
    pub fn fetch_dimensions(&self) -> (u32, u32) {
        to_dimensions(self.fetch_size)
    }

    /// Output size rounded to whole pixels.
    pub fn output_dimensions(&self) -> (u32, u32) {
        to_dimensions(self.output_size.round().as_i64vec2())
    }

    /// Far corner of the fetch in native pixels.
    pub fn native_far_corner(&self) -> DVec2 {
        self.native_origin + self.fetch_size.as_dvec2()
    }
}

// =============================================================================
// Region Planner
// =============================================================================

/// Plans native-level fetches for region requests.
///
/// Stateless apart from its configuration: every call is a pure function of
/// the request and the descriptor, so a planner can be shared freely between
/// threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegionPlanner {
    config: PlannerConfig,
}

impl RegionPlanner {
    pub fn new(config: PlannerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Validate a request, select its level and plan the fetch.
    pub fn plan_request(
        &self,
        request: &RegionRequest,
        descriptor: &PyramidDescriptor,
    ) -> Result<NativeRegionPlan, RegionError> {
        request.validate(descriptor.base_size())?;
        let level = select_level(request.inverse_scaling(), &descriptor.downsamples())?;
        Ok(self.plan(request, level, descriptor)?)
    }

    /// Plan the fetch of `request` from `level`.
    ///
    /// `request` must already have passed validation.
    pub fn plan(
        &self,
        request: &RegionRequest,
        level: usize,
        descriptor: &PyramidDescriptor,
    ) -> Result<NativeRegionPlan, PlanningError> {
        let native = descriptor.require_level(level)?;
        let downsample = native.downsample;
        let level_size = native.dimensions;

        let native_scaling = downsample * request.scaling;
        let native_location = request.location / native_scaling;
        let native_size = request.size / native_scaling;

        let support_pixels = self.support_pixels(native_scaling);

        let padded_location = clip_to((native_location - support_pixels).floor(), level_size);

        // Tile stores address regions in integer level 0 pixels. Snap the
        // origin there and work from where that lands on the native level.
        let level_zero_location = (padded_location * downsample).floor().as_i64vec2();
        let native_origin = level_zero_location.as_dvec2() / downsample;

        let padded_far_corner =
            clip_to((native_location + native_size + support_pixels).ceil(), level_size);

        let fetch_size = fetch_size(padded_far_corner, native_origin);

        let unclipped_crop_box =
            CropBox::from_origin_size(native_location - native_origin, native_size);
        let crop_box = unclipped_crop_box.clip_to(fetch_size);

        debug!(
            level,
            native_scaling_x = native_scaling.x,
            native_scaling_y = native_scaling.y,
            support_x = support_pixels.x,
            support_y = support_pixels.y,
            location_x = level_zero_location.x,
            location_y = level_zero_location.y,
            width = fetch_size.x,
            height = fetch_size.y,
            "Planned native region"
        );

        Ok(NativeRegionPlan {
            level,
            level_zero_location,
            fetch_size,
            crop_box,
            unclipped_crop_box,
            native_origin,
            support_pixels,
            output_size: request.size,
        })
    }

    /// Kernel support in native pixels.
    ///
    /// The support is defined in output pixels. When the native level is
    /// at least as fine as the output (`native_scaling <= 1`) it spans
    /// `support / native_scaling` native pixels, rounded up.
    fn support_pixels(&self, native_scaling: DVec2) -> DVec2 {
        let radius = DVec2::splat(self.config.support_radius());
        DVec2::select(
            native_scaling.cmpgt(DVec2::ONE),
            radius,
            (radius / native_scaling).ceil(),
        )
    }
}

/// Fetch size from the native origin to the padded far corner, rounded outward.
fn fetch_size(padded_far_corner: DVec2, native_origin: DVec2) -> I64Vec2 {
    (padded_far_corner - native_origin)
        .ceil()
        .max(DVec2::ZERO)
        .as_i64vec2()
}

// =============================================================================
// Tests
// =============================================================================
