//! End-to-end region reading.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        RegionReader                          │
//! │  1. Validate request    3. Fetch padded region (TileStore)   │
//! │  2. Select level, plan  4. Clip crop box, resize (Resampler) │
//! └──────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use image::RgbaImage;
use tracing::debug;

use crate::config::PlannerConfig;
use crate::error::{ReadRegionError, RegionError};
use crate::geometry::{extent, CropBox};
use crate::pyramid::PyramidDescriptor;
use crate::region::{NativeRegionPlan, RegionPlanner, RegionRequest};

use super::collaborators::{Resampler, TileStore};

// =============================================================================
// Region Response
// =============================================================================

/// A region read at the requested scaling.
#[derive(Debug, Clone)]
pub struct RegionResponse {
    /// Output pixels, `plan.output_dimensions()` large
    pub image: RgbaImage,

    /// The plan the region was read with
    pub plan: NativeRegionPlan,

    /// Crop box used against the buffer the store actually returned
    pub crop_box: CropBox,
}

// =============================================================================
// Region Reader
// =============================================================================

/// Reads arbitrarily scaled regions from a pyramidal image.
///
/// Combines the planner with a [`TileStore`] and a [`Resampler`]. Errors from
/// either collaborator are returned unchanged; nothing is retried.
///
/// # Example
///
/// ```ignore
/// let reader = RegionReader::new(store, resampler, descriptor);
/// let request = RegionRequest::new((1024.0, 2048.0), 0.5, (512.0, 512.0));
/// let region = reader.read_region(&request).await?;
/// assert_eq!(region.image.dimensions(), (512, 512));
/// ```
pub struct RegionReader<S: TileStore, R: Resampler> {
    store: S,
    resampler: R,
    descriptor: Arc<PyramidDescriptor>,
    planner: RegionPlanner,
}

impl<S: TileStore, R: Resampler> RegionReader<S, R> {
    /// Create a reader with the default planner configuration.
    pub fn new(store: S, resampler: R, descriptor: impl Into<Arc<PyramidDescriptor>>) -> Self {
        Self::with_config(store, resampler, descriptor, PlannerConfig::default())
    }

    /// Create a reader with a custom planner configuration.
    pub fn with_config(
        store: S,
        resampler: R,
        descriptor: impl Into<Arc<PyramidDescriptor>>,
        config: PlannerConfig,
    ) -> Self {
        Self {
            store,
            resampler,
            descriptor: descriptor.into(),
            planner: RegionPlanner::new(config),
        }
    }

    pub fn descriptor(&self) -> &Arc<PyramidDescriptor> {
        &self.descriptor
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Plan a request without fetching anything.
    pub fn plan(&self, request: &RegionRequest) -> Result<NativeRegionPlan, RegionError> {
        self.planner.plan_request(request, &self.descriptor)
    }

    /// Read a region at the requested scaling.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The request is invalid for this image
    /// - The pyramid has no usable level
    /// - The tile store fails to fetch the region
    /// - The resampler fails
    pub async fn read_region(
        &self,
        request: &RegionRequest,
    ) -> Result<RegionResponse, ReadRegionError> {
        let plan = self.plan(request)?;

        let buffer = self
            .store
            .fetch(plan.level, plan.level_zero_location, plan.fetch_dimensions())
            .await?;

        let returned = extent(buffer.dimensions());
        if returned != plan.fetch_size {
            debug!(
                level = plan.level,
                planned_width = plan.fetch_size.x,
                planned_height = plan.fetch_size.y,
                width = returned.x,
                height = returned.y,
                "Tile store returned a different extent than planned"
            );
        }

        let crop_box = plan.crop_box_for_extent(returned);
        let image = self.resampler.resample(
            &buffer,
            crop_box,
            plan.output_dimensions(),
            self.planner.config().kernel,
        )?;

        Ok(RegionResponse {
            image,
            plan,
            crop_box,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
