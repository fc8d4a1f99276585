//! Immutable pyramid geometry.
//!
//! A [`PyramidDescriptor`] is built once when an image is opened (typically by
//! the tile store's loader) and is read-only afterwards. It carries only
//! geometry: per-level dimensions and downsample factors, plus the optional
//! slide properties (level 0 pixel spacing, objective magnification and the
//! bounds of the non-empty area).

use serde::{Deserialize, Serialize};

use crate::error::{PlanningError, PyramidError};
use crate::geometry::{extent, DVec2, I64Vec2};

use super::select::select_level;

/// Tolerance when checking that level 0 has a downsample of 1.0.
const BASE_DOWNSAMPLE_TOLERANCE: f64 = 1e-6;

// =============================================================================
// PyramidLevel
// =============================================================================

/// Geometry of a single pyramid level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PyramidLevel {
    /// Native pixel dimensions `(width, height)`
    pub dimensions: I64Vec2,

    /// Downsample factor relative to level 0, per axis
    ///
    /// Level 0 has downsample 1.0; level 1 of a 4x pyramid has 4.0.
    pub downsample: DVec2,
}

impl PyramidLevel {
    /// A level with the same downsample on both axes.
    pub fn new(width: u32, height: u32, downsample: f64) -> Self {
        Self {
            dimensions: extent((width, height)),
            downsample: DVec2::splat(downsample),
        }
    }

    /// A level with per-axis downsample factors.
    pub fn anisotropic(width: u32, height: u32, downsample: DVec2) -> Self {
        Self {
            dimensions: extent((width, height)),
            downsample,
        }
    }

    /// Single downsample factor used for level selection.
    ///
    /// The larger of the two axes, so a level is only selected when neither
    /// axis is coarser than the request. For isotropic pyramids this is the
    /// factor itself.
    pub fn downsample_factor(&self) -> f64 {
        self.downsample.x.max(self.downsample.y)
    }
}

// =============================================================================
// PyramidDescriptor
// =============================================================================

/// Geometry of a multi-resolution image.
///
/// Levels are ordered from full resolution (level 0) to the coarsest level.
///
/// # Invariants
///
/// Enforced at construction:
/// - at least one level
/// - level 0 downsample is 1.0
/// - downsample factors are finite, positive and non-decreasing per axis
/// - dimensions are non-negative and non-increasing per axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDescriptor", into = "RawDescriptor")]
pub struct PyramidDescriptor {
    levels: Vec<PyramidLevel>,
    mpp: Option<DVec2>,
    magnification: Option<f64>,
    bounds: Option<Bounds>,
}

/// Non-empty area of the slide in level 0 pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
struct Bounds {
    offset: I64Vec2,
    size: I64Vec2,
}

impl PyramidDescriptor {
    /// Build a descriptor, checking the pyramid invariants.
    pub fn new(levels: Vec<PyramidLevel>) -> Result<Self, PyramidError> {
        let base = levels.first().ok_or(PyramidError::Empty)?;

        let unit = |v: f64| (v - 1.0).abs() <= BASE_DOWNSAMPLE_TOLERANCE;
        if !(unit(base.downsample.x) && unit(base.downsample.y)) {
            return Err(PyramidError::NonUnitBaseDownsample {
                downsample: base.downsample,
            });
        }

        for (level, current) in levels.iter().enumerate() {
            if !(current.downsample.is_finite() && current.downsample.cmpgt(DVec2::ZERO).all()) {
                return Err(PyramidError::InvalidDownsample {
                    level,
                    downsample: current.downsample,
                });
            }
            if current.dimensions.x < 0 || current.dimensions.y < 0 {
                return Err(PyramidError::NegativeDimensions {
                    level,
                    dimensions: current.dimensions,
                });
            }

            let Some(previous) = level.checked_sub(1).map(|i| &levels[i]) else {
                continue;
            };
            if current.downsample.x < previous.downsample.x
                || current.downsample.y < previous.downsample.y
            {
                return Err(PyramidError::DecreasingDownsample { level });
            }
            if current.dimensions.x > previous.dimensions.x
                || current.dimensions.y > previous.dimensions.y
            {
                return Err(PyramidError::IncreasingDimensions {
                    level,
                    dimensions: current.dimensions,
                });
            }
        }

        Ok(Self {
            levels,
            mpp: None,
            magnification: None,
            bounds: None,
        })
    }

    /// Build a descriptor from level dimensions alone.
    ///
    /// Each level gets a single downsample, the mean of `base / level` over
    /// both axes, applied to both axes. This is what OpenSlide reports for
    /// formats without explicit downsample metadata.
    pub fn from_dimensions(dimensions: &[(u32, u32)]) -> Result<Self, PyramidError> {
        let &(base_w, base_h) = dimensions.first().ok_or(PyramidError::Empty)?;

        let levels = dimensions
            .iter()
            .map(|&(w, h)| {
                let downsample = (base_w as f64 / w as f64 + base_h as f64 / h as f64) / 2.0;
                PyramidLevel::new(w, h, downsample)
            })
            .collect();

        Self::new(levels)
    }

    /// Attach the level 0 pixel spacing in microns per pixel `(x, y)`.
    pub fn with_mpp(mut self, mpp: DVec2) -> Self {
        self.mpp = Some(mpp);
        self
    }

    /// Attach the objective power the slide was scanned at.
    pub fn with_magnification(mut self, magnification: f64) -> Self {
        self.magnification = Some(magnification);
        self
    }

    /// Attach the non-empty area of the slide, in level 0 pixels.
    pub fn with_bounds(mut self, offset: I64Vec2, size: I64Vec2) -> Self {
        self.bounds = Some(Bounds { offset, size });
        self
    }

    /// Number of pyramid levels.
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    pub fn levels(&self) -> &[PyramidLevel] {
        &self.levels
    }

    pub fn level(&self, level: usize) -> Option<&PyramidLevel> {
        self.levels.get(level)
    }

    /// Like [`Self::level`], reporting a missing level as a planning error.
    pub(crate) fn require_level(&self, level: usize) -> Result<&PyramidLevel, PlanningError> {
        self.levels.get(level).ok_or(PlanningError::LevelOutOfRange {
            level,
            level_count: self.levels.len(),
        })
    }

    /// Dimensions of level 0.
    pub fn base_size(&self) -> I64Vec2 {
        // Non-empty by construction
        self.levels
            .first()
            .map(|l| l.dimensions)
            .unwrap_or(I64Vec2::ZERO)
    }

    /// Per-level downsample factors used for level selection.
    pub fn downsamples(&self) -> Vec<f64> {
        self.levels.iter().map(PyramidLevel::downsample_factor).collect()
    }

    /// Level 0 pixel spacing in microns per pixel, if known.
    pub fn mpp(&self) -> Option<DVec2> {
        self.mpp
    }

    /// Objective power, if known.
    pub fn magnification(&self) -> Option<f64> {
        self.magnification
    }

    /// Top-left corner of the non-empty area; the origin unless bounds are set.
    pub fn offset(&self) -> I64Vec2 {
        self.bounds.map_or(I64Vec2::ZERO, |b| b.offset)
    }

    /// Size of the non-empty area; the whole of level 0 unless bounds are set.
    pub fn bounds(&self) -> I64Vec2 {
        self.bounds.map_or_else(|| self.base_size(), |b| b.size)
    }

    /// Scaling relative to level 0 that yields the given pixel spacing.
    ///
    /// Returns `None` when the descriptor carries no spacing or `target_mpp`
    /// is not a positive number. Uses the mean of the two axes.
    pub fn scaling_for_mpp(&self, target_mpp: f64) -> Option<f64> {
        let mpp = self.mpp?;
        if !(target_mpp.is_finite() && target_mpp > 0.0) {
            return None;
        }
        Some((mpp.x + mpp.y) / 2.0 / target_mpp)
    }

    /// Level to sample from for a requested scaling relative to level 0.
    pub fn best_level_for_scaling(&self, scaling: f64) -> Result<usize, PlanningError> {
        select_level(1.0 / scaling, &self.downsamples())
    }
}

/// Serialized form of [`PyramidDescriptor`], validated on the way in.
#[derive(Serialize, Deserialize)]
struct RawDescriptor {
    levels: Vec<PyramidLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    mpp: Option<DVec2>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    magnification: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    bounds: Option<Bounds>,
}

impl TryFrom<RawDescriptor> for PyramidDescriptor {
    type Error = PyramidError;

    fn try_from(raw: RawDescriptor) -> Result<Self, Self::Error> {
        Ok(PyramidDescriptor {
            mpp: raw.mpp,
            magnification: raw.magnification,
            bounds: raw.bounds,
            ..PyramidDescriptor::new(raw.levels)?
        })
    }
}

impl From<PyramidDescriptor> for RawDescriptor {
    fn from(descriptor: PyramidDescriptor) -> Self {
        RawDescriptor {
            levels: descriptor.levels,
            mpp: descriptor.mpp,
            magnification: descriptor.magnification,
            bounds: descriptor.bounds,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
