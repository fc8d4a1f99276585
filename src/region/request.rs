//! Region requests, scaled image size and request validation.

use serde::{Deserialize, Serialize};

use crate::error::InvalidRegion;
use crate::geometry::{DVec2, I64Vec2};

// =============================================================================
// Region Request
// =============================================================================

/// A request for a rectangular region at an arbitrary scaling.
///
/// `location` and `size` are expressed in the scaled coordinate space, i.e. the
/// space of the whole image resized by `scaling` relative to level 0. The
/// returned region will be `size` pixels large.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegionRequest {
    /// Top-left corner in scaled space
    pub location: DVec2,

    /// Scaling relative to level 0 (0.5 = half resolution)
    pub scaling: f64,

    /// Size of the region in scaled space
    pub size: DVec2,
}

impl RegionRequest {
    pub fn new(location: impl Into<DVec2>, scaling: f64, size: impl Into<DVec2>) -> Self {
        Self {
            location: location.into(),
            scaling,
            size: size.into(),
        }
    }

    /// Downsample factor relative to level 0 that this request asks for.
    pub fn inverse_scaling(&self) -> f64 {
        1.0 / self.scaling
    }

    /// Check the request against an image whose level 0 is `base_size`.
    pub fn validate(&self, base_size: I64Vec2) -> Result<(), InvalidRegion> {
        validate_region(self.location, self.scaling, self.size, base_size)
    }
}

// =============================================================================
// Scaled Size
// =============================================================================

/// Size of the full image at `scaling` relative to level 0.
///
/// Computes `floor(base_size * scaling)` per axis. `scaling` must be positive;
/// [`validate_region`] rejects anything else before this is reached.
pub fn scaled_size(scaling: f64, base_size: I64Vec2) -> I64Vec2 {
    (base_size.as_dvec2() * scaling).floor().as_i64vec2()
}

// =============================================================================
// Validation
// =============================================================================

/// Check a region request against the virtual bounds of the scaled image.
///
/// Checks run in this order:
/// 1. any negative (or NaN) size component: [`InvalidRegion::NegativeSize`]
/// 2. non-positive or non-finite scaling: [`InvalidRegion::InvalidScaling`]
/// 3. negative location, or `location + size` past
///    `scaled_size(scaling, base_size)`: [`InvalidRegion::OutOfBounds`]
///
/// Has no side effects. Must run before level selection and planning.
pub fn validate_region(
    location: DVec2,
    scaling: f64,
    size: DVec2,
    base_size: I64Vec2,
) -> Result<(), InvalidRegion> {
    if size.cmplt(DVec2::ZERO).any() || size.is_nan() {
        return Err(InvalidRegion::NegativeSize { size });
    }

    if !(scaling.is_finite() && scaling > 0.0) {
        return Err(InvalidRegion::InvalidScaling { scaling });
    }

    let bounds = scaled_size(scaling, base_size);
    let far = location + size;

    let outside = location.cmplt(DVec2::ZERO).any()
        || location.is_nan()
        || far.cmpgt(bounds.as_dvec2()).any()
        || far.is_nan();

    if outside {
        return Err(InvalidRegion::OutOfBounds {
            location,
            size,
            bounds,
        });
    }

    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
