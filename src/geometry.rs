//! Coordinate pairs and crop boxes used throughout region planning.
//!
//! Planning works in two numeric spaces:
//! - [`DVec2`]: fractional positions and sizes (scaled space, native space)
//! - [`I64Vec2`]: integer pixel positions and sizes (level dimensions, fetch regions)
//!
//! Both come from `glam`; all arithmetic is element-wise. The helpers below
//! cover the clipping and size conversions that planning needs on top.

use glam::UVec2;
use serde::{Deserialize, Serialize};

pub use glam::{DVec2, I64Vec2};

/// Clip each component into `[0, bounds]`.
///
/// NaN components clip to zero.
pub fn clip_to(v: DVec2, bounds: I64Vec2) -> DVec2 {
    v.max(DVec2::ZERO).min(bounds.as_dvec2())
}

/// Integer extent of a `(width, height)` buffer.
pub fn extent((width, height): (u32, u32)) -> I64Vec2 {
    UVec2::new(width, height).as_i64vec2()
}

/// Convert to unsigned `(width, height)`, saturating out-of-range values.
pub fn to_dimensions(v: I64Vec2) -> (u32, u32) {
    v.clamp(I64Vec2::ZERO, I64Vec2::splat(u32::MAX as i64))
        .as_uvec2()
        .into()
}

// =============================================================================
// CropBox
// =============================================================================

/// A fractional rectangle `(x0, y0) .. (x1, y1)` inside a fetched buffer.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CropBox {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl CropBox {
    pub const fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Box spanning `origin .. origin + size`.
    pub fn from_origin_size(origin: DVec2, size: DVec2) -> Self {
        let far = origin + size;
        Self::new(origin.x, origin.y, far.x, far.y)
    }

    pub fn origin(&self) -> DVec2 {
        DVec2::new(self.x0, self.y0)
    }

    pub fn far_corner(&self) -> DVec2 {
        DVec2::new(self.x1, self.y1)
    }

    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    /// Clip both corners into `[0, extent]`.
    pub fn clip_to(&self, extent: I64Vec2) -> Self {
        let origin = clip_to(self.origin(), extent);
        let far = clip_to(self.far_corner(), extent);
        Self::new(origin.x, origin.y, far.x, far.y)
    }

    /// True when both corners lie inside `[0, extent]`.
    pub fn is_within(&self, extent: I64Vec2) -> bool {
        let extent = extent.as_dvec2();
        self.x0 >= 0.0
            && self.y0 >= 0.0
            && self.x1 <= extent.x
            && self.y1 <= extent.y
            && self.x0 <= self.x1
            && self.y0 <= self.y1
    }

    pub fn as_tuple(&self) -> (f64, f64, f64, f64) {
        (self.x0, self.y0, self.x1, self.y1)
    }
}

// =============================================================================
// Tests
// =============================================================================
