use thiserror::Error;

use crate::geometry::{DVec2, I64Vec2};

/// A region request that cannot be served.
///
/// Raised by the region validator before any level selection or planning.
/// The caller is expected to adjust the request; nothing is retried internally.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidRegion {
    /// At least one size component is negative
    #[error("Size values must be non-negative, got ({}, {})", .size.x, .size.y)]
    NegativeSize { size: DVec2 },

    /// The region starts before the origin or extends past the scaled image
    #[error(
        "Requested region is outside level boundaries: location ({}, {}) + size ({}, {}) exceeds ({}, {})",
        .location.x, .location.y, .size.x, .size.y, .bounds.x, .bounds.y
    )]
    OutOfBounds {
        location: DVec2,
        size: DVec2,
        bounds: I64Vec2,
    },

    /// Scaling must be finite and strictly positive
    #[error("Scaling must be a positive finite number, got {scaling}")]
    InvalidScaling { scaling: f64 },
}

/// Errors raised while planning a native region.
///
/// These indicate a descriptor that cannot be planned against; they are fatal
/// for the request and propagate to the caller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanningError {
    /// The pyramid has no levels to select from
    #[error("Pyramid has no levels")]
    EmptyPyramid,

    /// The requested level does not exist in the descriptor
    #[error("Level {level} out of range (pyramid has {level_count} levels)")]
    LevelOutOfRange { level: usize, level_count: usize },
}

/// Errors raised when building a [`crate::pyramid::PyramidDescriptor`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PyramidError {
    /// No levels were supplied
    #[error("Pyramid has no levels")]
    Empty,

    /// Level 0 must be the full-resolution image
    #[error("Level 0 downsample must be 1.0, got ({}, {})", .downsample.x, .downsample.y)]
    NonUnitBaseDownsample { downsample: DVec2 },

    /// Downsample factors must be finite and positive
    #[error("Level {level} has invalid downsample ({}, {})", .downsample.x, .downsample.y)]
    InvalidDownsample { level: usize, downsample: DVec2 },

    /// Downsample factors must not decrease with level index
    #[error("Level {level} downsample is smaller than level {}", .level - 1)]
    DecreasingDownsample { level: usize },

    /// Dimensions must not grow with level index
    #[error("Level {level} dimensions ({}, {}) exceed the previous level", .dimensions.x, .dimensions.y)]
    IncreasingDimensions { level: usize, dimensions: I64Vec2 },

    /// Dimensions must not be negative
    #[error("Level {level} has negative dimensions ({}, {})", .dimensions.x, .dimensions.y)]
    NegativeDimensions { level: usize, dimensions: I64Vec2 },
}

/// Any error that can come out of validating and planning a region request.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegionError {
    /// The request itself is malformed
    #[error("Invalid region: {0}")]
    Invalid(#[from] InvalidRegion),

    /// The pyramid cannot be planned against
    #[error("Planning error: {0}")]
    Planning(#[from] PlanningError),
}

/// Errors reported by a tile store while fetching a native region.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    /// Error from the underlying storage
    #[error("I/O error: {0}")]
    Io(String),

    /// Pixel data could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),

    /// The store does not have the requested level
    #[error("Level {level} not available in tile store")]
    LevelUnavailable { level: usize },
}

/// Errors reported by a resampler.
#[derive(Debug, Clone, Error)]
pub enum ResampleError {
    /// The crop box does not describe a usable area of the source buffer
    #[error("Invalid crop box ({x0}, {y0}, {x1}, {y1}) for {width}x{height} buffer")]
    InvalidCropBox {
        x0: f64,
        y0: f64,
        x1: f64,
        y1: f64,
        width: u32,
        height: u32,
    },

    /// Resampling failed inside the backend
    #[error("Resampling failed: {0}")]
    Backend(String),
}

/// Errors from reading a region end to end.
///
/// Collaborator errors are carried through unchanged.
#[derive(Debug, Clone, Error)]
pub enum ReadRegionError {
    #[error(transparent)]
    Region(#[from] RegionError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Resample(#[from] ResampleError),
}

impl From<InvalidRegion> for ReadRegionError {
    fn from(error: InvalidRegion) -> Self {
        ReadRegionError::Region(error.into())
    }
}

impl From<PlanningError> for ReadRegionError {
    fn from(error: PlanningError) -> Self {
        ReadRegionError::Region(error.into())
    }
}

/// Errors in planner configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration could not be parsed
    #[error("Invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// Unknown resampling kernel name
    #[error("Unknown resampling kernel: {0}")]
    UnknownKernel(String),
}
