//! Seams to the pixel-handling collaborators.
//!
//! Region planning is pure geometry. Pixels come from a [`TileStore`] and are
//! cropped and resized by a [`Resampler`]; both are supplied by the caller.

use async_trait::async_trait;
use image::RgbaImage;

use crate::error::{FetchError, ResampleError};
use crate::geometry::{CropBox, I64Vec2};
use crate::kernel::ResampleKernel;

/// Source of native-resolution pixels for a pyramidal image.
///
/// Implementations typically wrap a slide reader (local file, object storage).
/// Regions are addressed the way most WSI readers do it: an integer level 0
/// origin plus a level index, and a size in native pixels of that level.
///
/// # Example
///
/// ```ignore
/// struct OpenSlideStore { /* ... */ }
///
/// #[async_trait]
/// impl TileStore for OpenSlideStore {
///     async fn fetch(&self, level: usize, location: I64Vec2, size: (u32, u32))
///         -> Result<RgbaImage, FetchError>
///     {
///         // read_region(location.x, location.y, level, size.0, size.1)
///     }
/// }
/// ```
#[async_trait]
pub trait TileStore: Send + Sync {
    /// Read a region of `level` starting at `level_zero_location`.
    ///
    /// The returned buffer may be smaller than `size` near the image edge; the
    /// caller clips its crop box to the buffer's real dimensions.
    async fn fetch(
        &self,
        level: usize,
        level_zero_location: I64Vec2,
        size: (u32, u32),
    ) -> Result<RgbaImage, FetchError>;
}

/// Crops a fractional box out of a buffer and resizes it.
pub trait Resampler: Send + Sync {
    /// Resample `crop_box` of `buffer` to exactly `output_size` pixels.
    ///
    /// `crop_box` lies inside the buffer. Samples outside the box but inside
    /// the buffer are the kernel support and should be used for interpolation.
    fn resample(
        &self,
        buffer: &RgbaImage,
        crop_box: CropBox,
        output_size: (u32, u32),
        kernel: ResampleKernel,
    ) -> Result<RgbaImage, ResampleError>;
}
