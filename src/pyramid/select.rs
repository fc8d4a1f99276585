//! Pyramid level selection.

use crate::error::PlanningError;

/// Choose the level to sample from for a requested inverse scaling.
///
/// Returns the largest level index whose downsample is `<= inverse_scaling`,
/// i.e. the coarsest level that still has at least the requested resolution.
/// Requests finer than level 0 get level 0 and are upsampled from it.
///
/// `downsamples` is indexed by level. An empty slice is a malformed pyramid.
pub fn select_level(inverse_scaling: f64, downsamples: &[f64]) -> Result<usize, PlanningError> {
    if downsamples.is_empty() {
        return Err(PlanningError::EmptyPyramid);
    }

    Ok(downsamples
        .iter()
        .rposition(|&d| d <= inverse_scaling)
        .unwrap_or(0))
}
