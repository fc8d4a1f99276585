//! Resampling kernels and their support radii.
//!
//! The planner never evaluates a kernel. It only needs to know how many source
//! samples a kernel reads on each side of an output sample, so that the fetched
//! native region carries enough border for the resampler.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Interpolation kernel handed to the resampler.
///
/// Support radii follow Pillow's filters, expressed in output-pixel units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResampleKernel {
    Nearest,
    Bilinear,
    Bicubic,
    #[default]
    Lanczos3,
}

impl ResampleKernel {
    /// Base support radius in output-pixel units.
    pub fn support(self) -> f64 {
        match self {
            ResampleKernel::Nearest => 0.5,
            ResampleKernel::Bilinear => 1.0,
            ResampleKernel::Bicubic => 2.0,
            ResampleKernel::Lanczos3 => 3.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ResampleKernel::Nearest => "nearest",
            ResampleKernel::Bilinear => "bilinear",
            ResampleKernel::Bicubic => "bicubic",
            ResampleKernel::Lanczos3 => "lanczos3",
        }
    }
}

impl fmt::Display for ResampleKernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ResampleKernel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nearest" => Ok(ResampleKernel::Nearest),
            "bilinear" | "linear" => Ok(ResampleKernel::Bilinear),
            "bicubic" | "cubic" => Ok(ResampleKernel::Bicubic),
            "lanczos" | "lanczos3" => Ok(ResampleKernel::Lanczos3),
            other => Err(ConfigError::UnknownKernel(other.to_string())),
        }
    }
}
