//! Configuration for region planning.
//!
//! The planner has a single tunable: the resampling kernel, whose support
//! radius decides how much border is fetched around each region.
//!
//! Configuration can come from:
//! - JSON (e.g. an embedding service's config file)
//! - Environment variables with the `WSI_REGION_` prefix
//! - Defaults (Lanczos3)
//!
//! # Environment Variables
//!
//! - `WSI_REGION_KERNEL` - Resampling kernel: nearest, bilinear, bicubic, lanczos3

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::kernel::ResampleKernel;

/// Environment variable selecting the resampling kernel.
pub const KERNEL_ENV_VAR: &str = "WSI_REGION_KERNEL";

/// Planner settings.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlannerConfig {
    /// Kernel used by the resampler; its support radius sizes the fetch padding.
    pub kernel: ResampleKernel,
}

impl PlannerConfig {
    pub fn new(kernel: ResampleKernel) -> Self {
        Self { kernel }
    }

    /// Parse from a JSON document. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Defaults overridden by `WSI_REGION_*` environment variables.
    ///
    /// There is no command line to bind them through, so they are read from
    /// the process environment directly.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(kernel) = lookup(KERNEL_ENV_VAR) {
            config.kernel = kernel.parse()?;
        }
        Ok(config)
    }

    /// Support radius in output-pixel units.
    pub fn support_radius(&self) -> f64 {
        self.kernel.support()
    }
}

// =============================================================================
// Tests
// =============================================================================
