// ============================================================
// BOUNDARY CONFIGURATION
// ============================================================
// Input-size limit enforced before bytes reach the core

use figment::{providers::Env, Figment};
use serde::Deserialize;

const DEFAULT_MAX_INPUT_MB: u64 = 10;

/// Configuration for the calling boundary. The analysis core itself takes
/// no configuration and never sees these values.
#[derive(Debug, Clone, Deserialize)]
pub struct BoundaryConfig {
    /// Maximum accepted input size in megabytes (env: CSVSCOPE_MAX_INPUT_MB)
    #[serde(default = "default_max_input_mb")]
    pub max_input_mb: u64,
}

fn default_max_input_mb() -> u64 {
    DEFAULT_MAX_INPUT_MB
}

impl Default for BoundaryConfig {
    fn default() -> Self {
        Self {
            max_input_mb: DEFAULT_MAX_INPUT_MB,
        }
    }
}

impl BoundaryConfig {
    /// Load from `CSVSCOPE_`-prefixed environment variables,
    /// falling back to defaults on malformed values
    pub fn from_env() -> Self {
        Figment::new()
            .merge(Env::prefixed("CSVSCOPE_"))
            .extract()
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Invalid boundary config in environment, using defaults");
                Self::default()
            })
    }

    pub fn max_input_bytes(&self) -> u64 {
        self.max_input_mb * 1024 * 1024
    }
}
