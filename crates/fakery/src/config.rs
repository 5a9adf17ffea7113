//! Runtime settings loaded via OrthoConfig.

use ortho_config::OrthoConfig;
use serde::Deserialize;

/// Seed used when none is configured.
const DEFAULT_SEED: u64 = 0;

/// Settings for the `fakery` front end.
///
/// Values come from configuration files and `FAKERY_*` environment
/// variables; command-line flags applied by the binary take precedence.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "FAKERY")]
pub struct FakerySettings {
    /// Seed for the shared random source.
    pub seed: Option<u64>,
    /// Emit logs as JSON rather than plain text.
    #[ortho_config(default = false)]
    pub json_logs: bool,
}

impl FakerySettings {
    /// Return the configured seed, falling back to the default.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed.unwrap_or(DEFAULT_SEED)
    }
}
