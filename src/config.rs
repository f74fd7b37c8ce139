//! Engine configuration
//!
//! Every field is optional in JSON; missing fields take their defaults.
//! None of these settings changes a computed checksum.

use serde::{Deserialize, Serialize};

use crate::checksum::{ChecksumError, ChecksumResult};
use crate::observability::Severity;

/// Configuration for a [`ChecksumEngine`](crate::ChecksumEngine)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Number of leading byte indices traced at TRACE level during `calculate`
    #[serde(default = "default_trace_bytes")]
    pub trace_bytes: usize,

    /// Known save sizes; `verify` warns on any other length. Empty disables.
    #[serde(default = "default_known_sizes")]
    pub known_sizes: Vec<usize>,

    /// Minimum severity the engine emits: TRACE, INFO, WARN, ERROR or FATAL
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_trace_bytes() -> usize {
    32
}
fn default_known_sizes() -> Vec<usize> {
    vec![454656, 448000]
}
fn default_log_level() -> String {
    "ERROR".to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            trace_bytes: default_trace_bytes(),
            known_sizes: default_known_sizes(),
            log_level: default_log_level(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate configuration from a JSON document
    pub fn from_json_str(json: &str) -> ChecksumResult<Self> {
        let config: EngineConfig = serde_json::from_str(json)
            .map_err(|e| ChecksumError::Config(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> ChecksumResult<()> {
        self.severity()?;

        if self.known_sizes.contains(&0) {
            return Err(ChecksumError::Config(
                "known_sizes must not contain 0".to_string(),
            ));
        }

        Ok(())
    }

    /// The configured log level as a severity
    pub fn severity(&self) -> ChecksumResult<Severity> {
        self.log_level.parse::<Severity>().map_err(ChecksumError::Config)
    }

    /// Whether `len` is one of the known save sizes (always true if none are configured)
    pub fn is_known_size(&self, len: usize) -> bool {
        self.known_sizes.is_empty() || self.known_sizes.contains(&len)
    }
}
