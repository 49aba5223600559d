use crate::error::{DedupError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunables for near-duplicate detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DedupConfig {
    /// Cosine similarity a pair must strictly exceed to be merged.
    pub similarity_threshold: f64,
    /// Drop documents with no semantic signal instead of keeping them as singletons.
    pub remove_zero_signal: bool,
    /// Number of neighbouring length blocks (each side) visited by the window pass.
    pub window_radius: usize,
    /// Log pass-3 progress every this many representatives.
    pub progress_interval: usize,
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: 0.99,
            remove_zero_signal: true,
            window_radius: 2,
            progress_interval: 1000,
        }
    }
}

impl DedupConfig {
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.similarity_threshold = threshold;
        self
    }

    pub fn with_remove_zero_signal(mut self, remove: bool) -> Self {
        self.remove_zero_signal = remove;
        self
    }

    pub fn with_window_radius(mut self, radius: usize) -> Self {
        self.window_radius = radius;
        self
    }

    pub fn validate(&self) -> Result<()> {
        let t = self.similarity_threshold;
        if !t.is_finite() || t <= 0.0 || t >= 1.0 {
            return Err(DedupError::InvalidConfig(format!(
                "similarity_threshold must lie in (0, 1), got {t}"
            )));
        }
        if self.progress_interval == 0 {
            return Err(DedupError::InvalidConfig(
                "progress_interval must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }
}
