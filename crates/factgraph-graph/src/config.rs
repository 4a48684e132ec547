//! Configuration for graph construction
//!
//! Loaded from TOML; every field has a default so partial files are fine.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level graph configuration
///
/// # Examples
///
/// ```
/// use factgraph_graph::GraphConfig;
///
/// let config = GraphConfig::from_toml_str(r#"
///     history_limit = 25
///
///     [inference]
///     source_similarity_threshold = 0.5
/// "#).unwrap();
///
/// assert_eq!(config.history_limit, 25);
/// assert_eq!(config.inference.source_similarity_threshold, 0.5);
/// assert_eq!(config.inference.claim_similarity_threshold, 0.3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// How many claim records to fetch per rebuild
    pub history_limit: usize,

    /// Node construction settings
    pub builder: BuilderConfig,

    /// Relationship inference thresholds
    pub inference: InferenceConfig,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            history_limit: 100,
            builder: BuilderConfig::default(),
            inference: InferenceConfig::default(),
        }
    }
}

impl GraphConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: GraphConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history_limit == 0 {
            return Err(invalid("history_limit", "must be at least 1"));
        }
        if self.builder.claim_label_max_chars == 0 {
            return Err(invalid("builder.claim_label_max_chars", "must be at least 1"));
        }
        self.inference.validate()
    }
}

/// Settings for turning claim records into nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    /// Claim labels longer than this many characters are cut and suffixed with `...`
    pub claim_label_max_chars: usize,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            claim_label_max_chars: 50,
        }
    }
}

/// Thresholds for relationship inference
///
/// A pair is connected when its label similarity is strictly greater than the
/// threshold for its type (or when it shares neighbors).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InferenceConfig {
    /// Similarity above which two claims are related
    pub claim_similarity_threshold: f64,

    /// Similarity above which two sources corroborate each other
    pub source_similarity_threshold: f64,

    /// Similarity above which two findings reinforce each other
    pub evidence_similarity_threshold: f64,

    /// Tokens shorter than this many characters are ignored by the similarity measure
    pub min_token_chars: usize,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            claim_similarity_threshold: 0.3,
            source_similarity_threshold: 0.4,
            evidence_similarity_threshold: 0.35,
            min_token_chars: 4,
        }
    }
}

impl InferenceConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("inference.claim_similarity_threshold", self.claim_similarity_threshold),
            ("inference.source_similarity_threshold", self.source_similarity_threshold),
            ("inference.evidence_similarity_threshold", self.evidence_similarity_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(invalid(field, "must be in [0, 1]"));
            }
        }
        Ok(())
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = GraphConfig::default();
        assert_eq!(config.history_limit, 100);
        assert_eq!(config.builder.claim_label_max_chars, 50);
        assert_eq!(config.inference.claim_similarity_threshold, 0.3);
        assert_eq!(config.inference.source_similarity_threshold, 0.4);
        assert_eq!(config.inference.evidence_similarity_threshold, 0.35);
        assert_eq!(config.inference.min_token_chars, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = GraphConfig::from_toml_str("").unwrap();
        assert_eq!(config, GraphConfig::default());
    }

    #[test]
    fn test_rejects_out_of_range_threshold() {
        let result = GraphConfig::from_toml_str(
            r#"
            [inference]
            claim_similarity_threshold = 1.5
            "#,
        );
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_rejects_zero_history_limit() {
        let result = GraphConfig::from_toml_str("history_limit = 0");
        assert!(result.is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[builder]\nclaim_label_max_chars = 80").unwrap();

        let config = GraphConfig::from_file(file.path()).unwrap();
        assert_eq!(config.builder.claim_label_max_chars, 80);
        assert_eq!(config.history_limit, 100);
    }

    #[test]
    fn test_missing_file() {
        let result = GraphConfig::from_file("/nonexistent/factgraph.toml");
        assert!(matches!(result, Err(ConfigError::FileRead(_))));
    }
}
