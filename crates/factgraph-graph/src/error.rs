//! Error types for graph operations

use thiserror::Error;

/// Errors that can occur while building or editing a graph
#[derive(Error, Debug)]
pub enum GraphError {
    /// A node id that could never exist in a graph was passed in
    #[error("Invalid node id: {0}")]
    InvalidNodeId(String),

    /// A well-formed node id that is not in the graph
    #[error("Node not found: {0}")]
    NodeNotFound(String),

    /// The claim store failed to deliver records
    #[error("Claim source error: {0}")]
    Source(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Serialization of an export payload failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Graph configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// A value is outside its allowed range
    #[error("Invalid configuration value for {field}: {reason}")]
    InvalidValue {
        /// Offending field
        field: String,
        /// What is wrong with it
        reason: String,
    },
}
