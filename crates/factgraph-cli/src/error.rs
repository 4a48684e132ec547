//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Graph configuration values out of range
    #[error(transparent)]
    GraphConfig(#[from] factgraph_graph::ConfigError),

    /// Graph operation error
    #[error("Graph error: {0}")]
    Graph(#[from] factgraph_graph::GraphError),

    /// Claim store error
    #[error("Store error: {0}")]
    Store(#[from] factgraph_store::StoreError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No user given on the command line, in the environment or in the config
    #[error("No user selected. Pass --user, set FACTGRAPH_USER, or set 'user' in the config file.")]
    NoUser,
}
