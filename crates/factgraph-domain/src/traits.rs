//! Trait definitions for external interactions
//!
//! These traits define the boundaries between graph construction and the
//! collaborators around it. Implementations live in other crates.

use crate::{ClaimRecord, NodeId};

/// Trait for fetching stored claim records
///
/// Implemented by the infrastructure layer (factgraph-store)
pub trait ClaimSource {
    /// Error type for fetch operations
    type Error;

    /// List up to `limit` claims owned by `user_id`
    ///
    /// Callers must not assume any ordering.
    fn list_claims_for_user(&self, user_id: &str, limit: usize) -> Result<Vec<ClaimRecord>, Self::Error>;
}

/// A claim that gained its first claim-claim connection during inference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activation {
    /// Id of the activated claim node
    pub node_id: NodeId,

    /// Label of the activated claim node
    pub label: String,
}

/// Receiver for transient user-facing notifications
pub trait NotificationSink {
    /// Called once per inference pass that connected at least one pair of claims
    fn node_activated(&mut self, activation: &Activation);
}

/// Sink that drops every notification
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl NotificationSink for NullSink {
    fn node_activated(&mut self, _activation: &Activation) {}
}

impl<F> NotificationSink for F
where
    F: FnMut(&Activation),
{
    fn node_activated(&mut self, activation: &Activation) {
        self(activation)
    }
}
