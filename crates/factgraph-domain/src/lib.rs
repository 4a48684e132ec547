//! Factgraph Domain Layer
//!
//! Value types shared by every other factgraph crate. Nothing here performs I/O:
//! claim records arrive from a [`traits::ClaimSource`], get projected into
//! [`GraphNode`]s and [`GraphEdge`]s by `factgraph-graph`, and leave through
//! whatever export sink the caller wires up.
//!
//! ## Key Concepts
//!
//! - **Claim record**: a user-submitted statement plus an optional analysis result
//! - **Node**: a claim, a cited source, or a piece of evidence, keyed by a [`NodeId`]
//! - **Edge**: a typed connection between two nodes; raw (from records) or inferred
//! - **Status**: verified / warning / refuted / neutral, derived from a 0-100 score

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod edge;
pub mod node;
pub mod record;
pub mod traits;

// Re-exports for convenience
pub use edge::{EdgeKind, GraphEdge};
pub use node::{normalize_label, GraphNode, NodeId, NodeStatus, NodeType, Position, SourceData};
pub use record::{AnalysisResult, ClaimRecord, Credibility, ReasoningRef, SourceRef};
pub use traits::{Activation, ClaimSource, NotificationSink, NullSink};
