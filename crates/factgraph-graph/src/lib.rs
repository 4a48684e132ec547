//! Factgraph Graph Engine
//!
//! Turns a user's claim history into a knowledge graph of claims, sources and
//! evidence, then adds the relationships the records only imply.
//!
//! The engine provides:
//! - Projection of claim records into nodes and raw edges ([`GraphBuilder`])
//! - Same-type relationship inference ([`RelationshipInferencer`])
//! - Non-destructive filtered views ([`NodeFilter`], [`Graph::view`])
//! - Node deletion with edge cascade ([`delete_node`])
//! - Export payloads ([`GraphExport`], [`NodeReport`])
//! - A last-write-wins refresh session ([`GraphSession`])
//!
//! # Examples
//!
//! ```
//! use factgraph_domain::{AnalysisResult, ClaimRecord, Credibility, SourceRef};
//! use factgraph_graph::{GraphConfig, KnowledgeGraph};
//!
//! let cdc = SourceRef::new("CDC Report", "https://cdc.gov", Credibility::High);
//! let records = vec![
//!     ClaimRecord::new("a", "Masks reduce transmission")
//!         .with_analysis(AnalysisResult::new(80.0).with_source(cdc.clone())),
//!     ClaimRecord::new("b", "Vitamin supplements cure colds")
//!         .with_analysis(AnalysisResult::new(20.0).with_source(cdc)),
//! ];
//!
//! let built = KnowledgeGraph::from_records(&records, &GraphConfig::default());
//! assert_eq!(built.graph.nodes.len(), 3);
//! assert!(built.activation.is_some());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod builder;
pub mod config;
mod error;
pub mod export;
pub mod filter;
pub mod graph;
pub mod inference;
pub mod layout;
pub mod session;
pub mod similarity;

pub use builder::{truncate_label, GraphBuilder};
pub use config::{BuilderConfig, GraphConfig, InferenceConfig};
pub use error::{ConfigError, GraphError};
pub use export::{Direction, GraphExport, LinkedNode, NodeReport, ReportStatistics};
pub use filter::{filter_nodes, NodeFilter};
pub use graph::{delete_node, Graph, GraphStatistics, Removal};
pub use inference::{Inference, RelationshipInferencer};
pub use layout::{BandLayout, Layout, Slot};
pub use session::{GraphSession, KnowledgeGraph, RefreshOutcome, RefreshTicket};
pub use similarity::text_similarity;
