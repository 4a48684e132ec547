//! Records-to-graph pipeline and the refresh session that owns its result

use crate::builder::GraphBuilder;
use crate::filter::NodeFilter;
use crate::graph::Removal;
use crate::inference::RelationshipInferencer;
use crate::{Graph, GraphConfig, GraphError};
use factgraph_domain::{Activation, ClaimRecord, ClaimSource, NotificationSink, NullSink};
use std::fmt::Display;

/// A fully built graph: base nodes and edges plus inferred edges
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KnowledgeGraph {
    /// The graph
    pub graph: Graph,

    /// Claim activated by the inference pass, if any
    pub activation: Option<Activation>,
}

impl KnowledgeGraph {
    /// Run the builder and the inferencer over `records`
    ///
    /// Pure: the same records in the same order always give the same node ids
    /// and the same edges.
    pub fn from_records(records: &[ClaimRecord], config: &GraphConfig) -> Self {
        let mut graph = GraphBuilder::new(config.builder.clone()).build(records);
        let activation = RelationshipInferencer::new(config.inference.clone()).infer_into(&mut graph);
        Self { graph, activation }
    }
}

/// Handle for one in-flight refresh
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RefreshTicket(u64);

impl RefreshTicket {
    /// Sequence number; later refreshes have larger numbers
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

/// What happened to a completed refresh
#[derive(Debug, Clone, PartialEq)]
pub enum RefreshOutcome {
    /// The new graph replaced the old one
    Applied {
        /// Nodes in the new graph
        nodes: usize,
        /// Edges in the new graph
        edges: usize,
        /// Claim activated by inference, if any
        activation: Option<Activation>,
    },

    /// A newer refresh finished first; this result was dropped
    Stale,
}

/// Owns the current graph and applies refreshes last-write-wins
///
/// Call [`begin_refresh`](Self::begin_refresh) before fetching records and hand
/// the ticket back to [`complete_refresh`](Self::complete_refresh) with the
/// fetched records. A result is dropped once a newer refresh has been applied,
/// so the latest fetch wins whichever order the fetches finish in.
///
/// # Examples
///
/// ```
/// use factgraph_domain::{AnalysisResult, ClaimRecord};
/// use factgraph_graph::{GraphConfig, GraphSession, RefreshOutcome};
///
/// let mut session = GraphSession::new(GraphConfig::default());
/// let records = vec![ClaimRecord::new("a", "claim").with_analysis(AnalysisResult::new(90.0))];
///
/// let slow = session.begin_refresh();
/// let fast = session.begin_refresh();
///
/// assert!(matches!(session.complete_refresh(fast, &records), RefreshOutcome::Applied { .. }));
/// assert_eq!(session.complete_refresh(slow, &[]), RefreshOutcome::Stale);
/// assert_eq!(session.graph().nodes.len(), 1);
/// ```
pub struct GraphSession<N: NotificationSink = NullSink> {
    config: GraphConfig,
    sink: N,
    graph: Graph,
    issued: u64,
    applied: Option<u64>,
}

impl GraphSession<NullSink> {
    /// Create a session that discards notifications
    pub fn new(config: GraphConfig) -> Self {
        Self::with_sink(config, NullSink)
    }
}

impl<N: NotificationSink> GraphSession<N> {
    /// Create a session that forwards activations to `sink`
    pub fn with_sink(config: GraphConfig, sink: N) -> Self {
        Self {
            config,
            sink,
            graph: Graph::new(),
            issued: 0,
            applied: None,
        }
    }

    /// The current graph
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// The session configuration
    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Sequence number of the refresh whose result is showing, if any
    pub fn applied_sequence(&self) -> Option<u64> {
        self.applied
    }

    /// The visible part of the current graph
    pub fn view(&self, filter: &NodeFilter) -> Graph {
        self.graph.view(filter)
    }

    /// Delete a node from the current graph; the claim store is not touched
    ///
    /// The deletion lasts until the next applied refresh.
    pub fn delete_node(&mut self, id: &str) -> Result<Removal, GraphError> {
        self.graph.remove_node(id)
    }

    /// Start a refresh; its result supersedes any older refresh still in flight
    pub fn begin_refresh(&mut self) -> RefreshTicket {
        self.issued += 1;
        RefreshTicket(self.issued)
    }

    /// Finish a refresh with the records it fetched
    pub fn complete_refresh(&mut self, ticket: RefreshTicket, records: &[ClaimRecord]) -> RefreshOutcome {
        if self.applied.is_some_and(|applied| ticket.0 <= applied) {
            tracing::debug!(
                ticket = ticket.0,
                applied = ?self.applied,
                "Dropping superseded refresh"
            );
            return RefreshOutcome::Stale;
        }

        let built = KnowledgeGraph::from_records(records, &self.config);
        self.graph = built.graph;
        self.applied = Some(ticket.0);

        tracing::info!(
            ticket = ticket.0,
            nodes = self.graph.nodes.len(),
            edges = self.graph.edges.len(),
            "Knowledge graph refreshed"
        );

        if let Some(activation) = &built.activation {
            self.sink.node_activated(activation);
        }

        RefreshOutcome::Applied {
            nodes: self.graph.nodes.len(),
            edges: self.graph.edges.len(),
            activation: built.activation,
        }
    }

    /// Fetch `user_id`'s records from `source` and rebuild
    pub fn refresh_from<S>(&mut self, source: &S, user_id: &str) -> Result<RefreshOutcome, GraphError>
    where
        S: ClaimSource,
        S::Error: Display,
    {
        let ticket = self.begin_refresh();
        let records = source
            .list_claims_for_user(user_id, self.config.history_limit)
            .map_err(|e| GraphError::Source(e.to_string()))?;
        Ok(self.complete_refresh(ticket, &records))
    }
}
