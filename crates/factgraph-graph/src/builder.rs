//! Projection of claim records into the base graph
//!
//! One claim node per analysed record, one source node per distinct cited
//! title, one evidence node per distinct finding title. Every citation and
//! finding contributes its own edge from the citing claim, so a source shared by
//! three claims ends up with one node and three `sourced_from` edges.

use crate::config::BuilderConfig;
use crate::layout::{BandLayout, Layout, Slot};
use crate::Graph;
use factgraph_domain::{
    AnalysisResult, ClaimRecord, EdgeKind, GraphEdge, GraphNode, NodeId, NodeStatus, NodeType,
    Position, ReasoningRef, SourceData, SourceRef,
};
use std::collections::{HashMap, HashSet};

/// Builds the base graph from claim records
///
/// # Examples
///
/// ```
/// use factgraph_domain::{AnalysisResult, ClaimRecord, Credibility, SourceRef};
/// use factgraph_graph::{BuilderConfig, GraphBuilder};
///
/// let records = vec![
///     ClaimRecord::new("a", "Coffee improves focus").with_analysis(
///         AnalysisResult::new(75.0)
///             .with_source(SourceRef::new("Sleep Journal", "", Credibility::Medium)),
///     ),
///     ClaimRecord::new("b", "Pending claim"),
/// ];
///
/// let graph = GraphBuilder::new(BuilderConfig::default()).build(&records);
/// assert_eq!(graph.nodes.len(), 2);
/// assert_eq!(graph.edges.len(), 1);
/// ```
pub struct GraphBuilder<L: Layout = BandLayout> {
    config: BuilderConfig,
    layout: L,
}

impl Default for GraphBuilder<BandLayout> {
    fn default() -> Self {
        Self::new(BuilderConfig::default())
    }
}

impl GraphBuilder<BandLayout> {
    /// Create a builder with the default band layout
    pub fn new(config: BuilderConfig) -> Self {
        Self::with_layout(config, BandLayout::default())
    }
}

impl<L: Layout> GraphBuilder<L> {
    /// Create a builder with a custom layout
    pub fn with_layout(config: BuilderConfig, layout: L) -> Self {
        Self { config, layout }
    }

    /// Project `records` into nodes and raw edges
    ///
    /// Records without an analysis result are skipped. So are records with a
    /// blank id or an id already seen earlier in the list, and references whose
    /// title is blank.
    pub fn build(&mut self, records: &[ClaimRecord]) -> Graph {
        let mut state = BuildState::default();

        for record in records {
            let Some(analysis) = &record.analysis_result else {
                tracing::trace!(record = %record.id, "Skipping record without analysis");
                continue;
            };

            if record.id.trim().is_empty() {
                tracing::warn!("Skipping analysed record with a blank id");
                continue;
            }

            let claim_id = NodeId::claim(&record.id);
            if state.index.contains_key(&claim_id) {
                tracing::warn!(record = %record.id, "Skipping duplicate claim record");
                continue;
            }

            self.add_claim(&mut state, record, analysis, claim_id);
            state.band += 1;
        }

        tracing::debug!(
            records = records.len(),
            nodes = state.graph.nodes.len(),
            edges = state.graph.edges.len(),
            "Built base graph"
        );

        state.graph
    }

    fn add_claim(
        &mut self,
        state: &mut BuildState,
        record: &ClaimRecord,
        analysis: &AnalysisResult,
        claim_id: NodeId,
    ) {
        let position = self.layout.place(Slot {
            record: state.band,
            node_type: NodeType::Claim,
            item: 0,
        });
        state.push_node(GraphNode {
            id: claim_id.clone(),
            node_type: NodeType::Claim,
            label: truncate_label(&record.text, self.config.claim_label_max_chars),
            status: NodeStatus::from_score(analysis.score),
            score: analysis.score,
            position,
            source_data: None,
        });

        for (item, source) in analysis.sources.iter().enumerate() {
            let source_id = NodeId::source(&source.title);
            if !source_id.is_well_formed() {
                tracing::warn!(record = %record.id, "Skipping source with a blank title");
                continue;
            }
            if !state.index.contains_key(&source_id) {
                let position = self.layout.place(Slot {
                    record: state.band,
                    node_type: NodeType::Source,
                    item,
                });
                state.push_node(source_node(source_id.clone(), source, position));
            }
            state.push_edge(GraphEdge::new(claim_id.clone(), source_id, EdgeKind::SourcedFrom));
        }

        for (item, finding) in analysis.reasoning.iter().enumerate() {
            let evidence_id = NodeId::evidence(&finding.title);
            if !evidence_id.is_well_formed() {
                tracing::warn!(record = %record.id, "Skipping finding with a blank title");
                continue;
            }
            if !state.index.contains_key(&evidence_id) {
                let position = self.layout.place(Slot {
                    record: state.band,
                    node_type: NodeType::Evidence,
                    item,
                });
                state.push_node(evidence_node(evidence_id.clone(), finding, position));
            }
            state.push_edge(GraphEdge::new(claim_id.clone(), evidence_id, EdgeKind::SupportedBy));
        }
    }
}

#[derive(Default)]
struct BuildState {
    graph: Graph,
    index: HashMap<NodeId, usize>,
    edge_set: HashSet<GraphEdge>,
    band: usize,
}

impl BuildState {
    fn push_node(&mut self, node: GraphNode) {
        self.index.insert(node.id.clone(), self.graph.nodes.len());
        self.graph.nodes.push(node);
    }

    // A claim citing the same title twice still gets one edge
    fn push_edge(&mut self, edge: GraphEdge) {
        if self.edge_set.insert(edge.clone()) {
            self.graph.edges.push(edge);
        }
    }
}

fn source_node(id: NodeId, source: &SourceRef, position: Position) -> GraphNode {
    let score = source.credibility.score();
    GraphNode {
        id,
        node_type: NodeType::Source,
        label: source.title.clone(),
        status: NodeStatus::from_score(score),
        score,
        position,
        source_data: Some(SourceData {
            credibility: source.credibility,
            url: Some(source.url.clone()).filter(|url| !url.is_empty()),
        }),
    }
}

fn evidence_node(id: NodeId, finding: &ReasoningRef, position: Position) -> GraphNode {
    GraphNode {
        id,
        node_type: NodeType::Evidence,
        label: finding.title.clone(),
        status: finding.status,
        score: finding.status.evidence_score(),
        position,
        source_data: None,
    }
}

/// Cut `text` to `max_chars` characters, appending `...` when anything was cut
pub fn truncate_label(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
