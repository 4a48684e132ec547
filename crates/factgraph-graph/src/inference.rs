//! Relationship inference between nodes of the same type
//!
//! Three independent passes over unordered pairs, in node insertion order:
//!
//! | Pair | Connected when | Edge |
//! |------|----------------|------|
//! | claim / claim | shared source, shared evidence, or similar labels | `related_to` with strength |
//! | source / source | similar titles or cited by a common claim | `corroborates` |
//! | evidence / evidence | similar titles or used by a common claim | `reinforces` |
//!
//! Each pass is quadratic in the number of nodes of its type, which stays small
//! (bounded by one user's claim history).

use crate::config::InferenceConfig;
use crate::similarity::text_similarity;
use crate::Graph;
use factgraph_domain::{Activation, EdgeKind, GraphEdge, GraphNode, NodeId, NodeType};
use std::collections::{HashMap, HashSet};

/// Result of one inference pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Inference {
    /// New edges, claim pairs first, then sources, then evidence
    pub edges: Vec<GraphEdge>,

    /// First claim of the first related claim pair, if any pair was related
    pub activation: Option<Activation>,
}

/// Computes same-type edges that are not present in the raw records
#[derive(Debug, Clone, Default)]
pub struct RelationshipInferencer {
    config: InferenceConfig,
}

impl RelationshipInferencer {
    /// Create an inferencer with the given thresholds
    pub fn new(config: InferenceConfig) -> Self {
        Self { config }
    }

    /// Compute additional edges for `graph` without modifying it
    pub fn infer(&self, graph: &Graph) -> Inference {
        let adjacency = Adjacency::from_edges(&graph.edges);
        let mut inference = Inference::default();

        self.relate_claims(graph, &adjacency, &mut inference);
        let claim_edges = inference.edges.len();

        self.link_cited(
            graph,
            NodeType::Source,
            &adjacency.citing,
            self.config.source_similarity_threshold,
            EdgeKind::Corroborates,
            &mut inference.edges,
        );
        let source_edges = inference.edges.len() - claim_edges;

        self.link_cited(
            graph,
            NodeType::Evidence,
            &adjacency.using,
            self.config.evidence_similarity_threshold,
            EdgeKind::Reinforces,
            &mut inference.edges,
        );
        let evidence_edges = inference.edges.len() - claim_edges - source_edges;

        tracing::debug!(
            claim_edges,
            source_edges,
            evidence_edges,
            activated = inference.activation.is_some(),
            "Inferred relationships"
        );

        inference
    }

    /// Compute additional edges and append them to `graph`
    pub fn infer_into(&self, graph: &mut Graph) -> Option<Activation> {
        let inference = self.infer(graph);
        graph.edges.extend(inference.edges);
        inference.activation
    }

    fn relate_claims(&self, graph: &Graph, adjacency: &Adjacency<'_>, inference: &mut Inference) {
        let claims: Vec<&GraphNode> = graph.nodes_of_type(NodeType::Claim).collect();

        for (first, second) in pairs(&claims) {
            let common_sources = adjacency.sources.common(&first.id, &second.id);
            let common_evidence = adjacency.evidence.common(&first.id, &second.id);
            let similar = text_similarity(&first.label, &second.label, self.config.min_token_chars)
                > self.config.claim_similarity_threshold;

            if common_sources == 0 && common_evidence == 0 && !similar {
                continue;
            }

            let strength = (common_sources + common_evidence) as u32 + u32::from(similar);
            inference.edges.push(GraphEdge::new(
                first.id.clone(),
                second.id.clone(),
                EdgeKind::RelatedTo { strength },
            ));

            if inference.activation.is_none() {
                inference.activation = Some(Activation {
                    node_id: first.id.clone(),
                    label: first.label.clone(),
                });
            }
        }
    }

    fn link_cited(
        &self,
        graph: &Graph,
        node_type: NodeType,
        cited_by: &Neighbors<'_>,
        threshold: f64,
        kind: EdgeKind,
        edges: &mut Vec<GraphEdge>,
    ) {
        let nodes: Vec<&GraphNode> = graph.nodes_of_type(node_type).collect();

        for (first, second) in pairs(&nodes) {
            let similar = text_similarity(&first.label, &second.label, self.config.min_token_chars) > threshold;
            if similar || cited_by.common(&first.id, &second.id) > 0 {
                edges.push(GraphEdge::new(first.id.clone(), second.id.clone(), kind));
            }
        }
    }
}

/// Unordered pairs `(nodes[i], nodes[j])` with `i < j`, skipping equal ids
fn pairs<'a>(nodes: &'a [&'a GraphNode]) -> impl Iterator<Item = (&'a GraphNode, &'a GraphNode)> + 'a {
    nodes.iter().enumerate().flat_map(move |(i, first)| {
        nodes[i + 1..]
            .iter()
            .filter(move |second| second.id != first.id)
            .map(move |second| (*first, *second))
    })
}

/// One direction of one raw edge type, as a neighbor-set lookup
#[derive(Default)]
struct Neighbors<'a>(HashMap<&'a NodeId, HashSet<&'a NodeId>>);

impl<'a> Neighbors<'a> {
    fn insert(&mut self, from: &'a NodeId, to: &'a NodeId) {
        self.0.entry(from).or_default().insert(to);
    }

    fn common(&self, a: &NodeId, b: &NodeId) -> usize {
        match (self.0.get(a), self.0.get(b)) {
            (Some(left), Some(right)) => left.intersection(right).count(),
            _ => 0,
        }
    }
}

/// Raw edge lookups used by the passes
#[derive(Default)]
struct Adjacency<'a> {
    /// claim -> sources it cites
    sources: Neighbors<'a>,
    /// claim -> evidence it uses
    evidence: Neighbors<'a>,
    /// source -> claims citing it
    citing: Neighbors<'a>,
    /// evidence -> claims using it
    using: Neighbors<'a>,
}

impl<'a> Adjacency<'a> {
    fn from_edges(edges: &'a [GraphEdge]) -> Self {
        let mut adjacency = Self::default();
        for edge in edges {
            match edge.kind {
                EdgeKind::SourcedFrom => {
                    adjacency.sources.insert(&edge.source, &edge.target);
                    adjacency.citing.insert(&edge.target, &edge.source);
                }
                EdgeKind::SupportedBy => {
                    adjacency.evidence.insert(&edge.source, &edge.target);
                    adjacency.using.insert(&edge.target, &edge.source);
                }
                _ => {}
            }
        }
        adjacency
    }
}
