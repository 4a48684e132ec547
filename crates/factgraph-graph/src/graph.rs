//! In-memory knowledge graph and its editing operations

use crate::GraphError;
use factgraph_domain::{EdgeKind, GraphEdge, GraphNode, NodeId, NodeType};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// A set of nodes and the edges between them
///
/// Plain data: serializable, no back-references. Nodes keep insertion order,
/// which the inferencer relies on for deterministic pair enumeration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    /// Nodes in insertion order
    pub nodes: Vec<GraphNode>,

    /// Edges in insertion order
    pub edges: Vec<GraphEdge>,
}

/// What [`Graph::remove_node`] took out
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Removal {
    /// The removed node; `None` if the id was not present
    pub node: Option<GraphNode>,

    /// Every edge that touched the node
    pub edges: Vec<GraphEdge>,
}

impl Removal {
    /// Whether anything was removed
    pub fn is_empty(&self) -> bool {
        self.node.is_none() && self.edges.is_empty()
    }
}

/// Node and edge counts for a graph
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphStatistics {
    /// Total nodes
    pub total_nodes: usize,

    /// Total edges
    pub total_edges: usize,

    /// Nodes per type
    pub nodes_by_type: BTreeMap<NodeType, usize>,

    /// Edges per tag (strength excluded)
    pub edges_by_kind: BTreeMap<String, usize>,

    /// Edges produced by inference
    pub inferred_edges: usize,
}

impl Graph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Assemble a graph from parts
    pub fn from_parts(nodes: Vec<GraphNode>, edges: Vec<GraphEdge>) -> Self {
        Self { nodes, edges }
    }

    /// Whether the graph has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look up a node by id
    pub fn node(&self, id: &NodeId) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| &n.id == id)
    }

    /// Whether a node with this id exists
    pub fn contains(&self, id: &NodeId) -> bool {
        self.node(id).is_some()
    }

    /// Nodes of one type, in insertion order
    pub fn nodes_of_type(&self, node_type: NodeType) -> impl Iterator<Item = &GraphNode> {
        self.nodes.iter().filter(move |n| n.node_type == node_type)
    }

    /// Edges with `id` at either end
    pub fn edges_of<'a>(&'a self, id: &'a NodeId) -> impl Iterator<Item = &'a GraphEdge> + 'a {
        self.edges.iter().filter(move |e| e.touches(id))
    }

    /// Nodes connected to `id`, ignoring direction, without duplicates
    pub fn neighbors(&self, id: &NodeId) -> Vec<&GraphNode> {
        let mut seen = HashSet::new();
        self.edges_of(id)
            .filter_map(|e| e.other_end(id))
            .filter(|other| seen.insert(*other))
            .filter_map(|other| self.node(other))
            .collect()
    }

    /// Edges whose endpoints are not both present
    pub fn dangling_edges(&self) -> Vec<&GraphEdge> {
        let ids: HashSet<&NodeId> = self.nodes.iter().map(|n| &n.id).collect();
        self.edges
            .iter()
            .filter(|e| !ids.contains(&e.source) || !ids.contains(&e.target))
            .collect()
    }

    /// Count nodes and edges
    pub fn statistics(&self) -> GraphStatistics {
        let mut stats = GraphStatistics {
            total_nodes: self.nodes.len(),
            total_edges: self.edges.len(),
            ..Default::default()
        };

        for node in &self.nodes {
            *stats.nodes_by_type.entry(node.node_type).or_insert(0) += 1;
        }
        for edge in &self.edges {
            *stats.edges_by_kind.entry(edge.kind.as_str().to_string()).or_insert(0) += 1;
            if edge.kind.is_inferred() {
                stats.inferred_edges += 1;
            }
        }

        stats
    }

    /// Edges of one kind tag, e.g. every `related_to` edge regardless of strength
    pub fn edges_with_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a GraphEdge> + 'a {
        self.edges.iter().filter(move |e| e.kind.as_str() == tag)
    }

    /// Remove a node and every edge touching it, in place
    ///
    /// Removing a well-formed id that is not in the graph is a no-op and returns
    /// an empty [`Removal`].
    ///
    /// # Errors
    ///
    /// [`GraphError::InvalidNodeId`] if `id` could never name a node (empty,
    /// unknown type prefix, or empty key).
    pub fn remove_node(&mut self, id: &str) -> Result<Removal, GraphError> {
        let id = NodeId::parse(id).map_err(GraphError::InvalidNodeId)?;

        let node = self
            .nodes
            .iter()
            .position(|n| n.id == id)
            .map(|idx| self.nodes.remove(idx));

        let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.edges)
            .into_iter()
            .partition(|e| e.touches(&id));
        self.edges = kept;

        tracing::debug!(
            node = %id,
            found = node.is_some(),
            edges_removed = removed.len(),
            "Removed node"
        );

        Ok(Removal { node, edges: removed })
    }

    /// Inferred claim-claim strength between two claims, if they are related
    pub fn relation_strength(&self, a: &NodeId, b: &NodeId) -> Option<u32> {
        self.edges.iter().find_map(|e| match e.kind {
            EdgeKind::RelatedTo { strength }
                if (&e.source == a && &e.target == b) || (&e.source == b && &e.target == a) =>
            {
                Some(strength)
            }
            _ => None,
        })
    }
}

/// Copy of `graph` without `id` and its incident edges
///
/// The input graph is left untouched. See [`Graph::remove_node`] for the
/// error and no-op rules.
pub fn delete_node(graph: &Graph, id: &str) -> Result<Graph, GraphError> {
    let mut next = graph.clone();
    next.remove_node(id)?;
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use factgraph_domain::{NodeStatus, Position};

    fn node(id: NodeId, node_type: NodeType) -> GraphNode {
        GraphNode {
            label: id.to_string(),
            id,
            node_type,
            status: NodeStatus::Neutral,
            score: 50.0,
            position: Position::default(),
            source_data: None,
        }
    }

    fn sample() -> Graph {
        let a = NodeId::claim("a");
        let b = NodeId::claim("b");
        let s = NodeId::source("shared");
        Graph::from_parts(
            vec![
                node(a.clone(), NodeType::Claim),
                node(b.clone(), NodeType::Claim),
                node(s.clone(), NodeType::Source),
            ],
            vec![
                GraphEdge::new(a.clone(), s.clone(), EdgeKind::SourcedFrom),
                GraphEdge::new(b.clone(), s.clone(), EdgeKind::SourcedFrom),
                GraphEdge::new(a, b, EdgeKind::RelatedTo { strength: 1 }),
            ],
        )
    }

    #[test]
    fn test_remove_node_cascades() {
        let mut graph = sample();
        let removal = graph.remove_node("source-shared").unwrap();

        assert!(removal.node.is_some());
        assert_eq!(removal.edges.len(), 2);
        assert_eq!(graph.nodes.len(), 2);
        assert_eq!(graph.edges.len(), 1);
        assert!(graph.dangling_edges().is_empty());
    }

    #[test]
    fn test_remove_absent_node_is_noop() {
        let mut graph = sample();
        let before = graph.clone();

        let removal = graph.remove_node("claim-missing").unwrap();
        assert!(removal.is_empty());
        assert_eq!(graph, before);
    }

    #[test]
    fn test_remove_malformed_id_is_error() {
        let mut graph = sample();
        assert!(matches!(graph.remove_node(""), Err(GraphError::InvalidNodeId(_))));
        assert!(matches!(graph.remove_node("nonsense"), Err(GraphError::InvalidNodeId(_))));
        assert!(matches!(graph.remove_node("claim-"), Err(GraphError::InvalidNodeId(_))));
        assert_eq!(graph, sample());
    }

    #[test]
    fn test_delete_node_leaves_input_alone() {
        let graph = sample();
        let next = delete_node(&graph, "claim-a").unwrap();

        assert_eq!(graph, sample());
        assert!(!next.contains(&NodeId::claim("a")));
        assert!(next.edges.iter().all(|e| !e.touches(&NodeId::claim("a"))));
        assert_eq!(next.edges.len(), 1);
    }

    #[test]
    fn test_neighbors_are_undirected() {
        let graph = sample();
        let s = NodeId::source("shared");
        let neighbors: Vec<_> = graph.neighbors(&s).iter().map(|n| n.id.to_string()).collect();
        assert_eq!(neighbors, vec!["claim-a", "claim-b"]);

        let b = NodeId::claim("b");
        assert_eq!(graph.neighbors(&b).len(), 2);
    }

    #[test]
    fn test_statistics() {
        let stats = sample().statistics();
        assert_eq!(stats.total_nodes, 3);
        assert_eq!(stats.total_edges, 3);
        assert_eq!(stats.nodes_by_type[&NodeType::Claim], 2);
        assert_eq!(stats.edges_by_kind["sourced_from"], 2);
        assert_eq!(stats.edges_by_kind["related_to"], 1);
        assert_eq!(stats.inferred_edges, 1);
    }

    #[test]
    fn test_relation_strength_either_direction() {
        let graph = sample();
        let a = NodeId::claim("a");
        let b = NodeId::claim("b");
        assert_eq!(graph.relation_strength(&a, &b), Some(1));
        assert_eq!(graph.relation_strength(&b, &a), Some(1));
        assert_eq!(graph.relation_strength(&a, &NodeId::source("shared")), None);
    }
}
