//! View-level filtering
//!
//! Filters never touch the graph they read from. [`Graph::view`] returns a copy
//! whose edges are limited to those with both endpoints still visible.

use crate::Graph;
use factgraph_domain::{GraphNode, NodeId, NodeStatus, NodeType};
use std::collections::{BTreeSet, HashSet};

/// Which nodes a view shows
///
/// The default shows everything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeFilter {
    /// Node types to keep
    pub types: BTreeSet<NodeType>,

    /// Statuses to keep
    pub statuses: BTreeSet<NodeStatus>,

    /// Case-insensitive substring the label must contain; empty matches all
    pub search_text: String,
}

impl Default for NodeFilter {
    fn default() -> Self {
        Self {
            types: NodeType::ALL.into_iter().collect(),
            statuses: NodeStatus::ALL.into_iter().collect(),
            search_text: String::new(),
        }
    }
}

impl NodeFilter {
    /// Keep only these types
    pub fn with_types(mut self, types: impl IntoIterator<Item = NodeType>) -> Self {
        self.types = types.into_iter().collect();
        self
    }

    /// Keep only these statuses
    pub fn with_statuses(mut self, statuses: impl IntoIterator<Item = NodeStatus>) -> Self {
        self.statuses = statuses.into_iter().collect();
        self
    }

    /// Require the label to contain `text`
    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    /// Whether `node` passes every criterion
    pub fn matches(&self, node: &GraphNode) -> bool {
        self.types.contains(&node.node_type)
            && self.statuses.contains(&node.status)
            && node.label_contains(&self.search_text)
    }
}

/// Nodes of `graph` that pass `filter`, in graph order
pub fn filter_nodes<'a>(graph: &'a Graph, filter: &NodeFilter) -> Vec<&'a GraphNode> {
    graph.nodes.iter().filter(|n| filter.matches(n)).collect()
}

impl Graph {
    /// Copy of the visible part of the graph
    pub fn view(&self, filter: &NodeFilter) -> Graph {
        let nodes: Vec<GraphNode> = filter_nodes(self, filter).into_iter().cloned().collect();
        let visible: HashSet<&NodeId> = nodes.iter().map(|n| &n.id).collect();
        let edges = self
            .edges
            .iter()
            .filter(|e| visible.contains(&e.source) && visible.contains(&e.target))
            .cloned()
            .collect();

        Graph { nodes, edges }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use factgraph_domain::{EdgeKind, GraphEdge, Position};

    fn node(id: NodeId, node_type: NodeType, status: NodeStatus, label: &str) -> GraphNode {
        GraphNode {
            id,
            node_type,
            label: label.to_string(),
            status,
            score: 0.0,
            position: Position::default(),
            source_data: None,
        }
    }

    fn sample() -> Graph {
        let a = NodeId::claim("a");
        let b = NodeId::claim("b");
        let s = NodeId::source("Nature");
        Graph::from_parts(
            vec![
                node(a.clone(), NodeType::Claim, NodeStatus::Verified, "Bees are declining"),
                node(b.clone(), NodeType::Claim, NodeStatus::Refuted, "Bees are robots"),
                node(s.clone(), NodeType::Source, NodeStatus::Verified, "Nature"),
            ],
            vec![
                GraphEdge::new(a.clone(), s, EdgeKind::SourcedFrom),
                GraphEdge::new(a, b, EdgeKind::RelatedTo { strength: 1 }),
            ],
        )
    }

    #[test]
    fn test_default_filter_keeps_everything() {
        let graph = sample();
        assert_eq!(filter_nodes(&graph, &NodeFilter::default()).len(), 3);
        assert_eq!(graph.view(&NodeFilter::default()), graph);
    }

    #[test]
    fn test_filter_by_type_and_status() {
        let graph = sample();
        let filter = NodeFilter::default()
            .with_types([NodeType::Claim])
            .with_statuses([NodeStatus::Verified]);

        let nodes = filter_nodes(&graph, &filter);
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].id, NodeId::claim("a"));
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let graph = sample();
        let filter = NodeFilter::default().with_search("ROBOTS");
        let nodes = filter_nodes(&graph, &filter);
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].id, NodeId::claim("b"));
    }

    #[test]
    fn test_view_drops_edges_to_hidden_nodes() {
        let graph = sample();
        let view = graph.view(&NodeFilter::default().with_types([NodeType::Claim]));

        assert_eq!(view.nodes.len(), 2);
        assert_eq!(view.edges.len(), 1);
        assert_eq!(view.edges[0].kind, EdgeKind::RelatedTo { strength: 1 });
        assert!(view.dangling_edges().is_empty());

        // underlying graph untouched
        assert_eq!(graph, sample());
    }

    #[test]
    fn test_empty_type_set_hides_everything() {
        let graph = sample();
        let view = graph.view(&NodeFilter::default().with_types([]));
        assert!(view.nodes.is_empty());
        assert!(view.edges.is_empty());
    }
}
