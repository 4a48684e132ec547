//! Serializable payloads for export sinks (clipboard, file download)

use crate::{Graph, GraphError};
use chrono::{DateTime, Utc};
use factgraph_domain::{GraphEdge, GraphNode, NodeId};
use serde::{Deserialize, Serialize};

/// Whole-graph snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphExport {
    /// Exported nodes
    pub nodes: Vec<GraphNode>,

    /// Exported edges
    pub links: Vec<GraphEdge>,

    /// When the snapshot was taken
    pub timestamp: DateTime<Utc>,

    /// Who the graph belongs to
    pub user: Option<String>,
}

impl GraphExport {
    /// Snapshot `graph`
    pub fn new(graph: &Graph, user: Option<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            nodes: graph.nodes.clone(),
            links: graph.edges.clone(),
            timestamp,
            user,
        }
    }

    /// Pretty-printed JSON
    pub fn to_json_pretty(&self) -> Result<String, GraphError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Which end of an edge the selected node sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// The selected node is the edge source
    Outbound,
    /// The selected node is the edge target
    Inbound,
}

/// A node connected to the selected one
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkedNode {
    /// The node at the other end (absent only for dangling edges)
    pub node: Option<GraphNode>,

    /// Edge tag
    pub relationship: String,

    /// Claim-claim strength, when the edge carries one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strength: Option<u32>,

    /// Edge direction relative to the selected node
    pub direction: Direction,
}

/// Counts included in a node report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportStatistics {
    /// Nodes in the graph
    pub total_nodes: usize,

    /// Edges in the graph
    pub total_connections: usize,

    /// Edges touching the selected node
    pub node_connections: usize,
}

/// Per-node report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeReport {
    /// When the report was produced
    pub generated_at: DateTime<Utc>,

    /// The node the report is about
    pub selected_node: GraphNode,

    /// Its connections
    pub linked_nodes: Vec<LinkedNode>,

    /// Graph and node counts
    pub statistics: ReportStatistics,

    /// One-line summary
    pub summary: String,
}

impl NodeReport {
    /// Build a report for `node_id`
    ///
    /// # Errors
    ///
    /// [`GraphError::InvalidNodeId`] for malformed ids and
    /// [`GraphError::NodeNotFound`] when the id is not in the graph.
    pub fn generate(graph: &Graph, node_id: &str, generated_at: DateTime<Utc>) -> Result<Self, GraphError> {
        let id = NodeId::parse(node_id).map_err(GraphError::InvalidNodeId)?;
        let selected = graph
            .node(&id)
            .ok_or_else(|| GraphError::NodeNotFound(node_id.to_string()))?;

        let linked_nodes: Vec<LinkedNode> = graph
            .edges_of(&id)
            .map(|edge| {
                let direction = if edge.source == id {
                    Direction::Outbound
                } else {
                    Direction::Inbound
                };
                LinkedNode {
                    node: edge.other_end(&id).and_then(|other| graph.node(other)).cloned(),
                    relationship: edge.kind.as_str().to_string(),
                    strength: edge.kind.strength(),
                    direction,
                }
            })
            .collect();

        Ok(Self {
            generated_at,
            summary: format!(
                "Analysis Report for \"{}\" - Confidence Score: {}%",
                selected.label, selected.score
            ),
            statistics: ReportStatistics {
                total_nodes: graph.nodes.len(),
                total_connections: graph.edges.len(),
                node_connections: linked_nodes.len(),
            },
            selected_node: selected.clone(),
            linked_nodes,
        })
    }

    /// Suggested download file name
    pub fn file_name(&self) -> String {
        format!(
            "report-{}-{}.json",
            self.selected_node.id,
            self.generated_at.timestamp_millis()
        )
    }

    /// Pretty-printed JSON
    pub fn to_json_pretty(&self) -> Result<String, GraphError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
