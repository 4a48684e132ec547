//! Graph edges (directed for display, undirected for connectivity)

use crate::node::NodeId;
use serde::{Deserialize, Serialize};

/// Type of connection between two nodes
///
/// Serialized as an internally tagged `type` field; the claim-claim strength
/// travels in its own `strength` field rather than inside the tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EdgeKind {
    /// Claim cites a source (from raw data)
    SourcedFrom,

    /// Claim is backed by a finding (from raw data)
    SupportedBy,

    /// Two claims share sources, evidence, or wording (inferred)
    RelatedTo {
        /// Shared sources + shared evidence + 1 if the labels are similar
        strength: u32,
    },

    /// Two sources are similar or cited together (inferred)
    Corroborates,

    /// Two findings are similar or used together (inferred)
    Reinforces,
}

impl EdgeKind {
    /// Tag name without the strength suffix
    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeKind::SourcedFrom => "sourced_from",
            EdgeKind::SupportedBy => "supported_by",
            EdgeKind::RelatedTo { .. } => "related_to",
            EdgeKind::Corroborates => "corroborates",
            EdgeKind::Reinforces => "reinforces",
        }
    }

    /// Tag as rendered by older exports, e.g. `related_to_2`
    ///
    /// # Examples
    ///
    /// ```
    /// use factgraph_domain::EdgeKind;
    ///
    /// assert_eq!(EdgeKind::RelatedTo { strength: 2 }.legacy_tag(), "related_to_2");
    /// assert_eq!(EdgeKind::Corroborates.legacy_tag(), "corroborates");
    /// ```
    pub fn legacy_tag(&self) -> String {
        match self {
            EdgeKind::RelatedTo { strength } => format!("related_to_{}", strength),
            other => other.as_str().to_string(),
        }
    }

    /// Whether the edge comes from relationship inference rather than raw records
    pub fn is_inferred(&self) -> bool {
        !matches!(self, EdgeKind::SourcedFrom | EdgeKind::SupportedBy)
    }

    /// Connection strength, for claim-claim edges
    pub fn strength(&self) -> Option<u32> {
        match self {
            EdgeKind::RelatedTo { strength } => Some(*strength),
            _ => None,
        }
    }
}

/// An edge between two nodes
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GraphEdge {
    /// Node the edge is drawn from
    pub source: NodeId,

    /// Node the edge is drawn to
    pub target: NodeId,

    /// Connection type
    #[serde(flatten)]
    pub kind: EdgeKind,
}

impl GraphEdge {
    /// Create an edge
    pub fn new(source: NodeId, target: NodeId, kind: EdgeKind) -> Self {
        Self { source, target, kind }
    }

    /// Whether `id` is either endpoint
    pub fn touches(&self, id: &NodeId) -> bool {
        &self.source == id || &self.target == id
    }

    /// The endpoint opposite `id`, if `id` is an endpoint
    pub fn other_end(&self, id: &NodeId) -> Option<&NodeId> {
        if &self.source == id {
            Some(&self.target)
        } else if &self.target == id {
            Some(&self.source)
        } else {
            None
        }
    }

    /// Whether both endpoints are the same node
    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }

    /// `(source, target, tag)` triple, handy for set comparisons
    pub fn triple(&self) -> (String, String, String) {
        (
            self.source.to_string(),
            self.target.to_string(),
            self.kind.legacy_tag(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_serialization_shape() {
        let edge = GraphEdge::new(
            NodeId::claim("a"),
            NodeId::claim("b"),
            EdgeKind::RelatedTo { strength: 3 },
        );
        let value = serde_json::to_value(&edge).unwrap();
        assert_eq!(value["source"], "claim-a");
        assert_eq!(value["target"], "claim-b");
        assert_eq!(value["type"], "related_to");
        assert_eq!(value["strength"], 3);

        let plain = GraphEdge::new(NodeId::claim("a"), NodeId::source("x"), EdgeKind::SourcedFrom);
        let value = serde_json::to_value(&plain).unwrap();
        assert_eq!(value["type"], "sourced_from");
        assert!(value.get("strength").is_none());
    }

    #[test]
    fn test_edge_deserializes_from_export() {
        let json = r#"{"source": "claim-a", "target": "claim-b", "type": "related_to", "strength": 1}"#;
        let edge: GraphEdge = serde_json::from_str(json).unwrap();
        assert_eq!(edge.kind, EdgeKind::RelatedTo { strength: 1 });
    }

    #[test]
    fn test_other_end() {
        let a = NodeId::claim("a");
        let s = NodeId::source("s");
        let edge = GraphEdge::new(a.clone(), s.clone(), EdgeKind::SourcedFrom);

        assert_eq!(edge.other_end(&a), Some(&s));
        assert_eq!(edge.other_end(&s), Some(&a));
        assert_eq!(edge.other_end(&NodeId::claim("z")), None);
        assert!(edge.touches(&s));
        assert!(!edge.is_self_loop());
    }

    #[test]
    fn test_inferred_kinds() {
        assert!(!EdgeKind::SourcedFrom.is_inferred());
        assert!(!EdgeKind::SupportedBy.is_inferred());
        assert!(EdgeKind::RelatedTo { strength: 1 }.is_inferred());
        assert!(EdgeKind::Corroborates.is_inferred());
        assert!(EdgeKind::Reinforces.is_inferred());
    }
}
