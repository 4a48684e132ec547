//! Graph nodes and their identity

use crate::record::Credibility;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Score at or above which a node counts as verified
pub const VERIFIED_THRESHOLD: f64 = 70.0;

/// Score at or above which a node counts as a warning (below: refuted)
pub const WARNING_THRESHOLD: f64 = 40.0;

/// Kind of entity a node stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    /// A user-submitted claim
    Claim,
    /// A finding from an analysis' reasoning trace
    Evidence,
    /// A cited reference
    Source,
    /// Reserved for investigative hints; never produced from claim records
    Clue,
}

impl NodeType {
    /// All node types, in display order
    pub const ALL: [NodeType; 4] = [
        NodeType::Claim,
        NodeType::Evidence,
        NodeType::Source,
        NodeType::Clue,
    ];

    /// Type name as used in ids and exports
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::Claim => "claim",
            NodeType::Evidence => "evidence",
            NodeType::Source => "source",
            NodeType::Clue => "clue",
        }
    }

    /// Parse a node type from its name (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "claim" => Some(NodeType::Claim),
            "evidence" => Some(NodeType::Evidence),
            "source" => Some(NodeType::Source),
            "clue" => Some(NodeType::Clue),
            _ => None,
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Verdict attached to a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeStatus {
    /// Supported by the analysis
    Verified,
    /// Partially supported or disputed
    Warning,
    /// Contradicted by the analysis
    Refuted,
    /// No verdict
    Neutral,
}

impl NodeStatus {
    /// All statuses, in display order
    pub const ALL: [NodeStatus; 4] = [
        NodeStatus::Verified,
        NodeStatus::Warning,
        NodeStatus::Refuted,
        NodeStatus::Neutral,
    ];

    /// Derive a status from a 0-100 score
    ///
    /// # Examples
    ///
    /// ```
    /// use factgraph_domain::NodeStatus;
    ///
    /// assert_eq!(NodeStatus::from_score(70.0), NodeStatus::Verified);
    /// assert_eq!(NodeStatus::from_score(69.0), NodeStatus::Warning);
    /// assert_eq!(NodeStatus::from_score(39.0), NodeStatus::Refuted);
    /// ```
    pub fn from_score(score: f64) -> Self {
        if score >= VERIFIED_THRESHOLD {
            NodeStatus::Verified
        } else if score >= WARNING_THRESHOLD {
            NodeStatus::Warning
        } else {
            NodeStatus::Refuted
        }
    }

    /// Score given to an evidence node carrying this status
    pub fn evidence_score(&self) -> f64 {
        match self {
            NodeStatus::Verified => 90.0,
            NodeStatus::Warning => 50.0,
            NodeStatus::Refuted | NodeStatus::Neutral => 20.0,
        }
    }

    /// Status name as used in exports
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeStatus::Verified => "verified",
            NodeStatus::Warning => "warning",
            NodeStatus::Refuted => "refuted",
            NodeStatus::Neutral => "neutral",
        }
    }

    /// Parse a status from its name (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "verified" => Some(NodeStatus::Verified),
            "warning" => Some(NodeStatus::Warning),
            "refuted" => Some(NodeStatus::Refuted),
            "neutral" => Some(NodeStatus::Neutral),
            _ => None,
        }
    }
}

impl fmt::Display for NodeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalize a label into the key used for source/evidence identity
///
/// Lowercases, trims, and replaces every whitespace run with a single hyphen.
///
/// # Examples
///
/// ```
/// use factgraph_domain::normalize_label;
///
/// assert_eq!(normalize_label("  CDC   Report "), "cdc-report");
/// ```
pub fn normalize_label(label: &str) -> String {
    label
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Identifier of a node within one graph
///
/// Shaped `<type>-<key>`. Claim keys are record ids; source and evidence keys are
/// normalized labels, so two references with the same title share one node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Id of the claim node for a record
    pub fn claim(record_id: &str) -> Self {
        Self(format!("claim-{}", record_id))
    }

    /// Id of the source node for a cited title
    pub fn source(title: &str) -> Self {
        Self(format!("source-{}", normalize_label(title)))
    }

    /// Id of the evidence node for a finding title
    pub fn evidence(title: &str) -> Self {
        Self(format!("evidence-{}", normalize_label(title)))
    }

    /// Parse and validate an id string
    ///
    /// # Examples
    ///
    /// ```
    /// use factgraph_domain::{NodeId, NodeType};
    ///
    /// let id = NodeId::parse("source-cdc-report").unwrap();
    /// assert_eq!(id.node_type(), Some(NodeType::Source));
    /// assert!(NodeId::parse("source-").is_err());
    /// assert!(NodeId::parse("bogus").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, String> {
        let id = Self(s.to_string());
        match id.split() {
            Some((_, key)) if !key.is_empty() => Ok(id),
            Some(_) => Err(format!("Node id '{}' has an empty key", s)),
            None => Err(format!("Node id '{}' has no known type prefix", s)),
        }
    }

    /// Type encoded in the id prefix
    pub fn node_type(&self) -> Option<NodeType> {
        self.split().map(|(node_type, _)| node_type)
    }

    /// Whether the id has a known prefix and a non-empty key
    pub fn is_well_formed(&self) -> bool {
        matches!(self.split(), Some((_, key)) if !key.is_empty())
    }

    /// Borrow the raw id
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn split(&self) -> Option<(NodeType, &str)> {
        let (prefix, key) = self.0.split_once('-')?;
        NodeType::parse(prefix)
            .filter(|t| t.as_str() == prefix)
            .map(|t| (t, key))
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NodeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for NodeId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for NodeId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Layout hint; carries no meaning for graph identity
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate
    pub y: f64,
}

impl Position {
    /// Create a position
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Citation details kept on source nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceData {
    /// Reliability bucket of the first citation seen
    pub credibility: Credibility,

    /// Location of the cited work, if one was given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// A node in the knowledge graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    /// Unique id within the graph
    pub id: NodeId,

    /// What the node stands for
    #[serde(rename = "type")]
    pub node_type: NodeType,

    /// Display text
    pub label: String,

    /// Verdict derived from the score (claims, sources) or the finding (evidence)
    pub status: NodeStatus,

    /// Score in [0, 100]
    pub score: f64,

    /// Layout hint
    pub position: Position,

    /// Citation details (source nodes only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_data: Option<SourceData>,
}

impl GraphNode {
    /// Whether the label contains `needle`, ignoring case
    pub fn label_contains(&self, needle: &str) -> bool {
        needle.is_empty() || self.label.to_lowercase().contains(&needle.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_thresholds() {
        assert_eq!(NodeStatus::from_score(100.0), NodeStatus::Verified);
        assert_eq!(NodeStatus::from_score(70.0), NodeStatus::Verified);
        assert_eq!(NodeStatus::from_score(69.0), NodeStatus::Warning);
        assert_eq!(NodeStatus::from_score(40.0), NodeStatus::Warning);
        assert_eq!(NodeStatus::from_score(39.0), NodeStatus::Refuted);
        assert_eq!(NodeStatus::from_score(0.0), NodeStatus::Refuted);
    }

    #[test]
    fn test_credibility_maps_through_thresholds() {
        assert_eq!(NodeStatus::from_score(Credibility::High.score()), NodeStatus::Verified);
        assert_eq!(NodeStatus::from_score(Credibility::Medium.score()), NodeStatus::Warning);
        assert_eq!(NodeStatus::from_score(Credibility::Low.score()), NodeStatus::Refuted);
    }

    #[test]
    fn test_evidence_scores() {
        assert_eq!(NodeStatus::Verified.evidence_score(), 90.0);
        assert_eq!(NodeStatus::Warning.evidence_score(), 50.0);
        assert_eq!(NodeStatus::Refuted.evidence_score(), 20.0);
        assert_eq!(NodeStatus::Neutral.evidence_score(), 20.0);
    }

    #[test]
    fn test_normalize_label() {
        assert_eq!(normalize_label("CDC Report"), "cdc-report");
        assert_eq!(normalize_label("CDC\t\n Report"), "cdc-report");
        assert_eq!(normalize_label("cdc report"), normalize_label("CDC  REPORT"));
        assert_eq!(normalize_label("   "), "");
    }

    #[test]
    fn test_node_id_constructors() {
        assert_eq!(NodeId::claim("abc").as_str(), "claim-abc");
        assert_eq!(NodeId::source("WHO Fact Sheet").as_str(), "source-who-fact-sheet");
        assert_eq!(NodeId::evidence("Peer Reviewed Study").as_str(), "evidence-peer-reviewed-study");
        assert_eq!(NodeId::source("WHO Fact Sheet").node_type(), Some(NodeType::Source));
    }

    #[test]
    fn test_node_id_parse_rejects_malformed() {
        assert!(NodeId::parse("").is_err());
        assert!(NodeId::parse("claim").is_err());
        assert!(NodeId::parse("claim-").is_err());
        assert!(NodeId::parse("Claim-abc").is_err());
        assert!(NodeId::parse("widget-abc").is_err());
        assert!(NodeId::parse("claim-abc").is_ok());
        assert!(NodeId::parse("evidence-a-b-c").is_ok());
    }

    #[test]
    fn test_node_serializes_with_type_key() {
        let node = GraphNode {
            id: NodeId::source("CDC Report"),
            node_type: NodeType::Source,
            label: "CDC Report".to_string(),
            status: NodeStatus::Verified,
            score: 85.0,
            position: Position::new(1.0, 2.0),
            source_data: Some(SourceData {
                credibility: Credibility::High,
                url: Some("https://cdc.gov".to_string()),
            }),
        };

        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(value["id"], "source-cdc-report");
        assert_eq!(value["type"], "source");
        assert_eq!(value["status"], "verified");
        assert_eq!(value["sourceData"]["credibility"], "high");
    }

    #[test]
    fn test_label_contains_ignores_case() {
        let node = GraphNode {
            id: NodeId::claim("1"),
            node_type: NodeType::Claim,
            label: "The Moon Landing".to_string(),
            status: NodeStatus::Verified,
            score: 95.0,
            position: Position::default(),
            source_data: None,
        };
        assert!(node.label_contains(""));
        assert!(node.label_contains("moon"));
        assert!(node.label_contains("LANDING"));
        assert!(!node.label_contains("mars"));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: normalization is idempotent and whitespace-free
        #[test]
        fn test_normalize_idempotent(label in "[a-zA-Z ]{0,40}") {
            let once = normalize_label(&label);
            prop_assert_eq!(normalize_label(&once), once.clone());
            prop_assert!(!once.contains(' '));
        }

        /// Property: a label that normalizes to something yields a well-formed id
        #[test]
        fn test_source_ids_well_formed(label in "[a-zA-Z]{1,10}( [a-zA-Z]{1,10}){0,4}") {
            let id = NodeId::source(&label);
            prop_assert!(id.is_well_formed());
            prop_assert_eq!(id.node_type(), Some(NodeType::Source));
        }
    }
}
