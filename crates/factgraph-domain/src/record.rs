//! Claim records as held by the claim store
//!
//! These mirror the stored JSON documents (camelCase keys). They are read-only
//! from the graph's point of view.

use crate::node::NodeStatus;
use serde::{Deserialize, Serialize};

/// A stored claim, optionally carrying the result of a credibility analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimRecord {
    /// Store-assigned identifier
    pub id: String,

    /// Owning user, when the store tracks one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    /// The claim text as submitted
    pub text: String,

    /// Creation time in milliseconds since the Unix epoch
    #[serde(default)]
    pub created_at: u64,

    /// Analysis output; records without one never reach the graph
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis_result: Option<AnalysisResult>,
}

impl ClaimRecord {
    /// Create a record with no analysis attached
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            user_id: None,
            text: text.into(),
            created_at: 0,
            analysis_result: None,
        }
    }

    /// Attach an analysis result
    pub fn with_analysis(mut self, analysis: AnalysisResult) -> Self {
        self.analysis_result = Some(analysis);
        self
    }

    /// Set the owning user
    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }
}

/// Output of the backend credibility analysis for one claim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Credibility score in [0, 100]
    pub score: f64,

    /// Free-text summary of the analysis
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// Cited references
    #[serde(default)]
    pub sources: Vec<SourceRef>,

    /// Individual findings
    #[serde(default)]
    pub reasoning: Vec<ReasoningRef>,
}

impl AnalysisResult {
    /// Create an analysis with the given score and no sources or findings
    pub fn new(score: f64) -> Self {
        Self {
            score,
            summary: None,
            sources: Vec::new(),
            reasoning: Vec::new(),
        }
    }

    /// Append a cited source
    pub fn with_source(mut self, source: SourceRef) -> Self {
        self.sources.push(source);
        self
    }

    /// Append a finding
    pub fn with_reasoning(mut self, reasoning: ReasoningRef) -> Self {
        self.reasoning.push(reasoning);
        self
    }
}

/// Coarse reliability bucket assigned to a cited source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Credibility {
    /// Highly reliable source
    High,
    /// Mixed reliability
    Medium,
    /// Unreliable source
    Low,
}

impl Credibility {
    /// Score used for the source node built from this tier
    pub fn score(&self) -> f64 {
        match self {
            Credibility::High => 85.0,
            Credibility::Medium => 50.0,
            Credibility::Low => 20.0,
        }
    }

    /// Tier name as stored
    pub fn as_str(&self) -> &'static str {
        match self {
            Credibility::High => "high",
            Credibility::Medium => "medium",
            Credibility::Low => "low",
        }
    }
}

/// A reference cited by an analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceRef {
    /// Title of the cited work; also its identity in the graph
    pub title: String,

    /// Location of the cited work
    #[serde(default)]
    pub url: String,

    /// Reliability bucket
    pub credibility: Credibility,
}

impl SourceRef {
    /// Create a source reference
    pub fn new(title: impl Into<String>, url: impl Into<String>, credibility: Credibility) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            credibility,
        }
    }
}

/// One finding from an analysis' reasoning trace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReasoningRef {
    /// Short statement of the finding
    pub title: String,

    /// Verdict attached to the finding
    pub status: NodeStatus,
}

impl ReasoningRef {
    /// Create a finding
    pub fn new(title: impl Into<String>, status: NodeStatus) -> Self {
        Self {
            title: title.into(),
            status,
        }
    }
}
