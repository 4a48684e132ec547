//! Property tests for the graph pipeline

use factgraph_domain::{
    AnalysisResult, ClaimRecord, Credibility, NodeStatus, NodeType, ReasoningRef, SourceRef,
};
use factgraph_graph::{delete_node, text_similarity, GraphConfig, KnowledgeGraph};
use proptest::prelude::*;
use std::collections::{BTreeSet, HashMap};

const SOURCE_TITLES: &[&str] = &["CDC Report", "cdc report", "Nature", "WHO Bulletin", "WHO Archive", "Lancet"];
const FINDING_TITLES: &[&str] = &["Peer Reviewed Study", "Survey data", "Census data", "Field trial"];

fn credibility() -> impl Strategy<Value = Credibility> {
    prop_oneof![Just(Credibility::High), Just(Credibility::Medium), Just(Credibility::Low)]
}

fn status() -> impl Strategy<Value = NodeStatus> {
    prop_oneof![
        Just(NodeStatus::Verified),
        Just(NodeStatus::Warning),
        Just(NodeStatus::Refuted),
        Just(NodeStatus::Neutral),
    ]
}

fn analysis() -> impl Strategy<Value = Option<AnalysisResult>> {
    let sources = prop::collection::vec((prop::sample::select(SOURCE_TITLES), credibility()), 0..4);
    let findings = prop::collection::vec((prop::sample::select(FINDING_TITLES), status()), 0..3);
    prop::option::weighted(
        0.9,
        (0.0f64..=100.0, sources, findings).prop_map(|(score, sources, findings)| {
            let mut result = AnalysisResult::new(score);
            for (title, credibility) in sources {
                result = result.with_source(SourceRef::new(title, "", credibility));
            }
            for (title, status) in findings {
                result = result.with_reasoning(ReasoningRef::new(title, status));
            }
            result
        }),
    )
}

fn records() -> impl Strategy<Value = Vec<ClaimRecord>> {
    prop::collection::vec(("[a-z]{1,7}( [a-z]{1,7}){0,4}", analysis()), 0..8).prop_map(|items| {
        items
            .into_iter()
            .enumerate()
            .map(|(i, (text, analysis))| {
                let record = ClaimRecord::new(format!("r{i}"), text);
                match analysis {
                    Some(analysis) => record.with_analysis(analysis),
                    None => record,
                }
            })
            .collect()
    })
}

fn build(records: &[ClaimRecord]) -> KnowledgeGraph {
    KnowledgeGraph::from_records(records, &GraphConfig::default())
}

proptest! {
    #[test]
    fn prop_similarity_symmetric_and_bounded(a in "[a-zA-Z ]{0,40}", b in "[a-zA-Z ]{0,40}") {
        let ab = text_similarity(&a, &b, 4);
        let ba = text_similarity(&b, &a, 4);
        prop_assert_eq!(ab, ba);
        prop_assert!((0.0..=1.0).contains(&ab));
    }

    #[test]
    fn prop_one_claim_per_analysed_record(records in records()) {
        let graph = build(&records).graph;
        let analysed = records.iter().filter(|r| r.analysis_result.is_some()).count();
        prop_assert_eq!(graph.nodes_of_type(NodeType::Claim).count(), analysed);
    }

    #[test]
    fn prop_no_self_loops(records in records()) {
        let graph = build(&records).graph;
        prop_assert!(graph.edges.iter().all(|e| !e.is_self_loop()));
    }

    #[test]
    fn prop_inferred_edges_stay_within_type(records in records()) {
        let graph = build(&records).graph;
        let types: HashMap<_, _> = graph.nodes.iter().map(|n| (n.id.clone(), n.node_type)).collect();

        for edge in graph.edges.iter().filter(|e| e.kind.is_inferred()) {
            prop_assert_eq!(types.get(&edge.source), types.get(&edge.target));
        }
        prop_assert!(graph.dangling_edges().is_empty());
    }

    #[test]
    fn prop_node_ids_unique(records in records()) {
        let graph = build(&records).graph;
        let ids: BTreeSet<_> = graph.nodes.iter().map(|n| n.id.clone()).collect();
        prop_assert_eq!(ids.len(), graph.nodes.len());
    }

    #[test]
    fn prop_deterministic(records in records()) {
        let first = build(&records);
        let second = build(&records);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_cascade_deletion(records in records(), pick in any::<prop::sample::Index>()) {
        let graph = build(&records).graph;
        prop_assume!(!graph.nodes.is_empty());

        let id = graph.nodes[pick.index(graph.nodes.len())].id.clone();
        let next = delete_node(&graph, id.as_str()).unwrap();

        prop_assert!(!next.contains(&id));
        prop_assert!(next.edges.iter().all(|e| !e.touches(&id)));
        prop_assert_eq!(next.nodes.len(), graph.nodes.len() - 1);
        prop_assert!(next.dangling_edges().is_empty());
    }
}
