//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use factgraph_domain::{Activation, GraphEdge, GraphNode, NodeStatus};
use factgraph_graph::Graph;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a graph (or a filtered view of one).
    pub fn format_graph(&self, graph: &Graph, show_edges: bool) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(graph)?),
            OutputFormat::Table => Ok(self.format_graph_table(graph, show_edges)),
            OutputFormat::Quiet => Ok(graph
                .nodes
                .iter()
                .map(|n| n.id.as_str())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    fn format_graph_table(&self, graph: &Graph, show_edges: bool) -> String {
        if graph.is_empty() {
            return self.colorize("No nodes found.", "yellow");
        }

        let mut sections = vec![self.nodes_table(&graph.nodes)];
        if show_edges && !graph.edges.is_empty() {
            sections.push(edges_table(&graph.edges));
        }

        let stats = graph.statistics();
        sections.push(format!(
            "{} node(s), {} edge(s), {} inferred",
            stats.total_nodes, stats.total_edges, stats.inferred_edges
        ));

        sections.join("\n")
    }

    fn nodes_table(&self, nodes: &[GraphNode]) -> String {
        let mut builder = Builder::default();
        builder.push_record(["ID", "Type", "Label", "Status", "Score"]);

        for node in nodes {
            builder.push_record([
                node.id.to_string(),
                node.node_type.to_string(),
                node.label.clone(),
                self.status(node.status),
                format!("{:.0}", node.score),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Format a status, colored by verdict.
    pub fn status(&self, status: NodeStatus) -> String {
        let color = match status {
            NodeStatus::Verified => "green",
            NodeStatus::Warning => "yellow",
            NodeStatus::Refuted => "red",
            NodeStatus::Neutral => "",
        };
        self.colorize(status.as_str(), color)
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Format a newly connected claim.
    pub fn activation(&self, activation: &Activation) -> String {
        self.colorize(&format!("★ New connection: \"{}\"", activation.label), "magenta")
    }

    /// Format bulk operation result.
    pub fn bulk_result(&self, operation: &str, count: usize) -> String {
        self.success(&format!("{} {} claim(s)", operation, count))
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "magenta" => text.magenta().to_string(),
            _ => text.to_string(),
        }
    }
}

fn edges_table(edges: &[GraphEdge]) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Source", "Target", "Relationship"]);

    for edge in edges {
        builder.push_record([edge.source.to_string(), edge.target.to_string(), edge.kind.legacy_tag()]);
    }

    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}
