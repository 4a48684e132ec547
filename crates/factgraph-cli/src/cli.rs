//! CLI command definitions and argument parsing.

use clap::{Args, Parser, Subcommand};
use factgraph_domain::{NodeStatus, NodeType};
use factgraph_graph::NodeFilter;
use std::path::PathBuf;

/// Factgraph CLI - Build and inspect knowledge graphs from analysed claims.
#[derive(Debug, Parser)]
#[command(name = "factgraph")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Claim database path
    #[arg(short, long, global = true, env = "FACTGRAPH_DB")]
    pub database: Option<PathBuf>,

    /// User whose claims are graphed
    #[arg(short, long, global = true, env = "FACTGRAPH_USER")]
    pub user: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (IDs only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Import claim records from a JSON array
    Import(ImportArgs),

    /// Build the graph and list its nodes and edges
    Build(BuildArgs),

    /// Export the graph as JSON
    Export(ExportArgs),

    /// Generate a report for one node
    Report(ReportArgs),

    /// Rebuild the graph periodically until interrupted
    Watch(WatchArgs),
}

/// Arguments for the import command.
#[derive(Debug, Parser)]
pub struct ImportArgs {
    /// JSON file containing claim records
    pub file: Option<PathBuf>,

    /// Read the JSON array from stdin
    #[arg(long)]
    pub stdin: bool,
}

/// Node selection shared by build and export.
#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    /// Only show these node types (repeatable)
    #[arg(short = 't', long = "type", value_enum)]
    pub types: Vec<NodeTypeArg>,

    /// Only show nodes with these statuses (repeatable)
    #[arg(short, long = "status", value_enum)]
    pub statuses: Vec<NodeStatusArg>,

    /// Only show nodes whose label contains this text
    #[arg(long)]
    pub search: Option<String>,
}

impl FilterArgs {
    /// Turn the arguments into a node filter; omitted criteria keep everything
    pub fn to_filter(&self) -> NodeFilter {
        let mut filter = NodeFilter::default();
        if !self.types.is_empty() {
            filter = filter.with_types(self.types.iter().copied().map(NodeType::from));
        }
        if !self.statuses.is_empty() {
            filter = filter.with_statuses(self.statuses.iter().copied().map(NodeStatus::from));
        }
        if let Some(search) = &self.search {
            filter = filter.with_search(search.clone());
        }
        filter
    }
}

/// Arguments for the build command.
#[derive(Debug, Parser)]
pub struct BuildArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Also list edges
    #[arg(short, long)]
    pub edges: bool,
}

/// Arguments for the export command.
#[derive(Debug, Parser)]
pub struct ExportArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Delete these nodes (and their edges) before exporting (repeatable)
    #[arg(short = 'x', long)]
    pub exclude: Vec<String>,
}

/// Arguments for the report command.
#[derive(Debug, Parser)]
pub struct ReportArgs {
    /// Node id, e.g. claim-<record id> or source-<normalized title>
    pub node_id: String,

    /// Write to this file instead of stdout
    #[arg(short, long, conflicts_with = "save")]
    pub output: Option<PathBuf>,

    /// Write to the suggested report-<id>-<millis>.json in the current directory
    #[arg(long)]
    pub save: bool,
}

/// Arguments for the watch command.
#[derive(Debug, Parser)]
pub struct WatchArgs {
    /// Seconds between rebuilds
    #[arg(short, long, default_value = "30")]
    pub interval: u64,

    /// Stop after this many rebuilds
    #[arg(long)]
    pub cycles: Option<usize>,
}

/// Node type argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum NodeTypeArg {
    /// Claims
    Claim,
    /// Evidence
    Evidence,
    /// Sources
    Source,
    /// Clues
    Clue,
}

/// Node status argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum NodeStatusArg {
    /// Verified
    Verified,
    /// Warning
    Warning,
    /// Refuted
    Refuted,
    /// Neutral
    Neutral,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<NodeTypeArg> for NodeType {
    fn from(arg: NodeTypeArg) -> Self {
        match arg {
            NodeTypeArg::Claim => NodeType::Claim,
            NodeTypeArg::Evidence => NodeType::Evidence,
            NodeTypeArg::Source => NodeType::Source,
            NodeTypeArg::Clue => NodeType::Clue,
        }
    }
}

impl From<NodeStatusArg> for NodeStatus {
    fn from(arg: NodeStatusArg) -> Self {
        match arg {
            NodeStatusArg::Verified => NodeStatus::Verified,
            NodeStatusArg::Warning => NodeStatus::Warning,
            NodeStatusArg::Refuted => NodeStatus::Refuted,
            NodeStatusArg::Neutral => NodeStatus::Neutral,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_command() {
        let cli = Cli::parse_from(["factgraph", "import", "claims.json"]);
        match cli.command {
            Command::Import(args) => assert_eq!(args.file, Some(PathBuf::from("claims.json"))),
            _ => panic!("Expected Import command"),
        }
    }

    #[test]
    fn test_build_filter_arguments() {
        let cli = Cli::parse_from([
            "factgraph", "build", "--type", "claim", "--status", "verified", "--search", "masks",
        ]);
        let Command::Build(args) = cli.command else {
            panic!("Expected Build command");
        };

        let filter = args.filter.to_filter();
        assert_eq!(filter.types.len(), 1);
        assert!(filter.types.contains(&NodeType::Claim));
        assert!(filter.statuses.contains(&NodeStatus::Verified));
        assert_eq!(filter.search_text, "masks");
    }

    #[test]
    fn test_empty_filter_keeps_everything() {
        assert_eq!(FilterArgs::default().to_filter(), NodeFilter::default());
    }

    #[test]
    fn test_export_excludes_repeatable() {
        let cli = Cli::parse_from([
            "factgraph", "-u", "ada", "export", "-x", "claim-a", "-x", "source-cdc", "-o", "graph.json",
        ]);
        assert_eq!(cli.user.as_deref(), Some("ada"));
        match cli.command {
            Command::Export(args) => {
                assert_eq!(args.exclude, vec!["claim-a", "source-cdc"]);
                assert_eq!(args.output, Some(PathBuf::from("graph.json")));
            }
            _ => panic!("Expected Export command"),
        }
    }

    #[test]
    fn test_watch_defaults() {
        let cli = Cli::parse_from(["factgraph", "watch"]);
        match cli.command {
            Command::Watch(args) => {
                assert_eq!(args.interval, 30);
                assert!(args.cycles.is_none());
            }
            _ => panic!("Expected Watch command"),
        }
    }

    #[test]
    fn test_report_output_conflicts_with_save() {
        let result = Cli::try_parse_from(["factgraph", "report", "claim-a", "--save", "-o", "x.json"]);
        assert!(result.is_err());
    }
}
