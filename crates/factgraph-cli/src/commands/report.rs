//! Report command implementation.

use super::{load_graph, write_output};
use crate::cli::ReportArgs;
use crate::error::Result;
use crate::output::Formatter;
use factgraph_graph::{GraphConfig, NodeReport};
use factgraph_store::SqliteClaimStore;
use std::path::PathBuf;

/// Execute the report command.
pub fn execute_report(
    args: ReportArgs,
    store: &SqliteClaimStore,
    user: &str,
    config: &GraphConfig,
    formatter: &Formatter,
) -> Result<()> {
    let graph = load_graph(store, user, config)?.graph;
    let report = NodeReport::generate(&graph, &args.node_id, chrono::Utc::now())?;

    let output = if args.save {
        Some(PathBuf::from(report.file_name()))
    } else {
        args.output
    };

    write_output(output.as_deref(), &report.to_json_pretty()?)?;

    match &output {
        Some(path) => eprintln!(
            "{}",
            formatter.success(&format!("Report written to {}", path.display()))
        ),
        None => eprintln!("{}", formatter.info(&report.summary)),
    }

    Ok(())
}
