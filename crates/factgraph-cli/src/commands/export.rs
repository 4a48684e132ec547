//! Export command implementation.

use super::{load_graph, write_output};
use crate::cli::ExportArgs;
use crate::error::Result;
use crate::output::Formatter;
use factgraph_graph::{GraphConfig, GraphExport};
use factgraph_store::SqliteClaimStore;

/// Execute the export command.
pub fn execute_export(
    args: ExportArgs,
    store: &SqliteClaimStore,
    user: &str,
    config: &GraphConfig,
    formatter: &Formatter,
) -> Result<()> {
    let mut graph = load_graph(store, user, config)?.graph;

    for id in &args.exclude {
        let removal = graph.remove_node(id)?;
        if removal.is_empty() {
            eprintln!("{}", formatter.warning(&format!("No node '{}' to exclude", id)));
        }
    }

    let view = graph.view(&args.filter.to_filter());
    let export = GraphExport::new(&view, Some(user.to_string()), chrono::Utc::now());
    write_output(args.output.as_deref(), &export.to_json_pretty()?)?;

    if let Some(path) = &args.output {
        eprintln!(
            "{}",
            formatter.success(&format!(
                "Exported {} node(s) and {} link(s) to {}",
                export.nodes.len(),
                export.links.len(),
                path.display()
            ))
        );
    }

    Ok(())
}
