//! Build command implementation.

use super::load_graph;
use crate::cli::BuildArgs;
use crate::error::Result;
use crate::output::Formatter;
use factgraph_graph::GraphConfig;
use factgraph_store::SqliteClaimStore;

/// Execute the build command.
pub fn execute_build(
    args: BuildArgs,
    store: &SqliteClaimStore,
    user: &str,
    config: &GraphConfig,
    formatter: &Formatter,
) -> Result<()> {
    let built = load_graph(store, user, config)?;
    let view = built.graph.view(&args.filter.to_filter());

    println!("{}", formatter.format_graph(&view, args.edges)?);

    // stderr keeps JSON and quiet output clean
    if let Some(activation) = &built.activation {
        eprintln!("{}", formatter.activation(activation));
    }

    Ok(())
}
