//! Command implementations.

pub mod build;
pub mod export;
pub mod import;
pub mod report;
pub mod watch;

pub use self::build::execute_build;
pub use self::export::execute_export;
pub use self::import::execute_import;
pub use self::report::execute_report;
pub use self::watch::execute_watch;

use crate::error::Result;
use factgraph_domain::ClaimSource;
use factgraph_graph::{GraphConfig, KnowledgeGraph};
use factgraph_store::SqliteClaimStore;
use std::fs;
use std::path::Path;

/// Fetch `user`'s history and build the full graph.
pub(crate) fn load_graph(store: &SqliteClaimStore, user: &str, config: &GraphConfig) -> Result<KnowledgeGraph> {
    let records = store.list_claims_for_user(user, config.history_limit)?;
    Ok(KnowledgeGraph::from_records(&records, config))
}

/// Write `contents` to `path`, or to stdout when no path is given.
pub(crate) fn write_output(path: Option<&Path>, contents: &str) -> Result<()> {
    match path {
        Some(path) => fs::write(path, contents)?,
        None => println!("{}", contents),
    }
    Ok(())
}
