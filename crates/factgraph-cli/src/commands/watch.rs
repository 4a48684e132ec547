//! Watch command implementation.

use crate::cli::WatchArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use factgraph_domain::{Activation, NodeId};
use factgraph_graph::{GraphConfig, GraphSession, RefreshOutcome};
use factgraph_store::SqliteClaimStore;
use std::time::Duration;
use tokio::time::interval;

/// Execute the watch command.
///
/// Rebuilds the graph every `--interval` seconds until Ctrl+C (or until
/// `--cycles` rebuilds have run), printing newly connected claims as they appear.
pub async fn execute_watch(
    args: WatchArgs,
    store: &SqliteClaimStore,
    user: &str,
    config: &GraphConfig,
    formatter: &Formatter,
) -> Result<()> {
    if args.interval == 0 {
        return Err(CliError::InvalidInput("Interval must be at least 1 second".to_string()));
    }

    let mut announced = NewActivations::default();
    let mut session = GraphSession::with_sink(config.clone(), move |activation: &Activation| {
        if announced.is_new(activation) {
            println!("{}", formatter.activation(activation));
        }
    });
    let mut ticker = interval(Duration::from_secs(args.interval));
    let mut completed = 0usize;

    tracing::info!(user, interval = args.interval, "Watching claim history");

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                match session.refresh_from(store, user) {
                    Ok(RefreshOutcome::Applied { nodes, edges, .. }) => {
                        println!("{}", formatter.info(&format!("Graph rebuilt: {} node(s), {} edge(s)", nodes, edges)));
                    }
                    Ok(RefreshOutcome::Stale) => {}
                    Err(e) => {
                        tracing::error!(error = %e, "Refresh failed");
                        eprintln!("{}", formatter.error(&e.to_string()));
                    }
                }

                completed += 1;
                if args.cycles.is_some_and(|cycles| completed >= cycles) {
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutdown signal received, stopping watch");
                break;
            }
        }
    }

    Ok(())
}

/// Remembers the last announced claim so a rebuild that activates the same
/// claim again stays quiet
#[derive(Debug, Default)]
struct NewActivations {
    last: Option<NodeId>,
}

impl NewActivations {
    fn is_new(&mut self, activation: &Activation) -> bool {
        if self.last.as_ref() == Some(&activation.node_id) {
            return false;
        }
        self.last = Some(activation.node_id.clone());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn activation(key: &str) -> Activation {
        Activation {
            node_id: NodeId::claim(key),
            label: key.to_string(),
        }
    }

    #[test]
    fn test_repeated_activation_announced_once() {
        let mut announced = NewActivations::default();
        assert!(announced.is_new(&activation("a")));
        assert!(!announced.is_new(&activation("a")));
        assert!(!announced.is_new(&activation("a")));
    }

    #[test]
    fn test_changed_activation_announced_again() {
        let mut announced = NewActivations::default();
        assert!(announced.is_new(&activation("a")));
        assert!(announced.is_new(&activation("b")));
        assert!(announced.is_new(&activation("a")));
    }
}
