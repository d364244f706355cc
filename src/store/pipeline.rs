use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};
use std::time::Duration;

use tokio::sync::{mpsc, watch};

use crate::{
    catalog::CatalogSource,
    models::{Resource, ResourceFilter},
    services::execute_query,
};

/// User-facing message published when the catalog cannot be loaded
const LOAD_ERROR_MESSAGE: &str = "Could not load wellness resources. Please try again later.";

/// Published query output
///
/// Applied atomically per result: items, total count, loading flag, and
/// error always change together.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryState {
    pub items: Vec<Resource>,
    pub total_items: usize,
    pub loading: bool,
    pub error: Option<String>,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total_items: 0,
            // Nothing has been fetched yet
            loading: true,
            error: None,
        }
    }
}

/// Spawns the background task driving queries from snapshot changes
///
/// The task coalesces bursts of snapshots with a quiet-period debounce,
/// skips snapshots structurally equal to the last one executed, and tags
/// each issued query with a sequence number so that a stale result can never
/// overwrite a newer one. In-flight queries are not aborted, only their
/// effect on the published state is suppressed.
pub(crate) fn spawn(
    catalog: Arc<dyn CatalogSource>,
    results: watch::Sender<QueryState>,
    debounce: Duration,
    mut snapshots: mpsc::UnboundedReceiver<ResourceFilter>,
) -> tokio::task::JoinHandle<()> {
    let latest_seq = Arc::new(AtomicU64::new(0));

    tokio::spawn(async move {
        let mut last_executed: Option<ResourceFilter> = None;

        while let Some(mut pending) = snapshots.recv().await {
            // Quiet-period debounce: every newer snapshot replaces the
            // pending one and restarts the window.
            let mut closed = false;
            loop {
                tokio::select! {
                    next = snapshots.recv() => match next {
                        Some(snapshot) => pending = snapshot,
                        None => {
                            closed = true;
                            break;
                        }
                    },
                    _ = tokio::time::sleep(debounce) => break,
                }
            }

            if last_executed.as_ref() == Some(&pending) {
                tracing::debug!("Skipping unchanged query snapshot");
            } else {
                last_executed = Some(pending.clone());
                issue_query(
                    Arc::clone(&catalog),
                    results.clone(),
                    Arc::clone(&latest_seq),
                    pending,
                );
            }

            if closed {
                break;
            }
        }

        tracing::debug!("Query pipeline stopped");
    })
}

/// Issues one query without blocking the debounce loop
fn issue_query(
    catalog: Arc<dyn CatalogSource>,
    results: watch::Sender<QueryState>,
    latest_seq: Arc<AtomicU64>,
    filter: ResourceFilter,
) {
    let seq = latest_seq.fetch_add(1, Ordering::SeqCst) + 1;
    results.send_modify(|state| state.loading = true);

    tracing::debug!(seq, view = %filter.view, page = filter.page, "Issuing query");

    tokio::spawn(async move {
        let outcome = catalog
            .get_resources()
            .await
            .map(|all| execute_query(all, &filter));

        // The staleness check and the application run inside the watch
        // lock, so a result applied after its own check can never be
        // overwritten by an older one.
        results.send_if_modified(|state| {
            // A newer query was issued while this one was in flight
            if latest_seq.load(Ordering::SeqCst) != seq {
                tracing::debug!(seq, "Discarding superseded query result");
                return false;
            }

            match outcome {
                Ok(page) => {
                    tracing::debug!(seq, total_items = page.total_items, "Query result applied");
                    state.items = page.items;
                    state.total_items = page.total_items;
                    state.loading = false;
                    state.error = None;
                }
                Err(e) => {
                    // Prior results stay visible, only the error and
                    // loading flag change.
                    tracing::error!(seq, error = %e, "Failed to load resources");
                    state.error = Some(LOAD_ERROR_MESSAGE.to_string());
                    state.loading = false;
                }
            }
            true
        });
    });
}
