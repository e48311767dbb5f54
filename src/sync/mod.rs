//! Remote reconciliation
//!
//! Periodically reconciles the local quote store against the remote
//! endpoint: fetch a bounded slice of the remote collection, merge the
//! novel items into the store, then push the local store outward. Server
//! data wins in the sense that server-novel items are always admitted;
//! because a quote's identity is its full content, merging never overwrites
//! an existing local entry.

use std::sync::atomic::Ordering;
use std::time::Duration;

use chrono::{DateTime, Utc};
use dioxus::prelude::{spawn, Readable, Writable};
use serde::Deserialize;
use thiserror::Error;

use crate::app::AppState;
use crate::types::quote::Quote;
use crate::ui::notifications::NotificationKind;

/// Category assigned to quotes mapped from the remote collection
pub const REMOTE_CATEGORY: &str = "ServerSync";

/// How many remote items a cycle considers
const FETCH_LIMIT: usize = 5;

const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors from the reconciler
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("A reconciliation cycle is already in flight")]
    AlreadyRunning,
}

/// Result of one completed reconciliation cycle
#[derive(Debug, Clone, PartialEq)]
pub struct SyncOutcome {
    /// Remote items considered after the fetch limit
    pub fetched: usize,
    /// Quotes admitted into the local store
    pub merged: usize,
    /// Quotes delivered to the remote endpoint
    pub pushed: usize,
    /// Push attempts that failed
    pub push_failures: usize,
    pub completed_at: DateTime<Utc>,
}

/// Reconciler state shown in the sync panel
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyncStatus {
    pub in_progress: bool,
    pub last_outcome: Option<SyncOutcome>,
}

/// An item of the remote collection; only the title is of interest
#[derive(Debug, Deserialize)]
struct RemotePost {
    #[serde(default)]
    title: String,
}

/// Map the remote response into quote shape: first five items, title as
/// text, fixed category
fn map_posts(posts: Vec<RemotePost>) -> Vec<Quote> {
    posts
        .into_iter()
        .take(FETCH_LIMIT)
        .map(|post| Quote::new(post.title, REMOTE_CATEGORY))
        .collect()
}

fn build_client() -> Result<reqwest::Client, SyncError> {
    reqwest::Client::builder()
        .timeout(HTTP_TIMEOUT)
        .user_agent(concat!("QuoteDeck/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(SyncError::Http)
}

/// Fetch the remote collection and map it into quotes
async fn fetch_remote_quotes(
    client: &reqwest::Client,
    endpoint: &str,
) -> Result<Vec<Quote>, SyncError> {
    let posts: Vec<RemotePost> = client
        .get(endpoint)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    Ok(map_posts(posts))
}

struct PushReport {
    delivered: usize,
    failed: usize,
}

/// Push every local quote to the remote endpoint, one POST per quote
///
/// Per-item failures are logged and do not halt the rest of the batch.
async fn push_quotes(client: &reqwest::Client, endpoint: &str, quotes: &[Quote]) -> PushReport {
    let mut report = PushReport {
        delivered: 0,
        failed: 0,
    };
    for quote in quotes {
        match client.post(endpoint).json(quote).send().await {
            Ok(response) if response.status().is_success() => report.delivered += 1,
            Ok(response) => {
                tracing::warn!(
                    status = %response.status(),
                    "Remote rejected quote \"{}\"",
                    quote.text
                );
                report.failed += 1;
            }
            Err(e) => {
                tracing::warn!("Failed to push quote \"{}\": {}", quote.text, e);
                report.failed += 1;
            }
        }
    }
    report
}

/// Run one reconciliation cycle
///
/// Guarded: a cycle that starts while another is in flight returns
/// `SyncError::AlreadyRunning` without touching the store.
pub async fn run_cycle(app_state: AppState) -> Result<SyncOutcome, SyncError> {
    if app_state
        .sync_in_flight
        .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
        .is_err()
    {
        return Err(SyncError::AlreadyRunning);
    }

    let result = run_cycle_inner(&app_state).await;
    app_state.sync_in_flight.store(false, Ordering::SeqCst);

    let mut status_signal = app_state.sync_status;
    match &result {
        Ok(outcome) => {
            status_signal.set(SyncStatus {
                in_progress: false,
                last_outcome: Some(outcome.clone()),
            });
            let message = if outcome.merged > 0 {
                format!("Sync complete: {} new quote(s) from server", outcome.merged)
            } else {
                "Sync complete: already up to date".to_string()
            };
            app_state.notify(NotificationKind::Success, message);
        }
        Err(e) => {
            let last_outcome = status_signal.read().last_outcome.clone();
            status_signal.set(SyncStatus {
                in_progress: false,
                last_outcome,
            });
            tracing::warn!("Reconciliation cycle aborted: {}", e);
            app_state.notify(NotificationKind::Warning, "Sync failed, skipping this cycle");
        }
    }
    result
}

async fn run_cycle_inner(app_state: &AppState) -> Result<SyncOutcome, SyncError> {
    let endpoint = app_state.settings.read().sync_endpoint.clone();

    app_state.notify(NotificationKind::Info, "Syncing quotes with server...");
    {
        let mut status_signal = app_state.sync_status;
        status_signal.write().in_progress = true;
    }

    let client = build_client()?;

    // Fetching
    let incoming = fetch_remote_quotes(&client, &endpoint).await?;
    let fetched = incoming.len();

    // Merging: novel items only, remote order preserved
    let mut quotes_signal = app_state.quotes;
    let merged = quotes_signal.write().merge_remote(incoming);
    if merged > 0 {
        app_state.persist_quotes();
    }

    // Pushing: the full local store, every cycle
    let snapshot: Vec<Quote> = quotes_signal.read().quotes().to_vec();
    let report = push_quotes(&client, &endpoint, &snapshot).await;

    Ok(SyncOutcome {
        fetched,
        merged,
        pushed: report.delivered,
        push_failures: report.failed,
        completed_at: Utc::now(),
    })
}

/// Push a single quote to the remote endpoint, detached from any cycle
///
/// Used right after a quote is added when `push_on_add` is enabled.
pub async fn push_one(endpoint: String, quote: Quote) {
    let client = match build_client() {
        Ok(client) => client,
        Err(e) => {
            tracing::warn!("Failed to build HTTP client: {}", e);
            return;
        }
    };
    let report = push_quotes(&client, &endpoint, std::slice::from_ref(&quote)).await;
    if report.delivered == 1 {
        tracing::debug!("Pushed new quote \"{}\" to server", quote.text);
    }
}

/// Start the repeating reconciler task
///
/// The task ticks at the configured interval, skips ticks while a previous
/// cycle is still in flight, and exits when the stop flag is raised. Calling
/// this twice is a no-op.
pub fn start(app_state: AppState) {
    if app_state
        .sync_task_started
        .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
        .is_err()
    {
        return;
    }

    spawn(async move {
        let interval_secs = app_state.settings.read().sync_interval_secs;
        let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs));
        // The first tick of a tokio interval resolves immediately; consume
        // it so the first cycle happens one full interval after startup.
        ticker.tick().await;

        tracing::info!(interval_secs, "Reconciler started");
        loop {
            ticker.tick().await;
            if app_state.sync_stop.load(Ordering::SeqCst) {
                break;
            }
            if !app_state.settings.read().auto_sync {
                continue;
            }
            match run_cycle(app_state.clone()).await {
                Ok(outcome) => {
                    tracing::info!(
                        merged = outcome.merged,
                        pushed = outcome.pushed,
                        push_failures = outcome.push_failures,
                        "Reconciliation cycle complete"
                    );
                }
                Err(SyncError::AlreadyRunning) => {
                    tracing::debug!("Previous cycle still in flight, skipping this tick");
                }
                Err(e) => {
                    tracing::warn!("Reconciliation cycle failed: {}", e);
                }
            }
        }
        tracing::info!("Reconciler stopped");
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::QuoteStore;

    #[test]
    fn test_map_posts_takes_first_five() {
        let posts: Vec<RemotePost> = (0..8)
            .map(|i| RemotePost {
                title: format!("post {}", i),
            })
            .collect();
        let quotes = map_posts(posts);
        assert_eq!(quotes.len(), 5);
        assert_eq!(quotes[0], Quote::new("post 0", REMOTE_CATEGORY));
        assert_eq!(quotes[4], Quote::new("post 4", REMOTE_CATEGORY));
    }

    #[test]
    fn test_map_posts_short_response() {
        let posts = vec![
            RemotePost {
                title: "only".to_string(),
            },
        ];
        let quotes = map_posts(posts);
        assert_eq!(quotes.len(), 1);
        assert_eq!(quotes[0].category, REMOTE_CATEGORY);
    }

    #[test]
    fn test_remote_payload_parsing() {
        // Shape of the placeholder API: title sits among other fields.
        let raw = r#"[
            {"userId": 1, "id": 1, "title": "first", "body": "..."},
            {"userId": 1, "id": 2, "body": "no title here"}
        ]"#;
        let posts: Vec<RemotePost> = serde_json::from_str(raw).unwrap();
        let quotes = map_posts(posts);
        assert_eq!(quotes[0].text, "first");
        // Missing title maps to an empty text, not a parse failure.
        assert_eq!(quotes[1].text, "");
    }

    #[test]
    fn test_mapped_quotes_merge_as_novel_union() {
        let mut store = QuoteStore::new(vec![Quote::new("A", "X")]);
        let added = store.merge_remote(vec![
            Quote::new("A", "X"),
            Quote::new("B", REMOTE_CATEGORY),
        ]);
        assert_eq!(added, 1);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_push_payload_shape() {
        let quote = Quote::new("A", REMOTE_CATEGORY);
        let body = serde_json::to_value(&quote).unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "text": "A", "category": "ServerSync" })
        );
    }
}
