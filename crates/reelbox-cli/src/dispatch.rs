//! Runs screen effects on the async runtime and returns their outcomes.

use std::sync::Arc;

use reelbox_api::tmdb::CatalogApi;
use reelbox_api::youtube::TrailerApi;
use reelbox_db::{DownloadStore, StoreError};
use tokio::runtime::Handle;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::mpsc;

use crate::screens::{Effect, Outcome};

/// Executes [`Effect`]s off the UI thread.
///
/// Every outcome is sent to the channel the UI thread drains; nothing
/// here touches screen state.
#[derive(Debug)]
pub struct Dispatcher<C, T> {
    catalog: Arc<C>,
    trailers: Arc<T>,
    store: Arc<DownloadStore>,
    handle: Handle,
    outcomes: mpsc::UnboundedSender<Outcome>,
}

impl<C, T> Clone for Dispatcher<C, T> {
    fn clone(&self) -> Self {
        Self {
            catalog: Arc::clone(&self.catalog),
            trailers: Arc::clone(&self.trailers),
            store: Arc::clone(&self.store),
            handle: self.handle.clone(),
            outcomes: self.outcomes.clone(),
        }
    }
}

impl<C, T> Dispatcher<C, T>
where
    C: CatalogApi + Send + Sync + 'static,
    T: TrailerApi + Send + Sync + 'static,
{
    /// Creates a dispatcher and the receiver its outcomes arrive on.
    #[must_use]
    pub fn new(
        catalog: Arc<C>,
        trailers: Arc<T>,
        store: Arc<DownloadStore>,
        handle: Handle,
    ) -> (Self, mpsc::UnboundedReceiver<Outcome>) {
        let (outcomes, rx) = mpsc::unbounded_channel();
        (
            Self {
                catalog,
                trailers,
                store,
                handle,
                outcomes,
            },
            rx,
        )
    }

    /// Spawns `effect` and returns immediately.
    pub fn spawn(&self, effect: Effect) {
        let this = self.clone();
        self.handle.spawn(async move {
            if let Some(outcome) = this.run(effect).await {
                // The UI may already be gone.
                let _ = this.outcomes.send(outcome);
            }
        });
    }

    /// Forwards store change notifications as [`Outcome::StoreChanged`].
    pub fn watch_store(&self) {
        let mut events = self.store.subscribe();
        let outcomes = self.outcomes.clone();
        self.handle.spawn(async move {
            loop {
                match events.recv().await {
                    Ok(event) => tracing::debug!(?event, "store changed"),
                    Err(RecvError::Lagged(missed)) => {
                        tracing::debug!(missed, "store listener lagged");
                    }
                    Err(RecvError::Closed) => break,
                }
                if outcomes.send(Outcome::StoreChanged).is_err() {
                    break;
                }
            }
        });
    }

    /// Runs `effect` to completion.
    ///
    /// Returns `None` for effects without a result.
    pub async fn run(&self, effect: Effect) -> Option<Outcome> {
        match effect {
            Effect::FetchCategory {
                target,
                category,
                token,
            } => Some(Outcome::Category {
                target,
                token,
                result: self.catalog.fetch_category(category).await,
            }),
            Effect::Search { query, token } => Some(Outcome::Search {
                token,
                result: self.catalog.search(&query).await,
            }),
            Effect::FindTrailer { query, token } => Some(Outcome::Trailer {
                token,
                result: self.trailers.find_trailer(&query).await,
            }),
            Effect::SaveTitle(title) => {
                let store = Arc::clone(&self.store);
                let result = run_store(move || store.save(&title)).await;
                Some(Outcome::Saved(result))
            }
            Effect::ListDownloads { token } => {
                let store = Arc::clone(&self.store);
                let result = run_store(move || store.list_all()).await;
                Some(Outcome::Downloads { token, result })
            }
            Effect::DeleteDownload(record) => {
                let store = Arc::clone(&self.store);
                let row_id = record.row_id;
                let result = run_store(move || store.delete(&record)).await;
                Some(Outcome::Deleted { row_id, result })
            }
            Effect::OpenUrl(url) => {
                let opened = blocking(move || open::that(&url).map(|()| url)).await?;
                match opened {
                    Ok(url) => tracing::info!(%url, "opened in browser"),
                    Err(err) => tracing::warn!(error = %err, "failed to open browser"),
                }
                None
            }
        }
    }
}

/// Runs blocking work on the blocking pool; `None` if it panicked.
async fn blocking<R, F>(f: F) -> Option<R>
where
    F: FnOnce() -> R + Send + 'static,
    R: Send + 'static,
{
    match tokio::task::spawn_blocking(f).await {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::error!(error = %err, "blocking task failed");
            None
        }
    }
}

/// Runs a store operation on the blocking pool.
///
/// A task that fails to complete becomes [`StoreError::Worker`] so the
/// caller still gets an outcome.
async fn run_store<R, F>(f: F) -> Result<R, StoreError>
where
    F: FnOnce() -> Result<R, StoreError> + Send + 'static,
    R: Send + 'static,
{
    tokio::task::spawn_blocking(f).await.unwrap_or_else(|err| {
        tracing::error!(error = %err, "store task failed");
        Err(StoreError::Worker(err.to_string()))
    })
}
