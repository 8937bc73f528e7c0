//! Observable view state for the photo list and detail screens.
//!
//! Each operation takes a generation ticket when it starts. An outcome is
//! applied only if no later-issued operation has already applied one, so a
//! slow request can never overwrite the result of a newer one.

use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::state::ViewState;
use crate::mars::{FetchClient, PhotoRecord};

/// Current value of every observable field.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub state: ViewState,
    pub is_refreshing: bool,
    pub selected: Option<Arc<PhotoRecord>>,
}

#[derive(Debug, Default)]
struct Generations {
    issued: u64,
    applied: u64,
    refreshes_in_flight: usize,
    fetches_in_flight: usize,
}

/// What `request_refresh` decided to do.
#[derive(Debug)]
pub enum RefreshRequest {
    /// The state was `Error`; a full fetch was launched.
    Fetch(JoinHandle<()>),
    Refresh(JoinHandle<()>),
    /// A request is already in flight.
    Skipped,
}

struct Inner {
    client: Arc<dyn FetchClient>,
    state: watch::Sender<ViewState>,
    is_refreshing: watch::Sender<bool>,
    selected: watch::Sender<Option<Arc<PhotoRecord>>>,
    generations: Mutex<Generations>,
    lifecycle: CancellationToken,
}

/// Holds the photo list state and the selected photo.
///
/// Cheap to clone; clones share the same state.
#[derive(Clone)]
pub struct PhotoViewModel {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for PhotoViewModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhotoViewModel")
            .field("state", &*self.inner.state.borrow())
            .field("is_refreshing", &*self.inner.is_refreshing.borrow())
            .field("closed", &self.inner.lifecycle.is_cancelled())
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Fetch,
    Refresh,
}

/// Counts one fetch or refresh as in flight from launch until it finishes
/// or is dropped, including a task cancelled before its first poll.
struct InFlight {
    inner: Arc<Inner>,
    kind: Kind,
}

impl Drop for InFlight {
    fn drop(&mut self) {
        let mut gens = self.inner.lock_generations();
        match self.kind {
            Kind::Fetch => {
                gens.fetches_in_flight = gens.fetches_in_flight.saturating_sub(1);
            }
            Kind::Refresh => {
                gens.refreshes_in_flight = gens.refreshes_in_flight.saturating_sub(1);
                if gens.refreshes_in_flight == 0 {
                    self.inner.is_refreshing.send_replace(false);
                }
            }
        }
    }
}

impl Inner {
    fn lock_generations(&self) -> std::sync::MutexGuard<'_, Generations> {
        self.generations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Publish `state` if `ticket` is newer than the last applied outcome.
    fn apply(&self, ticket: u64, state: ViewState) -> bool {
        let mut gens = self.lock_generations();
        if ticket <= gens.applied {
            tracing::debug!(
                ticket,
                applied = gens.applied,
                "Discarding stale result"
            );
            return false;
        }
        gens.applied = ticket;
        self.state.send_replace(state);
        true
    }
}

impl PhotoViewModel {
    /// Create a view model in the `Loading` state. Nothing is fetched until
    /// `fetch_photos` or `launch_fetch` is called.
    pub fn new(client: Arc<dyn FetchClient>) -> Self {
        Self {
            inner: Arc::new(Inner {
                client,
                state: watch::channel(ViewState::Loading).0,
                is_refreshing: watch::channel(false).0,
                selected: watch::channel(None).0,
                generations: Mutex::new(Generations::default()),
                lifecycle: CancellationToken::new(),
            }),
        }
    }

    /// Take a ticket and mark the operation in flight. For a fetch the
    /// state becomes `Loading`; for a refresh `is_refreshing` becomes true.
    fn begin(&self, kind: Kind) -> (u64, InFlight) {
        let mut gens = self.inner.lock_generations();
        gens.issued += 1;
        match kind {
            Kind::Fetch => {
                gens.fetches_in_flight += 1;
                self.inner.state.send_replace(ViewState::Loading);
            }
            Kind::Refresh => {
                gens.refreshes_in_flight += 1;
                self.inner.is_refreshing.send_replace(true);
            }
        }
        let in_flight = InFlight {
            inner: Arc::clone(&self.inner),
            kind,
        };
        (gens.issued, in_flight)
    }

    /// Replace the state with `Loading`, fetch, then publish `Success` or
    /// `Error`.
    pub async fn fetch_photos(&self) {
        let (ticket, in_flight) = self.begin(Kind::Fetch);
        self.run_fetch(ticket, in_flight).await;
    }

    async fn run_fetch(&self, ticket: u64, _in_flight: InFlight) {
        tracing::debug!(ticket, "Calling API...");
        let next = match self.inner.client.get_photos().await {
            Ok(photos) => {
                tracing::debug!(count = photos.len(), "Received photos successfully");
                ViewState::success(photos)
            }
            Err(e) => {
                tracing::error!("Fetch failed: {}", e);
                ViewState::Error(e.user_message())
            }
        };
        self.inner.apply(ticket, next);
    }

    /// Fetch again without passing through `Loading`. A failure leaves the
    /// current state untouched; `is_refreshing` is true while any refresh is
    /// in flight.
    pub async fn refresh(&self) {
        let (ticket, in_flight) = self.begin(Kind::Refresh);
        self.run_refresh(ticket, in_flight).await;
    }

    async fn run_refresh(&self, ticket: u64, _in_flight: InFlight) {
        tracing::debug!(ticket, "Refreshing photos...");
        match self.inner.client.get_photos().await {
            Ok(photos) => {
                tracing::debug!(count = photos.len(), "Photos refreshed successfully");
                self.inner.apply(ticket, ViewState::success(photos));
            }
            Err(e) => {
                tracing::warn!("Refresh failed, keeping current state: {}", e);
            }
        }
    }

    /// Run `fetch_photos` as a task that is cancelled by `close`. The state
    /// is `Loading` as soon as this returns.
    pub fn launch_fetch(&self) -> JoinHandle<()> {
        let (ticket, in_flight) = self.begin(Kind::Fetch);
        let vm = self.clone();
        self.spawn_scoped("fetch", async move { vm.run_fetch(ticket, in_flight).await })
    }

    /// Run `refresh` as a task that is cancelled by `close`.
    pub fn launch_refresh(&self) -> JoinHandle<()> {
        let (ticket, in_flight) = self.begin(Kind::Refresh);
        let vm = self.clone();
        self.spawn_scoped("refresh", async move { vm.run_refresh(ticket, in_flight).await })
    }

    /// Refresh on a timer tick or user request. Nothing is started while a
    /// fetch or refresh is still running; from `Error` a full fetch is
    /// launched instead, like the error screen's retry button.
    pub fn request_refresh(&self) -> RefreshRequest {
        {
            let gens = self.inner.lock_generations();
            if gens.refreshes_in_flight > 0 || gens.fetches_in_flight > 0 {
                tracing::debug!(
                    refreshes = gens.refreshes_in_flight,
                    fetches = gens.fetches_in_flight,
                    "Request still in flight, skipping refresh"
                );
                return RefreshRequest::Skipped;
            }
        }
        if matches!(self.state(), ViewState::Error(_)) {
            RefreshRequest::Fetch(self.launch_fetch())
        } else {
            RefreshRequest::Refresh(self.launch_refresh())
        }
    }

    fn spawn_scoped<F>(&self, name: &'static str, fut: F) -> JoinHandle<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let token = self.inner.lifecycle.clone();
        tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = token.cancelled() => tracing::debug!("{} cancelled", name),
                _ = fut => {}
            }
        })
    }

    /// Cancel every launched task. Further launches finish immediately.
    pub fn close(&self) {
        self.inner.lifecycle.cancel();
    }

    pub fn is_closed(&self) -> bool {
        self.inner.lifecycle.is_cancelled()
    }

    pub fn select(&self, photo: Arc<PhotoRecord>) {
        tracing::debug!(id = %photo.id, "Photo selected");
        self.inner.selected.send_replace(Some(photo));
    }

    pub fn clear_selection(&self) {
        self.inner.selected.send_replace(None);
    }

    pub fn selected(&self) -> Option<Arc<PhotoRecord>> {
        self.inner.selected.borrow().clone()
    }

    pub fn state(&self) -> ViewState {
        self.inner.state.borrow().clone()
    }

    pub fn is_refreshing(&self) -> bool {
        *self.inner.is_refreshing.borrow()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            state: self.state(),
            is_refreshing: self.is_refreshing(),
            selected: self.selected(),
        }
    }

    pub fn subscribe_state(&self) -> watch::Receiver<ViewState> {
        self.inner.state.subscribe()
    }

    pub fn subscribe_refreshing(&self) -> watch::Receiver<bool> {
        self.inner.is_refreshing.subscribe()
    }

    pub fn subscribe_selected(&self) -> watch::Receiver<Option<Arc<PhotoRecord>>> {
        self.inner.selected.subscribe()
    }
}
