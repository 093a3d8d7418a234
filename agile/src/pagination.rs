//! Interactive session: one store, two cursors, three entry points.
//!
//! Entry points may be called concurrently. Their effect on the store and the
//! cursors is serialized through one async mutex that is only held to read a
//! cursor or to merge a page, never across a network call. Each direction has
//! its own in-flight flag, released by a guard on every exit path including
//! cancellation of the calling future.

use std::sync::atomic::{AtomicBool, Ordering};

use agile_core::{AgileError, FetchTarget, PageToken, RateStore, RatesPage, UnitRate};
use tokio::sync::{Mutex, watch};

use crate::RetryingFetcher;

/// Message published when a successful load leaves the store empty.
pub const NO_RATES_MESSAGE: &str = "No rates data found.";

/// State observed by consumers of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RatesState {
    /// Nothing loaded yet; an initial load is pending or running.
    Loading,
    /// All slots held by the session, ascending.
    Success(Vec<UnitRate>),
    /// The session has no data and the last attempt to get some failed.
    Error(String),
}

/// Why a load call did not fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// A load in the same direction is already running.
    InFlight,
    /// The cursor for this direction is unset: nothing more to fetch.
    NoCursor,
    /// The session already holds data; the current snapshot was republished.
    AlreadyLoaded,
}

/// Result of one entry-point call, for diagnostics.
///
/// Consumers are expected to watch [`RatesState`]; the outcome only tells
/// what this particular call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The call returned without fetching.
    Skipped(SkipReason),
    /// A page was merged; `added` slots were new.
    Loaded {
        /// Number of slots not previously held.
        added: usize,
    },
    /// Every attempt failed; this is the error that ended the fetch.
    Failed(AgileError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Older,
    Newer,
}

impl Direction {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Older => "older",
            Self::Newer => "newer",
        }
    }
}

#[derive(Default)]
struct Session {
    store: RateStore,
    older: Option<PageToken>,
    newer: Option<PageToken>,
}

impl Session {
    const fn cursor(&self, dir: Direction) -> Option<&PageToken> {
        match dir {
            Direction::Older => self.older.as_ref(),
            Direction::Newer => self.newer.as_ref(),
        }
    }
}

/// Holds a flag raised for as long as it lives.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Owns the session store and cursors and drives fetches into them.
///
/// Create one through [`Agile::session`](crate::Agile::session). Dropping the
/// controller and creating a new one is the only way to reset.
pub struct PaginationController {
    fetcher: RetryingFetcher,
    session: Mutex<Session>,
    loading_initial: AtomicBool,
    loading_older: AtomicBool,
    loading_newer: AtomicBool,
    state: watch::Sender<RatesState>,
}

impl PaginationController {
    /// Create an empty session in the `Loading` state.
    #[must_use]
    pub fn new(fetcher: RetryingFetcher) -> Self {
        let (state, _) = watch::channel(RatesState::Loading);
        Self {
            fetcher,
            session: Mutex::new(Session::default()),
            loading_initial: AtomicBool::new(false),
            loading_older: AtomicBool::new(false),
            loading_newer: AtomicBool::new(false),
            state,
        }
    }

    /// Receiver that observes every published [`RatesState`].
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<RatesState> {
        self.state.subscribe()
    }

    /// The most recently published state.
    #[must_use]
    pub fn state(&self) -> RatesState {
        self.state.borrow().clone()
    }

    /// All slots held by the session, ascending.
    pub async fn snapshot(&self) -> Vec<UnitRate> {
        self.session.lock().await.store.snapshot()
    }

    /// Continuation for data further back in time, if any.
    pub async fn older_cursor(&self) -> Option<PageToken> {
        self.session.lock().await.older.clone()
    }

    /// Continuation for more recent data, if any.
    pub async fn newer_cursor(&self) -> Option<PageToken> {
        self.session.lock().await.newer.clone()
    }

    /// Whether an older-direction load is running.
    #[must_use]
    pub fn is_loading_older(&self) -> bool {
        self.loading_older.load(Ordering::Acquire)
    }

    /// Whether a newer-direction load is running.
    #[must_use]
    pub fn is_loading_newer(&self) -> bool {
        self.loading_newer.load(Ordering::Acquire)
    }

    /// Fetch the default target into an empty session.
    ///
    /// Behavior:
    /// - Skipped while another initial load runs.
    /// - When the session already holds data, republishes `Success` with the
    ///   current snapshot and returns without fetching.
    /// - On success both cursors are replaced by the page's continuations.
    /// - On failure with an empty store, publishes `Error`.
    pub async fn initial_load(&self) -> LoadOutcome {
        let Some(_guard) = InFlight::acquire(&self.loading_initial) else {
            #[cfg(feature = "tracing")]
            tracing::debug!("initial load skipped: already loading");
            return LoadOutcome::Skipped(SkipReason::InFlight);
        };

        {
            let session = self.session.lock().await;
            if !session.store.is_empty() {
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    total = session.store.len(),
                    "initial load skipped: data already present"
                );
                self.state.send_replace(RatesState::Success(session.store.snapshot()));
                return LoadOutcome::Skipped(SkipReason::AlreadyLoaded);
            }
        }

        self.state.send_if_modified(|s| {
            if *s == RatesState::Loading {
                false
            } else {
                *s = RatesState::Loading;
                true
            }
        });

        match self.fetcher.fetch(&FetchTarget::Default).await {
            Ok(page) => {
                let mut session = self.session.lock().await;
                session.older.clone_from(&page.older);
                session.newer.clone_from(&page.newer);
                let added = self.merge(&mut session, page, "initial");
                LoadOutcome::Loaded { added }
            }
            Err(err) => {
                self.fail(&err, "initial").await;
                LoadOutcome::Failed(err)
            }
        }
    }

    /// Fetch the page behind the older cursor.
    ///
    /// Skipped while another older load runs or once the older cursor is
    /// unset. On success the older cursor moves to the page's own older
    /// continuation; on failure it is left as it was so the call can be
    /// repeated.
    pub async fn load_older(&self) -> LoadOutcome {
        self.load(Direction::Older).await
    }

    /// Fetch the page behind the newer cursor.
    ///
    /// Mirror image of [`load_older`](Self::load_older).
    pub async fn load_newer(&self) -> LoadOutcome {
        self.load(Direction::Newer).await
    }

    const fn flag(&self, dir: Direction) -> &AtomicBool {
        match dir {
            Direction::Older => &self.loading_older,
            Direction::Newer => &self.loading_newer,
        }
    }

    async fn load(&self, dir: Direction) -> LoadOutcome {
        let Some(_guard) = InFlight::acquire(self.flag(dir)) else {
            #[cfg(feature = "tracing")]
            tracing::debug!(direction = dir.as_str(), "load skipped: already loading");
            return LoadOutcome::Skipped(SkipReason::InFlight);
        };

        let cursor = self.session.lock().await.cursor(dir).cloned();
        let Some(token) = cursor else {
            #[cfg(feature = "tracing")]
            tracing::debug!(direction = dir.as_str(), "load skipped: no cursor");
            return LoadOutcome::Skipped(SkipReason::NoCursor);
        };

        match self.fetcher.fetch(&FetchTarget::Continuation(token)).await {
            Ok(page) => {
                let mut session = self.session.lock().await;
                match dir {
                    Direction::Older => session.older.clone_from(&page.older),
                    Direction::Newer => session.newer.clone_from(&page.newer),
                }
                let added = self.merge(&mut session, page, dir.as_str());
                LoadOutcome::Loaded { added }
            }
            Err(err) => {
                self.fail(&err, dir.as_str()).await;
                LoadOutcome::Failed(err)
            }
        }
    }

    fn merge(&self, session: &mut Session, page: RatesPage, kind: &'static str) -> usize {
        let added = session.store.merge_all(page.records);
        #[cfg(feature = "tracing")]
        tracing::debug!(
            kind,
            added,
            total = session.store.len(),
            older = ?session.older,
            newer = ?session.newer,
            "merged unit rate page"
        );
        #[cfg(not(feature = "tracing"))]
        let _ = kind;

        if session.store.is_empty() {
            self.state.send_replace(RatesState::Error(NO_RATES_MESSAGE.to_string()));
        } else {
            self.state.send_replace(RatesState::Success(session.store.snapshot()));
        }
        added
    }

    async fn fail(&self, err: &AgileError, kind: &'static str) {
        let session = self.session.lock().await;
        if session.store.is_empty() {
            #[cfg(feature = "tracing")]
            tracing::error!(kind, error = %err, "fetch failed with no data to show");
            self.state.send_replace(RatesState::Error(format!("Failed to fetch data: {err}")));
        } else {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                kind,
                error = %err,
                total = session.store.len(),
                "fetch failed, keeping existing rates"
            );
            #[cfg(not(feature = "tracing"))]
            let _ = kind;
        }
    }
}
