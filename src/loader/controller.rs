//! Async list loader - runs fetch cycles and commits only the latest one
//!
//! Each call to [`AsyncListLoader::start`] mints a [`RequestToken`], moves the
//! state to `Loading` and spawns the fetch on the Tokio runtime. When the
//! fetch settles, its result is written only if its token is still the
//! current one and the loader has not been disposed.
//!
//! Cancellation is best-effort: a superseded fetch keeps running until it
//! settles (unless `abort_superseded` is set), only its result is ignored.

use std::fmt::{self, Display};
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use tokio::sync::watch;
use tokio::task::AbortHandle;

use crate::config::LoaderConfig;
use crate::loader::error::ErrorInfo;
use crate::loader::state::{LoadState, RequestToken};

type FetchFn<T> = Arc<dyn Fn() -> BoxFuture<'static, Result<Vec<T>, ErrorInfo>> + Send + Sync>;

/// State cell shared between the loader handle and its in-flight cycles.
///
/// Token and disposal checks happen inside the watch channel's write lock,
/// so a commit can never interleave with a start or a dispose.
struct Shared<T> {
    state: watch::Sender<LoadState<Vec<T>>>,
    current: AtomicU64,
    disposed: AtomicBool,
}

impl<T> Shared<T> {
    fn new() -> Self {
        let (state, _) = watch::channel(LoadState::Idle);
        Shared {
            state,
            current: AtomicU64::new(0),
            disposed: AtomicBool::new(false),
        }
    }

    /// Mint a token and move to Loading, unless disposed
    fn begin(&self) -> Option<RequestToken> {
        let mut minted = None;
        self.state.send_if_modified(|state| {
            if self.disposed.load(Ordering::SeqCst) {
                return false;
            }
            let token = self.current.fetch_add(1, Ordering::SeqCst) + 1;
            *state = LoadState::Loading;
            minted = Some(RequestToken(token));
            true
        });
        minted
    }

    /// Write the outcome of `token` if it is still current
    fn commit(&self, token: RequestToken, outcome: LoadState<Vec<T>>) -> bool {
        self.state.send_if_modified(|state| {
            if self.disposed.load(Ordering::SeqCst)
                || self.current.load(Ordering::SeqCst) != token.0
            {
                return false;
            }
            *state = outcome;
            true
        })
    }

    /// Returns true the first time only
    fn dispose(&self) -> bool {
        let mut newly_disposed = false;
        self.state.send_if_modified(|_| {
            newly_disposed = !self.disposed.swap(true, Ordering::SeqCst);
            false
        });
        newly_disposed
    }

    fn current_token(&self) -> Option<RequestToken> {
        match self.current.load(Ordering::SeqCst) {
            0 => None,
            n => Some(RequestToken(n)),
        }
    }
}

/// Race-free loader for a list of `T`
pub struct AsyncListLoader<T> {
    shared: Arc<Shared<T>>,
    fallback: Arc<str>,
    abort_superseded: bool,
    fetch: Option<FetchFn<T>>,
    in_flight: Option<AbortHandle>,
}

impl<T> AsyncListLoader<T> {
    /// Mark the loader inactive. Pending results are discarded from now on.
    /// Calling it again has no further effect.
    pub fn dispose(&mut self) {
        if self.shared.dispose() {
            tracing::info!(token = ?self.shared.current_token(), "Loader disposed");
        }
        if self.abort_superseded {
            if let Some(handle) = self.in_flight.take() {
                handle.abort();
            }
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.shared.disposed.load(Ordering::SeqCst)
    }

    /// Token of the most recently started cycle
    pub fn current_token(&self) -> Option<RequestToken> {
        self.shared.current_token()
    }

    /// Run `f` against the current state without cloning it
    pub fn with_state<R>(&self, f: impl FnOnce(&LoadState<Vec<T>>) -> R) -> R {
        f(&self.shared.state.borrow())
    }

    /// Receiver notified on every state change
    pub fn subscribe(&self) -> watch::Receiver<LoadState<Vec<T>>> {
        self.shared.state.subscribe()
    }
}

impl<T: Clone> AsyncListLoader<T> {
    pub fn state(&self) -> LoadState<Vec<T>> {
        self.shared.state.borrow().clone()
    }
}

impl<T: Send + Sync + 'static> AsyncListLoader<T> {
    pub fn new(config: LoaderConfig) -> Self {
        AsyncListLoader {
            shared: Arc::new(Shared::new()),
            fallback: Arc::from(config.fallback()),
            abort_superseded: config.abort_superseded,
            fetch: None,
            in_flight: None,
        }
    }

    /// Create a loader and start its first cycle right away
    pub fn with_fetch<F, Fut, E>(config: LoaderConfig, fetch: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Vec<T>, E>> + Send + 'static,
        E: Display + Send + 'static,
    {
        let mut loader = Self::new(config);
        loader.start(fetch);
        loader
    }

    /// Start a new fetch cycle, superseding any pending one.
    ///
    /// Returns the cycle's token, or `None` when the loader is disposed.
    /// Must be called from within a Tokio runtime.
    pub fn start<F, Fut, E>(&mut self, fetch: F) -> Option<RequestToken>
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Vec<T>, E>> + Send + 'static,
        E: Display + Send + 'static,
    {
        let fallback = Arc::clone(&self.fallback);
        let fetch: FetchFn<T> = Arc::new(move || {
            let fallback = Arc::clone(&fallback);
            let pending = fetch();
            async move {
                pending
                    .await
                    .map_err(|err| ErrorInfo::from_display(&err, &fallback))
            }
            .boxed()
        });
        self.fetch = Some(Arc::clone(&fetch));
        self.launch(fetch)
    }

    /// Start a new cycle with the last fetch function given to `start`
    pub fn reload(&mut self) -> Option<RequestToken> {
        let fetch = self.fetch.clone()?;
        self.launch(fetch)
    }

    fn launch(&mut self, fetch: FetchFn<T>) -> Option<RequestToken> {
        let Some(token) = self.shared.begin() else {
            tracing::warn!("Ignoring start on a disposed loader");
            return None;
        };

        if self.abort_superseded {
            if let Some(previous) = self.in_flight.take() {
                previous.abort();
            }
        }

        tracing::info!(%token, "Starting fetch cycle");
        let shared = Arc::clone(&self.shared);
        let fallback = Arc::clone(&self.fallback);

        let handle = tokio::spawn(async move {
            // Calling `fetch` inside the guarded future also catches panics
            // raised before its first await.
            let outcome = match AssertUnwindSafe(async move { fetch().await })
                .catch_unwind()
                .await
            {
                Ok(result) => result,
                Err(payload) => Err(ErrorInfo::from_panic(payload, &fallback)),
            };

            let items = outcome.as_ref().map(Vec::len).ok();
            let error = outcome.as_ref().err().map(|e| e.message().to_string());
            if shared.commit(token, LoadState::from(outcome)) {
                match error {
                    None => tracing::info!(%token, items, "Fetch cycle succeeded"),
                    Some(error) => tracing::info!(%token, %error, "Fetch cycle failed"),
                }
            } else {
                tracing::debug!(%token, "Discarding stale fetch result");
            }
        });

        self.in_flight = Some(handle.abort_handle());
        Some(token)
    }
}

impl<T> Drop for AsyncListLoader<T> {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl<T> fmt::Debug for AsyncListLoader<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncListLoader")
            .field("state", &self.with_state(LoadState::label))
            .field("current_token", &self.current_token())
            .field("disposed", &self.is_disposed())
            .field("abort_superseded", &self.abort_superseded)
            .finish()
    }
}
