use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::OnceCell;
use tokio::task::JoinHandle;
use tokio::time::Instant;

type Callback<A> = Arc<dyn Fn(A) + Send + Sync>;
type BoxedFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;

/// Runs its callback only after `wait` has elapsed since the most recent
/// call.
///
/// Every call aborts any still-pending run and reschedules with the new
/// argument, so only the final call of a burst executes. Calls must be made
/// from within a tokio runtime.
pub struct Debouncer<A: Send + 'static> {
    callback: Callback<A>,
    wait: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl<A: Send + 'static> Debouncer<A> {
    pub fn new(wait: Duration, callback: impl Fn(A) + Send + Sync + 'static) -> Self {
        Self {
            callback: Arc::new(callback),
            wait,
            pending: Mutex::new(None),
        }
    }

    pub fn call(&self, arg: A) {
        let callback = Arc::clone(&self.callback);
        let wait = self.wait;

        let mut pending = self.pending.lock().expect("debounce state poisoned");
        if let Some(previous) = pending.take() {
            previous.abort();
        }
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(wait).await;
            callback(arg);
        }));
    }
}

impl<A: Send + 'static> Drop for Debouncer<A> {
    fn drop(&mut self) {
        if let Ok(mut pending) = self.pending.lock() {
            if let Some(handle) = pending.take() {
                handle.abort();
            }
        }
    }
}

/// Runs its callback immediately, then drops further calls until `limit`
/// has elapsed.
///
/// Suppressed calls are dropped, not queued; the first call after the
/// window elapses executes immediately and opens a new window.
pub struct Throttler<A> {
    callback: Callback<A>,
    limit: Duration,
    window_started: Mutex<Option<Instant>>,
}

impl<A> Throttler<A> {
    pub fn new(limit: Duration, callback: impl Fn(A) + Send + Sync + 'static) -> Self {
        Self {
            callback: Arc::new(callback),
            limit,
            window_started: Mutex::new(None),
        }
    }

    pub fn call(&self, arg: A) {
        let now = Instant::now();
        {
            let mut window = self.window_started.lock().expect("throttle state poisoned");
            match *window {
                Some(started) if now.duration_since(started) < self.limit => return,
                _ => *window = Some(now),
            }
        }
        // Invoked outside the lock so the callback may call back in.
        (self.callback)(arg);
    }
}

/// Single-flight lazy loader.
///
/// The first `load` starts the loader; callers arriving before it resolves
/// share the same flight, and the resolved value is cached for every later
/// call. The loader runs at most once.
pub struct LazyLoader<T> {
    loader: Box<dyn Fn() -> BoxedFuture<T> + Send + Sync>,
    cell: OnceCell<T>,
}

impl<T: Clone + Send + Sync + 'static> LazyLoader<T> {
    pub fn new<F, Fut>(loader: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = T> + Send + 'static,
    {
        Self {
            loader: Box::new(move || Box::pin(loader())),
            cell: OnceCell::new(),
        }
    }

    pub async fn load(&self) -> T {
        self.cell.get_or_init(|| (self.loader)()).await.clone()
    }
}
