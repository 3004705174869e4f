use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// Lifecycle snapshot of one tracked asynchronous operation.
///
/// `loading` is true for the duration of exactly one in-flight attempt,
/// `error` is cleared at the start of every new attempt and set only on
/// failure, and `value` changes only on success.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AsyncState<T> {
    pub value: T,
    pub loading: bool,
    pub error: Option<String>,
}

type Observer<T> = Arc<dyn Fn(&AsyncState<T>) + Send + Sync>;
type ObserverList<T> = Arc<Mutex<Vec<(u64, Observer<T>)>>>;

/// Reactive container for one [`AsyncState`].
///
/// Observers registered via [`AsyncCell::subscribe`] are invoked
/// synchronously after each mutation with a snapshot of the new state. The
/// snapshot is taken and the state lock released before any observer runs,
/// so observers may read the cell re-entrantly.
pub struct AsyncCell<T> {
    state: Mutex<AsyncState<T>>,
    observers: ObserverList<T>,
    next_observer_id: AtomicU64,
}

impl<T: Clone + 'static> AsyncCell<T> {
    pub fn new(value: T) -> Self {
        Self {
            state: Mutex::new(AsyncState {
                value,
                loading: false,
                error: None,
            }),
            observers: Arc::new(Mutex::new(Vec::new())),
            next_observer_id: AtomicU64::new(1),
        }
    }

    /// Returns a snapshot of the current state.
    pub fn get(&self) -> AsyncState<T> {
        self.state.lock().expect("async state lock poisoned").clone()
    }

    /// Registers an observer; it is called after every subsequent mutation.
    pub fn subscribe(
        &self,
        observer: impl Fn(&AsyncState<T>) + Send + Sync + 'static,
    ) -> Subscription {
        let id = self.next_observer_id.fetch_add(1, Ordering::Relaxed);
        self.observers
            .lock()
            .expect("observer list lock poisoned")
            .push((id, Arc::new(observer)));

        let observers = Arc::clone(&self.observers);
        Subscription {
            cancel: Box::new(move || {
                observers
                    .lock()
                    .expect("observer list lock poisoned")
                    .retain(|(observer_id, _)| *observer_id != id);
            }),
        }
    }

    /// Marks the start of a new attempt: `loading = true`, `error = None`.
    pub fn begin(&self) {
        self.apply(|state| {
            state.loading = true;
            state.error = None;
        });
    }

    /// Records a successful result: `value = v`, `error = None`.
    pub fn resolve(&self, value: T) {
        self.apply(|state| {
            state.value = value;
            state.error = None;
        });
    }

    /// Records a failure message; the value is left unchanged.
    pub fn reject(&self, message: String) {
        self.apply(|state| {
            state.error = Some(message);
        });
    }

    /// Marks the attempt settled: `loading = false`.
    pub fn settle(&self) {
        self.apply(|state| {
            state.loading = false;
        });
    }

    fn apply(&self, mutate: impl FnOnce(&mut AsyncState<T>)) {
        let snapshot = {
            let mut state = self.state.lock().expect("async state lock poisoned");
            mutate(&mut state);
            state.clone()
        };
        let observers: Vec<Observer<T>> = self
            .observers
            .lock()
            .expect("observer list lock poisoned")
            .iter()
            .map(|(_, observer)| Arc::clone(observer))
            .collect();
        for observer in &observers {
            observer(&snapshot);
        }
    }
}

impl<T: Clone + Default + 'static> Default for AsyncCell<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// Handle for a registered observer.
///
/// Unsubscribing is explicit; dropping the handle without calling
/// [`Subscription::unsubscribe`] leaves the observer registered for the
/// lifetime of the cell.
pub struct Subscription {
    cancel: Box<dyn FnOnce() + Send>,
}

impl Subscription {
    /// Removes the observer this handle was returned for.
    pub fn unsubscribe(self) {
        (self.cancel)();
    }
}
