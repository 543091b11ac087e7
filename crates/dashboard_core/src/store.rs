use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Change listener registered on a [`Store`].
pub type Listener<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Handle returned by [`Store::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

struct Registered<T> {
    id: u64,
    /// First delivery sequence this listener receives.
    since: u64,
    listener: Listener<T>,
}

struct Delivery<T> {
    seq: u64,
    /// `Some` for the initial value handed to a new subscriber only.
    only: Option<u64>,
    value: T,
}

struct Inner<T> {
    value: T,
    next_id: u64,
    next_seq: u64,
    listeners: Vec<Registered<T>>,
    pending: VecDeque<Delivery<T>>,
    draining: bool,
}

impl<T> Inner<T> {
    fn enqueue(&mut self, only: Option<u64>, value: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push_back(Delivery { seq, only, value });
    }
}

/// Observable value cell: a value holder plus change listeners, notified on every write.
///
/// Every write queues a snapshot under the same lock that orders the writes,
/// and one thread at a time delivers the queue. Listeners therefore see values
/// in write order and the last value a listener sees is the stored one. No
/// lock is held while a listener runs, so a listener may read or write the
/// store it observes; a nested write is delivered after the current one.
pub struct Store<T> {
    inner: Mutex<Inner<T>>,
}

impl<T: Clone> Store<T> {
    pub fn new(initial: T) -> Self {
        Self {
            inner: Mutex::new(Inner {
                value: initial,
                next_id: 0,
                next_seq: 0,
                listeners: Vec::new(),
                pending: VecDeque::new(),
                draining: false,
            }),
        }
    }

    /// Snapshot of the current value.
    pub fn get(&self) -> T {
        lock(&self.inner).value.clone()
    }

    /// Read the current value without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&lock(&self.inner).value)
    }

    pub fn set(&self, value: T) {
        self.write(|current| *current = value);
    }

    /// Mutate the value in place, then notify listeners once.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        self.write(f);
    }

    /// Register a listener. It receives the current value immediately and
    /// every subsequent value until unsubscribed.
    pub fn subscribe(&self, listener: impl Fn(&T) + Send + Sync + 'static) -> Subscription {
        let id = {
            let mut inner = lock(&self.inner);
            let id = inner.next_id;
            inner.next_id += 1;
            let since = inner.next_seq;
            inner.listeners.push(Registered {
                id,
                since,
                listener: Arc::new(listener),
            });
            let current = inner.value.clone();
            inner.enqueue(Some(id), current);
            id
        };
        self.drain();
        Subscription(id)
    }

    /// Returns `false` if the subscription was already removed.
    pub fn unsubscribe(&self, subscription: Subscription) -> bool {
        let mut inner = lock(&self.inner);
        let before = inner.listeners.len();
        inner.listeners.retain(|entry| entry.id != subscription.0);
        inner.listeners.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        lock(&self.inner).listeners.len()
    }

    pub fn clear_subscribers(&self) {
        lock(&self.inner).listeners.clear();
    }

    fn write(&self, f: impl FnOnce(&mut T)) {
        {
            let mut inner = lock(&self.inner);
            f(&mut inner.value);
            let snapshot = inner.value.clone();
            inner.enqueue(None, snapshot);
        }
        self.drain();
    }

    fn drain(&self) {
        {
            let mut inner = lock(&self.inner);
            if inner.draining {
                return;
            }
            inner.draining = true;
        }
        let mut guard = DrainGuard {
            inner: &self.inner,
            finished: false,
        };
        loop {
            let (value, listeners) = {
                let mut inner = lock(&self.inner);
                let Some(delivery) = inner.pending.pop_front() else {
                    // Cleared under the lock that queued the last delivery, so
                    // no write can slip in between.
                    inner.draining = false;
                    guard.finished = true;
                    return;
                };
                let listeners: Vec<Listener<T>> = inner
                    .listeners
                    .iter()
                    .filter(|entry| match delivery.only {
                        Some(id) => entry.id == id,
                        None => entry.since <= delivery.seq,
                    })
                    .map(|entry| entry.listener.clone())
                    .collect();
                (delivery.value, listeners)
            };
            for listener in listeners {
                listener(&value);
            }
        }
    }
}

/// Releases the delivery role if a listener panics mid-drain.
struct DrainGuard<'a, T> {
    inner: &'a Mutex<Inner<T>>,
    finished: bool,
}

impl<T> Drop for DrainGuard<'_, T> {
    fn drop(&mut self) {
        if !self.finished {
            lock(self.inner).draining = false;
        }
    }
}

impl<T: Clone + Default> Default for Store<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Store<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = lock(&self.inner);
        f.debug_struct("Store")
            .field("value", &inner.value)
            .field("subscribers", &inner.listeners.len())
            .finish()
    }
}

// A listener that panicked must not wedge the dashboard; keep serving the last value.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
