//! Memoized async loader.
//!
//! Runs a one-shot async load and keeps its result. Callers arriving while a
//! load is in flight join it instead of starting another one, so at most one
//! load runs at a time and every joined caller sees the same `Arc`.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use futures::future::{BoxFuture, FutureExt, Shared};

/// Value produced by a load, with its freshness window.
#[derive(Debug, Clone)]
pub struct Expiring<T> {
    pub value: T,
    /// `None` keeps the value for the lifetime of the loader
    pub ttl: Option<Duration>,
}

impl<T> Expiring<T> {
    pub fn new(value: T, ttl: Option<Duration>) -> Self {
        Self { value, ttl }
    }

    pub fn forever(value: T) -> Self {
        Self::new(value, None)
    }
}

/// Settled load result.
struct Entry<T> {
    value: Arc<T>,
    expires_at: Option<Instant>,
}

impl<T> Clone for Entry<T> {
    fn clone(&self) -> Self {
        Self {
            value: Arc::clone(&self.value),
            expires_at: self.expires_at,
        }
    }
}

impl<T> Entry<T> {
    fn settle(loaded: Expiring<T>) -> Self {
        // Overflowing deadlines are treated as "never".
        let expires_at = loaded.ttl.and_then(|ttl| Instant::now().checked_add(ttl));
        Self {
            value: Arc::new(loaded.value),
            expires_at,
        }
    }

    fn is_fresh(&self, now: Instant) -> bool {
        self.expires_at.map_or(true, |deadline| now < deadline)
    }
}

type PendingLoad<T> = Shared<BoxFuture<'static, Entry<T>>>;

enum State<T> {
    Empty,
    Pending { generation: u64, load: PendingLoad<T> },
    Resolved(Entry<T>),
}

struct Inner<T> {
    state: State<T>,
    generation: u64,
}

impl<T> Inner<T> {
    fn fresh_value(&self, now: Instant) -> Option<Arc<T>> {
        match &self.state {
            State::Resolved(entry) if entry.is_fresh(now) => Some(Arc::clone(&entry.value)),
            _ => None,
        }
    }

    fn pending(&self) -> Option<(u64, PendingLoad<T>)> {
        match &self.state {
            State::Pending { generation, load } => Some((*generation, load.clone())),
            _ => None,
        }
    }

    fn start(&mut self, load: PendingLoad<T>) -> (u64, PendingLoad<T>) {
        self.generation += 1;
        self.state = State::Pending {
            generation: self.generation,
            load: load.clone(),
        };
        (self.generation, load)
    }
}

/// Single-flight memoizing wrapper around an async load.
///
/// The state moves `Empty -> Pending -> Resolved`. A resolved value whose
/// ttl has elapsed is treated as `Empty` by the next caller.
pub struct MemoizedLoader<T> {
    inner: Mutex<Inner<T>>,
}

impl<T> MemoizedLoader<T>
where
    T: Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                state: State::Empty,
                generation: 0,
            }),
        }
    }

    /// Return the memoized value, loading it if needed.
    ///
    /// `load` is only called when nothing fresh is cached and no load is in
    /// flight. Dropping the returned future does not cancel an in-flight
    /// load; the next caller resumes it.
    pub async fn get_or_load<F, Fut>(&self, load: F) -> Arc<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Expiring<T>> + Send + 'static,
    {
        let (generation, pending) = {
            let mut inner = self.lock();
            if let Some(value) = inner.fresh_value(Instant::now()) {
                return value;
            }
            match inner.pending() {
                Some(joined) => joined,
                None => inner.start(load().map(Entry::settle).boxed().shared()),
            }
        };

        let entry = pending.await;
        self.settle(generation, &entry);
        entry.value
    }

    /// Fresh memoized value, without loading.
    pub fn peek(&self) -> Option<Arc<T>> {
        self.lock().fresh_value(Instant::now())
    }

    /// Check if a load is in flight
    pub fn is_pending(&self) -> bool {
        matches!(self.lock().state, State::Pending { .. })
    }

    /// Forget the resolved value. An in-flight load is left alone.
    pub fn invalidate(&self) {
        let mut inner = self.lock();
        if matches!(inner.state, State::Resolved(_)) {
            inner.state = State::Empty;
        }
    }

    fn settle(&self, generation: u64, entry: &Entry<T>) {
        let mut inner = self.lock();
        let current = matches!(
            &inner.state,
            State::Pending { generation: g, .. } if *g == generation
        );
        if current {
            inner.state = State::Resolved(entry.clone());
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner<T>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T> Default for MemoizedLoader<T>
where
    T: Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
