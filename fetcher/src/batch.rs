//! Bounded-concurrency batch fetching.
//!
//! [`fetch_batch`] runs a single-item fetch for every key on a fixed pool of
//! tokio workers and returns the values in input order. A failed item never
//! aborts the others: its slot keeps `T::default()` and its error is recorded
//! at the same position of a [`MultiError`].
use crate::*;
use std::future::Future;
use tokio::sync::Mutex;

struct IndexedRequest<K> {
    index: usize,
    key: K,
}

struct IndexedResult<T, E> {
    index: usize,
    value: T,
    error: Option<E>,
}

/// Per-position errors of a batch, one entry per input key. `None` marks a
/// position that succeeded.
#[derive(Debug)]
pub struct MultiError<E>(Vec<Option<E>>);

impl<E> MultiError<E> {
    pub fn new(errors: Vec<Option<E>>) -> Self {
        Self(errors)
    }

    /// Number of positions, successful ones included.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&E> {
        self.0.get(index).and_then(Option::as_ref)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Option<E>> {
        self.0.iter()
    }

    /// Failed positions with their errors, in input order.
    pub fn failures(&self) -> impl Iterator<Item = (usize, &E)> {
        self.0
            .iter()
            .enumerate()
            .filter_map(|(index, error)| error.as_ref().map(|error| (index, error)))
    }

    pub fn error_count(&self) -> usize {
        self.0.iter().filter(|error| error.is_some()).count()
    }

    pub fn into_inner(self) -> Vec<Option<E>> {
        self.0
    }
}

impl<E: Display> Display for MultiError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut failures = self.failures();
        let Some((_, first)) = failures.next() else {
            return write!(f, "(0 errors)");
        };
        match failures.count() {
            0 => write!(f, "{}", first),
            1 => write!(f, "{} (and 1 other error)", first),
            others => write!(f, "{} (and {} other errors)", first, others),
        }
    }
}

impl<E> std::error::Error for MultiError<E>
where
    E: std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.failures()
            .next()
            .map(|(_, error)| error as &(dyn std::error::Error + 'static))
    }
}

/// Returned when at least one item of a batch failed. `results` still holds
/// every successful value at its input position.
#[derive(Debug)]
pub struct BatchError<T, E> {
    pub results: Vec<T>,
    pub errors: MultiError<E>,
    /// Positions that never produced a response because their worker was
    /// cancelled. Empty unless the runtime shut down mid-batch.
    pub unfinished: Vec<usize>,
}

impl<T, E> BatchError<T, E> {
    /// Pairs every value with its error, one entry per input key. Unfinished
    /// positions are `None`.
    pub fn into_results(self) -> Vec<Option<Result<T, E>>> {
        let mut per_key: Vec<Option<Result<T, E>>> = self
            .results
            .into_iter()
            .zip(self.errors.into_inner())
            .map(|(value, error)| match error {
                Some(error) => Some(Err(error)),
                None => Some(Ok(value)),
            })
            .collect();
        for index in self.unfinished {
            if let Some(slot) = per_key.get_mut(index) {
                *slot = None;
            }
        }
        per_key
    }
}

impl<T, E: Display> Display for BatchError<T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.errors.error_count(), self.unfinished.len()) {
            (_, 0) => Display::fmt(&self.errors, f),
            (0, unfinished) => write!(
                f,
                "{} of {} items were not fetched",
                unfinished,
                self.results.len()
            ),
            (_, unfinished) => write!(f, "{} ({} items not fetched)", self.errors, unfinished),
        }
    }
}

impl<T, E> std::error::Error for BatchError<T, E>
where
    T: std::fmt::Debug,
    E: std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.errors)
    }
}

/// Fetches every key with `fetch_one` using at most `num_workers` concurrent
/// calls and returns the values in the order of `keys`.
///
/// Each key is fetched exactly once. If any call fails, the returned
/// [`BatchError`] carries all values (`T::default()` where the call failed)
/// together with the per-position errors. A `num_workers` of zero is treated
/// as one. A panic inside `fetch_one` is propagated to the caller once the
/// pool has stopped; a worker cancelled by the runtime leaves its positions in
/// [`BatchError::unfinished`].
pub async fn fetch_batch<K, T, E, F, Fut>(
    keys: Vec<K>,
    num_workers: usize,
    fetch_one: F,
) -> Result<Vec<T>, BatchError<T, E>>
where
    K: Send + 'static,
    T: Default + Send + 'static,
    E: Display + Send + 'static,
    F: Fn(K) -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
{
    let total = keys.len();
    if total == 0 {
        return Ok(Vec::new());
    }
    let num_workers = num_workers.clamp(1, total);
    tracing::log::info!(
        target: LOG_TARGET,
        "Start fetching {} items with {} workers",
        total,
        num_workers
    );

    let (request_sender, request_receiver) = mpsc::channel::<IndexedRequest<K>>(total);
    let (response_sender, mut response_receiver) = mpsc::channel::<IndexedResult<T, E>>(total);
    let request_receiver = Arc::new(Mutex::new(request_receiver));

    let handles = (0..num_workers)
        .map(|worker_index| {
            let fetch_one = fetch_one.clone();
            let requests = request_receiver.clone();
            let responses = response_sender.clone();
            tokio::spawn(async move {
                loop {
                    let request = requests.lock().await.recv().await;
                    let Some(IndexedRequest { index, key }) = request else {
                        break;
                    };
                    tracing::log::debug!(target: LOG_TARGET, "#{}: Fetching item {}", worker_index, index);
                    let response = match fetch_one(key).await {
                        Ok(value) => IndexedResult {
                            index,
                            value,
                            error: None,
                        },
                        Err(error) => IndexedResult {
                            index,
                            value: T::default(),
                            error: Some(error),
                        },
                    };
                    if responses.send(response).await.is_err() {
                        break;
                    }
                }
            })
        })
        .collect::<Vec<_>>();
    // Only workers hold senders now, so the receiver sees the channel close if
    // all of them stop early.
    drop(response_sender);

    for (index, key) in keys.into_iter().enumerate() {
        if request_sender
            .send(IndexedRequest { index, key })
            .await
            .is_err()
        {
            break;
        }
    }
    drop(request_sender);

    let collected = collect_responses(&mut response_receiver, total).await;

    for handle in handles {
        if let Err(err) = handle.await {
            if err.is_panic() {
                std::panic::resume_unwind(err.into_panic());
            }
        }
    }

    collected.into_result()
}

/// Values and errors gathered by index, plus which positions got a response.
struct Collected<T, E> {
    results: Vec<T>,
    errors: Vec<Option<E>>,
    received: Vec<bool>,
}

impl<T, E> Collected<T, E> {
    fn into_result(self) -> Result<Vec<T>, BatchError<T, E>> {
        let unfinished: Vec<usize> = self
            .received
            .iter()
            .enumerate()
            .filter(|(_, received)| !**received)
            .map(|(index, _)| index)
            .collect();
        if unfinished.is_empty() && self.errors.iter().all(Option::is_none) {
            return Ok(self.results);
        }
        Err(BatchError {
            results: self.results,
            errors: MultiError(self.errors),
            unfinished,
        })
    }
}

/// Reads responses until `total` have arrived or every worker is gone,
/// writing each one into the slot of its original index.
async fn collect_responses<T, E>(
    responses: &mut mpsc::Receiver<IndexedResult<T, E>>,
    total: usize,
) -> Collected<T, E>
where
    T: Default,
    E: Display,
{
    let mut collected = Collected {
        results: Vec::with_capacity(total),
        errors: Vec::with_capacity(total),
        received: vec![false; total],
    };
    collected.results.resize_with(total, T::default);
    collected.errors.resize_with(total, || None);

    let mut count = 0;
    while count < total {
        let Some(IndexedResult {
            index,
            value,
            error,
        }) = responses.recv().await
        else {
            tracing::log::warn!(
                target: LOG_TARGET,
                "Batch workers stopped after {} of {} items",
                count,
                total
            );
            break;
        };
        collected.results[index] = value;
        if let Some(error) = &error {
            tracing::log::warn!(target: LOG_TARGET, "Failed to fetch item {}: {}", index, error);
        }
        collected.errors[index] = error;
        collected.received[index] = true;
        count += 1;
    }
    collected
}
