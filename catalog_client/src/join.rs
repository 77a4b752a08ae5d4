//! Fan-out / join of independent fetches
//!
//! Every input is spawned onto the runtime straight away. The joined future
//! resolves once all inputs succeed, in input order, or rejects with the
//! first error to arrive. Losing fetches are detached rather than cancelled:
//! they run to completion and their results are dropped.

use catalog_common::{FetchError, Result};
use std::future::Future;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Run `fetches` concurrently and collect their values in input order
pub async fn join_all<T, F, I>(fetches: I) -> Result<Vec<T>>
where
    I: IntoIterator<Item = F>,
    F: Future<Output = Result<T>> + Send + 'static,
    T: Send + 'static,
{
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut total = 0;
    for (index, fetch) in fetches.into_iter().enumerate() {
        let tx = tx.clone();
        tokio::spawn(async move {
            let result = fetch.await;
            // The receiver is gone once the join has already failed
            let _ = tx.send((index, result));
        });
        total += 1;
    }
    drop(tx);

    let mut slots: Vec<Option<T>> = (0..total).map(|_| None).collect();
    let mut filled = 0;
    while filled < total {
        match rx.recv().await {
            Some((index, Ok(value))) => {
                slots[index] = Some(value);
                filled += 1;
            }
            Some((index, Err(e))) => {
                log::debug!("Fetch #{} of {} failed, abandoning join: {}", index, total, e);
                return Err(e);
            }
            // Every sender dropped without reporting: a task panicked
            None => {
                return Err(FetchError::Join(format!(
                    "{} of {} fetches never reported a result",
                    total - filled,
                    total
                )))
            }
        }
    }

    Ok(slots.into_iter().flatten().collect())
}

/// Two fetches of different types, joined with the same fail-fast rules
pub async fn join2<A, B, FA, FB>(a: FA, b: FB) -> Result<(A, B)>
where
    FA: Future<Output = Result<A>> + Send + 'static,
    FB: Future<Output = Result<B>> + Send + 'static,
    A: Send + 'static,
    B: Send + 'static,
{
    let a = tokio::spawn(a);
    let b = tokio::spawn(b);
    tokio::try_join!(settle(a), settle(b))
}

/// Three fetches of different types, joined with the same fail-fast rules
pub async fn join3<A, B, C, FA, FB, FC>(a: FA, b: FB, c: FC) -> Result<(A, B, C)>
where
    FA: Future<Output = Result<A>> + Send + 'static,
    FB: Future<Output = Result<B>> + Send + 'static,
    FC: Future<Output = Result<C>> + Send + 'static,
    A: Send + 'static,
    B: Send + 'static,
    C: Send + 'static,
{
    let a = tokio::spawn(a);
    let b = tokio::spawn(b);
    let c = tokio::spawn(c);
    tokio::try_join!(settle(a), settle(b), settle(c))
}

/// Await a spawned fetch. Dropping this future detaches the task, it does
/// not abort it.
async fn settle<T>(handle: JoinHandle<Result<T>>) -> Result<T> {
    handle
        .await
        .map_err(|e| FetchError::Join(e.to_string()))?
}

#[cfg(test)]
#[path = "join_tests.rs"]
mod tests;
