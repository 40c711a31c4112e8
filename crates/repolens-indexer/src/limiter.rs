//! Bounded-parallelism task driver

use futures_util::stream::{FuturesUnordered, StreamExt};
use std::future::Future;

/// Run every task with at most `limit` in flight, returning results in submission order.
///
/// Tasks are started lazily: a factory is only called once a slot is free. A task
/// that wants to survive failure must catch it itself and return a fallback value;
/// the batch never short-circuits.
pub async fn limit_concurrency<I, F, Fut, T>(tasks: I, limit: usize) -> Vec<T>
where
    I: IntoIterator<Item = F>,
    F: FnOnce() -> Fut,
    Fut: Future<Output = T>,
{
    let limit = limit.max(1);
    let mut results: Vec<Option<T>> = Vec::new();
    let mut executing = FuturesUnordered::new();

    for (index, task) in tasks.into_iter().enumerate() {
        results.push(None);
        let fut = task();
        executing.push(async move { (index, fut.await) });
        if executing.len() >= limit {
            if let Some((done, value)) = executing.next().await {
                results[done] = Some(value);
            }
        }
    }
    while let Some((done, value)) = executing.next().await {
        results[done] = Some(value);
    }

    results.into_iter().flatten().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn test_never_exceeds_limit() {
        let in_flight = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let tasks = (0..25u64).map(|i| {
            let in_flight = in_flight.clone();
            let peak = peak.clone();
            move || async move {
                let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(1 + (i * 7) % 13)).await;
                in_flight.fetch_sub(1, Ordering::SeqCst);
                i
            }
        });

        let results = limit_concurrency(tasks, 10).await;

        assert_eq!(results, (0..25).collect::<Vec<_>>());
        assert!(peak.load(Ordering::SeqCst) <= 10);
        assert!(peak.load(Ordering::SeqCst) > 1, "tasks ran one at a time");
    }

    #[tokio::test]
    async fn test_failed_tasks_do_not_abort_batch() {
        let tasks = (0..5).map(|i| {
            move || async move {
                if i % 2 == 0 {
                    Err(format!("task {i} failed"))
                } else {
                    Ok(i)
                }
            }
        });

        let results = limit_concurrency(tasks, 2).await;

        assert_eq!(results.len(), 5);
        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 2);
    }

    #[tokio::test]
    async fn test_empty_and_zero_limit() {
        let none: Vec<fn() -> std::future::Ready<u8>> = Vec::new();
        assert!(limit_concurrency(none, 4).await.is_empty());

        let tasks = (0..3).map(|i| move || async move { i * 2 });
        assert_eq!(limit_concurrency(tasks, 0).await, vec![0, 2, 4]);
    }
}
