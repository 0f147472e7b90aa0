//! Bounded-concurrency mapping.
//!
//! A semaphore-gated task group: one task per item, at most `limit` in
//! flight, results collected in input order. This is the primitive behind
//! every per-repository fan-out in the pipeline.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::Semaphore;

/// Map `items` through `f` with at most `limit` transforms in flight.
///
/// Output order equals input order regardless of completion order; there is
/// no guarantee about which worker handles which item. A `limit` of zero is
/// treated as one. Worker panics propagate to the caller.
pub async fn map_bounded<T, R, F, Fut>(items: Vec<T>, limit: usize, f: F) -> Vec<R>
where
    T: Send + 'static,
    R: Send + 'static,
    F: Fn(T) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
{
    let semaphore = Arc::new(Semaphore::new(limit.max(1)));
    let f = Arc::new(f);

    let handles: Vec<_> = items
        .into_iter()
        .map(|item| {
            let semaphore = Arc::clone(&semaphore);
            let f = Arc::clone(&f);
            tokio::spawn(async move {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .expect("fan-out semaphore closed");
                f(item).await
            })
        })
        .collect();

    // Awaiting in spawn order is what preserves input order: each slot is
    // owned by exactly one task.
    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        match handle.await {
            Ok(value) => results.push(value),
            Err(err) if err.is_panic() => std::panic::resume_unwind(err.into_panic()),
            Err(err) => panic!("fan-out worker failed: {err}"),
        }
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    use tokio::time::sleep;

    #[tokio::test]
    async fn empty_input_yields_empty_output() {
        let out: Vec<u32> = map_bounded(Vec::<u32>::new(), 4, |n| async move { n }).await;
        assert!(out.is_empty());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn preserves_input_order_despite_completion_order() {
        // Later items finish earlier; output must still match input order.
        let items: Vec<u64> = (0..10).collect();
        let out = map_bounded(items.clone(), 10, |n| async move {
            sleep(Duration::from_millis(50 - 5 * n)).await;
            n * 2
        })
        .await;

        let expected: Vec<u64> = items.iter().map(|n| n * 2).collect();
        assert_eq!(out, expected);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn limit_one_is_strictly_sequential() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let out = {
            let events = Arc::clone(&events);
            map_bounded(vec![0usize, 1, 2, 3], 1, move |n| {
                let events = Arc::clone(&events);
                async move {
                    events.lock().unwrap().push(("start", n));
                    sleep(Duration::from_millis(10)).await;
                    events.lock().unwrap().push(("end", n));
                    n
                }
            })
            .await
        };
        assert_eq!(out, vec![0, 1, 2, 3]);

        // With one permit, every start must follow the previous end.
        let events = events.lock().unwrap();
        for pair in events.chunks(2) {
            assert_eq!(pair[0].0, "start");
            assert_eq!(pair[1].0, "end");
            assert_eq!(pair[0].1, pair[1].1);
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn limit_at_or_above_item_count_runs_fully_parallel() {
        let in_flight = Arc::new(AtomicUsize::new(0));
        let max_seen = Arc::new(AtomicUsize::new(0));

        let (in_flight_2, max_seen_2) = (Arc::clone(&in_flight), Arc::clone(&max_seen));
        map_bounded(vec![(); 4], 8, move |()| {
            let in_flight = Arc::clone(&in_flight_2);
            let max_seen = Arc::clone(&max_seen_2);
            async move {
                let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                max_seen.fetch_max(now, Ordering::SeqCst);
                sleep(Duration::from_millis(50)).await;
                in_flight.fetch_sub(1, Ordering::SeqCst);
            }
        })
        .await;

        assert_eq!(max_seen.load(Ordering::SeqCst), 4);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn never_exceeds_the_limit() {
        let in_flight = Arc::new(AtomicUsize::new(0));
        let max_seen = Arc::new(AtomicUsize::new(0));

        let (in_flight_2, max_seen_2) = (Arc::clone(&in_flight), Arc::clone(&max_seen));
        map_bounded((0..20).collect::<Vec<_>>(), 3, move |_n| {
            let in_flight = Arc::clone(&in_flight_2);
            let max_seen = Arc::clone(&max_seen_2);
            async move {
                let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                max_seen.fetch_max(now, Ordering::SeqCst);
                sleep(Duration::from_millis(5)).await;
                in_flight.fetch_sub(1, Ordering::SeqCst);
            }
        })
        .await;

        assert!(max_seen.load(Ordering::SeqCst) <= 3);
    }

    #[tokio::test]
    async fn zero_limit_is_treated_as_one() {
        let out = map_bounded(vec![1, 2, 3], 0, |n| async move { n + 1 }).await;
        assert_eq!(out, vec![2, 3, 4]);
    }
}
