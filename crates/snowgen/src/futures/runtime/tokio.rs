use core::time::Duration;

use crate::{Generator, SleepProvider, SnowgenId, TimeSource};

/// A [`SleepProvider`] backed by Tokio's timer.
///
/// This is the default provider for use in async applications built on Tokio.
pub struct TokioSleep;
impl SleepProvider for TokioSleep {
    async fn sleep_for(dur: Duration) {
        tokio::time::sleep(dur).await;
    }
}

/// A [`SleepProvider`] that yields to the Tokio scheduler instead of arming a
/// timer.
///
/// This can improve responsiveness when few tasks contend for a generator,
/// at the cost of tighter polling loops and more CPU under load. In highly
/// concurrent cases [`TokioSleep`] is usually the better choice.
pub struct TokioYield;
impl SleepProvider for TokioYield {
    async fn sleep_for(_dur: Duration) {
        tokio::task::yield_now().await;
    }
}

impl<T> Generator<T>
where
    T: TimeSource,
{
    /// Returns the next ID, waiting on [`TokioSleep`] when the sequence for
    /// the current millisecond is spent.
    pub async fn next_id_tokio(&self) -> SnowgenId {
        self.next_id_async::<TokioSleep>().await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use futures::future::join_all;

    use super::*;
    use crate::MonotonicClock;

    const TOTAL_IDS: usize = 4096;
    const NUM_TASKS: usize = 8;
    // Enough to force several Pending cycles
    const IDS_PER_TASK: usize = TOTAL_IDS * 8;

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn can_call_next_id_tokio() {
        let generator = Generator::new("dc1", "server1");
        let a = generator.next_id_tokio().await;
        let b = generator.next_id_tokio().await;
        assert!(a < b);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn generates_many_unique_ids_sleep() {
        run_shared_generator::<TokioSleep>().await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn generates_many_unique_ids_yield() {
        run_shared_generator::<TokioYield>().await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn distinct_producers_never_collide() {
        let names = [("dc1", "server1"), ("dc2", "server2")];
        let tasks: Vec<_> = names
            .into_iter()
            .map(|(dc, machine)| {
                let generator = Generator::with_clock(dc, machine, MonotonicClock::default());
                tokio::spawn(async move {
                    let mut ids = Vec::with_capacity(IDS_PER_TASK);
                    for _ in 0..IDS_PER_TASK {
                        ids.push(generator.next_id_tokio().await);
                    }
                    ids
                })
            })
            .collect();

        validate_unique_ids(tasks, names.len()).await;
    }

    async fn run_shared_generator<S>()
    where
        S: SleepProvider,
    {
        let generator = Generator::with_clock("dc1", "server1", MonotonicClock::default());

        let tasks: Vec<_> = (0..NUM_TASKS)
            .map(|_| {
                let generator = generator.clone();
                tokio::spawn(async move {
                    let mut ids = Vec::with_capacity(IDS_PER_TASK);
                    for _ in 0..IDS_PER_TASK {
                        ids.push(generator.next_id_async::<S>().await);
                    }
                    ids
                })
            })
            .collect();

        validate_unique_ids(tasks, NUM_TASKS).await;
    }

    async fn validate_unique_ids(
        tasks: Vec<tokio::task::JoinHandle<Vec<SnowgenId>>>,
        num_tasks: usize,
    ) {
        let batches: Vec<Vec<SnowgenId>> = join_all(tasks)
            .await
            .into_iter()
            .map(Result::unwrap)
            .collect();

        let mut seen = HashSet::with_capacity(num_tasks * IDS_PER_TASK);
        for batch in &batches {
            assert!(batch.windows(2).all(|w| w[0] < w[1]));
            for id in batch {
                assert!(seen.insert(*id), "Duplicate ID found: {id:?}");
            }
        }
        assert_eq!(seen.len(), num_tasks * IDS_PER_TASK);
    }
}
