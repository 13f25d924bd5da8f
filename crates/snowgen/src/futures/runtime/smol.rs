use core::time::Duration;

use smol::Timer;

use crate::{Generator, SleepProvider, SnowgenId, TimeSource};

/// A [`SleepProvider`] backed by Smol's timer.
///
/// This is the default provider for use in async applications built on Smol.
pub struct SmolSleep;
impl SleepProvider for SmolSleep {
    async fn sleep_for(dur: Duration) {
        Timer::after(dur).await;
    }
}

/// A [`SleepProvider`] that yields to the Smol executor instead of arming a
/// timer.
///
/// Polling gets tighter and CPU use rises under load; with many contending
/// tasks [`SmolSleep`] is usually the better choice.
pub struct SmolYield;
impl SleepProvider for SmolYield {
    async fn sleep_for(_dur: Duration) {
        smol::future::yield_now().await;
    }
}

impl<T> Generator<T>
where
    T: TimeSource,
{
    /// Returns the next ID, waiting on [`SmolSleep`] when the sequence for the
    /// current millisecond is spent.
    pub async fn next_id_smol(&self) -> SnowgenId {
        self.next_id_async::<SmolSleep>().await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use smol::Task;

    use super::*;
    use crate::MonotonicClock;

    const TOTAL_IDS: usize = 4096;
    const NUM_TASKS: usize = 8;
    const IDS_PER_TASK: usize = TOTAL_IDS * 8;

    #[test]
    fn can_call_next_id_smol() {
        smol::block_on(async {
            let generator = Generator::new("dc1", "server1");
            let a = generator.next_id_smol().await;
            let b = generator.next_id_smol().await;
            assert!(a < b);
        });
    }

    #[test]
    fn generates_many_unique_ids_smol_sleep() {
        smol::block_on(run_shared_generator::<SmolSleep>());
    }

    #[test]
    fn generates_many_unique_ids_smol_yield() {
        smol::block_on(run_shared_generator::<SmolYield>());
    }

    async fn run_shared_generator<S>()
    where
        S: SleepProvider,
    {
        let generator = Generator::with_clock("dc1", "server1", MonotonicClock::default());

        let tasks: Vec<Task<Vec<SnowgenId>>> = (0..NUM_TASKS)
            .map(|_| {
                let generator = generator.clone();
                smol::spawn(async move {
                    let mut ids = Vec::with_capacity(IDS_PER_TASK);
                    for _ in 0..IDS_PER_TASK {
                        ids.push(generator.next_id_async::<S>().await);
                    }
                    ids
                })
            })
            .collect();

        let mut seen = HashSet::with_capacity(NUM_TASKS * IDS_PER_TASK);
        for task in tasks {
            let batch = task.await;
            assert!(batch.windows(2).all(|w| w[0] < w[1]));
            for id in batch {
                assert!(seen.insert(id), "Duplicate ID found: {id:?}");
            }
        }
        assert_eq!(seen.len(), NUM_TASKS * IDS_PER_TASK);
    }
}
