use core::time::Duration;

use crate::{
    Generator, IdGenStatus, SleepProvider, SnowgenId, TimeSource, generator::MAX_WAIT_MS,
};

impl<T> Generator<T>
where
    T: TimeSource,
{
    /// Returns the next ID, awaiting `S` instead of blocking the thread when
    /// the current millisecond's sequence is spent.
    ///
    /// The mutex is only held inside [`Generator::poll_id`], never across an
    /// `.await`. Each wait lasts at most one millisecond before the clock is
    /// read again.
    ///
    /// # Example
    /// ```
    /// use core::time::Duration;
    /// use snowgen::{Generator, SleepProvider};
    ///
    /// struct Spin;
    /// impl SleepProvider for Spin {
    ///     async fn sleep_for(_dur: Duration) {}
    /// }
    ///
    /// let generator = Generator::new("dc1", "server1");
    /// let id = futures::executor::block_on(generator.next_id_async::<Spin>());
    /// assert!(id.is_valid());
    /// ```
    pub async fn next_id_async<S>(&self) -> SnowgenId
    where
        S: SleepProvider,
    {
        loop {
            let dur = match self.poll_id() {
                IdGenStatus::Ready { id } => return id,
                IdGenStatus::Pending { yield_for } => {
                    Duration::from_millis(yield_for.min(MAX_WAIT_MS))
                }
            };
            S::sleep_for(dur).await;
        }
    }
}
