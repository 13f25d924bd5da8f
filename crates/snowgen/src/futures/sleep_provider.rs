use core::{future::Future, time::Duration};

/// Abstracts over how an async caller waits for a given [`Duration`].
///
/// This keeps [`Generator::next_id_async`](crate::Generator::next_id_async)
/// independent of any particular runtime.
pub trait SleepProvider {
    /// The returned future must be `Send` so generation can run on
    /// work-stealing executors.
    fn sleep_for(dur: Duration) -> impl Future<Output = ()> + Send;
}
