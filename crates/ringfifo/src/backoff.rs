//! Caller-side waiting on a full or empty queue.
//!
//! The queue itself never waits. These helpers drive a
//! [`crossbeam_utils::Backoff`] around a non-blocking queue operation:
//! spin with PAUSE hints first, then yield the thread.

pub use crossbeam_utils::Backoff;

/// Retries `op` until it returns `Some` or spinning and yielding are both
/// exhausted, in which case `None` is returned and the caller can switch to a
/// heavier strategy (parking, sleeping, giving up).
///
/// ```
/// use ringfifo_rs::{retry, Fifo};
///
/// let (mut tx, mut rx) = Fifo::<u32>::new(2).unwrap().split();
/// tx.try_push(5);
/// assert_eq!(retry(|| rx.pop()), Some(5));
/// assert_eq!(retry(|| rx.pop()), None);
/// ```
pub fn retry<R>(mut op: impl FnMut() -> Option<R>) -> Option<R> {
    let backoff = Backoff::new();
    loop {
        if let Some(result) = op() {
            return Some(result);
        }
        if backoff.is_completed() {
            return None;
        }
        backoff.snooze();
    }
}

/// Retries `op` until it returns `Some`. Spins while the wait is short and
/// yields the thread on every attempt after that.
pub fn retry_forever<R>(mut op: impl FnMut() -> Option<R>) -> R {
    let backoff = Backoff::new();
    loop {
        if let Some(result) = op() {
            return result;
        }
        backoff.snooze();
    }
}
