//! Cancellable background tasks for the engine's ticks and timers.
//!
//! Each [`ScheduledTask`] owns one thread. The thread sleeps on a channel with
//! a timeout, so cancelling wakes it immediately instead of waiting out the
//! interval. Task bodies receive the task's [`CancelToken`] and are expected
//! to check it again after taking whatever lock guards the state they touch:
//! a task cancelled while its body was waiting on that lock then does nothing.

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Shared cancellation flag for one task.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the task cancelled. Idempotent.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// A repeating or one-shot task running on its own thread.
///
/// Dropping a task cancels it without waiting for the thread. Use
/// [`ScheduledTask::join`] to wait.
#[derive(Debug)]
pub struct ScheduledTask {
    name: String,
    token: CancelToken,
    // Dropping the sender wakes the sleeping thread
    wake: Option<mpsc::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl ScheduledTask {
    /// Run `body` every `interval` until cancelled.
    ///
    /// The first run happens one interval after spawning.
    pub fn repeating<F>(name: &str, interval: Duration, mut body: F) -> io::Result<Self>
    where
        F: FnMut(&CancelToken) + Send + 'static,
    {
        Self::spawn(name, move |token, wake| {
            while wait(&wake, interval) && !token.is_cancelled() {
                body(&token);
            }
        })
    }

    /// Run `body` once after `delay`, unless cancelled first.
    pub fn once<F>(name: &str, delay: Duration, body: F) -> io::Result<Self>
    where
        F: FnOnce(&CancelToken) + Send + 'static,
    {
        Self::spawn(name, move |token, wake| {
            if wait(&wake, delay) && !token.is_cancelled() {
                body(&token);
            }
        })
    }

    fn spawn<F>(name: &str, run: F) -> io::Result<Self>
    where
        F: FnOnce(CancelToken, mpsc::Receiver<()>) + Send + 'static,
    {
        let token = CancelToken::new();
        let (wake_tx, wake_rx) = mpsc::channel();

        let thread_token = token.clone();
        let handle = thread::Builder::new()
            .name(name.to_string())
            .spawn(move || run(thread_token, wake_rx))?;

        Ok(Self {
            name: name.to_string(),
            token,
            wake: Some(wake_tx),
            handle: Some(handle),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn token(&self) -> &CancelToken {
        &self.token
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Cancel the task and wake its thread. Idempotent.
    pub fn cancel(&mut self) {
        self.token.cancel();
        self.wake.take();
    }

    /// Cancel the task and wait for its thread to exit.
    ///
    /// Calling this from the task's own thread only cancels.
    pub fn join(mut self) {
        self.cancel();
        if let Some(handle) = self.handle.take()
            && handle.thread().id() != thread::current().id()
        {
            let _ = handle.join();
        }
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Start two tasks, or neither.
///
/// If `second` fails to start, `first` is joined before the error is
/// returned, so the caller must not hold any lock the first task's body takes.
pub fn start_both<A, B>(first: A, second: B) -> io::Result<(ScheduledTask, ScheduledTask)>
where
    A: FnOnce() -> io::Result<ScheduledTask>,
    B: FnOnce() -> io::Result<ScheduledTask>,
{
    let first = first()?;
    match second() {
        Ok(second) => Ok((first, second)),
        Err(e) => {
            first.join();
            Err(e)
        }
    }
}

/// Sleep for `timeout`. Returns false if woken early by cancellation.
fn wait(wake: &mpsc::Receiver<()>, timeout: Duration) -> bool {
    match wake.recv_timeout(timeout) {
        Err(RecvTimeoutError::Timeout) => true,
        Ok(()) | Err(RecvTimeoutError::Disconnected) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::time::Instant;

    #[test]
    fn test_repeating_task_runs_until_cancelled() {
        let runs = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&runs);
        let task = ScheduledTask::repeating("test-repeat", Duration::from_millis(5), move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();

        let deadline = Instant::now() + Duration::from_secs(5);
        while runs.load(Ordering::SeqCst) < 3 && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
        }
        task.join();

        let after_join = runs.load(Ordering::SeqCst);
        assert!(after_join >= 3);
        thread::sleep(Duration::from_millis(30));
        assert_eq!(runs.load(Ordering::SeqCst), after_join);
    }

    #[test]
    fn test_cancelled_once_task_never_runs() {
        let ran = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&ran);
        let mut task = ScheduledTask::once("test-once", Duration::from_secs(60), move |_| {
            flag.store(true, Ordering::SeqCst);
        })
        .unwrap();

        let started = Instant::now();
        task.cancel();
        task.cancel();
        task.join();

        assert!(!ran.load(Ordering::SeqCst));
        // Cancellation wakes the thread instead of waiting out the delay
        assert!(started.elapsed() < Duration::from_secs(10));
    }

    #[test]
    fn test_once_task_fires() {
        let (tx, rx) = mpsc::channel();
        let task = ScheduledTask::once("test-fire", Duration::from_millis(1), move |token| {
            let _ = tx.send(token.is_cancelled());
        })
        .unwrap();

        let cancelled = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(!cancelled);
        task.join();
    }

    #[test]
    fn test_start_both_stops_first_when_second_fails() {
        let runs = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&runs);

        let result = start_both(
            || {
                ScheduledTask::repeating("test-first", Duration::from_millis(1), move |_| {
                    counter.fetch_add(1, Ordering::SeqCst);
                })
            },
            || Err(io::Error::other("no threads left")),
        );

        let err = result.unwrap_err();
        assert_eq!(err.to_string(), "no threads left");

        let after_failure = runs.load(Ordering::SeqCst);
        thread::sleep(Duration::from_millis(30));
        assert_eq!(runs.load(Ordering::SeqCst), after_failure);
    }

    #[test]
    fn test_start_both_keeps_both_tasks() {
        let (first, second) = start_both(
            || ScheduledTask::once("test-a", Duration::from_secs(60), |_| {}),
            || ScheduledTask::once("test-b", Duration::from_secs(60), |_| {}),
        )
        .unwrap();

        assert_eq!(first.name(), "test-a");
        assert_eq!(second.name(), "test-b");
        first.join();
        second.join();
    }
}
