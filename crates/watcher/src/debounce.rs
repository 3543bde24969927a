//! Per-field debouncing logic
//!
//! Collapses bursts of edits to one field into a single trailing call
//! carrying the last value. Every watched field owns its own `Debouncer`;
//! sharing one between fields would let one field's edit cancel another's
//! pending save.

use std::future::Future;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, warn};

/// Quiet period used by the workout page
pub const DEFAULT_WINDOW: Duration = Duration::from_millis(500);

/// What to do with a pending call when the debouncer is closed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseMode {
    /// Run the pending call now, then stop
    Flush,
    /// Drop the pending call
    Discard,
}

enum Message<T> {
    Call(T),
    Cancel,
    Close(CloseMode),
}

/// Trailing-edge debouncer backed by one tokio task
///
/// Dropping the debouncer discards any pending call, the same way a page
/// navigation drops a pending browser timer. A call that has already started
/// runs to completion.
pub struct Debouncer<T> {
    tx: mpsc::UnboundedSender<Message<T>>,
    task: JoinHandle<()>,
    window: Duration,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Spawn a debouncer that runs `action` once `window` passes without a call
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn<F, Fut>(window: Duration, action: F) -> Self
    where
        F: FnMut(T) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(run(window, rx, action));
        Self { tx, task, window }
    }

    /// Schedule `action(value)`, replacing any pending value and restarting
    /// the window
    pub fn call(&self, value: T) {
        if self.tx.send(Message::Call(value)).is_err() {
            debug!("Debouncer stopped, dropping call");
        }
    }

    /// Drop the pending value without running it
    pub fn cancel(&self) {
        let _ = self.tx.send(Message::Cancel);
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Stop the debouncer and wait for its task to finish
    pub async fn close(self, mode: CloseMode) {
        let _ = self.tx.send(Message::Close(mode));
        if let Err(e) = self.task.await {
            warn!("Debounce task ended abnormally: {}", e);
        }
    }
}

async fn run<T, F, Fut>(window: Duration, mut rx: mpsc::UnboundedReceiver<Message<T>>, mut action: F)
where
    F: FnMut(T) -> Fut,
    Fut: Future<Output = ()>,
{
    let mut pending: Option<T> = None;
    let sleep = tokio::time::sleep(window);
    tokio::pin!(sleep);

    loop {
        tokio::select! {
            msg = rx.recv() => match msg {
                Some(Message::Call(value)) => {
                    pending = Some(value);
                    sleep.as_mut().reset(Instant::now() + window);
                }
                Some(Message::Cancel) => pending = None,
                Some(Message::Close(CloseMode::Flush)) => {
                    if let Some(value) = pending.take() {
                        action(value).await;
                    }
                    break;
                }
                // Handle dropped: behave like navigation
                Some(Message::Close(CloseMode::Discard)) | None => break,
            },
            () = &mut sleep, if pending.is_some() => {
                if let Some(value) = pending.take() {
                    action(value).await;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    fn recorder() -> (
        impl FnMut(u32) -> std::future::Ready<()> + Send + 'static,
        mpsc::UnboundedReceiver<u32>,
    ) {
        let (tx, rx) = mpsc::unbounded_channel();
        let action = move |value: u32| {
            let _ = tx.send(value);
            std::future::ready(())
        };
        (action, rx)
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<u32>) -> Vec<u32> {
        let mut out = Vec::new();
        while let Ok(v) = rx.try_recv() {
            out.push(v);
        }
        out
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_collapses_to_last_value() {
        let (action, mut rx) = recorder();
        let debouncer = Debouncer::spawn(DEFAULT_WINDOW, action);

        debouncer.call(135);
        sleep(Duration::from_millis(100)).await;
        debouncer.call(145);
        sleep(Duration::from_millis(100)).await;
        debouncer.call(140);

        // Window restarts at the last call (t=200ms)
        sleep(Duration::from_millis(499)).await;
        assert!(drain(&mut rx).is_empty());

        sleep(Duration::from_millis(2)).await;
        assert_eq!(drain(&mut rx), vec![140]);

        sleep(Duration::from_secs(2)).await;
        assert!(drain(&mut rx).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_spaced_calls_each_fire() {
        let (action, mut rx) = recorder();
        let debouncer = Debouncer::spawn(DEFAULT_WINDOW, action);

        debouncer.call(1);
        sleep(Duration::from_millis(600)).await;
        debouncer.call(2);
        sleep(Duration::from_millis(600)).await;

        assert_eq!(drain(&mut rx), vec![1, 2]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_instances_are_independent() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let tx_b = tx.clone();
        let a = Debouncer::spawn(DEFAULT_WINDOW, move |v: u32| {
            let _ = tx.send(("a", v));
            std::future::ready(())
        });
        let b = Debouncer::spawn(DEFAULT_WINDOW, move |v: u32| {
            let _ = tx_b.send(("b", v));
            std::future::ready(())
        });

        a.call(1);
        sleep(Duration::from_millis(300)).await;
        // Must not cancel a's pending call
        b.call(2);
        sleep(Duration::from_millis(1000)).await;

        let mut fired = Vec::new();
        while let Ok(entry) = rx.try_recv() {
            fired.push(entry);
        }
        assert_eq!(fired, vec![("a", 1), ("b", 2)]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_drops_pending() {
        let (action, mut rx) = recorder();
        let debouncer = Debouncer::spawn(DEFAULT_WINDOW, action);

        debouncer.call(7);
        sleep(Duration::from_millis(100)).await;
        debouncer.cancel();
        sleep(Duration::from_secs(1)).await;
        assert!(drain(&mut rx).is_empty());

        // Still usable afterwards
        debouncer.call(8);
        sleep(Duration::from_secs(1)).await;
        assert_eq!(drain(&mut rx), vec![8]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_close_flush_runs_pending() {
        let (action, mut rx) = recorder();
        let debouncer = Debouncer::spawn(DEFAULT_WINDOW, action);

        debouncer.call(3);
        debouncer.close(CloseMode::Flush).await;
        assert_eq!(drain(&mut rx), vec![3]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_close_discard_and_drop_lose_pending() {
        let (action, mut rx) = recorder();
        let debouncer = Debouncer::spawn(DEFAULT_WINDOW, action);
        debouncer.call(4);
        debouncer.close(CloseMode::Discard).await;
        assert!(drain(&mut rx).is_empty());

        let (action, mut rx) = recorder();
        let debouncer = Debouncer::spawn(DEFAULT_WINDOW, action);
        debouncer.call(5);
        drop(debouncer);
        sleep(Duration::from_secs(1)).await;
        assert!(drain(&mut rx).is_empty());
    }
}
