//! Progress reporting: queued descriptors and their deferred results.
//!
//! A descriptor is handed to the progress dialog, which either resolves it
//! with a `ProgressBar` or cancels it on user request. A descriptor dropped
//! without either reads as `ProgressError::Abandoned` on the receiving side.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::task::{Context, Poll};

use tokio::sync::oneshot;

static NEXT_PROGRESS_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProgressError {
    #[error("progress cancelled by the user")]
    Cancelled,
    #[error("progress dialog closed without reporting")]
    Abandoned,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressBar {
    pub id: u64,
    pub label: String,
}

impl ProgressBar {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            id: NEXT_PROGRESS_ID.fetch_add(1, Ordering::Relaxed),
            label: label.into(),
        }
    }
}

pub type ProgressResult = Result<ProgressBar, ProgressError>;

#[derive(Debug)]
pub struct ProgressDescriptor {
    label: String,
    cancellable: bool,
    completion: Option<oneshot::Receiver<()>>,
    result: oneshot::Sender<ProgressResult>,
}

impl ProgressDescriptor {
    pub fn new(
        label: impl Into<String>,
        cancellable: bool,
        completion: Option<oneshot::Receiver<()>>,
    ) -> (Self, ProgressReceiver) {
        let (tx, rx) = oneshot::channel();
        (
            Self {
                label: label.into(),
                cancellable,
                completion,
                result: tx,
            },
            ProgressReceiver { rx },
        )
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_cancellable(&self) -> bool {
        self.cancellable
    }

    /// The signal the dialog watches to know the tracked work has finished.
    pub fn take_completion(&mut self) -> Option<oneshot::Receiver<()>> {
        self.completion.take()
    }

    pub fn resolve(self, bar: ProgressBar) -> bool {
        self.result.send(Ok(bar)).is_ok()
    }

    /// Fails (handing the descriptor back) when the progress is not cancellable.
    pub fn cancel(self) -> Result<(), Self> {
        if !self.cancellable {
            return Err(self);
        }
        let _ = self.result.send(Err(ProgressError::Cancelled));
        Ok(())
    }
}

#[derive(Debug)]
pub struct ProgressReceiver {
    rx: oneshot::Receiver<ProgressResult>,
}

impl ProgressReceiver {
    /// Non-blocking peek; `None` while the dialog has not answered yet.
    pub fn try_result(&mut self) -> Option<ProgressResult> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(oneshot::error::TryRecvError::Empty) => None,
            Err(oneshot::error::TryRecvError::Closed) => Some(Err(ProgressError::Abandoned)),
        }
    }
}

impl Future for ProgressReceiver {
    type Output = ProgressResult;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx)
            .poll(cx)
            .map(|r| r.unwrap_or(Err(ProgressError::Abandoned)))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/progress.rs"]
mod tests;
