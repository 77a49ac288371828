use crate::artifacts::core::cancellation::CancellationToken;
use crate::artifacts::core::error::{DiffSetError, DiffSetResult};
use crate::artifacts::diff_set::builder::{DiffSetBuilder, DiffSetOutcome};
use tokio::sync::oneshot;
use tracing::debug;

/// A build running on the blocking pool of the current tokio runtime.
///
/// The result is published exactly once; the owner may cancel at any time from any
/// thread.
pub struct DiffSetTask {
    cancellation: CancellationToken,
    receiver: oneshot::Receiver<DiffSetResult<DiffSetOutcome>>,
}

impl DiffSetTask {
    /// Must be called from within a tokio runtime.
    pub fn spawn(builder: DiffSetBuilder) -> Self {
        let cancellation = builder.cancellation().clone();
        let (sender, receiver) = oneshot::channel();

        tokio::task::spawn_blocking(move || {
            let outcome = builder.build();
            if sender.send(outcome).is_err() {
                debug!("diff set result dropped, nobody is waiting for it");
            }
        });

        Self {
            cancellation,
            receiver,
        }
    }

    pub fn cancel(&self) {
        self.cancellation.cancel();
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }

    pub async fn outcome(self) -> DiffSetResult<DiffSetOutcome> {
        self.receiver.await.unwrap_or_else(|_| {
            Err(DiffSetError::InconsistentState(
                "diff set build stopped without publishing a result".to_string(),
            ))
        })
    }
}
