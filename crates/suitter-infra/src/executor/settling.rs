use std::time::Duration;

use async_trait::async_trait;

use suitter_core::ports::{TransactionError, TransactionExecutor, TxDigest};
use suitter_core::write::MoveCall;

/// Wraps an executor and waits a fixed settle delay after every successful
/// submission, so a re-read that follows observes the write. There is no
/// confirmation polling: the delay is the only synchronization.
pub struct SettlingExecutor<E> {
    inner: E,
    delay_override: Option<Duration>,
}

impl<E> SettlingExecutor<E>
where
    E: TransactionExecutor,
{
    pub fn new(inner: E) -> Self {
        Self {
            inner,
            delay_override: None,
        }
    }

    /// Use `delay` for every entry point instead of the per-call delay.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay_override = Some(delay);
        self
    }

    pub fn inner(&self) -> &E {
        &self.inner
    }

    fn delay_for(&self, call: &MoveCall) -> Duration {
        self.delay_override.unwrap_or_else(|| call.settle_delay())
    }
}

#[async_trait]
impl<E> TransactionExecutor for SettlingExecutor<E>
where
    E: TransactionExecutor,
{
    async fn execute(&self, call: &MoveCall) -> Result<TxDigest, TransactionError> {
        let digest = self.inner.execute(call).await.inspect_err(|e| {
            tracing::warn!(target_fn = %call.target(), error = %e, "Transaction failed");
        })?;

        let delay = self.delay_for(call);
        tracing::info!(
            target_fn = %call.target(),
            digest = %digest.0,
            delay_ms = delay.as_millis() as u64,
            "Transaction submitted, settling"
        );
        tokio::time::sleep(delay).await;
        Ok(digest)
    }
}
