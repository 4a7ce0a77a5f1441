//! Feed session - the refetch-after-write flow.
//!
//! A session owns the current feed view. Writes are submitted through the
//! executor (which settles) and are followed by a full refetch. Every
//! refetch takes a generation ticket, so an older refetch finishing late
//! never replaces a newer feed.

use suitter_core::batch::BatchResult;
use suitter_core::domain::Post;
use suitter_core::error::ReadError;
use suitter_core::ports::{LedgerReader, TransactionError, TransactionExecutor, TxDigest};
use suitter_core::read_model::{PostFilter, ReadModelBuilder};
use suitter_core::view::ViewSlot;
use suitter_core::write::MoveCall;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Transaction(#[from] TransactionError),

    #[error(transparent)]
    Read(#[from] ReadError),
}

pub struct FeedSession<L, E> {
    reader: ReadModelBuilder<L>,
    executor: E,
    filter: PostFilter,
    feed: ViewSlot<BatchResult<Post>>,
}

impl<L, E> FeedSession<L, E>
where
    L: LedgerReader,
    E: TransactionExecutor,
{
    pub fn new(reader: ReadModelBuilder<L>, executor: E, filter: PostFilter) -> Self {
        Self {
            reader,
            executor,
            filter,
            feed: ViewSlot::new(),
        }
    }

    pub fn reader(&self) -> &ReadModelBuilder<L> {
        &self.reader
    }

    pub fn filter(&self) -> &PostFilter {
        &self.filter
    }

    /// Refetch the feed. Returns whether the result was committed, which is
    /// false when a newer refresh started before this one finished.
    pub async fn refresh(&self) -> Result<bool, ReadError> {
        let ticket = self.feed.begin();
        let posts = self.reader.list_posts(&self.filter).await?;
        let committed = self.feed.commit(ticket, posts);
        tracing::debug!(generation = ticket.generation(), committed, "Feed refreshed");
        Ok(committed)
    }

    /// Submit `call`, wait for it to settle, then refetch.
    pub async fn submit(&self, call: &MoveCall) -> Result<TxDigest, SessionError> {
        let digest = self.executor.execute(call).await?;
        self.refresh().await?;
        Ok(digest)
    }

    /// Last committed feed, if any refresh has completed.
    pub fn snapshot(&self) -> Option<BatchResult<Post>> {
        self.feed.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;

    use suitter_core::domain::Address;
    use suitter_core::write::TransactionBuilder;

    use super::*;
    use crate::executor::SettlingExecutor;
    use crate::memory::{InMemoryLedger, LedgerState, SuitterFixture};

    /// Applies a prepared ledger state as the effect of any transaction.
    struct ApplyState {
        ledger: Arc<InMemoryLedger>,
        after: tokio::sync::Mutex<Option<LedgerState>>,
    }

    #[async_trait]
    impl TransactionExecutor for ApplyState {
        async fn execute(&self, _call: &MoveCall) -> Result<TxDigest, TransactionError> {
            match self.after.lock().await.take() {
                Some(state) => {
                    self.ledger.replace_state(state).await;
                    Ok(TxDigest("applied".into()))
                }
                None => Err(TransactionError::Rejected("nothing staged".into())),
            }
        }
    }

    fn one_post() -> SuitterFixture {
        let mut fixture = SuitterFixture::new();
        fixture.post(Address::from_low_u64(1), "first", None);
        fixture
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_settles_then_refetches() {
        let before = one_post();
        let config = before.config();
        let package = before.package_id();
        let ledger = Arc::new(before.into_ledger());

        let mut after = one_post();
        after.post(Address::from_low_u64(2), "second", None);

        let executor = SettlingExecutor::new(ApplyState {
            ledger: ledger.clone(),
            after: tokio::sync::Mutex::new(Some(after.into_state())),
        })
        .with_delay(Duration::from_millis(50));

        let session = FeedSession::new(
            ReadModelBuilder::new(ledger.clone(), config.clone()),
            executor,
            PostFilter::all(),
        );

        assert!(session.refresh().await.unwrap());
        assert_eq!(session.snapshot().unwrap().len(), 1);

        let call = TransactionBuilder::new(package, config.manager().unwrap())
            .create_post("second", None)
            .unwrap();
        session.submit(&call).await.unwrap();

        let feed = session.snapshot().unwrap();
        assert_eq!(feed.len(), 2);
        assert_eq!(feed.items[0].content, "second");
    }

    #[tokio::test]
    async fn test_failed_submit_keeps_feed() {
        let fixture = one_post();
        let config = fixture.config();
        let ledger = Arc::new(fixture.into_ledger());
        let executor = ApplyState {
            ledger: ledger.clone(),
            after: tokio::sync::Mutex::new(None),
        };
        let session = FeedSession::new(
            ReadModelBuilder::new(ledger, config.clone()),
            executor,
            PostFilter::all(),
        );
        session.refresh().await.unwrap();

        let call = TransactionBuilder::from_config(&config)
            .unwrap()
            .like_post(suitter_core::domain::ObjectId::from_low_u64(1));
        let err = session.submit(&call).await.unwrap_err();

        assert!(matches!(err, SessionError::Transaction(TransactionError::Rejected(_))));
        assert_eq!(session.snapshot().unwrap().len(), 1);
    }
}
