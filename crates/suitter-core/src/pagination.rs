//! Cursor-driven table enumeration.
//!
//! A [`Paginator`] lists the keys of a dynamic-field table page by page,
//! following the continuation cursor until it is exhausted. Every call to
//! [`Paginator::pages`] starts a fresh traversal from the first page.

use futures::{Stream, TryStreamExt, stream};
use serde::{Deserialize, Serialize};

use crate::domain::ObjectId;
use crate::ports::{DynamicFieldInfo, LedgerError, LedgerReader};

/// Fixed page size for table listings.
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Opaque continuation cursor returned by the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cursor(pub String);

impl Cursor {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One page of a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub next_cursor: Option<Cursor>,
    pub has_next_page: bool,
}

enum PageState {
    Start,
    After(Cursor),
    Done,
}

/// Lazy, finite listing of one table's entries.
pub struct Paginator<'a, L: ?Sized> {
    reader: &'a L,
    parent: ObjectId,
    page_size: usize,
}

impl<'a, L> Paginator<'a, L>
where
    L: LedgerReader + ?Sized,
{
    pub fn new(reader: &'a L, parent: ObjectId) -> Self {
        Self {
            reader,
            parent,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Stream of pages. Nothing is fetched until the stream is polled.
    pub fn pages(
        &self,
    ) -> impl Stream<Item = Result<Vec<DynamicFieldInfo>, LedgerError>> + Send + 'a {
        let reader = self.reader;
        let parent = self.parent;
        let limit = self.page_size;

        stream::try_unfold(PageState::Start, move |state| async move {
            let cursor = match state {
                PageState::Done => return Ok::<_, LedgerError>(None),
                PageState::Start => None,
                PageState::After(cursor) => Some(cursor),
            };

            let page = reader
                .list_dynamic_fields(&parent, cursor.as_ref(), limit)
                .await?;

            let next = match (page.has_next_page, page.next_cursor) {
                (true, Some(next)) if Some(&next) != cursor.as_ref() => PageState::After(next),
                (true, next) => {
                    tracing::warn!(
                        parent = %parent,
                        cursor = ?next,
                        "Listing reported more pages without a new cursor, stopping"
                    );
                    PageState::Done
                }
                (false, _) => PageState::Done,
            };

            Ok(Some((page.data, next)))
        })
    }

    /// Number of entries in the table. Only keys are listed.
    pub async fn count(&self) -> Result<usize, LedgerError> {
        self.pages()
            .try_fold(0usize, |acc, page| async move { Ok(acc + page.len()) })
            .await
    }

    /// All entries of the table, in listing order.
    pub async fn collect_all(&self) -> Result<Vec<DynamicFieldInfo>, LedgerError> {
        self.pages().try_concat().await
    }
}
