//! Read-model builder.
//!
//! Walks the Manager object's table references and materializes profiles,
//! posts and comments. Per-entry fetch or decode failures are collected in
//! the returned [`BatchResult`]; only an unreachable root object aborts.

use std::future::Future;

use futures::TryStreamExt;
use futures::future::join_all;

use crate::batch::{BatchResult, ItemFailure, ItemFailureReason};
use crate::config::ChainConfig;
use crate::decode::{self, PostRecord};
use crate::domain::{Address, Comment, ManagerTables, ObjectId, Post, PostDetail, Profile, ProfileLookup};
use crate::error::ReadError;
use crate::pagination::Paginator;
use crate::ports::{DynamicFieldInfo, DynamicFieldName, LedgerReader};

/// Which posts a feed listing keeps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PostFilter {
    #[default]
    All,
    Author(Address),
}

impl PostFilter {
    pub fn all() -> Self {
        Self::All
    }

    pub fn by_author(author: Address) -> Self {
        Self::Author(author)
    }

    pub fn matches(&self, post: &Post) -> bool {
        match self {
            Self::All => true,
            Self::Author(author) => post.author == *author,
        }
    }
}

/// Builds view records from the ledger on every call. Nothing is cached.
pub struct ReadModelBuilder<L> {
    ledger: L,
    config: ChainConfig,
}

impl<L> ReadModelBuilder<L>
where
    L: LedgerReader,
{
    pub fn new(ledger: L, config: ChainConfig) -> Self {
        Self { ledger, config }
    }

    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Fetch the Manager and extract its table ids.
    ///
    /// Fails with `NotFound` when the Manager does not exist yet or carries
    /// no Move content.
    pub async fn manager(&self) -> Result<ManagerTables, ReadError> {
        let id = self.config.manager()?;
        let not_found = || ReadError::NotFound {
            what: "Manager",
            id: id.to_hex(),
        };
        let object = self.ledger.get_object(&id).await?.ok_or_else(not_found)?;
        if object.fields.is_null() {
            return Err(not_found());
        }

        Ok(decode::manager_tables(&object.fields)?)
    }

    /// Manager tables, or `None` when nothing has been published yet.
    async fn tables(&self) -> Result<Option<ManagerTables>, ReadError> {
        match self.manager().await {
            Ok(tables) => Ok(Some(tables)),
            Err(e) if e.is_not_found() => {
                tracing::info!(error = %e, "Manager missing, treating as empty");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// All posts matching `filter`, newest first.
    ///
    /// There is no timestamp on chain: "newest first" is the reverse of the
    /// listing order, which the ledger does not guarantee to be stable.
    pub async fn list_posts(&self, filter: &PostFilter) -> Result<BatchResult<Post>, ReadError> {
        let Some(tables) = self.tables().await? else {
            return Ok(BatchResult::new());
        };

        let (mut batch, listed) = self
            .traverse(tables.posts, |field| self.fetch_listed_post(field))
            .await;
        batch.retain(|post| filter.matches(post));
        batch.reverse();

        tracing::debug!(
            listed,
            returned = batch.len(),
            dropped = batch.failures.len(),
            "Posts traversed"
        );
        Ok(batch)
    }

    /// Single post by id, with its comment count.
    pub async fn get_post(&self, post_id: &ObjectId) -> Result<Option<Post>, ReadError> {
        let Some(record) = self.post_record_by_key(post_id).await? else {
            return Ok(None);
        };

        let count = Paginator::new(&self.ledger, record.comments_table)
            .page_size(self.config.page_size)
            .count()
            .await?;
        Ok(Some(Self::post_view(*post_id, record, count)))
    }

    /// Post with every comment materialized.
    pub async fn get_post_detail(&self, post_id: &ObjectId) -> Result<Option<PostDetail>, ReadError> {
        let Some(record) = self.post_record_by_key(post_id).await? else {
            return Ok(None);
        };

        let (comments, listed) = self.comments_in(record.comments_table).await;
        Ok(Some(PostDetail {
            post: Self::post_view(*post_id, record, listed),
            comments,
        }))
    }

    /// Comments of a post in listing order. A missing post has no comments.
    pub async fn list_comments(&self, post_id: &ObjectId) -> Result<BatchResult<Comment>, ReadError> {
        match self.post_record_by_key(post_id).await? {
            Some(record) => Ok(self.comments_in(record.comments_table).await.0),
            None => {
                tracing::debug!(post_id = %post_id, "Post not found, no comments");
                Ok(BatchResult::new())
            }
        }
    }

    /// Every profile. Each item's owner equals its table key.
    pub async fn list_profiles(&self) -> Result<BatchResult<Profile>, ReadError> {
        let Some(tables) = self.tables().await? else {
            return Ok(BatchResult::new());
        };

        let (batch, listed) = self
            .traverse(tables.profiles, |field| self.fetch_listed_profile(field))
            .await;
        tracing::debug!(listed, returned = batch.len(), "Profiles traversed");
        Ok(batch)
    }

    /// Profile of `address`. An absent key is a normal "no profile" outcome.
    pub async fn find_profile(&self, address: &Address) -> Result<ProfileLookup, ReadError> {
        let Some(tables) = self.tables().await? else {
            return Ok(ProfileLookup::missing());
        };

        let object = self
            .ledger
            .get_dynamic_field_object(&tables.profiles, &DynamicFieldName::address(address))
            .await?;

        let Some(object) = object else {
            tracing::debug!(address = %address, "No profile found");
            return Ok(ProfileLookup::missing());
        };

        let profile = decode::profile(decode::field_value(&object.fields)?)?;
        Ok(ProfileLookup::found(profile))
    }

    /// Username registered by `address`, if any.
    pub async fn find_username(&self, address: &Address) -> Result<Option<String>, ReadError> {
        Ok(self
            .find_profile(address)
            .await?
            .profile
            .map(|profile| profile.username))
    }

    /// Enumerate `table` page by page, fetching each page's entries
    /// concurrently. Returns the batch and the number of keys listed.
    async fn traverse<T, F, Fut>(&self, table: ObjectId, fetch: F) -> (BatchResult<T>, usize)
    where
        F: Fn(DynamicFieldInfo) -> Fut,
        Fut: Future<Output = Result<T, ItemFailure>>,
    {
        let mut batch = BatchResult::new();
        let mut listed = 0;

        let paginator = Paginator::new(&self.ledger, table).page_size(self.config.page_size);
        let pages = paginator.pages();
        futures::pin_mut!(pages);

        loop {
            match pages.try_next().await {
                Ok(Some(page)) => {
                    listed += page.len();
                    batch.extend(join_all(page.into_iter().map(&fetch)).await);
                }
                Ok(None) => break,
                Err(e) => {
                    batch.push(Err(ItemFailure::new(
                        table.to_hex(),
                        ItemFailureReason::PageListing(e.to_string()),
                    )));
                    break;
                }
            }
        }

        (batch, listed)
    }

    async fn post_record_by_key(&self, post_id: &ObjectId) -> Result<Option<PostRecord>, ReadError> {
        let Some(tables) = self.tables().await? else {
            return Ok(None);
        };

        let object = self
            .ledger
            .get_dynamic_field_object(&tables.posts, &DynamicFieldName::object_id(post_id))
            .await?;

        match object {
            Some(object) => Ok(Some(decode::post_record(decode::field_value(&object.fields)?)?)),
            None => Ok(None),
        }
    }

    async fn fetch_listed_post(&self, field: DynamicFieldInfo) -> Result<Post, ItemFailure> {
        let key = field.name.display_key();
        let result = async {
            let post_id: ObjectId = key
                .parse()
                .map_err(|e| ItemFailureReason::Decode(format!("post key: {e}")))?;
            let object = self
                .ledger
                .get_object(&field.object_id)
                .await?
                .ok_or(ItemFailureReason::Missing)?;
            let record = decode::post_record(decode::field_value(&object.fields)?)?;

            // Count only; comment content is fetched by the detail flow.
            let count = Paginator::new(&self.ledger, record.comments_table)
                .page_size(self.config.page_size)
                .count()
                .await?;
            Ok::<_, ItemFailureReason>(Self::post_view(post_id, record, count))
        };
        result.await.map_err(|reason| ItemFailure::new(key.clone(), reason))
    }

    async fn comments_in(&self, table: ObjectId) -> (BatchResult<Comment>, usize) {
        self.traverse(table, |field| self.fetch_listed_comment(table, field))
            .await
    }

    async fn fetch_listed_comment(
        &self,
        table: ObjectId,
        field: DynamicFieldInfo,
    ) -> Result<Comment, ItemFailure> {
        let key = field.name.display_key();
        let result = async {
            let id = decode::u64_value(&field.name.value, "name")?;
            let object = self
                .ledger
                .get_dynamic_field_object(&table, &DynamicFieldName::u64(id))
                .await?
                .ok_or(ItemFailureReason::Missing)?;
            Ok::<_, ItemFailureReason>(decode::comment(decode::field_value(&object.fields)?)?)
        };
        result.await.map_err(|reason| ItemFailure::new(key.clone(), reason))
    }

    async fn fetch_listed_profile(&self, field: DynamicFieldInfo) -> Result<Profile, ItemFailure> {
        let key = field.name.display_key();
        let result = async {
            let owner: Address = key
                .parse()
                .map_err(|e| ItemFailureReason::Decode(format!("profile key: {e}")))?;
            let object = self
                .ledger
                .get_object(&field.object_id)
                .await?
                .ok_or(ItemFailureReason::Missing)?;
            let profile = decode::profile(decode::field_value(&object.fields)?)?;
            if profile.owner != owner {
                return Err(ItemFailureReason::KeyMismatch {
                    found: profile.owner.to_hex(),
                });
            }
            Ok::<_, ItemFailureReason>(profile)
        };
        result.await.map_err(|reason| ItemFailure::new(key.clone(), reason))
    }

    fn post_view(id: ObjectId, record: PostRecord, comments_count: usize) -> Post {
        Post {
            id,
            author: record.author,
            content: record.content,
            like_count: record.like_count,
            image_url: record.image_url,
            comments_count,
        }
    }
}
