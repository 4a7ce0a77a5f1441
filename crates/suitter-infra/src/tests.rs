//! Read-model traversals against the in-memory ledger.

#[cfg(test)]
mod read_model {
    use std::sync::Arc;

    use async_trait::async_trait;
    use serde_json::{Value, json};

    use suitter_core::batch::ItemFailureReason;
    use suitter_core::config::ChainConfig;
    use suitter_core::domain::{Address, ObjectId};
    use suitter_core::error::ReadError;
    use suitter_core::pagination::{Cursor, Page};
    use suitter_core::ports::{
        DynamicFieldInfo, DynamicFieldName, LedgerError, LedgerObject, LedgerReader,
    };
    use suitter_core::read_model::{PostFilter, ReadModelBuilder};

    use crate::memory::{InMemoryLedger, LedgerState, SuitterFixture};

    fn builder(fixture: SuitterFixture) -> ReadModelBuilder<Arc<InMemoryLedger>> {
        let config = fixture.config();
        ReadModelBuilder::new(Arc::new(fixture.into_ledger()), config)
    }

    /// Serves first pages normally and fails every continuation request.
    struct FirstPageOnly(InMemoryLedger);

    #[async_trait]
    impl LedgerReader for FirstPageOnly {
        async fn get_object(&self, id: &ObjectId) -> Result<Option<LedgerObject>, LedgerError> {
            self.0.get_object(id).await
        }

        async fn list_dynamic_fields(
            &self,
            parent: &ObjectId,
            cursor: Option<&Cursor>,
            limit: usize,
        ) -> Result<Page<DynamicFieldInfo>, LedgerError> {
            match cursor {
                Some(_) => Err(LedgerError::Transport("connection reset".into())),
                None => self.0.list_dynamic_fields(parent, None, limit).await,
            }
        }

        async fn get_dynamic_field_object(
            &self,
            parent: &ObjectId,
            name: &DynamicFieldName,
        ) -> Result<Option<LedgerObject>, LedgerError> {
            self.0.get_dynamic_field_object(parent, name).await
        }
    }

    #[tokio::test]
    async fn test_lists_every_profile_keyed_by_owner() {
        let mut fixture = SuitterFixture::new();
        for n in 1..=4 {
            fixture.profile(Address::from_low_u64(n), &format!("user{n}"), "hi", None);
        }

        let profiles = builder(fixture).list_profiles().await.unwrap();

        assert!(profiles.is_complete());
        assert_eq!(profiles.len(), 4);
        let mut owners: Vec<_> = profiles.items.iter().map(|p| p.owner).collect();
        owners.sort();
        assert_eq!(owners, (1..=4).map(Address::from_low_u64).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_profile_with_foreign_owner_is_a_failure() {
        let mut fixture = SuitterFixture::new();
        fixture.profile(Address::from_low_u64(1), "ann", "", None);
        fixture.misfiled_profile(Address::from_low_u64(2), Address::from_low_u64(3), "eve");

        let profiles = builder(fixture).list_profiles().await.unwrap();

        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles.failures.len(), 1);
        assert_eq!(profiles.failures[0].key, Address::from_low_u64(2).to_hex());
        assert!(matches!(
            profiles.failures[0].reason,
            ItemFailureReason::KeyMismatch { .. }
        ));
    }

    #[tokio::test]
    async fn test_two_post_scenario_is_newest_first() {
        let author = Address::from_low_u64(7);
        let mut fixture = SuitterFixture::new();
        fixture.post(author, "plain", None);
        let illustrated = fixture.post(author, "with picture", Some("https://img.example/cat.png"));
        for text in ["a", "b", "c"] {
            fixture.comment(illustrated, Address::from_low_u64(8), text);
        }

        let posts = builder(fixture).list_posts(&PostFilter::all()).await.unwrap();

        assert!(posts.is_complete());
        assert_eq!(posts.len(), 2);
        assert_eq!(posts.items[0].image_url.as_deref(), Some("https://img.example/cat.png"));
        assert_eq!(posts.items[0].comments_count, 3);
        assert_eq!(posts.items[1].image_url, None);
        assert_eq!(posts.items[1].comments_count, 0);
    }

    #[tokio::test]
    async fn test_comment_count_is_live_table_size() {
        let mut fixture = SuitterFixture::new();
        let post = fixture.post(Address::from_low_u64(1), "gm", None);
        for n in 0..5 {
            fixture.comment(post, Address::from_low_u64(2), &format!("c{n}"));
        }
        fixture.delete_comment(post, 1).delete_comment(post, 3);

        let reader = builder(fixture);
        let listed = reader.list_posts(&PostFilter::all()).await.unwrap();
        assert_eq!(listed.items[0].comments_count, 3);

        let single = reader.get_post(&post).await.unwrap().unwrap();
        assert_eq!(single.comments_count, 3);

        let detail = reader.get_post_detail(&post).await.unwrap().unwrap();
        assert_eq!(detail.post.comments_count, 3);
        let ids: Vec<u64> = detail.comments.items.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![0, 2, 4]);
    }

    #[tokio::test]
    async fn test_one_failed_fetch_drops_one_post() {
        let mut fixture = SuitterFixture::new();
        let mut ids = Vec::new();
        for n in 0..5 {
            ids.push(fixture.post(Address::from_low_u64(1), &format!("post {n}"), None));
        }
        fixture.fail_post(ids[2]);

        let posts = builder(fixture).list_posts(&PostFilter::all()).await.unwrap();

        assert_eq!(posts.len(), 4);
        assert_eq!(posts.failures.len(), 1);
        assert_eq!(posts.failures[0].key, ids[2].to_hex());
        assert!(matches!(posts.failures[0].reason, ItemFailureReason::Fetch(_)));
        assert!(posts.items.iter().all(|p| p.id != ids[2]));
    }

    #[tokio::test]
    async fn test_author_filter() {
        let mut fixture = SuitterFixture::new();
        fixture.post(Address::from_low_u64(1), "mine", None);
        fixture.post(Address::from_low_u64(2), "theirs", None);
        fixture.post(Address::from_low_u64(1), "mine again", None);

        let posts = builder(fixture)
            .list_posts(&PostFilter::by_author(Address::from_low_u64(1)))
            .await
            .unwrap();

        let contents: Vec<&str> = posts.items.iter().map(|p| p.content.as_str()).collect();
        assert_eq!(contents, vec!["mine again", "mine"]);
    }

    #[tokio::test]
    async fn test_listing_beyond_one_page() {
        let mut fixture = SuitterFixture::new();
        for n in 0..120 {
            fixture.profile(Address::from_low_u64(n + 1), &format!("u{n}"), "", None);
        }

        let profiles = builder(fixture).list_profiles().await.unwrap();
        assert_eq!(profiles.len(), 120);
    }

    #[tokio::test]
    async fn test_missing_profile_is_not_an_error() {
        let mut fixture = SuitterFixture::new();
        fixture.profile(Address::from_low_u64(1), "ann", "builder", Some("https://a/ann.png"));
        let reader = builder(fixture);

        let found = reader.find_profile(&Address::from_low_u64(1)).await.unwrap();
        assert!(found.has_profile);
        let profile = found.profile.unwrap();
        assert_eq!(profile.bio, "builder");
        assert_eq!(profile.image_url.as_deref(), Some("https://a/ann.png"));

        let missing = reader.find_profile(&Address::from_low_u64(2)).await.unwrap();
        assert!(!missing.has_profile);
        assert!(missing.profile.is_none());
        assert_eq!(reader.find_username(&Address::from_low_u64(2)).await.unwrap(), None);
        assert_eq!(
            reader.find_username(&Address::from_low_u64(1)).await.unwrap().as_deref(),
            Some("ann")
        );
    }

    #[tokio::test]
    async fn test_comments_keep_listing_order_and_defaults() {
        let mut fixture = SuitterFixture::new();
        let post = fixture.post(Address::from_low_u64(1), "gm", None);
        fixture.comment(post, Address::from_low_u64(2), "first");
        fixture.comment(post, Address::from_low_u64(3), "second");
        let reader = builder(fixture);

        let comments = reader.list_comments(&post).await.unwrap();
        let texts: Vec<&str> = comments.items.iter().map(|c| c.content.as_str()).collect();
        assert_eq!(texts, vec!["first", "second"]);
        assert_eq!(comments.items[1].author, Address::from_low_u64(3));

        let none = reader.list_comments(&ObjectId::from_low_u64(0xdead)).await.unwrap();
        assert!(none.is_empty());
        assert!(reader.get_post_detail(&ObjectId::from_low_u64(0xdead)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_missing_manager_reads_as_empty() {
        let config = ChainConfig::new(ObjectId::from_low_u64(0xabc), ObjectId::from_low_u64(0x9));
        let reader = ReadModelBuilder::new(InMemoryLedger::new(), config);

        assert!(reader.list_posts(&PostFilter::all()).await.unwrap().is_empty());
        assert!(reader.list_profiles().await.unwrap().is_empty());
        assert!(!reader.find_profile(&Address::from_low_u64(1)).await.unwrap().has_profile);
        assert!(matches!(
            reader.manager().await,
            Err(ReadError::NotFound { what: "Manager", .. })
        ));
    }

    #[tokio::test]
    async fn test_manager_without_content_reads_as_empty() {
        let manager = ObjectId::from_low_u64(0xabc);
        let mut state = LedgerState::default();
        state.insert_object(LedgerObject {
            object_id: manager,
            version: 1,
            type_tag: None,
            fields: Value::Null,
        });
        let config = ChainConfig::new(manager, ObjectId::from_low_u64(0x9));
        let reader = ReadModelBuilder::new(InMemoryLedger::with_state(state), config);

        assert!(reader.list_posts(&PostFilter::all()).await.unwrap().is_empty());
        assert!(reader.list_profiles().await.unwrap().is_empty());
        assert!(!reader.find_profile(&Address::from_low_u64(1)).await.unwrap().has_profile);
        assert!(reader.get_post(&ObjectId::from_low_u64(1)).await.unwrap().is_none());
        assert!(matches!(
            reader.manager().await,
            Err(ReadError::NotFound { what: "Manager", .. })
        ));
    }

    #[tokio::test]
    async fn test_malformed_manager_is_a_decode_error() {
        let manager = ObjectId::from_low_u64(0xabc);
        let mut state = LedgerState::default();
        state.insert_object(LedgerObject {
            object_id: manager,
            version: 1,
            type_tag: None,
            fields: json!({ "id": { "id": manager.to_hex() } }),
        });
        let config = ChainConfig::new(manager, ObjectId::from_low_u64(0x9));
        let reader = ReadModelBuilder::new(InMemoryLedger::with_state(state), config);

        assert!(matches!(
            reader.list_posts(&PostFilter::all()).await,
            Err(ReadError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn test_listing_failure_keeps_earlier_pages() {
        let mut fixture = SuitterFixture::new();
        for n in 0..60 {
            fixture.post(Address::from_low_u64(1), &format!("post {n}"), None);
        }
        let config = fixture.config();
        let reader = ReadModelBuilder::new(FirstPageOnly(fixture.into_ledger()), config);

        let posts = reader.list_posts(&PostFilter::all()).await.unwrap();

        assert_eq!(posts.len(), 50);
        assert_eq!(posts.failures.len(), 1);
        assert!(matches!(
            posts.failures[0].reason,
            ItemFailureReason::PageListing(_)
        ));
        assert_eq!(posts.items[0].content, "post 49");
    }

    #[tokio::test]
    async fn test_failed_comment_fetch_drops_one_comment() {
        let mut fixture = SuitterFixture::new();
        let post = fixture.post(Address::from_low_u64(1), "gm", None);
        for text in ["a", "b", "c"] {
            fixture.comment(post, Address::from_low_u64(2), text);
        }
        fixture.fail_comment(post, 1);

        let detail = builder(fixture).get_post_detail(&post).await.unwrap().unwrap();

        let texts: Vec<&str> = detail.comments.items.iter().map(|c| c.content.as_str()).collect();
        assert_eq!(texts, vec!["a", "c"]);
        assert_eq!(detail.comments.failures.len(), 1);
        assert_eq!(detail.comments.failures[0].key, "1");
        assert!(matches!(
            detail.comments.failures[0].reason,
            ItemFailureReason::Fetch(_)
        ));
    }

    #[tokio::test]
    async fn test_unconfigured_manager_is_an_error() {
        let reader = ReadModelBuilder::new(InMemoryLedger::new(), ChainConfig::default());

        assert!(matches!(
            reader.list_posts(&PostFilter::all()).await,
            Err(ReadError::NotConfigured("SUITTER_MANAGER_ID"))
        ));
        assert!(matches!(
            reader.find_profile(&Address::from_low_u64(1)).await,
            Err(ReadError::NotConfigured(_))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_manager_aborts() {
        let fixture = SuitterFixture::new();
        let manager = fixture.manager_id();
        let reader = builder(fixture);
        reader.ledger().fail_object(manager).await;

        assert!(matches!(
            reader.list_posts(&PostFilter::all()).await,
            Err(ReadError::Ledger(_))
        ));
    }

    #[tokio::test]
    async fn test_like_count_is_read() {
        let mut fixture = SuitterFixture::new();
        let post = fixture.post(Address::from_low_u64(1), "gm", None);
        fixture.set_like_count(post, 12);

        let post = builder(fixture).get_post(&post).await.unwrap().unwrap();
        assert_eq!(post.like_count, 12);
    }
}
