use document_store::{DocumentId, DocumentStoreExt};
use tracing::debug;

use super::SharedStore;
use crate::error::Result;
use crate::models::collections::{FEEDS, FEED_ITEMS, USERS};
use crate::models::{Feed, FeedItem, ResolvedFeed, ResolvedFeedItem, User, UserId};

/// Expands stored feeds into fully dereferenced views.
///
/// Read-only. Every reference costs one store read; repeated references are
/// read again. Any missing reference fails the whole resolution.
#[derive(Clone)]
pub struct FeedResolver {
    store: SharedStore,
}

impl FeedResolver {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Resolve the feed of `user_id`, preserving stored order
    pub fn resolve_feed(&self, user_id: UserId) -> Result<ResolvedFeed> {
        let user = self.read_user(user_id)?;
        let feed: Feed = self.store.read_as(FEEDS, user.feed)?;

        let contents = feed
            .contents
            .iter()
            .map(|&item_id| self.resolve_feed_item(item_id))
            .collect::<Result<Vec<_>>>()?;

        debug!(
            user_id,
            feed_id = feed.id,
            items = contents.len(),
            "Resolved feed"
        );

        Ok(Feed {
            id: feed.id,
            contents,
            extra: feed.extra,
        })
    }

    /// Resolve a single feed item: likes, payload author, comment authors
    pub fn resolve_feed_item(&self, item_id: DocumentId) -> Result<ResolvedFeedItem> {
        let item: FeedItem = self.store.read_as(FEED_ITEMS, item_id)?;
        item.try_map_users(|user_id| self.read_user(user_id))
    }

    fn read_user(&self, user_id: UserId) -> Result<User> {
        Ok(self.store.read_as(USERS, user_id)?)
    }
}
