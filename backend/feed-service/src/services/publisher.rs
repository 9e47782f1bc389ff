use chrono::Utc;
use document_store::DocumentStoreExt;
use serde::Serialize;
use tracing::{error, info};

use super::{FeedLocks, SharedStore};
use crate::error::{FeedError, Result};
use crate::models::collections::{FEEDS, FEED_ITEMS, USERS};
use crate::models::{Comment, Feed, FeedItem, FeedItemContents, StatusUpdate, User, UserId};

/// A feed item before the store has assigned its id
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FeedItemDraft {
    like_counter: Vec<UserId>,
    comments: Vec<Comment>,
    #[serde(flatten)]
    contents: FeedItemContents,
}

/// Creates status updates and links them at the front of the author's feed.
///
/// Sequence per publish:
/// 1. read the author and their feed (missing -> `NotFound`, nothing written)
/// 2. add the item to `feedItems`; the store assigns its id
/// 3. prepend the id to the feed and write the feed back
///
/// Steps 1-3 run under the author's feed lock. Steps 2 and 3 are separate
/// writes: if step 3 fails the item exists unlinked and the caller gets
/// `OrphanedFeedItem` with its id.
#[derive(Clone)]
pub struct StatusUpdatePublisher {
    store: SharedStore,
    locks: FeedLocks,
}

impl StatusUpdatePublisher {
    pub fn new(store: SharedStore, locks: FeedLocks) -> Self {
        Self { store, locks }
    }

    /// Publish a status update; callers must have authorized `author_id`
    pub fn publish(&self, author_id: UserId, location: &str, contents: &str) -> Result<FeedItem> {
        let post_date = Utc::now().timestamp_millis();
        let author: User = self.store.read_as(USERS, author_id)?;

        self.locks.with_lock(author.feed, || -> Result<FeedItem> {
            let mut feed: Feed = self.store.read_as(FEEDS, author.feed)?;

            let draft = FeedItemDraft {
                like_counter: Vec::new(),
                comments: Vec::new(),
                contents: FeedItemContents::StatusUpdate(StatusUpdate {
                    author: author_id,
                    post_date,
                    location: location.to_string(),
                    contents: contents.to_string(),
                    like_counter: Vec::new(),
                }),
            };
            let item: FeedItem = self.store.add_as(FEED_ITEMS, &draft)?;

            feed.contents.insert(0, item.id);
            if let Err(err) = self.store.write_as(FEEDS, &feed) {
                error!(
                    item_id = item.id,
                    feed_id = feed.id,
                    error = %err,
                    "Feed item created but feed update failed"
                );
                return Err(FeedError::OrphanedFeedItem {
                    item_id: item.id,
                    feed_id: feed.id,
                    reason: err.to_string(),
                });
            }

            info!(
                item_id = item.id,
                feed_id = feed.id,
                author_id,
                "Published status update"
            );
            Ok(item)
        })
    }
}
