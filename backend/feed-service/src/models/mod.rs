//! Stored records and their resolved views.
//!
//! Reference fields are generic over the reference representation: stored
//! records hold ids (`UserId`, `DocumentId`), resolved views hold the
//! dereferenced records. `FeedItem` is the stored shape, `FeedItem<User>`
//! is the resolved one.

use document_store::DocumentId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{FeedError, Result};

pub type UserId = DocumentId;

/// Collection names in the document store
pub mod collections {
    pub const USERS: &str = "users";
    pub const FEEDS: &str = "feeds";
    pub const FEED_ITEMS: &str = "feedItems";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: UserId,
    pub feed: DocumentId,
    /// Profile fields this core does not interpret (e.g. `fullName`)
    #[serde(flatten)]
    pub profile: Map<String, Value>,
}

/// A user's feed, most recent item first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feed<I = DocumentId> {
    #[serde(rename = "_id")]
    pub id: DocumentId,
    pub contents: Vec<I>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedItem<A = UserId> {
    #[serde(rename = "_id")]
    pub id: DocumentId,
    // Named constructor so deserializing does not require `A: Default`
    #[serde(default = "Vec::new")]
    pub like_counter: Vec<A>,
    #[serde(default = "Vec::new")]
    pub comments: Vec<Comment<A>>,
    /// Variant tag (`type`) and payload (`contents`)
    #[serde(flatten)]
    pub contents: FeedItemContents<A>,
}

/// Feed item payload, tagged by `type`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "contents")]
pub enum FeedItemContents<A = UserId> {
    #[serde(rename = "statusUpdate")]
    StatusUpdate(StatusUpdate<A>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdate<A = UserId> {
    pub author: A,
    /// Milliseconds since the Unix epoch
    pub post_date: i64,
    pub location: String,
    pub contents: String,
    /// Kept as ids; only the envelope counter is resolved
    #[serde(default)]
    pub like_counter: Vec<UserId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment<A = UserId> {
    pub author: A,
    #[serde(flatten)]
    pub body: Map<String, Value>,
}

pub type ResolvedFeedItem = FeedItem<User>;
pub type ResolvedFeed = Feed<ResolvedFeedItem>;

impl<A> FeedItem<A> {
    /// Replace every user reference in the item, failing on the first error.
    ///
    /// References are visited in order: `likeCounter`, the payload author,
    /// then each comment author.
    pub fn try_map_users<B, E, F>(self, mut f: F) -> std::result::Result<FeedItem<B>, E>
    where
        F: FnMut(A) -> std::result::Result<B, E>,
    {
        let like_counter = self
            .like_counter
            .into_iter()
            .map(&mut f)
            .collect::<std::result::Result<Vec<_>, _>>()?;
        let contents = self.contents.try_map_users(&mut f)?;
        let comments = self
            .comments
            .into_iter()
            .map(|comment| comment.try_map_author(&mut f))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(FeedItem {
            id: self.id,
            like_counter,
            comments,
            contents,
        })
    }
}

impl<A> FeedItemContents<A> {
    /// Stored `type` tag of this variant
    pub fn kind(&self) -> &'static str {
        match self {
            FeedItemContents::StatusUpdate(_) => "statusUpdate",
        }
    }

    pub fn try_map_users<B, E, F>(self, f: F) -> std::result::Result<FeedItemContents<B>, E>
    where
        F: FnMut(A) -> std::result::Result<B, E>,
    {
        match self {
            FeedItemContents::StatusUpdate(update) => {
                Ok(FeedItemContents::StatusUpdate(update.try_map_author(f)?))
            }
        }
    }

    pub fn as_status_update(&self) -> Option<&StatusUpdate<A>> {
        match self {
            FeedItemContents::StatusUpdate(update) => Some(update),
        }
    }
}

impl<A> StatusUpdate<A> {
    fn try_map_author<B, E, F>(self, mut f: F) -> std::result::Result<StatusUpdate<B>, E>
    where
        F: FnMut(A) -> std::result::Result<B, E>,
    {
        Ok(StatusUpdate {
            author: f(self.author)?,
            post_date: self.post_date,
            location: self.location,
            contents: self.contents,
            like_counter: self.like_counter,
        })
    }
}

impl<A> Comment<A> {
    fn try_map_author<B, E, F>(self, mut f: F) -> std::result::Result<Comment<B>, E>
    where
        F: FnMut(A) -> std::result::Result<B, E>,
    {
        Ok(Comment {
            author: f(self.author)?,
            body: self.body,
        })
    }
}

/// Payload of a status update post request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStatusUpdate {
    pub user_id: UserId,
    pub location: String,
    pub contents: String,
}

impl NewStatusUpdate {
    /// Parse a request body; any shape mismatch is `MalformedInput`
    pub fn from_json(body: &str) -> Result<Self> {
        serde_json::from_str(body).map_err(|e| FeedError::MalformedInput(e.to_string()))
    }
}
