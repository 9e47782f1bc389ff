//! Feed core: bearer authentication, authorization, feed resolution and
//! status update publication over a [`document_store::DocumentStore`].

pub mod config;
pub mod error;
pub mod models;
pub mod security;
pub mod seed;
pub mod services;

pub use config::Config;
pub use error::{FeedError, Result};
pub use models::{
    Comment, Feed, FeedItem, FeedItemContents, NewStatusUpdate, ResolvedFeed, ResolvedFeedItem,
    StatusUpdate, User, UserId,
};
pub use security::{authenticate, authorize, identify, TokenError, INVALID_USER_ID};
pub use services::{FeedLocks, FeedResolver, FeedService, SharedStore, StatusUpdatePublisher};
