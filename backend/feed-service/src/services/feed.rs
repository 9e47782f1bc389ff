use std::sync::Arc;

use anyhow::Context;
use document_store::InMemoryDocumentStore;
use tracing::info;

use super::{FeedLocks, FeedResolver, SharedStore, StatusUpdatePublisher};
use crate::config::Config;
use crate::error::Result;
use crate::models::{FeedItem, NewStatusUpdate, ResolvedFeed, UserId};
use crate::security::authorize_request;
use crate::seed::mock_dataset;

/// Entry point for the transport layer.
///
/// Every operation authenticates and authorizes the caller before touching
/// the store.
#[derive(Clone)]
pub struct FeedService {
    resolver: FeedResolver,
    publisher: StatusUpdatePublisher,
}

impl FeedService {
    pub fn new(store: SharedStore) -> Self {
        Self {
            resolver: FeedResolver::new(store.clone()),
            publisher: StatusUpdatePublisher::new(store, FeedLocks::new()),
        }
    }

    /// Build the service over an in-memory store seeded per `config`
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let store = match &config.store.seed_path {
            Some(path) => InMemoryDocumentStore::from_seed_file(path)
                .with_context(|| format!("Failed to load seed file {}", path.display()))?,
            None => InMemoryDocumentStore::from_seed(mock_dataset())
                .context("Failed to load built-in mock dataset")?,
        };

        info!(
            env = %config.app.env,
            seed = ?config.store.seed_path,
            "Feed service initialized"
        );
        Ok(Self::new(Arc::new(store)))
    }

    pub fn resolver(&self) -> &FeedResolver {
        &self.resolver
    }

    pub fn publisher(&self) -> &StatusUpdatePublisher {
        &self.publisher
    }

    /// Resolved feed of `user_id`, for that user only
    pub fn get_feed(&self, authorization: Option<&str>, user_id: UserId) -> Result<ResolvedFeed> {
        authorize_request(authorization, user_id)?;
        self.resolver.resolve_feed(user_id)
    }

    /// Publish a status update as `update.user_id`, for that user only
    pub fn post_status_update(
        &self,
        authorization: Option<&str>,
        update: &NewStatusUpdate,
    ) -> Result<FeedItem> {
        let author_id = authorize_request(authorization, update.user_id)?;
        self.publisher
            .publish(author_id, &update.location, &update.contents)
    }
}
