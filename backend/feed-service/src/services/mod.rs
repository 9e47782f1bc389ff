pub mod feed;
pub mod feed_locks;
pub mod publisher;
pub mod resolver;

use std::sync::Arc;

use document_store::DocumentStore;

pub use feed::FeedService;
pub use feed_locks::FeedLocks;
pub use publisher::StatusUpdatePublisher;
pub use resolver::FeedResolver;

/// Store handle injected into resolver and publisher
pub type SharedStore = Arc<dyn DocumentStore>;
