use std::sync::{Arc, Once};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use document_store::InMemoryDocumentStore;
use feed_service::FeedService;
use serde_json::Value;

static TRACING: Once = Once::new();

/// Install a test subscriber honouring `RUST_LOG`
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "warn".into()),
            )
            .with_test_writer()
            .try_init();
    });
}

/// `Authorization` header value asserting `user_id`
pub fn bearer(user_id: u64) -> String {
    format!(
        "Bearer {}",
        STANDARD.encode(format!(r#"{{"id":{user_id}}}"#))
    )
}

pub fn service_with(seed: Value) -> (FeedService, Arc<InMemoryDocumentStore>) {
    init_tracing();
    let store = Arc::new(InMemoryDocumentStore::from_seed(seed).expect("valid seed"));
    (FeedService::new(store.clone()), store)
}
