// In-memory object-URL registry
//
// Each created URL owns a copy of its bytes until explicitly revoked;
// resolving a revoked URL yields nothing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use tracing::debug;

use crate::ports::{ObjectUrl, ObjectUrlPort};

struct StoredObject {
    bytes: Vec<u8>,
    content_type: String,
}

/// Process-local object-URL registry handing out `mem://` handles
#[derive(Default)]
pub struct MemoryUrlRegistry {
    entries: Mutex<HashMap<String, StoredObject>>,
    next_id: AtomicU64,
}

impl MemoryUrlRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live (unrevoked) URLs
    pub fn active_count(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    /// Content type recorded for a live URL
    pub fn content_type(&self, url: &ObjectUrl) -> Option<String> {
        self.entries
            .lock()
            .unwrap()
            .get(url.as_str())
            .map(|o| o.content_type.clone())
    }
}

#[async_trait]
impl ObjectUrlPort for MemoryUrlRegistry {
    async fn create_url(&self, bytes: &[u8], content_type: &str) -> ObjectUrl {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let url = format!("mem://clipstitch/{id}");
        self.entries.lock().unwrap().insert(
            url.clone(),
            StoredObject {
                bytes: bytes.to_vec(),
                content_type: content_type.to_string(),
            },
        );
        debug!(url, len = bytes.len(), content_type, "object URL created");
        ObjectUrl::new(url)
    }

    async fn revoke_url(&self, url: &ObjectUrl) {
        let removed = self.entries.lock().unwrap().remove(url.as_str());
        if removed.is_none() {
            debug!(url = url.as_str(), "revoke of unknown or already-revoked URL");
        } else {
            debug!(url = url.as_str(), "object URL revoked");
        }
    }

    async fn resolve(&self, url: &ObjectUrl) -> Option<Vec<u8>> {
        self.entries
            .lock()
            .unwrap()
            .get(url.as_str())
            .map(|o| o.bytes.clone())
    }
}
