//! Lazy document cache
//!
//! Holds the assembled document once it has been built successfully and
//! shares it through an `Arc`. A failed build is logged and answered with a
//! fixed error payload; the cache stays empty so the next call retries.

use relations_openapi_common::Result;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, error};

/// Message of the payload returned when the document cannot be built
pub const RENDER_ERROR: &str = "Unable to render schema";

/// Payload returned when the document cannot be built
pub fn error_payload() -> Value {
    json!({ "error": RENDER_ERROR })
}

/// Build-once cache for the assembled document
///
/// The mutex is held for the whole build, so concurrent first callers wait
/// for a single build and never observe a partial document.
#[derive(Debug, Default)]
pub struct DocumentCache {
    document: Mutex<Option<Arc<Value>>>,
}

impl DocumentCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Option<Arc<Value>>> {
        self.document.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Return the cached document, building it on first use
    pub fn get<F>(&self, build: F) -> Arc<Value>
    where
        F: FnOnce() -> Result<Value>,
    {
        let mut document = self.lock();

        if let Some(cached) = document.as_ref() {
            return Arc::clone(cached);
        }

        match build() {
            Ok(built) => {
                debug!("Cached assembled document");
                let built = Arc::new(built);
                *document = Some(Arc::clone(&built));
                built
            }
            Err(e) => {
                error!(error = %e, "{}", RENDER_ERROR);
                Arc::new(error_payload())
            }
        }
    }

    /// Whether a document has been built and cached
    pub fn is_built(&self) -> bool {
        self.lock().is_some()
    }

    /// Drop the cached document so the next call rebuilds it
    pub fn clear(&self) {
        if self.lock().take().is_some() {
            debug!("Cleared cached document");
        }
    }
}
