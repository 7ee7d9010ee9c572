use std::sync::Arc;

use tracing::debug;

use crate::error::{PlannerError, Result};
use crate::store::KeyValueStore;

pub const NOTES_KEY: &str = "notes";

/// Free-text scratch pad stored as UTF-8 under its own key.
#[derive(Clone)]
pub struct Notes {
    store: Arc<dyn KeyValueStore>,
}

impl Notes {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn read(&self) -> Result<String> {
        let bytes = self
            .store
            .get(NOTES_KEY)
            .map_err(|e| PlannerError::store(NOTES_KEY, e))?;
        match bytes {
            Some(bytes) => String::from_utf8(bytes).map_err(|e| PlannerError::Decode {
                key: NOTES_KEY.to_string(),
                reason: e.to_string(),
            }),
            None => Ok(String::new()),
        }
    }

    pub fn write(&self, text: &str) -> Result<()> {
        debug!(len = text.len(), "saving notes");
        self.store
            .set(NOTES_KEY, text.as_bytes())
            .map_err(|e| PlannerError::store(NOTES_KEY, e))
    }
}
