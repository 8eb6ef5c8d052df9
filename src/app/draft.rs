//! The request under construction in the Request view

use std::collections::BTreeMap;

use crate::app::field::FieldInput;
use crate::models::{HeaderEntry, HttpMethod, RequestRecord};

/// Mutable, session-local request. Never persisted.
#[derive(Clone, Debug, Default)]
pub struct RequestDraft {
    /// `None` until the selector is touched; submission falls back to GET
    pub method: Option<HttpMethod>,
    pub url: FieldInput,
    pub body: FieldInput,
    pub headers: Vec<HeaderEntry>,
    pub params: BTreeMap<String, String>,
}

impl RequestDraft {
    pub fn effective_method(&self) -> HttpMethod {
        self.method.unwrap_or_default()
    }

    /// Freeze the draft into a record with a fresh id and timestamp
    pub fn snapshot(&self) -> RequestRecord {
        RequestRecord::new(
            self.effective_method(),
            self.url.value(),
            self.headers.clone(),
            self.params.clone(),
            self.body.value(),
        )
    }

    /// Load a past record back into the draft
    pub fn recall(&mut self, record: &RequestRecord) {
        self.method = Some(record.method);
        self.url.set(record.url.clone());
        self.body.set(record.body.clone());
        self.headers = record.headers.clone();
        self.params = record.params.clone();
    }
}
