//! Render state - data structure sent from App layer to UI for rendering

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::app::field::FieldInput;
use crate::messages::ui_events::{Focus, View};
use crate::models::{HeaderEntry, HttpMethod, RequestRecord, ResponseRecord};

/// Complete state needed by the UI to render
#[derive(Debug, Clone, Default)]
pub struct RenderState {
    // Navigation
    pub view: View,
    pub focus: Focus,

    // Request draft
    pub method: Option<HttpMethod>,
    pub method_cursor: usize,
    pub url: FieldInput,
    pub body: FieldInput,
    pub header_key: FieldInput,
    pub header_value: FieldInput,
    pub headers: Vec<HeaderEntry>,
    pub params: BTreeMap<String, String>,

    // Exchange
    pub in_flight: bool,
    pub response: Option<ResponseRecord>,
    pub error: Option<String>,
    pub response_scroll: u16,

    // History
    pub history: Vec<Arc<RequestRecord>>,
    pub history_selected: usize,
}

impl RenderState {
    /// Field whose cursor the terminal should show, if any
    pub fn focused_field(&self) -> Option<&FieldInput> {
        if self.view != View::Request {
            return None;
        }
        match self.focus {
            Focus::Method => None,
            Focus::Url => Some(&self.url),
            Focus::Body => Some(&self.body),
            Focus::HeaderKey => Some(&self.header_key),
            Focus::HeaderValue => Some(&self.header_value),
        }
    }
}
