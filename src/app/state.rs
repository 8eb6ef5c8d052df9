//! App state - pure data structure with no I/O logic

use uuid::Uuid;

use crate::app::draft::RequestDraft;
use crate::app::field::FieldInput;
use crate::messages::ui_events::{Focus, View};
use crate::messages::RenderState;
use crate::models::{History, ResponseRecord};

/// Main session state - pure data, no I/O
#[derive(Debug, Default)]
pub struct AppState {
    // Navigation
    pub view: View,
    pub focus: Focus,
    /// Position in `HttpMethod::ALL`, clamped at both ends
    pub method_cursor: usize,

    // Request composition
    pub draft: RequestDraft,
    pub header_key: FieldInput,
    pub header_value: FieldInput,

    // Exchange. `pending` is set exactly while one exchange is in flight.
    pub pending: Option<Uuid>,
    pub response: Option<ResponseRecord>,
    pub error: Option<String>,
    pub response_scroll: u16,

    // History
    pub history: History,
    pub history_selected: usize,

    /// Last reported terminal size (width, height); stored, not interpreted
    pub viewport: (u16, u16),
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a pre-filled draft (command-line seeding)
    pub fn with_draft(draft: RequestDraft) -> Self {
        let method_cursor = draft.method.map(|m| m.index()).unwrap_or(0);
        AppState {
            draft,
            method_cursor,
            ..Self::default()
        }
    }

    pub fn in_flight(&self) -> bool {
        self.pending.is_some()
    }

    /// The field that currently owns text input; the method selector has none
    pub fn focused_field_mut(&mut self) -> Option<&mut FieldInput> {
        match self.focus {
            Focus::Method => None,
            Focus::Url => Some(&mut self.draft.url),
            Focus::Body => Some(&mut self.draft.body),
            Focus::HeaderKey => Some(&mut self.header_key),
            Focus::HeaderValue => Some(&mut self.header_value),
        }
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        RenderState {
            view: self.view,
            focus: self.focus,
            method: self.draft.method,
            method_cursor: self.method_cursor,
            url: self.draft.url.clone(),
            body: self.draft.body.clone(),
            header_key: self.header_key.clone(),
            header_value: self.header_value.clone(),
            headers: self.draft.headers.clone(),
            params: self.draft.params.clone(),
            in_flight: self.in_flight(),
            response: self.response.clone(),
            error: self.error.clone(),
            response_scroll: self.response_scroll,
            history: self.history.snapshot(),
            history_selected: self.history_selected,
        }
    }
}
