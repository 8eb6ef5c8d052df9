//! Command handlers - business logic for processing UI events

use std::sync::Arc;

use crate::app::transitions::{self, Action};
use crate::app::AppState;
use crate::messages::ui_events::{Focus, UiEvent, View};
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::models::{HeaderEntry, HttpMethod};

/// What the actor must do after an event has been applied
#[derive(Debug)]
pub enum Effect {
    None,
    Dispatch(NetworkCommand),
    Quit,
}

impl AppState {
    /// Interpret one UI event against the current state
    pub fn handle_event(&mut self, event: UiEvent) -> Effect {
        let action = transitions::resolve(self.view, self.focus, event);
        tracing::trace!(?event, ?action, view = ?self.view, focus = ?self.focus, "Resolved event");
        self.apply(action)
    }

    pub fn apply(&mut self, action: Action) -> Effect {
        match action {
            Action::Quit => return Effect::Quit,
            Action::CycleView => self.view = self.view.next(),
            Action::Resize { width, height } => self.viewport = (width, height),

            Action::FocusUp => self.focus = self.focus.up(),
            Action::FocusDown => self.focus = self.focus.down(),
            Action::MethodPrev => self.select_method(self.method_cursor.saturating_sub(1)),
            Action::MethodNext => self.select_method(self.method_cursor + 1),
            Action::Edit(op) => {
                if let Some(field) = self.focused_field_mut() {
                    field.apply(op);
                }
            }
            Action::CommitHeader => self.commit_header(),
            Action::Send => {
                if let Some(cmd) = self.prepare_request() {
                    return Effect::Dispatch(cmd);
                }
            }

            Action::ScrollUp => self.response_scroll = self.response_scroll.saturating_sub(1),
            Action::ScrollDown => self.response_scroll = self.response_scroll.saturating_add(1),

            Action::HistoryPrev => self.history_selected = self.history_selected.saturating_sub(1),
            Action::HistoryNext => {
                let last = self.history.len().saturating_sub(1);
                self.history_selected = (self.history_selected + 1).min(last);
            }
            Action::Recall => self.recall_selected(),

            Action::Ignore => {}
        }

        Effect::None
    }

    // ========================
    // Request composition
    // ========================

    fn select_method(&mut self, cursor: usize) {
        self.method_cursor = cursor.min(HttpMethod::ALL.len() - 1);
        self.draft.method = Some(HttpMethod::ALL[self.method_cursor]);
    }

    /// Append the pending header when both fields are filled, then clear them
    pub fn commit_header(&mut self) {
        if self.header_key.is_empty() || self.header_value.is_empty() {
            tracing::debug!("Header commit ignored, key or value empty");
            return;
        }

        self.draft
            .headers
            .push(HeaderEntry::new(self.header_key.value(), self.header_value.value()));
        self.header_key.clear();
        self.header_value.clear();
    }

    // ========================
    // Request sending
    // ========================

    /// Snapshot the draft into history and hand back the execute command.
    /// Returns `None` while another exchange is in flight.
    pub fn prepare_request(&mut self) -> Option<NetworkCommand> {
        if self.in_flight() {
            tracing::debug!(pending = ?self.pending, "Submit ignored, exchange in flight");
            return None;
        }

        let record = Arc::new(self.draft.snapshot());
        tracing::info!(id = %record.id, method = record.method.as_str(), url = %record.url, "Submitting request");

        self.pending = Some(record.id);
        self.history.push(record.clone());

        Some(NetworkCommand::Execute { record })
    }

    // ========================
    // Response handling
    // ========================

    pub fn handle_response(&mut self, response: NetworkResponse) {
        if self.pending != Some(response.id) {
            tracing::warn!(id = %response.id, pending = ?self.pending, "Dropping stale completion");
            return;
        }

        self.pending = None;
        match response.result {
            Ok(record) => {
                self.response = Some(record);
                self.error = None;
                self.response_scroll = 0;
                self.view = View::Response;
            }
            Err(e) => {
                self.error = Some(e.to_string());
            }
        }
    }

    /// The pending exchange will never complete; unblock submission
    pub fn abandon_request(&mut self, reason: &str) {
        if let Some(id) = self.pending.take() {
            tracing::error!(%id, reason, "Abandoning request");
            self.error = Some(reason.to_string());
        }
    }

    // ========================
    // History
    // ========================

    fn recall_selected(&mut self) {
        let Some(record) = self.history.get(self.history_selected).cloned() else {
            return;
        };

        self.draft.recall(&record);
        self.method_cursor = record.method.index();
        self.view = View::Request;
        self.focus = Focus::Url;
    }
}
