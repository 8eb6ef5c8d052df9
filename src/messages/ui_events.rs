//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Active view. `Tab` walks them in declaration order and wraps.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum View {
    #[default]
    Request,
    Response,
    History,
}

impl View {
    pub fn next(&self) -> View {
        match self {
            View::Request => View::Response,
            View::Response => View::History,
            View::History => View::Request,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            View::Request => "Request",
            View::Response => "Response",
            View::History => "History",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            View::Request => 0,
            View::Response => 1,
            View::History => 2,
        }
    }
}

/// The single field holding keyboard focus in the Request view
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Focus {
    #[default]
    Method,
    Url,
    Body,
    HeaderKey,
    HeaderValue,
}

impl Focus {
    /// Fields in navigation order, index 0..=4
    pub const ORDER: [Focus; 5] = [
        Focus::Method,
        Focus::Url,
        Focus::Body,
        Focus::HeaderKey,
        Focus::HeaderValue,
    ];

    pub fn index(&self) -> usize {
        match self {
            Focus::Method => 0,
            Focus::Url => 1,
            Focus::Body => 2,
            Focus::HeaderKey => 3,
            Focus::HeaderValue => 4,
        }
    }

    /// Clamps out-of-range indices to the last field
    pub fn from_index(index: usize) -> Focus {
        Self::ORDER[index.min(Self::ORDER.len() - 1)]
    }

    pub fn up(&self) -> Focus {
        Focus::from_index(self.index().saturating_sub(1))
    }

    pub fn down(&self) -> Focus {
        Focus::from_index(self.index() + 1)
    }

    /// Whether the field accepts free text (everything but the method selector)
    pub fn is_text(&self) -> bool {
        !matches!(self, Focus::Method)
    }

    /// Whether `submit` commits a header instead of sending the request
    pub fn is_header(&self) -> bool {
        matches!(self, Focus::HeaderKey | Focus::HeaderValue)
    }
}

/// Text editing delegated to the focused field
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum EditOp {
    Insert(char),
    Backspace,
    Delete,
    CursorLeft,
    CursorRight,
    Home,
    End,
}

/// Events generated from user input in the UI layer
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum UiEvent {
    Quit,
    CycleView,
    Submit,
    FocusUp,
    FocusDown,
    MethodPrev,
    MethodNext,
    Edit(EditOp),
    Resize { width: u16, height: u16 },
}

/// Convert a key event to a UiEvent based on current UI context
pub fn key_to_ui_event(key: KeyEvent, view: View, focus: Focus) -> Option<UiEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(UiEvent::Quit),
            _ => None,
        };
    }

    let editing = view == View::Request && focus.is_text();

    match key.code {
        KeyCode::Tab => Some(UiEvent::CycleView),
        KeyCode::Enter => Some(UiEvent::Submit),
        KeyCode::Up => Some(UiEvent::FocusUp),
        KeyCode::Down => Some(UiEvent::FocusDown),
        KeyCode::Left if view == View::Request && focus == Focus::Method => Some(UiEvent::MethodPrev),
        KeyCode::Right if view == View::Request && focus == Focus::Method => Some(UiEvent::MethodNext),
        KeyCode::Char('q') if !editing => Some(UiEvent::Quit),
        KeyCode::Esc if !editing => Some(UiEvent::Quit),
        _ if editing => edit_op(key.code).map(UiEvent::Edit),
        _ => None,
    }
}

fn edit_op(code: KeyCode) -> Option<EditOp> {
    match code {
        KeyCode::Char(c) => Some(EditOp::Insert(c)),
        KeyCode::Backspace => Some(EditOp::Backspace),
        KeyCode::Delete => Some(EditOp::Delete),
        KeyCode::Left => Some(EditOp::CursorLeft),
        KeyCode::Right => Some(EditOp::CursorRight),
        KeyCode::Home => Some(EditOp::Home),
        KeyCode::End => Some(EditOp::End),
        _ => None,
    }
}
