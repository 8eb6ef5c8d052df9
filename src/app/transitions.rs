//! Transition table: (view, focus, event) -> action
//!
//! `submit` is overloaded by focus: on a header field it commits the pending
//! header, anywhere else in the Request view it sends the draft. Guards that
//! depend on runtime state (in-flight, field contents) are checked when the
//! action is applied, not here.

use crate::messages::ui_events::{EditOp, Focus, UiEvent, View};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Action {
    Quit,
    CycleView,
    Resize { width: u16, height: u16 },
    FocusUp,
    FocusDown,
    MethodPrev,
    MethodNext,
    CommitHeader,
    Send,
    Edit(EditOp),
    ScrollUp,
    ScrollDown,
    HistoryPrev,
    HistoryNext,
    Recall,
    Ignore,
}

pub fn resolve(view: View, focus: Focus, event: UiEvent) -> Action {
    use UiEvent as E;

    match (view, focus, event) {
        (_, _, E::Quit) => Action::Quit,
        (_, _, E::CycleView) => Action::CycleView,
        (_, _, E::Resize { width, height }) => Action::Resize { width, height },

        (View::Request, _, E::FocusUp) => Action::FocusUp,
        (View::Request, _, E::FocusDown) => Action::FocusDown,
        (View::Request, Focus::Method, E::MethodPrev) => Action::MethodPrev,
        (View::Request, Focus::Method, E::MethodNext) => Action::MethodNext,
        (View::Request, focus, E::Submit) if focus.is_header() => Action::CommitHeader,
        (View::Request, _, E::Submit) => Action::Send,
        (View::Request, Focus::Method, E::Edit(_)) => Action::Ignore,
        (View::Request, _, E::Edit(op)) => Action::Edit(op),

        (View::Response, _, E::FocusUp) => Action::ScrollUp,
        (View::Response, _, E::FocusDown) => Action::ScrollDown,

        (View::History, _, E::FocusUp) => Action::HistoryPrev,
        (View::History, _, E::FocusDown) => Action::HistoryNext,
        (View::History, _, E::Submit) => Action::Recall,

        _ => Action::Ignore,
    }
}
