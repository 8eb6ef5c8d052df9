//! App layer - the session controller
//!
//! The App actor receives UI events and network completions,
//! updates state, and emits network commands and render state.

pub mod state;
pub mod actor;
pub mod commands;
pub mod draft;
pub mod field;
pub mod transitions;

pub use state::AppState;
pub use actor::AppActor;
pub use commands::Effect;
pub use draft::RequestDraft;
pub use field::FieldInput;
