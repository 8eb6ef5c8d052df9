//! # Restless
//!
//! A keyboard-driven terminal HTTP client: compose a request, send it, and
//! inspect the response and history without leaving the terminal.
//!
//! ## Features
//! - HTTP methods: GET, POST, PUT, DELETE, PATCH, HEAD
//! - URL, body and header editing with a single focused field
//! - Query parameters merged into the URL
//! - Response view with pretty-printed JSON
//! - In-memory request history with recall
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (session state machine)
//! - Network Layer (Tokio runtime), at most one exchange in flight

pub mod app;
pub mod config;
pub mod constants;
pub mod error;
pub mod messages;
pub mod models;
pub mod network;
pub mod ui;

// Re-export commonly used types
pub use app::{AppActor, AppState, RequestDraft};
pub use error::{NetworkFailure, TransportError};
pub use messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
pub use models::{HeaderEntry, History, HttpMethod, RequestRecord, ResponseRecord};
pub use network::{Executor, NetworkActor, ReqwestTransport, Transport};
