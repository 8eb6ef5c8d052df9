//! Network layer - runs the request executor off the event loop
//!
//! The Network actor receives execute commands and sends back exactly one
//! completion message per exchange.

pub mod actor;
pub mod client;

pub use actor::NetworkActor;
pub use client::{Exchange, Executor, RawResponse, ReqwestTransport, Transport};
