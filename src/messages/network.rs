//! Network messages - communication between App and Network layers

use std::sync::Arc;

use uuid::Uuid;

use crate::error::TransportError;
use crate::models::{RequestRecord, ResponseRecord};

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone)]
pub enum NetworkCommand {
    /// Run one exchange for a record already appended to history
    Execute { record: Arc<RequestRecord> },

    /// Shutdown the network actor
    Shutdown,
}

/// Completion message sent from Network layer to App layer, one per exchange
#[derive(Debug, Clone)]
pub struct NetworkResponse {
    pub id: Uuid,
    pub result: Result<ResponseRecord, TransportError>,
}
