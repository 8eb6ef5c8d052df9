//! Network actor - runs exchanges in the Tokio async runtime

use tokio::sync::mpsc;
use tokio::task::JoinSet;
use uuid::Uuid;

use crate::error::{NetworkFailure, TransportError};
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::models::ResponseRecord;
use crate::network::client::Executor;

/// Sends exactly one completion for an exchange, even if its task unwinds
struct Completion {
    id: Uuid,
    response_tx: Option<mpsc::UnboundedSender<NetworkResponse>>,
}

impl Completion {
    fn new(id: Uuid, response_tx: mpsc::UnboundedSender<NetworkResponse>) -> Self {
        Completion {
            id,
            response_tx: Some(response_tx),
        }
    }

    fn send(mut self, result: Result<ResponseRecord, TransportError>) {
        if let Some(tx) = self.response_tx.take() {
            let _ = tx.send(NetworkResponse { id: self.id, result });
        }
    }
}

impl Drop for Completion {
    fn drop(&mut self) {
        if let Some(tx) = self.response_tx.take() {
            let failure = NetworkFailure::Other("exchange ended without a result".to_string());
            let _ = tx.send(NetworkResponse {
                id: self.id,
                result: Err(failure.into()),
            });
        }
    }
}

/// Network actor that turns execute commands into completion messages
pub struct NetworkActor {
    executor: Executor,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    active_requests: JoinSet<()>,
}

impl NetworkActor {
    pub fn new(executor: Executor, response_tx: mpsc::UnboundedSender<NetworkResponse>) -> Self {
        NetworkActor {
            executor,
            response_tx,
            active_requests: JoinSet::new(),
        }
    }

    /// Run the network actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        loop {
            tokio::select! {
                biased;

                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(NetworkCommand::Execute { record }) => {
                            let completion = Completion::new(record.id, self.response_tx.clone());
                            let executor = self.executor.clone();

                            // No cancellation handle: the exchange runs to completion or timeout
                            self.active_requests.spawn(async move {
                                tracing::info!(id = %record.id, url = %record.url, method = ?record.method, "Executing request");
                                let result = executor.execute(&record).await;
                                match &result {
                                    Ok(resp) => tracing::info!(
                                        id = %record.id,
                                        status = resp.status_code,
                                        elapsed_ms = resp.elapsed.as_millis() as u64,
                                        "Request completed"
                                    ),
                                    Err(e) => tracing::warn!(id = %record.id, error = %e, "Request failed"),
                                }
                                completion.send(result);
                            });
                        }

                        Some(NetworkCommand::Shutdown) | None => {
                            self.active_requests.abort_all();
                            break;
                        }
                    }
                }

                // Reap finished tasks
                Some(joined) = self.active_requests.join_next() => {
                    if let Err(e) = joined {
                        tracing::error!(error = %e, "Exchange task panicked");
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;

    use crate::models::{HttpMethod, RequestRecord};
    use crate::network::client::{Exchange, RawResponse, Transport};

    struct Teapot;

    #[async_trait]
    impl Transport for Teapot {
        async fn exchange(&self, _exchange: Exchange) -> Result<RawResponse, TransportError> {
            Ok(RawResponse {
                status_code: 418,
                status_text: "418 I'm a teapot".to_string(),
                headers: Vec::new(),
                body: b"short and stout".to_vec(),
            })
        }
    }

    struct Broken;

    #[async_trait]
    impl Transport for Broken {
        async fn exchange(&self, _exchange: Exchange) -> Result<RawResponse, TransportError> {
            panic!("transport bug");
        }
    }

    fn record() -> Arc<RequestRecord> {
        Arc::new(RequestRecord::new(
            HttpMethod::GET,
            "http://localhost/brew",
            vec![],
            BTreeMap::new(),
            "",
        ))
    }

    #[tokio::test]
    async fn test_panicking_exchange_still_completes() {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (resp_tx, mut resp_rx) = mpsc::unbounded_channel();
        let executor = Executor::new(Arc::new(Broken), Duration::from_secs(30));
        let handle = tokio::spawn(NetworkActor::new(executor, resp_tx).run(cmd_rx));

        let record = record();
        cmd_tx
            .send(NetworkCommand::Execute { record: record.clone() })
            .unwrap();

        let completion = resp_rx.recv().await.unwrap();
        assert_eq!(completion.id, record.id);
        assert_eq!(
            completion.result.unwrap_err(),
            TransportError::Network(NetworkFailure::Other(
                "exchange ended without a result".to_string()
            ))
        );
        assert!(resp_rx.try_recv().is_err());

        cmd_tx.send(NetworkCommand::Shutdown).unwrap();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_execute_sends_one_completion_per_command() {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (resp_tx, mut resp_rx) = mpsc::unbounded_channel();
        let executor = Executor::new(Arc::new(Teapot), Duration::from_secs(30));
        let handle = tokio::spawn(NetworkActor::new(executor, resp_tx).run(cmd_rx));

        let record = record();
        cmd_tx
            .send(NetworkCommand::Execute { record: record.clone() })
            .unwrap();

        let completion = resp_rx.recv().await.unwrap();
        assert_eq!(completion.id, record.id);
        assert_eq!(completion.result.unwrap().status_code, 418);

        cmd_tx.send(NetworkCommand::Shutdown).unwrap();
        handle.await.unwrap();
        assert!(resp_rx.try_recv().is_err());
    }
}
