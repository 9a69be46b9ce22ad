//! Scripted transport for exercising the client without a server

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::awx::client::AwxClient;
use crate::awx::locator::Locator;
use crate::awx::transport::{Method, Transport, TransportResponse};
use crate::error::{AwxError, Result};

/// One request as the transport saw it
#[derive(Debug, Clone)]
pub(crate) struct RecordedRequest {
    pub method: Method,
    pub target: String,
    pub body: Option<Value>,
}

/// Transport that replays canned responses in order and records every
/// request, so tests can assert on exactly what went over the wire and
/// how many times.
#[derive(Default)]
pub(crate) struct ScriptedTransport {
    responses: Mutex<VecDeque<TransportResponse>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_json(&self, status: u16, body: Value) {
        self.push_body(status, &body.to_string());
    }

    pub fn push_body(&self, status: u16, body: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(TransportResponse {
                status,
                body: body.to_string(),
            });
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(
        &self,
        method: Method,
        locator: &Locator,
        body: Option<&Value>,
    ) -> Result<TransportResponse> {
        self.requests.lock().unwrap().push(RecordedRequest {
            method,
            target: locator.path_and_query(),
            body: body.cloned(),
        });
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| AwxError::RemoteUnavailable("no scripted response left".to_string()))
    }
}

/// Wrap a scripted transport in a client, keeping a handle for assertions
pub(crate) fn client_with(transport: ScriptedTransport) -> (Arc<ScriptedTransport>, AwxClient) {
    let transport = Arc::new(transport);
    let client = AwxClient::with_transport(Box::new(transport.clone()));
    (transport, client)
}

/// Build a list page body in the server's wire shape
pub(crate) fn page(count: u64, next: Option<&str>, results: Vec<Value>) -> Value {
    json!({
        "count": count,
        "next": next,
        "results": results,
    })
}
