//! Shared test doubles for exercising the client without a network.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use http::StatusCode;

use crate::transport::{HttpRequest, HttpResponse, HttpTransport, TransportError};

type Responder = Box<dyn Fn(&HttpRequest) -> Result<HttpResponse, TransportError> + Send + Sync>;

/// Transport double that records every request and answers from a closure.
pub(crate) struct MockTransport {
    responder: Responder,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub(crate) fn new<F>(responder: F) -> Arc<Self>
    where
        F: Fn(&HttpRequest) -> Result<HttpResponse, TransportError> + Send + Sync + 'static,
    {
        Arc::new(Self {
            responder: Box::new(responder),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub(crate) fn recorded_requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request.clone());
        (self.responder)(&request)
    }
}

/// Builds a JSON response with the given status.
pub(crate) fn json_response(status: StatusCode, body: serde_json::Value) -> HttpResponse {
    HttpResponse {
        status,
        content_type: Some("application/json".into()),
        body: body.to_string().into_bytes(),
    }
}

/// Builds a non-JSON response with the given status and content type.
pub(crate) fn raw_response(status: StatusCode, content_type: &str, body: Vec<u8>) -> HttpResponse {
    HttpResponse {
        status,
        content_type: Some(content_type.into()),
        body,
    }
}
