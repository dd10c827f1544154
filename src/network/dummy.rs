//! Deterministic [`Transport`] for unit tests.
use std::{
    io,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{StatusCode, Url};

use super::{BoxError, HttpRequest, Response, Transport};

#[derive(Debug, Clone)]
pub enum Outcome {
    Http(StatusCode, &'static str),
    NotHttp,
    Offline,
}

/// Answers every request with the same [`Outcome`] and remembers what was asked.
#[derive(Debug, Clone)]
pub struct DummyTransport {
    outcome: Outcome,
    seen: Arc<Mutex<Vec<Url>>>,
}

impl DummyTransport {
    pub fn new(outcome: Outcome) -> Self {
        Self {
            outcome,
            seen: Arc::default(),
        }
    }

    pub fn ok(body: &'static str) -> Self {
        Self::new(Outcome::Http(StatusCode::OK, body))
    }

    pub fn seen(&self) -> Vec<Url> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for DummyTransport {
    async fn execute(&self, request: &HttpRequest) -> Result<Response, BoxError> {
        self.seen.lock().unwrap().push(request.url.clone());

        match &self.outcome {
            Outcome::Http(status, body) => Ok(Response {
                status: Some(*status),
                body: Bytes::from_static(body.as_bytes()),
            }),
            Outcome::NotHttp => Ok(Response {
                status: None,
                body: Bytes::new(),
            }),
            Outcome::Offline => Err(Box::new(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                "connection refused",
            ))),
        }
    }
}
