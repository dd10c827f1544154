use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client as HttpClient, StatusCode};

use super::{BoxError, HttpRequest};

/// Raw outcome of a request that reached the other side.
///
/// `status` is `None` when the peer answered with something that is not HTTP.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: Option<StatusCode>,
    pub body: Bytes,
}

/// Performs the actual I/O for an [`HttpRequest`].
///
/// Errors are transport failures only (DNS, refused connection, timeout); HTTP
/// error statuses come back as a [`Response`].
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: &HttpRequest) -> Result<Response, BoxError>;
}

#[derive(Debug, Clone, Default)]
pub struct ClientSettings {
    pub timeout: Option<Duration>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: HttpClient,
}

impl ReqwestTransport {
    pub fn new(settings: &ClientSettings) -> reqwest::Result<Self> {
        let mut builder = HttpClient::builder();

        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }

        if let Some(user_agent) = &settings.user_agent {
            builder = builder.user_agent(user_agent.as_str());
        }

        Ok(Self {
            http: builder.build()?,
        })
    }

    pub fn from_client(http: HttpClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: &HttpRequest) -> Result<Response, BoxError> {
        let response = self
            .http
            .request(request.method.into(), request.url.clone())
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        Ok(Response {
            status: Some(status),
            body,
        })
    }
}
