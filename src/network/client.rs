use std::{fmt, sync::Arc};

use bytes::Bytes;
use serde::de::DeserializeOwned;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::{
    ApiError, CallbackContext, ClientSettings, HttpRequest, Request, RequestBuilder,
    ReqwestTransport, Result, Transport, decode,
};

/// Executes requests against a [`Transport`], one attempt each.
///
/// Cheap to clone; clones share the transport and the callback context.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    callbacks: CallbackContext,
}

impl ApiClient {
    pub fn new<T>(transport: T, callbacks: CallbackContext) -> Self
    where
        T: Transport + 'static,
    {
        Self {
            transport: Arc::new(transport),
            callbacks,
        }
    }

    pub fn with_settings(
        settings: &ClientSettings,
        callbacks: CallbackContext,
    ) -> reqwest::Result<Self> {
        Ok(Self::new(ReqwestTransport::new(settings)?, callbacks))
    }

    pub fn callbacks(&self) -> &CallbackContext {
        &self.callbacks
    }

    /// Sends the request described by `builder` and returns the raw body of a 2xx
    /// response.
    pub async fn execute(&self, builder: &dyn RequestBuilder) -> Result<Bytes> {
        let request = builder.url_request()?;

        self.execute_http(&request).await
    }

    /// Like [`execute`](Self::execute), then decodes the body as JSON.
    pub async fn fetch<M>(&self, builder: &dyn RequestBuilder) -> Result<M>
    where
        M: DeserializeOwned + Send + 'static,
    {
        decode(self.execute(builder).await).await
    }

    /// Runs `request` in the background and posts its completion to the callback
    /// context.
    ///
    /// The completion runs exactly once while the callback queue is alive, also when
    /// the request could not be constructed. If the queue is gone by the time the
    /// result is ready, the completion is dropped.
    ///
    /// # Panics
    ///
    /// Must be called from within a Tokio runtime.
    pub fn send<M>(&self, request: Request<M>) -> JoinHandle<()>
    where
        M: DeserializeOwned + Send + 'static,
    {
        let (builder, completion) = request.into_parts();
        let client = self.clone();

        tokio::spawn(async move {
            let result = decode(client.execute(builder.as_ref()).await).await;

            client.deliver(move || completion(result));
        })
    }

    pub(crate) async fn execute_http(&self, request: &HttpRequest) -> Result<Bytes> {
        // The query carries the API key, keep it out of the logs.
        let host = request.url.host_str().unwrap_or_default();
        let path = request.url.path();
        debug!(method = %request.method, host, path, "sending request");

        let response = match self.transport.execute(request).await {
            Ok(response) => response,
            Err(cause) => {
                warn!(host, path, %cause, "transport failure");
                return Err(ApiError::Network(cause));
            }
        };

        let Some(status) = response.status else {
            warn!(host, path, "response is not HTTP");
            return Err(ApiError::UnknownUrlResponse);
        };

        debug!(%status, bytes = response.body.len(), path, "received response");

        match ApiError::from_status(status) {
            None => Ok(response.body),
            Some(err) => {
                warn!(%status, host, path, "request failed");
                Err(err)
            }
        }
    }

    pub(crate) fn deliver<F>(&self, job: F)
    where
        F: FnOnce() + Send + 'static,
    {
        if !self.callbacks.post(job) {
            debug!("callback queue closed, dropping completion");
        }
    }
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("callbacks", &self.callbacks)
            .finish_non_exhaustive()
    }
}
