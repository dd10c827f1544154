//! Request/response plumbing shared by every endpoint.
//!
//! A [`RequestBuilder`] describes an endpoint, [`ApiClient`] runs it through a
//! [`Transport`] and maps the outcome onto [`ApiError`], and [`decode`] turns the
//! body into a model. Completions of [`ApiClient::send`] are delivered on a
//! [`CallbackQueue`].

pub mod client;
pub mod context;
pub mod decode;
pub mod error;
pub mod request;
pub mod transport;

#[cfg(test)]
pub(crate) mod dummy;

pub use client::ApiClient;
pub use context::{CallbackContext, CallbackQueue, callback_context};
pub use decode::decode;
pub use error::{ApiError, BoxError, Result};
pub use request::{
    Completion, HttpMethod, HttpRequest, QueryParam, Request, RequestBuilder, static_url,
};
pub use transport::{ClientSettings, ReqwestTransport, Response, Transport};

/// Builds an ordered `Vec<QueryParam>` from `name => value` pairs.
macro_rules! query_params {
    ($($key:expr => $value:expr),+ $(,)?) => {
        vec![
            $($crate::network::QueryParam::new($key, $value.to_string())),+
        ]
    };
}

pub(crate) use query_params;
