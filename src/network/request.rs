use std::fmt;

use reqwest::{Method, Url};

use super::{ApiError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Delete => Method::DELETE,
        }
    }
}

/// A single `name=value` pair of a query string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryParam {
    pub name: String,
    pub value: String,
}

impl QueryParam {
    pub fn new<N: Into<String>, V: Into<String>>(name: N, value: V) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Resolved request target: method plus absolute URL including the query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: Url,
}

impl HttpRequest {
    pub fn get(url: Url) -> Self {
        Self {
            method: HttpMethod::Get,
            url,
        }
    }
}

/// Parses a URL literal known at compile time.
///
/// # Panics
///
/// Panics if `literal` is not a valid absolute URL. A broken base URL makes every
/// request fail, so it has to be caught during development rather than handled.
pub fn static_url(literal: &'static str) -> Url {
    match Url::parse(literal) {
        Ok(url) => url,
        Err(err) => panic!("invalid static URL {literal:?}: {err}"),
    }
}

/// Describes how to reach one endpoint.
///
/// Implementors provide the pieces; [`RequestBuilder::url_request`] assembles them.
pub trait RequestBuilder: Send + Sync {
    fn method(&self) -> HttpMethod;

    fn base_url(&self) -> &Url;

    fn path(&self) -> &str;

    fn params(&self) -> &[QueryParam];

    /// Appends `path` to the base URL and the params, in order, to its query.
    ///
    /// Params usually carry runtime input, so failure is reported as
    /// [`ApiError::InvalidRequest`] instead of panicking.
    fn url_request(&self) -> Result<HttpRequest> {
        let mut url = self.base_url().clone();

        url.path_segments_mut()
            .map_err(|()| {
                ApiError::InvalidRequest(format!("{} cannot carry a path", self.base_url()))
            })?
            .pop_if_empty()
            .extend(self.path().split('/').filter(|segment| !segment.is_empty()));

        let params = self.params();
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(
                params
                    .iter()
                    .map(|param| (param.name.as_str(), param.value.as_str())),
            );
        }

        Ok(HttpRequest {
            method: self.method(),
            url,
        })
    }
}

pub type Completion<M> = Box<dyn FnOnce(Result<M>) + Send + 'static>;

/// An endpoint paired with the completion that receives its decoded result.
///
/// Consumed by [`ApiClient::send`](super::ApiClient::send); the completion runs at most once.
pub struct Request<M> {
    builder: Box<dyn RequestBuilder>,
    completion: Completion<M>,
}

impl<M> Request<M> {
    pub fn new<B, F>(builder: B, completion: F) -> Self
    where
        B: RequestBuilder + 'static,
        F: FnOnce(Result<M>) + Send + 'static,
    {
        Self {
            builder: Box::new(builder),
            completion: Box::new(completion),
        }
    }

    pub fn builder(&self) -> &dyn RequestBuilder {
        self.builder.as_ref()
    }

    pub(crate) fn into_parts(self) -> (Box<dyn RequestBuilder>, Completion<M>) {
        (self.builder, self.completion)
    }
}

impl<M> fmt::Debug for Request<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Request")
            .field("method", &self.builder.method())
            .field("base_url", &self.builder.base_url().as_str())
            .field("path", &self.builder.path())
            .finish_non_exhaustive()
    }
}
