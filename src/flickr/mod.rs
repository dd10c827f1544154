//! Flickr REST endpoints and the models they decode into.
use std::{env, fmt, sync::LazyLock};

use reqwest::Url;

use crate::network::{
    HttpMethod, QueryParam, Request, RequestBuilder, Result, query_params, static_url,
};

pub mod error;
mod image;
pub mod models;

pub use error::ConfigError;
pub use models::{
    DetailsPhoto, Owner, Photo, PhotoDetailResult, PhotoSearchResult, PhotoSize, SearchPhoto,
    UnknownSize,
};

pub const API_KEY_VAR: &str = "FLICKR_API_KEY";

/// Results per search page.
pub const PAGE_SIZE: u32 = 25;

const REST_PATH: &str = "services/rest";

static BASE_URL: LazyLock<Url> = LazyLock::new(|| static_url("https://www.flickr.com/"));

/// Credentials and endpoint for the Flickr API.
#[derive(Clone, PartialEq, Eq)]
pub struct Flickr {
    api_key: String,
    base_url: Url,
}

impl Flickr {
    pub fn new<T: AsRef<str>>(api_key: T) -> std::result::Result<Self, ConfigError> {
        let api_key = api_key.as_ref();
        if api_key.is_empty() || api_key.chars().any(char::is_whitespace) {
            return Err(ConfigError::InvalidApiKey);
        }

        Ok(Self {
            api_key: api_key.to_owned(),
            base_url: BASE_URL.clone(),
        })
    }

    /// Reads the key from `FLICKR_API_KEY`.
    pub fn from_env() -> std::result::Result<Self, ConfigError> {
        let api_key = env::var(API_KEY_VAR).map_err(|_| ConfigError::MissingApiKey)?;

        Self::new(api_key.trim())
    }

    /// Points requests somewhere other than `https://www.flickr.com/`.
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds a call to `services/rest`; the fixed params come first.
    pub fn request(&self, params: Vec<QueryParam>) -> FlickrRequestBuilder {
        let mut combined = query_params!(
            "api_key" => self.api_key,
            "format" => "json",
            "nojsoncallback" => 1,
        );
        combined.extend(params);

        FlickrRequestBuilder {
            base_url: self.base_url.clone(),
            params: combined,
        }
    }

    pub fn search_photos(&self, term: &str) -> FlickrRequestBuilder {
        self.request(query_params!(
            "method" => "flickr.photos.search",
            "text" => term,
            "per_page" => PAGE_SIZE,
        ))
    }

    pub fn get_photo_details(&self, photo_id: &str, secret: &str) -> FlickrRequestBuilder {
        self.request(query_params!(
            "method" => "flickr.photos.getInfo",
            "photo_id" => photo_id,
            "secret" => secret,
        ))
    }
}

impl fmt::Debug for Flickr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Flickr")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

/// Every Flickr call is a GET to the same path; only the params differ.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlickrRequestBuilder {
    base_url: Url,
    params: Vec<QueryParam>,
}

impl RequestBuilder for FlickrRequestBuilder {
    fn method(&self) -> HttpMethod {
        HttpMethod::Get
    }

    fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn path(&self) -> &str {
        REST_PATH
    }

    fn params(&self) -> &[QueryParam] {
        &self.params
    }
}

impl Request<PhotoSearchResult> {
    pub fn search_photos<F>(flickr: &Flickr, term: &str, completion: F) -> Self
    where
        F: FnOnce(Result<PhotoSearchResult>) + Send + 'static,
    {
        Request::new(flickr.search_photos(term), completion)
    }
}

impl Request<PhotoDetailResult> {
    pub fn get_photo_details<F>(flickr: &Flickr, photo_id: &str, secret: &str, completion: F) -> Self
    where
        F: FnOnce(Result<PhotoDetailResult>) + Send + 'static,
    {
        Request::new(flickr.get_photo_details(photo_id, secret), completion)
    }
}
