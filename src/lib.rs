//! Search the Flickr public API for photos.
//!
//! ```no_run
//! use findr::{ApiClient, ClientSettings, Flickr, Photo, PhotoSearchResult, PhotoSize, callback_context};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let flickr = Flickr::from_env()?;
//! let (callbacks, _queue) = callback_context();
//! let client = ApiClient::with_settings(&ClientSettings::default(), callbacks)?;
//!
//! let result: PhotoSearchResult = client.fetch(&flickr.search_photos("red sox")).await?;
//! for photo in &result.photos {
//!     println!("{} {}", photo.title(), photo.url_string(PhotoSize::Thumbnail));
//! }
//! # Ok(())
//! # }
//! ```

pub mod flickr;
pub mod network;

pub use flickr::{
    ConfigError, DetailsPhoto, Flickr, FlickrRequestBuilder, Photo, PhotoDetailResult,
    PhotoSearchResult, PhotoSize, SearchPhoto,
};
pub use network::{
    ApiClient, ApiError, CallbackContext, CallbackQueue, ClientSettings, HttpMethod, QueryParam,
    Request, RequestBuilder, Result, callback_context,
};
