use std::future::Future;

use bytes::Bytes;
use reqwest::Url;
use tokio::task::JoinHandle;
use tracing::warn;

use super::{Photo, PhotoSize};
use crate::network::{ApiClient, ApiError, HttpRequest, Result};

impl ApiClient {
    /// Downloads the image bytes of `photo` in the given size.
    pub fn fetch_image(
        &self,
        photo: &dyn Photo,
        size: PhotoSize,
    ) -> impl Future<Output = Result<Bytes>> + Send + '_ {
        // Resolved up front so the future does not borrow `photo`.
        let request = image_request(photo, size);

        async move { self.execute_http(&request?).await }
    }

    /// Background variant of [`fetch_image`](Self::fetch_image) for grids and detail
    /// views.
    ///
    /// The completion receives the id of the photo it was started for so the
    /// caller can check the result still belongs to what is on screen. Failures
    /// are logged and delivered as `None`.
    ///
    /// # Panics
    ///
    /// Must be called from within a Tokio runtime.
    pub fn send_image<F>(&self, photo: &dyn Photo, size: PhotoSize, completion: F) -> JoinHandle<()>
    where
        F: FnOnce(String, Option<Bytes>) + Send + 'static,
    {
        let id = photo.id().to_owned();
        let request = image_request(photo, size);
        let client = self.clone();

        tokio::spawn(async move {
            let image = match request {
                Ok(request) => client.execute_http(&request).await,
                Err(err) => Err(err),
            };

            let image = image
                .inspect_err(|err| warn!(photo = %id, %err, "image download failed"))
                .ok();

            client.deliver(move || completion(id, image));
        })
    }
}

fn image_request(photo: &dyn Photo, size: PhotoSize) -> Result<HttpRequest> {
    let url = photo.url_string(size);

    Url::parse(&url)
        .map(HttpRequest::get)
        .map_err(|err| ApiError::InvalidRequest(format!("{url}: {err}")))
}
