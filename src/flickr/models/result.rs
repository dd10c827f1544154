use serde::{Deserialize, Serialize};

use super::{DetailsPhoto, SearchPhoto};

/// One page of `flickr.photos.search`, unwrapped from `{"photos": {"photo": [...]}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SearchEnvelope", into = "SearchEnvelope")]
pub struct PhotoSearchResult {
    pub photos: Vec<SearchPhoto>,
}

#[derive(Serialize, Deserialize)]
struct SearchEnvelope {
    photos: PhotoPage,
}

#[derive(Serialize, Deserialize)]
struct PhotoPage {
    photo: Vec<SearchPhoto>,
}

impl From<SearchEnvelope> for PhotoSearchResult {
    fn from(envelope: SearchEnvelope) -> Self {
        Self {
            photos: envelope.photos.photo,
        }
    }
}

impl From<PhotoSearchResult> for SearchEnvelope {
    fn from(result: PhotoSearchResult) -> Self {
        Self {
            photos: PhotoPage {
                photo: result.photos,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoDetailResult {
    pub photo: DetailsPhoto,
}
