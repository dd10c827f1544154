mod photo;
mod result;

pub use photo::{DetailsPhoto, Owner, Photo, PhotoSize, SearchPhoto, UnknownSize};
pub use result::{PhotoDetailResult, PhotoSearchResult};
