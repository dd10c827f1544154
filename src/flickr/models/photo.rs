use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Image sizes served by the static photo host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhotoSize {
    Thumbnail,
    Small,
    #[default]
    Medium,
    Large,
}

impl PhotoSize {
    pub const ALL: [PhotoSize; 4] = [
        PhotoSize::Thumbnail,
        PhotoSize::Small,
        PhotoSize::Medium,
        PhotoSize::Large,
    ];

    /// Suffix used in the image file name.
    pub fn code(self) -> &'static str {
        match self {
            PhotoSize::Thumbnail => "q",
            PhotoSize::Small => "w",
            PhotoSize::Medium => "c",
            PhotoSize::Large => "b",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PhotoSize::Thumbnail => "thumbnail",
            PhotoSize::Small => "small",
            PhotoSize::Medium => "medium",
            PhotoSize::Large => "large",
        }
    }
}

impl fmt::Display for PhotoSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error)]
#[error("unknown photo size {0:?}, expected one of thumbnail, small, medium, large")]
pub struct UnknownSize(String);

impl FromStr for PhotoSize {
    type Err = UnknownSize;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PhotoSize::ALL
            .into_iter()
            .find(|size| size.name().eq_ignore_ascii_case(s) || size.code() == s)
            .ok_or_else(|| UnknownSize(s.to_owned()))
    }
}

/// What every photo record carries, regardless of the endpoint it came from.
pub trait Photo {
    fn id(&self) -> &str;

    fn secret(&self) -> &str;

    fn server(&self) -> &str;

    fn title(&self) -> &str;

    /// Location of the image in the given size.
    fn url_string(&self, size: PhotoSize) -> String {
        // Values come straight from the API and are used as is.
        format!(
            "https://live.staticflickr.com/{}/{}_{}_{}.jpg",
            self.server(),
            self.id(),
            self.secret(),
            size.code()
        )
    }
}

/// Item of a search result page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchPhoto {
    id: String,
    secret: String,
    server: String,
    title: String,
}

impl SearchPhoto {
    pub fn new<S: Into<String>>(id: S, secret: S, server: S, title: S) -> Self {
        Self {
            id: id.into(),
            secret: secret.into(),
            server: server.into(),
            title: title.into(),
        }
    }
}

impl Photo for SearchPhoto {
    fn id(&self) -> &str {
        &self.id
    }

    fn secret(&self) -> &str {
        &self.secret
    }

    fn server(&self) -> &str {
        &self.server
    }

    fn title(&self) -> &str {
        &self.title
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub username: String,
    #[serde(default)]
    pub realname: String,
}

/// Photo as returned by `flickr.photos.getInfo`.
///
/// Text fields arrive wrapped as `{"_content": "..."}`. They are unwrapped here
/// and wrapped again on serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailsPhoto {
    id: String,
    secret: String,
    server: String,
    #[serde(serialize_with = "wrap_content", deserialize_with = "unwrap_content")]
    title: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "wrap_optional_content",
        deserialize_with = "unwrap_optional_content"
    )]
    description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    owner: Option<Owner>,
}

impl DetailsPhoto {
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref().filter(|text| !text.is_empty())
    }

    pub fn owner(&self) -> Option<&Owner> {
        self.owner.as_ref()
    }
}

impl Photo for DetailsPhoto {
    fn id(&self) -> &str {
        &self.id
    }

    fn secret(&self) -> &str {
        &self.secret
    }

    fn server(&self) -> &str {
        &self.server
    }

    fn title(&self) -> &str {
        &self.title
    }
}

#[derive(Serialize, Deserialize)]
struct Content<T> {
    #[serde(rename = "_content")]
    content: T,
}

fn wrap_content<S>(text: &str, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    Content { content: text }.serialize(serializer)
}

fn wrap_optional_content<S>(text: &Option<String>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    text.as_deref()
        .map(|content| Content { content })
        .serialize(serializer)
}

fn unwrap_content<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Content::<String>::deserialize(deserializer).map(|wrapper| wrapper.content)
}

fn unwrap_optional_content<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Content<String>>::deserialize(deserializer).map(|wrapper| wrapper.map(|w| w.content))
}
