use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("FLICKR_API_KEY is not set")]
    MissingApiKey,

    #[error("Invalid API key, it must be a non-empty string without whitespace")]
    InvalidApiKey,
}
