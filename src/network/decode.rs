use bytes::Bytes;
use serde::de::DeserializeOwned;
use tokio::task;
use tracing::warn;

use super::{ApiError, Result};

/// Turns a raw response into `M`.
///
/// Failures pass through untouched. Parsing runs on the blocking pool so large
/// payloads do not stall the async workers.
pub async fn decode<M>(result: Result<Bytes>) -> Result<M>
where
    M: DeserializeOwned + Send + 'static,
{
    let data = result?;

    match task::spawn_blocking(move || serde_json::from_slice::<M>(&data)).await {
        Ok(Ok(model)) => Ok(model),
        Ok(Err(err)) => {
            warn!(%err, "failed to decode response");
            Err(ApiError::from_json(err))
        }
        Err(err) => {
            warn!(%err, "decode task did not complete");
            Err(ApiError::Unhandled)
        }
    }
}
