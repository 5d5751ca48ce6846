use crate::client::error::FetchError;
use crate::snapshot::SentimentSnapshot;

pub(crate) mod http;
pub use http::SentimentClient;
pub mod error;

#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait SentimentSource: Send + Sync {
    /// Where snapshots are fetched from, for display.
    fn endpoint(&self) -> &str;

    /// Fetch the current snapshot, unwrapping the response envelope.
    async fn fetch_snapshot(&self) -> Result<SentimentSnapshot, FetchError>;
}
