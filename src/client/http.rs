//! Sentiment API client
//!
//! Fetches the current snapshot from a sentiment endpoint and unwraps its
//! response envelope.

use crate::client::SentimentSource;
use crate::client::error::FetchError;
use crate::consts::cli_consts::polling::{CONNECT_TIMEOUT_SECS, REQUEST_TIMEOUT_SECS};
use crate::server::envelope::Envelope;
use crate::snapshot::SentimentSnapshot;
use reqwest::{Client, ClientBuilder, Response};
use std::time::Duration;

// User-Agent string with CLI version
const USER_AGENT: &str = concat!("velo-sentiment/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct SentimentClient {
    client: Client,
    url: String,
}

impl SentimentClient {
    pub fn new(url: impl Into<String>) -> Result<Self, FetchError> {
        let client = ClientBuilder::new()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    async fn handle_response_status(response: Response) -> Result<Response, FetchError> {
        if !response.status().is_success() {
            return Err(FetchError::from_response(response).await);
        }
        Ok(response)
    }

    fn decode_envelope(bytes: &[u8]) -> Result<SentimentSnapshot, FetchError> {
        let envelope: Envelope =
            serde_json::from_slice(bytes).map_err(|e| FetchError::InvalidEnvelope {
                message: e.to_string(),
            })?;
        envelope
            .into_snapshot()
            .map_err(|message| FetchError::InvalidEnvelope { message })
    }
}

#[async_trait::async_trait]
impl SentimentSource for SentimentClient {
    fn endpoint(&self) -> &str {
        &self.url
    }

    async fn fetch_snapshot(&self) -> Result<SentimentSnapshot, FetchError> {
        let response = self
            .client
            .get(&self.url)
            .header("Accept", "application/json")
            .send()
            .await?;

        let response = Self::handle_response_status(response).await?;
        let bytes = response.bytes().await?;
        Self::decode_envelope(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::ProviderConfig;
    use crate::server::SentimentServer;
    use crate::snapshot::fixtures::momentum_long;
    use std::net::SocketAddr;
    use tempfile::tempdir;
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    /// Serve `config` on an ephemeral port; dropping the sender stops the server.
    async fn spawn_server(config: ProviderConfig) -> (SocketAddr, oneshot::Sender<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel::<()>();
        let server = SentimentServer::new(config.into());
        tokio::spawn(async move {
            let _ = server
                .serve(listener, async move {
                    let _ = rx.await;
                })
                .await;
        });
        (addr, tx)
    }

    #[tokio::test]
    async fn test_fetch_from_live_server() {
        let (addr, _stop) = spawn_server(ProviderConfig::Mock).await;
        let client = SentimentClient::new(format!("http://{}/api/sentiment", addr)).unwrap();

        let snapshot = client.fetch_snapshot().await.unwrap();
        assert_eq!(snapshot.quadrant, "Momentum Long Only");
        assert_eq!(snapshot.data.len(), 8);
    }

    #[tokio::test]
    async fn test_fetch_static_file_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.json");
        momentum_long().save(&path).unwrap();

        let (addr, _stop) = spawn_server(ProviderConfig::StaticFile { path }).await;
        let client = SentimentClient::new(format!("http://{}/sentiment", addr)).unwrap();

        assert_eq!(client.fetch_snapshot().await.unwrap(), momentum_long());
    }

    #[tokio::test]
    async fn test_server_failure_is_http_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.json");

        let (addr, _stop) = spawn_server(ProviderConfig::StaticFile { path }).await;
        let client = SentimentClient::new(format!("http://{}/api/sentiment", addr)).unwrap();

        match client.fetch_snapshot().await {
            Err(FetchError::Http { status, message }) => {
                assert_eq!(status, 500);
                assert!(message.contains("Failed to retrieve sentiment data"));
            }
            other => panic!("expected HTTP error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unknown_route_is_http_error() {
        let (addr, _stop) = spawn_server(ProviderConfig::Mock).await;
        let client = SentimentClient::new(format!("http://{}/nope", addr)).unwrap();

        assert!(matches!(
            client.fetch_snapshot().await,
            Err(FetchError::Http { status: 404, .. })
        ));
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        // Bind then drop to get a port nobody is listening on.
        let addr = {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            listener.local_addr().unwrap()
        };
        let client = SentimentClient::new(format!("http://{}/api/sentiment", addr)).unwrap();

        assert!(matches!(
            client.fetch_snapshot().await,
            Err(FetchError::Network(_))
        ));
    }

    #[test]
    fn test_decode_rejects_unsuccessful_envelope() {
        let body = br#"{"success": false, "message": "upstream down"}"#;
        match SentimentClient::decode_envelope(body) {
            Err(FetchError::InvalidEnvelope { message }) => assert_eq!(message, "upstream down"),
            other => panic!("unexpected: {:?}", other),
        }

        assert!(matches!(
            SentimentClient::decode_envelope(b"<html>"),
            Err(FetchError::InvalidEnvelope { .. })
        ));
    }

    #[test]
    fn test_endpoint_is_reported() {
        let client = SentimentClient::new("http://localhost:3000/api/sentiment").unwrap();
        assert_eq!(client.endpoint(), "http://localhost:3000/api/sentiment");
    }
}
