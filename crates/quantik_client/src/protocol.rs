//! Remote move protocol: typed requests to the engine and fault mapping.

use crate::config::ClientConfig;
use crate::error::{ConfigError, Fault, MALFORMED_RESPONSE};
use crate::types::{AnalysisEntry, Move, PredictionEntry, TurnResult};
use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};

/// Path of the human move endpoint.
pub const HUMAN_MOVE_PATH: &str = "";
/// Path of the automated turn endpoint.
pub const BOT_PATH: &str = "bot";
/// Path of the analysis endpoint.
pub const ANALYSIS_PATH: &str = "analysis";
/// Path of the prediction endpoint.
pub const PREDICTION_PATH: &str = "prediction";
/// Path of the new game endpoint.
pub const NEW_GAME_PATH: &str = "new_game";

/// Operations offered by the remote rules/search engine.
///
/// Every call is one request/response exchange. Failures are handed back as
/// [`Fault`]s; nothing is retried.
#[async_trait]
pub trait MoveService: Send + Sync {
    /// Submits the player's move; the engine validates and applies it.
    async fn submit_human_move(&self, candidate: Move) -> Result<TurnResult, Fault>;

    /// Asks the engine to play the automated side.
    async fn request_automated_turn(&self) -> Result<TurnResult, Fault>;

    /// Ranks candidate moves for the current position, best first.
    async fn request_analysis(&self, depth: u32) -> Result<Vec<AnalysisEntry>, Fault>;

    /// Forecasts the remainder of the game.
    async fn request_prediction(&self) -> Result<Vec<PredictionEntry>, Fault>;

    /// Asks the engine to discard the current game and start a new one.
    async fn start_new_game(&self) -> Result<(), Fault>;
}

/// Body of a non-success response.
#[derive(Debug, Deserialize)]
struct FaultBody {
    text: String,
}

/// [`MoveService`] speaking JSON over HTTP.
#[derive(Debug, Clone)]
pub struct HttpMoveService {
    base_url: String,
    client: reqwest::Client,
}

impl HttpMoveService {
    /// Creates a client for the configured server.
    #[instrument(skip(config), fields(server_url = %config.server_url()))]
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout() {
            debug!(?timeout, "Applying request timeout");
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build HTTP client: {}", e)))?;

        info!("Created engine client");
        Ok(Self {
            base_url: config.server_url().trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Base URL without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Posts `body` and returns the status and raw response body.
    async fn exchange(
        &self,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<(reqwest::StatusCode, Vec<u8>), Fault> {
        let url = self.endpoint(path);
        debug!(url = %url, body = ?body, "Sending request");

        let mut request = self
            .client
            .post(&url)
            .header("Content-Type", "application/json");
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await.map_err(|e| {
            warn!(error = %e, url = %url, "Request failed without a response");
            Fault::unreachable()
        })?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(|e| {
            warn!(error = %e, url = %url, "Failed to read response body");
            Fault::unreachable()
        })?;
        debug!(status = %status, len = bytes.len(), "Got response");

        if !status.is_success() {
            return Err(protocol_fault(status, &bytes));
        }
        Ok((status, bytes.to_vec()))
    }

    async fn call<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<T, Fault> {
        let (status, bytes) = self.exchange(path, body).await?;
        serde_json::from_slice(&bytes).map_err(|e| {
            warn!(error = %e, path, "Failed to decode response");
            Fault::Protocol {
                message: MALFORMED_RESPONSE.to_string(),
                status: status.as_u16(),
            }
        })
    }
}

/// Builds the fault for a non-success response from its `text` field.
fn protocol_fault(status: reqwest::StatusCode, body: &[u8]) -> Fault {
    let message = match serde_json::from_slice::<FaultBody>(body) {
        Ok(FaultBody { text }) => text,
        Err(_) => format!("Server error (HTTP {})", status.as_u16()),
    };
    warn!(status = %status, message = %message, "Engine rejected request");
    Fault::Protocol {
        message,
        status: status.as_u16(),
    }
}

#[async_trait]
impl MoveService for HttpMoveService {
    #[instrument(skip(self), fields(x = candidate.x, y = candidate.y, pawn = %candidate.pawn))]
    async fn submit_human_move(&self, candidate: Move) -> Result<TurnResult, Fault> {
        info!("Submitting human move");
        let body = serde_json::to_value(candidate).map_err(|e| Fault::Validation {
            message: format!("Cannot encode move: {}", e),
        })?;
        self.call(HUMAN_MOVE_PATH, Some(body)).await
    }

    #[instrument(skip(self))]
    async fn request_automated_turn(&self) -> Result<TurnResult, Fault> {
        info!("Requesting automated turn");
        self.call(BOT_PATH, None).await
    }

    #[instrument(skip(self))]
    async fn request_analysis(&self, depth: u32) -> Result<Vec<AnalysisEntry>, Fault> {
        info!("Requesting analysis");
        self.call(ANALYSIS_PATH, Some(serde_json::json!({ "depth": depth })))
            .await
    }

    #[instrument(skip(self))]
    async fn request_prediction(&self) -> Result<Vec<PredictionEntry>, Fault> {
        info!("Requesting prediction");
        self.call(PREDICTION_PATH, None).await
    }

    #[instrument(skip(self))]
    async fn start_new_game(&self) -> Result<(), Fault> {
        info!("Requesting new game");
        self.exchange(NEW_GAME_PATH, None).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fault_message_from_text_field() {
        let fault = protocol_fault(
            reqwest::StatusCode::BAD_REQUEST,
            br#"{"text": "already a pawn there"}"#,
        );
        assert_eq!(fault.message(), "already a pawn there");
        assert!(matches!(fault, Fault::Protocol { status: 400, .. }));
    }

    #[test]
    fn test_fault_message_without_text_field() {
        let fault = protocol_fault(reqwest::StatusCode::INTERNAL_SERVER_ERROR, b"<html>");
        assert_eq!(fault.message(), "Server error (HTTP 500)");
    }

    #[test]
    fn test_endpoint_joins_base_url() {
        let config = ClientConfig::default().with_server_url("http://localhost:5000/");
        let service = HttpMoveService::new(&config).expect("client builds");
        assert_eq!(service.endpoint(HUMAN_MOVE_PATH), "http://localhost:5000/");
        assert_eq!(service.endpoint(BOT_PATH), "http://localhost:5000/bot");
    }
}
