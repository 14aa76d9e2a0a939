//! HTTP oracle transport.
//!
//! Every endpoint answers a JSON object whose `result` field is
//! `"success"` when the call worked.

use super::request::{MoveRequest, OracleMove};
use super::transport::{OracleTransport, TransportError};
use crate::turn::AgentId;
use reqwest::Url;
use serde_json::Value;
use tracing::{debug, error, info, instrument};

/// Talks to an oracle over plain `GET` requests.
#[derive(Debug, Clone)]
pub struct HttpOracle {
    base_url: Url,
    client: reqwest::Client,
}

impl HttpOracle {
    /// Creates a transport rooted at `base_url` (for example
    /// `http://localhost:5001`).
    #[instrument]
    pub fn new(base_url: &str) -> Result<Self, TransportError> {
        let trimmed = base_url.trim();
        let rooted = if trimmed.ends_with('/') {
            trimmed.to_string()
        } else {
            format!("{}/", trimmed)
        };
        let base_url = Url::parse(&rooted)
            .map_err(|e| TransportError::InvalidEndpoint(format!("{}: {}", base_url, e)))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(TransportError::InvalidEndpoint(format!(
                "{}: scheme must be http or https",
                base_url
            )));
        }

        info!(base_url = %base_url, "Creating HTTP oracle client");
        Ok(Self {
            base_url,
            client: reqwest::Client::new(),
        })
    }

    /// Root URL every endpoint is resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Health check. Returns the oracle's message.
    #[instrument(skip(self))]
    pub async fn ping(&self) -> Result<String, TransportError> {
        let body = self.get("ping", &[]).await?;
        Ok(body
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string())
    }

    /// Issues one `GET` and checks the `result` envelope.
    async fn get(&self, endpoint: &str, params: &[(&str, String)]) -> Result<Value, TransportError> {
        let mut url = self
            .base_url
            .join(endpoint)
            .map_err(|e| TransportError::InvalidEndpoint(e.to_string()))?;
        if !params.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(params.iter().map(|(k, v)| (*k, v.as_str())));
        }
        debug!(url = %url, "Sending oracle request");

        let response = self.client.get(url).send().await.map_err(|e| {
            error!(endpoint, error = %e, "Oracle unreachable");
            TransportError::Unreachable(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .map_err(|e| TransportError::Unreachable(e.to_string()))?;
            debug!(endpoint, status = status.as_u16(), body = %body, "Oracle error response");
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: Value = response.json().await.map_err(|e| {
            if e.is_decode() {
                TransportError::Malformed(e.to_string())
            } else {
                TransportError::Unreachable(e.to_string())
            }
        })?;
        debug!(endpoint, %body, "Oracle response");
        match body.get("result").and_then(Value::as_str) {
            Some("success") => Ok(body),
            Some(other) => {
                let reason = body
                    .get("message")
                    .or_else(|| body.get("error"))
                    .and_then(Value::as_str)
                    .unwrap_or(other);
                Err(TransportError::Rejected(reason.to_string()))
            }
            None => Err(TransportError::Malformed(
                "missing `result` field".to_string(),
            )),
        }
    }
}

#[async_trait::async_trait]
impl OracleTransport for HttpOracle {
    #[instrument(skip(self))]
    async fn list_agents(&self) -> Result<Vec<AgentId>, TransportError> {
        let body = self.get("ai_players", &[]).await?;
        let players = body
            .get("players")
            .cloned()
            .ok_or_else(|| TransportError::Malformed("missing `players` field".to_string()))?;
        serde_json::from_value(players).map_err(|e| TransportError::Malformed(e.to_string()))
    }

    #[instrument(skip(self, request), fields(agent = %request.agent(), seat = request.seat()))]
    async fn choose_move(&self, request: &MoveRequest) -> Result<OracleMove, TransportError> {
        let params = [
            ("board", request.board().clone()),
            ("player", request.agent().to_string()),
            ("turn", request.seat().to_string()),
            ("max_time_ms", request.limits().max_time_ms.to_string()),
            ("max_depth", request.limits().max_depth.to_string()),
        ];
        let body = self.get("ai_move", &params).await?;

        let column = body
            .get("col")
            .and_then(column_of)
            .ok_or_else(|| TransportError::Malformed("missing integer `col` field".to_string()))?;
        let info = body.get("info").cloned();
        Ok(OracleMove::new(column, info))
    }
}

/// Reads an integer column. Values past `i64::MAX` saturate so they
/// still reach the board as an out-of-range column.
fn column_of(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_u64().map(|n| i64::try_from(n).unwrap_or(i64::MAX)))
}
