use async_trait::async_trait;
use once_cell::sync::OnceCell;
use serde::Deserialize;

use crate::shared::config::PushConfig;

/// Gateways accept at most this many tokens per request
pub const BATCH_SIZE: usize = 500;

/// Per-token result returned by the gateway
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResult {
    pub token: String,
    pub ok: bool,
    /// Token is gone on the device side (unregistered/not found); the
    /// registry entry should be pruned.
    #[serde(rename = "invalidToken", default)]
    pub invalid_token: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BatchResult {
    pub results: Vec<TokenResult>,
}

/// Outbound push dispatch. A trait seam so dispatch logic can run against
/// a stub gateway in tests.
#[async_trait]
pub trait PushGateway: Send + Sync {
    async fn send_batch(
        &self,
        tokens: &[String],
        title: &str,
        body: &str,
        data: &serde_json::Map<String, serde_json::Value>,
    ) -> anyhow::Result<BatchResult>;
}

/// HTTP implementation talking to the configured push gateway
pub struct HttpPushGateway {
    base_url: String,
    server_key: String,
    http: reqwest::Client,
}

static GATEWAY: OnceCell<HttpPushGateway> = OnceCell::new();

pub fn init(config: &PushConfig) {
    let _ = GATEWAY.set(HttpPushGateway::new(config));
}

pub fn gateway() -> &'static HttpPushGateway {
    GATEWAY.get().expect("Push gateway has not been initialized")
}

impl HttpPushGateway {
    pub fn new(config: &PushConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            server_key: config.server_key.clone(),
            http,
        }
    }
}

#[async_trait]
impl PushGateway for HttpPushGateway {
    async fn send_batch(
        &self,
        tokens: &[String],
        title: &str,
        body: &str,
        data: &serde_json::Map<String, serde_json::Value>,
    ) -> anyhow::Result<BatchResult> {
        let url = format!("{}/send", self.base_url);
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.server_key)
            .json(&serde_json::json!({
                "tokens": tokens,
                "notification": { "title": title, "body": body },
                "data": data,
                "priority": "high",
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            anyhow::bail!("Push dispatch failed with status {}", response.status());
        }

        Ok(response.json().await?)
    }
}

/// Outcome of a full multicast run across all batches
#[derive(Debug, Default)]
pub struct MulticastOutcome {
    pub success_count: usize,
    pub failure_count: usize,
    /// Tokens the gateway reported as permanently invalid
    pub invalid_tokens: Vec<String>,
}

/// Split a token list into gateway-sized batches
pub fn chunk_tokens(tokens: &[String]) -> impl Iterator<Item = &[String]> {
    tokens.chunks(BATCH_SIZE)
}

/// Send a notification to every token, batch by batch, collecting
/// per-token outcomes. A failed batch counts all its tokens as failures
/// but does not abort the remaining batches.
pub async fn send_multicast(
    gateway: &dyn PushGateway,
    tokens: &[String],
    title: &str,
    body: &str,
    data: &serde_json::Map<String, serde_json::Value>,
) -> MulticastOutcome {
    let mut outcome = MulticastOutcome::default();

    for chunk in chunk_tokens(tokens) {
        match gateway.send_batch(chunk, title, body, data).await {
            Ok(batch) => {
                for result in batch.results {
                    if result.ok {
                        outcome.success_count += 1;
                    } else {
                        outcome.failure_count += 1;
                        if result.invalid_token {
                            outcome.invalid_tokens.push(result.token);
                        }
                    }
                }
            }
            Err(e) => {
                tracing::warn!("Push batch of {} tokens failed: {}", chunk.len(), e);
                outcome.failure_count += chunk.len();
            }
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunking_respects_gateway_limit() {
        let tokens: Vec<String> = (0..1201).map(|i| format!("tok-{}", i)).collect();
        let chunks: Vec<&[String]> = chunk_tokens(&tokens).collect();
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].len(), 500);
        assert_eq!(chunks[2].len(), 201);
    }

    #[test]
    fn empty_token_list_yields_no_chunks() {
        let tokens: Vec<String> = Vec::new();
        assert_eq!(chunk_tokens(&tokens).count(), 0);
    }
}
