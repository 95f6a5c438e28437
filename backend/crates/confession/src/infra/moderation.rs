//! HTTP moderation client

use reqwest::Client;
use serde::Serialize;

use crate::application::config::ModerationConfig;
use crate::domain::gateway::{ModerationClient, ModerationError, ModerationVerdict};

#[derive(Debug, Serialize)]
struct ModerationRequest<'a> {
    text: &'a str,
}

/// Moderation client speaking `POST {base}/v1/moderate`
#[derive(Debug, Clone)]
pub struct HttpModerationClient {
    client: Client,
    endpoint: Option<String>,
    api_key: Option<String>,
}

impl HttpModerationClient {
    pub fn new(config: &ModerationConfig) -> Result<Self, reqwest::Error> {
        let client = platform::http_client::build_client(config.timeout)?;
        Ok(Self {
            client,
            endpoint: config.endpoint(),
            api_key: config.api_key.clone().filter(|k| !k.trim().is_empty()),
        })
    }

    pub fn is_configured(&self) -> bool {
        self.endpoint.is_some()
    }
}

fn transport_error(e: reqwest::Error) -> ModerationError {
    if e.is_timeout() {
        ModerationError::Timeout
    } else if e.is_decode() {
        ModerationError::Malformed(e.to_string())
    } else {
        ModerationError::Transport(e.to_string())
    }
}

impl ModerationClient for HttpModerationClient {
    async fn check(&self, text: &str) -> Result<ModerationVerdict, ModerationError> {
        let endpoint = self
            .endpoint
            .as_deref()
            .ok_or(ModerationError::NotConfigured)?;

        let mut request = self.client.post(endpoint).json(&ModerationRequest { text });
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ModerationError::Status(status.as_u16()));
        }

        response
            .json::<ModerationVerdict>()
            .await
            .map_err(transport_error)
    }
}
