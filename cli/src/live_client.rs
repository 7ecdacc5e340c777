//! HTTP adapter for the game's local live client data endpoint.

use std::time::Duration;

use tracing::trace;
use warden_core::RawSnapshot;
use warden_core::ports::{GameDataPort, PortError};

pub struct LiveClient {
    http: reqwest::Client,
    url: String,
}

impl LiveClient {
    /// The endpoint serves a self-signed certificate, so certificate
    /// validation is disabled. Only point this at the local client.
    pub fn new(url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, String> {
        let mut builder = reqwest::Client::builder().danger_accept_invalid_certs(true);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|e| e.to_string())?;
        Ok(Self {
            http,
            url: url.into(),
        })
    }
}

impl GameDataPort for LiveClient {
    async fn game_data(&self) -> Result<Option<RawSnapshot>, PortError> {
        let response = match self.http.get(&self.url).send().await {
            Ok(response) => response,
            // Nothing listening: the game is not running.
            Err(e) if e.is_connect() => {
                trace!(error = %e, "Live client not reachable");
                return Ok(None);
            }
            Err(e) => return Err(PortError::Request(e.to_string())),
        };

        // The client answers 404 between matches and while loading.
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(PortError::Request(format!(
                "unexpected status {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| PortError::Request(e.to_string()))?;
        RawSnapshot::from_json(&body).map(Some)
    }
}
