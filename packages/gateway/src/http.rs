use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use pagecraft_editor::{Endpoint, GatewayError, LoadOutcome, PersistenceGateway};
use pagecraft_model::Document;
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::credentials::{CredentialProvider, NoCredentials};

/// Location of the content service
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub base_url: String,
    /// Path prefix for pages addressed by stable identifier
    pub stable_path: String,
    /// Path prefix for pages addressed by legacy identifier
    pub legacy_path: String,
    pub timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            stable_path: "api/landing-pages".to_string(),
            legacy_path: "api/stores/landing-page".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Body sent with a save
#[derive(Serialize)]
struct SaveRequest<'a> {
    data: &'a Document,
}

/// Body returned by a save
#[derive(Deserialize)]
struct SaveResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    message: Option<String>,
}

/// Gateway talking to the content service over HTTP
#[derive(Clone)]
pub struct HttpGateway {
    client: Client,
    config: GatewayConfig,
    credentials: Arc<dyn CredentialProvider>,
}

impl HttpGateway {
    /// Creates a gateway that sends no credentials
    pub fn new(config: GatewayConfig) -> Self {
        Self::with_credentials(config, Arc::new(NoCredentials))
    }

    pub fn with_credentials(config: GatewayConfig, credentials: Arc<dyn CredentialProvider>) -> Self {
        Self {
            client: Client::new(),
            config,
            credentials,
        }
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Full URL for a page at one endpoint; the id is percent-encoded
    pub fn page_url(&self, endpoint: Endpoint, id: &str) -> Result<Url, GatewayError> {
        let prefix = match endpoint {
            Endpoint::Stable => &self.config.stable_path,
            Endpoint::Legacy => &self.config.legacy_path,
        };

        let mut url = Url::parse(&self.config.base_url)
            .map_err(|e| GatewayError::Transport(format!("Invalid base URL {}: {}", self.config.base_url, e)))?;

        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                GatewayError::Transport(format!("Base URL cannot take a path: {}", self.config.base_url))
            })?;
            segments.pop_if_empty();
            segments.extend(prefix.split('/').filter(|part| !part.is_empty()));
            segments.push(id);
        }

        Ok(url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.credentials.bearer_token() {
            Some(token) => request.header("Authorization", format!("Bearer {}", token)),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, GatewayError> {
        self.authorize(request)
            .timeout(self.config.timeout)
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))
    }
}

#[async_trait]
impl PersistenceGateway for HttpGateway {
    async fn load_from(&self, endpoint: Endpoint, id: &str) -> Result<LoadOutcome, GatewayError> {
        let url = self.page_url(endpoint, id)?;
        debug!(%endpoint, %url, "Fetching page");

        let response = self.send(self.client.get(url)).await?;
        let status = response.status();

        if is_auth_status(status) {
            return Ok(LoadOutcome::AuthPending);
        }
        if status == StatusCode::NOT_FOUND {
            return Err(GatewayError::NotFound);
        }

        let body = response
            .text()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(GatewayError::Status {
                code: status.as_u16(),
                body,
            });
        }

        decode_document(&body).map(LoadOutcome::Loaded)
    }

    async fn save_to(&self, endpoint: Endpoint, id: &str, document: &Document) -> Result<(), GatewayError> {
        let url = self.page_url(endpoint, id)?;
        debug!(%endpoint, %url, "Saving page");

        let request = self.client.post(url).json(&SaveRequest { data: document });
        let response = self.send(request).await?;
        let status = response.status();

        if is_auth_status(status) {
            return Err(GatewayError::Unauthorized);
        }
        if status == StatusCode::NOT_FOUND {
            return Err(GatewayError::NotFound);
        }

        let body = response
            .text()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(GatewayError::Status {
                code: status.as_u16(),
                body,
            });
        }

        let parsed: SaveResponse =
            serde_json::from_str(&body).map_err(|e| GatewayError::Decode(e.to_string()))?;

        if parsed.success {
            Ok(())
        } else {
            Err(GatewayError::Rejected(parsed.message.unwrap_or(body)))
        }
    }
}

fn is_auth_status(status: StatusCode) -> bool {
    status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN
}

/// Accepts `{ "data": { ... } }` or the document object itself
fn decode_document(body: &str) -> Result<Document, GatewayError> {
    let value: Value = serde_json::from_str(body).map_err(|e| GatewayError::Decode(e.to_string()))?;

    let document = match value {
        Value::Object(mut fields) if fields.contains_key("data") => match fields.remove("data") {
            Some(Value::Null) | None => return Err(GatewayError::NotFound),
            Some(data) => data,
        },
        Value::Object(fields) => Value::Object(fields),
        other => {
            return Err(GatewayError::Decode(format!(
                "Expected a JSON object, got {}",
                other
            )))
        }
    };

    serde_json::from_value(document).map_err(|e| GatewayError::Decode(e.to_string()))
}
