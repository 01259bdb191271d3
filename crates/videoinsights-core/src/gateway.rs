use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info, instrument, warn};

use crate::{
    config::{AppConfig, AuthHeader},
    error::GatewayError,
    request::ProviderRequest,
    types::Credential,
};

/// One round trip to a generative model; returns the answer text
#[async_trait]
pub trait ModelGateway: Send + Sync {
    async fn send(
        &self,
        request: &ProviderRequest,
        credential: Option<&Credential>,
    ) -> Result<String, GatewayError>;
}

/// Gemini `generateContent` over HTTPS
pub struct GeminiGateway {
    client: Client,
    endpoint: String,
    auth_header: AuthHeader,
}

impl GeminiGateway {
    pub fn new(config: &AppConfig) -> Result<Self, GatewayError> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            auth_header: config.auth_header,
        })
    }
}

#[async_trait]
impl ModelGateway for GeminiGateway {
    #[instrument(skip_all, fields(endpoint = %self.endpoint))]
    async fn send(
        &self,
        request: &ProviderRequest,
        credential: Option<&Credential>,
    ) -> Result<String, GatewayError> {
        let credential = credential.ok_or(GatewayError::Auth)?;

        let builder = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json");
        let builder = match self.auth_header {
            AuthHeader::Bearer => builder.bearer_auth(credential.expose()),
            AuthHeader::ApiKey => builder.header("x-goog-api-key", credential.expose()),
        };

        info!("Calling provider");
        let response = builder.json(request).send().await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            warn!(status = status.as_u16(), "Provider returned an error");
            return Err(GatewayError::Provider {
                status: status.as_u16(),
                body,
            });
        }

        let response: serde_json::Value =
            serde_json::from_str(&body).map_err(GatewayError::MalformedResponse)?;

        let text = response["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .ok_or(GatewayError::EmptyResponse)?;

        debug!(chars = text.len(), "Received provider answer");
        Ok(text.to_string())
    }
}
