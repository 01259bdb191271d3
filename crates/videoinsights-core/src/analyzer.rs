//! The one place that decides between a live answer and the fallback record.

use tracing::{Instrument, info, info_span, warn};
use uuid::Uuid;

use crate::{
    config::{AppConfig, GatewayErrorPolicy},
    error::{GatewayError, Result},
    extract::extract,
    fallback::synthesize,
    gateway::{GeminiGateway, ModelGateway},
    request::build_request,
    types::{AnalysisRequest, VideoInsight},
};

#[derive(Debug)]
pub struct Analysis {
    pub insight: VideoInsight,
    pub outcome: Outcome,
}

#[derive(Debug)]
pub enum Outcome {
    /// Extracted from a live provider answer
    Complete,
    /// Canned record substituted
    Degraded(DegradeReason),
}

#[derive(Debug)]
pub enum DegradeReason {
    MissingCredential,
    Gateway(GatewayError),
    /// The answer produced no title at all
    Unparseable,
}

impl DegradeReason {
    /// Message suitable for showing to the user
    pub fn notice(&self) -> String {
        match self {
            DegradeReason::MissingCredential => {
                "No API key configured, showing sample results".to_string()
            }
            DegradeReason::Gateway(GatewayError::Auth) => {
                "No API key reached the AI service, showing sample results".to_string()
            }
            DegradeReason::Gateway(GatewayError::Transport { timed_out: true, .. }) => {
                "The AI service did not answer in time, showing sample results".to_string()
            }
            DegradeReason::Gateway(GatewayError::Transport { .. }) => {
                "Could not connect to the AI service, showing sample results".to_string()
            }
            DegradeReason::Gateway(GatewayError::Provider { status, .. }) => format!(
                "The AI service returned an error ({}), showing sample results",
                status
            ),
            DegradeReason::Gateway(
                GatewayError::EmptyResponse | GatewayError::MalformedResponse(_),
            ) => "The AI service returned no usable answer, showing sample results".to_string(),
            DegradeReason::Unparseable => {
                "The AI answer could not be understood, showing sample results".to_string()
            }
        }
    }
}

impl Analysis {
    pub fn is_degraded(&self) -> bool {
        matches!(self.outcome, Outcome::Degraded(_))
    }

    fn degraded(language: &str, reason: DegradeReason) -> Self {
        warn!(notice = %reason.notice(), "Falling back to sample results");
        Self {
            insight: synthesize(language),
            outcome: Outcome::Degraded(reason),
        }
    }
}

pub struct VideoAnalyzer {
    gateway: Box<dyn ModelGateway>,
    policy: GatewayErrorPolicy,
}

impl VideoAnalyzer {
    pub fn new(gateway: Box<dyn ModelGateway>, policy: GatewayErrorPolicy) -> Self {
        Self { gateway, policy }
    }

    /// Analyzer talking to Gemini with the settings from `config`
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let gateway = GeminiGateway::new(config)?;
        Ok(Self::new(Box::new(gateway), config.on_gateway_error))
    }

    /// Run the whole pipeline for one request.
    ///
    /// Bad media references are returned as errors before any network call.
    /// Provider failures degrade to the canned record unless the policy is
    /// [`GatewayErrorPolicy::Propagate`].
    pub async fn analyze(&self, request: AnalysisRequest) -> Result<Analysis> {
        let span = info_span!(
            "analyze",
            request_id = %Uuid::new_v4(),
            media = request.media.kind(),
            language = %request.language,
        );
        self.run(request).instrument(span).await
    }

    async fn run(&self, request: AnalysisRequest) -> Result<Analysis> {
        let provider_request = build_request(&request.media, &request.language)?;

        let Some(credential) = request.credential.as_ref() else {
            return Ok(Analysis::degraded(
                &request.language,
                DegradeReason::MissingCredential,
            ));
        };

        let text = match self.gateway.send(&provider_request, Some(credential)).await {
            Ok(text) => text,
            Err(err) => {
                return match self.policy {
                    GatewayErrorPolicy::Degrade => Ok(Analysis::degraded(
                        &request.language,
                        DegradeReason::Gateway(err),
                    )),
                    GatewayErrorPolicy::Propagate => Err(err.into()),
                };
            }
        };

        let insight = extract(&text);
        if insight.title.is_empty() {
            return Ok(Analysis::degraded(
                &request.language,
                DegradeReason::Unparseable,
            ));
        }

        info!(
            tags = insight.tags.len(),
            chapters = insight.chapters.len(),
            "Analysis complete"
        );
        Ok(Analysis {
            insight,
            outcome: Outcome::Complete,
        })
    }
}
