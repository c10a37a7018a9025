//! AI feedback integration.
//!
//! Supports:
//! - **Anthropic**: direct API access via rig-core
//! - **OpenAI**: direct API access via rig-core
//!
//! Uses the rig-core crate for HTTP transport and [`RigModel`] to bridge
//! rig's completion models to the [`FeedbackModel`] trait. Everything above
//! the trait is provider-agnostic.

pub mod provider;
pub mod requester;

pub use provider::{FeedbackModel, RigModel};
pub use requester::{
    FallbackReason, FeedbackOutcome, FeedbackRequester, NO_TASKS_FEEDBACK, OFFLINE_FEEDBACK,
    PromptOptions, build_daily_prompt,
};

use std::sync::Arc;

use rig::client::CompletionClient;
use secrecy::ExposeSecret;

use crate::error::FeedbackError;

/// Supported feedback backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackBackend {
    Anthropic,
    OpenAi,
}

/// Configuration for creating a feedback model.
#[derive(Debug, Clone)]
pub struct FeedbackConfig {
    pub backend: FeedbackBackend,
    pub api_key: secrecy::SecretString,
    pub model: String,
}

/// Create a feedback model from configuration.
pub fn create_model(config: &FeedbackConfig) -> Result<Arc<dyn FeedbackModel>, FeedbackError> {
    match config.backend {
        FeedbackBackend::Anthropic => create_anthropic_model(config),
        FeedbackBackend::OpenAi => create_openai_model(config),
    }
}

fn create_anthropic_model(
    config: &FeedbackConfig,
) -> Result<Arc<dyn FeedbackModel>, FeedbackError> {
    use rig::providers::anthropic;

    let client: rig::client::Client<anthropic::client::AnthropicExt> =
        anthropic::Client::new(config.api_key.expose_secret()).map_err(|e| {
            FeedbackError::RequestFailed {
                provider: "anthropic".to_string(),
                reason: format!("Failed to create Anthropic client: {}", e),
            }
        })?;

    let model = client.completion_model(&config.model);
    tracing::info!("Using Anthropic (model: {})", config.model);
    Ok(Arc::new(RigModel::new(model, "anthropic", &config.model)))
}

fn create_openai_model(config: &FeedbackConfig) -> Result<Arc<dyn FeedbackModel>, FeedbackError> {
    use rig::providers::openai;

    let client: rig::client::Client<openai::client::OpenAIResponsesExt> =
        openai::Client::new(config.api_key.expose_secret()).map_err(|e| {
            FeedbackError::RequestFailed {
                provider: "openai".to_string(),
                reason: format!("Failed to create OpenAI client: {}", e),
            }
        })?;

    let model = client.completion_model(&config.model);
    tracing::info!("Using OpenAI (model: {})", config.model);
    Ok(Arc::new(RigModel::new(model, "openai", &config.model)))
}
