//! Feedback provider seam — text generation behind an async trait.

use async_trait::async_trait;
use rig::completion::{CompletionModel, Prompt};

use crate::error::FeedbackError;

/// A text-generation backend able to turn a prompt into feedback text.
///
/// The requester only ever talks to this trait, so tests can substitute a
/// deterministic model and the transport can change without touching the
/// prompt or fallback logic.
#[async_trait]
pub trait FeedbackModel: Send + Sync {
    /// Model identifier, for logging.
    fn model_name(&self) -> &str;

    /// Generate a completion for the prompt.
    async fn generate(&self, prompt: &str) -> Result<String, FeedbackError>;
}

/// Bridges a rig-core completion model to [`FeedbackModel`].
pub struct RigModel<M: CompletionModel> {
    agent: rig::agent::Agent<M>,
    provider: &'static str,
    model_name: String,
}

impl<M: CompletionModel> RigModel<M> {
    pub fn new(model: M, provider: &'static str, model_name: impl Into<String>) -> Self {
        let agent = rig::agent::AgentBuilder::new(model).build();
        Self {
            agent,
            provider,
            model_name: model_name.into(),
        }
    }
}

#[async_trait]
impl<M: CompletionModel> FeedbackModel for RigModel<M> {
    fn model_name(&self) -> &str {
        &self.model_name
    }

    async fn generate(&self, prompt: &str) -> Result<String, FeedbackError> {
        self.agent
            .prompt(prompt)
            .await
            .map_err(|e| FeedbackError::RequestFailed {
                provider: self.provider.to_string(),
                reason: e.to_string(),
            })
    }
}
