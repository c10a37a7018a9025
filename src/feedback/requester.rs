//! Daily feedback requester — prompt assembly and graceful degradation.
//!
//! The requester never fails from the caller's point of view: it returns
//! either generated text or one of two fixed fallback messages. Provider
//! errors are logged and swallowed here.

use std::sync::Arc;

use tracing::warn;

use crate::feedback::FeedbackModel;
use crate::model::{Task, TaskStatus};

/// Fixed response for a day with no tasks. The provider is never called in
/// that case.
pub const NO_TASKS_FEEDBACK: &str =
    "Commander, is date pr koi task nahi hai. Pehle plan krein phir feedback lein!";

/// Fixed response when the provider call fails or returns nothing usable.
pub const OFFLINE_FEEDBACK: &str = "Feedback system offline. Stay focused, commander.";

/// Why a fallback message was returned instead of generated text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    /// The day had no tasks to evaluate.
    NoTasks,
    /// The provider errored or produced an empty response.
    ServiceUnavailable,
}

/// Outcome of a feedback request — always usable text, never an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedbackOutcome {
    /// Text produced by the model.
    Generated(String),
    /// A fixed message substituted for a missing or failed generation.
    Fallback {
        message: &'static str,
        reason: FallbackReason,
    },
}

impl FeedbackOutcome {
    pub fn text(&self) -> &str {
        match self {
            Self::Generated(text) => text,
            Self::Fallback { message, .. } => message,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            Self::Generated(text) => text,
            Self::Fallback { message, .. } => message.to_string(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }
}

/// Prompt-shaping options.
#[derive(Debug, Clone)]
pub struct PromptOptions {
    /// Response-language instruction.
    pub language: String,
    /// Word-count ceiling for the response.
    pub word_limit: usize,
}

impl Default for PromptOptions {
    fn default() -> Self {
        Self {
            language: "Roman Urdu (Urdu written in Latin script)".to_string(),
            word_limit: 100,
        }
    }
}

/// Build the mentor prompt for a day's tasks.
///
/// Pure function: the task list goes in as given (the caller decides the
/// day), and the output is the full prompt text sent to the provider.
pub fn build_daily_prompt(tasks: &[Task], opts: &PromptOptions) -> String {
    let total = tasks.len();
    let completed = tasks.iter().filter(|t| t.status.is_completed()).count();

    let task_summary = tasks
        .iter()
        .map(|t| {
            format!(
                "- [{}] {} ({}h). Reason for failure: {}",
                t.status,
                t.description,
                t.hours,
                t.reason
                    .as_deref()
                    .filter(|r| !r.is_empty())
                    .unwrap_or("None specified"),
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are a strict but high-performance mentor for a student. Your persona is \"The SuperPower Mentor\".\n\
         Evaluate their day based on these tasks:\n\
         Total Tasks: {total}\n\
         Completed: {completed}\n\
         \n\
         Tasks List:\n\
         {task_summary}\n\
         \n\
         Respond in {language}.\n\
         BE VERY FIRM AND MENTOR-LIKE. If they missed tasks, be disappointed but motivational.\n\
         Remind them that their parents are waiting for their success and time is running out.\n\
         Talk about using their \"Brain as a Weapon\".\n\
         Keep the feedback concise, powerful, and under {word_limit} words.",
        language = opts.language,
        word_limit = opts.word_limit,
    )
}

/// Produces daily feedback through a [`FeedbackModel`].
pub struct FeedbackRequester {
    model: Arc<dyn FeedbackModel>,
    options: PromptOptions,
}

impl FeedbackRequester {
    pub fn new(model: Arc<dyn FeedbackModel>) -> Self {
        Self {
            model,
            options: PromptOptions::default(),
        }
    }

    /// Builder: override the prompt options.
    pub fn with_options(mut self, options: PromptOptions) -> Self {
        self.options = options;
        self
    }

    /// Feedback for a day's tasks.
    ///
    /// An empty task list short-circuits to [`NO_TASKS_FEEDBACK`] without
    /// calling the provider. Provider failures and empty responses degrade
    /// to [`OFFLINE_FEEDBACK`]. Holds no shared state, so repository
    /// mutations proceed freely while a request is in flight; overlapping
    /// requests run to completion independently.
    pub async fn daily_feedback(&self, tasks: &[Task]) -> FeedbackOutcome {
        if tasks.is_empty() {
            return FeedbackOutcome::Fallback {
                message: NO_TASKS_FEEDBACK,
                reason: FallbackReason::NoTasks,
            };
        }

        let prompt = build_daily_prompt(tasks, &self.options);
        match self.model.generate(&prompt).await {
            Ok(text) if !text.trim().is_empty() => FeedbackOutcome::Generated(text),
            Ok(_) => {
                warn!(model = self.model.model_name(), "Feedback model returned empty text");
                FeedbackOutcome::Fallback {
                    message: OFFLINE_FEEDBACK,
                    reason: FallbackReason::ServiceUnavailable,
                }
            }
            Err(e) => {
                warn!(model = self.model.model_name(), error = %e, "Feedback request failed");
                FeedbackOutcome::Fallback {
                    message: OFFLINE_FEEDBACK,
                    reason: FallbackReason::ServiceUnavailable,
                }
            }
        }
    }
}
