//! Typed wrappers around the four prompt flows.
//! All model calls go through `llm_client`; every flow checks its input
//! before the call and its output after it.

pub mod analysis;
pub mod listing;
pub mod prompts;
pub mod schema;
pub mod summary;
pub mod survey;

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::warn;

use crate::errors::AppError;
use crate::llm_client::{LlmClient, LlmError};
use schema::{SchemaViolation, Validate};

#[derive(Debug, Error)]
pub enum AiError {
    #[error("{flow}: invalid input: {source}")]
    InvalidInput {
        flow: &'static str,
        source: SchemaViolation,
    },

    #[error("{flow}: model call failed: {source}")]
    Llm {
        flow: &'static str,
        source: LlmError,
    },

    #[error("{flow}: model output rejected: {source}")]
    InvalidOutput {
        flow: &'static str,
        source: SchemaViolation,
    },
}

impl From<AiError> for AppError {
    fn from(err: AiError) -> Self {
        match err {
            AiError::InvalidInput { source, .. } => AppError::Validation(source.to_string()),
            other => AppError::Llm(other.to_string()),
        }
    }
}

/// One prompt flow: a request shape, a response shape, and how to render the prompt.
pub trait Flow {
    type Input: Validate;
    type Output: DeserializeOwned + Validate;

    const NAME: &'static str;

    fn system() -> String;

    fn render_prompt(input: &Self::Input) -> String;

    /// Output checks that depend on the request; defaults to the output's own shape.
    fn validate_output(_input: &Self::Input, output: &Self::Output) -> Result<(), SchemaViolation> {
        output.validate()
    }
}

/// Runs a flow once: validate input, call the model, parse and validate output.
pub async fn invoke<F: Flow>(llm: &LlmClient, input: &F::Input) -> Result<F::Output, AiError> {
    input.validate().map_err(|source| AiError::InvalidInput {
        flow: F::NAME,
        source,
    })?;

    let prompt = F::render_prompt(input);
    let output: F::Output = llm
        .call_json(&prompt, &F::system())
        .await
        .map_err(|source| AiError::Llm {
            flow: F::NAME,
            source,
        })?;

    F::validate_output(input, &output).map_err(|source| {
        warn!("{} output rejected: {source}", F::NAME);
        AiError::InvalidOutput {
            flow: F::NAME,
            source,
        }
    })?;

    Ok(output)
}
