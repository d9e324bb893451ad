//! Listing generation: turns a free-text job description into a polished listing.

use serde::{Deserialize, Serialize};

use crate::ai::prompts::{LISTING_PROMPT_TEMPLATE, LISTING_ROLE};
use crate::ai::schema::{non_empty, SchemaViolation, Validate};
use crate::ai::{invoke, AiError, Flow};
use crate::llm_client::prompts::json_system;
use crate::llm_client::LlmClient;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateListingInput {
    pub job_description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateListingOutput {
    pub job_listing: String,
}

impl Validate for GenerateListingInput {
    fn validate(&self) -> Result<(), SchemaViolation> {
        non_empty("jobDescription", &self.job_description)
    }
}

impl Validate for GenerateListingOutput {
    fn validate(&self) -> Result<(), SchemaViolation> {
        non_empty("jobListing", &self.job_listing)
    }
}

pub struct GenerateListing;

impl Flow for GenerateListing {
    type Input = GenerateListingInput;
    type Output = GenerateListingOutput;

    const NAME: &'static str = "generate_listing";

    fn system() -> String {
        json_system(LISTING_ROLE)
    }

    fn render_prompt(input: &Self::Input) -> String {
        LISTING_PROMPT_TEMPLATE.replace("{job_description}", input.job_description.trim())
    }
}

/// Generates a listing for the description. Returns the listing text.
pub async fn generate_listing(llm: &LlmClient, job_description: &str) -> Result<String, AiError> {
    let input = GenerateListingInput {
        job_description: job_description.to_string(),
    };
    let output = invoke::<GenerateListing>(llm, &input).await?;
    Ok(output.job_listing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::scripted::ScriptedBackend;

    #[tokio::test]
    async fn test_generate_listing_returns_listing_text() {
        let backend = ScriptedBackend::new([r#"{"jobListing": "Job Title: Backend Engineer"}"#]);
        let llm = LlmClient::with_backend(backend.clone());

        let listing = generate_listing(&llm, "We need a backend engineer who loves Rust")
            .await
            .unwrap();

        assert_eq!(listing, "Job Title: Backend Engineer");
        let prompts = backend.prompts();
        assert!(prompts[0].contains("We need a backend engineer who loves Rust"));
        assert!(!prompts[0].contains("{job_description}"));
    }

    #[tokio::test]
    async fn test_blank_listing_is_rejected() {
        let llm = LlmClient::with_backend(ScriptedBackend::new([r#"{"jobListing": " "}"#]));
        let err = generate_listing(&llm, "a description").await.unwrap_err();
        assert!(matches!(err, AiError::InvalidOutput { .. }));
    }

    #[tokio::test]
    async fn test_missing_field_is_a_model_failure() {
        let llm = LlmClient::with_backend(ScriptedBackend::new([r#"{"listing": "x"}"#]));
        let err = generate_listing(&llm, "a description").await.unwrap_err();
        assert!(matches!(err, AiError::Llm { .. }));
    }

    #[tokio::test]
    async fn test_blank_description_never_reaches_the_model() {
        let backend = ScriptedBackend::new(Vec::<String>::new());
        let llm = LlmClient::with_backend(backend.clone());

        let err = generate_listing(&llm, "   ").await.unwrap_err();
        assert!(matches!(err, AiError::InvalidInput { .. }));
        assert_eq!(backend.calls(), 0);
    }
}
