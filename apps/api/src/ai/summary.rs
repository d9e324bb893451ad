//! Response summary: one aggregate 0–100 score for an applicant.

use serde::{Deserialize, Serialize};

use crate::ai::analysis::join_skills;
use crate::ai::prompts::{SUMMARY_PROMPT_TEMPLATE, SUMMARY_ROLE};
use crate::ai::schema::{focus_skills, non_empty, responses, SchemaViolation, Validate};
use crate::ai::{invoke, AiError, Flow};
use crate::llm_client::prompts::{json_system, SCORE_RANGE_INSTRUCTION};
use crate::llm_client::LlmClient;
use crate::models::job::{OverallScore, SoftSkill, SurveyResponse};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummarizeResponsesInput {
    pub job_listing: String,
    /// In survey order.
    pub survey_responses: Vec<SurveyResponse>,
    pub soft_skills: Vec<SoftSkill>,
}

impl SummarizeResponsesInput {
    pub fn new(job_listing: &str, responses: &[SurveyResponse], soft_skills: &[SoftSkill]) -> Self {
        Self {
            job_listing: job_listing.to_string(),
            survey_responses: responses.to_vec(),
            soft_skills: soft_skills.to_vec(),
        }
    }
}

impl Validate for SummarizeResponsesInput {
    fn validate(&self) -> Result<(), SchemaViolation> {
        non_empty("jobListing", &self.job_listing)?;
        focus_skills(&self.soft_skills)?;
        responses(&self.survey_responses)
    }
}

pub struct SummarizeResponses;

impl Flow for SummarizeResponses {
    type Input = SummarizeResponsesInput;
    type Output = OverallScore;

    const NAME: &'static str = "summarize_responses";

    fn system() -> String {
        json_system(SUMMARY_ROLE)
    }

    fn render_prompt(input: &Self::Input) -> String {
        let responses = input
            .survey_responses
            .iter()
            .map(|r| format!("Question: {}\nResponse: {}", r.question, r.answer))
            .collect::<Vec<_>>()
            .join("\n\n");
        SUMMARY_PROMPT_TEMPLATE
            .replace("{score_instruction}", SCORE_RANGE_INSTRUCTION)
            .replace("{soft_skills}", &join_skills(&input.soft_skills))
            .replace("{responses}", &responses)
            .replace("{job_listing}", input.job_listing.trim())
    }
}

pub async fn summarize_responses(
    llm: &LlmClient,
    input: &SummarizeResponsesInput,
) -> Result<OverallScore, AiError> {
    invoke::<SummarizeResponses>(llm, input).await
}
