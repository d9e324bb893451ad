//! Response analysis: per-skill scores plus a written analysis of one applicant.

use serde::{Deserialize, Serialize};

use crate::ai::prompts::{ANALYSIS_PROMPT_TEMPLATE, ANALYSIS_ROLE};
use crate::ai::schema::{focus_skills, non_empty, responses, SchemaViolation, Validate};
use crate::ai::{invoke, AiError, Flow};
use crate::llm_client::prompts::{json_system, SCORE_RANGE_INSTRUCTION};
use crate::llm_client::LlmClient;
use crate::models::job::{AnalysisOutput, SoftSkill, SurveyResponse};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponsesInput {
    pub job_listing: String,
    pub soft_skills: Vec<SoftSkill>,
    pub responses: Vec<SurveyResponse>,
}

impl Validate for AnalyzeResponsesInput {
    fn validate(&self) -> Result<(), SchemaViolation> {
        non_empty("jobListing", &self.job_listing)?;
        focus_skills(&self.soft_skills)?;
        responses(&self.responses)
    }
}

pub struct AnalyzeResponses;

impl Flow for AnalyzeResponses {
    type Input = AnalyzeResponsesInput;
    type Output = AnalysisOutput;

    const NAME: &'static str = "analyze_responses";

    fn system() -> String {
        json_system(ANALYSIS_ROLE)
    }

    fn render_prompt(input: &Self::Input) -> String {
        ANALYSIS_PROMPT_TEMPLATE
            .replace("{score_instruction}", SCORE_RANGE_INSTRUCTION)
            .replace("{soft_skills}", &join_skills(&input.soft_skills))
            .replace("{responses}", &render_responses(&input.responses))
            .replace("{job_listing}", input.job_listing.trim())
    }
}

pub(crate) fn join_skills(skills: &[SoftSkill]) -> String {
    skills
        .iter()
        .map(|s| s.label())
        .collect::<Vec<_>>()
        .join(", ")
}

fn render_responses(responses: &[SurveyResponse]) -> String {
    responses
        .iter()
        .map(|r| format!("Question: {}\nAnswer: {}", r.question, r.answer))
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub async fn analyze_responses(
    llm: &LlmClient,
    input: &AnalyzeResponsesInput,
) -> Result<AnalysisOutput, AiError> {
    invoke::<AnalyzeResponses>(llm, input).await
}
