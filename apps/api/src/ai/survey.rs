//! Survey creation: picks the top soft skills for a listing and writes the questions.
//!
//! Skill selection and question wording are left to the model. Two runs over
//! the same listing may legitimately produce different surveys.

use serde::{Deserialize, Serialize};

use crate::ai::prompts::{SURVEY_PROMPT_TEMPLATE, SURVEY_ROLE};
use crate::ai::schema::{distinct_questions, focus_skills, non_empty, SchemaViolation, Validate};
use crate::ai::{invoke, AiError, Flow};
use crate::llm_client::prompts::json_system;
use crate::llm_client::LlmClient;
use crate::models::job::{SoftSkill, Survey};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSurveyInput {
    pub job_listing: String,
    pub question_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSurveyOutput {
    pub survey_questions: Vec<String>,
    pub top_skills: Vec<SoftSkill>,
}

impl From<CreateSurveyOutput> for Survey {
    fn from(output: CreateSurveyOutput) -> Self {
        Survey {
            questions: output.survey_questions,
            top_skills: output.top_skills,
        }
    }
}

impl Validate for CreateSurveyInput {
    fn validate(&self) -> Result<(), SchemaViolation> {
        non_empty("jobListing", &self.job_listing)?;
        if self.question_count == 0 {
            return Err(SchemaViolation::Empty("questionCount"));
        }
        Ok(())
    }
}

impl Validate for CreateSurveyOutput {
    fn validate(&self) -> Result<(), SchemaViolation> {
        for question in &self.survey_questions {
            non_empty("surveyQuestions", question)?;
        }
        distinct_questions("surveyQuestions", &self.survey_questions)?;
        focus_skills(&self.top_skills)
    }
}

pub struct CreateSurvey;

impl Flow for CreateSurvey {
    type Input = CreateSurveyInput;
    type Output = CreateSurveyOutput;

    const NAME: &'static str = "create_survey";

    fn system() -> String {
        json_system(SURVEY_ROLE)
    }

    fn render_prompt(input: &Self::Input) -> String {
        SURVEY_PROMPT_TEMPLATE
            .replace("{skill_catalogue}", &SoftSkill::catalogue())
            .replace("{question_count}", &input.question_count.to_string())
            .replace("{job_listing}", input.job_listing.trim())
    }

    fn validate_output(input: &Self::Input, output: &Self::Output) -> Result<(), SchemaViolation> {
        if output.survey_questions.len() != input.question_count {
            return Err(SchemaViolation::WrongLength {
                field: "surveyQuestions",
                expected: input.question_count.to_string(),
                actual: output.survey_questions.len(),
            });
        }
        output.validate()
    }
}

/// Creates a survey with exactly `question_count` questions for the listing.
pub async fn create_survey(
    llm: &LlmClient,
    job_listing: &str,
    question_count: usize,
) -> Result<Survey, AiError> {
    let input = CreateSurveyInput {
        job_listing: job_listing.to_string(),
        question_count,
    };
    let output = invoke::<CreateSurvey>(llm, &input).await?;
    Ok(output.into())
}
