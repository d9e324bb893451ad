//! Request checks that run before any store or model call.
//! Lengths are counted in characters on trimmed text.

use thiserror::Error;

use crate::ai::schema::{self, SchemaViolation};
use crate::errors::AppError;
use crate::models::job::{JobPatch, Survey};

pub const MIN_TITLE_CHARS: usize = 3;
pub const MIN_DESCRIPTION_CHARS: usize = 50;
pub const MIN_NAME_CHARS: usize = 2;
pub const MIN_ANSWER_CHARS: usize = 10;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("{field} must be at least {min} characters")]
    TooShort { field: &'static str, min: usize },

    #[error("answer {number} must be at least {min} characters")]
    AnswerTooShort { number: usize, min: usize },

    #[error("expected {expected} answers, got {actual}")]
    AnswerCount { expected: usize, actual: usize },

    #[error("patch must set at least one field")]
    EmptyPatch,

    #[error("invalid survey: {0}")]
    Survey(#[from] SchemaViolation),
}

impl From<InputError> for AppError {
    fn from(err: InputError) -> Self {
        AppError::Validation(err.to_string())
    }
}

fn at_least(field: &'static str, value: &str, min: usize) -> Result<(), InputError> {
    if value.trim().chars().count() < min {
        return Err(InputError::TooShort { field, min });
    }
    Ok(())
}

pub fn validate_new_job(title: &str, description: &str) -> Result<(), InputError> {
    at_least("title", title, MIN_TITLE_CHARS)?;
    at_least("jobDescription", description, MIN_DESCRIPTION_CHARS)
}

/// One answer per survey question, each long enough to score.
pub fn validate_submission(name: &str, answers: &[String], survey: &Survey) -> Result<(), InputError> {
    at_least("name", name, MIN_NAME_CHARS)?;
    if answers.len() != survey.questions.len() {
        return Err(InputError::AnswerCount {
            expected: survey.questions.len(),
            actual: answers.len(),
        });
    }
    for (i, answer) in answers.iter().enumerate() {
        if answer.trim().chars().count() < MIN_ANSWER_CHARS {
            return Err(InputError::AnswerTooShort {
                number: i + 1,
                min: MIN_ANSWER_CHARS,
            });
        }
    }
    Ok(())
}

pub fn validate_survey(survey: &Survey) -> Result<(), InputError> {
    if survey.questions.is_empty() {
        return Err(SchemaViolation::Empty("questions").into());
    }
    for question in &survey.questions {
        schema::non_empty("questions", question)?;
    }
    schema::distinct_questions("surveyQuestions", &survey.questions)?;
    schema::focus_skills(&survey.top_skills)?;
    Ok(())
}

/// Manual edits get the same floor as creation.
pub fn validate_job_patch(patch: &JobPatch) -> Result<(), InputError> {
    if patch.is_empty() {
        return Err(InputError::EmptyPatch);
    }
    if let Some(title) = &patch.title {
        at_least("title", title, MIN_TITLE_CHARS)?;
    }
    if let Some(description) = &patch.description_input {
        at_least("descriptionInput", description, MIN_DESCRIPTION_CHARS)?;
    }
    if let Some(listing) = &patch.generated_listing_text {
        schema::non_empty("generatedListingText", listing)?;
    }
    if let Some(survey) = &patch.survey {
        validate_survey(survey)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job::SoftSkill;

    fn survey(questions: usize) -> Survey {
        Survey {
            questions: (1..=questions).map(|i| format!("Question {i}?")).collect(),
            top_skills: vec![SoftSkill::Communication, SoftSkill::Initiative],
        }
    }

    fn answers(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("A considered answer number {i}")).collect()
    }

    #[test]
    fn test_new_job_length_floors() {
        let description = "x".repeat(MIN_DESCRIPTION_CHARS);
        assert_eq!(validate_new_job("Dev", &description), Ok(()));
        assert_eq!(
            validate_new_job("  Go  ", &description),
            Err(InputError::TooShort {
                field: "title",
                min: MIN_TITLE_CHARS
            })
        );
        assert!(validate_new_job("Backend Engineer", &"x".repeat(49)).is_err());
    }

    #[test]
    fn test_lengths_count_characters_not_bytes() {
        // 50 two-byte characters
        let description = "é".repeat(MIN_DESCRIPTION_CHARS);
        assert_eq!(validate_new_job("Ingénieur", &description), Ok(()));
    }

    #[test]
    fn test_submission_requires_one_answer_per_question() {
        let survey = survey(10);
        assert_eq!(validate_submission("Jane Doe", &answers(10), &survey), Ok(()));
        assert_eq!(
            validate_submission("Jane Doe", &answers(9), &survey),
            Err(InputError::AnswerCount {
                expected: 10,
                actual: 9
            })
        );
    }

    #[test]
    fn test_submission_rejects_short_name_and_answers() {
        let survey = survey(2);
        assert!(matches!(
            validate_submission("J", &answers(2), &survey),
            Err(InputError::TooShort { field: "name", .. })
        ));
        let short = vec!["A considered answer".to_string(), "too short".to_string()];
        assert_eq!(
            validate_submission("Jane Doe", &short, &survey),
            Err(InputError::AnswerTooShort {
                number: 2,
                min: MIN_ANSWER_CHARS
            })
        );
    }

    #[test]
    fn test_job_patch_rules() {
        assert_eq!(
            validate_job_patch(&JobPatch::default()),
            Err(InputError::EmptyPatch)
        );
        let rename = JobPatch {
            title: Some("Staff Engineer".to_string()),
            ..JobPatch::default()
        };
        assert_eq!(validate_job_patch(&rename), Ok(()));

        let mut bad_survey = survey(3);
        bad_survey.top_skills = vec![
            SoftSkill::Communication,
            SoftSkill::Initiative,
            SoftSkill::Adaptability,
            SoftSkill::Accountability,
        ];
        let patch = JobPatch {
            survey: Some(bad_survey),
            ..JobPatch::default()
        };
        assert!(matches!(
            validate_job_patch(&patch),
            Err(InputError::Survey(_))
        ));
    }

    #[test]
    fn test_survey_with_repeated_question_is_rejected() {
        let mut repeated = survey(3);
        repeated.questions[2] = repeated.questions[0].clone();
        assert_eq!(
            validate_survey(&repeated),
            Err(InputError::Survey(SchemaViolation::Duplicate("surveyQuestions")))
        );
        assert_eq!(validate_survey(&survey(3)), Ok(()));
    }
}
