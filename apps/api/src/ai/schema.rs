//! Runtime shape checks for AI flow inputs and outputs.

use std::collections::HashSet;

use thiserror::Error;

use crate::models::job::{AnalysisOutput, OverallScore, SoftSkill, SurveyResponse};

/// Highest number of score entries an analysis may carry (one per soft skill).
pub const MAX_SCORED_SKILLS: usize = SoftSkill::ALL.len();
/// Highest number of focus skills a survey may target.
pub const MAX_TOP_SKILLS: usize = 3;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaViolation {
    #[error("field '{0}' must not be empty")]
    Empty(&'static str),

    #[error("field '{field}' has {actual} entries, expected {expected}")]
    WrongLength {
        field: &'static str,
        expected: String,
        actual: usize,
    },

    #[error("field '{field}' value {value} is outside 0..=100")]
    OutOfRange { field: String, value: f64 },

    #[error("field '{0}' contains duplicates")]
    Duplicate(&'static str),
}

/// A type that can check its own shape after deserialization.
pub trait Validate {
    fn validate(&self) -> Result<(), SchemaViolation>;
}

pub fn non_empty(field: &'static str, value: &str) -> Result<(), SchemaViolation> {
    if value.trim().is_empty() {
        return Err(SchemaViolation::Empty(field));
    }
    Ok(())
}

pub fn score_in_range(field: impl Into<String>, value: f64) -> Result<(), SchemaViolation> {
    if !value.is_finite() || !(0.0..=100.0).contains(&value) {
        return Err(SchemaViolation::OutOfRange {
            field: field.into(),
            value,
        });
    }
    Ok(())
}

/// 1..=3 distinct skills.
pub fn focus_skills(skills: &[SoftSkill]) -> Result<(), SchemaViolation> {
    if skills.is_empty() || skills.len() > MAX_TOP_SKILLS {
        return Err(SchemaViolation::WrongLength {
            field: "topSkills",
            expected: format!("1..={MAX_TOP_SKILLS}"),
            actual: skills.len(),
        });
    }
    let unique: HashSet<_> = skills.iter().collect();
    if unique.len() != skills.len() {
        return Err(SchemaViolation::Duplicate("topSkills"));
    }
    Ok(())
}

/// No question text may appear twice.
pub fn distinct_questions(field: &'static str, questions: &[String]) -> Result<(), SchemaViolation> {
    let unique: HashSet<&str> = questions.iter().map(|q| q.trim()).collect();
    if unique.len() != questions.len() {
        return Err(SchemaViolation::Duplicate(field));
    }
    Ok(())
}

pub fn responses(responses: &[SurveyResponse]) -> Result<(), SchemaViolation> {
    if responses.is_empty() {
        return Err(SchemaViolation::Empty("responses"));
    }
    for r in responses {
        non_empty("question", &r.question)?;
        non_empty("answer", &r.answer)?;
    }
    Ok(())
}

impl Validate for AnalysisOutput {
    fn validate(&self) -> Result<(), SchemaViolation> {
        non_empty("analysis", &self.analysis)?;
        non_empty("summary", &self.summary)?;
        if self.scores.is_empty() || self.scores.len() > MAX_SCORED_SKILLS {
            return Err(SchemaViolation::WrongLength {
                field: "scores",
                expected: format!("1..={MAX_SCORED_SKILLS}"),
                actual: self.scores.len(),
            });
        }
        for (skill, score) in &self.scores {
            non_empty("scores key", skill)?;
            score_in_range(format!("scores.{skill}"), *score)?;
        }
        Ok(())
    }
}

impl Validate for OverallScore {
    fn validate(&self) -> Result<(), SchemaViolation> {
        non_empty("summary", &self.summary)?;
        score_in_range("overallScore", self.overall_score)
    }
}
