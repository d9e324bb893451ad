use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One of the seven interpersonal competencies surveys are built around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SoftSkill {
    Communication,
    Collaboration,
    Accountability,
    ProblemSolving,
    Adaptability,
    Initiative,
    EmotionalIntelligence,
}

impl SoftSkill {
    pub const ALL: [SoftSkill; 7] = [
        SoftSkill::Communication,
        SoftSkill::Collaboration,
        SoftSkill::Accountability,
        SoftSkill::ProblemSolving,
        SoftSkill::Adaptability,
        SoftSkill::Initiative,
        SoftSkill::EmotionalIntelligence,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SoftSkill::Communication => "Communication",
            SoftSkill::Collaboration => "Collaboration / Teamwork",
            SoftSkill::Accountability => "Accountability / Ownership",
            SoftSkill::ProblemSolving => "Problem-Solving",
            SoftSkill::Adaptability => "Adaptability / Resilience",
            SoftSkill::Initiative => "Initiative",
            SoftSkill::EmotionalIntelligence => "Emotional Intelligence (EQ)",
        }
    }

    /// Comma-separated label list, in canonical order, for prompt text.
    pub fn catalogue() -> String {
        Self::ALL
            .iter()
            .map(|s| s.label())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// The part of the label before any " / " or " (" qualifier.
    fn head(self) -> &'static str {
        let label = self.label();
        let end = label
            .find(" / ")
            .or_else(|| label.find(" ("))
            .unwrap_or(label.len());
        &label[..end]
    }
}

impl fmt::Display for SoftSkill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown soft skill '{0}'")]
pub struct UnknownSoftSkill(pub String);

impl FromStr for SoftSkill {
    type Err = UnknownSoftSkill;

    /// Accepts the full label or its head ("Collaboration", "Emotional
    /// Intelligence"), ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        SoftSkill::ALL
            .into_iter()
            .find(|skill| {
                skill.label().eq_ignore_ascii_case(wanted) || skill.head().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| UnknownSoftSkill(s.to_string()))
    }
}

impl TryFrom<String> for SoftSkill {
    type Error = UnknownSoftSkill;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SoftSkill> for String {
    fn from(skill: SoftSkill) -> Self {
        skill.label().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Survey {
    pub questions: Vec<String>,
    pub top_skills: Vec<SoftSkill>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyResponse {
    pub question: String,
    pub answer: String,
}

/// Per-skill scoring produced by the response analysis flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisOutput {
    pub analysis: String,
    /// Skill label → score in 0..=100.
    pub scores: BTreeMap<String, f64>,
    pub summary: String,
}

/// Aggregate fit produced by the response summary flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallScore {
    pub summary: String,
    pub overall_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Applicant {
    pub id: Uuid,
    pub name: String,
    /// Informational only; the owning job is whichever job embeds this record.
    pub job_id: Uuid,
    pub responses: Vec<SurveyResponse>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis_output: Option<AnalysisOutput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overall_score_data: Option<OverallScore>,
    /// Milliseconds since the Unix epoch.
    pub submitted_at: i64,
}

impl Applicant {
    /// Applicants stay out of ranked views until the summary flow has scored them.
    pub fn is_pending_analysis(&self) -> bool {
        self.overall_score_data.is_none()
    }

    pub fn overall_score(&self) -> Option<f64> {
        self.overall_score_data.as_ref().map(|o| o.overall_score)
    }

    pub fn apply_patch(&mut self, patch: &ApplicantPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(responses) = &patch.responses {
            self.responses = responses.clone();
        }
        if let Some(analysis) = &patch.analysis_output {
            self.analysis_output = Some(analysis.clone());
        }
        if let Some(overall) = &patch.overall_score_data {
            self.overall_score_data = Some(overall.clone());
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: Uuid,
    pub title: String,
    pub description_input: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_listing_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub survey: Option<Survey>,
    #[serde(default)]
    pub applicants: Vec<Applicant>,
    /// Milliseconds since the Unix epoch.
    pub created_at: i64,
}

impl Job {
    /// Text the scoring flows judge answers against: the generated listing,
    /// or the raw description when no listing was produced.
    pub fn listing_or_description(&self) -> &str {
        self.generated_listing_text
            .as_deref()
            .unwrap_or(&self.description_input)
    }

    pub fn applicant(&self, applicant_id: Uuid) -> Option<&Applicant> {
        self.applicants.iter().find(|a| a.id == applicant_id)
    }

    /// Merges a patch into this job. Applicants, id and creation time are
    /// never touched.
    pub fn apply_patch(&mut self, patch: &JobPatch) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(description) = &patch.description_input {
            self.description_input = description.clone();
        }
        if let Some(listing) = &patch.generated_listing_text {
            self.generated_listing_text = Some(listing.clone());
        }
        if let Some(survey) = &patch.survey {
            self.survey = Some(survey.clone());
        }
    }
}

/// Fields supplied when a job is first persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewJob {
    pub title: String,
    pub description_input: String,
    pub generated_listing_text: Option<String>,
}

/// Partial job update. Identifier, applicants and creation time have no slot
/// here, so any such keys in a request body are dropped during deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_input: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_listing_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub survey: Option<Survey>,
}

impl JobPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description_input.is_none()
            && self.generated_listing_text.is_none()
            && self.survey.is_none()
    }
}

/// Fields supplied when an applicant submits a survey.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewApplicant {
    pub name: String,
    pub job_id: Uuid,
    pub responses: Vec<SurveyResponse>,
}

/// Partial applicant update; id, job id and submission time are immutable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responses: Option<Vec<SurveyResponse>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis_output: Option<AnalysisOutput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overall_score_data: Option<OverallScore>,
}
