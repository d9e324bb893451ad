// Prompt templates for the four AI flows.
// Placeholders are `{name}` and are filled with `str::replace`.

/// Role sentence for listing generation.
pub const LISTING_ROLE: &str = "You are an expert recruiter who writes compelling, \
    detailed job listings that attract top talent.";

/// Listing prompt. Replace `{job_description}`.
pub const LISTING_PROMPT_TEMPLATE: &str = r#"Turn the job description below into a complete job listing that follows the practices of successful online postings.

The listing must include at least these sections:
- Job Title: clear and concise
- Company Overview: a brief, engaging description of the company, its mission and culture
- Job Summary: what the role is and why it exists
- Key Responsibilities: the primary duties and tasks
- Required Qualifications: essential skills, experience and education
- Preferred Qualifications: desirable but optional skills and experience
- Benefits: key benefits and perks
- Call to Action: how to apply

Keep the tone professional, engaging and inclusive.

Return a JSON object with this EXACT schema:
{
  "jobListing": "the full listing as markdown text"
}

JOB DESCRIPTION:
{job_description}"#;

/// Role sentence for survey creation.
pub const SURVEY_ROLE: &str = "You are an assistant that helps hiring managers build \
    soft-skills surveys for candidates.";

/// Survey prompt. Replace `{skill_catalogue}`, `{question_count}`, `{job_listing}`.
pub const SURVEY_PROMPT_TEMPLATE: &str = r#"Read the job listing below and identify the top 3 soft skills the role needs. Choose ONLY from this list, spelled exactly as written:
{skill_catalogue}

Then write a {question_count}-question survey that reveals how a candidate would handle those 3 skills. Questions must be easy for candidates to understand and should invite concrete examples.

Return a JSON object with this EXACT schema:
{
  "surveyQuestions": ["question 1", "question 2"],
  "topSkills": ["Communication", "Problem-Solving", "Initiative"]
}

HARD RULES:
1. "surveyQuestions" has exactly {question_count} entries
2. "topSkills" has at most 3 entries, each copied from the list above, no repeats

JOB LISTING:
{job_listing}"#;

/// Role sentence for response analysis.
pub const ANALYSIS_ROLE: &str = "You are a hiring expert who analyzes a job seeker's \
    survey answers to judge their proficiency in key soft skills.";

/// Analysis prompt. Replace `{score_instruction}`, `{job_listing}`, `{soft_skills}`, `{responses}`.
pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"Analyze the survey responses below for the given job listing and soft skills. Explain what the answers reveal about each skill, then score each soft skill.

{score_instruction}

Return a JSON object with this EXACT schema:
{
  "analysis": "insights into the candidate's soft-skill proficiency",
  "scores": {"Communication": 85, "Problem-Solving": 70},
  "summary": "a short summary of the responses with an overall impression"
}

The keys of "scores" are the soft skill names listed below. The analysis and the scores must agree with each other.

JOB LISTING:
{job_listing}

TOP SOFT SKILLS: {soft_skills}

SURVEY RESPONSES:
{responses}"#;

/// Role sentence for the overall summary.
pub const SUMMARY_ROLE: &str = "You are an expert talent acquisition specialist.";

/// Summary prompt. Replace `{score_instruction}`, `{job_listing}`, `{responses}`, `{soft_skills}`.
pub const SUMMARY_PROMPT_TEMPLATE: &str = r#"You are given a job listing, a job seeker's survey responses and the soft skills being assessed. Summarize the responses and give one overall score for the candidate's suitability for the role based on those soft skills.

{score_instruction}

Return a JSON object with this EXACT schema:
{
  "summary": "summary of the candidate's responses",
  "overallScore": 78
}

JOB LISTING:
{job_listing}

SURVEY RESPONSES:
{responses}

SOFT SKILLS: {soft_skills}"#;
