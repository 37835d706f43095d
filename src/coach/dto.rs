use serde::{Deserialize, Serialize};

use crate::{errors::AppError, profile::repo_types::InterviewSession};

fn non_empty(value: &str, msg: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(msg.into()));
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
pub struct RoadmapRequest {
    pub job_title: String,
}

impl RoadmapRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        non_empty(&self.job_title, "Job title cannot be empty.")
    }
}

#[derive(Debug, Serialize)]
pub struct RoadmapResponse {
    pub roadmap: String,
}

#[derive(Debug, Deserialize)]
pub struct QuestionsRequest {
    pub role: String,
}

impl QuestionsRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        non_empty(&self.role, "Role cannot be empty.")
    }
}

#[derive(Debug, Serialize)]
pub struct QuestionsResponse {
    pub questions: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    pub question: String,
    pub user_answer: String,
}

impl FeedbackRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        let msg = "Question and answer cannot be empty.";
        non_empty(&self.question, msg)?;
        non_empty(&self.user_answer, msg)
    }
}

#[derive(Debug, Serialize)]
pub struct FeedbackResponse {
    pub session: InterviewSession,
}

fn default_college_tier() -> String {
    "Tier 2/3".into()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeReviewRequest {
    pub resume_text: String,
    #[serde(default = "default_college_tier")]
    pub college_tier: String,
    #[serde(default)]
    pub character_profile_key: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
}

impl ResumeReviewRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        non_empty(&self.resume_text, "Resume text cannot be empty.")
    }
}

#[derive(Debug, Serialize)]
pub struct ResumeReviewResponse {
    pub feedback: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketInsightsRequest {
    pub job_title: String,
}

impl MarketInsightsRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.job_title.trim().chars().count() < 2 {
            return Err(AppError::Validation(
                "jobTitle must be at least 2 characters".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillImportance {
    pub name: String,
    pub importance: f64,
}

/// Market snapshot as the model reports it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketInsights {
    pub average_salary: String,
    pub demand: String,
    pub top_skills: Vec<SkillImportance>,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

impl ChatRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        non_empty(&self.message, "Message cannot be empty.")
    }
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resume_request_defaults() {
        let r: ResumeReviewRequest = serde_json::from_str(r#"{"resumeText":"my cv"}"#).unwrap();
        assert_eq!(r.college_tier, "Tier 2/3");
        assert!(r.character_profile_key.is_none());
        assert!(r.skills.is_empty());
        assert!(r.validate().is_ok());

        let blank: ResumeReviewRequest =
            serde_json::from_str(r#"{"resumeText":"  ","skills":["Rust"]}"#).unwrap();
        assert!(blank.validate().is_err());
    }

    #[test]
    fn market_title_needs_two_chars() {
        let short = MarketInsightsRequest { job_title: " a ".into() };
        assert!(short.validate().is_err());
        let ok = MarketInsightsRequest { job_title: "QA".into() };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn market_insights_use_camel_case() {
        let raw = r#"{"averageSalary":"$120,000 USD","demand":"High",
                      "topSkills":[{"name":"SQL","importance":90}]}"#;
        let m: MarketInsights = serde_json::from_str(raw).unwrap();
        assert_eq!(m.top_skills[0].importance, 90.0);
        let json = serde_json::to_value(&m).unwrap();
        assert_eq!(json["averageSalary"], "$120,000 USD");
        assert_eq!(json["topSkills"][0]["name"], "SQL");
    }

    #[test]
    fn feedback_needs_both_fields() {
        let f = FeedbackRequest {
            question: "Why us?".into(),
            user_answer: "".into(),
        };
        assert!(f.validate().is_err());
    }
}
