use serde::Serialize;
use sqlx::FromRow;
use time::{Date, OffsetDateTime};

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Skill {
    pub skill_id: i64,
    pub user_id: i64,
    pub skill_name: String,
    pub proficiency: String,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Project {
    pub project_id: i64,
    pub user_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub tech_stack: Option<String>,
    pub project_link: Option<String>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Experience {
    pub exp_id: i64,
    pub user_id: i64,
    pub company: String,
    pub role: String,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub achievements: Option<String>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Education {
    pub edu_id: i64,
    pub user_id: i64,
    pub degree: String,
    pub university: String,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub gpa: Option<f64>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct InterviewSession {
    pub session_id: i64,
    pub user_id: i64,
    pub question: Option<String>,
    pub user_answer: Option<String>,
    pub ai_feedback: Option<String>,
    pub score: Option<f64>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Aggregate standing; maintained outside this service, read-only here.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CareerScore {
    pub score_id: i64,
    pub user_id: i64,
    pub career_score: Option<i32>,
    pub interview_success: Option<f64>,
    pub market_position: Option<String>,
    pub active_streak: Option<i32>,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}
