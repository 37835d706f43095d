use serde::{Deserialize, Serialize};
use time::Date;

use super::repo_types::{CareerScore, Education, Experience, InterviewSession, Project, Skill};
use crate::{auth::dto::PublicUser, errors::AppError};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Proficiency {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl Proficiency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Proficiency::Beginner => "Beginner",
            Proficiency::Intermediate => "Intermediate",
            Proficiency::Advanced => "Advanced",
            Proficiency::Expert => "Expert",
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SkillInput {
    pub skill_name: String,
    pub proficiency: Proficiency,
}

#[derive(Debug, Deserialize)]
pub struct ProjectInput {
    pub title: String,
    pub description: Option<String>,
    pub tech_stack: Option<String>,
    pub project_link: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ExperienceInput {
    pub company: String,
    pub role: String,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub achievements: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EducationInput {
    pub degree: String,
    pub university: String,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub gpa: Option<f64>,
}

fn required(field: &str, value: &str, max: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} cannot be empty")));
    }
    optional(field, Some(value), max)
}

fn optional(field: &str, value: Option<&str>, max: usize) -> Result<(), AppError> {
    match value {
        Some(v) if v.chars().count() > max => Err(AppError::Validation(format!(
            "{field} must be at most {max} characters"
        ))),
        _ => Ok(()),
    }
}

fn date_range(start: Option<Date>, end: Option<Date>) -> Result<(), AppError> {
    match (start, end) {
        (Some(s), Some(e)) if e < s => Err(AppError::Validation(
            "end_date cannot be before start_date".into(),
        )),
        _ => Ok(()),
    }
}

impl SkillInput {
    pub fn validate(&self) -> Result<(), AppError> {
        required("skill_name", &self.skill_name, 100)
    }
}

impl ProjectInput {
    pub fn validate(&self) -> Result<(), AppError> {
        required("title", &self.title, 150)?;
        optional("tech_stack", self.tech_stack.as_deref(), 200)?;
        optional("project_link", self.project_link.as_deref(), 200)
    }
}

impl ExperienceInput {
    pub fn validate(&self) -> Result<(), AppError> {
        required("company", &self.company, 150)?;
        required("role", &self.role, 100)?;
        date_range(self.start_date, self.end_date)
    }
}

impl EducationInput {
    pub fn validate(&self) -> Result<(), AppError> {
        required("degree", &self.degree, 100)?;
        required("university", &self.university, 150)?;
        date_range(self.start_date, self.end_date)?;
        match self.gpa {
            Some(g) if !(0.0..=4.0).contains(&g) => {
                Err(AppError::Validation("gpa must be between 0 and 4".into()))
            }
            _ => Ok(()),
        }
    }
}

/// Everything a user owns besides the account row.
#[derive(Debug, Default)]
pub struct ProfileSections {
    pub skills: Vec<Skill>,
    pub projects: Vec<Project>,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub interview_sessions: Vec<InterviewSession>,
    pub career_score: Option<CareerScore>,
}

/// Response of `GET /api/users/me`.
#[derive(Debug, Serialize)]
pub struct UserProfile {
    #[serde(flatten)]
    pub user: PublicUser,
    pub skills: Vec<Skill>,
    pub projects: Vec<Project>,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub interview_sessions: Vec<InterviewSession>,
    pub career_score: Option<CareerScore>,
}

impl UserProfile {
    pub fn new(user: PublicUser, s: ProfileSections) -> Self {
        Self {
            user,
            skills: s.skills,
            projects: s.projects,
            experience: s.experience,
            education: s.education,
            interview_sessions: s.interview_sessions,
            career_score: s.career_score,
        }
    }
}

#[cfg(test)]
mod tests {
    use time::{macros::date, OffsetDateTime};

    use super::*;

    #[test]
    fn skill_requires_name_and_known_proficiency() {
        let ok: SkillInput =
            serde_json::from_str(r#"{"skill_name":"Rust","proficiency":"Advanced"}"#).unwrap();
        assert!(ok.validate().is_ok());
        assert_eq!(ok.proficiency.as_str(), "Advanced");

        let blank: SkillInput =
            serde_json::from_str(r#"{"skill_name":"  ","proficiency":"Expert"}"#).unwrap();
        assert!(blank.validate().is_err());

        assert!(serde_json::from_str::<SkillInput>(
            r#"{"skill_name":"Rust","proficiency":"Wizard"}"#
        )
        .is_err());
    }

    #[test]
    fn project_length_limits() {
        let p = ProjectInput {
            title: "x".repeat(151),
            description: None,
            tech_stack: None,
            project_link: None,
        };
        assert!(p.validate().is_err());

        let p = ProjectInput {
            title: "Portfolio".into(),
            description: Some("long text ".repeat(100)),
            tech_stack: Some("Rust, Postgres".into()),
            project_link: Some("y".repeat(201)),
        };
        assert!(p.validate().is_err());
    }

    #[test]
    fn experience_dates_parse_and_must_be_ordered() {
        let e: ExperienceInput = serde_json::from_str(
            r#"{"company":"Acme","role":"Intern","start_date":"2023-06-01","end_date":"2023-09-01"}"#,
        )
        .unwrap();
        assert_eq!(e.start_date, Some(date!(2023 - 06 - 01)));
        assert!(e.validate().is_ok());

        let backwards = ExperienceInput {
            start_date: Some(date!(2024 - 01 - 01)),
            end_date: Some(date!(2023 - 01 - 01)),
            ..e
        };
        assert!(backwards.validate().is_err());
    }

    #[test]
    fn education_gpa_bounds() {
        let mut e = EducationInput {
            degree: "B.Tech".into(),
            university: "State University".into(),
            start_date: None,
            end_date: None,
            gpa: Some(3.6),
        };
        assert!(e.validate().is_ok());
        e.gpa = Some(4.5);
        assert!(e.validate().is_err());
        e.gpa = Some(-0.1);
        assert!(e.validate().is_err());
    }

    #[test]
    fn profile_flattens_user_fields() {
        let user = PublicUser {
            user_id: 7,
            full_name: "Test User".into(),
            email: "x@y.com".into(),
            role: "free".into(),
            join_date: OffsetDateTime::UNIX_EPOCH,
            last_login: None,
        };
        let mut sections = ProfileSections::default();
        sections.skills.push(Skill {
            skill_id: 1,
            user_id: 7,
            skill_name: "Rust".into(),
            proficiency: "Expert".into(),
        });
        let json = serde_json::to_value(UserProfile::new(user, sections)).unwrap();
        assert_eq!(json["user_id"], 7);
        assert_eq!(json["email"], "x@y.com");
        assert_eq!(json["join_date"], "1970-01-01T00:00:00Z");
        assert!(json["last_login"].is_null());
        assert_eq!(json["skills"][0]["skill_name"], "Rust");
        assert!(json["career_score"].is_null());
    }
}
