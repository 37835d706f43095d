use sqlx::PgPool;

use super::{
    dto::{EducationInput, ExperienceInput, ProfileSections, ProjectInput, SkillInput},
    repo_types::{CareerScore, Education, Experience, InterviewSession, Project, Skill},
};

// ---- Skills ----

pub async fn insert_skill(db: &PgPool, user_id: i64, input: &SkillInput) -> sqlx::Result<Skill> {
    sqlx::query_as::<_, Skill>(
        r#"
        INSERT INTO skills (user_id, skill_name, proficiency)
        VALUES ($1, $2, $3)
        RETURNING skill_id, user_id, skill_name, proficiency
        "#,
    )
    .bind(user_id)
    .bind(input.skill_name.trim())
    .bind(input.proficiency.as_str())
    .fetch_one(db)
    .await
}

/// Updates a skill owned by `user_id`; `None` when no such row is theirs.
pub async fn update_skill(
    db: &PgPool,
    user_id: i64,
    skill_id: i64,
    input: &SkillInput,
) -> sqlx::Result<Option<Skill>> {
    sqlx::query_as::<_, Skill>(
        r#"
        UPDATE skills
           SET skill_name = $3, proficiency = $4
         WHERE skill_id = $1 AND user_id = $2
        RETURNING skill_id, user_id, skill_name, proficiency
        "#,
    )
    .bind(skill_id)
    .bind(user_id)
    .bind(input.skill_name.trim())
    .bind(input.proficiency.as_str())
    .fetch_optional(db)
    .await
}

pub async fn delete_skill(db: &PgPool, user_id: i64, skill_id: i64) -> sqlx::Result<bool> {
    let res = sqlx::query("DELETE FROM skills WHERE skill_id = $1 AND user_id = $2")
        .bind(skill_id)
        .bind(user_id)
        .execute(db)
        .await?;
    Ok(res.rows_affected() > 0)
}

pub async fn list_skills(db: &PgPool, user_id: i64) -> sqlx::Result<Vec<Skill>> {
    sqlx::query_as::<_, Skill>(
        r#"
        SELECT skill_id, user_id, skill_name, proficiency
          FROM skills
         WHERE user_id = $1
         ORDER BY skill_id
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await
}

// ---- Projects ----

pub async fn insert_project(
    db: &PgPool,
    user_id: i64,
    input: &ProjectInput,
) -> sqlx::Result<Project> {
    sqlx::query_as::<_, Project>(
        r#"
        INSERT INTO projects (user_id, title, description, tech_stack, project_link)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING project_id, user_id, title, description, tech_stack, project_link
        "#,
    )
    .bind(user_id)
    .bind(input.title.trim())
    .bind(input.description.as_deref())
    .bind(input.tech_stack.as_deref())
    .bind(input.project_link.as_deref())
    .fetch_one(db)
    .await
}

pub async fn list_projects(db: &PgPool, user_id: i64) -> sqlx::Result<Vec<Project>> {
    sqlx::query_as::<_, Project>(
        r#"
        SELECT project_id, user_id, title, description, tech_stack, project_link
          FROM projects
         WHERE user_id = $1
         ORDER BY project_id
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await
}

// ---- Experience ----

pub async fn insert_experience(
    db: &PgPool,
    user_id: i64,
    input: &ExperienceInput,
) -> sqlx::Result<Experience> {
    sqlx::query_as::<_, Experience>(
        r#"
        INSERT INTO experience (user_id, company, role, start_date, end_date, achievements)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING exp_id, user_id, company, role, start_date, end_date, achievements
        "#,
    )
    .bind(user_id)
    .bind(input.company.trim())
    .bind(input.role.trim())
    .bind(input.start_date)
    .bind(input.end_date)
    .bind(input.achievements.as_deref())
    .fetch_one(db)
    .await
}

pub async fn list_experience(db: &PgPool, user_id: i64) -> sqlx::Result<Vec<Experience>> {
    sqlx::query_as::<_, Experience>(
        r#"
        SELECT exp_id, user_id, company, role, start_date, end_date, achievements
          FROM experience
         WHERE user_id = $1
         ORDER BY start_date DESC NULLS LAST, exp_id
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await
}

// ---- Education ----

pub async fn insert_education(
    db: &PgPool,
    user_id: i64,
    input: &EducationInput,
) -> sqlx::Result<Education> {
    sqlx::query_as::<_, Education>(
        r#"
        INSERT INTO education (user_id, degree, university, start_date, end_date, gpa)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING edu_id, user_id, degree, university, start_date, end_date, gpa
        "#,
    )
    .bind(user_id)
    .bind(input.degree.trim())
    .bind(input.university.trim())
    .bind(input.start_date)
    .bind(input.end_date)
    .bind(input.gpa)
    .fetch_one(db)
    .await
}

pub async fn list_education(db: &PgPool, user_id: i64) -> sqlx::Result<Vec<Education>> {
    sqlx::query_as::<_, Education>(
        r#"
        SELECT edu_id, user_id, degree, university, start_date, end_date, gpa
          FROM education
         WHERE user_id = $1
         ORDER BY start_date DESC NULLS LAST, edu_id
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await
}

// ---- Interview sessions ----

pub async fn insert_interview_session(
    db: &PgPool,
    user_id: i64,
    question: &str,
    user_answer: &str,
    ai_feedback: &str,
    score: f64,
) -> sqlx::Result<InterviewSession> {
    sqlx::query_as::<_, InterviewSession>(
        r#"
        INSERT INTO interview_sessions (user_id, question, user_answer, ai_feedback, score)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING session_id, user_id, question, user_answer, ai_feedback, score, created_at
        "#,
    )
    .bind(user_id)
    .bind(question)
    .bind(user_answer)
    .bind(ai_feedback)
    .bind(score)
    .fetch_one(db)
    .await
}

pub async fn list_interview_sessions(
    db: &PgPool,
    user_id: i64,
) -> sqlx::Result<Vec<InterviewSession>> {
    sqlx::query_as::<_, InterviewSession>(
        r#"
        SELECT session_id, user_id, question, user_answer, ai_feedback, score, created_at
          FROM interview_sessions
         WHERE user_id = $1
         ORDER BY created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await
}

// ---- Career score ----

pub async fn get_career_score(db: &PgPool, user_id: i64) -> sqlx::Result<Option<CareerScore>> {
    sqlx::query_as::<_, CareerScore>(
        r#"
        SELECT score_id, user_id, career_score, interview_success, market_position,
               active_streak, updated_at
          FROM career_scores
         WHERE user_id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(db)
    .await
}

/// Loads every profile section for one user concurrently.
pub async fn load_sections(db: &PgPool, user_id: i64) -> sqlx::Result<ProfileSections> {
    let (skills, projects, experience, education, interview_sessions, career_score) = tokio::try_join!(
        list_skills(db, user_id),
        list_projects(db, user_id),
        list_experience(db, user_id),
        list_education(db, user_id),
        list_interview_sessions(db, user_id),
        get_career_score(db, user_id),
    )?;
    Ok(ProfileSections {
        skills,
        projects,
        experience,
        education,
        interview_sessions,
        career_score,
    })
}
