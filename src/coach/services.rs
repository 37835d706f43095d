use tracing::{info, warn};

use super::dto::{MarketInsights, ResumeReviewRequest};
use crate::{
    errors::AppError,
    llm::{self, prompts, TextGenerator},
};

pub async fn career_roadmap(gen: &dyn TextGenerator, job_title: &str) -> Result<String, AppError> {
    let roadmap = gen.generate(&prompts::career_roadmap(job_title.trim())).await?;
    info!("career roadmap generated");
    Ok(roadmap)
}

pub async fn interview_questions(
    gen: &dyn TextGenerator,
    role: &str,
) -> Result<Vec<String>, AppError> {
    let text = gen.generate(&prompts::interview_questions(role.trim())).await?;
    let questions = llm::parse_numbered_lines(&text, prompts::INTERVIEW_QUESTION_COUNT);
    if questions.is_empty() {
        warn!("model output contained no numbered questions");
        return Err(AppError::Unavailable(
            "Unable to generate questions at this time.".into(),
        ));
    }
    Ok(questions)
}

pub async fn interview_feedback(
    gen: &dyn TextGenerator,
    question: &str,
    user_answer: &str,
) -> Result<String, AppError> {
    Ok(gen
        .generate(&prompts::interview_feedback(question, user_answer))
        .await?)
}

pub async fn resume_review(
    gen: &dyn TextGenerator,
    req: &ResumeReviewRequest,
) -> Result<String, AppError> {
    let prompt = prompts::resume_review(
        &req.resume_text,
        &req.college_tier,
        req.character_profile_key.as_deref().unwrap_or_default(),
        &req.skills,
    );
    Ok(gen.generate(&prompt).await?)
}

pub async fn market_insights(
    gen: &dyn TextGenerator,
    job_title: &str,
) -> Result<MarketInsights, AppError> {
    info!(job_title, "generating market insights");
    let insights: MarketInsights =
        llm::generate_json(gen, &prompts::market_insights(job_title.trim())).await?;
    Ok(insights)
}

pub async fn chat(gen: &dyn TextGenerator, message: &str) -> Result<String, AppError> {
    Ok(gen.generate(&prompts::chatbot(message.trim())).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::fake::CannedGenerator;

    #[tokio::test]
    async fn questions_are_capped_at_eight() {
        let text = (1..=10)
            .map(|i| format!("{i}. Question number {i}?"))
            .collect::<Vec<_>>()
            .join("\n");
        let gen = CannedGenerator(Some(text));
        let qs = interview_questions(&gen, "SRE").await.unwrap();
        assert_eq!(qs.len(), 8);
        assert_eq!(qs[0], "Question number 1?");
    }

    #[tokio::test]
    async fn unnumbered_output_is_unavailable() {
        let gen = CannedGenerator(Some("I cannot help with that.".into()));
        assert!(matches!(
            interview_questions(&gen, "SRE").await,
            Err(AppError::Unavailable(_))
        ));
    }

    #[tokio::test]
    async fn unconfigured_generator_is_unavailable() {
        let gen = CannedGenerator(None);
        assert!(matches!(
            career_roadmap(&gen, "Designer").await,
            Err(AppError::Unavailable(_))
        ));
    }

    #[tokio::test]
    async fn malformed_market_json_is_bad_gateway() {
        let gen = CannedGenerator(Some("{\"averageSalary\": 12".into()));
        assert!(matches!(
            market_insights(&gen, "Designer").await,
            Err(AppError::BadGateway(_))
        ));
    }
}
