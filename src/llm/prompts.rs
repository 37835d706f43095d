use super::{GenerationConfig, Prompt};

pub const INTERVIEW_QUESTION_COUNT: usize = 8;

const CAREER_SCOPE: &str = "You are a career assistant. Only answer questions about careers, \
jobs, job market, and skills. If the question is outside this scope, politely decline.";

const RESUME_REVIEWER: &str = "You are an expert career coach and recruiter specializing in \
helping students from Tier 2/3 colleges land jobs at top companies.
Your feedback must be constructive, encouraging, and highly actionable.
Analyze the resume for ATS compatibility, impact metrics, action verbs, and clarity.
Provide feedback in simple markdown format.";

const MARKET_ANALYST: &str = r#"You are a job market analyst.
Provide key insights for a specific job title.
Respond ONLY with valid JSON in this format:
{
  "averageSalary": "string (e.g. '$120,000 USD')",
  "demand": "string (e.g. 'High' or 'Growing by 15%')",
  "topSkills": [
    { "name": "string", "importance": number (1-100) }
  ]
}
Provide 5-10 top skills dynamically based on the role."#;

/// Display name for a self-identified character profile key.
pub fn character_profile_name(key: &str) -> Option<&'static str> {
    match key {
        "Explorer" => Some("The Explorer"),
        "Captain" => Some("The Captain"),
        "Connector" => Some("The Connector"),
        "Challenger" => Some("The Challenger"),
        "DeepDiver" => Some("The Deep Diver"),
        _ => None,
    }
}

pub fn career_roadmap(job_title: &str) -> Prompt {
    let text = format!(
        "Act as an expert career coach. A user wants to become a '{job_title}'.
Provide a clear, encouraging, and structured career roadmap for them.
The response must be in Markdown format and include these three sections exactly as titled below:

### Potential Career Path
List 3-5 potential roles, starting from an entry-level position and progressing upwards.

### Key Skills to Master
List 5-7 crucial technical and soft skills required for a '{job_title}'. Briefly explain why each is important.

### Sample Interview Questions
Provide 3 insightful interview questions for a '{job_title}' role: one behavioral, one technical, and one situational."
    );
    Prompt {
        system: None,
        text,
        config: GenerationConfig::default(),
    }
}

pub fn interview_questions(role: &str) -> Prompt {
    let n = INTERVIEW_QUESTION_COUNT;
    let text = format!(
        "Generate {n} interview questions for the role of {role} in a professional setting.
Number them 1-{n} and make each question on a new line.
Focus on behavioral, technical, and situational questions appropriate for this role."
    );
    Prompt {
        system: None,
        text,
        config: GenerationConfig {
            temperature: 0.8,
            top_p: 0.9,
            top_k: 40,
            max_output_tokens: 1024,
        },
    }
}

pub fn interview_feedback(question: &str, user_answer: &str) -> Prompt {
    let text = format!(
        "Act as a friendly but professional FAANG interviewer. A candidate was asked the following question:
**Question:** \"{question}\"

Here is their answer:
**Answer:** \"{user_answer}\"

Please provide constructive feedback on their answer in Markdown format. The feedback should include:
1. **Overall Impression:** A brief summary of how they did.
2. **Strengths:** 2-3 bullet points on what was good about their answer.
3. **Areas for Improvement:** 2-3 bullet points with specific, actionable advice on how they could make their answer better.
Keep the tone encouraging and helpful."
    );
    Prompt {
        system: None,
        text,
        config: GenerationConfig::default(),
    }
}

pub fn resume_review(
    resume_text: &str,
    college_tier: &str,
    character_profile_key: &str,
    skills: &[String],
) -> Prompt {
    let profile = character_profile_name(character_profile_key).unwrap_or("Not specified");
    let skills = if skills.is_empty() {
        "Not specified".to_string()
    } else {
        skills.join(", ")
    };
    let text = format!(
        "Please review the following resume for a student from a {college_tier} college.
Their self-identified character profile on CareerBridge is \"{profile}\".
Their target skills are: {skills}.

Resume Text:
---
{resume_text}
---

Provide a review with the following structure:
### Overall Impression
(A brief, encouraging summary)

### ATS Compatibility Score: [Give a score out of 10]
(Briefly explain why, mentioning keywords and formatting)

### Actionable Feedback (Bulleted List)
- Point 1
- Point 2
- Point 3"
    );
    Prompt {
        system: Some(RESUME_REVIEWER.to_string()),
        text,
        config: GenerationConfig::default(),
    }
}

pub fn market_insights(job_title: &str) -> Prompt {
    Prompt {
        system: Some(MARKET_ANALYST.to_string()),
        text: format!("Provide job market insights for a \"{job_title}\"."),
        config: GenerationConfig {
            temperature: 0.4,
            ..GenerationConfig::default()
        },
    }
}

pub fn chatbot(message: &str) -> Prompt {
    Prompt {
        system: Some(CAREER_SCOPE.to_string()),
        text: format!("Question: {message}"),
        config: GenerationConfig::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resume_prompt_resolves_profile_and_skills() {
        let p = resume_review(
            "Built things.",
            "Tier 1",
            "DeepDiver",
            &["Rust".to_string(), "SQL".to_string()],
        );
        assert!(p.text.contains("from a Tier 1 college"));
        assert!(p.text.contains("\"The Deep Diver\""));
        assert!(p.text.contains("Their target skills are: Rust, SQL."));
        assert!(p.text.contains("Built things."));
        assert!(p.system.as_deref().unwrap().contains("ATS compatibility"));
    }

    #[test]
    fn resume_prompt_defaults_unknown_profile() {
        let p = resume_review("cv", "Tier 2/3", "Wanderer", &[]);
        assert!(p.text.contains("\"Not specified\""));
        assert!(p.text.contains("Their target skills are: Not specified."));
    }

    #[test]
    fn interview_prompt_asks_for_numbered_list() {
        let p = interview_questions("Backend Engineer");
        assert!(p.text.starts_with("Generate 8 interview questions for the role of Backend Engineer"));
        assert!(p.text.contains("Number them 1-8"));
        assert_eq!(p.config.max_output_tokens, 1024);
    }

    #[test]
    fn market_prompt_demands_json() {
        let p = market_insights("Data Analyst");
        assert!(p.system.as_deref().unwrap().contains("Respond ONLY with valid JSON"));
        assert_eq!(p.text, "Provide job market insights for a \"Data Analyst\".");
    }

    #[test]
    fn chatbot_prompt_is_scoped() {
        let p = chatbot("How do I become a PM?");
        assert!(p.system.as_deref().unwrap().contains("politely decline"));
        assert!(p.text.ends_with("How do I become a PM?"));
    }

    #[test]
    fn roadmap_mentions_title_in_every_section() {
        let p = career_roadmap("Cloud Architect");
        assert_eq!(p.text.matches("'Cloud Architect'").count(), 3);
        assert!(p.text.contains("### Key Skills to Master"));
    }
}
