use std::collections::HashMap;

use async_graphql::InputObject;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::{
    catalog::{CollegeSortKey, ScholarshipSortKey},
    essay::{EssayType, Rubric},
    Tier,
};

/// Canonical form of a user-supplied topic: trimmed and lowercased.
pub fn normalize_topic(topic: &str) -> String {
    topic.trim().to_lowercase()
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct GenerateQuestionRequest {
    #[validate(length(min = 1, max = 100))]
    pub topic: String,

    #[serde(default)]
    pub difficulty: Tier,

    #[validate(length(min = 1, max = 100))]
    pub subtopic: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct GenerateQuizRequest {
    #[validate(length(min = 1, max = 100))]
    pub topic: String,

    #[validate(range(min = 1, max = 25))]
    pub question_count: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct CreateQuizRequest {
    #[validate(length(min = 1, max = 100))]
    pub topic: String,

    #[serde(default)]
    pub difficulty: Tier,

    #[validate(length(min = 1, max = 50))]
    pub questions: Vec<QuestionInput>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QuestionInput {
    pub prompt: String,
    pub choices: Vec<String>,
    pub correct_index: usize,
    pub explanation: Option<String>,
    pub subtopic: Option<String>,
    pub difficulty: Option<Tier>,
}

/// Selected choice index per question id. Keys need not cover every question.
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct AnswerSubmission {
    #[validate(length(min = 1))]
    pub quiz_id: String,

    #[serde(default)]
    pub answers: HashMap<String, usize>,
}

#[derive(Debug, Clone, Deserialize, Validate, InputObject)]
pub struct AnswerInput {
    pub question_id: String,
    pub selected_index: u32,
}

#[derive(Debug, Clone, Deserialize, Validate, InputObject)]
pub struct SubmitQuizInput {
    #[validate(length(min = 1))]
    pub quiz_id: String,
    pub answers: Vec<AnswerInput>,
}

impl From<SubmitQuizInput> for AnswerSubmission {
    fn from(input: SubmitQuizInput) -> Self {
        AnswerSubmission {
            quiz_id: input.quiz_id,
            answers: input
                .answers
                .into_iter()
                .map(|a| (a.question_id, a.selected_index as usize))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct FlashcardRequest {
    #[validate(length(min = 1, max = 100))]
    pub topic: String,

    pub subtopic: Option<String>,

    #[validate(range(min = 1, max = 20))]
    pub count: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct EssayRequest {
    #[validate(length(min = 1, max = 20000))]
    pub content: String,

    #[serde(default)]
    pub essay_type: EssayType,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct CvRequest {
    #[validate(length(min = 1, max = 20000))]
    pub content: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct EssayScoreRequest {
    #[validate(length(min = 1, max = 20000))]
    pub content: String,

    #[serde(default)]
    pub rubric: Rubric,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct ChatRequest {
    #[validate(length(min = 1, max = 4000))]
    pub message: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CollegeSearchParams {
    pub q: Option<String>,
    pub min_sat: Option<u32>,
    pub max_tuition: Option<u32>,
    pub country: Option<String>,
    /// Acceptance rate bounds, in percent.
    pub min_acceptance: Option<f64>,
    pub max_acceptance: Option<f64>,
    /// Catalog order when absent.
    pub sort_by: Option<CollegeSortKey>,
    pub ascending: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ScholarshipSearchParams {
    pub q: Option<String>,
    pub min_amount: Option<u32>,
    pub country: Option<String>,
    pub deadline_after: Option<NaiveDate>,
    pub sort_by: Option<ScholarshipSortKey>,
    pub ascending: Option<bool>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct PaginationParams {
    #[validate(range(min = 0))]
    pub offset: Option<i64>,

    #[validate(range(min = 1, max = 100))]
    pub limit: Option<i64>,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            offset: Some(0),
            limit: Some(20),
        }
    }
}

impl PaginationParams {
    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }

    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(20).clamp(1, 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topics_are_trimmed_and_lowercased() {
        assert_eq!(normalize_topic("  Algebra "), "algebra");
        assert_eq!(normalize_topic("word_problems"), "word_problems");
    }

    #[test]
    fn test_valid_register_request() {
        let request = RegisterRequest {
            email: "student@example.com".to_string(),
            password: "correct horse".to_string(),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_register_rejects_bad_email_and_short_password() {
        let request = RegisterRequest {
            email: "not-an-email".to_string(),
            password: "correct horse".to_string(),
        };
        assert!(request.validate().is_err());

        let request = RegisterRequest {
            email: "student@example.com".to_string(),
            password: "short".to_string(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_quiz_length_bounds() {
        let mut request = GenerateQuizRequest {
            topic: "algebra".to_string(),
            question_count: None,
        };
        assert!(request.validate().is_ok());

        request.question_count = Some(25);
        assert!(request.validate().is_ok());

        request.question_count = Some(0);
        assert!(request.validate().is_err());

        request.question_count = Some(26);
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_submission_defaults_to_no_answers() {
        let submission: AnswerSubmission = serde_json::from_str(r#"{"quiz_id": "q"}"#).unwrap();
        assert!(submission.answers.is_empty());
    }

    #[test]
    fn test_graphql_input_converts_to_submission() {
        let input = SubmitQuizInput {
            quiz_id: "quiz-1".to_string(),
            answers: vec![
                AnswerInput {
                    question_id: "a".to_string(),
                    selected_index: 2,
                },
                AnswerInput {
                    question_id: "b".to_string(),
                    selected_index: 0,
                },
            ],
        };

        let submission = AnswerSubmission::from(input);
        assert_eq!(submission.quiz_id, "quiz-1");
        assert_eq!(submission.answers["a"], 2);
        assert_eq!(submission.answers["b"], 0);
    }

    #[test]
    fn test_pagination_clamps_limits() {
        let params = PaginationParams {
            offset: Some(-5),
            limit: Some(1000),
        };
        assert_eq!(params.offset(), 0);
        assert_eq!(params.limit(), 100);
        assert_eq!(PaginationParams::default().limit(), 20);
    }
}
