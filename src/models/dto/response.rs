use std::collections::BTreeMap;

use async_graphql::SimpleObject;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    models::domain::{
        user::{User, UserRole},
        Question, Quiz, QuizResult, Tier,
    },
    services::scoring::ScoreSummary,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
}

impl AuthResponse {
    pub fn bearer(access_token: String, refresh_token: String) -> Self {
        AuthResponse {
            access_token,
            refresh_token,
            token_type: "bearer".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDto {
    pub id: String,
    pub email: String,
    pub role: UserRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        UserDto {
            id: user.id,
            email: user.email,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, SimpleObject)]
pub struct QuizSummaryDto {
    pub id: String,
    pub topic: String,
    pub difficulty: String,
    pub question_count: u32,
}

impl From<&Quiz> for QuizSummaryDto {
    fn from(quiz: &Quiz) -> Self {
        QuizSummaryDto {
            id: quiz.id.clone(),
            topic: quiz.topic.clone(),
            difficulty: quiz.difficulty.clone(),
            question_count: quiz.question_count() as u32,
        }
    }
}

/// A question as shown to a student: no answer, no explanation, no provenance.
#[derive(Debug, Clone, Serialize, Deserialize, SimpleObject)]
pub struct QuestionForTaking {
    pub id: String,
    pub prompt: String,
    pub choices: Vec<String>,
    pub difficulty: Tier,
}

impl From<&Question> for QuestionForTaking {
    fn from(question: &Question) -> Self {
        QuestionForTaking {
            id: question.id.clone(),
            prompt: question.prompt.clone(),
            choices: question.choices.clone(),
            difficulty: question.difficulty,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, SimpleObject)]
pub struct QuizForTaking {
    pub id: String,
    pub topic: String,
    pub difficulty: String,
    pub questions: Vec<QuestionForTaking>,
}

impl From<&Quiz> for QuizForTaking {
    fn from(quiz: &Quiz) -> Self {
        QuizForTaking {
            id: quiz.id.clone(),
            topic: quiz.topic.clone(),
            difficulty: quiz.difficulty.clone(),
            questions: quiz.questions.iter().map(QuestionForTaking::from).collect(),
        }
    }
}

/// REST submission result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuizSubmissionResponse {
    pub score: u32,
    pub total: u32,
    pub correct_answers: BTreeMap<String, usize>,
    pub feedback: BTreeMap<String, String>,
    /// Answered questions left ungraded because their stored answer is unusable.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub flagged: Vec<String>,
}

impl From<ScoreSummary> for QuizSubmissionResponse {
    fn from(summary: ScoreSummary) -> Self {
        QuizSubmissionResponse {
            score: summary.score,
            total: summary.total,
            correct_answers: summary.correct_answers,
            feedback: summary.feedback,
            flagged: summary.flagged,
        }
    }
}

/// GraphQL submission result; the per-question maps flattened into a list.
#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct GradedSubmission {
    pub score: u32,
    pub total: u32,
    pub outcomes: Vec<QuestionOutcome>,
    pub flagged: Vec<String>,
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct QuestionOutcome {
    pub question_id: String,
    pub correct_index: u32,
    pub feedback: String,
}

impl From<ScoreSummary> for GradedSubmission {
    fn from(summary: ScoreSummary) -> Self {
        let mut feedback = summary.feedback;
        let outcomes = summary
            .correct_answers
            .into_iter()
            .map(|(question_id, correct_index)| QuestionOutcome {
                feedback: feedback.remove(&question_id).unwrap_or_default(),
                correct_index: correct_index as u32,
                question_id,
            })
            .collect();

        GradedSubmission {
            score: summary.score,
            total: summary.total,
            outcomes,
            flagged: summary.flagged,
        }
    }
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct QuizResultDto {
    pub id: String,
    pub quiz_id: String,
    pub topic: String,
    pub score: u32,
    pub total: u32,
    pub correct_count: u32,
    pub created_at: DateTime<Utc>,
}

impl From<QuizResult> for QuizResultDto {
    fn from(result: QuizResult) -> Self {
        QuizResultDto {
            id: result.id,
            quiz_id: result.quiz_id,
            topic: result.topic,
            score: result.score,
            total: result.total,
            correct_count: result.correct_count,
            created_at: result.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackResponse {
    pub feedback: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImprovementsResponse {
    pub improvements: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    pub reply: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiz_for_taking_hides_answers() {
        let quiz = Quiz::new(
            "algebra",
            "medium",
            vec![Question::placeholder("algebra", Some("Functions"), Tier::Medium)],
            None,
        );

        let json = serde_json::to_value(QuizForTaking::from(&quiz)).unwrap();
        let question = &json["questions"][0];

        assert!(question.get("correct_index").is_none());
        assert!(question.get("explanation").is_none());
        assert!(question.get("source").is_none());
        assert_eq!(question["choices"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn test_graded_submission_pairs_feedback_with_answers() {
        let mut summary = ScoreSummary {
            score: 700,
            total: 2,
            correct: 1,
            ..Default::default()
        };
        summary.correct_answers.insert("q1".into(), 1);
        summary.correct_answers.insert("q2".into(), 2);
        summary.feedback.insert("q1".into(), "Correct!".into());
        summary
            .feedback
            .insert("q2".into(), "Incorrect. The correct answer is: y".into());

        let graded = GradedSubmission::from(summary);

        assert_eq!(graded.score, 700);
        assert_eq!(graded.outcomes.len(), 2);
        assert_eq!(graded.outcomes[0].question_id, "q1");
        assert_eq!(graded.outcomes[0].feedback, "Correct!");
        assert_eq!(graded.outcomes[1].correct_index, 2);
    }

    #[test]
    fn test_submission_response_lists_flagged_questions_only_when_present() {
        let clean = ScoreSummary {
            score: 800,
            total: 1,
            correct: 1,
            ..Default::default()
        };
        let json = serde_json::to_value(QuizSubmissionResponse::from(clean)).unwrap();
        assert!(json.get("flagged").is_none());

        let broken = ScoreSummary {
            score: 600,
            total: 2,
            flagged: vec!["q2".into()],
            ..Default::default()
        };
        let json = serde_json::to_value(QuizSubmissionResponse::from(broken)).unwrap();
        assert_eq!(json["flagged"], serde_json::json!(["q2"]));
    }

    #[test]
    fn test_auth_response_is_bearer() {
        let response = AuthResponse::bearer("a".into(), "r".into());
        assert_eq!(response.token_type, "bearer");
    }
}
