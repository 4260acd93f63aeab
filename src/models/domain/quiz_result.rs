use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::services::scoring::ScoreSummary;

/// Append-only record of one submission.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizResult {
    pub id: String,
    pub user_id: String,
    pub quiz_id: String,
    pub topic: String,
    pub score: u32,
    pub total: u32,
    pub correct_count: u32,
    pub answered_count: u32,
    pub correct_answers: BTreeMap<String, usize>,
    pub feedback: BTreeMap<String, String>,
    pub created_at: DateTime<Utc>,
}

impl QuizResult {
    pub fn from_summary(user_id: &str, quiz_id: &str, topic: &str, summary: &ScoreSummary) -> Self {
        QuizResult {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            quiz_id: quiz_id.to_string(),
            topic: topic.to_string(),
            score: summary.score,
            total: summary.total,
            correct_count: summary.correct,
            answered_count: summary.correct_answers.len() as u32,
            correct_answers: summary.correct_answers.clone(),
            feedback: summary.feedback.clone(),
            created_at: Utc::now(),
        }
    }

    pub fn incorrect_count(&self) -> u32 {
        self.answered_count.saturating_sub(self.correct_count)
    }
}
