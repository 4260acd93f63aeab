use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{errors::AppResult, models::domain::question::Question};

/// Questions keep insertion order, which is also presentation order.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Quiz {
    pub id: String,
    pub topic: String,
    pub difficulty: String,
    pub questions: Vec<Question>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Quiz {
    pub fn new(
        topic: &str,
        difficulty: &str,
        questions: Vec<Question>,
        created_by: Option<&str>,
    ) -> Self {
        Quiz {
            id: Uuid::new_v4().to_string(),
            topic: topic.to_string(),
            difficulty: difficulty.to_string(),
            questions,
            created_by: created_by.map(str::to_string),
            created_at: Some(Utc::now()),
        }
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    pub fn validate(&self) -> AppResult<()> {
        self.questions.iter().try_for_each(Question::validate)
    }
}
