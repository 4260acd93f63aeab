use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    errors::{AppError, AppResult},
    models::domain::tier::Tier,
};

pub const CHOICE_COUNT: usize = 4;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Question {
    pub id: String,
    pub prompt: String,
    pub choices: Vec<String>,
    pub correct_index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    pub topic: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtopic: Option<String>,
    pub difficulty: Tier,
    #[serde(default)]
    pub source: QuestionSource,
}

/// Where a question's content came from. Stored for operators, never shown to students.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum QuestionSource {
    #[default]
    Authored,
    Generated,
    Placeholder,
}

impl Question {
    pub fn new(
        prompt: impl Into<String>,
        choices: Vec<String>,
        correct_index: usize,
        topic: impl Into<String>,
        difficulty: Tier,
    ) -> Self {
        Question {
            id: Uuid::new_v4().to_string(),
            prompt: prompt.into(),
            choices,
            correct_index,
            explanation: None,
            topic: topic.into(),
            subtopic: None,
            difficulty,
            source: QuestionSource::Authored,
        }
    }

    pub fn with_explanation(mut self, explanation: Option<String>) -> Self {
        self.explanation = explanation;
        self
    }

    pub fn with_subtopic(mut self, subtopic: Option<String>) -> Self {
        self.subtopic = subtopic;
        self
    }

    pub fn with_source(mut self, source: QuestionSource) -> Self {
        self.source = source;
        self
    }

    /// Substitute used when generation or parsing fails. Choice 0 is marked correct.
    pub fn placeholder(topic: &str, subtopic: Option<&str>, difficulty: Tier) -> Self {
        let about = subtopic.unwrap_or(topic);
        Question::new(
            format!("Sample {} question about {}", topic, about),
            ["Option A", "Option B", "Option C", "Option D"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            0,
            topic,
            difficulty,
        )
        .with_explanation(Some("This is a placeholder explanation.".to_string()))
        .with_subtopic(subtopic.map(str::to_string))
        .with_source(QuestionSource::Placeholder)
    }

    pub fn correct_choice(&self) -> Option<&str> {
        self.choices.get(self.correct_index).map(String::as_str)
    }

    pub fn is_placeholder(&self) -> bool {
        self.source == QuestionSource::Placeholder
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.choices.len() != CHOICE_COUNT {
            return Err(AppError::InvariantViolation(format!(
                "Question '{}' has {} choices, expected {}",
                self.id,
                self.choices.len(),
                CHOICE_COUNT
            )));
        }
        if self.correct_choice().is_none() {
            return Err(AppError::InvariantViolation(format!(
                "Question '{}' has correct index {} outside its choices",
                self.id, self.correct_index
            )));
        }
        Ok(())
    }
}
