use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub struct Flashcard {
    pub front: String,
    pub back: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub struct Recommendation {
    pub topic: String,
    pub action: String,
    pub resource: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProgressReport {
    pub quizzes_taken: usize,
    pub average_score: f64,
    pub topic_accuracy: Vec<TopicAccuracy>,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub recommendations: Vec<Recommendation>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TopicAccuracy {
    pub topic: String,
    pub correct: u32,
    pub total: u32,
    pub accuracy: f64,
}
