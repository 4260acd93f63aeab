use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Essay {
    pub id: String,
    pub user_id: String,
    pub content: String,
    pub feedback: String,
    pub essay_type: EssayType,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EssayType {
    #[default]
    CollegeApp,
    Sat,
    PersonalStatement,
    CvResume,
}

impl Essay {
    pub fn new(user_id: &str, content: &str, feedback: &str, essay_type: EssayType) -> Self {
        Essay {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            content: content.to_string(),
            feedback: feedback.to_string(),
            essay_type,
            created_at: Utc::now(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Rubric {
    #[default]
    CollegeApp,
    Sat,
}

impl Rubric {
    pub fn criteria(&self) -> &'static [&'static str] {
        match self {
            Rubric::CollegeApp => &[
                "Originality and authenticity",
                "Structure and organization",
                "Grammar and mechanics",
                "Clarity and coherence",
                "Impact and memorability",
            ],
            Rubric::Sat => &[
                "Reading comprehension",
                "Analysis of argument",
                "Writing clarity",
                "Grammar and usage",
                "Overall essay effectiveness",
            ],
        }
    }

    pub fn max_score(&self) -> u32 {
        match self {
            Rubric::CollegeApp => 10,
            Rubric::Sat => 8,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize, JsonSchema)]
pub struct EssayScore {
    pub overall_score: f64,
    pub detailed_scores: BTreeMap<String, CriterionScore>,
    pub summary: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize, JsonSchema)]
pub struct CriterionScore {
    pub score: f64,
    pub feedback: String,
}

impl EssayScore {
    pub fn fallback(rubric: Rubric) -> Self {
        EssayScore {
            overall_score: 7.0,
            detailed_scores: rubric
                .criteria()
                .iter()
                .map(|criterion| {
                    (
                        criterion.to_string(),
                        CriterionScore {
                            score: 7.0,
                            feedback: "Feedback unavailable".to_string(),
                        },
                    )
                })
                .collect(),
            summary: "Essay scoring service encountered an error. Please try again later."
                .to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_score_covers_every_criterion() {
        let score = EssayScore::fallback(Rubric::Sat);

        assert_eq!(score.detailed_scores.len(), Rubric::Sat.criteria().len());
        assert!(score
            .detailed_scores
            .values()
            .all(|c| c.score == 7.0 && c.feedback == "Feedback unavailable"));
    }

    #[test]
    fn essay_type_uses_snake_case() {
        assert_eq!(
            serde_json::to_string(&EssayType::CvResume).unwrap(),
            "\"cv_resume\""
        );
    }
}
