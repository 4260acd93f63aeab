use std::{sync::Arc, time::Duration};

use schemars::schema_for;
use validator::Validate;

use crate::{
    config::Config,
    constants::prompts,
    errors::{AppError, AppResult},
    models::{
        domain::{
            essay::{EssayScore, EssayType},
            Essay,
        },
        dto::request::{CvRequest, EssayRequest, EssayScoreRequest},
    },
    repositories::EssayRepository,
    services::text_generation::{generate_with_timeout, parse_json_reply, TextGenerator},
};

const ESSAY_SCORE_SCHEMA: &str = "essay_score";

pub struct EssayService {
    repository: Arc<dyn EssayRepository>,
    generator: Arc<dyn TextGenerator>,
    timeout: Duration,
}

impl EssayService {
    pub fn new(
        repository: Arc<dyn EssayRepository>,
        generator: Arc<dyn TextGenerator>,
        config: &Config,
    ) -> Self {
        Self {
            repository,
            generator,
            timeout: config.generation_timeout(),
        }
    }

    async fn feedback_for(&self, prompt: &str) -> AppResult<String> {
        Ok(generate_with_timeout(self.generator.as_ref(), prompt, self.timeout).await?)
    }

    pub async fn submit_essay(&self, user_id: &str, request: EssayRequest) -> AppResult<Essay> {
        request.validate()?;

        let feedback = self
            .feedback_for(&prompts::essay_feedback_prompt(&request.content))
            .await?;

        self.repository
            .create(Essay::new(user_id, &request.content, &feedback, request.essay_type))
            .await
    }

    pub async fn submit_cv(&self, user_id: &str, request: CvRequest) -> AppResult<Essay> {
        request.validate()?;

        let feedback = self
            .feedback_for(&prompts::cv_feedback_prompt(&request.content))
            .await?;

        self.repository
            .create(Essay::new(user_id, &request.content, &feedback, EssayType::CvResume))
            .await
    }

    pub async fn list_essays(&self, user_id: &str) -> AppResult<Vec<Essay>> {
        self.repository.list_by_user(user_id).await
    }

    /// Suggestions for one of the caller's stored essays. Another user's essay
    /// is reported as missing.
    pub async fn improvements(&self, user_id: &str, essay_id: &str) -> AppResult<String> {
        let essay = self
            .repository
            .find_by_id(essay_id)
            .await?
            .filter(|essay| essay.user_id == user_id)
            .ok_or_else(|| AppError::NotFound(format!("Essay with id '{}' not found", essay_id)))?;

        self.feedback_for(&prompts::improvements_prompt(&essay.content, &essay.feedback))
            .await
    }

    /// Rubric scoring. Falls back to a neutral score when generation or parsing fails.
    pub async fn score_essay(&self, request: EssayScoreRequest) -> AppResult<EssayScore> {
        request.validate()?;

        let rubric = request.rubric;
        let prompt =
            prompts::essay_score_prompt(&request.content, rubric.criteria(), rubric.max_score());
        let schema = serde_json::to_value(schema_for!(EssayScore)).unwrap_or_default();

        let reply = tokio::time::timeout(
            self.timeout,
            self.generator
                .generate_structured(&prompt, ESSAY_SCORE_SCHEMA, schema),
        )
        .await;

        let score = match reply {
            Ok(Ok(text)) => parse_json_reply::<EssayScore>(&text).map_err(|e| e.to_string()),
            Ok(Err(e)) => Err(e.to_string()),
            Err(_) => Err(format!("timed out after {}s", self.timeout.as_secs())),
        };

        Ok(score.unwrap_or_else(|reason| {
            log::warn!("Essay scoring fell back to default rubric score: {}", reason);
            EssayScore::fallback(rubric)
        }))
    }
}
