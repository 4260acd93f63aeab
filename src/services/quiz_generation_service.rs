use std::{sync::Arc, time::Duration};

use futures::future::join_all;
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

use crate::{
    config::Config,
    constants::{prompts, topics::subtopics_for},
    models::domain::{
        question::QuestionSource,
        study::{Flashcard, Recommendation},
        Question, Tier,
    },
    services::{
        difficulty::{tier_sequence, PerformanceHistory},
        question_parser::parse_generated_question,
        text_generation::{generate_with_timeout, parse_json_reply, GenerationError, TextGenerator},
    },
};

/// One slot of a quiz to be generated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionSlot {
    pub difficulty: Tier,
    pub subtopic: Option<String>,
}

/// Uniform pick from the topic's subtopic table; `None` for topics outside it.
pub fn choose_subtopic<R: Rng + ?Sized>(topic: &str, rng: &mut R) -> Option<String> {
    subtopics_for(topic)
        .and_then(|subtopics| subtopics.choose(rng))
        .map(|subtopic| subtopic.to_string())
}

/// Difficulty drift and subtopic for each of `count` questions.
pub fn plan_quiz<R: Rng + ?Sized>(
    topic: &str,
    history: &PerformanceHistory,
    count: usize,
    rng: &mut R,
) -> Vec<QuestionSlot> {
    tier_sequence(history, count, rng)
        .into_iter()
        .map(|difficulty| QuestionSlot {
            difficulty,
            subtopic: choose_subtopic(topic, rng),
        })
        .collect()
}

fn subject(topic: &str, subtopic: Option<&str>) -> String {
    match subtopic {
        Some(subtopic) => format!("{} in {}", subtopic, topic),
        None => topic.to_string(),
    }
}

fn placeholder_flashcards(topic: &str, subtopic: Option<&str>, count: u32) -> Vec<Flashcard> {
    let front = format!("Key formula for {}", subject(topic, subtopic));
    (0..count)
        .map(|_| Flashcard {
            front: front.clone(),
            back: "This is a placeholder explanation".to_string(),
        })
        .collect()
}

#[derive(serde::Deserialize)]
struct RecommendationsReply {
    #[serde(default)]
    recommendations: Vec<Recommendation>,
}

pub fn fallback_recommendations() -> Vec<Recommendation> {
    vec![Recommendation {
        topic: "general".to_string(),
        action: "Review your weakest topics".to_string(),
        resource: "SAT practice questions".to_string(),
    }]
}

/// Turns generated text into questions and flashcards. Never fails: every
/// generation or parse failure degrades to a placeholder and a warning.
pub struct QuizGenerationService {
    generator: Arc<dyn TextGenerator>,
    timeout: Duration,
    rng_seed: Option<u64>,
}

impl QuizGenerationService {
    pub fn new(generator: Arc<dyn TextGenerator>, config: &Config) -> Self {
        Self {
            generator,
            timeout: config.generation_timeout(),
            rng_seed: config.quiz_rng_seed,
        }
    }

    /// Fresh random source per request, fixed when a seed is configured.
    pub fn rng(&self) -> StdRng {
        match self.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    async fn generate_text(&self, prompt: &str) -> Result<String, GenerationError> {
        generate_with_timeout(self.generator.as_ref(), prompt, self.timeout).await
    }

    pub async fn generate_question(
        &self,
        topic: &str,
        subtopic: Option<&str>,
        difficulty: Tier,
    ) -> Question {
        let subtopic = match subtopic {
            Some(subtopic) => Some(subtopic.to_string()),
            None => choose_subtopic(topic, &mut self.rng()),
        };

        self.generate_slot(
            topic,
            QuestionSlot {
                difficulty,
                subtopic,
            },
        )
        .await
    }

    async fn generate_slot(&self, topic: &str, slot: QuestionSlot) -> Question {
        let QuestionSlot {
            difficulty,
            subtopic,
        } = slot;
        let prompt = prompts::question_prompt(&subject(topic, subtopic.as_deref()), difficulty.as_str());

        let parsed = match self.generate_text(&prompt).await {
            Ok(reply) => parse_generated_question(&reply).map_err(|e| e.to_string()),
            Err(e) => Err(e.to_string()),
        };

        match parsed {
            Ok(parsed) => Question::new(
                parsed.prompt,
                parsed.choices,
                parsed.correct_index,
                topic,
                difficulty,
            )
            .with_explanation(parsed.explanation)
            .with_subtopic(subtopic)
            .with_source(QuestionSource::Generated),
            Err(reason) => {
                log::warn!(
                    "Question generation degraded to placeholder (topic={}, subtopic={}, difficulty={}): {}",
                    topic,
                    subtopic.as_deref().unwrap_or("-"),
                    difficulty,
                    reason
                );
                Question::placeholder(topic, subtopic.as_deref(), difficulty)
            }
        }
    }

    /// Generates every slot concurrently; output order matches `slots`.
    pub async fn generate_questions(&self, topic: &str, slots: Vec<QuestionSlot>) -> Vec<Question> {
        join_all(slots.into_iter().map(|slot| self.generate_slot(topic, slot))).await
    }

    /// Adaptive quiz body: starting tier from `history`, then drift.
    pub async fn generate_adaptive_questions(
        &self,
        topic: &str,
        history: &PerformanceHistory,
        count: usize,
    ) -> Vec<Question> {
        let slots = plan_quiz(topic, history, count, &mut self.rng());
        let questions = self.generate_questions(topic, slots).await;

        let placeholders = questions.iter().filter(|q| q.is_placeholder()).count();
        if placeholders > 0 {
            log::warn!(
                "{} of {} questions for topic '{}' are placeholders",
                placeholders,
                questions.len(),
                topic
            );
        }
        questions
    }

    pub async fn generate_flashcards(
        &self,
        topic: &str,
        subtopic: Option<&str>,
        count: u32,
    ) -> Vec<Flashcard> {
        let prompt = prompts::flashcards_prompt(&subject(topic, subtopic), count);

        let cards = match self.generate_text(&prompt).await {
            Ok(reply) => parse_json_reply::<Vec<Flashcard>>(&reply),
            Err(e) => Err(e),
        };

        match cards {
            Ok(cards) if !cards.is_empty() => cards.into_iter().take(count as usize).collect(),
            Ok(_) => {
                log::warn!("Flashcard generation for '{}' returned no cards", topic);
                placeholder_flashcards(topic, subtopic, count)
            }
            Err(e) => {
                log::warn!("Flashcard generation for '{}' failed: {}", topic, e);
                placeholder_flashcards(topic, subtopic, count)
            }
        }
    }

    pub async fn generate_recommendations(
        &self,
        average_score: f64,
        strengths: &[String],
        weaknesses: &[String],
    ) -> Vec<Recommendation> {
        let prompt = prompts::recommendations_prompt(average_score, strengths, weaknesses);

        let reply = match self.generate_text(&prompt).await {
            Ok(reply) => parse_json_reply::<RecommendationsReply>(&reply),
            Err(e) => Err(e),
        };

        match reply {
            Ok(reply) if !reply.recommendations.is_empty() => reply.recommendations,
            Ok(_) => fallback_recommendations(),
            Err(e) => {
                log::warn!("Recommendation generation failed: {}", e);
                fallback_recommendations()
            }
        }
    }
}
