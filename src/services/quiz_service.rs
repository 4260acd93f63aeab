use std::{collections::BTreeMap, sync::Arc};

use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{
            study::{Flashcard, ProgressReport, Recommendation, TopicAccuracy},
            Question, Quiz, QuizResult,
        },
        dto::{
            request::{
                normalize_topic, AnswerSubmission, CreateQuizRequest, FlashcardRequest,
                GenerateQuestionRequest, GenerateQuizRequest,
            },
            response::QuizSummaryDto,
        },
    },
    repositories::{QuizRepository, QuizResultRepository},
    services::{
        difficulty::PerformanceHistory,
        quiz_generation_service::QuizGenerationService,
        scoring::{score_submission, ScoreSummary},
    },
};

pub const STRENGTH_THRESHOLD: f64 = 0.7;
pub const WEAKNESS_THRESHOLD: f64 = 0.5;
const DEFAULT_FLASHCARD_COUNT: u32 = 5;

/// Per-topic accuracy over a user's results, ordered by topic.
pub fn topic_accuracy(results: &[QuizResult]) -> Vec<TopicAccuracy> {
    let mut by_topic: BTreeMap<&str, (u32, u32)> = BTreeMap::new();
    for result in results {
        let entry = by_topic.entry(result.topic.as_str()).or_default();
        entry.0 += result.correct_count;
        entry.1 += result.total;
    }

    by_topic
        .into_iter()
        .map(|(topic, (correct, total))| TopicAccuracy {
            topic: topic.to_string(),
            correct,
            total,
            accuracy: if total > 0 {
                correct as f64 / total as f64
            } else {
                0.0
            },
        })
        .collect()
}

pub struct QuizService {
    quiz_repository: Arc<dyn QuizRepository>,
    result_repository: Arc<dyn QuizResultRepository>,
    generation: Arc<QuizGenerationService>,
    default_quiz_length: u32,
}

impl QuizService {
    pub fn new(
        quiz_repository: Arc<dyn QuizRepository>,
        result_repository: Arc<dyn QuizResultRepository>,
        generation: Arc<QuizGenerationService>,
        default_quiz_length: u32,
    ) -> Self {
        Self {
            quiz_repository,
            result_repository,
            generation,
            default_quiz_length,
        }
    }

    pub async fn get_quiz(&self, id: &str) -> AppResult<Quiz> {
        self.quiz_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Quiz with id '{}' not found", id)))
    }

    pub async fn list_quizzes(&self, offset: i64, limit: i64) -> AppResult<Vec<QuizSummaryDto>> {
        let (quizzes, _total) = self.quiz_repository.list(offset, limit).await?;
        Ok(quizzes.iter().map(QuizSummaryDto::from).collect())
    }

    pub async fn create_quiz(&self, request: CreateQuizRequest, created_by: &str) -> AppResult<Quiz> {
        request.validate()?;

        let topic = normalize_topic(&request.topic);
        let questions = request
            .questions
            .into_iter()
            .map(|input| {
                Question::new(
                    input.prompt,
                    input.choices,
                    input.correct_index,
                    topic.as_str(),
                    input.difficulty.unwrap_or(request.difficulty),
                )
                .with_explanation(input.explanation)
                .with_subtopic(input.subtopic)
            })
            .collect();

        let quiz = Quiz::new(&topic, request.difficulty.as_str(), questions, Some(created_by));
        quiz.validate()?;

        let quiz = self.quiz_repository.create(quiz).await?;
        log::info!("Quiz '{}' created with {} questions", quiz.id, quiz.question_count());
        Ok(quiz)
    }

    /// Practice question; returned with its answer and never stored.
    pub async fn generate_question(&self, request: GenerateQuestionRequest) -> AppResult<Question> {
        request.validate()?;

        Ok(self
            .generation
            .generate_question(
                &normalize_topic(&request.topic),
                request.subtopic.as_deref(),
                request.difficulty,
            )
            .await)
    }

    /// Generates, persists and returns an adaptive quiz for `user_id`.
    pub async fn generate_quiz(&self, user_id: &str, request: GenerateQuizRequest) -> AppResult<Quiz> {
        request.validate()?;

        let topic = normalize_topic(&request.topic);
        let topic = topic.as_str();
        let count = request.question_count.unwrap_or(self.default_quiz_length) as usize;

        let history_results = self
            .result_repository
            .list_by_user(user_id, Some(topic))
            .await?;
        let history = PerformanceHistory::from_results(&history_results);
        let starting_tier = history.initial_tier();

        let questions = self
            .generation
            .generate_adaptive_questions(topic, &history, count)
            .await;

        let quiz = Quiz::new(topic, starting_tier.as_str(), questions, Some(user_id));
        let quiz = self.quiz_repository.create(quiz).await?;

        log::info!(
            "Generated adaptive quiz '{}' on '{}' starting at {} for user '{}'",
            quiz.id,
            topic,
            starting_tier,
            user_id
        );
        Ok(quiz)
    }

    /// Grades `submission` and appends one result for `user_id`.
    pub async fn submit(&self, user_id: &str, submission: AnswerSubmission) -> AppResult<ScoreSummary> {
        submission.validate()?;

        let quiz = self.get_quiz(&submission.quiz_id).await?;
        let summary = score_submission(&quiz.questions, &submission.answers);

        if !summary.flagged.is_empty() {
            log::error!(
                "Quiz '{}' has {} question(s) with unusable answers: {:?}",
                quiz.id,
                summary.flagged.len(),
                summary.flagged
            );
        }

        let result = QuizResult::from_summary(user_id, &quiz.id, &quiz.topic, &summary);
        self.result_repository.create(result).await?;

        Ok(summary)
    }

    pub async fn results(&self, user_id: &str) -> AppResult<Vec<QuizResult>> {
        self.result_repository.list_by_user(user_id, None).await
    }

    pub async fn progress_report(&self, user_id: &str) -> AppResult<ProgressReport> {
        let results = self.results(user_id).await?;

        if results.is_empty() {
            return Ok(ProgressReport {
                quizzes_taken: 0,
                average_score: 0.0,
                topic_accuracy: Vec::new(),
                strengths: Vec::new(),
                weaknesses: Vec::new(),
                recommendations: vec![Recommendation {
                    topic: "general".to_string(),
                    action: "Complete some quizzes to receive personalized feedback".to_string(),
                    resource: "Adaptive quizzes".to_string(),
                }],
            });
        }

        let average_score =
            results.iter().map(|r| r.score as f64).sum::<f64>() / results.len() as f64;
        let topic_accuracy = topic_accuracy(&results);

        let strengths: Vec<String> = topic_accuracy
            .iter()
            .filter(|t| t.total > 0 && t.accuracy >= STRENGTH_THRESHOLD)
            .map(|t| t.topic.clone())
            .collect();
        let weaknesses: Vec<String> = topic_accuracy
            .iter()
            .filter(|t| t.total > 0 && t.accuracy <= WEAKNESS_THRESHOLD)
            .map(|t| t.topic.clone())
            .collect();

        let recommendations = self
            .generation
            .generate_recommendations(average_score, &strengths, &weaknesses)
            .await;

        Ok(ProgressReport {
            quizzes_taken: results.len(),
            average_score,
            topic_accuracy,
            strengths,
            weaknesses,
            recommendations,
        })
    }

    pub async fn flashcards(&self, request: FlashcardRequest) -> AppResult<Vec<Flashcard>> {
        request.validate()?;

        Ok(self
            .generation
            .generate_flashcards(
                &normalize_topic(&request.topic),
                request.subtopic.as_deref(),
                request.count.unwrap_or(DEFAULT_FLASHCARD_COUNT),
            )
            .await)
    }
}
