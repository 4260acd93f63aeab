#![allow(dead_code)]

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use secrecy::SecretString;
use tokio::sync::RwLock;

use sathelp_server::{
    app_state::{AppState, Repositories},
    config::Config,
    errors::{AppError, AppResult},
    models::domain::{ChatInteraction, Essay, Quiz, QuizResult, User},
    repositories::{
        ChatInteractionRepository, EssayRepository, QuizRepository, QuizResultRepository,
        UserRepository,
    },
    services::text_generation::{GenerationError, TextGenerator},
};

pub const QUESTION_REPLY: &str = "Question: What is 2 + 2?
A. 3
B. 4
C. 5
D. 6
Correct: B
Explanation: Two plus two is four.";

pub const PLAIN_REPLY: &str = "Practice a little every day.";

fn page<T: Clone>(items: &[T], offset: i64, limit: i64) -> Vec<T> {
    items
        .iter()
        .skip(offset.max(0) as usize)
        .take(limit.max(0) as usize)
        .cloned()
        .collect()
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<String, User>>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> AppResult<User> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == user.email) {
            return Err(AppError::AlreadyExists(format!(
                "User with email '{}' already exists",
                user.email
            )));
        }
        users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        Ok(self.users.read().await.get(id).cloned())
    }
}

#[derive(Default)]
pub struct InMemoryQuizRepository {
    quizzes: Arc<RwLock<HashMap<String, Quiz>>>,
}

#[async_trait]
impl QuizRepository for InMemoryQuizRepository {
    async fn create(&self, quiz: Quiz) -> AppResult<Quiz> {
        let mut quizzes = self.quizzes.write().await;
        if quizzes.contains_key(&quiz.id) {
            return Err(AppError::AlreadyExists(format!(
                "Quiz with id '{}' already exists",
                quiz.id
            )));
        }
        quizzes.insert(quiz.id.clone(), quiz.clone());
        Ok(quiz)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Quiz>> {
        Ok(self.quizzes.read().await.get(id).cloned())
    }

    async fn list(&self, offset: i64, limit: i64) -> AppResult<(Vec<Quiz>, i64)> {
        let quizzes = self.quizzes.read().await;
        let mut items: Vec<Quiz> = quizzes.values().cloned().collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok((page(&items, offset, limit), items.len() as i64))
    }
}

/// Results in insertion order; reads return newest first.
#[derive(Default)]
pub struct InMemoryQuizResultRepository {
    results: Arc<RwLock<Vec<QuizResult>>>,
}

#[async_trait]
impl QuizResultRepository for InMemoryQuizResultRepository {
    async fn create(&self, result: QuizResult) -> AppResult<QuizResult> {
        self.results.write().await.push(result.clone());
        Ok(result)
    }

    async fn list_by_user(&self, user_id: &str, topic: Option<&str>) -> AppResult<Vec<QuizResult>> {
        let results = self.results.read().await;
        Ok(results
            .iter()
            .rev()
            .filter(|r| r.user_id == user_id)
            .filter(|r| topic.map_or(true, |t| r.topic == t))
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct InMemoryEssayRepository {
    essays: Arc<RwLock<Vec<Essay>>>,
}

#[async_trait]
impl EssayRepository for InMemoryEssayRepository {
    async fn create(&self, essay: Essay) -> AppResult<Essay> {
        self.essays.write().await.push(essay.clone());
        Ok(essay)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Essay>> {
        let essays = self.essays.read().await;
        Ok(essays.iter().find(|e| e.id == id).cloned())
    }

    async fn list_by_user(&self, user_id: &str) -> AppResult<Vec<Essay>> {
        let essays = self.essays.read().await;
        Ok(essays
            .iter()
            .rev()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct InMemoryChatInteractionRepository {
    interactions: Arc<RwLock<Vec<ChatInteraction>>>,
}

#[async_trait]
impl ChatInteractionRepository for InMemoryChatInteractionRepository {
    async fn create(&self, interaction: ChatInteraction) -> AppResult<ChatInteraction> {
        self.interactions.write().await.push(interaction.clone());
        Ok(interaction)
    }

    async fn recent_by_user(
        &self,
        user_id: &str,
        offset: i64,
        limit: i64,
    ) -> AppResult<Vec<ChatInteraction>> {
        let interactions = self.interactions.read().await;
        let newest_first: Vec<ChatInteraction> = interactions
            .iter()
            .rev()
            .filter(|i| i.user_id == user_id)
            .cloned()
            .collect();
        Ok(page(&newest_first, offset, limit))
    }
}

/// Answers question prompts with a well-formed question and everything else with plain text.
pub struct ScriptedGenerator;

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        if prompt.starts_with("Create an SAT-style math question") {
            Ok(QUESTION_REPLY.to_string())
        } else {
            Ok(PLAIN_REPLY.to_string())
        }
    }
}

pub fn test_config() -> Config {
    Config {
        mongo_conn_string: "mongodb://localhost:27017".to_string(),
        mongo_db_name: "sathelp-test".to_string(),
        web_server_host: "localhost".to_string(),
        web_server_port: 8000,
        jwt_secret: SecretString::from("integration_test_secret_key_0123456789".to_string()),
        jwt_expiration_hours: 1,
        refresh_expiration_hours: 24,
        llm_api_key: SecretString::from(String::new()),
        llm_api_base: "http://localhost:9".to_string(),
        llm_model: "test-model".to_string(),
        generation_timeout_secs: 5,
        default_quiz_length: 3,
        chat_context_size: 3,
        quiz_rng_seed: Some(7),
    }
}

pub struct TestContext {
    pub state: AppState,
    pub users: Arc<InMemoryUserRepository>,
}

pub fn test_context() -> TestContext {
    let users = Arc::new(InMemoryUserRepository::default());
    let repositories = Repositories {
        users: users.clone(),
        quizzes: Arc::new(InMemoryQuizRepository::default()),
        quiz_results: Arc::new(InMemoryQuizResultRepository::default()),
        essays: Arc::new(InMemoryEssayRepository::default()),
        chat_interactions: Arc::new(InMemoryChatInteractionRepository::default()),
    };

    TestContext {
        state: AppState::from_parts(test_config(), None, repositories, Arc::new(ScriptedGenerator)),
        users,
    }
}
