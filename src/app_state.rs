use std::sync::Arc;

use crate::{
    auth::JwtService,
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{
        ChatInteractionRepository, EssayRepository, MongoChatInteractionRepository,
        MongoEssayRepository, MongoQuizRepository, MongoQuizResultRepository,
        MongoUserRepository, QuizRepository, QuizResultRepository, UserRepository,
    },
    services::{
        chat_service::ChatService,
        essay_service::EssayService,
        quiz_generation_service::QuizGenerationService,
        quiz_service::QuizService,
        text_generation::{OpenAiTextGenerator, TextGenerator},
        user_service::UserService,
    },
};

/// Persistence collaborators, one per aggregate.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub quizzes: Arc<dyn QuizRepository>,
    pub quiz_results: Arc<dyn QuizResultRepository>,
    pub essays: Arc<dyn EssayRepository>,
    pub chat_interactions: Arc<dyn ChatInteractionRepository>,
}

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub quiz_service: Arc<QuizService>,
    pub essay_service: Arc<EssayService>,
    pub chat_service: Arc<ChatService>,
    pub jwt_service: Arc<JwtService>,
    pub config: Arc<Config>,
    /// `None` when running on non-Mongo repositories.
    pub db: Option<Database>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let users = Arc::new(MongoUserRepository::new(&db));
        users.ensure_indexes().await?;
        let quizzes = Arc::new(MongoQuizRepository::new(&db));
        quizzes.ensure_indexes().await?;
        let quiz_results = Arc::new(MongoQuizResultRepository::new(&db));
        quiz_results.ensure_indexes().await?;
        let essays = Arc::new(MongoEssayRepository::new(&db));
        essays.ensure_indexes().await?;
        let chat_interactions = Arc::new(MongoChatInteractionRepository::new(&db));
        chat_interactions.ensure_indexes().await?;

        let repositories = Repositories {
            users,
            quizzes,
            quiz_results,
            essays,
            chat_interactions,
        };
        let generator = Arc::new(OpenAiTextGenerator::new(&config));

        Ok(Self::from_parts(config, Some(db), repositories, generator))
    }

    pub fn from_parts(
        config: Config,
        db: Option<Database>,
        repositories: Repositories,
        generator: Arc<dyn TextGenerator>,
    ) -> Self {
        let jwt_service = Arc::new(JwtService::new(
            &config.jwt_secret,
            config.jwt_expiration_hours,
            config.refresh_expiration_hours,
        ));

        let generation = Arc::new(QuizGenerationService::new(generator.clone(), &config));
        let quiz_service = Arc::new(QuizService::new(
            repositories.quizzes,
            repositories.quiz_results,
            generation,
            config.default_quiz_length,
        ));
        let essay_service = Arc::new(EssayService::new(
            repositories.essays,
            generator.clone(),
            &config,
        ));
        let chat_service = Arc::new(ChatService::new(
            repositories.chat_interactions,
            generator,
            &config,
        ));

        Self {
            user_service: Arc::new(UserService::new(repositories.users)),
            quiz_service,
            essay_service,
            chat_service,
            jwt_service,
            config: Arc::new(config),
            db,
        }
    }
}
