pub mod chat_repository;
pub mod essay_repository;
pub mod quiz_repository;
pub mod quiz_result_repository;
pub mod user_repository;

pub use chat_repository::{ChatInteractionRepository, MongoChatInteractionRepository};
pub use essay_repository::{EssayRepository, MongoEssayRepository};
pub use quiz_repository::{MongoQuizRepository, QuizRepository};
pub use quiz_result_repository::{MongoQuizResultRepository, QuizResultRepository};
pub use user_repository::{MongoUserRepository, UserRepository};
