pub mod catalog_service;
pub mod chat_service;
pub mod difficulty;
pub mod essay_service;
pub mod question_parser;
pub mod quiz_generation_service;
pub mod quiz_service;
pub mod scoring;
pub mod text_generation;
pub mod user_service;
