pub mod catalog;
pub mod chat_interaction;
pub mod essay;
pub mod question;
pub mod quiz;
pub mod quiz_result;
pub mod study;
pub mod tier;
pub mod user;

pub use chat_interaction::ChatInteraction;
pub use essay::Essay;
pub use question::Question;
pub use quiz::Quiz;
pub use quiz_result::QuizResult;
pub use tier::Tier;
pub use user::User;
