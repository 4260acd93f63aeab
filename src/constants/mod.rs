pub mod catalog;
pub mod prompts;
pub mod topics;
