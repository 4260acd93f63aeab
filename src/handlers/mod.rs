pub mod auth_handler;
pub mod catalog_handler;
pub mod chat_handler;
pub mod essay_handler;
pub mod graphql_handler;
pub mod quiz_handler;
pub mod user_handler;

use actix_web::web;
use actix_web_httpauth::middleware::HttpAuthentication;

use crate::auth::validator;

/// Public routes at the root; everything under `/api` requires a bearer token.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(user_handler::health_check)
        .service(user_handler::health_check_ready)
        .service(auth_handler::register)
        .service(auth_handler::login)
        .service(auth_handler::refresh_token)
        .service(catalog_handler::list_colleges)
        .service(catalog_handler::list_scholarships)
        .service(graphql_handler::graphiql)
        .service(
            web::scope("/api")
                .wrap(HttpAuthentication::bearer(validator))
                .service(user_handler::me)
                .service(quiz_handler::list_quizzes)
                .service(quiz_handler::create_quiz)
                // before /quiz/{id}
                .service(quiz_handler::quiz_results)
                .service(quiz_handler::get_quiz)
                .service(quiz_handler::generate_question)
                .service(quiz_handler::generate_quiz)
                .service(quiz_handler::submit_quiz)
                .service(quiz_handler::progress)
                .service(quiz_handler::flashcards)
                .service(essay_handler::submit_essay)
                .service(essay_handler::submit_cv)
                .service(essay_handler::list_essays)
                .service(essay_handler::essay_improvements)
                .service(essay_handler::score_essay)
                .service(chat_handler::chat)
                .service(chat_handler::chat_history)
                .service(graphql_handler::graphql),
        );
}
