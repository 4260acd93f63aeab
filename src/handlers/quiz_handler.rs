use actix_web::{get, post, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    auth::{require_admin, AuthenticatedUser},
    errors::AppError,
    models::dto::{
        request::{
            AnswerSubmission, CreateQuizRequest, FlashcardRequest, GenerateQuestionRequest,
            GenerateQuizRequest, PaginationParams,
        },
        response::{QuizForTaking, QuizSubmissionResponse},
    },
};

#[get("/quizzes")]
pub async fn list_quizzes(
    state: web::Data<AppState>,
    query: web::Query<PaginationParams>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let pagination = query.into_inner();
    pagination.validate()?;

    let quizzes = state
        .quiz_service
        .list_quizzes(pagination.offset(), pagination.limit())
        .await?;
    Ok(HttpResponse::Ok().json(quizzes))
}

#[post("/quizzes")]
pub async fn create_quiz(
    state: web::Data<AppState>,
    request: web::Json<CreateQuizRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;

    let quiz = state
        .quiz_service
        .create_quiz(request.into_inner(), auth.user_id())
        .await?;
    Ok(HttpResponse::Created().json(quiz))
}

#[get("/quiz/results")]
pub async fn quiz_results(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let results = state.quiz_service.results(auth.user_id()).await?;
    Ok(HttpResponse::Ok().json(results))
}

#[get("/quiz/{id}")]
pub async fn get_quiz(
    state: web::Data<AppState>,
    id: web::Path<String>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let quiz = state.quiz_service.get_quiz(&id).await?;
    Ok(HttpResponse::Ok().json(QuizForTaking::from(&quiz)))
}

#[post("/quiz/question")]
pub async fn generate_question(
    state: web::Data<AppState>,
    request: web::Json<GenerateQuestionRequest>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let question = state
        .quiz_service
        .generate_question(request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(question))
}

#[post("/quiz/generate")]
pub async fn generate_quiz(
    state: web::Data<AppState>,
    request: web::Json<GenerateQuizRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let quiz = state
        .quiz_service
        .generate_quiz(auth.user_id(), request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(QuizForTaking::from(&quiz)))
}

#[post("/quiz/submit")]
pub async fn submit_quiz(
    state: web::Data<AppState>,
    request: web::Json<AnswerSubmission>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let summary = state
        .quiz_service
        .submit(auth.user_id(), request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(QuizSubmissionResponse::from(summary)))
}

#[get("/progress")]
pub async fn progress(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let report = state.quiz_service.progress_report(auth.user_id()).await?;
    Ok(HttpResponse::Ok().json(report))
}

#[post("/flashcards")]
pub async fn flashcards(
    state: web::Data<AppState>,
    request: web::Json<FlashcardRequest>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let cards = state.quiz_service.flashcards(request.into_inner()).await?;
    Ok(HttpResponse::Ok().json(cards))
}
