use actix_web::{get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::{
        request::{CvRequest, EssayRequest, EssayScoreRequest},
        response::{FeedbackResponse, ImprovementsResponse},
    },
};

#[post("/essay")]
pub async fn submit_essay(
    state: web::Data<AppState>,
    request: web::Json<EssayRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let essay = state
        .essay_service
        .submit_essay(auth.user_id(), request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(FeedbackResponse {
        feedback: essay.feedback,
    }))
}

#[post("/cv")]
pub async fn submit_cv(
    state: web::Data<AppState>,
    request: web::Json<CvRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let essay = state
        .essay_service
        .submit_cv(auth.user_id(), request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(FeedbackResponse {
        feedback: essay.feedback,
    }))
}

#[get("/essays")]
pub async fn list_essays(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let essays = state.essay_service.list_essays(auth.user_id()).await?;
    Ok(HttpResponse::Ok().json(essays))
}

#[post("/essays/{id}/improvements")]
pub async fn essay_improvements(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let improvements = state
        .essay_service
        .improvements(auth.user_id(), &id)
        .await?;
    Ok(HttpResponse::Ok().json(ImprovementsResponse { improvements }))
}

#[post("/essay/score")]
pub async fn score_essay(
    state: web::Data<AppState>,
    request: web::Json<EssayScoreRequest>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let score = state.essay_service.score_essay(request.into_inner()).await?;
    Ok(HttpResponse::Ok().json(score))
}
