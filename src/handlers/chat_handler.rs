use actix_web::{get, post, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::{
        request::{ChatRequest, PaginationParams},
        response::ChatReply,
    },
};

#[post("/chat")]
pub async fn chat(
    state: web::Data<AppState>,
    request: web::Json<ChatRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let reply = state
        .chat_service
        .reply(auth.user_id(), request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ChatReply { reply }))
}

#[get("/chat/history")]
pub async fn chat_history(
    state: web::Data<AppState>,
    query: web::Query<PaginationParams>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let pagination = query.into_inner();
    pagination.validate()?;

    let history = state
        .chat_service
        .history(auth.user_id(), pagination.offset(), pagination.limit())
        .await?;
    Ok(HttpResponse::Ok().json(history))
}
