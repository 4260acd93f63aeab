use actix_web::{post, web, HttpResponse};

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::request::{LoginRequest, RefreshTokenRequest, RegisterRequest},
};

#[post("/auth/register")]
pub async fn register(
    state: web::Data<AppState>,
    request: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    let user = state.user_service.register(request.into_inner()).await?;
    Ok(HttpResponse::Created().json(user))
}

#[post("/auth/login")]
pub async fn login(
    state: web::Data<AppState>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let user = state.user_service.authenticate(request.into_inner()).await?;
    let tokens = state.jwt_service.issue_tokens(&user)?;

    log::info!("User '{}' logged in", user.id);
    Ok(HttpResponse::Ok().json(tokens))
}

#[post("/auth/refresh")]
pub async fn refresh_token(
    state: web::Data<AppState>,
    request: web::Json<RefreshTokenRequest>,
) -> Result<HttpResponse, AppError> {
    let refresh_claims = state
        .jwt_service
        .validate_refresh_token(&request.refresh_token)?;

    let user = state
        .user_service
        .get_user(&refresh_claims.sub)
        .await
        .map_err(|_| {
            AppError::Unauthorized("User associated with refresh token not found".to_string())
        })?;

    let tokens = state.jwt_service.issue_tokens(&user)?;

    log::info!("Token refreshed for user '{}'", user.id);
    Ok(HttpResponse::Ok().json(tokens))
}
