use actix_web::{get, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    db::PingReport,
    errors::{AppError, AppResult},
    models::dto::response::UserDto,
};

#[get("/users/me")]
pub async fn me(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let user = state.user_service.get_user(auth.user_id()).await?;
    Ok(HttpResponse::Ok().json(UserDto::from(user)))
}

#[get("/health")]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Readiness body for an optional database ping.
fn readiness(ping: Option<AppResult<PingReport>>) -> (bool, serde_json::Value) {
    let (ready, mongodb) = match ping {
        Some(Ok(report)) => (
            true,
            serde_json::json!({
                "status": "ok",
                "database": report.database,
                "latency_ms": report.latency_ms
            }),
        ),
        Some(Err(e)) => {
            log::warn!("MongoDB readiness ping failed: {}", e);
            (false, serde_json::json!({ "status": "error" }))
        }
        None => (true, serde_json::json!({ "status": "not_configured" })),
    };

    let body = serde_json::json!({
        "status": if ready { "ready" } else { "not_ready" },
        "version": env!("CARGO_PKG_VERSION"),
        "dependencies": {
            "mongodb": mongodb
        }
    });
    (ready, body)
}

#[get("/health/ready")]
pub async fn health_check_ready(state: web::Data<AppState>) -> HttpResponse {
    let ping = match &state.db {
        Some(db) => Some(db.ping().await),
        None => None,
    };

    match readiness(ping) {
        (true, body) => HttpResponse::Ok().json(body),
        (false, body) => HttpResponse::ServiceUnavailable().json(body),
    }
}
