use std::future::{ready, Ready};

use actix_web::{dev::ServiceRequest, web, FromRequest, HttpMessage, HttpRequest};
use actix_web_httpauth::extractors::bearer::BearerAuth;

use crate::{app_state::AppState, auth::Claims, errors::AppError};

/// Bearer validator for `HttpAuthentication::bearer`; places `Claims` in the
/// request extensions on success.
pub async fn validator(
    req: ServiceRequest,
    credentials: BearerAuth,
) -> Result<ServiceRequest, (actix_web::Error, ServiceRequest)> {
    let claims = match req.app_data::<web::Data<AppState>>() {
        Some(state) => state.jwt_service.validate_token(credentials.token()),
        None => Err(AppError::InternalError(
            "Application state not configured".to_string(),
        )),
    };

    match claims {
        Ok(claims) => {
            req.extensions_mut().insert(claims);
            Ok(req)
        }
        Err(e) => {
            log::debug!("Rejected bearer token: {}", e);
            Err((
                AppError::Unauthorized("Invalid or expired token".to_string()).into(),
                req,
            ))
        }
    }
}

/// Extractor for the authenticated caller in handlers.
pub struct AuthenticatedUser(pub Claims);

impl AuthenticatedUser {
    pub fn user_id(&self) -> &str {
        &self.0.sub
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let claims = req
            .extensions()
            .get::<Claims>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("Not authenticated".to_string()));

        ready(claims.map(AuthenticatedUser))
    }
}
