//! User handlers - signup and login.

use std::sync::Arc;

use actix_web::{HttpResponse, web};

use quill_core::domain::NewUser;
use quill_core::ports::TokenService;
use quill_shared::dto::{AuthResponse, LoginRequest, SignupRequest, UserResponse};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /users/signup
pub async fn signup(
    state: web::Data<AppState>,
    body: web::Json<SignupRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let user = state
        .users
        .create_user(NewUser {
            username: req.username,
            password: req.password,
        })
        .await?;

    Ok(HttpResponse::Created().json(UserResponse {
        id: user.id.to_hex(),
        username: user.username,
    }))
}

/// POST /users/login
pub async fn login(
    state: web::Data<AppState>,
    token_service: web::Data<Arc<dyn TokenService>>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let user = state
        .users
        .verify_credentials(&req.username, &req.password)
        .await?
        .ok_or(AppError::Unauthorized)?;

    let token = token_service
        .generate_token(user.id, &user.username)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        access_token: token,
        token_type: "Bearer".to_string(),
        expires_in: token_service.expiration_seconds() as u64,
    }))
}
