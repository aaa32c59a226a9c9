// ============================
// crates/backend-lib/src/handlers/auth.rs
// ============================
//! `/register` and `/login`.
use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use boxdepot_common::{Credentials, LoginFailure, LoginResponse, MessageResponse};
use crate::{error::AppError, extract::JsonOrForm, AppState};

/// Register a new user
pub async fn register(
    State(state): State<Arc<AppState>>,
    JsonOrForm(credentials): JsonOrForm<Credentials>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let Credentials { username, password } = credentials;
    state.auth.register(&username, password).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("User created successfully")),
    ))
}

/// Every login failure, including an unknown user, is reported as 401
#[derive(Debug)]
pub struct LoginRejection(pub AppError);

impl IntoResponse for LoginRejection {
    fn into_response(self) -> Response {
        let body = LoginFailure {
            success: false,
            error: self.0.client_message(),
        };
        (StatusCode::UNAUTHORIZED, Json(body)).into_response()
    }
}

impl From<AppError> for LoginRejection {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

/// Verify a username/password pair
pub async fn login(
    State(state): State<Arc<AppState>>,
    body: Result<JsonOrForm<Credentials>, AppError>,
) -> Result<Json<LoginResponse>, LoginRejection> {
    let JsonOrForm(Credentials { username, password }) = body?;
    let identity = state.auth.login(&username, password).await?;

    Ok(Json(LoginResponse {
        success: true,
        message: "Login successful".to_string(),
        user: identity.view(),
    }))
}
