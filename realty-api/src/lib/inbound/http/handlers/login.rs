use axum::extract::State;
use axum::http::StatusCode;
use axum::Form;
use serde::Deserialize;

use super::refresh_token::TokenPairData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::auth::models::Credentials;
use crate::inbound::http::router::AppState;

/// OAuth2 password flow: credentials arrive form-encoded.
pub async fn login(
    State(state): State<AppState>,
    Form(body): Form<LoginRequestBody>,
) -> Result<ApiSuccess<TokenPairData>, ApiError> {
    state
        .auth_service
        .login(Credentials::new(body.username, body.password))
        .await
        .map_err(ApiError::from)
        .map(|pair| ApiSuccess::new(StatusCode::OK, pair.into()))
}

#[derive(Clone, Deserialize)]
pub struct LoginRequestBody {
    username: String,
    password: String,
}
