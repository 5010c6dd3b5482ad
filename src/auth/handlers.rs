use axum::{
    extract::{FromRef, State},
    routing::post,
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{CredentialsRequest, LoginResponse, PublicUser, SignupResponse},
        jwt::JwtKeys,
        password::{hash_password, verify_password},
        repo::User,
    },
    error::ApiError,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
}

fn require_credentials(payload: CredentialsRequest) -> Result<(String, String), ApiError> {
    match (payload.email, payload.password) {
        (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => {
            Ok((email, password))
        }
        _ => Err(ApiError::Validation("All fields required".into())),
    }
}

#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsRequest>,
) -> Result<Json<SignupResponse>, ApiError> {
    let (email, password) = require_credentials(payload)?;

    if User::find_by_email(&state.db, &email).await?.is_some() {
        warn!(%email, "signup with existing email");
        return Err(ApiError::EmailTaken);
    }

    let hash = hash_password(&password)?;
    let user = User::create(&state.db, &email, &hash).await?;

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(user.id, &user.email)?;

    info!(user_id = %user.id, email = %user.email, "user signed up");
    Ok(Json(SignupResponse {
        success: true,
        message: "Signup successful".into(),
        user: PublicUser {
            id: user.id,
            email: user.email,
        },
        token,
    }))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let (email, password) = require_credentials(payload)?;

    let user = User::find_by_email(&state.db, &email)
        .await?
        .ok_or_else(|| {
            warn!(%email, "login with unknown email");
            ApiError::UnknownUser
        })?;

    if !verify_password(&password, &user.password_hash)? {
        warn!(user_id = %user.id, "login with invalid password");
        return Err(ApiError::BadCredentials);
    }

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(user.id, &user.email)?;

    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok(Json(LoginResponse {
        success: true,
        message: "Login successful".into(),
        token,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds(email: Option<&str>, password: Option<&str>) -> CredentialsRequest {
        CredentialsRequest {
            email: email.map(str::to_owned),
            password: password.map(str::to_owned),
        }
    }

    #[test]
    fn require_credentials_accepts_both_present() {
        let (email, password) =
            require_credentials(creds(Some("a@x.com"), Some("pw1"))).expect("valid");
        assert_eq!(email, "a@x.com");
        assert_eq!(password, "pw1");
    }

    #[test]
    fn require_credentials_rejects_missing_or_empty() {
        for payload in [
            creds(None, Some("pw1")),
            creds(Some("a@x.com"), None),
            creds(Some(""), Some("pw1")),
            creds(Some("a@x.com"), Some("")),
            creds(None, None),
        ] {
            let err = require_credentials(payload).unwrap_err();
            assert_eq!(err.to_string(), "All fields required");
        }
    }
}
