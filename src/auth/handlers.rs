use axum::{
    extract::{FromRef, State},
    response::Redirect,
    routing::{get, post},
    Json, Router,
};
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::json;
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{AuthError, AuthResponse, LoginRequest, PublicUser, RefreshRequest, RegisterRequest},
        jwt::{AuthUser, JwtKeys},
        password::{hash_password, password_meets_policy, verify_password},
        repo::User,
    },
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh))
        .route("/auth/logout", post(logout))
        .route("/auth/me", get(get_me))
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("static regex");
    }
    EMAIL_RE.is_match(email)
}

fn token_pair(state: &AppState, user: &User) -> Result<AuthResponse, AuthError> {
    let keys = JwtKeys::from_ref(state);
    let access_token = keys.sign_access(user.id).map_err(AuthError::internal)?;
    let refresh_token = keys.sign_refresh(user.id).map_err(AuthError::internal)?;
    Ok(AuthResponse {
        access_token,
        refresh_token,
        user: PublicUser {
            id: user.id,
            email: user.email.clone(),
        },
    })
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(mut payload): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>, AuthError> {
    payload.email = payload.email.trim().to_lowercase();

    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err(AuthError::bad_request_with(
            "Invalid input data",
            json!({ "email": "Invalid email format" }),
        ));
    }

    if !password_meets_policy(&payload.password) {
        warn!("weak password rejected");
        return Err(AuthError::bad_request_with(
            "Invalid input data",
            json!({ "password": "Password must be at least 8 characters and contain a lowercase letter, an uppercase letter and a digit" }),
        ));
    }

    if payload.password != payload.confirm_password {
        return Err(AuthError::bad_request_with(
            "Invalid input data",
            json!({ "confirm_password": "Passwords do not match" }),
        ));
    }

    if let Some(_existing) = User::find_by_email(&state.db, &payload.email)
        .await
        .map_err(AuthError::internal)?
    {
        warn!(email = %payload.email, "email already registered");
        return Err(AuthError::conflict("A user with this email already exists"));
    }

    let hash = hash_password(&payload.password).map_err(AuthError::internal)?;
    let user = User::create(&state.db, &payload.email, &hash)
        .await
        .map_err(AuthError::internal)?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok(Json(token_pair(&state, &user)?))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(mut payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AuthError> {
    payload.email = payload.email.trim().to_lowercase();

    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err(AuthError::bad_request_with(
            "Invalid input data",
            json!({ "email": "Invalid email format" }),
        ));
    }

    let user = match User::find_by_email(&state.db, &payload.email)
        .await
        .map_err(AuthError::internal)?
    {
        Some(u) => u,
        None => {
            warn!(email = %payload.email, "login unknown email");
            return Err(AuthError::unauthorized("Invalid email or password"));
        }
    };

    let ok = verify_password(&payload.password, &user.password_hash)
        .map_err(AuthError::internal)?;
    if !ok {
        warn!(email = %payload.email, user_id = %user.id, "login invalid password");
        return Err(AuthError::unauthorized("Invalid email or password"));
    }

    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok(Json(token_pair(&state, &user)?))
}

#[instrument(skip(state, payload))]
pub async fn refresh(
    State(state): State<AppState>,
    Json(payload): Json<RefreshRequest>,
) -> Result<Json<AuthResponse>, AuthError> {
    let keys = JwtKeys::from_ref(&state);
    let claims = keys
        .verify_refresh(&payload.refresh_token)
        .map_err(|_| AuthError::unauthorized("Invalid or expired refresh token"))?;

    let user = User::find_by_id(&state.db, claims.sub)
        .await
        .map_err(AuthError::internal)?
        .ok_or_else(|| AuthError::unauthorized("User not found"))?;

    Ok(Json(token_pair(&state, &user)?))
}

/// Tokens are stateless, so logout is just the contractual redirect back to
/// the landing page; clients drop their copies.
pub async fn logout() -> Redirect {
    Redirect::to("/")
}

#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<PublicUser>, AuthError> {
    let user = User::find_by_id(&state.db, user_id)
        .await
        .map_err(AuthError::internal)?
        .ok_or_else(|| AuthError::unauthorized("User not found"))?;

    Ok(Json(PublicUser {
        id: user.id,
        email: user.email,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_validation_accepts_plain_addresses() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("first.last@sub.domain.org"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("user@nodot"));
        assert!(!is_valid_email("spaces in@example.com"));
    }
}
