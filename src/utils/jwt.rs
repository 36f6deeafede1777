// src/utils/jwt.rs

use std::time::{SystemTime, UNIX_EPOCH};

use axum::{
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::{
    config::{ATTEMPT_TOKEN_TTL_SECS, Config},
    error::AppError,
    models::question::AnswerSet,
};

/// JWT Claims structure.
/// Tokens are issued by the session layer; this crate only verifies them.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Claims {
    /// Subject - Stores the learner ID.
    pub sub: String,
    /// Expiration time as Unix timestamp.
    pub exp: usize,
}

fn expires_in(seconds: u64) -> Result<usize, AppError> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| AppError::InternalServerError(e.to_string()))?
        .as_secs();
    Ok((now + seconds) as usize)
}

fn sign<T: Serialize>(claims: &T, secret: &str) -> Result<String, AppError> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::InternalServerError(e.to_string()))
}

/// Signs a session token for a learner.
pub fn sign_jwt(learner_id: &str, secret: &str, expiration_seconds: u64) -> Result<String, AppError> {
    let claims = Claims {
        sub: learner_id.to_owned(),
        exp: expires_in(expiration_seconds)?,
    };
    sign(&claims, secret)
}

/// Verifies and decodes a JWT string.
///
/// Returns the `Claims` if valid, otherwise `AppError::AuthError`.
pub fn verify_jwt(token: &str, secret: &str) -> Result<Claims, AppError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| AppError::AuthError("Not authenticated".to_string()))?;

    Ok(token_data.claims)
}

/// Signed state of one adaptive quiz attempt, carried by the client between steps.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AttemptClaims {
    /// Learner the attempt belongs to.
    pub sub: String,
    pub quiz_id: String,
    pub attempt_id: String,
    pub answers: AnswerSet,
    pub current_index: usize,
    pub exp: usize,
}

impl AttemptClaims {
    pub fn new(
        learner_id: &str,
        quiz_id: &str,
        attempt_id: &str,
        answers: AnswerSet,
        current_index: usize,
    ) -> Result<Self, AppError> {
        Ok(Self {
            sub: learner_id.to_owned(),
            quiz_id: quiz_id.to_owned(),
            attempt_id: attempt_id.to_owned(),
            answers,
            current_index,
            exp: expires_in(ATTEMPT_TOKEN_TTL_SECS)?,
        })
    }
}

pub fn sign_attempt(claims: &AttemptClaims, secret: &str) -> Result<String, AppError> {
    sign(claims, secret)
}

/// Verifies an attempt token and checks it was issued to `learner_id` for `quiz_id`.
pub fn verify_attempt(
    token: &str,
    secret: &str,
    learner_id: &str,
    quiz_id: &str,
) -> Result<AttemptClaims, AppError> {
    let claims = decode::<AttemptClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| AppError::BadRequest("Invalid attempt token".to_string()))?
    .claims;

    if claims.sub != learner_id || claims.quiz_id != quiz_id {
        return Err(AppError::BadRequest(
            "Attempt token does not match this quiz".to_string(),
        ));
    }
    Ok(claims)
}

/// Axum Middleware: Authentication.
///
/// Validates the 'Authorization: Bearer <token>' header and injects `Claims`
/// into the request extensions. Otherwise responds 401 Unauthorized.
pub async fn auth_middleware(
    State(config): State<Config>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let token = match auth_header.and_then(|h| h.strip_prefix("Bearer ")) {
        Some(token) => token,
        None => return Err(AppError::AuthError("Not authenticated".to_string())),
    };

    let claims = verify_jwt(token, &config.jwt_secret)?;
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}
