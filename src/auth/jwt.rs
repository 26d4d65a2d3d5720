use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use crate::{
    config::JwtSettings,
    error::{AppError, AppResult},
    model::employee::Employee,
    models::Claims,
};

pub fn claims_for(employee: &Employee, settings: &JwtSettings) -> Claims {
    let now = Utc::now().timestamp();
    let exp = now + settings.expire_minutes * 60;
    let display_name = employee.display_name();

    Claims {
        sub: settings.subject.clone(),
        jti: Uuid::new_v4().to_string(),
        iat: now.max(0) as usize,
        exp: exp.max(0) as usize,
        iss: settings.issuer.clone(),
        aud: settings.audience.clone(),
        user_id: employee.id,
        user_name: display_name.clone(),
        display_name,
        email: employee.email.clone(),
        is_hr_admin: employee.is_hr_admin,
    }
}

pub fn encode_claims(claims: &Claims, secret: &str) -> AppResult<String> {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("token signing failed: {e}")))
}

pub fn generate_access_token(employee: &Employee, settings: &JwtSettings) -> AppResult<String> {
    encode_claims(&claims_for(employee, settings), &settings.secret)
}

/// Checks signature, expiry, issuer and audience.
pub fn verify_token(token: &str, settings: &JwtSettings) -> Result<Claims, String> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[&settings.issuer]);
    validation.set_audience(&[&settings.audience]);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(settings.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| e.to_string())
}
