use axum::{extract::FromRequestParts, http::header};
use jsonwebtoken::{DecodingKey, Validation, decode};

use crate::{config, dto::auth::Claims, error::AppError, models::Role};

/// Identity decoded from a validated bearer token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: i32,
    pub name: String,
    pub role: Role,
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or_else(|| AppError::Auth("Token de autenticação ausente.".into()))?;

        let auth_str = auth_header
            .to_str()
            .map_err(|_| AppError::Auth("Cabeçalho de autorização inválido.".into()))?;

        if !auth_str.starts_with("Bearer ") {
            return Err(AppError::Auth("Esquema de autorização inválido.".into()));
        }
        let token = auth_str.trim_start_matches("Bearer ").trim();

        let decoded = decode::<Claims>(
            token,
            &DecodingKey::from_secret(config::jwt_secret().as_bytes()),
            &Validation::default(),
        )
        .map_err(|_| AppError::Auth("Token inválido ou expirado.".into()))?;

        Ok(AuthUser {
            user_id: decoded.claims.user_id,
            name: decoded.claims.name,
            role: decoded.claims.role,
        })
    }
}
