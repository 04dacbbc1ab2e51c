use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

use crate::{
    config,
    dto::auth::{Claims, LoginRequest, LoginResponse, LoginUser},
    entity::users::{Column as UserCol, Entity as Users},
    error::{AppError, AppResult},
    state::AppState,
};

pub async fn login_user(state: &AppState, payload: LoginRequest) -> AppResult<LoginResponse> {
    let LoginRequest { username, password } = payload;

    let user = Users::find()
        .filter(UserCol::Username.eq(username.as_str()))
        .one(&state.orm)
        .await?;
    let user = match user {
        Some(u) => u,
        None => return Err(AppError::Auth("Credenciais inválidas.".into())),
    };

    // Passwords are stored and compared in plaintext.
    if password != user.password {
        return Err(AppError::Auth("Credenciais inválidas.".into()));
    }

    let expiration = Utc::now()
        .checked_add_signed(Duration::hours(1))
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("failed to set token expiration")))?;

    let claims = Claims {
        user_id: user.id,
        role: user.role,
        name: user.name.clone(),
        exp: expiration.timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config::jwt_secret().as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?;

    tracing::info!(user_id = user.id, "user logged in");

    Ok(LoginResponse {
        token,
        user: LoginUser {
            id: user.id,
            name: user.name,
            role: user.role,
        },
    })
}
