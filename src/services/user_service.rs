use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

use crate::{
    dto::users::{CreateUserRequest, UpdateUserRequest},
    entity::{
        orders::{Column as OrderCol, Entity as Orders},
        users::{ActiveModel as UserActive, Column as UserCol, Entity as Users, Model as UserModel},
    },
    error::{AppError, AppResult},
    models::{Role, UserProfile},
    state::AppState,
};

/// The first seeded account; deployments rely on it always existing.
const PRINCIPAL_USER_ID: i32 = 1;

pub async fn create_user(state: &AppState, payload: CreateUserRequest) -> AppResult<UserProfile> {
    if payload.username.trim().is_empty()
        || payload.password.is_empty()
        || payload.name.trim().is_empty()
    {
        return Err(AppError::Validation(
            "Campos obrigatórios faltando (username, password, name).".into(),
        ));
    }

    let existing = Users::find()
        .filter(UserCol::Username.eq(payload.username.as_str()))
        .one(&state.orm)
        .await?;
    if existing.is_some() {
        return Err(AppError::Conflict("Nome de usuário já existe.".into()));
    }

    let user = UserActive {
        id: NotSet,
        username: Set(payload.username),
        password: Set(payload.password),
        name: Set(payload.name),
        role: Set(payload.role.unwrap_or(Role::Garcom)),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(user_id = user.id, "user created");

    Ok(profile_from_entity(user))
}

pub async fn list_users(state: &AppState) -> AppResult<Vec<UserProfile>> {
    let users = Users::find()
        .order_by_asc(UserCol::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(profile_from_entity)
        .collect();
    Ok(users)
}

pub async fn update_user(
    state: &AppState,
    id: i32,
    payload: UpdateUserRequest,
) -> AppResult<UserProfile> {
    let existing = Users::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(u) => u,
        None => return Err(AppError::NotFound("Usuário não encontrado.".into())),
    };

    if payload.name.is_none()
        && payload.username.is_none()
        && payload.role.is_none()
        && payload.new_password.is_none()
    {
        return Ok(profile_from_entity(existing));
    }

    if let Some(username) = payload.username.as_deref() {
        let taken = Users::find()
            .filter(UserCol::Username.eq(username))
            .filter(UserCol::Id.ne(id))
            .one(&state.orm)
            .await?;
        if taken.is_some() {
            return Err(AppError::Conflict("Nome de usuário já existe.".into()));
        }
    }

    let mut active: UserActive = existing.into();
    if let Some(name) = payload.name {
        active.name = Set(name);
    }
    if let Some(username) = payload.username {
        active.username = Set(username);
    }
    if let Some(role) = payload.role {
        active.role = Set(role);
    }
    if let Some(password) = payload.new_password {
        active.password = Set(password);
    }
    let user = active.update(&state.orm).await?;

    Ok(profile_from_entity(user))
}

/// Delete a user. The principal account can never be removed, and neither
/// can a user that orders still reference.
pub async fn delete_user(state: &AppState, id: i32) -> AppResult<String> {
    if id == PRINCIPAL_USER_ID {
        return Err(AppError::Conflict(
            "O usuário principal do sistema não pode ser removido.".into(),
        ));
    }

    let existing = Users::find_by_id(id).one(&state.orm).await?;
    if existing.is_none() {
        return Err(AppError::NotFound("Usuário não encontrado.".into()));
    }

    let referenced = Orders::find()
        .filter(OrderCol::UserId.eq(id))
        .count(&state.orm)
        .await?;
    if referenced > 0 {
        return Err(AppError::Conflict(
            "Usuário possui pedidos associados e não pode ser removido.".into(),
        ));
    }

    Users::delete_by_id(id).exec(&state.orm).await?;

    Ok("Usuário removido com sucesso.".into())
}

fn profile_from_entity(model: UserModel) -> UserProfile {
    UserProfile {
        id: model.id,
        username: model.username,
        name: model.name,
        role: model.role,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
