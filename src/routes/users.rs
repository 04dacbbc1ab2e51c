use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
};

use crate::{
    dto::MessageResponse,
    dto::users::{CreateUserRequest, UpdateUserRequest, UserMessage},
    error::AppResult,
    models::UserProfile,
    services::user_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/{id}", put(update_user).delete(delete_user))
}

#[utoipa::path(
    post,
    path = "/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User registered", body = UserMessage),
        (status = 400, description = "Missing required fields"),
        (status = 409, description = "Username already taken"),
    ),
    tag = "Users"
)]
pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserMessage>)> {
    let user = user_service::create_user(&state, payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(UserMessage {
            message: "Usuário cadastrado com sucesso!".into(),
            user,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "All users, passwords excluded", body = [UserProfile]),
    ),
    tag = "Users"
)]
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<UserProfile>>> {
    let users = user_service::list_users(&state).await?;
    Ok(Json(users))
}

#[utoipa::path(
    put,
    path = "/users/{id}",
    params(("id" = i32, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = UserMessage),
        (status = 404, description = "User not found"),
        (status = 409, description = "Username already taken"),
    ),
    tag = "Users"
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateUserRequest>,
) -> AppResult<Json<UserMessage>> {
    let user = user_service::update_user(&state, id, payload).await?;
    Ok(Json(UserMessage {
        message: "Usuário atualizado com sucesso.".into(),
        user,
    }))
}

#[utoipa::path(
    delete,
    path = "/users/{id}",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 404, description = "User not found"),
        (status = 409, description = "Protected principal or user referenced by orders"),
    ),
    tag = "Users"
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<MessageResponse>> {
    let message = user_service::delete_user(&state, id).await?;
    Ok(Json(MessageResponse { message }))
}
