//! HTTP Handlers
//!
//! アカウントAPIのハンドラ

use axum::extract::State;
use axum::Json;
use log::info;

use crate::application::dto::basic_auth::BasicAuth;
use crate::application::dto::pagination::Pagination;
use crate::domain::entities::user::{NewUser, UserUpdate};
use crate::domain::errors::DomainError;

use super::dto::{
    AuthenticateRequest, CreateUserRequest, EmptyReply, ListUsersQuery, ListUsersReply,
    SetUserPasswordRequest, UpdateUserRequest, UserIdRequest, UserReply,
};
use super::error::{ApiError, REASON_INVALID_AUTH_METHOD};
use super::extract::{ApiJson, ApiPath, ApiQuery};
use super::AppState;

type ApiResult<T> = Result<Json<T>, ApiError>;

pub async fn create_user(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateUserRequest>,
) -> ApiResult<UserReply> {
    info!("create user {}, email={}", req.username, req.email);
    let username = req.username.clone();
    let user = state
        .account
        .create_user(NewUser::new(req.username, req.email, req.password))
        .await
        .map_err(|e| match e {
            DomainError::AlreadyExists => ApiError::user_already_existed(&username),
            other => other.into(),
        })?;
    Ok(Json(user.into()))
}

pub async fn update_user(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(req): ApiJson<UpdateUserRequest>,
) -> ApiResult<UserReply> {
    info!("update user {}, email={}", id, req.email);
    let user = state
        .account
        .update_user(UserUpdate::new(id, req.email))
        .await
        .map_err(|e| ApiError::for_user(e, id))?;
    Ok(Json(user.into()))
}

pub async fn set_user_password(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<SetUserPasswordRequest>,
) -> ApiResult<EmptyReply> {
    info!("user {} set password", req.id);
    state
        .account
        .set_user_password(req.id, &req.password)
        .await
        .map_err(|e| ApiError::for_user(e, req.id))?;
    Ok(Json(EmptyReply {}))
}

pub async fn delete_user(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<EmptyReply> {
    info!("delete user {}", id);
    state
        .account
        .delete_user(id)
        .await
        .map_err(|e| ApiError::for_user(e, id))?;
    Ok(Json(EmptyReply {}))
}

pub async fn get_user(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<UserReply> {
    info!("get user {}", id);
    let user = state
        .account
        .get_user(id)
        .await
        .map_err(|e| ApiError::for_user(e, id))?;
    Ok(Json(user.into()))
}

pub async fn list_users(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ListUsersQuery>,
) -> ApiResult<ListUsersReply> {
    info!("list users, offset={}, limit={}", query.offset, query.limit);
    let users = state
        .account
        .list_users(Pagination::new(query.offset, query.limit))
        .await?;
    Ok(Json(ListUsersReply {
        users: users.into_iter().map(UserReply::from).collect(),
    }))
}

pub async fn enable_user(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<UserIdRequest>,
) -> ApiResult<EmptyReply> {
    info!("enable user {}", req.id);
    state
        .account
        .enable_user(req.id)
        .await
        .map_err(|e| ApiError::for_user(e, req.id))?;
    Ok(Json(EmptyReply {}))
}

pub async fn disable_user(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<UserIdRequest>,
) -> ApiResult<EmptyReply> {
    info!("disable user {}", req.id);
    state
        .account
        .disable_user(req.id)
        .await
        .map_err(|e| ApiError::for_user(e, req.id))?;
    Ok(Json(EmptyReply {}))
}

pub async fn authenticate(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<AuthenticateRequest>,
) -> ApiResult<EmptyReply> {
    let Some(auth) = req.basic_auth else {
        return Err(ApiError::new(
            axum::http::StatusCode::BAD_REQUEST,
            REASON_INVALID_AUTH_METHOD,
            "invalid auth method",
        ));
    };
    info!("user {} authenticate, method: basic auth", auth.username);
    state
        .authenticate
        .execute(&BasicAuth::new(auth.username, auth.password))
        .await?;
    Ok(Json(EmptyReply {}))
}

pub async fn healthz() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
