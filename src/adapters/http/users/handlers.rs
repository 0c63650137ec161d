//! HTTP handlers for user endpoints.

use std::sync::Arc;

use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::CurrentTenant;
use crate::application::handlers::users::{
    CountUsersHandler, CountUsersQuery, DeleteUserCommand, DeleteUserHandler, GetUserHandler,
    GetUserMetadataHandler, GetUserMetadataQuery, GetUserQuery, ListUsersHandler, ListUsersQuery,
    ProvisionUserCommand, ProvisionUserHandler,
};
use crate::domain::foundation::{ErrorCode, UserId};
use crate::domain::text::validate_user_id;
use crate::ports::TranscriptStore;

use super::dto::{
    PageParams, UserCountResponse, UserExistsResponse, UserIdResponse, UserMetadataResponse,
    UserPageResponse,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct UsersAppState {
    pub store: Arc<dyn TranscriptStore>,
    pub max_user_id_length: usize,
    pub default_page_size: u32,
    pub max_page_size: u32,
}

impl UsersAppState {
    pub fn new(store: Arc<dyn TranscriptStore>) -> Self {
        Self {
            store,
            max_user_id_length: 256,
            default_page_size: 100,
            max_page_size: 1000,
        }
    }

    pub fn with_limits(mut self, max_user_id_length: usize, default_page_size: u32, max_page_size: u32) -> Self {
        self.max_user_id_length = max_user_id_length;
        self.default_page_size = default_page_size;
        self.max_page_size = max_page_size;
        self
    }

    pub fn provision_handler(&self) -> ProvisionUserHandler {
        ProvisionUserHandler::new(self.store.clone())
    }

    pub fn get_handler(&self) -> GetUserHandler {
        GetUserHandler::new(self.store.clone())
    }

    pub fn metadata_handler(&self) -> GetUserMetadataHandler {
        GetUserMetadataHandler::new(self.store.clone())
    }

    pub fn delete_handler(&self) -> DeleteUserHandler {
        DeleteUserHandler::new(self.store.clone())
    }

    pub fn count_handler(&self) -> CountUsersHandler {
        CountUsersHandler::new(self.store.clone())
    }

    pub fn list_handler(&self) -> ListUsersHandler {
        ListUsersHandler::new(self.store.clone(), self.default_page_size, self.max_page_size)
    }

    fn user_id(&self, raw: &str) -> Result<UserId, ApiError> {
        Ok(validate_user_id(raw, self.max_user_id_length)?)
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// PUT /v1/user/id/:user_id - Provision a user
pub async fn provision_user(
    State(state): State<UsersAppState>,
    CurrentTenant(tenant): CurrentTenant,
    Path(raw_user_id): Path<String>,
) -> Result<Json<UserIdResponse>, ApiError> {
    let user_id = state.user_id(&raw_user_id)?;
    let result = state
        .provision_handler()
        .handle(ProvisionUserCommand { tenant, user_id })
        .await?;
    Ok(Json(UserIdResponse::from(&result.user_id)))
}

/// GET /v1/user/id/:user_id - Check that a user exists
pub async fn get_user(
    State(state): State<UsersAppState>,
    CurrentTenant(tenant): CurrentTenant,
    Path(raw_user_id): Path<String>,
) -> Result<Response, ApiError> {
    let user_id = state.user_id(&raw_user_id)?;
    let exists = state
        .get_handler()
        .handle(GetUserQuery {
            tenant,
            user_id: user_id.clone(),
        })
        .await?;

    let status = if exists { StatusCode::OK } else { StatusCode::NOT_FOUND };
    let body = UserExistsResponse {
        user_id: user_id.to_string(),
        exists,
    };
    Ok((status, Json(body)).into_response())
}

/// GET /v1/user/metadata/:user_id - Last modification time of a user
pub async fn get_user_metadata(
    State(state): State<UsersAppState>,
    CurrentTenant(tenant): CurrentTenant,
    Path(raw_user_id): Path<String>,
) -> Result<Response, ApiError> {
    let user_id = state.user_id(&raw_user_id)?;
    let metadata = state
        .metadata_handler()
        .handle(GetUserMetadataQuery {
            tenant,
            user_id: user_id.clone(),
        })
        .await?;

    Ok(match metadata {
        Some(metadata) => Json(UserMetadataResponse::from(metadata)).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(UserMetadataResponse::missing(&user_id)),
        )
            .into_response(),
    })
}

/// DELETE /v1/user/id/:user_id - Remove a user and their transcript
pub async fn delete_user(
    State(state): State<UsersAppState>,
    CurrentTenant(tenant): CurrentTenant,
    Path(raw_user_id): Path<String>,
) -> Result<Response, ApiError> {
    let user_id = state.user_id(&raw_user_id)?;
    let body = Json(UserIdResponse::from(&user_id));
    match state
        .delete_handler()
        .handle(DeleteUserCommand { tenant, user_id })
        .await
    {
        Ok(()) => Ok(body.into_response()),
        Err(err) if err.code == ErrorCode::UserNotFound => {
            Ok((StatusCode::NOT_FOUND, body).into_response())
        }
        Err(err) => Err(err.into()),
    }
}

/// GET /v1/user/all/count - Number of users of the tenant
pub async fn count_users(
    State(state): State<UsersAppState>,
    CurrentTenant(tenant): CurrentTenant,
) -> Result<Json<UserCountResponse>, ApiError> {
    let user_count = state.count_handler().handle(CountUsersQuery { tenant }).await?;
    Ok(Json(UserCountResponse { user_count }))
}

/// GET /v1/user/all/id/:page - One page of user ids, most recent first
pub async fn list_users(
    State(state): State<UsersAppState>,
    CurrentTenant(tenant): CurrentTenant,
    Path(page): Path<u32>,
    Query(params): Query<PageParams>,
) -> Result<Json<UserPageResponse>, ApiError> {
    let result = state
        .list_handler()
        .handle(ListUsersQuery {
            tenant,
            page,
            page_size: params.page_size,
        })
        .await?;
    Ok(Json(UserPageResponse::from(result)))
}
