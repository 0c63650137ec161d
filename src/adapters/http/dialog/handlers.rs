//! HTTP handlers for dialog-as-data endpoints.

use std::sync::Arc;

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::CurrentTenant;
use crate::adapters::http::users::UserIdResponse;
use crate::application::handlers::dialog::{
    GetDialogHandler, GetDialogQuery, ResetDialogCommand, ResetDialogHandler, SetDialogCommand,
    SetDialogHandler,
};
use crate::domain::dialog::DialogLimits;
use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::text::validate_user_id;
use crate::ports::TranscriptStore;

use super::dto::{DialogJsonResponse, DialogStrResponse, SetDialogRequest};

#[derive(Clone)]
pub struct DialogAppState {
    pub store: Arc<dyn TranscriptStore>,
    pub limits: DialogLimits,
    pub max_user_id_length: usize,
}

impl DialogAppState {
    pub fn new(store: Arc<dyn TranscriptStore>, limits: DialogLimits) -> Self {
        Self {
            store,
            limits,
            max_user_id_length: 256,
        }
    }

    pub fn with_max_user_id_length(mut self, max_user_id_length: usize) -> Self {
        self.max_user_id_length = max_user_id_length;
        self
    }

    pub fn get_handler(&self) -> GetDialogHandler {
        GetDialogHandler::new(self.store.clone())
    }

    pub fn set_handler(&self) -> SetDialogHandler {
        SetDialogHandler::new(self.store.clone(), self.limits)
    }

    pub fn reset_handler(&self) -> ResetDialogHandler {
        ResetDialogHandler::new(self.store.clone())
    }

    fn user_id(&self, raw: &str) -> Result<UserId, ApiError> {
        Ok(validate_user_id(raw, self.max_user_id_length)?)
    }
}

/// Unknown users get a 404 echoing their id; other failures use the error body.
fn user_id_reply(user_id: &UserId, result: Result<(), DomainError>) -> Result<Response, ApiError> {
    let body = Json(UserIdResponse::from(user_id));
    match result {
        Ok(()) => Ok(body.into_response()),
        Err(err) if err.code == ErrorCode::UserNotFound => {
            Ok((StatusCode::NOT_FOUND, body).into_response())
        }
        Err(err) => Err(err.into()),
    }
}

/// GET /v1/user/dialog/json/:user_id - Transcript as a list of turns
pub async fn get_dialog_json(
    State(state): State<DialogAppState>,
    CurrentTenant(tenant): CurrentTenant,
    Path(raw_user_id): Path<String>,
) -> Result<Response, ApiError> {
    let user_id = state.user_id(&raw_user_id)?;
    let entries = state
        .get_handler()
        .entries(GetDialogQuery {
            tenant,
            user_id: user_id.clone(),
        })
        .await?;

    let status = if entries.is_some() {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    };
    let body = DialogJsonResponse {
        user_id: user_id.to_string(),
        dialog: entries,
    };
    Ok((status, Json(body)).into_response())
}

/// PUT /v1/user/dialog/json/:user_id - Replace the transcript with a list of turns
pub async fn put_dialog_json(
    State(state): State<DialogAppState>,
    CurrentTenant(tenant): CurrentTenant,
    Path(raw_user_id): Path<String>,
    Json(request): Json<SetDialogRequest>,
) -> Result<Response, ApiError> {
    let user_id = state.user_id(&raw_user_id)?;
    let result = state
        .set_handler()
        .handle(SetDialogCommand {
            tenant,
            user_id: user_id.clone(),
            dialog: request.dialog,
        })
        .await
        .map(|_| ());
    user_id_reply(&user_id, result)
}

/// GET /v1/user/dialog/str/:user_id - Transcript as stored
pub async fn get_dialog_str(
    State(state): State<DialogAppState>,
    CurrentTenant(tenant): CurrentTenant,
    Path(raw_user_id): Path<String>,
) -> Result<Response, ApiError> {
    let user_id = state.user_id(&raw_user_id)?;
    let transcript = state
        .get_handler()
        .transcript(GetDialogQuery {
            tenant,
            user_id: user_id.clone(),
        })
        .await?;

    let status = if transcript.is_some() {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    };
    let body = DialogStrResponse {
        user_id: user_id.to_string(),
        dialog: transcript,
    };
    Ok((status, Json(body)).into_response())
}

/// DELETE /v1/user/dialog/:user_id - Empty the transcript, keep the user
pub async fn reset_dialog(
    State(state): State<DialogAppState>,
    CurrentTenant(tenant): CurrentTenant,
    Path(raw_user_id): Path<String>,
) -> Result<Response, ApiError> {
    let user_id = state.user_id(&raw_user_id)?;
    let result = state
        .reset_handler()
        .handle(ResetDialogCommand {
            tenant,
            user_id: user_id.clone(),
        })
        .await;
    user_id_reply(&user_id, result)
}
