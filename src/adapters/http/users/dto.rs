//! Response types for the user endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::users::{UserMetadata, UserPage};
use crate::domain::foundation::UserId;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserIdResponse {
    pub user_id: String,
}

impl From<&UserId> for UserIdResponse {
    fn from(user_id: &UserId) -> Self {
        Self {
            user_id: user_id.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserExistsResponse {
    pub user_id: String,
    pub exists: bool,
}

/// Modification times of a user; both fields are null for unknown users.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserMetadataResponse {
    pub user_id: String,
    pub last_modified_datetime: Option<String>,
    pub last_modified_timestamp: Option<i64>,
}

impl UserMetadataResponse {
    pub fn missing(user_id: &UserId) -> Self {
        Self {
            user_id: user_id.to_string(),
            last_modified_datetime: None,
            last_modified_timestamp: None,
        }
    }
}

impl From<UserMetadata> for UserMetadataResponse {
    fn from(metadata: UserMetadata) -> Self {
        Self {
            user_id: metadata.user_id.to_string(),
            last_modified_datetime: Some(metadata.last_modified_at.to_display_string()),
            last_modified_timestamp: Some(metadata.last_modified_epoch),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserCountResponse {
    pub user_count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPageResponse {
    pub page: u32,
    pub users: Vec<String>,
}

impl From<UserPage> for UserPageResponse {
    fn from(page: UserPage) -> Self {
        Self {
            page: page.page,
            users: page.users.into_iter().map(|user| user.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageParams {
    pub page_size: Option<u32>,
}
