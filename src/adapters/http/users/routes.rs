//! Axum router configuration for user endpoints.

use axum::routing::{get, put};
use axum::Router;

use super::handlers::{
    count_users, delete_user, get_user, get_user_metadata, list_users, provision_user,
    UsersAppState,
};

/// Creates the users router.
///
/// Routes:
/// - `PUT /v1/user/id/:user_id` - Provision a user (idempotent)
/// - `GET /v1/user/id/:user_id` - Check existence
/// - `DELETE /v1/user/id/:user_id` - Delete a user
/// - `GET /v1/user/metadata/:user_id` - Modification times
/// - `GET /v1/user/all/count` - Count users
/// - `GET /v1/user/all/id/:page?page_size=` - List user ids
pub fn users_router() -> Router<UsersAppState> {
    Router::new()
        .route(
            "/v1/user/id/:user_id",
            put(provision_user).get(get_user).delete(delete_user),
        )
        .route("/v1/user/metadata/:user_id", get(get_user_metadata))
        .route("/v1/user/all/count", get(count_users))
        .route("/v1/user/all/id/:page", get(list_users))
}
