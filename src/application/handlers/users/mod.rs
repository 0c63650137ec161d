//! User command and query handlers.

mod delete_user;
mod get_user;
mod get_user_metadata;
mod list_users;
mod provision_user;

pub use delete_user::{DeleteUserCommand, DeleteUserHandler};
pub use get_user::{GetUserHandler, GetUserQuery};
pub use get_user_metadata::{GetUserMetadataHandler, GetUserMetadataQuery, UserMetadata};
pub use list_users::{CountUsersHandler, CountUsersQuery, ListUsersHandler, ListUsersQuery, UserPage};
pub use provision_user::{ProvisionUserCommand, ProvisionUserHandler, ProvisionUserResult};
