//! Completion backend adapters.
//!
//! - `HttpCompletionGateway` - Posts the prompt as a form field over HTTP
//! - `MockCompletionGateway` - Scripted responses for tests

mod http_completion_gateway;
mod mock_completion_gateway;

pub use http_completion_gateway::{HttpCompletionGateway, HttpGatewayConfig};
pub use mock_completion_gateway::{MockCompletionGateway, MockCompletion};
