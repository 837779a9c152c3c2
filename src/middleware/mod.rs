pub mod auth;
pub mod response;

pub use auth::access_policy_middleware;
pub use response::{ApiResult, Confirmation};
