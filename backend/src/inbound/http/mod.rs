//! HTTP inbound adapter exposing the session and navigation endpoints.

pub mod error;
pub mod health;
pub mod navigation;
pub mod session;
pub mod session_config;
pub mod sessions;
pub mod state;
#[cfg(test)]
pub mod test_utils;

pub use error::ApiResult;
