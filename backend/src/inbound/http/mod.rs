//! HTTP inbound adapter exposing REST endpoints.

pub mod analyze;
pub mod auth;
pub mod error;
pub mod health;
pub mod history;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use error::ApiResult;
