//! HTTP inbound adapter exposing the library REST API.

pub mod activities;
pub mod books;
pub mod clients;
pub mod dashboard;
pub mod employees;
pub mod error;
pub mod health;
pub mod schemas;
pub mod session;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use error::ApiResult;
