//! Profile intake and roster administration for a matrimonial broker, backed by an
//! external Profile API.

pub mod auth;
pub mod config;
pub mod error;
pub mod profiles;
pub mod telemetry;
pub mod workflows;
