//! Profile record model and the boundary to the external Profile API.

pub mod domain;
pub mod gateway;
pub mod http;

pub use domain::{
    FieldValueError, Gender, NewProfile, Profile, ProfileField, ProfileFields, ProfileId,
    Timestamp,
};
pub use gateway::{GatewayError, ProfileGateway};
pub use http::HttpProfileGateway;
