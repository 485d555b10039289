//! Value types of an OAuth 2.0 / OpenID Connect authorization server.

pub mod auth_request;

pub use auth_request::{register, AuthRequest, ClientId, RequestJwtContainer, ResponseType};
