//! Authentication service business logic.

mod auth_service;
mod token_service;

pub use auth_service::{AuthService, Authenticator, LoginResponse, Registration, Session};
pub use token_service::{Claims, TokenIssuer, TokenResponse};
