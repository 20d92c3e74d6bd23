//! Auth Service Library
//!
//! Session tokens, principal resolution, the admin role guard and the
//! candidate account flows (registration, email confirmation, password
//! reset). Storage and mail are reached through the [`client`] ports.

pub mod client;
pub mod config;
pub mod service;

pub use client::{CodePurpose, LoggingMailer, Mailer, PrincipalDirectory};
pub use config::AuthServiceConfig;
pub use service::{
    AuthService, Authenticator, Claims, LoginResponse, Registration, Session, TokenIssuer,
    TokenResponse,
};
