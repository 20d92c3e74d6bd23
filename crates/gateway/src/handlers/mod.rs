//! HTTP request handlers.

pub mod auth_handler;
pub mod company_handler;
pub mod envelope;
pub mod health_handler;
pub mod job_handler;
pub mod user_handler;

pub use auth_handler::{auth_routes, session_routes};
pub use company_handler::{company_admin_routes, company_routes};
pub use health_handler::health_routes;
pub use job_handler::job_routes;
pub use user_handler::{user_admin_routes, user_routes};

use serde::Serialize;
use utoipa::ToSchema;

use common::{AppError, AppResult};
use domain::ObjectId;

/// Plain acknowledgement body.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Path ids are hex ObjectIds; anything else is a 400.
pub(crate) fn parse_id(raw: &str) -> AppResult<ObjectId> {
    ObjectId::parse_str(raw).map_err(|_| AppError::bad_request(format!("'{}' is not a valid id", raw)))
}
