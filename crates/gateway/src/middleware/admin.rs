//! Administrator role guard.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
    Extension,
};
use tracing::warn;

use common::AppError;

use super::auth::CurrentPrincipal;
use crate::state::AppState;

/// Admin-only gate, layered inside [`super::auth_middleware`].
///
/// The admin record is reloaded by id, so a token minted before a
/// demotion is refused even though its role claim still says admin.
pub async fn admin_middleware(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentPrincipal>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if let Err(e) = state.auth.require_admin(current.principal()).await {
        warn!(principal_id = %current.principal().id(), "Admin route refused");
        return Err(e);
    }

    Ok(next.run(request).await)
}
