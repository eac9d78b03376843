use axum::extract::{Extension, Path, State};

use crate::access::Role;
use crate::database::models::Organization;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

use super::{require_role, resolve_organization};

/// GET /api/org/:slug - organization details for any member
pub async fn organization_get(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(slug): Path<String>,
) -> ApiResult<Organization> {
    let organization = resolve_organization(&state, &slug).await?;
    require_role(&state, auth.user_id, &organization, Role::Consumer).await?;
    Ok(ApiResponse::success(organization))
}
