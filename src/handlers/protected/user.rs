use axum::extract::{Extension, State};

use crate::database::models::UserOrganization;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

/// GET /api/user/organizations - organizations the caller belongs to, with role
pub async fn organizations_get(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> ApiResult<Vec<UserOrganization>> {
    let organizations = state.organizations.list_for_user(auth.user_id).await?;
    Ok(ApiResponse::success(organizations))
}
