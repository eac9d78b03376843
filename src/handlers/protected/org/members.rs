use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Extension, Path, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::access::{ensure_removal_allowed, ensure_role_change_allowed, Role};
use crate::database::models::Membership;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

use super::{require_role, resolve_organization};

#[derive(Debug, Deserialize)]
pub struct UpdateRoleRequest {
    pub role: Option<String>,
}

/// GET /api/org/:slug/members - staff_manager and above
pub async fn members_get(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(slug): Path<String>,
) -> ApiResult<Vec<Membership>> {
    let organization = resolve_organization(&state, &slug).await?;
    require_role(&state, auth.user_id, &organization, Role::StaffManager).await?;

    let members = state.memberships.list_members(organization.id).await?;
    Ok(ApiResponse::success(members))
}

/// PATCH /api/org/:slug/members/:user_id - change a member's role (admin)
pub async fn member_patch(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    path: Result<Path<(String, Uuid)>, PathRejection>,
    payload: Result<Json<UpdateRoleRequest>, JsonRejection>,
) -> ApiResult<Membership> {
    let Path((slug, user_id)) = path?;
    let Json(payload) = payload?;
    let organization = resolve_organization(&state, &slug).await?;

    let new_role: Role = payload
        .role
        .as_deref()
        .ok_or_else(|| ApiError::bad_request("Role is required"))?
        .parse()?;

    require_role(&state, auth.user_id, &organization, Role::Admin).await?;

    let current_role = state
        .memberships
        .find_role(user_id, organization.id)
        .await?
        .ok_or_else(|| ApiError::not_found("Membership not found"))?;

    ensure_role_change_allowed(auth.user_id, user_id, current_role, new_role)?;

    let membership = state
        .memberships
        .update_role(user_id, organization.id, new_role)
        .await?
        .ok_or_else(|| ApiError::not_found("Membership not found"))?;

    tracing::info!(
        "Role of {} in '{}' changed {} -> {} by {}",
        user_id,
        organization.slug,
        current_role,
        new_role,
        auth.user_id
    );

    Ok(ApiResponse::success(membership))
}

/// DELETE /api/org/:slug/members/:user_id - remove a member (admin)
pub async fn member_delete(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    path: Result<Path<(String, Uuid)>, PathRejection>,
) -> ApiResult<Value> {
    let Path((slug, user_id)) = path?;
    let organization = resolve_organization(&state, &slug).await?;
    require_role(&state, auth.user_id, &organization, Role::Admin).await?;
    ensure_removal_allowed(auth.user_id, user_id)?;

    if !state.memberships.remove_member(user_id, organization.id).await? {
        return Err(ApiError::not_found("Membership not found"));
    }

    tracing::info!("Removed {} from '{}' by {}", user_id, organization.slug, auth.user_id);

    Ok(ApiResponse::success(json!({ "message": "Member removed successfully" })))
}
