use axum::extract::{Extension, Path, State};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::access::{GatedAccess, Role, SubscriptionStatus};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

use super::resolve_organization;

#[derive(Debug, Serialize)]
pub struct SubscriptionSummary {
    pub status: SubscriptionStatus,
    pub current_period_end: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct AccessReport {
    pub organization_id: Uuid,
    pub role: Option<Role>,
    pub subscription: Option<SubscriptionSummary>,
    pub has_active_subscription: bool,
    pub gated_access: GatedAccess,
    pub granted: bool,
}

/// GET /api/org/:slug/access - the caller's own standing in the organization
///
/// Never denies: it reports what the gate would decide for this caller.
pub async fn access_get(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(slug): Path<String>,
) -> ApiResult<AccessReport> {
    let organization = resolve_organization(&state, &slug).await?;
    let evaluator = &state.evaluator;

    let role = evaluator.role_of(auth.user_id, organization.id).await?;
    let subscription = evaluator.subscription_of(auth.user_id, organization.id).await?;
    let has_active_subscription = evaluator.has_active_subscription(auth.user_id, organization.id).await?;
    let gated_access = evaluator.check_gated_access(auth.user_id, organization.id).await?;

    Ok(ApiResponse::success(AccessReport {
        organization_id: organization.id,
        role,
        subscription: subscription.map(|s| SubscriptionSummary {
            status: s.status,
            current_period_end: s.current_period_end,
        }),
        has_active_subscription,
        gated_access,
        granted: gated_access.is_granted(),
    }))
}
