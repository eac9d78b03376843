// handlers/protected/org - organization-scoped endpoints under /api/org/:slug
//
// Every handler resolves the organization from its slug first (404 when
// unknown), then asks the evaluator. Denials become 403; store faults
// propagate as 5xx through ApiError.

use uuid::Uuid;

use crate::access::{GatedAccess, Role};
use crate::database::models::Organization;
use crate::error::ApiError;
use crate::state::AppState;

pub mod access;
pub mod collections;
pub mod events;
pub mod members;
pub mod show;

pub use access::access_get;
pub use collections::{collection_get, collections_get, item_get, items_get};
pub use events::events_get;
pub use members::{member_delete, member_patch, members_get};
pub use show::organization_get;

async fn resolve_organization(state: &AppState, slug: &str) -> Result<Organization, ApiError> {
    state
        .organizations
        .find_by_slug(slug)
        .await?
        .ok_or_else(|| ApiError::not_found("Organization not found"))
}

async fn require_role(state: &AppState, user_id: Uuid, organization: &Organization, required: Role) -> Result<(), ApiError> {
    if state.evaluator.has_role(user_id, organization.id, required).await? {
        Ok(())
    } else {
        tracing::info!(
            "Denied {} in '{}': requires {}",
            user_id,
            organization.slug,
            required
        );
        Err(ApiError::forbidden("Forbidden"))
    }
}

async fn require_gated_access(state: &AppState, user_id: Uuid, organization: &Organization) -> Result<GatedAccess, ApiError> {
    match state.evaluator.check_gated_access(user_id, organization.id).await? {
        GatedAccess::NotMember => Err(ApiError::forbidden("Forbidden")),
        GatedAccess::SubscriptionRequired => Err(ApiError::forbidden("Subscription required")),
        granted => Ok(granted),
    }
}
