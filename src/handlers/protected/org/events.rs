use axum::extract::{Extension, Path, State};

use crate::database::models::Event;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

use super::{require_gated_access, resolve_organization};

/// GET /api/org/:slug/events - staff or active subscribers, soonest first
pub async fn events_get(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(slug): Path<String>,
) -> ApiResult<Vec<Event>> {
    let organization = resolve_organization(&state, &slug).await?;
    require_gated_access(&state, auth.user_id, &organization).await?;

    let events = state.content.list_events(organization.id).await?;
    Ok(ApiResponse::success(events))
}
