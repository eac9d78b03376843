use axum::extract::rejection::PathRejection;
use axum::extract::{Extension, Path, State};
use uuid::Uuid;

use crate::database::models::{Collection, Item};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

use super::{require_gated_access, resolve_organization};

/// GET /api/org/:slug/collections - staff or active subscribers only
pub async fn collections_get(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(slug): Path<String>,
) -> ApiResult<Vec<Collection>> {
    let organization = resolve_organization(&state, &slug).await?;
    require_gated_access(&state, auth.user_id, &organization).await?;

    let collections = state.content.list_collections(organization.id).await?;
    Ok(ApiResponse::success(collections))
}

/// GET /api/org/:slug/collections/:collection_id
pub async fn collection_get(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    path: Result<Path<(String, Uuid)>, PathRejection>,
) -> ApiResult<Collection> {
    let Path((slug, collection_id)) = path?;
    let organization = resolve_organization(&state, &slug).await?;
    require_gated_access(&state, auth.user_id, &organization).await?;

    let collection = state
        .content
        .find_collection(organization.id, collection_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Collection not found"))?;

    Ok(ApiResponse::success(collection))
}

/// GET /api/org/:slug/collections/:collection_id/items
pub async fn items_get(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    path: Result<Path<(String, Uuid)>, PathRejection>,
) -> ApiResult<Vec<Item>> {
    let Path((slug, collection_id)) = path?;
    let organization = resolve_organization(&state, &slug).await?;
    require_gated_access(&state, auth.user_id, &organization).await?;

    let items = state.content.list_items(organization.id, collection_id).await?;
    Ok(ApiResponse::success(items))
}

/// GET /api/org/:slug/collections/:collection_id/items/:item_id
pub async fn item_get(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    path: Result<Path<(String, Uuid, Uuid)>, PathRejection>,
) -> ApiResult<Item> {
    let Path((slug, collection_id, item_id)) = path?;
    let organization = resolve_organization(&state, &slug).await?;
    require_gated_access(&state, auth.user_id, &organization).await?;

    let item = state
        .content
        .find_item(organization.id, collection_id, item_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Item not found"))?;

    Ok(ApiResponse::success(item))
}
