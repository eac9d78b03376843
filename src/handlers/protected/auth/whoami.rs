use axum::extract::Extension;
use serde_json::{json, Value};

use crate::middleware::{ApiResponse, ApiResult, AuthUser};

/// GET /api/auth/whoami - identity carried by the bearer token
pub async fn whoami_get(Extension(auth): Extension<AuthUser>) -> ApiResult<Value> {
    Ok(ApiResponse::success(json!({ "user_id": auth.user_id })))
}
