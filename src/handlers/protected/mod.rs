// handlers/protected/mod.rs - Protected handlers (JWT authentication required)
//
// Routed under /api with jwt_auth_middleware; every handler receives the
// caller as an AuthUser extension and passes its id explicitly to the
// evaluator.

pub mod auth;
pub mod org;
pub mod user;
