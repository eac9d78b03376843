//! Authorization and access gating.
//!
//! Two independent checks compose every decision: the static role
//! hierarchy ([`Role`]) and the dynamic consumer subscription status
//! ([`SubscriptionStatus`]). [`AccessEvaluator`] performs both against the
//! stores; [`guard`] holds the member-management invariants.

pub mod evaluator;
pub mod guard;
pub mod role;
pub mod subscription;

pub use evaluator::{AccessEvaluator, GatedAccess};
pub use guard::{ensure_removal_allowed, ensure_role_change_allowed, PolicyViolation};
pub use role::{ParseRoleError, Role};
pub use subscription::{SubscriptionFreshness, SubscriptionStatus, UnrecognizedStatus};
