// Member-management invariants that protect an organization from locking
// out its own administrators. Callers check `admin` through the evaluator
// first; these functions only cover the self-targeting cases.

use thiserror::Error;
use uuid::Uuid;

use super::role::Role;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyViolation {
    #[error("Cannot demote yourself from admin")]
    SelfDemotion,

    #[error("Cannot remove yourself from the organization")]
    SelfRemoval,
}

/// Reject a role change that would take the requestor below `admin`.
pub fn ensure_role_change_allowed(
    requestor_id: Uuid,
    target_id: Uuid,
    current_role: Role,
    new_role: Role,
) -> Result<(), PolicyViolation> {
    if requestor_id == target_id
        && current_role.satisfies(Role::Admin)
        && !new_role.satisfies(Role::Admin)
    {
        return Err(PolicyViolation::SelfDemotion);
    }
    Ok(())
}

/// Reject removal of the requestor's own membership.
pub fn ensure_removal_allowed(requestor_id: Uuid, target_id: Uuid) -> Result<(), PolicyViolation> {
    if requestor_id == target_id {
        return Err(PolicyViolation::SelfRemoval);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_cannot_demote_self_below_admin() {
        let me = Uuid::new_v4();
        for new_role in [Role::StaffAdmin, Role::StaffManager, Role::Consumer] {
            assert_eq!(
                ensure_role_change_allowed(me, me, Role::Admin, new_role),
                Err(PolicyViolation::SelfDemotion)
            );
        }
        assert_eq!(
            ensure_role_change_allowed(me, me, Role::SuperAdmin, Role::Consumer),
            Err(PolicyViolation::SelfDemotion)
        );
    }

    #[test]
    fn admin_level_self_changes_are_allowed() {
        let me = Uuid::new_v4();
        assert!(ensure_role_change_allowed(me, me, Role::Admin, Role::Admin).is_ok());
        assert!(ensure_role_change_allowed(me, me, Role::SuperAdmin, Role::Admin).is_ok());
        assert!(ensure_role_change_allowed(me, me, Role::Admin, Role::SuperAdmin).is_ok());
    }

    #[test]
    fn demoting_someone_else_is_allowed() {
        let me = Uuid::new_v4();
        let other = Uuid::new_v4();
        assert!(ensure_role_change_allowed(me, other, Role::Admin, Role::Consumer).is_ok());
    }

    #[test]
    fn removal_only_blocks_self() {
        let me = Uuid::new_v4();
        assert_eq!(ensure_removal_allowed(me, me), Err(PolicyViolation::SelfRemoval));
        assert!(ensure_removal_allowed(me, Uuid::new_v4()).is_ok());
    }
}
