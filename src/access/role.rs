use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Membership role within an organization.
///
/// Roles form a single total order:
/// `super_admin > admin > staff_admin > staff_manager > consumer`.
/// There is no per-capability matrix; every "has at least role X" check
/// compares positions in this order via [`Role::level`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Role {
    SuperAdmin,
    Admin,
    StaffAdmin,
    StaffManager,
    Consumer,
}

impl Role {
    /// All roles, highest first.
    pub const ALL: [Role; 5] = [
        Role::SuperAdmin,
        Role::Admin,
        Role::StaffAdmin,
        Role::StaffManager,
        Role::Consumer,
    ];

    /// Position in the hierarchy (consumer = 1, super_admin = 5).
    pub fn level(&self) -> u8 {
        match self {
            Role::SuperAdmin => 5,
            Role::Admin => 4,
            Role::StaffAdmin => 3,
            Role::StaffManager => 2,
            Role::Consumer => 1,
        }
    }

    /// True when this role sits at or above `required`.
    pub fn satisfies(&self, required: Role) -> bool {
        self.level() >= required.level()
    }

    /// Staff-tier roles bypass the subscription gate.
    pub fn is_staff(&self) -> bool {
        self.satisfies(Role::StaffManager)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "super_admin",
            Role::Admin => "admin",
            Role::StaffAdmin => "staff_admin",
            Role::StaffManager => "staff_manager",
            Role::Consumer => "consumer",
        }
    }
}

impl PartialOrd for Role {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Role {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.level().cmp(&other.level())
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid role '{0}', expected one of: super_admin, admin, staff_admin, staff_manager, consumer")]
pub struct ParseRoleError(pub String);

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .iter()
            .copied()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| ParseRoleError(s.to_string()))
    }
}
