use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::access::Role;

/// Row of the `memberships` table.
///
/// ```sql
/// CREATE TYPE user_role AS ENUM ('super_admin', 'admin', 'staff_admin', 'staff_manager', 'consumer');
///
/// CREATE TABLE memberships (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     organization_id UUID NOT NULL REFERENCES organizations(id) ON DELETE CASCADE,
///     role user_role NOT NULL,
///     UNIQUE (user_id, organization_id)
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Membership {
    pub id: Uuid,
    pub user_id: Uuid,
    pub organization_id: Uuid,
    pub role: Role,
}
