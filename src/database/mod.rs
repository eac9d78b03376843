pub mod manager;
pub mod models;
pub mod store;
pub mod traits;

pub use manager::{DatabaseError, DatabaseManager};
pub use store::PgStore;
pub use traits::{ContentStore, MembershipStore, OrganizationStore, SubscriptionStore};
