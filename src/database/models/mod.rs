//! Row types for the library tables.
//!
//! Every timestamp column is `timestamp` without time zone holding UTC
//! wall time; queries read them `AT TIME ZONE 'UTC'` so they decode as
//! `DateTime<Utc>`.

pub mod collection;
pub mod consumer_subscription;
pub mod event;
pub mod item;
pub mod membership;
pub mod organization;

pub use collection::Collection;
pub use consumer_subscription::ConsumerSubscription;
pub use event::Event;
pub use item::{Item, ItemType};
pub use membership::Membership;
pub use organization::{Organization, UserOrganization};
