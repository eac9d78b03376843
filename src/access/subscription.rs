use serde::{Deserialize, Serialize};
use std::fmt;

/// Billing state of a consumer subscription as last pushed by the provider.
///
/// Stored as free-form text. Known provider states get their own variant;
/// anything else is kept verbatim in `Other` so no status is ever lost.
/// Only [`SubscriptionStatus::Active`] grants content access. Values are
/// built from text through `From<&str>`, which keeps a known literal out of
/// `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SubscriptionStatus {
    Active,
    Trialing,
    PastDue,
    Canceled,
    Unpaid,
    Incomplete,
    IncompleteExpired,
    Paused,
    Other(UnrecognizedStatus),
}

/// Provider status text that matched no known variant.
///
/// Only constructible by parsing, so it never holds a known literal such as
/// `active`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnrecognizedStatus(String);

impl UnrecognizedStatus {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl SubscriptionStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, SubscriptionStatus::Active)
    }

    pub fn as_str(&self) -> &str {
        match self {
            SubscriptionStatus::Active => "active",
            SubscriptionStatus::Trialing => "trialing",
            SubscriptionStatus::PastDue => "past_due",
            SubscriptionStatus::Canceled => "canceled",
            SubscriptionStatus::Unpaid => "unpaid",
            SubscriptionStatus::Incomplete => "incomplete",
            SubscriptionStatus::IncompleteExpired => "incomplete_expired",
            SubscriptionStatus::Paused => "paused",
            SubscriptionStatus::Other(raw) => raw.as_str(),
        }
    }
}

impl From<&str> for SubscriptionStatus {
    fn from(raw: &str) -> Self {
        // Exact match only: "Active" or " active" are not the provider's literal.
        match raw {
            "active" => SubscriptionStatus::Active,
            "trialing" => SubscriptionStatus::Trialing,
            "past_due" => SubscriptionStatus::PastDue,
            "canceled" => SubscriptionStatus::Canceled,
            "unpaid" => SubscriptionStatus::Unpaid,
            "incomplete" => SubscriptionStatus::Incomplete,
            "incomplete_expired" => SubscriptionStatus::IncompleteExpired,
            "paused" => SubscriptionStatus::Paused,
            other => SubscriptionStatus::Other(UnrecognizedStatus(other.to_string())),
        }
    }
}

impl From<String> for SubscriptionStatus {
    fn from(raw: String) -> Self {
        SubscriptionStatus::from(raw.as_str())
    }
}

impl From<SubscriptionStatus> for String {
    fn from(status: SubscriptionStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How subscription freshness is judged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SubscriptionFreshness {
    /// The provider-pushed status is the sole authority.
    #[default]
    StatusOnly,
    /// An `active` row whose period end has passed counts as inactive.
    EnforcePeriodEnd,
}
