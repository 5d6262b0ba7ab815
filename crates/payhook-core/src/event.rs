//! Event kinds the simulator can emit.

use crate::error::BuildError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of webhook events the payment platform sends.
///
/// Serializes as the wire name found in `webhook_event_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    OrderApproved,
    SubscriptionRenewed,
    SubscriptionCanceled,
    Chargeback,
}

impl EventKind {
    pub const ALL: [EventKind; 4] = [
        EventKind::OrderApproved,
        EventKind::SubscriptionRenewed,
        EventKind::SubscriptionCanceled,
        EventKind::Chargeback,
    ];

    /// Name used on the wire, e.g. `order_approved`.
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::OrderApproved => "order_approved",
            EventKind::SubscriptionRenewed => "subscription_renewed",
            EventKind::SubscriptionCanceled => "subscription_canceled",
            EventKind::Chargeback => "chargeback",
        }
    }

    /// Short command name, e.g. `approved`.
    pub fn command_name(self) -> &'static str {
        match self {
            EventKind::OrderApproved => "approved",
            EventKind::SubscriptionRenewed => "renewed",
            EventKind::SubscriptionCanceled => "canceled",
            EventKind::Chargeback => "chargeback",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = BuildError;

    /// Accepts both the wire name and the short command name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        EventKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s || kind.command_name() == s)
            .ok_or_else(|| BuildError::InvalidArgument(format!("unknown event kind '{s}'")))
    }
}
