//! Per-event constant fields.
//!
//! Every event kind shares one payload shape; the kinds differ only in the
//! records below.

use crate::event::EventKind;
use crate::payload::{OrderStatus, SubscriptionStatus};

/// Which customer block the event carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomerSchema {
    /// Identity and mobile only.
    Basic,
    /// Identity plus the contact and address block.
    Extended,
}

/// Which commission breakdown the event carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommissionsSchema {
    Settled,
    Renewal,
    Canceled,
    Disputed,
}

/// Shape of the single completed charge, if the event reports one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChargeHistory {
    Empty,
    Paid,
    PaidWithoutCardPrefix,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindTemplate {
    pub kind: EventKind,
    pub order_status: OrderStatus,
    pub subscription_status: SubscriptionStatus,
    /// `approved_date` carries the build instant instead of `null`.
    pub stamps_approval: bool,
    /// `refunded_at` carries the build instant instead of `null`.
    pub stamps_refund: bool,
    /// Product, plan name and default amount come from the selected plan.
    pub uses_plan: bool,
    pub charge_history: ChargeHistory,
    /// Schedules one upcoming charge at the build instant.
    pub schedules_next_charge: bool,
    pub customer: CustomerSchema,
    pub commissions: CommissionsSchema,
    /// Carries a trailing `access_url: null`.
    pub has_access_url: bool,
}

const ORDER_APPROVED: KindTemplate = KindTemplate {
    kind: EventKind::OrderApproved,
    order_status: OrderStatus::Paid,
    subscription_status: SubscriptionStatus::Active,
    stamps_approval: true,
    stamps_refund: false,
    uses_plan: true,
    charge_history: ChargeHistory::Paid,
    schedules_next_charge: false,
    customer: CustomerSchema::Extended,
    commissions: CommissionsSchema::Settled,
    has_access_url: true,
};

const SUBSCRIPTION_RENEWED: KindTemplate = KindTemplate {
    kind: EventKind::SubscriptionRenewed,
    order_status: OrderStatus::Paid,
    subscription_status: SubscriptionStatus::Active,
    stamps_approval: false,
    stamps_refund: false,
    uses_plan: false,
    charge_history: ChargeHistory::Paid,
    schedules_next_charge: true,
    customer: CustomerSchema::Basic,
    commissions: CommissionsSchema::Renewal,
    has_access_url: false,
};

const SUBSCRIPTION_CANCELED: KindTemplate = KindTemplate {
    kind: EventKind::SubscriptionCanceled,
    order_status: OrderStatus::Refunded,
    subscription_status: SubscriptionStatus::Canceled,
    stamps_approval: false,
    stamps_refund: true,
    uses_plan: false,
    charge_history: ChargeHistory::Empty,
    schedules_next_charge: true,
    customer: CustomerSchema::Basic,
    commissions: CommissionsSchema::Canceled,
    has_access_url: false,
};

const CHARGEBACK: KindTemplate = KindTemplate {
    kind: EventKind::Chargeback,
    order_status: OrderStatus::Chargedback,
    subscription_status: SubscriptionStatus::Active,
    stamps_approval: false,
    stamps_refund: false,
    uses_plan: false,
    charge_history: ChargeHistory::PaidWithoutCardPrefix,
    schedules_next_charge: true,
    customer: CustomerSchema::Basic,
    commissions: CommissionsSchema::Disputed,
    has_access_url: false,
};

impl EventKind {
    pub fn template(self) -> &'static KindTemplate {
        match self {
            EventKind::OrderApproved => &ORDER_APPROVED,
            EventKind::SubscriptionRenewed => &SUBSCRIPTION_RENEWED,
            EventKind::SubscriptionCanceled => &SUBSCRIPTION_CANCELED,
            EventKind::Chargeback => &CHARGEBACK,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_has_its_own_template() {
        for kind in EventKind::ALL {
            assert_eq!(kind.template().kind, kind);
        }
    }

    #[test]
    fn lifecycle_stamps_are_exclusive() {
        for kind in EventKind::ALL {
            let t = kind.template();
            assert!(!(t.stamps_approval && t.stamps_refund), "{kind}");
        }
    }
}
