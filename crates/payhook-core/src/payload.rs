//! Wire shape of a simulated webhook event.
//!
//! Field declaration order is the JSON key order, and the signature covers
//! those exact bytes, so fields must not be reordered casually.

use crate::event::EventKind;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Paid,
    Refunded,
    Chargedback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    Active,
    Canceled,
}

/// One simulated webhook notification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Payload {
    pub order_id: String,
    pub order_ref: String,
    pub order_status: OrderStatus,
    pub product_type: &'static str,
    pub payment_method: &'static str,
    pub store_id: &'static str,
    pub payment_merchant_id: u64,
    pub installments: u32,
    pub card_type: &'static str,
    pub card_last4digits: &'static str,
    pub card_rejection_reason: Option<String>,
    #[serde(rename = "boleto_URL")]
    pub boleto_url: Option<String>,
    pub boleto_barcode: Option<String>,
    pub boleto_expiry_date: Option<String>,
    pub pix_code: Option<String>,
    pub pix_expiration: Option<String>,
    pub sale_type: &'static str,
    pub created_at: String,
    pub updated_at: String,
    pub approved_date: Option<String>,
    pub refunded_at: Option<String>,
    pub webhook_event_type: EventKind,
    #[serde(rename = "Product")]
    pub product: Product,
    #[serde(rename = "Customer")]
    pub customer: Customer,
    #[serde(rename = "Commissions")]
    pub commissions: Commissions,
    #[serde(rename = "TrackingParameters")]
    pub tracking_parameters: BTreeMap<String, String>,
    #[serde(rename = "Subscription")]
    pub subscription: Subscription,
    pub subscription_id: String,
    /// Outer `None` drops the key; `Some(None)` renders `null`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_url: Option<Option<String>>,
}

impl Payload {
    pub fn event_kind(&self) -> EventKind {
        self.webhook_event_type
    }

    pub fn customer_email(&self) -> &str {
        &self.customer.email
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    pub product_id: String,
    pub product_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Customer {
    /// Reported only when the caller pins a customer identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub full_name: String,
    pub first_name: String,
    pub email: String,
    pub mobile: &'static str,
    /// Present only in the order_approved schema.
    #[serde(flatten)]
    pub contact: Option<CustomerContact>,
}

/// Contact and address block of a first purchase. Everything but the IP is
/// unknown to the simulator and renders as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerContact {
    pub cnpj: Option<String>,
    pub ip: &'static str,
    pub instagram: Option<String>,
    pub street: Option<String>,
    pub number: Option<String>,
    pub complement: Option<String>,
    pub neighborhood: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zipcode: Option<String>,
}

/// Kind-specific commission breakdown; serializes as the inner record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Commissions {
    Settled(SettledCommissions),
    Renewal(RenewalCommissions),
    Canceled(CanceledCommissions),
    Disputed(DisputedCommissions),
}

impl Commissions {
    pub fn charge_amount(&self) -> i64 {
        match self {
            Commissions::Settled(c) => c.charge_amount,
            Commissions::Renewal(c) => c.charge_amount,
            Commissions::Canceled(c) => c.charge_amount,
            Commissions::Disputed(c) => c.charge_amount,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettledCommissions {
    pub charge_amount: i64,
    pub product_base_price: i64,
    pub product_base_price_currency: &'static str,
    pub kiwify_fee: i64,
    pub kiwify_fee_currency: &'static str,
    pub settlement_amount: i64,
    pub settlement_amount_currency: &'static str,
    pub sale_tax_rate: i64,
    pub sale_tax_amount: i64,
    pub currency: &'static str,
    pub my_commission: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenewalCommissions {
    pub charge_amount: i64,
    pub product_base_price: i64,
    pub product_base_price_currency: &'static str,
    pub kiwify_fee: i64,
    pub currency: &'static str,
    pub my_commission: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CanceledCommissions {
    pub charge_amount: i64,
    pub currency: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisputedCommissions {
    pub charge_amount: i64,
    pub product_base_price: i64,
    pub currency: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Subscription {
    pub id: String,
    pub start_date: String,
    pub next_payment: String,
    pub status: SubscriptionStatus,
    pub plan: SubscriptionPlan,
    pub charges: Charges,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubscriptionPlan {
    pub id: String,
    pub name: String,
    pub frequency: &'static str,
    pub qty_charges: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Charges {
    pub completed: Vec<CompletedCharge>,
    pub future: Vec<FutureCharge>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletedCharge {
    pub order_id: String,
    pub amount: i64,
    pub status: OrderStatus,
    pub installments: u32,
    pub card_type: &'static str,
    pub card_last_digits: &'static str,
    /// Not reported on chargebacks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_first_digits: Option<&'static str>,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FutureCharge {
    pub charge_date: String,
}
