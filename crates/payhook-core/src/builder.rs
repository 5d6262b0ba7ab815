//! Assembles a [`Payload`] from an event kind, an email and [`Overrides`].

use crate::error::{BuildError, Result};
use crate::event::EventKind;
use crate::money::{FeeSplit, CURRENCY, DEFAULT_AMOUNT_MINOR};
use crate::names::CustomerName;
use crate::overrides::{supplied, Overrides};
use crate::payload::{
    CanceledCommissions, Charges, Commissions, CompletedCharge, Customer, CustomerContact,
    DisputedCommissions, FutureCharge, OrderStatus, Payload, Product, RenewalCommissions,
    SettledCommissions, Subscription, SubscriptionPlan,
};
use crate::template::{ChargeHistory, CommissionsSchema, CustomerSchema, KindTemplate};
use crate::timestamps::{self, Timestamps};
use std::collections::BTreeMap;
use time::OffsetDateTime;
use uuid::Uuid;

const PRODUCT_TYPE: &str = "membership";
const PAYMENT_METHOD: &str = "credit_card";
const STORE_ID: &str = "test_store_id";
const PAYMENT_MERCHANT_ID: u64 = 12_345_678;
const INSTALLMENTS: u32 = 1;
const CARD_TYPE: &str = "mastercard";
const CARD_LAST_DIGITS: &str = "1234";
const CARD_FIRST_DIGITS: &str = "123456";
const SALE_TYPE: &str = "producer";
const CUSTOMER_MOBILE: &str = "+5511999999999";
const CUSTOMER_IP: &str = "192.168.1.1";
const BILLING_FREQUENCY: &str = "monthly";
const EXAMPLE_PRODUCT_NAME: &str = "Example product";
const EXAMPLE_PLAN_NAME: &str = "Example plan";

/// Builds a payload stamped with the current local time.
pub fn build(kind: EventKind, email: &str, overrides: &Overrides) -> Result<Payload> {
    build_at(kind, email, overrides, timestamps::now())
}

/// Builds a payload stamped with `instant`.
///
/// Identifiers that are not overridden are fresh UUIDs, so two calls never
/// produce the same payload unless every identifier is supplied. The customer
/// identifier is the exception: it is only reported when supplied.
pub fn build_at(
    kind: EventKind,
    email: &str,
    overrides: &Overrides,
    instant: OffsetDateTime,
) -> Result<Payload> {
    let email = email.trim();
    if email.is_empty() {
        return Err(BuildError::InvalidArgument(
            "email must not be empty".to_string(),
        ));
    }

    let template = kind.template();
    let stamps = Timestamps::at(instant)?;
    let plan = overrides.plan.unwrap_or_default();

    let amount = match overrides.amount {
        Some(major) => major.to_minor_units(),
        None if template.uses_plan => plan.default_price(),
        None => DEFAULT_AMOUNT_MINOR,
    };

    let order_id = supplied(&overrides.order_id).unwrap_or_else(new_id);
    let customer_id = supplied(&overrides.customer_id);
    let subscription_id = supplied(&overrides.subscription_id).unwrap_or_else(new_id);

    let (default_product_id, default_product_name, plan_name) = if template.uses_plan {
        (plan.product_id().to_string(), plan.name(), plan.name())
    } else {
        (new_id(), EXAMPLE_PRODUCT_NAME, EXAMPLE_PLAN_NAME)
    };
    let product = Product {
        product_id: supplied(&overrides.product_id).unwrap_or(default_product_id),
        product_name: supplied(&overrides.product_name)
            .unwrap_or_else(|| default_product_name.to_string()),
    };

    Ok(Payload {
        order_id: order_id.clone(),
        order_ref: stamps.order_ref.clone(),
        order_status: template.order_status,
        product_type: PRODUCT_TYPE,
        payment_method: PAYMENT_METHOD,
        store_id: STORE_ID,
        payment_merchant_id: PAYMENT_MERCHANT_ID,
        installments: INSTALLMENTS,
        card_type: CARD_TYPE,
        card_last4digits: CARD_LAST_DIGITS,
        card_rejection_reason: None,
        boleto_url: None,
        boleto_barcode: None,
        boleto_expiry_date: None,
        pix_code: None,
        pix_expiration: None,
        sale_type: SALE_TYPE,
        created_at: stamps.local.clone(),
        updated_at: stamps.local.clone(),
        approved_date: template.stamps_approval.then(|| stamps.local.clone()),
        refunded_at: template.stamps_refund.then(|| stamps.local.clone()),
        webhook_event_type: kind,
        product,
        customer: customer(template, customer_id, email),
        commissions: commissions(template.commissions, amount),
        tracking_parameters: BTreeMap::new(),
        subscription: Subscription {
            id: subscription_id.clone(),
            start_date: stamps.iso.clone(),
            next_payment: stamps.iso.clone(),
            status: template.subscription_status,
            plan: SubscriptionPlan {
                id: new_id(),
                name: plan_name.to_string(),
                frequency: BILLING_FREQUENCY,
                qty_charges: 0,
            },
            charges: charges(template, &order_id, amount, &stamps),
        },
        subscription_id,
        access_url: template.has_access_url.then_some(None),
    })
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn customer(template: &KindTemplate, id: Option<String>, email: &str) -> Customer {
    let name = CustomerName::from_email(email);
    let contact = match template.customer {
        CustomerSchema::Basic => None,
        CustomerSchema::Extended => Some(CustomerContact {
            cnpj: None,
            ip: CUSTOMER_IP,
            instagram: None,
            street: None,
            number: None,
            complement: None,
            neighborhood: None,
            city: None,
            state: None,
            zipcode: None,
        }),
    };
    Customer {
        id,
        full_name: name.full_name,
        first_name: name.first_name,
        email: email.to_string(),
        mobile: CUSTOMER_MOBILE,
        contact,
    }
}

fn commissions(schema: CommissionsSchema, amount: i64) -> Commissions {
    let split = FeeSplit::of(amount);
    match schema {
        CommissionsSchema::Settled => Commissions::Settled(SettledCommissions {
            charge_amount: amount,
            product_base_price: amount,
            product_base_price_currency: CURRENCY,
            kiwify_fee: split.platform_fee,
            kiwify_fee_currency: CURRENCY,
            settlement_amount: amount,
            settlement_amount_currency: CURRENCY,
            sale_tax_rate: 0,
            sale_tax_amount: 0,
            currency: CURRENCY,
            my_commission: split.net,
        }),
        CommissionsSchema::Renewal => Commissions::Renewal(RenewalCommissions {
            charge_amount: amount,
            product_base_price: amount,
            product_base_price_currency: CURRENCY,
            kiwify_fee: split.platform_fee,
            currency: CURRENCY,
            my_commission: split.net,
        }),
        // A canceled subscription charges nothing.
        CommissionsSchema::Canceled => Commissions::Canceled(CanceledCommissions {
            charge_amount: 0,
            currency: CURRENCY,
        }),
        CommissionsSchema::Disputed => Commissions::Disputed(DisputedCommissions {
            charge_amount: amount,
            product_base_price: amount,
            currency: CURRENCY,
        }),
    }
}

fn charges(template: &KindTemplate, order_id: &str, amount: i64, stamps: &Timestamps) -> Charges {
    let paid = |card_first_digits| CompletedCharge {
        order_id: order_id.to_string(),
        amount,
        status: OrderStatus::Paid,
        installments: INSTALLMENTS,
        card_type: CARD_TYPE,
        card_last_digits: CARD_LAST_DIGITS,
        card_first_digits,
        created_at: stamps.iso.clone(),
    };
    let completed = match template.charge_history {
        ChargeHistory::Empty => Vec::new(),
        ChargeHistory::Paid => vec![paid(Some(CARD_FIRST_DIGITS))],
        ChargeHistory::PaidWithoutCardPrefix => vec![paid(None)],
    };
    let future = if template.schedules_next_charge {
        vec![FutureCharge {
            charge_date: stamps.iso.clone(),
        }]
    } else {
        Vec::new()
    };
    Charges { completed, future }
}
