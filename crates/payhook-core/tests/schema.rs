//! Every event kind renders every key of its schema, with no omissions.

use payhook_core::{build, build_at, EventKind, MajorAmount, Overrides, Plan};
use serde_json::Value;
use std::collections::BTreeSet;
use time::macros::datetime;

const TOP_LEVEL: &[&str] = &[
    "order_id",
    "order_ref",
    "order_status",
    "product_type",
    "payment_method",
    "store_id",
    "payment_merchant_id",
    "installments",
    "card_type",
    "card_last4digits",
    "card_rejection_reason",
    "boleto_URL",
    "boleto_barcode",
    "boleto_expiry_date",
    "pix_code",
    "pix_expiration",
    "sale_type",
    "created_at",
    "updated_at",
    "approved_date",
    "refunded_at",
    "webhook_event_type",
    "Product",
    "Customer",
    "Commissions",
    "TrackingParameters",
    "Subscription",
    "subscription_id",
];

const CUSTOMER_BASIC: &[&str] = &["full_name", "first_name", "email", "mobile"];
const CUSTOMER_CONTACT: &[&str] = &[
    "cnpj",
    "ip",
    "instagram",
    "street",
    "number",
    "complement",
    "neighborhood",
    "city",
    "state",
    "zipcode",
];

fn keys(value: &Value) -> BTreeSet<String> {
    value
        .as_object()
        .unwrap_or_else(|| panic!("expected an object, got {value}"))
        .keys()
        .cloned()
        .collect()
}

fn set(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn commissions_keys(kind: EventKind) -> BTreeSet<String> {
    let names: &[&str] = match kind {
        EventKind::OrderApproved => &[
            "charge_amount",
            "product_base_price",
            "product_base_price_currency",
            "kiwify_fee",
            "kiwify_fee_currency",
            "settlement_amount",
            "settlement_amount_currency",
            "sale_tax_rate",
            "sale_tax_amount",
            "currency",
            "my_commission",
        ],
        EventKind::SubscriptionRenewed => &[
            "charge_amount",
            "product_base_price",
            "product_base_price_currency",
            "kiwify_fee",
            "currency",
            "my_commission",
        ],
        EventKind::SubscriptionCanceled => &["charge_amount", "currency"],
        EventKind::Chargeback => &["charge_amount", "product_base_price", "currency"],
    };
    set(names)
}

#[test]
fn every_kind_renders_its_full_schema() {
    for kind in EventKind::ALL {
        let payload = build(kind, "cliente@example.com", &Overrides::default())
            .unwrap_or_else(|e| panic!("{kind}: {e}"));
        let json = serde_json::to_value(&payload).unwrap();

        let mut top_level = set(TOP_LEVEL);
        if kind == EventKind::OrderApproved {
            top_level.insert("access_url".to_string());
        }
        assert_eq!(keys(&json), top_level, "{kind}: top level");
        assert_eq!(json["webhook_event_type"], kind.as_str());
        assert_eq!(keys(&json["Product"]), set(&["product_id", "product_name"]));

        let mut customer = set(CUSTOMER_BASIC);
        if kind == EventKind::OrderApproved {
            customer.extend(set(CUSTOMER_CONTACT));
        }
        assert_eq!(keys(&json["Customer"]), customer, "{kind}: Customer");
        assert_eq!(keys(&json["Commissions"]), commissions_keys(kind), "{kind}: Commissions");
        assert!(keys(&json["TrackingParameters"]).is_empty());

        let subscription = &json["Subscription"];
        assert_eq!(
            keys(subscription),
            set(&["id", "start_date", "next_payment", "status", "plan", "charges"])
        );
        assert_eq!(
            keys(&subscription["plan"]),
            set(&["id", "name", "frequency", "qty_charges"])
        );
        assert_eq!(keys(&subscription["charges"]), set(&["completed", "future"]));

        for charge in subscription["charges"]["completed"].as_array().unwrap() {
            let mut expected = set(&[
                "order_id",
                "amount",
                "status",
                "installments",
                "card_type",
                "card_last_digits",
                "created_at",
            ]);
            if kind != EventKind::Chargeback {
                expected.insert("card_first_digits".to_string());
            }
            assert_eq!(keys(charge), expected, "{kind}: completed charge");
        }
        for charge in subscription["charges"]["future"].as_array().unwrap() {
            assert_eq!(keys(charge), set(&["charge_date"]));
        }
    }
}

#[test]
fn absent_data_renders_as_null() {
    let payload = build(EventKind::OrderApproved, "a@b.c", &Overrides::default()).unwrap();
    let json = serde_json::to_value(&payload).unwrap();
    for key in [
        "card_rejection_reason",
        "boleto_URL",
        "boleto_barcode",
        "boleto_expiry_date",
        "pix_code",
        "pix_expiration",
        "refunded_at",
        "access_url",
    ] {
        assert!(json[key].is_null(), "{key} should be null");
    }
    assert!(json["Customer"]["cnpj"].is_null());
    assert_eq!(json["Customer"]["ip"], "192.168.1.1");
}

#[test]
fn customer_id_is_reported_only_when_pinned() {
    for kind in EventKind::ALL {
        let payload = build(kind, "a@b.c", &Overrides::default()).unwrap();
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json["Customer"].get("id").is_none(), "{kind}");

        let overrides = Overrides {
            customer_id: Some("cus-42".into()),
            ..Overrides::default()
        };
        let payload = build(kind, "a@b.c", &overrides).unwrap();
        let text = serde_json::to_string(&payload).unwrap();
        assert!(text.contains("\"Customer\":{\"id\":\"cus-42\",\"full_name\":"), "{text}");
    }
}

#[test]
fn only_order_approved_ends_with_access_url() {
    let instant = datetime!(2024-01-02 03:04:05 UTC);
    let overrides = Overrides {
        subscription_id: Some("sub-9".into()),
        ..Overrides::default()
    };
    for kind in EventKind::ALL {
        let text =
            serde_json::to_string(&build_at(kind, "a@b.c", &overrides, instant).unwrap()).unwrap();
        if kind == EventKind::OrderApproved {
            assert!(text.ends_with(",\"subscription_id\":\"sub-9\",\"access_url\":null}"), "{text}");
        } else {
            assert!(text.ends_with(",\"subscription_id\":\"sub-9\"}"), "{kind}: {text}");
        }
    }
}

#[test]
fn serialization_follows_declared_key_order() {
    let payload = build_at(
        EventKind::OrderApproved,
        "a@b.c",
        &Overrides::default(),
        datetime!(2024-01-02 03:04:05 UTC),
    )
    .unwrap();
    let text = serde_json::to_string(&payload).unwrap();

    assert!(text.starts_with("{\"order_id\":"), "{text}");

    let position = |key: &str| {
        text.find(&format!("\"{key}\":"))
            .unwrap_or_else(|| panic!("{key} missing from {text}"))
    };
    let ordered = [
        "order_ref",
        "webhook_event_type",
        "Product",
        "Customer",
        "Commissions",
        "TrackingParameters",
        "Subscription",
        "subscription_id",
        "access_url",
    ];
    for pair in ordered.windows(2) {
        assert!(position(pair[0]) < position(pair[1]), "{} before {}", pair[0], pair[1]);
    }
}

#[test]
fn order_approved_end_to_end_values() {
    let overrides = Overrides {
        plan: Some(Plan::Starter),
        ..Overrides::default()
    };
    let payload = build(EventKind::OrderApproved, "ana.silva@example.com", &overrides).unwrap();
    let json = serde_json::to_value(&payload).unwrap();

    assert_eq!(json["order_status"], "paid");
    assert_eq!(json["Subscription"]["status"], "active");
    assert_eq!(json["Customer"]["full_name"], "Ana.Silva");
    assert_eq!(json["Customer"]["first_name"], "Ana");
    assert_eq!(json["Commissions"]["charge_amount"], 4700);
    assert_eq!(json["Commissions"]["kiwify_fee"], 517);
    assert_eq!(json["Commissions"]["my_commission"], 4183);
    assert_eq!(json["Commissions"]["currency"], "BRL");
}

#[test]
fn amount_override_is_converted_to_cents() {
    let overrides = Overrides {
        amount: Some("97.90".parse::<MajorAmount>().unwrap()),
        ..Overrides::default()
    };
    let payload = build(EventKind::SubscriptionRenewed, "a@b.c", &overrides).unwrap();
    let json = serde_json::to_value(&payload).unwrap();
    assert_eq!(json["Commissions"]["charge_amount"], 9790);
    assert_eq!(json["Commissions"]["kiwify_fee"], 1076);
    assert_eq!(json["Commissions"]["my_commission"], 8713);
    assert_eq!(json["Subscription"]["charges"]["completed"][0]["amount"], 9790);
}
