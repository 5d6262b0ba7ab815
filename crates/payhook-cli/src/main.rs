//! CLI for payhook.
//!
//! Builds a simulated payment platform webhook event, signs it with the
//! shared secret and POSTs it to an endpoint. Exits 0 only when the endpoint
//! answers `200 OK`.

mod report;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use payhook_core::{EventKind, MajorAmount, Overrides, Plan};
use payhook_delivery::DeliveryClient;
use std::env;
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;
use tracing_subscriber::{fmt, EnvFilter};

/// Endpoint used when neither `--url` nor `PAYHOOK_WEBHOOK_URL` is set.
const DEFAULT_WEBHOOK_URL: &str =
    "https://us-central1-minerx-app-login.cloudfunctions.net/kiwifyWebhook";
const URL_ENV: &str = "PAYHOOK_WEBHOOK_URL";
const SECRET_ENV: &str = "PAYHOOK_SECRET_KEY";

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Simulate payment platform webhook events",
    long_about = None,
    after_help = "Examples:\n  payhook approved --email user@example.com --plan STARTER --secret-key <key>\n  payhook renewed --email user@example.com --amount 67.00 --secret-key <key>\n  payhook canceled --email user@example.com --url http://localhost:8080/webhook"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate an order_approved event (purchase approved)
    Approved {
        #[command(flatten)]
        common: CommonArgs,

        /// Plan identifier: STARTER, SCALING or SCALED
        #[arg(long, default_value = "STARTER")]
        plan: Plan,

        /// Product identifier (default: the plan's product)
        #[arg(long)]
        product_id: Option<String>,

        /// Product name (default: the plan's name)
        #[arg(long)]
        product_name: Option<String>,

        /// Order amount in reais (default: the plan's price)
        #[arg(long)]
        amount: Option<String>,
    },
    /// Simulate a subscription_renewed event
    Renewed {
        #[command(flatten)]
        common: CommonArgs,

        /// Order amount in reais (default: 47.00)
        #[arg(long)]
        amount: Option<String>,
    },
    /// Simulate a subscription_canceled event
    Canceled {
        #[command(flatten)]
        common: CommonArgs,
    },
    /// Simulate a chargeback event
    Chargeback {
        #[command(flatten)]
        common: CommonArgs,

        /// Order amount in reais (default: 47.00)
        #[arg(long)]
        amount: Option<String>,
    },
}

#[derive(Args)]
struct CommonArgs {
    /// Customer email
    #[arg(long)]
    email: String,

    /// Order identifier (generated when omitted)
    #[arg(long)]
    order_id: Option<String>,

    /// Customer identifier (generated when omitted)
    #[arg(long)]
    customer_id: Option<String>,

    /// Subscription identifier (generated when omitted)
    #[arg(long)]
    subscription_id: Option<String>,

    /// Webhook endpoint (default: $PAYHOOK_WEBHOOK_URL or the production hook)
    #[arg(long)]
    url: Option<String>,

    /// Shared secret used for the HMAC signature (default: $PAYHOOK_SECRET_KEY)
    #[arg(long)]
    secret_key: Option<String>,

    /// Build and sign the payload but do not send it
    #[arg(long)]
    dry_run: bool,
}

/// Everything one run needs, resolved from the parsed command line.
struct Invocation {
    kind: EventKind,
    common: CommonArgs,
    overrides: Overrides,
}

impl Invocation {
    fn from_command(command: Commands) -> Result<Self> {
        let (kind, common, overrides) = match command {
            Commands::Approved {
                common,
                plan,
                product_id,
                product_name,
                amount,
            } => (
                EventKind::OrderApproved,
                common,
                Overrides {
                    plan: Some(plan),
                    product_id,
                    product_name,
                    amount: parse_amount(amount)?,
                    ..Overrides::default()
                },
            ),
            Commands::Renewed { common, amount } => (
                EventKind::SubscriptionRenewed,
                common,
                Overrides {
                    amount: parse_amount(amount)?,
                    ..Overrides::default()
                },
            ),
            Commands::Canceled { common } => {
                (EventKind::SubscriptionCanceled, common, Overrides::default())
            }
            Commands::Chargeback { common, amount } => (
                EventKind::Chargeback,
                common,
                Overrides {
                    amount: parse_amount(amount)?,
                    ..Overrides::default()
                },
            ),
        };

        let overrides = Overrides {
            order_id: common.order_id.clone(),
            customer_id: common.customer_id.clone(),
            subscription_id: common.subscription_id.clone(),
            ..overrides
        };

        Ok(Self {
            kind,
            common,
            overrides,
        })
    }
}

fn parse_amount(raw: Option<String>) -> Result<Option<MajorAmount>> {
    raw.map(|value| value.parse::<MajorAmount>())
        .transpose()
        .context("Invalid --amount")
}

/// Flag first, then environment, then the built-in endpoint.
fn resolve_url(flag: Option<String>) -> String {
    flag.filter(|u| !u.trim().is_empty())
        .or_else(|| env::var(URL_ENV).ok().filter(|u| !u.trim().is_empty()))
        .unwrap_or_else(|| DEFAULT_WEBHOOK_URL.to_string())
}

fn resolve_secret(flag: Option<String>) -> Result<String> {
    flag.or_else(|| env::var(SECRET_ENV).ok())
        .filter(|s| !s.is_empty())
        .with_context(|| format!("Secret key not provided. Use --secret-key or set {SECRET_ENV}"))
}

fn run(invocation: Invocation) -> Result<()> {
    let Invocation {
        kind,
        common,
        overrides,
    } = invocation;

    let secret = resolve_secret(common.secret_key)?;
    let url = resolve_url(common.url);

    let payload = payhook_core::build(kind, &common.email, &overrides)
        .with_context(|| format!("Failed to build {kind} payload"))?;
    let request = payhook_delivery::prepare(&url, &payload, &secret)
        .context("Failed to prepare webhook request")?;

    report::request(&url, &secret, &request, &payload)?;

    if common.dry_run {
        report::dry_run(&request);
        return Ok(());
    }

    let client = DeliveryClient::new()?;
    let result = client
        .send(&request)
        .with_context(|| format!("Failed to send webhook to {url}"))?;

    report::response(&result);
    report::outcome(&result);

    if !result.is_success() {
        anyhow::bail!("Webhook returned status {}", result.status);
    }
    Ok(())
}

fn set_up_tracing() -> Result<()> {
    let fmt_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);
    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("warn"))?;
    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    set_up_tracing()?;
    let cli = Cli::parse();
    let invocation = Invocation::from_command(cli.command)?;
    tracing::debug!(kind = %invocation.kind, "simulating webhook");
    run(invocation)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Invocation {
        let cli = Cli::try_parse_from(std::iter::once("payhook").chain(args.iter().copied()))
            .unwrap();
        Invocation::from_command(cli.command).unwrap()
    }

    #[test]
    fn approved_defaults_to_starter_plan() {
        let inv = parse(&["approved", "--email", "a@b.c"]);
        assert_eq!(inv.kind, EventKind::OrderApproved);
        assert_eq!(inv.overrides.plan, Some(Plan::Starter));
        assert_eq!(inv.overrides.amount, None);
        assert!(!inv.common.dry_run);
    }

    #[test]
    fn approved_accepts_every_override() {
        let inv = parse(&[
            "approved",
            "--email",
            "a@b.c",
            "--plan",
            "SCALED",
            "--order-id",
            "ord-1",
            "--customer-id",
            "cus-1",
            "--subscription-id",
            "sub-1",
            "--product-id",
            "prod-1",
            "--product-name",
            "Curso",
            "--amount",
            "97.00",
        ]);
        assert_eq!(inv.overrides.plan, Some(Plan::Scaled));
        assert_eq!(inv.overrides.order_id.as_deref(), Some("ord-1"));
        assert_eq!(inv.overrides.customer_id.as_deref(), Some("cus-1"));
        assert_eq!(inv.overrides.subscription_id.as_deref(), Some("sub-1"));
        assert_eq!(inv.overrides.product_id.as_deref(), Some("prod-1"));
        assert_eq!(inv.overrides.product_name.as_deref(), Some("Curso"));
        assert_eq!(inv.overrides.amount.map(MajorAmount::to_minor_units), Some(9700));
    }

    #[test]
    fn each_subcommand_maps_to_its_kind() {
        assert_eq!(parse(&["renewed", "--email", "a@b.c"]).kind, EventKind::SubscriptionRenewed);
        assert_eq!(parse(&["canceled", "--email", "a@b.c"]).kind, EventKind::SubscriptionCanceled);
        assert_eq!(parse(&["chargeback", "--email", "a@b.c"]).kind, EventKind::Chargeback);
    }

    #[test]
    fn canceled_does_not_take_an_amount() {
        let res = Cli::try_parse_from(["payhook", "canceled", "--email", "a@b.c", "--amount", "1"]);
        assert!(res.is_err());
    }

    #[test]
    fn unknown_plan_is_a_usage_error() {
        let res = Cli::try_parse_from(["payhook", "approved", "--email", "a@b.c", "--plan", "PRO"]);
        assert!(res.is_err());
    }

    #[test]
    fn malformed_amount_fails_before_any_request() {
        let cli = Cli::try_parse_from(["payhook", "renewed", "--email", "a@b.c", "--amount", "abc"])
            .unwrap();
        let err = Invocation::from_command(cli.command).err().unwrap();
        assert!(format!("{err:#}").contains("not a number"), "{err:#}");
    }

    #[test]
    fn url_flag_wins_over_default() {
        assert_eq!(resolve_url(Some("http://localhost/hook".into())), "http://localhost/hook");
    }

    #[test]
    fn explicit_secret_is_used() {
        assert_eq!(resolve_secret(Some("k".into())).unwrap(), "k");
    }
}
