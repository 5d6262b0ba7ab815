#![warn(clippy::unwrap_used, clippy::expect_used)]

//! Payload construction for simulated payment platform webhooks.
//!
//! [`build`] turns an [`EventKind`], a customer email and a set of
//! [`Overrides`] into a complete [`Payload`]. Every field of the kind's
//! schema is always present; unknown data renders as `null`.

pub mod builder;
pub mod error;
pub mod event;
pub mod money;
pub mod names;
pub mod overrides;
pub mod payload;
pub mod plan;
pub mod template;
pub mod timestamps;

pub use builder::{build, build_at};
pub use error::{BuildError, Result};
pub use event::EventKind;
pub use money::{FeeSplit, MajorAmount};
pub use overrides::Overrides;
pub use payload::Payload;
pub use plan::Plan;
