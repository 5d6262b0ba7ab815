use crate::error::BuildError;
use std::fmt;
use std::str::FromStr;

/// Subscription plans sold on the simulated store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Plan {
    #[default]
    Starter,
    Scaling,
    Scaled,
}

impl Plan {
    pub const ALL: [Plan; 3] = [Plan::Starter, Plan::Scaling, Plan::Scaled];

    pub fn id(self) -> &'static str {
        match self {
            Plan::Starter => "STARTER",
            Plan::Scaling => "SCALING",
            Plan::Scaled => "SCALED",
        }
    }

    /// Display name shown to customers.
    pub fn name(self) -> &'static str {
        match self {
            Plan::Starter => "Iniciante",
            Plan::Scaling => "Escalando",
            Plan::Scaled => "Escalado",
        }
    }

    pub fn product_id(self) -> &'static str {
        match self {
            Plan::Starter => "kiwify-product-starter-id",
            Plan::Scaling => "kiwify-product-scaling-id",
            Plan::Scaled => "kiwify-product-scaled-id",
        }
    }

    /// List price in minor currency units (cents).
    pub fn default_price(self) -> i64 {
        match self {
            Plan::Starter => 4700,
            Plan::Scaling => 6700,
            Plan::Scaled => 9700,
        }
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Plan {
    type Err = BuildError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Plan::ALL
            .into_iter()
            .find(|plan| plan.id().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                BuildError::InvalidArgument(format!(
                    "unknown plan '{s}' (expected STARTER, SCALING or SCALED)"
                ))
            })
    }
}
