use crate::money::MajorAmount;
use crate::plan::Plan;

/// Optional values that replace generated or default payload fields.
///
/// Each field is defaulted on its own; empty strings count as not supplied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    /// Plan behind an order_approved event (default: STARTER).
    pub plan: Option<Plan>,
    pub order_id: Option<String>,
    pub customer_id: Option<String>,
    pub subscription_id: Option<String>,
    pub product_id: Option<String>,
    pub product_name: Option<String>,
    /// Charge in major currency units.
    pub amount: Option<MajorAmount>,
}

/// Returns the trimmed value when it is present and not blank.
pub(crate) fn supplied(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
