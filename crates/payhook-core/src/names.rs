/// Customer names derived from an email address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerName {
    pub full_name: String,
    pub first_name: String,
}

impl CustomerName {
    /// `full_name` is the title-cased local part, `first_name` the title-cased
    /// segment before its first dot.
    pub fn from_email(email: &str) -> Self {
        let local_part = email.split('@').next().unwrap_or_default();
        let first_segment = local_part.split('.').next().unwrap_or_default();
        Self {
            full_name: title_case(local_part),
            first_name: title_case(first_segment),
        }
    }
}

/// Upper-cases every cased letter that follows an uncased character and
/// lower-cases the rest, so `ana.silva` becomes `Ana.Silva`.
pub fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut previous_cased = false;
    for c in input.chars() {
        let cased = c.is_lowercase() || c.is_uppercase();
        if cased && previous_cased {
            out.extend(c.to_lowercase());
        } else if cased {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        previous_cased = cased;
    }
    out
}
