use rust_decimal::Decimal;
use std::str::FromStr;

use crate::error::RowError;
use crate::profile::SignConvention;

/// A signed amount together with the text it is identified by. The text
/// keeps the sign of a zero debit (`-0.00`), which the decimal drops.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Amount {
    pub value: Decimal,
    pub text: String,
}

impl Amount {
    fn parse(signed: &str) -> Option<Amount> {
        let value = Decimal::from_str(signed).ok()?;
        let mut text = value.to_string();
        if value.is_zero() && signed.starts_with('-') && !text.starts_with('-') {
            text.insert(0, '-');
        }
        Some(Amount { value, text })
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Amount {
            value,
            text: value.to_string(),
        }
    }
}

/// Removes the currency symbol, thousands separators and embedded spaces.
pub fn strip_formatting(field: &str) -> String {
    field
        .chars()
        .filter(|c| !matches!(c, '£' | ',' | ' '))
        .collect()
}

/// Turns a raw amount column into a signed decimal. `marker` is the value of
/// the credit marker column for profiles that have one.
pub fn normalize(
    field: &str,
    marker: Option<&str>,
    sign: SignConvention,
) -> Result<Amount, RowError> {
    let cleaned = strip_formatting(field);
    if cleaned.trim_start_matches(|c| c == '-' || c == '+').is_empty() {
        return Err(RowError::InvalidAmount(field.to_string()));
    }
    let signed = match sign {
        SignConvention::LeadingPlus => match cleaned.strip_prefix('+') {
            Some(credit) => credit.to_string(),
            None => format!("-{}", cleaned),
        },
        SignConvention::CreditMarker(credit_marker) => {
            let unsigned = cleaned.trim_start_matches(|c| c == '-' || c == '+');
            if marker.map(str::trim) == Some(credit_marker) {
                unsigned.to_string()
            } else {
                format!("-{}", unsigned)
            }
        }
    };
    Amount::parse(&signed).ok_or_else(|| RowError::InvalidAmount(field.to_string()))
}
