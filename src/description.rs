use lazy_static::lazy_static;
use log::debug;
use regex::{Captures, Regex};

use crate::merchant;

/// Width of the description field in the card provider's export.
pub const PACKED_WIDTH: usize = 40;
const PAYEE_WIDTH: usize = 22;
const MEMO_START: usize = 23;

/// Description the provider uses for the monthly direct debit repayment.
pub const DIRECT_DEBIT: &str = "DIRECT DEBIT TRANSACTION";

lazy_static! {
    static ref URL_DOMAIN: Regex = Regex::new(r"(?:https?://)?(?:www\.)?(?:\w+\.)+\w{2,}").unwrap();
}

/// Payee and memo derived from one row's description.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Description {
    pub payee: String,
    pub memo: String,
}

/// Uppercases the first letter of every run of letters and lowercases the
/// rest, so `AMZN MKTP UK*AB12` becomes `Amzn Mktp Uk*Ab12`.
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut in_word = false;
    for c in value.chars() {
        if in_word {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        in_word = c.is_alphabetic();
    }
    out
}

/// Lowercases anything that looks like a URL or domain name.
pub fn lowercase_domains(value: &str) -> String {
    URL_DOMAIN
        .replace_all(value, |caps: &Captures| caps[0].to_lowercase())
        .into_owned()
}

pub fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

fn char_slice(value: &str, start: usize, end: usize) -> String {
    value.chars().skip(start).take(end.saturating_sub(start)).collect()
}

/// Splits a raw description into payee and memo. `bank_id` becomes the payee
/// of direct debit repayments.
pub fn classify(raw: &str, bank_id: &str) -> Description {
    let mut payee = raw.to_string();
    let mut memo = raw.to_string();

    let description = lowercase_domains(&title_case(raw));
    let width = description.chars().count();

    // A full-width field holds the payee and the location packed together.
    if width == PACKED_WIDTH {
        payee = collapse_whitespace(char_slice(&description, 0, PAYEE_WIDTH).trim());
        memo = collapse_whitespace(char_slice(&description, MEMO_START, width).trim());
    }

    if raw == DIRECT_DEBIT {
        payee = bank_id.to_string();
        memo = capitalize(&description.trim().to_lowercase());
    }

    if let Some(merchant) = merchant::find(&payee) {
        debug!("Canonicalizing payee {:?} as {}", payee, merchant.name);
        memo = format!("{} {}", payee, memo);
        payee = merchant.name.to_string();
    }

    if payee == memo {
        memo.clear();
    }

    Description { payee, memo }
}
