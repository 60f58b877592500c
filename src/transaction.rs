use chrono::NaiveDate;
use crypto::digest::Digest;
use crypto::sha2::Sha256;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::amount::Amount;

/// Number of leading decimal digits of the digest kept as the identifier.
pub const ID_DIGITS: usize = 16;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    Debit,
    Credit,
}

impl TransactionType {
    /// Negative amounts are debits. Zero counts as a credit.
    pub fn from_amount(amount: Decimal) -> TransactionType {
        if amount < Decimal::ZERO {
            TransactionType::Debit
        } else {
            TransactionType::Credit
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TransactionType::Debit => write!(f, "DEBIT"),
            TransactionType::Credit => write!(f, "CREDIT"),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Transaction {
    pub id: String,
    pub date: NaiveDate,
    pub payee: String,
    pub memo: String,
    pub amount: Decimal,
    pub trntype: TransactionType,
}

impl Transaction {
    pub fn new(date: NaiveDate, payee: String, memo: String, amount: Amount) -> Transaction {
        let id = identifier(date, &payee, &memo, &amount.text);
        Transaction {
            id,
            date,
            payee,
            memo,
            amount: amount.value,
            trntype: TransactionType::from_amount(amount.value),
        }
    }
}

/// Date as it is fed to the digest, a midnight timestamp.
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d 00:00:00").to_string()
}

/// Stable identifier for deduplicating re-imported statements: the SHA-256
/// of date, payee, memo and amount read as an unsigned integer, cut to the
/// first 16 decimal digits. `amount` is the signed text of the amount.
pub fn identifier(date: NaiveDate, payee: &str, memo: &str, amount: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.input(date_key(date).as_bytes());
    hasher.input(payee.as_bytes());
    hasher.input(memo.as_bytes());
    hasher.input(amount.as_bytes());

    let mut digest = [0u8; 32];
    hasher.result(&mut digest);
    let mut id = to_decimal_string(&digest);
    id.truncate(ID_DIGITS);
    id
}

/// Decimal representation of a big-endian unsigned integer.
fn to_decimal_string(bytes: &[u8]) -> String {
    let mut number: Vec<u8> = bytes.iter().copied().skip_while(|b| *b == 0).collect();
    if number.is_empty() {
        return "0".to_string();
    }

    let mut digits = Vec::new();
    while !number.is_empty() {
        let mut remainder = 0u32;
        let mut quotient = Vec::with_capacity(number.len());
        for byte in &number {
            let acc = (remainder << 8) | u32::from(*byte);
            let q = (acc / 10) as u8;
            remainder = acc % 10;
            if !(quotient.is_empty() && q == 0) {
                quotient.push(q);
            }
        }
        digits.push(b'0' + remainder as u8);
        number = quotient;
    }
    digits.iter().rev().map(|d| *d as char).collect()
}
