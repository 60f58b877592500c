use crate::transaction::{Transaction, TransactionType};
use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Default, Debug)]
pub struct Statement {
    pub currency: String,
    pub bank_id: String,
    pub account_id: String,
    pub start_balance: Decimal,
    pub end_balance: Decimal,
    pub start_date: Option<NaiveDate>,
    /// Day after the last transaction.
    pub end_date: Option<NaiveDate>,
    pub transactions: Vec<Transaction>,
}

impl Statement {
    pub fn new(currency: &str, bank_id: &str, account_id: &str) -> Statement {
        Statement {
            currency: currency.to_string(),
            bank_id: bank_id.to_string(),
            account_id: account_id.to_string(),
            ..Statement::default()
        }
    }

    pub fn total_credits(&self) -> Decimal {
        self.sum_of(TransactionType::Credit)
    }

    pub fn total_debits(&self) -> Decimal {
        self.sum_of(TransactionType::Debit)
    }

    fn sum_of(&self, trntype: TransactionType) -> Decimal {
        self.transactions
            .iter()
            .filter(|t| t.trntype == trntype)
            .fold(Decimal::new(0, 2), |sum, t| sum + t.amount)
    }

    pub fn get_credits(&self) -> Vec<&Transaction> {
        self.transactions
            .iter()
            .filter(|t| t.trntype == TransactionType::Credit)
            .collect()
    }

    pub fn get_debits(&self) -> Vec<&Transaction> {
        self.transactions
            .iter()
            .filter(|t| t.trntype == TransactionType::Debit)
            .collect()
    }

    // Derives the closing balance and date range from the transactions
    pub fn recalculate_balance(&mut self) {
        let total = self
            .transactions
            .iter()
            .fold(Decimal::new(0, 2), |sum, t| sum + t.amount);
        self.end_balance = self.start_balance + total;
        self.start_date = self.transactions.iter().map(|t| t.date).min();
        self.end_date = self
            .transactions
            .iter()
            .map(|t| t.date)
            .max()
            .map(|d| d + Duration::days(1));
    }

    // Validates that the closing balance matches the transactions
    pub fn validate(&self) -> bool {
        self.start_balance + self.total_credits() + self.total_debits() == self.end_balance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn transaction(day: u32, amount: &str) -> Transaction {
        Transaction::new(
            NaiveDate::from_ymd_opt(2023, 4, day).unwrap(),
            "Payee".to_string(),
            String::new(),
            Decimal::from_str(amount).unwrap().into(),
        )
    }

    #[test]
    fn empty_statement_has_zero_balance_and_no_dates() {
        let mut statement = Statement::new("GBP", "John Lewis Finance", "");
        statement.recalculate_balance();
        assert_eq!(statement.end_balance, Decimal::ZERO);
        assert_eq!(statement.start_date, None);
        assert_eq!(statement.end_date, None);
        assert!(statement.validate());
    }

    #[test]
    fn recalculates_balance_and_range() {
        let mut statement = Statement::new("GBP", "John Lewis Finance", "1234");
        statement.transactions = vec![
            transaction(12, "-10.50"),
            transaction(3, "100.00"),
            transaction(20, "-4.25"),
        ];
        statement.recalculate_balance();
        assert_eq!(statement.end_balance, Decimal::from_str("85.25").unwrap());
        assert_eq!(statement.start_date, NaiveDate::from_ymd_opt(2023, 4, 3));
        assert_eq!(statement.end_date, NaiveDate::from_ymd_opt(2023, 4, 21));
        assert_eq!(statement.total_credits(), Decimal::from_str("100.00").unwrap());
        assert_eq!(statement.total_debits(), Decimal::from_str("-14.75").unwrap());
        assert_eq!(statement.get_debits().len(), 2);
        assert_eq!(statement.get_credits().len(), 1);
        assert!(statement.validate());
    }

    #[test]
    fn keeps_opening_balance() {
        let mut statement = Statement::new("GBP", "John Lewis Finance", "");
        statement.start_balance = Decimal::from_str("-20.00").unwrap();
        statement.transactions = vec![transaction(1, "5.00")];
        statement.recalculate_balance();
        assert_eq!(statement.end_balance, Decimal::from_str("-15.00").unwrap());
    }
}
