use chrono::{Datelike, Local, NaiveDate};
use csv::StringRecord;
use log::{debug, info};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::amount::{self, Amount};
use crate::config::Settings;
use crate::date::{self, DateContext};
use crate::description;
use crate::error::{ImportError, Result, RowError};
use crate::header;
use crate::profile::FormatProfile;
use crate::source;
use crate::statement::Statement;
use crate::transaction::Transaction;

/// A row whose date and amount have been resolved, description untouched.
#[derive(Clone, Debug, PartialEq)]
pub struct NormalizedRow {
    pub date: NaiveDate,
    pub description: String,
    pub amount: Amount,
}

pub struct Parser {
    settings: Settings,
    profile: FormatProfile,
    today: NaiveDate,
}

impl Parser {
    pub fn new(settings: Settings) -> Parser {
        let profile = settings.profile();
        Parser {
            settings,
            profile,
            today: Local::now().date_naive(),
        }
    }

    /// Overrides the date used for pending rows and the default statement year.
    pub fn with_today(mut self, today: NaiveDate) -> Parser {
        self.today = today;
        self
    }

    pub fn parse_path(&self, path: impl AsRef<Path>) -> Result<Statement> {
        let path = path.as_ref();
        info!("Reading {} as {} export", path.display(), self.profile.kind);
        let file = File::open(path)?;
        self.parse(file)
    }

    pub fn parse<R: Read>(&self, input: R) -> Result<Statement> {
        let text = source::read_text(input, self.settings.encoding())?;
        self.parse_str(&text)
    }

    /// Builds the whole statement, or fails without returning any records.
    pub fn parse_str(&self, text: &str) -> Result<Statement> {
        let mut rows = source::records(text);
        let header = header::validate(&self.profile, &mut rows)?;

        let context = DateContext {
            statement_year: header
                .statement_date
                .map(|d| d.year())
                .unwrap_or_else(|| self.today.year()),
            today: self.today,
        };

        let mut statement = Statement::new(
            &self.settings.currency,
            &self.settings.bank,
            &self.settings.account,
        );
        for row in rows {
            let row = row?;
            let line = source::line_of(&row);
            match self
                .parse_record(&row, &context)
                .map_err(|source| ImportError::Row { line, source })?
            {
                Some(transaction) => statement.transactions.push(transaction),
                None => debug!("Skipping line {} without a date", line),
            }
        }

        statement.recalculate_balance();
        info!(
            "Imported {} transactions, balance {}",
            statement.transactions.len(),
            statement.end_balance
        );
        Ok(statement)
    }

    /// Runs one data row through the pipeline. `Ok(None)` drops the row.
    pub fn parse_record(
        &self,
        row: &StringRecord,
        context: &DateContext,
    ) -> std::result::Result<Option<Transaction>, RowError> {
        Ok(self
            .normalize(row, context)?
            .map(|normalized| self.build(normalized)))
    }

    pub fn normalize(
        &self,
        row: &StringRecord,
        context: &DateContext,
    ) -> std::result::Result<Option<NormalizedRow>, RowError> {
        let columns = self.profile.columns;
        let date_field = row.get(columns.date).unwrap_or("");
        let date = match date::resolve(date_field, &self.profile, context)? {
            Some(date) => date,
            None => return Ok(None),
        };

        if row.len() < columns.required() {
            return Err(RowError::MissingColumn {
                expected: columns.required(),
                found: row.len(),
            });
        }

        let marker = columns.marker.and_then(|i| row.get(i));
        let amount = amount::normalize(&row[columns.amount], marker, self.profile.sign)?;

        Ok(Some(NormalizedRow {
            date,
            description: row[columns.description].to_string(),
            amount,
        }))
    }

    pub fn build(&self, row: NormalizedRow) -> Transaction {
        let description = description::classify(&row.description, &self.settings.bank);
        Transaction::new(row.date, description.payee, description.memo, row.amount)
    }
}
