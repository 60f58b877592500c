use chrono::NaiveDate;
use csv::StringRecord;
use log::info;

use crate::date;
use crate::error::{ImportError, Result};
use crate::profile::{FormatProfile, Preamble};

/// What the header rows tell us about the rest of the file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeaderContext {
    pub statement_date: Option<NaiveDate>,
}

fn next_row<I>(rows: &mut I, what: &str) -> Result<StringRecord>
where
    I: Iterator<Item = csv::Result<StringRecord>>,
{
    match rows.next() {
        Some(row) => Ok(row?),
        None => Err(ImportError::Format(format!("missing {}", what))),
    }
}

fn describe(row: &StringRecord) -> String {
    format!("{:?}", row.iter().collect::<Vec<_>>())
}

/// Consumes the preamble and column header, leaving `rows` at the first
/// data row. Fails unless the header matches the profile's literally.
pub fn validate<I>(profile: &FormatProfile, rows: &mut I) -> Result<HeaderContext>
where
    I: Iterator<Item = csv::Result<StringRecord>>,
{
    let mut context = HeaderContext::default();

    if profile.preamble == Preamble::StatementDate {
        next_row(rows, "title row")?;
        let row = next_row(rows, "statement date row")?;
        let field = row.get(1).ok_or_else(|| {
            ImportError::Format(format!("no statement date in {}", describe(&row)))
        })?;
        let statement_date = date::parse_full(field, profile)
            .map_err(|e| ImportError::Format(format!("statement date: {}", e)))?;
        info!("Statement dated {}", statement_date);
        context.statement_date = Some(statement_date);
    }

    let header = next_row(rows, "header row")?;
    if !header.iter().eq(profile.header.iter().copied()) {
        return Err(ImportError::Format(format!(
            "expected {:?}, found {}",
            profile.header,
            describe(&header)
        )));
    }
    info!("Found {} header", profile.kind);

    Ok(context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::FormatKind;
    use crate::source;

    fn check(kind: FormatKind, text: &str) -> Result<(HeaderContext, usize)> {
        let profile = FormatProfile::for_kind(kind);
        let mut rows = source::records(text);
        let context = validate(&profile, &mut rows)?;
        Ok((context, rows.count()))
    }

    #[test]
    fn accepts_current_header_with_trailing_comma() {
        let (context, remaining) = check(
            FormatKind::Current,
            "Date Processed,Description,Amount,\n12-Apr-2023,TESCO,£1.00,\n",
        )
        .unwrap();
        assert_eq!(context.statement_date, None);
        assert_eq!(remaining, 1);
    }

    #[test]
    fn current_header_requires_trailing_column() {
        match check(FormatKind::Current, "Date Processed,Description,Amount\n") {
            Err(ImportError::Format(_)) => {}
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn accepts_compact_header() {
        let (_, remaining) = check(FormatKind::Compact, "Date,Description,Amount\n").unwrap();
        assert_eq!(remaining, 0);
    }

    #[test]
    fn rejects_wrong_header() {
        assert!(matches!(
            check(FormatKind::Compact, "Posted,Details,Value\n1 Apr 2023,X,1.00\n"),
            Err(ImportError::Format(_))
        ));
    }

    #[test]
    fn empty_file_has_no_header() {
        assert!(matches!(check(FormatKind::Compact, ""), Err(ImportError::Format(_))));
    }

    #[test]
    fn legacy_preamble_yields_statement_date() {
        let text = "John Lewis Partnership Card\n\
                    Statement Date,12 April 2018\n\
                    \n\
                    Date,Description,Amount,Credit/Debit\n";
        let (context, remaining) = check(FormatKind::Legacy, text).unwrap();
        assert_eq!(context.statement_date, NaiveDate::from_ymd_opt(2018, 4, 12));
        assert_eq!(remaining, 0);
    }

    #[test]
    fn legacy_preamble_without_date_is_rejected() {
        let text = "John Lewis Partnership Card\n\
                    Statement Date\n\
                    \n\
                    Date,Description,Amount,Credit/Debit\n";
        assert!(matches!(check(FormatKind::Legacy, text), Err(ImportError::Format(_))));
    }
}
