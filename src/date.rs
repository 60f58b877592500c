use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;

use crate::error::RowError;
use crate::profile::FormatProfile;

/// Literal the card provider puts in the date column of uncleared rows.
pub const PENDING: &str = "Pending";

lazy_static! {
    static ref FULL_DATE: Regex = Regex::new(r"(?i)^(\d{1,2})[- ]([a-z]+)[- ](\d{4})$").unwrap();
    static ref DAY_MONTH: Regex = Regex::new(r"(?i)^(\d{1,2})[- ]([a-z]+)$").unwrap();
}

/// Shared by every row of one import.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateContext {
    /// Year given to rows that only carry day and month.
    pub statement_year: i32,
    /// Date given to pending rows.
    pub today: NaiveDate,
}

/// Resolves a row's date field. `Ok(None)` means the row is a placeholder
/// (such as the "pending transactions" banner) and should be dropped.
pub fn resolve(
    field: &str,
    profile: &FormatProfile,
    context: &DateContext,
) -> Result<Option<NaiveDate>, RowError> {
    if field == PENDING {
        return Ok(Some(context.today));
    }
    if field.is_empty() {
        return Ok(None);
    }
    if FULL_DATE.is_match(field) {
        return parse_full(field, profile).map(Some);
    }
    match DAY_MONTH.captures(field) {
        Some(caps) => {
            let sep = profile.date_separator;
            let qualified = format!(
                "{}{}{}{}{}",
                &caps[1], sep, &caps[2], sep, context.statement_year
            );
            parse_full(&qualified, profile).map(Some)
        }
        None => Err(RowError::InvalidDate(field.to_string())),
    }
}

/// Parses a day, month name and four digit year, accepting `-` or a space
/// between parts regardless of the profile's own separator.
pub fn parse_full(field: &str, profile: &FormatProfile) -> Result<NaiveDate, RowError> {
    let invalid = || RowError::InvalidDate(field.to_string());
    let caps = FULL_DATE.captures(field.trim()).ok_or_else(invalid)?;
    let sep = profile.date_separator;
    let normalized = format!("{}{}{}{}{}", &caps[1], sep, &caps[2], sep, &caps[3]);
    NaiveDate::parse_from_str(&normalized, profile.date_format).map_err(|_| invalid())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::FormatKind;

    fn context() -> DateContext {
        DateContext {
            statement_year: 2023,
            today: NaiveDate::from_ymd_opt(2023, 6, 30).unwrap(),
        }
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn pending_becomes_today() {
        let profile = FormatProfile::for_kind(FormatKind::Current);
        assert_eq!(resolve("Pending", &profile, &context()), Ok(Some(ymd(2023, 6, 30))));
    }

    #[test]
    fn empty_date_skips_row() {
        let profile = FormatProfile::for_kind(FormatKind::Current);
        assert_eq!(resolve("", &profile, &context()), Ok(None));
    }

    #[test]
    fn fully_qualified_dates_keep_their_year() {
        let profile = FormatProfile::for_kind(FormatKind::Current);
        assert_eq!(resolve("02-Jan-2021", &profile, &context()), Ok(Some(ymd(2021, 1, 2))));
        assert_eq!(resolve("2 jan 2021", &profile, &context()), Ok(Some(ymd(2021, 1, 2))));
    }

    #[test]
    fn day_month_takes_statement_year() {
        let current = FormatProfile::for_kind(FormatKind::Current);
        let compact = FormatProfile::for_kind(FormatKind::Compact);
        assert_eq!(resolve("14-Mar", &current, &context()), Ok(Some(ymd(2023, 3, 14))));
        assert_eq!(resolve("14 Mar", &compact, &context()), Ok(Some(ymd(2023, 3, 14))));
    }

    #[test]
    fn full_month_names_parse() {
        let profile = FormatProfile::for_kind(FormatKind::Legacy);
        assert_eq!(parse_full("12 April 2018", &profile), Ok(ymd(2018, 4, 12)));
    }

    #[test]
    fn garbage_is_an_error() {
        let profile = FormatProfile::for_kind(FormatKind::Current);
        assert_eq!(
            resolve("yesterday", &profile, &context()),
            Err(RowError::InvalidDate("yesterday".to_string()))
        );
        assert!(resolve("31-Feb-2023", &profile, &context()).is_err());
    }
}
