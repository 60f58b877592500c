use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::Encoding;
use crate::error::ImportError;

/// The export layouts the card provider has used over the years.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FormatKind {
    /// `Date Processed,Description,Amount,` with a trailing empty column.
    Current,
    /// `Date,Description,Amount`.
    Compact,
    /// Title and statement date rows ahead of a header with a credit marker column.
    Legacy,
}

impl Default for FormatKind {
    fn default() -> Self {
        FormatKind::Current
    }
}

impl FromStr for FormatKind {
    type Err = ImportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "current" => Ok(FormatKind::Current),
            "compact" => Ok(FormatKind::Compact),
            "legacy" => Ok(FormatKind::Legacy),
            other => Err(ImportError::Config(format!("unknown format {:?}", other))),
        }
    }
}

impl fmt::Display for FormatKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            FormatKind::Current => "current",
            FormatKind::Compact => "compact",
            FormatKind::Legacy => "legacy",
        };
        write!(f, "{}", name)
    }
}

/// Rows that come before the column header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Preamble {
    None,
    /// A free-text title row followed by a row whose second field is the
    /// statement date, e.g. `Statement Date,12 April 2018`.
    StatementDate,
}

/// How the sign of an amount is expressed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignConvention {
    /// A leading `+` marks a credit, anything else is a debit.
    LeadingPlus,
    /// A separate column holds this literal for credits; everything else is a debit.
    CreditMarker(&'static str),
}

/// Which column holds what, 0-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Columns {
    pub date: usize,
    pub description: usize,
    pub amount: usize,
    pub marker: Option<usize>,
}

impl Columns {
    /// Minimum number of fields a data row must carry.
    pub fn required(&self) -> usize {
        let last = [self.date, self.description, self.amount]
            .iter()
            .chain(self.marker.iter())
            .copied()
            .max()
            .unwrap_or(0);
        last + 1
    }
}

/// Everything variant specific about an export, selected once at
/// configuration time and shared read-only by every pipeline stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FormatProfile {
    pub kind: FormatKind,
    pub header: &'static [&'static str],
    pub preamble: Preamble,
    pub columns: Columns,
    pub sign: SignConvention,
    /// chrono pattern for a fully qualified row date.
    pub date_format: &'static str,
    /// Separator placed between day, month and year before parsing.
    pub date_separator: char,
    pub encoding: Encoding,
}

const CURRENT: FormatProfile = FormatProfile {
    kind: FormatKind::Current,
    header: &["Date Processed", "Description", "Amount", ""],
    preamble: Preamble::None,
    columns: Columns {
        date: 0,
        description: 1,
        amount: 2,
        marker: None,
    },
    sign: SignConvention::LeadingPlus,
    date_format: "%d-%b-%Y",
    date_separator: '-',
    encoding: Encoding::Utf8Sig,
};

const COMPACT: FormatProfile = FormatProfile {
    kind: FormatKind::Compact,
    header: &["Date", "Description", "Amount"],
    preamble: Preamble::None,
    columns: Columns {
        date: 0,
        description: 1,
        amount: 2,
        marker: None,
    },
    sign: SignConvention::LeadingPlus,
    date_format: "%d %b %Y",
    date_separator: ' ',
    encoding: Encoding::Utf8Sig,
};

const LEGACY: FormatProfile = FormatProfile {
    kind: FormatKind::Legacy,
    header: &["Date", "Description", "Amount", "Credit/Debit"],
    preamble: Preamble::StatementDate,
    columns: Columns {
        date: 0,
        description: 1,
        amount: 2,
        marker: Some(3),
    },
    sign: SignConvention::CreditMarker("CR"),
    date_format: "%d %b %Y",
    date_separator: ' ',
    encoding: Encoding::Latin1,
};

impl FormatProfile {
    pub fn for_kind(kind: FormatKind) -> FormatProfile {
        match kind {
            FormatKind::Current => CURRENT,
            FormatKind::Compact => COMPACT,
            FormatKind::Legacy => LEGACY,
        }
    }
}
