use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::error::{ImportError, Result};
use crate::profile::{FormatKind, FormatProfile};

pub const DEFAULT_CURRENCY: &str = "GBP";
pub const DEFAULT_BANK: &str = "John Lewis Finance";

/// Character encodings the exports have been seen in.
/// Settings files and the command line both go through `FromStr`.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(try_from = "String")]
pub enum Encoding {
    /// UTF-8, with the byte order mark stripped when present.
    #[serde(rename = "utf-8-sig")]
    Utf8Sig,
    #[serde(rename = "utf-8")]
    Utf8,
    #[serde(rename = "latin-1")]
    Latin1,
}

impl TryFrom<String> for Encoding {
    type Error = ImportError;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

impl FromStr for Encoding {
    type Err = ImportError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "utf-8-sig" | "utf8-sig" => Ok(Encoding::Utf8Sig),
            "utf-8" | "utf8" => Ok(Encoding::Utf8),
            "latin-1" | "latin1" | "iso-8859-1" => Ok(Encoding::Latin1),
            other => Err(ImportError::Config(format!("unsupported charset {:?}", other))),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Encoding::Utf8Sig => "utf-8-sig",
            Encoding::Utf8 => "utf-8",
            Encoding::Latin1 => "latin-1",
        };
        write!(f, "{}", name)
    }
}

/// Import settings. Every field is optional in the TOML file.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Falls back to the format's own encoding when unset.
    pub charset: Option<Encoding>,
    pub currency: String,
    pub bank: String,
    pub account: String,
    pub format: FormatKind,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            charset: None,
            currency: DEFAULT_CURRENCY.to_string(),
            bank: DEFAULT_BANK.to_string(),
            account: String::new(),
            format: FormatKind::default(),
        }
    }
}

impl Settings {
    pub fn load(path: impl AsRef<Path>) -> Result<Settings> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(ImportError::Config(format!(
                "settings file {} not found",
                path.display()
            )));
        }
        let text = fs::read_to_string(path)?;
        Settings::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Settings> {
        Ok(toml::from_str::<Settings>(text)?)
    }

    pub fn profile(&self) -> FormatProfile {
        FormatProfile::for_kind(self.format)
    }

    pub fn encoding(&self) -> Encoding {
        self.charset.unwrap_or_else(|| self.profile().encoding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_card_provider() {
        let settings = Settings::default();
        assert_eq!(settings.currency, "GBP");
        assert_eq!(settings.bank, "John Lewis Finance");
        assert_eq!(settings.account, "");
        assert_eq!(settings.format, FormatKind::Current);
        assert_eq!(settings.encoding(), Encoding::Utf8Sig);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let settings = Settings::from_toml("account = \"1234\"\nformat = \"legacy\"\n").unwrap();
        assert_eq!(settings.account, "1234");
        assert_eq!(settings.currency, "GBP");
        assert_eq!(settings.encoding(), Encoding::Latin1);
    }

    #[test]
    fn explicit_charset_wins_over_format() {
        let settings =
            Settings::from_toml("charset = \"utf-8\"\nformat = \"legacy\"\n").unwrap();
        assert_eq!(settings.encoding(), Encoding::Utf8);
    }

    #[test]
    fn toml_accepts_the_same_charset_names_as_the_command_line() {
        for name in &["utf8", "latin1", "ISO-8859-1", "Latin_1", "utf8-sig"] {
            let settings = Settings::from_toml(&format!("charset = \"{}\"", name)).unwrap();
            assert_eq!(settings.charset, Some(name.parse::<Encoding>().unwrap()));
        }
    }

    #[test]
    fn rejects_unknown_charset_in_toml() {
        assert!(Settings::from_toml("charset = \"ebcdic\"").is_err());
    }

    #[test]
    fn rejects_unknown_format() {
        assert!(Settings::from_toml("format = \"ofx\"").is_err());
    }

    #[test]
    fn charset_names() {
        assert_eq!("UTF-8-SIG".parse::<Encoding>().unwrap(), Encoding::Utf8Sig);
        assert_eq!("iso-8859-1".parse::<Encoding>().unwrap(), Encoding::Latin1);
        assert!("ebcdic".parse::<Encoding>().is_err());
    }
}
