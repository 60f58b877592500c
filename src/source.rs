use csv::StringRecord;
use std::io::Read;

use crate::config::Encoding;
use crate::error::{ImportError, Result};

const BOM: char = '\u{feff}';

/// Reads the whole input and decodes it. The reader is consumed, so a file
/// handle passed in is closed by the time this returns, whatever the outcome.
pub fn read_text<R: Read>(mut input: R, encoding: Encoding) -> Result<String> {
    let mut bytes = Vec::new();
    input.read_to_end(&mut bytes)?;
    decode(bytes, encoding)
}

pub fn decode(bytes: Vec<u8>, encoding: Encoding) -> Result<String> {
    match encoding {
        Encoding::Latin1 => Ok(bytes.iter().map(|&b| b as char).collect()),
        Encoding::Utf8 | Encoding::Utf8Sig => {
            let text = String::from_utf8(bytes)
                .map_err(|e| ImportError::Encoding(format!("{}: {}", encoding, e)))?;
            if encoding == Encoding::Utf8Sig {
                if let Some(rest) = text.strip_prefix(BOM) {
                    return Ok(rest.to_string());
                }
            }
            Ok(text)
        }
    }
}

/// Splits decoded text into rows. Header handling is left to the caller so
/// the literal header can be checked field by field. Blank lines are dropped.
pub fn records(text: &str) -> csv::StringRecordsIntoIter<&[u8]> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes())
        .into_records()
}

/// Line in the input a record started on, 1-based.
pub fn line_of(record: &StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_bom_for_utf8_sig() {
        let bytes = "\u{feff}Date,Description".as_bytes().to_vec();
        assert_eq!(decode(bytes, Encoding::Utf8Sig).unwrap(), "Date,Description");
    }

    #[test]
    fn keeps_bom_for_plain_utf8() {
        let bytes = "\u{feff}Date".as_bytes().to_vec();
        assert!(decode(bytes, Encoding::Utf8).unwrap().starts_with(BOM));
    }

    #[test]
    fn latin1_pound_sign() {
        let bytes = vec![0xa3, b'1', b'2'];
        assert_eq!(decode(bytes, Encoding::Latin1).unwrap(), "£12");
    }

    #[test]
    fn invalid_utf8_is_an_encoding_error() {
        match decode(vec![0xa3, b'1'], Encoding::Utf8Sig) {
            Err(ImportError::Encoding(_)) => {}
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn tokenizes_quoted_fields_and_skips_blank_lines() {
        let rows: Vec<StringRecord> = records("a,\"b, c\",d\n\ne,f\n")
            .collect::<std::result::Result<_, _>>()
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][1], "b, c");
        assert_eq!(line_of(&rows[1]), 3);
    }
}
