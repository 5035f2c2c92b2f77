//! Purpose: Provide the runtime JSON entrypoints and parse-failure categories.
//! Exports: `from_str`, `from_slice`, `to_vec`, `ParseFailureCategory`, categorizers.
//! Role: Parser boundary that centralizes serde_json usage details.
//! Invariants: Category labels are stable; diagnostics key off them.
//! Invariants: Hints never embed the offending payload, only category and context.
//! Notes: Error mapping is done by callsites so domain context stays explicit.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::error::Category;

pub fn from_str<T: DeserializeOwned>(input: &str) -> Result<T, serde_json::Error> {
    serde_json::from_str(input)
}

pub fn from_slice<T: DeserializeOwned>(input: &[u8]) -> Result<T, serde_json::Error> {
    serde_json::from_slice(input)
}

pub fn to_vec<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(value)
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ParseFailureCategory {
    Syntax,
    Eof,
    Data,
    Io,
    Utf8,
    NumericRange,
    DepthLimit,
    Unknown,
}

impl ParseFailureCategory {
    pub fn label(self) -> &'static str {
        match self {
            Self::Syntax => "syntax",
            Self::Eof => "eof",
            Self::Data => "data",
            Self::Io => "io",
            Self::Utf8 => "utf8",
            Self::NumericRange => "numeric-range",
            Self::DepthLimit => "depth-limit",
            Self::Unknown => "unknown",
        }
    }
}

/// Message text wins over serde_json's coarse category so that range, depth and
/// encoding failures keep their own labels.
pub fn categorize_error(err: &serde_json::Error) -> ParseFailureCategory {
    match categorize_message(&err.to_string()) {
        ParseFailureCategory::Unknown => match err.classify() {
            Category::Io => ParseFailureCategory::Io,
            Category::Syntax => ParseFailureCategory::Syntax,
            Category::Data => ParseFailureCategory::Data,
            Category::Eof => ParseFailureCategory::Eof,
        },
        category => category,
    }
}

pub fn categorize_message(message: &str) -> ParseFailureCategory {
    let lower = message.to_ascii_lowercase();
    if lower.contains("recursion limit") {
        ParseFailureCategory::DepthLimit
    } else if lower.contains("out of range") || lower.contains("overflow") {
        ParseFailureCategory::NumericRange
    } else if lower.contains("utf-8") || lower.contains("utf8") || lower.contains("unicode") {
        ParseFailureCategory::Utf8
    } else if lower.contains("eof") {
        ParseFailureCategory::Eof
    } else {
        ParseFailureCategory::Unknown
    }
}

pub fn hint_for_error(err: &serde_json::Error, context: &str) -> String {
    format!(
        "parse category: {}; context: {context}",
        categorize_error(err).label()
    )
}

#[cfg(test)]
mod tests {
    use super::{ParseFailureCategory, categorize_error, from_str};
    use serde_json::Value;

    #[test]
    fn classify_fallback_covers_syntax_and_data() {
        let syntax = from_str::<Value>(r#"{"a":}"#).unwrap_err();
        assert_eq!(categorize_error(&syntax), ParseFailureCategory::Syntax);

        let data = from_str::<u8>(r#""seven""#).unwrap_err();
        assert_eq!(categorize_error(&data), ParseFailureCategory::Data);

        let eof = from_str::<Value>("[1,").unwrap_err();
        assert_eq!(categorize_error(&eof), ParseFailureCategory::Eof);
    }

    #[test]
    fn labels_are_stable() {
        assert_eq!(ParseFailureCategory::NumericRange.label(), "numeric-range");
        assert_eq!(ParseFailureCategory::DepthLimit.label(), "depth-limit");
    }
}
