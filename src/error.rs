//! Purpose: Crate error type for callsites that need domain context around failures.
//! Exports: `Error`, `ErrorKind`, `to_exit_code`.
//! Role: Used by the bench harness and demo binary; `Optional` itself never wraps errors.
//! Invariants: Exit code mapping is stable once published.
//! Invariants: Rendered reports name the kind by its lowercase label.

use std::error::Error as StdError;
use std::fmt;

use serde::Serialize;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    Internal,
    Usage,
    Parse,
    Io,
}

impl ErrorKind {
    pub fn label(self) -> &'static str {
        match self {
            ErrorKind::Internal => "internal",
            ErrorKind::Usage => "usage",
            ErrorKind::Parse => "parse",
            ErrorKind::Io => "io",
        }
    }
}

#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    message: Option<String>,
    hint: Option<String>,
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            hint: None,
            source: None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Messages of the source chain, outermost first.
    pub fn causes(&self) -> Vec<String> {
        std::iter::successors(self.source(), |&err: &&(dyn StdError + 'static)| err.source())
            .map(|err| err.to_string())
            .collect()
    }

    /// Renders for stderr: indented lines on a terminal, a single JSON object otherwise.
    pub fn render(&self, terminal: bool) -> String {
        let report = ErrorReport {
            error: ReportBody {
                kind: self.kind.label(),
                message: self
                    .message
                    .clone()
                    .unwrap_or_else(|| format!("{} error", self.kind.label())),
                hint: self.hint.as_deref(),
                causes: self.causes(),
            },
        };
        if !terminal {
            return serde_json::to_string(&report).unwrap_or_else(|_| {
                r#"{"error":{"kind":"internal","message":"error report encode failed"}}"#
                    .to_string()
            });
        }

        let body = report.error;
        let mut lines = vec![format!("error[{}]: {}", body.kind, body.message)];
        lines.extend(body.hint.map(|hint| format!("  hint: {hint}")));
        lines.extend(body.causes.iter().map(|cause| format!("  cause: {cause}")));
        lines.join("\n")
    }
}

#[derive(Serialize)]
struct ErrorReport<'a> {
    error: ReportBody<'a>,
}

#[derive(Serialize)]
struct ReportBody<'a> {
    kind: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    hint: Option<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    causes: Vec<String>,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.kind)?;
        if let Some(message) = &self.message {
            write!(f, ": {message}")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " (hint: {hint})")?;
        }
        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|source| source.as_ref() as &(dyn StdError + 'static))
    }
}

pub fn to_exit_code(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::Internal => 1,
        ErrorKind::Usage => 2,
        ErrorKind::Parse => 3,
        ErrorKind::Io => 4,
    }
}

#[cfg(test)]
mod tests {
    use super::{Error, ErrorKind, to_exit_code};
    use std::error::Error as StdError;

    #[test]
    fn exit_code_mapping_is_stable() {
        let cases = [
            (ErrorKind::Internal, 1),
            (ErrorKind::Usage, 2),
            (ErrorKind::Parse, 3),
            (ErrorKind::Io, 4),
        ];

        for (kind, code) in cases {
            assert_eq!(to_exit_code(kind), code);
        }
    }

    #[test]
    fn display_includes_message_and_hint() {
        let err = Error::new(ErrorKind::Usage)
            .with_message("invalid --format")
            .with_hint("Use json, table, or both.");
        assert_eq!(
            err.to_string(),
            "Usage: invalid --format (hint: Use json, table, or both.)"
        );
        assert!(err.source().is_none());
    }

    #[test]
    fn source_is_passed_through() {
        let parse_err = serde_json::from_str::<u8>("x").unwrap_err();
        let expected = parse_err.to_string();
        let err = Error::new(ErrorKind::Parse).with_source(parse_err);
        let source = err.source().expect("source");
        assert_eq!(source.to_string(), expected);
        assert_eq!(err.causes(), vec![expected]);
    }

    #[test]
    fn render_json_skips_empty_fields() {
        let err = Error::new(ErrorKind::Io);
        let value: serde_json::Value =
            serde_json::from_str(&err.render(false)).expect("report json");
        assert_eq!(
            value,
            serde_json::json!({"error": {"kind": "io", "message": "io error"}})
        );
    }

    #[test]
    fn render_json_carries_hint_and_causes() {
        let parse_err = serde_json::from_str::<u8>("x").unwrap_err();
        let cause = parse_err.to_string();
        let err = Error::new(ErrorKind::Parse)
            .with_message("invalid bench body")
            .with_hint("Check the --body JSON.")
            .with_source(parse_err);
        let value: serde_json::Value =
            serde_json::from_str(&err.render(false)).expect("report json");
        assert_eq!(value["error"]["kind"], "parse");
        assert_eq!(value["error"]["message"], "invalid bench body");
        assert_eq!(value["error"]["hint"], "Check the --body JSON.");
        assert_eq!(value["error"]["causes"], serde_json::json!([cause]));
    }

    #[test]
    fn render_terminal_is_line_oriented() {
        let err = Error::new(ErrorKind::Usage)
            .with_message("invalid --format")
            .with_hint("Use json, table, or both.");
        assert_eq!(
            err.render(true),
            "error[usage]: invalid --format\n  hint: Use json, table, or both."
        );
    }
}
