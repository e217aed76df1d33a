//! Error adapter for converting StratumError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI. Parse errors carry
//! the text of the offending file, so they are rendered with a labelled
//! snippet.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, NamedSource, SourceSpan};

use stratum::StratumError;

/// Adapter for [`StratumError`].
pub struct ErrorAdapter<'a> {
    err: &'a StratumError,
    /// Source text of parse errors, named after the file
    source: Option<NamedSource<String>>,
}

impl<'a> ErrorAdapter<'a> {
    /// Create a new error adapter.
    pub fn new(err: &'a StratumError) -> Self {
        let source = match err {
            StratumError::Parse { path, src, .. } => {
                Some(NamedSource::new(path.clone(), src.clone()).with_language("TOML"))
            }
            _ => None,
        };
        Self { err, source }
    }
}

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.err, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.err, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.err.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self.err {
            StratumError::Io(_) => "stratum::io",
            StratumError::Config(_) => "stratum::config",
            StratumError::Parse { .. } => "stratum::parse",
            StratumError::Layout(_) => "stratum::layout",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match self.err {
            StratumError::Config(_) => {
                "box sizes must be positive and spacings non-negative; \
                 directions are left_to_right or top_to_bottom, engines layered or sugiyama"
            }
            StratumError::Parse { .. } => {
                "graph files contain [[nodes]] with an `id` and [[edges]] with `source` and `target`"
            }
            StratumError::Io(_) | StratumError::Layout(_) => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        self.source
            .as_ref()
            .map(|source| source as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let StratumError::Parse {
            message,
            span: Some(span),
            ..
        } = self.err
        else {
            return None;
        };

        let span = SourceSpan::new(span.start.into(), span.len());
        Some(Box::new(std::iter::once(
            LabeledSpan::new_primary_with_span(Some(message.clone()), span),
        )))
    }
}

#[cfg(test)]
mod tests {
    use stratum::ConfigError;

    use super::*;

    #[test]
    fn test_parse_error_has_label() {
        let err = StratumError::new_parse_error("graph.toml", "id = 1", "invalid type", Some(5..6));
        let adapter = ErrorAdapter::new(&err);

        let labels: Vec<_> = adapter.labels().expect("labels").collect();
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].label(), Some("invalid type"));
        assert!(labels[0].primary());
        assert!(adapter.source_code().is_some());
        assert_eq!(
            adapter.code().map(|c| c.to_string()),
            Some("stratum::parse".to_string())
        );
    }

    #[test]
    fn test_parse_error_without_span() {
        let err = StratumError::new_parse_error("graph.toml", "", "unexpected end", None);
        let adapter = ErrorAdapter::new(&err);

        assert!(adapter.labels().is_none());
    }

    #[test]
    fn test_config_error() {
        let err = StratumError::Config(ConfigError::UnknownVariant {
            kind: "direction",
            value: "diagonal".to_string(),
        });
        let adapter = ErrorAdapter::new(&err);

        assert_eq!(
            adapter.to_string(),
            "Configuration error: Unknown direction `diagonal`"
        );
        assert!(adapter.help().is_some());
        assert!(adapter.source_code().is_none());
        assert!(adapter.labels().is_none());
    }
}
