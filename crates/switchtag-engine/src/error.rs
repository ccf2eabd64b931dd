// SPDX-License-Identifier: Apache-2.0 OR MIT
use crate::vault::Span;
use thiserror::Error;

/// Unified error type for the switch engine.
///
/// Evaluation itself never surfaces an error to the caller: malformed
/// markup and bad case patterns degrade to empty output or a skipped
/// alternative. These variants exist for the internal fallible seams
/// (tag lexing, pattern compilation) and are absorbed at the evaluation
/// boundary into diagnostic logging.
#[derive(Debug, Error)]
pub enum Error {
    #[error("tag parse error: {message}")]
    Parse {
        message: String,
        span: Option<Span>,
    },
    #[error("invalid case pattern `{pattern}`: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

impl Error {
    pub fn parse(message: impl Into<String>, span: Option<Span>) -> Self {
        Error::Parse {
            message: message.into(),
            span,
        }
    }

    pub fn parse_with_span(message: impl Into<String>, span: Span) -> Self {
        Self::parse(message, Some(span))
    }

    pub fn pattern(pattern: impl Into<String>, source: regex::Error) -> Self {
        Error::Pattern {
            pattern: pattern.into(),
            source,
        }
    }

    /// Short classification of a pattern failure, used by diagnostic logging.
    pub fn pattern_failure_kind(source: &regex::Error) -> &'static str {
        match source {
            regex::Error::Syntax(message) if message.contains("nest") => "nest-limit",
            regex::Error::Syntax(_) => "syntax",
            regex::Error::CompiledTooBig(_) => "size-limit",
            _ => "unrecognized",
        }
    }
}
