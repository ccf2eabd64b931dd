// SPDX-License-Identifier: Apache-2.0 OR MIT
use std::sync::Arc;

use crate::clause::CaseClause;
use crate::matcher::{self, AlternativeMatch, MatcherLimits};

/// Decodes encoded entities in case values and inputs before comparison.
///
/// Case alternatives may carry entity-encoded reserved characters
/// (braces, pipes) that must be decoded to compare or compile; the host
/// supplies the concrete decoder. The engine default is [`NoopDecoder`].
pub trait EntityDecoder {
    fn decode(&self, text: &str) -> String;
}

/// Sink for diagnostic messages, consulted only in debug mode.
pub trait Logger {
    fn log(&self, message: &str);
}

/// Identity decoder used when no host decoder is installed.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopDecoder;

impl EntityDecoder for NoopDecoder {
    fn decode(&self, text: &str) -> String {
        text.to_string()
    }
}

/// Logger that drops every message.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullLogger;

impl Logger for NullLogger {
    fn log(&self, _message: &str) {}
}

/// Collaborators and limits threaded through one evaluation.
///
/// Handles are shared (`Arc`) so a context can be reused across
/// invocations and threads; no mutable evaluation state lives here.
#[derive(Clone)]
pub struct EvalContext {
    decoder: Arc<dyn EntityDecoder + Send + Sync>,
    logger: Arc<dyn Logger + Send + Sync>,
    limits: MatcherLimits,
}

impl EvalContext {
    /// Creates a context with the no-op decoder, a silent logger, and
    /// default pattern limits.
    pub fn new() -> Self {
        Self {
            decoder: Arc::new(NoopDecoder),
            logger: Arc::new(NullLogger),
            limits: MatcherLimits::default(),
        }
    }

    /// Replaces the entity decoder.
    pub fn with_decoder(mut self, decoder: Arc<dyn EntityDecoder + Send + Sync>) -> Self {
        self.decoder = decoder;
        self
    }

    /// Replaces the diagnostic logger.
    pub fn with_logger(mut self, logger: Arc<dyn Logger + Send + Sync>) -> Self {
        self.logger = logger;
        self
    }

    /// Replaces the pattern compilation limits.
    pub fn with_limits(mut self, limits: MatcherLimits) -> Self {
        self.limits = limits;
        self
    }

    pub(crate) fn decode(&self, text: &str) -> String {
        self.decoder.decode(text)
    }

    pub(crate) fn log(&self, message: &str) {
        self.logger.log(message);
    }

    pub(crate) fn limits(&self) -> MatcherLimits {
        self.limits
    }
}

impl Default for EvalContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-invocation evaluation switches parsed from the opening tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvalOptions {
    /// Accumulate every matching clause instead of stopping at the first.
    pub match_all: bool,
    /// Emit diagnostic messages through the context logger.
    pub debug: bool,
}

/// Accumulated result of walking every clause once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EvaluationOutcome {
    pub has_match: bool,
    pub accumulated_body: String,
    pub default_body: Option<String>,
}

impl EvaluationOutcome {
    /// The body the assembler should render: the accumulated matches, or
    /// the default when nothing matched, or nothing.
    pub fn final_body(&self) -> &str {
        if self.has_match {
            &self.accumulated_body
        } else {
            self.default_body.as_deref().unwrap_or("")
        }
    }
}

const TRUTHY_DEFAULTS: [&str; 4] = ["yes", "y", "true", "1"];

/// Walks clauses in ordinal order, matching values and tracking the
/// default fallback.
///
/// First-match mode stops at the first matching clause; match-all mode
/// accumulates every matching body in source order. A default-flagged
/// clause visited before any match records its body once (the first
/// default encountered wins), and the walk continues so a later clause
/// can still match and take precedence over the default.
pub(crate) fn evaluate_clauses(
    clauses: &[CaseClause],
    input: &str,
    options: EvalOptions,
    ctx: &EvalContext,
) -> EvaluationOutcome {
    let mut outcome = EvaluationOutcome::default();

    for clause in clauses {
        if let Some(value_attr) = &clause.value_attr {
            if let Some(hit) = matcher::match_value(value_attr, input, ctx, options.debug) {
                outcome.accumulated_body.push_str(&clause.body);
                outcome.has_match = true;

                if options.debug {
                    let kind = match &hit {
                        AlternativeMatch::Literal(_) => "string",
                        AlternativeMatch::Pattern(_) => "regex",
                    };
                    ctx.log(&format!(
                        "switchtag: {kind} match: case '{alt}' matched variable '{input}'",
                        alt = hit.alternative()
                    ));
                }

                if !options.match_all {
                    break;
                }
                continue;
            }
        }

        if !outcome.has_match && outcome.default_body.is_none() {
            if let Some(default_attr) = &clause.default_attr {
                let normalized = default_attr.to_ascii_lowercase();
                if TRUTHY_DEFAULTS.contains(&normalized.as_str()) {
                    outcome.default_body = Some(clause.body.clone());
                    if options.debug {
                        ctx.log(&format!(
                            "switchtag: default case found for variable '{input}'. \
                             This will be returned if no match is found."
                        ));
                    }
                }
            }
        }
    }

    outcome
}
