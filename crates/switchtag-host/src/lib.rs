#![forbid(unsafe_code)]
// SPDX-License-Identifier: Apache-2.0 OR MIT
//! Host wiring for `switchtag-engine`.
//!
//! The engine evaluates one switch block against an already-resolved
//! value and delegates entity decoding and diagnostics to collaborator
//! traits. This crate supplies the concrete collaborators: a
//! prefix-routing [`SourceResolver`], an [`HtmlEntityDecoder`], and
//! loggers. It also provides a [`Processor`] that finds
//! `{exp:switch ...}` invocations in a full page template and splices
//! their evaluations in place, pass after pass.

mod decode;
mod logger;
mod process;
mod resolver;

pub use decode::HtmlEntityDecoder;
pub use logger::{CollectingLogger, StderrLogger};
pub use process::Processor;
pub use resolver::{SourceResolver, VariableResolver};

pub use switchtag_engine::{
    assemble, isolate, CaseClause, EntityDecoder, Error, EvalContext, EvalOptions,
    EvaluationOutcome, Logger, MatcherLimits, NoopDecoder, NullLogger, Placeholder,
    PlaceholderVault, Span, SwitchBlock, NAMESPACED_NO_RESULTS,
};
