#![forbid(unsafe_code)]
// SPDX-License-Identifier: Apache-2.0 OR MIT
//! Nesting-aware switch/case block parser and evaluator for brace-tag
//! template markup.
//!
//! Given the tagdata of one `{switch ...} ... {/switch}` block, the
//! engine extracts its ordered `{case value="..."} ... {/case}` clauses,
//! matches a resolved input value against each clause's pipe-delimited
//! alternatives (literals, the `''` empty-string sentinel, or `#...#`
//! delimited patterns), and returns the matching body, or the first
//! default-flagged body when nothing matches. Nested switch blocks
//! inside case bodies are lifted out before clause extraction and
//! restored byte-for-byte afterwards, with their outer tags requalified
//! so a later pass re-evaluates them as first-class invocations.
//!
//! Evaluation never fails: malformed markup degrades to pass-through or
//! empty output, and bad case patterns only lose the alternative they
//! appear in. Anomalies surface through the context's [`Logger`] when
//! debug mode is on.

mod assemble;
mod clause;
mod error;
mod isolate;
mod matcher;
mod runtime;
pub mod tagpair;
pub mod telemetry;
mod vault;

use std::time::Instant;

pub use assemble::{assemble, NAMESPACED_NO_RESULTS};
pub use clause::CaseClause;
pub use isolate::isolate;
pub use error::Error;
pub use matcher::MatcherLimits;
pub use runtime::{
    EntityDecoder, EvalContext, EvalOptions, EvaluationOutcome, Logger, NoopDecoder, NullLogger,
};
pub use vault::{Placeholder, PlaceholderVault, Span};

/// A parsed switch block, ready to evaluate against input values.
#[derive(Debug, Clone)]
pub struct SwitchBlock {
    source: String,
    flattened: String,
    vault: PlaceholderVault,
    clauses: Vec<CaseClause>,
}

impl SwitchBlock {
    /// Parses the tagdata of one switch block.
    ///
    /// Parsing cannot fail: an opener without a closer is left as inert
    /// text, and tagdata with no case-shaped pairs yields a block with
    /// zero clauses that evaluates to its (empty) default.
    pub fn parse(tagdata: &str) -> Self {
        let started = Instant::now();

        let mut vault = PlaceholderVault::new();
        let mut flattened = isolate::isolate(tagdata, &mut vault);
        let pairs = tagpair::parse_tag_pairs(&flattened);
        let clauses = clause::extract_clauses(&mut flattened, &pairs);

        telemetry::record_parse(tagdata.len(), vault.len(), started.elapsed());

        Self {
            source: tagdata.to_string(),
            flattened,
            vault,
            clauses,
        }
    }

    /// Evaluates the block against a resolved input value and returns
    /// the final output text.
    pub fn evaluate(&self, input: &str, options: EvalOptions, ctx: &EvalContext) -> String {
        let started = Instant::now();

        if options.debug {
            ctx.log(&format!("switchtag: evaluating variable '{input}'"));
        }

        let outcome = runtime::evaluate_clauses(&self.clauses, input, options, ctx);
        let output = assemble::assemble(outcome.final_body(), &self.vault);

        telemetry::record_evaluate(self.source.len(), started.elapsed(), outcome.has_match);

        output
    }

    /// Evaluates with first-match semantics and no collaborators.
    pub fn evaluate_simple(&self, input: &str) -> String {
        self.evaluate(input, EvalOptions::default(), &EvalContext::new())
    }

    /// The original tagdata this block was parsed from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The flattened tagdata after isolation and clause marker rewrite.
    pub fn flattened(&self) -> &str {
        &self.flattened
    }

    /// The ordered case clauses found in the block.
    pub fn clauses(&self) -> &[CaseClause] {
        &self.clauses
    }

    /// The nested blocks lifted out of this block's tagdata.
    pub fn vault(&self) -> &PlaceholderVault {
        &self.vault
    }
}
