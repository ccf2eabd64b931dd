// SPDX-License-Identifier: Apache-2.0 OR MIT
use std::sync::Arc;

use switchtag_engine::tagpair::{self, OpeningTag};
use switchtag_engine::{EvalContext, EvalOptions, SwitchBlock};

use crate::decode::HtmlEntityDecoder;
use crate::resolver::VariableResolver;

const INVOCATION_NAME: &str = "exp:switch";
const OPENER: &str = "{exp:switch";
const CLOSER: &str = "{/exp:switch}";

/// Runs every `{exp:switch ...} ... {/exp:switch}` invocation found in a
/// page template, splicing each block's evaluation result in place.
///
/// This is the loop the hosting template engine performs around the
/// engine: strip the invocation tags, resolve the `variable` attribute,
/// evaluate the tagdata, put the output back. Nested blocks restored by
/// an evaluation come back fully qualified, so a further pass picks them
/// up; [`Processor::process_to_fixpoint`] repeats until the template
/// stops changing.
pub struct Processor {
    resolver: Arc<dyn VariableResolver + Send + Sync>,
    ctx: EvalContext,
    max_passes: usize,
}

impl Processor {
    /// Creates a processor with the entity-decoding context installed
    /// and a pass ceiling suited to realistic nesting depths.
    pub fn new(resolver: Arc<dyn VariableResolver + Send + Sync>) -> Self {
        Self {
            resolver,
            ctx: EvalContext::new().with_decoder(Arc::new(HtmlEntityDecoder)),
            max_passes: 8,
        }
    }

    /// Replaces the evaluation context (decoder, logger, limits).
    pub fn with_context(mut self, ctx: EvalContext) -> Self {
        self.ctx = ctx;
        self
    }

    /// Replaces the fixpoint pass ceiling.
    pub fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.max_passes = max_passes;
        self
    }

    /// Evaluates every invocation in `template` once.
    ///
    /// Malformed invocations (an opener that fails to lex, or one with
    /// no matching closer) pass through as inert text.
    pub fn process(&self, template: &str) -> String {
        let mut output = String::with_capacity(template.len());
        let mut cursor = 0usize;

        while cursor < template.len() {
            let Some(open) = find_ci(template, OPENER, cursor) else {
                output.push_str(&template[cursor..]);
                break;
            };

            let invocation = match tagpair::parse_opening_tag(template, open) {
                Ok(tag) if tag.name.eq_ignore_ascii_case(INVOCATION_NAME) => tag,
                _ => {
                    let resume = open + OPENER.len();
                    output.push_str(&template[cursor..resume]);
                    cursor = resume;
                    continue;
                }
            };

            match find_invocation_end(template, invocation.end) {
                Some((closer_start, closer_end)) => {
                    output.push_str(&template[cursor..open]);
                    let tagdata = &template[invocation.end..closer_start];
                    output.push_str(&self.evaluate_invocation(&invocation, tagdata));
                    cursor = closer_end;
                }
                None => {
                    let resume = open + OPENER.len();
                    output.push_str(&template[cursor..resume]);
                    cursor = resume;
                }
            }
        }

        output
    }

    /// Re-processes until the template stops changing or the pass
    /// ceiling is reached, so requalified nested blocks are evaluated.
    pub fn process_to_fixpoint(&self, template: &str) -> String {
        let mut current = template.to_string();
        for _ in 0..self.max_passes {
            let next = self.process(&current);
            if next == current {
                break;
            }
            current = next;
        }
        current
    }

    fn evaluate_invocation(&self, invocation: &OpeningTag, tagdata: &str) -> String {
        let variable = invocation.attribute("variable").unwrap_or("");
        let input = self.resolver.resolve(variable).unwrap_or_default();
        let options = EvalOptions {
            match_all: invocation.attribute("match") == Some("all"),
            debug: invocation.attribute("debug").is_some_and(is_truthy),
        };

        SwitchBlock::parse(tagdata).evaluate(&input, options, &self.ctx)
    }
}

/// Truthiness of the `debug` attribute: the value contains `1`, `on`,
/// `yes`, or `y`, case-insensitively.
fn is_truthy(value: &str) -> bool {
    let value = value.to_ascii_lowercase();
    ["1", "on", "yes", "y"]
        .iter()
        .any(|pattern| value.contains(pattern))
}

/// Finds the closer matching an invocation whose tagdata starts at
/// `from`, counting nested qualified invocations. Returns the closer's
/// start and the offset just past its `}`.
fn find_invocation_end(template: &str, from: usize) -> Option<(usize, usize)> {
    let mut depth = 1usize;
    let mut pos = from;

    loop {
        let next_open = find_ci(template, OPENER, pos);
        let next_close = find_ci(template, CLOSER, pos)?;

        match next_open {
            Some(o) if o < next_close => {
                depth += 1;
                pos = o + OPENER.len();
            }
            _ => {
                depth -= 1;
                if depth == 0 {
                    return Some((next_close, next_close + CLOSER.len()));
                }
                pos = next_close + CLOSER.len();
            }
        }
    }
}

/// ASCII case-insensitive substring search starting at `from`.
fn find_ci(haystack: &str, needle: &str, from: usize) -> Option<usize> {
    let haystack = haystack.as_bytes();
    let needle = needle.as_bytes();
    if needle.is_empty() || haystack.len() < needle.len() || from > haystack.len() - needle.len() {
        return None;
    }

    let last = haystack.len() - needle.len();
    let mut at = from;
    while at <= last {
        if haystack[at..at + needle.len()].eq_ignore_ascii_case(needle) {
            return Some(at);
        }
        at += 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::SourceResolver;

    fn processor(resolver: SourceResolver) -> Processor {
        Processor::new(Arc::new(resolver))
    }

    #[test]
    fn invocation_is_replaced_by_its_evaluation() {
        let template = "pre {exp:switch variable=\"color\"}\
                        {case value=\"red\"}warm{/case}\
                        {case value=\"blue\"}cold{/case}\
                        {/exp:switch} post";
        let p = processor(SourceResolver::new().with_global("color", "blue"));
        assert_eq!(p.process(template), "pre cold post");
    }

    #[test]
    fn unknown_variable_resolves_to_empty_string() {
        let template = "{exp:switch variable=\"missing\"}\
                        {case value=\"''\"}blank{/case}\
                        {/exp:switch}";
        let p = processor(SourceResolver::new());
        assert_eq!(p.process(template), "blank");
    }

    #[test]
    fn invocation_without_closer_is_inert() {
        let template = "{exp:switch variable=\"v\"}{case value=\"a\"}x{/case}";
        let p = processor(SourceResolver::new());
        assert_eq!(p.process(template), template);
    }

    #[test]
    fn match_all_attribute_enables_accumulation() {
        let template = "{exp:switch variable=\"v\" match=\"all\"}\
                        {case value=\"A\"}one{/case}{case value=\"A\"}two{/case}\
                        {/exp:switch}";
        let p = processor(SourceResolver::new().with_global("v", "A"));
        assert_eq!(p.process(template), "onetwo");
    }

    #[test]
    fn truthy_debug_spellings() {
        assert!(is_truthy("yes"));
        assert!(is_truthy("Y"));
        assert!(is_truthy("on"));
        assert!(is_truthy("1"));
        assert!(!is_truthy("no"));
        assert!(!is_truthy(""));
    }
}
