// SPDX-License-Identifier: Apache-2.0 OR MIT
use regex::RegexBuilder;
use smallvec::SmallVec;

use crate::error::Error;
use crate::runtime::EvalContext;
use crate::telemetry;

/// Compile-time ceilings applied to `#...#` case patterns.
///
/// The underlying engine runs in linear time, so the ceilings bound the
/// compiled program size and the pattern nesting depth rather than a
/// backtrack count. Exceeding either fails only the alternative being
/// tested; the rest of the evaluation proceeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatcherLimits {
    /// Upper bound on the compiled pattern size, in bytes.
    pub size_limit: usize,
    /// Upper bound on the nesting depth of the parsed pattern.
    pub nest_limit: u32,
}

impl Default for MatcherLimits {
    fn default() -> Self {
        Self {
            size_limit: 1_000_000,
            nest_limit: 125,
        }
    }
}

/// The alternative that matched, reported for diagnostic logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum AlternativeMatch {
    /// Matched by exact string equality; carries the decoded alternative.
    Literal(String),
    /// Matched by a delimited regular expression; carries the decoded pattern.
    Pattern(String),
}

impl AlternativeMatch {
    pub(crate) fn alternative(&self) -> &str {
        match self {
            AlternativeMatch::Literal(text) | AlternativeMatch::Pattern(text) => text,
        }
    }
}

/// Tests `input` against a clause's pipe-delimited `value` attribute.
///
/// Alternatives are visited left to right and the first hit wins. Each
/// alternative is trimmed, the `''`/`""` spelling is normalized to an
/// actual empty string, and both sides are entity-decoded on every
/// iteration before comparison. An alternative whose first and last
/// characters are `#` is a delimited pattern, matched case-insensitively
/// with dot-matches-newline; anything else is compared for exact
/// equality. A pattern that fails to compile is a non-match for that
/// alternative alone, logged when `debug` is set.
pub(crate) fn match_value(
    value_attr: &str,
    input: &str,
    ctx: &EvalContext,
    debug: bool,
) -> Option<AlternativeMatch> {
    let alternatives: SmallVec<[&str; 4]> = value_attr.split('|').collect();

    for alternative in alternatives {
        let mut case_value = alternative.trim();
        if case_value == "''" || case_value == "\"\"" {
            case_value = "";
        }

        let case_value = ctx.decode(case_value);
        let input = ctx.decode(input);

        if is_delimited_pattern(&case_value) {
            match pattern_matches(&case_value, &input, ctx.limits()) {
                Ok(true) => return Some(AlternativeMatch::Pattern(case_value)),
                Ok(false) => {}
                Err(error) => {
                    if let Error::Pattern { source, .. } = &error {
                        let kind = Error::pattern_failure_kind(source);
                        telemetry::record_pattern_failure(kind);
                        if debug {
                            ctx.log(&format!(
                                "switchtag: pattern error ({kind}) in case '{case_value}'"
                            ));
                        }
                    }
                }
            }
        } else if case_value == input {
            return Some(AlternativeMatch::Literal(case_value));
        }
    }

    None
}

/// A delimited pattern starts and ends with `#` and has room for both
/// delimiters.
fn is_delimited_pattern(case_value: &str) -> bool {
    case_value.len() >= 2 && case_value.starts_with('#') && case_value.ends_with('#')
}

fn pattern_matches(case_value: &str, input: &str, limits: MatcherLimits) -> Result<bool, Error> {
    let inner = &case_value[1..case_value.len() - 1];
    let regex = RegexBuilder::new(inner)
        .case_insensitive(true)
        .dot_matches_new_line(true)
        .size_limit(limits.size_limit)
        .nest_limit(limits.nest_limit)
        .build()
        .map_err(|source| Error::pattern(case_value, source))?;
    Ok(regex.is_match(input))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches(value_attr: &str, input: &str) -> bool {
        match_value(value_attr, input, &EvalContext::new(), false).is_some()
    }

    #[test]
    fn literal_equality_over_pipe_alternatives() {
        assert!(matches("value1|value2", "value2"));
        assert!(matches("value1", "value1"));
        assert!(!matches("value1|value2", "value3"));
    }

    #[test]
    fn first_matching_alternative_is_reported() {
        let hit = match_value("a|b|b", "b", &EvalContext::new(), false).unwrap();
        assert_eq!(hit, AlternativeMatch::Literal("b".to_string()));
    }

    #[test]
    fn alternatives_are_trimmed() {
        assert!(matches(" value1 | value2 ", "value2"));
    }

    #[test]
    fn empty_string_sentinel_matches_empty_input() {
        assert!(matches("''", ""));
        assert!(matches("\"\"", ""));
        assert!(matches("value1|''", ""));
        assert!(!matches("''", "x"));
    }

    #[test]
    fn delimited_pattern_matches() {
        assert!(matches("#^P(\\d+)$#", "P42"));
        assert!(!matches("#^P(\\d+)$#", "42"));
    }

    #[test]
    fn patterns_are_case_insensitive_with_dotall() {
        assert!(matches("#^p\\d+$#", "P42"));
        assert!(matches("#^a.b$#", "a\nb"));
    }

    #[test]
    fn pattern_shaped_alternative_does_not_fall_through_to_equality() {
        assert!(!matches("#^x$#", "#^x$#"));
    }

    #[test]
    fn invalid_pattern_is_a_non_match_not_a_failure() {
        assert!(!matches("#(unclosed#", "anything"));
        assert!(matches("#(unclosed#|fallback", "fallback"));
    }

    #[test]
    fn nest_limit_bounds_pattern_compilation() {
        let ctx = EvalContext::new().with_limits(MatcherLimits {
            size_limit: 1_000_000,
            nest_limit: 2,
        });
        assert!(match_value("#((((a))))#", "a", &ctx, false).is_none());
    }

    #[test]
    fn lone_hash_is_a_literal() {
        assert!(matches("#", "#"));
    }
}
