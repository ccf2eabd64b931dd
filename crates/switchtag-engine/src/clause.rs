// SPDX-License-Identifier: Apache-2.0 OR MIT
use crate::tagpair::TagPair;

const CASE_PREFIX: &str = "case";
const CASE_CLOSER: &str = "{/case}";

/// One `case` sub-block of a switch body, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseClause {
    /// 1-based position among the case-named pairs (non-case pairs skipped).
    pub ordinal: usize,
    /// The `value` attribute, when present.
    pub value_attr: Option<String>,
    /// The `default` attribute, when present.
    pub default_attr: Option<String>,
    /// Body text between this clause's marker and the next `{/case}`.
    /// Empty when the markup is malformed and the span cannot be located.
    pub body: String,
}

/// Filters `pairs` down to case-named clauses and captures their bodies.
///
/// Each retained clause's opening tag inside `flattened` is rewritten to
/// a unique `{case_<ordinal>}` marker before its body is located, so
/// clauses sharing identical attribute text still resolve to distinct
/// bodies: the rewrite always targets the first occurrence that has not
/// been rewritten yet. Returns an empty list when no case-shaped pairs
/// are present.
pub fn extract_clauses(flattened: &mut String, pairs: &[TagPair]) -> Vec<CaseClause> {
    let mut clauses = Vec::new();

    for pair in pairs {
        if !starts_with_ci(&pair.name, CASE_PREFIX) {
            continue;
        }
        let ordinal = clauses.len() + 1;

        let opener = format!("{{{}}}", pair.raw);
        let marker = format!("{{case_{ordinal}}}");
        if let Some(at) = flattened.find(&opener) {
            flattened.replace_range(at..at + opener.len(), &marker);
        }

        let body = match flattened.find(&marker) {
            Some(at) => {
                let start = at + marker.len();
                match flattened[start..].find(CASE_CLOSER) {
                    Some(rel) => flattened[start..start + rel].to_string(),
                    None => String::new(),
                }
            }
            None => String::new(),
        };

        clauses.push(CaseClause {
            ordinal,
            value_attr: pair.attribute("value").map(str::to_string),
            default_attr: pair.attribute("default").map(str::to_string),
            body,
        });
    }

    clauses
}

fn starts_with_ci(name: &str, prefix: &str) -> bool {
    let name = name.as_bytes();
    let prefix = prefix.as_bytes();
    name.len() >= prefix.len() && name[..prefix.len()].eq_ignore_ascii_case(prefix)
}
