// SPDX-License-Identifier: Apache-2.0 OR MIT
use crate::vault::{self, PlaceholderVault};

/// Namespaced spelling of the host's no-results conditional token.
pub const NAMESPACED_NO_RESULTS: &str = "switchtag_no_results";
const NO_RESULTS: &str = "no_results";

const SHORT_OPENER: &str = "{switch";
const SHORT_CLOSER: &str = "{/switch";
const QUALIFIED_OPENER: &str = "{exp:switch";
const QUALIFIED_CLOSER: &str = "{/exp:switch";

/// Produces the final output text from a chosen body.
///
/// The namespaced no-results sentinel is rewritten first, so that the
/// rewrite never touches sentinel text inside restored nested blocks:
/// those keep their namespaced spelling for their own later pass. Then
/// every placeholder is substituted in ascending index order, with the
/// stored block's short opening and closing tags requalified so a
/// consumer re-parsing the output sees a first-class invocation.
pub fn assemble(body: &str, vault: &PlaceholderVault) -> String {
    let mut output = body.replace(NAMESPACED_NO_RESULTS, NO_RESULTS);

    for placeholder in vault.entries() {
        let token = vault::token(placeholder.index);
        if !output.contains(&token) {
            continue;
        }
        let restored = qualify_tags(&placeholder.original_text);
        output = output.replace(&token, &restored);
    }

    output
}

/// Rewrites a stored nested block's outer shell from the short spelling
/// to the fully-qualified one: a leading `{switch` becomes
/// `{exp:switch` and a trailing `{/switch` becomes `{/exp:switch`,
/// both case-insensitively. Everything between is untouched.
fn qualify_tags(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut start = 0;
    let mut end = text.len();
    let mut qualified = String::with_capacity(text.len() + 8);

    if bytes.len() >= SHORT_OPENER.len()
        && bytes[..SHORT_OPENER.len()].eq_ignore_ascii_case(SHORT_OPENER.as_bytes())
    {
        qualified.push_str(QUALIFIED_OPENER);
        start = SHORT_OPENER.len();
    }

    let closer_at = bytes.len().saturating_sub(SHORT_CLOSER.len());
    let has_closer = bytes.len() >= SHORT_CLOSER.len()
        && bytes[closer_at..].eq_ignore_ascii_case(SHORT_CLOSER.as_bytes())
        && closer_at >= start;
    if has_closer {
        end = closer_at;
    }

    qualified.push_str(&text[start..end]);
    if has_closer {
        qualified.push_str(QUALIFIED_CLOSER);
    }
    qualified
}
