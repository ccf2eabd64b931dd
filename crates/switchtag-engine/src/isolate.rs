// SPDX-License-Identifier: Apache-2.0 OR MIT
use crate::vault::PlaceholderVault;

const OPEN_TAG: &str = "{switch";
const CLOSE_TAG: &str = "{/switch";

/// Replaces every complete nested switch block in `template` with a
/// placeholder token, recording the original text in `vault`.
///
/// The scan walks the input once with an explicit depth counter instead
/// of a recursive pattern. An opening occurrence is the literal
/// `{switch` (ASCII case-insensitive); a closing occurrence is the
/// literal `{/switch`. The replaced span runs from the opener through
/// the end of the closing tag name, deliberately excluding the closer's
/// final `}`, which stays behind in the flattened text.
///
/// An opener with no matching closer is copied through untouched and the
/// scan resumes directly after it, so a complete block further in is
/// still extracted.
pub fn isolate(template: &str, vault: &mut PlaceholderVault) -> String {
    let mut flattened = String::with_capacity(template.len());
    let mut cursor = 0usize;

    while cursor < template.len() {
        let Some(open) = find_ci(template, OPEN_TAG, cursor) else {
            flattened.push_str(&template[cursor..]);
            break;
        };

        match scan_balanced(template, open) {
            Some(end) => {
                flattened.push_str(&template[cursor..open]);
                let token = vault.store(&template[open..end]);
                flattened.push_str(&token);
                cursor = end;
            }
            None => {
                let resume = open + OPEN_TAG.len();
                flattened.push_str(&template[cursor..resume]);
                cursor = resume;
            }
        }
    }

    flattened
}

/// Scans forward from an opener at `open`, consuming nested open/close
/// pairs as opaque units. Returns the exclusive end of the block: the
/// offset just past the matching `{/switch` tag name.
fn scan_balanced(template: &str, open: usize) -> Option<usize> {
    let mut depth = 1usize;
    let mut pos = open + OPEN_TAG.len();

    while depth > 0 {
        let next_open = find_ci(template, OPEN_TAG, pos);
        let next_close = find_ci(template, CLOSE_TAG, pos)?;

        match next_open {
            Some(o) if o < next_close => {
                depth += 1;
                pos = o + OPEN_TAG.len();
            }
            _ => {
                depth -= 1;
                pos = next_close + CLOSE_TAG.len();
            }
        }
    }

    Some(pos)
}

/// ASCII case-insensitive substring search starting at `from`.
pub(crate) fn find_ci(haystack: &str, needle: &str, from: usize) -> Option<usize> {
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
