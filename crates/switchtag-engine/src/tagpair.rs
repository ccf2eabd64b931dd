// SPDX-License-Identifier: Apache-2.0 OR MIT
//! Flat `{name attr="value"} ... {/name}` pair tokenizer.
//!
//! Runs over flattened tagdata, after nested switch blocks have been
//! replaced by placeholder tokens. Placeholder tokens never lex as tag
//! pairs because `[` is not a name character.

use crate::error::Error;
use crate::vault::Span;

/// One matched opening/closing tag pair, in opener source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagPair {
    /// Tag name as written, e.g. `case` or `exp:switch`.
    pub name: String,
    /// The inner tag text between the opener's braces, exactly as written.
    pub raw: String,
    /// Attribute key/value pairs in source order.
    pub attributes: Vec<(String, String)>,
    /// Byte span of the opening tag within the scanned text.
    pub span: Span,
}

impl TagPair {
    /// Returns the value of the first attribute with the given key.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }
}

/// A lexed opening tag, before pairing with a closer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpeningTag {
    pub name: String,
    pub raw: String,
    pub attributes: Vec<(String, String)>,
    /// Offset just past the opener's closing `}`.
    pub end: usize,
}

impl OpeningTag {
    /// Returns the value of the first attribute with the given key.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }
}

/// Extracts every tag pair from `source`, in opener source order.
///
/// An opener only becomes a pair when a literal `{/name}` closer (name
/// as written) follows it. Openers that fail to lex or have no closer
/// are inert text. The scan resumes after each opening tag rather than
/// after its closer, so sibling pairs sharing one closer position are
/// all observed.
pub fn parse_tag_pairs(source: &str) -> Vec<TagPair> {
    let bytes = source.as_bytes();
    let mut pairs = Vec::new();
    let mut cursor = 0usize;

    while cursor < bytes.len() {
        let Some(open) = source[cursor..].find('{').map(|at| cursor + at) else {
            break;
        };

        match parse_opening_tag(source, open) {
            Ok(tag) => {
                let closer = format!("{{/{}}}", tag.name);
                if source[tag.end..].contains(&closer) {
                    pairs.push(TagPair {
                        name: tag.name,
                        raw: tag.raw,
                        attributes: tag.attributes,
                        span: Span::new(open, tag.end),
                    });
                }
                cursor = tag.end;
            }
            Err(_) => {
                cursor = open + 1;
            }
        }
    }

    pairs
}

/// Lexes a single opening tag starting at the `{` at `at`.
pub fn parse_opening_tag(source: &str, at: usize) -> Result<OpeningTag, Error> {
    let bytes = source.as_bytes();
    debug_assert_eq!(bytes.get(at), Some(&b'{'));

    let mut pos = at + 1;
    let name_start = pos;
    while pos < bytes.len() && is_name_byte(bytes[pos]) {
        pos += 1;
    }
    if pos == name_start || !bytes[name_start].is_ascii_alphabetic() {
        return Err(Error::parse_with_span("expected tag name", Span::new(at, pos)));
    }
    let name = source[name_start..pos].to_string();

    let mut attributes = Vec::new();
    loop {
        while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
            pos += 1;
        }
        match bytes.get(pos) {
            Some(b'}') => {
                pos += 1;
                break;
            }
            Some(_) => {
                let (key, value, next) = lex_attribute(source, pos)?;
                attributes.push((key, value));
                pos = next;
            }
            None => {
                return Err(Error::parse_with_span(
                    "unclosed opening tag",
                    Span::new(at, source.len()),
                ));
            }
        }
    }

    Ok(OpeningTag {
        name,
        raw: source[at + 1..pos - 1].to_string(),
        attributes,
        end: pos,
    })
}

fn lex_attribute(source: &str, at: usize) -> Result<(String, String, usize), Error> {
    let bytes = source.as_bytes();
    let mut pos = at;

    let key_start = pos;
    while pos < bytes.len() && is_name_byte(bytes[pos]) {
        pos += 1;
    }
    if pos == key_start {
        return Err(Error::parse_with_span(
            "expected attribute name",
            Span::new(at, pos),
        ));
    }
    let key = source[key_start..pos].to_string();

    while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
        pos += 1;
    }
    if bytes.get(pos) != Some(&b'=') {
        return Err(Error::parse_with_span(
            "expected '=' after attribute name",
            Span::new(key_start, pos),
        ));
    }
    pos += 1;
    while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
        pos += 1;
    }

    let quote = match bytes.get(pos) {
        Some(&q @ (b'"' | b'\'')) => q,
        _ => {
            return Err(Error::parse_with_span(
                "expected quoted attribute value",
                Span::new(key_start, pos),
            ));
        }
    };
    pos += 1;
    let value_start = pos;
    while pos < bytes.len() && bytes[pos] != quote {
        pos += 1;
    }
    if pos >= bytes.len() {
        return Err(Error::parse_with_span(
            "unterminated attribute value",
            Span::new(value_start, pos),
        ));
    }
    let value = source[value_start..pos].to_string();

    Ok((key, value, pos + 1))
}

fn is_name_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'_' | b'-' | b':')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lexes_opening_tag_with_attributes() {
        let tag = parse_opening_tag("{case value=\"a|b\" default='yes'}", 0).unwrap();
        assert_eq!(tag.name, "case");
        assert_eq!(tag.raw, "case value=\"a|b\" default='yes'");
        assert_eq!(
            tag.attributes,
            vec![
                ("value".to_string(), "a|b".to_string()),
                ("default".to_string(), "yes".to_string()),
            ]
        );
    }

    #[test]
    fn pairs_require_a_matching_closer() {
        let pairs = parse_tag_pairs("{case value=\"a\"}body{/case} {case value=\"b\"}dangling");
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].attribute("value"), Some("a"));
    }

    #[test]
    fn sibling_pairs_are_returned_in_source_order() {
        let pairs = parse_tag_pairs("{case value=\"a\"}1{/case}{case value=\"b\"}2{/case}");
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].attribute("value"), Some("a"));
        assert_eq!(pairs[1].attribute("value"), Some("b"));
    }

    #[test]
    fn placeholder_tokens_do_not_lex_as_tags() {
        let pairs = parse_tag_pairs("{[_switchtag_1]} {case value=\"a\"}x{/case}");
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].name, "case");
    }

    #[test]
    fn qualified_names_lex() {
        let source = "{exp:switch variable=\"v\"}x{/exp:switch}";
        let pairs = parse_tag_pairs(source);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].name, "exp:switch");
        assert_eq!(pairs[0].attribute("variable"), Some("v"));
    }

    #[test]
    fn attribute_values_may_hold_pipes_hashes_and_braces() {
        let tag = parse_opening_tag("{case value=\"#^p(\\d+)$#|''|&#123;\"}", 0).unwrap();
        assert_eq!(
            tag.attributes,
            vec![("value".to_string(), "#^p(\\d+)$#|''|&#123;".to_string())]
        );
    }
}
