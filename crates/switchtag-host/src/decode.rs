// SPDX-License-Identifier: Apache-2.0 OR MIT
use switchtag_engine::EntityDecoder;

/// Decodes HTML entities in case values and inputs.
///
/// Case alternatives must entity-encode the characters the tag grammar
/// reserves (`&#123;` for `{`, `&#124;` for `|`, `&#125;` for `}`); this
/// decoder turns them back into the raw characters before comparison or
/// pattern compilation. Numeric (decimal and hex) references and the
/// basic named entities are supported; anything unrecognized is copied
/// through verbatim.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlEntityDecoder;

impl EntityDecoder for HtmlEntityDecoder {
    fn decode(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut rest = text;

        while let Some(amp) = rest.find('&') {
            out.push_str(&rest[..amp]);
            let candidate = &rest[amp..];
            match decode_entity(candidate) {
                Some((ch, consumed)) => {
                    out.push(ch);
                    rest = &candidate[consumed..];
                }
                None => {
                    out.push('&');
                    rest = &candidate[1..];
                }
            }
        }
        out.push_str(rest);
        out
    }
}

/// Decodes one entity at the start of `text` (which begins with `&`).
/// Returns the character and the byte length consumed, or `None` when
/// the text is not a recognized entity.
fn decode_entity(text: &str) -> Option<(char, usize)> {
    let semi = text.find(';')?;
    let body = &text[1..semi];

    let ch = if let Some(digits) = body.strip_prefix("#x").or_else(|| body.strip_prefix("#X")) {
        char::from_u32(u32::from_str_radix(digits, 16).ok()?)?
    } else if let Some(digits) = body.strip_prefix('#') {
        char::from_u32(digits.parse::<u32>().ok()?)?
    } else {
        match body {
            "amp" => '&',
            "lt" => '<',
            "gt" => '>',
            "quot" => '"',
            "apos" => '\'',
            _ => return None,
        }
    };

    Some((ch, semi + 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(text: &str) -> String {
        HtmlEntityDecoder.decode(text)
    }

    #[test]
    fn reserved_tag_characters_decode() {
        assert_eq!(decode("&#123;&#124;&#125;"), "{|}");
    }

    #[test]
    fn hex_references_decode() {
        assert_eq!(decode("&#x7B;&#x7C;&#x7D;"), "{|}");
    }

    #[test]
    fn named_entities_decode() {
        assert_eq!(decode("&amp;&lt;&gt;&quot;&apos;"), "&<>\"'");
    }

    #[test]
    fn unknown_entities_pass_through() {
        assert_eq!(decode("&unknown; &#xZZ; & alone"), "&unknown; &#xZZ; & alone");
    }

    #[test]
    fn decoding_is_single_pass() {
        // &amp;#123; decodes the &amp; only; the result is not re-scanned.
        assert_eq!(decode("&amp;#123;"), "&#123;");
    }

    #[test]
    fn plain_text_is_untouched() {
        assert_eq!(decode("no entities"), "no entities");
    }
}
