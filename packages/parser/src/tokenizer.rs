//! HTML tokenizer.
//!
//! Splits authored HTML into tags and text runs. This is intentionally
//! forgiving: anything that does not look like a tag falls out as text, so
//! malformed markup can never fail the pipeline.

use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq)]
enum RawToken {
    /// Closing tag: `</name>`
    #[regex(r"</[a-zA-Z][a-zA-Z0-9:-]*\s*>")]
    CloseTag,

    /// Opening or self-closing tag, raw attribute text included
    #[regex(r"<[a-zA-Z][a-zA-Z0-9:-]*[^>]*>")]
    OpenTag,

    /// Comments, doctypes and other `<!…>` markup; dropped entirely
    #[regex(r"<![^>]*>")]
    Markup,

    /// Text run up to the next angle bracket
    #[regex(r"[^<]+")]
    Text,

    /// A stray `<` that does not open a tag; falls out as text
    #[token("<")]
    Stray,
}

/// A structured HTML token.
#[derive(Debug, Clone, PartialEq)]
pub enum HtmlToken {
    Open {
        tag: String,
        attributes: Vec<(String, String)>,
        self_closing: bool,
    },
    Close {
        tag: String,
    },
    Text(String),
}

/// Tokenize HTML source. Never fails; unrecognized input degrades to text.
pub fn tokenize(source: &str) -> Vec<HtmlToken> {
    let mut tokens: Vec<HtmlToken> = Vec::new();
    let mut lexer = RawToken::lexer(source);

    let push_text = |tokens: &mut Vec<HtmlToken>, slice: &str| {
        if let Some(HtmlToken::Text(prev)) = tokens.last_mut() {
            prev.push_str(slice);
        } else {
            tokens.push(HtmlToken::Text(slice.to_string()));
        }
    };

    while let Some(result) = lexer.next() {
        let slice = lexer.slice();
        match result {
            Ok(RawToken::OpenTag) => {
                let (tag, attributes, self_closing) = parse_tag(slice);
                tokens.push(HtmlToken::Open {
                    tag,
                    attributes,
                    self_closing,
                });
            }
            Ok(RawToken::CloseTag) => {
                let name = slice
                    .trim_start_matches("</")
                    .trim_end_matches('>')
                    .trim()
                    .to_ascii_lowercase();
                tokens.push(HtmlToken::Close { tag: name });
            }
            Ok(RawToken::Markup) => {}
            Ok(RawToken::Text) | Ok(RawToken::Stray) | Err(_) => {
                push_text(&mut tokens, slice);
            }
        }
    }

    tokens
}

/// Split an opening-tag slice into name, attributes and the self-closing flag.
fn parse_tag(slice: &str) -> (String, Vec<(String, String)>, bool) {
    let mut inner = &slice[1..slice.len() - 1];
    let self_closing = inner.ends_with('/');
    if self_closing {
        inner = &inner[..inner.len() - 1];
    }

    let bytes = inner.as_bytes();
    let name_end = bytes
        .iter()
        .position(|b| b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    let name = inner[..name_end].to_ascii_lowercase();
    let mut pos = name_end;

    let mut attributes = Vec::new();
    while pos < bytes.len() {
        while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
            pos += 1;
        }
        if pos >= bytes.len() {
            break;
        }

        let key_start = pos;
        while pos < bytes.len() && bytes[pos] != b'=' && !bytes[pos].is_ascii_whitespace() {
            pos += 1;
        }
        let key = inner[key_start..pos].trim().to_ascii_lowercase();
        if key.is_empty() {
            pos += 1;
            continue;
        }

        while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
            pos += 1;
        }

        if pos < bytes.len() && bytes[pos] == b'=' {
            pos += 1;
            while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
                pos += 1;
            }
            let value = if pos < bytes.len() && (bytes[pos] == b'"' || bytes[pos] == b'\'') {
                let quote = bytes[pos];
                pos += 1;
                let value_start = pos;
                while pos < bytes.len() && bytes[pos] != quote {
                    pos += 1;
                }
                let value = &inner[value_start..pos];
                pos = (pos + 1).min(bytes.len());
                value
            } else {
                let value_start = pos;
                while pos < bytes.len() && !bytes[pos].is_ascii_whitespace() {
                    pos += 1;
                }
                &inner[value_start..pos]
            };
            attributes.push((key, decode_entities(value)));
        } else {
            // Bare attribute with no value
            attributes.push((key, String::new()));
        }
    }

    (name, attributes, self_closing)
}

/// Decode the HTML entities the editor emits plus numeric references.
/// Unknown entities are kept verbatim.
pub fn decode_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let bytes = text.as_bytes();
    let mut pos = 0;

    while pos < bytes.len() {
        if bytes[pos] == b'&' {
            if let Some(semi) = text[pos..].find(';').filter(|&i| i <= 10) {
                let entity = &text[pos + 1..pos + semi];
                if let Some(decoded) = decode_entity(entity) {
                    out.push(decoded);
                    pos += semi + 1;
                    continue;
                }
            }
        }
        let ch_len = utf8_len(bytes[pos]);
        out.push_str(&text[pos..pos + ch_len]);
        pos += ch_len;
    }

    out
}

fn decode_entity(entity: &str) -> Option<char> {
    match entity {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => {
            let rest = entity.strip_prefix('#')?;
            let code = if let Some(hex) = rest.strip_prefix('x').or_else(|| rest.strip_prefix('X'))
            {
                u32::from_str_radix(hex, 16).ok()?
            } else {
                rest.parse::<u32>().ok()?
            };
            char::from_u32(code)
        }
    }
}

pub(crate) fn utf8_len(first_byte: u8) -> usize {
    match first_byte {
        b if b < 0x80 => 1,
        b if b < 0xe0 => 2,
        b if b < 0xf0 => 3,
        _ => 4,
    }
}
