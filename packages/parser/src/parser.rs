//! DOM-like tree builder over the token stream.
//!
//! The builder is total: stray close tags are dropped, unclosed elements are
//! closed at end of input, and anything unrecognizable is already text by
//! the time it leaves the tokenizer. Malformed input degrades, it never
//! errors.

use crate::tokenizer::{decode_entities, tokenize, HtmlToken};

/// A parsed HTML node. Text content is entity-decoded.
#[derive(Debug, Clone, PartialEq)]
pub enum HtmlNode {
    Element {
        tag: String,
        attributes: Vec<(String, String)>,
        children: Vec<HtmlNode>,
    },
    Text(String),
}

impl HtmlNode {
    pub fn tag(&self) -> Option<&str> {
        match self {
            HtmlNode::Element { tag, .. } => Some(tag),
            HtmlNode::Text(_) => None,
        }
    }

    /// Attribute lookup by (lowercased) name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        match self {
            HtmlNode::Element { attributes, .. } => attributes
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.as_str()),
            HtmlNode::Text(_) => None,
        }
    }

    /// Concatenated descendant text, with `<br>` and closing `</p>`
    /// contributing newlines — the same shape the normalizer's plain-text
    /// pipeline produces.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            HtmlNode::Text(text) => out.push_str(text),
            HtmlNode::Element { tag, children, .. } => {
                if tag == "br" {
                    out.push('\n');
                    return;
                }
                for child in children {
                    child.collect_text(out);
                }
                if tag == "p" {
                    out.push('\n');
                }
            }
        }
    }
}

/// Tags that never carry children.
pub fn is_void_element(tag: &str) -> bool {
    matches!(
        tag,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

struct OpenFrame {
    tag: String,
    attributes: Vec<(String, String)>,
    children: Vec<HtmlNode>,
}

/// Parse HTML into a node list.
pub fn parse(source: &str) -> Vec<HtmlNode> {
    let mut roots: Vec<HtmlNode> = Vec::new();
    let mut stack: Vec<OpenFrame> = Vec::new();

    fn attach(roots: &mut Vec<HtmlNode>, stack: &mut [OpenFrame], node: HtmlNode) {
        if let Some(frame) = stack.last_mut() {
            frame.children.push(node);
        } else {
            roots.push(node);
        }
    }

    for token in tokenize(source) {
        match token {
            HtmlToken::Text(text) => {
                attach(&mut roots, &mut stack, HtmlNode::Text(decode_entities(&text)));
            }
            HtmlToken::Open {
                tag,
                attributes,
                self_closing,
            } => {
                if self_closing || is_void_element(&tag) {
                    attach(
                        &mut roots,
                        &mut stack,
                        HtmlNode::Element {
                            tag,
                            attributes,
                            children: Vec::new(),
                        },
                    );
                } else {
                    stack.push(OpenFrame {
                        tag,
                        attributes,
                        children: Vec::new(),
                    });
                }
            }
            HtmlToken::Close { tag } => {
                // Only close if a matching element is actually open;
                // intermediate unclosed elements close with it.
                let Some(open_at) = stack.iter().rposition(|frame| frame.tag == tag) else {
                    continue;
                };
                while stack.len() > open_at {
                    let frame = stack.pop().expect("stack is non-empty above open_at");
                    let node = HtmlNode::Element {
                        tag: frame.tag,
                        attributes: frame.attributes,
                        children: frame.children,
                    };
                    attach(&mut roots, &mut stack, node);
                }
            }
        }
    }

    // Close everything still open at end of input.
    while let Some(frame) = stack.pop() {
        let node = HtmlNode::Element {
            tag: frame.tag,
            attributes: frame.attributes,
            children: frame.children,
        };
        attach(&mut roots, &mut stack, node);
    }

    roots
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nested_elements() {
        let nodes = parse("<p>Hello <strong>world</strong></p>");

        assert_eq!(nodes.len(), 1);
        let HtmlNode::Element { tag, children, .. } = &nodes[0] else {
            panic!("expected element");
        };
        assert_eq!(tag, "p");
        assert_eq!(children.len(), 2);
        assert_eq!(children[0], HtmlNode::Text("Hello ".to_string()));
        assert_eq!(children[1].tag(), Some("strong"));
    }

    #[test]
    fn test_stray_close_tag_is_ignored() {
        let nodes = parse("a</div>b");
        assert_eq!(
            nodes,
            vec![
                HtmlNode::Text("a".to_string()),
                HtmlNode::Text("b".to_string()),
            ]
        );
    }

    #[test]
    fn test_unclosed_element_closes_at_eof() {
        let nodes = parse("<em>dangling");
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].tag(), Some("em"));
        assert_eq!(nodes[0].text_content(), "dangling");
    }

    #[test]
    fn test_text_content_counts_br_as_newline() {
        let nodes = parse("<p>one<br>two</p>");
        assert_eq!(nodes[0].text_content(), "one\ntwo\n");
    }

    #[test]
    fn test_entities_decoded_in_text() {
        let nodes = parse("<b>a &amp; b</b>");
        assert_eq!(nodes[0].text_content(), "a & b");
    }

    #[test]
    fn test_mismatched_nesting_recovers() {
        // </i> closes both the dangling <b> and the <i>
        let nodes = parse("<i>x<b>y</i>z");
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].tag(), Some("i"));
        assert_eq!(nodes[0].text_content(), "xy");
        assert_eq!(nodes[1], HtmlNode::Text("z".to_string()));
    }
}
