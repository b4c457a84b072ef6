//! HTML normalization.
//!
//! Converts authored rich HTML into the block model's canonical shape:
//! plain-text content plus structured emphasis and link ranges. The inverse
//! direction (ranges back to HTML) lives in the exporter.
//!
//! Offsets are byte offsets into the plain text produced by
//! `strip_html_tags(convert_br_to_newlines(html))`. During extraction the
//! tree walk counts `<br>` and closing `</p>` as one newline each so both
//! paths agree, and ranges are shifted to account for the leading trim —
//! feeding exported HTML back through extraction recovers the same ranges.

use mailcraft_blocks::{Block, EmphasisRange, EmphasisStyle, LinkRange};

use crate::parser::{parse, HtmlNode};
use crate::tokenizer::{tokenize, utf8_len, HtmlToken};

/// Remove all tags, decode entities, trim.
pub fn strip_html_tags(html: &str) -> String {
    let mut out = String::new();
    for node in parse(html) {
        collect_plain(&node, &mut out);
    }
    out.trim().to_string()
}

fn collect_plain(node: &HtmlNode, out: &mut String) {
    match node {
        HtmlNode::Text(text) => out.push_str(text),
        HtmlNode::Element { children, .. } => {
            for child in children {
                collect_plain(child, out);
            }
        }
    }
}

/// `<br>` variants become newlines; `<p …>` opening tags are dropped and
/// `</p>` becomes a newline. Everything else passes through verbatim.
pub fn convert_br_to_newlines(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let bytes = html.as_bytes();
    let mut pos = 0;

    while pos < bytes.len() {
        if bytes[pos] == b'<' {
            if let Some(tag_end) = html[pos..].find('>') {
                let inner = &html[pos + 1..pos + tag_end];
                let lowered = inner.trim().to_ascii_lowercase();
                if lowered == "br" || lowered == "br/" || lowered == "br /" {
                    out.push('\n');
                    pos += tag_end + 1;
                    continue;
                }
                if lowered == "p" || lowered.starts_with("p ") {
                    pos += tag_end + 1;
                    continue;
                }
                if lowered == "/p" {
                    out.push('\n');
                    pos += tag_end + 1;
                    continue;
                }
            }
        }
        let ch_len = utf8_len(bytes[pos]);
        out.push_str(&html[pos..pos + ch_len]);
        pos += ch_len;
    }

    out
}

/// Whether the string contains any tag-like `<…>` syntax.
pub fn has_html_tags(text: &str) -> bool {
    tokenize(text)
        .iter()
        .any(|token| !matches!(token, HtmlToken::Text(_)))
}

struct EmphasisWalk {
    offset: usize,
    full_text: String,
    ranges: Vec<EmphasisRange>,
}

impl EmphasisWalk {
    fn walk(&mut self, node: &HtmlNode) {
        match node {
            HtmlNode::Text(text) => {
                self.offset += text.len();
                self.full_text.push_str(text);
            }
            HtmlNode::Element {
                tag,
                attributes,
                children,
            } => {
                if tag == "br" {
                    self.offset += 1;
                    self.full_text.push('\n');
                    return;
                }

                let start = self.offset;
                for child in children {
                    self.walk(child);
                }
                let end = self.offset;

                if end > start {
                    if let Some(range) = classify_emphasis(tag, attributes, start, end) {
                        self.ranges.push(range);
                    }
                }

                if tag == "p" {
                    self.offset += 1;
                    self.full_text.push('\n');
                }
            }
        }
    }
}

fn classify_emphasis(
    tag: &str,
    attributes: &[(String, String)],
    start: usize,
    end: usize,
) -> Option<EmphasisRange> {
    match tag {
        "strong" | "b" => Some(EmphasisRange::new(start, end, EmphasisStyle::Bold)),
        "em" | "i" => Some(EmphasisRange::new(start, end, EmphasisStyle::Italic)),
        "span" | "font" => {
            let color = inline_color(attributes)?;
            Some(EmphasisRange::highlight(start, end, color))
        }
        _ => None,
    }
}

/// Color from an inline `style="color: …"` declaration, or a `<font color>`
/// attribute.
fn inline_color(attributes: &[(String, String)]) -> Option<String> {
    for (key, value) in attributes {
        if key == "style" {
            for declaration in value.split(';') {
                let mut parts = declaration.splitn(2, ':');
                let property = parts.next()?.trim();
                if property.eq_ignore_ascii_case("color") {
                    let color = parts.next()?.trim();
                    if !color.is_empty() {
                        return Some(color.to_string());
                    }
                }
            }
        }
        if key == "color" && !value.is_empty() {
            return Some(value.clone());
        }
    }
    None
}

/// Extract emphasis ranges from authored HTML, expressed as offsets into
/// `plain_text`. Nested and overlapping tags each record their own range.
pub fn extract_emphasis(html: &str, plain_text: &str) -> Vec<EmphasisRange> {
    let mut walk = EmphasisWalk {
        offset: 0,
        full_text: String::new(),
        ranges: Vec::new(),
    };
    for node in parse(html) {
        walk.walk(&node);
    }

    // The plain text is trimmed; shift ranges past the leading whitespace
    // and clamp to the trimmed length.
    let delta = walk.full_text.len() - walk.full_text.trim_start().len();
    let mut ranges: Vec<EmphasisRange> = Vec::new();
    for mut range in walk.ranges {
        if range.end <= delta {
            continue;
        }
        range.start = range.start.saturating_sub(delta);
        range.end = (range.end - delta).min(plain_text.len());
        if range.start < range.end {
            ranges.push(range);
        }
    }
    ranges
}

/// Extract link ranges: each `<a>`'s text is located in `plain_text` at or
/// after the previous match's end and recorded with its `href`.
pub fn extract_links(html: &str, plain_text: &str) -> Vec<LinkRange> {
    let mut anchors = Vec::new();
    for node in parse(html) {
        collect_anchors(&node, &mut anchors);
    }

    let mut links = Vec::new();
    let mut cursor = 0;
    for (text, href) in anchors {
        if text.is_empty() || cursor > plain_text.len() {
            continue;
        }
        if let Some(found) = plain_text[cursor..].find(&text) {
            let start = cursor + found;
            let end = start + text.len();
            links.push(LinkRange::new(start, end, href));
            cursor = end;
        }
    }
    links
}

fn collect_anchors(node: &HtmlNode, anchors: &mut Vec<(String, String)>) {
    if let HtmlNode::Element { tag, children, .. } = node {
        if tag == "a" {
            if let Some(href) = node.attr("href") {
                anchors.push((node.text_content(), href.to_string()));
            }
            return;
        }
        for child in children {
            collect_anchors(child, anchors);
        }
    }
}

/// Normalize a single block: replace rich-HTML content with plain text and
/// structured ranges. Blocks without content, or whose content carries no
/// HTML, pass through untouched.
pub fn normalize_block_content(block: &Block) -> Block {
    let Some(text_settings) = block.settings.rich_text() else {
        return block.clone();
    };
    let Some(content) = text_settings.content.as_deref() else {
        return block.clone();
    };
    if !has_html_tags(content) {
        return block.clone();
    }

    let plain = strip_html_tags(&convert_br_to_newlines(content));
    let emphasis = extract_emphasis(content, &plain);
    let links = extract_links(content, &plain);

    let mut normalized = block.clone();
    if let Some(settings) = normalized.settings.rich_text_mut() {
        settings.content = Some(plain);
        settings.emphasis = if emphasis.is_empty() {
            None
        } else {
            Some(emphasis)
        };
        settings.links = if links.is_empty() { None } else { Some(links) };
    }
    normalized
}

/// Normalize a whole tree, recursing through `columns` blocks.
pub fn normalize_all_blocks(blocks: &[Block]) -> Vec<Block> {
    blocks
        .iter()
        .map(|block| {
            if block.settings.columns().is_some() {
                let mut out = block.clone();
                if let Some(cols) = out.settings.columns_mut() {
                    for column in &mut cols.columns {
                        column.blocks = normalize_all_blocks(&column.blocks);
                    }
                }
                out
            } else {
                normalize_block_content(block)
            }
        })
        .collect()
}
