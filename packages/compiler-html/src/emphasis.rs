//! Range application: plain text + structured ranges → inline-formatted HTML.

use mailcraft_blocks::{EmphasisRange, EmphasisStyle, LinkRange};
use tracing::{debug, warn};

use crate::compiler::escape_html;

/// Byte offset into the escaped form of `content` that corresponds to a
/// byte offset into the plain text.
fn escaped_offset(content: &str, plain_offset: usize) -> usize {
    let mut escaped = 0;
    for (index, ch) in content.char_indices() {
        if index >= plain_offset {
            break;
        }
        escaped += match ch {
            '&' => 5,  // &amp;
            '<' | '>' => 4,  // &lt; &gt;
            '"' => 6,  // &quot;
            '\'' => 5, // &#39;
            _ => ch.len_utf8(),
        };
    }
    escaped
}

/// A pending tag insertion, in escaped-content coordinates.
struct TagInsert {
    pos: usize,
    /// Opens sort before closes at the same position.
    is_close: bool,
    /// Tie-break so overlapping ranges nest instead of interleaving:
    /// opens inner-first (ascending range end), closes outer-first
    /// (ascending range start). Later insertions at the same position land
    /// to the left of earlier ones.
    order: usize,
    text: String,
}

/// Escape the content, then splice emphasis tags in from the highest
/// position to the lowest so earlier insertions don't shift later offsets.
/// Overlapping ranges nest; out-of-bounds or inverted ranges are skipped.
pub fn apply_emphasis(content: &str, emphasis: &[EmphasisRange]) -> String {
    let mut html = escape_html(content);
    let mut inserts: Vec<TagInsert> = Vec::new();

    for range in emphasis {
        if range.start >= range.end || range.end > content.len() {
            warn!(
                start = range.start,
                end = range.end,
                "emphasis range out of bounds, skipping"
            );
            continue;
        }
        if !content.is_char_boundary(range.start) || !content.is_char_boundary(range.end) {
            warn!(
                start = range.start,
                end = range.end,
                "emphasis range splits a character, skipping"
            );
            continue;
        }

        let (open, close) = match range.style {
            EmphasisStyle::Bold => ("<strong>".to_string(), "</strong>"),
            EmphasisStyle::Italic => ("<em>".to_string(), "</em>"),
            EmphasisStyle::Highlight => {
                let Some(color) = range.color.as_deref() else {
                    warn!(
                        start = range.start,
                        end = range.end,
                        "highlight range has no color, skipping"
                    );
                    continue;
                };
                (
                    format!("<span style=\"color: {}\">", escape_html(color)),
                    "</span>",
                )
            }
        };

        inserts.push(TagInsert {
            pos: escaped_offset(content, range.start),
            is_close: false,
            order: range.end,
            text: open,
        });
        inserts.push(TagInsert {
            pos: escaped_offset(content, range.end),
            is_close: true,
            order: range.start,
            text: close.to_string(),
        });
    }

    inserts.sort_by(|a, b| {
        b.pos
            .cmp(&a.pos)
            .then(a.is_close.cmp(&b.is_close))
            .then(a.order.cmp(&b.order))
    });

    for insert in inserts {
        html.insert_str(insert.pos, &insert.text);
    }

    html
}

/// Wrap link ranges around their text in emphasis-applied HTML.
///
/// This is a best-effort textual substitution: the escaped form of each
/// linked substring is located in the HTML (searching from where the
/// escaped offsets predict it, then from the top) and its first occurrence
/// wrapped. A range whose text was split apart by emphasis tags degrades to
/// unlinked text.
pub fn apply_links(html: &str, links: &[LinkRange], original_content: &str) -> String {
    let mut html = html.to_string();

    let mut ordered: Vec<&LinkRange> = links.iter().collect();
    ordered.sort_by(|a, b| b.start.cmp(&a.start));

    for link in ordered {
        if link.start >= link.end
            || link.end > original_content.len()
            || !original_content.is_char_boundary(link.start)
            || !original_content.is_char_boundary(link.end)
        {
            warn!(
                start = link.start,
                end = link.end,
                "link range out of bounds, skipping"
            );
            continue;
        }

        let needle = escape_html(&original_content[link.start..link.end]);

        // Emphasis insertions only push text rightward, so the escaped
        // offset is a lower bound for where the text can sit. Inserted tags
        // shift positions, so walk back to a char boundary before slicing.
        let mut floor = escaped_offset(original_content, link.start).min(html.len());
        while !html.is_char_boundary(floor) {
            floor -= 1;
        }
        let found = html[floor..]
            .find(&needle)
            .map(|at| floor + at)
            .or_else(|| html.find(&needle));

        let Some(at) = found else {
            debug!(
                url = %link.url,
                "link text not found in rendered html, leaving unlinked"
            );
            continue;
        };

        let anchor_open = format!("<a href=\"{}\">", escape_html(&link.url));
        html.insert_str(at + needle.len(), "</a>");
        html.insert_str(at, &anchor_open);
    }

    html
}
