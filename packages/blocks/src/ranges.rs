use serde::{Deserialize, Serialize};

/// Inline formatting style carried by an emphasis range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmphasisStyle {
    Bold,
    Italic,
    Highlight,
}

/// A formatting range over a block's plain-text content.
///
/// `start`/`end` are byte offsets into the owning block's `content`;
/// `start < end <= content.len()`. `Highlight` carries the color it was
/// extracted with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmphasisRange {
    pub start: usize,
    pub end: usize,
    pub style: EmphasisStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl EmphasisRange {
    pub fn new(start: usize, end: usize, style: EmphasisStyle) -> Self {
        Self {
            start,
            end,
            style,
            color: None,
        }
    }

    pub fn highlight(start: usize, end: usize, color: impl Into<String>) -> Self {
        Self {
            start,
            end,
            style: EmphasisStyle::Highlight,
            color: Some(color.into()),
        }
    }
}

/// A hyperlink range over a block's plain-text content.
///
/// Same bounds contract as [`EmphasisRange`]; `url` is a relative path, an
/// anchor, or an absolute URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkRange {
    pub start: usize,
    pub end: usize,
    pub url: String,
}

impl LinkRange {
    pub fn new(start: usize, end: usize, url: impl Into<String>) -> Self {
        Self {
            start,
            end,
            url: url.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emphasis_serialization_shape() {
        let range = EmphasisRange::new(0, 5, EmphasisStyle::Bold);
        let json = serde_json::to_value(&range).unwrap();

        assert_eq!(json["style"], "bold");
        assert_eq!(json["start"], 0);
        assert_eq!(json["end"], 5);
        // No color key unless one is present
        assert!(json.get("color").is_none());
    }

    #[test]
    fn test_highlight_carries_color() {
        let range = EmphasisRange::highlight(2, 7, "#ffcc00");
        let json = serde_json::to_value(&range).unwrap();

        assert_eq!(json["style"], "highlight");
        assert_eq!(json["color"], "#ffcc00");
    }
}
