//! Typed per-kind block settings.
//!
//! The wire format is `{ "type": "...", "settings": { ... } }`, which the
//! adjacently-tagged [`BlockSettings`] enum maps onto directly. Every style
//! field is optional; absent fields are omitted from serialization and fall
//! back to renderer defaults on export.

use serde::{Deserialize, Serialize};

use crate::block::{BlockKind, Column};
use crate::id_generator::IdGenerator;
use crate::ranges::{EmphasisRange, LinkRange};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "settings", rename_all = "lowercase")]
pub enum BlockSettings {
    Title(RichTextSettings),
    Text(RichTextSettings),
    Image(ImageSettings),
    Video(VideoSettings),
    Button(ButtonSettings),
    Logo(ImageSettings),
    Social(SocialSettings),
    Html(HtmlSettings),
    Payment(PaymentSettings),
    Divider(DividerSettings),
    Product(ProductSettings),
    Navigation(NavigationSettings),
    Spacer(SpacerSettings),
    Columns(ColumnsSettings),
}

/// Settings for `title` and `text` blocks: plain-text content plus the
/// structured formatting ranges the normalizer extracts from rich HTML.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RichTextSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emphasis: Option<Vec<EmphasisRange>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<LinkRange>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_height: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
}

/// Settings for `image` and `logo` blocks.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VideoSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ButtonSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_width: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialNetwork {
    pub network: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub icon_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SocialSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub networks: Option<Vec<SocialNetwork>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_spacing: Option<String>,
}

/// Raw HTML passthrough block. The exporter emits `html` untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HtmlSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaymentSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DividerSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thickness: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavItem {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NavigationSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<NavItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_spacing: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpacerSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
}

/// The only container kind. `layout` holds percentage widths; the invariant
/// `layout.len() == column_count == columns.len()` is checked by the linter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnsSettings {
    pub columns: Vec<Column>,
    pub column_count: usize,
    pub layout: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub gap: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub padding: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub background_color: Option<String>,
}

/// Overwrite `dst` only when the patch carries a value.
fn patch_field<T>(dst: &mut Option<T>, src: Option<T>) {
    if src.is_some() {
        *dst = src;
    }
}

impl BlockSettings {
    pub fn kind(&self) -> BlockKind {
        match self {
            BlockSettings::Title(_) => BlockKind::Title,
            BlockSettings::Text(_) => BlockKind::Text,
            BlockSettings::Image(_) => BlockKind::Image,
            BlockSettings::Video(_) => BlockKind::Video,
            BlockSettings::Button(_) => BlockKind::Button,
            BlockSettings::Logo(_) => BlockKind::Logo,
            BlockSettings::Social(_) => BlockKind::Social,
            BlockSettings::Html(_) => BlockKind::Html,
            BlockSettings::Payment(_) => BlockKind::Payment,
            BlockSettings::Divider(_) => BlockKind::Divider,
            BlockSettings::Product(_) => BlockKind::Product,
            BlockSettings::Navigation(_) => BlockKind::Navigation,
            BlockSettings::Spacer(_) => BlockKind::Spacer,
            BlockSettings::Columns(_) => BlockKind::Columns,
        }
    }

    /// Palette defaults for a freshly added block. Columns draw fresh ids
    /// for their two starter columns from the document's generator.
    pub fn default_for(kind: BlockKind, ids: &mut IdGenerator) -> Self {
        match kind {
            BlockKind::Title => BlockSettings::Title(RichTextSettings {
                content: Some("Add your title".to_string()),
                font_size: Some("28px".to_string()),
                text_align: Some("center".to_string()),
                ..Default::default()
            }),
            BlockKind::Text => BlockSettings::Text(RichTextSettings {
                content: Some("Write your text here".to_string()),
                font_size: Some("16px".to_string()),
                line_height: Some("1.5".to_string()),
                ..Default::default()
            }),
            BlockKind::Image => BlockSettings::Image(ImageSettings {
                width: Some("100%".to_string()),
                align: Some("center".to_string()),
                ..Default::default()
            }),
            BlockKind::Video => BlockSettings::Video(VideoSettings {
                align: Some("center".to_string()),
                width: Some("100%".to_string()),
                ..Default::default()
            }),
            BlockKind::Button => BlockSettings::Button(ButtonSettings {
                label: Some("Click me".to_string()),
                url: Some("#".to_string()),
                background_color: Some("#3366FF".to_string()),
                color: Some("#ffffff".to_string()),
                border_radius: Some("4px".to_string()),
                padding: Some("12px 24px".to_string()),
                align: Some("center".to_string()),
                ..Default::default()
            }),
            BlockKind::Logo => BlockSettings::Logo(ImageSettings {
                width: Some("120px".to_string()),
                align: Some("center".to_string()),
                ..Default::default()
            }),
            BlockKind::Social => BlockSettings::Social(SocialSettings {
                icon_size: Some("24px".to_string()),
                icon_spacing: Some("8px".to_string()),
                align: Some("center".to_string()),
                ..Default::default()
            }),
            BlockKind::Html => BlockSettings::Html(HtmlSettings::default()),
            BlockKind::Payment => BlockSettings::Payment(PaymentSettings {
                button_label: Some("Pay now".to_string()),
                currency: Some("USD".to_string()),
                align: Some("center".to_string()),
                ..Default::default()
            }),
            BlockKind::Divider => BlockSettings::Divider(DividerSettings {
                color: Some("#e0e0e0".to_string()),
                thickness: Some("1px".to_string()),
                style: Some("solid".to_string()),
                padding: Some("16px 0".to_string()),
                ..Default::default()
            }),
            BlockKind::Product => BlockSettings::Product(ProductSettings {
                button_label: Some("Buy now".to_string()),
                align: Some("center".to_string()),
                ..Default::default()
            }),
            BlockKind::Navigation => BlockSettings::Navigation(NavigationSettings {
                font_size: Some("14px".to_string()),
                item_spacing: Some("16px".to_string()),
                align: Some("center".to_string()),
                ..Default::default()
            }),
            BlockKind::Spacer => BlockSettings::Spacer(SpacerSettings {
                height: Some("32px".to_string()),
            }),
            BlockKind::Columns => BlockSettings::Columns(ColumnsSettings {
                columns: vec![Column::new(ids.new_id()), Column::new(ids.new_id())],
                column_count: 2,
                layout: vec![50.0, 50.0],
                gap: Some("16px".to_string()),
                padding: None,
                background_color: None,
            }),
        }
    }

    /// Shallow-merge a same-kind patch into these settings. Fields the patch
    /// carries overwrite; absent fields are left alone. Returns false (and
    /// changes nothing) when the patch is for a different kind.
    pub fn merge(&mut self, patch: BlockSettings) -> bool {
        match (self, patch) {
            (BlockSettings::Title(s), BlockSettings::Title(p))
            | (BlockSettings::Text(s), BlockSettings::Text(p)) => {
                patch_field(&mut s.content, p.content);
                patch_field(&mut s.emphasis, p.emphasis);
                patch_field(&mut s.links, p.links);
                patch_field(&mut s.font_size, p.font_size);
                patch_field(&mut s.font_family, p.font_family);
                patch_field(&mut s.color, p.color);
                patch_field(&mut s.text_align, p.text_align);
                patch_field(&mut s.line_height, p.line_height);
                patch_field(&mut s.padding, p.padding);
                patch_field(&mut s.background_color, p.background_color);
                true
            }
            (BlockSettings::Image(s), BlockSettings::Image(p))
            | (BlockSettings::Logo(s), BlockSettings::Logo(p)) => {
                patch_field(&mut s.src, p.src);
                patch_field(&mut s.alt, p.alt);
                patch_field(&mut s.width, p.width);
                patch_field(&mut s.align, p.align);
                patch_field(&mut s.padding, p.padding);
                patch_field(&mut s.link_url, p.link_url);
                true
            }
            (BlockSettings::Video(s), BlockSettings::Video(p)) => {
                patch_field(&mut s.video_url, p.video_url);
                patch_field(&mut s.thumbnail_url, p.thumbnail_url);
                patch_field(&mut s.alt, p.alt);
                patch_field(&mut s.width, p.width);
                patch_field(&mut s.align, p.align);
                patch_field(&mut s.padding, p.padding);
                true
            }
            (BlockSettings::Button(s), BlockSettings::Button(p)) => {
                patch_field(&mut s.label, p.label);
                patch_field(&mut s.url, p.url);
                patch_field(&mut s.background_color, p.background_color);
                patch_field(&mut s.color, p.color);
                patch_field(&mut s.font_size, p.font_size);
                patch_field(&mut s.border_radius, p.border_radius);
                patch_field(&mut s.padding, p.padding);
                patch_field(&mut s.align, p.align);
                patch_field(&mut s.full_width, p.full_width);
                true
            }
            (BlockSettings::Social(s), BlockSettings::Social(p)) => {
                patch_field(&mut s.networks, p.networks);
                patch_field(&mut s.icon_size, p.icon_size);
                patch_field(&mut s.align, p.align);
                patch_field(&mut s.padding, p.padding);
                patch_field(&mut s.icon_spacing, p.icon_spacing);
                true
            }
            (BlockSettings::Html(s), BlockSettings::Html(p)) => {
                patch_field(&mut s.html, p.html);
                true
            }
            (BlockSettings::Payment(s), BlockSettings::Payment(p)) => {
                patch_field(&mut s.title, p.title);
                patch_field(&mut s.description, p.description);
                patch_field(&mut s.amount, p.amount);
                patch_field(&mut s.currency, p.currency);
                patch_field(&mut s.button_label, p.button_label);
                patch_field(&mut s.url, p.url);
                patch_field(&mut s.background_color, p.background_color);
                patch_field(&mut s.color, p.color);
                patch_field(&mut s.align, p.align);
                patch_field(&mut s.padding, p.padding);
                true
            }
            (BlockSettings::Divider(s), BlockSettings::Divider(p)) => {
                patch_field(&mut s.color, p.color);
                patch_field(&mut s.thickness, p.thickness);
                patch_field(&mut s.style, p.style);
                patch_field(&mut s.padding, p.padding);
                patch_field(&mut s.width, p.width);
                true
            }
            (BlockSettings::Product(s), BlockSettings::Product(p)) => {
                patch_field(&mut s.name, p.name);
                patch_field(&mut s.description, p.description);
                patch_field(&mut s.image_url, p.image_url);
                patch_field(&mut s.price, p.price);
                patch_field(&mut s.url, p.url);
                patch_field(&mut s.button_label, p.button_label);
                patch_field(&mut s.align, p.align);
                patch_field(&mut s.padding, p.padding);
                patch_field(&mut s.background_color, p.background_color);
                true
            }
            (BlockSettings::Navigation(s), BlockSettings::Navigation(p)) => {
                patch_field(&mut s.items, p.items);
                patch_field(&mut s.font_size, p.font_size);
                patch_field(&mut s.color, p.color);
                patch_field(&mut s.align, p.align);
                patch_field(&mut s.padding, p.padding);
                patch_field(&mut s.item_spacing, p.item_spacing);
                true
            }
            (BlockSettings::Spacer(s), BlockSettings::Spacer(p)) => {
                patch_field(&mut s.height, p.height);
                true
            }
            (BlockSettings::Columns(s), BlockSettings::Columns(p)) => {
                // Structural fields travel together; a columns patch always
                // carries the full column set.
                s.columns = p.columns;
                s.column_count = p.column_count;
                s.layout = p.layout;
                patch_field(&mut s.gap, p.gap);
                patch_field(&mut s.padding, p.padding);
                patch_field(&mut s.background_color, p.background_color);
                true
            }
            _ => false,
        }
    }

    /// Rich-text view of these settings, for kinds that carry content.
    pub fn rich_text(&self) -> Option<&RichTextSettings> {
        match self {
            BlockSettings::Title(s) | BlockSettings::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn rich_text_mut(&mut self) -> Option<&mut RichTextSettings> {
        match self {
            BlockSettings::Title(s) | BlockSettings::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn columns(&self) -> Option<&ColumnsSettings> {
        match self {
            BlockSettings::Columns(s) => Some(s),
            _ => None,
        }
    }

    pub fn columns_mut(&mut self) -> Option<&mut ColumnsSettings> {
        match self {
            BlockSettings::Columns(s) => Some(s),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_shape_is_type_plus_settings() {
        let settings = BlockSettings::Button(ButtonSettings {
            label: Some("Go".to_string()),
            ..Default::default()
        });
        let json = serde_json::to_value(&settings).unwrap();

        assert_eq!(json["type"], "button");
        assert_eq!(json["settings"]["label"], "Go");
        // Absent fields are omitted entirely
        assert!(json["settings"].get("url").is_none());
    }

    #[test]
    fn test_merge_overwrites_only_carried_fields() {
        let mut settings = BlockSettings::Text(RichTextSettings {
            content: Some("Hello".to_string()),
            font_size: Some("16px".to_string()),
            ..Default::default()
        });

        let changed = settings.merge(BlockSettings::Text(RichTextSettings {
            color: Some("#333333".to_string()),
            ..Default::default()
        }));
        assert!(changed);

        let text = settings.rich_text().unwrap();
        assert_eq!(text.content.as_deref(), Some("Hello"));
        assert_eq!(text.font_size.as_deref(), Some("16px"));
        assert_eq!(text.color.as_deref(), Some("#333333"));
    }

    #[test]
    fn test_merge_rejects_kind_mismatch() {
        let mut settings = BlockSettings::Text(RichTextSettings::default());
        let before = settings.clone();

        let changed = settings.merge(BlockSettings::Spacer(SpacerSettings::default()));
        assert!(!changed);
        assert_eq!(settings, before);
    }

    #[test]
    fn test_merge_is_idempotent() {
        let mut settings = BlockSettings::Text(RichTextSettings::default());
        let patch = BlockSettings::Text(RichTextSettings {
            content: Some("Twice".to_string()),
            ..Default::default()
        });

        settings.merge(patch.clone());
        let once = settings.clone();
        settings.merge(patch);

        assert_eq!(settings, once);
    }

    #[test]
    fn test_default_columns_have_distinct_ids() {
        let mut ids = IdGenerator::from_seed("test".to_string());
        let settings = BlockSettings::default_for(BlockKind::Columns, &mut ids);

        let cols = settings.columns().unwrap();
        assert_eq!(cols.columns.len(), 2);
        assert_eq!(cols.column_count, 2);
        assert_eq!(cols.layout.len(), 2);
        assert_ne!(cols.columns[0].id, cols.columns[1].id);
    }
}
