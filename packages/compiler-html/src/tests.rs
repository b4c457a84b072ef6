use crate::{apply_emphasis, export_to_html, generate_email_html, render_block_to_html};
use mailcraft_blocks::{
    Block, BlockSettings, ButtonSettings, Campaign, CampaignStatus, Column, ColumnsSettings,
    Design, EmphasisRange, EmphasisStyle, HtmlSettings, RichTextSettings, SpacerSettings,
};
use mailcraft_parser::{extract_emphasis, normalize_block_content, strip_html_tags};

fn text_block(id: &str, content: &str) -> Block {
    Block::new(
        id,
        BlockSettings::Text(RichTextSettings {
            content: Some(content.to_string()),
            ..Default::default()
        }),
    )
}

#[test]
fn test_render_text_block_with_emphasis() {
    let block = Block::new(
        "t-1",
        BlockSettings::Text(RichTextSettings {
            content: Some("Hello world".to_string()),
            emphasis: Some(vec![EmphasisRange::new(0, 5, EmphasisStyle::Bold)]),
            color: Some("#333333".to_string()),
            ..Default::default()
        }),
    );

    let html = render_block_to_html(&block);

    assert!(html.contains("<strong>Hello</strong> world"));
    assert!(html.contains("color: #333333"));
    assert!(html.contains("font-size: 16px"));
}

#[test]
fn test_absent_settings_omit_style_declarations() {
    let html = render_block_to_html(&text_block("t-1", "plain"));

    // Only the font-size default appears; nothing else was set.
    assert!(html.contains("font-size: 16px"));
    assert!(!html.contains("padding"));
    assert!(!html.contains("background-color"));
    assert!(!html.contains("text-align"));
}

#[test]
fn test_render_button_block() {
    let block = Block::new(
        "b-1",
        BlockSettings::Button(ButtonSettings {
            label: Some("Shop now".to_string()),
            url: Some("https://example.com/shop".to_string()),
            background_color: Some("#3366FF".to_string()),
            color: Some("#ffffff".to_string()),
            align: Some("center".to_string()),
            ..Default::default()
        }),
    );

    let html = render_block_to_html(&block);

    assert!(html.contains("href=\"https://example.com/shop\""));
    assert!(html.contains("Shop now"));
    assert!(html.contains("background-color: #3366FF"));
    assert!(html.contains("text-align: center"));
    assert!(html.contains("text-decoration: none"));
}

#[test]
fn test_render_spacer_is_a_fixed_height_div() {
    let block = Block::new(
        "s-1",
        BlockSettings::Spacer(SpacerSettings {
            height: Some("40px".to_string()),
        }),
    );

    assert_eq!(
        render_block_to_html(&block),
        "<div style=\"height: 40px\"></div>"
    );
}

#[test]
fn test_html_block_passes_markup_through_untouched() {
    let raw = "<table><tr><td>custom</td></tr></table>";
    let block = Block::new(
        "h-1",
        BlockSettings::Html(HtmlSettings {
            html: Some(raw.to_string()),
        }),
    );

    assert_eq!(render_block_to_html(&block), raw);
}

#[test]
fn test_columns_render_as_table_cells() {
    let mut left = Column::new("col-1");
    left.blocks.push(text_block("t-1", "left side"));
    let mut right = Column::new("col-2");
    right.blocks.push(text_block("t-2", "right side"));

    let block = Block::new(
        "c-1",
        BlockSettings::Columns(ColumnsSettings {
            columns: vec![left, right],
            column_count: 2,
            layout: vec![66.0, 34.0],
            gap: Some("16px".to_string()),
            padding: None,
            background_color: None,
        }),
    );

    let html = render_block_to_html(&block);

    assert!(html.starts_with("<table role=\"presentation\""));
    assert!(html.contains("width: 66%"));
    assert!(html.contains("width: 34%"));
    assert!(html.contains("left side"));
    assert!(html.contains("right side"));
    // The gap pads every cell but the last.
    assert_eq!(html.matches("padding-right: 16px").count(), 1);
}

#[test]
fn test_export_skips_empty_fragments() {
    let blocks = vec![
        text_block("t-1", "one"),
        // No src: renders to nothing.
        Block::new("i-1", BlockSettings::Image(Default::default())),
        text_block("t-2", "two"),
    ];

    let html = export_to_html(&blocks);
    assert_eq!(html.lines().count(), 2);
}

#[test]
fn test_generate_email_html_document_shape() {
    let campaign = Campaign {
        id: "cmp-1".to_string(),
        name: "Launch".to_string(),
        subject: Some("Big <news>".to_string()),
        status: CampaignStatus::Draft,
        blocks: vec![text_block("t-1", "Hello")],
        design: Design::default(),
        content: None,
        last_saved: None,
    };

    let html = generate_email_html(&campaign);

    assert!(html.contains("<!DOCTYPE html>"));
    assert!(html.contains("<meta charset=\"UTF-8\">"));
    assert!(html.contains("<title>Big &lt;news&gt;</title>"));
    assert!(html.contains("max-width: 600px"));
    assert!(html.contains("Hello"));
}

#[test]
fn test_emphasis_round_trip_through_normalizer() {
    let content = "Hello world";
    let ranges = vec![EmphasisRange::new(0, 5, EmphasisStyle::Bold)];

    let html = apply_emphasis(content, &ranges);
    assert!(html.contains("<strong>Hello</strong> world"));

    let plain = strip_html_tags(&html);
    assert_eq!(plain, content);

    let recovered = extract_emphasis(&html, &plain);
    assert_eq!(recovered.len(), 1);
    assert_eq!(recovered[0].start, 0);
    assert_eq!(recovered[0].end, 5);
    assert_eq!(recovered[0].style, EmphasisStyle::Bold);
}

#[test]
fn test_rendered_block_normalizes_back_to_itself() {
    let block = Block::new(
        "t-1",
        BlockSettings::Text(RichTextSettings {
            content: Some("Line one\nwith a bold end".to_string()),
            emphasis: Some(vec![EmphasisRange::new(16, 24, EmphasisStyle::Bold)]),
            ..Default::default()
        }),
    );

    // Extract the inner fragment the way an import would see it: strip the
    // wrapping div by normalizing the whole rendered content.
    let rendered = render_block_to_html(&block);
    let reimported = Block::new(
        "t-2",
        BlockSettings::Text(RichTextSettings {
            content: Some(rendered),
            ..Default::default()
        }),
    );
    let normalized = normalize_block_content(&reimported);

    let settings = normalized.settings.rich_text().unwrap();
    assert_eq!(settings.content.as_deref(), Some("Line one\nwith a bold end"));
    let emphasis = settings.emphasis.as_ref().unwrap();
    assert_eq!(emphasis.len(), 1);
    assert_eq!((emphasis[0].start, emphasis[0].end), (16, 24));
    assert_eq!(emphasis[0].style, EmphasisStyle::Bold);
}
