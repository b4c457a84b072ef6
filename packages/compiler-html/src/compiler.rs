use mailcraft_blocks::{
    Block, BlockSettings, ButtonSettings, Campaign, ColumnsSettings, DividerSettings,
    HtmlSettings, ImageSettings, NavigationSettings, PaymentSettings, ProductSettings,
    RichTextSettings, SocialSettings, SpacerSettings, VideoSettings,
};

use crate::emphasis::{apply_emphasis, apply_links};

/// Options for HTML document generation
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Pretty print the document scaffold
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: "  ".to_string(),
        }
    }
}

struct Context {
    options: CompileOptions,
    depth: usize,
    buffer: String,
}

impl Context {
    fn new(options: CompileOptions) -> Self {
        Self {
            options,
            depth: 0,
            buffer: String::new(),
        }
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn add_line(&mut self, text: &str) {
        if self.options.pretty {
            self.add_indent();
        }
        self.add(text);
        if self.options.pretty {
            self.add("\n");
        }
    }

    fn add_indent(&mut self) {
        let indent = self.options.indent.clone();
        for _ in 0..self.depth {
            self.add(&indent);
        }
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    fn get_output(self) -> String {
        self.buffer
    }
}

pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Inline style attribute builder. Absent or empty values are omitted from
/// the built string; an all-empty style emits no attribute at all.
#[derive(Default)]
struct InlineStyle {
    declarations: Vec<String>,
}

impl InlineStyle {
    fn new() -> Self {
        Self::default()
    }

    fn set(mut self, property: &str, value: &str) -> Self {
        self.declarations.push(format!("{}: {}", property, value));
        self
    }

    fn maybe(self, property: &str, value: Option<&str>) -> Self {
        match value {
            Some(value) if !value.is_empty() => self.set(property, value),
            _ => self,
        }
    }

    fn attr(self) -> String {
        if self.declarations.is_empty() {
            String::new()
        } else {
            format!(" style=\"{}\"", escape_html(&self.declarations.join("; ")))
        }
    }
}

fn render_rich_text(settings: &RichTextSettings, default_font_size: &str, bold: bool) -> String {
    let content = settings.content.as_deref().unwrap_or("");
    let emphasis = settings.emphasis.as_deref().unwrap_or(&[]);
    let links = settings.links.as_deref().unwrap_or(&[]);

    let html = apply_emphasis(content, emphasis);
    let html = apply_links(&html, links, content);
    let html = html.replace('\n', "<br>");

    let mut style = InlineStyle::new().set(
        "font-size",
        settings.font_size.as_deref().unwrap_or(default_font_size),
    );
    if bold {
        style = style.set("font-weight", "bold");
    }
    let style = style
        .maybe("font-family", settings.font_family.as_deref())
        .maybe("color", settings.color.as_deref())
        .maybe("text-align", settings.text_align.as_deref())
        .maybe("line-height", settings.line_height.as_deref())
        .maybe("padding", settings.padding.as_deref())
        .maybe("background-color", settings.background_color.as_deref());

    format!("<div{}>{}</div>", style.attr(), html)
}

fn render_title_block(settings: &RichTextSettings) -> String {
    render_rich_text(settings, "28px", true)
}

fn render_text_block(settings: &RichTextSettings) -> String {
    render_rich_text(settings, "16px", false)
}

fn render_button_block(settings: &ButtonSettings) -> String {
    let display = if settings.full_width == Some(true) {
        "block"
    } else {
        "inline-block"
    };

    let link_style = InlineStyle::new()
        .set("display", display)
        .set("text-decoration", "none")
        .maybe("background-color", settings.background_color.as_deref())
        .maybe("color", settings.color.as_deref())
        .maybe("font-size", settings.font_size.as_deref())
        .maybe("border-radius", settings.border_radius.as_deref())
        .maybe("padding", settings.padding.as_deref());

    let outer = InlineStyle::new().maybe("text-align", settings.align.as_deref());

    format!(
        "<div{}><a href=\"{}\"{}>{}</a></div>",
        outer.attr(),
        escape_html(settings.url.as_deref().unwrap_or("#")),
        link_style.attr(),
        escape_html(settings.label.as_deref().unwrap_or(""))
    )
}

fn render_image_like(settings: &ImageSettings, default_alt: &str) -> String {
    let Some(src) = settings.src.as_deref().filter(|src| !src.is_empty()) else {
        return String::new();
    };

    let img_style = InlineStyle::new()
        .set("max-width", "100%")
        .set("border", "0")
        .maybe("width", settings.width.as_deref());

    let img = format!(
        "<img src=\"{}\" alt=\"{}\"{} />",
        escape_html(src),
        escape_html(settings.alt.as_deref().unwrap_or(default_alt)),
        img_style.attr()
    );

    let body = match settings.link_url.as_deref().filter(|url| !url.is_empty()) {
        Some(url) => format!("<a href=\"{}\">{}</a>", escape_html(url), img),
        None => img,
    };

    let outer = InlineStyle::new()
        .maybe("text-align", settings.align.as_deref())
        .maybe("padding", settings.padding.as_deref());

    format!("<div{}>{}</div>", outer.attr(), body)
}

fn render_image_block(settings: &ImageSettings) -> String {
    render_image_like(settings, "")
}

fn render_logo_block(settings: &ImageSettings) -> String {
    render_image_like(settings, "Logo")
}

// Mail clients can't be trusted with <video>; render the thumbnail as an
// image linking out to the video.
fn render_video_block(settings: &VideoSettings) -> String {
    let Some(thumbnail) = settings
        .thumbnail_url
        .as_deref()
        .filter(|url| !url.is_empty())
    else {
        return String::new();
    };

    let img_style = InlineStyle::new()
        .set("max-width", "100%")
        .set("border", "0")
        .maybe("width", settings.width.as_deref());

    let img = format!(
        "<img src=\"{}\" alt=\"{}\"{} />",
        escape_html(thumbnail),
        escape_html(settings.alt.as_deref().unwrap_or("Play video")),
        img_style.attr()
    );

    let body = match settings.video_url.as_deref().filter(|url| !url.is_empty()) {
        Some(url) => format!("<a href=\"{}\">{}</a>", escape_html(url), img),
        None => img,
    };

    let outer = InlineStyle::new()
        .maybe("text-align", settings.align.as_deref())
        .maybe("padding", settings.padding.as_deref());

    format!("<div{}>{}</div>", outer.attr(), body)
}

fn render_divider_block(settings: &DividerSettings) -> String {
    let border = format!(
        "{} {} {}",
        settings.thickness.as_deref().unwrap_or("1px"),
        settings.style.as_deref().unwrap_or("solid"),
        settings.color.as_deref().unwrap_or("#e0e0e0")
    );

    let hr_style = InlineStyle::new()
        .set("border", "none")
        .set("border-top", &border)
        .set("margin", "0 auto")
        .maybe("width", settings.width.as_deref());

    let outer = InlineStyle::new().maybe("padding", settings.padding.as_deref());

    format!("<div{}><hr{} /></div>", outer.attr(), hr_style.attr())
}

fn render_spacer_block(settings: &SpacerSettings) -> String {
    format!(
        "<div style=\"height: {}\"></div>",
        escape_html(settings.height.as_deref().unwrap_or("16px"))
    )
}

fn render_social_block(settings: &SocialSettings) -> String {
    let networks = settings.networks.as_deref().unwrap_or(&[]);
    if networks.is_empty() {
        return String::new();
    }

    let spacing = settings.icon_spacing.as_deref().unwrap_or("8px");
    let size = settings.icon_size.as_deref().unwrap_or("24px");

    let mut items = String::new();
    for network in networks {
        let inner = match network.icon_url.as_deref().filter(|url| !url.is_empty()) {
            Some(icon) => format!(
                "<img src=\"{}\" alt=\"{}\" width=\"{}\" style=\"border: 0\" />",
                escape_html(icon),
                escape_html(&network.network),
                escape_html(size.trim_end_matches("px"))
            ),
            None => escape_html(&network.network),
        };
        items.push_str(&format!(
            "<a href=\"{}\" style=\"display: inline-block; margin: 0 {}; text-decoration: none\">{}</a>",
            escape_html(&network.url),
            escape_html(spacing),
            inner
        ));
    }

    let outer = InlineStyle::new()
        .maybe("text-align", settings.align.as_deref())
        .maybe("padding", settings.padding.as_deref());

    format!("<div{}>{}</div>", outer.attr(), items)
}

fn render_product_block(settings: &ProductSettings) -> String {
    let mut body = String::new();

    if let Some(image) = settings.image_url.as_deref().filter(|url| !url.is_empty()) {
        body.push_str(&format!(
            "<img src=\"{}\" alt=\"{}\" style=\"max-width: 100%; border: 0\" />",
            escape_html(image),
            escape_html(settings.name.as_deref().unwrap_or(""))
        ));
    }
    if let Some(name) = settings.name.as_deref() {
        body.push_str(&format!(
            "<div style=\"font-weight: bold; font-size: 18px\">{}</div>",
            escape_html(name)
        ));
    }
    if let Some(description) = settings.description.as_deref() {
        body.push_str(&format!("<div>{}</div>", escape_html(description)));
    }
    if let Some(price) = settings.price.as_deref() {
        body.push_str(&format!(
            "<div style=\"font-weight: bold\">{}</div>",
            escape_html(price)
        ));
    }
    if let Some(url) = settings.url.as_deref().filter(|url| !url.is_empty()) {
        body.push_str(&format!(
            "<a href=\"{}\" style=\"display: inline-block; text-decoration: none\">{}</a>",
            escape_html(url),
            escape_html(settings.button_label.as_deref().unwrap_or("View product"))
        ));
    }

    let outer = InlineStyle::new()
        .maybe("text-align", settings.align.as_deref())
        .maybe("padding", settings.padding.as_deref())
        .maybe("background-color", settings.background_color.as_deref());

    format!("<div{}>{}</div>", outer.attr(), body)
}

fn render_navigation_block(settings: &NavigationSettings) -> String {
    let items = settings.items.as_deref().unwrap_or(&[]);
    if items.is_empty() {
        return String::new();
    }

    let link_style = InlineStyle::new()
        .set("text-decoration", "none")
        .set(
            "margin",
            &format!("0 {}", settings.item_spacing.as_deref().unwrap_or("8px")),
        )
        .maybe("color", settings.color.as_deref())
        .maybe("font-size", settings.font_size.as_deref())
        .attr();

    let mut body = String::new();
    for item in items {
        body.push_str(&format!(
            "<a href=\"{}\"{}>{}</a>",
            escape_html(&item.url),
            link_style,
            escape_html(&item.label)
        ));
    }

    let outer = InlineStyle::new()
        .maybe("text-align", settings.align.as_deref())
        .maybe("padding", settings.padding.as_deref());

    format!("<div{}>{}</div>", outer.attr(), body)
}

fn render_payment_block(settings: &PaymentSettings) -> String {
    let mut body = String::new();

    if let Some(title) = settings.title.as_deref() {
        body.push_str(&format!(
            "<div style=\"font-weight: bold; font-size: 18px\">{}</div>",
            escape_html(title)
        ));
    }
    if let Some(description) = settings.description.as_deref() {
        body.push_str(&format!("<div>{}</div>", escape_html(description)));
    }
    if let Some(amount) = settings.amount.as_deref() {
        body.push_str(&format!(
            "<div style=\"font-size: 24px; font-weight: bold\">{} {}</div>",
            escape_html(amount),
            escape_html(settings.currency.as_deref().unwrap_or(""))
        ));
    }
    if let Some(url) = settings.url.as_deref().filter(|url| !url.is_empty()) {
        let button_style = InlineStyle::new()
            .set("display", "inline-block")
            .set("text-decoration", "none")
            .maybe("background-color", settings.background_color.as_deref())
            .maybe("color", settings.color.as_deref());
        body.push_str(&format!(
            "<a href=\"{}\"{}>{}</a>",
            escape_html(url),
            button_style.attr(),
            escape_html(settings.button_label.as_deref().unwrap_or("Pay now"))
        ));
    }

    let outer = InlineStyle::new()
        .maybe("text-align", settings.align.as_deref())
        .maybe("padding", settings.padding.as_deref());

    format!("<div{}>{}</div>", outer.attr(), body)
}

// Raw passthrough; authors own this markup.
fn render_html_block(settings: &HtmlSettings) -> String {
    settings.html.clone().unwrap_or_default()
}

// Table-based layout is the only column mechanism mail clients agree on.
fn render_columns_block(settings: &ColumnsSettings) -> String {
    let table_style = InlineStyle::new()
        .set("border-collapse", "collapse")
        .set("width", "100%")
        .maybe("background-color", settings.background_color.as_deref())
        .maybe("padding", settings.padding.as_deref());

    let mut cells = String::new();
    for (index, column) in settings.columns.iter().enumerate() {
        let width = settings
            .layout
            .get(index)
            .map(|width| format!("{}%", width))
            .unwrap_or_else(|| "auto".to_string());

        let mut cell_style = InlineStyle::new()
            .set("vertical-align", "top")
            .set("width", &width);
        if index + 1 < settings.columns.len() {
            cell_style = cell_style.maybe("padding-right", settings.gap.as_deref());
        }

        let mut inner = String::new();
        for block in &column.blocks {
            inner.push_str(&render_block_to_html(block));
        }

        cells.push_str(&format!("<td{}>{}</td>", cell_style.attr(), inner));
    }

    format!(
        "<table role=\"presentation\" cellpadding=\"0\" cellspacing=\"0\"{}><tr>{}</tr></table>",
        table_style.attr(),
        cells
    )
}

/// Render one block to an inline-styled HTML fragment.
pub fn render_block_to_html(block: &Block) -> String {
    match &block.settings {
        BlockSettings::Title(settings) => render_title_block(settings),
        BlockSettings::Text(settings) => render_text_block(settings),
        BlockSettings::Image(settings) => render_image_block(settings),
        BlockSettings::Video(settings) => render_video_block(settings),
        BlockSettings::Button(settings) => render_button_block(settings),
        BlockSettings::Logo(settings) => render_logo_block(settings),
        BlockSettings::Social(settings) => render_social_block(settings),
        BlockSettings::Html(settings) => render_html_block(settings),
        BlockSettings::Payment(settings) => render_payment_block(settings),
        BlockSettings::Divider(settings) => render_divider_block(settings),
        BlockSettings::Product(settings) => render_product_block(settings),
        BlockSettings::Navigation(settings) => render_navigation_block(settings),
        BlockSettings::Spacer(settings) => render_spacer_block(settings),
        BlockSettings::Columns(settings) => render_columns_block(settings),
    }
}

/// Render a whole tree to concatenated fragments.
pub fn export_to_html(blocks: &[Block]) -> String {
    blocks
        .iter()
        .map(render_block_to_html)
        .filter(|fragment| !fragment.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Wrap a campaign's rendered tree in a minimal standalone document:
/// charset/viewport meta, the subject as title, a 600px container on a
/// neutral background.
pub fn generate_email_html(campaign: &Campaign) -> String {
    let mut ctx = Context::new(CompileOptions::default());

    ctx.add_line("<!DOCTYPE html>");
    ctx.add_line("<html>");
    ctx.indent();

    ctx.add_line("<head>");
    ctx.indent();
    ctx.add_line("<meta charset=\"UTF-8\">");
    ctx.add_line("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">");
    ctx.add_line(&format!("<title>{}</title>", escape_html(campaign.subject())));
    ctx.dedent();
    ctx.add_line("</head>");

    ctx.add_line("<body style=\"margin: 0; padding: 0; background-color: #f4f4f4;\">");
    ctx.indent();
    ctx.add_line("<div style=\"max-width: 600px; margin: 0 auto; background-color: #ffffff;\">");
    ctx.indent();

    for block in &campaign.blocks {
        let fragment = render_block_to_html(block);
        if !fragment.is_empty() {
            ctx.add_line(&fragment);
        }
    }

    ctx.dedent();
    ctx.add_line("</div>");
    ctx.dedent();
    ctx.add_line("</body>");

    ctx.dedent();
    ctx.add_line("</html>");

    ctx.get_output()
}
