use crate::diagnostic::Diagnostic;
use crate::rules::Rule;
use mailcraft_blocks::{Block, BlockSettings};

/// A link target is acceptable when it is a relative path, an anchor, or a
/// syntactically valid absolute URL.
pub fn is_valid_link_target(target: &str) -> bool {
    if target.is_empty() {
        return false;
    }
    if target.starts_with('/') || target.starts_with('#') {
        return true;
    }
    url::Url::parse(target).is_ok()
}

/// Every URL a block carries must be a usable link target.
pub struct LinkUrlsRule;

impl Rule for LinkUrlsRule {
    fn name(&self) -> &'static str {
        "link-url"
    }

    fn description(&self) -> &'static str {
        "Link targets must be relative paths, anchors, or valid absolute URLs"
    }

    fn check_block(&self, block: &Block) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        if let Some(settings) = block.settings.rich_text() {
            for link in settings.links.iter().flatten() {
                if !is_valid_link_target(&link.url) {
                    diagnostics.push(Diagnostic::error(
                        "link-url",
                        format!("link range {}..{} has invalid url '{}'", link.start, link.end, link.url),
                        &block.id,
                    ));
                }
            }
        }

        if let BlockSettings::Button(settings) = &block.settings {
            if let Some(url) = settings.url.as_deref() {
                if !is_valid_link_target(url) {
                    diagnostics.push(Diagnostic::error(
                        "button-url",
                        format!("button url '{}' is not a valid link target", url),
                        &block.id,
                    ));
                }
            }
        }

        if let BlockSettings::Navigation(settings) = &block.settings {
            for item in settings.items.iter().flatten() {
                if !is_valid_link_target(&item.url) {
                    diagnostics.push(Diagnostic::error(
                        "navigation-url",
                        format!("navigation item '{}' has invalid url '{}'", item.label, item.url),
                        &block.id,
                    ));
                }
            }
        }

        diagnostics
    }
}
