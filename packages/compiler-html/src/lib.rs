//! Block tree → static, email-client-safe HTML.
//!
//! Inline styles only, table-based layout for columns, `<img>`/`<a>` play
//! affordance for video. Inverse in spirit to the normalizer in
//! `mailcraft-parser`.

mod compiler;
mod emphasis;

#[cfg(test)]
mod tests;

pub use compiler::{
    escape_html, export_to_html, generate_email_html, render_block_to_html, CompileOptions,
};
pub use emphasis::{apply_emphasis, apply_links};
