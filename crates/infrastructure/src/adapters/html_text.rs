//! HTML to plain text conversion

use application::ports::{TextDeriverError, TextDeriverPort};
use nanohtml2text::html2text;

/// Plain-text derivation backed by `nanohtml2text`
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlTextDeriver;

impl TextDeriverPort for HtmlTextDeriver {
    fn derive_text(&self, html: &str) -> Result<String, TextDeriverError> {
        Ok(html2text(html))
    }
}
