//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod html_text;
mod http_mailer;
mod system_clock;

pub use html_text::HtmlTextDeriver;
pub use http_mailer::HttpMailer;
pub use system_clock::SystemClock;
