//! Turning topics into something to look at.
//!
//! - [`card`]: structured card model (badges, entity tags, article disclosure)
//! - [`format`]: number and relative date formatting
//! - [`html`]: escaped HTML markup and full static pages
//! - [`text`]: plain-text listing for the terminal

pub mod card;
pub mod format;
pub mod html;
pub mod text;

pub use card::{ArticleView, Badge, CardView};
pub use html::{render_card, render_page, render_topic_card, HtmlSink};
pub use text::TextSink;
