use std::io::Write;

use crate::app::Result;
use crate::controller::{FrameBody, RenderFrame, RenderSink};

/// Writes frames as a plain-text listing, one line per card.
pub struct TextSink<W: Write> {
    out: W,
}

impl<W: Write> TextSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RenderSink for TextSink<W> {
    fn present(&mut self, frame: &RenderFrame<'_>) -> Result<()> {
        match &frame.body {
            FrameBody::Loading => writeln!(self.out, "Loading...")?,
            FrameBody::Error(message) => writeln!(self.out, "{}", message)?,
            FrameBody::Empty => writeln!(self.out, "No topics match your filters.")?,
            FrameBody::Cards { cards, load_more } => {
                for card in cards {
                    let badges: Vec<&str> = card.badges.iter().map(|b| b.label()).collect();
                    writeln!(
                        self.out,
                        "{:>4}  {:<10} {}{}",
                        card.article_count,
                        card.latest,
                        card.label,
                        if badges.is_empty() {
                            String::new()
                        } else {
                            format!("  [{}]", badges.join(", "))
                        }
                    )?;
                    if !card.entities.is_empty() {
                        writeln!(self.out, "                  {}", card.entities.join(" · "))?;
                    }
                }
                if let Some(remaining) = load_more {
                    writeln!(self.out, "({} more)", remaining)?;
                }
            }
        }
        Ok(())
    }
}
