//! Render surface that prints frames as plain text.

use std::io::Write;

use anyhow::Result as AnyResult;
use glam::Vec2;
use storm_castle_core::Rect;
use storm_castle_rendering::{Color, RenderSurface};

/// Writes the text layer of every presented frame to `out`; images are only traced.
#[derive(Debug)]
pub(crate) struct TextSurface<W> {
    out: W,
    images: usize,
}

impl<W: Write> TextSurface<W> {
    /// Wraps a writer.
    pub(crate) const fn new(out: W) -> Self {
        Self { out, images: 0 }
    }

    /// Images drawn since the current frame began.
    pub(crate) const fn images(&self) -> usize {
        self.images
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RenderSurface for TextSurface<W> {
    fn begin_frame(&mut self, backdrop: &str) -> AnyResult<()> {
        self.images = 0;
        writeln!(self.out, "---- {backdrop} ----")?;
        Ok(())
    }

    fn draw_image(&mut self, asset: &str, rect: Rect) -> AnyResult<()> {
        self.images += 1;
        log::trace!("image {asset} at {}", rect.min());
        Ok(())
    }

    fn draw_text(&mut self, text: &str, color: Color, position: Vec2) -> AnyResult<()> {
        let marker = if color == Color::GREEN { '>' } else { ' ' };
        writeln!(
            self.out,
            "{marker} {:>4.0},{:>4.0}  {text}",
            position.x, position.y
        )?;
        Ok(())
    }
}
