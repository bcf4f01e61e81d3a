use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::{camera::Frame, util::colors::Palette};

const UPPER_HALF: &str = "▀";

/// Draws a frame with half-block cells, two pixel rows per terminal row,
/// scaled to fit while keeping the aspect ratio.
pub struct FramePreview<'a> {
    frame: &'a Frame,
    palette: &'a Palette,
}

impl<'a> FramePreview<'a> {
    pub fn new(frame: &'a Frame, palette: &'a Palette) -> Self {
        Self { frame, palette }
    }

    fn fit(&self, area: Rect) -> Rect {
        let (fw, fh) = (self.frame.width.max(1) as u64, self.frame.height.max(1) as u64);
        let max_w = area.width as u64;
        let max_h = area.height as u64 * 2;
        let (w, h) = if max_w * fh <= max_h * fw {
            (max_w, max_w * fh / fw)
        } else {
            (max_h * fw / fh, max_h)
        };
        let (w, rows) = (w as u16, h.div_ceil(2) as u16);
        Rect::new(
            area.x + (area.width - w) / 2,
            area.y + (area.height - rows) / 2,
            w,
            rows,
        )
    }

    fn sample(&self, x: u16, y: u32, target: Rect) -> Color {
        let fx = x as u32 * self.frame.width / target.width.max(1) as u32;
        let fy = y * self.frame.height / (target.height as u32 * 2).max(1);
        match self.frame.pixel(fx, fy) {
            Some([r, g, b]) => Color::Rgb(r, g, b),
            None => self.palette.background,
        }
    }
}

impl Widget for FramePreview<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() || self.frame.width == 0 || self.frame.height == 0 {
            return;
        }
        let target = self.fit(area);
        for row in 0..target.height {
            for col in 0..target.width {
                let top = self.sample(col, row as u32 * 2, target);
                let bottom = self.sample(col, row as u32 * 2 + 1, target);
                buf[(target.x + col, target.y + row)]
                    .set_symbol(UPPER_HALF)
                    .set_style(Style::default().fg(top).bg(bottom));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::colors::DARK;

    #[test]
    fn keeps_aspect_ratio() {
        let frame = Frame {
            width: 16,
            height: 9,
            rgb: vec![10; 16 * 9 * 3],
        };
        let preview = FramePreview::new(&frame, &DARK);
        let fitted = preview.fit(Rect::new(0, 0, 32, 40));
        assert_eq!((fitted.width, fitted.height), (32, 9));
    }

    #[test]
    fn paints_pixels_into_cells() {
        let frame = Frame {
            width: 1,
            height: 2,
            rgb: vec![255, 0, 0, 0, 0, 255],
        };
        let area = Rect::new(0, 0, 1, 1);
        let mut buf = Buffer::empty(area);
        FramePreview::new(&frame, &DARK).render(area, &mut buf);

        let cell = &buf[(0, 0)];
        assert_eq!(cell.symbol(), UPPER_HALF);
        assert_eq!(cell.fg, Color::Rgb(255, 0, 0));
        assert_eq!(cell.bg, Color::Rgb(0, 0, 255));
    }
}
