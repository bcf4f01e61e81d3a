use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    symbols,
    text::Span,
    widgets::{Block, Widget},
};

/// Horizontal bar with eighth-block precision and a centred label.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SeekBar<'a> {
    block: Option<Block<'a>>,
    ratio: f64,
    label: Option<Span<'a>>,
    filled_style: Style,
    empty_style: Style,
}

impl<'a> SeekBar<'a> {
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    pub fn ratio(mut self, ratio: f64) -> Self {
        self.ratio = if ratio.is_nan() { 0.0 } else { ratio.clamp(0.0, 1.0) };
        self
    }

    pub fn label<T>(mut self, label: T) -> Self
    where
        T: Into<Span<'a>>,
    {
        self.label = Some(label.into());
        self
    }

    pub fn filled_style<S: Into<Style>>(mut self, style: S) -> Self {
        self.filled_style = style.into();
        self
    }

    pub fn empty_style<S: Into<Style>>(mut self, style: S) -> Self {
        self.empty_style = style.into();
        self
    }
}

fn partial_block(frac: f64) -> &'static str {
    match (frac * 8.0).round() as u16 {
        0 => " ",
        1 => symbols::block::ONE_EIGHTH,
        2 => symbols::block::ONE_QUARTER,
        3 => symbols::block::THREE_EIGHTHS,
        4 => symbols::block::HALF,
        5 => symbols::block::FIVE_EIGHTHS,
        6 => symbols::block::THREE_QUARTERS,
        7 => symbols::block::SEVEN_EIGHTHS,
        _ => symbols::block::FULL,
    }
}

impl Widget for SeekBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if let Some(ref block) = self.block {
            block.render(area, buf);
        }
        let inner = self.block.as_ref().map_or(area, |b| b.inner(area));
        if inner.is_empty() {
            return;
        }

        let filled = inner.width as f64 * self.ratio;
        let label_width = self.label.as_ref().map_or(0, |l| l.width() as u16);
        let label_col = inner.left() + inner.width.saturating_sub(label_width) / 2;
        let label_row = inner.top() + inner.height / 2;

        for y in inner.top()..inner.bottom() {
            for x in inner.left()..inner.right() {
                let pos = (x - inner.left()) as f64;
                let (symbol, style) = if pos + 1.0 <= filled {
                    (symbols::block::FULL, self.filled_style)
                } else if pos < filled {
                    (partial_block(filled - pos), self.filled_style)
                } else {
                    (" ", self.empty_style)
                };
                buf[(x, y)].set_symbol(symbol).set_style(style);
            }
        }

        if let Some(label) = self.label.as_ref() {
            buf.set_span(label_col, label_row, label, inner.width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_proportionally() {
        let area = Rect::new(0, 0, 10, 1);
        let mut buf = Buffer::empty(area);
        SeekBar::default().ratio(0.45).render(area, &mut buf);

        assert_eq!(buf[(3, 0)].symbol(), symbols::block::FULL);
        assert_eq!(buf[(4, 0)].symbol(), symbols::block::HALF);
        assert_eq!(buf[(5, 0)].symbol(), " ");
    }

    #[test]
    fn ratio_is_clamped() {
        assert_eq!(SeekBar::default().ratio(3.0).ratio, 1.0);
        assert_eq!(SeekBar::default().ratio(f64::NAN).ratio, 0.0);
    }
}
