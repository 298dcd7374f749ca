//! Vertical bar chart widget for metric history

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// Block characters for partial column fills (8 levels)
const BLOCKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// A column chart drawing one bar per value, scaled against the largest.
///
/// When the series is wider than the area, the oldest values are dropped
/// so the most recent ones stay visible.
pub struct MetricBars<'a> {
    /// Values in chronological order, one bar each
    values: &'a [f64],
    /// Largest finite value, used for normalization
    max: f64,
    /// Columns per bar
    bar_width: u16,
    /// Blank columns between bars
    gap: u16,
    /// Style for ordinary bars
    style: Style,
    /// Index of the bar drawn with the highlight style
    highlight: Option<usize>,
    /// Style for the highlighted bar
    highlight_style: Style,
}

impl<'a> MetricBars<'a> {
    pub fn new(values: &'a [f64]) -> Self {
        let max = values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(0.0_f64, f64::max);
        Self {
            values,
            max,
            bar_width: 2,
            gap: 1,
            style: Style::default().fg(Color::Cyan),
            highlight: None,
            highlight_style: Style::default().fg(Color::Yellow),
        }
    }

    pub fn highlight(mut self, index: usize) -> Self {
        self.highlight = Some(index);
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Bar height in eighths of a cell. A positive value always gets at
    /// least one eighth so small bars stay visible.
    fn value_to_eighths(&self, value: f64, rows: u16) -> usize {
        if self.max <= 0.0 || !value.is_finite() || value <= 0.0 {
            return 0;
        }
        let total = rows as usize * 8;
        let scaled = ((value / self.max) * total as f64).round() as usize;
        scaled.clamp(1, total)
    }
}

/// Character for one cell of a bar, with rows counted from the bottom.
fn cell_char(eighths: usize, row_from_bottom: usize) -> char {
    let below = row_from_bottom * 8;
    if eighths >= below + 8 {
        '█'
    } else if eighths <= below {
        ' '
    } else {
        BLOCKS[eighths - below - 1]
    }
}

impl<'a> Widget for MetricBars<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let step = (self.bar_width + self.gap).max(1) as usize;
        let capacity = (area.width as usize + self.gap as usize) / step;
        let skip = self.values.len().saturating_sub(capacity);

        for (slot, (i, value)) in self.values.iter().enumerate().skip(skip).enumerate() {
            let eighths = self.value_to_eighths(*value, area.height);
            let style = if self.highlight == Some(i) {
                self.highlight_style
            } else {
                self.style
            };

            for row in 0..area.height as usize {
                let ch = cell_char(eighths, row);
                if ch == ' ' {
                    continue;
                }
                let y = area.y + area.height - 1 - row as u16;
                for dx in 0..self.bar_width {
                    let x = area.x + (slot * step) as u16 + dx;
                    if x >= area.x + area.width {
                        break;
                    }
                    if let Some(cell) = buf.cell_mut((x, y)) {
                        cell.set_char(ch).set_style(style);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_to_eighths_maximum() {
        let values = [1.0, 4.0];
        let bars = MetricBars::new(&values);
        assert_eq!(bars.value_to_eighths(4.0, 6), 48);
    }

    #[test]
    fn test_value_to_eighths_small_positive_is_visible() {
        let values = [0.01, 100.0];
        let bars = MetricBars::new(&values);
        assert_eq!(bars.value_to_eighths(0.01, 6), 1);
    }

    #[test]
    fn test_value_to_eighths_zero_and_negative() {
        let values = [1.0, 4.0];
        let bars = MetricBars::new(&values);
        assert_eq!(bars.value_to_eighths(0.0, 6), 0);
        assert_eq!(bars.value_to_eighths(-2.0, 6), 0);
    }

    #[test]
    fn test_value_to_eighths_all_zero_series() {
        let values = [0.0, 0.0, 0.0];
        let bars = MetricBars::new(&values);
        assert_eq!(bars.value_to_eighths(0.0, 6), 0);
    }

    #[test]
    fn test_value_to_eighths_ignores_non_finite_max() {
        let values = [f64::NAN, 2.0];
        let bars = MetricBars::new(&values);
        assert_eq!(bars.value_to_eighths(2.0, 6), 48);
        assert_eq!(bars.value_to_eighths(f64::NAN, 6), 0);
    }

    #[test]
    fn test_cell_char_full_and_empty_rows() {
        // 12 eighths fills the bottom row and half of the next
        assert_eq!(cell_char(12, 0), '█');
        assert_eq!(cell_char(12, 1), '▄');
        assert_eq!(cell_char(12, 2), ' ');
    }

    #[test]
    fn test_cell_char_single_eighth() {
        assert_eq!(cell_char(1, 0), '▁');
        assert_eq!(cell_char(1, 1), ' ');
    }

    #[test]
    fn test_bars_creation() {
        let values = vec![10.0, 20.0, 30.0];
        let bars = MetricBars::new(&values)
            .highlight(2)
            .style(Style::default().fg(Color::Blue));

        assert_eq!(bars.values.len(), 3);
        assert_eq!(bars.highlight, Some(2));
        assert_eq!(bars.max, 30.0);
    }
}
