//! Custom Ratatui widgets for the coin demo

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};
use unicode_width::UnicodeWidthStr;

/// Pad `text` on both sides so it sits in the middle of `width` cells
pub fn centered(text: &str, width: usize) -> String {
    let text_width = text.width();
    if text_width >= width {
        return text.to_string();
    }
    let left = (width - text_width) / 2;
    let right = width - text_width - left;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(right))
}

/// Progress bar of coins landed against coins launched
pub struct LandingProgress {
    pub progress: f64,
    pub style: Style,
    pub tick: u64,
}

impl LandingProgress {
    pub fn new(progress: f64) -> Self {
        Self {
            progress: progress.clamp(0.0, 1.0),
            style: Style::default().fg(Color::Yellow),
            tick: 0,
        }
    }

    pub fn tick(mut self, tick: u64) -> Self {
        self.tick = tick;
        self
    }
}

impl Widget for LandingProgress {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 1 || area.width < 1 {
            return;
        }

        let filled_width = (area.width as f64 * self.progress) as u16;
        let shimmer = match (self.tick / 4) % 3 {
            0 => '▓',
            1 => '▒',
            _ => '░',
        };

        for x in area.left()..area.right() {
            let offset = x - area.left();
            let c = if offset < filled_width {
                '█'
            } else if offset == filled_width && self.progress > 0.0 {
                shimmer
            } else {
                '·'
            };
            buf.set_string(x, area.top(), c.to_string(), self.style);
        }
    }
}

/// Landings per frame over the recent past
pub struct ActivitySparkline {
    pub data: Vec<u64>,
    pub style: Style,
}

impl ActivitySparkline {
    pub fn new(data: Vec<u64>) -> Self {
        Self {
            data,
            style: Style::default().fg(Color::Green),
        }
    }
}

impl Widget for ActivitySparkline {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 1 || self.data.is_empty() {
            return;
        }

        let max = self.data.iter().copied().max().unwrap_or(0);
        let blocks = [' ', '▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

        for (i, &value) in self.data.iter().take(area.width as usize).enumerate() {
            let idx = if max > 0 {
                ((value as f64 / max as f64) * 8.0).ceil() as usize
            } else {
                0
            };
            let c = blocks[idx.min(8)];
            buf.set_string(area.left() + i as u16, area.top(), c.to_string(), self.style);
        }
    }
}
