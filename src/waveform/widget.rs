use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::widgets::StatefulWidget;

use super::surface::Pixel;
use super::view::WaveformView;

pub const ACCENT: Color = Color::Rgb(14, 165, 233);
pub const MUTED_DARK: Color = Color::Rgb(82, 82, 91);
pub const MUTED_LIGHT: Color = Color::Rgb(212, 212, 216);

/// Draws a `WaveformView` with half-block glyphs, two pixels per cell.
#[derive(Debug, Copy, Clone)]
pub struct WaveformCanvas {
    muted: Color,
    accent: Color,
}

impl WaveformCanvas {
    pub fn new(dark_mode: bool) -> Self {
        Self {
            muted: if dark_mode { MUTED_DARK } else { MUTED_LIGHT },
            accent: ACCENT,
        }
    }

    fn color(&self, p: Pixel) -> Option<Color> {
        match p {
            Pixel::Empty => None,
            Pixel::Muted => Some(self.muted),
            Pixel::Accent => Some(self.accent),
        }
    }
}

impl StatefulWidget for WaveformCanvas {
    type State = WaveformView;

    fn render(self, area: Rect, buf: &mut Buffer, view: &mut WaveformView) {
        if area.is_empty() {
            return;
        }
        view.paint(area);

        let surface = view.surface();
        for row in 0..area.height {
            for col in 0..area.width {
                let upper = self.color(surface.get(col, row * 2));
                let lower = self.color(surface.get(col, row * 2 + 1));
                let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) else {
                    continue;
                };

                match (upper, lower) {
                    (None, None) => {
                        cell.set_symbol(" ");
                    }
                    (Some(u), None) => {
                        cell.set_symbol("▀").set_fg(u);
                    }
                    (None, Some(l)) => {
                        cell.set_symbol("▄").set_fg(l);
                    }
                    (Some(u), Some(l)) if u == l => {
                        cell.set_symbol("█").set_fg(u);
                    }
                    (Some(u), Some(l)) => {
                        cell.set_symbol("▀").set_fg(u).set_bg(l);
                    }
                }
            }
        }
    }
}
