//! Off-screen pixel grid for waveform bars.
//!
//! A terminal cell holds two vertical pixels (upper and lower half block),
//! so a `cols x rows` area is a `cols x rows*2` surface.

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Pixel {
    Empty,
    Muted,
    Accent,
}

/// Vertical pixels per terminal row.
pub const PIXELS_PER_ROW: u16 = 2;

#[derive(Debug, Default)]
pub struct Surface {
    width: u16,
    height: u16,
    pixels: Vec<Pixel>,
    allocations: u32,
}

impl Surface {
    /// Match the surface to a `cols x rows` cell area.
    ///
    /// Reallocates only when the size actually changed; returns whether it did.
    pub fn resize(&mut self, cols: u16, rows: u16) -> bool {
        let height = rows.saturating_mul(PIXELS_PER_ROW);
        if cols == self.width && height == self.height && self.allocations > 0 {
            return false;
        }
        self.width = cols;
        self.height = height;
        self.pixels = vec![Pixel::Empty; cols as usize * height as usize];
        self.allocations += 1;
        true
    }

    pub fn clear(&mut self) {
        self.pixels.fill(Pixel::Empty);
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// How many times the pixel buffer has been (re)allocated.
    #[cfg(test)]
    pub fn allocations(&self) -> u32 {
        self.allocations
    }

    pub fn get(&self, x: u16, y: u16) -> Pixel {
        if x >= self.width || y >= self.height {
            return Pixel::Empty;
        }
        self.pixels[y as usize * self.width as usize + x as usize]
    }

    /// Paint a vertically centered bar, skipping columns at or past `clip_x`.
    pub fn fill_bar(&mut self, x: u16, bar_width: u16, bar_height: u16, paint: Pixel, clip_x: u16) {
        let h = bar_height.min(self.height);
        let top = (self.height - h) / 2;
        let right = x.saturating_add(bar_width).min(self.width).min(clip_x);

        for px in x..right {
            for py in top..top + h {
                self.pixels[py as usize * self.width as usize + px as usize] = paint;
            }
        }
    }
}

/// Pixel height of one bar, never below `min_height`.
pub fn bar_height_px(amplitude: f32, pulse: f32, surface_height: u16, scale: f32, min_height: u16) -> u16 {
    let raw = amplitude * pulse * surface_height as f32 * scale;
    let px = if raw.is_finite() && raw > 0.0 {
        raw.round().min(u16::MAX as f32) as u16
    } else {
        0
    };
    px.max(min_height)
}
