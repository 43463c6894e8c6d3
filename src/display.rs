use log::debug;

use crate::constants::{HIRES_HEIGHT, HIRES_WIDTH, LORES_HEIGHT, LORES_WIDTH};

/// # Display
/// The surface the CPU draws on.
///
/// Pixels are either lit or unlit. In low resolution mode the surface is 64x32 pixels and in high
/// resolution (SUPER-CHIP) mode it is 128x64. The CPU only ever asks for changes; the only state
/// it reads back is whether a flip turned a lit pixel off.
pub trait Display {
    fn draw_pixel(&mut self, x: usize, y: usize, lit: bool);

    /// Toggles a pixel, returning true if it was lit before the flip
    fn flip_pixel(&mut self, x: usize, y: usize) -> bool;

    fn clear_screen(&mut self);

    fn scroll_up(&mut self, lines: usize);

    fn scroll_down(&mut self, lines: usize);

    fn scroll_left(&mut self, lines: usize);

    fn scroll_right(&mut self, lines: usize);

    /// Switches between 64x32 and 128x64; always clears the screen
    fn switch_resolution(&mut self, hires: bool);

    fn width(&self) -> usize;

    fn height(&self) -> usize;

    fn is_hires(&self) -> bool {
        self.width() == HIRES_WIDTH
    }

    /// Called once per tick after the burst of instructions has run
    fn present(&mut self) {}
}

/// An in-memory Display.
///
/// Storage is always sized for high resolution; low resolution uses the top-left 64x32 corner.
/// Coordinates outside the active resolution are ignored.
///
/// Scrolling is specified in high resolution lines, so in low resolution every scroll moves half
/// as far.
#[derive(Clone)]
pub struct FrameBuffer {
    pixels: [[bool; HIRES_WIDTH]; HIRES_HEIGHT],
    hires: bool,
}

impl FrameBuffer {
    pub fn new() -> Self {
        FrameBuffer {
            pixels: [[false; HIRES_WIDTH]; HIRES_HEIGHT],
            hires: false,
        }
    }

    /// Whether the pixel at (x, y) is lit; false outside the active resolution
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        self.in_bounds(x, y) && self.pixels[y][x]
    }

    /// The active rows, each trimmed to the active width
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> + '_ {
        let width = self.width();
        self.pixels[..self.height()]
            .iter()
            .map(move |row| &row[..width])
    }

    fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.width() && y < self.height()
    }

    fn scaled(&self, lines: usize) -> usize {
        if self.hires {
            lines
        } else {
            lines / 2
        }
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for FrameBuffer {
    fn draw_pixel(&mut self, x: usize, y: usize, lit: bool) {
        if self.in_bounds(x, y) {
            self.pixels[y][x] = lit;
        }
    }

    fn flip_pixel(&mut self, x: usize, y: usize) -> bool {
        if !self.in_bounds(x, y) {
            return false;
        }
        let was_lit = self.pixels[y][x];
        self.pixels[y][x] = !was_lit;
        was_lit
    }

    fn clear_screen(&mut self) {
        self.pixels = [[false; HIRES_WIDTH]; HIRES_HEIGHT];
    }

    fn scroll_up(&mut self, lines: usize) {
        let (width, height) = (self.width(), self.height());
        let lines = self.scaled(lines).min(height);
        if lines == 0 {
            return;
        }
        for y in 0..height - lines {
            let (top, bottom) = self.pixels.split_at_mut(y + lines);
            top[y][..width].copy_from_slice(&bottom[0][..width]);
        }
        for row in &mut self.pixels[height - lines..height] {
            row[..width].fill(false);
        }
    }

    fn scroll_down(&mut self, lines: usize) {
        let (width, height) = (self.width(), self.height());
        let lines = self.scaled(lines).min(height);
        if lines == 0 {
            return;
        }
        for y in (lines..height).rev() {
            let (top, bottom) = self.pixels.split_at_mut(y);
            bottom[0][..width].copy_from_slice(&top[y - lines][..width]);
        }
        for row in &mut self.pixels[..lines] {
            row[..width].fill(false);
        }
    }

    fn scroll_left(&mut self, lines: usize) {
        let width = self.width();
        let lines = self.scaled(lines).min(width);
        let height = self.height();
        for row in &mut self.pixels[..height] {
            row.copy_within(lines..width, 0);
            row[width - lines..width].fill(false);
        }
    }

    fn scroll_right(&mut self, lines: usize) {
        let width = self.width();
        let lines = self.scaled(lines).min(width);
        let height = self.height();
        for row in &mut self.pixels[..height] {
            row.copy_within(0..width - lines, lines);
            row[..lines].fill(false);
        }
    }

    fn switch_resolution(&mut self, hires: bool) {
        debug!("switching to {}", if hires { "128x64" } else { "64x32" });
        self.hires = hires;
        self.clear_screen();
    }

    fn width(&self) -> usize {
        if self.hires {
            HIRES_WIDTH
        } else {
            LORES_WIDTH
        }
    }

    fn height(&self) -> usize {
        if self.hires {
            HIRES_HEIGHT
        } else {
            LORES_HEIGHT
        }
    }

    fn is_hires(&self) -> bool {
        self.hires
    }
}
