use log::warn;
use sdl2::pixels::PixelFormatEnum;
use sdl2::render::WindowCanvas;

use schip8::constants::{LORES_HEIGHT, LORES_WIDTH};
use schip8::{Display, FrameBuffer};

const BYTES_PER_PIXEL: usize = 3;

/// # Display
/// A FrameBuffer shown in an SDL2 window.
///
/// All drawing happens on the in-memory FrameBuffer; the window is only updated when the
/// scheduler calls `present`. The window is sized for low resolution and high resolution frames
/// are scaled down into it, so each hires pixel is half the size of a lores pixel.
pub struct SdlDisplay {
    canvas: WindowCanvas,
    frame: FrameBuffer,
}

impl SdlDisplay {
    /// Creates a new display object bound to an sdl2 context.
    ///
    /// # Arguments
    /// * `sdl` an sdl2 context with which to draw
    /// * `scale` the size multiplier for each low resolution pixel
    pub fn new(sdl: &sdl2::Sdl, scale: u32) -> Result<Self, String> {
        let video_subsystem = sdl.video()?;
        let window = video_subsystem
            .window(
                "schip8",
                LORES_WIDTH as u32 * scale,
                LORES_HEIGHT as u32 * scale,
            )
            .position_centered()
            .build()
            .map_err(|e| e.to_string())?;
        let canvas = window.into_canvas().build().map_err(|e| e.to_string())?;

        let mut display = SdlDisplay {
            canvas,
            frame: FrameBuffer::new(),
        };
        display.render()?;
        Ok(display)
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    /// Formats a FrameBuffer for rendering as an SDL2 texture.
    ///
    /// An SDL2 texture is a 1D array of bytes that represent concatenated rows of RGB pixels.
    ///
    /// This creates a black and white rendering by:
    /// - Flattening the active rows of the frame buffer by concatenating them
    /// - Triplicating each pixel to represent its RGB values
    /// - Mapping lit pixels to 255 and unlit pixels to 0
    ///
    /// # Arguments
    /// * `frame` a FrameBuffer
    fn frame_to_texture(frame: &FrameBuffer) -> Vec<u8> {
        frame
            .rows()
            .flat_map(|row| row.iter())
            .flat_map(|&lit| std::iter::repeat(if lit { 255 } else { 0 }).take(BYTES_PER_PIXEL))
            .collect()
    }

    /// Formats the FrameBuffer as an SDL2 RGB24 texture and renders it.
    fn render(&mut self) -> Result<(), String> {
        let (width, height) = (self.frame.width(), self.frame.height());
        let pixels = SdlDisplay::frame_to_texture(&self.frame);
        let texture_creator = self.canvas.texture_creator();

        let mut texture = texture_creator
            .create_texture_streaming(PixelFormatEnum::RGB24, width as u32, height as u32)
            .map_err(|e| e.to_string())?;

        texture.with_lock(None, |buffer: &mut [u8], pitch: usize| {
            let row_bytes = width * BYTES_PER_PIXEL;
            for (line, row) in buffer.chunks_mut(pitch).zip(pixels.chunks(row_bytes)) {
                line[..row_bytes].copy_from_slice(row);
            }
        })?;

        self.canvas.copy(&texture, None, None)?;
        self.canvas.present();
        Ok(())
    }
}

impl Display for SdlDisplay {
    fn draw_pixel(&mut self, x: usize, y: usize, lit: bool) {
        self.frame.draw_pixel(x, y, lit)
    }

    fn flip_pixel(&mut self, x: usize, y: usize) -> bool {
        self.frame.flip_pixel(x, y)
    }

    fn clear_screen(&mut self) {
        self.frame.clear_screen()
    }

    fn scroll_up(&mut self, lines: usize) {
        self.frame.scroll_up(lines)
    }

    fn scroll_down(&mut self, lines: usize) {
        self.frame.scroll_down(lines)
    }

    fn scroll_left(&mut self, lines: usize) {
        self.frame.scroll_left(lines)
    }

    fn scroll_right(&mut self, lines: usize) {
        self.frame.scroll_right(lines)
    }

    fn switch_resolution(&mut self, hires: bool) {
        self.frame.switch_resolution(hires)
    }

    fn width(&self) -> usize {
        self.frame.width()
    }

    fn height(&self) -> usize {
        self.frame.height()
    }

    fn is_hires(&self) -> bool {
        self.frame.is_hires()
    }

    fn present(&mut self) {
        if let Err(e) = self.render() {
            warn!("failed to present frame: {}", e);
        }
    }
}
