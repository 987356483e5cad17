//! Display sink and an in-memory panel for hosts and tests

use glam::IVec2;

use super::Color;
use crate::sim::Region;

/// Width and height of one 5x7 glyph cell, spacing included
pub const GLYPH_CELL: IVec2 = IVec2::new(6, 8);

/// Sequential pixel and text writer
///
/// Pixels are written into the current window row by row, left to right,
/// the way the panel controller auto-increments its address.
pub trait Display {
    /// Restrict subsequent pixel writes to the inclusive box
    fn set_window(&mut self, top_left: IVec2, bot_right: IVec2);
    /// Write the next pixel in the window
    fn write_pixel(&mut self, color: Color);
    fn draw_text(&mut self, x: i32, y: i32, text: &str, fg: Color, bg: Color);
    fn draw_char(&mut self, x: i32, y: i32, ch: char, fg: Color, bg: Color);
}

/// Text drawn at a position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRun {
    pub pos: IVec2,
    pub text: String,
    pub fg: Color,
    pub bg: Color,
}

impl TextRun {
    /// Pixels the glyphs cover
    pub fn region(&self) -> Region {
        let len = self.text.chars().count().max(1) as i32;
        Region::new(
            self.pos,
            self.pos + IVec2::new(GLYPH_CELL.x * len, GLYPH_CELL.y) - IVec2::ONE,
        )
    }
}

/// Panel emulation: a pixel plane plus the text runs currently visible
///
/// Glyphs are not rasterized. A text run disappears once a pixel window
/// overlapping it is opened, as it would be painted over on the panel.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    width: i32,
    height: i32,
    pixels: Vec<Color>,
    window: Region,
    cursor: IVec2,
    texts: Vec<TextRun>,
    pixel_writes: u64,
}

impl FrameBuffer {
    pub fn new(width: i32, height: i32) -> Self {
        debug_assert!(width > 0 && height > 0);
        let full = Region::new(IVec2::ZERO, IVec2::new(width - 1, height - 1));
        Self {
            width,
            height,
            pixels: vec![Color::BLACK; (width * height) as usize],
            window: full,
            cursor: IVec2::ZERO,
            texts: Vec::new(),
            pixel_writes: 0,
        }
    }

    #[inline(always)]
    fn idx(&self, p: IVec2) -> Option<usize> {
        if p.x < 0 || p.y < 0 || p.x >= self.width || p.y >= self.height {
            return None;
        }
        Some((p.y as usize) * (self.width as usize) + (p.x as usize))
    }

    pub fn get(&self, p: IVec2) -> Option<Color> {
        self.idx(p).map(|i| self.pixels[i])
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Raw panel bytes, native endian
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Visible text runs, oldest first
    pub fn texts(&self) -> &[TextRun] {
        &self.texts
    }

    /// Visible text run starting at `pos`
    pub fn text_at(&self, pos: IVec2) -> Option<&str> {
        self.texts
            .iter()
            .find(|t| t.pos == pos)
            .map(|t| t.text.as_str())
    }

    /// Total pixels written since creation
    pub fn pixel_writes(&self) -> u64 {
        self.pixel_writes
    }

    fn put_text(&mut self, run: TextRun) {
        let region = run.region();
        self.texts.retain(|t| !t.region().intersects(&region));
        self.texts.push(run);
    }
}

impl Display for FrameBuffer {
    fn set_window(&mut self, top_left: IVec2, bot_right: IVec2) {
        let window = Region::new(top_left, bot_right);
        self.texts.retain(|t| !t.region().intersects(&window));
        self.window = window;
        self.cursor = top_left;
    }

    fn write_pixel(&mut self, color: Color) {
        if let Some(i) = self.idx(self.cursor) {
            self.pixels[i] = color;
        }
        self.pixel_writes += 1;

        // Advance like the controller: across the row, then wrap
        self.cursor.x += 1;
        if self.cursor.x > self.window.bot_right.x {
            self.cursor.x = self.window.top_left.x;
            self.cursor.y += 1;
            if self.cursor.y > self.window.bot_right.y {
                self.cursor.y = self.window.top_left.y;
            }
        }
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str, fg: Color, bg: Color) {
        self.put_text(TextRun {
            pos: IVec2::new(x, y),
            text: text.to_string(),
            fg,
            bg,
        });
    }

    fn draw_char(&mut self, x: i32, y: i32, ch: char, fg: Color, bg: Color) {
        self.put_text(TextRun {
            pos: IVec2::new(x, y),
            text: ch.to_string(),
            fg,
            bg,
        });
    }
}
