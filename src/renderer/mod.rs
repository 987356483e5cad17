//! Rendering module
//!
//! Composites the scene onto an RGB565 panel one dirty region at a time and
//! draws the text overlays on top.

pub mod color;
pub mod compositor;
pub mod display;
pub mod hud;

pub use color::Color;
pub use compositor::{composite_movers, draw_all, paint_region};
pub use display::{Display, FrameBuffer, GLYPH_CELL, TextRun};
