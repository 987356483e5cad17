//! 16-bit panel colors

use bytemuck::{Pod, Zeroable};

/// A color as the panel receives it (BGR565)
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Pod, Zeroable)]
pub struct Color(pub u16);

impl Color {
    pub const BLACK: Color = Color(0x0000);
    pub const WHITE: Color = Color(0xffff);
    pub const RED: Color = Color(0x001f);
    pub const GOLD: Color = Color(0x06bf);
    pub const VIOLET: Color = Color(0xec1d);
}
