//! Pixel colours of the 1-bit display.

/// A monochrome pixel value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    Black,
    #[default]
    White,
}

impl Color {
    /// ARGB8888 value used when presenting on a colour host display.
    pub const fn to_argb(self) -> u32 {
        match self {
            Color::Black => 0xFF32_2F28,
            Color::White => 0xFFB1_AFA8,
        }
    }

    pub const fn to_luma(self) -> u8 {
        match self {
            Color::Black => 0,
            Color::White => 255,
        }
    }
}
