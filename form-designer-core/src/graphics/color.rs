use serde::{Deserialize, Serialize};

/// An 8-bit RGB color as used by the viewer for borders and fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Creates an RGB color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    /// Black color (0, 0, 0).
    pub const fn black() -> Self {
        Color::rgb(0, 0, 0)
    }

    /// White color (255, 255, 255).
    pub const fn white() -> Self {
        Color::rgb(255, 255, 255)
    }

    /// Light blue fill used behind editable text fields.
    pub const fn field_blue() -> Self {
        Color::rgb(220, 240, 255)
    }
}
