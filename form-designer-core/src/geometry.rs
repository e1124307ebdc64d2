//! Page-space geometry for placed annotations
//!
//! Coordinates follow the viewer's page space: `left` grows to the right and
//! `top` grows downwards from the top-left corner of the page.

use serde::{Deserialize, Serialize};

/// A point on a page, usually where a palette item was dropped
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Distance from the left page edge
    pub left: f64,
    /// Distance from the top page edge
    pub top: f64,
}

impl Position {
    /// Create a new position
    pub fn new(left: f64, top: f64) -> Self {
        Self { left, top }
    }

    /// Position used when an insertion carries no drop location
    pub fn default_origin() -> Self {
        Self {
            left: 30.0,
            top: 30.0,
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::default_origin()
    }
}

/// Size of a bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Create a rectangle from an origin and a size
    pub fn from_origin_and_size(origin: Position, size: Size) -> Self {
        Self::new(origin.left, origin.top, size.width, size.height)
    }

    /// Top-left corner
    pub fn origin(&self) -> Position {
        Position::new(self.left, self.top)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}
