//! Page geometry
//!
//! The rendering service measures everything from the top-left corner of the
//! viewport, PDF user space starts at the bottom-left. Units are the same on
//! both sides: a page is exactly as large as its viewport.

use crate::meta::{MetaLink, Viewport};

/// Page dimensions in PDF user space units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageDimensions {
    pub width: f32,
    pub height: f32,
}

impl PageDimensions {
    /// A page covering the whole viewport
    pub fn from_viewport(viewport: &Viewport) -> Self {
        Self {
            width: viewport.width as f32,
            height: viewport.height as f32,
        }
    }

    /// `/MediaBox` values `[0 0 width height]`
    pub fn media_box(&self) -> [f32; 4] {
        [0.0, 0.0, self.width, self.height]
    }
}

/// Link rectangle with a bottom-left origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinkRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl LinkRect {
    /// Flip a top-left-origin link box onto a page of the given height
    pub fn from_top_left(link: &MetaLink, page_height: f32) -> Self {
        let top = link.top as f32;
        let height = link.height as f32;

        Self {
            x: link.left as f32,
            y: page_height - top - height,
            width: link.width as f32,
            height,
        }
    }

    /// `/Rect` values `[llx lly urx ury]`
    pub fn corners(&self) -> [f32; 4] {
        [self.x, self.y, self.x + self.width, self.y + self.height]
    }
}
