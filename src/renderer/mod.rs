//! Rendering module
//!
//! `scene` turns the game state into a flat list of `DrawCommand`s in
//! painter's order. Backends only replay the list; on the web that is the
//! Canvas 2D context in `canvas`.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod scene;
pub mod shapes;

use glam::Vec2;

use crate::assets::ImageKey;
use crate::sim::Rect;

pub use scene::{SceneOptions, build_frame};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextBaseline {
    Alphabetic,
    Middle,
}

/// One text run
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub content: String,
    pub pos: Vec2,
    /// Font size in pixels
    pub size: f32,
    pub bold: bool,
    pub color: &'static str,
    pub align: TextAlign,
    pub baseline: TextBaseline,
    pub alpha: f32,
}

impl Text {
    pub fn new(content: impl Into<String>, pos: Vec2, size: f32, color: &'static str) -> Self {
        Self {
            content: content.into(),
            pos,
            size,
            bold: false,
            color,
            align: TextAlign::Center,
            baseline: TextBaseline::Alphabetic,
            alpha: 1.0,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    pub fn middle(mut self) -> Self {
        self.baseline = TextBaseline::Middle;
        self
    }

    pub fn alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }

    /// CSS font shorthand
    pub fn font(&self) -> String {
        if self.bold {
            format!("bold {}px Arial", self.size)
        } else {
            format!("{}px Arial", self.size)
        }
    }
}

/// A single drawing operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Vertical two-stop gradient
    Gradient {
        rect: Rect,
        top: &'static str,
        bottom: &'static str,
    },
    /// Loaded image, rotated about the rect centre
    Image {
        key: ImageKey,
        rect: Rect,
        rotation: f32,
        alpha: f32,
    },
    FillRect {
        rect: Rect,
        color: &'static str,
    },
    StrokeRect {
        rect: Rect,
        color: &'static str,
        width: f32,
    },
    /// Closed filled and outlined polygon
    Polygon {
        points: Vec<Vec2>,
        fill: &'static str,
        stroke: &'static str,
        line_width: f32,
        alpha: f32,
    },
    Text(Text),
}
