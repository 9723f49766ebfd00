//! Optional rendering geometry.
//!
//! The heuristic scorer gives a small bonus to containers sitting in the
//! middle column of the viewport. Geometry only exists when a rendering host
//! is present, so it is modelled as an injected capability: headless callers
//! use [`NoLayout`], hosts that measured the page can supply a
//! [`StaticLayout`] or their own [`Layout`] implementation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::parse::Element;

/// Rectangle in CSS pixels, relative to the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Horizontal center of the box.
    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }
}

/// State of the rendering viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Viewport {
    /// A visual host reported its width.
    Available { width: f64 },
    /// Headless or non-visual host.
    Unavailable,
}

/// Geometry queries a host may provide.
pub trait Layout {
    /// The current viewport.
    fn viewport(&self) -> Viewport;

    /// The element's box, or `None` when it was not measured.
    fn bounding_box(&self, element: &Element<'_>) -> Option<BoundingBox>;
}

/// Layout for hosts without a rendering surface. Every query is unavailable.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLayout;

impl Layout for NoLayout {
    fn viewport(&self) -> Viewport {
        Viewport::Unavailable
    }

    fn bounding_box(&self, _element: &Element<'_>) -> Option<BoundingBox> {
        None
    }
}

/// Precomputed geometry keyed by element `id` attribute.
///
/// This is the shape a browser-side collaborator sends alongside the page
/// HTML:
///
/// ```json
/// { "viewport_width": 1280, "boxes": { "story": { "x": 320, "y": 0, "width": 640, "height": 900 } } }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaticLayout {
    #[serde(default)]
    pub viewport_width: Option<f64>,
    #[serde(default)]
    pub boxes: HashMap<String, BoundingBox>,
}

impl StaticLayout {
    pub fn new(viewport_width: f64) -> Self {
        Self { viewport_width: Some(viewport_width), boxes: HashMap::new() }
    }

    /// Records the box of the element with the given `id`.
    pub fn with_box(mut self, id: impl Into<String>, bounding_box: BoundingBox) -> Self {
        self.boxes.insert(id.into(), bounding_box);
        self
    }
}

impl Layout for StaticLayout {
    fn viewport(&self) -> Viewport {
        match self.viewport_width {
            Some(width) if width > 0.0 && width.is_finite() => Viewport::Available { width },
            _ => Viewport::Unavailable,
        }
    }

    fn bounding_box(&self, element: &Element<'_>) -> Option<BoundingBox> {
        let id = element.id();
        if id.is_empty() {
            return None;
        }
        self.boxes.get(id).copied()
    }
}
