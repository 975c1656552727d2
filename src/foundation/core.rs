use crate::foundation::error::{MotionError, MotionResult};

pub use kurbo::{Point, Rect, Vec2};

/// Browser viewport dimensions and vertical scroll offset, in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Viewport width.
    pub width: f64,
    /// Viewport height.
    pub height: f64,
    /// Current vertical document scroll offset.
    #[serde(default)]
    pub scroll_y: f64,
}

impl Viewport {
    /// Create a validated viewport scrolled to the top of the document.
    pub fn new(width: f64, height: f64) -> MotionResult<Self> {
        if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
            return Err(MotionError::validation(
                "viewport width/height must be finite and > 0",
            ));
        }
        Ok(Self {
            width,
            height,
            scroll_y: 0.0,
        })
    }

    /// Same viewport with a different scroll offset.
    pub fn scrolled_to(self, scroll_y: f64) -> Self {
        Self { scroll_y, ..self }
    }

    /// Convert a viewport-relative y coordinate into document space.
    pub fn to_document_y(self, client_y: f64) -> f64 {
        client_y + self.scroll_y
    }

    /// Absolute pixel offset of a fraction of the viewport height.
    pub fn height_fraction(self, fraction: f64) -> f64 {
        self.height * fraction
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
            scroll_y: 0.0,
        }
    }
}
