//! Scroll trigger windows and the observers that scrub effects with scroll position.

use std::fmt;
use std::str::FromStr;

use crate::{
    animation::ease::Ease,
    animation::state::{Lerp, VisualState},
    dom::ElementId,
    foundation::core::{Rect, Viewport},
    foundation::error::{MotionError, MotionResult},
};

/// Reference edge of the trigger element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edge {
    /// Top edge.
    Top,
    /// Vertical centre.
    Center,
    /// Bottom edge.
    Bottom,
}

impl Edge {
    /// Position of the edge as a fraction of the element height.
    pub fn fraction(self) -> f64 {
        match self {
            Self::Top => 0.0,
            Self::Center => 0.5,
            Self::Bottom => 1.0,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Center => "center",
            Self::Bottom => "bottom",
        }
    }
}

/// "Element edge meets viewport line" description, e.g. `top 80%`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TriggerPosition {
    /// Edge of the trigger element.
    pub element: Edge,
    /// Viewport line as a fraction of the viewport height from its top.
    pub viewport: f64,
}

impl TriggerPosition {
    /// Build a position from an edge and a viewport fraction.
    pub fn new(element: Edge, viewport: f64) -> Self {
        Self { element, viewport }
    }

    /// Document scroll offset at which this position is reached for an element
    /// whose layout box (viewport coordinates) is `rect`.
    pub fn scroll_offset(&self, rect: Rect, viewport: Viewport) -> f64 {
        let edge_y = viewport.to_document_y(rect.y0) + rect.height() * self.element.fraction();
        edge_y - viewport.height_fraction(self.viewport)
    }
}

impl FromStr for TriggerPosition {
    type Err = MotionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let (Some(edge), Some(line), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(MotionError::validation(format!(
                "trigger position '{s}' must be '<edge> <viewport>'"
            )));
        };
        let element = match edge {
            "top" => Edge::Top,
            "center" => Edge::Center,
            "bottom" => Edge::Bottom,
            other => {
                return Err(MotionError::validation(format!(
                    "unknown trigger edge '{other}'"
                )));
            }
        };
        let viewport = match line {
            "top" => 0.0,
            "center" => 0.5,
            "bottom" => 1.0,
            pct => {
                let Some(num) = pct.strip_suffix('%') else {
                    return Err(MotionError::validation(format!(
                        "viewport line '{pct}' must be top, center, bottom or a percentage"
                    )));
                };
                let value: f64 = num.parse().map_err(|_| {
                    MotionError::validation(format!("invalid viewport percentage '{pct}'"))
                })?;
                if !value.is_finite() {
                    return Err(MotionError::validation("viewport percentage must be finite"));
                }
                value / 100.0
            }
        };
        Ok(Self { element, viewport })
    }
}

impl fmt::Display for TriggerPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}%", self.element.name(), self.viewport * 100.0)
    }
}

impl TryFrom<String> for TriggerPosition {
    type Error = MotionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TriggerPosition> for String {
    fn from(value: TriggerPosition) -> Self {
        value.to_string()
    }
}

/// Scroll range over which a scroll-linked effect progresses.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScrollTriggerWindow {
    /// Where progress is 0.
    pub start: TriggerPosition,
    /// Where progress is 1.
    pub end: TriggerPosition,
    /// `true`: progress mirrors scroll continuously. `false`: play once when the
    /// start is crossed.
    #[serde(default = "default_scrub")]
    pub scrub: bool,
}

fn default_scrub() -> bool {
    true
}

impl Default for ScrollTriggerWindow {
    fn default() -> Self {
        Self {
            start: TriggerPosition::new(Edge::Top, 0.8),
            end: TriggerPosition::new(Edge::Bottom, 0.4),
            scrub: true,
        }
    }
}

impl ScrollTriggerWindow {
    /// Reject non-finite viewport lines.
    pub fn validate(&self) -> MotionResult<()> {
        if !self.start.viewport.is_finite() || !self.end.viewport.is_finite() {
            return Err(MotionError::validation(
                "trigger window viewport lines must be finite",
            ));
        }
        Ok(())
    }

    /// Scroll offsets of the window for an element measured at `rect`.
    pub fn resolve(&self, rect: Rect, viewport: Viewport) -> TriggerBounds {
        TriggerBounds {
            start: self.start.scroll_offset(rect, viewport),
            end: self.end.scroll_offset(rect, viewport),
        }
    }
}

/// A window resolved to document scroll offsets.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TriggerBounds {
    /// Scroll offset where progress is 0.
    pub start: f64,
    /// Scroll offset where progress is 1.
    pub end: f64,
}

impl TriggerBounds {
    /// Progress in `[0, 1]` at document scroll offset `scroll_y`.
    ///
    /// An empty or inverted window behaves as a step at `start`.
    pub fn progress(&self, scroll_y: f64) -> f64 {
        let span = self.end - self.start;
        if span <= 0.0 {
            return if scroll_y >= self.start { 1.0 } else { 0.0 };
        }
        ((scroll_y - self.start) / span).clamp(0.0, 1.0)
    }
}

/// Scroll observer bound to one element.
#[derive(Clone, Debug)]
pub(crate) struct ScrollObserver {
    pub(crate) target: ElementId,
    pub(crate) window: ScrollTriggerWindow,
    pub(crate) from: VisualState,
    pub(crate) to: VisualState,
    pub(crate) ease: Ease,
    pub(crate) duration: f64,
    pub(crate) bounds: TriggerBounds,
    pub(crate) last_progress: Option<f64>,
    pub(crate) played: bool,
}

impl ScrollObserver {
    /// Interpolated state at trigger progress `p`.
    pub(crate) fn state_at(&self, p: f64) -> VisualState {
        VisualState::lerp(&self.from, &self.to, self.ease.apply(p))
    }

    /// Re-measure the window against the current layout.
    pub(crate) fn remeasure(&mut self, rect: Rect, viewport: Viewport) {
        self.bounds = self.window.resolve(rect, viewport);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/scroll.rs"]
mod tests;
