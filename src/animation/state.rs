/// Interpolation contract for animated value types.
pub trait Lerp: Sized {
    /// Interpolate from `a` to `b` with normalized factor `t` in `[0, 1]`.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        // Weighted form so t=0 and t=1 reproduce the endpoints bit-for-bit.
        a * (1.0 - t) + b * t
    }
}

/// Full set of animated properties of one element.
///
/// Translation is vertical only; rotations are in degrees.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct VisualState {
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Vertical offset in CSS pixels.
    pub y: f64,
    /// Uniform scale factor.
    pub scale: f64,
    /// Rotation around the horizontal axis, degrees.
    pub rotate_x: f64,
    /// Rotation around the vertical axis, degrees.
    pub rotate_y: f64,
}

impl VisualState {
    /// Identity state: fully opaque, untransformed.
    pub const NEUTRAL: Self = Self {
        opacity: 1.0,
        y: 0.0,
        scale: 1.0,
        rotate_x: 0.0,
        rotate_y: 0.0,
    };

    /// Return a copy with every property present in `set` overridden.
    pub fn with(self, set: &PropertySet) -> Self {
        Self {
            opacity: set.opacity.unwrap_or(self.opacity),
            y: set.y.unwrap_or(self.y),
            scale: set.scale.unwrap_or(self.scale),
            rotate_x: set.rotate_x.unwrap_or(self.rotate_x),
            rotate_y: set.rotate_y.unwrap_or(self.rotate_y),
        }
    }

    /// Return `true` when every property is finite.
    pub fn is_finite(&self) -> bool {
        [
            self.opacity,
            self.y,
            self.scale,
            self.rotate_x,
            self.rotate_y,
        ]
        .iter()
        .all(|v| v.is_finite())
    }

    /// Compose the CSS `transform` value for this state.
    pub fn css_transform(&self) -> String {
        format!(
            "translate3d(0px, {}px, 0px) rotateX({}deg) rotateY({}deg) scale({})",
            self.y, self.rotate_x, self.rotate_y, self.scale
        )
    }
}

impl Default for VisualState {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

impl Lerp for VisualState {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self {
            opacity: f64::lerp(&a.opacity, &b.opacity, t),
            y: f64::lerp(&a.y, &b.y, t),
            scale: f64::lerp(&a.scale, &b.scale, t),
            rotate_x: f64::lerp(&a.rotate_x, &b.rotate_x, t),
            rotate_y: f64::lerp(&a.rotate_y, &b.rotate_y, t),
        }
    }
}

/// Partial [`VisualState`]: declared from/to values of an effect.
///
/// Properties left as `None` keep whatever value the element currently has.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PropertySet {
    /// Opacity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    /// Vertical offset (px).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    /// Uniform scale.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
    /// Rotation X (deg).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotate_x: Option<f64>,
    /// Rotation Y (deg).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotate_y: Option<f64>,
}

impl PropertySet {
    /// Empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set opacity.
    pub fn opacity(mut self, v: f64) -> Self {
        self.opacity = Some(v);
        self
    }

    /// Builder: set vertical offset.
    pub fn y(mut self, v: f64) -> Self {
        self.y = Some(v);
        self
    }

    /// Builder: set scale.
    pub fn scale(mut self, v: f64) -> Self {
        self.scale = Some(v);
        self
    }

    /// Builder: set rotation X.
    pub fn rotate_x(mut self, v: f64) -> Self {
        self.rotate_x = Some(v);
        self
    }

    /// Builder: set rotation Y.
    pub fn rotate_y(mut self, v: f64) -> Self {
        self.rotate_y = Some(v);
        self
    }

    /// Return `true` when no property is declared.
    pub fn is_empty(&self) -> bool {
        self.values().iter().all(|(_, v)| v.is_none())
    }

    /// Names and values of all properties, declared or not.
    pub fn values(&self) -> [(&'static str, Option<f64>); 5] {
        [
            ("opacity", self.opacity),
            ("y", self.y),
            ("scale", self.scale),
            ("rotate_x", self.rotate_x),
            ("rotate_y", self.rotate_y),
        ]
    }

    /// Return the first non-finite declared property, if any.
    pub fn first_non_finite(&self) -> Option<&'static str> {
        self.values()
            .into_iter()
            .find(|(_, v)| v.is_some_and(|v| !v.is_finite()))
            .map(|(name, _)| name)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/state.rs"]
mod tests;
