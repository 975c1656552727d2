use std::str::FromStr;

use crate::foundation::error::MotionError;

/// Easing functions used to map normalized animation progress.
///
/// Variants also deserialize from the `powerN.{in,out,inOut}` names common in web
/// animation tooling (`power1` = quad, `power2` = cubic, `power3` = quart).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Ease {
    /// Linear interpolation.
    #[serde(alias = "none", alias = "linear")]
    Linear,
    /// Quadratic ease-in.
    #[serde(alias = "power1.in")]
    InQuad,
    /// Quadratic ease-out.
    #[serde(alias = "power1.out")]
    OutQuad,
    /// Quadratic ease-in/out.
    #[serde(alias = "power1.inOut")]
    InOutQuad,
    /// Cubic ease-in.
    #[serde(alias = "power2.in")]
    InCubic,
    /// Cubic ease-out.
    #[serde(alias = "power2.out")]
    OutCubic,
    /// Cubic ease-in/out.
    #[serde(alias = "power2.inOut")]
    InOutCubic,
    /// Quartic ease-in.
    #[serde(alias = "power3.in")]
    InQuart,
    /// Quartic ease-out.
    #[serde(alias = "power3.out")]
    OutQuart,
    /// Quartic ease-in/out.
    #[serde(alias = "power3.inOut")]
    InOutQuart,
}

impl Ease {
    /// Every supported curve, in declaration order.
    pub const ALL: [Ease; 10] = [
        Ease::Linear,
        Ease::InQuad,
        Ease::OutQuad,
        Ease::InOutQuad,
        Ease::InCubic,
        Ease::OutCubic,
        Ease::InOutCubic,
        Ease::InQuart,
        Ease::OutQuart,
        Ease::InOutQuart,
    ];

    /// Apply this easing function to normalized progress `t` in `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
            Self::InQuart => t.powi(4),
            Self::OutQuart => 1.0 - (1.0 - t).powi(4),
            Self::InOutQuart => {
                if t < 0.5 {
                    8.0 * t.powi(4)
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(4) / 2.0)
                }
            }
        }
    }
}

impl FromStr for Ease {
    type Err = MotionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let ease = match s.trim() {
            "Linear" | "linear" | "none" => Self::Linear,
            "InQuad" | "power1.in" => Self::InQuad,
            "OutQuad" | "power1.out" | "power1" => Self::OutQuad,
            "InOutQuad" | "power1.inOut" => Self::InOutQuad,
            "InCubic" | "power2.in" => Self::InCubic,
            "OutCubic" | "power2.out" | "power2" => Self::OutCubic,
            "InOutCubic" | "power2.inOut" => Self::InOutCubic,
            "InQuart" | "power3.in" => Self::InQuart,
            "OutQuart" | "power3.out" | "power3" => Self::OutQuart,
            "InOutQuart" | "power3.inOut" => Self::InOutQuart,
            other => {
                return Err(MotionError::validation(format!("unknown ease '{other}'")));
            }
        };
        Ok(ease)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
