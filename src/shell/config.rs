//! Declarative shell configuration.
//!
//! Every field has a default; [`ShellConfig::default`] reproduces the launch shell
//! exactly, and partial JSON documents override only what they name.

use crate::{
    animation::ease::Ease,
    animation::state::PropertySet,
    foundation::error::{MotionError, MotionResult},
    runtime::scroll::ScrollTriggerWindow,
    runtime::timeline::ObserveSpec,
};

/// Complete motion configuration of the shell.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Class names that mark structural roles in the page.
    pub roles: RoleNames,
    /// Per-character title splitting.
    pub split: SplitConfig,
    /// Hero title entrance.
    pub entrance: EntranceConfig,
    /// Hero visual scroll effect.
    pub hero_visual: ScrollEffectConfig,
    /// Section reveal scroll effect.
    pub reveal: ScrollEffectConfig,
    /// Device visual scroll effect.
    pub device: ScrollEffectConfig,
    /// Pointer tilt.
    pub tilt: TiltConfig,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            roles: RoleNames::default(),
            split: SplitConfig::default(),
            entrance: EntranceConfig::default(),
            hero_visual: ScrollEffectConfig::hero_visual(),
            reveal: ScrollEffectConfig::reveal(),
            device: ScrollEffectConfig::device(),
            tilt: TiltConfig::default(),
        }
    }
}

impl ShellConfig {
    /// Parse a (possibly partial) JSON document and validate it.
    pub fn from_json_str(s: &str) -> MotionResult<Self> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate all sections.
    pub fn validate(&self) -> MotionResult<()> {
        self.roles.validate()?;
        self.split.validate()?;
        self.entrance.validate()?;
        self.hero_visual.validate("hero_visual")?;
        self.reveal.validate("reveal")?;
        self.device.validate("device")?;
        self.tilt.validate()?;
        Ok(())
    }
}

/// Class names of the structural roles.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RoleNames {
    /// Title split into letters.
    pub hero_title: String,
    /// The hero's 3D visual.
    pub hero_visual: String,
    /// Sections revealed on scroll.
    pub reveal_section: String,
    /// Device mockups with alternating rotation.
    pub device_visual: String,
    /// Cards that tilt under the pointer.
    pub tilt_card: String,
    /// The element inside a tilt card that actually rotates.
    pub tilt_inner: String,
}

impl Default for RoleNames {
    fn default() -> Self {
        Self {
            hero_title: "hero-title".to_owned(),
            hero_visual: "hero-visual".to_owned(),
            reveal_section: "reveal-section".to_owned(),
            device_visual: "device-visual".to_owned(),
            tilt_card: "tilt-card".to_owned(),
            tilt_inner: "tilt-inner".to_owned(),
        }
    }
}

impl RoleNames {
    fn validate(&self) -> MotionResult<()> {
        let names = [
            ("hero_title", &self.hero_title),
            ("hero_visual", &self.hero_visual),
            ("reveal_section", &self.reveal_section),
            ("device_visual", &self.device_visual),
            ("tilt_card", &self.tilt_card),
            ("tilt_inner", &self.tilt_inner),
        ];
        for (role, class) in names {
            if class.trim().is_empty() {
                return Err(MotionError::validation(format!(
                    "roles.{role} must not be empty"
                )));
            }
        }
        Ok(())
    }
}

/// Margins applied to split text units.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SplitConfig {
    /// `margin-right` of a unit holding a space.
    pub space_margin: String,
    /// `margin-right` of every other unit.
    pub char_margin: String,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            space_margin: "0.25rem".to_owned(),
            char_margin: "0.08rem".to_owned(),
        }
    }
}

impl SplitConfig {
    fn validate(&self) -> MotionResult<()> {
        if self.space_margin.trim().is_empty() || self.char_margin.trim().is_empty() {
            return Err(MotionError::validation("split margins must not be empty"));
        }
        Ok(())
    }
}

/// Staggered entrance of the split title.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EntranceConfig {
    /// Start state of every unit.
    pub from: PropertySet,
    /// End state of every unit.
    pub to: PropertySet,
    /// Per-unit duration in seconds.
    pub duration: f64,
    /// Delay between consecutive units in seconds.
    pub stagger: f64,
    /// Easing curve.
    pub ease: Ease,
}

impl Default for EntranceConfig {
    fn default() -> Self {
        Self {
            from: PropertySet::new().opacity(0.0).y(-20.0),
            to: PropertySet::new().opacity(1.0).y(0.0),
            duration: 1.2,
            stagger: 0.035,
            ease: Ease::OutQuart,
        }
    }
}

impl EntranceConfig {
    fn validate(&self) -> MotionResult<()> {
        validate_duration("entrance.duration", self.duration)?;
        if !self.stagger.is_finite() || self.stagger < 0.0 {
            return Err(MotionError::validation(
                "entrance.stagger must be finite and >= 0",
            ));
        }
        validate_states("entrance", &self.from, &self.to)
    }
}

/// One scroll-linked effect.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ScrollEffectConfig {
    /// State at progress 0.
    pub from: PropertySet,
    /// State at progress 1.
    pub to: PropertySet,
    /// Ease applied to progress.
    pub ease: Ease,
    /// Play duration when the window does not scrub.
    pub duration: f64,
    /// Trigger window.
    pub window: ScrollTriggerWindow,
    /// Flip the sign of `from.rotate_y` per element: even index negative, odd positive.
    pub alternate_rotate_y: bool,
}

impl Default for ScrollEffectConfig {
    fn default() -> Self {
        Self::reveal()
    }
}

impl ScrollEffectConfig {
    /// Hero visual: rises, grows and untwists into place.
    pub fn hero_visual() -> Self {
        Self {
            from: PropertySet::new()
                .opacity(0.0)
                .y(80.0)
                .scale(0.85)
                .rotate_x(-18.0)
                .rotate_y(12.0),
            to: PropertySet::new()
                .opacity(1.0)
                .y(0.0)
                .scale(1.0)
                .rotate_x(0.0)
                .rotate_y(0.0),
            ease: Ease::OutQuart,
            duration: 1.6,
            window: ScrollTriggerWindow::default(),
            alternate_rotate_y: false,
        }
    }

    /// Content sections: fade and rise.
    pub fn reveal() -> Self {
        Self {
            from: PropertySet::new().opacity(0.0).y(60.0),
            to: PropertySet::new().opacity(1.0).y(0.0),
            ease: Ease::OutQuart,
            duration: 1.0,
            window: ScrollTriggerWindow::default(),
            alternate_rotate_y: false,
        }
    }

    /// Device mockups: tilted in 3D, alternating side.
    pub fn device() -> Self {
        Self {
            from: PropertySet::new()
                .opacity(0.0)
                .y(100.0)
                .rotate_x(24.0)
                .rotate_y(18.0)
                .scale(0.9),
            to: PropertySet::new()
                .opacity(1.0)
                .y(0.0)
                .rotate_x(0.0)
                .rotate_y(0.0)
                .scale(1.0),
            ease: Ease::OutQuart,
            duration: 1.4,
            window: ScrollTriggerWindow::default(),
            alternate_rotate_y: true,
        }
    }

    /// Runtime description of this effect.
    pub fn observe_spec(&self) -> ObserveSpec {
        ObserveSpec {
            from: self.from,
            to: self.to,
            ease: self.ease,
            duration: self.duration,
            window: self.window,
        }
    }

    fn validate(&self, section: &str) -> MotionResult<()> {
        validate_duration(&format!("{section}.duration"), self.duration)?;
        self.window.validate()?;
        validate_states(section, &self.from, &self.to)
    }
}

/// Pointer tilt parameters.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TiltConfig {
    /// Rotation in degrees when the pointer sits on an edge.
    pub max_rotation: f64,
    /// Scale while hovered.
    pub hover_scale: f64,
    /// Duration of the follow tween.
    pub move_duration: f64,
    /// Ease of the follow tween.
    pub move_ease: Ease,
    /// Duration of the return-to-rest tween.
    pub leave_duration: f64,
    /// Ease of the return-to-rest tween.
    pub leave_ease: Ease,
    /// CSS `perspective` set on each card.
    pub perspective: String,
}

impl Default for TiltConfig {
    fn default() -> Self {
        Self {
            max_rotation: 12.0,
            hover_scale: 1.03,
            move_duration: 0.3,
            move_ease: Ease::InOutCubic,
            leave_duration: 0.5,
            leave_ease: Ease::OutQuart,
            perspective: "1000px".to_owned(),
        }
    }
}

impl TiltConfig {
    fn validate(&self) -> MotionResult<()> {
        validate_duration("tilt.move_duration", self.move_duration)?;
        validate_duration("tilt.leave_duration", self.leave_duration)?;
        if !self.max_rotation.is_finite() || !self.hover_scale.is_finite() {
            return Err(MotionError::validation(
                "tilt.max_rotation and tilt.hover_scale must be finite",
            ));
        }
        if self.perspective.trim().is_empty() {
            return Err(MotionError::validation("tilt.perspective must not be empty"));
        }
        Ok(())
    }
}

fn validate_duration(field: &str, value: f64) -> MotionResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(MotionError::validation(format!(
            "{field} must be finite and > 0"
        )));
    }
    Ok(())
}

fn validate_states(section: &str, from: &PropertySet, to: &PropertySet) -> MotionResult<()> {
    if let Some(name) = from.first_non_finite() {
        return Err(MotionError::validation(format!(
            "{section}.from.{name} must be finite"
        )));
    }
    if let Some(name) = to.first_non_finite() {
        return Err(MotionError::validation(format!(
            "{section}.to.{name} must be finite"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/shell/config.rs"]
mod tests;
