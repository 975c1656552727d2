use crate::{
    dom::ElementId,
    foundation::error::MotionResult,
    runtime::timeline::{EffectId, MotionRuntime, ObserveSpec, RevertPolicy, ScopeId},
    shell::config::ScrollEffectConfig,
};

/// Which way an alternating element is rotated around its vertical axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlternateSide {
    /// Negative rotation (even positions).
    Negative,
    /// Positive rotation (odd positions).
    Positive,
}

impl AlternateSide {
    /// Side for the element at `index` in document order.
    pub fn for_index(index: usize) -> Self {
        if index % 2 == 0 {
            Self::Negative
        } else {
            Self::Positive
        }
    }

    /// `-1.0` or `1.0`.
    pub fn sign(self) -> f64 {
        match self {
            Self::Negative => -1.0,
            Self::Positive => 1.0,
        }
    }

    /// `value`'s magnitude with this side's sign.
    pub fn apply(self, value: f64) -> f64 {
        self.sign() * value.abs()
    }
}

/// Interpolates an element between two states as the page scrolls through its
/// trigger window.
#[derive(Clone, Debug, PartialEq)]
pub struct ScrollLinkedAnimator {
    spec: ObserveSpec,
}

impl ScrollLinkedAnimator {
    /// Animator for an explicit effect description.
    pub fn new(spec: ObserveSpec) -> Self {
        Self { spec }
    }

    /// Animator for the `index`-th element (document order) of a configured role.
    pub fn from_config(config: &ScrollEffectConfig, index: usize) -> Self {
        let anim = Self::new(config.observe_spec());
        if config.alternate_rotate_y {
            anim.with_side(AlternateSide::for_index(index))
        } else {
            anim
        }
    }

    /// Default hero visual effect.
    pub fn hero_visual() -> Self {
        Self::from_config(&ScrollEffectConfig::hero_visual(), 0)
    }

    /// Default section reveal effect.
    pub fn reveal() -> Self {
        Self::from_config(&ScrollEffectConfig::reveal(), 0)
    }

    /// Default device visual effect, rotated to `side`.
    pub fn device(side: AlternateSide) -> Self {
        Self::new(ScrollEffectConfig::device().observe_spec()).with_side(side)
    }

    /// Force the sign of the start rotation around the vertical axis.
    pub fn with_side(mut self, side: AlternateSide) -> Self {
        self.spec.from.rotate_y = self.spec.from.rotate_y.map(|v| side.apply(v));
        self
    }

    /// Effect description handed to the runtime.
    pub fn spec(&self) -> &ObserveSpec {
        &self.spec
    }

    /// Register the scroll observer on `target`.
    ///
    /// Killing the effect detaches the observer and restores the element's
    /// pre-effect inline state.
    pub fn attach(
        &self,
        runtime: &mut MotionRuntime,
        owner: ScopeId,
        target: ElementId,
    ) -> MotionResult<EffectId> {
        runtime.observe(owner, target, &self.spec, RevertPolicy::Restore)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shell/reveal.rs"]
mod tests;
