use crate::{
    animation::tween::TweenSpec,
    dom::ElementId,
    foundation::error::MotionResult,
    runtime::timeline::{EffectId, MotionRuntime, RevertPolicy, ScopeId},
    shell::config::EntranceConfig,
};

/// One-shot staggered entrance of the split title units.
#[derive(Clone, Debug, Default)]
pub struct EntranceAnimator {
    config: EntranceConfig,
}

impl EntranceAnimator {
    /// Animator using the given timing and states.
    pub fn new(config: EntranceConfig) -> Self {
        Self { config }
    }

    /// Tween description covering every unit.
    pub fn tween(&self) -> TweenSpec {
        TweenSpec::from_to(
            self.config.from,
            self.config.to,
            self.config.duration,
            self.config.ease,
        )
        .with_stagger(self.config.stagger)
    }

    /// Wall-clock length of the entrance over `units` elements.
    pub fn total_duration(&self, units: usize) -> f64 {
        self.tween().total_duration(units)
    }

    /// Start the entrance now. Returns `None` when there is nothing to animate.
    ///
    /// Killing the effect stops it where it is; applied state is not reversed.
    pub fn start(
        &self,
        runtime: &mut MotionRuntime,
        owner: ScopeId,
        units: &[ElementId],
    ) -> MotionResult<Option<EffectId>> {
        if units.is_empty() {
            return Ok(None);
        }
        let id = runtime.play(owner, &self.tween(), units, RevertPolicy::Abandon)?;
        tracing::debug!(?id, units = units.len(), "entrance started");
        Ok(Some(id))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shell/entrance.rs"]
mod tests;
