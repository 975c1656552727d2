use crate::runtime::timeline::{EffectId, MotionRuntime};

/// What a registered effect animates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectRole {
    /// Hero title letter entrance.
    Entrance,
    /// Hero visual scroll effect.
    HeroVisual,
    /// Section reveal scroll effect.
    Reveal,
    /// Device visual scroll effect.
    Device,
}

/// One effect owned by a scope.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EffectHandle {
    /// Runtime handle.
    pub id: EffectId,
    /// What it animates.
    pub role: EffectRole,
}

/// Ordered collection of the effects a scope created.
#[derive(Clone, Debug, Default)]
pub struct EffectRegistry {
    handles: Vec<EffectHandle>,
}

impl EffectRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an effect.
    pub fn push(&mut self, id: EffectId, role: EffectRole) {
        self.handles.push(EffectHandle { id, role });
    }

    /// Handles in registration order.
    pub fn handles(&self) -> &[EffectHandle] {
        &self.handles
    }

    /// Number of recorded effects.
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Return `true` if nothing is recorded.
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Number of recorded effects with `role`.
    pub fn count(&self, role: EffectRole) -> usize {
        self.handles.iter().filter(|h| h.role == role).count()
    }

    /// Kill every recorded effect, newest first, and empty the registry.
    ///
    /// Effects that already finished on their own are skipped. Returns how many
    /// were still live.
    pub fn revert(&mut self, runtime: &mut MotionRuntime) -> usize {
        let mut killed = 0;
        while let Some(handle) = self.handles.pop() {
            if runtime.kill(handle.id) {
                killed += 1;
            }
        }
        killed
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shell/registry.rs"]
mod tests;
