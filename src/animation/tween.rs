use crate::{
    animation::ease::Ease,
    animation::state::{Lerp, PropertySet, VisualState},
    dom::ElementId,
    foundation::error::{MotionError, MotionResult},
};

/// Declarative description of a time-based interpolation.
///
/// `from = None` means "start from the element's current state" (a `to` tween);
/// otherwise the declared properties are applied on top of the current state.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TweenSpec {
    /// Declared start state, if any.
    pub from: Option<PropertySet>,
    /// Declared end state.
    pub to: PropertySet,
    /// Per-target duration in seconds.
    pub duration: f64,
    /// Easing curve.
    pub ease: Ease,
    /// Start offset between consecutive targets, in seconds.
    pub stagger: f64,
    /// Replace any running single-target tween on the same element.
    pub overwrite: bool,
}

impl TweenSpec {
    /// `fromTo`-style tween.
    pub fn from_to(from: PropertySet, to: PropertySet, duration: f64, ease: Ease) -> Self {
        Self {
            from: Some(from),
            to,
            duration,
            ease,
            stagger: 0.0,
            overwrite: false,
        }
    }

    /// `to`-style tween starting from the current state.
    pub fn to(to: PropertySet, duration: f64, ease: Ease) -> Self {
        Self {
            from: None,
            to,
            duration,
            ease,
            stagger: 0.0,
            overwrite: false,
        }
    }

    /// Builder: per-target stagger.
    pub fn with_stagger(mut self, each: f64) -> Self {
        self.stagger = each;
        self
    }

    /// Builder: overwrite running tweens on the same target.
    pub fn with_overwrite(mut self) -> Self {
        self.overwrite = true;
        self
    }

    /// Reject non-finite or non-positive durations and negative stagger.
    pub fn validate(&self) -> MotionResult<()> {
        if !self.duration.is_finite() || self.duration <= 0.0 {
            return Err(MotionError::animation(
                "tween duration must be finite and > 0",
            ));
        }
        if !self.stagger.is_finite() || self.stagger < 0.0 {
            return Err(MotionError::animation(
                "tween stagger must be finite and >= 0",
            ));
        }
        if let Some(name) = self
            .from
            .as_ref()
            .and_then(PropertySet::first_non_finite)
            .or_else(|| self.to.first_non_finite())
        {
            return Err(MotionError::animation(format!(
                "tween property '{name}' must be finite"
            )));
        }
        Ok(())
    }

    /// Wall-clock length of the whole tween over `targets` elements.
    pub fn total_duration(&self, targets: usize) -> f64 {
        self.duration + self.stagger * targets.saturating_sub(1) as f64
    }
}

/// Start offsets for `count` staggered targets.
pub fn stagger_offsets(count: usize, each: f64) -> Vec<f64> {
    (0..count).map(|i| i as f64 * each).collect()
}

#[derive(Clone, Debug)]
struct Track {
    target: ElementId,
    offset: f64,
    start: VisualState,
    end: VisualState,
}

/// A running instance of a [`TweenSpec`] bound to concrete targets.
#[derive(Clone, Debug)]
pub struct Player {
    tracks: Vec<Track>,
    started_at: f64,
    duration: f64,
    ease: Ease,
    overwrite: bool,
}

impl Player {
    /// Bind `spec` to `targets`, resolving start/end states from each target's
    /// current state. `current` yields the current state of a target.
    pub fn start(
        spec: &TweenSpec,
        targets: &[ElementId],
        now: f64,
        mut current: impl FnMut(ElementId) -> VisualState,
    ) -> Self {
        let offsets = stagger_offsets(targets.len(), spec.stagger);
        let tracks = targets
            .iter()
            .zip(offsets)
            .map(|(&target, offset)| {
                let base = current(target);
                let start = match &spec.from {
                    Some(from) => base.with(from),
                    None => base,
                };
                Track {
                    target,
                    offset,
                    start,
                    end: start.with(&spec.to),
                }
            })
            .collect();
        Self {
            tracks,
            started_at: now,
            duration: spec.duration,
            ease: spec.ease,
            overwrite: spec.overwrite,
        }
    }

    /// Elements driven by this player, in stagger order.
    pub fn targets(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.tracks.iter().map(|t| t.target)
    }

    /// Return `true` if this player replaces others on the same element.
    pub fn overwrites(&self) -> bool {
        self.overwrite
    }

    /// Return `true` if this player drives exactly `el` and nothing else.
    pub fn drives_only(&self, el: ElementId) -> bool {
        self.tracks.len() == 1 && self.tracks[0].target == el
    }

    /// Sample every track at clock time `now`.
    pub fn sample(&self, now: f64) -> Vec<(ElementId, VisualState)> {
        let elapsed = now - self.started_at;
        self.tracks
            .iter()
            .map(|t| {
                let local = ((elapsed - t.offset) / self.duration).clamp(0.0, 1.0);
                let eased = self.ease.apply(local);
                (t.target, VisualState::lerp(&t.start, &t.end, eased))
            })
            .collect()
    }

    /// Final state of every track.
    pub fn end_states(&self) -> Vec<(ElementId, VisualState)> {
        self.tracks.iter().map(|t| (t.target, t.end)).collect()
    }

    /// Return `true` once the last staggered track has reached its end state.
    pub fn is_complete(&self, now: f64) -> bool {
        let last = self.tracks.last().map_or(0.0, |t| t.offset);
        now - self.started_at >= last + self.duration
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/tween.rs"]
mod tests;
