use std::cell::{Ref, RefCell, RefMut};
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

use crate::{
    animation::ease::Ease,
    animation::state::{PropertySet, VisualState},
    animation::tween::{Player, TweenSpec},
    dom::{Dom, ElementId},
    foundation::error::{MotionError, MotionResult},
    runtime::scroll::{ScrollObserver, ScrollTriggerWindow, TriggerBounds},
    runtime::style::StyleCache,
};

/// Identity of a scope that owns runtime effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScopeId(pub u64);

/// Handle to an effect registered with a [`MotionRuntime`]. Never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EffectId(pub u64);

/// What happens to an element's inline state when its effect is killed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevertPolicy {
    /// Put the element back to its state from before the effect.
    Restore,
    /// Stop animating and leave whatever was last written.
    Abandon,
}

/// Scroll-linked effect description handed to [`MotionRuntime::observe`].
#[derive(Clone, Debug, PartialEq)]
pub struct ObserveSpec {
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
}

enum EffectBody {
    Player(Player),
    Observer(ScrollObserver),
}

struct EffectEntry {
    owner: ScopeId,
    policy: RevertPolicy,
    originals: Vec<(ElementId, Option<VisualState>)>,
    body: EffectBody,
}

/// The animation runtime: time-based players and scroll observers writing to one
/// document.
///
/// Hosts drive it with [`tick`](Self::tick) once per animation frame and
/// [`on_scroll`](Self::on_scroll) / [`on_resize`](Self::on_resize) from viewport
/// events. Every effect carries the [`ScopeId`] that created it.
pub struct MotionRuntime {
    dom: Rc<dyn Dom>,
    now: f64,
    next_effect: u64,
    next_scope: u64,
    effects: BTreeMap<EffectId, EffectEntry>,
    styles: StyleCache,
}

impl std::fmt::Debug for MotionRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MotionRuntime")
            .field("now", &self.now)
            .field("effects", &self.effects.len())
            .field("observers", &self.active_observers())
            .finish()
    }
}

impl MotionRuntime {
    /// Runtime writing to `dom`, with its clock at 0.
    pub fn new(dom: Rc<dyn Dom>) -> Self {
        Self {
            dom,
            now: 0.0,
            next_effect: 0,
            next_scope: 0,
            effects: BTreeMap::new(),
            styles: StyleCache::default(),
        }
    }

    /// Wrap into a shared handle.
    pub fn into_handle(self) -> RuntimeHandle {
        RuntimeHandle(Rc::new(RefCell::new(self)))
    }

    /// Document this runtime writes to.
    pub fn dom(&self) -> &Rc<dyn Dom> {
        &self.dom
    }

    /// Current clock time in seconds.
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Allocate a fresh owner identity.
    pub fn open_scope(&mut self) -> ScopeId {
        let id = ScopeId(self.next_scope);
        self.next_scope += 1;
        id
    }

    /// Last state the runtime wrote to `el`.
    pub fn state_of(&self, el: ElementId) -> Option<VisualState> {
        self.styles.get(el)
    }

    /// Return `true` while `id` is registered.
    pub fn is_active(&self, id: EffectId) -> bool {
        self.effects.contains_key(&id)
    }

    /// Number of registered effects.
    pub fn active_effects(&self) -> usize {
        self.effects.len()
    }

    /// Number of registered scroll observers.
    pub fn active_observers(&self) -> usize {
        self.effects
            .values()
            .filter(|e| matches!(e.body, EffectBody::Observer(_)))
            .count()
    }

    /// Number of effects owned by `scope`.
    pub fn effects_owned_by(&self, scope: ScopeId) -> usize {
        self.effects.values().filter(|e| e.owner == scope).count()
    }

    /// Resolved trigger bounds of an observer effect.
    pub fn trigger_bounds(&self, id: EffectId) -> Option<TriggerBounds> {
        match &self.effects.get(&id)?.body {
            EffectBody::Observer(obs) => Some(obs.bounds),
            EffectBody::Player(_) => None,
        }
    }

    fn alloc_effect(&mut self) -> EffectId {
        let id = EffectId(self.next_effect);
        self.next_effect += 1;
        id
    }

    /// Start a time-based tween on `targets` at the current clock time.
    ///
    /// The start state is rendered immediately.
    pub fn play(
        &mut self,
        owner: ScopeId,
        spec: &TweenSpec,
        targets: &[ElementId],
        policy: RevertPolicy,
    ) -> MotionResult<EffectId> {
        spec.validate()?;
        if targets.is_empty() {
            return Err(MotionError::animation("tween needs at least one target"));
        }
        if spec.overwrite && targets.len() == 1 {
            let target = targets[0];
            let replaced: Vec<EffectId> = self
                .effects
                .iter()
                .filter(|(_, e)| matches!(&e.body, EffectBody::Player(p) if p.drives_only(target)))
                .map(|(id, _)| *id)
                .collect();
            for id in replaced {
                self.effects.remove(&id);
            }
        }

        let styles = &self.styles;
        let player = Player::start(spec, targets, self.now, |el| styles.get_or_neutral(el));
        let originals = targets.iter().map(|&el| (el, self.styles.get(el))).collect();
        for (el, state) in player.sample(self.now) {
            self.styles.apply(&*self.dom, el, state);
        }

        let id = self.alloc_effect();
        tracing::trace!(?id, ?owner, targets = targets.len(), "player started");
        self.effects.insert(
            id,
            EffectEntry {
                owner,
                policy,
                originals,
                body: EffectBody::Player(player),
            },
        );
        Ok(id)
    }

    /// Attach a scroll observer to `target` and render it at the current scroll.
    pub fn observe(
        &mut self,
        owner: ScopeId,
        target: ElementId,
        spec: &ObserveSpec,
        policy: RevertPolicy,
    ) -> MotionResult<EffectId> {
        spec.window.validate()?;
        if !spec.duration.is_finite() || spec.duration <= 0.0 {
            return Err(MotionError::animation(
                "observer duration must be finite and > 0",
            ));
        }
        if let Some(name) = spec
            .from
            .first_non_finite()
            .or_else(|| spec.to.first_non_finite())
        {
            return Err(MotionError::animation(format!(
                "observer property '{name}' must be finite"
            )));
        }

        let original = self.styles.get(target);
        let base = original.unwrap_or(VisualState::NEUTRAL);
        let from = base.with(&spec.from);
        let viewport = self.dom.viewport();
        let bounds = spec.window.resolve(self.dom.layout_rect(target), viewport);
        let observer = ScrollObserver {
            target,
            window: spec.window,
            from,
            to: from.with(&spec.to),
            ease: spec.ease,
            duration: spec.duration,
            bounds,
            last_progress: None,
            played: false,
        };

        let id = self.alloc_effect();
        tracing::debug!(
            ?id,
            ?owner,
            ?target,
            start = bounds.start,
            end = bounds.end,
            "scroll observer attached"
        );
        self.effects.insert(
            id,
            EffectEntry {
                owner,
                policy,
                originals: vec![(target, original)],
                body: EffectBody::Observer(observer),
            },
        );
        // Until the first update the element sits at its from-state.
        self.styles.apply(&*self.dom, target, from);
        self.update_observer(id, viewport.scroll_y);
        Ok(id)
    }

    /// Advance the clock to `now` (seconds) and render every running player.
    ///
    /// Finished players render their end state once and are dropped.
    pub fn tick(&mut self, now: f64) {
        if now > self.now {
            self.now = now;
        }
        let mut finished = Vec::new();
        for (id, entry) in &self.effects {
            let EffectBody::Player(player) = &entry.body else {
                continue;
            };
            let complete = player.is_complete(self.now);
            let states = if complete {
                player.end_states()
            } else {
                player.sample(self.now)
            };
            for (el, state) in states {
                self.styles.apply(&*self.dom, el, state);
            }
            if complete {
                finished.push(*id);
            }
        }
        for id in finished {
            self.effects.remove(&id);
        }
    }

    /// Re-evaluate every observer against the current scroll offset.
    pub fn on_scroll(&mut self) {
        let scroll_y = self.dom.viewport().scroll_y;
        let ids: Vec<EffectId> = self.observer_ids();
        for id in ids {
            self.update_observer(id, scroll_y);
        }
    }

    /// Recompute every trigger window (they depend on viewport height), then
    /// re-render at the current scroll offset.
    #[tracing::instrument(skip(self))]
    pub fn on_resize(&mut self) {
        let viewport = self.dom.viewport();
        for entry in self.effects.values_mut() {
            if let EffectBody::Observer(obs) = &mut entry.body {
                obs.remeasure(self.dom.layout_rect(obs.target), viewport);
                obs.last_progress = None;
            }
        }
        self.on_scroll();
    }

    fn observer_ids(&self) -> Vec<EffectId> {
        self.effects
            .iter()
            .filter(|(_, e)| matches!(e.body, EffectBody::Observer(_)))
            .map(|(id, _)| *id)
            .collect()
    }

    fn update_observer(&mut self, id: EffectId, scroll_y: f64) {
        let Some(entry) = self.effects.get_mut(&id) else {
            return;
        };
        let owner = entry.owner;
        let EffectBody::Observer(obs) = &mut entry.body else {
            return;
        };

        if obs.window.scrub {
            let p = obs.bounds.progress(scroll_y);
            if obs.last_progress != Some(p) {
                obs.last_progress = Some(p);
                let (target, state) = (obs.target, obs.state_at(p));
                self.styles.apply(&*self.dom, target, state);
            }
            return;
        }

        if obs.played || scroll_y < obs.bounds.start {
            return;
        }
        obs.played = true;
        let spec = TweenSpec::to(
            PropertySet {
                opacity: Some(obs.to.opacity),
                y: Some(obs.to.y),
                scale: Some(obs.to.scale),
                rotate_x: Some(obs.to.rotate_x),
                rotate_y: Some(obs.to.rotate_y),
            },
            obs.duration,
            obs.ease,
        );
        let target = obs.target;
        if let Err(err) = self.play(owner, &spec, &[target], RevertPolicy::Abandon) {
            tracing::warn!(?id, %err, "failed to play scroll-triggered tween");
        }
    }

    /// Remove an effect, applying its revert policy. Returns `false` if it was
    /// not registered.
    pub fn kill(&mut self, id: EffectId) -> bool {
        let Some(entry) = self.effects.remove(&id) else {
            return false;
        };
        if entry.policy == RevertPolicy::Restore {
            for (el, original) in entry.originals {
                self.styles.restore(&*self.dom, el, original);
            }
        }
        tracing::trace!(?id, owner = ?entry.owner, "effect killed");
        true
    }

    /// Forget `elements` the caller is about to discard, leaving their inline
    /// styles as they are.
    ///
    /// Effects driving any of them are dropped without reverting, their cached
    /// state is cleared and the backend releases its handles. Returns how many
    /// effects were dropped.
    pub fn release(&mut self, elements: &[ElementId]) -> usize {
        let dropped: Vec<EffectId> = self
            .effects
            .iter()
            .filter(|(_, e)| e.originals.iter().any(|(el, _)| elements.contains(el)))
            .map(|(id, _)| *id)
            .collect();
        for id in &dropped {
            self.effects.remove(id);
        }
        for &el in elements {
            self.styles.release(el);
            self.dom.release(el);
        }
        tracing::debug!(
            elements = elements.len(),
            effects = dropped.len(),
            "elements released"
        );
        dropped.len()
    }

    /// Kill every effect owned by `scope`, newest first. Returns how many were killed.
    pub fn kill_owned_by(&mut self, scope: ScopeId) -> usize {
        let owned: Vec<EffectId> = self
            .effects
            .iter()
            .rev()
            .filter(|(_, e)| e.owner == scope)
            .map(|(id, _)| *id)
            .collect();
        owned.iter().filter(|id| self.kill(**id)).count()
    }
}

/// Shared, single-threaded handle to a [`MotionRuntime`].
#[derive(Clone, Debug)]
pub struct RuntimeHandle(Rc<RefCell<MotionRuntime>>);

impl RuntimeHandle {
    /// Immutable access.
    ///
    /// # Panics
    /// If the runtime is mutably borrowed (re-entrant use from inside a runtime call).
    pub fn borrow(&self) -> Ref<'_, MotionRuntime> {
        self.0.borrow()
    }

    /// Mutable access.
    ///
    /// # Panics
    /// If the runtime is already borrowed.
    pub fn borrow_mut(&self) -> RefMut<'_, MotionRuntime> {
        self.0.borrow_mut()
    }

    /// Non-owning handle for event listeners.
    pub fn downgrade(&self) -> WeakRuntime {
        WeakRuntime(Rc::downgrade(&self.0))
    }

    /// See [`MotionRuntime::tick`].
    pub fn tick(&self, now: f64) {
        self.0.borrow_mut().tick(now);
    }

    /// See [`MotionRuntime::on_scroll`].
    pub fn on_scroll(&self) {
        self.0.borrow_mut().on_scroll();
    }

    /// See [`MotionRuntime::on_resize`].
    pub fn on_resize(&self) {
        self.0.borrow_mut().on_resize();
    }
}

/// Weak counterpart of [`RuntimeHandle`].
#[derive(Clone, Debug)]
pub struct WeakRuntime(Weak<RefCell<MotionRuntime>>);

impl WeakRuntime {
    /// Upgrade if the runtime is still alive.
    pub fn upgrade(&self) -> Option<RuntimeHandle> {
        self.0.upgrade().map(RuntimeHandle)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/timeline.rs"]
mod tests;
