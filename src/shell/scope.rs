use std::rc::Rc;

use crate::{
    dom::{Dom, ElementId, EventKind, ListenerId},
    foundation::error::MotionResult,
    runtime::timeline::{RuntimeHandle, ScopeId},
    shell::config::{ScrollEffectConfig, ShellConfig},
    shell::entrance::EntranceAnimator,
    shell::registry::{EffectRegistry, EffectRole},
    shell::reveal::ScrollLinkedAnimator,
    shell::split::{SplitText, TextSplitter},
    shell::tilt::TiltController,
};

/// A raw event listener attached by a scope, released on disposal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawListenerBinding {
    /// Element the listener is attached to.
    pub element: ElementId,
    /// Event kind.
    pub kind: EventKind,
    /// Backend handle of the handler.
    pub listener: ListenerId,
}

impl RawListenerBinding {
    /// Record a binding.
    pub fn new(element: ElementId, kind: EventKind, listener: ListenerId) -> Self {
        Self {
            element,
            kind,
            listener,
        }
    }
}

/// Owner of every effect and listener registered for one mounted view.
///
/// Creation registers, in order: the title entrance, the hero visual, section
/// reveals, device visuals and tilt cards. Disposal kills the effects (newest
/// first), then anything else the scope still owns in the runtime, then removes
/// the raw listeners. Dropping an undisposed scope disposes it.
pub struct RootScope {
    id: ScopeId,
    root: ElementId,
    dom: Rc<dyn Dom>,
    runtime: RuntimeHandle,
    effects: EffectRegistry,
    listeners: Vec<RawListenerBinding>,
    split: Option<SplitText>,
    disposed: bool,
}

impl std::fmt::Debug for RootScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RootScope")
            .field("id", &self.id)
            .field("root", &self.root)
            .field("effects", &self.effects.len())
            .field("listeners", &self.listeners.len())
            .field("disposed", &self.disposed)
            .finish()
    }
}

impl RootScope {
    /// Bind the shell's effects to the elements under `root`.
    ///
    /// Missing targets are skipped. Backend failures skip the affected effect and
    /// are logged; only an invalid `config` is an error.
    #[tracing::instrument(skip(runtime, config))]
    pub fn create(
        runtime: &RuntimeHandle,
        root: ElementId,
        config: &ShellConfig,
    ) -> MotionResult<Self> {
        config.validate()?;
        let dom = Rc::clone(runtime.borrow().dom());
        let id = runtime.borrow_mut().open_scope();
        let mut scope = Self {
            id,
            root,
            dom,
            runtime: runtime.clone(),
            effects: EffectRegistry::new(),
            listeners: Vec::new(),
            split: None,
            disposed: false,
        };

        scope.register_entrance(config);
        let roles = &config.roles;
        let hero: Vec<ElementId> = scope
            .dom
            .query_first(root, &roles.hero_visual)
            .into_iter()
            .collect();
        scope.register_scroll_effects(&hero, &config.hero_visual, EffectRole::HeroVisual);
        let sections = scope.dom.query_all(root, &roles.reveal_section);
        scope.register_scroll_effects(&sections, &config.reveal, EffectRole::Reveal);
        let devices = scope.dom.query_all(root, &roles.device_visual);
        scope.register_scroll_effects(&devices, &config.device, EffectRole::Device);
        scope.register_tilts(config);

        tracing::info!(
            scope = ?id,
            effects = scope.effects.len(),
            listeners = scope.listeners.len(),
            "root scope created"
        );
        Ok(scope)
    }

    fn register_entrance(&mut self, config: &ShellConfig) {
        let Some(title) = self.dom.query_first(self.root, &config.roles.hero_title) else {
            tracing::debug!(class = %config.roles.hero_title, "no hero title");
            return;
        };
        let split = match TextSplitter::new(config.split.clone()).split(&*self.dom, title) {
            Ok(Some(split)) => split,
            Ok(None) => {
                tracing::debug!(?title, "hero title has no text");
                return;
            }
            Err(err) => {
                tracing::warn!(?title, %err, "hero title split failed");
                return;
            }
        };
        let started = EntranceAnimator::new(config.entrance.clone()).start(
            &mut self.runtime.borrow_mut(),
            self.id,
            &split.units,
        );
        match started {
            Ok(Some(effect)) => self.effects.push(effect, EffectRole::Entrance),
            Ok(None) => {}
            Err(err) => tracing::warn!(?title, %err, "entrance not started"),
        }
        self.split = Some(split);
    }

    fn register_scroll_effects(
        &mut self,
        targets: &[ElementId],
        config: &ScrollEffectConfig,
        role: EffectRole,
    ) {
        if targets.is_empty() {
            tracing::debug!(?role, "no targets");
        }
        for (index, &target) in targets.iter().enumerate() {
            let attached = ScrollLinkedAnimator::from_config(config, index).attach(
                &mut self.runtime.borrow_mut(),
                self.id,
                target,
            );
            match attached {
                Ok(effect) => self.effects.push(effect, role),
                Err(err) => tracing::warn!(?role, ?target, %err, "scroll effect skipped"),
            }
        }
    }

    fn register_tilts(&mut self, config: &ShellConfig) {
        let tilt = TiltController::new(config.tilt.clone());
        for card in self.dom.query_all(self.root, &config.roles.tilt_card) {
            match tilt.attach(
                &self.dom,
                &self.runtime,
                self.id,
                card,
                &config.roles.tilt_inner,
            ) {
                Ok(Some(bindings)) => self.listeners.extend(bindings),
                Ok(None) => {}
                Err(err) => tracing::warn!(?card, %err, "tilt skipped"),
            }
        }
    }

    /// Identity of this scope in the runtime.
    pub fn id(&self) -> ScopeId {
        self.id
    }

    /// Root element the scope is bound to.
    pub fn root(&self) -> ElementId {
        self.root
    }

    /// Registered effects, in registration order.
    pub fn effects(&self) -> &EffectRegistry {
        &self.effects
    }

    /// Raw listeners attached by this scope.
    pub fn listeners(&self) -> &[RawListenerBinding] {
        &self.listeners
    }

    /// Units produced by splitting the hero title, if it was split.
    pub fn split(&self) -> Option<&SplitText> {
        self.split.as_ref()
    }

    /// Return `true` once [`dispose`](Self::dispose) has run.
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Revert every effect and remove every listener. Idempotent.
    ///
    /// # Panics
    /// If the runtime is borrowed elsewhere (disposing from inside a runtime call).
    #[tracing::instrument(skip(self), fields(scope = ?self.id))]
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;

        let (reverted, stragglers) = {
            let mut runtime = self.runtime.borrow_mut();
            let reverted = self.effects.revert(&mut runtime);
            let stragglers = runtime.kill_owned_by(self.id);
            // Split units keep their last frame but are replaced on the next mount.
            if let Some(split) = &self.split {
                runtime.release(&split.units);
            }
            (reverted, stragglers)
        };
        let mut removed = 0;
        for binding in self.listeners.drain(..) {
            if self
                .dom
                .remove_listener(binding.element, binding.kind, binding.listener)
            {
                removed += 1;
            } else {
                tracing::debug!(?binding, "listener already gone");
            }
        }
        tracing::info!(reverted, stragglers, removed, "root scope disposed");
    }
}

impl Drop for RootScope {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// Mount/unmount driver that keeps at most one live [`RootScope`] per view.
#[derive(Debug)]
pub struct ViewLifecycle {
    runtime: RuntimeHandle,
    config: ShellConfig,
    scope: Option<RootScope>,
}

impl ViewLifecycle {
    /// Lifecycle for views animated with `config`.
    pub fn new(runtime: RuntimeHandle, config: ShellConfig) -> MotionResult<Self> {
        config.validate()?;
        Ok(Self {
            runtime,
            config,
            scope: None,
        })
    }

    /// Mount the view at `root`, disposing any previous scope first.
    pub fn mount(&mut self, root: ElementId) -> MotionResult<&RootScope> {
        self.unmount();
        let scope = RootScope::create(&self.runtime, root, &self.config)?;
        Ok(self.scope.insert(scope))
    }

    /// Dispose the live scope. Returns `false` if nothing was mounted.
    pub fn unmount(&mut self) -> bool {
        match self.scope.take() {
            Some(mut scope) => {
                scope.dispose();
                true
            }
            None => false,
        }
    }

    /// The live scope, if mounted.
    pub fn scope(&self) -> Option<&RootScope> {
        self.scope.as_ref()
    }

    /// Runtime the view is animated by.
    pub fn runtime(&self) -> &RuntimeHandle {
        &self.runtime
    }

    /// Configuration used for every mount.
    pub fn config(&self) -> &ShellConfig {
        &self.config
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shell/scope.rs"]
mod tests;
