use std::rc::{Rc, Weak};

use crate::{
    animation::state::PropertySet,
    animation::tween::TweenSpec,
    dom::{Dom, ElementId, EventKind, Listener, PointerEvent},
    foundation::core::{Point, Rect, Vec2},
    foundation::error::MotionResult,
    runtime::timeline::{RevertPolicy, RuntimeHandle, ScopeId, WeakRuntime},
    shell::config::TiltConfig,
    shell::scope::RawListenerBinding,
};

/// Rotation derived from one pointer position over a card.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TiltState {
    /// Cursor position relative to the card's top-left corner.
    pub offset: Vec2,
    /// Rotation around the horizontal axis, degrees.
    pub rotate_x: f64,
    /// Rotation around the vertical axis, degrees.
    pub rotate_y: f64,
}

impl TiltState {
    /// Tilt for a pointer at `client` over a card laid out at `rect` (both in
    /// viewport coordinates).
    ///
    /// Edges map to `±max_rotation`; the top of the card tilts towards the viewer.
    /// A zero-sized box yields no rotation.
    pub fn from_pointer(rect: Rect, client: Point, max_rotation: f64) -> Self {
        let offset = client - rect.origin();
        let (cx, cy) = (rect.width() / 2.0, rect.height() / 2.0);
        if cx <= 0.0 || cy <= 0.0 {
            return Self {
                offset,
                rotate_x: 0.0,
                rotate_y: 0.0,
            };
        }
        Self {
            offset,
            rotate_x: ((offset.y - cy) / cy) * -max_rotation,
            rotate_y: ((offset.x - cx) / cx) * max_rotation,
        }
    }
}

/// Pointer-driven 3D tilt for cards.
#[derive(Clone, Debug, Default)]
pub struct TiltController {
    config: TiltConfig,
}

impl TiltController {
    /// Controller with the given tilt parameters.
    pub fn new(config: TiltConfig) -> Self {
        Self { config }
    }

    /// Follow tween towards `state`.
    pub fn move_tween(&self, state: &TiltState) -> TweenSpec {
        TweenSpec::to(
            PropertySet::new()
                .rotate_x(state.rotate_x)
                .rotate_y(state.rotate_y)
                .scale(self.config.hover_scale),
            self.config.move_duration,
            self.config.move_ease,
        )
        .with_overwrite()
    }

    /// Return-to-rest tween.
    pub fn leave_tween(&self) -> TweenSpec {
        TweenSpec::to(
            PropertySet::new().rotate_x(0.0).rotate_y(0.0).scale(1.0),
            self.config.leave_duration,
            self.config.leave_ease,
        )
        .with_overwrite()
    }

    /// Wire pointer handlers on `card` that tilt its `inner_class` child.
    ///
    /// Returns `None` (and touches nothing) when the card has no inner element.
    /// Handlers hold only weak references to the runtime and the document; their
    /// tweens are owned by `owner`.
    pub fn attach(
        &self,
        dom: &Rc<dyn Dom>,
        runtime: &RuntimeHandle,
        owner: ScopeId,
        card: ElementId,
        inner_class: &str,
    ) -> MotionResult<Option<[RawListenerBinding; 2]>> {
        let Some(inner) = dom.query_first(card, inner_class) else {
            tracing::debug!(?card, inner_class, "tilt card has no inner element, skipped");
            return Ok(None);
        };

        dom.set_style(card, "perspective", &self.config.perspective);

        let on_move: Listener = {
            let target = TiltTarget::new(dom, runtime, owner, card, inner);
            let max = self.config.max_rotation;
            let this = self.clone();
            Rc::new(move |event: &PointerEvent| {
                target.play(|rect| {
                    this.move_tween(&TiltState::from_pointer(rect, event.client, max))
                });
            })
        };
        let on_leave: Listener = {
            let target = TiltTarget::new(dom, runtime, owner, card, inner);
            let spec = self.leave_tween();
            Rc::new(move |_: &PointerEvent| target.play(|_| spec.clone()))
        };

        let move_id = dom.add_listener(card, EventKind::PointerMove, on_move)?;
        let leave_id = match dom.add_listener(card, EventKind::PointerLeave, on_leave) {
            Ok(id) => id,
            Err(err) => {
                dom.remove_listener(card, EventKind::PointerMove, move_id);
                return Err(err);
            }
        };
        tracing::debug!(?card, ?inner, "tilt attached");
        Ok(Some([
            RawListenerBinding::new(card, EventKind::PointerMove, move_id),
            RawListenerBinding::new(card, EventKind::PointerLeave, leave_id),
        ]))
    }
}

/// What a tilt handler needs, held weakly.
struct TiltTarget {
    dom: Weak<dyn Dom>,
    runtime: WeakRuntime,
    owner: ScopeId,
    card: ElementId,
    inner: ElementId,
}

impl TiltTarget {
    fn new(
        dom: &Rc<dyn Dom>,
        runtime: &RuntimeHandle,
        owner: ScopeId,
        card: ElementId,
        inner: ElementId,
    ) -> Self {
        Self {
            dom: Rc::downgrade(dom),
            runtime: runtime.downgrade(),
            owner,
            card,
            inner,
        }
    }

    /// Start the tween built from the card's current layout box.
    fn play(&self, build: impl FnOnce(Rect) -> TweenSpec) {
        let (Some(dom), Some(runtime)) = (self.dom.upgrade(), self.runtime.upgrade()) else {
            return;
        };
        let spec = build(dom.layout_rect(self.card));
        let result = runtime.borrow_mut().play(
            self.owner,
            &spec,
            &[self.inner],
            RevertPolicy::Abandon,
        );
        if let Err(err) = result {
            tracing::warn!(card = ?self.card, %err, "tilt tween rejected");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shell/tilt.rs"]
mod tests;
