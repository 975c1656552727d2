use std::collections::HashMap;

use crate::{animation::state::VisualState, dom::Dom, dom::ElementId};

/// Last state written to each animated element.
///
/// All opacity/transform writes of the runtime go through here so `to` tweens can
/// start from what is on screen and reverts know what to restore.
#[derive(Clone, Debug, Default)]
pub(crate) struct StyleCache {
    current: HashMap<ElementId, VisualState>,
}

impl StyleCache {
    /// Cached state, if the runtime has written one.
    pub(crate) fn get(&self, el: ElementId) -> Option<VisualState> {
        self.current.get(&el).copied()
    }

    /// Cached state, falling back to the neutral state.
    pub(crate) fn get_or_neutral(&self, el: ElementId) -> VisualState {
        self.get(el).unwrap_or(VisualState::NEUTRAL)
    }

    /// Write `state` inline and remember it.
    pub(crate) fn apply(&mut self, dom: &dyn Dom, el: ElementId, state: VisualState) {
        if self.current.get(&el) == Some(&state) {
            return;
        }
        dom.set_style(el, "opacity", &state.opacity.to_string());
        dom.set_style(el, "transform", &state.css_transform());
        self.current.insert(el, state);
    }

    /// Drop the inline opacity/transform of `el` and forget it.
    pub(crate) fn forget(&mut self, dom: &dyn Dom, el: ElementId) {
        if self.current.remove(&el).is_some() {
            dom.remove_style(el, "opacity");
            dom.remove_style(el, "transform");
        }
    }

    /// Forget `el` without touching its inline styles.
    pub(crate) fn release(&mut self, el: ElementId) -> bool {
        self.current.remove(&el).is_some()
    }

    /// Put `el` back to `original` (`None` = never written by the runtime).
    pub(crate) fn restore(&mut self, dom: &dyn Dom, el: ElementId, original: Option<VisualState>) {
        match original {
            Some(state) => self.apply(dom, el, state),
            None => self.forget(dom, el),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/style.rs"]
mod tests;
