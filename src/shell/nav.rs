use crate::dom::{Dom, ScrollBehavior};

/// Smooth-scroll to the element whose `id` is `target`.
///
/// Returns `false` and does nothing when no such element exists.
pub fn scroll_to_target(dom: &dyn Dom, target: &str) -> bool {
    let Some(el) = dom.element_by_id(target) else {
        tracing::debug!(target, "scroll target not found");
        return false;
    };
    dom.scroll_into_view(el, ScrollBehavior::Smooth);
    true
}

#[cfg(test)]
#[path = "../../tests/unit/shell/nav.rs"]
mod tests;
