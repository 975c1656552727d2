//! The document seam.
//!
//! Everything the orchestration layer does to a page goes through [`Dom`]: element
//! lookup scoped to a root, text splitting primitives, layout measurement, inline
//! style writes and raw event listeners. [`memory::MemoryDom`] is a deterministic
//! headless implementation used by tests and the CLI; `web::WebDom` (feature `web`)
//! binds the same contract to a browser document through `web-sys`.

use std::rc::Rc;

use crate::foundation::core::{Point, Rect, Viewport};
use crate::foundation::error::MotionResult;

pub mod memory;
#[cfg(feature = "web")]
pub mod web;

/// Opaque handle to an element known to a [`Dom`] backend.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct ElementId(pub u32);

/// Handle to a listener attached through [`Dom::add_listener`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(pub u64);

/// Pointer event kinds the shell listens to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum EventKind {
    /// Pointer moved inside the element (`mousemove`).
    PointerMove,
    /// Pointer left the element (`mouseleave`).
    PointerLeave,
}

impl EventKind {
    /// DOM event type name.
    pub fn dom_name(self) -> &'static str {
        match self {
            Self::PointerMove => "mousemove",
            Self::PointerLeave => "mouseleave",
        }
    }
}

/// Pointer position carried by an event, in viewport coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    /// Cursor position relative to the viewport's top-left corner.
    pub client: Point,
}

/// Event handler stored by a backend. Handlers may call back into the same [`Dom`].
pub type Listener = Rc<dyn Fn(&PointerEvent)>;

/// How a scroll-into-view request is animated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollBehavior {
    /// Jump immediately.
    Instant,
    /// Let the browser animate the scroll.
    Smooth,
}

/// Document operations needed by the orchestration layer.
///
/// All methods take `&self`: backends use interior mutability so handlers invoked
/// during event dispatch can read layout and write styles on the same document.
pub trait Dom {
    /// Descendants of `root` carrying `class`, in document order.
    fn query_all(&self, root: ElementId, class: &str) -> Vec<ElementId>;

    /// First descendant of `root` carrying `class`.
    fn query_first(&self, root: ElementId, class: &str) -> Option<ElementId> {
        self.query_all(root, class).into_iter().next()
    }

    /// Element whose `id` attribute equals `id`, anywhere in the document.
    fn element_by_id(&self, id: &str) -> Option<ElementId>;

    /// Concatenated text of the element and all its descendants.
    fn text_content(&self, el: ElementId) -> String;

    /// Replace all children of `el` with a single text node (or nothing when empty).
    fn set_text_content(&self, el: ElementId, text: &str);

    /// Append an inline `<span>` holding `text` to `parent`.
    fn append_span(&self, parent: ElementId, text: &str) -> MotionResult<ElementId>;

    /// Untransformed layout box of `el`, in viewport coordinates.
    fn layout_rect(&self, el: ElementId) -> Rect;

    /// Current viewport size and scroll offset.
    fn viewport(&self) -> Viewport;

    /// Write an inline style property.
    fn set_style(&self, el: ElementId, property: &str, value: &str);

    /// Remove an inline style property.
    fn remove_style(&self, el: ElementId, property: &str);

    /// Attach `listener` for `kind` events on `el`.
    fn add_listener(
        &self,
        el: ElementId,
        kind: EventKind,
        listener: Listener,
    ) -> MotionResult<ListenerId>;

    /// Detach a listener. Returns `false` if it was not attached.
    fn remove_listener(&self, el: ElementId, kind: EventKind, id: ListenerId) -> bool;

    /// Ask the document to scroll `el` into view.
    fn scroll_into_view(&self, el: ElementId, behavior: ScrollBehavior);

    /// Drop any handle the backend keeps for `el`. The element itself is untouched.
    fn release(&self, _el: ElementId) {}
}
