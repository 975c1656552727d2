//! Headless document backed by an element arena.

use std::cell::RefCell;
use std::collections::BTreeMap;

use crate::dom::{
    Dom, ElementId, EventKind, Listener, ListenerId, PointerEvent, ScrollBehavior,
};
use crate::foundation::core::{Rect, Viewport};
use crate::foundation::error::{MotionError, MotionResult};

/// Serializable description of a page, used to build a [`MemoryDom`].
///
/// Element rects are layout boxes in document coordinates `[x, y, width, height]`.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct PageFixture {
    /// Initial viewport.
    pub viewport: Viewport,
    /// Root element of the mounted view.
    pub root: ElementFixture,
}

/// One element of a [`PageFixture`].
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ElementFixture {
    /// Tag name; defaults to `div`.
    pub tag: Option<String>,
    /// `id` attribute.
    pub id: Option<String>,
    /// Class list.
    pub classes: Vec<String>,
    /// Own text (leaf elements).
    pub text: Option<String>,
    /// Layout box `[x, y, width, height]` in document coordinates.
    pub rect: [f64; 4],
    /// Child elements in document order.
    pub children: Vec<ElementFixture>,
}

/// Inline styles and identity of one element, as reported by [`MemoryDom::snapshot`].
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ElementSnapshot {
    /// Element handle.
    pub element: ElementId,
    /// `id` attribute, when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Class list.
    pub classes: Vec<String>,
    /// Own text, when non-empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Inline style properties.
    pub style: BTreeMap<String, String>,
}

struct Node {
    tag: String,
    dom_id: Option<String>,
    classes: Vec<String>,
    text: String,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    rect: Rect,
    style: BTreeMap<String, String>,
    listeners: Vec<(ListenerId, EventKind, Listener)>,
}

struct Inner {
    nodes: Vec<Node>,
    roots: Vec<ElementId>,
    viewport: Viewport,
    next_listener: u64,
    style_writes: u64,
    scroll_requests: Vec<(ElementId, ScrollBehavior)>,
}

impl Inner {
    fn node(&self, el: ElementId) -> Option<&Node> {
        self.nodes.get(el.0 as usize)
    }

    fn node_mut(&mut self, el: ElementId) -> Option<&mut Node> {
        self.nodes.get_mut(el.0 as usize)
    }

    fn is_attached(&self, el: ElementId) -> bool {
        let mut cur = el;
        loop {
            if self.roots.contains(&cur) {
                return true;
            }
            match self.node(cur).and_then(|n| n.parent) {
                Some(p) => cur = p,
                None => return false,
            }
        }
    }

    fn collect_descendants(&self, el: ElementId, out: &mut Vec<ElementId>) {
        let Some(node) = self.node(el) else {
            return;
        };
        for &c in &node.children {
            out.push(c);
            self.collect_descendants(c, out);
        }
    }

    fn text_of(&self, el: ElementId, out: &mut String) {
        let Some(node) = self.node(el) else {
            return;
        };
        out.push_str(&node.text);
        for &c in &node.children {
            self.text_of(c, out);
        }
    }
}

/// Deterministic in-memory document.
///
/// Layout is static (rects never reflow), style writes are recorded verbatim and
/// events are delivered synchronously through [`MemoryDom::dispatch`].
pub struct MemoryDom {
    inner: RefCell<Inner>,
}

impl std::fmt::Debug for MemoryDom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("MemoryDom")
            .field("nodes", &inner.nodes.len())
            .field("viewport", &inner.viewport)
            .field("style_writes", &inner.style_writes)
            .finish()
    }
}

impl MemoryDom {
    /// Empty document with the given viewport.
    pub fn new(viewport: Viewport) -> Self {
        Self {
            inner: RefCell::new(Inner {
                nodes: Vec::new(),
                roots: Vec::new(),
                viewport,
                next_listener: 0,
                style_writes: 0,
                scroll_requests: Vec::new(),
            }),
        }
    }

    /// Build a document from a fixture, returning it with the fixture root's handle.
    pub fn from_fixture(fixture: &PageFixture) -> MotionResult<(Self, ElementId)> {
        Viewport::new(fixture.viewport.width, fixture.viewport.height)?;
        let dom = Self::new(fixture.viewport);
        let root = dom.build(None, &fixture.root)?;
        Ok((dom, root))
    }

    fn build(&self, parent: Option<ElementId>, fx: &ElementFixture) -> MotionResult<ElementId> {
        let [x, y, w, h] = fx.rect;
        if !fx.rect.iter().all(|v| v.is_finite()) || w < 0.0 || h < 0.0 {
            return Err(MotionError::validation(
                "fixture rect must be finite with non-negative size",
            ));
        }
        let classes: Vec<&str> = fx.classes.iter().map(String::as_str).collect();
        let el = self.create_element(
            parent,
            fx.tag.as_deref().unwrap_or("div"),
            &classes,
            Rect::new(x, y, x + w, y + h),
        );
        if let Some(id) = &fx.id {
            self.set_id(el, id);
        }
        if let Some(text) = &fx.text
            && let Some(node) = self.inner.borrow_mut().node_mut(el)
        {
            node.text.clone_from(text);
        }
        for child in &fx.children {
            self.build(Some(el), child)?;
        }
        Ok(el)
    }

    /// Create an element; `parent = None` makes it a top-level node.
    ///
    /// `rect` is the layout box in document coordinates.
    pub fn create_element(
        &self,
        parent: Option<ElementId>,
        tag: &str,
        classes: &[&str],
        rect: Rect,
    ) -> ElementId {
        let mut inner = self.inner.borrow_mut();
        let id = ElementId(inner.nodes.len() as u32);
        inner.nodes.push(Node {
            tag: tag.to_owned(),
            dom_id: None,
            classes: classes.iter().map(|c| (*c).to_owned()).collect(),
            text: String::new(),
            parent,
            children: Vec::new(),
            rect,
            style: BTreeMap::new(),
            listeners: Vec::new(),
        });
        match parent.and_then(|p| inner.node_mut(p)) {
            Some(p) => p.children.push(id),
            None => inner.roots.push(id),
        }
        id
    }

    /// Set the `id` attribute.
    pub fn set_id(&self, el: ElementId, id: &str) {
        if let Some(node) = self.inner.borrow_mut().node_mut(el) {
            node.dom_id = Some(id.to_owned());
        }
    }

    /// Tag name of `el`.
    pub fn tag(&self, el: ElementId) -> Option<String> {
        self.inner.borrow().node(el).map(|n| n.tag.clone())
    }

    /// Direct children of `el`.
    pub fn children(&self, el: ElementId) -> Vec<ElementId> {
        self.inner
            .borrow()
            .node(el)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    /// Current value of an inline style property.
    pub fn style(&self, el: ElementId, property: &str) -> Option<String> {
        self.inner
            .borrow()
            .node(el)
            .and_then(|n| n.style.get(property).cloned())
    }

    /// Number of listeners currently attached to `el`.
    pub fn listener_count(&self, el: ElementId) -> usize {
        self.inner
            .borrow()
            .node(el)
            .map_or(0, |n| n.listeners.len())
    }

    /// Number of listeners attached anywhere in the document.
    pub fn total_listeners(&self) -> usize {
        self.inner
            .borrow()
            .nodes
            .iter()
            .map(|n| n.listeners.len())
            .sum()
    }

    /// Count of style writes and removals since creation.
    pub fn style_writes(&self) -> u64 {
        self.inner.borrow().style_writes
    }

    /// Scroll-into-view requests received so far.
    pub fn scroll_requests(&self) -> Vec<(ElementId, ScrollBehavior)> {
        self.inner.borrow().scroll_requests.clone()
    }

    /// Move the document scroll offset. The caller notifies the runtime.
    pub fn set_scroll_y(&self, scroll_y: f64) {
        self.inner.borrow_mut().viewport.scroll_y = scroll_y.max(0.0);
    }

    /// Change the viewport size. The caller notifies the runtime.
    pub fn resize(&self, width: f64, height: f64) -> MotionResult<()> {
        let scroll_y = self.inner.borrow().viewport.scroll_y;
        self.inner.borrow_mut().viewport = Viewport::new(width, height)?.scrolled_to(scroll_y);
        Ok(())
    }

    /// Deliver an event to every listener of `kind` on `el`, in attachment order.
    ///
    /// Returns the number of listeners invoked.
    pub fn dispatch(&self, el: ElementId, kind: EventKind, event: PointerEvent) -> usize {
        let handlers: Vec<Listener> = self
            .inner
            .borrow()
            .node(el)
            .map(|n| {
                n.listeners
                    .iter()
                    .filter(|(_, k, _)| *k == kind)
                    .map(|(_, _, l)| Listener::clone(l))
                    .collect()
            })
            .unwrap_or_default();
        for handler in &handlers {
            handler(&event);
        }
        handlers.len()
    }

    /// Elements under `root` (inclusive) that carry inline styles, in document order.
    pub fn snapshot(&self, root: ElementId) -> Vec<ElementSnapshot> {
        let inner = self.inner.borrow();
        let mut all = vec![root];
        inner.collect_descendants(root, &mut all);
        all.into_iter()
            .filter_map(|el| {
                let node = inner.node(el)?;
                if node.style.is_empty() {
                    return None;
                }
                Some(ElementSnapshot {
                    element: el,
                    id: node.dom_id.clone(),
                    classes: node.classes.clone(),
                    text: (!node.text.is_empty()).then(|| node.text.clone()),
                    style: node.style.clone(),
                })
            })
            .collect()
    }
}

impl Dom for MemoryDom {
    fn query_all(&self, root: ElementId, class: &str) -> Vec<ElementId> {
        let inner = self.inner.borrow();
        let mut all = Vec::new();
        inner.collect_descendants(root, &mut all);
        all.retain(|&el| {
            inner
                .node(el)
                .is_some_and(|n| n.classes.iter().any(|c| c == class))
        });
        all
    }

    fn element_by_id(&self, id: &str) -> Option<ElementId> {
        let inner = self.inner.borrow();
        (0..inner.nodes.len() as u32).map(ElementId).find(|&el| {
            inner
                .node(el)
                .is_some_and(|n| n.dom_id.as_deref() == Some(id))
                && inner.is_attached(el)
        })
    }

    fn text_content(&self, el: ElementId) -> String {
        let mut out = String::new();
        self.inner.borrow().text_of(el, &mut out);
        out
    }

    fn set_text_content(&self, el: ElementId, text: &str) {
        let mut inner = self.inner.borrow_mut();
        let Some(node) = inner.node_mut(el) else {
            return;
        };
        node.text = text.to_owned();
        let detached = std::mem::take(&mut node.children);
        for child in detached {
            if let Some(c) = inner.node_mut(child) {
                c.parent = None;
            }
        }
    }

    fn append_span(&self, parent: ElementId, text: &str) -> MotionResult<ElementId> {
        let origin = self
            .inner
            .borrow()
            .node(parent)
            .map(|n| n.rect.origin())
            .ok_or_else(|| MotionError::dom(format!("unknown parent element {parent:?}")))?;
        let span = self.create_element(
            Some(parent),
            "span",
            &[],
            Rect::from_origin_size(origin, (0.0, 0.0)),
        );
        if let Some(node) = self.inner.borrow_mut().node_mut(span) {
            node.text = text.to_owned();
        }
        Ok(span)
    }

    fn layout_rect(&self, el: ElementId) -> Rect {
        let inner = self.inner.borrow();
        let scroll_y = inner.viewport.scroll_y;
        inner
            .node(el)
            .map_or(Rect::ZERO, |n| n.rect - kurbo::Vec2::new(0.0, scroll_y))
    }

    fn viewport(&self) -> Viewport {
        self.inner.borrow().viewport
    }

    fn set_style(&self, el: ElementId, property: &str, value: &str) {
        let mut inner = self.inner.borrow_mut();
        if let Some(node) = inner.node_mut(el) {
            node.style.insert(property.to_owned(), value.to_owned());
            inner.style_writes += 1;
        }
    }

    fn remove_style(&self, el: ElementId, property: &str) {
        let mut inner = self.inner.borrow_mut();
        if let Some(node) = inner.node_mut(el)
            && node.style.remove(property).is_some()
        {
            inner.style_writes += 1;
        }
    }

    fn add_listener(
        &self,
        el: ElementId,
        kind: EventKind,
        listener: Listener,
    ) -> MotionResult<ListenerId> {
        let mut inner = self.inner.borrow_mut();
        let id = ListenerId(inner.next_listener);
        let node = inner
            .node_mut(el)
            .ok_or_else(|| MotionError::dom(format!("unknown element {el:?}")))?;
        node.listeners.push((id, kind, listener));
        inner.next_listener += 1;
        Ok(id)
    }

    fn remove_listener(&self, el: ElementId, kind: EventKind, id: ListenerId) -> bool {
        let mut inner = self.inner.borrow_mut();
        let Some(node) = inner.node_mut(el) else {
            return false;
        };
        let before = node.listeners.len();
        node.listeners
            .retain(|(lid, lkind, _)| !(*lid == id && *lkind == kind));
        node.listeners.len() != before
    }

    fn scroll_into_view(&self, el: ElementId, behavior: ScrollBehavior) {
        let mut inner = self.inner.borrow_mut();
        let Some(top) = inner.node(el).map(|n| n.rect.y0) else {
            return;
        };
        inner.scroll_requests.push((el, behavior));
        inner.viewport.scroll_y = top.max(0.0);
    }

    fn release(&self, el: ElementId) {
        if let Some(node) = self.inner.borrow_mut().node_mut(el) {
            node.listeners.clear();
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/dom/memory.rs"]
mod tests;
