//! Browser backend over `web-sys`.
//!
//! [`WebDom`] maps [`ElementId`]s onto live `HtmlElement`s and keeps the JS closures
//! of attached listeners alive until they are removed. [`WebDriver`] feeds a
//! [`RuntimeHandle`] from `requestAnimationFrame` and window scroll/resize events.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use wasm_bindgen::JsCast as _;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;

use crate::{
    dom::{Dom, ElementId, EventKind, Listener, ListenerId, PointerEvent, ScrollBehavior},
    foundation::core::{Point, Rect, Viewport},
    foundation::error::{MotionError, MotionResult},
    runtime::timeline::RuntimeHandle,
};

type PointerClosure = Closure<dyn FnMut(web_sys::MouseEvent)>;
type EventClosure = Closure<dyn FnMut(web_sys::Event)>;
type RafClosure = Closure<dyn FnMut(f64)>;

fn js_err(context: &str, err: JsValue) -> MotionError {
    MotionError::dom(format!("{context}: {err:?}"))
}

struct BoundListener {
    element: ElementId,
    kind: EventKind,
    closure: PointerClosure,
}

#[derive(Default)]
struct WebInner {
    elements: HashMap<ElementId, web_sys::HtmlElement>,
    next_element: u32,
    next_listener: u64,
    listeners: HashMap<ListenerId, BoundListener>,
}

/// [`Dom`] implementation for a browser document.
pub struct WebDom {
    window: web_sys::Window,
    document: web_sys::Document,
    inner: RefCell<WebInner>,
}

impl std::fmt::Debug for WebDom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("WebDom")
            .field("elements", &inner.elements.len())
            .field("listeners", &inner.listeners.len())
            .finish()
    }
}

impl WebDom {
    /// Bind to the current window's document.
    pub fn new() -> MotionResult<Self> {
        let window = web_sys::window().ok_or_else(|| MotionError::dom("no global window"))?;
        let document = window
            .document()
            .ok_or_else(|| MotionError::dom("window has no document"))?;
        Ok(Self {
            window,
            document,
            inner: RefCell::new(WebInner::default()),
        })
    }

    /// Handle for `el`, registering it on first sight.
    pub fn register(&self, el: &web_sys::HtmlElement) -> ElementId {
        let mut inner = self.inner.borrow_mut();
        if let Some((&id, _)) = inner.elements.iter().find(|(_, known)| *known == el) {
            return id;
        }
        let id = ElementId(inner.next_element);
        inner.next_element += 1;
        inner.elements.insert(id, el.clone());
        id
    }

    /// The live element behind `id`.
    pub fn element(&self, id: ElementId) -> Option<web_sys::HtmlElement> {
        self.inner.borrow().elements.get(&id).cloned()
    }

    /// Number of elements with a live handle.
    pub fn element_count(&self) -> usize {
        self.inner.borrow().elements.len()
    }

    /// Drop the handle for `id` together with any listener still bound to it.
    fn forget(&self, id: ElementId) {
        let (element, bound) = {
            let mut inner = self.inner.borrow_mut();
            let Some(element) = inner.elements.remove(&id) else {
                return;
            };
            let ids: Vec<ListenerId> = inner
                .listeners
                .iter()
                .filter(|(_, b)| b.element == id)
                .map(|(lid, _)| *lid)
                .collect();
            let bound: Vec<BoundListener> = ids
                .iter()
                .filter_map(|lid| inner.listeners.remove(lid))
                .collect();
            (element, bound)
        };
        for b in bound {
            let _ = element.remove_event_listener_with_callback(
                b.kind.dom_name(),
                b.closure.as_ref().unchecked_ref(),
            );
        }
    }

    /// Number of listeners attached through this backend and not yet removed.
    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }
}

impl Dom for WebDom {
    fn query_all(&self, root: ElementId, class: &str) -> Vec<ElementId> {
        let Some(root) = self.element(root) else {
            return Vec::new();
        };
        let nodes = match root.query_selector_all(&format!(".{class}")) {
            Ok(nodes) => nodes,
            Err(err) => {
                tracing::debug!(class, ?err, "selector rejected");
                return Vec::new();
            }
        };
        (0..nodes.length())
            .filter_map(|i| nodes.get(i))
            .filter_map(|node| node.dyn_into::<web_sys::HtmlElement>().ok())
            .map(|el| self.register(&el))
            .collect()
    }

    fn element_by_id(&self, id: &str) -> Option<ElementId> {
        let el = self
            .document
            .get_element_by_id(id)?
            .dyn_into::<web_sys::HtmlElement>()
            .ok()?;
        Some(self.register(&el))
    }

    fn text_content(&self, el: ElementId) -> String {
        self.element(el)
            .and_then(|el| el.text_content())
            .unwrap_or_default()
    }

    fn set_text_content(&self, el: ElementId, text: &str) {
        let Some(target) = self.element(el) else {
            return;
        };
        // Descendants are about to be detached; their handles go with them.
        let dropped: Vec<ElementId> = self
            .inner
            .borrow()
            .elements
            .iter()
            .filter(|&(&id, known)| {
                id != el && target.contains(Some(known.unchecked_ref::<web_sys::Node>()))
            })
            .map(|(&id, _)| id)
            .collect();
        for id in dropped {
            self.forget(id);
        }
        target.set_text_content((!text.is_empty()).then_some(text));
    }

    fn append_span(&self, parent: ElementId, text: &str) -> MotionResult<ElementId> {
        let parent = self
            .element(parent)
            .ok_or_else(|| MotionError::dom(format!("unknown parent element {parent:?}")))?;
        let span = self
            .document
            .create_element("span")
            .map_err(|err| js_err("create span", err))?
            .dyn_into::<web_sys::HtmlElement>()
            .map_err(|_| MotionError::dom("span is not an HtmlElement"))?;
        span.set_text_content(Some(text));
        parent
            .append_child(&span)
            .map_err(|err| js_err("append span", err))?;
        Ok(self.register(&span))
    }

    fn layout_rect(&self, el: ElementId) -> Rect {
        let Some(el) = self.element(el) else {
            return Rect::ZERO;
        };
        // Measure without the animated transform so trigger windows stay put.
        let style = el.style();
        let transform = style.get_property_value("transform").unwrap_or_default();
        if !transform.is_empty() {
            let _ = style.set_property("transform", "none");
        }
        let r = el.get_bounding_client_rect();
        if !transform.is_empty() {
            let _ = style.set_property("transform", &transform);
        }
        Rect::new(r.left(), r.top(), r.right(), r.bottom())
    }

    fn viewport(&self) -> Viewport {
        let width = self.window.inner_width().ok().and_then(|v| v.as_f64());
        let height = self.window.inner_height().ok().and_then(|v| v.as_f64());
        let scroll_y = self.window.scroll_y().unwrap_or(0.0);
        let viewport = match (width, height) {
            (Some(w), Some(h)) => Viewport::new(w, h).unwrap_or_default(),
            _ => Viewport::default(),
        };
        viewport.scrolled_to(scroll_y)
    }

    fn set_style(&self, el: ElementId, property: &str, value: &str) {
        if let Some(el) = self.element(el) {
            let _ = el.style().set_property(property, value);
        }
    }

    fn remove_style(&self, el: ElementId, property: &str) {
        if let Some(el) = self.element(el) {
            let _ = el.style().remove_property(property);
        }
    }

    fn add_listener(
        &self,
        el: ElementId,
        kind: EventKind,
        listener: Listener,
    ) -> MotionResult<ListenerId> {
        let target = self
            .element(el)
            .ok_or_else(|| MotionError::dom(format!("unknown element {el:?}")))?;
        let closure = Closure::wrap(Box::new(move |event: web_sys::MouseEvent| {
            listener(&PointerEvent {
                client: Point::new(f64::from(event.client_x()), f64::from(event.client_y())),
            });
        }) as Box<dyn FnMut(web_sys::MouseEvent)>);
        target
            .add_event_listener_with_callback(kind.dom_name(), closure.as_ref().unchecked_ref())
            .map_err(|err| js_err("add listener", err))?;

        let mut inner = self.inner.borrow_mut();
        let id = ListenerId(inner.next_listener);
        inner.next_listener += 1;
        inner.listeners.insert(
            id,
            BoundListener {
                element: el,
                kind,
                closure,
            },
        );
        Ok(id)
    }

    fn remove_listener(&self, el: ElementId, kind: EventKind, id: ListenerId) -> bool {
        let bound = {
            let mut inner = self.inner.borrow_mut();
            match inner.listeners.get(&id) {
                Some(b) if b.element == el && b.kind == kind => inner.listeners.remove(&id),
                _ => None,
            }
        };
        let (Some(bound), Some(target)) = (bound, self.element(el)) else {
            return false;
        };
        let _ = target.remove_event_listener_with_callback(
            kind.dom_name(),
            bound.closure.as_ref().unchecked_ref(),
        );
        true
    }

    fn scroll_into_view(&self, el: ElementId, behavior: ScrollBehavior) {
        let Some(el) = self.element(el) else {
            return;
        };
        let options = web_sys::ScrollIntoViewOptions::new();
        options.set_behavior(match behavior {
            ScrollBehavior::Instant => web_sys::ScrollBehavior::Instant,
            ScrollBehavior::Smooth => web_sys::ScrollBehavior::Smooth,
        });
        el.scroll_into_view_with_scroll_into_view_options(&options);
    }

    fn release(&self, el: ElementId) {
        self.forget(el);
    }
}

struct DriverInner {
    runtime: RuntimeHandle,
    window: web_sys::Window,
    /// `performance.now()` (ms) that maps to runtime time 0.
    origin_ms: Cell<f64>,
    running: Cell<bool>,
    raf_id: Cell<i32>,
    raf: RefCell<Option<RafClosure>>,
    on_scroll: RefCell<Option<EventClosure>>,
    on_resize: RefCell<Option<EventClosure>>,
}

/// Drives a [`RuntimeHandle`] from the browser: one `tick` per animation frame,
/// `on_scroll` on window scroll and `on_resize` on window resize.
///
/// Dropping the driver stops the frame loop and detaches the window listeners.
pub struct WebDriver {
    inner: Rc<DriverInner>,
}

impl std::fmt::Debug for WebDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebDriver")
            .field("running", &self.inner.running.get())
            .finish()
    }
}

impl WebDriver {
    /// Driver for `runtime`; not running until [`start`](Self::start).
    pub fn new(runtime: RuntimeHandle) -> MotionResult<Self> {
        let window = web_sys::window().ok_or_else(|| MotionError::dom("no global window"))?;
        Ok(Self {
            inner: Rc::new(DriverInner {
                runtime,
                window,
                origin_ms: Cell::new(0.0),
                running: Cell::new(false),
                raf_id: Cell::new(0),
                raf: RefCell::new(None),
                on_scroll: RefCell::new(None),
                on_resize: RefCell::new(None),
            }),
        })
    }

    /// Attach window listeners and start the frame loop. No-op when running.
    pub fn start(&self) -> MotionResult<()> {
        if self.inner.running.get() {
            return Ok(());
        }
        let now_ms = self
            .inner
            .window
            .performance()
            .map_or(0.0, |p| p.now());
        let runtime_now = self.inner.runtime.borrow().now();
        self.inner.origin_ms.set(now_ms - runtime_now * 1000.0);

        let runtime = self.inner.runtime.downgrade();
        let on_scroll = Closure::wrap(Box::new(move |_: web_sys::Event| {
            if let Some(runtime) = runtime.upgrade() {
                runtime.on_scroll();
            }
        }) as Box<dyn FnMut(web_sys::Event)>);
        let runtime = self.inner.runtime.downgrade();
        let on_resize = Closure::wrap(Box::new(move |_: web_sys::Event| {
            if let Some(runtime) = runtime.upgrade() {
                runtime.on_resize();
            }
        }) as Box<dyn FnMut(web_sys::Event)>);
        let window = &self.inner.window;
        window
            .add_event_listener_with_callback("scroll", on_scroll.as_ref().unchecked_ref())
            .map_err(|err| js_err("add scroll listener", err))?;
        if let Err(err) =
            window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())
        {
            let _ = window
                .remove_event_listener_with_callback("scroll", on_scroll.as_ref().unchecked_ref());
            return Err(js_err("add resize listener", err));
        }
        *self.inner.on_scroll.borrow_mut() = Some(on_scroll);
        *self.inner.on_resize.borrow_mut() = Some(on_resize);

        self.inner.running.set(true);
        let inner = Rc::clone(&self.inner);
        let frame = Closure::wrap(Box::new(move |timestamp_ms: f64| {
            if !inner.running.get() {
                return;
            }
            inner
                .runtime
                .tick((timestamp_ms - inner.origin_ms.get()) / 1000.0);
            if inner.running.get()
                && let Some(ref raf) = *inner.raf.borrow()
            {
                match inner
                    .window
                    .request_animation_frame(raf.as_ref().unchecked_ref())
                {
                    Ok(id) => inner.raf_id.set(id),
                    Err(err) => tracing::warn!(?err, "requestAnimationFrame failed"),
                }
            }
        }) as Box<dyn FnMut(f64)>);
        let id = match self
            .inner
            .window
            .request_animation_frame(frame.as_ref().unchecked_ref())
        {
            Ok(id) => id,
            Err(err) => {
                self.stop();
                return Err(js_err("request animation frame", err));
            }
        };
        self.inner.raf_id.set(id);
        *self.inner.raf.borrow_mut() = Some(frame);
        Ok(())
    }

    /// Stop the frame loop and detach the window listeners.
    pub fn stop(&self) {
        if !self.inner.running.replace(false) {
            return;
        }
        let _ = self
            .inner
            .window
            .cancel_animation_frame(self.inner.raf_id.get());
        let window = &self.inner.window;
        if let Some(cb) = self.inner.on_scroll.borrow_mut().take() {
            let _ = window
                .remove_event_listener_with_callback("scroll", cb.as_ref().unchecked_ref());
        }
        if let Some(cb) = self.inner.on_resize.borrow_mut().take() {
            let _ = window
                .remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
        }
    }

    /// Return `true` while the frame loop runs.
    pub fn is_running(&self) -> bool {
        self.inner.running.get()
    }
}

impl Drop for WebDriver {
    fn drop(&mut self) {
        self.stop();
        // The frame closure holds an `Rc` to `inner`; dropping it breaks the cycle.
        self.inner.raf.borrow_mut().take();
    }
}
