use super::*;
use crate::animation::state::VisualState;
use crate::dom::memory::MemoryDom;
use crate::foundation::core::Viewport;
use crate::runtime::timeline::MotionRuntime;

fn card_rect() -> Rect {
    Rect::new(100.0, 200.0, 400.0, 400.0)
}

#[test]
fn centre_is_neutral_and_top_left_tilts_back_and_left() {
    let centre = TiltState::from_pointer(card_rect(), Point::new(250.0, 300.0), 12.0);
    assert_eq!((centre.rotate_x, centre.rotate_y), (0.0, 0.0));
    assert_eq!(centre.offset, Vec2::new(150.0, 100.0));

    let corner = TiltState::from_pointer(card_rect(), Point::new(100.0, 200.0), 12.0);
    assert!(corner.rotate_x > 0.0);
    assert!(corner.rotate_y < 0.0);
    assert_eq!((corner.rotate_x, corner.rotate_y), (12.0, -12.0));

    let bottom_right = TiltState::from_pointer(card_rect(), Point::new(400.0, 400.0), 12.0);
    assert_eq!((bottom_right.rotate_x, bottom_right.rotate_y), (-12.0, 12.0));
}

#[test]
fn zero_size_box_is_neutral() {
    let state = TiltState::from_pointer(
        Rect::new(10.0, 10.0, 10.0, 10.0),
        Point::new(5.0, 5.0),
        12.0,
    );
    assert_eq!((state.rotate_x, state.rotate_y), (0.0, 0.0));
}

struct Page {
    dom: Rc<MemoryDom>,
    runtime: RuntimeHandle,
    card: ElementId,
    inner: ElementId,
}

fn page() -> Page {
    let dom = Rc::new(MemoryDom::new(Viewport::default()));
    let root = dom.create_element(None, "main", &[], Rect::new(0.0, 0.0, 1280.0, 2000.0));
    let card = dom.create_element(Some(root), "article", &["tilt-card"], card_rect());
    let inner = dom.create_element(Some(card), "div", &["tilt-inner"], card_rect());
    let runtime = MotionRuntime::new(Rc::clone(&dom) as Rc<dyn Dom>).into_handle();
    Page {
        dom,
        runtime,
        card,
        inner,
    }
}

fn attach(p: &Page) -> Option<[RawListenerBinding; 2]> {
    let dom: Rc<dyn Dom> = Rc::clone(&p.dom) as Rc<dyn Dom>;
    let owner = p.runtime.borrow_mut().open_scope();
    TiltController::default()
        .attach(&dom, &p.runtime, owner, p.card, "tilt-inner")
        .unwrap()
}

#[test]
fn pointer_moves_tilt_inner_and_leave_returns_to_rest() {
    let p = page();
    let bindings = attach(&p).unwrap();
    assert_eq!(bindings[0].kind, EventKind::PointerMove);
    assert_eq!(bindings[1].kind, EventKind::PointerLeave);
    assert_eq!(p.dom.listener_count(p.card), 2);
    assert_eq!(p.dom.style(p.card, "perspective").as_deref(), Some("1000px"));

    let event = PointerEvent {
        client: Point::new(100.0, 200.0),
    };
    assert_eq!(p.dom.dispatch(p.card, EventKind::PointerMove, event), 1);
    p.runtime.tick(0.3);
    let tilted = p.runtime.borrow().state_of(p.inner).unwrap();
    assert_eq!(
        (tilted.rotate_x, tilted.rotate_y, tilted.scale),
        (12.0, -12.0, 1.03)
    );

    p.dom.dispatch(p.card, EventKind::PointerLeave, event);
    p.runtime.tick(1.0);
    assert_eq!(
        p.runtime.borrow().state_of(p.inner),
        Some(VisualState::NEUTRAL)
    );
}

#[test]
fn new_move_replaces_running_tilt() {
    let p = page();
    attach(&p).unwrap();
    let event = |x, y| PointerEvent {
        client: Point::new(x, y),
    };
    p.dom.dispatch(p.card, EventKind::PointerMove, event(100.0, 200.0));
    p.dom.dispatch(p.card, EventKind::PointerMove, event(400.0, 400.0));
    assert_eq!(p.runtime.borrow().active_effects(), 1);
}

#[test]
fn card_without_inner_is_skipped() {
    let dom = Rc::new(MemoryDom::new(Viewport::default()));
    let card = dom.create_element(None, "article", &["tilt-card"], card_rect());
    let runtime = MotionRuntime::new(Rc::clone(&dom) as Rc<dyn Dom>).into_handle();
    let owner = runtime.borrow_mut().open_scope();
    let shared: Rc<dyn Dom> = Rc::clone(&dom) as Rc<dyn Dom>;

    let attached = TiltController::default()
        .attach(&shared, &runtime, owner, card, "tilt-inner")
        .unwrap();
    assert!(attached.is_none());
    assert_eq!(dom.listener_count(card), 0);
    assert_eq!(dom.style(card, "perspective"), None);
}

#[test]
fn handlers_do_nothing_once_runtime_is_gone() {
    let p = page();
    attach(&p).unwrap();
    let Page {
        dom, runtime, card, ..
    } = p;
    drop(runtime);
    let writes = dom.style_writes();
    let event = PointerEvent {
        client: Point::new(100.0, 200.0),
    };
    assert_eq!(dom.dispatch(card, EventKind::PointerMove, event), 1);
    assert_eq!(dom.style_writes(), writes);
}
