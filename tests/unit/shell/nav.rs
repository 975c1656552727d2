use super::*;
use crate::dom::memory::MemoryDom;
use crate::foundation::core::{Rect, Viewport};

#[test]
fn scrolls_smoothly_to_known_id() {
    let dom = MemoryDom::new(Viewport::default());
    let root = dom.create_element(None, "main", &[], Rect::new(0.0, 0.0, 1280.0, 4000.0));
    let pricing = dom.create_element(
        Some(root),
        "section",
        &[],
        Rect::new(0.0, 2400.0, 1280.0, 3000.0),
    );
    dom.set_id(pricing, "pricing");

    assert!(scroll_to_target(&dom, "pricing"));
    assert_eq!(dom.scroll_requests(), vec![(pricing, ScrollBehavior::Smooth)]);
    assert_eq!(dom.viewport().scroll_y, 2400.0);
}

#[test]
fn unknown_id_is_a_no_op() {
    let dom = MemoryDom::new(Viewport::default());
    dom.create_element(None, "main", &[], Rect::ZERO);
    assert!(!scroll_to_target(&dom, "missing"));
    assert!(dom.scroll_requests().is_empty());
    assert_eq!(dom.viewport().scroll_y, 0.0);
}
