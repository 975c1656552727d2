use std::rc::Rc;

use super::*;
use crate::animation::state::VisualState;
use crate::dom::{Dom, memory::MemoryDom};
use crate::foundation::core::{Rect, Viewport};

#[test]
fn sides_alternate_by_index() {
    assert_eq!(AlternateSide::for_index(0), AlternateSide::Negative);
    assert_eq!(AlternateSide::for_index(1), AlternateSide::Positive);
    assert_eq!(AlternateSide::for_index(2), AlternateSide::Negative);
    assert_eq!(AlternateSide::Positive.apply(-18.0), 18.0);
    assert_eq!(AlternateSide::Negative.apply(18.0), -18.0);
}

#[test]
fn device_visuals_start_on_alternating_sides() {
    let config = ScrollEffectConfig::device();
    let first = ScrollLinkedAnimator::from_config(&config, 0);
    let second = ScrollLinkedAnimator::from_config(&config, 1);
    assert_eq!(first.spec().from.rotate_y, Some(-18.0));
    assert_eq!(second.spec().from.rotate_y, Some(18.0));
    assert_eq!(first, ScrollLinkedAnimator::device(AlternateSide::Negative));
}

#[test]
fn non_alternating_effects_ignore_index() {
    let hero = ScrollLinkedAnimator::from_config(&ScrollEffectConfig::hero_visual(), 3);
    assert_eq!(hero.spec().from.rotate_y, Some(12.0));
    assert_eq!(hero, ScrollLinkedAnimator::hero_visual());
}

#[test]
fn attach_renders_from_state_and_restores_on_kill() {
    let dom = Rc::new(MemoryDom::new(Viewport::new(1000.0, 1000.0).unwrap()));
    let root = dom.create_element(None, "main", &[], Rect::new(0.0, 0.0, 1000.0, 6000.0));
    let device = dom.create_element(
        Some(root),
        "figure",
        &["device-visual"],
        Rect::new(0.0, 3000.0, 600.0, 3400.0),
    );
    let mut rt = MotionRuntime::new(Rc::clone(&dom) as Rc<dyn Dom>);
    let scope = rt.open_scope();

    let id = ScrollLinkedAnimator::device(AlternateSide::Positive)
        .attach(&mut rt, scope, device)
        .unwrap();
    assert_eq!(
        rt.state_of(device),
        Some(VisualState {
            opacity: 0.0,
            y: 100.0,
            scale: 0.9,
            rotate_x: 24.0,
            rotate_y: 18.0,
        })
    );

    dom.set_scroll_y(3000.0);
    rt.on_scroll();
    assert_eq!(rt.state_of(device), Some(VisualState::NEUTRAL));

    assert!(rt.kill(id));
    assert_eq!(dom.style(device, "transform"), None);
    assert_eq!(rt.state_of(device), None);
}
