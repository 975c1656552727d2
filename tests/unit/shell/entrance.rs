use std::rc::Rc;

use super::*;
use crate::animation::state::VisualState;
use crate::dom::{Dom, memory::MemoryDom};
use crate::foundation::core::{Rect, Viewport};

fn units(n: usize) -> (Rc<MemoryDom>, MotionRuntime, Vec<ElementId>) {
    let dom = Rc::new(MemoryDom::new(Viewport::default()));
    let h1 = dom.create_element(None, "h1", &[], Rect::ZERO);
    let units = (0..n)
        .map(|_| dom.create_element(Some(h1), "span", &[], Rect::ZERO))
        .collect();
    let rt = MotionRuntime::new(Rc::clone(&dom) as Rc<dyn Dom>);
    (dom, rt, units)
}

#[test]
fn total_duration_accounts_for_stagger() {
    let anim = EntranceAnimator::default();
    assert_eq!(anim.total_duration(1), 1.2);
    assert!((anim.total_duration(11) - 1.55).abs() < 1e-12);
}

#[test]
fn units_start_hidden_and_finish_at_rest() {
    let (dom, mut rt, units) = units(5);
    let scope = rt.open_scope();
    let anim = EntranceAnimator::default();
    let id = anim.start(&mut rt, scope, &units).unwrap().unwrap();

    for &u in &units {
        let s = rt.state_of(u).unwrap();
        assert_eq!((s.opacity, s.y), (0.0, -20.0));
    }

    // Later units lag behind earlier ones.
    rt.tick(0.1);
    assert!(rt.state_of(units[0]).unwrap().opacity > rt.state_of(units[4]).unwrap().opacity);

    rt.tick(anim.total_duration(units.len()));
    for &u in &units {
        assert_eq!(rt.state_of(u), Some(VisualState::NEUTRAL));
        assert_eq!(dom.style(u, "opacity").as_deref(), Some("1"));
    }
    assert!(!rt.is_active(id));
}

#[test]
fn killing_mid_flight_leaves_state_in_place() {
    let (_dom, mut rt, units) = units(3);
    let scope = rt.open_scope();
    let id = EntranceAnimator::default()
        .start(&mut rt, scope, &units)
        .unwrap()
        .unwrap();
    rt.tick(0.4);
    let before = rt.state_of(units[0]);
    assert!(rt.kill(id));
    assert_eq!(rt.state_of(units[0]), before);
}

#[test]
fn no_units_no_effect() {
    let (_dom, mut rt, _) = units(0);
    let scope = rt.open_scope();
    assert_eq!(EntranceAnimator::default().start(&mut rt, scope, &[]).unwrap(), None);
    assert_eq!(rt.active_effects(), 0);
}
