use std::rc::Rc;

use super::*;
use crate::animation::{ease::Ease, state::PropertySet, tween::TweenSpec};
use crate::dom::{Dom, memory::MemoryDom};
use crate::foundation::core::{Rect, Viewport};
use crate::runtime::timeline::RevertPolicy;

#[test]
fn revert_kills_live_effects_and_empties() {
    let dom = Rc::new(MemoryDom::new(Viewport::default()));
    let el = dom.create_element(None, "div", &[], Rect::ZERO);
    let mut rt = MotionRuntime::new(Rc::clone(&dom) as Rc<dyn Dom>);
    let scope = rt.open_scope();
    let spec = TweenSpec::to(PropertySet::new().opacity(0.5), 1.0, Ease::Linear);

    let mut registry = EffectRegistry::new();
    let short = rt
        .play(scope, &TweenSpec { duration: 0.1, ..spec.clone() }, &[el], RevertPolicy::Abandon)
        .unwrap();
    let long = rt.play(scope, &spec, &[el], RevertPolicy::Abandon).unwrap();
    registry.push(short, EffectRole::Entrance);
    registry.push(long, EffectRole::Reveal);
    assert_eq!(registry.count(EffectRole::Reveal), 1);
    assert_eq!(registry.handles()[0].id, short);

    rt.tick(0.5);
    assert!(!rt.is_active(short));

    assert_eq!(registry.revert(&mut rt), 1);
    assert!(registry.is_empty());
    assert_eq!(rt.active_effects(), 0);
    assert_eq!(registry.revert(&mut rt), 0);
}
