use super::*;
use crate::dom::memory::MemoryDom;
use crate::foundation::core::{Rect, Viewport};

struct Fixture {
    dom: Rc<MemoryDom>,
    rt: MotionRuntime,
    target: ElementId,
}

fn fixture() -> Fixture {
    let dom = Rc::new(MemoryDom::new(Viewport::new(1000.0, 1000.0).unwrap()));
    let root = dom.create_element(None, "div", &[], Rect::new(0.0, 0.0, 1000.0, 5000.0));
    // Default window on this box: start 1200, end 2200.
    let target = dom.create_element(
        Some(root),
        "section",
        &[],
        Rect::new(0.0, 2000.0, 1000.0, 2600.0),
    );
    let rt = MotionRuntime::new(Rc::clone(&dom) as Rc<dyn Dom>);
    Fixture { dom, rt, target }
}

fn reveal_spec() -> ObserveSpec {
    ObserveSpec {
        from: PropertySet::new()
            .opacity(0.0)
            .y(80.0)
            .scale(0.85)
            .rotate_x(-18.0)
            .rotate_y(12.0),
        to: PropertySet::new()
            .opacity(1.0)
            .y(0.0)
            .scale(1.0)
            .rotate_x(0.0)
            .rotate_y(0.0),
        ease: Ease::OutQuart,
        duration: 1.6,
        window: ScrollTriggerWindow::default(),
    }
}

fn scroll(f: &mut Fixture, y: f64) {
    f.dom.set_scroll_y(y);
    f.rt.on_scroll();
}

#[test]
fn scrub_endpoints_are_exact_and_midpoint_is_between() {
    let mut f = fixture();
    let scope = f.rt.open_scope();
    let id = f
        .rt
        .observe(scope, f.target, &reveal_spec(), RevertPolicy::Restore)
        .unwrap();
    assert_eq!(
        f.rt.trigger_bounds(id),
        Some(TriggerBounds {
            start: 1200.0,
            end: 2200.0
        })
    );

    let from = VisualState {
        opacity: 0.0,
        y: 80.0,
        scale: 0.85,
        rotate_x: -18.0,
        rotate_y: 12.0,
    };
    assert_eq!(f.rt.state_of(f.target), Some(from));

    scroll(&mut f, 1200.0);
    assert_eq!(f.rt.state_of(f.target), Some(from));

    scroll(&mut f, 2200.0);
    assert_eq!(f.rt.state_of(f.target), Some(VisualState::NEUTRAL));

    scroll(&mut f, 1700.0);
    let mid = f.rt.state_of(f.target).unwrap();
    assert!(mid.opacity > 0.0 && mid.opacity < 1.0);
    assert!(mid.y > 0.0 && mid.y < 80.0);
    assert!(mid.scale > 0.85 && mid.scale < 1.0);
    assert!(mid.rotate_x > -18.0 && mid.rotate_x < 0.0);
    assert!(mid.rotate_y > 0.0 && mid.rotate_y < 12.0);

    // Out of range clamps.
    scroll(&mut f, 9000.0);
    assert_eq!(f.rt.state_of(f.target), Some(VisualState::NEUTRAL));
    scroll(&mut f, 0.0);
    assert_eq!(f.rt.state_of(f.target), Some(from));
}

#[test]
fn killed_observer_restores_and_ignores_scroll() {
    let mut f = fixture();
    let scope = f.rt.open_scope();
    let id = f
        .rt
        .observe(scope, f.target, &reveal_spec(), RevertPolicy::Restore)
        .unwrap();
    scroll(&mut f, 1500.0);
    assert!(f.dom.style(f.target, "transform").is_some());

    assert!(f.rt.kill(id));
    assert!(!f.rt.kill(id));
    assert_eq!(f.rt.active_observers(), 0);
    assert_eq!(f.dom.style(f.target, "opacity"), None);
    assert_eq!(f.dom.style(f.target, "transform"), None);

    let writes = f.dom.style_writes();
    scroll(&mut f, 2000.0);
    f.rt.on_resize();
    assert_eq!(f.dom.style_writes(), writes);
}

#[test]
fn resize_recomputes_trigger_bounds() {
    let mut f = fixture();
    let scope = f.rt.open_scope();
    let id = f
        .rt
        .observe(scope, f.target, &reveal_spec(), RevertPolicy::Restore)
        .unwrap();
    f.dom.resize(1000.0, 500.0).unwrap();
    f.rt.on_resize();
    assert_eq!(
        f.rt.trigger_bounds(id),
        Some(TriggerBounds {
            start: 1600.0,
            end: 2400.0
        })
    );
}

#[test]
fn players_run_to_completion_and_are_dropped() {
    let mut f = fixture();
    let scope = f.rt.open_scope();
    let spec = TweenSpec::from_to(
        PropertySet::new().opacity(0.0).y(-20.0),
        PropertySet::new().opacity(1.0).y(0.0),
        1.0,
        Ease::OutQuart,
    );
    let id = f
        .rt
        .play(scope, &spec, &[f.target], RevertPolicy::Abandon)
        .unwrap();
    assert_eq!(f.rt.state_of(f.target).unwrap().opacity, 0.0);

    f.rt.tick(0.5);
    let half = f.rt.state_of(f.target).unwrap();
    assert!(half.opacity > 0.5 && half.opacity < 1.0);
    assert!(f.rt.is_active(id));

    f.rt.tick(1.0);
    assert_eq!(f.rt.state_of(f.target).unwrap().opacity, 1.0);
    assert_eq!(f.rt.state_of(f.target).unwrap().y, 0.0);
    assert!(!f.rt.is_active(id));
}

#[test]
fn overwrite_replaces_running_player_on_same_target() {
    let mut f = fixture();
    let scope = f.rt.open_scope();
    let first = f
        .rt
        .play(
            scope,
            &TweenSpec::to(PropertySet::new().rotate_x(12.0), 0.3, Ease::Linear).with_overwrite(),
            &[f.target],
            RevertPolicy::Abandon,
        )
        .unwrap();
    f.rt.tick(0.15);
    let second = f
        .rt
        .play(
            scope,
            &TweenSpec::to(PropertySet::new().rotate_x(0.0), 0.5, Ease::Linear).with_overwrite(),
            &[f.target],
            RevertPolicy::Abandon,
        )
        .unwrap();
    assert!(!f.rt.is_active(first));
    assert!(f.rt.is_active(second));
    // Second tween starts from where the first left off.
    assert_eq!(f.rt.state_of(f.target).unwrap().rotate_x, 6.0);
}

#[test]
fn kill_owned_by_only_touches_that_scope() {
    let mut f = fixture();
    let a = f.rt.open_scope();
    let b = f.rt.open_scope();
    f.rt.observe(a, f.target, &reveal_spec(), RevertPolicy::Restore)
        .unwrap();
    f.rt.play(
        b,
        &TweenSpec::to(PropertySet::new().opacity(0.5), 1.0, Ease::Linear),
        &[f.target],
        RevertPolicy::Abandon,
    )
    .unwrap();

    assert_eq!(f.rt.kill_owned_by(a), 1);
    assert_eq!(f.rt.effects_owned_by(a), 0);
    assert_eq!(f.rt.effects_owned_by(b), 1);
}

#[test]
fn non_scrub_window_plays_once_when_crossed() {
    let mut f = fixture();
    let scope = f.rt.open_scope();
    let mut spec = reveal_spec();
    spec.window.scrub = false;
    spec.ease = Ease::Linear;
    f.rt.observe(scope, f.target, &spec, RevertPolicy::Restore)
        .unwrap();

    scroll(&mut f, 1000.0);
    assert_eq!(f.rt.active_effects(), 1);

    scroll(&mut f, 1300.0);
    assert_eq!(f.rt.active_effects(), 2);
    f.rt.tick(1.6);
    assert_eq!(f.rt.state_of(f.target), Some(VisualState::NEUTRAL));

    // Crossing again does not replay.
    scroll(&mut f, 0.0);
    scroll(&mut f, 1300.0);
    assert_eq!(f.rt.active_effects(), 1);
}

#[test]
fn play_rejects_empty_targets_and_bad_specs() {
    let mut f = fixture();
    let scope = f.rt.open_scope();
    let spec = TweenSpec::to(PropertySet::new(), 1.0, Ease::Linear);
    assert!(f.rt.play(scope, &spec, &[], RevertPolicy::Abandon).is_err());
    let bad = TweenSpec::to(PropertySet::new(), -1.0, Ease::Linear);
    assert!(
        f.rt.play(scope, &bad, &[f.target], RevertPolicy::Abandon)
            .is_err()
    );
    assert_eq!(f.rt.active_effects(), 0);
}

#[test]
fn handle_delegates_to_runtime() {
    let f = fixture();
    let handle = f.rt.into_handle();
    handle.tick(2.0);
    assert_eq!(handle.borrow().now(), 2.0);
    let weak = handle.downgrade();
    assert!(weak.upgrade().is_some());
    drop(handle);
    assert!(weak.upgrade().is_none());
}

#[test]
fn release_drops_effects_and_cache_but_keeps_inline_styles() {
    let mut f = fixture();
    let scope = f.rt.open_scope();
    let other = f.dom.create_element(None, "div", &[], Rect::ZERO);
    let id = f
        .rt
        .play(
            scope,
            &TweenSpec::to(PropertySet::new().opacity(0.5), 1.0, Ease::Linear),
            &[f.target],
            RevertPolicy::Restore,
        )
        .unwrap();
    f.rt.play(
        scope,
        &TweenSpec::to(PropertySet::new().opacity(0.5), 1.0, Ease::Linear),
        &[other],
        RevertPolicy::Abandon,
    )
    .unwrap();
    f.rt.tick(0.5);
    let opacity = f.dom.style(f.target, "opacity");
    let writes = f.dom.style_writes();

    assert_eq!(f.rt.release(&[f.target]), 1);
    assert!(!f.rt.is_active(id));
    assert_eq!(f.rt.state_of(f.target), None);
    assert_eq!(f.dom.style(f.target, "opacity"), opacity);
    assert_eq!(f.dom.style_writes(), writes);
    assert_eq!(f.rt.active_effects(), 1);

    f.rt.tick(2.0);
    assert_eq!(f.dom.style(f.target, "opacity"), opacity);
    assert_eq!(f.rt.state_of(other).unwrap().opacity, 0.5);
}
