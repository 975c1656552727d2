use super::*;

fn ids(n: u32) -> Vec<ElementId> {
    (0..n).map(ElementId).collect()
}

#[test]
fn stagger_offsets_are_linear() {
    assert_eq!(stagger_offsets(3, 0.5), vec![0.0, 0.5, 1.0]);
    assert!(stagger_offsets(0, 0.5).is_empty());
}

#[test]
fn total_duration_includes_stagger_tail() {
    let spec = TweenSpec::to(PropertySet::new().opacity(1.0), 1.2, Ease::OutQuart)
        .with_stagger(0.035);
    assert!((spec.total_duration(11) - 1.55).abs() < 1e-12);
    assert_eq!(spec.total_duration(0), 1.2);
}

#[test]
fn validate_rejects_bad_timing() {
    let ok = TweenSpec::to(PropertySet::new(), 0.3, Ease::Linear);
    assert!(ok.validate().is_ok());
    assert!(
        TweenSpec::to(PropertySet::new(), 0.0, Ease::Linear)
            .validate()
            .is_err()
    );
    assert!(ok.clone().with_stagger(-1.0).validate().is_err());
    assert!(
        TweenSpec::to(PropertySet::new().y(f64::INFINITY), 1.0, Ease::Linear)
            .validate()
            .is_err()
    );
}

#[test]
fn staggered_targets_start_in_order() {
    let spec = TweenSpec::from_to(
        PropertySet::new().opacity(0.0),
        PropertySet::new().opacity(1.0),
        1.0,
        Ease::Linear,
    )
    .with_stagger(0.5);
    let player = Player::start(&spec, &ids(3), 10.0, |_| VisualState::NEUTRAL);

    let at = player.sample(10.5);
    assert_eq!(at[0].1.opacity, 0.5);
    assert_eq!(at[1].1.opacity, 0.0);
    assert_eq!(at[2].1.opacity, 0.0);

    assert!(!player.is_complete(11.9));
    assert!(player.is_complete(12.0));
    assert!(player.sample(12.0).iter().all(|(_, s)| s.opacity == 1.0));
}

#[test]
fn to_tween_starts_from_current_state() {
    let spec = TweenSpec::to(PropertySet::new().rotate_x(10.0), 1.0, Ease::Linear);
    let current = VisualState {
        rotate_x: 4.0,
        ..VisualState::NEUTRAL
    };
    let player = Player::start(&spec, &ids(1), 0.0, |_| current);
    assert_eq!(player.sample(0.0)[0].1.rotate_x, 4.0);
    assert_eq!(player.sample(1.0)[0].1.rotate_x, 10.0);
    assert!(player.drives_only(ElementId(0)));
}
