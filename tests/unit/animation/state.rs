use super::*;

#[test]
fn lerp_endpoints_are_exact() {
    let a = VisualState {
        opacity: 0.0,
        y: 80.0,
        scale: 0.85,
        rotate_x: -18.0,
        rotate_y: 12.0,
    };
    let b = VisualState::NEUTRAL;
    assert_eq!(VisualState::lerp(&a, &b, 0.0), a);
    assert_eq!(VisualState::lerp(&a, &b, 1.0), b);
}

#[test]
fn with_overrides_only_declared_properties() {
    let set = PropertySet::new().opacity(0.0).y(60.0);
    let s = VisualState::NEUTRAL.with(&set);
    assert_eq!(s.opacity, 0.0);
    assert_eq!(s.y, 60.0);
    assert_eq!(s.scale, 1.0);
    assert_eq!(s.rotate_x, 0.0);
}

#[test]
fn css_transform_composes_all_axes() {
    let s = VisualState {
        opacity: 1.0,
        y: -20.0,
        scale: 1.03,
        rotate_x: 12.0,
        rotate_y: -6.5,
    };
    assert_eq!(
        s.css_transform(),
        "translate3d(0px, -20px, 0px) rotateX(12deg) rotateY(-6.5deg) scale(1.03)"
    );
}

#[test]
fn property_set_reports_non_finite_values() {
    assert!(PropertySet::new().is_empty());
    assert_eq!(PropertySet::new().y(1.0).first_non_finite(), None);
    assert_eq!(
        PropertySet::new().scale(f64::NAN).first_non_finite(),
        Some("scale")
    );
}

#[test]
fn property_set_json_omits_undeclared() {
    let json = serde_json::to_string(&PropertySet::new().opacity(0.0)).unwrap();
    assert_eq!(json, r#"{"opacity":0.0}"#);
    let back: PropertySet = serde_json::from_str(r#"{"rotate_y":-18}"#).unwrap();
    assert_eq!(back, PropertySet::new().rotate_y(-18.0));
}
