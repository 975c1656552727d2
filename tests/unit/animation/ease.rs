use super::*;

#[test]
fn endpoints_are_stable() {
    for ease in Ease::ALL {
        assert_eq!(ease.apply(0.0), 0.0);
        assert_eq!(ease.apply(1.0), 1.0);
    }
}

#[test]
fn monotonic_spot_check() {
    for ease in Ease::ALL {
        let a = ease.apply(0.25);
        let b = ease.apply(0.5);
        let c = ease.apply(0.75);
        assert!(a < b);
        assert!(b < c);
    }
}

#[test]
fn out_curves_decelerate() {
    for ease in [Ease::OutQuad, Ease::OutCubic, Ease::OutQuart] {
        assert!(ease.apply(0.5) > 0.5);
    }
    assert!(Ease::OutQuart.apply(0.25) > Ease::OutCubic.apply(0.25));
}

#[test]
fn input_outside_unit_range_clamps() {
    assert_eq!(Ease::OutQuart.apply(-3.0), 0.0);
    assert_eq!(Ease::OutQuart.apply(7.0), 1.0);
}

#[test]
fn parses_power_aliases() {
    assert_eq!("power3.out".parse::<Ease>().unwrap(), Ease::OutQuart);
    assert_eq!("power2.inOut".parse::<Ease>().unwrap(), Ease::InOutCubic);
    assert_eq!("Linear".parse::<Ease>().unwrap(), Ease::Linear);
    assert!("elastic".parse::<Ease>().is_err());

    let ease: Ease = serde_json::from_str("\"power2.out\"").unwrap();
    assert_eq!(ease, Ease::OutCubic);
}
