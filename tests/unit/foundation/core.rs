use super::*;

#[test]
fn halving_floors_toward_negative_infinity() {
    assert_eq!(Pos::new(7, -3).halved(), Pos::new(3, -2));
    assert_eq!(Size::new(1001, 600).halved(), Size::new(500, 300));
}

#[test]
fn divided_matches_integer_downscale() {
    assert_eq!(Size::new(1000, 998).divided(3), Size::new(333, 332));
    assert_eq!(Size::new(5, 5).divided(0), Size::new(5, 5));
}

#[test]
fn deserializes_from_arrays() {
    let p: Pos = serde_json::from_str("[-4, 12]").unwrap();
    assert_eq!(p, Pos::new(-4, 12));
    let s: Size = serde_json::from_str("[930, 1080]").unwrap();
    assert_eq!(s, Size::new(930, 1080));
    assert!(serde_json::from_str::<Size>("[-1, 3]").is_err());
}

#[test]
fn empty_sizes_are_rejected_with_key_name() {
    let err = Size::new(0, 10).non_empty("itemBoarSize").unwrap_err();
    assert!(err.to_string().contains("itemBoarSize"));
    assert!(Size::square(4).non_empty("x").is_ok());
}
