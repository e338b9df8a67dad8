use super::*;

#[test]
fn named_colors_are_case_insensitive() {
    assert_eq!(parse_color("white").unwrap(), WHITE);
    assert_eq!(parse_color("WHITE").unwrap(), WHITE);
    assert_eq!(parse_color("Black").unwrap(), BLACK);
}

#[test]
fn hex_with_and_without_hash() {
    assert_eq!(parse_color("#FF8000").unwrap(), Rgb([255, 128, 0]));
    assert_eq!(parse_color("ff8000").unwrap(), Rgb([255, 128, 0]));
    assert_eq!(parse_color("#e0e0e0").unwrap(), Rgb([224, 224, 224]));
}

#[test]
fn malformed_hex_is_rejected() {
    for bad in ["", "#", "#fff", "#ff80000", "#gg0000", "red", "#+f0000"] {
        let err = parse_color(bad).unwrap_err();
        assert!(
            matches!(err, NanobananaError::InvalidColor(_)),
            "expected InvalidColor for {bad:?}, got {err:?}"
        );
    }
}

#[test]
fn labels_use_names_for_white_and_black() {
    assert_eq!(color_label(WHITE), "white");
    assert_eq!(color_label(BLACK), "black");
    assert_eq!(color_label(Rgb([1, 171, 255])), "#01ABFF");
}
