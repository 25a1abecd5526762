// File: crates/overlay-core/tests/color.rs
// Purpose: CSS color parsing used by every shape style.

use overlay_core::color::{css_or, parse_css, with_alpha};
use skia_safe::Color;

#[test]
fn parses_hex_forms() {
    assert_eq!(parse_css("#fff"), Some(Color::from_argb(255, 255, 255, 255)));
    assert_eq!(parse_css("#2196F3"), Some(Color::from_argb(255, 0x21, 0x96, 0xf3)));
    assert_eq!(parse_css("#00000080"), Some(Color::from_argb(0x80, 0, 0, 0)));
    assert_eq!(parse_css("#12345"), None);
}

#[test]
fn parses_functional_forms() {
    assert_eq!(parse_css("rgba(33, 150, 243, 0.2)"), Some(Color::from_argb(51, 33, 150, 243)));
    assert_eq!(parse_css("RGB(1,2,3)"), Some(Color::from_argb(255, 1, 2, 3)));
    assert_eq!(parse_css("rgba(1,2)"), None);
    assert_eq!(parse_css("transparent"), Some(Color::from_argb(0, 0, 0, 0)));
}

#[test]
fn falls_back_on_garbage() {
    let d = Color::from_argb(255, 9, 9, 9);
    assert_eq!(css_or(Some("not-a-color"), d), d);
    assert_eq!(css_or(None, d), d);
}

#[test]
fn alpha_is_clamped() {
    let c = Color::from_argb(255, 10, 20, 30);
    assert_eq!(with_alpha(c, 0.5).a(), 128);
    assert_eq!(with_alpha(c, 3.0).a(), 255);
    assert_eq!(with_alpha(c, -1.0).a(), 0);
}
