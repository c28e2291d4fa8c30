use super::*;
use serde_json::json;

#[test]
fn parse_named_builtins() {
    assert_eq!(parse_fx("Grayscale", &json!({})).unwrap().name(), "color_matrix");
    assert_eq!(parse_fx("invert", &json!(null)).unwrap().name(), "invert");
    assert!(matches!(
        parse_fx("opacity", &json!({ "value": 0.5 })).unwrap(),
        Fx::Opacity { value } if value == 0.5
    ));
}

#[test]
fn parse_blur_defaults_sigma_from_radius() {
    let fx = parse_fx("blur", &json!({ "radius_px": 6 })).unwrap();
    assert!(matches!(fx, Fx::Blur { radius_px: 6, sigma } if sigma == 3.0));
}

#[test]
fn parse_rejects_bad_params() {
    assert!(parse_fx("", &json!({})).is_err());
    assert!(parse_fx("posterize", &json!({})).is_err());
    assert!(parse_fx("opacity", &json!({ "value": 2.0 })).is_err());
    assert!(parse_fx("blur", &json!({ "radius_px": 100000 })).is_err());
    assert!(parse_fx("blur", &json!({ "radius_px": 2, "sigma": 0.0 })).is_err());
    assert!(parse_fx("color_matrix", &json!({ "matrix": [1.0, 2.0] })).is_err());
}

#[test]
fn parse_color_matrix_roundtrips_coefficients() {
    let m: Vec<f32> = Fx::IDENTITY_MATRIX.to_vec();
    let fx = parse_fx("color_matrix", &json!({ "matrix": m })).unwrap();
    assert!(matches!(fx, Fx::ColorMatrix { matrix } if matrix == Fx::IDENTITY_MATRIX));
}

#[test]
fn color_matrix_identity_is_identity() {
    let src = vec![10u8, 20, 30, 255, 0, 0, 0, 0, 128, 64, 0, 128];
    let mut dst = vec![0u8; src.len()];
    color_matrix_rgba8_premul(&src, &mut dst, &Fx::IDENTITY_MATRIX);
    assert_eq!(dst, src);
}

#[test]
fn grayscale_equalizes_channels() {
    let src = vec![200u8, 40, 90, 255];
    let mut dst = vec![0u8; 4];
    let Fx::ColorMatrix { matrix } = Fx::grayscale() else {
        panic!("grayscale is a colour matrix");
    };
    color_matrix_rgba8_premul(&src, &mut dst, &matrix);
    assert_eq!(dst[0], dst[1]);
    assert_eq!(dst[1], dst[2]);
    assert_eq!(dst[3], 255);
}

#[test]
fn invert_keeps_alpha_and_stays_premultiplied() {
    let src = vec![0u8, 100, 255, 255, 10, 20, 30, 128];
    let mut dst = vec![0u8; src.len()];
    invert_rgba8_premul(&src, &mut dst);
    assert_eq!(&dst[..4], &[255, 155, 0, 255]);
    assert_eq!(&dst[4..], &[118, 108, 98, 128]);
}

#[test]
fn opacity_scales_every_channel() {
    let src = vec![255u8, 255, 255, 255];
    let mut dst = vec![0u8; 4];
    opacity_rgba8_premul(&src, &mut dst, 0.0);
    assert_eq!(dst, vec![0, 0, 0, 0]);
    opacity_rgba8_premul(&src, &mut dst, 1.0);
    assert_eq!(dst, src);
}
