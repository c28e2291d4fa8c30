use super::*;

#[test]
fn pixel_is_bounds_checked() {
    let f = FrameRGBA {
        width: 2,
        height: 1,
        data: vec![1, 2, 3, 4, 5, 6, 7, 8],
        premultiplied: true,
    };
    assert_eq!(f.pixel(1, 0), Some([5, 6, 7, 8]));
    assert_eq!(f.pixel(2, 0), None);
    assert_eq!(f.pixel(0, 1), None);
}

#[test]
fn image_conversion_unpremultiplies() {
    let f = FrameRGBA {
        width: 1,
        height: 1,
        data: vec![64, 0, 128, 128],
        premultiplied: true,
    };
    let img = f.to_rgba_image().unwrap();
    let px = img.get_pixel(0, 0).0;
    assert!(px[0].abs_diff(128) <= 1, "{px:?}");
    assert_eq!(px[1], 0);
    assert!(px[2].abs_diff(255) <= 1, "{px:?}");
    assert_eq!(px[3], 128);
}

#[test]
fn image_conversion_checks_length() {
    let f = FrameRGBA {
        width: 2,
        height: 2,
        data: vec![0; 4],
        premultiplied: false,
    };
    assert!(matches!(
        f.to_rgba_image(),
        Err(FrameStackError::Validation(_))
    ));
}
