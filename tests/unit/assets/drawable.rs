use super::*;

#[test]
fn straight_rgba_is_premultiplied() {
    let img = DrawableImage::from_straight_rgba8(1, 1, vec![255, 128, 0, 128]);
    assert_eq!(img.data(), &[128, 64, 0, 128]);
    img.validate().unwrap();
}

#[test]
fn rgba_image_conversion_keeps_dimensions() {
    let src = image::RgbaImage::from_pixel(3, 2, image::Rgba([10, 20, 30, 255]));
    let img = DrawableImage::from_rgba_image(src);
    assert_eq!((img.width(), img.height()), (3, 2));
    assert_eq!(&img.data()[..4], &[10, 20, 30, 255]);
}

#[test]
fn validate_rejects_empty_and_mismatched_images() {
    let empty = DrawableImage::from_premul_rgba8(0, 4, Vec::new());
    assert!(matches!(
        empty.validate(),
        Err(FrameStackError::ResourceBinding(_))
    ));

    let short = DrawableImage::from_premul_rgba8(2, 2, vec![0u8; 15]);
    assert!(matches!(
        short.validate(),
        Err(FrameStackError::ResourceBinding(_))
    ));

    let huge = DrawableImage::from_premul_rgba8(70_000, 1, Vec::new());
    assert!(matches!(
        huge.validate(),
        Err(FrameStackError::ResourceBinding(_))
    ));
}

#[test]
fn clones_share_pixels() {
    let a = DrawableImage::solid(4, 4, [1, 2, 3, 255]);
    let b = a.clone();
    assert!(std::sync::Arc::ptr_eq(&a.shared_data(), &b.shared_data()));
}
