use super::*;
use crate::effects::fx::Fx;
use crate::timeline::track::Track;

fn solid(w: u32, h: u32, px: [u8; 4]) -> DrawableImage {
    DrawableImage::solid(w, h, px)
}

#[test]
fn new_sizes_everything_from_the_pixel_ratio() {
    let c = Compositor::new(20, 10, CompositorOpts::default().with_pixel_ratio(2.0)).unwrap();
    assert_eq!(c.targets().size(), (40, 20));
    assert_eq!(c.sink().size(), (40, 20));
    assert_eq!(c.scene().plane().geometry.width, 20);
    assert_eq!(c.read_back(Destination::Screen).pixel(0, 0), Some([0, 0, 0, 255]));
}

#[test]
fn chain_ends_with_pool_on_the_last_write() {
    let mut c = Compositor::new(2, 2, CompositorOpts::default()).unwrap();
    let img = solid(2, 2, [10, 20, 30, 255]);
    let atts = vec![
        Attachment::new(0, 5, Track::Filter(Fx::Invert)),
        Attachment::new(0, 5, Track::Filter(Fx::Invert)),
        Attachment::new(0, 5, Track::Filter(Fx::Invert)),
    ];
    let out = c.draw(&img, &atts, FrameIndex(1)).unwrap();
    assert_eq!(out.passes, 3);
    assert_eq!(out.prepasses, 3);
    assert_eq!(c.targets().which(), Which::Buffer2);
    assert_eq!(
        c.read_back(Destination::Screen).pixel(1, 1),
        Some([245, 235, 225, 255])
    );
}

#[test]
fn forwarding_track_passes_the_image_through_and_presents() {
    let mut c = Compositor::new(2, 2, CompositorOpts::default()).unwrap();
    let img = solid(2, 2, [10, 20, 30, 255]);
    let atts = vec![Attachment::new(0, 5, Track::Video)];
    let out = c.draw(&img, &atts, FrameIndex(0)).unwrap();
    assert!(out.attached);
    assert!(out.presented);
    assert_eq!(c.read_back(Destination::Offscreen).pixel(0, 0), Some([10, 20, 30, 255]));
    assert_eq!(c.read_back(Destination::Screen).pixel(0, 0), Some([10, 20, 30, 255]));
}

#[test]
fn audio_attachment_does_not_freeze_the_screen() {
    let mut c = Compositor::new(2, 2, CompositorOpts::default()).unwrap();
    c.draw(&solid(2, 2, [200, 0, 0, 255]), &[], FrameIndex(0)).unwrap();

    let atts = vec![Attachment::new(0, 100, Track::Audio)];
    let out = c.draw(&solid(2, 2, [0, 0, 200, 255]), &atts, FrameIndex(1)).unwrap();
    assert!(out.presented);
    assert_eq!(c.read_back(Destination::Screen).pixel(1, 1), Some([0, 0, 200, 255]));
}

#[test]
fn later_effect_overrides_a_forwarding_track() {
    let mut c = Compositor::new(2, 2, CompositorOpts::default()).unwrap();
    let img = solid(2, 2, [10, 20, 30, 255]);
    let atts = vec![
        Attachment::new(0, 5, Track::Picture),
        Attachment::new(0, 5, Track::Filter(Fx::Invert)),
    ];
    let out = c.draw(&img, &atts, FrameIndex(2)).unwrap();
    assert_eq!(out.passes, 2);
    assert_eq!(
        c.read_back(Destination::Screen).pixel(0, 0),
        Some([245, 235, 225, 255])
    );
}

#[test]
fn default_offscreen_mode_overrides_screen_requests() {
    let opts = CompositorOpts::default().with_render_to_screen(false);
    let mut c = Compositor::new(2, 2, opts).unwrap();
    let img = solid(2, 2, [1, 2, 3, 255]);
    let out = c.draw_to(&img, &[], FrameIndex(0), Destination::Screen).unwrap();
    assert_eq!(out.destination, Destination::Offscreen);
    assert_eq!(c.read_back(Destination::Offscreen).pixel(0, 0), Some([1, 2, 3, 255]));
    assert_eq!(c.read_back(Destination::Screen).pixel(0, 0), Some([0, 0, 0, 255]));
}

#[test]
fn clear_resets_the_screen() {
    let mut c = Compositor::new(2, 2, CompositorOpts::default()).unwrap();
    c.draw(&solid(2, 2, [9, 9, 9, 255]), &[], FrameIndex(0)).unwrap();
    c.clear();
    assert!(
        c.read_back(Destination::Screen)
            .data
            .chunks_exact(4)
            .all(|px| px == [0, 0, 0, 255])
    );
}
