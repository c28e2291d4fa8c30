use super::*;
use crate::assets::drawable::DrawableImage;
use crate::render::targets::TargetDesc;
use plane::Side;

fn viewport(w: u32, h: u32) -> Viewport {
    Viewport::new(w, h, 1.0).unwrap()
}

fn target(w: u32, h: u32) -> RenderTarget {
    RenderTarget::allocate(TargetDesc::rgba_linear(w, h)).unwrap()
}

const BLACK: [u8; 4] = [0, 0, 0, 255];

#[test]
fn new_scene_records_plane_geometry_and_no_material() {
    let s = Scene::new(viewport(640, 360));
    assert_eq!(s.plane().geometry, PlaneGeometry { width: 640, height: 360 });
    assert!(s.material().is_none());
    assert_eq!(*s.camera(), OrthographicCamera::new(0.5));
}

#[test]
fn resize_updates_geometry_and_keeps_frustum() {
    let mut s = Scene::new(viewport(10, 10));
    s.resize(viewport(1920, 1080));
    assert_eq!(s.plane().geometry, PlaneGeometry { width: 1920, height: 1080 });
    let c = s.camera();
    assert_eq!((c.left, c.right, c.top, c.bottom), (-0.5, 0.5, 0.5, -0.5));
    assert_eq!((c.near, c.far), (0.0, 1.0));
}

#[test]
fn projection_maps_frustum_corners_to_target_corners() {
    let p = OrthographicCamera::default().projection(200, 100);
    let tl = p * kurbo::Point::new(-0.5, 0.5);
    let br = p * kurbo::Point::new(0.5, -0.5);
    assert!((tl.x - 0.0).abs() < 1e-9 && (tl.y - 0.0).abs() < 1e-9);
    assert!((br.x - 200.0).abs() < 1e-9 && (br.y - 100.0).abs() < 1e-9);
}

#[test]
fn plane_transform_stretches_texture_over_target() {
    let t = OrthographicCamera::default().projection(300, 200) * Plane::uv_to_world(30, 10);
    let c = t.as_coeffs();
    let want = [10.0, 0.0, 0.0, 20.0, 0.0, 0.0];
    for (a, b) in c.iter().zip(want) {
        assert!((a - b).abs() < 1e-9, "{c:?}");
    }
    assert!(Side::Front.is_visible(t));
    assert!(!Side::Back.is_visible(t));
}

#[test]
fn render_without_material_clears_target() {
    let mut s = Scene::new(viewport(4, 4));
    let mut t = target(4, 4);
    t.clear([9, 9, 9, 9]);
    s.render_into(&mut t, BLACK).unwrap();
    assert!(t.data().chunks_exact(4).all(|px| px == BLACK));
}

#[test]
fn same_size_texture_is_copied_exactly() {
    let mut bytes = Vec::new();
    for i in 0..16u8 {
        bytes.extend_from_slice(&[i * 3, i * 5, i * 7, 255]);
    }
    let img = DrawableImage::from_premul_rgba8(4, 4, bytes.clone());
    let mut s = Scene::new(viewport(4, 4));
    s.set_material(Material::new(Texture::from_image(&img).unwrap()));
    let mut t = target(4, 4);
    s.render_into(&mut t, BLACK).unwrap();
    assert_eq!(t.data(), bytes.as_slice());
}

#[test]
fn scaled_solid_texture_fills_target() {
    let img = DrawableImage::solid(2, 2, [200, 100, 50, 255]);
    let mut s = Scene::new(viewport(8, 6));
    s.set_material(Material::new(Texture::from_image(&img).unwrap()));
    let mut t = target(8, 6);
    s.render_into(&mut t, BLACK).unwrap();
    let frame = t.to_frame();
    let center = frame.pixel(4, 3).unwrap();
    assert!(center[0].abs_diff(200) <= 2, "{center:?}");
    assert!(center[1].abs_diff(100) <= 2, "{center:?}");
    assert!(center[2].abs_diff(50) <= 2, "{center:?}");
    assert_eq!(center[3], 255);
    assert!(!s.material().unwrap().map.needs_update());
}

#[test]
fn back_side_material_is_culled() {
    let img = DrawableImage::solid(2, 2, [255, 255, 255, 255]);
    let mut s = Scene::new(viewport(2, 2));
    let mut m = Material::new(Texture::from_image(&img).unwrap());
    m.side = Side::Back;
    s.set_material(m);
    let mut t = target(2, 2);
    s.render_into(&mut t, BLACK).unwrap();
    assert!(t.data().chunks_exact(4).all(|px| px == BLACK));
}

#[test]
fn rebinding_snapshots_the_target() {
    let mut s = Scene::new(viewport(2, 2));
    let mut src = target(2, 2);
    src.clear([1, 2, 3, 255]);
    s.rebind_texture(&src);
    src.clear([0, 0, 0, 0]);

    let mut out = target(2, 2);
    s.render_into(&mut out, BLACK).unwrap();
    assert_eq!(out.to_frame().pixel(1, 1), Some([1, 2, 3, 255]));
}

#[test]
fn invalid_image_fails_to_bind() {
    let img = DrawableImage::from_premul_rgba8(2, 2, vec![0u8; 3]);
    assert!(matches!(
        Texture::from_image(&img),
        Err(FrameStackError::ResourceBinding(_))
    ));
}
