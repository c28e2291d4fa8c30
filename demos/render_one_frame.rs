use framestack::{
    Attachment, Compositor, CompositorOpts, Destination, DrawableImage, FrameIndex, Fx, Track,
    TransitionFx, WipeDir,
};

fn checkerboard(w: u32, h: u32, cell: u32) -> DrawableImage {
    let img = image::RgbaImage::from_fn(w, h, |x, y| {
        let on = ((x / cell) + (y / cell)) % 2 == 0;
        let r = (x * 255 / w.max(1)) as u8;
        let b = (y * 255 / h.max(1)) as u8;
        if on {
            image::Rgba([r, 180, b, 255])
        } else {
            image::Rgba([30, 30, 40, 255])
        }
    });
    DrawableImage::from_rgba_image(img)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let out_dir = std::path::Path::new("target").join("demos");
    std::fs::create_dir_all(&out_dir)?;

    let source = checkerboard(320, 180, 20);
    let attachments = vec![
        Attachment::new(0, 60, Track::Filter(Fx::sepia())),
        Attachment::new(10, 40, Track::Effect(Fx::Blur {
            radius_px: 6,
            sigma: 3.0,
        })),
        Attachment::new(0, 60, Track::Sticker),
        Attachment::new(20, 50, Track::Transition(TransitionFx::Wipe {
            dir: WipeDir::LeftToRight,
            soft_edge: 0.1,
        })),
    ];

    let opts = CompositorOpts::default().with_pixel_ratio(2.0);
    let mut compositor = Compositor::new(320, 180, opts)?;

    for frame in [0u64, 15, 35, 55, 70] {
        let outcome = compositor.draw(&source, &attachments, FrameIndex(frame))?;
        let path = out_dir.join(format!("frame_{frame:03}.png"));
        compositor
            .read_back(Destination::Screen)
            .to_rgba_image()?
            .save(&path)?;
        println!(
            "frame {frame}: {} passes, presented={} -> {}",
            outcome.passes,
            outcome.presented,
            path.display()
        );
    }

    Ok(())
}
