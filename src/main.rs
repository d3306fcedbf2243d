use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use image::{Rgba, RgbaImage};
use pose_overlay::pipeline::RasterCanvas;
use pose_overlay::{CanvasInfo, Exercise, Landmark, LandmarkId, OverlayConfig, PoseFrame, PoseOverlay};

const IMAGE_WIDTH: u32 = 480;
const IMAGE_HEIGHT: u32 = 640;
const VIEW_WIDTH: u32 = 720;
const VIEW_HEIGHT: u32 = 1280;

struct Options {
    label: String,
    config: OverlayConfig,
    mirrored: bool,
    out: PathBuf,
}

fn parse_args() -> Result<Options> {
    let mut options = Options {
        label: "squats_down".to_string(),
        config: OverlayConfig::default(),
        mirrored: false,
        out: PathBuf::from("overlay.png"),
    };

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--label" => options.label = args.next().context("--label needs a value")?,
            "--out" => options.out = args.next().context("--out needs a value")?.into(),
            "--no-angles" => options.config = options.config.with_show_angles(false),
            "--no-depth" => options.config = options.config.with_visualize_z(false),
            "--mirror" => options.mirrored = true,
            other => bail!("unknown argument {other}"),
        }
    }
    Ok(options)
}

/// A person at the bottom of a squat, seen from the front, in image pixels.
fn demo_pose() -> PoseFrame {
    use LandmarkId::*;
    let points: &[(LandmarkId, f32, f32, f32)] = &[
        (Nose, 240.0, 150.0, -60.0),
        (LeftEyeInner, 250.0, 140.0, -55.0),
        (LeftEye, 255.0, 140.0, -55.0),
        (LeftEyeOuter, 260.0, 140.0, -55.0),
        (RightEyeInner, 230.0, 140.0, -55.0),
        (RightEye, 225.0, 140.0, -55.0),
        (RightEyeOuter, 220.0, 140.0, -55.0),
        (LeftEar, 270.0, 145.0, -20.0),
        (RightEar, 210.0, 145.0, -20.0),
        (LeftMouth, 250.0, 170.0, -50.0),
        (RightMouth, 230.0, 170.0, -50.0),
        (LeftShoulder, 300.0, 220.0, -10.0),
        (RightShoulder, 180.0, 220.0, -10.0),
        (LeftElbow, 330.0, 300.0, -60.0),
        (RightElbow, 150.0, 300.0, -60.0),
        (LeftWrist, 290.0, 260.0, -120.0),
        (RightWrist, 190.0, 260.0, -120.0),
        (LeftPinky, 285.0, 250.0, -125.0),
        (RightPinky, 195.0, 250.0, -125.0),
        (LeftIndex, 280.0, 255.0, -130.0),
        (RightIndex, 200.0, 255.0, -130.0),
        (LeftThumb, 282.0, 262.0, -128.0),
        (RightThumb, 198.0, 262.0, -128.0),
        (LeftHip, 280.0, 400.0, 20.0),
        (RightHip, 200.0, 400.0, 20.0),
        (LeftKnee, 360.0, 450.0, -80.0),
        (RightKnee, 150.0, 460.0, -70.0),
        (LeftAnkle, 330.0, 580.0, 30.0),
        (RightAnkle, 150.0, 580.0, 30.0),
        (LeftHeel, 325.0, 595.0, 50.0),
        (RightHeel, 155.0, 595.0, 50.0),
        (LeftFootIndex, 350.0, 610.0, -20.0),
        (RightFootIndex, 130.0, 610.0, -20.0),
    ];

    let mut frame = PoseFrame::empty();
    for &(id, x, y, z) in points {
        frame.set(id, Landmark::new(x, y, z, 0.98));
    }
    frame
}

fn main() -> Result<()> {
    env_logger::init();

    let options = parse_args()?;
    let info = CanvasInfo::fit(IMAGE_WIDTH, IMAGE_HEIGHT, VIEW_WIDTH, VIEW_HEIGHT)?
        .with_mirrored(options.mirrored);
    let overlay = PoseOverlay::new(options.config);
    let frame = demo_pose();
    let classification = [options.label.clone()];

    let exercises: Vec<&str> = Exercise::from_label(&options.label)
        .iter()
        .map(Exercise::display_name)
        .collect();
    if exercises.is_empty() {
        log::warn!("label {} matches no known exercise", options.label);
    }

    let list = overlay.render_to_list(&frame, &classification, &info);
    log::info!(
        "{} [{}]: {} dots, {} bones, {} texts",
        options.label,
        exercises.join(", "),
        list.circles().count(),
        list.lines().count(),
        list.texts().count()
    );
    for text in list.texts().skip(1).filter(|t| t.parse::<f64>().is_err()) {
        println!("{text}");
    }

    let background = RgbaImage::from_pixel(VIEW_WIDTH, VIEW_HEIGHT, Rgba([24, 24, 32, 255]));
    let mut canvas = RasterCanvas::from_image(background);
    list.replay(&mut canvas);
    canvas
        .into_image()
        .save(&options.out)
        .with_context(|| format!("failed to write {}", options.out.display()))?;

    println!("wrote {}", options.out.display());
    Ok(())
}
