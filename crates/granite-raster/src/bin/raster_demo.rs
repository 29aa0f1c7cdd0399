use std::env;
use std::path::PathBuf;
use std::process;
use std::time::Instant;

use anyhow::{anyhow, bail, Context};
use glam::{Mat4, Vec3, Vec4};
use granite_raster::{Framebuffer, GraphicsPipelineDesc, Pipeline};
use tracing::Level;

fn usage() -> &'static str {
    "\
raster_demo: render two overlapping triangles and write color.png / depth.png

USAGE:
    cargo run -p granite-raster --features demo --bin raster_demo -- [options]

OPTIONS:
    --out-dir <dir>     Directory for the PNG files (default: current directory)
    --width <px>        Framebuffer width (default: 640)
    --height <px>       Framebuffer height (default: 480)
    -v, --verbose       Log draw statistics (repeat for per-triangle tracing)
"
}

fn main() {
    if let Err(err) = real_main() {
        eprintln!("error: {err:#}");
        process::exit(1);
    }
}

/// Camera at `(0, 1, 2)` looking at the origin through a 45 degree GL-style projection.
fn view_projection(width: u32, height: u32) -> Mat4 {
    let aspect = width as f32 / height as f32;
    let projection = Mat4::perspective_rh_gl(45f32.to_radians(), aspect, 0.01, 10_000.0);
    let view = Mat4::look_at_rh(Vec3::new(0.0, 1.0, 2.0), Vec3::ZERO, Vec3::Y);
    projection * view
}

fn parse_extent(flag: &str, value: Option<String>) -> anyhow::Result<u32> {
    let value = value.ok_or_else(|| anyhow!("{flag} requires a value"))?;
    let px: u32 = value
        .parse()
        .with_context(|| format!("invalid {flag} value {value:?}"))?;
    if px == 0 {
        bail!("{flag} must be non-zero");
    }
    Ok(px)
}

fn real_main() -> anyhow::Result<()> {
    let mut out_dir = PathBuf::from(".");
    let mut width = 640u32;
    let mut height = 480u32;
    let mut verbosity = 0u8;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print!("{}", usage());
                return Ok(());
            }
            "-v" | "--verbose" => verbosity = verbosity.saturating_add(1),
            "-vv" => verbosity = verbosity.saturating_add(2),
            "--out-dir" => {
                out_dir = args
                    .next()
                    .map(PathBuf::from)
                    .ok_or_else(|| anyhow!("--out-dir requires a value"))?;
            }
            "--width" => width = parse_extent("--width", args.next())?,
            "--height" => height = parse_extent("--height", args.next())?,
            _ => bail!("unknown argument {arg:?}\n\n{}", usage()),
        }
    }

    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let desc = GraphicsPipelineDesc::for_extent(width, height);
    let pipeline = Pipeline::new(&desc).context("failed to create pipeline")?;
    let mut fb = Framebuffer::for_viewport(pipeline.viewport());

    let triangle: [[f32; 3]; 3] = [[-0.5, -0.5, 0.5], [0.5, -0.5, 0.5], [0.0, 0.5, 0.5]];
    let indices = [0u32, 1, 2];

    let camera = view_projection(width, height);

    let start = Instant::now();
    let mut draw = |model: Mat4, color: [f32; 4]| -> anyhow::Result<()> {
        let mvp = camera * model;
        let stats = pipeline.draw(
            &mut fb,
            &indices,
            |i| {
                let [x, y, z] = triangle[i as usize];
                (mvp * Vec4::new(x, y, z, 1.0)).to_array()
            },
            |_| color,
        )?;
        println!(
            "drew {} triangle(s): {} fragment(s) passed, {} depth-rejected",
            stats.triangles, stats.fragments_passed, stats.fragments_depth_rejected
        );
        Ok(())
    };
    draw(Mat4::IDENTITY, [1.0, 0.0, 0.0, 1.0])?;
    draw(
        Mat4::from_translation(Vec3::new(0.0, 0.0, -0.5)),
        [0.0, 1.0, 0.0, 1.0],
    )?;
    let elapsed = start.elapsed();
    println!(
        "rasterization took {:.3}ms",
        elapsed.as_secs_f64() * 1000.0
    );

    let color_path = out_dir.join("color.png");
    image::RgbaImage::from_raw(width, height, fb.as_rgba8().to_vec())
        .ok_or_else(|| anyhow!("invalid color buffer"))?
        .save(&color_path)
        .with_context(|| format!("failed to write PNG: {}", color_path.display()))?;

    let depth_path = out_dir.join("depth.png");
    let luma: Vec<u8> = fb
        .depth()
        .iter()
        .map(|d| (d.clamp(0.0, 1.0) * 255.0) as u8)
        .collect();
    image::GrayImage::from_raw(width, height, luma)
        .ok_or_else(|| anyhow!("invalid depth buffer"))?
        .save(&depth_path)
        .with_context(|| format!("failed to write PNG: {}", depth_path.display()))?;

    println!("wrote {} and {}", color_path.display(), depth_path.display());
    Ok(())
}
