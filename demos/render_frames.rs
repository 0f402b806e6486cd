//! Demo: Render the drawer-arrow animation to PNG frames.
//!
//! Run with:
//!     cargo run --example render_frames --features tokio -- [config.json] [output_dir]
//!
//! Without a config file the default sequence (density 3, 30 frames, round
//! trip, CPU backend) is rendered to `drawer_arrow_frames/`.

use anyhow::Context;
use drawer_arrow::{render_sequence, DrawerArrowDrawable, SequenceConfig};
use std::path::PathBuf;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => SequenceConfig::from_json_file(&path)
            .with_context(|| format!("loading sequence config from {}", path))?,
        None => SequenceConfig::default(),
    };
    let output_dir = PathBuf::from(args.next().unwrap_or_else(|| "drawer_arrow_frames".to_string()));

    println!("Drawer Arrow - Frame Sequence Demo");
    println!("==================================\n");

    let preview = DrawerArrowDrawable::with_style(config.density, config.rounded)?;
    println!("  Density: {}", config.density);
    println!("  Size: {}x{}", preview.intrinsic_width(), preview.intrinsic_height());
    println!("  Caps: {:?}", preview.stroke().cap);
    println!("  Backend: {:?}", config.backend);
    println!("  Frames per sweep: {}", config.frames);
    println!("  Round trip: {}\n", config.round_trip);

    let progress: Box<dyn Fn(f32) + Send> = Box::new(|p: f32| {
        if (p * 100.0) as u32 % 25 == 0 {
            log::info!("{:.0}% done", p * 100.0);
        }
    });

    let written = render_sequence(&config, &output_dir, Some(progress))
        .await
        .context("rendering frame sequence")?;

    println!("\nWrote {} frames to {}", written.len(), output_dir.display());
    Ok(())
}
