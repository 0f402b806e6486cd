//! Integration tests for frame-sequence rendering.

use drawer_arrow::pipeline::frame_file_name;
use drawer_arrow::{render_sequence, render_sequence_blocking, Backend, PipelineError, SequenceConfig};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

fn small_config() -> SequenceConfig {
    SequenceConfig {
        density: 1.0,
        frames: 4,
        ..Default::default()
    }
}

#[test]
fn test_round_trip_writes_all_frames() {
    let temp_dir = TempDir::new().unwrap();
    let written = render_sequence_blocking(&small_config(), temp_dir.path()).unwrap();

    // 4 forward frames + 3 on the way back
    assert_eq!(written.len(), 7);
    for (i, path) in written.iter().enumerate() {
        assert!(path.exists());
        assert_eq!(path.file_name().unwrap().to_str().unwrap(), frame_file_name(i));
    }

    let first = image::open(&written[0]).unwrap().to_rgba8();
    assert_eq!(first.dimensions(), (23, 23));
}

#[test]
fn test_return_sweep_plays_flipped() {
    let temp_dir = TempDir::new().unwrap();
    let config = SequenceConfig { frames: 5, ..small_config() };
    let written = render_sequence_blocking(&config, temp_dir.path()).unwrap();
    assert_eq!(written.len(), 9);

    // Same parameter (0.25) on the way out and back, rendered with opposite flip
    let opening = image::open(&written[1]).unwrap().to_rgba8();
    let closing = image::open(&written[7]).unwrap().to_rgba8();
    assert_ne!(opening, closing);

    // Both ends show the plain drawer
    let start = image::open(&written[0]).unwrap().to_rgba8();
    let end = image::open(&written[8]).unwrap().to_rgba8();
    assert_eq!(start, end);
}

#[test]
fn test_output_dir_is_created() {
    let temp_dir = TempDir::new().unwrap();
    let nested = temp_dir.path().join("a").join("b");
    let config = SequenceConfig { frames: 1, round_trip: false, ..small_config() };
    let written = render_sequence_blocking(&config, &nested).unwrap();
    assert_eq!(written.len(), 1);
    assert!(nested.join("frame_0000.png").exists());
}

#[test]
fn test_config_from_json_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("icon.json");
    std::fs::write(
        &path,
        r##"{"density": 2.0, "rounded": true, "color": "#ff0000", "background": null, "frames": 2}"##,
    )
    .unwrap();

    let config = SequenceConfig::from_json_file(&path).unwrap();
    assert!(config.rounded);
    assert_eq!(config.background, None);

    let written = render_sequence_blocking(&config, temp_dir.path().join("out")).unwrap();
    assert_eq!(written.len(), 3);

    let frame = image::open(&written[0]).unwrap().to_rgba8();
    assert_eq!(frame.dimensions(), (47, 47));
    assert_eq!(frame.get_pixel(0, 0)[3], 0);
    assert!(frame.pixels().any(|p| p[0] == 255 && p[3] == 255));
}

#[test]
fn test_missing_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let result = SequenceConfig::from_json_file(temp_dir.path().join("missing.json"));
    assert!(matches!(result, Err(PipelineError::Io(_))));
}

#[test]
fn test_invalid_background_fails_before_writing() {
    let temp_dir = TempDir::new().unwrap();
    let config = SequenceConfig {
        background: Some("#zzzzzz".to_string()),
        ..small_config()
    };
    let result = render_sequence_blocking(&config, temp_dir.path());
    assert!(matches!(result, Err(PipelineError::InvalidColor(_))));
    assert!(!temp_dir.path().join("frame_0000.png").exists());
}

#[tokio::test]
async fn test_progress_reaches_one() {
    let temp_dir = TempDir::new().unwrap();
    let progress = Arc::new(Mutex::new(Vec::<f32>::new()));
    let sink = progress.clone();

    render_sequence(
        &small_config(),
        temp_dir.path(),
        Some(Box::new(move |p: f32| sink.lock().unwrap().push(p))),
    )
    .await
    .unwrap();

    let progress = progress.lock().unwrap();
    assert_eq!(progress.len(), 7);
    assert!(progress.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(*progress.last().unwrap(), 1.0);
}

#[tokio::test]
async fn test_gpu_backend_renders_or_falls_back() {
    let temp_dir = TempDir::new().unwrap();
    let config = SequenceConfig {
        backend: Backend::Gpu,
        frames: 2,
        round_trip: false,
        ..small_config()
    };

    match render_sequence(&config, temp_dir.path(), None).await {
        Ok(written) => assert_eq!(written.len(), 2),
        Err(PipelineError::Gpu(e)) => eprintln!("Skipping test - GPU error: {}", e),
        Err(e) => panic!("unexpected error: {}", e),
    }
}

#[tokio::test]
async fn test_gpu_backend_falls_back_for_oversized_icon() {
    let temp_dir = TempDir::new().unwrap();
    // 2350px square, beyond the downlevel texture limit
    let config = SequenceConfig {
        density: 100.0,
        backend: Backend::Gpu,
        frames: 1,
        round_trip: false,
        ..Default::default()
    };

    match render_sequence(&config, temp_dir.path(), None).await {
        Ok(written) => {
            let frame = image::open(&written[0]).unwrap().to_rgba8();
            assert_eq!(frame.dimensions(), (2350, 2350));
        }
        Err(PipelineError::Gpu(e)) => eprintln!("Skipping test - GPU error: {}", e),
        Err(e) => panic!("unexpected error: {}", e),
    }
}
