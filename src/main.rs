//! Headless tree runner
//!
//! Builds the scene, loads photo sizes in the background and drives a fixed
//! number of 60 Hz frames through the headless backend.
//!
//! Usage:
//!     tinsel [OPTIONS]
//!
//! Options:
//!     -c, --config <PATH>     Scene config JSON (default: built-in defaults)
//!     --seed <SEED>           Override the config seed
//!     -n, --frames <N>        Frames to run (default: 600)
//!     --photos <DIR>          Use every image in DIR as a photo
//!     --dump <PATH>           Write a JSON report of the built scene
//!     -h, --help              Show this help message

use std::env;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tinsel::assets::{AsyncImageSource, ImageSource};
use tinsel::core::logging;
use tinsel::render::HeadlessBackend;
use tinsel::scene::{ChristmasScene, SceneConfig};

const FRAME_STEP: Duration = Duration::from_micros(16_667);
const PHOTO_WAIT: Duration = Duration::from_secs(5);
const PHOTO_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif", "bmp"];

fn print_help() {
    eprintln!("tinsel - Headless decorated tree runner");
    eprintln!();
    eprintln!("Usage: tinsel [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("    -c, --config <PATH>     Scene config JSON (default: built-in defaults)");
    eprintln!("    --seed <SEED>           Override the config seed");
    eprintln!("    -n, --frames <N>        Frames to run (default: 600)");
    eprintln!("    --photos <DIR>          Use every image in DIR as a photo");
    eprintln!("    --dump <PATH>           Write a JSON report of the built scene");
    eprintln!("    -h, --help              Show this help message");
    eprintln!();
    eprintln!("Example:");
    eprintln!("    tinsel --photos ./photos --seed 7 --dump scene.json");
}

#[derive(Debug)]
struct Args {
    config: Option<PathBuf>,
    seed: Option<u64>,
    frames: u32,
    photos: Option<PathBuf>,
    dump: Option<PathBuf>,
}

fn parse_args() -> Result<Args, String> {
    let args: Vec<String> = env::args().skip(1).collect();

    let mut parsed = Args {
        config: None,
        seed: None,
        frames: 600,
        photos: None,
        dump: None,
    };

    let mut i = 0;
    while i < args.len() {
        let flag = args[i].as_str();
        let mut value = || {
            i += 1;
            args.get(i).cloned().ok_or_else(|| format!("Missing value for {}", flag))
        };
        match flag {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-c" | "--config" => parsed.config = Some(PathBuf::from(value()?)),
            "--seed" => {
                let v = value()?;
                parsed.seed = Some(v.parse().map_err(|_| format!("Invalid seed: {}", v))?);
            }
            "-n" | "--frames" => {
                let v = value()?;
                parsed.frames = v.parse().map_err(|_| format!("Invalid frame count: {}", v))?;
            }
            "--photos" => parsed.photos = Some(PathBuf::from(value()?)),
            "--dump" => parsed.dump = Some(PathBuf::from(value()?)),
            other => return Err(format!("Unknown option: {}", other)),
        }
        i += 1;
    }

    Ok(parsed)
}

/// Image file names in `dir`, sorted so runs are repeatable.
fn list_photos(dir: &Path) -> std::io::Result<Vec<String>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let is_image = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| PHOTO_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()));
        if is_image {
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                files.push(name.to_string());
            }
        }
    }
    files.sort();
    Ok(files)
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => SceneConfig::load(path)?,
        None => SceneConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(dir) = &args.photos {
        config.photos.files = list_photos(dir)?;
        config.photos.directory = dir.clone();
        log::info!("Found {} photos in {}", config.photos.files.len(), dir.display());
    }

    let start = Instant::now();
    let images = AsyncImageSource::new(4)?;
    let mut scene = ChristmasScene::new(config, images, HeadlessBackend::new())?;
    log::info!("Scene built in {:.1}ms", start.elapsed().as_secs_f64() * 1000.0);

    // Let photos settle so the report reflects their final sizes
    let wait_start = Instant::now();
    while scene.images().pending_count() > 0 && wait_start.elapsed() < PHOTO_WAIT {
        std::thread::sleep(Duration::from_millis(10));
        scene.poll_assets();
    }
    if scene.images().pending_count() > 0 {
        log::warn!("{} photos still loading after {:?}", scene.images().pending_count(), PHOTO_WAIT);
    }

    let run_start = Instant::now();
    for frame in 1..=args.frames {
        scene.frame_at(FRAME_STEP * frame)?;
    }
    let run_time = run_start.elapsed();
    if args.frames > 0 {
        log::info!(
            "{} frames in {:.1}ms ({:.3}ms/frame), last frame {:?}",
            args.frames,
            run_time.as_secs_f64() * 1000.0,
            run_time.as_secs_f64() * 1000.0 / args.frames as f64,
            scene.backend().last_frame()
        );
    }

    let report = scene.report();
    println!(
        "seed {}: {} layers, {} bulbs, {}/{} photos finalized, {} candies, {} bells, {} sparkle points",
        report.seed,
        report.layers.len(),
        report.bulbs,
        report.photos_finalized,
        report.photos,
        report.candies,
        report.bells,
        report.sparkle_points
    );

    if let Some(path) = &args.dump {
        std::fs::write(path, serde_json::to_string_pretty(&report)?)?;
        log::info!("Wrote scene report to {}", path.display());
    }

    Ok(())
}

fn main() {
    logging::init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            print_help();
            std::process::exit(1);
        }
    };

    if let Err(e) = run(args) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
