use std::path::PathBuf;

use invaders::config::GameConfig;
use invaders::{Error, Session};
use log::{info, warn};

const DEFAULT_CONFIG_PATH: &str = "invaders.json";

struct Args {
    config: Option<PathBuf>,
    frames: Option<u64>,
    headless: bool,
    no_vsync: bool,
    print_config: bool,
}

/// Parse command line arguments
fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().collect();
    let mut parsed = Args {
        config: None,
        frames: None,
        headless: !cfg!(feature = "sdl"),
        no_vsync: false,
        print_config: false,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--headless" => parsed.headless = true,
            "--no-vsync" => parsed.no_vsync = true,
            "--print-config" => parsed.print_config = true,
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    parsed.config = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            },
            "--frames" | "-n" => {
                if i + 1 < args.len() {
                    match args[i + 1].parse::<u64>() {
                        Ok(n) => parsed.frames = Some(n),
                        Err(_) => warn!("ignoring bad frame count '{}'", args[i + 1]),
                    }
                    i += 1;
                }
            },
            "--help" => {
                println!("Usage: invaders [OPTIONS]");
                println!();
                println!("Options:");
                println!(
                    "  --config PATH, -c PATH  JSON config file (default: {} if present)",
                    DEFAULT_CONFIG_PATH
                );
                println!("  --frames N, -n N        Stop after N ticks");
                println!("  --headless              Run without a window");
                println!("  --no-vsync              Disable VSync for uncapped framerate");
                println!("  --print-config          Print the effective config as JSON and exit");
                println!("  --help                  Show this help message");
                std::process::exit(0);
            },
            other => warn!("ignoring unknown argument '{}'", other),
        }
        i += 1;
    }

    parsed
}

/// Explicit path must load; the default path is optional
fn load_config(args: &Args) -> Result<GameConfig, Error> {
    if let Some(path) = &args.config {
        return GameConfig::load(path);
    }
    match GameConfig::load(DEFAULT_CONFIG_PATH) {
        Ok(config) => Ok(config),
        Err(Error::Io(_)) => {
            info!("no {} found, using defaults", DEFAULT_CONFIG_PATH);
            Ok(GameConfig::default())
        },
        Err(e) => Err(e),
    }
}

/// Tick without presenting; a frame limit of `None` means 60 ticks
fn run_headless(session: &mut Session, config: &GameConfig, frames: Option<u64>) -> Result<(), Error> {
    let frames = frames.unwrap_or(60);
    for _ in 0..frames {
        session.tick()?;
    }
    let background = config.palette().background;
    let lit = session
        .buffer()
        .pixels()
        .iter()
        .filter(|&&p| p != background)
        .count();
    info!("headless run: {} ticks, {} foreground pixels in last frame", frames, lit);
    Ok(())
}

#[cfg(feature = "sdl")]
fn run_windowed(session: &mut Session, config: &GameConfig, frames: Option<u64>) -> Result<(), Error> {
    use invaders::display::{Display, RenderTarget};
    use invaders::util::FpsCounter;
    use std::time::Duration;

    let (mut display, texture_creator) = Display::open(&config.window)?;
    let mut target = RenderTarget::with_size(&texture_creator, config.width, config.height)?;

    let mut fps_counter = FpsCounter::new(Duration::from_secs(1));

    while !display.should_close() {
        if frames.is_some_and(|limit| session.tick_count() >= limit) {
            break;
        }

        let buffer = session.tick()?;
        display.present(&mut target, buffer)?;

        if let Some(report) = fps_counter.tick() {
            info!(
                "FPS {:.1} avg over {} frames  {:.2}ms avg  {:.2}ms slowest",
                report.avg_fps, report.frames, report.avg_frame_ms, report.slowest_frame_ms
            );
        }
    }
    Ok(())
}

fn main() -> Result<(), Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = parse_args();
    let mut config = load_config(&args)?;
    if args.no_vsync {
        config.window.vsync = false;
    }
    config.validate()?;

    if args.print_config {
        println!("{}", config.to_json()?);
        return Ok(());
    }

    let mut session = Session::new(&config)?;
    if args.headless {
        info!("running headless");
    }

    #[cfg(feature = "sdl")]
    if !args.headless {
        if let Err(e) = run_windowed(&mut session, &config, args.frames) {
            log::error!("display backend failed: {}", e);
            return Err(e);
        }
        session.shutdown();
        return Ok(());
    }

    run_headless(&mut session, &config, args.frames)?;
    session.shutdown();
    Ok(())
}
