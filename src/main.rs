use clap::Parser;
use rasterbox::cli::Cli;
use rasterbox::demos::{self, Flow};
use rasterbox::display::sdl::{self, SdlSurface};
use rasterbox::util::FpsCounter;
use rasterbox::{Engine, EngineConfig, EngineError, Result};

/// Frames between fps log lines
const FPS_LOG_INTERVAL: u64 = 600;

fn run(cli: &Cli) -> Result<()> {
    let mut demo = demos::by_name(&cli.demo)
        .ok_or_else(|| EngineError::Platform(format!("unknown demo '{}'", cli.demo)))?;

    let base = match &cli.config {
        Some(path) => EngineConfig::load(path)?,
        None => {
            let (width, height) = demo.size();
            EngineConfig {
                title: demo.title().to_string(),
                width,
                height,
                ..EngineConfig::default()
            }
        },
    };
    let config = cli.apply(base);
    log::info!("starting '{}' at {}x{}", demo.name(), config.width, config.height);

    let (window, texture_creator, mut events) = sdl::open(&config)?;
    let surface = SdlSurface::new(window, &texture_creator);
    let mut engine = Engine::new(surface, &config)?;

    let mut fps = FpsCounter::new(60);
    let mut frame: u64 = 0;

    loop {
        let (_, avg_fps) = fps.tick();

        let batch = events.poll();
        engine.handle_events(&batch);
        if engine.input().quit_requested() {
            break;
        }
        if demo.update(engine.input()) == Flow::Quit {
            break;
        }

        let buffer = engine.frame_buffer();
        buffer.clear(config.clear_color);
        demo.render(buffer);

        if let Err(e) = engine.present() {
            log::warn!("frame skipped: {}", e);
        }

        frame += 1;
        if frame % FPS_LOG_INTERVAL == 0 {
            log::debug!("{:.1} fps", avg_fps);
        }
    }

    log::info!("'{}' closed after {} frames", demo.name(), frame);
    Ok(())
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        log::error!("{}", e);
        eprintln!("rasterbox: {}", e);
        std::process::exit(1);
    }
}
