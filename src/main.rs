// What you SEE:
// • A 250x250 window with a white border and a fire (or plasma, or the ring test card) inside.
// • Two frames take turns: while the window shows one, the next is drawn into the other.
// • Ctrl+C, Escape or closing the window ends the program.

mod config;
mod draw;
mod driver;
mod error;
mod fire;
mod palette;
mod plasma;
mod pool;
mod rings;
mod types;

use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use clap::Parser;
use tracing::{error, info};

use config::Config;
use draw::{Drawer, Event, EventSource};
use driver::{Effect, FrameDriver};
use error::Error;
use types::PixelFormat;

fn main() -> ExitCode {
    let config = Config::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(config.log_level())
        .init();

    if let Err(e) = config.validate() {
        error!("{e}");
        return ExitCode::from(2);
    }

    /* --- Window setup ---
       Missing window or pixel format: nothing is drawn, exit 1. */
    let mut drawer = match open_window(&config) {
        Ok(d) => d,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    // Ctrl+C only flips the flag; the loop notices it on its next turn.
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    if let Err(e) = ctrlc::set_handler(move || r.store(false, Ordering::SeqCst)).map_err(Error::from) {
        error!("{e}");
        return ExitCode::FAILURE;
    }

    let effect = Effect::new(config.effect, config.width, config.height, config.seed);
    let mut driver = FrameDriver::new(config.width, config.height, config.padding, effect);
    info!(effect = ?config.effect, width = config.width, height = config.height, "starting");

    /* --- Event loop ---
       The first frame is drawn straight away; every later one on a refresh event. */
    let result = driver
        .redraw(&mut drawer, 0)
        .map(|_| ())
        .and_then(|()| run(&mut driver, &mut drawer, &running));

    match result {
        Ok(()) => info!("interrupted"),
        Err(e) if e.is_pool_violation() => {
            error!("{e}");
            std::process::abort();
        }
        Err(e) => info!("{e}"),
    }

    info!(frames = driver.frames(), "simple-shm exiting");
    driver.shutdown();
    ExitCode::SUCCESS
}

fn open_window(config: &Config) -> Result<Drawer, Error> {
    let drawer = Drawer::new(&config.title, config.width, config.height, config.fps)?;
    if !drawer.supports_format(PixelFormat::Xrgb8888) {
        return Err(Error::UnsupportedFormat(PixelFormat::Xrgb8888));
    }
    Ok(drawer)
}

/// Dispatch until Ctrl+C (`Ok`) or until the window or the driver gives up (`Err`).
/// The flag is only looked at between turns; a turn in progress always finishes.
fn run<S: EventSource>(driver: &mut FrameDriver, source: &mut S, running: &AtomicBool) -> Result<(), Error> {
    while running.load(Ordering::SeqCst) {
        /* 1) Block for one turn of events.
           2) Hand released slots back to the pool, in the order they arrived.
           3) On a refresh, draw and submit the next frame. */
        for event in source.dispatch()? {
            match event {
                Event::Released(slot) => driver.release(slot),
                Event::Frame { time } => {
                    driver.redraw(source, time)?;
                }
            }
        }
    }
    Ok(())
}
