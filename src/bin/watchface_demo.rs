//! Watchface demo
//! ========================================
//! cargo run --features demo --bin watchface_demo -- [UNIX_SECONDS] [--round] [--charge N] [--frames N]
//! ========================================
//!
//! Renders the watchface into an in-memory frame buffer, one redraw per
//! simulated second, and prints the last frame as ASCII shades.
//! RUST_LOG=debug shows per-hand raster stats.

use std::process::ExitCode;

use log::{error, info};
use watchface_raster::{
    clock::unix_to_datetime,
    surface::{DisplayShape, Framebuffer},
    trig::SineTable,
    watchface::{Watchface, WatchfaceConfig, RECT_HEIGHT, RECT_WIDTH, ROUND_DIAMETER},
    Argb2222, RenderError,
};

// 2023-11-14 22:13:20 UTC
const DEFAULT_TIME: u32 = 1_700_000_000;
const SHADES: &[u8] = b" .:-=+*#%@";

struct Args {
    time: u32,
    round: bool,
    charge: i32,
    frames: u32,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args { time: DEFAULT_TIME, round: false, charge: 80, frames: 1 };
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--round" => args.round = true,
            "--charge" => {
                let v = it.next().ok_or("--charge needs a value")?;
                args.charge = v.parse().map_err(|e| format!("bad --charge {v}: {e}"))?;
            }
            "--frames" => {
                let v = it.next().ok_or("--frames needs a value")?;
                args.frames = v.parse().map_err(|e| format!("bad --frames {v}: {e}"))?;
            }
            other => {
                args.time = other.parse().map_err(|e| format!("bad timestamp {other}: {e}"))?;
            }
        }
    }
    Ok(args)
}

fn shade(c: Argb2222) -> char {
    let level = (c.r() + c.g() + c.b()) as usize;
    SHADES[level.min(SHADES.len() - 1)] as char
}

fn run(args: &Args) -> Result<(), RenderError> {
    let (config, shape) = if args.round {
        (WatchfaceConfig::round(ROUND_DIAMETER), DisplayShape::Round)
    } else {
        (WatchfaceConfig::rect(RECT_WIDTH, RECT_HEIGHT), DisplayShape::Rect)
    };
    let (w, h) = (config.size.width, config.size.height);

    let mut bytes = vec![0u8; (w * h) as usize];
    let mut fb = Framebuffer::new(&mut bytes, w, h, shape)?;
    let trig = SineTable::new();
    let mut face = Watchface::new(config);
    face.set_charge(args.charge);

    // One redraw per tick, like the firmware's second timer
    for frame in 0..args.frames.max(1) {
        let now = unix_to_datetime(args.time.saturating_add(frame));
        let stats = face.redraw(&mut fb, &trig, &now)?;
        info!("frame {frame}: painted {} hand pixels ({} blended)", stats.painted(), stats.blended);
    }

    for y in 0..h as i32 {
        let line: String = (0..w as i32)
            .map(|x| fb.pixel(x, y).map_or(' ', shade))
            .collect();
        println!("{}", line.trim_end());
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let args = match parse_args() {
        Ok(a) => a,
        Err(msg) => {
            error!("{msg}");
            eprintln!("usage: watchface_demo [UNIX_SECONDS] [--round] [--charge N] [--frames N]");
            return ExitCode::FAILURE;
        }
    };

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("render failed: {e}");
            ExitCode::FAILURE
        }
    }
}
