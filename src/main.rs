//! Headless runner: loads a cartridge, runs it for a number of frames and prints the CPU state.
//!
//! Usage: rustic-nes <rom.nes> [--frames N] [--nestest]
//!
//! `--nestest` starts at $C000, the entry point of nestest's automation mode. Set
//! `RUSTIC_NES_LOG=trace` to get a nestest-style line per instruction on stderr.

use std::env;
use std::process;

use log::{info, Level, LevelFilter, Log, Metadata, Record};

use rustic_nes::{Cartridge, Nes};

const DEFAULT_FRAMES: u64 = 60;
const NESTEST_ENTRY: u16 = 0xC000;

/// Writes records to stderr. Filtering happens through `log::set_max_level`.
struct StderrLogger;

static LOGGER: StderrLogger = StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        // Trace lines are meant to diff against nestest.log, so they go out bare.
        if record.level() == Level::Trace {
            eprintln!("{}", record.args());
        } else {
            eprintln!("[{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

fn init_logging() {
    let level = env::var("RUSTIC_NES_LOG")
        .ok()
        .and_then(|value| value.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Warn);
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

struct Options {
    rom: String,
    frames: u64,
    nestest: bool,
}

fn parse_args() -> Result<Options, String> {
    let mut args = env::args().skip(1);
    let mut rom = None;
    let mut frames = DEFAULT_FRAMES;
    let mut nestest = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--frames" => {
                let value = args.next().ok_or("--frames needs a value")?;
                frames = value.parse().map_err(|_| format!("invalid frame count: {}", value))?;
            }
            "--nestest" => nestest = true,
            _ if arg.starts_with("--") => return Err(format!("unknown option: {}", arg)),
            _ => rom = Some(arg),
        }
    }

    Ok(Options {
        rom: rom.ok_or("usage: rustic-nes <rom.nes> [--frames N] [--nestest]")?,
        frames,
        nestest,
    })
}

fn run(options: &Options) -> Result<(), Box<dyn std::error::Error>> {
    let cartridge = Cartridge::load(&options.rom)?;
    let mut nes = Nes::new(cartridge);
    if options.nestest {
        nes.reset_to(NESTEST_ENTRY)?;
    } else {
        nes.reset()?;
    }

    for _ in 0..options.frames {
        nes.run_frame()?;
    }
    info!("ran {} frames in {} master clock ticks", options.frames, nes.ticks());

    println!("{:?}", nes.cpu);
    Ok(())
}

fn main() {
    init_logging();

    let options = match parse_args() {
        Ok(options) => options,
        Err(message) => {
            eprintln!("{}", message);
            process::exit(2);
        }
    };

    if let Err(err) = run(&options) {
        eprintln!("rustic-nes: {}", err);
        process::exit(1);
    }
}
