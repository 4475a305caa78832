//! saucepad - play the touch surface from a terminal
//!
//! Run with: cargo run -- [--config pad.toml] [--log saucepad.log] [--verbose]
//!
//! The mouse stands in for fingers: the left button is one contact, the
//! right button another.

mod app;
mod ui;

use std::{fs::File, path::PathBuf};

use color_eyre::eyre::{bail, Result as EyreResult, WrapErr};
use log::LevelFilter;
use simplelog::{Config, WriteLogger};

use app::SaucePad;
use sauce_pad::SurfaceConfig;

struct Args {
    config: Option<PathBuf>,
    log: PathBuf,
    verbose: bool,
}

fn parse_args() -> EyreResult<Args> {
    let mut args = Args {
        config: None,
        log: PathBuf::from("saucepad.log"),
        verbose: false,
    };

    let mut raw = std::env::args().skip(1);
    while let Some(arg) = raw.next() {
        match arg.as_str() {
            "--config" | "-c" => match raw.next() {
                Some(path) => args.config = Some(path.into()),
                None => bail!("--config needs a path"),
            },
            "--log" => match raw.next() {
                Some(path) => args.log = path.into(),
                None => bail!("--log needs a path"),
            },
            "--verbose" | "-v" => args.verbose = true,
            other => bail!("unknown argument: {other}"),
        }
    }
    Ok(args)
}

/// The terminal belongs to the UI, so logs go to a file.
fn init_logging(args: &Args) -> EyreResult<()> {
    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let file = File::create(&args.log)
        .wrap_err_with(|| format!("failed to create log file {}", args.log.display()))?;
    WriteLogger::init(level, Config::default(), file).wrap_err("failed to install logger")?;
    Ok(())
}

fn main() -> EyreResult<()> {
    color_eyre::install()?;

    let args = parse_args()?;
    init_logging(&args)?;

    let config = match &args.config {
        Some(path) => SurfaceConfig::load(path)
            .wrap_err_with(|| format!("failed to load {}", path.display()))?,
        None => SurfaceConfig::default(),
    };
    log::info!("starting saucepad with {:?}", config);

    SaucePad::new(config).run()
}
