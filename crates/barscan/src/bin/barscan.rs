use std::path::{Path, PathBuf};
use std::process::ExitCode;

use barscan::{
    discover_default_image, program_title, CancelSignal, ConfigError, CtrlCSignal, FrameSink,
    FrameSource, HeadlessSink, ImageDriver, ImageFileSource, ImageSequenceSource, LiveDriver,
    NeverCancel, Pipeline, RxingDecoder, ScanConfig, ScanError, StdoutNotifier,
};
use clap::{Parser, ValueEnum};
use log::{debug, warn, LevelFilter};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Scan a single still image.
    Img,
    /// Scan a camera feed (or a replayed frame directory) until cancelled.
    Live,
}

#[derive(Parser, Debug)]
#[command(
    name = "barscan",
    version,
    about = "Locate and decode barcodes and QR codes in an image or a live feed"
)]
struct Cli {
    /// Operating mode.
    #[arg(short, long, value_enum)]
    mode: Mode,

    /// Image to scan in `img` mode. Without a value, the first image in the
    /// working directory is used.
    #[arg(short = 'p', long, value_name = "PATH", num_args = 0..=1)]
    imgpath: Option<Option<PathBuf>>,

    /// JSON run configuration.
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Replay the images of a directory instead of opening a camera (live mode).
    #[arg(long, value_name = "DIR")]
    frames: Option<PathBuf>,

    /// Camera index, overriding the config file.
    #[arg(long, value_name = "INDEX")]
    camera: Option<u32>,

    /// Never open a window.
    #[arg(long)]
    headless: bool,

    /// Log filter: off, error, warn, info, debug or trace.
    #[arg(long, value_name = "LEVEL", default_value = "info", value_parser = parse_level)]
    log_level: LevelFilter,
}

fn parse_level(raw: &str) -> Result<LevelFilter, String> {
    raw.parse()
        .map_err(|_| format!("unknown log level `{raw}`"))
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_level);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(feature = "tracing")]
fn init_logging(level: LevelFilter) {
    barscan::core::init_tracing(&level.to_string().to_lowercase(), false);
}

#[cfg(not(feature = "tracing"))]
fn init_logging(level: LevelFilter) {
    if let Err(err) = barscan::core::init_with_level(level) {
        eprintln!("warning: logger already installed: {err}");
    }
}

fn run(cli: Cli) -> Result<(), ScanError> {
    let mut config = match &cli.config {
        Some(path) => ScanConfig::load_json(path)?,
        None => ScanConfig::default(),
    };
    if let Some(index) = cli.camera {
        config.camera_index = index;
    }
    config.headless |= cli.headless;
    debug!("config: {config:?}");

    let title = config.window_title.clone().unwrap_or_else(program_title);
    let pipeline = Pipeline::new(RxingDecoder::default());

    match cli.mode {
        Mode::Img => {
            if cli.frames.is_some() {
                return Err(ConfigError::FramesOutsideLive.into());
            }
            let path = resolve_image(cli.imgpath)?;
            let mut sink = open_sink(&title, config.headless);

            println!("[{title}] running on loaded image...");
            ImageDriver::new(pipeline).run(ImageFileSource::new(path), &mut *sink, StdoutNotifier)?;
        }
        Mode::Live => {
            let source = open_live_source(cli.frames.as_deref(), &config)?;
            let cancel = install_interrupt();
            let mut sink = open_sink(&title, config.headless);

            println!("[{title}] running on live capture...");
            LiveDriver::new(pipeline).run(source, &mut *sink, &*cancel, StdoutNotifier)?;
        }
    }
    Ok(())
}

fn resolve_image(arg: Option<Option<PathBuf>>) -> Result<PathBuf, ConfigError> {
    if let Some(Some(path)) = arg {
        return Ok(path);
    }
    let cwd = std::env::current_dir()?;
    let found = discover_default_image(&cwd).ok_or(ConfigError::NoImage)?;
    debug!("using discovered image {}", found.display());
    Ok(found)
}

fn install_interrupt() -> Box<dyn CancelSignal> {
    match CtrlCSignal::install() {
        Ok(signal) => Box::new(signal),
        Err(err) => {
            warn!("failed to install Ctrl+C handler: {err}");
            Box::new(NeverCancel)
        }
    }
}

fn open_live_source(
    frames: Option<&Path>,
    config: &ScanConfig,
) -> Result<Box<dyn FrameSource>, ScanError> {
    match frames {
        Some(dir) => Ok(Box::new(ImageSequenceSource::open(dir)?)),
        None => open_camera(config),
    }
}

#[cfg(feature = "camera")]
fn open_camera(config: &ScanConfig) -> Result<Box<dyn FrameSource>, ScanError> {
    let camera = barscan::CameraSource::open(config.camera_index, config.resolution)?;
    Ok(Box::new(camera))
}

#[cfg(not(feature = "camera"))]
fn open_camera(config: &ScanConfig) -> Result<Box<dyn FrameSource>, ScanError> {
    Err(ScanError::SourceUnavailable {
        source_name: format!("camera {}", config.camera_index),
        reason: "built without the `camera` feature; use --frames".to_owned(),
    })
}

#[cfg(feature = "window")]
fn open_sink(title: &str, headless: bool) -> Box<dyn FrameSink> {
    if headless {
        Box::new(HeadlessSink::new())
    } else {
        Box::new(barscan::WindowSink::new(title))
    }
}

#[cfg(not(feature = "window"))]
fn open_sink(_title: &str, headless: bool) -> Box<dyn FrameSink> {
    if !headless {
        debug!("built without the `window` feature; running headless");
    }
    Box::new(HeadlessSink::new())
}
