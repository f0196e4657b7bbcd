//! nodefield viewer.
//!
//! ```text
//! nodefield [--config <file.json>] [--reduced-motion] [--touch] [--seed <n>]
//! nodefield --snapshot <out.png> [--frames <n>] [--size <W>x<H>] [--dpr <r>]
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use nodefield::prelude::*;

const USAGE: &str = "usage: nodefield [--config <file.json>] [--reduced-motion] [--touch] [--seed <n>]
       nodefield --snapshot <out.png> [--frames <n>] [--size <W>x<H>] [--dpr <r>]";

#[derive(Debug)]
struct Args {
    config: Option<PathBuf>,
    reduced_motion: bool,
    touch: bool,
    seed: Option<u64>,
    snapshot: Option<PathBuf>,
    frames: u32,
    size: (f32, f32),
    dpr: f32,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            config: None,
            reduced_motion: false,
            touch: false,
            seed: None,
            snapshot: None,
            frames: 120,
            size: (1280.0, 720.0),
            dpr: 1.0,
        }
    }
}

fn parse_size(s: &str) -> Option<(f32, f32)> {
    let (w, h) = s.split_once('x')?;
    Some((w.parse().ok()?, h.parse().ok()?))
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args, String> {
    let mut parsed = Args::default();
    while let Some(arg) = args.next() {
        let mut value = |name: &str| args.next().ok_or_else(|| format!("{} needs a value", name));
        match arg.as_str() {
            "--config" => parsed.config = Some(PathBuf::from(value("--config")?)),
            "--reduced-motion" => parsed.reduced_motion = true,
            "--touch" => parsed.touch = true,
            "--seed" => {
                let v = value("--seed")?;
                parsed.seed = Some(v.parse().map_err(|_| format!("invalid seed: {}", v))?);
            }
            "--snapshot" => parsed.snapshot = Some(PathBuf::from(value("--snapshot")?)),
            "--frames" => {
                let v = value("--frames")?;
                parsed.frames = v.parse().map_err(|_| format!("invalid frame count: {}", v))?;
            }
            "--size" => {
                let v = value("--size")?;
                parsed.size = parse_size(&v).ok_or_else(|| format!("invalid size: {}", v))?;
            }
            "--dpr" => {
                let v = value("--dpr")?;
                parsed.dpr = v.parse().map_err(|_| format!("invalid pixel ratio: {}", v))?;
            }
            "-h" | "--help" => return Err(String::new()),
            other => return Err(format!("unknown argument: {}", other)),
        }
    }
    Ok(parsed)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(msg) => {
            if !msg.is_empty() {
                eprintln!("{}", msg);
            }
            eprintln!("{}", USAGE);
            return ExitCode::from(2);
        }
    };

    let config = match &args.config {
        Some(path) => match FieldConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("{}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        None => FieldConfig::default(),
    };

    let input_mode = if args.touch { InputMode::Touch } else { InputMode::Pointer };

    let result = match &args.snapshot {
        Some(path) => {
            let environment = Environment::new(Viewport::new(args.size.0, args.size.1))
                .with_device_pixel_ratio(args.dpr)
                .with_reduced_motion(args.reduced_motion)
                .with_input_mode(input_mode);
            snapshot(config, environment, args.frames, args.seed.unwrap_or(0), path)
        }
        None => run(
            config,
            RunOptions {
                reduced_motion: args.reduced_motion,
                input_mode,
                seed: args.seed,
            },
        ),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
