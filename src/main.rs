// SPDX-License-Identifier: MPL-2.0
use std::path::PathBuf;
use std::process::ExitCode;
use thumbnail_resolver::application::{fetch, FetchRequest};
use thumbnail_resolver::config;
use thumbnail_resolver::infrastructure::build_resolver;

const HELP: &str = "\
thumbnail_resolver

USAGE:
  thumbnail_resolver <REFERENCE> --mime <TYPE> --out <FILE> [OPTIONS]

OPTIONS:
  --mime <TYPE>        MIME type of the item
  --out <FILE>         Where to write the encoded thumbnail
  --width <N>          Requested width (default size when omitted)
  --height <N>         Requested height (default size when omitted)
  --rotation <DEG>     Rotation in degrees
  --flipped            Mirror horizontally after rotation
  --modified <SECS>    Modification time, part of the cache key
  --config <PATH>      Settings file (default: user config directory)
  -h, --help           Print help
";

struct Args {
    reference: String,
    mime: String,
    out: PathBuf,
    width: Option<i64>,
    height: Option<i64>,
    rotation: i32,
    flipped: bool,
    modified: i64,
    config: Option<PathBuf>,
}

/// Parses the command line, `None` when help was requested.
fn parse_args() -> Result<Option<Args>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }

    let parsed = Args {
        mime: args.value_from_str("--mime")?,
        out: args.value_from_str("--out")?,
        width: args.opt_value_from_str("--width")?,
        height: args.opt_value_from_str("--height")?,
        rotation: args.opt_value_from_str("--rotation")?.unwrap_or(0),
        flipped: args.contains("--flipped"),
        modified: args.opt_value_from_str("--modified")?.unwrap_or(0),
        config: args.opt_value_from_str("--config")?,
        reference: args.free_from_str()?,
    };

    let remaining = args.finish();
    if !remaining.is_empty() {
        log::warn!("Ignoring unused arguments: {remaining:?}");
    }
    Ok(Some(parsed))
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = match parse_args() {
        Ok(Some(args)) => args,
        Ok(None) => {
            print!("{HELP}");
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("Error: {e}\n\n{HELP}");
            return ExitCode::from(2);
        }
    };

    let settings = match &args.config {
        Some(path) => config::load_from_path(path),
        None => config::load(),
    };
    let settings = match settings {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let resolver = match build_resolver(&settings) {
        Ok(resolver) => resolver,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let request = FetchRequest {
        source_reference: args.reference,
        mime_type: args.mime,
        modified_at_seconds: args.modified,
        rotation_degrees: args.rotation,
        is_flipped: args.flipped,
        requested_width: args.width,
        requested_height: args.height,
        default_size: settings.default_size(),
    };

    match fetch(&resolver, &request) {
        Ok(bytes) => {
            if let Err(e) = std::fs::write(&args.out, bytes) {
                eprintln!("Failed to write {}: {e}", args.out.display());
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
        Err(error) => {
            match serde_json::to_string(&error) {
                Ok(json) => eprintln!("{json}"),
                Err(_) => eprintln!("{error}"),
            }
            ExitCode::FAILURE
        }
    }
}
