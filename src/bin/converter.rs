//! converter CLI
//!
//! Convert a single file to a JSON text archive, or restore one.

use std::path::PathBuf;

use anyhow::Result;
use clap::error::ErrorKind;
use clap::{ArgAction, Parser};
use converter_kit::{run, Config, ConvertError};
use tracing_subscriber::{fmt, EnvFilter};

const EXAMPLES: &str = "\
Examples:
  converter photo.jpg --out archive.txt    # file -> TXT
  converter archive.txt --out photo.jpg    # TXT -> file
  converter photo.jpg                      # writes photo.txt
  converter archive.txt                    # restores the original file name";

#[derive(Parser, Debug)]
#[command(name = "converter")]
#[command(version)]
#[command(about = "Convert a file to a TXT archive and back")]
#[command(after_help = EXAMPLES)]
#[command(disable_version_flag = true)]
struct Cli {
    /// File to convert; `.txt` inputs are restored, anything else is archived
    input: Option<PathBuf>,

    /// Output path (default: next to the input)
    #[arg(short = 'o', long = "out", value_name = "PATH")]
    out: Option<PathBuf>,

    /// Fail when an archive's declared size does not match its payload
    #[arg(long)]
    strict: bool,

    /// Fixed UTC offset in hours for archive timestamps
    #[arg(
        long,
        env = "CONVERTER_UTC_OFFSET",
        default_value_t = 8,
        allow_negative_numbers = true,
        value_parser = clap::value_parser!(i32).range(-23..=23)
    )]
    utc_offset: i32,

    /// More log output on stderr (repeatable)
    #[arg(long, action = ArgAction::Count)]
    verbose: u8,

    /// Print version
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    version: Option<bool>,
}

fn main() {
    let cli = Cli::try_parse().unwrap_or_else(|e| exit_on_parse_error(e));
    init_logging(cli.verbose);

    if let Err(e) = convert(cli) {
        tracing::debug!("conversion failed: {e:?}");
        eprintln!("❌ Error: {e:#}");
        std::process::exit(1);
    }
}

/// Help and version exit 0; every usage error exits 1 like any other failure.
fn exit_on_parse_error(e: clap::Error) -> ! {
    let _ = e.print();
    match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => std::process::exit(0),
        _ => std::process::exit(1),
    }
}

fn convert(cli: Cli) -> Result<()> {
    let input = cli.input.ok_or(ConvertError::MissingArgument)?;
    let config = Config::new(input)
        .with_output(cli.out)
        .with_utc_offset(cli.utc_offset)
        .with_strict_size(cli.strict);
    tracing::debug!(?config, "starting conversion");

    let report = run(&config)?;
    println!("{report}");
    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}
