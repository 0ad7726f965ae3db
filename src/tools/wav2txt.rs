// Converts a 16-bit stereo WAV file into comma-separated sample text

use std::{path::PathBuf, process::ExitCode};

use anyhow::Result;
use clap::{builder::TypedValueParser, Parser, ValueEnum};
use tracing_subscriber::EnvFilter;
use wav2txt::{
    convert::{self, ConvertError, ConvertOptions},
    encoder::DECIMATION,
    Channel,
};

/// Convert a 16-bit stereo WAV file into comma-separated sample text
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// The WAV file to convert
    wav: PathBuf,

    /// Output path [default: input path with its last three characters replaced by "txt"]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Keep one frame out of this many
    #[arg(long, default_value_t = DECIMATION, value_parser = clap::value_parser!(u64).range(1..).map(|v| v as usize))]
    step: usize,

    /// Channel to encode
    #[arg(long, value_enum, default_value_t = ChannelArg::Left)]
    channel: ChannelArg,

    /// Log more detail to stderr (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(ValueEnum, Debug, Copy, Clone)]
enum ChannelArg {
    Left,
    Right,
}

impl From<ChannelArg> for Channel {
    fn from(arg: ChannelArg) -> Self {
        match arg {
            ChannelArg::Left => Channel::Left,
            ChannelArg::Right => Channel::Right,
        }
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        wav,
        output,
        step,
        channel,
        ..
    } = cli;
    let options = ConvertOptions {
        step,
        channel: channel.into(),
        output,
    };

    let done = convert::convert_with(&wav, &options, |info| {
        let frames = info.frames() as usize;
        println!(
            "Processing {} total frames, skipping {} frames for every one processed for an end result of {} data points",
            frames,
            step - 1,
            frames / step
        );
    })
    .map_err(|err| match err {
        ConvertError::Decoder(_) => {
            anyhow::Error::new(err).context(format!("failed to convert {}", wav.display()))
        }
        other => other.into(),
    })?;

    tracing::info!(
        output = %done.output.display(),
        points = done.points,
        "wrote sample text"
    );
    Ok(())
}
