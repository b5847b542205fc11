use anyhow::Context;
use clap::error::ErrorKind;
use clap::{ArgAction, Parser, ValueEnum};
use huffpack::config::CodecConfig;
use huffpack::{Codec, HeaderFormat};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const EXIT_UNKNOWN_ARGUMENT: u8 = 3;
const EXIT_MISSING_ARGUMENT: u8 = 99;

#[derive(Parser, Debug)]
#[command(name = "huffpack", version, disable_version_flag = true)]
#[command(about = "Huffman compressor and decompressor.", long_about = None)]
struct Cli {
    /// Input file
    #[arg(short = 'f', value_name = "PATH")]
    input: PathBuf,
    /// Output file
    #[arg(short = 'o', value_name = "PATH")]
    output: PathBuf,
    /// Decode a container instead of encoding
    #[arg(short = 'd', long = "decode")]
    decode: bool,
    /// JSON codec configuration
    #[arg(short = 'c', long = "config", value_name = "PATH")]
    config: Option<PathBuf>,
    /// Header table layout, overrides the config file
    #[arg(long, value_enum)]
    format: Option<FormatArg>,
    /// Print version
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    version: Option<bool>,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
enum FormatArg {
    #[clap(help = "symbol,bits pairs joined by a separator byte (Default).")]
    Delimited,
    #[clap(help = "Counted entries with explicit lengths, any symbol byte allowed.")]
    LengthPrefixed,
}

impl From<FormatArg> for HeaderFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Delimited => HeaderFormat::Delimited,
            FormatArg::LengthPrefixed => HeaderFormat::LengthPrefixed,
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = match e.kind() {
                ErrorKind::UnknownArgument => EXIT_UNKNOWN_ARGUMENT,
                ErrorKind::MissingRequiredArgument => EXIT_MISSING_ARGUMENT,
                // help and version print to stdout and exit 0
                _ => e.exit(),
            };
            // printing only fails if stderr is gone
            let _ = e.print();
            return ExitCode::from(code);
        }
    };

    init_logging();
    let span = tracing::info_span!("huffpack", decode = cli.decode);
    let _enter = span.enter();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let mut config = match &cli.config {
        Some(path) => CodecConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => CodecConfig::default(),
    };
    if let Some(format) = cli.format {
        config.header_format = format.into();
    }
    config.validate()?;
    let codec = Codec::new(config);

    let input = read_input(&cli.input)?;
    if cli.decode {
        let output = codec
            .decode(&input)
            .with_context(|| format!("decoding {}", cli.input.display()))?;
        write_output(&cli.output, &output)?;
        tracing::info!(
            container_size = input.len(),
            decoded_size = output.len(),
            "decoded {}",
            cli.output.display()
        );
    } else {
        let encoded = codec
            .encode_with_stats(&input)
            .with_context(|| format!("encoding {}", cli.input.display()))?;
        write_output(&cli.output, &encoded.data)?;
        let stats = &encoded.stats;
        tracing::info!(
            original_size = stats.original_size,
            compressed_size = stats.compressed_size,
            ratio = stats.ratio,
            entropy_bits = stats.entropy_bits,
            symbols = stats.distinct_symbols,
            "encoded {}",
            cli.output.display()
        );
    }
    Ok(())
}

fn read_input(path: &Path) -> anyhow::Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("reading {}", path.display()))
}

fn write_output(path: &Path, data: &[u8]) -> anyhow::Result<()> {
    std::fs::write(path, data).with_context(|| format!("writing {}", path.display()))
}
