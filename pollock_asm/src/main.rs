use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser as ClapParser;
use log::{LevelFilter, error};

mod ast;
mod assembler;
mod config;
mod driver;
mod error;
mod labels;
mod parser;

use config::{AssemblerConfig, parse_config_file};
use error::{AsmError, ConfigError};

#[derive(ClapParser)]
#[command(author, version, about = "Assembles Pollock source into a Pollock image", long_about = None)]
struct Cli {
  /// Input assembly file
  filename: PathBuf,

  /// No output generated
  #[arg(short, long)]
  dryrun: bool,

  /// No image output, just the text cell list
  #[arg(short = 'b', long)]
  bytearray: bool,

  /// Silent run, no warnings or errors
  #[arg(short, long)]
  silent: bool,

  /// Picture cell size in pixels, valid interval is [2,50] [default: 10]
  #[arg(short, long)]
  cellsize: Option<u32>,

  /// Name of the image file without extension, defaults to the source file name
  #[arg(short, long)]
  output: Option<String>,

  /// TOML file with default settings; command-line flags take precedence
  #[arg(long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Increase logging verbosity (-v, -vv, etc.)
  #[arg(short, long, action = clap::ArgAction::Count)]
  verbose: u8,
}

impl Cli {
  fn resolve_config(&self) -> Result<AssemblerConfig, ConfigError> {
    let mut config = match &self.config {
      Some(path) => AssemblerConfig::from_file(&self.filename, parse_config_file(path)?),
      None => AssemblerConfig::new(&self.filename),
    };

    config.dry_run |= self.dryrun;
    config.raw_bytes_dump |= self.bytearray;
    config.silent |= self.silent;
    if let Some(cell_size) = self.cellsize {
      config.cell_size = cell_size;
    }
    if let Some(output) = &self.output {
      config.output_name = Some(output.clone());
    }
    Ok(config)
  }
}

fn init_logging(silent: bool, verbose: u8) {
  if silent {
    env_logger::Builder::new().filter_level(LevelFilter::Off).init();
    return;
  }

  let log_level = match verbose {
    0 => "info",
    1 => "debug",
    _ => "trace",
  };
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

fn main() -> ExitCode {
  let cli = Cli::parse();

  let config = cli.resolve_config();
  let silent = config.as_ref().map_or(cli.silent, |c| c.silent);
  init_logging(silent, cli.verbose);

  let result = config
    .map_err(AsmError::from)
    .and_then(|config| driver::run(&config, &mut std::io::stdout()));

  match result {
    Ok(_) => ExitCode::SUCCESS,
    Err(e) => {
      error!("{}", e);
      ExitCode::FAILURE
    }
  }
}
