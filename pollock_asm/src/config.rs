use std::fs;
use std::path::{Path, PathBuf};

use pollock_common::program::{DEFAULT_CELL_SIZE, MAX_CELL_SIZE, MIN_CELL_SIZE};
use serde::Deserialize;

use crate::error::ConfigError;

const IMAGE_EXTENSION: &str = "png";

/// Optional TOML settings file. Every key may be omitted.
#[derive(Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
  pub cell_size: Option<u32>,
  pub dry_run: bool,
  pub raw_bytes: bool,
  pub silent: bool,
  pub output: Option<String>,
}

pub fn parse_config_file<P: AsRef<Path>>(path: P) -> Result<ConfigFile, ConfigError> {
  let path = path.as_ref();
  let content = fs::read_to_string(path)
    .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
  toml::from_str(&content)
    .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
}

/// Settings of one assembler run.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct AssemblerConfig {
  pub source: PathBuf,
  /// Assemble and validate only, write nothing.
  pub dry_run: bool,
  /// Print the cell list instead of writing an image.
  pub raw_bytes_dump: bool,
  pub silent: bool,
  /// Pixels per cell side.
  pub cell_size: u32,
  /// Output file name without extension. Defaults to the source stem.
  pub output_name: Option<String>,
}

impl AssemblerConfig {
  pub fn new<P: Into<PathBuf>>(source: P) -> Self {
    AssemblerConfig {
      source: source.into(),
      dry_run: false,
      raw_bytes_dump: false,
      silent: false,
      cell_size: DEFAULT_CELL_SIZE,
      output_name: None,
    }
  }

  pub fn from_file<P: Into<PathBuf>>(source: P, file: ConfigFile) -> Self {
    AssemblerConfig {
      source: source.into(),
      dry_run: file.dry_run,
      raw_bytes_dump: file.raw_bytes,
      silent: file.silent,
      cell_size: file.cell_size.unwrap_or(DEFAULT_CELL_SIZE),
      output_name: file.output,
    }
  }

  pub fn validate(&self) -> Result<(), ConfigError> {
    if !(MIN_CELL_SIZE..=MAX_CELL_SIZE).contains(&self.cell_size) {
      return Err(ConfigError::InvalidCellSize(self.cell_size));
    }
    Ok(())
  }

  /// `<output>.png`, or `<source stem>.png` in the working directory.
  pub fn output_path(&self) -> PathBuf {
    let base = match &self.output_name {
      Some(name) => name.clone(),
      None => self.source
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default(),
    };
    PathBuf::from(format!("{}.{}", base, IMAGE_EXTENSION))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_defaults() {
    let config = AssemblerConfig::new("prog.pol");
    assert_eq!(config.cell_size, 10);
    assert!(!config.dry_run && !config.raw_bytes_dump && !config.silent);
    assert!(config.validate().is_ok());
  }

  #[test]
  fn test_cell_size_bounds() {
    let mut config = AssemblerConfig::new("prog.pol");
    for size in [2, 25, 50] {
      config.cell_size = size;
      assert!(config.validate().is_ok());
    }
    for size in [0, 1, 51, 1000] {
      config.cell_size = size;
      assert!(matches!(config.validate(), Err(ConfigError::InvalidCellSize(s)) if s == size));
    }
  }

  #[test]
  fn test_output_path_defaults_to_source_stem() {
    let config = AssemblerConfig::new("some/dir/hello.pol");
    assert_eq!(config.output_path(), PathBuf::from("hello.png"));
  }

  #[test]
  fn test_output_path_uses_output_name() {
    let mut config = AssemblerConfig::new("hello.pol");
    config.output_name = Some("out/picture".to_string());
    assert_eq!(config.output_path(), PathBuf::from("out/picture.png"));
  }

  #[test]
  fn test_parse_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pollock.toml");
    fs::write(&path, "cell_size = 20\nsilent = true\noutput = \"art\"\n").unwrap();

    let file = parse_config_file(&path).unwrap();
    assert_eq!(file, ConfigFile {
      cell_size: Some(20),
      dry_run: false,
      raw_bytes: false,
      silent: true,
      output: Some("art".to_string()),
    });

    let config = AssemblerConfig::from_file("prog.pol", file);
    assert_eq!(config.cell_size, 20);
    assert!(config.silent);
    assert_eq!(config.output_path(), PathBuf::from("art.png"));
  }

  #[test]
  fn test_config_file_errors() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
      parse_config_file(dir.path().join("missing.toml")),
      Err(ConfigError::Read { .. })
    ));

    let path = dir.path().join("bad.toml");
    fs::write(&path, "cellsize = 20\n").unwrap();
    assert!(matches!(parse_config_file(&path), Err(ConfigError::Parse { .. })));
  }
}
