use std::fmt;
use std::io;
use std::path::PathBuf;

use pollock_common::FormatError;
use pollock_common::program::{MAX_CELL_SIZE, MIN_CELL_SIZE};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error(
    "Invalid cellsize {0}. Cell size must be between {min} and {max} pixels.",
    min = MIN_CELL_SIZE,
    max = MAX_CELL_SIZE
  )]
  InvalidCellSize(u32),

  #[error("Failed to read config file {}: {source}", .path.display())]
  Read { path: PathBuf, source: io::Error },

  #[error("Failed to parse config file {}: {source}", .path.display())]
  Parse { path: PathBuf, source: toml::de::Error },
}

/// Fatal label problems. Assembly stops at the first one.
#[derive(Debug, Error)]
pub enum LabelError {
  #[error("Invalid label '{name}' in {line}.")]
  Undefined { name: String, line: usize },

  #[error("Invalid label slice '{name}_{slice}' in {line}.")]
  InvalidSlice { name: String, slice: String, line: usize },

  #[error("Label '{name}' in {line} is at row {row}, too far for a plain push; use a slice.")]
  OutOfRange { name: String, row: usize, line: usize },
}

/// Recoverable problems. A safe value is substituted and assembly goes on.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum SyntaxError {
  #[error("Push argument {0} is out of range, using 0.")]
  PushOutOfRange(u32),

  #[error("Invalid push argument in '{0}', using 0.")]
  InvalidPushArgument(String),

  #[error("Empty operation, turning it to nop.")]
  EmptyOperation,

  #[error("Invalid op: {0}, turning it to nop.")]
  UnknownOperation(String),

  #[error("Line length is too short, filling it up with nops.")]
  LineTooShort,

  #[error("Too many operations, dropping {0} after the third.")]
  TooManyOperations(usize),
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Diagnostic {
  pub line: usize,
  pub error: SyntaxError,
}

impl fmt::Display for Diagnostic {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Syntax error in {}. {}", self.line, self.error)
  }
}

#[derive(Debug, Error)]
pub enum AsmError {
  #[error(transparent)]
  Config(#[from] ConfigError),

  #[error("Invalid file {} to compile.", .0.display())]
  SourceNotFound(PathBuf),

  #[error("Failed to read {}: {source}", .path.display())]
  SourceRead { path: PathBuf, source: io::Error },

  #[error("Parse error in {line}: {message}")]
  Parse { line: usize, message: String },

  #[error(transparent)]
  Label(#[from] LabelError),

  #[error(transparent)]
  Format(#[from] FormatError),

  #[error("Failed to write {}: {source}", .path.display())]
  Output { path: PathBuf, source: io::Error },
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_invalid_cell_size_message() {
    assert_eq!(
      ConfigError::InvalidCellSize(51).to_string(),
      "Invalid cellsize 51. Cell size must be between 2 and 50 pixels."
    );
  }

  #[test]
  fn test_format_errors_pass_through() {
    let error = AsmError::from(FormatError::ProgramTooLarge { total_cells: 1 << 24 });
    assert!(matches!(error, AsmError::Format(FormatError::ProgramTooLarge { .. })));
    assert_eq!(error.to_string(), "program of 16777216 cells is too long to encode");
  }
}
