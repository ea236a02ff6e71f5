use thiserror::Error;

use crate::program::{MAX_CELL_SIZE, MIN_CELL_SIZE};

#[derive(Debug, Error)]
pub enum FormatError {
  /// The instruction count no longer fits the 3-byte count cell.
  #[error("program of {total_cells} cells is too long to encode")]
  ProgramTooLarge { total_cells: usize },

  #[error("invalid cell size {0}, must be between {min} and {max} pixels", min = MIN_CELL_SIZE, max = MAX_CELL_SIZE)]
  InvalidCellSize(u32),

  #[error("unsupported Pollock format version {major}.{minor}")]
  UnsupportedVersion { major: u8, minor: u8 },

  #[error("malformed Pollock image: {0}")]
  MalformedImage(String),

  #[error("image codec error: {0}")]
  Image(#[from] image::ImageError),
}
