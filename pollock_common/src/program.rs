use std::fmt;

use log::debug;

use crate::cell::Cell;
use crate::error::FormatError;

pub const VERSION_MAJOR: u8 = 1;
pub const VERSION_MINOR: u8 = 0;

pub const MIN_CELL_SIZE: u32 = 2;
pub const MAX_CELL_SIZE: u32 = 50;
pub const DEFAULT_CELL_SIZE: u32 = 10;

/// Number of header cells in front of the instructions.
pub const HEADER_CELLS: usize = 2;

/// Upper bound (exclusive) on the total cell count, header included.
pub const MAX_CELLS: usize = (1 << 24) - 2;

pub fn check_cell_size(cell_size: u32) -> Result<u8, FormatError> {
  if (MIN_CELL_SIZE..=MAX_CELL_SIZE).contains(&cell_size) {
    Ok(cell_size as u8)
  } else {
    Err(FormatError::InvalidCellSize(cell_size))
  }
}

pub fn check_capacity(total_cells: usize) -> Result<(), FormatError> {
  if total_cells >= MAX_CELLS {
    return Err(FormatError::ProgramTooLarge { total_cells });
  }
  Ok(())
}

/// A complete Pollock program: the two header cells and the instruction cells.
///
/// Cell 0 carries `(major, minor, cell_size)`, cell 1 the instruction count as
/// a 3-byte big-endian number.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct PollockProgram {
  cells: Vec<Cell>,
}

impl PollockProgram {
  pub fn new(cell_size: u32, instructions: Vec<Cell>) -> Result<Self, FormatError> {
    let cell_size = check_cell_size(cell_size)?;
    let total_cells = instructions.len() + HEADER_CELLS;
    check_capacity(total_cells)?;

    let mut cells = Vec::with_capacity(total_cells);
    cells.push(Cell::new(VERSION_MAJOR, VERSION_MINOR, cell_size));
    cells.push(Cell::from_count(instructions.len() as u32));
    cells.extend(instructions);

    debug!("Built program of {} cells with cell size {}", cells.len(), cell_size);
    Ok(PollockProgram { cells })
  }

  pub fn cells(&self) -> &[Cell] {
    &self.cells
  }

  pub fn total_cells(&self) -> usize {
    self.cells.len()
  }

  pub fn instruction_count(&self) -> u32 {
    self.cells[1].count()
  }

  pub fn cell_size(&self) -> u32 {
    u32::from(self.cells[0].0[2])
  }
}

/// Renders the cell list the way the raw bytes dump prints it.
impl fmt::Display for PollockProgram {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "[")?;
    for (index, cell) in self.cells.iter().enumerate() {
      if index > 0 {
        write!(f, ", ")?;
      }
      write!(f, "{}", cell)?;
    }
    write!(f, "]")
  }
}
