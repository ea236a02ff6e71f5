use std::fmt;

use crate::opcode::OpCode;

/// One pixel block of a Pollock image: three channel bytes.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Cell(pub [u8; 3]);

impl Cell {
  /// Cell with every channel set to the NOP opcode. Also the image background.
  pub const NOP: Cell = Cell([OpCode::Nop.byte(); 3]);

  pub const fn new(r: u8, g: u8, b: u8) -> Self {
    Cell([r, g, b])
  }

  pub fn channels(&self) -> [u8; 3] {
    self.0
  }

  /// Encodes a 24-bit count as three base-256 digits, most significant first.
  pub fn from_count(count: u32) -> Self {
    Cell([
      ((count >> 16) & 0xFF) as u8,
      ((count >> 8) & 0xFF) as u8,
      (count & 0xFF) as u8,
    ])
  }

  pub fn count(&self) -> u32 {
    let [hi, mid, lo] = self.0;
    (u32::from(hi) << 16) | (u32::from(mid) << 8) | u32::from(lo)
  }
}

impl Default for Cell {
  fn default() -> Self {
    Cell::NOP
  }
}

impl fmt::Display for Cell {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let [r, g, b] = self.0;
    write!(f, "[{}, {}, {}]", r, g, b)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_default_is_nop_gray() {
    assert_eq!(Cell::default(), Cell::new(188, 188, 188));
  }

  #[test]
  fn test_count_digits_are_big_endian() {
    let cell = Cell::from_count(0x01_02_03);
    assert_eq!(cell.channels(), [1, 2, 3]);
    assert_eq!(cell.count(), 0x01_02_03);

    assert_eq!(Cell::from_count(300).channels(), [0, 1, 44]);
  }

  #[test]
  fn test_display() {
    assert_eq!(Cell::new(5, 128, 188).to_string(), "[5, 128, 188]");
  }
}
