use pollock_common::Cell;

/// Channels in one cell.
pub const CHANNELS: usize = 3;

#[derive(Debug, Eq, PartialEq)]
pub struct PackedCell {
  pub cell: Cell,
  /// Channels left at NOP because the line had fewer than three operations.
  pub padded: usize,
  /// Encoded bytes past the third that did not fit.
  pub dropped: usize,
}

/// Packs the encoded bytes of one line into a cell, in channel order.
pub fn pack_cell(bytes: &[u8]) -> PackedCell {
  let mut cell = Cell::NOP;
  for (channel, byte) in cell.0.iter_mut().zip(bytes) {
    *channel = *byte;
  }

  PackedCell {
    cell,
    padded: CHANNELS.saturating_sub(bytes.len()),
    dropped: bytes.len().saturating_sub(CHANNELS),
  }
}
