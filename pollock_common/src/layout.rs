/// Grid geometry of a program image, in cells.
///
/// The width is `floor(sqrt(total))`; the height is whatever is needed to fit
/// the remaining cells, so the grid is square when `total` is a perfect
/// square and one or more rows taller otherwise. Cells fill the grid row-major.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridLayout {
  pub width: usize,
  pub height: usize,
}

impl GridLayout {
  pub fn for_cells(total_cells: usize) -> Self {
    if total_cells == 0 {
      return GridLayout { width: 0, height: 0 };
    }

    let width = total_cells.isqrt();
    let height = if width * width == total_cells {
      width
    } else {
      total_cells.div_ceil(width)
    };

    GridLayout { width, height }
  }

  /// Grid position `(column, row)` of the cell at `index`.
  pub fn position(&self, index: usize) -> (usize, usize) {
    (index % self.width, index / self.width)
  }

  /// Pixel dimensions for blocks of `cell_size` pixels.
  pub fn pixel_size(&self, cell_size: u32) -> (u32, u32) {
    (self.width as u32 * cell_size, self.height as u32 * cell_size)
  }
}
