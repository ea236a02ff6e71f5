use std::io::{Read, Write};

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, ImageError, ImageFormat, Rgb, RgbImage};
use log::{debug, info};

use crate::cell::Cell;
use crate::error::FormatError;
use crate::layout::GridLayout;
use crate::program::{HEADER_CELLS, PollockProgram, VERSION_MAJOR};
use crate::resource::{ReadableResource, WriteableResource};

/// Paints every cell of `program` as a solid block onto a NOP-gray canvas.
pub fn rasterize(program: &PollockProgram) -> RgbImage {
  let cell_size = program.cell_size();
  let layout = GridLayout::for_cells(program.total_cells());
  let (width, height) = layout.pixel_size(cell_size);

  debug!(
    "Rasterizing {} cells on a {}x{} grid ({}x{} pixels)",
    program.total_cells(), layout.width, layout.height, width, height
  );

  let mut canvas = RgbImage::from_pixel(width, height, Rgb(Cell::NOP.channels()));
  for (index, cell) in program.cells().iter().enumerate() {
    let (column, row) = layout.position(index);
    let x0 = column as u32 * cell_size;
    let y0 = row as u32 * cell_size;
    for y in y0..y0 + cell_size {
      for x in x0..x0 + cell_size {
        canvas.put_pixel(x, y, Rgb(cell.channels()));
      }
    }
  }

  canvas
}

/// Reads a rasterized program back into cells.
///
/// The header cell at the top-left corner gives the cell size; every other
/// cell is sampled at its top-left pixel.
pub fn decode(canvas: &RgbImage) -> Result<PollockProgram, FormatError> {
  if canvas.width() == 0 || canvas.height() == 0 {
    return Err(FormatError::MalformedImage("empty image".to_string()));
  }

  let [major, minor, cell_size] = canvas.get_pixel(0, 0).0;
  if major != VERSION_MAJOR {
    return Err(FormatError::UnsupportedVersion { major, minor });
  }

  let cell_size = u32::from(cell_size);
  if cell_size == 0 || canvas.width() % cell_size != 0 || canvas.height() % cell_size != 0 {
    return Err(FormatError::MalformedImage(format!(
      "{}x{} pixels is not a grid of {} pixel cells",
      canvas.width(), canvas.height(), cell_size
    )));
  }

  let grid_width = (canvas.width() / cell_size) as usize;
  let grid_height = (canvas.height() / cell_size) as usize;
  let sample = |index: usize| {
    let x = (index % grid_width) as u32 * cell_size;
    let y = (index / grid_width) as u32 * cell_size;
    Cell(canvas.get_pixel(x, y).0)
  };

  if grid_width * grid_height < HEADER_CELLS {
    return Err(FormatError::MalformedImage("missing instruction count cell".to_string()));
  }

  let instruction_count = sample(1).count() as usize;
  let total_cells = instruction_count + HEADER_CELLS;
  if GridLayout::for_cells(total_cells) != (GridLayout { width: grid_width, height: grid_height }) {
    return Err(FormatError::MalformedImage(format!(
      "{} cells do not match a {}x{} grid", total_cells, grid_width, grid_height
    )));
  }

  let instructions = (HEADER_CELLS..total_cells).map(sample).collect();
  PollockProgram::new(cell_size, instructions)
}

/// Rasterizes `program` and PNG-encodes the canvas into `writer`.
pub fn encode_png(program: &PollockProgram, writer: &mut dyn Write) -> Result<(), FormatError> {
  let canvas = rasterize(program);

  info!("Encoding {}x{} PNG...", canvas.width(), canvas.height());
  PngEncoder::new(writer)
    .write_image(canvas.as_raw(), canvas.width(), canvas.height(), ExtendedColorType::Rgb8)?;
  Ok(())
}

pub fn decode_png(bytes: &[u8]) -> Result<PollockProgram, FormatError> {
  let canvas = image::load_from_memory_with_format(bytes, ImageFormat::Png)?.to_rgb8();
  decode(&canvas)
}

fn to_io_error(error: FormatError) -> std::io::Error {
  match error {
    FormatError::Image(ImageError::IoError(source)) => source,
    other => std::io::Error::new(std::io::ErrorKind::InvalidData, other),
  }
}

impl WriteableResource for PollockProgram {
  fn write_to(&self, writer: &mut dyn Write) -> std::io::Result<()> {
    encode_png(self, writer).map_err(to_io_error)
  }
}

impl ReadableResource for PollockProgram {
  fn read_from(reader: &mut dyn Read) -> std::io::Result<Self>
  where
    Self: Sized
  {
    let mut buffer = Vec::new();
    reader.read_to_end(&mut buffer)?;
    decode_png(&buffer).map_err(to_io_error)
  }
}
