use std::io::{Read, Write};
use std::path::Path;

/// Something that serializes to a Pollock artifact.
pub trait WriteableResource {
  fn write_to(&self, writer: &mut dyn Write) -> std::io::Result<()>;

  fn to_bytes(&self) -> std::io::Result<Vec<u8>> {
    let mut buffer = Vec::new();
    self.write_to(&mut buffer)?;
    Ok(buffer)
  }

  /// Encodes in memory first; the file is only created once encoding succeeded.
  fn write_to_path<P: AsRef<Path>>(&self, path: P) -> std::io::Result<usize> {
    let bytes = self.to_bytes()?;
    std::fs::write(path, &bytes)?;
    Ok(bytes.len())
  }
}

pub trait ReadableResource {
  fn read_from(reader: &mut dyn Read) -> std::io::Result<Self>
  where
    Self: Sized;

  fn read_from_path<P: AsRef<Path>>(path: P) -> std::io::Result<Self>
  where
    Self: Sized,
  {
    let mut file = std::fs::File::open(path)?;
    Self::read_from(&mut file)
  }
}
