use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::{debug, info};
use pollock_common::{Cell, PollockProgram, WriteableResource};

use crate::assembler::Assembler;
use crate::config::AssemblerConfig;
use crate::error::AsmError;

/// What a successful run produced.
#[derive(Debug, Eq, PartialEq)]
pub enum Artifact {
  /// Dry run, nothing written.
  Nothing,
  Image(PathBuf),
  /// The cell list printed to the dump writer.
  Dump(String),
}

fn read_source(path: &Path) -> Result<String, AsmError> {
  if !path.is_file() {
    return Err(AsmError::SourceNotFound(path.to_path_buf()));
  }
  fs::read_to_string(path).map_err(|source| AsmError::SourceRead { path: path.to_path_buf(), source })
}

fn build_program(config: &AssemblerConfig, cells: Vec<Cell>) -> Result<PollockProgram, AsmError> {
  let program = PollockProgram::new(config.cell_size, cells)?;
  info!(
    "Assembled {} instructions into {} cells",
    program.instruction_count(), program.total_cells()
  );
  Ok(program)
}

/// Assembles `config.source` and emits the configured artifact.
///
/// Every fatal check runs before anything is written, so a failed run leaves
/// no output behind.
pub fn run(config: &AssemblerConfig, dump: &mut dyn Write) -> Result<Artifact, AsmError> {
  config.validate()?;
  let source = read_source(&config.source)?;

  info!("Assembling {}", config.source.display());
  let assembly = Assembler::assemble(&source)?;
  debug!("{} labels, {} diagnostics", assembly.labels.len(), assembly.diagnostics.len());

  let program = build_program(config, assembly.cells)?;

  if config.dry_run {
    info!("Dry run, no output generated");
    return Ok(Artifact::Nothing);
  }

  if config.raw_bytes_dump {
    let text = program.to_string();
    writeln!(dump, "{}", text)
      .map_err(|source| AsmError::Output { path: PathBuf::from("<stdout>"), source })?;
    return Ok(Artifact::Dump(text));
  }

  let path = config.output_path();
  let written = program.write_to_path(&path)
    .map_err(|source| AsmError::Output { path: path.clone(), source })?;

  info!("Wrote {} ({} bytes)", path.display(), written);
  Ok(Artifact::Image(path))
}
