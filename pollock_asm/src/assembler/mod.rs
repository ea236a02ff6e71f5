use log::{debug, trace, warn};
use pollock_common::opcode::INSTRUCTION_BIT;
use pollock_common::{Cell, OpCode};

use crate::ast::{CodeLine, Operation, Push, PushArg};
use crate::error::{AsmError, Diagnostic, LabelError, SyntaxError};
use crate::labels::LabelTable;
use crate::parser::parse_program;

pub mod pack;

/// Largest value a push can carry; bit 7 is reserved for opcodes.
pub const MAX_PUSH_VALUE: u32 = INSTRUCTION_BIT as u32 - 1;

/// Bits per label slice.
const SLICE_BITS: u32 = 7;

/// Compilation context of a single run.
///
/// Lines are assembled strictly in source order: a label is bound to the row
/// of the line that declares it before that line's operations are encoded,
/// and a push can only see labels bound so far.
pub struct Assembler {
  /// Map for storing label names to row indices.
  labels: LabelTable,
  /// Instruction cells, one per code line. The length is the current row.
  cells: Vec<Cell>,
  /// Recoverable problems found so far.
  diagnostics: Vec<Diagnostic>,
}

/// Result of assembling a whole source file.
#[derive(Debug)]
pub struct Assembly {
  pub cells: Vec<Cell>,
  pub labels: LabelTable,
  pub diagnostics: Vec<Diagnostic>,
}

impl Assembler {
  pub fn new() -> Self {
    Assembler {
      labels: LabelTable::new(),
      cells: Vec::new(),
      diagnostics: Vec::new(),
    }
  }

  pub fn assemble(source: &str) -> Result<Assembly, AsmError> {
    let program = parse_program(source)?;
    let mut assembler = Assembler::new();
    for line in &program {
      assembler.assemble_line(line)?;
    }
    Ok(assembler.finish())
  }

  /// Row index the next code line will take.
  pub fn row(&self) -> usize {
    self.cells.len()
  }

  pub fn assemble_line(&mut self, line: &CodeLine) -> Result<(), AsmError> {
    trace!("Handling line {}: {:?}", line.number, line);

    let row = self.row();
    if let Some(label) = &line.label {
      self.labels.bind(label, row);
    }

    let mut bytes = Vec::with_capacity(line.operations.len());
    for operation in &line.operations {
      bytes.push(self.encode_operation(line.number, operation)?);
    }

    let packed = pack::pack_cell(&bytes);
    if packed.padded > 0 {
      self.report(line.number, SyntaxError::LineTooShort);
    }
    if packed.dropped > 0 {
      self.report(line.number, SyntaxError::TooManyOperations(packed.dropped));
    }

    debug!("Row {} (line {}): {}", row, line.number, packed.cell);
    self.cells.push(packed.cell);
    Ok(())
  }

  pub fn finish(self) -> Assembly {
    Assembly {
      cells: self.cells,
      labels: self.labels,
      diagnostics: self.diagnostics,
    }
  }

  fn encode_operation(&mut self, line: usize, operation: &Operation) -> Result<u8, AsmError> {
    match operation {
      Operation::Push(push) => self.encode_push(line, push),
      Operation::Bare(token) => Ok(self.encode_bare(line, token)),
    }
  }

  fn encode_bare(&mut self, line: usize, token: &str) -> u8 {
    match OpCode::from_mnemonic(token) {
      Some(opcode) => opcode.byte(),
      None if token.is_empty() => {
        self.report(line, SyntaxError::EmptyOperation);
        OpCode::Nop.byte()
      }
      None => {
        self.report(line, SyntaxError::UnknownOperation(token.to_string()));
        OpCode::Nop.byte()
      }
    }
  }

  fn encode_push(&mut self, line: usize, push: &Push) -> Result<u8, AsmError> {
    match &push.arg {
      // a slice suffix on a literal is accepted and ignored
      PushArg::Literal(value) => {
        if *value > MAX_PUSH_VALUE {
          self.report(line, SyntaxError::PushOutOfRange(*value));
          return Ok(0);
        }
        Ok(*value as u8)
      }
      PushArg::Label(name) => {
        let row = self.labels.resolve(name).ok_or_else(|| LabelError::Undefined {
          name: name.clone(),
          line,
        })?;

        match &push.slice {
          None => {
            if row > MAX_PUSH_VALUE as usize {
              return Err(LabelError::OutOfRange { name: name.clone(), row, line }.into());
            }
            Ok(row as u8)
          }
          Some(slice) => {
            let index = parse_slice(slice).ok_or_else(|| LabelError::InvalidSlice {
              name: name.clone(),
              slice: slice.clone(),
              line,
            })?;
            Ok(label_slice(row, index))
          }
        }
      }
      PushArg::Empty => {
        self.report(line, SyntaxError::InvalidPushArgument(push.text.clone()));
        Ok(0)
      }
    }
  }

  fn report(&mut self, line: usize, error: SyntaxError) {
    let diagnostic = Diagnostic { line, error };
    warn!("{}", diagnostic);
    self.diagnostics.push(diagnostic);
  }
}

/// Slice suffixes 1 to 4, least significant chunk first.
fn parse_slice(slice: &str) -> Option<u32> {
  slice.parse::<u32>().ok().filter(|index| (1..=4).contains(index))
}

/// 7-bit chunk `index` (1-based) of a row index.
pub fn label_slice(row: usize, index: u32) -> u8 {
  ((row >> (SLICE_BITS * (index - 1))) & MAX_PUSH_VALUE as usize) as u8
}
