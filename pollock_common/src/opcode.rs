/// Instruction opcodes.
///
/// Every opcode byte has bit 7 set, which is what separates executed
/// instructions from pushed data (0..=127) in an instruction cell. The table
/// keeps gaps of four between opcodes for later extensions.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum OpCode {
  Add = 0x80,
  Sub = 0x84,
  Mul = 0x88,
  Div = 0x8C,
  Rem = 0x90,
  Pop = 0x94,
  Swap = 0x98,
  Dup = 0x9C,
  Rot = 0xA0,
  Not = 0xA4,
  Or = 0xA8,
  And = 0xAC,
  Gt = 0xB0,
  Eq = 0xB4,
  Lt = 0xB8,
  Nop = 0xBC,
  Halt = 0xC0,
  Jmpz = 0xC4,
  Jmpnz = 0xC8,
  Outc = 0xCC,
  Inc = 0xD0,
  Outi = 0xD4,
  Ini = 0xD8,
  Pusha = 0xDC,
  Waita = 0xE0,
  Neg = 0xE4,
  Shl = 0xE8,
  Shr = 0xEC,
}

/// Mask of the bit that marks a byte as an instruction.
pub const INSTRUCTION_BIT: u8 = 0b1000_0000;

impl OpCode {
  pub const ALL: [OpCode; 28] = [
    OpCode::Add, OpCode::Sub, OpCode::Mul, OpCode::Div,
    OpCode::Rem, OpCode::Pop, OpCode::Swap, OpCode::Dup,
    OpCode::Rot, OpCode::Not, OpCode::Or, OpCode::And,
    OpCode::Gt, OpCode::Eq, OpCode::Lt, OpCode::Nop,
    OpCode::Halt, OpCode::Jmpz, OpCode::Jmpnz, OpCode::Outc,
    OpCode::Inc, OpCode::Outi, OpCode::Ini, OpCode::Pusha,
    OpCode::Waita, OpCode::Neg, OpCode::Shl, OpCode::Shr,
  ];

  pub const fn byte(self) -> u8 {
    self as u8
  }

  pub fn mnemonic(self) -> &'static str {
    match self {
      OpCode::Add => "add",
      OpCode::Sub => "sub",
      OpCode::Mul => "mul",
      OpCode::Div => "div",
      OpCode::Rem => "rem",
      OpCode::Pop => "pop",
      OpCode::Swap => "swap",
      OpCode::Dup => "dup",
      OpCode::Rot => "rot",
      OpCode::Not => "not",
      OpCode::Or => "or",
      OpCode::And => "and",
      OpCode::Gt => "gt",
      OpCode::Eq => "eq",
      OpCode::Lt => "lt",
      OpCode::Nop => "nop",
      OpCode::Halt => "halt",
      OpCode::Jmpz => "jmpz",
      OpCode::Jmpnz => "jmpnz",
      OpCode::Outc => "outc",
      OpCode::Inc => "inc",
      OpCode::Outi => "outi",
      OpCode::Ini => "ini",
      OpCode::Pusha => "pusha",
      OpCode::Waita => "waita",
      OpCode::Neg => "neg",
      OpCode::Shl => "shl",
      OpCode::Shr => "shr",
    }
  }

  /// Looks up a bare operation. Mnemonics are case sensitive.
  pub fn from_mnemonic(s: &str) -> Option<OpCode> {
    let opcode = match s {
      "add" => OpCode::Add,
      "sub" => OpCode::Sub,
      "mul" => OpCode::Mul,
      "div" => OpCode::Div,
      "rem" => OpCode::Rem,
      "pop" => OpCode::Pop,
      "swap" => OpCode::Swap,
      "dup" => OpCode::Dup,
      "rot" => OpCode::Rot,
      "not" => OpCode::Not,
      "or" => OpCode::Or,
      "and" => OpCode::And,
      "gt" => OpCode::Gt,
      "eq" => OpCode::Eq,
      "lt" => OpCode::Lt,
      "nop" => OpCode::Nop,
      "halt" => OpCode::Halt,
      "jmpz" => OpCode::Jmpz,
      "jmpnz" => OpCode::Jmpnz,
      "outc" => OpCode::Outc,
      "inc" => OpCode::Inc,
      "outi" => OpCode::Outi,
      "ini" => OpCode::Ini,
      "pusha" => OpCode::Pusha,
      "waita" => OpCode::Waita,
      "neg" => OpCode::Neg,
      "shl" => OpCode::Shl,
      "shr" => OpCode::Shr,
      _ => return None,
    };
    Some(opcode)
  }

  pub fn from_byte(byte: u8) -> Option<OpCode> {
    OpCode::ALL.iter().copied().find(|op| op.byte() == byte)
  }
}
