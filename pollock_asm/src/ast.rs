/// The argument of a push, classified from the characters after `push`.
#[derive(Debug, Eq, PartialEq)]
pub enum PushArg {
  /// All decimal digits.
  Literal(u32),
  /// Uppercase letters and digits, not all digits.
  Label(String),
  /// Nothing after `push`.
  Empty,
}

#[derive(Debug, Eq, PartialEq)]
pub struct Push {
  /// The token as written, for diagnostics.
  pub text: String,
  pub arg: PushArg,
  /// Digits after the `_` suffix, unchecked.
  pub slice: Option<String>,
}

#[derive(Debug, Eq, PartialEq)]
pub enum Operation {
  Push(Push),
  /// Anything that is not a push; looked up in the opcode table.
  Bare(String),
}

/// A source line that emits one instruction cell.
#[derive(Debug, Eq, PartialEq)]
pub struct CodeLine {
  /// 1-based line number in the source file.
  pub number: usize,
  pub label: Option<String>,
  pub operations: Vec<Operation>,
}
