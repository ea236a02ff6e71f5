use pest::Parser;
use pest::iterators::Pair;
use pest_derive::Parser;

use crate::ast::{CodeLine, Operation, Push, PushArg};
use crate::error::AsmError;

#[derive(Parser)]
#[grammar = "grammar/pollock_asm.pest"]
pub struct PollockAsmParser;

const COMMENT_CHAR: char = '#';
const TERMINATOR: char = ';';

/// Blank lines and comment lines emit nothing and do not take a row.
pub fn is_code_line(raw: &str) -> bool {
  let text = raw.trim_start();
  !text.is_empty() && !text.starts_with(COMMENT_CHAR)
}

/// Removes every whitespace character, then a trailing comment, then a single
/// trailing statement terminator.
pub fn normalize(raw: &str) -> String {
  let mut text: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
  if let Some(start) = text.find(COMMENT_CHAR) {
    text.truncate(start);
  }
  if text.ends_with(TERMINATOR) {
    text.pop();
  }
  text
}

/// Parses one raw source line. Returns `None` for blank and comment lines.
pub fn parse_line(number: usize, raw: &str) -> Result<Option<CodeLine>, AsmError> {
  if !is_code_line(raw) {
    return Ok(None);
  }

  let text = normalize(raw);
  let pairs = PollockAsmParser::parse(Rule::line, &text)
    .map_err(|e| AsmError::Parse { line: number, message: e.to_string() })?;

  let mut label = None;
  let mut operations = Vec::new();

  for pair in pairs.flat_map(|line| line.into_inner()) {
    match pair.as_rule() {
      Rule::label => {
        if !pair.as_str().is_empty() {
          label = Some(pair.as_str().to_string());
        }
      }
      Rule::operations => {
        operations = pair.into_inner().map(parse_operation).collect();
      }
      _ => {}
    }
  }

  Ok(Some(CodeLine { number, label, operations }))
}

/// Parses every code line of `source`, in order.
pub fn parse_program(source: &str) -> Result<Vec<CodeLine>, AsmError> {
  let mut lines = Vec::new();
  for (index, raw) in source.lines().enumerate() {
    if let Some(line) = parse_line(index + 1, raw)? {
      lines.push(line);
    }
  }
  Ok(lines)
}

fn parse_operation(pair: Pair<Rule>) -> Operation {
  match pair.as_rule() {
    Rule::push_op => parse_push(pair),
    _ => Operation::Bare(pair.as_str().to_string()),
  }
}

/// A push suffix is a single digit 1 to 4.
fn is_slice_suffix(slice: &str) -> bool {
  matches!(slice, "1" | "2" | "3" | "4")
}

fn parse_push(pair: Pair<Rule>) -> Operation {
  let text = pair.as_str().to_string();
  let mut name = "";
  let mut slice = None;

  for part in pair.into_inner() {
    match part.as_rule() {
      Rule::push_name => name = part.as_str(),
      Rule::slice => slice = Some(part.as_str().to_string()),
      _ => {}
    }
  }

  let arg = if name.is_empty() {
    PushArg::Empty
  } else if name.bytes().all(|b| b.is_ascii_digit()) {
    // at most seven digits, always fits
    name.parse().map_or(PushArg::Empty, PushArg::Literal)
  } else {
    PushArg::Label(name.to_string())
  };

  // Only a label name can carry a bad slice; anything else is not a push.
  let is_push = matches!(arg, PushArg::Label(_)) || slice.as_deref().is_none_or(is_slice_suffix);
  if is_push {
    Operation::Push(Push { text, arg, slice })
  } else {
    Operation::Bare(text)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn code(raw: &str) -> CodeLine {
    parse_line(1, raw).unwrap().expect("expected a code line")
  }

  fn bare(s: &str) -> Operation {
    Operation::Bare(s.to_string())
  }

  #[test]
  fn blank_and_comment_lines_are_skipped() {
    assert_eq!(parse_line(1, "").unwrap(), None);
    assert_eq!(parse_line(1, "   \t ").unwrap(), None);
    assert_eq!(parse_line(1, "# a comment").unwrap(), None);
    assert_eq!(parse_line(1, "    #indented; push1").unwrap(), None);
  }

  #[test]
  fn normalize_strips_whitespace_comment_and_terminator() {
    assert_eq!(normalize("  push 5 ; add  "), "push5;add");
    assert_eq!(normalize("push5;add; # trailing"), "push5;add");
    assert_eq!(normalize("push5;add#c;d"), "push5;add");
    assert_eq!(normalize("push5;;"), "push5;");
    assert_eq!(normalize("L: dup\r\n"), "L:dup");
  }

  #[test]
  fn parse_simple_line() {
    let line = code("dup; add; halt");
    assert_eq!(line.label, None);
    assert_eq!(line.operations, vec![bare("dup"), bare("add"), bare("halt")]);
  }

  #[test]
  fn parse_label_prefixed_line() {
    let line = code("LOOP: dup;jmpz;nop");
    assert_eq!(line.label, Some("LOOP".to_string()));
    assert_eq!(line.operations.len(), 3);
  }

  #[test]
  fn parse_splits_at_first_colon() {
    let line = code("A:b:c");
    assert_eq!(line.label, Some("A".to_string()));
    assert_eq!(line.operations, vec![bare("b:c")]);
  }

  #[test]
  fn parse_empty_label_binds_nothing() {
    let line = code(":add");
    assert_eq!(line.label, None);
    assert_eq!(line.operations, vec![bare("add")]);
  }

  #[test]
  fn parse_label_only_line_has_one_empty_operation() {
    let line = code("END:");
    assert_eq!(line.label, Some("END".to_string()));
    assert_eq!(line.operations, vec![bare("")]);
  }

  #[test]
  fn parse_empty_operations_are_kept() {
    let line = code("add;;sub");
    assert_eq!(line.operations, vec![bare("add"), bare(""), bare("sub")]);
  }

  #[test]
  fn parse_push_literal() {
    let line = code("push42");
    assert_eq!(line.operations, vec![Operation::Push(Push {
      text: "push42".to_string(),
      arg: PushArg::Literal(42),
      slice: None,
    })]);
  }

  #[test]
  fn parse_push_label_with_slice() {
    let line = code("pushLOOP_2");
    assert_eq!(line.operations, vec![Operation::Push(Push {
      text: "pushLOOP_2".to_string(),
      arg: PushArg::Label("LOOP".to_string()),
      slice: Some("2".to_string()),
    })]);
  }

  #[test]
  fn parse_push_out_of_range_slice_is_still_a_push() {
    match &code("pushL_9").operations[0] {
      Operation::Push(push) => assert_eq!(push.slice.as_deref(), Some("9")),
      other => panic!("Expected push, got {:?}", other),
    }
  }

  #[test]
  fn parse_bad_suffix_without_label_is_bare() {
    assert_eq!(code("push5_9").operations, vec![bare("push5_9")]);
    assert_eq!(code("push_9").operations, vec![bare("push_9")]);
    assert_eq!(code("push5_12").operations, vec![bare("push5_12")]);
    match &code("push5_4").operations[0] {
      Operation::Push(push) => assert_eq!(push.arg, PushArg::Literal(5)),
      other => panic!("Expected push, got {:?}", other),
    }
  }

  #[test]
  fn parse_push_without_argument() {
    match &code("push").operations[0] {
      Operation::Push(push) => assert_eq!(push.arg, PushArg::Empty),
      other => panic!("Expected push, got {:?}", other),
    }
  }

  #[test]
  fn parse_push_lookalikes_are_bare() {
    // names must be at most seven uppercase letters or digits
    assert_eq!(code("pusha").operations, vec![bare("pusha")]);
    assert_eq!(code("pushABCDEFGH").operations, vec![bare("pushABCDEFGH")]);
    assert_eq!(code("pushloop").operations, vec![bare("pushloop")]);
  }

  #[test]
  fn parse_digit_leading_name_is_label() {
    match &code("push5A").operations[0] {
      Operation::Push(push) => assert_eq!(push.arg, PushArg::Label("5A".to_string())),
      other => panic!("Expected push, got {:?}", other),
    }
  }

  #[test]
  fn parse_program_numbers_raw_lines() {
    let lines = parse_program("# header\n\npush1;push2;add\n  \nhalt\n").unwrap();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].number, 3);
    assert_eq!(lines[1].number, 5);
  }
}
