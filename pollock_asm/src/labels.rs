use std::collections::HashMap;
use log::debug;

/// Label name to row index bindings, filled in source order.
#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct LabelTable {
  bindings: HashMap<String, usize>,
}

impl LabelTable {
  pub fn new() -> Self {
    LabelTable { bindings: HashMap::new() }
  }

  /// Binds `name` to `row`, replacing any earlier binding.
  pub fn bind(&mut self, name: &str, row: usize) {
    if let Some(previous) = self.bindings.insert(name.to_string(), row) {
      debug!("Label {} rebound from row {} to row {}", name, previous, row);
    } else {
      debug!("Label {} bound to row {}", name, row);
    }
  }

  pub fn resolve(&self, name: &str) -> Option<usize> {
    self.bindings.get(name).copied()
  }

  pub fn len(&self) -> usize {
    self.bindings.len()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_bind_and_resolve() {
    let mut labels = LabelTable::new();
    assert_eq!(labels.len(), 0);
    labels.bind("LOOP", 3);
    assert_eq!(labels.resolve("LOOP"), Some(3));
    assert_eq!(labels.resolve("END"), None);
    assert_eq!(labels.len(), 1);
  }

  #[test]
  fn test_rebinding_overwrites() {
    let mut labels = LabelTable::new();
    labels.bind("L", 1);
    labels.bind("L", 7);
    assert_eq!(labels.resolve("L"), Some(7));
    assert_eq!(labels.len(), 1);
  }
}
