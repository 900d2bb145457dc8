use crate::traits::AccessControl;
use crate::types::Address;
use std::collections::HashSet;

/// Fixed operator list loaded from configuration.
#[derive(Debug, Clone, Default)]
pub struct OperatorSet {
    operators: HashSet<Address>,
}

impl OperatorSet {
    pub fn new(operators: impl IntoIterator<Item = Address>) -> Self {
        Self {
            operators: operators.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.operators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }
}

impl AccessControl for OperatorSet {
    fn is_operator(&self, caller: Address) -> bool {
        self.operators.contains(&caller)
    }
}
