#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::Outcome;

/// Control flow over an ordered list of children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CompositeKind {
    /// Runs children in order until one fails.
    Sequence,
    /// Runs children in order until one succeeds.
    Selector,
}

impl CompositeKind {
    /// Reaction to a child ending: `Some` ends the composite with that
    /// outcome, `None` moves on to the next child.
    pub fn on_child_ended(self, outcome: Outcome) -> Option<Outcome> {
        match (self, outcome) {
            (CompositeKind::Sequence, Outcome::Failure) => Some(Outcome::Failure),
            (CompositeKind::Selector, Outcome::Success) => Some(Outcome::Success),
            _ => None,
        }
    }

    /// Outcome once every child has run (or there were none).
    pub fn exhausted(self) -> Outcome {
        match self {
            CompositeKind::Sequence => Outcome::Success,
            CompositeKind::Selector => Outcome::Failure,
        }
    }
}

/// Single-child wrappers rewriting their child's outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DecoratorKind {
    Inverter,
    Succeeder,
    Failer,
}

impl DecoratorKind {
    pub fn apply(self, outcome: Outcome) -> Outcome {
        match self {
            DecoratorKind::Inverter => outcome.invert(),
            DecoratorKind::Succeeder => Outcome::Success,
            DecoratorKind::Failer => Outcome::Failure,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_and_selector_are_duals() {
        use Outcome::*;
        assert_eq!(CompositeKind::Sequence.on_child_ended(Success), None);
        assert_eq!(CompositeKind::Sequence.on_child_ended(Failure), Some(Failure));
        assert_eq!(CompositeKind::Selector.on_child_ended(Failure), None);
        assert_eq!(CompositeKind::Selector.on_child_ended(Success), Some(Success));
        assert_eq!(CompositeKind::Sequence.exhausted(), Success);
        assert_eq!(CompositeKind::Selector.exhausted(), Failure);
    }
}
