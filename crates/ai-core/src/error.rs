use thiserror::Error;

use crate::Scope;

/// Failure to resolve a blackboard symbol.
///
/// Both variants are configuration errors: the blackboard never invents a
/// default value for a symbol that is absent or holds another type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlackboardError {
    #[error("blackboard symbol `{symbol}` is not set in the {scope} scope")]
    Missing { symbol: String, scope: Scope },

    #[error(
        "blackboard symbol `{symbol}` in the {scope} scope holds `{stored}`, requested `{expected}`"
    )]
    TypeMismatch {
        symbol: String,
        scope: Scope,
        stored: &'static str,
        expected: &'static str,
    },
}
