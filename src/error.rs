//! Error taxonomy for the address-set algebra.
//!
//! Every fallible entry point returns `Result<_, Error>`. No partial
//! [`crate::sethead::AddressSet`] is ever handed back to a caller: a
//! `parse` failure drops both the positive and shadow builders before
//! the error propagates.

use thiserror::Error;

#[derive(Debug, Error, Eq, PartialEq, Clone)]
pub enum Error {
    /// Malformed expression at any nesting level: unbalanced brackets,
    /// stray punctuation, an empty atom, `!any`, or recursion past the
    /// parser's depth bound.
    #[error("syntax error near {0:?}")]
    Syntax(String),

    /// CIDR prefix out of range, a non-contiguous dotted-quad mask, or a
    /// malformed address body.
    #[error("invalid mask or address: {0}")]
    InvalidMask(String),

    /// `lo > hi` in a literal range.
    #[error("reversed range: {0}")]
    ReversedRange(String),

    /// `$name` with no entry in the variable table.
    #[error("unknown variable: ${0}")]
    UnknownVariable(String),

    /// The shadow (negated) head covers the entire address space for some
    /// family, so negating it leaves nothing standing.
    #[error("entire address space negated")]
    FullNegation,

    /// Every positive interval was removed while merging in the negated
    /// (shadow) coverage.
    #[error("no addresses left after applying negation")]
    EmptyAfterNegation,

    /// A comparison was attempted between intervals of different address
    /// families. Retained for parity with the original taxonomy; the
    /// generic `cmp`/`cut` API and the parser's per-family `ParsedAtom`
    /// routing make this a compile-time impossibility in this crate, so
    /// no code path constructs it today.
    #[error("comparison attempted across address families")]
    FamilyMismatch,

    /// Allocation failure.
    #[error("out of memory")]
    OutOfMemory,
}

pub type Result<T> = std::result::Result<T, Error>;
