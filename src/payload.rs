//! Payload propagation, kept out of the interval calculus proper.
//!
//! The address algebra treats signatures and ports as opaque data that
//! must be merged when two intervals collapse into one and propagated
//! (by copy) when an interval is split by [`crate::relation::cut`]. The
//! original C expresses this with a pair of free functions
//! (`SigGroupHeadCopySigs`, `DetectPortInsertCopy`) called directly from
//! the insertion/cut code; here it is a small trait so the geometric core
//! stays generic over whatever payload a caller attaches.

/// Anything that can be attached to an [`crate::interval::Interval`] and
/// merged when two intervals coincide or are produced by a cut.
pub trait Payload: Clone + Default {
    /// Folds `other` into `self`. Called when two intervals are found to
    /// be equal (in the insertion protocol) or when a cut propagates an
    /// interval's payload into more than one resulting piece.
    ///
    /// `Default` is the identity element: the negation compiler seeds a
    /// "whole address space" interval with no signature data of its own
    /// when negating a pure `!...` expression, matching the original C's
    /// `DetectAddressSetup(gh, "0.0.0.0/0")` call which attaches no
    /// signature group to the seeded interval.
    fn merge(&mut self, other: &Self);
}

/// The trivial payload: address-set compilation with no attached
/// signature/port data. Used by the crate's default `parse`/`lookup`
/// entry points.
impl Payload for () {
    #[inline]
    fn merge(&mut self, _other: &Self) {}
}

/// A small reference payload used by tests to exercise the
/// coverage-preservation property: each leaf atom in a test expression is
/// tagged with a unique id, and after compilation every address covered
/// by that atom must resolve to an interval whose payload contains it.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SignatureSet(pub std::collections::BTreeSet<u32>);

impl SignatureSet {
    pub fn single(id: u32) -> Self {
        Self(std::collections::BTreeSet::from([id]))
    }
}

impl Payload for SignatureSet {
    fn merge(&mut self, other: &Self) {
        self.0.extend(other.0.iter().copied());
    }
}
