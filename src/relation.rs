//! The seven-valued relational calculus between two intervals of the same
//! family, and the `cut`/`cut_not` operators built on top of it.
//!
//! Modeling the relation as a tagged enum (rather than an integer return
//! code, as the original C does with `ADDRESS_EQ`/`ADDRESS_LT`/...) makes
//! `cut` a total function over a `match`, with the compiler checking every
//! case is handled.

use crate::error::{Error, Result};
use crate::interval::{Flags, Interval};
use crate::numeric::Numeric;
use crate::payload::Payload;

/// The relation of `a` to `b`. Non-symmetric in the overlap/enclosure
/// cases: `cmp(a, b)` and `cmp(b, a)` differ for `Es`/`Eb` and `Le`/`Ge`.
///
/// There is no `Er` (family-mismatch) variant here: `cmp` is generic over
/// a single [`Numeric`] domain, so two intervals that could be compared at
/// all are necessarily the same family. [`Error::FamilyMismatch`] is kept
/// in the crate's error taxonomy for parity with the source's seven-value
/// calculus, but no call site in this crate can construct it — the parser
/// routes each parsed atom to the matching family's list before it ever
/// reaches `cmp`.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Relation {
    /// `a.lo == b.lo && a.hi == b.hi`
    Eq,
    /// `a.hi < b.lo`
    Lt,
    /// `a.lo > b.hi`
    Gt,
    /// `a` inside (or edge-sharing with) `b`, `b` strictly bigger.
    Es,
    /// `b` inside (or edge-sharing with) `a`, `a` strictly bigger.
    Eb,
    /// `a` overlaps `b` on the left: `a.lo < b.lo <= a.hi < b.hi`.
    Le,
    /// `a` overlaps `b` on the right: `b.lo < a.lo <= b.hi < a.hi`.
    Ge,
}

/// Compares two intervals of the same family. Exactly one of the seven
/// [`Relation`] values always applies.
pub fn cmp<N: Numeric, P: Payload>(a: &Interval<N, P>, b: &Interval<N, P>) -> Relation {
    if a.lo == b.lo && a.hi == b.hi {
        Relation::Eq
    } else if a.hi < b.lo {
        Relation::Lt
    } else if a.lo > b.hi {
        Relation::Gt
    } else if a.lo >= b.lo && a.hi <= b.hi {
        Relation::Es
    } else if b.lo >= a.lo && b.hi <= a.hi {
        Relation::Eb
    } else if a.lo < b.lo && b.lo <= a.hi && a.hi < b.hi {
        Relation::Le
    } else if b.lo < a.lo && a.lo <= b.hi && b.hi < a.hi {
        Relation::Ge
    } else {
        unreachable!("Eq/Lt/Gt/Es/Eb/Le/Ge exhaust every pair of closed intervals")
    }
}

/// Up to three disjoint pieces produced by splitting two overlapping
/// intervals. Their union always equals `a ∪ b`; a piece that would be
/// empty (the overlap is flush with one edge) is simply absent rather
/// than represented as a zero-width interval.
pub struct CutPieces<N: Numeric, P: Payload> {
    pub left: Option<Interval<N, P>>,
    pub middle: Interval<N, P>,
    pub right: Option<Interval<N, P>>,
}

impl<N: Numeric, P: Payload> CutPieces<N, P> {
    /// The pieces in ascending order, for re-insertion.
    pub fn into_vec(self) -> Vec<Interval<N, P>> {
        let mut v = Vec::with_capacity(3);
        if let Some(l) = self.left {
            v.push(l);
        }
        v.push(self.middle);
        if let Some(r) = self.right {
            v.push(r);
        }
        v
    }
}

/// Splits two overlapping intervals `a`, `b` (related by `Es`, `Eb`,
/// `Le`, or `Ge` — `Eq`/`Lt`/`Gt` are not valid here, the caller handles
/// those directly) into disjoint pieces whose union is `a ∪ b`.
///
/// The middle piece always carries the merge of both payloads; outer
/// pieces carry only the payload of whichever interval covers them, and
/// are tagged [`Flags::SIGGROUP_COPY`] to record that their payload is a
/// clone propagated by the cut rather than the interval that was
/// originally inserted.
pub fn cut<N: Numeric, P: Payload>(
    a: &Interval<N, P>,
    b: &Interval<N, P>,
    relation: Relation,
) -> CutPieces<N, P> {
    let copy_flags = |f: Flags| f | Flags::SIGGROUP_COPY;
    match relation {
        Relation::Es => {
            // a inside b: b.lo..pred(a.lo) (b-only), a.lo..a.hi (union), succ(a.hi)..b.hi (b-only)
            let left = (a.lo > b.lo).then(|| {
                Interval::new(b.lo, a.lo.pred(), copy_flags(b.flags), b.payload.clone())
            });
            let mut middle_payload = a.payload.clone();
            middle_payload.merge(&b.payload);
            let middle = Interval::new(a.lo, a.hi, a.flags | b.flags, middle_payload);
            let right = (a.hi < b.hi).then(|| {
                Interval::new(a.hi.succ(), b.hi, copy_flags(b.flags), b.payload.clone())
            });
            CutPieces { left, middle, right }
        }
        Relation::Eb => {
            // b inside a: a.lo..pred(b.lo) (a-only), b.lo..b.hi (union), succ(b.hi)..a.hi (a-only)
            let left = (b.lo > a.lo).then(|| {
                Interval::new(a.lo, b.lo.pred(), copy_flags(a.flags), a.payload.clone())
            });
            let mut middle_payload = b.payload.clone();
            middle_payload.merge(&a.payload);
            let middle = Interval::new(b.lo, b.hi, a.flags | b.flags, middle_payload);
            let right = (b.hi < a.hi).then(|| {
                Interval::new(b.hi.succ(), a.hi, copy_flags(a.flags), a.payload.clone())
            });
            CutPieces { left, middle, right }
        }
        Relation::Le => {
            // a.lo < b.lo <= a.hi < b.hi
            let left = Some(Interval::new(a.lo, b.lo.pred(), copy_flags(a.flags), a.payload.clone()));
            let mut middle_payload = a.payload.clone();
            middle_payload.merge(&b.payload);
            let middle = Interval::new(b.lo, a.hi, a.flags | b.flags, middle_payload);
            let right = Some(Interval::new(a.hi.succ(), b.hi, copy_flags(b.flags), b.payload.clone()));
            CutPieces { left, middle, right }
        }
        Relation::Ge => {
            // b.lo < a.lo <= b.hi < a.hi
            let left = Some(Interval::new(b.lo, a.lo.pred(), copy_flags(b.flags), b.payload.clone()));
            let mut middle_payload = a.payload.clone();
            middle_payload.merge(&b.payload);
            let middle = Interval::new(a.lo, b.hi, a.flags | b.flags, middle_payload);
            let right = Some(Interval::new(b.hi.succ(), a.hi, copy_flags(a.flags), a.payload.clone()));
            CutPieces { left, middle, right }
        }
        Relation::Eq | Relation::Lt | Relation::Gt => {
            panic!("cut() called with a non-overlapping relation {relation:?}; the caller must handle Eq/Lt/Gt directly")
        }
    }
}

/// The complement of `a` within its family's full address space, as up
/// to two intervals. `payload` is attached to both (cloned if both are
/// produced).
///
/// Returns [`Error::FullNegation`] if `a` already spans the entire space
/// (`lo == 0 && hi == MAX`), since there is nothing left to negate into.
pub fn cut_not<N: Numeric, P: Payload>(
    a: &Interval<N, P>,
    payload: P,
) -> Result<ComplementPieces<N, P>> {
    if a.lo == N::ZERO && a.hi == N::MAX {
        return Err(Error::FullNegation);
    }
    let left = (a.lo != N::ZERO).then(|| Interval::new(N::ZERO, a.lo.pred(), Flags::empty(), payload.clone()));
    let right = (a.hi != N::MAX).then(|| Interval::new(a.hi.succ(), N::MAX, Flags::empty(), payload));
    Ok(ComplementPieces { left, right })
}

pub struct ComplementPieces<N: Numeric, P: Payload> {
    pub left: Option<Interval<N, P>>,
    pub right: Option<Interval<N, P>>,
}

impl<N: Numeric, P: Payload> ComplementPieces<N, P> {
    pub fn into_vec(self) -> Vec<Interval<N, P>> {
        let mut v = Vec::with_capacity(2);
        if let Some(l) = self.left {
            v.push(l);
        }
        if let Some(r) = self.right {
            v.push(r);
        }
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iv(lo: u32, hi: u32) -> Interval<u32, ()> {
        Interval::new(lo, hi, Flags::empty(), ())
    }

    #[test]
    fn relation_lt_gt_eq() {
        assert_eq!(cmp(&iv(1, 2), &iv(3, 4)), Relation::Lt);
        assert_eq!(cmp(&iv(3, 4), &iv(1, 2)), Relation::Gt);
        assert_eq!(cmp(&iv(1, 4), &iv(1, 4)), Relation::Eq);
    }

    #[test]
    fn relation_es_eb() {
        assert_eq!(cmp(&iv(2, 3), &iv(1, 4)), Relation::Es);
        assert_eq!(cmp(&iv(1, 4), &iv(2, 3)), Relation::Eb);
    }

    #[test]
    fn relation_le_ge() {
        assert_eq!(cmp(&iv(1, 5), &iv(3, 8)), Relation::Le);
        assert_eq!(cmp(&iv(3, 8), &iv(1, 5)), Relation::Ge);
    }

    #[test]
    fn cut_es_middle_collapses_left() {
        // a inside b, sharing b's left edge
        let a = iv(1, 3);
        let b = iv(1, 10);
        let pieces = cut(&a, &b, cmp(&a, &b));
        assert!(pieces.left.is_none());
        assert_eq!((pieces.middle.lo(), pieces.middle.hi()), (1, 3));
        let right = pieces.right.unwrap();
        assert_eq!((right.lo(), right.hi()), (4, 10));
    }

    #[test]
    fn cut_le_three_pieces_cover_union() {
        let a = iv(1, 5);
        let b = iv(3, 8);
        let pieces = cut(&a, &b, cmp(&a, &b));
        let v = pieces.into_vec();
        assert_eq!(v.len(), 3);
        assert_eq!((v[0].lo(), v[0].hi()), (1, 2));
        assert_eq!((v[1].lo(), v[1].hi()), (3, 5));
        assert_eq!((v[2].lo(), v[2].hi()), (6, 8));
    }

    #[test]
    fn cut_not_interior() {
        let a = iv(5, 10);
        let pieces = cut_not(&a, ()).unwrap();
        let left = pieces.left.unwrap();
        let right = pieces.right.unwrap();
        assert_eq!((left.lo(), left.hi()), (0, 4));
        assert_eq!((right.lo(), right.hi()), (11, u32::MAX));
    }

    #[test]
    fn cut_not_at_zero() {
        let a = iv(0, 0);
        let pieces = cut_not(&a, ()).unwrap();
        assert!(pieces.left.is_none());
        let right = pieces.right.unwrap();
        assert_eq!((right.lo(), right.hi()), (1, u32::MAX));
    }

    #[test]
    fn cut_not_at_max() {
        let a = iv(u32::MAX, u32::MAX);
        let pieces = cut_not(&a, ()).unwrap();
        let left = pieces.left.unwrap();
        assert!(pieces.right.is_none());
        assert_eq!((left.lo(), left.hi()), (0, u32::MAX - 1));
    }

    #[test]
    fn cut_not_whole_space_errors() {
        let a = iv(0, u32::MAX);
        assert!(matches!(cut_not(&a, ()), Err(Error::FullNegation)));
    }
}
