//! The negation compiler (§4.5): folds a pair of parallel builders — the
//! expression's positive content and its negated ("shadow") content — into
//! one final, disjoint `AddressSet`.
//!
//! The parser routes every atom it parses to one builder or the other
//! depending on the XOR of the `!` operators enclosing it, so by the time
//! an expression reaches this module there is no more negation left to
//! apply syntactically — only the set-subtraction `positive \ shadow`.

use crate::error::{Error, Result};
use crate::interval::{Flags, Interval};
use crate::numeric::Numeric;
use crate::payload::Payload;
use crate::relation::{cmp, Relation};

use super::list::IntervalList;
use super::{AddressSet, AddressSetBuilder};

/// Computes `positive \ shadow` across both address families and freezes
/// the result.
///
/// Per family: an empty shadow leaves `positive` untouched; a shadow that
/// covers the entire address space is rejected as [`Error::FullNegation`]
/// (there would be nothing left); an empty positive is seeded with the
/// whole address space before subtracting, so that a bare `!addr`
/// expression means "everything but `addr`". If both resulting families
/// end up empty, the whole expression is rejected as
/// [`Error::EmptyAfterNegation`].
pub(crate) fn merge_not<P: Payload>(
    positive: AddressSetBuilder<P>,
    shadow: AddressSetBuilder<P>,
) -> Result<AddressSet<P>> {
    let (pos_v4, pos_v6) = positive.into_lists();
    let (shadow_v4, shadow_v6) = shadow.into_lists();

    let v4 = merge_not_family(pos_v4, shadow_v4)?;
    let v6 = merge_not_family(pos_v6, shadow_v6)?;

    if v4.is_empty() && v6.is_empty() {
        tracing::warn!("address set is empty after applying negation");
        return Err(Error::EmptyAfterNegation);
    }

    Ok(AddressSet::from_lists(v4, v6))
}

fn merge_not_family<N: Numeric, P: Payload>(
    mut positive: IntervalList<N, P>,
    shadow: IntervalList<N, P>,
) -> Result<IntervalList<N, P>> {
    if shadow.is_empty() {
        return Ok(positive);
    }
    if shadow.covers_full_space() {
        tracing::warn!(family = %N::FAMILY, "negated expression covers the entire address space");
        return Err(Error::FullNegation);
    }
    if positive.is_empty() {
        positive.insert(Interval::new(N::ZERO, N::MAX, Flags::empty(), P::default()));
    }

    // Inserting each shadow interval forces positive's existing pieces to
    // cut exactly at the shadow's boundaries, so afterwards every shadow
    // range is covered by one or more positive-list pieces whose union is
    // precisely that range — nothing straddles a shadow boundary.
    let shadow_intervals = shadow.into_sorted_vec();
    for s in &shadow_intervals {
        positive.insert(Interval::new(s.lo(), s.hi(), Flags::empty(), s.payload().clone()));
    }

    positive.remove_matching(|candidate| {
        shadow_intervals.iter().any(|s| {
            let rel = cmp(s, candidate);
            debug_assert!(
                matches!(rel, Relation::Eq | Relation::Eb | Relation::Lt | Relation::Gt),
                "shadow [{:?},{:?}] partially overlapped positive piece [{:?},{:?}] ({:?}) \
                 after boundary-aligning insertion — alignment invariant violated",
                s.lo(),
                s.hi(),
                candidate.lo(),
                candidate.hi(),
                rel,
            );
            matches!(rel, Relation::Eq | Relation::Eb)
        })
    });

    Ok(positive)
}
