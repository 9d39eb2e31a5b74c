//! The Set Head: three sorted, disjoint interval lists (IPv4, IPv6, and a
//! family-less `any` slot) plus the lifecycle that takes them from an
//! empty, growable builder to a frozen, immutable, shareable set.

mod list;
mod negation;

use std::net::IpAddr;
use std::sync::Arc;

use crate::interval::{Flags, Interval};
use crate::numeric::{Family, Numeric};
use crate::payload::Payload;

use list::IntervalList;

pub(crate) use negation::merge_not;

/// A Set Head while it is being grown by the parser. Not `Sync` — one
/// builder belongs to one single-threaded compilation (§5).
pub(crate) struct AddressSetBuilder<P: Payload> {
    v4: IntervalList<u32, P>,
    v6: IntervalList<u128, P>,
    /// At most one `any` entry, merged on repeated `any`/`any` insertions.
    /// Materialized into both families when the builder is frozen.
    any: Option<P>,
}

impl<P: Payload> AddressSetBuilder<P> {
    pub(crate) fn new() -> Self {
        Self { v4: IntervalList::new(), v6: IntervalList::new(), any: None }
    }

    pub(crate) fn insert_v4(&mut self, interval: Interval<u32, P>) {
        self.v4.insert(interval);
    }

    pub(crate) fn insert_v6(&mut self, interval: Interval<u128, P>) {
        self.v6.insert(interval);
    }

    pub(crate) fn insert_any(&mut self, payload: P) {
        match &mut self.any {
            Some(existing) => existing.merge(&payload),
            None => self.any = Some(payload),
        }
    }

    /// Materializes a pending `any` entry into both families
    /// (`0.0.0.0/0` and `::/0`). Used both by [`Self::freeze`] directly
    /// and by the negation compiler, which needs the raw lists before
    /// they are sorted into an immutable [`AddressSet`].
    pub(crate) fn into_lists(mut self) -> (IntervalList<u32, P>, IntervalList<u128, P>) {
        if let Some(payload) = self.any.take() {
            self.v4.insert(Interval::new(u32::ZERO, u32::MAX, Flags::ANY, payload.clone()));
            self.v6.insert(Interval::new(u128::ZERO, u128::MAX, Flags::ANY, payload));
        }
        (self.v4, self.v6)
    }

    /// Drains the lists into a frozen, sorted, immutable [`AddressSet`].
    pub(crate) fn freeze(self) -> AddressSet<P> {
        let (v4, v6) = self.into_lists();
        AddressSet::from_lists(v4, v6)
    }
}

/// A compiled address set: sorted, pairwise-disjoint ranges over IPv4 and
/// IPv6, immutable and freely shareable across reader threads once
/// published (the `Arc` refcount protocol gives the required
/// release-acquire ordering — see §5).
#[derive(Clone)]
pub struct AddressSet<P: Payload> {
    v4: Arc<[Interval<u32, P>]>,
    v6: Arc<[Interval<u128, P>]>,
}

impl<P: Payload> AddressSet<P> {
    pub(crate) fn from_lists(v4: IntervalList<u32, P>, v6: IntervalList<u128, P>) -> Self {
        Self {
            v4: Arc::from(v4.into_sorted_vec().into_boxed_slice()),
            v6: Arc::from(v6.into_sorted_vec().into_boxed_slice()),
        }
    }

    pub fn v4_ranges(&self) -> &[Interval<u32, P>] {
        &self.v4
    }

    pub fn v6_ranges(&self) -> &[Interval<u128, P>] {
        &self.v6
    }

    pub fn lookup_v4(&self, addr: u32) -> Option<&Interval<u32, P>> {
        lookup_slice(&self.v4, addr)
    }

    pub fn lookup_v6(&self, addr: u128) -> Option<&Interval<u128, P>> {
        lookup_slice(&self.v6, addr)
    }

    /// Looks up a `std::net::IpAddr`, dispatching to the matching
    /// family's list.
    pub fn lookup(&self, addr: IpAddr) -> Option<Match<'_, P>> {
        match addr {
            IpAddr::V4(a) => self.lookup_v4(a.into()).map(Match::V4),
            IpAddr::V6(a) => self.lookup_v6(a.into()).map(Match::V6),
        }
    }

    /// Serializes the set back to a bracketed address expression the
    /// parser accepts: `[lo-hi, lo-hi, ...]` across both families in
    /// ascending-within-family order, V4 ranges first.
    ///
    /// This exists for the idempotence property (distilled spec §8,
    /// property 5: `parse(print(parse(x))) == parse(x)`) — every range is
    /// printed as an explicit `lo-hi` pair rather than reconstructing a
    /// CIDR/mask form, since a disjoint range produced by a cut cascade
    /// doesn't generally fall on a power-of-two boundary.
    pub fn to_expr(&self) -> String {
        use std::net::{Ipv4Addr, Ipv6Addr};
        let v4 = self.v4.iter().map(|i| format!("{}-{}", Ipv4Addr::from(i.lo()), Ipv4Addr::from(i.hi())));
        let v6 = self.v6.iter().map(|i| format!("{}-{}", Ipv6Addr::from(i.lo()), Ipv6Addr::from(i.hi())));
        format!("[{}]", v4.chain(v6).collect::<Vec<_>>().join(","))
    }
}

fn lookup_slice<N: Numeric, P: Payload>(slice: &[Interval<N, P>], addr: N) -> Option<&Interval<N, P>> {
    let idx = slice.partition_point(|iv| iv.lo() <= addr);
    if idx == 0 {
        return None;
    }
    let candidate = &slice[idx - 1];
    candidate.contains(addr).then_some(candidate)
}

/// The interval (and family) matched by a [`AddressSet::lookup`] call.
pub enum Match<'a, P: Payload> {
    V4(&'a Interval<u32, P>),
    V6(&'a Interval<u128, P>),
}

impl<'a, P: Payload> Match<'a, P> {
    pub fn family(&self) -> Family {
        match self {
            Match::V4(_) => Family::V4,
            Match::V6(_) => Family::V6,
        }
    }

    pub fn payload(&self) -> &P {
        match self {
            Match::V4(i) => i.payload(),
            Match::V6(i) => i.payload(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interval::Flags;

    fn iv(lo: u32, hi: u32) -> Interval<u32, ()> {
        Interval::new(lo, hi, Flags::empty(), ())
    }

    /// A scan-based reference lookup, used only to cross-check the
    /// binary-search lookup above (§4.6 permits either implementation).
    fn linear_lookup<N: Numeric, P: Payload>(slice: &[Interval<N, P>], addr: N) -> Option<&Interval<N, P>> {
        for interval in slice {
            if interval.lo() > addr {
                break;
            }
            if interval.contains(addr) {
                return Some(interval);
            }
        }
        None
    }

    #[test]
    fn binary_search_matches_linear_scan() {
        let mut b = AddressSetBuilder::<()>::new();
        for (lo, hi) in [(10, 20), (30, 40), (100, 200)] {
            b.insert_v4(iv(lo, hi));
        }
        let set = b.freeze();
        for addr in [0u32, 10, 15, 20, 21, 29, 30, 100, 150, 200, 201, u32::MAX] {
            assert_eq!(
                lookup_slice(&set.v4, addr).map(|i| (i.lo(), i.hi())),
                linear_lookup(&set.v4, addr).map(|i| (i.lo(), i.hi())),
            );
        }
    }

    #[test]
    fn any_materializes_into_both_families() {
        let mut b = AddressSetBuilder::<()>::new();
        b.insert_any(());
        let set = b.freeze();
        assert_eq!(set.v4_ranges().len(), 1);
        assert_eq!(set.v6_ranges().len(), 1);
        assert!(set.lookup_v4(12345).is_some());
        assert!(set.lookup_v6(12345).is_some());
    }
}
