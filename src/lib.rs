//! Address-set algebra for signature-based traffic matching.
//!
//! Compiles a user-authored address expression — nested lists, negation,
//! CIDR and dotted-mask notation, explicit ranges, `any`, `$variable`
//! references, mixed IPv4/IPv6 — into a frozen [`AddressSet`]: sorted,
//! pairwise-disjoint ranges ready for repeated lookup against traffic
//! addresses.
//!
//! ```
//! use sigaddr::{parse, NoVars};
//!
//! let set = parse("[10.0.0.0/8, !10.1.2.3, 2001:db8::/32]", &NoVars).unwrap();
//! assert!(set.lookup_v4(u32::from(std::net::Ipv4Addr::new(10, 5, 5, 5))).is_some());
//! assert!(set.lookup_v4(u32::from(std::net::Ipv4Addr::new(10, 1, 2, 3))).is_none());
//! ```

mod error;
mod interval;
mod numeric;
mod parser;
mod payload;
mod relation;
mod sethead;

pub use error::{Error, Result};
pub use interval::{Flags, Interval};
pub use numeric::{Family, Numeric};
pub use parser::{parse, NoVars, VarResolver};
pub use payload::{Payload, SignatureSet};
pub use sethead::{AddressSet, Match};

/// Releases a compiled set. `AddressSet` has no manual teardown beyond
/// ordinary `Drop` — this exists only to mirror the three-entry-point
/// external interface (`parse`/`lookup`/`free`) that callers migrating
/// from a C-style address-setup API expect to find.
#[inline]
pub fn free<P: Payload>(_set: AddressSet<P>) {}

/// Looks up a traffic address against a compiled set, dispatching to
/// whichever family the address belongs to.
#[inline]
pub fn lookup<P: Payload>(set: &AddressSet<P>, addr: std::net::IpAddr) -> Option<Match<'_, P>> {
    set.lookup(addr)
}
