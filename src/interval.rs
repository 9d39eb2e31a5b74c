//! The atomic unit of the algebra: a closed range `[lo, hi]` over one
//! numeric domain, plus the handful of transient/informational flag bits
//! carried alongside it.

use std::net::{Ipv4Addr, Ipv6Addr};

use bitflags::bitflags;
use ipnet::{Ipv4Net, Ipv6Net};

use crate::error::{Error, Result};
use crate::numeric::{contiguous_prefix_len, Numeric};
use crate::payload::Payload;

bitflags! {
    /// Flag bits carried by an [`Interval`].
    ///
    /// `NOT` is transient: it is set by literal parsing and consumed by
    /// the negation compiler (§4.5 of the spec) — no interval in a frozen
    /// [`crate::sethead::AddressSet`] ever carries it. `SIGGROUP_COPY` and
    /// `PORTS_COPY` record that a piece's payload is a propagated copy
    /// produced by [`crate::relation::cut`] rather than an original
    /// insert; Rust's ownership model makes the double-free hazard they
    /// guard against in the original C unreachable, so they are kept
    /// purely for diagnostic/testing parity.
    #[derive(Clone, Copy, Debug, Eq, PartialEq, Default)]
    pub struct Flags: u8 {
        const ANY            = 0b0000_0001;
        const NOT             = 0b0000_0010;
        const SIGGROUP_COPY    = 0b0000_0100;
        const PORTS_COPY       = 0b0000_1000;
        const HAS_PORT         = 0b0001_0000;
    }
}

/// A closed, contiguous range `[lo, hi]` over one numeric domain, carrying
/// an opaque, mergeable payload.
#[derive(Clone, Debug)]
pub struct Interval<N: Numeric, P: Payload> {
    pub(crate) lo: N,
    pub(crate) hi: N,
    pub(crate) flags: Flags,
    pub(crate) payload: P,
}

impl<N: Numeric, P: Payload> Interval<N, P> {
    /// Builds an interval. `lo` must not exceed `hi` — this is an
    /// internal invariant enforced by every caller (literal ranges are
    /// validated against [`Error::ReversedRange`] *before* this
    /// constructor runs), so a violation here is a bug, not user input.
    pub fn new(lo: N, hi: N, flags: Flags, payload: P) -> Self {
        debug_assert!(lo <= hi, "Interval::new called with lo > hi");
        Self { lo, hi, flags, payload }
    }

    #[inline]
    pub fn lo(&self) -> N {
        self.lo
    }

    #[inline]
    pub fn hi(&self) -> N {
        self.hi
    }

    #[inline]
    pub fn flags(&self) -> Flags {
        self.flags
    }

    #[inline]
    pub fn payload(&self) -> &P {
        &self.payload
    }

    #[inline]
    pub fn contains(&self, addr: N) -> bool {
        self.lo <= addr && addr <= self.hi
    }

    /// A single-host interval (`lo == hi`).
    pub fn host(addr: N, payload: P) -> Self {
        Self::new(addr, addr, Flags::empty(), payload)
    }
}

/// Result of parsing one address-expression leaf, before the parser
/// decides whether it is positive or negated. `any` is family-less until
/// the negation compiler materializes it into both families (§4.5).
pub enum ParsedAtom<P: Payload> {
    Any(P),
    V4(Interval<u32, P>),
    V6(Interval<u128, P>),
}

/// Parses one address-expression atom (§4.2's grammar table), excluding
/// the leading `!` and the list/variable forms, which belong to the
/// recursive-descent parser in [`crate::parser`].
pub fn parse_atom<P: Payload>(text: &str, payload: P) -> Result<ParsedAtom<P>> {
    if text.is_empty() {
        return Err(Error::Syntax("empty atom".into()));
    }
    if text.eq_ignore_ascii_case("any") {
        return Ok(ParsedAtom::Any(payload));
    }
    if text.contains(':') {
        parse_v6_atom(text, payload).map(ParsedAtom::V6)
    } else {
        parse_v4_atom(text, payload).map(ParsedAtom::V4)
    }
}

fn parse_v4_atom<P: Payload>(text: &str, payload: P) -> Result<Interval<u32, P>> {
    if let Some((addr, mask)) = text.split_once('/') {
        let addr: Ipv4Addr = addr.parse().map_err(|_| Error::InvalidMask(text.to_string()))?;
        let (lo, hi): (u32, u32) = if mask.contains('.') {
            let m: u32 = mask
                .parse::<Ipv4Addr>()
                .map_err(|_| Error::InvalidMask(text.to_string()))?
                .into();
            let netmask = contiguous_prefix_len::<u32>(m)
                .map(u32::cidr_mask)
                .ok_or_else(|| Error::InvalidMask(text.to_string()))?;
            let addr: u32 = addr.into();
            let lo = addr & netmask;
            (lo, lo | !netmask)
        } else {
            let prefix_len: u8 = mask.parse().map_err(|_| Error::InvalidMask(text.to_string()))?;
            let net = Ipv4Net::new(addr, prefix_len).map_err(|_| Error::InvalidMask(text.to_string()))?;
            (net.network().into(), net.broadcast().into())
        };
        Ok(Interval::new(lo, hi, Flags::empty(), payload))
    } else if let Some((lo, hi)) = text.split_once('-') {
        let lo: u32 = lo
            .parse::<Ipv4Addr>()
            .map_err(|_| Error::InvalidMask(text.to_string()))?
            .into();
        let hi: u32 = hi
            .parse::<Ipv4Addr>()
            .map_err(|_| Error::InvalidMask(text.to_string()))?
            .into();
        if lo > hi {
            return Err(Error::ReversedRange(text.to_string()));
        }
        Ok(Interval::new(lo, hi, Flags::empty(), payload))
    } else {
        let addr: u32 = text
            .parse::<Ipv4Addr>()
            .map_err(|_| Error::InvalidMask(text.to_string()))?
            .into();
        Ok(Interval::host(addr, payload))
    }
}

fn parse_v6_atom<P: Payload>(text: &str, payload: P) -> Result<Interval<u128, P>> {
    if let Some((addr, prefix)) = text.split_once('/') {
        let addr: Ipv6Addr = addr.parse().map_err(|_| Error::InvalidMask(text.to_string()))?;
        let prefix_len: u8 = prefix.parse().map_err(|_| Error::InvalidMask(text.to_string()))?;
        let net = Ipv6Net::new(addr, prefix_len).map_err(|_| Error::InvalidMask(text.to_string()))?;
        let lo: u128 = net.network().into();
        let hi: u128 = net.broadcast().into();
        Ok(Interval::new(lo, hi, Flags::empty(), payload))
    } else if let Some((lo, hi)) = text.split_once('-') {
        let lo: u128 = lo
            .parse::<Ipv6Addr>()
            .map_err(|_| Error::InvalidMask(text.to_string()))?
            .into();
        let hi: u128 = hi
            .parse::<Ipv6Addr>()
            .map_err(|_| Error::InvalidMask(text.to_string()))?
            .into();
        if lo > hi {
            return Err(Error::ReversedRange(text.to_string()));
        }
        Ok(Interval::new(lo, hi, Flags::empty(), payload))
    } else {
        let addr: u128 = text
            .parse::<Ipv6Addr>()
            .map_err(|_| Error::InvalidMask(text.to_string()))?
            .into();
        Ok(Interval::host(addr, payload))
    }
}
