//! Recursive-descent compiler from a user-authored address expression to a
//! frozen [`crate::sethead::AddressSet`].
//!
//! Grammar (§4.2):
//!
//! ```text
//! list    := element (',' element)*
//! element := '!' element | '[' list ']' | '$' name | atom
//! ```
//!
//! Every leaf `atom` is routed to one of two parallel builders — `positive`
//! or `shadow` — depending on the XOR of the `!` operators enclosing it.
//! Once the whole expression has been walked, [`crate::sethead::merge_not`]
//! folds `shadow` out of `positive` in one pass (§4.5); there is no
//! per-atom negation step during the walk itself.

use crate::error::{Error, Result};
use crate::interval::{parse_atom, ParsedAtom};
use crate::payload::Payload;
use crate::sethead::{merge_not, AddressSet, AddressSetBuilder};

/// Recursion past brackets or `$variable` expansions beyond this depth is
/// rejected as [`Error::Syntax`] (R2: the original C recurses without a
/// bound here).
const MAX_DEPTH: u32 = 32;

/// Looks up the literal text a `$name` variable expands to.
///
/// Implemented for the two owned/borrowed `HashMap` shapes callers are
/// most likely to already have lying around; implement it directly for
/// anything more specialized (a config layer backed by something other
/// than a map, for instance).
pub trait VarResolver {
    fn resolve(&self, name: &str) -> Option<&str>;
}

impl VarResolver for std::collections::HashMap<String, String> {
    fn resolve(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl<'a> VarResolver for std::collections::HashMap<&'a str, &'a str> {
    fn resolve(&self, name: &str) -> Option<&str> {
        self.get(name).copied()
    }
}

/// A resolver with no variables; `$anything` always fails.
pub struct NoVars;

impl VarResolver for NoVars {
    fn resolve(&self, _name: &str) -> Option<&str> {
        None
    }
}

/// Compiles an address expression into a frozen [`AddressSet`].
///
/// `vars` resolves `$name` references; pass [`NoVars`] for expressions
/// that don't use any.
pub fn parse(text: &str, vars: &impl VarResolver) -> Result<AddressSet<()>> {
    parse_tagged(text, vars, &mut |_leaf| ())
}

/// Generalization of [`parse`] over an arbitrary [`Payload`]: `tag` is
/// called with each leaf atom's source text (before `!`/`$`-expansion is
/// stripped off further) and supplies the payload attached to it. `parse`
/// is the degenerate case where every leaf tags itself with `()`.
///
/// Not part of the public surface (§6's programmatic surface specifies
/// only the payload-free `parse`/`lookup`/`free` trio) — exercised
/// directly by this module's own tests to drive payload merging through
/// real cut cascades with a non-trivial [`Payload`].
fn parse_tagged<P: Payload>(
    text: &str,
    vars: &impl VarResolver,
    tag: &mut impl FnMut(&str) -> P,
) -> Result<AddressSet<P>> {
    let mut positive = AddressSetBuilder::new();
    let mut shadow = AddressSetBuilder::new();
    parse_list(text, vars, false, 0, &mut positive, &mut shadow, tag)?;
    merge_not(positive, shadow)
}

fn parse_list<P: Payload>(
    text: &str,
    vars: &impl VarResolver,
    negate: bool,
    depth: u32,
    positive: &mut AddressSetBuilder<P>,
    shadow: &mut AddressSetBuilder<P>,
    tag: &mut impl FnMut(&str) -> P,
) -> Result<()> {
    if depth > MAX_DEPTH {
        tracing::warn!(depth, "address expression nested past the recursion bound");
        return Err(Error::Syntax("expression nested too deeply".to_string()));
    }
    for element in split_top_level(text)? {
        parse_element(element.trim(), vars, negate, depth, positive, shadow, tag)?;
    }
    Ok(())
}

fn parse_element<P: Payload>(
    text: &str,
    vars: &impl VarResolver,
    negate: bool,
    depth: u32,
    positive: &mut AddressSetBuilder<P>,
    shadow: &mut AddressSetBuilder<P>,
    tag: &mut impl FnMut(&str) -> P,
) -> Result<()> {
    if text.is_empty() {
        return Err(Error::Syntax("empty element".to_string()));
    }
    if let Some(rest) = text.strip_prefix('!') {
        return parse_element(rest.trim(), vars, !negate, depth, positive, shadow, tag);
    }
    if let Some(inner) = text.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
        return parse_list(inner, vars, negate, depth + 1, positive, shadow, tag);
    }
    if let Some(name) = text.strip_prefix('$') {
        let resolved = vars
            .resolve(name)
            .ok_or_else(|| Error::UnknownVariable(name.to_string()))?
            .to_string();
        return parse_list(&resolved, vars, negate, depth + 1, positive, shadow, tag);
    }
    if negate && text.eq_ignore_ascii_case("any") {
        return Err(Error::Syntax("negation of \"any\" is not allowed".to_string()));
    }
    let target = if negate { &mut *shadow } else { &mut *positive };
    match parse_atom(text, tag(text))? {
        ParsedAtom::Any(payload) => target.insert_any(payload),
        ParsedAtom::V4(interval) => target.insert_v4(interval),
        ParsedAtom::V6(interval) => target.insert_v6(interval),
    }
    Ok(())
}

/// Splits `text` on commas at bracket depth zero, leaving nested `[...]`
/// groups intact for a later recursive call.
fn split_top_level(text: &str) -> Result<Vec<&str>> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut start = 0usize;
    for (i, b) in text.bytes().enumerate() {
        match b {
            b'[' => depth += 1,
            b']' => {
                depth -= 1;
                if depth < 0 {
                    return Err(Error::Syntax(text.to_string()));
                }
            }
            b',' if depth == 0 => {
                parts.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(Error::Syntax(text.to_string()));
    }
    parts.push(&text[start..]);
    Ok(parts)
}
