//! Composite key construction and parsing.
//!
//! A composite key packs a namespace (the index or object-type name) and an
//! ordered tuple of string segments into one sortable string:
//!
//! ```text
//! \u{0}{namespace}\u{0}{seg1}\u{0}{seg2}\u{0}...{segN}\u{0}
//! ```
//!
//! `U+0000` sorts below every other character, so comparing two encoded keys
//! compares their segment tuples element by element. Every composite key
//! starts with `U+0000`, which keeps the composite key space disjoint from
//! plain record identifiers.

use crate::error::{LedgerError, LedgerResult};

/// Separator placed before the namespace and after every segment.
pub const SEP: char = '\u{0}';

/// Largest code point; appended to a prefix to form an exclusive scan end.
pub const MAX_CHAR: char = '\u{10FFFF}';

// =============================================================================
// Validation
// =============================================================================

fn validate_part(what: &str, part: &str) -> LedgerResult<()> {
    if part.contains(SEP) {
        return Err(LedgerError::invalid_argument(format!(
            "{} {:?} must not contain U+0000",
            what, part
        )));
    }
    if part.contains(MAX_CHAR) {
        return Err(LedgerError::invalid_argument(format!(
            "{} {:?} must not contain U+10FFFF",
            what, part
        )));
    }
    Ok(())
}

fn validate_namespace(namespace: &str) -> LedgerResult<()> {
    if namespace.is_empty() {
        return Err(LedgerError::invalid_argument(
            "composite key namespace must not be empty",
        ));
    }
    validate_part("namespace", namespace)
}

/// True when `key` lives in the composite key space.
pub fn is_composite(key: &str) -> bool {
    key.starts_with(SEP)
}

/// Reject a plain key that would collide with the composite key space.
pub fn validate_simple_key(key: &str) -> LedgerResult<()> {
    if is_composite(key) {
        return Err(LedgerError::invalid_argument(format!(
            "key {:?} must not start with U+0000",
            key
        )));
    }
    Ok(())
}

// =============================================================================
// Key Construction
// =============================================================================

/// Encode `namespace` and `segments` into a composite key.
pub fn encode<S: AsRef<str>>(namespace: &str, segments: &[S]) -> LedgerResult<String> {
    // A full key is the prefix of all its segments.
    prefix(namespace, segments)
}

/// Prefix shared by every composite key whose leading segments are `leading`.
///
/// A scan over `[prefix, prefix + MAX_CHAR)` visits exactly those keys, in
/// ascending segment order.
pub fn prefix<S: AsRef<str>>(namespace: &str, leading: &[S]) -> LedgerResult<String> {
    validate_namespace(namespace)?;
    let mut key = String::with_capacity(
        2 + namespace.len() + leading.iter().map(|s| s.as_ref().len() + 1).sum::<usize>(),
    );
    key.push(SEP);
    key.push_str(namespace);
    key.push(SEP);
    for segment in leading {
        let segment = segment.as_ref();
        validate_part("segment", segment)?;
        key.push_str(segment);
        key.push(SEP);
    }
    Ok(key)
}

/// Exclusive upper bound for a scan starting at `prefix`.
pub fn prefix_end(prefix: &str) -> String {
    let mut end = String::with_capacity(prefix.len() + MAX_CHAR.len_utf8());
    end.push_str(prefix);
    end.push(MAX_CHAR);
    end
}

// =============================================================================
// Key Parsing
// =============================================================================

/// Split a composite key back into `(namespace, segments)`.
pub fn decode(key: &str) -> LedgerResult<(String, Vec<String>)> {
    let rest = key
        .strip_prefix(SEP)
        .ok_or_else(|| LedgerError::malformed_key(key, "missing composite key marker"))?;
    let body = rest
        .strip_suffix(SEP)
        .ok_or_else(|| LedgerError::malformed_key(key, "not terminated by separator"))?;

    let mut parts = body.split(SEP);
    let namespace = match parts.next() {
        Some(ns) if !ns.is_empty() => ns.to_string(),
        _ => return Err(LedgerError::malformed_key(key, "empty namespace")),
    };
    let segments = parts.map(str::to_string).collect();
    Ok((namespace, segments))
}

/// Decode `key` and check that it belongs to `namespace`.
pub fn decode_in(namespace: &str, key: &str) -> LedgerResult<Vec<String>> {
    let (ns, segments) = decode(key)?;
    if ns != namespace {
        return Err(LedgerError::malformed_key(
            key,
            format!("expected namespace {:?}, found {:?}", namespace, ns),
        ));
    }
    Ok(segments)
}
