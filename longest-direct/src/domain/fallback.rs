//! Ordered fallback chains.
//!
//! Several output fields come from the first of a list of optional upstream
//! fields that is actually present: realtime before planned time, line name
//! before a default, product before mode before a default. Each policy is a
//! slice of accessors, evaluated in order.

/// Reads one optional string field from a value.
pub type Accessor<T> = fn(&T) -> Option<&str>;

/// Return the first accessor result that is present and non-blank.
///
/// # Examples
///
/// ```
/// use longest_direct::domain::{Accessor, first_present};
///
/// struct Pair {
///     a: Option<String>,
///     b: Option<String>,
/// }
///
/// fn a(p: &Pair) -> Option<&str> { p.a.as_deref() }
/// fn b(p: &Pair) -> Option<&str> { p.b.as_deref() }
///
/// const CHAIN: &[Accessor<Pair>] = &[a, b];
///
/// let pair = Pair { a: Some(String::new()), b: Some("second".into()) };
/// assert_eq!(first_present(&pair, CHAIN), Some("second"));
/// ```
pub fn first_present<'a, T>(value: &'a T, chain: &[Accessor<T>]) -> Option<&'a str> {
    chain
        .iter()
        .filter_map(|accessor| accessor(value))
        .find(|s| !s.trim().is_empty())
}

/// Like [`first_present`], but falls back to `default` when nothing matches.
pub fn first_present_or<'a, T>(value: &'a T, chain: &[Accessor<T>], default: &'a str) -> &'a str {
    first_present(value, chain).unwrap_or(default)
}
