//! `QName` (qualified name) handling.
//!
//! A `QName` is a name of the form `prefix:localname` or just `localname` (with
//! no prefix), as defined by the Namespaces in XML 1.0 specification.
//!
//! See <https://www.w3.org/TR/xml-names/#NT-QName>

/// Splits a `QName` into its prefix and local name parts.
///
/// Returns `(Some(prefix), localname)` if the name contains a colon,
/// or `(None, localname)` if it does not.
///
/// # Examples
///
/// ```
/// use xmlpull::util::qname::split_qname;
///
/// assert_eq!(split_qname("dc:title"), (Some("dc"), "title"));
/// assert_eq!(split_qname("nav"), (None, "nav"));
/// ```
#[must_use]
pub fn split_qname(qname: &str) -> (Option<&str>, &str) {
    match qname.find(':') {
        Some(pos) => (Some(&qname[..pos]), &qname[pos + 1..]),
        None => (None, qname),
    }
}

/// Joins an optional prefix and a local name into a `QName`.
#[must_use]
pub fn join_qname(prefix: Option<&str>, local: &str) -> String {
    match prefix {
        Some(p) if !p.is_empty() => format!("{p}:{local}"),
        _ => local.to_string(),
    }
}

/// Returns `true` if `wanted` names the attribute or element written as
/// `qname` with local name `local`.
///
/// Accepts the full qualified name, the stored local name, or the part of
/// the qualified name after the first colon. The last case covers lenient
/// HTML trees, where `epub:type` is stored as a single unprefixed name.
#[must_use]
pub fn name_matches(qname: &str, local: &str, wanted: &str) -> bool {
    qname == wanted || local == wanted || split_qname(qname).1 == wanted
}
