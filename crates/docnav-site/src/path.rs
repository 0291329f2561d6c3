//! Path classification and composition.
//!
//! All functions operate on route paths (`/guide/intro.html`), never on
//! filesystem paths.

use std::borrow::Cow;
use std::sync::LazyLock;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use regex::Regex;

static PROTOCOL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][a-z0-9+.-]*:").expect("invalid protocol regex"));

static MARKDOWN_LINK_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.md([?#].*)?$").expect("invalid markdown link regex"));

/// Escapes of URI-reserved characters (`; / ? : @ & = + $ , #`).
static RESERVED_ESCAPE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"%(?:2[346BbCcFf]|3[AaBbDdFf]|40)").expect("invalid reserved escape regex")
});

/// Characters left untouched when encoding a full URI.
const URI_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b';')
    .remove(b',')
    .remove(b'/')
    .remove(b'?')
    .remove(b':')
    .remove(b'@')
    .remove(b'&')
    .remove(b'=')
    .remove(b'+')
    .remove(b'$')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'#');

/// Whether `path` is rooted at the site (`/...`).
pub fn is_absolute(path: &str) -> bool {
    path.starts_with('/')
}

/// Whether `path` carries a URI scheme (`https:`, `mailto:`, `tel:`, ...).
pub fn is_protocol_qualified(path: &str) -> bool {
    PROTOCOL_PATTERN.is_match(path)
}

/// Whether `path` points outside the site served under `base`.
///
/// Protocol-qualified and protocol-relative (`//host/...`) links are always
/// external. Absolute links outside `base` are external unless they point at
/// a markdown source.
pub fn is_external(path: &str, base: &str) -> bool {
    if is_protocol_qualified(path) || path.starts_with("//") {
        return true;
    }
    is_absolute(path) && !path.starts_with(base) && !MARKDOWN_LINK_PATTERN.is_match(path)
}

/// Whether `link` should be rewritten through the route table.
pub fn is_internal(link: &str) -> bool {
    !is_external(link, "/") && !is_protocol_qualified(link)
}

/// Append `/` unless `path` already ends with `/` or `.html`.
pub fn ensure_trailing_slash(path: &str) -> Cow<'_, str> {
    if path.ends_with('/') || path.ends_with(".html") {
        Cow::Borrowed(path)
    } else {
        Cow::Owned(format!("{path}/"))
    }
}

/// Compose `prefix` and `path`.
///
/// Absolute and protocol-qualified paths are returned unchanged, so joining
/// an already-resolved path again is a no-op.
///
/// # Examples
///
/// ```
/// use docnav_site::path::join_prefix;
///
/// assert_eq!(join_prefix("/guide/", "intro.md"), "/guide/intro.md");
/// assert_eq!(join_prefix("/guide", "intro.md"), "/guide/intro.md");
/// assert_eq!(join_prefix("/guide/", "https://x.com"), "https://x.com");
/// assert_eq!(join_prefix("", "intro.md"), "/intro.md");
/// ```
pub fn join_prefix(prefix: &str, path: &str) -> String {
    if is_absolute(path) || is_protocol_qualified(path) {
        path.to_owned()
    } else {
        format!("{}{path}", ensure_trailing_slash(prefix))
    }
}

/// Decode percent escapes the way `decodeURI` does.
///
/// Escapes of reserved characters (`%2F`, `%3F`, ...) stay encoded so the
/// decoded path keeps its structure. Invalid UTF-8 is replaced.
pub fn decode_path(path: &str) -> Cow<'_, str> {
    if !RESERVED_ESCAPE_PATTERN.is_match(path) {
        return percent_decode_str(path).decode_utf8_lossy();
    }

    let mut decoded = String::with_capacity(path.len());
    let mut last = 0;
    for escape in RESERVED_ESCAPE_PATTERN.find_iter(path) {
        decoded.push_str(&percent_decode_str(&path[last..escape.start()]).decode_utf8_lossy());
        decoded.push_str(escape.as_str());
        last = escape.end();
    }
    decoded.push_str(&percent_decode_str(&path[last..]).decode_utf8_lossy());
    Cow::Owned(decoded)
}

/// Percent-encode characters that are not valid in a URI.
pub fn encode_path(path: &str) -> String {
    utf8_percent_encode(path, URI_ENCODE_SET).to_string()
}

/// Pick the locale prefix owning `route_path`.
///
/// Deeper prefixes are tried first (more segments, then longer text); `/`
/// is returned when nothing matches.
pub fn resolve_locale_path<'a, I>(locale_paths: I, route_path: &str) -> &'a str
where
    I: IntoIterator<Item = &'a str>,
{
    let mut candidates: Vec<&str> = locale_paths.into_iter().collect();
    candidates.sort_by(|a, b| {
        b.split('/')
            .count()
            .cmp(&a.split('/').count())
            .then_with(|| b.len().cmp(&a.len()))
    });
    candidates
        .into_iter()
        .find(|locale| route_path.starts_with(locale))
        .unwrap_or("/")
}

/// Split `path` into the pathname and its `?query`/`#hash` suffix.
pub(crate) fn split_suffix(path: &str) -> (&str, &str) {
    match path.find(['?', '#']) {
        Some(index) => path.split_at(index),
        None => (path, ""),
    }
}

pub(crate) fn remove_leading_slash(path: &str) -> &str {
    path.strip_prefix('/').unwrap_or(path)
}

pub(crate) fn remove_trailing_slash(path: &str) -> &str {
    path.strip_suffix('/').unwrap_or(path)
}
