use std::borrow::Cow;
use url::Url;

const TRAILING_PUNCTUATION: &[char] = &[
    '.', ',', ';', ':', '!', '?', '\'', '"', '\u{2026}', '\u{3001}', '\u{3002}', '\u{FF0C}', '\u{FF01}',
    '\u{FF1F}', '\u{FF1B}', '\u{FF1A}',
];

/// Strips sentence punctuation and unbalanced closing parentheses from the end of a match.
///
/// Balanced parentheses are kept so links like `/wiki/Dune_(novel)` survive.
pub fn trim_trailing_punctuation(raw: &str) -> &str {
    let mut s = raw;
    while let Some(last) = s.chars().last() {
        let strip = if TRAILING_PUNCTUATION.contains(&last) {
            true
        } else if last == ')' {
            s.matches('(').count() < s.matches(')').count()
        } else {
            false
        };
        if !strip {
            break;
        }
        s = &s[..s.len() - last.len_utf8()];
    }
    s
}

/// Whether the string starts with `http://` or `https://`, ignoring case
pub fn has_http_scheme(s: &str) -> bool {
    ["http://", "https://"]
        .iter()
        .any(|prefix| s.get(..prefix.len()).map_or(false, |head| head.eq_ignore_ascii_case(prefix)))
}

/// Turns a raw match into an absolute URL, or `None` if it does not parse.
///
/// Bare domains get an `https://` scheme. Scheme and host casing are normalized
/// by the parser. A host is required.
pub fn normalize_url(raw: &str) -> Option<Url> {
    let trimmed = trim_trailing_punctuation(raw.trim());
    if trimmed.is_empty() {
        return None;
    }

    let candidate = if has_http_scheme(trimmed) {
        Cow::Borrowed(trimmed)
    } else {
        Cow::Owned(format!("https://{}", trimmed))
    };

    let url = Url::parse(&candidate).ok()?;
    match url.host_str() {
        Some(host) if !host.is_empty() => Some(url),
        _ => None,
    }
}

/// Key used to collapse duplicate links.
///
/// Plain anchors and a trailing path slash are ignored. Fragments that route a
/// single-page app ("#/book/1", "#!/shows") and the query string are kept as is.
pub fn dedup_key(url: &Url) -> String {
    let mut keyed = url.clone();
    let routes = keyed
        .fragment()
        .map_or(false, |fragment| fragment.starts_with('/') || fragment.starts_with('!'));
    if !routes {
        keyed.set_fragment(None);
    }
    if keyed.query().is_none() && keyed.fragment().is_none() && keyed.path().len() > 1 {
        let path = keyed.path().trim_end_matches('/').to_string();
        keyed.set_path(&path);
    }
    keyed.into()
}
