use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Permissive link matcher: `http(s)://` tokens or bare `host.tld[/path]` forms.
///
/// Tokens end at whitespace, quotes, angle brackets, braces, square brackets,
/// dashes, typographic quotes and ellipses, and at CJK or fullwidth
/// punctuation. Trailing ASCII punctuation is stripped later.
pub static LINK_REGEX: Lazy<Regex> = Lazy::new(|| {
    let url_char = concat!(
        r#"[^\s<>"'`{}|\\^\[\]"#,
        r"\x{2013}\x{2014}\x{2018}\x{2019}\x{201C}\x{201D}\x{2026}",
        r"\x{3000}-\x{303F}\x{FF01}-\x{FF0F}\x{FF1A}-\x{FF20}\x{FF3B}-\x{FF40}\x{FF5B}-\x{FF65}]",
    );
    let pattern = format!(
        r"(?i)\b(?:https?://{c}+|(?:www\.)?(?:[a-z0-9](?:[a-z0-9-]{{0,61}}[a-z0-9])?\.)+[a-z]{{2,24}}\b(?::\d{{2,5}})?(?:/{c}*)?)",
        c = url_char
    );
    Regex::new(&pattern).unwrap()
});

/// List bullets and numbering at the start of a line ("- ", "* ", "3. ", "2) ").
pub static BULLET_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:[-*+>\x{2022}\x{00B7}]+|\d{1,3}[.)])\s+").unwrap()
});

/// Top-level domains accepted for bare (scheme-less) matches.
///
/// Common file extensions ("txt", "js", "rs", "md", "sh") are deliberately absent
/// so prose like "see notes.txt" is not mistaken for a link.
pub static KNOWN_TLDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "com", "org", "net", "edu", "gov", "io", "co", "ly", "me", "fm", "gl", "gd",
        "to", "tv", "app", "dev", "info", "xyz", "ai", "so", "page", "blog", "news",
        "music", "audio", "book", "books", "link", "site", "online", "store", "shop",
        "uk", "us", "ca", "de", "fr", "es", "it", "nl", "se", "no", "fi", "dk", "be",
        "ch", "au", "nz", "jp", "in", "br", "mx", "ie", "pl", "st", "cc", "ws",
    ]
    .into_iter()
    .collect()
});
