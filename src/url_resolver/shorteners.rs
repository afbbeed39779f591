use url::Url;

/// Hosts that only exist to redirect somewhere else
const SHORTENER_HOSTS: &[&str] = &[
    "bit.ly",
    "bitly.com",
    "tinyurl.com",
    "t.co",
    "goo.gl",
    "ow.ly",
    "buff.ly",
    "is.gd",
    "rb.gy",
    "cutt.ly",
    "tiny.cc",
    "shorturl.at",
    "rebrand.ly",
    "bl.ink",
    "dub.sh",
    "lnkd.in",
    "youtu.be",
    "spoti.fi",
    "spotify.link",
    "amzn.to",
    "a.co",
    "apple.co",
    "g.co",
    "pod.link",
    "lnk.to",
    "found.ee",
];

/// Whether `url` points at a known link-shortening service
pub fn is_shortened_url(url: &str) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };
    let Some(host) = parsed.host_str() else {
        return false;
    };
    let host = host.strip_prefix("www.").unwrap_or(host);

    SHORTENER_HOSTS.contains(&host)
        // Label-based services hand out subdomains, e.g. "artist.lnk.to"
        || host.ends_with(".lnk.to")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_shorteners() {
        assert!(is_shortened_url("https://bit.ly/xyz"));
        assert!(is_shortened_url("https://www.tinyurl.com/abc"));
        assert!(is_shortened_url("https://spoti.fi/3abc"));
        assert!(is_shortened_url("https://someartist.lnk.to/album"));
    }

    #[test]
    fn test_regular_links() {
        assert!(!is_shortened_url("https://www.goodreads.com/book/show/1"));
        assert!(!is_shortened_url("https://notbit.ly/xyz"));
        assert!(!is_shortened_url("not a url"));
    }
}
