use url::Url;

use super::candidate::ItemKind;

const BOOK_HOSTS: &[&str] = &[
    "goodreads.com",
    "openlibrary.org",
    "bookshop.org",
    "app.thestorygraph.com",
    "librarything.com",
    "audible.com",
];

const PODCAST_HOSTS: &[&str] = &[
    "podcasts.apple.com",
    "podcasts.google.com",
    "overcast.fm",
    "pca.st",
    "pocketcasts.com",
    "castbox.fm",
    "castro.fm",
    "podbean.com",
    "anchor.fm",
];

const MUSIC_HOSTS: &[&str] = &[
    "music.apple.com",
    "music.youtube.com",
    "music.amazon.com",
    "soundcloud.com",
    "bandcamp.com",
    "tidal.com",
    "deezer.com",
];

/// Infers what kind of shelf item a link points at from its host and path
pub fn infer_kind(url: &Url) -> Option<ItemKind> {
    let host = url.host_str()?;
    let host = host.strip_prefix("www.").unwrap_or(host);

    if host == "open.spotify.com" || host == "spotify.com" {
        return spotify_kind(url);
    }
    if host.starts_with("books.google.") {
        return Some(ItemKind::Book);
    }
    if host == "play.google.com" && url.path().starts_with("/store/books") {
        return Some(ItemKind::Book);
    }

    if matches_any(host, BOOK_HOSTS) {
        Some(ItemKind::Book)
    } else if matches_any(host, PODCAST_HOSTS) {
        Some(ItemKind::Podcast)
    } else if matches_any(host, MUSIC_HOSTS) {
        Some(ItemKind::Music)
    } else {
        None
    }
}

/// Exact host or any subdomain of it (`artist.bandcamp.com`)
fn matches_any(host: &str, known: &[&str]) -> bool {
    known.iter().any(|k| {
        host == *k
            || host
                .strip_suffix(k)
                .map_or(false, |prefix| prefix.ends_with('.'))
    })
}

fn spotify_kind(url: &Url) -> Option<ItemKind> {
    // Localized links are prefixed with a segment like "intl-de"
    let segment = url
        .path_segments()?
        .find(|segment| !segment.is_empty() && !segment.starts_with("intl-"))?;

    match segment {
        "episode" | "show" => Some(ItemKind::Podcast),
        "track" | "album" | "playlist" | "artist" => Some(ItemKind::Music),
        _ => None,
    }
}
