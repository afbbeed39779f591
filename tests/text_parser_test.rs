use bookshelf_import::text_parser::{parse_text_with_context, validate_parse_results, ItemKind};

#[test]
fn test_pasted_newsletter() {
    let text = "\
Here's what I enjoyed this month!

- Piranesi: https://www.goodreads.com/book/show/50202953 (a strange, quiet house)
- Song Exploder https://podcasts.apple.com/us/podcast/song-exploder/id788236947
- Listen to Blue Rev: https://music.apple.com/us/album/blue-rev/1636869152 \u{2014} fuzzy and loud.

Also the short link someone sent me: https://bit.ly/3xYzAbc.
And again the same book https://www.goodreads.com/book/show/50202953!";

    let items = parse_text_with_context(text);
    assert_eq!(items.len(), 4);

    assert_eq!(items[0].url, "https://www.goodreads.com/book/show/50202953");
    assert_eq!(items[0].title.as_deref(), Some("Piranesi"));
    assert_eq!(items[0].description.as_deref(), Some("a strange, quiet house"));
    assert_eq!(items[0].kind, Some(ItemKind::Book));

    assert_eq!(items[1].title.as_deref(), Some("Song Exploder"));
    assert_eq!(items[1].kind, Some(ItemKind::Podcast));

    assert_eq!(items[2].title.as_deref(), Some("Blue Rev"));
    assert_eq!(items[2].description.as_deref(), Some("fuzzy and loud."));
    assert_eq!(items[2].kind, Some(ItemKind::Music));

    assert_eq!(items[3].url, "https://bit.ly/3xYzAbc");
    assert_eq!(items[3].kind, None);

    let positions: Vec<usize> = items.iter().map(|c| c.position).collect();
    assert_eq!(positions, vec![0, 1, 2, 3]);
}

#[test]
fn test_many_links_are_capped() {
    let text: String = (0..60)
        .map(|i| format!("Book {} https://openlibrary.org/works/OL{}W\n", i, i))
        .collect();

    let items = parse_text_with_context(&text);
    assert_eq!(items.len(), 60);

    let validated = validate_parse_results(items, 50);
    assert_eq!(validated.items.len(), 50);
    assert_eq!(validated.items[49].url, "https://openlibrary.org/works/OL49W");
    assert!(validated.warning.unwrap().contains("10 links were dropped"));
}

#[test]
fn test_non_ascii_text_is_safe() {
    let text = "Lecture conseillée \u{2014} «Dune» https://fr.wikipedia.org/wiki/Dune_(roman) \u{2014} très bien 📚";
    let items = parse_text_with_context(text);
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].url, "https://fr.wikipedia.org/wiki/Dune_(roman)");
    assert_eq!(items[0].description.as_deref(), Some("très bien 📚"));
}

#[test]
fn test_cjk_punctuation_ends_links() {
    let items = parse_text_with_context("链接 https://a.com/x。很好\nWow https://b.com/y\u{2026} nice");
    let urls: Vec<&str> = items.iter().map(|c| c.url.as_str()).collect();
    assert_eq!(urls, vec!["https://a.com/x", "https://b.com/y"]);
}

#[test]
fn test_single_page_app_routes_are_distinct() {
    let items = parse_text_with_context("https://app.com/#/book/1 and https://app.com/#/book/2");
    assert_eq!(items.len(), 2);
    assert_eq!(items[1].url, "https://app.com/#/book/2");
}

#[test]
fn test_titles_that_start_like_lead_ins() {
    let text = "Here Comes the Sun https://open.spotify.com/track/1\n\
                Reading Lolita in Tehran https://www.goodreads.com/book/show/7763\n\
                Source: The Guardian https://www.theguardian.com/books/1";
    let items = parse_text_with_context(text);
    let titles: Vec<Option<&str>> = items.iter().map(|c| c.title.as_deref()).collect();
    assert_eq!(
        titles,
        vec![Some("Here Comes the Sun"), Some("Reading Lolita in Tehran"), Some("The Guardian")]
    );
}

#[test]
fn test_markdown_links() {
    let items = parse_text_with_context("- [Dune](https://www.goodreads.com/book/show/1)\n");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].url, "https://www.goodreads.com/book/show/1");
    assert_eq!(items[0].title.as_deref(), Some("Dune"));
}
