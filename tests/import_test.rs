use anyhow::Result;
use bookshelf_import::config::ImportConfig;
use bookshelf_import::import::preview_import;
use bookshelf_import::url_resolver::FailureReason;

#[tokio::test]
async fn test_preview_resolves_links() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let base = server.url();
    let _short = server
        .mock("GET", "/s/1")
        .with_status(301)
        .with_header("location", &format!("{}/books/dune", base))
        .create_async()
        .await;
    let _dest = server.mock("GET", "/books/dune").with_status(200).create_async().await;

    let text = format!(
        "Dune: {base}/s/1 \u{2014} my favourite\nBroken link http://127.0.0.1:1/gone\n"
    );
    let config = ImportConfig {
        resolve_all_links: true,
        timeout_ms: 2_000,
        ..ImportConfig::default()
    };

    let preview = preview_import(&text, &config).await?;
    assert_eq!(preview.items.len(), 2);
    assert_eq!(preview.resolved_count, 1);
    assert_eq!(preview.failed_count, 1);
    assert!(preview.warning.is_none());

    let first = &preview.items[0];
    assert_eq!(first.candidate.title.as_deref(), Some("Dune"));
    assert_eq!(first.resolved_url.as_deref(), Some(format!("{}/books/dune", base).as_str()));
    assert_eq!(first.effective_url(), format!("{}/books/dune", base));

    let second = &preview.items[1];
    assert_eq!(second.resolution_error, Some(FailureReason::NetworkError));
    assert_eq!(second.effective_url(), "http://127.0.0.1:1/gone");

    Ok(())
}

#[tokio::test]
async fn test_preview_skips_regular_links_by_default() -> Result<()> {
    let text = "The Hobbit https://openlibrary.org/works/OL262758W";
    let preview = preview_import(text, &ImportConfig::default()).await?;

    assert_eq!(preview.items.len(), 1);
    assert!(preview.items[0].resolved_url.is_none());
    assert!(preview.items[0].resolution_error.is_none());
    assert_eq!(preview.resolved_count + preview.failed_count, 0);
    Ok(())
}

#[tokio::test]
async fn test_preview_caps_items_and_warns() -> Result<()> {
    let text: String = (0..5).map(|i| format!("https://example.com/{}\n", i)).collect();
    let config = ImportConfig {
        max_items: 3,
        ..ImportConfig::default()
    };

    let preview = preview_import(&text, &config).await?;
    assert_eq!(preview.items.len(), 3);
    assert!(preview.warning.unwrap().contains("2 links were dropped"));
    Ok(())
}

#[tokio::test]
async fn test_preview_rejects_oversized_text() {
    let config = ImportConfig {
        max_text_length: 10,
        ..ImportConfig::default()
    };
    let err = preview_import("https://example.com/a-long-link", &config)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("maximum is 10"));
}

#[tokio::test]
async fn test_preview_of_blank_text_is_empty() -> Result<()> {
    let preview = preview_import("  \n ", &ImportConfig::default()).await?;
    assert!(preview.items.is_empty());
    assert!(preview.warning.is_none());
    Ok(())
}

#[tokio::test]
async fn test_preview_serializes_flat_items() -> Result<()> {
    let preview = preview_import("Dune https://openlibrary.org/works/OL1W", &ImportConfig::default()).await?;
    let json = serde_json::to_value(&preview)?;
    assert_eq!(json["items"][0]["url"], "https://openlibrary.org/works/OL1W");
    assert_eq!(json["items"][0]["title"], "Dune");
    assert_eq!(json["items"][0]["kind"], "book");
    assert_eq!(json["items"][0]["position"], 0);
    Ok(())
}
