//! Integration tests for scraping and saving articles
//!
//! These tests use wiremock to serve article pages and run the full
//! fetch, parse and assemble cycle end-to-end against a SQLite file.

use article_scraper::config::HttpConfig;
use article_scraper::convert::{ArticlePageAssembler, ConversionOptions};
use article_scraper::fetch::{build_http_client, fetch_article, scrape};
use article_scraper::storage::{PageStore, SqliteStorage};
use article_scraper::ScraperError;
use reqwest::Client;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates an HTTP client with short timeouts for testing
fn test_client() -> Client {
    let config = HttpConfig {
        user_agent: "ArticleScraperTest/1.0".to_string(),
        timeout_secs: 5,
        connect_timeout_secs: 2,
        max_redirects: 3,
    };
    build_http_client(&config).expect("Failed to build client")
}

fn article_page(title: &str) -> String {
    format!(
        r#"<html>
        <head>
            <title>{title} | Daily News</title>
            <meta property="og:title" content="{title}">
            <meta property="og:description" content="The lead of the story">
            <meta property="og:image" content="/images/lead.jpg">
            <meta name="author" content="Jane Doe">
        </head>
        <body>
            <header><p>Site header</p></header>
            <article>
                <h1>{title}</h1>
                <p>Opening paragraph.</p>
                <h2>Details</h2>
                <blockquote>It works.<cite>Someone Important</cite></blockquote>
                <ul><li>First</li><li>Second</li></ul>
                <iframe src="https://player.example.com/embed/1"></iframe>
            </article>
        </body>
        </html>"#
    )
}

async fn mount_html(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_scrape_returns_page_title() {
    let mock_server = MockServer::start().await;
    mount_html(
        &mock_server,
        "/story",
        "<html><head><title> Breaking News </title></head><body></body></html>".to_string(),
    )
    .await;

    let url = format!("{}/story", mock_server.uri());
    let result = scrape(&test_client(), &url).await.expect("Scrape failed");

    assert_eq!(result.title.as_deref(), Some("Breaking News"));
    assert_eq!(result.url, url);
}

#[tokio::test]
async fn test_scrape_page_without_title() {
    let mock_server = MockServer::start().await;
    mount_html(&mock_server, "/bare", "<html><body>hi</body></html>".to_string()).await;

    let url = format!("{}/bare", mock_server.uri());
    let result = scrape(&test_client(), &url).await.expect("Scrape failed");

    assert_eq!(result.title, None);
}

#[tokio::test]
async fn test_scrape_and_save_persists_page() {
    let mock_server = MockServer::start().await;
    mount_html(&mock_server, "/news/hello", article_page("Hello World")).await;

    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("pages.db");
    let mut storage = SqliteStorage::new(&db_path).expect("Failed to open storage");

    let url = format!("{}/news/hello", mock_server.uri());
    let article = fetch_article(&test_client(), &url)
        .await
        .expect("Failed to fetch article");

    let mut assembler = ArticlePageAssembler::new(&mut storage, ConversionOptions::default());
    let aggregate = assembler
        .assemble(&article, None, true)
        .expect("Failed to assemble page");

    assert_eq!(aggregate.page.title, "Hello World");
    assert_eq!(aggregate.page.slug, "hello-world");
    assert_eq!(aggregate.page.lead, "The lead of the story");
    assert_eq!(
        aggregate.page.main_image_url,
        Some(format!("{}/images/lead.jpg", mock_server.uri()))
    );
    assert_eq!(aggregate.page.language_id, 1);
    assert!(aggregate.page.is_published);

    let kinds: Vec<&str> = aggregate
        .content_elements
        .iter()
        .map(|e| e.element_type.as_str())
        .collect();
    assert_eq!(kinds, vec!["text", "heading", "quote", "list", "code"]);

    let orders: Vec<u32> = aggregate.content_elements.iter().map(|e| e.order).collect();
    assert_eq!(orders, vec![0, 1, 2, 3, 4]);

    assert_eq!(aggregate.content_elements[2].settings["author"], "Someone Important");
    assert_eq!(aggregate.authors.len(), 1);
    assert_eq!(aggregate.authors[0].name, "Jane Doe");

    // The page survives reopening the database
    drop(assembler);
    drop(storage);
    let reopened = SqliteStorage::new(&db_path).expect("Failed to reopen storage");
    assert_eq!(reopened.count_pages().unwrap(), 1);
    assert_eq!(reopened.load_page(aggregate.page.id).unwrap(), aggregate);
}

#[tokio::test]
async fn test_same_title_gets_suffixed_slug() {
    let mock_server = MockServer::start().await;
    mount_html(&mock_server, "/a", article_page("Hello World")).await;
    mount_html(&mock_server, "/b", article_page("Hello World")).await;

    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let mut storage =
        SqliteStorage::new(&temp_dir.path().join("pages.db")).expect("Failed to open storage");
    let client = test_client();

    let mut slugs = Vec::new();
    for route in ["/a", "/b"] {
        let article = fetch_article(&client, &format!("{}{}", mock_server.uri(), route))
            .await
            .expect("Failed to fetch article");
        let mut assembler = ArticlePageAssembler::new(&mut storage, ConversionOptions::default());
        let aggregate = assembler.assemble(&article, None, false).unwrap();
        slugs.push(aggregate.page.slug);
    }

    assert_eq!(slugs, vec!["hello-world", "hello-world-1"]);
    assert_eq!(storage.count_authors().unwrap(), 1);
}

#[tokio::test]
async fn test_page_without_article_is_rejected() {
    let mock_server = MockServer::start().await;
    mount_html(
        &mock_server,
        "/empty",
        "<html><head><title>Nothing here</title></head><body><div>menu</div></body></html>"
            .to_string(),
    )
    .await;

    let url = format!("{}/empty", mock_server.uri());
    let err = fetch_article(&test_client(), &url).await.unwrap_err();

    assert!(matches!(err, ScraperError::NoArticleFound { .. }));
    assert_eq!(err.status_code(), 400);
}

#[tokio::test]
async fn test_http_error_status_is_reported() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let url = format!("{}/missing", mock_server.uri());
    let err = fetch_article(&test_client(), &url).await.unwrap_err();

    match err {
        ScraperError::HttpStatus { status, .. } => assert_eq!(status, 404),
        other => panic!("Expected HttpStatus, got {:?}", other),
    }
}

#[tokio::test]
async fn test_invalid_url_is_rejected_before_fetching() {
    let err = scrape(&test_client(), "not a url").await.unwrap_err();

    assert!(matches!(err, ScraperError::InvalidUrl(_)));
    assert_eq!(err.status_code(), 422);
}
