//! Integration tests for `FeedClient`, `NewsApiClient` and the refresh
//! pipeline using wiremock HTTP mocks.

use std::time::Duration;

use newsgenie_core::{Category, SourceConfig, SourceRegistry};
use newsgenie_pipeline::{Categorizer, CorpusCache, FeedClient, FeedLimits, NewsApiClient, Pipeline};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const RSS_BODY: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Test Wire</title>
    <link>https://wire.test</link>
    <description>Test feed</description>
    <item>
      <title>Football final ends in great victory</title>
      <link>https://wire.test/sport/final</link>
      <description>&lt;p&gt;The team lifted the trophy.&lt;/p&gt;</description>
      <pubDate>Tue, 04 Mar 2025 09:00:00 GMT</pubDate>
    </item>
    <item>
      <title>Parliament passes election reform</title>
      <link>https://wire.test/politics/reform</link>
      <description>Lawmakers voted late on Monday.</description>
      <pubDate>Tue, 04 Mar 2025 10:00:00 GMT</pubDate>
    </item>
  </channel>
</rss>"#;

fn source(id: &str, url: String, category: Option<Category>) -> SourceConfig {
    SourceConfig {
        id: id.to_string(),
        name: format!("{id} name"),
        url,
        category,
    }
}

fn feed_client(sources: Vec<SourceConfig>) -> FeedClient {
    FeedClient::new(
        SourceRegistry { sources },
        5,
        "newsgenie-test",
        FeedLimits::default(),
    )
    .expect("client construction should not fail")
}

fn news_api(base_url: &str) -> NewsApiClient {
    NewsApiClient::new("test-key", base_url, 5, "newsgenie-test")
        .expect("client construction should not fail")
}

async fn mount_rss(server: &MockServer, route: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/rss+xml")
                .set_body_string(RSS_BODY),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn failing_source_does_not_affect_others() {
    let server = MockServer::start().await;
    mount_rss(&server, "/good.xml").await;
    Mock::given(method("GET"))
        .and(path("/down.xml"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/garbage.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string("definitely not a feed"))
        .mount(&server)
        .await;

    let client = feed_client(vec![
        source("down", format!("{}/down.xml", server.uri()), None),
        source("good", format!("{}/good.xml", server.uri()), None),
        source("garbage", format!("{}/garbage.xml", server.uri()), None),
    ]);

    let articles = client.fetch_all(None).await;
    assert_eq!(articles.len(), 2);
    assert!(articles.iter().all(|a| a.source() == "good name"));
}

#[tokio::test]
async fn fetch_feed_reports_status_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing.xml"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = feed_client(Vec::new());
    let err = client
        .fetch_feed(&source("missing", format!("{}/missing.xml", server.uri()), None))
        .await
        .expect_err("404 should be an error");
    assert!(err.to_string().contains("404"), "got: {err}");
}

#[tokio::test]
async fn all_sources_failing_yields_empty_batch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = feed_client(vec![
        source("a", format!("{}/a.xml", server.uri()), None),
        source("b", format!("{}/b.xml", server.uri()), None),
    ]);
    assert!(client.fetch_all(None).await.is_empty());
}

#[tokio::test]
async fn category_filter_skips_other_hinted_sources() {
    let server = MockServer::start().await;
    mount_rss(&server, "/sport.xml").await;
    Mock::given(method("GET"))
        .and(path("/tech.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(RSS_BODY))
        .expect(0)
        .mount(&server)
        .await;

    let client = feed_client(vec![
        source("sport", format!("{}/sport.xml", server.uri()), Some(Category::Sports)),
        source("tech", format!("{}/tech.xml", server.uri()), Some(Category::Technology)),
    ]);

    let articles = client.fetch_all(Some(Category::Sports)).await;
    assert_eq!(articles.len(), 2);
    assert!(articles
        .iter()
        .all(|a| a.category_hint() == Some(Category::Sports)));
}

#[tokio::test]
async fn news_api_sends_key_and_parses_articles() {
    let server = MockServer::start().await;
    let body = serde_json::json!({
        "status": "ok",
        "totalResults": 2,
        "articles": [
            {
                "source": { "id": "bbc-news", "name": "BBC News" },
                "author": "BBC",
                "title": "Scientists celebrate telescope breakthrough",
                "description": "A new image of a distant galaxy.",
                "url": "https://bbc.test/science/1",
                "urlToImage": "https://bbc.test/img.jpg",
                "publishedAt": "2025-03-04T08:00:00Z"
            },
            {
                "source": { "id": null, "name": "Somewhere" },
                "title": "[Removed]",
                "url": "https://removed.test"
            }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/v2/top-headlines"))
        .and(header("X-Api-Key", "test-key"))
        .and(query_param("category", "science"))
        .and(query_param("country", "us"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let articles = news_api(&server.uri())
        .top_headlines(Some(Category::Science), FeedLimits::default())
        .await;

    assert_eq!(articles.len(), 1);
    assert_eq!(articles[0].source(), "BBC News");
    assert_eq!(articles[0].url(), "https://bbc.test/science/1");
    assert_eq!(articles[0].image_url(), Some("https://bbc.test/img.jpg"));
}

#[tokio::test]
async fn news_api_without_category_queries_default_sources() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/top-headlines"))
        .and(query_param(
            "sources",
            "bbc-news,cnn,the-verge,techcrunch,reuters,espn,bbc-sport",
        ))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "status": "ok", "articles": [] })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let articles = news_api(&server.uri())
        .top_headlines(None, FeedLimits::default())
        .await;
    assert!(articles.is_empty());
}

#[tokio::test]
async fn news_api_failures_yield_no_articles() {
    for response in [
        ResponseTemplate::new(401),
        ResponseTemplate::new(429),
        ResponseTemplate::new(500),
        ResponseTemplate::new(200).set_body_string("{not json"),
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "error",
            "code": "apiKeyInvalid",
            "message": "Your API key is invalid."
        })),
    ] {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/top-headlines"))
            .respond_with(response)
            .mount(&server)
            .await;

        let articles = news_api(&server.uri())
            .top_headlines(None, FeedLimits::default())
            .await;
        assert!(articles.is_empty());
    }
}

#[tokio::test]
async fn news_api_timeout_yields_no_articles() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/top-headlines"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    let client = NewsApiClient::new("test-key", &server.uri(), 1, "newsgenie-test")
        .expect("client construction should not fail");
    assert!(client.top_headlines(None, FeedLimits::default()).await.is_empty());
}

#[tokio::test]
async fn pipeline_builds_enriched_deduplicated_corpus() {
    let server = MockServer::start().await;
    mount_rss(&server, "/one.xml").await;
    mount_rss(&server, "/two.xml").await;

    // Both feeds serve the same items, so dedup keeps one copy of each.
    let feeds = feed_client(vec![
        source("one", format!("{}/one.xml", server.uri()), None),
        source("two", format!("{}/two.xml", server.uri()), None),
    ]);
    let pipeline = Pipeline::new(feeds, Categorizer::default(), 100);

    let corpus = pipeline.run(1).await;
    assert_eq!(corpus.len(), 2);
    assert_eq!(corpus.epoch(), 1);

    let articles = corpus.articles();
    assert_eq!(articles[0].title(), "Parliament passes election reform");
    assert_eq!(articles[0].category(), Category::Politics);
    assert_eq!(articles[1].category(), Category::Sports);
    assert_eq!(articles[1].summary(), "The team lifted the trophy.");
    assert!(articles.iter().all(|a| a.is_categorized()));
}

#[tokio::test]
async fn pipeline_caps_corpus_size() {
    let server = MockServer::start().await;
    mount_rss(&server, "/one.xml").await;

    let feeds = feed_client(vec![source("one", format!("{}/one.xml", server.uri()), None)]);
    let corpus = Pipeline::new(feeds, Categorizer::default(), 1).run(1).await;

    assert_eq!(corpus.len(), 1);
    assert_eq!(corpus.articles()[0].title(), "Parliament passes election reform");
}

#[tokio::test]
async fn cache_reuses_corpus_until_invalidated() {
    let server = MockServer::start().await;
    mount_rss(&server, "/one.xml").await;

    let feeds = feed_client(vec![source("one", format!("{}/one.xml", server.uri()), None)]);
    let cache = CorpusCache::new(
        Pipeline::new(feeds, Categorizer::default(), 100),
        Duration::from_secs(600),
    );

    let first = cache.get().await;
    let second = cache.get().await;
    assert_eq!(first.epoch(), 1);
    assert_eq!(second.epoch(), 1);

    cache.invalidate().await;
    let third = cache.get().await;
    assert_eq!(third.epoch(), 2);
    assert_eq!(third.len(), 2);

    let forced = cache.refresh().await;
    assert_eq!(forced.epoch(), 3);
}
