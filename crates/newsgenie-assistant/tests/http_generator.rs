//! Integration tests for `HttpGenerator` and `Session` using wiremock HTTP mocks.

use std::sync::Arc;
use std::time::Duration;

use newsgenie_assistant::{
    GenerativeAdapter, GeneratorError, HttpGenerator, Router, Session, TextGenerator,
};
use newsgenie_core::{SourceConfig, SourceRegistry};
use newsgenie_pipeline::{Categorizer, CorpusCache, FeedClient, FeedLimits, Pipeline};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const RSS_BODY: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>BBC News</title>
    <link>https://bbc.test</link>
    <description>Test feed</description>
    <item>
      <title>Chancellor unveils budget</title>
      <link>https://bbc.test/politics/budget</link>
      <description>Spending plans were set out in parliament.</description>
      <pubDate>Tue, 04 Mar 2025 09:00:00 GMT</pubDate>
    </item>
  </channel>
</rss>"#;

async fn mount_health(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200))
        .mount(server)
        .await;
}

#[tokio::test]
async fn connect_checks_health_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    HttpGenerator::connect(&server.uri(), 5)
        .await
        .expect("healthy server should connect");
}

#[tokio::test]
async fn connect_fails_when_unhealthy() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = HttpGenerator::connect(&server.uri(), 5)
        .await
        .expect_err("unhealthy server should not connect");
    assert!(matches!(err, GeneratorError::Unavailable { .. }));
}

#[tokio::test]
async fn generate_sends_greedy_request() {
    let server = MockServer::start().await;
    mount_health(&server).await;
    Mock::given(method("POST"))
        .and(path("/generate"))
        .and(body_partial_json(serde_json::json!({
            "inputs": "Say hi",
            "parameters": { "max_new_tokens": 16, "do_sample": false }
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "generated_text": "hi" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let generator = HttpGenerator::connect(&server.uri(), 5).await.unwrap();
    assert_eq!(generator.generate("Say hi", 16).await.unwrap(), "hi");
}

#[tokio::test]
async fn generate_accepts_array_responses() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([{ "generated_text": "first" }])),
        )
        .mount(&server)
        .await;

    let generator = HttpGenerator::new(&server.uri(), 5).unwrap();
    assert_eq!(generator.generate("prompt", 8).await.unwrap(), "first");
}

#[tokio::test]
async fn generate_reports_status_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let generator = HttpGenerator::new(&server.uri(), 5).unwrap();
    let err = generator.generate("prompt", 8).await.unwrap_err();
    assert!(matches!(err, GeneratorError::UnexpectedStatus { status: 500 }));
}

#[tokio::test]
async fn adapter_over_failing_server_yields_none() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let handle: Arc<dyn TextGenerator> = Arc::new(HttpGenerator::new(&server.uri(), 5).unwrap());
    let adapter = GenerativeAdapter::new(Some(handle));
    let corpus = newsgenie_pipeline::Corpus::empty();
    assert_eq!(adapter.generate("anything", &corpus).await, None);
}

#[tokio::test]
async fn adapter_times_out_slow_server() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "generated_text": "late" }))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let handle: Arc<dyn TextGenerator> = Arc::new(HttpGenerator::new(&server.uri(), 30).unwrap());
    let adapter = GenerativeAdapter::new(Some(handle)).with_timeout(Duration::from_millis(200));
    let corpus = newsgenie_pipeline::Corpus::empty();
    assert_eq!(adapter.generate("anything", &corpus).await, None);
}

fn cache_for(server: &MockServer) -> Arc<CorpusCache> {
    let registry = SourceRegistry {
        sources: vec![SourceConfig {
            id: "bbc-news".to_string(),
            name: "BBC News".to_string(),
            url: format!("{}/bbc.xml", server.uri()),
            category: None,
        }],
    };
    let feeds = FeedClient::new(registry, 5, "newsgenie-test", FeedLimits::default()).unwrap();
    let pipeline = Pipeline::new(feeds, Categorizer::default(), 100);
    Arc::new(CorpusCache::new(pipeline, Duration::from_secs(600)))
}

fn session_for(server: &MockServer) -> Session {
    Session::new(cache_for(server), Router::new())
}

#[tokio::test]
async fn session_records_turns_and_refresh_clears_them() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/bbc.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(RSS_BODY))
        .mount(&server)
        .await;

    let mut session = session_for(&server);
    let reply = session.ask("uk news").await;
    assert!(reply.contains("Chancellor unveils budget"), "got: {reply}");
    assert!(!reply.contains("more_"));

    session.ask("hello").await;
    assert_eq!(session.history().len(), 2);
    assert_eq!(session.history()[0].query, "uk news");
    assert_eq!(session.history()[0].corpus_epoch, 1);

    let corpus = session.refresh().await;
    assert!(session.history().is_empty());
    assert_eq!(corpus.epoch(), 2);
}

#[tokio::test]
async fn refresh_does_not_reuse_a_rebuild_already_in_flight() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/bbc.xml"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(RSS_BODY)
                .set_delay(Duration::from_millis(500)),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/bbc.xml"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(RSS_BODY.replace("Chancellor unveils budget", "Budget vote passes")),
        )
        .mount(&server)
        .await;

    let cache = cache_for(&server);
    let mut session = Session::new(Arc::clone(&cache), Router::new());

    let background = tokio::spawn(async move { cache.get().await });
    tokio::time::sleep(Duration::from_millis(100)).await;

    let refreshed = session.refresh().await;
    let first = background.await.unwrap();

    assert_eq!(first.epoch(), 1);
    assert_eq!(refreshed.epoch(), 2);
    assert_eq!(refreshed.articles()[0].title(), "Budget vote passes");
}

#[tokio::test]
async fn session_over_dead_sources_reports_no_data() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut session = session_for(&server);
    assert!(session.corpus().await.is_empty());
    assert_eq!(session.ask("top stories").await, newsgenie_assistant::NO_DATA);
}
