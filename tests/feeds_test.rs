//! Feed client tests against a local mock server.

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use planner_core::FeedError;
use planner_core::feeds::{HotPostsClient, RssClient};

// =============================================================================
// Hot posts
// =============================================================================

#[tokio::test]
async fn hot_listing_is_fetched_with_fixed_page_size_and_pinned_filtered() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/r/GriefSupport/hot.json"))
        .and(query_param("limit", "9"))
        .and(query_param("raw_json", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"children": [
                {"data": {"title": "Pinned: read the rules", "score": 1,
                          "num_comments": 0, "created_utc": 1.6e9,
                          "permalink": "/r/GriefSupport/comments/rules/",
                          "stickied": true}},
                {"data": {"title": "One year today", "score": 321,
                          "num_comments": 57, "created_utc": 1.714e9,
                          "permalink": "/r/GriefSupport/comments/abc/one_year/",
                          "link_flair_text": "Anniversary"}}
            ]}
        })))
        .mount(&server)
        .await;

    let client = HotPostsClient::with_base_url(server.uri());
    let posts = client.hot("GriefSupport").await.unwrap();

    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].title, "One year today");
    assert_eq!(posts[0].score, 321);
    assert_eq!(posts[0].link_flair_text.as_deref(), Some("Anniversary"));
}

#[tokio::test]
async fn hot_listing_http_error_surfaces_as_upstream() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/r/GriefSupport/hot.json"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let client = HotPostsClient::with_base_url(server.uri());
    let err = client.hot("GriefSupport").await.unwrap_err();
    assert!(matches!(err, FeedError::Upstream(_)));
}

// =============================================================================
// RSS aggregator
// =============================================================================

#[tokio::test]
async fn rss_items_come_back_for_an_ok_feed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("rss_url", "https://whatsyourgrief.com/feed/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ok",
            "items": [
                {"title": "Grief and the body", "link": "https://example.com/a",
                 "pubDate": "2024-04-30 12:00:00", "description": "…"},
                {"title": "On rituals", "link": "https://example.com/b"}
            ]
        })))
        .mount(&server)
        .await;

    let client = RssClient::with_base_url(server.uri());
    let items = client
        .latest("https://whatsyourgrief.com/feed/")
        .await
        .unwrap();

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].title, "Grief and the body");
    assert!(items[1].pub_date.is_none());
}

#[tokio::test]
async fn rss_error_status_surfaces_as_upstream() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"status": "feed_not_found"})),
        )
        .mount(&server)
        .await;

    let client = RssClient::with_base_url(server.uri());
    let err = client.latest("https://nope.example/feed").await.unwrap_err();
    match err {
        FeedError::Upstream(status) => assert_eq!(status, "feed_not_found"),
        other => panic!("unexpected error: {other:?}"),
    }
}
