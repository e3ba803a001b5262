use std::time::Duration;

use httpmock::Method::GET;
use marketwire::{ArticlesBuilder, SourceRegistry};

use crate::common;

#[tokio::test]
async fn failing_endpoints_contribute_nothing() {
    let server = common::setup_server();
    let broken = common::mock_status(&server, "/broken.xml", 500);
    let garbage = common::mock_feed(&server, "/garbage.xml", "<rss><channel><item><title>oops</channel>");
    let good = common::mock_feed(&server, "/good.xml", &common::rss_feed(&common::numbered_items("good", 2)));

    let client = common::client(&server);
    let registry = common::registry(
        &server,
        &[("Broken", &["/broken.xml"]), ("Garbage", &["/garbage.xml"]), ("Good", &["/good.xml"])],
    );

    let articles = ArticlesBuilder::new(&client, &registry).fetch().await;

    broken.assert();
    garbage.assert();
    good.assert();
    assert_eq!(articles.len(), 2);
    assert!(articles.iter().all(|a| a.source == "Good"));
}

#[tokio::test]
async fn failed_endpoint_falls_through_to_the_next_one() {
    let server = common::setup_server();
    let broken = common::mock_status(&server, "/world.xml", 503);
    let markets = common::mock_feed(&server, "/markets.xml", &common::rss_feed(&common::numbered_items("markets", 3)));

    let client = common::client(&server);
    let registry = common::registry(&server, &[("WSJ", &["/world.xml", "/markets.xml"])]);

    let articles = ArticlesBuilder::new(&client, &registry).per_source(30).fetch().await;

    broken.assert();
    markets.assert();
    assert_eq!(articles.len(), 3);
}

#[tokio::test]
async fn refused_connection_is_skipped() {
    let server = common::setup_server();
    let good = common::mock_feed(&server, "/good.xml", &common::rss_feed(&common::numbered_items("good", 1)));

    let client = common::client(&server);
    let registry = SourceRegistry::new()
        .with_source("Nowhere", ["http://127.0.0.1:1/feed.xml"])
        .unwrap()
        .with_source("Good", [server.url("/good.xml")])
        .unwrap();

    let articles = ArticlesBuilder::new(&client, &registry).fetch().await;

    good.assert();
    assert_eq!(articles.len(), 1);
    assert_eq!(articles[0].source, "Good");
}

#[tokio::test]
async fn slow_endpoint_times_out_without_blocking_the_rest() {
    let server = common::setup_server();
    let _slow = server.mock(|when, then| {
        when.method(GET).path("/slow.xml");
        then.status(200)
            .delay(Duration::from_secs(2))
            .body(common::rss_feed(&common::numbered_items("slow", 1)));
    });
    let fast = common::mock_feed(&server, "/fast.xml", &common::rss_feed(&common::numbered_items("fast", 1)));

    let client = common::client_builder(&server)
        .feed_timeout(Duration::from_millis(200))
        .build()
        .unwrap();
    let registry = common::registry(&server, &[("Slow", &["/slow.xml"]), ("Fast", &["/fast.xml"])]);

    let articles = ArticlesBuilder::new(&client, &registry).fetch().await;

    fast.assert();
    assert_eq!(articles.len(), 1);
    assert_eq!(articles[0].source, "Fast");
}

#[tokio::test]
async fn empty_registry_yields_nothing() {
    let server = common::setup_server();
    let client = common::client(&server);
    let registry = SourceRegistry::new();

    assert!(ArticlesBuilder::new(&client, &registry).fetch().await.is_empty());
}
