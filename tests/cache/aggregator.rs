use std::time::Duration;

use marketwire::Aggregator;

use crate::common;

#[tokio::test]
async fn articles_are_cached_per_query() {
    let server = common::setup_server();
    let feed = common::mock_feed(&server, "/wsj.xml", &common::rss_feed(&common::numbered_items("wsj", 3)));

    let client = common::client(&server);
    let agg = Aggregator::new(client, common::registry(&server, &[("WSJ", &["/wsj.xml"])]));

    let first = agg.get_articles(None, 30).await;
    let again = agg.get_articles(Some(""), 30).await;
    assert_eq!(first, again);
    feed.assert_calls(1);

    let narrower = agg.get_articles(None, 2).await;
    assert_eq!(narrower.len(), 3, "cap is checked between batches");
    feed.assert_calls(2);

    agg.get_articles(Some("WSJ"), 30).await;
    feed.assert_calls(3);

    agg.clear_caches().await;
    agg.get_articles(None, 30).await;
    feed.assert_calls(4);
}

#[tokio::test]
async fn symbols_are_cached_until_forced() {
    let server = common::setup_server();
    let listing = common::mock_listing(&server, &["MMM", "AOS"]);

    let agg = Aggregator::new(common::client(&server), Default::default());

    assert_eq!(agg.get_sp500_symbols(false).await.unwrap(), ["MMM", "AOS"]);
    agg.get_sp500_symbols(false).await.unwrap();
    listing.assert_calls(1);

    agg.get_sp500_symbols(true).await.unwrap();
    listing.assert_calls(2);
}

#[tokio::test]
async fn expired_prices_reuse_cached_symbols() {
    let server = common::setup_server();
    let listing = common::mock_listing(&server, &["MMM"]);
    let spark = common::mock_spark(&server, "MMM", &common::spark_body(&[("MMM", "[99.999]")]));

    let client = common::client_builder(&server)
        .prices_ttl(Duration::ZERO)
        .build()
        .unwrap();
    let agg = Aggregator::new(client, Default::default());

    let quotes = agg.get_sp500_prices().await.unwrap();
    assert_eq!(quotes.len(), 1);
    assert_eq!(quotes[0].price, 100.0);

    agg.get_sp500_prices().await.unwrap();
    spark.assert_calls(2);
    listing.assert_calls(1);
}

#[tokio::test]
async fn failed_listing_is_not_cached() {
    let server = common::setup_server();
    let mut broken = common::mock_status(&server, "/wiki/constituents", 502);

    let agg = Aggregator::new(common::client(&server), Default::default());
    assert!(agg.get_sp500_symbols(false).await.is_err());
    broken.assert();
    broken.delete();

    let listing = common::mock_listing(&server, &["AOS"]);
    assert_eq!(agg.get_sp500_symbols(false).await.unwrap(), ["AOS"]);
    listing.assert();
}

#[test]
fn sources_list_endpoints_in_registry_order() {
    let agg = Aggregator::default();
    let names: Vec<String> = agg.sources().into_iter().map(|(n, _)| n).collect();
    assert_eq!(names, ["WSJ", "Bloomberg", "Financial Times", "The Economist"]);

    let wsj = &agg.sources()[0].1;
    assert_eq!(wsj.len(), 2);
    assert!(wsj[0].ends_with("RSSWorldNews.xml"));
}
