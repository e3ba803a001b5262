use std::time::Duration;

use marketwire::{Aggregator, DEFAULT_PER_SOURCE, MwClientBuilder, SourceRegistry};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(feature = "tracing-subscriber")]
    marketwire::init_tracing();

    // 1. A client that honors MW_USER_AGENT and gives slow feeds a little more time.
    let client = MwClientBuilder::from_env()
        .feed_timeout(Duration::from_secs(15))
        .build()?;
    let agg = Aggregator::new(client, SourceRegistry::financial_press());

    println!("--- Sources ---");
    for (name, endpoints) in agg.sources() {
        println!("{name}: {} endpoint(s)", endpoints.len());
    }
    println!();

    // 2. Latest headlines across every source.
    println!("--- Headlines ---");
    let articles = agg.get_articles(None, DEFAULT_PER_SOURCE).await;
    for a in articles.iter().take(10) {
        let when = a
            .published
            .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "undated".into());
        println!("[{when}] {} ({})", a.title, a.source);
    }
    println!("{} articles total", articles.len());
    println!();

    // 3. A filtered query is cached under its own key.
    let wsj = agg.get_articles(Some("WSJ"), DEFAULT_PER_SOURCE).await;
    println!("WSJ only: {} articles", wsj.len());
    println!();

    // 4. A price snapshot for the index.
    println!("--- S&P 500 ---");
    match agg.get_sp500_prices().await {
        Ok(quotes) => {
            for q in quotes.iter().take(10) {
                println!("{:<6} ${:.2}", q.symbol, q.price);
            }
            println!("{} quotes", quotes.len());
        }
        Err(e) => eprintln!("price snapshot unavailable: {e}"),
    }

    Ok(())
}
