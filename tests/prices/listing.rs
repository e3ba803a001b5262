use marketwire::MwError;
use marketwire::prices::parse_symbol_table;

use crate::common;

#[test]
fn symbols_are_normalized_and_keep_listing_order() {
    let html = common::listing_html(&["MMM", "brk.b", "AOS", "BF.B"]);
    let symbols = parse_symbol_table(&html).unwrap();
    assert_eq!(symbols, ["MMM", "BRK-B", "AOS", "BF-B"]);
}

#[test]
fn page_without_a_table_is_unavailable() {
    let err = parse_symbol_table("<html><body><p>maintenance</p></body></html>").unwrap_err();
    assert!(matches!(err, MwError::DataUnavailable(_)), "got {err:?}");
}

#[test]
fn table_without_a_symbol_column_is_unavailable() {
    let html = "<table><tr><th>Security</th><th>Sector</th></tr><tr><td>3M</td><td>Industrials</td></tr></table>";
    let err = parse_symbol_table(html).unwrap_err();
    assert!(matches!(err, MwError::DataUnavailable(_)), "got {err:?}");
}

#[test]
fn first_table_with_a_ticker_column_wins() {
    let html = r#"<html><body>
        <table><tr><th>Date</th><th>Added</th></tr><tr><td>2024-01-01</td><td>XYZ</td></tr></table>
        <table>
          <tr><th>Security</th><th>Ticker</th></tr>
          <tr><td>Apple</td><td> aapl </td></tr>
          <tr><td>Blank</td><td></td></tr>
          <tr><td>Microsoft</td><td>MSFT</td></tr>
        </table>
        <table><tr><th>Symbol</th></tr><tr><td>NOPE</td></tr></table>
    </body></html>"#;
    assert_eq!(parse_symbol_table(html).unwrap(), ["AAPL", "MSFT"]);
}
