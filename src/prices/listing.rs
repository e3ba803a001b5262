//! Reads the ticker column out of the constituents listing page.

use scraper::{ElementRef, Html, Selector};

use crate::core::MwError;
use crate::prices::normalize_symbol;

/// Header texts that identify the ticker column (compared case-insensitively).
const SYMBOL_HEADERS: &[&str] = &["symbol", "ticker", "ticker symbol"];

fn selector(css: &'static str) -> Result<Selector, MwError> {
    Selector::parse(css).map_err(|e| MwError::InvalidParams(format!("selector `{css}`: {e:?}")))
}

/// Extracts normalized symbols, in document order, from the first table whose header
/// row names a ticker column.
///
/// # Errors
///
/// Returns `MwError::DataUnavailable` if the page has no table, or no table with a
/// ticker column.
pub fn parse_symbol_table(html: &str) -> Result<Vec<String>, MwError> {
    let doc = Html::parse_document(html);
    let table_sel = selector("table")?;
    let row_sel = selector("tr")?;
    let header_sel = selector("th")?;
    let cell_sel = selector("th, td")?;

    let mut saw_table = false;
    for table in doc.select(&table_sel) {
        saw_table = true;
        let rows: Vec<ElementRef<'_>> = table.select(&row_sel).collect();

        let Some(header_idx) = rows
            .iter()
            .position(|r| r.select(&header_sel).next().is_some())
        else {
            continue;
        };
        let Some(column) = rows[header_idx]
            .select(&cell_sel)
            .position(|c| is_symbol_header(&cell_text(c)))
        else {
            continue;
        };

        let symbols = rows[header_idx + 1..]
            .iter()
            .filter_map(|r| r.select(&cell_sel).nth(column))
            .map(cell_text)
            .filter(|s| !s.is_empty())
            .map(|s| normalize_symbol(&s))
            .collect();
        return Ok(symbols);
    }

    if saw_table {
        Err(MwError::DataUnavailable(
            "no listing table with a symbol column".into(),
        ))
    } else {
        Err(MwError::DataUnavailable("no table found on listing page".into()))
    }
}

fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text().collect::<String>().trim().to_string()
}

fn is_symbol_header(text: &str) -> bool {
    let lower = text.to_ascii_lowercase();
    SYMBOL_HEADERS.contains(&lower.as_str())
}
