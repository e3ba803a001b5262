//! Best-effort conversion of a [`RawEntry`] into an [`Article`].
//!
//! Dates and images come from ordered strategy lists; the first strategy that yields
//! a value wins. Nothing here fails: a field that cannot be recovered is `None`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use super::model::{Article, UNTITLED};
use super::wire::{MediaItem, RawEntry, TimeStruct};

/// Extracts one candidate value from an entry.
pub type Strategy<T> = fn(&RawEntry) -> Option<T>;

/// Publication date strategies, in priority order.
pub const DATE_STRATEGIES: &[(&str, Strategy<DateTime<Utc>>)] = &[
    ("published", date_from_published),
    ("updated", date_from_updated),
    ("created", date_from_created),
    ("published_parsed", date_from_published_parsed),
    ("updated_parsed", date_from_updated_parsed),
];

/// Image strategies, in priority order.
pub const IMAGE_STRATEGIES: &[(&str, Strategy<String>)] = &[
    ("media_content", image_from_media_content),
    ("media_thumbnail", image_from_media_thumbnail),
    ("links", image_from_links),
];

/// Normalizes one feed entry for `source`.
pub fn normalize_entry(entry: &RawEntry, source: &str) -> Article {
    Article {
        title: entry.title.clone().unwrap_or_else(|| UNTITLED.to_string()),
        link: entry.link.clone().unwrap_or_default(),
        source: source.to_string(),
        published: first_match(DATE_STRATEGIES, entry),
        summary: entry.summary.clone(),
        image: first_match(IMAGE_STRATEGIES, entry),
    }
}

/// Runs `strategies` in order and returns the first hit.
pub fn first_match<T>(strategies: &[(&str, Strategy<T>)], entry: &RawEntry) -> Option<T> {
    strategies.iter().find_map(|(_, s)| s(entry))
}

/* ---------------- dates ---------------- */

// Layouts that carry their own offset.
const OFFSET_LAYOUTS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S %z",
    "%d %b %Y %H:%M:%S %z",
    "%d %b %Y %H:%M %z",
    "%d %B %Y %H:%M:%S %z",
];

// Layouts without an offset; the value is taken as UTC.
const NAIVE_LAYOUTS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%d %b %Y %H:%M:%S",
    "%d %b %Y %H:%M",
    "%d %B %Y %H:%M:%S",
    "%b %d, %Y %H:%M:%S",
    "%B %d, %Y %H:%M:%S",
];

const DATE_ONLY_LAYOUTS: &[&str] = &["%Y-%m-%d", "%d %b %Y", "%d %B %Y", "%b %d, %Y", "%B %d, %Y"];

// Zone names with a fixed meaning of UTC; stripped before naive parsing.
const UTC_SUFFIXES: &[&str] = &[" GMT", " UTC", " UT", "Z", " Z"];

/// Permissive date-time parser. Naive results are assumed to be UTC.
///
/// Tries RFC 2822 (RSS), RFC 3339 (Atom), then a handful of layouts seen in the
/// wild, with and without a leading weekday.
pub fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    let without_weekday = strip_weekday(raw);
    [raw, without_weekday]
        .into_iter()
        .find_map(parse_with_layouts)
}

fn parse_with_layouts(s: &str) -> Option<DateTime<Utc>> {
    for layout in OFFSET_LAYOUTS {
        if let Ok(dt) = DateTime::parse_from_str(s, layout) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    let naive = UTC_SUFFIXES
        .iter()
        .find_map(|suffix| s.strip_suffix(suffix))
        .unwrap_or(s)
        .trim();
    for layout in NAIVE_LAYOUTS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(naive, layout) {
            return Some(dt.and_utc());
        }
    }
    for layout in DATE_ONLY_LAYOUTS {
        if let Ok(d) = NaiveDate::parse_from_str(naive, layout) {
            return d.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
        }
    }
    None
}

/// `"Mon, 01 Jan 2024 ..."` -> `"01 Jan 2024 ..."`.
fn strip_weekday(s: &str) -> &str {
    match s.split_once(',') {
        Some((head, tail)) if head.chars().all(|c| c.is_ascii_alphabetic()) => tail.trim_start(),
        _ => s,
    }
}

/// A scanned time struct read as UTC.
pub fn datetime_from_struct(ts: TimeStruct) -> Option<DateTime<Utc>> {
    NaiveDate::from_ymd_opt(ts.year, ts.month, ts.day)?
        .and_hms_opt(ts.hour, ts.minute, ts.second)
        .map(|dt| dt.and_utc())
}

fn date_from_published(e: &RawEntry) -> Option<DateTime<Utc>> {
    e.published.as_deref().and_then(parse_datetime)
}

fn date_from_updated(e: &RawEntry) -> Option<DateTime<Utc>> {
    e.updated.as_deref().and_then(parse_datetime)
}

fn date_from_created(e: &RawEntry) -> Option<DateTime<Utc>> {
    e.created.as_deref().and_then(parse_datetime)
}

fn date_from_published_parsed(e: &RawEntry) -> Option<DateTime<Utc>> {
    e.published_parsed.and_then(datetime_from_struct)
}

fn date_from_updated_parsed(e: &RawEntry) -> Option<DateTime<Utc>> {
    e.updated_parsed.and_then(datetime_from_struct)
}

/* ---------------- images ---------------- */

fn first_media_url(items: &[MediaItem]) -> Option<String> {
    let first = items.first()?;
    first
        .url
        .as_deref()
        .or(first.href.as_deref())
        .filter(|u| !u.is_empty())
        .map(str::to_string)
}

fn image_from_media_content(e: &RawEntry) -> Option<String> {
    first_media_url(&e.media_content)
}

fn image_from_media_thumbnail(e: &RawEntry) -> Option<String> {
    first_media_url(&e.media_thumbnail)
}

fn image_from_links(e: &RawEntry) -> Option<String> {
    e.links
        .iter()
        .find(|l| l.kind.as_deref().is_some_and(|t| t.starts_with("image/")))
        .and_then(|l| l.href.clone())
}
