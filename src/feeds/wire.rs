//! RSS 2.0 / RSS 1.0 (RDF) / Atom documents into loosely-typed entries.
//!
//! Field names follow the common feed-parser vocabulary (`published`, `updated`,
//! `media_content`, ...) so the normalizer does not care which dialect an entry
//! came from.

use encoding_rs::{Encoding, UTF_8};
use roxmltree::{Document, Node, ParsingOptions};

use crate::core::MwError;

const MEDIA_NS: &str = "http://search.yahoo.com/mrss/";
const DC_NS: &str = "http://purl.org/dc/elements/1.1/";

/// One `<media:content>` / `<media:thumbnail>` item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaItem {
    pub url: Option<String>,
    pub href: Option<String>,
}

/// One link attached to an entry (Atom `<link>`, RSS `<enclosure>`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryLink {
    pub href: Option<String>,
    pub rel: Option<String>,
    pub kind: Option<String>,
}

/// A broken-down calendar time with no zone, as scanned from a raw date string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeStruct {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

const MONTHS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

impl TimeStruct {
    /// Lenient scan of the numeric fields of a date string.
    ///
    /// Understands year-first layouts (`2024-01-05 10:00`, `2024/1/5T10:00:00`) and
    /// layouts that spell the month (`5 January 2024 10:00`, `Jan 5, 2024`). The
    /// zone designator, if any, is ignored.
    pub fn scan(raw: &str) -> Option<Self> {
        let tokens = tokenize(raw);
        let numbers: Vec<(u32, usize)> = tokens
            .iter()
            .filter_map(|t| t.parse::<u32>().ok().map(|n| (n, t.len())))
            .collect();
        let month_name = tokens.iter().find_map(|t| {
            let lower = t.to_ascii_lowercase();
            if lower.len() < 3 {
                return None;
            }
            MONTHS
                .iter()
                .position(|m| lower.starts_with(m))
                .and_then(|m| u32::try_from(m + 1).ok())
        });
        let year_pos = numbers.iter().position(|&(_, len)| len == 4)?;
        let year = i32::try_from(numbers[year_pos].0).ok()?;

        let (month, day, time): (u32, u32, Vec<u32>) = match month_name {
            Some(month) => {
                let day_pos = numbers
                    .iter()
                    .position(|&(n, len)| len <= 2 && (1..=31).contains(&n))?;
                let time = numbers
                    .iter()
                    .enumerate()
                    .filter(|&(p, _)| p > year_pos && p != day_pos)
                    .map(|(_, &(n, _))| n)
                    .collect();
                (month, numbers[day_pos].0, time)
            }
            None => {
                if year_pos != 0 || numbers.len() < 3 {
                    return None;
                }
                let time = numbers[3..].iter().map(|&(n, _)| n).collect();
                (numbers[1].0, numbers[2].0, time)
            }
        };

        let field = |i: usize| time.get(i).copied().unwrap_or(0);
        let ts = Self {
            year,
            month,
            day,
            hour: field(0),
            minute: field(1),
            second: field(2),
        };
        let in_range = (1..=12).contains(&ts.month)
            && (1..=31).contains(&ts.day)
            && ts.hour < 24
            && ts.minute < 60
            && ts.second <= 60;
        in_range.then_some(ts)
    }
}

/// Splits into runs of digits and runs of letters; everything else separates.
fn tokenize(raw: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut digits = false;
    for c in raw.chars() {
        let is_digit = c.is_ascii_digit();
        if c.is_ascii_alphanumeric() {
            if !current.is_empty() && digits != is_digit {
                tokens.push(std::mem::take(&mut current));
            }
            digits = is_digit;
            current.push(c);
        } else if !current.is_empty() {
            tokens.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

/// One feed entry with every field optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawEntry {
    pub title: Option<String>,
    pub link: Option<String>,
    pub summary: Option<String>,
    pub published: Option<String>,
    pub updated: Option<String>,
    pub created: Option<String>,
    pub published_parsed: Option<TimeStruct>,
    pub updated_parsed: Option<TimeStruct>,
    pub media_content: Vec<MediaItem>,
    pub media_thumbnail: Vec<MediaItem>,
    pub links: Vec<EntryLink>,
}

/// Parses a feed document into its entries, in document order.
///
/// The bytes are decoded by their BOM or the `encoding` in the XML declaration
/// (UTF-8 otherwise). A document rejected only for HTML named entities such as
/// `&nbsp;` is parsed again with those rewritten as character references.
///
/// # Errors
///
/// Returns `MwError::Feed` if the document is not well-formed XML.
pub fn parse_feed(bytes: &[u8]) -> Result<Vec<RawEntry>, MwError> {
    let encoding = declared_encoding(bytes).unwrap_or(UTF_8);
    let (text, _, _) = encoding.decode(bytes);

    match parse_entries(&text) {
        Ok(entries) => Ok(entries),
        Err(first) => match replace_html_entities(&text) {
            Some(patched) => {
                parse_entries(&patched).map_err(|_| MwError::Feed(first.to_string()))
            }
            None => Err(MwError::Feed(first.to_string())),
        },
    }
}

fn parse_entries(text: &str) -> Result<Vec<RawEntry>, roxmltree::Error> {
    let mut opts = ParsingOptions::default();
    opts.allow_dtd = true;
    let doc = Document::parse_with_options(text, opts)?;

    Ok(doc
        .descendants()
        .filter(|n| n.is_element() && matches!(n.tag_name().name(), "item" | "entry"))
        .map(read_entry)
        .collect())
}

/// The encoding named by `<?xml ... encoding="..."?>`, if the document starts with one.
fn declared_encoding(bytes: &[u8]) -> Option<&'static Encoding> {
    let head = &bytes[..bytes.len().min(256)];
    let head = std::str::from_utf8(head)
        .or_else(|e| std::str::from_utf8(&head[..e.valid_up_to()]))
        .ok()?;
    let decl = &head[head.find("<?xml")?..];
    let decl = &decl[..decl.find("?>")?];
    let rest = &decl[decl.find("encoding")? + "encoding".len()..];
    let rest = rest.trim_start().strip_prefix('=')?.trim_start();
    let quote = rest.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    let label = &rest[1..];
    let label = &label[..label.find(quote)?];
    Encoding::for_label(label.trim().as_bytes())
}

// HTML named entities seen in the wild that XML does not predefine.
const HTML_ENTITIES: &[(&str, u32)] = &[
    ("nbsp", 160),
    ("iexcl", 161),
    ("cent", 162),
    ("pound", 163),
    ("yen", 165),
    ("sect", 167),
    ("copy", 169),
    ("laquo", 171),
    ("reg", 174),
    ("deg", 176),
    ("middot", 183),
    ("raquo", 187),
    ("frac12", 189),
    ("times", 215),
    ("agrave", 224),
    ("aacute", 225),
    ("auml", 228),
    ("ccedil", 231),
    ("egrave", 232),
    ("eacute", 233),
    ("iacute", 237),
    ("ntilde", 241),
    ("oacute", 243),
    ("ouml", 246),
    ("uuml", 252),
    ("szlig", 223),
    ("ndash", 8211),
    ("mdash", 8212),
    ("lsquo", 8216),
    ("rsquo", 8217),
    ("sbquo", 8218),
    ("ldquo", 8220),
    ("rdquo", 8221),
    ("bdquo", 8222),
    ("dagger", 8224),
    ("bull", 8226),
    ("hellip", 8230),
    ("prime", 8242),
    ("euro", 8364),
    ("trade", 8482),
];

/// Rewrites known HTML entities as numeric references. `None` when nothing changed.
fn replace_html_entities(text: &str) -> Option<String> {
    let mut out = String::with_capacity(text.len());
    let mut changed = false;
    let mut rest = text;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];
        let code = after
            .find(';')
            .filter(|&end| end <= 8)
            .and_then(|end| {
                let name = &after[..end];
                HTML_ENTITIES
                    .iter()
                    .find(|(n, _)| *n == name)
                    .map(|&(_, code)| (end, code))
            });
        match code {
            Some((end, code)) => {
                out.push_str(&format!("&#{code};"));
                rest = &after[end + 1..];
                changed = true;
            }
            None => {
                out.push('&');
                rest = after;
            }
        }
    }
    out.push_str(rest);

    changed.then_some(out)
}

fn read_entry(node: Node<'_, '_>) -> RawEntry {
    let mut entry = RawEntry::default();
    let mut guid_link: Option<String> = None;

    for child in node.children().filter(Node::is_element) {
        let ns = child.tag_name().namespace();
        let name = child.tag_name().name();

        if ns == Some(MEDIA_NS) {
            read_media(child, &mut entry);
            continue;
        }

        match name {
            "title" => set_once(&mut entry.title, text_of(child)),
            "link" => match child.attribute("href") {
                Some(href) => {
                    let rel = child.attribute("rel").unwrap_or("alternate");
                    if rel == "alternate" && entry.link.is_none() {
                        entry.link = Some(href.trim().to_string());
                    }
                    entry.links.push(EntryLink {
                        href: Some(href.trim().to_string()),
                        rel: Some(rel.to_string()),
                        kind: child.attribute("type").map(str::to_string),
                    });
                }
                None => set_once(&mut entry.link, text_of(child)),
            },
            "description" | "summary" => set_once(&mut entry.summary, text_of(child)),
            "pubDate" | "published" | "issued" => set_once(&mut entry.published, text_of(child)),
            "date" if ns == Some(DC_NS) => set_once(&mut entry.updated, text_of(child)),
            "updated" | "modified" => set_once(&mut entry.updated, text_of(child)),
            "created" => set_once(&mut entry.created, text_of(child)),
            "enclosure" => entry.links.push(EntryLink {
                href: child.attribute("url").map(str::to_string),
                rel: Some("enclosure".to_string()),
                kind: child.attribute("type").map(str::to_string),
            }),
            "guid" | "id" if child.attribute("isPermaLink") != Some("false") => {
                guid_link = text_of(child).filter(|g| g.starts_with("http"));
            }
            _ => {}
        }
    }

    if entry.link.is_none() {
        entry.link = guid_link;
    }
    entry.published_parsed = entry.published.as_deref().and_then(TimeStruct::scan);
    entry.updated_parsed = entry.updated.as_deref().and_then(TimeStruct::scan);
    entry
}

fn read_media(node: Node<'_, '_>, entry: &mut RawEntry) {
    let item = || MediaItem {
        url: node.attribute("url").map(str::to_string),
        href: node.attribute("href").map(str::to_string),
    };
    match node.tag_name().name() {
        "content" => entry.media_content.push(item()),
        "thumbnail" => entry.media_thumbnail.push(item()),
        "group" => {
            for child in node.children().filter(Node::is_element) {
                if child.tag_name().namespace() == Some(MEDIA_NS) {
                    read_media(child, entry);
                }
            }
        }
        _ => {}
    }
}

/// All descendant text (CDATA included), trimmed; `None` when blank.
fn text_of(node: Node<'_, '_>) -> Option<String> {
    let text: String = node
        .descendants()
        .filter(Node::is_text)
        .filter_map(|n| n.text())
        .collect();
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn set_once(slot: &mut Option<String>, value: Option<String>) {
    if slot.is_none() {
        *slot = value;
    }
}
