use chrono::{TimeZone, Utc};
use marketwire::feeds::normalize::{DATE_STRATEGIES, IMAGE_STRATEGIES, parse_datetime};
use marketwire::feeds::{EntryLink, MediaItem, RawEntry, TimeStruct, normalize_entry};

fn entry() -> RawEntry {
    RawEntry {
        title: Some("Headline".into()),
        link: Some("https://news.example/x".into()),
        ..RawEntry::default()
    }
}

#[test]
fn rfc2822_gmt_without_media_has_date_and_no_image() {
    let raw = RawEntry {
        published: Some("Mon, 01 Jan 2024 10:00:00 GMT".into()),
        ..entry()
    };
    let a = normalize_entry(&raw, "WSJ");
    assert_eq!(a.published, Some(Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap()));
    assert_eq!(a.image, None);
    assert_eq!(a.source, "WSJ");
    assert_eq!(a.title, "Headline");
    assert_eq!(a.link, "https://news.example/x");
}

#[test]
fn missing_title_and_link_get_defaults() {
    let a = normalize_entry(&RawEntry::default(), "FT");
    assert_eq!(a.title, "Untitled");
    assert_eq!(a.link, "");
    assert_eq!(a.published, None, "no date means absent, not now");
    assert_eq!(a.summary, None);
}

#[test]
fn summary_is_carried_verbatim() {
    let raw = RawEntry {
        summary: Some("<p>Markets <b>up</b></p>".into()),
        ..entry()
    };
    assert_eq!(normalize_entry(&raw, "FT").summary.as_deref(), Some("<p>Markets <b>up</b></p>"));
}

#[test]
fn date_fields_fall_through_in_priority_order() {
    let raw = RawEntry {
        published: Some("not a date".into()),
        updated: Some("2024-02-03T04:05:06Z".into()),
        created: Some("2020-01-01T00:00:00Z".into()),
        ..entry()
    };
    assert_eq!(
        normalize_entry(&raw, "x").published,
        Some(Utc.with_ymd_and_hms(2024, 2, 3, 4, 5, 6).unwrap())
    );

    let raw = RawEntry {
        created: Some("2020-01-01T00:00:00Z".into()),
        ..entry()
    };
    assert_eq!(
        normalize_entry(&raw, "x").published,
        Some(Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap())
    );
}

#[test]
fn parsed_structs_are_the_last_resort_and_read_as_utc() {
    let raw = RawEntry {
        published: Some("sometime".into()),
        updated_parsed: Some(TimeStruct { year: 2023, month: 7, day: 4, hour: 9, minute: 15, second: 0 }),
        ..entry()
    };
    assert_eq!(
        normalize_entry(&raw, "x").published,
        Some(Utc.with_ymd_and_hms(2023, 7, 4, 9, 15, 0).unwrap())
    );

    let impossible = RawEntry {
        published_parsed: Some(TimeStruct { year: 2023, month: 2, day: 30, hour: 0, minute: 0, second: 0 }),
        ..entry()
    };
    assert_eq!(normalize_entry(&impossible, "x").published, None);
}

#[test]
fn strategy_lists_are_ordered() {
    let dates: Vec<&str> = DATE_STRATEGIES.iter().map(|(n, _)| *n).collect();
    assert_eq!(dates, ["published", "updated", "created", "published_parsed", "updated_parsed"]);
    let images: Vec<&str> = IMAGE_STRATEGIES.iter().map(|(n, _)| *n).collect();
    assert_eq!(images, ["media_content", "media_thumbnail", "links"]);
}

#[test]
fn permissive_parser_accepts_common_layouts() {
    let ten = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
    assert_eq!(parse_datetime("Mon, 01 Jan 2024 10:00:00 +0000"), Some(ten));
    assert_eq!(parse_datetime("Mon, 01 Jan 2024 12:00:00 +0200"), Some(ten));
    assert_eq!(parse_datetime("2024-01-01T10:00:00Z"), Some(ten));
    assert_eq!(parse_datetime("2024-01-01T05:00:00-05:00"), Some(ten));
    assert_eq!(parse_datetime("2024-01-01 10:00:00"), Some(ten), "naive is UTC");
    assert_eq!(parse_datetime("01 Jan 2024 10:00:00 GMT"), Some(ten));
    // Wrong weekday still parses once the weekday is ignored.
    assert_eq!(parse_datetime("Fri, 01 Jan 2024 10:00:00 GMT"), Some(ten));
    assert_eq!(
        parse_datetime("2024-01-01"),
        Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
    );
    assert_eq!(parse_datetime(""), None);
    assert_eq!(parse_datetime("next tuesday"), None);
}

#[test]
fn image_prefers_media_content_then_thumbnail_then_links() {
    let all = RawEntry {
        media_content: vec![MediaItem { url: Some("https://img.example/content.jpg".into()), href: None }],
        media_thumbnail: vec![MediaItem { url: Some("https://img.example/thumb.jpg".into()), href: None }],
        links: vec![EntryLink {
            href: Some("https://img.example/link.png".into()),
            rel: Some("enclosure".into()),
            kind: Some("image/png".into()),
        }],
        ..entry()
    };
    assert_eq!(normalize_entry(&all, "x").image.as_deref(), Some("https://img.example/content.jpg"));

    let href_only = RawEntry {
        media_content: vec![MediaItem { url: None, href: Some("https://img.example/href.jpg".into()) }],
        ..entry()
    };
    assert_eq!(normalize_entry(&href_only, "x").image.as_deref(), Some("https://img.example/href.jpg"));

    let thumb = RawEntry {
        media_content: vec![MediaItem::default()],
        media_thumbnail: vec![MediaItem { url: Some("https://img.example/thumb.jpg".into()), href: None }],
        ..entry()
    };
    assert_eq!(normalize_entry(&thumb, "x").image.as_deref(), Some("https://img.example/thumb.jpg"));

    let links = RawEntry {
        links: vec![
            EntryLink {
                href: Some("https://news.example/page".into()),
                rel: Some("alternate".into()),
                kind: Some("text/html".into()),
            },
            EntryLink {
                href: Some("https://img.example/link.png".into()),
                rel: Some("enclosure".into()),
                kind: Some("image/png".into()),
            },
        ],
        ..entry()
    };
    assert_eq!(normalize_entry(&links, "x").image.as_deref(), Some("https://img.example/link.png"));

    let audio = RawEntry {
        links: vec![EntryLink {
            href: Some("https://cdn.example/a.mp3".into()),
            rel: Some("enclosure".into()),
            kind: Some("audio/mpeg".into()),
        }],
        ..entry()
    };
    assert_eq!(normalize_entry(&audio, "x").image, None);
}
