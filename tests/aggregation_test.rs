// Properties of the fold over realistic report tables.

use ga_page_view::aggregate::RawViewTable;
use ga_page_view::{canonicalize, parent_path, summarize_totals};

fn tables() -> Vec<RawViewTable> {
    vec![
        RawViewTable::new(),
        [("/bar?fbclid=z", 7u64)].into_iter().collect(),
        [
            ("/foo.html", 100u64),
            ("/foo?fbclid=x", 5),
            ("/foo.html?fbclid=y", 3),
        ]
        .into_iter()
        .collect(),
        [
            ("/", 900u64),
            ("/index.html", 40),
            ("/index", 2),
            ("/posts/rust-async.html", 310),
            ("/posts/rust-async", 12),
            ("/posts/rust-async?fbclid=IwAR0abc", 31),
            ("/posts/rust-async.html?fbclid=IwAR0def", 8),
            ("/posts/rust-async?utm_source=feed", 4),
            ("/tags/rust.html", 0),
            ("/tags/rust", 6),
            ("/drafts/unpublished?fbclid=q", 1),
        ]
        .into_iter()
        .collect(),
    ]
}

#[test]
fn test_conservation_counts_each_folded_entry_twice() {
    for raw in tables() {
        let folded: u64 = raw
            .iter()
            .filter(|(path, _)| raw.get(&parent_path(path)).is_some())
            .map(|(_, count)| count)
            .sum();
        let out = canonicalize(&raw);
        assert_eq!(out.total(), summarize_totals(&raw) + folded);
    }
}

#[test]
fn test_key_set_is_preserved() {
    for raw in tables() {
        let out = canonicalize(&raw);
        assert_eq!(out.len(), raw.len());
        for (path, count) in raw.iter() {
            let published = out.get(path).expect("input key missing from output");
            assert!(published >= count);
        }
    }
}

#[test]
fn test_totals_ignore_folding() {
    let tables = tables();
    let raw = &tables[3];
    assert_eq!(summarize_totals(raw), 1314);
    let _ = canonicalize(raw);
    assert_eq!(summarize_totals(raw), 1314);
}

#[test]
fn test_blog_table_folds() {
    let tables = tables();
    let raw = &tables[3];
    let out = canonicalize(raw);

    // 310 + 12 + 31 + 8; the utm variant keeps its query and has no parent.
    assert_eq!(out.get("/posts/rust-async.html"), Some(361));
    assert_eq!(out.get("/posts/rust-async?utm_source=feed"), Some(4));
    assert_eq!(out.get("/index.html"), Some(42));
    assert_eq!(out.get("/tags/rust.html"), Some(6));
    // "/" would need "/.html".
    assert_eq!(out.get("/"), Some(900));
    assert_eq!(out.get("/drafts/unpublished?fbclid=q"), Some(1));
}
