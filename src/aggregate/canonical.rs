//! Folding of URL variants into canonical page slugs.
//!
//! Analytics reports the same article under several paths: with a Facebook
//! click-id appended (`/post.html?fbclid=...`, `/post?fbclid=...`) or without
//! the `.html` extension (`/post`). Their counts are added to the canonical
//! `.html` path when that path was reported too.

use std::collections::BTreeMap;

use super::types::{CanonicalViewTable, RawViewTable};

const FBCLID_MARKER: &str = "?fbclid=";
const HTML_SUFFIX: &str = ".html";

/// Computes the canonical parent of a reported path.
///
/// - `?fbclid=` present: drop everything from the marker on, then add `.html`
///   unless the remainder already ends with it.
/// - otherwise: `path + ".html"`.
///
/// The result never equals `path`.
pub fn parent_path(path: &str) -> String {
    match path.find(FBCLID_MARKER) {
        Some(idx) => {
            let stripped = &path[..idx];
            if stripped.ends_with(HTML_SUFFIX) {
                stripped.to_string()
            } else {
                format!("{}{}", stripped, HTML_SUFFIX)
            }
        }
        None => format!("{}{}", path, HTML_SUFFIX),
    }
}

/// Folds each variant's count into its parent, one level deep.
///
/// The output has exactly the input's keys. Variant entries keep their own
/// count; a parent gains the counts of every input path whose
/// [`parent_path`] names it. Parents are looked up in the input, so a chain
/// `a -> b -> c` adds `a` to `b` and the original `b` to `c`.
pub fn canonicalize(raw: &RawViewTable) -> CanonicalViewTable {
    let mut folded: BTreeMap<String, u64> = raw
        .iter()
        .map(|(path, count)| (path.to_string(), count))
        .collect();

    for (path, count) in raw.iter() {
        let parent = parent_path(path);
        let Some(parent_views) = raw.get(&parent) else {
            continue;
        };
        if let Some(slot) = folded.get_mut(&parent) {
            *slot = slot.saturating_add(count);
            log::trace!(
                "Folded {} views of {} into {} ({} direct)",
                count,
                path,
                parent,
                parent_views
            );
        }
    }

    CanonicalViewTable::from_map(folded)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(entries: &[(&str, u64)]) -> RawViewTable {
        entries.iter().map(|(p, c)| (*p, *c)).collect()
    }

    #[test]
    fn test_parent_strips_fbclid() {
        assert_eq!(parent_path("/foo?fbclid=xyz123"), "/foo.html");
    }

    #[test]
    fn test_parent_strips_fbclid_already_html() {
        assert_eq!(parent_path("/foo.html?fbclid=xyz123"), "/foo.html");
    }

    #[test]
    fn test_parent_plain_suffixing() {
        assert_eq!(parent_path("/foo"), "/foo.html");
    }

    #[test]
    fn test_parent_of_canonical_path_is_double_suffixed() {
        assert_eq!(parent_path("/foo.html"), "/foo.html.html");
    }

    #[test]
    fn test_parent_only_first_marker_counts() {
        assert_eq!(
            parent_path("/foo?fbclid=a?fbclid=b"),
            "/foo.html",
            "everything from the first marker on is dropped"
        );
    }

    #[test]
    fn test_parent_other_query_strings_are_kept() {
        assert_eq!(parent_path("/foo?utm_source=x"), "/foo?utm_source=x.html");
        assert_eq!(parent_path("/foo?a=1&fbclid=x"), "/foo?a=1&fbclid=x.html");
    }

    #[test]
    fn test_parent_is_deterministic() {
        for path in ["/foo", "/foo.html?fbclid=1", "", "?fbclid="] {
            assert_eq!(parent_path(path), parent_path(path));
        }
    }

    #[test]
    fn test_parent_edge_inputs() {
        assert_eq!(parent_path(""), ".html");
        assert_eq!(parent_path("?fbclid="), ".html");
        assert_eq!(parent_path("/"), "/.html");
    }

    #[test]
    fn test_canonicalize_folds_variants() {
        let raw = table(&[
            ("/foo.html", 100),
            ("/foo?fbclid=x", 5),
            ("/foo.html?fbclid=y", 3),
        ]);
        let out = canonicalize(&raw);
        assert_eq!(out.get("/foo.html"), Some(108));
        assert_eq!(out.get("/foo?fbclid=x"), Some(5));
        assert_eq!(out.get("/foo.html?fbclid=y"), Some(3));
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn test_canonicalize_extensionless_variant() {
        let raw = table(&[("/posts/hello.html", 40), ("/posts/hello", 2)]);
        let out = canonicalize(&raw);
        assert_eq!(out.get("/posts/hello.html"), Some(42));
        assert_eq!(out.get("/posts/hello"), Some(2));
    }

    #[test]
    fn test_canonicalize_orphan_left_alone() {
        let raw = table(&[("/bar?fbclid=z", 7)]);
        let out = canonicalize(&raw);
        assert_eq!(out.len(), 1);
        assert_eq!(out.get("/bar?fbclid=z"), Some(7));
    }

    #[test]
    fn test_canonicalize_empty() {
        assert!(canonicalize(&RawViewTable::new()).is_empty());
    }

    #[test]
    fn test_canonicalize_one_level_only() {
        // "/a" -> "/a.html" -> "/a.html.html": each parent gets the original
        // count of its direct child, nothing more.
        let raw = table(&[("/a", 1), ("/a.html", 10), ("/a.html.html", 100)]);
        let out = canonicalize(&raw);
        assert_eq!(out.get("/a"), Some(1));
        assert_eq!(out.get("/a.html"), Some(11));
        assert_eq!(out.get("/a.html.html"), Some(110));
    }

    #[test]
    fn test_canonicalize_never_invents_keys() {
        let raw = table(&[("/x", 3), ("/y?fbclid=1", 4), ("/z.html", 5)]);
        let out = canonicalize(&raw);
        for (path, _) in out.iter() {
            assert!(raw.get(path).is_some(), "{} was not in the input", path);
        }
        assert_eq!(out.len(), raw.len());
    }
}
