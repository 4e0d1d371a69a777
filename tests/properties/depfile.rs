//! Property tests for the make-include dependency record.

use std::path::PathBuf;

use proptest::prelude::*;

use stampcheck::{parse_depfile, render_depfile, DependencyRecord};

// Spaces, '#', '$' and backslashes before them all need escaping in make
// syntax. Backslashes are path separators on Windows.
#[cfg(unix)]
const SEGMENT: &str = "[A-Za-z0-9_#$ .\\\\-]{1,8}";
#[cfg(not(unix))]
const SEGMENT: &str = "[A-Za-z0-9_#$ .-]{1,8}";

fn segment() -> impl Strategy<Value = String> {
    proptest::string::string_regex(SEGMENT)
        .unwrap()
        .prop_filter("not a dot component", |s| s != "." && s != "..")
}

fn make_path() -> impl Strategy<Value = PathBuf> {
    proptest::collection::vec(segment(), 1..=3).prop_map(|parts| PathBuf::from(parts.join("/")))
}

fn record() -> impl Strategy<Value = DependencyRecord> {
    proptest::collection::vec(
        (make_path(), proptest::collection::vec(make_path(), 1..=5)),
        0..=4,
    )
    .prop_map(|rules| {
        let mut record = DependencyRecord::new();
        for (stamp, deps) in rules {
            record.set_rule(&stamp, &deps);
        }
        record
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Parsing arbitrary input never panics.
    #[test]
    fn property_parse_never_panics(content in "(?s).{0,256}") {
        let _ = parse_depfile(&content);
    }

    /// PROPERTY: A rendered record parses back to the same rules.
    #[test]
    fn property_render_parse_round_trip(record in record()) {
        let rendered = render_depfile(&record);

        let parsed = parse_depfile(&rendered)
            .unwrap_or_else(|e| panic!("rendered record failed to parse: {}\n{}", e, rendered));

        prop_assert_eq!(parsed, record);
    }

    /// PROPERTY: Rendering is deterministic, so an unchanged record is
    /// written byte-identical.
    #[test]
    fn property_render_is_stable(record in record()) {
        let once = render_depfile(&record);
        let twice = render_depfile(&parse_depfile(&once).unwrap());

        prop_assert_eq!(once, twice);
    }
}
