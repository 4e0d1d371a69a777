//! Property tests for the Python import parser.

use proptest::prelude::*;

use stampcheck::infrastructure::discovery::{parse_imports, ImportStatement};

fn module_name() -> impl Strategy<Value = String> {
    proptest::collection::vec("[a-z_][a-z0-9_]{0,6}", 1..=3)
        .prop_filter("not a keyword", |parts| {
            parts.iter().all(|p| !matches!(p.as_str(), "import" | "from" | "as"))
        })
        .prop_map(|parts| parts.join("."))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Parsing arbitrary source never panics.
    #[test]
    fn property_parse_never_panics(source in "(?s).{0,256}") {
        let _ = parse_imports(&source);
    }

    /// PROPERTY: Every top-level `import x` line is found, whatever
    /// surrounds it.
    #[test]
    fn property_plain_imports_are_found(
        modules in proptest::collection::vec(module_name(), 1..=6),
        filler in proptest::collection::vec("[a-z ]{0,20}", 0..=6),
    ) {
        let mut source = String::new();
        for (i, module) in modules.iter().enumerate() {
            if let Some(line) = filler.get(i) {
                source.push_str(&format!("# {}\n", line));
            }
            source.push_str(&format!("import {}\n", module));
        }

        let found: Vec<String> = parse_imports(&source)
            .into_iter()
            .flat_map(|stmt| match stmt {
                ImportStatement::Import(names) => names,
                ImportStatement::From { .. } => Vec::new(),
            })
            .collect();

        prop_assert_eq!(found, modules);
    }
}
