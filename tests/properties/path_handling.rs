//! Property tests for path normalization.

use std::path::{Path, PathBuf};

use proptest::prelude::*;

use stampcheck::domain::value_objects::normalize;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Normalizing twice changes nothing.
    #[test]
    fn property_normalize_is_idempotent(parts in proptest::collection::vec("[a-z.]{1,4}", 1..=5)) {
        let path = PathBuf::from(parts.join("/"));
        let once = normalize(&path);

        prop_assert_eq!(normalize(&once), once);
    }

    /// PROPERTY: A `./` prefix never changes the record key.
    #[test]
    fn property_cur_dir_prefix_is_dropped(name in "[A-Za-z_][A-Za-z0-9_]{0,8}\\.py") {
        prop_assert_eq!(
            normalize(&Path::new(".").join(&name)),
            normalize(Path::new(&name))
        );
    }
}
