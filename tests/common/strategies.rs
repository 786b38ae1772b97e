use helpers_namespace::constants::is_reserved;
use proptest::prelude::*;

/// Strategy for generating names that may be bound in a namespace
pub fn helper_name_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z_][a-zA-Z0-9_]{0,31}".prop_filter("Reserved names are never bound", |name| {
        !is_reserved(name)
    })
}

/// Strategy for generating multi-segment paths below the root
pub fn helper_path_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(helper_name_strategy(), 1..5)
}

/// Strategy for generating several distinct top-level names
pub fn distinct_names_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::btree_set(helper_name_strategy(), 1..8)
        .prop_map(|names| names.into_iter().collect())
}
