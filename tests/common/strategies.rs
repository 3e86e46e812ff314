use proptest::prelude::*;

/// Strategy for generating portable file names
pub fn file_name_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_][a-zA-Z0-9_.-]{0,31}".prop_filter("not a dot path", |name| {
        name != "." && name != ".."
    })
}

/// Strategy for generating relative directory prefixes of varying depth
pub fn directory_prefix_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z0-9]{1,8}", 0..5)
}

/// Strategy for generating arbitrary file contents, including invalid UTF-8
pub fn file_content_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..4096)
}

/// Strategy for generating batches of uniquely named files with contents
pub fn batch_strategy() -> impl Strategy<Value = Vec<(String, Vec<u8>)>> {
    prop::collection::btree_map(file_name_strategy(), file_content_strategy(), 1..8)
        .prop_map(|files| files.into_iter().collect())
}
