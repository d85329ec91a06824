use std::fs;
use std::path::PathBuf;

/// Raw bytes of `tests/fixtures/<name>.csv`. Bytes, not a string, because
/// some fixtures are deliberately not UTF-8.
pub fn load_fixture(name: &str) -> Vec<u8> {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(format!("{}.csv", name));

    fs::read(&path)
        .unwrap_or_else(|e| panic!("Failed to load fixture '{}' from {:?}: {}", name, path, e))
}
