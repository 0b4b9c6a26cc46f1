//! Test fixtures for listings

use serde_json::json;

use crate::listing::Listing;
use crate::model::ListingEntry;

/// Flat listing from `(name, "file" | "dir")` pairs, parsed through the JSON contract.
pub fn flat_listing(entries: &[(&str, &str)]) -> Listing {
    let items: Vec<_> = entries
        .iter()
        .map(|(name, kind)| json!({ "name": name, "type": kind }))
        .collect();
    Listing::from_value(json!(items)).unwrap()
}

/// Tree listing from `(path, "blob" | "tree")` pairs, parsed through the JSON contract.
pub fn tree_listing(entries: &[(&str, &str)]) -> Listing {
    Listing::from_value(tree_json(entries)).unwrap()
}

/// Raw tree listing body as the upstream would send it.
pub fn tree_json(entries: &[(&str, &str)]) -> serde_json::Value {
    let items: Vec<_> = entries
        .iter()
        .map(|(path, kind)| json!({ "path": path, "type": kind, "mode": "100644" }))
        .collect();
    json!({ "sha": "0000000", "tree": items, "truncated": false })
}

/// `count` visible source files named `file00.rs`, `file01.rs`, ...
pub fn numbered_files(count: usize) -> Vec<ListingEntry> {
    (0..count)
        .map(|i| ListingEntry::file(format!("file{i:02}.rs")))
        .collect()
}

/// A small but realistic tree: explicit directory entries, dotfiles, build output,
/// images and a lock file.
pub fn sample_repo() -> Listing {
    tree_listing(&[
        (".github", "tree"),
        (".github/workflows/ci.yml", "blob"),
        (".gitignore", "blob"),
        ("Cargo.lock", "blob"),
        ("Cargo.toml", "blob"),
        ("README.md", "blob"),
        ("docs", "tree"),
        ("docs/architecture.md", "blob"),
        ("docs/diagram.png", "blob"),
        ("src", "tree"),
        ("src/main.rs", "blob"),
        ("src/utils", "tree"),
        ("src/utils/helpers.rs", "blob"),
        ("target/debug/app", "blob"),
        ("web/node_modules/react/index.js", "blob"),
        ("web/package.json", "blob"),
        ("web/vite.config.ts", "blob"),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ListingMode;

    #[test]
    fn test_fixtures_parse() {
        assert_eq!(flat_listing(&[("a", "file")]).mode, ListingMode::Flat);
        assert_eq!(sample_repo().mode, ListingMode::Hierarchical);
        assert_eq!(sample_repo().entries.len(), 17);
        assert_eq!(numbered_files(3)[2].path, "file02.rs");
    }
}
