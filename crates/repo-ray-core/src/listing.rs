//! Parsing of upstream repository listings
//!
//! Two shapes are accepted:
//!
//! - flat: `[{"name": "src", "type": "dir"}, {"name": "README.md", "type": "file"}]`
//! - hierarchical: `{"tree": [{"path": "src/main.rs", "type": "blob"}], "truncated": false}`
//!
//! Extra fields (sha, size, url, ...) are ignored.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{Result, TransformError};
use crate::model::{EntryKind, ListingEntry, ListingMode};

/// A parsed listing, ready for the transform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    pub mode: ListingMode,
    pub entries: Vec<ListingEntry>,
    /// Set when the upstream reported that it cut the listing short.
    pub upstream_truncated: bool,
}

#[derive(Deserialize)]
struct FlatItem {
    name: String,
    #[serde(rename = "type", default)]
    kind: Option<String>,
}

#[derive(Deserialize)]
struct TreeItem {
    path: String,
    #[serde(rename = "type", default)]
    kind: Option<String>,
}

impl Listing {
    pub fn flat(entries: Vec<ListingEntry>) -> Self {
        Listing {
            mode: ListingMode::Flat,
            entries,
            upstream_truncated: false,
        }
    }

    pub fn hierarchical(entries: Vec<ListingEntry>) -> Self {
        Listing {
            mode: ListingMode::Hierarchical,
            entries,
            upstream_truncated: false,
        }
    }

    /// Parse a listing from JSON text.
    pub fn from_json(input: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(input)?;
        Self::from_value(value)
    }

    /// Parse a listing from an already-decoded JSON value.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Array(items) => {
                let entries = items
                    .into_iter()
                    .enumerate()
                    .map(|(i, item)| {
                        let item: FlatItem = serde_json::from_value(item)
                            .map_err(|e| TransformError::invalid(format!("entry {i}: {e}")))?;
                        Ok(ListingEntry::new(item.name, kind_from_upstream(item.kind.as_deref())))
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(Listing::flat(entries))
            }
            Value::Object(mut map) => {
                let tree = match map.remove("tree") {
                    Some(Value::Array(items)) => items,
                    Some(other) => {
                        return Err(TransformError::invalid(format!(
                            "`tree` must be an array, got {}",
                            json_type_name(&other)
                        )));
                    }
                    None => return Err(TransformError::invalid("object listing has no `tree` field")),
                };
                let upstream_truncated = map
                    .get("truncated")
                    .and_then(Value::as_bool)
                    .unwrap_or(false);

                let entries = tree
                    .into_iter()
                    .enumerate()
                    .map(|(i, item)| {
                        let item: TreeItem = serde_json::from_value(item)
                            .map_err(|e| TransformError::invalid(format!("tree entry {i}: {e}")))?;
                        Ok(ListingEntry::new(item.path, kind_from_upstream(item.kind.as_deref())))
                    })
                    .collect::<Result<Vec<_>>>()?;

                Ok(Listing {
                    mode: ListingMode::Hierarchical,
                    entries,
                    upstream_truncated,
                })
            }
            Value::Null => Err(TransformError::invalid("listing is missing")),
            other => Err(TransformError::invalid(format!(
                "expected an array of entries or an object with a `tree` array, got {}",
                json_type_name(&other)
            ))),
        }
    }
}

/// Map the upstream `type` string onto an entry kind.
fn kind_from_upstream(kind: Option<&str>) -> EntryKind {
    match kind {
        Some("file") | Some("blob") => EntryKind::File,
        Some("dir") | Some("tree") => EntryKind::Directory,
        other => {
            tracing::debug!("Unrecognised entry type {:?}, treating as generic file", other);
            EntryKind::Unknown
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flat_listing() {
        let listing = Listing::from_json(
            r#"[{"name":"README.md","type":"file"},{"name":"src","type":"dir","sha":"abc"}]"#,
        )
        .unwrap();

        assert_eq!(listing.mode, ListingMode::Flat);
        assert_eq!(
            listing.entries,
            vec![ListingEntry::file("README.md"), ListingEntry::dir("src")]
        );
    }

    #[test]
    fn test_parse_tree_listing() {
        let listing = Listing::from_json(
            r#"{"sha":"x","tree":[{"path":"src","type":"tree"},{"path":"src/a.ts","type":"blob","size":12}],"truncated":true}"#,
        )
        .unwrap();

        assert_eq!(listing.mode, ListingMode::Hierarchical);
        assert!(listing.upstream_truncated);
        assert_eq!(listing.entries[1], ListingEntry::file("src/a.ts"));
    }

    #[test]
    fn test_unknown_type_is_not_an_error() {
        let listing = Listing::from_json(
            r#"{"tree":[{"path":"vendor/lib","type":"commit"},{"path":"link"}]}"#,
        )
        .unwrap();

        assert!(listing.entries.iter().all(|e| e.kind == EntryKind::Unknown));
    }

    #[test]
    fn test_structural_errors() {
        let cases = [
            "null",
            "42",
            r#""src""#,
            r#"{"name":"README.md","type":"file"}"#,
            r#"{"tree":{"path":"a"}}"#,
            r#"[{"type":"file"}]"#,
            r#"{"tree":[{"type":"blob"}]}"#,
        ];

        for input in cases {
            let err = Listing::from_json(input).unwrap_err();
            assert!(
                matches!(err, TransformError::InvalidListing(_)),
                "expected InvalidListing for {input}, got {err:?}"
            );
        }
    }

    #[test]
    fn test_malformed_json() {
        let err = Listing::from_json("[{").unwrap_err();
        assert!(matches!(err, TransformError::Json(_)));
    }

    #[test]
    fn test_empty_listings_parse() {
        assert!(Listing::from_json("[]").unwrap().entries.is_empty());
        assert!(Listing::from_json(r#"{"tree":[]}"#).unwrap().entries.is_empty());
    }
}
