//! Node identifiers and display labels
//!
//! Identifiers are derived from the full accumulated path, never from the basename
//! alone, so `src/index.ts` and `lib/index.ts` get different ids. The shape is
//!
//! ```text
//! n_<ascii alphanumerics of the path>_<8 hex digits of xxh3(path)>
//! ```
//!
//! The `n_` tag keeps every id non-empty, stops it from spelling a grammar keyword
//! (`end`, `graph`, `style`, ...) and keeps it apart from `ROOT` and `OVERFLOW`.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use xxhash_rust::xxh3::xxh3_64;

use crate::model::{DataQualityIssue, NodeId};

/// Tag every derived identifier starts with.
pub const ID_PREFIX: &str = "n_";

/// Label used when a basename has nothing displayable left.
pub const FALLBACK_LABEL: &str = "unnamed";

static ID_STRIP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9]").expect("static identifier pattern"));

static LABEL_STRIP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{L}\p{N}._-]").expect("static label pattern"));

/// Derive the identifier for an accumulated path. Pure: same path, same id.
pub fn derive_identifier(path: &str) -> NodeId {
    let body = ID_STRIP.replace_all(path, "");
    let hash = xxh3_64(path.as_bytes()) as u32;
    NodeId(format!("{ID_PREFIX}{body}_{hash:08x}"))
}

/// Strip a basename down to letters, digits, `.`, `-` and `_`.
pub fn sanitize_label(basename: &str) -> String {
    let label = LABEL_STRIP.replace_all(basename, "");
    if label.is_empty() {
        FALLBACK_LABEL.to_string()
    } else {
        label.into_owned()
    }
}

/// Per-run record of which path owns which identifier.
///
/// Hash suffixes make collisions between distinct paths vanishingly rare; the
/// registry turns "rare" into "never" by suffixing the later path.
#[derive(Debug, Default, Clone)]
pub struct IdRegistry {
    owners: HashMap<NodeId, String>,
}

impl IdRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Identifier for `path`, plus an issue if it had to be disambiguated.
    pub fn claim(&mut self, path: &str) -> (NodeId, Option<DataQualityIssue>) {
        let base = derive_identifier(path);
        let mut id = base.clone();
        let mut n = 1;
        loop {
            match self.owners.get(&id) {
                Some(owner) if owner == path => return (id, None),
                Some(_) => {
                    n += 1;
                    id = NodeId(format!("{}_{n}", base.0));
                }
                None => break,
            }
        }

        self.owners.insert(id.clone(), path.to_string());
        if n == 1 {
            return (id, None);
        }

        tracing::warn!("Identifier collision for {}, using {}", path, id);
        let issue = DataQualityIssue::IdentifierCollision {
            path: path.to_string(),
            id: id.clone(),
        };
        (id, Some(issue))
    }

    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }
}
