//! Entry filtering: decides which listing entries take part in the graph

use crate::model::{EntryKind, ListingEntry};

/// Dependency caches. Any path through one of these is dropped.
const DEPENDENCY_SEGMENTS: &[&str] = &[
    "node_modules",
    "bower_components",
    "jspm_packages",
    "__pycache__",
];

/// Build output directories. Any path through one of these is dropped.
const OUTPUT_SEGMENTS: &[&str] = &["dist", "build", "target", "coverage", "out"];

/// Lock files and manifests that don't carry the `.lock` extension.
const ALLOWED_NAMES: &[&str] = &[
    "package-lock.json",
    "npm-shrinkwrap.json",
    "pnpm-lock.yaml",
    "go.sum",
];

/// Lock files of any ecosystem (`uv.lock`, `Podfile.lock`, ...) and tool
/// configuration written as code (`vite.config.ts`, `jest.config.js`, ...).
const ALLOWED_SUFFIXES: &[&str] = &[
    ".lock",
    ".config.js",
    ".config.ts",
    ".config.mjs",
    ".config.cjs",
];

/// Raster and vector image formats.
const EXCLUDED_SUFFIXES: &[&str] = &[
    ".png", ".jpg", ".jpeg", ".gif", ".svg", ".ico", ".webp", ".bmp", ".tif", ".tiff", ".avif",
];

/// Why an entry was kept or dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterDecision {
    Keep,
    /// Kept because it is a lock or config file. Checked before the extension rule.
    Allowlisted,
    /// Some segment starts with `.`.
    Hidden,
    /// Some segment is a dependency cache or build output directory.
    NoiseSegment,
    /// Image file.
    ExcludedExtension,
}

impl FilterDecision {
    pub fn is_kept(self) -> bool {
        matches!(self, FilterDecision::Keep | FilterDecision::Allowlisted)
    }
}

/// Classify a single entry. Rules apply in order; allowlisting beats extension exclusion
/// but never rescues a hidden or noise path.
pub fn decide(entry: &ListingEntry) -> FilterDecision {
    let mut segments = entry.segments().peekable();
    if segments.peek().is_none() {
        return FilterDecision::NoiseSegment;
    }

    for segment in segments {
        if segment.starts_with('.') {
            return FilterDecision::Hidden;
        }
        if DEPENDENCY_SEGMENTS.contains(&segment) || OUTPUT_SEGMENTS.contains(&segment) {
            return FilterDecision::NoiseSegment;
        }
    }

    if entry.kind == EntryKind::Directory {
        return FilterDecision::Keep;
    }

    let name = entry.basename();
    if is_allowlisted(name) {
        return FilterDecision::Allowlisted;
    }
    if has_suffix(name, EXCLUDED_SUFFIXES) {
        return FilterDecision::ExcludedExtension;
    }
    FilterDecision::Keep
}

/// Keep the entries that pass every rule, preserving listing order.
pub fn filter_entries(entries: &[ListingEntry]) -> Vec<&ListingEntry> {
    entries
        .iter()
        .filter(|entry| {
            let decision = decide(entry);
            if !decision.is_kept() {
                tracing::debug!("Dropping {} ({:?})", entry.path, decision);
            }
            decision.is_kept()
        })
        .collect()
}

fn is_allowlisted(name: &str) -> bool {
    ALLOWED_NAMES.iter().any(|allowed| allowed.eq_ignore_ascii_case(name))
        || has_suffix(name, ALLOWED_SUFFIXES)
}

fn has_suffix(name: &str, suffixes: &[&str]) -> bool {
    let lower = name.to_ascii_lowercase();
    suffixes.iter().any(|suffix| lower.ends_with(suffix))
}
