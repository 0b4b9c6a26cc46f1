//! Shape classification for file nodes

use crate::model::{EntryKind, ShapeKind};

/// How a rule matches a basename. Suffix and extension matching ignore ASCII case.
#[derive(Debug, Clone, Copy)]
enum Rule {
    FileName(&'static str),
    Suffix(&'static str),
    Extension(&'static str),
}

impl Rule {
    fn matches(self, name: &str, extension: Option<&str>) -> bool {
        match self {
            Rule::FileName(n) => n == name,
            Rule::Suffix(s) => name.to_ascii_lowercase().ends_with(s),
            Rule::Extension(e) => extension.is_some_and(|ext| ext.eq_ignore_ascii_case(e)),
        }
    }
}

/// Checked top to bottom, first match wins. Anything unmatched is a generic file.
const RULES: &[(Rule, ShapeKind)] = &[
    // ── Manifests / config ──────────────────────────────────
    (Rule::FileName("Dockerfile"), ShapeKind::ConfigFile),
    (Rule::FileName("Makefile"), ShapeKind::ConfigFile),
    (Rule::FileName("go.mod"), ShapeKind::ConfigFile),
    (Rule::FileName("go.sum"), ShapeKind::ConfigFile),
    (Rule::FileName("Gemfile"), ShapeKind::ConfigFile),
    (Rule::FileName("Pipfile"), ShapeKind::ConfigFile),
    (Rule::FileName("requirements.txt"), ShapeKind::ConfigFile),
    (Rule::Suffix(".config.js"), ShapeKind::ConfigFile),
    (Rule::Suffix(".config.ts"), ShapeKind::ConfigFile),
    (Rule::Suffix(".config.mjs"), ShapeKind::ConfigFile),
    (Rule::Suffix(".config.cjs"), ShapeKind::ConfigFile),
    (Rule::Extension("json"), ShapeKind::ConfigFile),
    (Rule::Extension("jsonc"), ShapeKind::ConfigFile),
    (Rule::Extension("yaml"), ShapeKind::ConfigFile),
    (Rule::Extension("yml"), ShapeKind::ConfigFile),
    (Rule::Extension("toml"), ShapeKind::ConfigFile),
    (Rule::Extension("ini"), ShapeKind::ConfigFile),
    (Rule::Extension("cfg"), ShapeKind::ConfigFile),
    (Rule::Extension("lock"), ShapeKind::ConfigFile),
    // ── Documentation ───────────────────────────────────────
    (Rule::Extension("md"), ShapeKind::DocFile),
    (Rule::Extension("mdx"), ShapeKind::DocFile),
    (Rule::Extension("markdown"), ShapeKind::DocFile),
];

/// Classify a file by its basename.
pub fn classify_file(name: &str) -> ShapeKind {
    let extension = name
        .rsplit_once('.')
        .filter(|(stem, _)| !stem.is_empty())
        .map(|(_, ext)| ext);

    RULES
        .iter()
        .find(|(rule, _)| rule.matches(name, extension))
        .map_or(ShapeKind::GenericFile, |&(_, shape)| shape)
}

/// Shape for a leaf entry of the given kind.
///
/// Directories are always directories; unrecognised kinds degrade to generic files
/// without looking at the name.
pub fn shape_for(kind: EntryKind, name: &str) -> ShapeKind {
    match kind {
        EntryKind::Directory => ShapeKind::Directory,
        EntryKind::File => classify_file(name),
        EntryKind::Unknown => ShapeKind::GenericFile,
    }
}
