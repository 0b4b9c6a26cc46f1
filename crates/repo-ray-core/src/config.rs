//! Transform settings

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::ListingMode;

/// Default cap on placed entries for a flat listing.
pub const DEFAULT_FLAT_CAP: usize = 25;

/// Default cap on placed entries for a recursive tree listing.
pub const DEFAULT_TREE_CAP: usize = 50;

/// Default label of the synthetic root node.
pub const DEFAULT_ROOT_LABEL: &str = "Repository";

/// Layout direction of the emitted diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    TD,
    LR,
    BT,
    RL,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::TD => "TD",
            Direction::LR => "LR",
            Direction::BT => "BT",
            Direction::RL => "RL",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformConfig {
    pub flat_cap: usize,
    pub tree_cap: usize,
    /// Prefix labels with a per-shape icon.
    pub icons: bool,
    pub direction: Direction,
    pub root_label: String,
}

impl Default for TransformConfig {
    fn default() -> Self {
        TransformConfig {
            flat_cap: DEFAULT_FLAT_CAP,
            tree_cap: DEFAULT_TREE_CAP,
            icons: true,
            direction: Direction::TD,
            root_label: DEFAULT_ROOT_LABEL.to_string(),
        }
    }
}

impl TransformConfig {
    /// Entry cap for the given listing mode.
    pub fn cap_for(&self, mode: ListingMode) -> usize {
        match mode {
            ListingMode::Flat => self.flat_cap,
            ListingMode::Hierarchical => self.tree_cap,
        }
    }

    /// Use one cap for both modes.
    pub fn with_cap(mut self, cap: usize) -> Self {
        self.flat_cap = cap;
        self.tree_cap = cap;
        self
    }

    pub fn with_root_label(mut self, label: impl Into<String>) -> Self {
        self.root_label = label.into();
        self
    }

    pub fn without_icons(mut self) -> Self {
        self.icons = false;
        self
    }
}
